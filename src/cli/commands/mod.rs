pub mod compare;
pub mod export;
pub mod html;
pub mod revisions;
