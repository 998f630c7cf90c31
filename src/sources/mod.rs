pub mod file;
pub mod revision_log;
pub mod traits;

pub use file::SnapshotDirSource;
pub use revision_log::build_revision_log;
pub use traits::{DictionarySource, RevisionDescriptor, RevisionHandle};
