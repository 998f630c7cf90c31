//! Identity lookup: resolving numeric user ids to display names.
//!
//! The revision log stores requester/approver user ids; the UI wants
//! `"<username> (<first name> <last name>)"`. Lookups go through a
//! [`UserDirectory`] and are cached per resolver, which is scoped to one
//! listing/comparison request — the cache never leaks across requests.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Sentinel returned for non-numeric ids and failed lookups.
pub const UNKNOWN_USER: &str = "Unknown";

/// A user record as stored in the host system's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

impl UserInfo {
    /// Display form used everywhere a user is shown.
    pub fn display(&self) -> String {
        format!("{} ({} {})", self.username, self.first_name, self.last_name)
    }
}

/// Directory of users keyed by numeric id.
pub trait UserDirectory {
    fn lookup(&self, ui_id: u64) -> Option<UserInfo>;
}

/// Resolves raw user-id strings to display names, caching per batch.
///
/// Non-numeric input and directory misses both resolve to
/// [`UNKNOWN_USER`]; a failed lookup never fails the surrounding request.
pub struct IdentityResolver<D: UserDirectory> {
    directory: D,
    cache: HashMap<u64, String>,
}

impl<D: UserDirectory> IdentityResolver<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, raw_id: &str) -> String {
        let Ok(ui_id) = raw_id.trim().parse::<u64>() else {
            return UNKNOWN_USER.to_owned();
        };

        if let Some(display) = self.cache.get(&ui_id) {
            return display.clone();
        }

        let display = match self.directory.lookup(ui_id) {
            Some(user) => user.display(),
            None => UNKNOWN_USER.to_owned(),
        };
        self.cache.insert(ui_id, display.clone());
        display
    }
}

/// A [`UserDirectory`] backed by a `users.json` file: a map of numeric id
/// (as a string key) to [`UserInfo`].
#[derive(Debug, Clone, Default)]
pub struct JsonUserDirectory {
    users: HashMap<u64, UserInfo>,
}

impl JsonUserDirectory {
    /// Load a directory from disk. A missing or unreadable file yields an
    /// empty directory (every lookup resolves to Unknown) rather than an
    /// error — identity resolution must not fail a comparison.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str::<HashMap<String, UserInfo>>(&content) {
            Ok(raw) => Self {
                users: raw
                    .into_iter()
                    .filter_map(|(id, user)| id.parse::<u64>().ok().map(|id| (id, user)))
                    .collect(),
            },
            Err(e) => {
                warn!("failed to parse user directory at {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

impl UserDirectory for JsonUserDirectory {
    fn lookup(&self, ui_id: u64) -> Option<UserInfo> {
        self.users.get(&ui_id).cloned()
    }
}
