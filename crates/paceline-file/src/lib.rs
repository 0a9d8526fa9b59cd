//! paceline-file - File-backed key-value storage.
//!
//! Persists the session token between runs of a paceline client, the way a
//! browser or mini-program keeps it in local storage.

mod store;

pub use store::FileStore;
