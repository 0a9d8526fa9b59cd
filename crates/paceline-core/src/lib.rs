//! paceline-core - Core types for the paceline running-analysis client.
//!
//! This crate holds everything that is independent of the transport: the
//! error taxonomy, validated URL and token types, the wire models of the
//! backend, the storage and redirect traits, and the [`Session`] that owns
//! the bearer-token lifecycle.
//!
//! # Example
//!
//! ```
//! use paceline_core::{MemoryStore, Session};
//!
//! let session = Session::restore(MemoryStore::new()).unwrap();
//! assert!(!session.is_logged_in());
//! ```

pub mod credentials;
pub mod error;
pub mod model;
pub mod redirect;
pub mod session;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::{Credentials, LoginIdentifier};
pub use error::Error;
pub use redirect::{LoginRedirect, NoRedirect};
pub use session::Session;
pub use store::{KeyValueStore, MemoryStore, TOKEN_KEY};
pub use tokens::BearerToken;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
