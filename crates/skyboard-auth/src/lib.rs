//! Credential acquisition for Skyboard.
//!
//! The dashboard only ever asks for "a valid bearer token for this audience".
//! Interactive sign-in happens elsewhere; this crate hands out tokens it already
//! has, refreshing them when a refresh token is available.

pub mod credential;
pub mod error;
pub mod refresh;
pub mod storage;

pub use credential::{CredentialSource, StaticCredential};
pub use error::AuthError;
pub use refresh::{RefreshConfig, RefreshingCredentialSource};
pub use storage::{TokenSet, TokenStore};
