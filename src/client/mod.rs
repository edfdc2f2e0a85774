// File: ./src/client/mod.rs
pub mod auth;
pub mod cert;
pub mod cookies;
pub mod core;
pub mod fetch;
pub mod middleware;
pub mod redirect;

pub use crate::client::auth::{Credentials, LoginOutcome};
pub use crate::client::core::GradescopeClient;
pub use crate::client::fetch::{DocumentSource, FetchStrategy, Retrieval, retrieve_assignments};
