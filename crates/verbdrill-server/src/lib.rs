//! verbdrill-server — HTTP API and session stand-in.
//!
//! Exposes the round engine, preset catalog, and a throwaway auth flow over
//! JSON, wrapping every body in `{"data": ...}`.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use auth::AuthStore;
pub use config::{load_config, load_config_from, ServerConfig};
pub use error::ApiError;
pub use server::{serve, Server};
