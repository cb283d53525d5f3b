//! Mock HR backend
//!
//! An in-memory stand-in for the real HR backend, serving the auth,
//! permission and employee endpoints. Integration tests mount
//! [`api::router`] directly; `main.rs` serves it for local development.

pub mod api;
pub mod state;

pub use api::router;
pub use state::AppState;
