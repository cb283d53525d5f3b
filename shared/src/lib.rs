//! Shared types for the Tikidan HR platform
//!
//! Common types used across multiple crates: API DTOs, error codes,
//! response structures, and utility helpers.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use client::{
    LoginRequest, LoginResponse, RolePermissionsResponse, UserPermissionsResponse, UserProfile,
};
pub use response::ApiResponse;
