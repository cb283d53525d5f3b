//! Tikidan Client - HTTP client for the HR backend
//!
//! Provides network-based HTTP calls to the HR backend REST API.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{
    ApiResponse, LoginResponse, RolePermissionsResponse, UserPermissionsResponse, UserProfile,
};
pub use shared::models::{EmployeeCreate, EmployeeRecord, EmployeeUpdate};
