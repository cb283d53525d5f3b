//! HTTP client for network-based API calls

use crate::{ApiResponse, ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::client::{LoginRequest, LoginResponse, RolePermissionsResponse, UserPermissionsResponse};
use shared::models::{EmployeeCreate, EmployeeRecord, EmployeeUpdate};

/// HTTP client for making network requests to the HR backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Clear the authentication token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.put(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.delete(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(%status, "request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    fn unwrap_data<T>(response: ApiResponse<T>, what: &str) -> ClientResult<T> {
        response
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
    }

    // ========== Auth API ==========

    /// Login with email and password
    ///
    /// A rejected login is not a transport error: the backend answers 200
    /// with `success == false` and a message for the login view.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.post::<LoginResponse, _>("/api/auth/login", &request)
            .await
    }

    /// Fetch the permission set of the currently authenticated user
    pub async fn user_permissions(&self) -> ClientResult<UserPermissionsResponse> {
        self.get::<UserPermissionsResponse>("/api/auth/user-permissions")
            .await
    }

    /// Fetch the default permission set for a role
    pub async fn role_permissions(&self, role: &str) -> ClientResult<RolePermissionsResponse> {
        self.get::<RolePermissionsResponse>(&format!("/api/roles/{}/permissions", role))
            .await
    }

    // ========== Employee API ==========

    /// List all employees
    pub async fn list_employees(&self) -> ClientResult<Vec<EmployeeRecord>> {
        let response = self
            .get::<ApiResponse<Vec<EmployeeRecord>>>("/api/employees")
            .await?;
        Self::unwrap_data(response, "employee list")
    }

    /// Members of the current user's team
    pub async fn team_members(&self) -> ClientResult<Vec<EmployeeRecord>> {
        let response = self
            .get::<ApiResponse<Vec<EmployeeRecord>>>("/api/employees/team")
            .await?;
        Self::unwrap_data(response, "team member")
    }

    /// Create an employee
    pub async fn create_employee(&self, employee: &EmployeeCreate) -> ClientResult<EmployeeRecord> {
        let response = self
            .post::<ApiResponse<EmployeeRecord>, _>("/api/employees", employee)
            .await?;
        Self::unwrap_data(response, "employee")
    }

    /// Update an employee
    pub async fn update_employee(
        &self,
        id: &str,
        update: &EmployeeUpdate,
    ) -> ClientResult<EmployeeRecord> {
        let response = self
            .put::<ApiResponse<EmployeeRecord>, _>(&format!("/api/employees/{}", id), update)
            .await?;
        Self::unwrap_data(response, "employee")
    }

    /// Delete an employee
    pub async fn delete_employee(&self, id: &str) -> ClientResult<()> {
        self.delete::<ApiResponse<()>>(&format!("/api/employees/{}", id))
            .await?;
        Ok(())
    }
}
