//! Mock backend routes and handlers

use crate::state::{role_permissions, AppState};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::client::{
    LoginRequest, LoginResponse, RolePermissionsResponse, UserPermissionsResponse,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{EmployeeCreate, EmployeeRecord, EmployeeUpdate};
use shared::ApiResponse;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: String,
    exp: usize,
}

/// Friendly form of a role tag ("hr_manager" -> "Hr Manager")
fn display_role(role: &str) -> String {
    role.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn mint_token(state: &AppState, user_id: &str, email: &str, role: &str) -> String {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .unwrap_or_default()
}

/// Verify the bearer token, returning its claims
fn authorize_bearer(state: &AppState, headers: &HeaderMap) -> Result<Claims, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return Err(AppError::not_authenticated());
    };

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::new(ErrorCode::TokenInvalid))
}

// ========== Auth ==========

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Json<LoginResponse> {
    match state.authenticate(&req.email, &req.password) {
        Some(user) => {
            let token = mint_token(&state, &user.id, &user.email, &user.role);
            tracing::debug!(user = %user.id, "login ok");
            Json(LoginResponse {
                success: true,
                token: Some(token),
                user: Some(user),
                message: None,
            })
        }
        None => Json(LoginResponse {
            success: false,
            token: None,
            user: None,
            message: Some("Invalid email or password".to_string()),
        }),
    }
}

async fn user_permissions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserPermissionsResponse>, AppError> {
    let claims = authorize_bearer(&state, &headers)?;
    let user = state
        .profile_by_id(&claims.sub)
        .ok_or_else(AppError::not_authenticated)?;

    Ok(Json(UserPermissionsResponse {
        permissions: role_permissions(&user.role),
        display_name: display_role(&user.role),
        role: user.role,
    }))
}

async fn role_defaults(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(role): Path<String>,
) -> Result<Json<RolePermissionsResponse>, AppError> {
    authorize_bearer(&state, &headers)?;

    // Unknown roles answer an empty set; the caller is fail-closed anyway
    Ok(Json(RolePermissionsResponse {
        permissions: role_permissions(&role),
    }))
}

// ========== Employees ==========

async fn list_employees(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<EmployeeRecord>>>, AppError> {
    authorize_bearer(&state, &headers)?;

    let employees = state.employees().read().await;
    let mut records: Vec<EmployeeRecord> = employees.values().cloned().collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(ApiResponse::ok(records)))
}

async fn team_members(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<EmployeeRecord>>>, AppError> {
    let claims = authorize_bearer(&state, &headers)?;
    let me = state
        .profile_by_id(&claims.sub)
        .ok_or_else(AppError::not_authenticated)?;

    let employees = state.employees().read().await;
    let mut records: Vec<EmployeeRecord> = employees
        .values()
        .filter(|record| record.department == me.department && record.id != me.id)
        .cloned()
        .collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(ApiResponse::ok(records)))
}

async fn create_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<EmployeeCreate>,
) -> Result<Json<ApiResponse<EmployeeRecord>>, AppError> {
    authorize_bearer(&state, &headers)?;

    let mut employees = state.employees().write().await;
    if employees.values().any(|record| record.email == req.email) {
        return Err(AppError::new(ErrorCode::EmployeeEmailExists));
    }

    let record = EmployeeRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        // Starting permissions come from the assigned role unless the
        // caller sent an explicit set
        permissions: req
            .permissions
            .unwrap_or_else(|| role_permissions(&req.role)),
        role: req.role,
        department: req.department,
        is_active: true,
    };
    employees.insert(record.id.clone(), record.clone());
    tracing::debug!(employee = %record.id, "employee created");
    Ok(Json(ApiResponse::ok(record)))
}

async fn update_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<EmployeeUpdate>,
) -> Result<Json<ApiResponse<EmployeeRecord>>, AppError> {
    authorize_bearer(&state, &headers)?;

    let mut employees = state.employees().write().await;
    let record = employees
        .get_mut(&id)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    if let Some(name) = req.name {
        record.name = name;
    }
    if let Some(email) = req.email {
        record.email = email;
    }
    if let Some(role) = req.role {
        record.role = role;
    }
    if let Some(department) = req.department {
        record.department = department;
    }
    if let Some(permissions) = req.permissions {
        record.permissions = permissions;
    }
    if let Some(is_active) = req.is_active {
        record.is_active = is_active;
    }

    Ok(Json(ApiResponse::ok(record.clone())))
}

async fn delete_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let claims = authorize_bearer(&state, &headers)?;

    if claims.sub == id {
        return Err(AppError::new(ErrorCode::EmployeeCannotDeleteSelf));
    }

    let mut employees = state.employees().write().await;
    employees
        .remove(&id)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    Ok(Json(ApiResponse::ok(())))
}

/// Build the mock backend router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/user-permissions", get(user_permissions))
        .route("/api/roles/{role}/permissions", get(role_defaults))
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/team", get(team_members))
        .route(
            "/api/employees/{id}",
            put(update_employee).delete(delete_employee),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
