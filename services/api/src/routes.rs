//! API service routes
//!
//! Every handler validates its inputs, performs one storage operation and
//! maps the outcome to a response. Failures surface as [`ApiError`].

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use common::{
    error::DatabaseError,
    password::{hash_password, verify_password},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{
        DEFAULT_STATUS, MessageResponse, SuccessResponse,
        pothole::{NewPothole, ReportPotholeRequest, ReportPotholeResponse},
        traffic_light::{
            NewTrafficLightIssue, ReportTrafficLightRequest, ReportTrafficLightResponse,
            StatusChange, UpdateStatusRequest,
        },
        user::{LoginRequest, NewUser, RegisterRequest, RegisterResponse},
    },
    validation::{parse_severity, present, validate_email},
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/potholes", get(list_potholes).post(report_pothole))
        .route(
            "/api/traffic-lights",
            get(list_traffic_lights).post(report_traffic_light),
        )
        .route("/api/traffic-lights/:id", put(update_traffic_light_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint, pinging the document store
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"status": "ok", "message": "Database connected"})),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": e.to_string()})),
            )
        }
    }
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (present(&payload.username), present(&payload.password))
    else {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    };

    let user = state
        .user_repository
        .find_by_username(username)
        .await
        .map_err(ApiError::storage("Server error during login"))?;

    let Some(user) = user else {
        warn!("Login failed for unknown user: {}", username);
        return Err(ApiError::Unauthorized);
    };

    let verified = verify_password(password, &user.password_hash).map_err(|e| {
        ApiError::Internal(format!("Failed to verify password for {}: {}", username, e))
    })?;

    if !verified {
        warn!("Login failed for user: {}", username);
        return Err(ApiError::Unauthorized);
    }

    info!(user_id = %user.id, "User logged in: {}", username);
    Ok(Json(SuccessResponse {
        success: true,
        message: "Login successful".to_string(),
    }))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let (Some(fullname), Some(email), Some(username), Some(password)) = (
        present(&payload.fullname),
        present(&payload.email),
        present(&payload.username),
        present(&payload.password),
    ) else {
        return Err(ApiError::Validation("All fields are required".to_string()));
    };

    validate_email(email).map_err(ApiError::Validation)?;

    let password_hash = hash_password(password)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    let new_user = NewUser {
        fullname: fullname.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        password_hash,
        created_at: Utc::now(),
    };

    let user_id = match state.user_repository.create(&new_user).await {
        Ok(id) => id,
        Err(DatabaseError::DuplicateKey { key, .. }) if key == "username" => {
            return Err(ApiError::Conflict {
                code: "username_exists",
                message: "Username already exists",
            });
        }
        Err(DatabaseError::DuplicateKey { key, .. }) if key == "email" => {
            return Err(ApiError::Conflict {
                code: "email_exists",
                message: "Email already registered",
            });
        }
        Err(e) => return Err(ApiError::storage("Server error during registration")(e)),
    };

    info!("User registered successfully: {}", username);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".to_string(),
            user_id,
        }),
    ))
}

/// Get all potholes
pub async fn list_potholes(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let potholes = state
        .pothole_repository
        .get_all()
        .await
        .map_err(ApiError::storage("Server error while fetching potholes"))?;

    Ok(Json(potholes))
}

/// Report a new pothole
pub async fn report_pothole(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ReportPotholeRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let (Some(latitude), Some(longitude)) = (payload.latitude, payload.longitude) else {
        return Err(ApiError::Validation(
            "Latitude and longitude are required".to_string(),
        ));
    };

    let severity = parse_severity(&payload.severity).map_err(ApiError::Validation)?;

    let pothole = NewPothole {
        latitude,
        longitude,
        severity,
        description: payload.description.unwrap_or_default(),
        status: DEFAULT_STATUS.to_string(),
        reported_at: Utc::now(),
    };

    let id = state
        .pothole_repository
        .create(&pothole)
        .await
        .map_err(ApiError::storage("Server error while reporting pothole"))?;

    info!(%id, severity = %severity, "Pothole reported");
    Ok((
        StatusCode::CREATED,
        Json(ReportPotholeResponse {
            success: true,
            message: "Pothole reported successfully".to_string(),
            id,
        }),
    ))
}

/// Get all traffic-light issues
pub async fn list_traffic_lights(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let issues = state
        .traffic_light_repository
        .get_all()
        .await
        .map_err(ApiError::storage(
            "Server error while fetching traffic light issues",
        ))?;

    Ok(Json(issues))
}

/// Report a new traffic-light issue
pub async fn report_traffic_light(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ReportTrafficLightRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let (Some(location), Some(issue_type)) =
        (present(&payload.location), present(&payload.issue_type))
    else {
        return Err(ApiError::Validation(
            "Location and issue type are required".to_string(),
        ));
    };

    let now = Utc::now();
    let issue = NewTrafficLightIssue {
        location: location.to_string(),
        issue_type: issue_type.to_string(),
        description: payload.description.clone().unwrap_or_default(),
        status: present(&payload.status)
            .unwrap_or(DEFAULT_STATUS)
            .to_string(),
        timestamp: now,
        updated_at: now,
    };

    let id = state
        .traffic_light_repository
        .create(&issue)
        .await
        .map_err(ApiError::storage(
            "Server error while reporting traffic light issue",
        ))?;

    info!(%id, issue_type = %issue.issue_type, "Traffic light issue reported");
    Ok((
        StatusCode::CREATED,
        Json(ReportTrafficLightResponse {
            message: "Traffic light issue reported successfully".to_string(),
            id,
        }),
    ))
}

/// Update the status of a traffic-light issue
pub async fn update_traffic_light_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateStatusRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let Some(status) = present(&payload.status) else {
        return Err(ApiError::Validation("Status is required".to_string()));
    };

    let not_found = || ApiError::NotFound("Traffic light issue not found".to_string());
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;

    let change = StatusChange {
        status: status.to_string(),
        updated_at: Utc::now(),
    };

    let updated = state
        .traffic_light_repository
        .update_status(id, &change)
        .await
        .map_err(ApiError::storage(
            "Server error while updating traffic light issue",
        ))?;

    if !updated {
        return Err(not_found());
    }

    info!(%id, status, "Traffic light issue status updated");
    Ok(Json(MessageResponse {
        message: "Traffic light status updated successfully".to_string(),
    }))
}
