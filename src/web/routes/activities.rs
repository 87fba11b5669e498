use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::warn;

use crate::database::activity_registry::ActivityRegistry;
use crate::models::ActivityRecord;
use crate::services::signup_service::{self, SignupError};

type ApiError = (StatusCode, Json<Value>);

// Raw pairs so a repeated `email` resolves to the last value.
type QueryPairs = Vec<(String, String)>;

fn detail(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "detail": message.into() })))
}

fn signup_error_response(err: SignupError) -> ApiError {
    let status = match err {
        SignupError::NotFound => StatusCode::NOT_FOUND,
        SignupError::AlreadyRegistered | SignupError::NotRegistered => StatusCode::BAD_REQUEST,
    };
    detail(status, err.to_string())
}

/// Last `email` value in the query string. Only absence is rejected; an
/// empty value is passed through like any other address.
fn require_email(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<String, ApiError> {
    let Query(pairs) = query.map_err(|e| {
        warn!(error = %e, "unreadable query string");
        detail(StatusCode::UNPROCESSABLE_ENTITY, e.body_text())
    })?;

    pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "email").then_some(value))
        .ok_or_else(|| {
            detail(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Query parameter 'email' is required",
            )
        })
}

pub async fn list_activities_handler(
    State(registry): State<ActivityRegistry>,
) -> Json<IndexMap<String, ActivityRecord>> {
    Json(signup_service::list_activities(&registry).await)
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(registry): State<ActivityRegistry>,
) -> Result<Json<Value>, ApiError> {
    let email = require_email(query)?;

    signup_service::enroll(&registry, &activity_name, &email)
        .await
        .map_err(|e| {
            warn!(activity = %activity_name, email = %email, error = %e, "signup rejected");
            signup_error_response(e)
        })?;

    Ok(Json(json!({
        "message": format!("Signed up {} for {}", email, activity_name)
    })))
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(registry): State<ActivityRegistry>,
) -> Result<Json<Value>, ApiError> {
    let email = require_email(query)?;

    let participants = signup_service::withdraw(&registry, &activity_name, &email)
        .await
        .map_err(|e| {
            warn!(activity = %activity_name, email = %email, error = %e, "unregister rejected");
            signup_error_response(e)
        })?;

    Ok(Json(json!({
        "message": format!("Unregistered {} from {}", email, activity_name),
        "participants": participants,
    })))
}
