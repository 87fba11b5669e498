use indexmap::IndexMap;
use thiserror::Error;
use tracing::info;

use crate::database::activity_registry::ActivityRegistry;
use crate::models::ActivityRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Activity not found")]
    NotFound,
    #[error("Student is already signed up for this activity")]
    AlreadyRegistered,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
}

pub async fn list_activities(registry: &ActivityRegistry) -> IndexMap<String, ActivityRecord> {
    registry.list_activities().await
}

/// Appends `email` to the roster of `activity_name`. Capacity is not checked.
pub async fn enroll(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<(), SignupError> {
    let mut activity = registry
        .lock_activity(activity_name)
        .await
        .ok_or(SignupError::NotFound)?;

    if activity.is_registered(email) {
        return Err(SignupError::AlreadyRegistered);
    }
    activity.participants.push(email.to_string());

    info!(
        activity = activity_name,
        email,
        participants = activity.participants.len(),
        "participant enrolled"
    );
    Ok(())
}

/// Removes `email` from the roster of `activity_name` and returns the roster
/// as it stands afterwards.
pub async fn withdraw(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<Vec<String>, SignupError> {
    let mut activity = registry
        .lock_activity(activity_name)
        .await
        .ok_or(SignupError::NotFound)?;

    let Some(pos) = activity.participants.iter().position(|p| p == email) else {
        return Err(SignupError::NotRegistered);
    };
    activity.participants.remove(pos);

    info!(
        activity = activity_name,
        email,
        participants = activity.participants.len(),
        "participant withdrawn"
    );
    Ok(activity.participants.clone())
}
