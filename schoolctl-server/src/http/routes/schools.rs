//! School endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use schoolctl_core::{NewSchool, School, SchoolPayload};
use serde::Serialize;

use crate::db::SchoolRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Listing response
#[derive(Serialize)]
pub struct ListSchoolsResponse {
    pub success: bool,
    pub data: Vec<School>,
}

#[derive(Serialize)]
pub struct CreatedSchool {
    pub id: i64,
}

/// Create response
#[derive(Serialize)]
pub struct CreateSchoolResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: CreatedSchool,
}

/// GET /api/schools - every school, newest first
async fn list_schools(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListSchoolsResponse>, ApiError> {
    let schools = SchoolRepo::new(&state.pool)
        .list()
        .await
        .map_err(ApiError::database("Failed to fetch schools"))?;

    tracing::debug!(count = schools.len(), "listed schools");
    Ok(Json(ListSchoolsResponse {
        success: true,
        data: schools,
    }))
}

/// POST /api/schools - validate and insert one school
///
/// The body is read as JSON whatever `Content-Type` says.
async fn create_school(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateSchoolResponse>), ApiError> {
    let payload: SchoolPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejected school payload");
        ApiError::bad_request("Invalid request body")
    })?;

    let school = NewSchool::validate(payload)?;
    let id = SchoolRepo::new(&state.pool)
        .create(&school)
        .await
        .map_err(ApiError::database("Failed to create school"))?;

    tracing::info!(id, name = school.name(), "school added");
    Ok((
        StatusCode::CREATED,
        Json(CreateSchoolResponse {
            success: true,
            message: "School added successfully",
            data: CreatedSchool { id },
        }),
    ))
}

/// School routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/schools", get(list_schools).post(create_school))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_response_shape() {
        let body = CreateSchoolResponse {
            success: true,
            message: "School added successfully",
            data: CreatedSchool { id: 42 },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "success": true,
                "message": "School added successfully",
                "data": {"id": 42}
            })
        );
    }
}
