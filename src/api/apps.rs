//! App endpoint handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, AppResponse, CreateAppBody, CreateAppResponse, Json};
use crate::infrastructure::app::CreateAppRequest;

/// App routes
///
/// `run` and `env` are static segments, so they take precedence over
/// `{team}` for the same app.
pub fn create_apps_router() -> Router<AppState> {
    Router::new()
        .route("/apps", get(list_apps).post(create_app))
        .route("/apps/{app}", get(app_info).delete(delete_app))
        .route("/apps/{app}/run", post(run_command))
        .route("/apps/{app}/env", get(get_env))
        .route("/apps/{app}/repository/clone", get(clone_repository))
        .route("/apps/{app}/repository/sync", post(resync_app))
        .route("/apps/{app}/{team}", put(grant_team).delete(revoke_team))
}

/// GET /apps
pub async fn list_apps(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Response, ApiError> {
    let apps = state.app_service.list(&user).await?;

    if apps.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<AppResponse> = apps.iter().map(AppResponse::from).collect();
    Ok(Json(body).into_response())
}

/// POST /apps
pub async fn create_app(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<CreateAppBody>,
) -> Result<Json<CreateAppResponse>, ApiError> {
    debug!(app = %body.name, "Creating app");

    let created = state
        .app_service
        .create(
            CreateAppRequest {
                name: body.name,
                framework: body.framework,
            },
            &user,
        )
        .await?;

    Ok(Json(CreateAppResponse::success(created.repository_url)))
}

/// GET /apps/{app}
pub async fn app_info(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(app): Path<String>,
) -> Result<Json<AppResponse>, ApiError> {
    let app = state.app_service.info(&app, &user).await?;

    Ok(Json(AppResponse::from(&app)))
}

/// DELETE /apps/{app}
pub async fn delete_app(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(app): Path<String>,
) -> Result<&'static str, ApiError> {
    state.app_service.destroy(&app, &user).await?;

    Ok("success")
}

/// PUT /apps/{app}/{team}
pub async fn grant_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((app, team)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.app_service.grant(&app, &team, &user).await?;

    Ok(StatusCode::OK)
}

/// DELETE /apps/{app}/{team}
pub async fn revoke_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((app, team)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.app_service.revoke(&app, &team, &user).await?;

    Ok(StatusCode::OK)
}

/// POST /apps/{app}/run
///
/// The request body is the command line; the response is the unit's raw output.
pub async fn run_command(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(app): Path<String>,
    command: String,
) -> Result<Vec<u8>, ApiError> {
    let output = state.unit_service.run_command(&app, &user, &command).await?;

    Ok(output)
}

/// GET /apps/{app}/env
///
/// The request body lists the variable names, separated by whitespace.
pub async fn get_env(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(app): Path<String>,
    names: Bytes,
) -> Result<Vec<u8>, ApiError> {
    let output = state.unit_service.get_env(&app, &user, &names).await?;

    Ok(output)
}

/// GET /apps/{app}/repository/clone
pub async fn clone_repository(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(app): Path<String>,
) -> Result<Vec<u8>, ApiError> {
    let output = state.unit_service.clone_repository(&app, &user).await?;

    Ok(output)
}

/// POST /apps/{app}/repository/sync
pub async fn resync_app(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(app): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.app_service.resync(&app, &user).await?;

    Ok(StatusCode::OK)
}
