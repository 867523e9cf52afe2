use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::domain::InviteSubmission;
use super::mailer::InviteMailer;
use super::service::{InviteError, InviteService};

/// Router builder exposing the verify endpoint.
pub fn invite_router<M>(service: Arc<InviteService<M>>) -> Router
where
    M: InviteMailer + 'static,
{
    Router::new()
        .route("/api/verify", post(verify_handler::<M>))
        .with_state(service)
}

pub(crate) async fn verify_handler<M>(
    State(service): State<Arc<InviteService<M>>>,
    Json(submission): Json<InviteSubmission>,
) -> Result<Response, InviteError>
where
    M: InviteMailer + 'static,
{
    service.handle(submission).await?;
    Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
}

impl IntoResponse for InviteError {
    fn into_response(self) -> Response {
        let status = match self {
            InviteError::MissingEmail => StatusCode::BAD_REQUEST,
            InviteError::DomainDenied { .. } => StatusCode::FORBIDDEN,
            InviteError::Dispatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
