use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::auth::{self, AppState};
use crate::error::ApiError;

/// Resolve the bearer token into an [`Identity`] and attach it to the
/// request, or reject with 401. Handlers behind this layer read the
/// identity from request extensions instead of any ambient state.
///
/// [`Identity`]: nagar_types::models::Identity
pub async fn require_session(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(ApiError::InvalidSession);
    };
    let identity =
        auth::resolve_identity(&state, bearer.token())?.ok_or(ApiError::InvalidSession)?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
