//! Bearer authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::domain::User;
use crate::errors::AppError;

/// The user a request acts on behalf of, resolved from its bearer token.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }
}

/// Authentication middleware.
///
/// Resolves the `Authorization` header through the identity resolver and
/// injects the `CurrentUser` into the request extensions. Any failure
/// rejects the request before it reaches a handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let user = state.identity.resolve(authorization.as_deref()).await?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
