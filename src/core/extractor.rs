use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::context::RequestContext;

/// Hands the per-request [`RequestContext`] to handlers.
///
/// The context is installed by `request_context_middleware`. Routers mounted
/// without that middleware (tests, for instance) get a fresh unbounded context.
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default())
    }
}
