//! Gateway-injected identity header extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use elevate_core::error::AppError;

pub const ACCOUNT_ID_HEADER: &str = "x-elevate-account-id";

/// Account identity injected by the gateway after token validation.
///
/// Rejects with `AppError::Unauthorized` if the header is absent or not a UUID.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub account_id: Uuid,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // Header values are read synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let account_id = parts
            .headers
            .get(ACCOUNT_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        async move {
            let account_id = account_id.ok_or(AppError::Unauthorized)?;
            Ok(Self { account_id })
        }
    }
}
