//! Authentication extractor.

use std::future::Future;
use std::pin::Pin;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use bookshop_core::domain::Claim;

use crate::middleware::error::AppError;
use crate::observability::CallContext;
use crate::state::AppState;

/// Authenticated caller.
///
/// Use this in handlers to require a valid bearer token:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.claim.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub claim: Claim,
    /// The raw bearer token, kept for logout.
    pub token: String,
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let value = value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AppError::Unauthorized("Expected Bearer token".to_string())),
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let ctx = CallContext::of(req);

        Box::pin(async move {
            let token = token?;
            let Some(state) = state else {
                return Err(AppError::Internal("AppState not found in app data".to_string()));
            };

            let claim = state.auth.validate_token(&ctx, &token).await?;
            Ok(Identity { claim, token })
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");

        let req = TestRequest::default().to_http_request();
        assert!(matches!(bearer_token(&req), Err(AppError::Unauthorized(_))));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(matches!(bearer_token(&req), Err(AppError::Unauthorized(_))));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert!(matches!(bearer_token(&req), Err(AppError::Unauthorized(_))));
    }
}
