//! Authentication extractor.
//!
//! Tokens are issued by the identity platform; this side only verifies them.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use blogfeed_core::access::{Caller, Principal};
use blogfeed_core::ports::{AuthError, TokenService};
use blogfeed_shared::ErrorResponse;

/// The caller behind the current request.
///
/// No `Authorization` header means [`Caller::Anonymous`]; the access gate
/// in each service decides whether that is enough. A header that is present
/// but does not carry a valid bearer token is rejected with 401.
/// ```ignore
/// async fn create(caller: RequestCaller) -> AppResult<HttpResponse> {
///     state.categories.create(&caller.0, input).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestCaller(pub Caller);

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for RequestCaller {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_caller(req).map(RequestCaller))
    }
}

fn resolve_caller(req: &HttpRequest) -> Result<Caller, AuthenticationError> {
    // Extract Bearer token from Authorization header
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(Caller::Anonymous);
    };

    let token = auth_header
        .to_str()
        .map_err(|_| invalid("Invalid authorization header"))?
        .strip_prefix("Bearer ")
        .ok_or_else(|| invalid("Expected Bearer token"))?;

    let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Err(invalid("Server configuration error"));
    };

    match token_service.validate_token(token.trim()) {
        Ok(claims) => Ok(Caller::Authenticated(Principal::from(claims))),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            Err(AuthenticationError(e))
        }
    }
}

fn invalid(reason: &str) -> AuthenticationError {
    AuthenticationError(AuthError::InvalidToken(reason.to_string()))
}
