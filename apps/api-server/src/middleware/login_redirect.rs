//! Browser login redirect.
//!
//! API clients get the plain 401. A request whose `Accept` header prefers
//! `text/html` gets `303 See Other` to the login page instead, carrying the
//! original path and query as `returnUrl`.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{
        StatusCode,
        header::{self, Header},
    },
    mime,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

/// Login redirect middleware factory.
pub struct LoginRedirect {
    login_path: Rc<str>,
}

impl LoginRedirect {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: Rc::from(login_path.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoginRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = LoginRedirectService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRedirectService {
            service,
            login_path: self.login_path.clone(),
        }))
    }
}

pub struct LoginRedirectService<S> {
    service: S,
    login_path: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for LoginRedirectService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let return_url = prefers_html(&req).then(|| {
            req.uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| req.path().to_string())
        });
        let login_path = self.login_path.clone();

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;

            match return_url {
                Some(return_url) if res.status() == StatusCode::UNAUTHORIZED => {
                    let location = redirect_location(&login_path, &return_url);
                    tracing::debug!(%location, "Redirecting browser to login");

                    let (http_req, _response) = res.into_parts();
                    let redirect = HttpResponse::SeeOther()
                        .insert_header((header::LOCATION, location))
                        .finish();
                    Ok(ServiceResponse::new(http_req, redirect).map_into_right_body())
                }
                _ => Ok(res.map_into_left_body()),
            }
        })
    }
}

/// Whether the highest-ranked `Accept` entry is `text/html`.
fn prefers_html(req: &ServiceRequest) -> bool {
    header::Accept::parse(req)
        .map(|accept| {
            let preferred = accept.preference();
            preferred.type_() == mime::TEXT && preferred.subtype() == mime::HTML
        })
        .unwrap_or(false)
}

fn redirect_location(login_path: &str, return_url: &str) -> String {
    format!("{}?returnUrl={}", login_path, urlencoding::encode(return_url))
}
