//! Route guard middleware - keeps signed-out users off the editing pages
//! and signed-in users off the login page.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;

use noticias_core::guard::{RouteClass, guard};

use crate::middleware::session;
use crate::state::AppState;

/// Route guard middleware factory.
pub struct RouteGuard;

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardService { service }))
    }
}

pub struct RouteGuardService<S> {
    service: S,
}

fn has_session(req: &ServiceRequest) -> bool {
    req.app_data::<web::Data<AppState>>()
        .map(|state| session::identify(req.request(), state.tokens.as_ref()).is_ok())
        .unwrap_or(false)
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let class = RouteClass::of_path(req.path());

        let decision = match class {
            RouteClass::Public => None,
            _ => guard(class, has_session(&req)).location(),
        };

        match decision {
            Some(location) => {
                tracing::debug!(path = %req.path(), location, "Route guard redirect");

                let response = HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, location))
                    .finish();
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
            None => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}
