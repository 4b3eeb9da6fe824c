//! Bearer authentication middleware.
//!
//! Rejects requests without a valid `Authorization: Bearer <token>` header
//! before they reach a handler. The accept/reject decision is delegated to the
//! [`TokenVerifier`] port; handlers never see the credential.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error as ActixError, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::ports::TokenVerifier;
use crate::domain::{BearerToken, Error};

const MISSING_CREDENTIALS: &str = "missing bearer token";
const REJECTED_CREDENTIALS: &str = "invalid bearer token";

/// Middleware factory guarding a scope with bearer authentication.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use registros::BearerAuth;
/// use registros::outbound::auth::StaticTokenVerifier;
///
/// let verifier = Arc::new(StaticTokenVerifier::from_tokens(["s3cr3t"]));
/// let app = App::new().service(web::scope("/api/v1").wrap(BearerAuth::new(verifier)));
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl BearerAuth {
    /// Guard requests with the given verifier.
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

async fn authorize(verifier: &dyn TokenVerifier, header: Option<&str>) -> Result<(), Error> {
    let header = header.ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS))?;
    let token = BearerToken::from_authorization(header).map_err(|err| {
        debug!(error = %err, "malformed authorization header");
        Error::unauthorized(err.to_string())
    })?;

    match verifier.verify(&token).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::unauthorized(REJECTED_CREDENTIALS)),
        Err(err) => {
            error!(error = %err, "token verification failed");
            Err(Error::internal(err.to_string()))
        }
    }
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);
        Box::pin(async move {
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.to_str().unwrap_or_default().to_owned());

            match authorize(verifier.as_ref(), header.as_deref()).await {
                Ok(()) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(err) => {
                    let response = err.error_response().map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}
