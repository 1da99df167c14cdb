use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::model::role::Role;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

/// Resolves the bearer token into an [`AuthUser`] stored in request extensions.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    match AuthUser::from_bearer(header, config) {
        Ok(auth_user) => {
            req.extensions_mut().insert(auth_user);
            next.call(req).await
        }
        Err(e) => {
            let resp = HttpResponse::Unauthorized().json(json!({ "message": e.to_string() }));
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
    }
}

/// Lets only admins through; must run after [`auth_middleware`].
pub async fn admin_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let principal = req
        .extensions()
        .get::<AuthUser>()
        .map(|user| (user.user_id, user.role));

    match principal {
        Some((_, Role::Admin)) => next.call(req).await,
        Some((user_id, _)) => {
            tracing::warn!(user_id, path = %req.path(), "Non-admin denied");
            let resp = HttpResponse::Forbidden().json(json!({ "message": "Admin only" }));
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
        None => {
            let resp = HttpResponse::Unauthorized().json(json!({ "message": "Missing token" }));
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
    }
}
