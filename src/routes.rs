use crate::{
    api::{dashboard, leave_balance, leave_request, user_account},
    auth::{
        handlers,
        middleware::{admin_middleware, auth_middleware},
    },
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    Error, Scope,
    body::BoxBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::from_fn,
    web,
};
use std::sync::Arc;

type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> anyhow::Result<Limiter> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {requests_per_min}/min"))?;
    Ok(Arc::new(Governor::new(&cfg)))
}

/// Rate limiters shared by every worker.
#[derive(Clone)]
pub struct Limiters {
    login: Limiter,
    refresh: Limiter,
    admin: Limiter,
}

impl Limiters {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            login: build_limiter(config.rate_login_per_min)?,
            refresh: build_limiter(config.rate_refresh_per_min)?,
            admin: build_limiter(config.rate_admin_per_min)?,
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiters: &Limiters) {
    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(limiters.login.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(limiters.refresh.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(limiters.login.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiters.admin.clone()) // rate limiting
            .service(admin_scope()),
    );
}

/// `/admin` scope: every route requires an authenticated admin.
pub fn admin_scope() -> Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    > + 'static,
> {
    web::scope("/admin")
        .wrap(from_fn(admin_middleware))
        .wrap(from_fn(auth_middleware))
        .configure(admin_routes)
}

fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard)))
        .service(
            web::scope("/leave-requests")
                // /leave-requests
                .service(
                    web::resource("").route(web::get().to(leave_request::leave_requests)),
                )
                // /leave-requests/review
                .service(
                    web::resource("/review")
                        .route(web::get().to(leave_request::leave_requests_to_review)),
                )
                // /leave-requests/{id}/approve
                .service(
                    web::resource("/{id}/approve")
                        .route(web::post().to(leave_request::approve_leave)),
                )
                // /leave-requests/{id}/reject
                .service(
                    web::resource("/{id}/reject")
                        .route(web::post().to(leave_request::reject_leave)),
                ),
        )
        .service(
            web::scope("/users")
                .service(web::resource("").route(web::get().to(user_account::user_accounts)))
                .service(
                    web::resource("/{id}/activate")
                        .route(web::post().to(user_account::activate)),
                ),
        )
        .service(
            web::scope("/leave-balances")
                .service(web::resource("").route(web::get().to(leave_balance::leave_balances)))
                .service(
                    web::resource("/{user_id}/warning")
                        .route(web::post().to(leave_balance::send_warning)),
                ),
        );
}

// LOGIN
//  ├─ access_token (15 min)
//  └─ refresh_token (7 days)

// ADMIN REQUEST
//  └─ Authorization: Bearer access_token  (role must be Admin)

// ACCESS EXPIRED
//  └─ POST /auth/refresh with refresh_token
//       └─ returns a new pair, old refresh token revoked
