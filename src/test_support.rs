//! Shared fixtures for unit and HTTP tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    auth::{auth::AuthUser, jwt},
    config::{Config, LeavePolicy},
    model::role::Role,
};

pub fn config() -> Config {
    Config {
        database_url: "mysql://unused".into(),
        jwt_secret: "test-secret".into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 900,
        refresh_token_ttl: 3600,
        rate_login_per_min: 60,
        rate_refresh_per_min: 30,
        rate_admin_per_min: 1000,
        api_prefix: "/api".into(),
        log_dir: "logs".into(),
        log_level: tracing::Level::DEBUG,
        run_migrations: false,
        leave_policy: LeavePolicy::default(),
    }
}

pub fn admin() -> AuthUser {
    AuthUser {
        user_id: 1,
        username: "admin".into(),
        role: Role::Admin,
    }
}

pub fn bearer(user_id: u64, role: Role) -> String {
    let token = jwt::generate_access_token(
        user_id,
        format!("user{user_id}"),
        role,
        &config().jwt_secret,
        900,
    )
    .unwrap();
    format!("Bearer {token}")
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(year: i32, month: u32, d: u32) -> NaiveDateTime {
    day(year, month, d).and_hms_opt(9, 0, 0).unwrap()
}

/// Initialises the admin API over the given [`MemoryStore`](crate::store::memory::MemoryStore),
/// mounted under `/api` like in production.
macro_rules! admin_app {
    ($store:expr) => {{
        let store: std::sync::Arc<dyn $crate::store::LeaveStore> =
            std::sync::Arc::new($store.clone());
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(store))
                .app_data(actix_web::web::Data::new($crate::test_support::config()))
                .service(actix_web::web::scope("/api").service($crate::routes::admin_scope())),
        )
        .await
    }};
}
pub(crate) use admin_app;
