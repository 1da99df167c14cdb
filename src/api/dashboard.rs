use crate::{
    config::Config,
    error::AppError,
    services::dashboard::{DashboardSummary, summary},
    store::LeaveStore,
};
use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local};

/// Admin landing figures
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Summary for the current year", body = DashboardSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let figures = summary(store.get_ref(), &config.leave_policy, Local::now().year()).await?;
    Ok(HttpResponse::Ok().json(figures))
}
