use crate::{
    auth::auth::AuthUser,
    config::Config,
    error::AppError,
    model::leave_balance::LeaveBalanceResponse,
    services::leave_review,
    store::LeaveStore,
};
use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local};
use serde_json::json;

/// Current-year balances with the days left under the cap
#[utoipa::path(
    get,
    path = "/api/admin/leave-balances",
    responses(
        (status = 200, description = "Leave balances for the current year", body = [LeaveBalanceResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Balances"
)]
pub async fn leave_balances(
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let year = Local::now().year();
    let annual_cap = config.leave_policy.annual_cap;

    let balances: Vec<LeaveBalanceResponse> = store
        .list_balances(year)
        .await?
        .into_iter()
        .map(|b| LeaveBalanceResponse::new(b, annual_cap))
        .collect();

    Ok(HttpResponse::Ok().json(balances))
}

/// Warn an employee who reached the leave threshold
#[utoipa::path(
    post,
    path = "/api/admin/leave-balances/{user_id}/warning",
    params(
        ("user_id" = u64, Path, description = "ID of the employee to warn")
    ),
    responses(
        (status = 200, description = "Warning notification created", body = Object, example = json!({
            "message": "Warning sent to employee Nguyen Van A.",
            "notification_id": 42
        })),
        (status = 404, description = "User not found", body = Object, example = json!({
            "message": "User not found"
        })),
        (status = 422, description = "Employee is under the warning threshold", body = Object, example = json!({
            "message": "The employee has not exceeded the allowed leave days."
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Balances"
)]
pub async fn send_warning(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let sent = leave_review::send_warning(
        store.get_ref(),
        &config.leave_policy,
        &auth,
        path.into_inner(),
        Local::now().naive_local(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Warning sent to employee {}.", sent.full_name),
        "notification_id": sent.notification_id
    })))
}
