use crate::{
    auth::auth::AuthUser,
    config::Config,
    error::AppError,
    model::leave_request::{LeaveRequestView, LeaveStatus},
    services::leave_review::{self, ReviewOutcome},
    store::LeaveStore,
};
use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "outcome": "approved",
    "message": "Leave request approved."
}))]
pub struct ReviewResponse {
    pub outcome: ReviewOutcome,
    /// Absent when the request was skipped
    pub message: Option<String>,
}

impl From<ReviewOutcome> for ReviewResponse {
    fn from(outcome: ReviewOutcome) -> Self {
        let message = match outcome {
            ReviewOutcome::Approved => Some("Leave request approved.".to_string()),
            ReviewOutcome::Rejected => Some("Leave request rejected.".to_string()),
            ReviewOutcome::Skipped => None,
        };
        Self { outcome, message }
    }
}

/* =========================
List all leave requests
========================= */
/// All leave requests, newest first
#[utoipa::path(
    get,
    path = "/api/admin/leave-requests",
    responses(
        (status = 200, description = "Every leave request with its requester", body = [LeaveRequestView]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_requests(
    store: web::Data<dyn LeaveStore>,
) -> Result<HttpResponse, AppError> {
    let requests = store.list_leave_requests(None).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
Review queue (pending only)
========================= */
/// Pending leave requests, newest first
#[utoipa::path(
    get,
    path = "/api/admin/leave-requests/review",
    responses(
        (status = 200, description = "Pending leave requests", body = [LeaveRequestView]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_requests_to_review(
    store: web::Data<dyn LeaveStore>,
) -> Result<HttpResponse, AppError> {
    let requests = store
        .list_leave_requests(Some(LeaveStatus::Pending))
        .await?;
    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
Approve leave
========================= */
/// Approve a pending request against the yearly quota
#[utoipa::path(
    post,
    path = "/api/admin/leave-requests/{id}/approve",
    params(
        ("id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Approved, or skipped when missing / already processed", body = ReviewResponse),
        (status = 409, description = "Annual leave quota would be exceeded", body = Object, example = json!({
            "message": "Cannot approve the request: the employee would exceed the 24 leave days allowed per year."
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let outcome = leave_review::approve(
        store.get_ref(),
        &config.leave_policy,
        &auth,
        path.into_inner(),
        Local::now().naive_local(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(ReviewResponse::from(outcome)))
}

/* =========================
Reject leave
========================= */
/// Reject a pending request
#[utoipa::path(
    post,
    path = "/api/admin/leave-requests/{id}/reject",
    params(
        ("id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Rejected, or skipped when missing / already processed", body = ReviewResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let outcome = leave_review::reject(
        store.get_ref(),
        &auth,
        path.into_inner(),
        Local::now().naive_local(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(ReviewResponse::from(outcome)))
}
