//! Leave approval and balance accounting.
//!
//! Approve and Reject run as one store transaction each: the request row is
//! locked, the decision is taken on the locked state, and every write lands
//! in a single commit. Requests that are missing or no longer pending are
//! skipped without an error.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::{
    auth::auth::AuthUser,
    config::LeavePolicy,
    error::AppError,
    model::{
        leave_request::{LeaveRequest, LeaveStatus},
        notification::NewNotification,
    },
    store::LeaveStore,
};

pub const WARNING_MESSAGE: &str = "🔴 You have used up your allowed leave days!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Approved,
    Rejected,
    /// Request missing or already decided; nothing was changed.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningSent {
    pub notification_id: u64,
    pub full_name: String,
}

fn decision_message(request: &LeaveRequest, verb: &str) -> String {
    format!(
        "Your leave request from {} has been {verb}.",
        request.period_label()
    )
}

/// Days the balance would reach, or `QuotaExceeded` when that passes the cap.
/// A negative request is a `BadRequest`: balances only ever grow.
pub fn projected_days(used_days: i32, requested: i32, policy: &LeavePolicy) -> Result<i32, AppError> {
    if requested < 0 {
        return Err(AppError::BadRequest(format!(
            "Invalid leave request: {requested} days requested."
        )));
    }
    match used_days.checked_add(requested) {
        Some(projected) if projected <= policy.annual_cap => Ok(projected),
        _ => Err(AppError::QuotaExceeded(format!(
            "Cannot approve the request: the employee would exceed the {} leave days allowed per year.",
            policy.annual_cap
        ))),
    }
}

#[instrument(name = "approve_leave", skip(store, policy, actor), fields(actor = %actor.username))]
pub async fn approve(
    store: &dyn LeaveStore,
    policy: &LeavePolicy,
    actor: &AuthUser,
    request_id: u64,
    now: NaiveDateTime,
) -> Result<ReviewOutcome, AppError> {
    actor.require_admin()?;
    let mut tx = store.begin().await?;

    let request = match tx.lock_request(request_id).await? {
        Some(r) if !r.status.is_terminal() => r,
        _ => {
            tx.rollback().await?;
            info!("Request missing or already processed, skipping");
            return Ok(ReviewOutcome::Skipped);
        }
    };

    let balance = tx.get_or_create_balance(request.user_id, now.year()).await?;

    let used_days = match projected_days(balance.used_days(), request.total_days, policy) {
        Ok(days) => days,
        Err(e) => {
            tx.rollback().await?;
            warn!(
                user_id = request.user_id,
                used = balance.used_days(),
                requested = request.total_days,
                reason = %e,
                "Approval refused"
            );
            return Err(e);
        }
    };

    tx.set_request_status(request.id, LeaveStatus::Approved).await?;
    tx.set_used_days(balance.id, used_days).await?;
    tx.insert_notification(&NewNotification::new(
        request.user_id,
        decision_message(&request, "approved"),
        now,
    ))
    .await?;
    tx.commit().await?;

    info!(user_id = request.user_id, used_days, "Leave request approved");
    Ok(ReviewOutcome::Approved)
}

#[instrument(name = "reject_leave", skip(store, actor), fields(actor = %actor.username))]
pub async fn reject(
    store: &dyn LeaveStore,
    actor: &AuthUser,
    request_id: u64,
    now: NaiveDateTime,
) -> Result<ReviewOutcome, AppError> {
    actor.require_admin()?;
    let mut tx = store.begin().await?;

    let request = match tx.lock_request(request_id).await? {
        Some(r) if !r.status.is_terminal() => r,
        _ => {
            tx.rollback().await?;
            info!("Request missing or already processed, skipping");
            return Ok(ReviewOutcome::Skipped);
        }
    };

    tx.set_request_status(request.id, LeaveStatus::Rejected).await?;
    tx.insert_notification(&NewNotification::new(
        request.user_id,
        decision_message(&request, "rejected"),
        now,
    ))
    .await?;
    tx.commit().await?;

    info!(user_id = request.user_id, "Leave request rejected");
    Ok(ReviewOutcome::Rejected)
}

/// Notifies an employee whose current-year usage reached the warning threshold.
#[instrument(name = "send_warning", skip(store, policy, actor), fields(actor = %actor.username))]
pub async fn send_warning(
    store: &dyn LeaveStore,
    policy: &LeavePolicy,
    actor: &AuthUser,
    user_id: u64,
    now: NaiveDateTime,
) -> Result<WarningSent, AppError> {
    actor.require_admin()?;
    let user = store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let used_days = store
        .find_balance(user_id, now.year())
        .await?
        .map(|b| b.used_days());

    match used_days {
        Some(used) if used >= policy.warning_threshold => {}
        _ => {
            return Err(AppError::BelowThreshold(
                "The employee has not exceeded the allowed leave days.".into(),
            ));
        }
    }

    let notification_id = store
        .insert_notification(&NewNotification::new(user.id, WARNING_MESSAGE, now))
        .await?;

    info!(user_id, notification_id, "Leave warning sent");
    Ok(WarningSent {
        notification_id,
        full_name: user.full_name,
    })
}
