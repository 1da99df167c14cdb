use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::LeavePolicy, error::AppError, model::leave_request::LeaveStatus, store::LeaveStore,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSummary {
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 4)]
    pub pending_requests: i64,
    #[schema(example = 25)]
    pub employees: i64,
    #[schema(example = 2)]
    pub inactive_employees: i64,
    /// Current-year balances at or above the warning threshold.
    #[schema(example = 3)]
    pub balances_at_threshold: i64,
}

pub async fn summary(
    store: &dyn LeaveStore,
    policy: &LeavePolicy,
    year: i32,
) -> Result<DashboardSummary, AppError> {
    Ok(DashboardSummary {
        year,
        pending_requests: store
            .count_leave_requests(Some(LeaveStatus::Pending))
            .await?,
        employees: store.count_employees(None).await?,
        inactive_employees: store.count_employees(Some(false)).await?,
        balances_at_threshold: store
            .count_balances_at_least(year, policy.warning_threshold)
            .await?,
    })
}
