use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Days consumed by one user in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveBalance {
    pub id: u64,
    pub user_id: u64,
    pub year: i32,
    pub used_days: Option<i32>,
}

impl LeaveBalance {
    pub fn used_days(&self) -> i32 {
        self.used_days.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct LeaveBalanceView {
    #[schema(example = 3)]
    pub id: u64,
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = "Nguyen Van A")]
    pub full_name: String,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 14, nullable = true)]
    pub used_days: Option<i32>,
}

/// Balance row plus what is left under the annual cap.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveBalanceResponse {
    #[serde(flatten)]
    pub balance: LeaveBalanceView,
    #[schema(example = 10)]
    pub remaining_days: i32,
}

impl LeaveBalanceResponse {
    pub fn new(balance: LeaveBalanceView, annual_cap: i32) -> Self {
        let used = balance.used_days.unwrap_or(0);
        Self {
            remaining_days: (annual_cap - used).max(0),
            balance,
        }
    }
}
