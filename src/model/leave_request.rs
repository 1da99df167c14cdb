use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{
    Decode, MySql, Type,
    error::BoxDynError,
    mysql::{MySqlTypeInfo, MySqlValueRef},
};
use utoipa::ToSchema;

/// Lifecycle of a leave request. `Approved` and `Rejected` are terminal.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::EnumString,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl Type<MySql> for LeaveStatus {
    fn type_info() -> MySqlTypeInfo {
        <str as Type<MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        <str as Type<MySql>>::compatible(ty)
    }
}

impl<'r> Decode<'r, MySql> for LeaveStatus {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&'r str as Decode<'r, MySql>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveRequest {
    pub id: u64,
    pub user_id: u64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub total_days: i32,
    pub status: LeaveStatus,
    pub request_date: NaiveDateTime,
}

impl LeaveRequest {
    /// Date range as shown to employees, e.g. `03/02/2026 to 05/02/2026`.
    pub fn period_label(&self) -> String {
        format!(
            "{} to {}",
            self.from_date.format("%d/%m/%Y"),
            self.to_date.format("%d/%m/%Y")
        )
    }
}

/// Leave request joined with the requester's name, as listed to admins.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequestView {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = "Nguyen Van A")]
    pub full_name: String,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub from_date: NaiveDate,
    #[schema(example = "2026-03-04", format = "date", value_type = String)]
    pub to_date: NaiveDate,
    #[schema(example = 3)]
    pub total_days: i32,
    pub status: LeaveStatus,
    #[schema(example = "2026-02-20T09:15:00", format = "date-time", value_type = String)]
    pub request_date: NaiveDateTime,
}
