//! Persistence seam for the leave workflow.
//!
//! Handlers and services only talk to [`LeaveStore`]; the MySQL implementation
//! lives in [`mysql`]. Multi-row mutations go through a [`LeaveTx`], which is
//! committed explicitly and rolled back on every other exit.

use async_trait::async_trait;

use crate::{
    error::AppError,
    model::{
        leave_balance::{LeaveBalance, LeaveBalanceView},
        leave_request::{LeaveRequest, LeaveRequestView, LeaveStatus},
        notification::NewNotification,
        user::User,
    },
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Opens a unit of work for a read-check-write sequence.
    async fn begin(&self) -> Result<Box<dyn LeaveTx>, AppError>;

    async fn find_user(&self, user_id: u64) -> Result<Option<User>, AppError>;

    async fn find_balance(&self, user_id: u64, year: i32)
    -> Result<Option<LeaveBalance>, AppError>;

    async fn insert_notification(&self, notification: &NewNotification) -> Result<u64, AppError>;

    /// Marks the account active. Returns false when the user does not exist.
    async fn activate_user(&self, user_id: u64) -> Result<bool, AppError>;

    /// Requests joined with their owner, newest `request_date` first.
    async fn list_leave_requests(
        &self,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequestView>, AppError>;

    /// Employee accounts ordered by full name.
    async fn list_employees(&self) -> Result<Vec<User>, AppError>;

    async fn list_balances(&self, year: i32) -> Result<Vec<LeaveBalanceView>, AppError>;

    async fn count_leave_requests(&self, status: Option<LeaveStatus>) -> Result<i64, AppError>;

    /// Employee accounts, optionally only those with the given `is_active`.
    async fn count_employees(&self, is_active: Option<bool>) -> Result<i64, AppError>;

    /// Balances of `year` whose used days reached `used_days`.
    async fn count_balances_at_least(&self, year: i32, used_days: i32) -> Result<i64, AppError>;
}

#[async_trait]
pub trait LeaveTx: Send {
    /// Reads and locks a request until the transaction ends.
    async fn lock_request(&mut self, request_id: u64) -> Result<Option<LeaveRequest>, AppError>;

    /// Returns the locked balance for (user, year), inserting a zero row first if absent.
    async fn get_or_create_balance(
        &mut self,
        user_id: u64,
        year: i32,
    ) -> Result<LeaveBalance, AppError>;

    async fn set_request_status(
        &mut self,
        request_id: u64,
        status: LeaveStatus,
    ) -> Result<(), AppError>;

    async fn set_used_days(&mut self, balance_id: u64, used_days: i32) -> Result<(), AppError>;

    async fn insert_notification(
        &mut self,
        notification: &NewNotification,
    ) -> Result<u64, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}
