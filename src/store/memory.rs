//! In-memory [`LeaveStore`] for tests. A transaction holds the store lock
//! from `begin` until it ends, the way row locks serialize concurrent
//! approvals in MySQL. It works on a copy of the state and publishes it on
//! commit.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};

use super::{LeaveStore, LeaveTx};
use crate::{
    error::AppError,
    model::{
        leave_balance::{LeaveBalance, LeaveBalanceView},
        leave_request::{LeaveRequest, LeaveRequestView, LeaveStatus},
        notification::{NewNotification, Notification},
        role::Role,
        user::User,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryState {
    pub users: Vec<User>,
    pub requests: Vec<LeaveRequest>,
    pub balances: Vec<LeaveBalance>,
    pub notifications: Vec<Notification>,
    next_id: u64,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn push_notification(&mut self, notification: &NewNotification) -> u64 {
        let id = self.next_id();
        self.notifications.push(Notification {
            id,
            user_id: notification.user_id,
            message: notification.message.clone(),
            is_read: false,
            sent_date: notification.sent_date,
        });
        id
    }

    fn full_name(&self, user_id: u64) -> Option<String> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.full_name.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Fixtures and assertions run while no transaction is open.
    fn idle(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .try_lock()
            .expect("memory store is locked by an open transaction")
    }

    pub fn snapshot(&self) -> MemoryState {
        self.idle().clone()
    }

    pub fn add_user(&self, full_name: &str, role: Role, is_active: bool) -> u64 {
        let mut state = self.idle();
        let id = state.next_id();
        state.users.push(User {
            id,
            username: full_name.to_lowercase().replace(' ', "."),
            full_name: full_name.to_string(),
            role,
            is_active,
        });
        id
    }

    pub fn add_request(
        &self,
        user_id: u64,
        from: NaiveDate,
        to: NaiveDate,
        total_days: i32,
        status: LeaveStatus,
        request_date: NaiveDateTime,
    ) -> u64 {
        let mut state = self.idle();
        let id = state.next_id();
        state.requests.push(LeaveRequest {
            id,
            user_id,
            from_date: from,
            to_date: to,
            total_days,
            status,
            request_date,
        });
        id
    }

    pub fn add_balance(&self, user_id: u64, year: i32, used_days: Option<i32>) -> u64 {
        let mut state = self.idle();
        let id = state.next_id();
        state.balances.push(LeaveBalance {
            id,
            user_id,
            year,
            used_days,
        });
        id
    }
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn LeaveTx>, AppError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let work = guard.clone();
        Ok(Box::new(MemoryTx { guard, work }))
    }

    async fn find_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_balance(
        &self,
        user_id: u64,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .balances
            .iter()
            .find(|b| b.user_id == user_id && b.year == year)
            .cloned())
    }

    async fn insert_notification(&self, notification: &NewNotification) -> Result<u64, AppError> {
        Ok(self.state.lock().await.push_notification(notification))
    }

    async fn activate_user(&self, user_id: u64) -> Result<bool, AppError> {
        let mut state = self.state.lock().await;
        match state.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.is_active = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_leave_requests(
        &self,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequestView>, AppError> {
        let state = self.state.lock().await;
        let mut rows: Vec<LeaveRequestView> = state
            .requests
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter_map(|r| {
                state.full_name(r.user_id).map(|full_name| LeaveRequestView {
                    id: r.id,
                    user_id: r.user_id,
                    full_name,
                    from_date: r.from_date,
                    to_date: r.to_date,
                    total_days: r.total_days,
                    status: r.status,
                    request_date: r.request_date,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.request_date.cmp(&a.request_date));
        Ok(rows)
    }

    async fn list_employees(&self) -> Result<Vec<User>, AppError> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state
            .users
            .iter()
            .filter(|u| u.role == Role::Employee)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(users)
    }

    async fn list_balances(&self, year: i32) -> Result<Vec<LeaveBalanceView>, AppError> {
        let state = self.state.lock().await;
        let mut rows: Vec<LeaveBalanceView> = state
            .balances
            .iter()
            .filter(|b| b.year == year)
            .filter_map(|b| {
                state.full_name(b.user_id).map(|full_name| LeaveBalanceView {
                    id: b.id,
                    user_id: b.user_id,
                    full_name,
                    year: b.year,
                    used_days: b.used_days,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(rows)
    }

    async fn count_leave_requests(&self, status: Option<LeaveStatus>) -> Result<i64, AppError> {
        let state = self.state.lock().await;
        let count = state
            .requests
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter(|r| state.full_name(r.user_id).is_some())
            .count();
        Ok(count as i64)
    }

    async fn count_employees(&self, is_active: Option<bool>) -> Result<i64, AppError> {
        let state = self.state.lock().await;
        let count = state
            .users
            .iter()
            .filter(|u| u.role == Role::Employee)
            .filter(|u| is_active.is_none_or(|a| u.is_active == a))
            .count();
        Ok(count as i64)
    }

    async fn count_balances_at_least(&self, year: i32, used_days: i32) -> Result<i64, AppError> {
        let state = self.state.lock().await;
        let count = state
            .balances
            .iter()
            .filter(|b| b.year == year && b.used_days() >= used_days)
            .filter(|b| state.full_name(b.user_id).is_some())
            .count();
        Ok(count as i64)
    }
}

struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    work: MemoryState,
}

#[async_trait]
impl LeaveTx for MemoryTx {
    async fn lock_request(&mut self, request_id: u64) -> Result<Option<LeaveRequest>, AppError> {
        // a database round trip would suspend here
        tokio::task::yield_now().await;
        Ok(self.work.requests.iter().find(|r| r.id == request_id).cloned())
    }

    async fn get_or_create_balance(
        &mut self,
        user_id: u64,
        year: i32,
    ) -> Result<LeaveBalance, AppError> {
        if let Some(balance) = self
            .work
            .balances
            .iter()
            .find(|b| b.user_id == user_id && b.year == year)
        {
            return Ok(balance.clone());
        }
        let balance = LeaveBalance {
            id: self.work.next_id(),
            user_id,
            year,
            used_days: Some(0),
        };
        self.work.balances.push(balance.clone());
        Ok(balance)
    }

    async fn set_request_status(
        &mut self,
        request_id: u64,
        status: LeaveStatus,
    ) -> Result<(), AppError> {
        if let Some(request) = self.work.requests.iter_mut().find(|r| r.id == request_id) {
            request.status = status;
        }
        Ok(())
    }

    async fn set_used_days(&mut self, balance_id: u64, used_days: i32) -> Result<(), AppError> {
        if let Some(balance) = self.work.balances.iter_mut().find(|b| b.id == balance_id) {
            balance.used_days = Some(used_days);
        }
        Ok(())
    }

    async fn insert_notification(
        &mut self,
        notification: &NewNotification,
    ) -> Result<u64, AppError> {
        Ok(self.work.push_notification(notification))
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryTx { mut guard, work } = *self;
        *guard = work;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        Ok(())
    }
}
