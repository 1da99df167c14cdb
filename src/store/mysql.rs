use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

use super::{LeaveStore, LeaveTx};
use crate::{
    error::AppError,
    model::{
        leave_balance::{LeaveBalance, LeaveBalanceView},
        leave_request::{LeaveRequest, LeaveRequestView, LeaveStatus},
        notification::NewNotification,
        role::Role,
        user::User,
    },
};

const USER_COLUMNS: &str = "id, username, full_name, role, is_active";
const BALANCE_COLUMNS: &str = "id, user_id, `year`, used_days";

#[derive(Clone)]
pub struct MySqlLeaveStore {
    pool: MySqlPool,
}

impl MySqlLeaveStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveStore for MySqlLeaveStore {
    async fn begin(&self) -> Result<Box<dyn LeaveTx>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(MySqlLeaveTx { tx }))
    }

    async fn find_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_balance(
        &self,
        user_id: u64,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError> {
        let sql =
            format!("SELECT {BALANCE_COLUMNS} FROM leave_balances WHERE user_id = ? AND `year` = ?");
        let balance = sqlx::query_as::<_, LeaveBalance>(&sql)
            .bind(user_id)
            .bind(year)
            .fetch_optional(&self.pool)
            .await?;
        Ok(balance)
    }

    async fn insert_notification(&self, notification: &NewNotification) -> Result<u64, AppError> {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, message, is_read, sent_date) VALUES (?, ?, FALSE, ?)",
        )
        .bind(notification.user_id)
        .bind(&notification.message)
        .bind(notification.sent_date)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    async fn activate_user(&self, user_id: u64) -> Result<bool, AppError> {
        // MySQL reports 0 affected rows for an already active user, so check existence first.
        let matches = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        if matches == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE users SET is_active = TRUE WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(true)
    }

    async fn list_leave_requests(
        &self,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequestView>, AppError> {
        let where_sql = if status.is_some() {
            " WHERE r.status = ?"
        } else {
            ""
        };
        let sql = format!(
            r#"
            SELECT r.id, r.user_id, u.full_name, r.from_date, r.to_date,
                   r.total_days, r.status, r.request_date
            FROM leave_requests r
            INNER JOIN users u ON u.id = r.user_id
            {where_sql}
            ORDER BY r.request_date DESC
            "#
        );

        let mut query = sqlx::query_as::<_, LeaveRequestView>(&sql);
        if let Some(status) = status {
            query = query.bind(status.to_string());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn list_employees(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE role = ? ORDER BY full_name ASC");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(Role::Employee.to_string())
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn list_balances(&self, year: i32) -> Result<Vec<LeaveBalanceView>, AppError> {
        let balances = sqlx::query_as::<_, LeaveBalanceView>(
            r#"
            SELECT b.id, b.user_id, u.full_name, b.`year`, b.used_days
            FROM leave_balances b
            INNER JOIN users u ON u.id = b.user_id
            WHERE b.`year` = ?
            ORDER BY u.full_name ASC
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        Ok(balances)
    }

    async fn count_leave_requests(&self, status: Option<LeaveStatus>) -> Result<i64, AppError> {
        let where_sql = if status.is_some() {
            " WHERE r.status = ?"
        } else {
            ""
        };
        let sql = format!(
            "SELECT COUNT(*) FROM leave_requests r INNER JOIN users u ON u.id = r.user_id{where_sql}"
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(status) = status {
            query = query.bind(status.to_string());
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn count_employees(&self, is_active: Option<bool>) -> Result<i64, AppError> {
        let mut sql = String::from("SELECT COUNT(*) FROM users WHERE role = ?");
        if is_active.is_some() {
            sql.push_str(" AND is_active = ?");
        }

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(Role::Employee.to_string());
        if let Some(is_active) = is_active {
            query = query.bind(is_active);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn count_balances_at_least(&self, year: i32, used_days: i32) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM leave_balances b
            INNER JOIN users u ON u.id = b.user_id
            WHERE b.`year` = ? AND COALESCE(b.used_days, 0) >= ?
            "#,
        )
        .bind(year)
        .bind(used_days)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

pub struct MySqlLeaveTx {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl LeaveTx for MySqlLeaveTx {
    async fn lock_request(&mut self, request_id: u64) -> Result<Option<LeaveRequest>, AppError> {
        let request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, user_id, from_date, to_date, total_days, status, request_date
            FROM leave_requests
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(request_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(request)
    }

    async fn get_or_create_balance(
        &mut self,
        user_id: u64,
        year: i32,
    ) -> Result<LeaveBalance, AppError> {
        // The unique (user_id, year) key makes this idempotent and takes the row lock.
        sqlx::query(
            r#"
            INSERT INTO leave_balances (user_id, `year`, used_days)
            VALUES (?, ?, 0)
            ON DUPLICATE KEY UPDATE id = id
            "#,
        )
        .bind(user_id)
        .bind(year)
        .execute(&mut *self.tx)
        .await?;

        let sql = format!(
            "SELECT {BALANCE_COLUMNS} FROM leave_balances WHERE user_id = ? AND `year` = ? FOR UPDATE"
        );
        let balance = sqlx::query_as::<_, LeaveBalance>(&sql)
            .bind(user_id)
            .bind(year)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(balance)
    }

    async fn set_request_status(
        &mut self,
        request_id: u64,
        status: LeaveStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(request_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn set_used_days(&mut self, balance_id: u64, used_days: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE leave_balances SET used_days = ? WHERE id = ?")
            .bind(used_days)
            .bind(balance_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert_notification(
        &mut self,
        notification: &NewNotification,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, message, is_read, sent_date) VALUES (?, ?, FALSE, ?)",
        )
        .bind(notification.user_id)
        .bind(&notification.message)
        .bind(notification.sent_date)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.last_insert_id())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
