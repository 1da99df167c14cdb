pub mod dashboard;
pub mod leave_balance;
pub mod leave_request;
pub mod user_account;
