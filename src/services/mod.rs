pub mod accounts;
pub mod dashboard;
pub mod leave_review;
