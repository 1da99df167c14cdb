use crate::api::leave_request::ReviewResponse;
use crate::auth::handlers::LoginResponse;
use crate::model::leave_balance::{LeaveBalanceResponse, LeaveBalanceView};
use crate::model::leave_request::{LeaveRequestView, LeaveStatus};
use crate::model::role::Role;
use crate::model::user::User;
use crate::models::LoginReqDto;
use crate::services::accounts::ActivationOutcome;
use crate::services::dashboard::DashboardSummary;
use crate::services::leave_review::ReviewOutcome;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Administration API",
        version = "1.0.0",
        description = r#"
## Leave Administration

Back-office API used by administrators to run the yearly leave workflow.

### 🔹 Key Features
- **Leave review**
  - List every request or only the pending ones, then approve or reject them
  - Approval is checked against the annual cap and recorded atomically
- **Account activation**
  - List employee accounts and activate newly registered ones
- **Leave balances**
  - View used and remaining days for the current year
  - Warn employees who reached the warning threshold

### 🔐 Security
Every `/api/admin` endpoint requires a **JWT Bearer** access token issued to an **Admin**.
Tokens are obtained from `/auth/login` and rotated with `/auth/refresh`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::dashboard::dashboard,

        crate::api::leave_request::leave_requests,
        crate::api::leave_request::leave_requests_to_review,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::user_account::user_accounts,
        crate::api::user_account::activate,

        crate::api::leave_balance::leave_balances,
        crate::api::leave_balance::send_warning
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            Role,
            User,
            LeaveStatus,
            LeaveRequestView,
            LeaveBalanceView,
            LeaveBalanceResponse,
            ReviewOutcome,
            ReviewResponse,
            ActivationOutcome,
            DashboardSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Sign in and token rotation"),
        (name = "Dashboard", description = "Admin overview"),
        (name = "Leave", description = "Leave request review APIs"),
        (name = "Accounts", description = "Employee account APIs"),
        (name = "Balances", description = "Yearly leave balance APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
