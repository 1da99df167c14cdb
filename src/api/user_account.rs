use crate::{
    auth::auth::AuthUser,
    error::AppError,
    model::user::User,
    services::accounts::{self, ActivationOutcome},
    store::LeaveStore,
};
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Employee accounts sorted by name
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Employee accounts", body = [User]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Accounts"
)]
pub async fn user_accounts(store: web::Data<dyn LeaveStore>) -> Result<HttpResponse, AppError> {
    let users = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Activate a user account
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/activate",
    params(
        ("id" = u64, Path, description = "ID of the user to activate")
    ),
    responses(
        (status = 200, description = "Activated, or skipped for an unknown user", body = Object, example = json!({
            "outcome": "activated",
            "message": "Account activated."
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Accounts"
)]
pub async fn activate(
    auth: AuthUser,
    store: web::Data<dyn LeaveStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let outcome = accounts::activate(store.get_ref(), &auth, path.into_inner()).await?;

    let message = match outcome {
        ActivationOutcome::Activated => Some("Account activated."),
        ActivationOutcome::Skipped => None,
    };
    Ok(HttpResponse::Ok().json(json!({ "outcome": outcome, "message": message })))
}

#[cfg(test)]
mod tests {
    use crate::{
        model::role::Role,
        store::memory::MemoryStore,
        test_support::{admin_app, bearer},
    };
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn lists_only_employees_by_name() {
        let store = MemoryStore::new();
        store.add_user("Zed Admin", Role::Admin, true);
        store.add_user("Vu", Role::Employee, true);
        store.add_user("Anh", Role::Employee, false);
        let app = admin_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/admin/users")
            .insert_header(("Authorization", bearer(1, Role::Admin)))
            .to_request();
        let users: Vec<Value> = test::call_and_read_body_json(&app, req).await;

        let names: Vec<&str> = users.iter().map(|u| u["full_name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Anh", "Vu"]);
        assert!(users.iter().all(|u| u.get("password").is_none()));
    }

    #[actix_web::test]
    async fn activate_twice_succeeds() {
        let store = MemoryStore::new();
        let user = store.add_user("Anh", Role::Employee, false);
        let app = admin_app!(store);

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri(&format!("/api/admin/users/{user}/activate"))
                .insert_header(("Authorization", bearer(1, Role::Admin)))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["outcome"], "activated");
        }
        assert!(store.snapshot().users[0].is_active);

        let req = test::TestRequest::post()
            .uri("/api/admin/users/999/activate")
            .insert_header(("Authorization", bearer(1, Role::Admin)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["outcome"], "skipped");
    }
}
