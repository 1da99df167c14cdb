use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::{auth::auth::AuthUser, error::AppError, store::LeaveStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivationOutcome {
    Activated,
    /// No such user.
    Skipped,
}

/// Marks the account active. Safe to repeat.
#[instrument(name = "activate_user", skip(store, actor), fields(actor = %actor.username))]
pub async fn activate(
    store: &dyn LeaveStore,
    actor: &AuthUser,
    user_id: u64,
) -> Result<ActivationOutcome, AppError> {
    actor.require_admin()?;
    if store.activate_user(user_id).await? {
        info!("Account activated");
        Ok(ActivationOutcome::Activated)
    } else {
        info!("No such user, skipping activation");
        Ok(ActivationOutcome::Skipped)
    }
}
