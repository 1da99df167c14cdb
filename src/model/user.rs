use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;

/// User account without credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[schema(example = 7)]
    pub id: u64,
    #[schema(example = "anv")]
    pub username: String,
    #[schema(example = "Nguyen Van A")]
    pub full_name: String,
    pub role: Role,
    #[schema(example = false)]
    pub is_active: bool,
}
