use serde::{Deserialize, Serialize};
use sqlx::{
    Decode, MySql, Type,
    error::BoxDynError,
    mysql::{MySqlTypeInfo, MySqlValueRef},
};
use utoipa::ToSchema;

/// Account role, stored verbatim in `users.role`.
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
pub enum Role {
    Admin,
    Employee,
}

impl Type<MySql> for Role {
    fn type_info() -> MySqlTypeInfo {
        <str as Type<MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        <str as Type<MySql>>::compatible(ty)
    }
}

impl<'r> Decode<'r, MySql> for Role {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&'r str as Decode<'r, MySql>>::decode(value)?;
        Ok(raw.parse()?)
    }
}
