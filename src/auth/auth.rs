use crate::config::Config;
use crate::{error::AppError, model::role::Role};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use super::jwt::verify_token;
use crate::models::TokenType;

/// Authenticated caller, decoded from the bearer access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    /// Resolves the principal from an `Authorization: Bearer ...` header value.
    pub fn from_bearer(header: Option<&str>, config: &Config) -> Result<Self, AppError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

        let claims = verify_token(token, &config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::Unauthorized("Access token required".into()));
        }

        Ok(AuthUser {
            user_id: claims.user_id,
            username: claims.sub,
            role: claims.role,
        })
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin only".into()))
        }
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Already resolved by auth_middleware on protected scopes.
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(AppError::Internal(anyhow::anyhow!("Config missing"))));
            }
        };

        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok());

        ready(AuthUser::from_bearer(header, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::jwt, test_support};

    #[test]
    fn accepts_access_tokens_only() {
        let config = test_support::config();
        let access =
            jwt::generate_access_token(3, "root".into(), Role::Admin, &config.jwt_secret, 60)
                .unwrap();
        let header = format!("Bearer {access}");
        let user = AuthUser::from_bearer(Some(&header), &config).unwrap();
        assert_eq!(user.user_id, 3);
        assert!(user.require_admin().is_ok());

        let (refresh, _) =
            jwt::generate_refresh_token(3, "root".into(), Role::Admin, &config.jwt_secret, 60)
                .unwrap();
        let header = format!("Bearer {refresh}");
        assert!(matches!(
            AuthUser::from_bearer(Some(&header), &config),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        let config = test_support::config();
        assert!(matches!(
            AuthUser::from_bearer(None, &config),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            AuthUser::from_bearer(Some("Token abc"), &config),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn employees_are_not_admins() {
        let user = AuthUser {
            user_id: 1,
            username: "emp".into(),
            role: Role::Employee,
        };
        assert!(matches!(user.require_admin(), Err(AppError::Forbidden(_))));
    }
}
