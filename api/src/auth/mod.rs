use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use axum_extra::extract::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use sea_orm::DatabaseConnection;

use db::models::user;
use db::repositories::repository::Repository;
use db::repositories::user_repository::UserRepository;
use services::auth::scopes::role_grants;
use services::auth::{Claims, Scope, TokenService};
use services::ServiceError;

use crate::error::service_error_response;
use crate::response::ApiResponse;

/// The authenticated caller: the decoded claims plus the *current* user
/// row they name, looked up fresh on every request rather than trusted
/// from the token (spec §4.C: role changes and `disabled` must take
/// effect immediately, not at the token's next refresh).
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: user::Model,
    pub claims: Claims,
}

impl AuthUser {
    /// `S ⊆ scope-matrix[user.role]`, per spec §4.C's scope-enforcement
    /// dependency.
    pub fn require(&self, scopes: &[Scope]) -> Result<(), ServiceError> {
        if role_grants(self.user.role, scopes) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(
                "scope not permitted for role".into(),
            ))
        }
    }
}

#[async_trait]
impl FromRequestParts<DatabaseConnection> for AuthUser {
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &DatabaseConnection,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    service_error_response(ServiceError::Unauthenticated(
                        "missing or invalid authorization header".into(),
                    ))
                })?;

        let claims = TokenService::new(state.clone())
            .decode_access_token(bearer.token())
            .map_err(service_error_response)?;

        let user = UserRepository::new(state.clone())
            .find_by_id(claims.sub.clone())
            .await
            .map_err(|e| service_error_response(ServiceError::from(e)))?
            .ok_or_else(|| {
                service_error_response(ServiceError::Unauthenticated("unknown user".into()))
            })?;

        if user.disabled {
            return Err(service_error_response(ServiceError::Unauthenticated(
                "account disabled".into(),
            )));
        }

        Ok(AuthUser { user, claims })
    }
}
