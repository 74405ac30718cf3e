use chrono::{Duration, Utc};
use db::filters::{LoginHistoryFilter, UserFilter};
use db::models::{login_history, user};
use db::repositories::login_history_repository::LoginHistoryRepository;
use db::repositories::repository::Repository;
use db::repositories::user_repository::UserRepository;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};

use crate::auth::claims::Claims;
use crate::auth::password;
use crate::auth::scopes::{role_grants, Scope};
use crate::ServiceError;
use util::config;

pub struct LoginResult {
    pub access_token: String,
    pub refresh_token: String,
    pub user: user::Model,
}

pub struct RefreshResult {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenService {
    db: DatabaseConnection,
}

impl TokenService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(config::jwt_secret().as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(config::jwt_secret().as_bytes())
    }

    fn mint(&self, claims: &Claims) -> Result<String, ServiceError> {
        encode(&Header::default(), claims, &self.encoding_key())
            .map_err(|e| ServiceError::Internal(format!("token encoding failed: {e}")))
    }

    /// Decodes without checking `exp` — callers that need to distinguish an
    /// expired-but-well-formed token from garbage call this directly.
    fn decode_ignoring_expiry(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        let data: TokenData<Claims> = decode(token, &self.decoding_key(), &validation)
            .map_err(|_| ServiceError::Unauthenticated("malformed token".into()))?;
        Ok(data.claims)
    }

    /// Login: verify credentials, assert scopes, mint a token pair, and
    /// record a fresh LoginHistory row (spec §4.C).
    pub async fn login(
        &self,
        email: &str,
        password_plain: &str,
        requested_scopes: &[Scope],
    ) -> Result<LoginResult, ServiceError> {
        let users = UserRepository::new(self.db.clone());
        let user = users
            .find_one(UserFilter::new().with_email(email.to_string()))
            .await?
            .ok_or_else(|| ServiceError::Unauthenticated("invalid credentials".into()))?;

        if !password::verify(password_plain, &user.password_hash) {
            return Err(ServiceError::Unauthenticated("invalid credentials".into()));
        }
        if user.disabled {
            return Err(ServiceError::Unauthenticated("account disabled".into()));
        }
        if !role_grants(user.role, requested_scopes) {
            return Err(ServiceError::Forbidden("scope not permitted for role".into()));
        }

        let now = Utc::now();
        let login_at = now.timestamp();
        // Truncated to whole seconds so the stored row matches `Claims::login`
        // exactly for later `with_login_at` lookups (a `Claims` timestamp has
        // no sub-second component).
        let login_at_dt = chrono::DateTime::from_timestamp(login_at, 0).unwrap_or(now);
        let access_expire = now + Duration::minutes(config::jwt_access_minutes());
        let refresh_expire = now + Duration::hours(config::jwt_refresh_hours());

        let access_claims = Claims {
            sub: user.user_id.clone(),
            login: login_at,
            exp: access_expire.timestamp(),
            scopes: requested_scopes.to_vec(),
            role: user.role,
        };
        let refresh_claims = Claims {
            exp: refresh_expire.timestamp(),
            ..access_claims.clone()
        };

        let access_token = self.mint(&access_claims)?;
        let refresh_token = self.mint(&refresh_claims)?;

        let history = LoginHistoryRepository::new(self.db.clone());
        // Single-session-per-user: evict any prior live row for this user
        // before inserting, since `(user_id, login_at)` is only unique per
        // pair, not per user.
        if let Some(existing) = history
            .find_one(LoginHistoryFilter::new().with_user_id(user.user_id.clone()))
            .await?
        {
            history.delete(existing.id).await?;
        }
        history
            .create(login_history::ActiveModel {
                user_id: Set(user.user_id.clone()),
                login_at: Set(login_at_dt),
                logout_at: Set(access_expire),
                refresh_count: Set(0),
                current_access_token: Set(access_token.clone()),
                current_refresh_token: Set(refresh_token.clone()),
                ..Default::default()
            })
            .await?;

        Ok(LoginResult {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Decodes an access token with full validation, including `exp`. This
    /// is what request-authenticating extractors call — unlike `validate`,
    /// which only answers yes/no, this hands back the claims to look the
    /// caller up by.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let data: TokenData<Claims> = decode(token, &self.decoding_key(), &Validation::default())
            .map_err(|_| ServiceError::Unauthenticated("invalid or expired token".into()))?;
        Ok(data.claims)
    }

    /// Validate: accept iff the decoded access token has not passed `exp`.
    /// The interval is half-open — a token exactly at `exp` is expired.
    pub fn validate(&self, access_token: &str) -> bool {
        let Ok(claims) = self.decode_ignoring_expiry(access_token) else {
            return false;
        };
        !claims.is_expired(Utc::now())
    }

    /// Refresh: if the current access token is still valid, return it
    /// unchanged. Otherwise validate the refresh cookie against the stored
    /// LoginHistory row and mint a new pair anchored to `access.expire`
    /// (not `now`), so repeated refreshes cannot compound drift.
    pub async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<RefreshResult, ServiceError> {
        let access_claims = self.decode_ignoring_expiry(access_token)?;
        let now = Utc::now();

        if !access_claims.is_expired(now) {
            return Ok(RefreshResult {
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
            });
        }

        let refresh_claims = self.decode_ignoring_expiry(refresh_token)?;
        if refresh_claims.sub != access_claims.sub
            || refresh_claims.login != access_claims.login
            || refresh_claims.scopes != access_claims.scopes
            || refresh_claims.role != access_claims.role
        {
            return Err(ServiceError::Unauthenticated("refresh token mismatch".into()));
        }

        let history_repo = LoginHistoryRepository::new(self.db.clone());
        let history = history_repo
            .find_one(
                LoginHistoryFilter::new()
                    .with_user_id(access_claims.sub.clone())
                    .with_login_at(access_claims.login),
            )
            .await?;

        let Some(history) = history else {
            return Err(ServiceError::Unauthenticated("no active session".into()));
        };

        if history.login_at.timestamp() != access_claims.login
            || history.refresh_count >= config::max_refresh_count() as i32
        {
            history_repo.delete(history.id).await?;
            return Err(ServiceError::Unauthenticated(
                "refresh count exhausted".into(),
            ));
        }

        let prior_expire = chrono::DateTime::from_timestamp(access_claims.exp, 0)
            .ok_or_else(|| ServiceError::Internal("corrupt token expiry".into()))?;
        let new_access_expire = prior_expire + Duration::minutes(config::jwt_access_minutes());
        let new_refresh_expire = prior_expire + Duration::hours(config::jwt_refresh_hours());

        let new_access_claims = Claims {
            exp: new_access_expire.timestamp(),
            ..access_claims.clone()
        };
        let new_refresh_claims = Claims {
            exp: new_refresh_expire.timestamp(),
            ..access_claims
        };

        let new_access_token = self.mint(&new_access_claims)?;
        let new_refresh_token = self.mint(&new_refresh_claims)?;

        let mut active_model = history.clone().into_active_model();
        active_model.logout_at = Set(new_access_expire);
        active_model.refresh_count = Set(history.refresh_count + 1);
        active_model.current_access_token = Set(new_access_token.clone());
        active_model.current_refresh_token = Set(new_refresh_token.clone());
        history_repo.update(active_model).await?;

        Ok(RefreshResult {
            access_token: new_access_token,
            refresh_token: new_refresh_token,
        })
    }

    /// Logout: delete the LoginHistory row for `(sub, login)`.
    pub async fn logout(&self, access_token: &str) -> Result<(), ServiceError> {
        let claims = self.decode_ignoring_expiry(access_token)?;
        let history_repo = LoginHistoryRepository::new(self.db.clone());
        if let Some(history) = history_repo
            .find_one(
                LoginHistoryFilter::new()
                    .with_user_id(claims.sub)
                    .with_login_at(claims.login),
            )
            .await?
        {
            history_repo.delete(history.id).await?;
        }
        Ok(())
    }
}
