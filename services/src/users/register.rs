use chrono::{DateTime, Utc};
use db::filters::UserFilter;
use db::models::user::{self, Role};
use db::repositories::repository::Repository;
use db::repositories::user_repository::UserRepository;
use rand::Rng;
use sea_orm::{DatabaseConnection, Set};
use std::path::Path;
use std::str::FromStr;

use crate::auth::password;
use crate::ServiceError;

const GENERATED_PASSWORD_LEN: usize = 10;
const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

/// Mirrors `generate_password` from the original backend: a random
/// fixed-length string drawn from letters, digits, and punctuation.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_PASSWORD_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..PASSWORD_CHARSET.len());
            PASSWORD_CHARSET[idx] as char
        })
        .collect()
}

pub struct NewUser {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
    pub active_start_date: DateTime<Utc>,
    pub active_end_date: DateTime<Utc>,
}

/// Registers one user (spec §6 `POST /users/register`). Returns the created
/// row plus the plaintext password actually used, so a caller who left
/// `password` empty can be told what was generated.
pub async fn register_user(
    db: &DatabaseConnection,
    new: NewUser,
) -> Result<(user::Model, String), ServiceError> {
    let users = UserRepository::new(db.clone());

    if users
        .find_one(UserFilter::new().with_user_id(new.user_id.clone()))
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "user {} already exists",
            new.user_id
        )));
    }
    if users
        .find_one(UserFilter::new().with_email(new.email.clone()))
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "email {} already in use",
            new.email
        )));
    }

    let plain_password = new.password.unwrap_or_else(generate_password);
    let password_hash = password::hash(&plain_password)?;

    let created = users
        .create(user::ActiveModel {
            user_id: Set(new.user_id),
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(password_hash),
            role: Set(new.role),
            disabled: Set(false),
            active_start_date: Set(new.active_start_date),
            active_end_date: Set(new.active_end_date),
        })
        .await?;

    log::info!("registered user {}", created.user_id);
    Ok((created, plain_password))
}

pub struct SheetRowOutcome {
    pub row: usize,
    pub user_id: String,
    pub outcome: Result<String, String>,
}

const SHEET_COLUMNS: [&str; 7] = [
    "student_id",
    "username",
    "email",
    "password",
    "role",
    "active_start_date",
    "active_end_date",
];

/// Registers many users from an uploaded spreadsheet (spec §6
/// `POST /users/register/multiple`). Mirrors `register_multiple_users` from
/// the original backend: header-named columns, a blank password column
/// means "generate one", and per-row failures don't abort the batch — each
/// row's outcome (the password used, or the error) is reported back
/// instead of rewriting the uploaded file in place.
pub async fn register_users_from_sheet(
    db: &DatabaseConnection,
    sheet_path: &Path,
) -> Result<Vec<SheetRowOutcome>, ServiceError> {
    let rows = util::roster::read_sheet_rows(sheet_path)
        .ok_or_else(|| ServiceError::BadRequest("unreadable spreadsheet".into()))?;
    let Some((header, body)) = rows.split_first() else {
        return Err(ServiceError::BadRequest("spreadsheet has no rows".into()));
    };

    let col = |name: &str| header.iter().position(|c| c.trim() == name);
    let indices: Vec<usize> = SHEET_COLUMNS
        .iter()
        .map(|name| col(name).ok_or_else(|| format!("missing column: {name}")))
        .collect::<Result<_, _>>()
        .map_err(ServiceError::BadRequest)?;

    let mut outcomes = Vec::with_capacity(body.len());
    for (i, row) in body.iter().enumerate() {
        let get = |slot: usize| row.get(indices[slot]).cloned().unwrap_or_default();
        let user_id = get(0);
        if user_id.is_empty() {
            continue;
        }

        let outcome = register_row(db, &get, &user_id).await;
        outcomes.push(SheetRowOutcome {
            row: i + 2, // 1-based, plus the header row
            user_id,
            outcome,
        });
    }

    Ok(outcomes)
}

async fn register_row(
    db: &DatabaseConnection,
    get: &impl Fn(usize) -> String,
    user_id: &str,
) -> Result<String, String> {
    let role = Role::from_str(get(4).trim()).map_err(|_| format!("invalid role: {}", get(4)))?;
    let active_start_date = get(5)
        .parse::<DateTime<Utc>>()
        .map_err(|e| format!("invalid active_start_date: {e}"))?;
    let active_end_date = get(6)
        .parse::<DateTime<Utc>>()
        .map_err(|e| format!("invalid active_end_date: {e}"))?;
    let password = get(3);

    let new = NewUser {
        user_id: user_id.to_string(),
        username: get(1),
        email: get(2),
        password: if password.is_empty() {
            None
        } else {
            Some(password)
        },
        role,
        active_start_date,
        active_end_date,
    };

    register_user(db, new)
        .await
        .map(|(_, plain_password)| plain_password)
        .map_err(|e| e.to_string())
}

/// `GET /users/all`. No pagination per spec §6.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    Ok(UserRepository::new(db.clone())
        .find_all(UserFilter::new())
        .await?)
}

/// `POST /users/delete`. Missing ids are silently skipped, matching the
/// original backend's `if user: db.delete(user)`.
pub async fn delete_users(db: &DatabaseConnection, user_ids: Vec<String>) -> Result<(), ServiceError> {
    let users = UserRepository::new(db.clone());
    for user_id in user_ids {
        if users.find_by_id(user_id.clone()).await?.is_some() {
            users.delete(user_id).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::test_utils::test_db;

    fn sample_new(user_id: &str) -> NewUser {
        let now = Utc::now();
        NewUser {
            user_id: user_id.into(),
            username: format!("student-{user_id}"),
            email: format!("{user_id}@example.edu"),
            password: None,
            role: Role::Student,
            active_start_date: now - chrono::Duration::days(1),
            active_end_date: now + chrono::Duration::days(365),
        }
    }

    #[tokio::test]
    async fn registers_and_generates_password_when_absent() {
        let db = test_db().await;
        let (created, plain) = register_user(&db, sample_new("u001")).await.unwrap();
        assert_eq!(created.user_id, "u001");
        assert_eq!(plain.len(), GENERATED_PASSWORD_LEN);
        assert!(password::verify(&plain, &created.password_hash));
    }

    #[tokio::test]
    async fn duplicate_user_id_is_conflict() {
        let db = test_db().await;
        register_user(&db, sample_new("u001")).await.unwrap();
        let result = register_user(&db, sample_new("u001")).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_skips_missing_ids() {
        let db = test_db().await;
        register_user(&db, sample_new("u001")).await.unwrap();
        delete_users(&db, vec!["u001".into(), "ghost".into()])
            .await
            .unwrap();
        assert!(list_users(&db).await.unwrap().is_empty());
    }
}
