use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::User,
    helpers::new_entity_id,
    traits::{NewUser, UserApiError},
};

pub async fn fetch_user_by_id(id: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn fetch_user_by_google_id(
    google_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE google_id = $1").bind(google_id).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn create_user(user: NewUser, conn: &mut SqliteConnection) -> Result<User, UserApiError> {
    let id = new_entity_id("usr");
    let user = sqlx::query_as(
        r#"
            INSERT INTO users (id, google_id, email, first_name, last_name, picture)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(id.as_str())
    .bind(user.google_id)
    .bind(user.email)
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(user.picture)
    .fetch_one(conn)
    .await?;
    debug!("👤️ User inserted with id {id}");
    Ok(user)
}

pub async fn link_google_id(
    user_id: &str,
    google_id: &str,
    conn: &mut SqliteConnection,
) -> Result<User, UserApiError> {
    let user: Option<User> = sqlx::query_as(
        "UPDATE users SET google_id = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(google_id)
    .fetch_optional(conn)
    .await?;
    user.ok_or_else(|| UserApiError::UserNotFound(user_id.to_string()))
}
