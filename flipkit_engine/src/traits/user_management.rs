use thiserror::Error;

use crate::db_types::User;

#[derive(Debug, Clone, Error)]
pub enum UserApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The identity assertion did not include an email address")]
    MissingEmail,
    #[error("User {0} not found")]
    UserNotFound(String),
}

impl From<sqlx::Error> for UserApiError {
    fn from(e: sqlx::Error) -> Self {
        UserApiError::DatabaseError(e.to_string())
    }
}

/// A new local user record, created from a federated-identity assertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub google_id: Option<String>,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub picture: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait UserManagement {
    async fn fetch_user_by_id(&self, id: &str) -> Result<Option<User>, UserApiError>;

    async fn fetch_user_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserApiError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError>;

    async fn create_user(&self, user: NewUser) -> Result<User, UserApiError>;

    /// Attach a Google id to an existing user record (back-compat merge for accounts that predate Google sign-in).
    async fn link_google_id(&self, user_id: &str, google_id: &str) -> Result<User, UserApiError>;
}
