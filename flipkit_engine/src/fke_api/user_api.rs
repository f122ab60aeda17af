use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{GoogleProfile, User},
    traits::{NewUser, UserApiError, UserManagement},
};

/// `UserApi` resolves federated-identity assertions to local user records.
pub struct UserApi<B> {
    db: B,
}

impl<B> Debug for UserApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserApi")
    }
}

impl<B> UserApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> UserApi<B>
where B: UserManagement
{
    /// Resolve a Google sign-in to a local user.
    ///
    /// Lookup order:
    /// 1. by Google id (the most reliable key);
    /// 2. by email, for accounts that predate Google sign-in. If such an account has no linked Google id yet, the
    ///    id from the assertion is attached to it;
    /// 3. otherwise a new user is created.
    ///
    /// An assertion without an email cannot be resolved and fails with [`UserApiError::MissingEmail`].
    pub async fn resolve_google_user(&self, profile: GoogleProfile) -> Result<User, UserApiError> {
        let email = profile.email.as_deref().filter(|e| !e.trim().is_empty()).ok_or(UserApiError::MissingEmail)?;
        if let Some(user) = self.db.fetch_user_by_google_id(&profile.google_id).await? {
            trace!("👤️ Google id {} resolved to existing user {}", profile.google_id, user.id);
            return Ok(user);
        }
        if let Some(user) = self.db.fetch_user_by_email(email).await? {
            return match &user.google_id {
                Some(_) => Ok(user),
                None => {
                    info!("👤️ Linking Google id {} to existing user {}", profile.google_id, user.id);
                    self.db.link_google_id(&user.id, &profile.google_id).await
                },
            };
        }
        let new_user = NewUser {
            google_id: Some(profile.google_id.clone()),
            email: email.to_string(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            picture: profile.picture,
        };
        let user = self.db.create_user(new_user).await?;
        info!("👤️ Created new user {} for Google id {}", user.id, profile.google_id);
        Ok(user)
    }

    /// Profile fetch for an authenticated session.
    pub async fn fetch_user(&self, user_id: &str) -> Result<User, UserApiError> {
        self.db.fetch_user_by_id(user_id).await?.ok_or_else(|| UserApiError::UserNotFound(user_id.to_string()))
    }
}
