use serde::Deserialize;

use crate::policy::Identity;
use crate::storage::Stores;
use crate::userdb::{User, UserError, UserSearchField, UserStore, hash_password, verify_password};
use crate::utils::gen_random_string;
use crate::validation::{FormErrors, ValidationError};

use super::errors::ContentError;

pub const USERNAME_MAX_LENGTH: usize = 150;

/// Submitted sign-up fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Submitted login fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|ch| ch.is_alphanumeric() || matches!(ch, '@' | '.' | '+' | '-' | '_'))
}

impl SignupForm {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        errors.check_text("username", &self.username, Some(USERNAME_MAX_LENGTH));
        if !errors.has("username") && !is_valid_username(&self.username) {
            errors.push(ValidationError::InvalidUsername);
        }

        errors.check_text("password1", &self.password1, None);
        errors.check_text("password2", &self.password2, None);
        if !errors.has("password1") && !errors.has("password2") && self.password1 != self.password2
        {
            errors.push(ValidationError::PasswordMismatch);
        }

        errors.into_result()
    }
}

/// Create an account from a sign-up form.
///
/// The new user gets a random id that never changes, so it can be stored as
/// the owner of notes and comments.
#[tracing::instrument(skip(stores, form), fields(username = %form.username))]
pub async fn register_user(stores: &Stores, form: &SignupForm) -> Result<User, ContentError> {
    form.validate()?;

    let id = gen_new_user_id(stores).await?;
    let password_hash = hash_password(&form.password1)?;
    let user = User::new(id, form.username.clone(), password_hash);

    match UserStore::create_user(stores, user).await {
        Ok(user) => Ok(user),
        Err(UserError::UsernameTaken(_)) => Err(ValidationError::UsernameTaken.into()),
        Err(e) => Err(e.into()),
    }
}

/// Check a login form and return the matching user.
///
/// Unknown usernames and wrong passwords are reported identically.
#[tracing::instrument(skip(stores, form), fields(username = %form.username))]
pub async fn authenticate_user(stores: &Stores, form: &LoginForm) -> Result<User, ContentError> {
    let mut errors = FormErrors::new();
    errors.check_text("username", &form.username, None);
    errors.check_text("password", &form.password, None);
    errors.into_result()?;

    let user = UserStore::get_user_by(stores, UserSearchField::Username(form.username.clone()))
        .await?
        .filter(|user| verify_password(&form.password, &user.password_hash));

    match user {
        Some(user) => {
            tracing::info!(user_id = %user.id, "User authenticated");
            Ok(user)
        }
        None => Err(ValidationError::InvalidCredentials.into()),
    }
}

/// Look up the account behind an authenticated identity
pub async fn get_user(stores: &Stores, identity: &Identity) -> Result<Option<User>, ContentError> {
    match identity.user_id() {
        Some(id) => Ok(UserStore::get_user(stores, id).await?),
        None => Ok(None),
    }
}

// generate a unique user ID, with built-in collision detection
async fn gen_new_user_id(stores: &Stores) -> Result<String, ContentError> {
    for _ in 0..3 {
        let id = gen_random_string(32)?;

        match UserStore::get_user(stores, &id).await {
            Ok(None) => return Ok(id),
            Ok(Some(_)) => continue,
            Err(e) => {
                return Err(ContentError::Storage(format!("Failed to check user ID: {e}")).log());
            }
        }
    }

    Err(ContentError::Storage(
        "Failed to generate a unique user ID after multiple attempts".to_string(),
    )
    .log())
}
