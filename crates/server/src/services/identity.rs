//! User accounts, roles, and authentication.
//!
//! Credentials are stored as argon2 hashes only; the raw password never
//! reaches the document. Emails are lowercase-canonical everywhere
//! (registration, login, role upsert, seeding, purge), so the same
//! address in different casing is one account.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use outfitter_core::{Email, Role, UserId};

use crate::error::{ApiError, Result};
use crate::models::{PublicUser, User};
use crate::store::Store;

/// Registration request. All three fields are required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub pass: Option<String>,
}

/// Login request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub pass: Option<String>,
}

/// Role assignment request. Upserts by email.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetRoleRequest {
    pub email: Option<String>,
    pub role: Option<String>,
}

/// User management and authentication over the store.
pub struct IdentityService<'a> {
    store: &'a Store,
    admin_email: &'a Email,
}

impl<'a> IdentityService<'a> {
    /// Create a new identity service.
    #[must_use]
    pub const fn new(store: &'a Store, admin_email: &'a Email) -> Self {
        Self { store, admin_email }
    }

    /// All users, credential hash omitted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<PublicUser>> {
        let doc = self.store.read().await?;
        Ok(doc.users.iter().map(PublicUser::from).collect())
    }

    /// Register a new account.
    ///
    /// The role defaults to client unless the email is the configured
    /// admin email.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if a field is missing or the email
    /// is malformed, and `ApiError::Conflict` if the email is taken.
    pub async fn register(&self, req: RegisterRequest) -> Result<PublicUser> {
        let (Some(name), Some(email), Some(pass)) = (req.name, req.email, req.pass) else {
            return Err(ApiError::Validation("name, email, pass required".to_owned()));
        };
        if name.trim().is_empty() || pass.is_empty() {
            return Err(ApiError::Validation("name, email, pass required".to_owned()));
        }
        let email = Email::parse(&email).map_err(|e| ApiError::Validation(e.to_string()))?;

        let role = if email == *self.admin_email {
            Role::Admin
        } else {
            Role::Client
        };
        let user = User {
            id: UserId::generate(),
            email,
            name,
            role,
            pass: Some(hash_password(&pass)?),
            photo: String::new(),
            created_at: Utc::now(),
        };

        self.store
            .update(move |doc| {
                if doc.users.iter().any(|u| u.email == user.email) {
                    return Err(ApiError::Conflict("user_exists".to_owned()));
                }
                let public = PublicUser::from(&user);
                doc.users.push(user);
                Ok(public)
            })
            .await?
    }

    /// Authenticate an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` when a field is missing, otherwise
    /// a single `ApiError::Authentication` shape for every failure:
    /// unknown email, malformed email and wrong password are
    /// indistinguishable to the caller.
    pub async fn login(&self, req: LoginRequest) -> Result<PublicUser> {
        let (Some(email), Some(pass)) = (req.email, req.pass) else {
            return Err(ApiError::Validation("email and pass required".to_owned()));
        };
        let Ok(email) = Email::parse(&email) else {
            return Err(ApiError::Authentication);
        };

        let doc = self.store.read().await?;
        let user = doc
            .users
            .iter()
            .find(|u| u.email == email)
            .ok_or(ApiError::Authentication)?;
        let hash = user.pass.as_deref().ok_or(ApiError::Authentication)?;

        if !verify_password(&pass, hash) {
            return Err(ApiError::Authentication);
        }

        Ok(PublicUser::from(user))
    }

    /// Assign a role, creating a minimal account if the email is new.
    ///
    /// A created account derives its display name from the email's local
    /// part and has no credential until the user registers.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if email or role is missing, the
    /// email is malformed, or the role is not one of the known roles.
    pub async fn set_role(&self, req: SetRoleRequest) -> Result<PublicUser> {
        let (Some(email), Some(role)) = (req.email, req.role) else {
            return Err(ApiError::Validation("email and role required".to_owned()));
        };
        let email = Email::parse(&email).map_err(|e| ApiError::Validation(e.to_string()))?;
        let role: Role = role
            .parse()
            .map_err(|e: outfitter_core::RoleError| ApiError::Validation(e.to_string()))?;

        let user = self
            .store
            .update(move |doc| {
                if let Some(user) = doc.users.iter_mut().find(|u| u.email == email) {
                    user.role = role;
                    return PublicUser::from(&*user);
                }

                let user = User {
                    id: UserId::generate(),
                    name: email.local_part().to_owned(),
                    email,
                    role,
                    pass: None,
                    photo: String::new(),
                    created_at: Utc::now(),
                };
                let public = PublicUser::from(&user);
                doc.users.push(user);
                public
            })
            .await?;

        Ok(user)
    }

    /// Remove every user except the configured admin account.
    ///
    /// Irreversible and idempotent; returns how many users remain.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be written.
    pub async fn purge(&self) -> Result<usize> {
        let admin_email = self.admin_email;
        let remaining = self
            .store
            .update(move |doc| {
                doc.users.retain(|u| &u.email == admin_email);
                doc.users.len()
            })
            .await?;

        Ok(remaining)
    }

    /// Seed the admin account at startup.
    ///
    /// Idempotent per email: a missing account is created, an existing
    /// one gets its password re-hashed and its role forced back to admin.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be written.
    pub async fn seed_admin(&self, pass: &SecretString) -> Result<()> {
        let hash = hash_password(pass.expose_secret())?;
        let admin_email = self.admin_email.clone();

        self.store
            .update(move |doc| {
                if let Some(user) = doc.users.iter_mut().find(|u| u.email == admin_email) {
                    user.pass = Some(hash);
                    user.role = Role::Admin;
                    return;
                }

                doc.users.push(User {
                    id: UserId::generate(),
                    email: admin_email,
                    name: "Administrator".to_owned(),
                    role: Role::Admin,
                    pass: Some(hash),
                    photo: String::new(),
                    created_at: Utc::now(),
                });
            })
            .await?;

        Ok(())
    }
}

/// Hash a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored PHC hash string.
fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}
