//! User creation and login against the `Users` table

use super::password::{
    dummy_hash, hash_password_blocking, validate_password, verify_password, PasswordHash,
};
use super::session::Session;
use crate::config::DashConfig;
use crate::db::{Database, UserRepo};
use crate::error::{DashError, Result};
use crate::models::{Role, User, Username};

pub struct AuthService {
    db: Database,
    cost: u32,
    session_max_age: Option<chrono::Duration>,
}

impl AuthService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cost: bcrypt::DEFAULT_COST,
            session_max_age: None,
        }
    }

    pub fn from_config(db: Database, config: &DashConfig) -> Self {
        Self::new(db)
            .with_cost(config.bcrypt_cost)
            .with_session_max_age(config.session_max_age())
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_session_max_age(mut self, max_age: Option<chrono::Duration>) -> Self {
        self.session_max_age = max_age;
        self
    }

    /// Create a user. Admin sessions only.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` / `NotAuthenticated` / `SessionExpired` from the session check
    /// - `InvalidRole` if `role` is not `admin` or `recruiter`
    /// - `Validation` for a malformed username or password
    /// - `DuplicateUser` if the username is taken
    pub async fn create_user(
        &self,
        session: &Session,
        username: &str,
        plaintext: &str,
        role: &str,
    ) -> Result<()> {
        session.require_role(Role::Admin)?;
        let role: Role = role.parse()?;
        let username = Username::new(username)?;

        let hash = hash_password_blocking(plaintext, self.cost).await?;
        UserRepo::new(&self.db).insert(&username, &hash, role).await?;

        tracing::info!(username = %username, role = %role, "user created");
        Ok(())
    }

    /// Create the first admin. Refused once any user exists.
    pub async fn bootstrap_admin(&self, username: &str, plaintext: &str) -> Result<()> {
        let username = Username::new(username)?;
        let hash = hash_password_blocking(plaintext, self.cost).await?;

        if !UserRepo::new(&self.db).insert_first_admin(&username, &hash).await? {
            return Err(DashError::Unauthorized {
                required: Role::Admin,
            });
        }
        tracing::info!(username = %username, "bootstrap admin created");
        Ok(())
    }

    /// Role of the user if `plaintext` matches, `None` otherwise.
    ///
    /// Unknown user and wrong password are indistinguishable: same return
    /// value, same log line, one bcrypt verification each.
    pub async fn authenticate(&self, username: &str, plaintext: &str) -> Result<Option<Role>> {
        let credentials = match (Username::new(username), validate_password(plaintext)) {
            (Ok(name), Ok(())) => UserRepo::new(&self.db).credentials(name.as_str()).await?,
            _ => None,
        };

        let role = match credentials {
            Some(creds) => {
                let ok = self.verify(plaintext, creds.hash).await?;
                if ok {
                    creds.role
                } else {
                    None
                }
            }
            None => {
                // Same cost as a stored hash, so an unknown name is not faster
                self.verify(plaintext, dummy_hash(self.cost)).await?;
                None
            }
        };

        if role.is_none() {
            tracing::warn!(username, "login failed");
        }
        Ok(role)
    }

    /// [`authenticate`](Self::authenticate), wrapped in a [`Session`].
    pub async fn login(&self, username: &str, plaintext: &str) -> Result<Option<Session>> {
        let role = self.authenticate(username, plaintext).await?;
        Ok(role.map(|role| {
            tracing::info!(username, role = %role, "logged in");
            Session::authenticated(username, role, self.session_max_age)
        }))
    }

    /// All users with their roles. Admin sessions only.
    pub async fn list_users(&self, session: &Session) -> Result<Vec<User>> {
        session.require_role(Role::Admin)?;
        UserRepo::new(&self.db).list().await
    }

    async fn verify(&self, plaintext: &str, hash: PasswordHash) -> Result<bool> {
        let plaintext = plaintext.to_string();
        tokio::task::spawn_blocking(move || verify_password(&plaintext, &hash))
            .await
            .map_err(|e| DashError::hashing(format!("task join error: {}", e)))
    }
}
