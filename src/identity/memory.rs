use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::{IdentityFailure, IdentityProvider, Session};
use crate::error::AppResult;

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    uid: String,
    password: SecretString,
}

/// Process-local identity provider for tests and offline runs.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    reset_requests: Mutex<Vec<String>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_account(&self, email: &str) -> bool {
        self.accounts().contains_key(&normalize(email))
    }

    pub fn reset_requests(&self) -> Vec<String> {
        self.reset_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, email: &str, password: &SecretString) -> AppResult<Session> {
        let email = normalize(email);
        let accounts = self.accounts();
        let account = accounts.get(&email).ok_or(IdentityFailure::UserNotFound)?;
        if account.password.expose_secret() != password.expose_secret() {
            return Err(IdentityFailure::WrongPassword.into());
        }
        Ok(Session {
            uid: account.uid.clone(),
            email,
        })
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &SecretString) -> AppResult<Session> {
        if password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityFailure::WeakPassword.into());
        }
        let email = normalize(email);
        let mut accounts = self.accounts();
        if accounts.contains_key(&email) {
            return Err(IdentityFailure::EmailInUse.into());
        }
        let uid = uuid::Uuid::now_v7().simple().to_string();
        accounts.insert(
            email.clone(),
            Account {
                uid: uid.clone(),
                password: password.clone(),
            },
        );
        debug!(%uid, "Identity account created");
        Ok(Session { uid, email })
    }

    async fn sign_in(&self, email: &str, password: &SecretString) -> AppResult<Session> {
        self.check(email, password)
    }

    async fn send_password_reset(&self, email: &str) -> AppResult<()> {
        let email = normalize(email);
        if !self.accounts().contains_key(&email) {
            return Err(IdentityFailure::UserNotFound.into());
        }
        self.reset_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email);
        Ok(())
    }

    async fn reauthenticate(&self, session: &Session, password: &SecretString) -> AppResult<()> {
        self.check(&session.email, password).map(|_| ())
    }

    async fn update_password(&self, session: &Session, new_password: &SecretString) -> AppResult<()> {
        if new_password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityFailure::WeakPassword.into());
        }
        let mut accounts = self.accounts();
        let account = accounts
            .get_mut(&session.email)
            .filter(|a| a.uid == session.uid)
            .ok_or(IdentityFailure::SessionExpired)?;
        account.password = new_password.clone();
        Ok(())
    }

    async fn delete_user(&self, session: &Session) -> AppResult<()> {
        let mut accounts = self.accounts();
        match accounts.get(&session.email) {
            Some(account) if account.uid == session.uid => {
                accounts.remove(&session.email);
                Ok(())
            }
            _ => Err(IdentityFailure::UserNotFound.into()),
        }
    }
}
