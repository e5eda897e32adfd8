//! Fixed-table session validator for tests and local tooling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Accepts only the tokens it was built with.
///
/// An outage can be switched on to make every call fail, which is how the
/// middleware's 503 path is exercised without a real identity service.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    sessions: HashMap<String, AuthenticatedUser>,
    outage: Mutex<Option<AuthError>>,
    calls: AtomicUsize,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.sessions.insert(token.into(), user);
        self
    }

    /// Registers `token` for an investor whose email is derived from the id.
    ///
    /// Invalid ids are ignored.
    pub fn with_investor(self, token: impl Into<String>, user_id: &str) -> Self {
        match UserId::new(user_id) {
            Ok(id) => {
                let email = format!("{}@investors.test", user_id);
                self.with_user(token, AuthenticatedUser::new(id, email, None))
            }
            Err(_) => self,
        }
    }

    pub fn with_error(self, error: AuthError) -> Self {
        self.set_outage(Some(error));
        self
    }

    pub fn set_outage(&self, error: Option<AuthError>) {
        *self.outage.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    /// Number of `validate` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outage = self
            .outage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(error) = outage {
            return Err(error);
        }
        match self.sessions.get(token) {
            Some(user) => Ok(user.clone()),
            None => Err(AuthError::InvalidToken),
        }
    }
}
