//! Caller-held session state
//!
//! `Anonymous -> Authenticated(role)` on a successful login,
//! `Authenticated(role) -> Anonymous` on logout. The presentation layer owns
//! the value and passes it into every mutating call.

use chrono::{DateTime, Utc};

use crate::error::{DashError, Result};
use crate::models::Role;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum SessionState {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
        role: Role,
        expires_at: Option<DateTime<Utc>>,
    },
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated session; `max_age` of `None` never expires.
    pub fn authenticated(
        username: impl Into<String>,
        role: Role,
        max_age: Option<chrono::Duration>,
    ) -> Self {
        Self {
            state: SessionState::Authenticated {
                username: username.into(),
                role,
                expires_at: max_age.and_then(|age| Utc::now().checked_add_signed(age)),
            },
        }
    }

    pub fn role(&self) -> Option<Role> {
        match &self.state {
            SessionState::Anonymous => None,
            SessionState::Authenticated { role, .. } => Some(*role),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::Anonymous => None,
            SessionState::Authenticated { username, .. } => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.check_at(Utc::now()).is_ok()
    }

    pub fn logout(&mut self) {
        self.state = SessionState::Anonymous;
    }

    /// Any role will do; returns it.
    pub fn require_authenticated(&self) -> Result<Role> {
        self.check_at(Utc::now())
    }

    /// Exactly `required`.
    pub fn require_role(&self, required: Role) -> Result<()> {
        if self.require_authenticated()? == required {
            Ok(())
        } else {
            Err(DashError::Unauthorized { required })
        }
    }

    fn check_at(&self, now: DateTime<Utc>) -> Result<Role> {
        match &self.state {
            SessionState::Anonymous => Err(DashError::NotAuthenticated),
            SessionState::Authenticated {
                expires_at: Some(at),
                ..
            } if now >= *at => Err(DashError::SessionExpired),
            SessionState::Authenticated { role, .. } => Ok(*role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_role() {
        let s = Session::anonymous();
        assert_eq!(s.role(), None);
        assert!(!s.is_authenticated());
        assert!(matches!(
            s.require_authenticated(),
            Err(DashError::NotAuthenticated)
        ));
    }

    #[test]
    fn login_then_logout() {
        let mut s = Session::authenticated("jane", Role::Recruiter, None);
        assert_eq!(s.role(), Some(Role::Recruiter));
        assert_eq!(s.username(), Some("jane"));
        assert_eq!(s.require_authenticated().unwrap(), Role::Recruiter);

        s.logout();
        assert_eq!(s, Session::anonymous());
    }

    #[test]
    fn recruiter_is_not_admin() {
        let s = Session::authenticated("jane", Role::Recruiter, None);
        assert!(matches!(
            s.require_role(Role::Admin),
            Err(DashError::Unauthorized {
                required: Role::Admin
            })
        ));
        let admin = Session::authenticated("root", Role::Admin, None);
        assert!(admin.require_role(Role::Admin).is_ok());
    }

    #[test]
    fn expiry() {
        let s = Session::authenticated("jane", Role::Admin, Some(chrono::Duration::minutes(5)));
        assert!(s.is_authenticated());

        let later = Utc::now() + chrono::Duration::minutes(6);
        assert!(matches!(s.check_at(later), Err(DashError::SessionExpired)));
        // Role is still visible for display; checks reject it
        assert_eq!(s.role(), Some(Role::Admin));
    }

    #[test]
    fn no_max_age_never_expires() {
        let s = Session::authenticated("jane", Role::Admin, None);
        let far = Utc::now() + chrono::Duration::days(3650);
        assert!(s.check_at(far).is_ok());
    }
}
