mod token;

pub use self::token::*;
use crate::entity::User;
use crate::KernelError;
use error_stack::Report;

/// Who is acting on a request.
///
/// Built once from the persisted `token` / `user` pair and handed to every
/// operation; nothing else re-reads the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: AccessToken,
        user: User,
    },
}

impl Session {
    pub fn authenticated(token: AccessToken, user: User) -> Self {
        Self::Authenticated { token, user }
    }

    /// Rebuilds a session from its stored form. Anything missing or unreadable
    /// yields an anonymous session.
    pub fn restore(token: Option<&str>, user: Option<&str>) -> Self {
        let (Some(token), Some(user)) = (token, user) else {
            return Self::Anonymous;
        };
        if token.trim().is_empty() {
            return Self::Anonymous;
        }
        match serde_json::from_str::<User>(user) {
            Ok(user) => Self::authenticated(AccessToken::new(token), user),
            Err(error) => {
                tracing::debug!("discarding unreadable stored user: {error}");
                Self::Anonymous
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn token(&self) -> error_stack::Result<&AccessToken, KernelError> {
        match self {
            Self::Authenticated { token, .. } => Ok(token),
            Self::Anonymous => Err(Report::new(KernelError::Unauthenticated)),
        }
    }

    pub fn user(&self) -> error_stack::Result<&User, KernelError> {
        match self {
            Self::Authenticated { user, .. } => Ok(user),
            Self::Anonymous => Err(Report::new(KernelError::Unauthenticated)),
        }
    }

    pub fn require_admin(&self) -> error_stack::Result<&User, KernelError> {
        let user = self.user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(Report::new(KernelError::Forbidden)
                .attach_printable(format!("user {:?} is not an administrator", user.id())))
        }
    }

    /// Replaces the user while keeping the token, after a profile update.
    pub fn with_user(self, user: User) -> Self {
        match self {
            Self::Authenticated { token, .. } => Self::authenticated(token, user),
            Self::Anonymous => Self::Anonymous,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::{
        Email, IsActive, Role, UserId, UserName, UserPreferences, UserProfile,
    };

    fn student() -> User {
        User::new(
            UserId::new(7),
            UserName::new("Amina"),
            Email::new("amina@univ.example"),
            Role::Student,
            IsActive::new(true),
            UserProfile::default(),
            UserPreferences::default(),
        )
    }

    #[test]
    fn restores_stored_pair() {
        let stored = serde_json::to_string(&student()).unwrap();
        let session = Session::restore(Some("abc"), Some(&stored));
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap(), &student());
    }

    #[test]
    fn malformed_user_means_logged_out() {
        let session = Session::restore(Some("abc"), Some("{not json"));
        assert_eq!(session, Session::Anonymous);
        assert_eq!(
            *session.token().unwrap_err().current_context(),
            KernelError::Unauthenticated
        );
    }

    #[test]
    fn missing_token_means_logged_out() {
        let stored = serde_json::to_string(&student()).unwrap();
        assert_eq!(Session::restore(None, Some(&stored)), Session::Anonymous);
        assert_eq!(Session::restore(Some(" "), Some(&stored)), Session::Anonymous);
    }

    #[test]
    fn students_are_not_admins() {
        let session = Session::authenticated(AccessToken::new("abc"), student());
        assert_eq!(
            *session.require_admin().unwrap_err().current_context(),
            KernelError::Forbidden
        );
    }
}
