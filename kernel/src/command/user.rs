use crate::command::Password;
use crate::entity::{Email, IsActive, Role, UserName, UserPreferences};
use crate::{KernelError, Rejection};

/// Account created by an administrator.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserDraft {
    pub name: UserName,
    pub email: Email,
    pub password: Password,
    pub role: Role,
    pub student_number: Option<String>,
}

impl UserDraft {
    pub fn validate(self) -> error_stack::Result<Self, KernelError> {
        if self.name.is_blank() {
            return Err(Rejection::MissingField("name").into_report());
        }
        if self.email.as_ref().is_empty() {
            return Err(Rejection::MissingField("email").into_report());
        }
        if self.password.expose().chars().count() < crate::command::MIN_PASSWORD_LENGTH {
            return Err(Rejection::PasswordTooShort.into_report());
        }
        Ok(self)
    }
}

/// Partial update of a user; `None` leaves the attribute untouched.
///
/// `role` and `is_active` are only honoured for administrators.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct UserPatch {
    pub name: Option<UserName>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<IsActive>,
    pub preferences: Option<UserPreferences>,
}

impl UserPatch {
    pub fn validate(self) -> error_stack::Result<Self, KernelError> {
        if self.name.as_ref().is_some_and(UserName::is_blank) {
            return Err(Rejection::MissingField("name").into_report());
        }
        Ok(self)
    }

    pub fn touches_privileges(&self) -> bool {
        self.role.is_some() || self.is_active.is_some()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PasswordChange {
    pub current: Password,
    pub new: Password,
}

impl PasswordChange {
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        confirmation: impl AsRef<str>,
    ) -> error_stack::Result<Self, KernelError> {
        let current = current.into();
        if current.is_empty() {
            return Err(Rejection::MissingField("current_password").into_report());
        }
        Ok(Self {
            current: Password::new(current),
            new: Password::confirmed(new, confirmation)?,
        })
    }
}
