use crate::entity::{Email, Role, UserName};
use crate::{KernelError, Rejection};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Checks length and confirmation before anything leaves the process.
    pub fn confirmed(
        password: impl Into<String>,
        confirmation: impl AsRef<str>,
    ) -> error_stack::Result<Self, KernelError> {
        let password = password.into();
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Rejection::PasswordTooShort.into_report());
        }
        if password != confirmation.as_ref() {
            return Err(Rejection::PasswordMismatch.into_report());
        }
        Ok(Self(password))
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let email = Email::new(email);
        if email.as_ref().is_empty() {
            return Err(Rejection::MissingField("email").into_report());
        }
        let password = password.into();
        if password.is_empty() {
            return Err(Rejection::MissingField("password").into_report());
        }
        Ok(Self {
            email,
            password: Password::new(password),
        })
    }
}

/// Sign-up form. Only student accounts can be requested; the backend decides
/// on any elevated role.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Registration {
    pub name: UserName,
    pub email: Email,
    pub password: Password,
    pub role: Role,
    pub student_number: Option<String>,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirmation: impl AsRef<str>,
        role: Option<Role>,
        student_number: Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let name = UserName::new(name);
        if name.is_blank() {
            return Err(Rejection::MissingField("name").into_report());
        }
        let email = Email::new(email);
        if email.as_ref().is_empty() {
            return Err(Rejection::MissingField("email").into_report());
        }
        let role = role.unwrap_or_default();
        if role.is_admin() {
            return Err(Rejection::AdminRegistration.into_report());
        }
        let password = Password::confirmed(password, confirmation)?;
        Ok(Self {
            name,
            email,
            password,
            role,
            student_number: student_number.filter(|number| !number.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rejection(result: error_stack::Result<Registration, KernelError>) -> Rejection {
        result
            .unwrap_err()
            .downcast_ref::<Rejection>()
            .cloned()
            .unwrap()
    }

    #[test]
    fn mismatched_confirmation_is_blocked() {
        assert_eq!(
            rejection(Registration::new(
                "Amina",
                "amina@univ.example",
                "correct horse",
                "correct horse!",
                None,
                None
            )),
            Rejection::PasswordMismatch
        );
    }

    #[test]
    fn short_password_is_blocked() {
        assert_eq!(
            rejection(Registration::new("Amina", "amina@univ.example", "short", "short", None, None)),
            Rejection::PasswordTooShort
        );
    }

    #[test]
    fn admin_cannot_self_register() {
        assert_eq!(
            rejection(Registration::new(
                "Amina",
                "amina@univ.example",
                "correct horse",
                "correct horse",
                Some(Role::Admin),
                None
            )),
            Rejection::AdminRegistration
        );
    }

    #[test]
    fn email_is_normalised() {
        let registration = Registration::new(
            "Amina",
            " Amina@Univ.Example ",
            "correct horse",
            "correct horse",
            None,
            Some(String::from("")),
        )
        .unwrap();
        assert_eq!(registration.email.as_ref(), "amina@univ.example");
        assert_eq!(registration.role, Role::Student);
        assert_eq!(registration.student_number, None);
    }
}
