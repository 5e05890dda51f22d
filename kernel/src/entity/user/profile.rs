use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct IsActive(bool);

impl IsActive {
    pub fn new(active: impl Into<bool>) -> Self {
        Self(active.into())
    }
}

impl Default for IsActive {
    fn default() -> Self {
        Self(true)
    }
}

/// Free-form attributes a user maintains on the profile page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub phone: Option<String>,
    pub student_number: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub email_notifications: bool,
    pub due_date_reminders: bool,
    pub language: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            due_date_reminders: true,
            language: String::from("fr"),
        }
    }
}
