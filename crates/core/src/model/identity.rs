use serde::{Deserialize, Serialize};

/// Username of the anonymous identity used when no session exists.
pub const GUEST_USERNAME: &str = "guest";

/// Role carried by an authenticated identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    /// Maps a backend role string. Anything other than `"admin"` is a student.
    #[must_use]
    pub fn from_backend(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::Student,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from_backend(Some(&value))
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// The user a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub fn new(username: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            role,
        }
    }

    /// The anonymous identity.
    #[must_use]
    pub fn guest() -> Self {
        Self::new(GUEST_USERNAME, "Guest", Role::Student)
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.username.trim().is_empty() || self.username == GUEST_USERNAME
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        !self.is_guest() && self.role == Role::Admin
    }
}
