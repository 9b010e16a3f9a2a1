//! User model for modboard.
//!
//! This module defines the User struct and the Role capability ladder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User role, ordered by capability.
///
/// Stored in the database as its integer level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum Role {
    /// Regular member.
    #[default]
    Member = 0,
    /// May approve posts and read pending content.
    Reviewer = 1,
    /// Administrator. Everything a reviewer can do.
    Admin = 2,
}

impl Role {
    /// Integer level as stored in the database and carried in tokens.
    pub fn level(&self) -> i64 {
        *self as i64
    }

    /// Map a stored integer level to a role.
    ///
    /// Levels above 2 are treated as admin, negative levels as member.
    pub fn from_level(level: i64) -> Self {
        match level {
            l if l >= 2 => Role::Admin,
            1 => Role::Reviewer,
            _ => Role::Member,
        }
    }

    /// Convert role to its string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Reviewer => "reviewer",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the required permission level.
    ///
    /// # Examples
    ///
    /// ```
    /// use modboard::db::Role;
    ///
    /// assert!(Role::Admin.can_access(Role::Reviewer));
    /// assert!(Role::Reviewer.can_access(Role::Reviewer));
    /// assert!(!Role::Member.can_access(Role::Reviewer));
    /// ```
    pub fn can_access(&self, required: Role) -> bool {
        *self >= required
    }

    /// Whether this role may moderate posts.
    pub fn can_review(&self) -> bool {
        self.can_access(Role::Reviewer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Role::Member),
            "reviewer" => Ok(Role::Reviewer),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// Optional demographic fields collected at registration.
///
/// Free text, not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_level1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_level2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_level3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_level4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_level5: Option<String>,
}

impl ProfileFields {
    /// Replace blank strings with `None`.
    pub fn normalized(self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            gender: blank_to_none(self.gender),
            region_level1: blank_to_none(self.region_level1),
            region_level2: blank_to_none(self.region_level2),
            region_level3: blank_to_none(self.region_level3),
            region_level4: blank_to_none(self.region_level4),
            region_level5: blank_to_none(self.region_level5),
        }
    }
}

/// User entity representing a registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique, matched exactly).
    pub username: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// User role for permissions.
    pub role: Role,
    /// Demographic fields.
    pub profile: ProfileFields,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// Check if this user has at least the required role level.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.can_access(required)
    }

    /// Check if this user may moderate posts.
    pub fn is_reviewer(&self) -> bool {
        self.role.can_review()
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// User role (defaults to Member).
    pub role: Role,
    /// Demographic fields.
    pub profile: ProfileFields,
}

impl NewUser {
    /// Create a new member with the required fields.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
            role: Role::Member,
            profile: ProfileFields::default(),
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the demographic fields.
    pub fn with_profile(mut self, profile: ProfileFields) -> Self {
        self.profile = profile;
        self
    }
}
