//! The people who can log in to the dashboard.

mod create;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub use create::{create_user_endpoint, get_new_user_page};

/// A dashboard user as reported by the spreadsheet service.
///
/// The role is kept as free text since it comes straight from the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The name the user logs in with.
    pub username: String,
    /// The user's role, e.g. "Admin".
    pub role: String,
}

/// The roles that can be assigned when creating a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// A regular staff member.
    #[default]
    User,
    /// A user that manages other users.
    Admin,
}

impl Role {
    /// All roles in the order they are offered in forms.
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// The name the spreadsheet service uses for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
