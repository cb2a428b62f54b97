use serde::{Deserialize, Serialize};

use estatehub_core::{DomainError, DomainResult, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Agent,
    Admin,
}

/// Read-only identity of the signed-in user.
///
/// Supplied by whatever authenticated the user; nothing in this workspace
/// mutates it or looks it up from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user_id: UserId,
    display_name: String,
    email: String,
    role: Role,
}

impl Identity {
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> DomainResult<Self> {
        let display_name = display_name.into();
        let email = email.into();
        if display_name.trim().is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation(format!("invalid email: {email}")));
        }
        Ok(Self {
            user_id,
            display_name,
            email,
            role,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// First word of the display name, for greetings.
    pub fn first_name(&self) -> &str {
        self.display_name.split_whitespace().next().unwrap_or(&self.display_name)
    }
}
