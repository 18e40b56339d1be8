use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Role — Staff role carried in the session token
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    FieldAgent,
    CustomerAgent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::FieldAgent => "fieldAgent",
            Role::CustomerAgent => "customerAgent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "fieldAgent" => Ok(Role::FieldAgent),
            "customerAgent" => Ok(Role::CustomerAgent),
            other => Err(DashboardError::Unauthorized(format!("Unknown role: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// User — The signed-in staff member
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub role: Role,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            name: None,
            username: None,
            email: None,
        }
    }
}
