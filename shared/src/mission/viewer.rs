//! Viewer context
//!
//! Identity and display preferences of whoever is looking at the missions.
//! Built from the session token by the server and passed explicitly to every
//! stage that depends on it.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Conciergerie,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Conciergerie => "conciergerie",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "conciergerie" => Ok(Self::Conciergerie),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub role: Role,
    /// Employee id or conciergerie id
    pub id: Option<String>,
    /// Set for conciergerie viewers
    pub conciergerie_name: Option<String>,
}

impl Viewer {
    pub fn employee(id: impl Into<String>) -> Self {
        Self {
            role: Role::Employee,
            id: Some(id.into()),
            conciergerie_name: None,
        }
    }

    pub fn conciergerie(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: Role::Conciergerie,
            id: Some(id.into()),
            conciergerie_name: Some(name.into()),
        }
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }

    pub fn is_conciergerie(&self) -> bool {
        self.role == Role::Conciergerie
    }

    /// Resolvable employee id (non-empty), only for employee viewers
    pub fn employee_id(&self) -> Option<&str> {
        match self.role {
            Role::Employee => self.id.as_deref().filter(|id| !id.is_empty()),
            Role::Conciergerie => None,
        }
    }

    /// Conciergerie name, only for conciergerie viewers
    pub fn conciergerie_name(&self) -> Option<&str> {
        match self.role {
            Role::Conciergerie => self.conciergerie_name.as_deref().filter(|n| !n.is_empty()),
            Role::Employee => None,
        }
    }
}

/// Locale and UTC offset used to render dates for a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerLocale {
    pub locale: Locale,
    pub offset: FixedOffset,
}

impl ViewerLocale {
    pub fn new(locale: Locale, offset_minutes: i32) -> Self {
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(utc);
        Self { locale, offset }
    }
}

impl Default for ViewerLocale {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            offset: utc(),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}
