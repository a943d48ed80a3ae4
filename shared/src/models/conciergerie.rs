//! Conciergerie Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::notification::ConciergerieNotificationSettings;
use crate::palette;

/// Conciergerie entity (property-management company)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Conciergerie {
    pub id: String,
    /// Unique, also used as a human-facing key by missions and homes
    pub name: String,
    pub email: String,
    pub tel: Option<String>,
    /// Palette entry name
    pub color_name: String,
    /// Resolved colour value (derived from `color_name`, not stored)
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub color: String,
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub notification_settings: ConciergerieNotificationSettings,
}

impl Conciergerie {
    /// Fill the derived colour value from the palette
    pub fn with_color(mut self) -> Self {
        self.color = palette::color_value_by_name(Some(&self.color_name)).to_string();
        self
    }
}

/// Create conciergerie payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConciergerieCreate {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email"))]
    pub email: String,
    pub tel: Option<String>,
    #[validate(length(min = 1, message = "colour is required"))]
    pub color_name: String,
    pub notification_settings: Option<ConciergerieNotificationSettings>,
}

/// Update conciergerie payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ConciergerieUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub tel: Option<String>,
    #[validate(length(min = 1))]
    pub color_name: Option<String>,
    pub notification_settings: Option<ConciergerieNotificationSettings>,
}

/// Claim payload result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimOutcome {
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_color_resolves_palette() {
        let c = Conciergerie {
            id: "c1".into(),
            name: "Azur".into(),
            email: "a@example.com".into(),
            tel: None,
            color_name: "Rouge".into(),
            color: String::new(),
            notification_settings: Default::default(),
        }
        .with_color();
        assert_eq!(c.color, palette::color_value_by_name(Some("Rouge")));

        let unknown = Conciergerie {
            color_name: "Nope".into(),
            ..c
        }
        .with_color();
        assert_eq!(unknown.color, palette::DEFAULT_PRIMARY_COLOR);
    }
}
