//! Home Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::null_as_default;

/// Home entity (a managed property, owned by one conciergerie)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Home {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered task labels
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub tasks: Vec<String>,
    /// Image references
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub images: Vec<String>,
    pub geographic_zone: Option<String>,
    #[serde(default)]
    pub hours_of_cleaning: f64,
    #[serde(default)]
    pub hours_of_gardening: f64,
    pub conciergerie_name: String,
    pub modified_date: i64,
    #[serde(default)]
    pub deleted: bool,
}

/// Create home payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HomeCreate {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "at least one task is required"))]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[validate(length(min = 1, message = "geographic zone is required"))]
    pub geographic_zone: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub hours_of_cleaning: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub hours_of_gardening: f64,
}

/// Update home payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HomeUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub tasks: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub geographic_zone: Option<String>,
    #[validate(range(min = 0.0))]
    pub hours_of_cleaning: Option<f64>,
    #[validate(range(min = 0.0))]
    pub hours_of_gardening: Option<f64>,
}

impl HomeCreate {
    /// Drop blank task lines (the form always carries a trailing empty one)
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.tasks = normalize_tasks(self.tasks);
        self
    }
}

pub fn normalize_tasks(tasks: Vec<String>) -> Vec<String> {
    tasks
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_create_validation() {
        let create = HomeCreate {
            title: "Villa Azur".into(),
            description: "Sea view".into(),
            tasks: vec!["Vitres".into()],
            images: vec![],
            geographic_zone: "Nice".into(),
            hours_of_cleaning: 2.0,
            hours_of_gardening: 0.0,
        };
        assert!(create.validate().is_ok());

        let missing_zone = HomeCreate {
            geographic_zone: String::new(),
            ..create.clone()
        };
        assert!(missing_zone.validate().is_err());

        let no_tasks = HomeCreate {
            tasks: vec![],
            ..create
        };
        assert!(no_tasks.validate().is_err());
    }

    #[test]
    fn test_normalized_drops_blank_tasks() {
        let create = HomeCreate {
            title: "  Villa  ".into(),
            description: "d".into(),
            tasks: vec!["Vitres".into(), "  ".into(), " Linge ".into(), String::new()],
            images: vec![],
            geographic_zone: "Nice".into(),
            hours_of_cleaning: 0.0,
            hours_of_gardening: 0.0,
        }
        .normalized();
        assert_eq!(create.title, "Villa");
        assert_eq!(create.tasks, vec!["Vitres".to_string(), "Linge".to_string()]);
    }

    #[test]
    fn test_home_deserialize_without_optional_lists() {
        let json = r#"{
            "id": "h1", "title": "T", "description": "D",
            "geographic_zone": null, "conciergerie_name": "A", "modified_date": 0
        }"#;
        let home: Home = serde_json::from_str(json).unwrap();
        assert!(home.tasks.is_empty());
        assert!(home.images.is_empty());
        assert!(home.geographic_zone.is_none());
        assert!(!home.deleted);
    }
}
