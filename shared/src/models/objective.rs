//! Objective catalogue
//!
//! Missions carry objective labels as free strings; the known ones map to a
//! point value (gamification) and an hour estimate.

use serde::{Deserialize, Serialize};

use super::home::Home;

/// Fixed hour estimate for arrival / departure check-ins
pub const CHECK_IN_HOURS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Arrival,
    Departure,
    Cleaning,
    Gardening,
}

impl Objective {
    pub const ALL: [Objective; 4] = [
        Objective::Arrival,
        Objective::Departure,
        Objective::Cleaning,
        Objective::Gardening,
    ];

    /// Label stored on missions
    pub fn label(&self) -> &'static str {
        match self {
            Self::Arrival => "Arrivée",
            Self::Departure => "Départ",
            Self::Cleaning => "Ménage",
            Self::Gardening => "Jardinage",
        }
    }

    /// Resolve a stored label. Older rows used "Entrée" / "Sortie".
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Arrivée" | "Entrée" => Some(Self::Arrival),
            "Départ" | "Sortie" => Some(Self::Departure),
            "Ménage" => Some(Self::Cleaning),
            "Jardinage" => Some(Self::Gardening),
            _ => None,
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Self::Arrival | Self::Departure => 1.0,
            Self::Cleaning => 3.0,
            Self::Gardening => 2.0,
        }
    }

    /// Hour estimate for this objective on the given home
    pub fn hours(&self, home: &Home) -> f64 {
        match self {
            Self::Arrival | Self::Departure => CHECK_IN_HOURS,
            Self::Cleaning => home.hours_of_cleaning,
            Self::Gardening => home.hours_of_gardening,
        }
    }
}

/// Total hours for a set of objective labels; unknown labels count for nothing
pub fn mission_hours(home: &Home, objectives: &[String]) -> f64 {
    objectives
        .iter()
        .filter_map(|label| Objective::from_label(label))
        .map(|o| o.hours(home))
        .sum()
}
