//! Viewer locale
//!
//! Month and weekday names come from chrono's locale tables; the handful of
//! placeholder strings shown by the UI live here.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn chrono(&self) -> chrono::Locale {
        match self {
            Self::Fr => chrono::Locale::fr_FR,
            Self::En => chrono::Locale::en_US,
        }
    }

    /// Category label for missions whose home has no zone
    pub fn unknown_zone(&self) -> &'static str {
        match self {
            Self::Fr => "Zone inconnue",
            Self::En => "Unknown zone",
        }
    }

    /// Category label for missions whose home cannot be resolved
    pub fn home_not_found(&self) -> &'static str {
        match self {
            Self::Fr => "Bien non trouvé",
            Self::En => "Home not found",
        }
    }

    pub fn today(&self) -> &'static str {
        match self {
            Self::Fr => "Aujourd'hui",
            Self::En => "Today",
        }
    }

    pub fn tomorrow(&self) -> &'static str {
        match self {
            Self::Fr => "Demain",
            Self::En => "Tomorrow",
        }
    }

    pub fn all_day(&self) -> &'static str {
        match self {
            Self::Fr => "Toute la journée",
            Self::En => "All day",
        }
    }

    /// "À partir de 09:00"
    pub fn starting_at(&self, time: &str) -> String {
        match self {
            Self::Fr => format!("À partir de {time}"),
            Self::En => format!("From {time}"),
        }
    }

    /// "Jusqu'à 17:00"
    pub fn ending_at(&self, time: &str) -> String {
        match self {
            Self::Fr => format!("Jusqu'à {time}"),
            Self::En => format!("Until {time}"),
        }
    }

    /// strftime pattern of a calendar day header ("lundi 3 juin")
    pub fn day_header_pattern(&self) -> &'static str {
        match self {
            Self::Fr => "%A %-d %B",
            Self::En => "%A, %B %-d",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fr" | "fr-fr" | "fr_fr" => Ok(Self::Fr),
            "en" | "en-us" | "en_us" | "en-gb" => Ok(Self::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("fr-FR".parse::<Locale>().unwrap(), Locale::Fr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("juin"), "Juin");
        assert_eq!(capitalize("été"), "Été");
        assert_eq!(capitalize(""), "");
    }
}
