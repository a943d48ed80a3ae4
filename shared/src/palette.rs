//! Conciergerie display colours
//!
//! Conciergeries pick one entry of this fixed palette. Uniqueness across
//! conciergeries is a UI concern and is not enforced here.

use serde::Serialize;

/// Fallback colour when a name is missing or unknown
pub const DEFAULT_PRIMARY_COLOR: &str = "var(--color-default)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorOption {
    pub name: &'static str,
    pub value: &'static str,
}

pub const PALETTE: &[ColorOption] = &[
    ColorOption { name: "Rouge", value: "#ef4444" },
    ColorOption { name: "Orange", value: "#f97316" },
    ColorOption { name: "Ambre", value: "#f59e0b" },
    ColorOption { name: "Jaune", value: "#eab308" },
    ColorOption { name: "Citron", value: "#84cc16" },
    ColorOption { name: "Vert", value: "#22c55e" },
    ColorOption { name: "Émeraude", value: "#10b981" },
    ColorOption { name: "Turquoise", value: "#14b8a6" },
    ColorOption { name: "Cyan", value: "#06b6d4" },
    ColorOption { name: "Bleu ciel", value: "#0ea5e9" },
    ColorOption { name: "Bleu", value: "#3b82f6" },
    ColorOption { name: "Indigo", value: "#6366f1" },
    ColorOption { name: "Violet", value: "#8b5cf6" },
    ColorOption { name: "Pourpre", value: "#a855f7" },
    ColorOption { name: "Fuchsia", value: "#d946ef" },
    ColorOption { name: "Rose", value: "#ec4899" },
];

/// Look up a palette entry by name
pub fn find(name: &str) -> Option<&'static ColorOption> {
    PALETTE.iter().find(|c| c.name == name)
}

/// Colour value for a palette name, or [`DEFAULT_PRIMARY_COLOR`]
pub fn color_value_by_name(name: Option<&str>) -> &'static str {
    name.and_then(find)
        .map(|c| c.value)
        .unwrap_or(DEFAULT_PRIMARY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_value_by_name() {
        assert_eq!(color_value_by_name(Some("Bleu")), "#3b82f6");
        assert_eq!(color_value_by_name(Some("bleu")), DEFAULT_PRIMARY_COLOR);
        assert_eq!(color_value_by_name(None), DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn test_palette_names_unique() {
        for (i, a) in PALETTE.iter().enumerate() {
            assert!(PALETTE[i + 1..].iter().all(|b| b.name != a.name));
        }
    }
}
