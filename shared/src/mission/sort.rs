//! Mission ordering

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::{Home, Mission};

use super::collate::CollationKey;
use super::home_index::HomeIndex;

/// Sort key, also the grouping key of [`categorize_missions`](super::categorize_missions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Date,
    Conciergerie,
    GeographicZone,
    HomeTitle,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "conciergerie" => Ok(Self::Conciergerie),
            "geographicZone" => Ok(Self::GeographicZone),
            "homeTitle" => Ok(Self::HomeTitle),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

enum SortKey {
    Millis(i64),
    Text(CollationKey),
}

impl SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Millis(a), Self::Millis(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // keys of one call share a variant
            (Self::Millis(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Millis(_)) => Ordering::Greater,
        }
    }
}

fn sort_key(mission: &Mission, field: SortField, homes: &HomeIndex<'_>) -> SortKey {
    match field {
        SortField::Date => SortKey::Millis(mission.start_date_time),
        SortField::Conciergerie => SortKey::Text(CollationKey::new(&mission.conciergerie_name)),
        SortField::GeographicZone => {
            SortKey::Text(CollationKey::new(homes.zone_of(mission).unwrap_or("")))
        }
        SortField::HomeTitle => {
            SortKey::Text(CollationKey::new(homes.title_of(mission).unwrap_or("")))
        }
    }
}

/// Order missions by `field`
///
/// Stable: missions with equal keys keep their input order in both
/// directions. Text keys use locale-aware collation; a mission whose home
/// (or zone, or title) cannot be resolved sorts as the empty string.
pub fn sort_missions<'a, I>(
    missions: I,
    field: SortField,
    direction: SortDirection,
    homes: &[Home],
) -> Vec<&'a Mission>
where
    I: IntoIterator<Item = &'a Mission>,
{
    let index = HomeIndex::new(homes);
    let mut keyed: Vec<(SortKey, &'a Mission)> = missions
        .into_iter()
        .map(|m| (sort_key(m, field, &index), m))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Asc => a.cmp(b),
        SortDirection::Desc => a.cmp(b).reverse(),
    });

    keyed.into_iter().map(|(_, m)| m).collect()
}
