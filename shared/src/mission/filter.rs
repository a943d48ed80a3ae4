//! Attribute filter
//!
//! Narrows a visible mission set by conciergerie name, temporal status,
//! taken status and geographic zone. Selections on different axes combine
//! with AND; an axis with an empty selection is not applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::str::FromStr;

use crate::models::{Home, Mission};

use super::home_index::HomeIndex;

/// A selection token on an axis made of two mutually exclusive values
pub trait AxisToken: Copy + Eq + Hash + 'static {
    /// Every value of the axis
    const ALL: [Self; 2];
}

/// `current` = not yet ended, `archived` = ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemporalStatus {
    Current,
    Archived,
}

impl TemporalStatus {
    pub fn of(mission: &Mission, now_ms: i64) -> Self {
        if mission.is_current_at(now_ms) {
            Self::Current
        } else {
            Self::Archived
        }
    }
}

impl AxisToken for TemporalStatus {
    const ALL: [Self; 2] = [Self::Current, Self::Archived];
}

impl FromStr for TemporalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown temporal status: {other}")),
        }
    }
}

/// `taken` = an employee accepted the mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TakenStatus {
    Taken,
    NotTaken,
}

impl TakenStatus {
    pub fn of(mission: &Mission) -> Self {
        if mission.is_taken() {
            Self::Taken
        } else {
            Self::NotTaken
        }
    }
}

impl AxisToken for TakenStatus {
    const ALL: [Self; 2] = [Self::Taken, Self::NotTaken];
}

impl FromStr for TakenStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "taken" => Ok(Self::Taken),
            "notTaken" => Ok(Self::NotTaken),
            other => Err(format!("unknown taken status: {other}")),
        }
    }
}

/// Selection on a two-valued axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "T: AxisToken + Serialize + for<'x> Deserialize<'x>")]
pub struct AxisFilter<T: AxisToken> {
    selected: HashSet<T>,
}

impl<T: AxisToken> Default for AxisFilter<T> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<T: AxisToken> AxisFilter<T> {
    pub fn new(tokens: impl IntoIterator<Item = T>) -> Self {
        Self {
            selected: tokens.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, token: T) -> bool {
        self.selected.contains(&token)
    }

    /// The axis accepts every value.
    ///
    /// True when nothing is selected, and also when both mutually exclusive
    /// tokens are selected: picking `current` and `archived` together shows
    /// the same missions as picking neither. Product owners asked for this
    /// explicitly; do not turn it into "match either" semantics without
    /// checking with them.
    pub fn is_vacuously_true(&self) -> bool {
        self.selected.is_empty() || T::ALL.iter().all(|t| self.selected.contains(t))
    }

    pub fn accepts(&self, value: T) -> bool {
        self.is_vacuously_true() || self.selected.contains(&value)
    }
}

/// Four independent selection sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionFilter {
    #[serde(default)]
    pub conciergeries: BTreeSet<String>,
    #[serde(default)]
    pub statuses: AxisFilter<TemporalStatus>,
    #[serde(default)]
    pub taken: AxisFilter<TakenStatus>,
    #[serde(default)]
    pub zones: BTreeSet<String>,
}

impl MissionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conciergeries<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.conciergeries = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TemporalStatus>) -> Self {
        self.statuses = AxisFilter::new(statuses);
        self
    }

    pub fn with_taken(mut self, taken: impl IntoIterator<Item = TakenStatus>) -> Self {
        self.taken = AxisFilter::new(taken);
        self
    }

    pub fn with_zones<S: Into<String>>(mut self, zones: impl IntoIterator<Item = S>) -> Self {
        self.zones = zones.into_iter().map(Into::into).collect();
        self
    }

    /// No selection on any axis: the filter is the identity
    pub fn is_unfiltered(&self) -> bool {
        self.conciergeries.is_empty()
            && self.statuses.is_empty()
            && self.taken.is_empty()
            && self.zones.is_empty()
    }

    /// Apply against the current wall clock
    pub fn apply<'a, I>(&self, missions: I, homes: &[Home]) -> Vec<&'a Mission>
    where
        I: IntoIterator<Item = &'a Mission>,
    {
        self.apply_at(missions, homes, Utc::now())
    }

    /// Apply with an explicit "now" for the temporal axis
    pub fn apply_at<'a, I>(&self, missions: I, homes: &[Home], now: DateTime<Utc>) -> Vec<&'a Mission>
    where
        I: IntoIterator<Item = &'a Mission>,
    {
        if self.is_unfiltered() {
            return missions.into_iter().collect();
        }

        let now_ms = now.timestamp_millis();
        let index = if self.zones.is_empty() {
            HomeIndex::default()
        } else {
            HomeIndex::new(homes)
        };

        missions
            .into_iter()
            .filter(|m| self.matches(m, &index, now_ms))
            .collect()
    }

    fn matches(&self, mission: &Mission, homes: &HomeIndex<'_>, now_ms: i64) -> bool {
        if !self.conciergeries.is_empty() && !self.conciergeries.contains(&mission.conciergerie_name) {
            return false;
        }

        if !self.statuses.accepts(TemporalStatus::of(mission, now_ms)) {
            return false;
        }

        if !self.taken.accepts(TakenStatus::of(mission)) {
            return false;
        }

        if !self.zones.is_empty() {
            match homes.zone_of(mission) {
                Some(zone) if self.zones.contains(zone) => {}
                _ => return false,
            }
        }

        true
    }
}
