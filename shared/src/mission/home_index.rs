use std::collections::HashMap;

use crate::models::{Home, Mission};

/// Homes keyed by id, built once per pipeline call
#[derive(Debug, Default)]
pub struct HomeIndex<'a> {
    by_id: HashMap<&'a str, &'a Home>,
}

impl<'a> HomeIndex<'a> {
    /// On duplicate ids the first home wins
    pub fn new(homes: &'a [Home]) -> Self {
        let mut by_id = HashMap::with_capacity(homes.len());
        for h in homes {
            by_id.entry(h.id.as_str()).or_insert(h);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Home> {
        self.by_id.get(id).copied()
    }

    pub fn home_of(&self, mission: &Mission) -> Option<&'a Home> {
        self.get(&mission.home_id)
    }

    /// Zone tag of the mission's home; an empty tag counts as no zone
    pub fn zone_of(&self, mission: &Mission) -> Option<&'a str> {
        self.home_of(mission)
            .and_then(|h| h.geographic_zone.as_deref())
            .filter(|z| !z.is_empty())
    }

    /// Title of the mission's home; an empty title counts as unresolved
    pub fn title_of(&self, mission: &Mission) -> Option<&'a str> {
        self.home_of(mission)
            .map(|h| h.title.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
