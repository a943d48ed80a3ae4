//! Mission points
//!
//! Each known objective is worth a fixed number of points; a mission is
//! worth the sum of its objectives. When a mission spans several days its
//! points are spread evenly over them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::mission_days;
use crate::mission::ViewerLocale;
use crate::models::{Mission, Objective};

/// Objective label with its point value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectivePoints {
    pub label: String,
    pub points: f64,
}

/// Point value of an objective label; unknown labels are worth nothing
pub fn objective_with_points(label: &str) -> ObjectivePoints {
    ObjectivePoints {
        label: label.to_string(),
        points: Objective::from_label(label).map(|o| o.points()).unwrap_or(0.0),
    }
}

pub fn mission_points(mission: &Mission) -> f64 {
    mission
        .objectives
        .iter()
        .map(|label| objective_with_points(label).points)
        .sum()
}

/// Points an employee earns on `date`
pub fn employee_points_for_day(
    employee_id: &str,
    date: NaiveDate,
    missions: &[Mission],
    locale: &ViewerLocale,
) -> f64 {
    missions
        .iter()
        .filter(|m| !m.deleted && m.is_assigned_to(employee_id))
        .filter_map(|m| {
            let days = mission_days(m, locale);
            days.contains(&date)
                .then(|| mission_points(m) / days.len() as f64)
        })
        .sum()
}

/// At most one decimal, trailing ".0" dropped
pub fn format_points(points: f64) -> String {
    let rounded = (points * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}
