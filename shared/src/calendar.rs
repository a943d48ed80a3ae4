//! Calendar view
//!
//! Missions a viewer is committed to, laid out by local calendar day.
//!
//! | Viewer        | Missions shown                                       |
//! |---------------|------------------------------------------------------|
//! | Employee      | assigned to them, not deleted, not completed         |
//! | Conciergerie  | theirs, assigned to someone, not deleted             |
//!
//! A mission spanning several days is listed on every day it covers.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::locale::capitalize;
use crate::mission::{Role, Viewer, ViewerLocale};
use crate::models::{Mission, MissionStatus};
use crate::points::{employee_points_for_day, mission_points};
use crate::util::millis_to_utc;

/// Upper bound on the days a single mission is spread over
const MAX_SPAN_DAYS: u64 = 366;

/// Missions shown in the viewer's calendar
pub fn calendar_missions<'a, I>(missions: I, viewer: &Viewer) -> Vec<&'a Mission>
where
    I: IntoIterator<Item = &'a Mission>,
{
    match viewer.role {
        Role::Employee => match viewer.employee_id() {
            Some(employee_id) => missions
                .into_iter()
                .filter(|m| {
                    m.is_assigned_to(employee_id)
                        && !m.deleted
                        && m.status != MissionStatus::Completed
                })
                .collect(),
            None => Vec::new(),
        },
        Role::Conciergerie => match viewer.conciergerie_name() {
            Some(name) => missions
                .into_iter()
                .filter(|m| m.conciergerie_name == name && m.is_taken() && !m.deleted)
                .collect(),
            None => Vec::new(),
        },
    }
}

/// Local date of an epoch-ms instant
pub fn local_date(millis: i64, locale: &ViewerLocale) -> NaiveDate {
    millis_to_utc(millis).with_timezone(&locale.offset).date_naive()
}

/// Every local day the mission covers, first to last
///
/// A mission ending exactly at midnight does not cover the day that starts
/// at that midnight.
pub fn mission_days(mission: &Mission, locale: &ViewerLocale) -> Vec<NaiveDate> {
    let first = local_date(mission.start_date_time, locale);
    let last_instant = if mission.end_date_time > mission.start_date_time {
        mission.end_date_time - 1
    } else {
        mission.start_date_time
    };
    let last = local_date(last_instant, locale);

    let mut days = vec![first];
    let mut current = first;
    while current < last && (days.len() as u64) < MAX_SPAN_DAYS {
        match current.checked_add_days(Days::new(1)) {
            Some(next) => {
                days.push(next);
                current = next;
            }
            None => break,
        }
    }
    days
}

/// Group missions by every local day they cover, days in chronological order
pub fn group_missions_by_date<'a, I>(
    missions: I,
    locale: &ViewerLocale,
) -> BTreeMap<NaiveDate, Vec<&'a Mission>>
where
    I: IntoIterator<Item = &'a Mission>,
{
    let mut grouped: BTreeMap<NaiveDate, Vec<&'a Mission>> = BTreeMap::new();
    for mission in missions {
        for day in mission_days(mission, locale) {
            grouped.entry(day).or_default().push(mission);
        }
    }
    for day in grouped.values_mut() {
        day.sort_by_key(|m| m.start_date_time);
    }
    grouped
}

pub fn is_today(date: NaiveDate, now_ms: i64, locale: &ViewerLocale) -> bool {
    date == local_date(now_ms, locale)
}

pub fn is_past_date(date: NaiveDate, now_ms: i64, locale: &ViewerLocale) -> bool {
    date < local_date(now_ms, locale)
}

/// Day header: "Aujourd'hui", "Demain", else "Lundi 3 juin"
pub fn format_calendar_date(date: NaiveDate, now_ms: i64, locale: &ViewerLocale) -> String {
    let today = local_date(now_ms, locale);
    if date == today {
        return locale.locale.today().to_string();
    }
    if today.checked_add_days(Days::new(1)) == Some(date) {
        return locale.locale.tomorrow().to_string();
    }
    capitalize(
        &date
            .format_localized(locale.locale.day_header_pattern(), locale.locale.chrono())
            .to_string(),
    )
}

fn format_time(millis: i64, locale: &ViewerLocale) -> String {
    millis_to_utc(millis)
        .with_timezone(&locale.offset)
        .format("%H:%M")
        .to_string()
}

/// Time range of a mission as seen on one of its days
pub fn mission_time_label(mission: &Mission, date: NaiveDate, locale: &ViewerLocale) -> String {
    let days = mission_days(mission, locale);
    let first = days.first().copied().unwrap_or(date);
    let last = days.last().copied().unwrap_or(date);
    let start = format_time(mission.start_date_time, locale);
    let end = format_time(mission.end_date_time, locale);

    match (date == first, date == last) {
        (true, true) => format!("{start} - {end}"),
        (true, false) => locale.locale.starting_at(&start),
        (false, true) => locale.locale.ending_at(&end),
        (false, false) => locale.locale.all_day().to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry<'a> {
    pub mission: &'a Mission,
    pub time_label: String,
    pub points: f64,
    /// Accepted, never started and already over
    pub late: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub header: String,
    pub is_today: bool,
    pub is_past: bool,
    /// Points the employee earns that day (employee viewers only)
    pub points: Option<f64>,
    pub entries: Vec<CalendarEntry<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView<'a> {
    pub days: Vec<CalendarDay<'a>>,
    pub started_count: usize,
    pub late_count: usize,
}

/// Build the viewer's calendar from the full mission list
pub fn build_calendar<'a>(
    missions: &'a [Mission],
    viewer: &Viewer,
    now_ms: i64,
    locale: &ViewerLocale,
) -> CalendarView<'a> {
    let shown = calendar_missions(missions, viewer);
    let started_count = shown
        .iter()
        .filter(|m| m.status == MissionStatus::Started)
        .count();
    let late_count = shown.iter().filter(|m| m.is_late_at(now_ms)).count();

    let days = group_missions_by_date(shown, locale)
        .into_iter()
        .map(|(date, day_missions)| CalendarDay {
            date,
            header: format_calendar_date(date, now_ms, locale),
            is_today: is_today(date, now_ms, locale),
            is_past: is_past_date(date, now_ms, locale),
            points: viewer
                .employee_id()
                .map(|id| employee_points_for_day(id, date, missions, locale)),
            entries: day_missions
                .into_iter()
                .map(|mission| CalendarEntry {
                    mission,
                    time_label: mission_time_label(mission, date, locale),
                    points: mission_points(mission),
                    late: mission.is_late_at(now_ms),
                })
                .collect(),
        })
        .collect();

    CalendarView {
        days,
        started_count,
        late_count,
    }
}
