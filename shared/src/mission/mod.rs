//! Mission pipeline
//!
//! Pure functions the rendering layer chains on every refresh:
//!
//! ```text
//! visible_missions → MissionFilter::apply → sort_missions → categorize_missions
//! ```
//!
//! Every stage borrows its input and returns a new `Vec<&Mission>` (or a
//! list of categories); nothing is mutated and nothing is cached between
//! calls. Homes are only a lookup table, indexed once per call through
//! [`HomeIndex`].

pub mod category;
pub mod collate;
pub mod feed;
pub mod filter;
pub mod home_index;
pub mod sort;
pub mod status;
pub mod viewer;
pub mod visibility;

pub use category::{MissionCategory, categorize_missions};
pub use feed::active_missions;
pub use filter::{AxisFilter, AxisToken, MissionFilter, TakenStatus, TemporalStatus};
pub use home_index::HomeIndex;
pub use sort::{SortDirection, SortField, sort_missions};
pub use viewer::{Role, Viewer, ViewerLocale};
pub use visibility::visible_missions;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Home, Mission, MissionStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    /// Midnight UTC of the given day, in epoch ms
    pub fn day(y: i32, m: u32, d: u32) -> i64 {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
            .timestamp_millis()
    }

    pub fn mission(id: &str, start: i64, end: i64, conciergerie: &str) -> Mission {
        Mission {
            id: id.into(),
            home_id: format!("home-{id}"),
            objectives: vec!["Ménage".into()],
            start_date_time: start,
            end_date_time: end,
            employee_id: None,
            allowed_employees: vec![],
            status: MissionStatus::Pending,
            hours: 0.0,
            conciergerie_name: conciergerie.into(),
            modified_date: 0,
            deleted: false,
        }
    }

    pub fn home(id: &str, title: &str, zone: Option<&str>) -> Home {
        Home {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            tasks: vec![],
            images: vec![],
            geographic_zone: zone.map(Into::into),
            hours_of_cleaning: 2.0,
            hours_of_gardening: 1.0,
            conciergerie_name: "A".into(),
            modified_date: 0,
            deleted: false,
        }
    }

    pub fn ids(missions: &[&Mission]) -> Vec<String> {
        missions.iter().map(|m| m.id.clone()).collect()
    }
}
