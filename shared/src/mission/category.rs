//! Categorisation
//!
//! Splits an already ordered mission list into labelled groups. Groups appear
//! in the order their first mission appears, and missions keep their relative
//! order inside a group, so flattening the groups gives back the input.

use serde::Serialize;

use crate::locale::capitalize;
use crate::models::{Home, Mission};
use crate::util::millis_to_utc;

use super::home_index::HomeIndex;
use super::sort::SortField;
use super::viewer::ViewerLocale;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionCategory<'a> {
    pub label: String,
    pub missions: Vec<&'a Mission>,
}

/// Month and year of the mission start, e.g. "Juin 2024"
pub fn month_label(start_ms: i64, locale: &ViewerLocale) -> String {
    let local = millis_to_utc(start_ms).with_timezone(&locale.offset);
    capitalize(&local.format_localized("%B %Y", locale.locale.chrono()).to_string())
}

fn category_label(
    mission: &Mission,
    field: SortField,
    homes: &HomeIndex<'_>,
    locale: &ViewerLocale,
) -> String {
    match field {
        SortField::Date => month_label(mission.start_date_time, locale),
        SortField::Conciergerie => mission.conciergerie_name.clone(),
        SortField::GeographicZone => homes
            .zone_of(mission)
            .unwrap_or_else(|| locale.locale.unknown_zone())
            .to_string(),
        SortField::HomeTitle => homes
            .title_of(mission)
            .unwrap_or_else(|| locale.locale.home_not_found())
            .to_string(),
    }
}

/// Group missions by the label `field` derives for them
pub fn categorize_missions<'a, I>(
    missions: I,
    field: SortField,
    homes: &[Home],
    locale: &ViewerLocale,
) -> Vec<MissionCategory<'a>>
where
    I: IntoIterator<Item = &'a Mission>,
{
    let index = HomeIndex::new(homes);
    let mut categories: Vec<MissionCategory<'a>> = Vec::new();

    for mission in missions {
        let label = category_label(mission, field, &index, locale);
        match categories.iter_mut().find(|c| c.label == label) {
            Some(category) => category.missions.push(mission),
            None => categories.push(MissionCategory {
                label,
                missions: vec![mission],
            }),
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::mission::fixtures::{day, home, ids, mission};

    fn labels(categories: &[MissionCategory<'_>]) -> Vec<String> {
        categories.iter().map(|c| c.label.clone()).collect()
    }

    fn flatten<'a>(categories: &[MissionCategory<'a>]) -> Vec<&'a Mission> {
        categories.iter().flat_map(|c| c.missions.iter().copied()).collect()
    }

    #[test]
    fn test_date_labels_in_french() {
        let missions = vec![
            mission("1", day(2024, 6, 3), day(2024, 6, 4), "A"),
            mission("2", day(2024, 6, 20), day(2024, 6, 21), "A"),
            mission("3", day(2024, 8, 1), day(2024, 8, 2), "A"),
        ];
        let out = categorize_missions(&missions, SortField::Date, &[], &ViewerLocale::default());
        assert_eq!(labels(&out), vec!["Juin 2024", "Août 2024"]);
        assert_eq!(ids(&out[0].missions), vec!["1", "2"]);
    }

    #[test]
    fn test_date_label_uses_viewer_offset() {
        // 23:30 UTC on 31 May is already June at UTC+2
        let start = day(2024, 6, 1) - 30 * 60 * 1000;
        let missions = vec![mission("1", start, start + 3_600_000, "A")];

        let utc = categorize_missions(&missions, SortField::Date, &[], &ViewerLocale::default());
        assert_eq!(labels(&utc), vec!["Mai 2024"]);

        let paris = ViewerLocale::new(Locale::Fr, 120);
        let local = categorize_missions(&missions, SortField::Date, &[], &paris);
        assert_eq!(labels(&local), vec!["Juin 2024"]);

        let english = ViewerLocale::new(Locale::En, 120);
        let en = categorize_missions(&missions, SortField::Date, &[], &english);
        assert_eq!(labels(&en), vec!["June 2024"]);
    }

    #[test]
    fn test_zone_placeholders() {
        let missions = vec![
            mission("1", 0, 1, "A"),
            mission("2", 0, 1, "A"),
            mission("3", 0, 1, "A"),
        ];
        let homes = vec![home("home-1", "Villa", Some("Nice")), home("home-2", "Mas", None)];
        let out = categorize_missions(
            &missions,
            SortField::GeographicZone,
            &homes,
            &ViewerLocale::default(),
        );
        assert_eq!(labels(&out), vec!["Nice", "Zone inconnue"]);
        assert_eq!(ids(&out[1].missions), vec!["2", "3"]);
    }

    #[test]
    fn test_home_title_placeholder() {
        let missions = vec![mission("1", 0, 1, "A"), mission("2", 0, 1, "A")];
        let homes = vec![home("home-2", "Mas", None)];
        let out =
            categorize_missions(&missions, SortField::HomeTitle, &homes, &ViewerLocale::default());
        assert_eq!(labels(&out), vec!["Bien non trouvé", "Mas"]);
    }

    #[test]
    fn test_groups_in_first_occurrence_order_and_flatten_back() {
        let missions = vec![
            mission("1", 0, 1, "Bleu"),
            mission("2", 0, 1, "Azur"),
            mission("3", 0, 1, "Bleu"),
            mission("4", 0, 1, "Corail"),
            mission("5", 0, 1, "Azur"),
        ];
        let input: Vec<&Mission> = missions.iter().collect();
        let out = categorize_missions(
            input.clone(),
            SortField::Conciergerie,
            &[],
            &ViewerLocale::default(),
        );
        assert_eq!(labels(&out), vec!["Bleu", "Azur", "Corail"]);
        assert_eq!(ids(&out[0].missions), vec!["1", "3"]);
        // interleaved labels: flattening reproduces the input only when grouped
        let regrouped: Vec<&Mission> = flatten(&out);
        assert_eq!(ids(&regrouped), vec!["1", "3", "2", "5", "4"]);
    }

    #[test]
    fn test_flatten_reproduces_sorted_input() {
        let missions = vec![
            mission("1", day(2024, 1, 5), day(2024, 1, 6), "A"),
            mission("2", day(2024, 1, 9), day(2024, 1, 10), "A"),
            mission("3", day(2024, 2, 1), day(2024, 2, 2), "A"),
        ];
        let out = categorize_missions(&missions, SortField::Date, &[], &ViewerLocale::default());
        let input: Vec<&Mission> = missions.iter().collect();
        assert_eq!(flatten(&out), input);
    }

    #[test]
    fn test_empty_input() {
        let out = categorize_missions(
            Vec::<&Mission>::new(),
            SortField::Date,
            &[],
            &ViewerLocale::default(),
        );
        assert!(out.is_empty());
    }
}
