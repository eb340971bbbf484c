//! Filter & normalize: what of a stop's raw departures reaches the board.

use chrono::{DateTime, Local};

use crate::domain::DepartureRecord;

use super::config::{AllowList, DisplayWindow, StopFilterConfig};

/// Keep the departures of one stop that should be displayed.
///
/// A record survives when it
/// 1. is scheduled inside the display window around `now`,
/// 2. passes every configured allow-list (mode, destination, line), compared
///    after trimming whitespace from product, direction and line name, and
/// 3. carries the bicycle-conveyance remark, if `bicycle_only` is set.
///
/// Survivors keep their relative order and come back trimmed. When a label
/// is configured it replaces the stop name.
pub fn filter_departures(
    records: Vec<DepartureRecord>,
    config: &StopFilterConfig,
    window: &DisplayWindow,
    now: DateTime<Local>,
) -> Vec<DepartureRecord> {
    records
        .into_iter()
        .filter(|r| window.contains(now, r.scheduled))
        .map(|r| normalize(r, config))
        .filter(|r| passes(config.modes.as_ref(), &r.product))
        .filter(|r| passes(config.destinations.as_ref(), &r.direction))
        .filter(|r| passes(config.lines.as_ref(), &r.line_name))
        .filter(|r| !config.bicycle_only || r.allows_bicycles())
        .collect()
}

/// Absent list means no restriction.
fn passes(list: Option<&AllowList>, value: &str) -> bool {
    list.is_none_or(|list| list.allows(value))
}

fn normalize(mut record: DepartureRecord, config: &StopFilterConfig) -> DepartureRecord {
    trim_in_place(&mut record.product);
    trim_in_place(&mut record.direction);
    trim_in_place(&mut record.line_name);

    if let Some(label) = &config.label {
        record.stop_name = label.clone();
    }

    record
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Remark, StopId};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap()
    }

    fn stop() -> StopId {
        StopId::parse("900000100003").unwrap()
    }

    fn dep(mins: i64, line: &str, direction: &str, product: &str) -> DepartureRecord {
        DepartureRecord {
            stop_id: stop(),
            stop_name: "S+U Alexanderplatz".into(),
            scheduled: now() + Duration::minutes(mins),
            line_name: line.into(),
            direction: direction.into(),
            delay_secs: 0,
            product: product.into(),
            remarks: Vec::new(),
        }
    }

    fn bike(mut record: DepartureRecord) -> DepartureRecord {
        record.remarks.push(Remark {
            kind: "hint".into(),
            code: "FB".into(),
            text: "Fahrradmitnahme möglich".into(),
        });
        record
    }

    fn run(records: Vec<DepartureRecord>, config: &StopFilterConfig) -> Vec<DepartureRecord> {
        filter_departures(records, config, &DisplayWindow::default(), now())
    }

    #[test]
    fn drops_records_outside_window() {
        let records = vec![
            dep(-3, "U2", "Pankow", "subway"),
            dep(-2, "U2", "Pankow", "subway"),
            dep(30, "U2", "Pankow", "subway"),
            dep(60, "U2", "Pankow", "subway"),
            dep(61, "U2", "Pankow", "subway"),
        ];
        let kept = run(records, &StopFilterConfig::new(stop()));

        let offsets: Vec<i64> = kept
            .iter()
            .map(|r| (r.scheduled - now()).num_minutes())
            .collect();
        assert_eq!(offsets, vec![-2, 30, 60]);
    }

    #[test]
    fn trims_text_fields() {
        let kept = run(
            vec![dep(5, " U2 ", "\tS+U Pankow  ", " subway")],
            &StopFilterConfig::new(stop()),
        );
        assert_eq!(kept[0].line_name, "U2");
        assert_eq!(kept[0].direction, "S+U Pankow");
        assert_eq!(kept[0].product, "subway");
    }

    #[test]
    fn mode_filter() {
        let records = vec![
            dep(1, "U2", "Pankow", "subway"),
            dep(2, "M48", "Busseallee", "bus"),
            dep(3, "M4", "Hackescher Markt", "tram"),
        ];
        let config = StopFilterConfig::new(stop()).with_modes("Subway,TRAM");
        let kept = run(records, &config);

        let lines: Vec<&str> = kept.iter().map(|r| r.line_name.as_str()).collect();
        assert_eq!(lines, vec!["U2", "M4"]);
    }

    #[test]
    fn destination_filter_matches_after_trim() {
        let records = vec![
            dep(1, "U2", " Pankow ", "subway"),
            dep(2, "U2", "Ruhleben", "subway"),
        ];
        let config = StopFilterConfig::new(stop()).with_destinations("pankow");
        let kept = run(records, &config);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].direction, "Pankow");
    }

    #[test]
    fn line_filter() {
        let records = vec![
            dep(1, "U2", "Pankow", "subway"),
            dep(2, "U5", "Hönow", "subway"),
            dep(3, "U8", "Wittenau", "subway"),
        ];
        let config = StopFilterConfig::new(stop()).with_lines("u5, u8");
        let kept = run(records, &config);

        let lines: Vec<&str> = kept.iter().map(|r| r.line_name.as_str()).collect();
        assert_eq!(lines, vec!["U5", "U8"]);
    }

    #[test]
    fn filters_combine() {
        let records = vec![
            dep(1, "U2", "Pankow", "subway"),
            dep(2, "U2", "Ruhleben", "subway"),
            dep(3, "M48", "Pankow", "bus"),
        ];
        let config = StopFilterConfig::new(stop())
            .with_modes("subway")
            .with_destinations("Pankow");
        let kept = run(records, &config);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].line_name, "U2");
        assert_eq!(kept[0].direction, "Pankow");
    }

    #[test]
    fn bicycle_only() {
        let records = vec![
            dep(1, "S5", "Spandau", "suburban"),
            bike(dep(2, "RE1", "Magdeburg", "regional")),
        ];

        let kept = run(records.clone(), &StopFilterConfig::new(stop()));
        assert_eq!(kept.len(), 2);

        let config = StopFilterConfig::new(stop()).with_bicycle_only(true);
        let kept = run(records, &config);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].line_name, "RE1");
    }

    #[test]
    fn label_replaces_stop_name() {
        let config = StopFilterConfig::new(stop()).with_label("Alex");
        let kept = run(vec![dep(1, "U2", "Pankow", "subway")], &config);
        assert_eq!(kept[0].stop_name, "Alex");

        let kept = run(
            vec![dep(1, "U2", "Pankow", "subway")],
            &StopFilterConfig::new(stop()),
        );
        assert_eq!(kept[0].stop_name, "S+U Alexanderplatz");
    }

    #[test]
    fn keeps_relative_order() {
        let records = vec![
            dep(30, "A", "x", "bus"),
            dep(10, "B", "x", "tram"),
            dep(20, "C", "x", "bus"),
            dep(5, "D", "x", "bus"),
        ];
        let config = StopFilterConfig::new(stop()).with_modes("bus");
        let kept = run(records, &config);

        let lines: Vec<&str> = kept.iter().map(|r| r.line_name.as_str()).collect();
        assert_eq!(lines, vec!["A", "C", "D"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StopId;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    const LINES: [&str; 4] = ["U2", "u5", " M48", "S7 "];

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap()
    }

    prop_compose! {
        fn record()(offset_secs in -600i64..7200, line in 0usize..LINES.len()) -> DepartureRecord {
            DepartureRecord {
                stop_id: StopId::parse("900000100003").unwrap(),
                stop_name: "Stop".into(),
                scheduled: now() + Duration::seconds(offset_secs),
                line_name: LINES[line].into(),
                direction: "Somewhere".into(),
                delay_secs: 0,
                product: "bus".into(),
                remarks: Vec::new(),
            }
        }
    }

    proptest! {
        /// Nothing outside the display window is ever emitted
        #[test]
        fn output_within_window(records in prop::collection::vec(record(), 0..50)) {
            let window = DisplayWindow::default();
            let config = StopFilterConfig::new(StopId::parse("900000100003").unwrap());
            let (from, until) = window.bounds(now());

            for r in filter_departures(records, &config, &window, now()) {
                prop_assert!(r.scheduled >= from && r.scheduled <= until);
            }
        }

        /// Every emitted record matches the line allow-list
        #[test]
        fn output_matches_allow_list(
            records in prop::collection::vec(record(), 0..50),
            allowed in prop::sample::subsequence(LINES.to_vec(), 1..=LINES.len())
        ) {
            let window = DisplayWindow::default();
            let config = StopFilterConfig::new(StopId::parse("900000100003").unwrap())
                .with_lines(&allowed.join(","));

            for r in filter_departures(records, &config, &window, now()) {
                prop_assert!(allowed.iter().any(|a| a.trim().eq_ignore_ascii_case(&r.line_name)));
            }
        }

        /// Without allow-lists, filtering only applies the window
        #[test]
        fn absent_filters_pass_through(records in prop::collection::vec(record(), 0..50)) {
            let window = DisplayWindow::default();
            let config = StopFilterConfig::new(StopId::parse("900000100003").unwrap());
            let expected = records
                .iter()
                .filter(|r| window.contains(now(), r.scheduled))
                .count();

            prop_assert_eq!(filter_departures(records, &config, &window, now()).len(), expected);
        }
    }
}
