use slimme_cijfers::analytics::aggregate::{aggregate_by_subject, aggregate_overall};
use slimme_cijfers::analytics::filter::{FilterCriteria, SortKey, filter_and_sort};
use slimme_cijfers::analytics::grade::GradeBand;
use slimme_cijfers::analytics::progression::build_monthly_progression;
use slimme_cijfers::models::{GradeRecord, student_name};
use slimme_cijfers::navigation::{NavigationState, Navigator, ROOT_LABEL};
use slimme_cijfers::parser::parse_grades;

fn fixture() -> Vec<GradeRecord> {
    let bytes = include_bytes!("fixtures/sample_grades.json");
    parse_grades(bytes).expect("Failed to parse fixture").items
}

fn math_only() -> Vec<GradeRecord> {
    fixture()
        .into_iter()
        .filter(|r| r.subject.name == "wiskunde")
        .collect()
}

#[test]
fn test_math_scenario() {
    let records = math_only();
    assert_eq!(records.len(), 3);

    let stats = aggregate_overall(&records);
    assert_eq!(stats.average, Some(7.25));
    assert_eq!(stats.highest, Some(8.5));
    assert_eq!(stats.subject_count, 1);
    assert_eq!(stats.countable_total, 2);
    assert_eq!(stats.passed_count, 2);

    let points = build_monthly_progression(&records);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].month_label, "jan 2024");
    assert_eq!(points[0].month_average, 8.5);
    assert_eq!(points[0].cumulative_average, 8.5);
    assert_eq!(points[1].month_label, "feb 2024");
    assert_eq!(points[1].month_average, 6.0);
    assert_eq!(points[1].cumulative_average, 7.25);
}

#[test]
fn test_last_cumulative_matches_overall_average() {
    let records = fixture();
    let stats = aggregate_overall(&records);
    let points = build_monthly_progression(&records);

    assert_eq!(stats.undated_count, 0);
    let last = points.last().expect("at least one month");
    assert_eq!(Some(last.cumulative_average), stats.average);

    let counted: usize = points.iter().map(|p| p.count).sum();
    assert_eq!(counted, stats.countable_total);
}

#[test]
fn test_undated_records_stay_out_of_progression() {
    let mut records = fixture();
    let mut undated = records[0].clone();
    undated.entry_date = String::new();
    undated.result = "4.0".to_string();
    records.push(undated);

    let stats = aggregate_overall(&records);
    let points = build_monthly_progression(&records);
    assert_eq!(stats.undated_count, 1);

    let counted: usize = points.iter().map(|p| p.count).sum();
    assert_eq!(counted + stats.undated_count, stats.countable_total);
    assert_eq!(points.last().map(|p| p.cumulative_average), Some(7.25));

    for sort in [SortKey::DateDesc, SortKey::DateOld] {
        let criteria = FilterCriteria {
            sort,
            ..Default::default()
        };
        let view = filter_and_sort(&records, &criteria);
        assert_eq!(view.last().map(|r| r.entry_date.as_str()), Some(""));
    }
}

#[test]
fn test_subject_grouping_is_a_partition() {
    let records = fixture();
    let subjects = aggregate_by_subject(&records);
    assert_eq!(subjects.len(), 2);

    let total: usize = subjects.iter().map(|s| s.count).sum();
    assert_eq!(total, records.len());

    let english = &subjects[1];
    assert_eq!(english.short_code, "entl");
    assert_eq!(english.count, 2);
    assert_eq!(english.average, None);
    assert_eq!(english.latest, None);
}

#[test]
fn test_band_filter_includes_excluded_record() {
    let records = fixture();
    let criteria = FilterCriteria {
        band: Some(GradeBand::Insufficient),
        ..Default::default()
    };
    let view = filter_and_sort(&records, &criteria);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].result, "5.9");
    assert!(view[0].excluded_from_final);

    let stats = aggregate_overall(&records);
    assert_eq!(stats.highest, Some(8.5));
    assert_eq!(stats.countable_total, 2);
}

#[test]
fn test_noop_filter_and_sort_orders() {
    let records = fixture();
    let all = filter_and_sort(&records, &FilterCriteria::default());
    assert_eq!(all.len(), records.len());
    assert_eq!(all[0].result, "7.3");

    let oldest = FilterCriteria {
        sort: SortKey::DateOld,
        ..Default::default()
    };
    assert_eq!(filter_and_sort(&records, &oldest)[0].result, "8.5");
}

#[test]
fn test_navigation_round_trip() {
    let records = fixture();
    let mut nav = Navigator::new();

    nav.view_all_subjects();
    let first_subject = aggregate_by_subject(&records)[0].name.clone();
    nav.open_subject(first_subject);
    assert_eq!(nav.state().selected_subject(), Some("wiskunde"));

    let root = nav
        .breadcrumbs()
        .into_iter()
        .find(|c| c.label == ROOT_LABEL)
        .expect("root crumb");
    nav.follow(&root);
    assert_eq!(nav.state(), &NavigationState::Dashboard);
}

#[test]
fn test_greeting_and_empty_payload() {
    assert_eq!(student_name(&fixture()), "Sanne");

    let empty = parse_grades(b"{}").unwrap().items;
    let stats = aggregate_overall(&empty);
    assert_eq!(stats.average, None);
    assert!(build_monthly_progression(&empty).is_empty());
    assert!(filter_and_sort(&empty, &FilterCriteria::default()).is_empty());
}
