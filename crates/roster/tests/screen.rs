//! Integration tests for the roster screen controller.
//!
//! A doctor roster screen driven the way the app drives it: selector input
//! routed to controls, tiles tapped, rows tapped, filters remembered.

use pretty_assertions::assert_eq;
use roster::prelude::*;
use roster::query::{Dir, SortKind};
use roster::select::{LabelMode, SelectorKind};

// ============================================================================
// Fixture
// ============================================================================

const CONFIG: &str = r#"
search_fields: [name, city]
search_placeholder: Search doctors
facets:
  - field: city
    label: City
    mode: single
    options:
      - { label: All, value: "" }
      - { label: Raipur, value: Raipur }
      - { label: Bilaspur, value: Bilaspur }
      - { label: Durg, value: Durg }
  - field: category
    label: Category
    mode: multi
    options:
      - { label: A, value: A }
      - { label: B, value: B }
      - { label: C, value: C }
sort_options:
  - { label: "Name (A-Z)", field: name, dir: asc, kind: lexicographic }
  - { label: "Most visits", field: visits, dir: desc, kind: numeric }
default_sort: "Name (A-Z)"
include_summary: true
"#;

fn doctor(name: &str, city: &str, category: &str, visits: i64) -> Record {
    Record::new()
        .with("name", name)
        .with("city", city)
        .with("category", category)
        .with("visits", visits)
}

fn roster() -> Vec<Record> {
    vec![
        doctor("Dr. Ravi Patel", "Durg", "A", 12),
        doctor("Dr. Anjali Sharma", "Raipur", "B", 3),
        doctor("Dr. Rajiv Patel", "Durg", "A", 7),
        doctor("Dr. Rakhi Patel", "Durg", "B", 9),
        doctor("Dr. Suresh Verma", "Bilaspur", "C", 1),
        doctor("Dr. Rajiv Dixhit", "Durg", "A", 12),
    ]
}

fn screen() -> RosterScreen<Record> {
    let config = RosterConfig::from_yaml(CONFIG).unwrap();
    RosterScreen::from_config(&config, roster())
}

fn names(screen: &RosterScreen<Record>) -> Vec<String> {
    screen
        .results()
        .into_iter()
        .map(|r| match r.field_value("name") {
            roster::query::Value::Text(s) => s.to_string(),
            other => panic!("name is not text: {:?}", other),
        })
        .collect()
}

fn city() -> Control {
    Control::facet("city")
}

fn category() -> Control {
    Control::facet("category")
}

fn pick(value: &str) -> SelectorInput {
    SelectorInput::Pick(value.to_string())
}

// ============================================================================
// Initial state
// ============================================================================

#[test]
fn opens_sorted_by_default_sort() {
    let s = screen();
    assert_eq!(s.len(), 6);
    assert_eq!(names(&s)[0], "Dr. Anjali Sharma");
    assert_eq!(s.spec().sort(), Some(&SortSpec::asc("name")));
    assert_eq!(s.summary().unwrap().count("city", ""), Some(6));
    assert_eq!(s.selector(&Control::Sort).unwrap().display_text(), "Name (A-Z)");
    assert_eq!(s.selector(&Control::Search).unwrap().display_text(), "Search doctors");
}

// ============================================================================
// The Durg scenario
// ============================================================================

#[test]
fn picking_durg_filters_and_counts() {
    let mut s = screen();
    s.handle(&city(), SelectorInput::Open).unwrap();
    assert!(s.handle(&city(), pick("Durg")).unwrap());

    assert_eq!(
        names(&s),
        vec![
            "Dr. Rajiv Dixhit",
            "Dr. Rajiv Patel",
            "Dr. Rakhi Patel",
            "Dr. Ravi Patel",
        ]
    );

    let summary = s.summary().unwrap();
    assert_eq!(summary.count("category", "A"), Some(3));
    assert_eq!(summary.count("category", "B"), Some(1));
    assert_eq!(summary.count("category", "C"), Some(0));
    assert_eq!(summary.count("city", "Raipur"), Some(1));
    assert_eq!(summary.count("city", "Bilaspur"), Some(1));
    assert_eq!(summary.count("city", "Durg"), Some(4));

    let selector = s.selector(&city()).unwrap();
    assert!(!selector.is_open());
    assert_eq!(selector.label_mode(), LabelMode::Floating);
}

#[test]
fn multi_facet_ors_within_and_ands_across() {
    let mut s = screen();
    s.handle(&city(), pick("Durg")).unwrap();
    s.handle(&category(), SelectorInput::Open).unwrap();
    s.handle(&category(), pick("B")).unwrap();
    s.handle(&category(), pick("C")).unwrap();
    s.handle(&category(), SelectorInput::Close).unwrap();

    assert_eq!(names(&s), vec!["Dr. Rakhi Patel"]);
    assert_eq!(
        s.spec().selection("category"),
        Some(&Selection::any(["B", "C"]))
    );
    assert_eq!(s.selector(&category()).unwrap().kind(), SelectorKind::Multi);
}

// ============================================================================
// Search and sort
// ============================================================================

#[test]
fn typing_in_search_narrows_results() {
    let mut s = screen();
    s.handle(&Control::Search, SelectorInput::Open).unwrap();
    assert!(s.handle(&Control::Search, SelectorInput::Type("rajiv".into())).unwrap());
    assert_eq!(names(&s), vec!["Dr. Rajiv Dixhit", "Dr. Rajiv Patel"]);

    assert!(s.handle(&Control::Search, SelectorInput::Type("bilas".into())).unwrap());
    assert_eq!(names(&s), vec!["Dr. Suresh Verma"]);
}

#[test]
fn choosing_a_sort_option_reorders() {
    let mut s = screen();
    s.handle(&Control::Sort, SelectorInput::Open).unwrap();
    assert!(s.handle(&Control::Sort, pick("Most visits")).unwrap());
    assert_eq!(s.positions(), &[0, 5, 3, 2, 1, 4]);
    assert_eq!(
        s.spec().sort(),
        Some(&SortSpec::new("visits", Dir::Desc, SortKind::Numeric))
    );
}

#[test]
fn unknown_sort_label_is_ignored() {
    let mut s = screen();
    assert!(!s.handle(&Control::Sort, pick("Newest")).unwrap());
    assert_eq!(s.spec().sort(), Some(&SortSpec::asc("name")));
}

// ============================================================================
// Dismissal and tiles
// ============================================================================

#[test]
fn clearing_then_dismissing_restores_filter() {
    let mut s = screen();
    s.handle(&city(), pick("Durg")).unwrap();

    s.handle(&city(), SelectorInput::Open).unwrap();
    assert!(s.handle(&city(), SelectorInput::Clear).unwrap());
    assert_eq!(s.len(), 6);

    assert!(s.handle(&city(), SelectorInput::Close).unwrap());
    assert_eq!(s.len(), 4);
    assert_eq!(s.spec().selection("city"), Some(&Selection::one("Durg")));
}

#[test]
fn tapping_a_tile_filters() {
    let mut s = screen();
    assert!(s.tap_tile("city", "Raipur").unwrap());
    assert_eq!(names(&s), vec!["Dr. Anjali Sharma"]);

    // The "All" tile removes the constraint.
    assert!(s.tap_tile("city", "").unwrap());
    assert_eq!(s.len(), 6);
    assert_eq!(s.spec().selection("city"), None);
}

#[test]
fn unknown_control_is_an_error() {
    let mut s = screen();
    let err = s.handle(&Control::facet("speciality"), pick("Cardiology")).unwrap_err();
    assert!(matches!(err, RosterError::UnknownControl(name) if name == "facet:speciality"));
}

#[test]
fn no_change_means_no_reevaluation_needed() {
    let mut s = screen();
    assert!(!s.handle(&city(), SelectorInput::Open).unwrap());
    assert!(!s.handle(&city(), SelectorInput::Close).unwrap());
    assert!(!s.handle(&city(), pick("Bhilai")).unwrap());
}

// ============================================================================
// Rows and records
// ============================================================================

#[test]
fn tapping_a_row_hands_off_record_and_index() {
    let mut s = screen();
    s.handle(&city(), pick("Raipur")).unwrap();
    let (index, record) = s.tap(0).unwrap();
    assert_eq!(index, 1);
    assert_eq!(record.field_value("name"), roster::query::Value::Text("Dr. Anjali Sharma"));
    assert!(s.tap(1).is_none());
}

#[test]
fn record_changes_reevaluate() {
    let mut s = screen();
    s.handle(&city(), pick("Raipur")).unwrap();
    assert_eq!(s.len(), 1);

    s.push_record(doctor("Dr. Meena Joshi", "Raipur", "A", 2));
    assert_eq!(s.len(), 2);
    assert_eq!(s.summary().unwrap().count("category", "A"), Some(1));

    let old = s.update_record(0, doctor("Dr. Ravi Patel", "Raipur", "A", 12)).unwrap();
    assert_eq!(old.get("city"), Some(&"Durg".into()));
    assert_eq!(s.len(), 3);

    s.remove_record(1).unwrap();
    assert_eq!(names(&s), vec!["Dr. Meena Joshi", "Dr. Ravi Patel"]);
    assert!(s.remove_record(99).is_none());

    s.replace_records(Vec::new());
    assert!(s.is_empty());
    assert_eq!(s.summary().unwrap().count("city", ""), Some(0));
}

// ============================================================================
// Remembered filters
// ============================================================================

#[test]
fn restoring_a_remembered_spec_syncs_controls() {
    let mut s = screen();
    s.handle(&city(), pick("Durg")).unwrap();
    s.handle(&category(), pick("A")).unwrap();
    s.handle(&Control::Sort, pick("Most visits")).unwrap();
    s.handle(&Control::Search, SelectorInput::Type("patel".into())).unwrap();
    let remembered = s.spec().to_json().unwrap();
    let positions = s.positions().to_vec();

    let mut fresh = screen();
    assert!(fresh.restore_spec(QuerySpec::from_json(&remembered).unwrap()));

    assert_eq!(fresh.spec(), s.spec());
    assert_eq!(fresh.positions(), positions.as_slice());
    assert_eq!(fresh.selector(&city()).unwrap().display_text(), "Durg");
    assert_eq!(fresh.selector(&category()).unwrap().display_text(), "A");
    assert_eq!(fresh.selector(&Control::Sort).unwrap().display_text(), "Most visits");
    assert_eq!(
        fresh.selector(&Control::Search).unwrap().value(),
        &SelectorValue::from("patel")
    );

    assert!(!fresh.restore_spec(fresh.spec().clone()));
}

#[test]
fn restoring_keeps_configured_search_fields() {
    let mut s = screen();
    s.restore_spec(QuerySpec::new().search("verma"));
    assert_eq!(s.spec().search_fields(), ["name", "city"]);
    assert_eq!(names(&s), vec!["Dr. Suresh Verma"]);
    assert_eq!(s.selector(&Control::Sort).unwrap().value(), &SelectorValue::Unset);
}

#[test]
fn restoring_reshapes_selections_to_their_controls() {
    let mut s = screen();
    let remembered = r#"{"facet_filters":{"city":["Durg","Raipur"],"category":["B","Z"]}}"#;
    assert!(s.restore_spec(QuerySpec::from_json(remembered).unwrap()));

    let city_selector = s.selector(&city()).unwrap();
    assert_eq!(city_selector.value(), &SelectorValue::from("Durg"));
    assert_eq!(s.spec().selection("city"), Some(&Selection::one("Durg")));
    assert_eq!(s.spec().selection("category"), Some(&Selection::any(["B"])));
    assert_eq!(names(&s), vec!["Dr. Rakhi Patel"]);
}

#[test]
fn restoring_drops_undeclared_options() {
    let mut s = screen();
    s.restore_spec(QuerySpec::new().facet("city", "Bhilai"));
    assert_eq!(s.spec().selection("city"), None);
    assert_eq!(s.selector(&city()).unwrap().value(), &SelectorValue::Unset);
    assert_eq!(s.len(), 6);
}

#[test]
fn control_names_parse() {
    assert_eq!(Control::from("search"), Control::Search);
    assert_eq!(Control::from("sort"), Control::Sort);
    assert_eq!(Control::from("city"), city());
}
