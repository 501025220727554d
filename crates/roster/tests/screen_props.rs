//! Property tests: whatever input arrives, the screen's view matches a fresh
//! evaluation of its spec, and a remembered spec reproduces the view.

use proptest::prelude::*;
use roster::prelude::*;

const CONFIG: &str = r#"
search_fields: [name]
facets:
  - field: city
    mode: single
    options: [{ label: All, value: "" }, { label: Durg, value: Durg }, { label: Raipur, value: Raipur }]
  - field: category
    mode: multi
    options: [{ label: A, value: A }, { label: B, value: B }]
sort_options:
  - { label: Name, field: name }
  - { label: Visits, field: visits, dir: desc, kind: numeric }
include_summary: true
"#;

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        "[a-c]{1,4}",
        prop::sample::select(vec!["Durg", "Raipur", "Bhilai"]),
        prop::sample::select(vec!["A", "B"]),
        0i64..5,
    )
        .prop_map(|(name, city, category, visits)| {
            Record::new()
                .with("name", name)
                .with("city", city)
                .with("category", category)
                .with("visits", visits)
        })
}

fn step_strategy() -> impl Strategy<Value = (Control, SelectorInput)> {
    let control = prop::sample::select(vec![
        Control::Search,
        Control::Sort,
        Control::facet("city"),
        Control::facet("category"),
    ]);
    let value = prop::sample::select(vec!["", "Durg", "Raipur", "A", "B", "Name", "Visits", "a", "b"])
        .prop_map(String::from);
    let input = prop_oneof![
        Just(SelectorInput::Open),
        Just(SelectorInput::Close),
        Just(SelectorInput::Clear),
        value.clone().prop_map(SelectorInput::Pick),
        value.clone().prop_map(SelectorInput::Remove),
        value.prop_map(SelectorInput::Type),
    ];
    (control, input)
}

proptest! {
    #[test]
    fn view_tracks_spec(
        records in prop::collection::vec(record_strategy(), 0..20),
        steps in prop::collection::vec(step_strategy(), 0..30),
    ) {
        let config = RosterConfig::from_yaml(CONFIG).unwrap();
        let mut screen = RosterScreen::from_config(&config, records.clone());

        for (control, input) in steps {
            screen.handle(&control, input).unwrap();

            let fresh = evaluate(&records, screen.spec(), &config.facets, EvaluateOptions::with_summary());
            prop_assert_eq!(screen.positions(), fresh.positions.as_slice());
            prop_assert_eq!(screen.summary(), fresh.summary.as_ref());
        }
    }

    #[test]
    fn remembered_spec_reproduces_view(
        records in prop::collection::vec(record_strategy(), 0..20),
        steps in prop::collection::vec(step_strategy(), 0..30),
    ) {
        let config = RosterConfig::from_yaml(CONFIG).unwrap();
        let mut screen = RosterScreen::from_config(&config, records.clone());
        for (control, input) in steps {
            screen.handle(&control, input).unwrap();
        }

        let remembered = screen.spec().to_json().unwrap();
        let mut restored = RosterScreen::from_config(&config, records);
        restored.restore_spec(QuerySpec::from_json(&remembered).unwrap());

        prop_assert_eq!(restored.spec(), screen.spec());
        prop_assert_eq!(restored.positions(), screen.positions());
    }
}
