//! The evaluation pipeline: search, facets, sort, summary.

use crate::facet::FacetDefinition;
use crate::ordering::{SortKey, SortSpec};
use crate::spec::{Matcher, QuerySpec};
use crate::summary::{summarize, Summary};
use crate::traits::Queryable;
use crate::value::Value;

/// Knobs for [`evaluate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluateOptions {
    /// Compute per-facet counts for summary tiles.
    pub include_summary: bool,
}

impl EvaluateOptions {
    /// Options requesting facet counts.
    pub fn with_summary() -> Self {
        EvaluateOptions {
            include_summary: true,
        }
    }
}

/// Output of one evaluation.
///
/// `results[i]` is `records[positions[i]]` of the evaluated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a, T> {
    /// Matching records in display order.
    pub results: Vec<&'a T>,
    /// Index of each result in the input collection.
    pub positions: Vec<usize>,
    /// Facet counts, when requested.
    pub summary: Option<Summary>,
}

impl<'a, T> ResultView<'a, T> {
    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The record at a display row together with its collection index.
    pub fn row(&self, row: usize) -> Option<(usize, &'a T)> {
        Some((*self.positions.get(row)?, *self.results.get(row)?))
    }

    /// Iterates results in display order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.results.iter().copied()
    }

    /// Clones the results out of the borrowed collection.
    pub fn to_owned_results(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.results.iter().map(|r| (*r).clone()).collect()
    }
}

/// Evaluates a specification against a collection of [`Queryable`] records.
///
/// Runs the search stage, the facet stage and a stable sort, then computes
/// facet counts if `options` asks for them. Never fails: missing or
/// malformed fields are non-matches and unreadable sort values go last.
///
/// # Example
///
/// ```
/// use roster_query::{evaluate, EvaluateOptions, QuerySpec, Record, SortSpec};
///
/// let doctors = vec![
///     Record::new().with("name", "Dr. Ravi Patel").with("city", "Durg"),
///     Record::new().with("name", "Dr. Anil Verma").with("city", "Raipur"),
///     Record::new().with("name", "Dr. Rakhi Patel").with("city", "Durg"),
/// ];
/// let spec = QuerySpec::new()
///     .facet("city", "Durg")
///     .sort_by(SortSpec::asc("name"));
///
/// let view = evaluate(&doctors, &spec, &[], EvaluateOptions::default());
/// assert_eq!(view.positions, vec![2, 0]);
/// ```
pub fn evaluate<'a, T: Queryable>(
    records: &'a [T],
    spec: &QuerySpec,
    facets: &[FacetDefinition],
    options: EvaluateOptions,
) -> ResultView<'a, T> {
    evaluate_with(records, spec, facets, options, T::accessor)
}

/// Like [`evaluate`], reading fields through an accessor function.
pub fn evaluate_with<'a, T, F>(
    records: &'a [T],
    spec: &QuerySpec,
    facets: &[FacetDefinition],
    options: EvaluateOptions,
    accessor: F,
) -> ResultView<'a, T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let matcher = Matcher::new(spec);

    let searched: Vec<bool> = records
        .iter()
        .map(|record| matcher.search(record, &accessor))
        .collect();

    let mut positions: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(i, record)| searched[*i] && matcher.facets(*record, &accessor, None))
        .map(|(i, _)| i)
        .collect();

    if let Some(sort) = spec.sort() {
        sort_positions(records, &mut positions, sort, &accessor);
    }

    let summary = options
        .include_summary
        .then(|| summarize(records, &searched, &matcher, facets, &accessor));

    tracing::debug!(
        records = records.len(),
        matched = positions.len(),
        search = spec.search_text(),
        facets = spec.active_facets(),
        summary = summary.is_some(),
        "evaluated roster query"
    );

    ResultView {
        results: positions.iter().map(|&i| &records[i]).collect(),
        positions,
        summary,
    }
}

/// Stable sort of collection indices by one sort key, extracting each key
/// once.
fn sort_positions<'a, T, F>(records: &'a [T], positions: &mut Vec<usize>, sort: &SortSpec, accessor: &F)
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut keyed: Vec<(Option<SortKey<'a>>, usize)> = positions
        .iter()
        .map(|&i| (sort.key(&accessor(&records[i], &sort.field)), i))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| sort.compare_keys(a.as_ref(), b.as_ref()));

    *positions = keyed.into_iter().map(|(_, i)| i).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::FacetOption;
    use crate::ordering::{Dir, SortKind};
    use crate::record::Record;

    fn task(title: &str, due: &str) -> Record {
        Record::new().with("title", title).with("due", due)
    }

    #[test]
    fn empty_spec_returns_everything_in_order() {
        let records = vec![task("b", "x"), task("a", "y")];
        let view = evaluate(&records, &QuerySpec::new(), &[], EvaluateOptions::default());
        assert_eq!(view.positions, vec![0, 1]);
        assert!(view.summary.is_none());
    }

    #[test]
    fn date_sort_puts_unparsable_last_stably() {
        let records = vec![
            task("bad-1", "someday"),
            task("late", "2024-03-01"),
            task("bad-2", ""),
            task("early", "15/01/2024"),
            task("missing", "n/a"),
        ];
        let spec = QuerySpec::new().sort_by(SortSpec::new("due", Dir::Asc, SortKind::Date));
        let view = evaluate(&records, &spec, &[], EvaluateOptions::default());
        assert_eq!(view.positions, vec![3, 1, 0, 2, 4]);

        let spec = QuerySpec::new().sort_by(SortSpec::new("due", Dir::Desc, SortKind::Date));
        let view = evaluate(&records, &spec, &[], EvaluateOptions::default());
        assert_eq!(view.positions, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn ties_keep_collection_order() {
        let records = vec![
            task("one", "2024-01-01"),
            task("two", "2024-01-01"),
            task("three", "2024-01-01"),
        ];
        let spec = QuerySpec::new().sort_by(SortSpec::desc("due").kind(SortKind::Date));
        let view = evaluate(&records, &spec, &[], EvaluateOptions::default());
        assert_eq!(view.positions, vec![0, 1, 2]);
    }

    #[test]
    fn row_returns_position_and_record() {
        let records = vec![task("b", "x"), task("a", "y")];
        let spec = QuerySpec::new().sort_by(SortSpec::asc("title"));
        let view = evaluate(&records, &spec, &[], EvaluateOptions::default());
        let (position, record) = view.row(0).unwrap();
        assert_eq!(position, 1);
        assert_eq!(record.field_value("title"), Value::Text("a"));
        assert!(view.row(2).is_none());
    }

    #[test]
    fn summary_is_computed_on_request() {
        let records = vec![task("a", "x")];
        let facets = vec![FacetDefinition::single("title").option(FacetOption::plain("a"))];
        let view = evaluate(&records, &QuerySpec::new(), &facets, EvaluateOptions::with_summary());
        assert_eq!(view.summary.unwrap().count("title", "a"), Some(1));
    }

    #[test]
    fn accessor_variant_reads_plain_structs() {
        struct Lead {
            stage: &'static str,
        }
        let leads = vec![Lead { stage: "won" }, Lead { stage: "new" }];
        let spec = QuerySpec::new().facet("stage", "new");
        let view = evaluate_with(&leads, &spec, &[], EvaluateOptions::default(), |lead, field| {
            match field {
                "stage" => Value::Text(lead.stage),
                _ => Value::None,
            }
        });
        assert_eq!(view.positions, vec![1]);
    }

    #[test]
    fn loaded_codes_match_as_written() {
        let leads: Vec<Record> =
            serde_json::from_str(r#"[{"code": "2024-1-5"}, {"code": "7-8-9"}, {"code": "A-17"}]"#)
                .unwrap();
        let facets = vec![FacetDefinition::single("code").option(FacetOption::plain("2024-1-5"))];

        let spec = QuerySpec::new().search("7-8-9").search_in(["code"]);
        let view = evaluate(&leads, &spec, &facets, EvaluateOptions::default());
        assert_eq!(view.positions, vec![1]);

        let spec = QuerySpec::new().facet("code", "2024-1-5");
        let view = evaluate(&leads, &spec, &facets, EvaluateOptions::with_summary());
        assert_eq!(view.positions, vec![0]);
        assert_eq!(view.summary.unwrap().count("code", "2024-1-5"), Some(1));
    }

    #[test]
    fn owned_results_clone_records() {
        let records = vec![task("a", "x")];
        let view = evaluate(&records, &QuerySpec::new(), &[], EvaluateOptions::default());
        assert_eq!(view.to_owned_results(), records);
    }
}
