//! Text and JSON output for a roster screen.

use console::Style;
use roster::prelude::*;
use roster::query::FacetTally;
use serde::Serialize;

/// Styles used by the text renderer.
#[derive(Debug, Clone)]
pub struct Palette {
    pub header: Style,
    pub selected: Style,
    pub dim: Style,
}

impl Palette {
    /// Colored output; `console` still drops the codes when stdout is not
    /// a terminal.
    pub fn colored() -> Self {
        Palette {
            header: Style::new().bold(),
            selected: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// No styling at all.
    pub fn plain() -> Self {
        Palette {
            header: Style::new().force_styling(false),
            selected: Style::new().force_styling(false),
            dim: Style::new().force_styling(false),
        }
    }
}

// ============================================================================
// Text
// ============================================================================

/// Columns shown for each row: search fields first, then facet fields.
pub fn columns(screen: &RosterScreen<Record>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let fields = screen
        .spec()
        .search_fields()
        .iter()
        .cloned()
        .chain(screen.facets().iter().map(|f| f.field.clone()));
    for field in fields {
        if !columns.contains(&field) {
            columns.push(field);
        }
    }
    columns
}

/// Renders the result list, followed by summary tiles when present.
pub fn render_text(screen: &RosterScreen<Record>, palette: &Palette) -> String {
    let columns = columns(screen);
    let rows: Vec<Vec<String>> = screen
        .results()
        .into_iter()
        .map(|record| columns.iter().map(|c| cell(record, c)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&palette.header.apply_to(line(&columns, &widths)).to_string());
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row, &widths));
        out.push('\n');
    }
    let noun = if screen.len() == 1 { "record" } else { "records" };
    out.push_str(
        &palette
            .dim
            .apply_to(format!("{} of {} {}", screen.len(), screen.records().len(), noun))
            .to_string(),
    );
    out.push('\n');

    if let Some(summary) = screen.summary() {
        out.push('\n');
        for facet in screen.facets() {
            if let Some(tally) = summary.get(&facet.field) {
                out.push_str(&tiles(facet, tally, screen.spec(), palette));
                out.push('\n');
            }
        }
    }
    out
}

fn cell(record: &Record, field: &str) -> String {
    record
        .field_value(field)
        .to_text()
        .map(|t| t.into_owned())
        .unwrap_or_default()
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| format!("{:<width$}", text, width = *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// One tile row: `City: All (6)  Raipur (1)  Durg (4)`.
fn tiles(facet: &FacetDefinition, tally: &FacetTally, spec: &QuerySpec, palette: &Palette) -> String {
    let selection = spec.selection(&facet.field);
    let tiles: Vec<String> = tally
        .counts
        .iter()
        .map(|count| {
            let text = format!("{} ({})", count.label, count.count);
            let selected = match selection {
                Some(selection) => selection.values().any(|v| v == count.value),
                None => count.value.is_empty(),
            };
            if selected {
                palette.selected.apply_to(format!("[{}]", text)).to_string()
            } else {
                text
            }
        })
        .collect();
    format!("{}: {}", facet.display_label(), tiles.join("  "))
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonView<'a> {
    spec: &'a QuerySpec,
    count: usize,
    results: Vec<JsonRow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a Summary>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    position: usize,
    record: &'a Record,
}

/// Renders the screen state as pretty JSON.
pub fn render_json(screen: &RosterScreen<Record>) -> serde_json::Result<String> {
    let view = JsonView {
        spec: screen.spec(),
        count: screen.len(),
        results: screen
            .positions()
            .iter()
            .zip(screen.results())
            .map(|(&position, record)| JsonRow { position, record })
            .collect(),
        summary: screen.summary(),
    };
    serde_json::to_string_pretty(&view)
}
