use serde_json::Value;

use crate::types::AudioFeatures;

/// Name of the column appended after all audio-feature columns.
pub const LABEL_COLUMN: &str = "label";

/// One surviving track: its audio features and its album's record label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    pub features: AudioFeatures,
    pub label: Option<String>,
}

/// Rectangular table with one row per track that has audio features.
///
/// Feature columns are the union of all record keys in first-seen order;
/// the label column always comes last. A record lacking a key renders an
/// empty cell for that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    feature_columns: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn from_rows(rows: Vec<FeatureRow>) -> Self {
        let mut feature_columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.features.keys() {
                if key != LABEL_COLUMN && !feature_columns.contains(key) {
                    feature_columns.push(key.clone());
                }
            }
        }

        Self {
            feature_columns,
            rows,
        }
    }

    /// All column names, label last.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.feature_columns.clone();
        columns.push(LABEL_COLUMN.to_string());
        columns
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = Option<&str>> {
        self.rows.iter().map(|r| r.label.as_deref())
    }

    /// Renders one row as text cells in [`FeatureTable::columns`] order.
    pub fn record(&self, row: &FeatureRow) -> Vec<String> {
        let mut cells: Vec<String> = self
            .feature_columns
            .iter()
            .map(|col| row.features.get(col).map(cell_text).unwrap_or_default())
            .collect();
        cells.push(row.label.clone().unwrap_or_default());
        cells
    }

    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|row| self.record(row))
    }
}

/// Text form of a cell: strings as-is, null as empty, anything else as JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Audio-feature keys whose values are always strings, whatever they look like.
pub const TEXT_COLUMNS: &[&str] = &["id", "uri", "type", "track_href", "analysis_url"];

/// Inverse of [`cell_text`] for feature cells: numbers and booleans are
/// restored, empty cells become null, everything else stays text. Cells of
/// [`TEXT_COLUMNS`] are never reinterpreted.
pub fn parse_cell(column: &str, text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    if TEXT_COLUMNS.contains(&column) {
        return Value::String(text.to_string());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
        _ => Value::String(text.to_string()),
    }
}
