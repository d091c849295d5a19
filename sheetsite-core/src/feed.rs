//! Parsing of the wrapped JSON table feed and projection into rows.
//!
//! The endpoint answers with a JavaScript callback around a JSON object:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"table":{"cols":[...],"rows":[...]}});
//! ```
//!
//! Only the region from the first `{` to the last `}` is parsed.

use crate::models::Row;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MalformedFeedError {
    #[error("no JSON object found in feed payload")]
    MissingObject,

    #[error("invalid JSON in feed payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    pub table: FeedTable,
}

/// Table description: column descriptors plus positional row descriptors
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedTable {
    #[serde(default)]
    pub cols: Vec<FeedColumn>,

    #[serde(default)]
    pub rows: Vec<FeedRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedColumn {
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedRow {
    /// Cells aligned with `cols` by index; `null` for an empty cell
    #[serde(default)]
    pub c: Vec<Option<FeedCell>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedCell {
    /// Raw value (string, number, boolean or null)
    #[serde(default)]
    pub v: Value,

    /// Display-formatted value, when the sheet provides one
    #[serde(default)]
    pub f: Option<String>,
}

impl FeedCell {
    /// Formatted value if present, else the raw value, else empty.
    pub fn display(&self) -> String {
        if let Some(f) = self.f.as_deref().filter(|f| !f.is_empty()) {
            return f.to_string();
        }
        match &self.v {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            // f64 Display drops an integral ".0", so 1.0 reads as "1"
            Value::Number(n) if n.is_f64() => n
                .as_f64()
                .map_or_else(|| n.to_string(), |f| f.to_string()),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }
}

/// Locate the embedded JSON object and parse it into a table description.
pub fn parse_feed(payload: &str) -> Result<FeedTable, MalformedFeedError> {
    let json = extract_json_object(payload)?;
    let document: FeedDocument = serde_json::from_str(json)?;
    Ok(document.table)
}

/// Slice from the first `{` to the last `}`, inclusive.
fn extract_json_object(payload: &str) -> Result<&str, MalformedFeedError> {
    let start = payload.find('{').ok_or(MalformedFeedError::MissingObject)?;
    let end = payload.rfind('}').ok_or(MalformedFeedError::MissingObject)?;
    if end < start {
        return Err(MalformedFeedError::MissingObject);
    }
    Ok(&payload[start..=end])
}

impl FeedTable {
    /// Project every row into a [`Row`], walking columns and cells by position.
    ///
    /// Columns with an empty or whitespace-only label are dropped along with
    /// their cells. Missing
    /// and null cells read as the empty string. No row is skipped.
    pub fn normalize(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|raw| {
                self.cols
                    .iter()
                    .enumerate()
                    .filter(|(_, col)| !col.label.trim().is_empty())
                    .map(|(idx, col)| {
                        let value = raw
                            .c
                            .get(idx)
                            .and_then(Option::as_ref)
                            .map(FeedCell::display)
                            .unwrap_or_default();
                        (col.label.as_str(), value)
                    })
                    .collect::<Row>()
            })
            .collect()
    }
}

/// Parse a payload straight into normalized rows.
pub fn rows_from_payload(payload: &str) -> Result<Vec<Row>, MalformedFeedError> {
    Ok(parse_feed(payload)?.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRAPPED: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","status":"ok","table":{"cols":[{"id":"A","label":"id","type":"number"},{"id":"B","label":"Title","type":"string"},{"id":"C","label":"","type":"string"},{"id":"D","label":"Puplished","type":"date"}],"rows":[{"c":[{"v":1.0,"f":"1"},{"v":"Καλημέρα"},{"v":"hidden"},{"v":"Date(2024,0,1)","f":"1/1/2024"}]},{"c":[null,{"v":"Second"},null]}]}});"#;

    #[test]
    fn test_parse_wrapped_payload() {
        let table = parse_feed(WRAPPED).unwrap();
        assert_eq!(table.cols.len(), 4);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_normalize_prefers_formatted_value() {
        let rows = rows_from_payload(WRAPPED).unwrap();
        assert_eq!(rows[0].get("id"), Some("1"));
        assert_eq!(rows[0].get("Title"), Some("Καλημέρα"));
        assert_eq!(rows[0].get("Puplished"), Some("1/1/2024"));
    }

    #[test]
    fn test_blank_label_column_is_dropped() {
        let rows = rows_from_payload(WRAPPED).unwrap();
        for row in &rows {
            assert_eq!(row.labels().collect::<Vec<_>>(), ["id", "Title", "Puplished"]);
            assert!(row.iter().all(|(_, v)| v != "hidden"));
        }

        let payload = r#"{"table":{"cols":[{"label":"id"},{"label":"  "},{"label":"\t"}],
            "rows":[{"c":[{"v":"1"},{"v":"x"},{"v":"y"}]}]}}"#;
        let rows = rows_from_payload(payload).unwrap();
        assert_eq!(rows[0].labels().collect::<Vec<_>>(), ["id"]);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn test_null_and_missing_cells_are_empty() {
        let rows = rows_from_payload(WRAPPED).unwrap();
        assert_eq!(rows[1].get("id"), Some(""));
        assert_eq!(rows[1].get("Title"), Some("Second"));
        // row is shorter than the column list
        assert_eq!(rows[1].get("Puplished"), Some(""));
    }

    #[test]
    fn test_raw_value_fallbacks() {
        let payload = r#"{"table":{"cols":[{"label":"n"},{"label":"b"},{"label":"s"},{"label":"e"},{"label":"z"},{"label":"i"}],
            "rows":[{"c":[{"v":3.5},{"v":true},{"v":"text","f":""},{"v":null},{"v":0},{"v":2.0}]}]}}"#;
        let rows = rows_from_payload(payload).unwrap();
        let values: Vec<_> = rows[0].iter().map(|(_, v)| v).collect();
        assert_eq!(values, ["3.5", "true", "text", "", "0", "2"]);
    }

    #[test]
    fn test_empty_rows_are_kept() {
        let payload = r#"{"table":{"cols":[{"label":"a"}],"rows":[{"c":[]},{"c":[null]}]}}"#;
        let rows = rows_from_payload(payload).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some(""));
    }

    #[test]
    fn test_missing_braces() {
        assert!(matches!(
            parse_feed("no json here"),
            Err(MalformedFeedError::MissingObject)
        ));
        assert!(matches!(
            parse_feed("} backwards {"),
            Err(MalformedFeedError::MissingObject)
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_feed("callback({not json});"),
            Err(MalformedFeedError::Json(_))
        ));
        assert!(matches!(
            parse_feed(r#"({"rows": []})"#),
            Err(MalformedFeedError::Json(_))
        ));
    }
}
