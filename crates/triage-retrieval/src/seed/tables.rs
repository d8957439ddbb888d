use triage_core::errors::{TriageError, TriageResult};
use triage_core::{ExampleSource, LabeledText, NewExample};

/// Parse a JSON array of `{"text": ..., "label": ...}` rows.
pub fn parse_table(raw: &str, origin: &str) -> TriageResult<Vec<LabeledText>> {
    serde_json::from_str(raw).map_err(|e| TriageError::InvalidExample {
        reason: format!("{origin}: {e}"),
    })
}

/// Zip row `i` of the mood table with row `i` of the department table.
///
/// Tables must have the same length and the same text on every row.
pub fn combine_tables(
    mood: Vec<LabeledText>,
    department: Vec<LabeledText>,
) -> TriageResult<Vec<NewExample>> {
    if mood.len() != department.len() {
        return Err(TriageError::InvalidExample {
            reason: format!(
                "seed tables are not aligned: {} mood rows, {} department rows",
                mood.len(),
                department.len()
            ),
        });
    }

    mood.into_iter()
        .zip(department)
        .enumerate()
        .map(|(row, (m, d))| {
            if m.text.trim() != d.text.trim() {
                return Err(TriageError::InvalidExample {
                    reason: format!("seed row {row}: texts differ ({:?} vs {:?})", m.text, d.text),
                });
            }
            NewExample::new(m.text, m.label, d.label, ExampleSource::Seed)
        })
        .collect()
}
