//! Lenient ingestion of calendar records from the tracking collaborator.

use crate::error::RecordError;
use crate::types::{FlowIntensity, RecordCategory, TimeSeriesRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calendar record as it arrives over the library boundary.
///
/// Every field is optional so that one bad entry can be rejected on its own
/// instead of failing the whole batch at deserialization time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "type")]
    pub category: Option<String>,
    #[serde(default, alias = "painLevel")]
    pub pain_level: Option<f64>,
    #[serde(default, alias = "flowIntensity")]
    pub flow: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TryFrom<RawRecord> for TimeSeriesRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let date_text = non_blank(raw.date).ok_or(RecordError::MissingField { field: "date" })?;
        let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
            .map_err(|_| RecordError::InvalidDate { value: date_text })?;

        let category_text =
            non_blank(raw.category).ok_or(RecordError::MissingField { field: "category" })?;
        let category = RecordCategory::from_label(&category_text)
            .ok_or(RecordError::InvalidCategory {
                value: category_text,
            })?;

        let pain_level = match raw.pain_level {
            None => None,
            Some(value) if (0.0..=10.0).contains(&value) && value.fract() == 0.0 => {
                Some(value as u8)
            }
            Some(value) => return Err(RecordError::PainOutOfRange { value }),
        };

        let flow = match non_blank(raw.flow) {
            None => None,
            Some(label) => Some(
                FlowIntensity::from_label(&label)
                    .ok_or(RecordError::InvalidFlow { value: label })?,
            ),
        };

        Ok(TimeSeriesRecord {
            date,
            category,
            pain_level,
            flow,
            note: non_blank(raw.note),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Convert raw records, skipping (and logging) any that are malformed.
pub fn parse_records(raw: Vec<RawRecord>) -> Vec<TimeSeriesRecord> {
    let total = raw.len();
    let records: Vec<TimeSeriesRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match TimeSeriesRecord::try_from(record) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(
                    target: "cyclecare::records",
                    index,
                    error = %e,
                    "skipping malformed record"
                );
                None
            }
        })
        .collect();
    tracing::debug!(
        target: "cyclecare::records",
        parsed = records.len(),
        skipped = total - records.len(),
        "parsed calendar records"
    );
    records
}
