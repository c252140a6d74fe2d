//! Domain models for the survey grouping pipeline.
//!
//! - [`Record`] - one survey answer row (column label -> cell value)
//! - [`GroupedData`] - group key -> ordered records
//! - [`SurveyColumns`] - the column labels the pipeline reads

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One survey row. Column order follows the source file; empty cells are absent.
pub type Record = IndexMap<String, String>;

/// Records bucketed by group key, in first-seen key order.
pub type GroupedData = IndexMap<String, Vec<Record>>;

/// Delimiter between the four fields of a group key.
pub const KEY_DELIMITER: &str = " | ";

/// Placeholder used for fields a record does not have.
pub const DEFAULT_MISSING_PLACEHOLDER: &str = "undefined";

// =============================================================================
// Survey Columns
// =============================================================================

/// Column labels used to build group keys and chart labels.
///
/// Defaults are the labels of the Turkish developer salary survey, verbatim
/// (including the double space in the company size question).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyColumns {
    /// "How do you describe yourself?"
    pub identity: String,
    /// "Years of experience"
    pub experience: String,
    /// "What is your role?" (free text)
    pub job_title: String,
    /// "How big is the company?"
    pub company_size: String,
    /// "Salary range"
    pub salary: String,
}

impl Default for SurveyColumns {
    fn default() -> Self {
        Self {
            identity: "Kendinizi ne olarak tanımlarsınız?".to_string(),
            experience: "Tecrübe yılınız ?".to_string(),
            job_title: "Göreviniz nedir?".to_string(),
            company_size: "Şirket  kadar büyük?".to_string(),
            salary: "Maaş aralığınız?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns_are_verbatim() {
        let columns = SurveyColumns::default();
        assert_eq!(columns.company_size, "Şirket  kadar büyük?");
        assert_eq!(columns.salary, "Maaş aralığınız?");
    }

    #[test]
    fn test_record_keeps_column_order() {
        let mut record = Record::new();
        record.insert("b".into(), "2".into());
        record.insert("a".into(), "1".into());

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
