//! Group keys.
//!
//! A key joins four answers in a fixed order:
//!
//! ```text
//! identity | experience | sanitized job title | company size
//! ```
//!
//! The job title is free text, so it is reduced to letters (ASCII and Turkish)
//! and whitespace before it takes part in the key.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Record, SurveyColumns, DEFAULT_MISSING_PLACEHOLDER, KEY_DELIMITER};

/// Letters kept in job titles besides ASCII. Uppercase `Ü` is not one of them.
const TURKISH_LETTERS: &str = "çğıİöşüÇĞÖŞ";

/// Everything that is not an ASCII letter, a listed Turkish letter or whitespace.
static JOB_TITLE_REJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"[^a-zA-Z{}\s]", TURKISH_LETTERS)).expect("job title pattern is valid")
});

/// Keep ASCII letters, Turkish letters and whitespace, then trim.
///
/// Accented letters outside that set are dropped, not transliterated. The set
/// has lowercase `ü` but no uppercase `Ü`, so `"ÜRÜN"` becomes `"RN"`; existing
/// chart paths and snapshot keys depend on that.
///
/// ```ignore
/// assert_eq!(sanitize_job_title("Çağrı Merkezi/IT"), "Çağrı MerkeziIT");
/// ```
pub fn sanitize_job_title(job_title: &str) -> String {
    JOB_TITLE_REJECT.replace_all(job_title, "").trim().to_string()
}

/// Builds group keys from records.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    columns: SurveyColumns,
    missing: String,
}

impl Default for KeyBuilder {
    fn default() -> Self {
        Self::new(SurveyColumns::default())
    }
}

impl KeyBuilder {
    pub fn new(columns: SurveyColumns) -> Self {
        Self {
            columns,
            missing: DEFAULT_MISSING_PLACEHOLDER.to_string(),
        }
    }

    /// Use `placeholder` for absent fields instead of `"undefined"`.
    pub fn with_missing_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.missing = placeholder.into();
        self
    }

    pub fn columns(&self) -> &SurveyColumns {
        &self.columns
    }

    pub fn missing_placeholder(&self) -> &str {
        &self.missing
    }

    /// Value of `column`, or the placeholder when the record lacks it.
    pub fn field<'a>(&'a self, record: &'a Record, column: &str) -> &'a str {
        record.get(column).map(String::as_str).unwrap_or(&self.missing)
    }

    /// Build the key of one record. Never fails.
    ///
    /// A missing job title becomes the placeholder as is; only present titles
    /// are sanitized.
    pub fn build_key(&self, record: &Record) -> String {
        let job_title = record
            .get(&self.columns.job_title)
            .map(String::as_str)
            .map(sanitize_job_title)
            .unwrap_or_else(|| self.missing.clone());

        [
            self.field(record, &self.columns.identity),
            self.field(record, &self.columns.experience),
            job_title.as_str(),
            self.field(record, &self.columns.company_size),
        ]
        .join(KEY_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identity: &str, experience: &str, job: &str, size: &str) -> Record {
        let columns = SurveyColumns::default();
        let mut record = Record::new();
        record.insert(columns.identity, identity.to_string());
        record.insert(columns.experience, experience.to_string());
        record.insert(columns.job_title, job.to_string());
        record.insert(columns.company_size, size.to_string());
        record
    }

    #[test]
    fn test_sanitize_keeps_turkish_letters() {
        assert_eq!(sanitize_job_title("Çağrı Merkezi/IT"), "Çağrı MerkeziIT");
        assert_eq!(sanitize_job_title("İŞÇİ ÖĞ şüğ ı"), "İŞÇİ ÖĞ şüğ ı");
    }

    #[test]
    fn test_sanitize_drops_uppercase_u_umlaut() {
        assert_eq!(sanitize_job_title("ÜRÜN MÜDÜRÜ"), "RN MDR");
        assert_eq!(sanitize_job_title("Ürün müdürü"), "rn müdürü");

        let key = KeyBuilder::default()
            .build_key(&record("Dev", "1-3", "ÜRÜN MÜDÜRÜ", "50-100"));
        assert_eq!(key, "Dev | 1-3 | RN MDR | 50-100");
    }

    #[test]
    fn test_sanitize_drops_other_characters() {
        assert_eq!(sanitize_job_title("  Backend Developer! (Sr.) "), "Backend Developer Sr");
        assert_eq!(sanitize_job_title("C++ / C# Dev 2"), "C  C Dev");
        // Letters outside the whitelist are dropped, not transliterated
        assert_eq!(sanitize_job_title("Développeur Crème"), "Dveloppeur Crme");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["Çağrı Merkezi/IT", "  a-b c ", "Développeur", "!!!", ""] {
            let once = sanitize_job_title(input);
            assert_eq!(sanitize_job_title(&once), once);
        }
    }

    #[test]
    fn test_sanitize_is_a_filtered_subsequence() {
        let input = "QA / Test Mühendisi (2. seviye) Ürün Développeur";
        let output = sanitize_job_title(input);
        let mut remaining = input.chars();
        for c in output.chars() {
            assert!(
                c.is_ascii_alphabetic() || TURKISH_LETTERS.contains(c) || c.is_whitespace(),
                "'{}' is outside the job title alphabet",
                c
            );
            assert!(remaining.any(|i| i == c), "'{}' is not in input order", c);
        }
    }

    #[test]
    fn test_key_field_order() {
        let key = KeyBuilder::default()
            .build_key(&record("Dev", "1-3", "Backend Developer!", "50-100"));
        assert_eq!(key, "Dev | 1-3 | Backend Developer | 50-100");

        let parts: Vec<&str> = key.split(KEY_DELIMITER).collect();
        assert_eq!(parts, vec!["Dev", "1-3", "Backend Developer", "50-100"]);
    }

    #[test]
    fn test_missing_fields_use_placeholder() {
        let columns = SurveyColumns::default();
        let mut partial = Record::new();
        partial.insert(columns.identity.clone(), "Dev".to_string());

        let key = KeyBuilder::default().build_key(&partial);
        assert_eq!(key, "Dev | undefined | undefined | undefined");

        let key = KeyBuilder::default()
            .with_missing_placeholder("-")
            .build_key(&partial);
        assert_eq!(key, "Dev | - | - | -");
    }
}
