//! Chart output paths.
//!
//! A group key is split back into its fields and laid out as
//!
//! ```text
//! <root>/<identity>/<company size>/<experience>/<key>.png
//! ```
//!
//! Every segment has the characters `\ / : * ? " < > |` removed and is cut to
//! 100 characters. Splitting is lossy when a field itself contains `" | "`.

use std::path::{Path, PathBuf};

use crate::models::KEY_DELIMITER;

/// Maximum length of a path segment, in characters.
pub const MAX_SEGMENT_LEN: usize = 100;

/// Characters that are never allowed in a path segment.
pub const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Remove forbidden characters, then truncate to [`MAX_SEGMENT_LEN`] characters.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .take(MAX_SEGMENT_LEN)
        .collect()
}

/// Where a group's chart goes, relative to the charts root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath {
    pub identity_dir: String,
    pub company_size_dir: String,
    pub experience_dir: String,
    /// Sanitized key plus `.png`
    pub filename: String,
}

impl OutputPath {
    /// Directory holding the chart, under `root`.
    pub fn directory(&self, root: &Path) -> PathBuf {
        root.join(&self.identity_dir)
            .join(&self.company_size_dir)
            .join(&self.experience_dir)
    }

    /// Full chart path, under `root`.
    pub fn file(&self, root: &Path) -> PathBuf {
        self.directory(root).join(&self.filename)
    }
}

/// Derive the output path of a group key.
///
/// Fields are taken from the first four `" | "` pieces: identity, experience,
/// job title, company size. The job title only appears in the filename.
pub fn build_path(key: &str, missing: &str) -> OutputPath {
    let mut parts = key.split(KEY_DELIMITER);
    let identity = parts.next().unwrap_or(missing);
    let experience = parts.next().unwrap_or(missing);
    let _job_title = parts.next();
    let company_size = parts.next().unwrap_or(missing);

    OutputPath {
        identity_dir: sanitize_filename(identity),
        company_size_dir: sanitize_filename(company_size),
        experience_dir: sanitize_filename(experience),
        filename: format!("{}.png", sanitize_filename(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_forbidden_characters() {
        assert_eq!(sanitize_filename(r#"a\b/c:d*e?f"g<h>i|j"#), "abcdefghij");
        assert_eq!(sanitize_filename("Dev | 1-3"), "Dev  1-3");
        assert_eq!(sanitize_filename("Şirket büyük"), "Şirket büyük");
    }

    #[test]
    fn test_sanitize_truncates_to_100_characters() {
        let long = "ğ".repeat(150);
        let sanitized = sanitize_filename(&long);
        assert_eq!(sanitized.chars().count(), 100);

        let short = "x".repeat(100);
        assert_eq!(sanitize_filename(&short), short);
    }

    #[test]
    fn test_segments_never_forbidden_or_too_long() {
        let key = format!("{} | 1/3 | Job | {}", "a:b".repeat(60), "<50>".repeat(40));
        let path = build_path(&key, "undefined");

        for segment in [&path.identity_dir, &path.company_size_dir, &path.experience_dir] {
            assert!(segment.chars().count() <= MAX_SEGMENT_LEN);
            assert!(!segment.contains(&FORBIDDEN_CHARS[..]));
        }
        let stem = path.filename.trim_end_matches(".png");
        assert!(stem.chars().count() <= MAX_SEGMENT_LEN);
        assert!(!stem.contains(&FORBIDDEN_CHARS[..]));
    }

    #[test]
    fn test_directory_order() {
        let path = build_path("Dev | 1-3 | Backend Developer | 50-100", "undefined");

        assert_eq!(path.identity_dir, "Dev");
        assert_eq!(path.company_size_dir, "50-100");
        assert_eq!(path.experience_dir, "1-3");
        assert_eq!(path.filename, "Dev  1-3  Backend Developer  50-100.png");
        assert_eq!(
            path.file(Path::new("charts_grouped")),
            PathBuf::from("charts_grouped/Dev/50-100/1-3/Dev  1-3  Backend Developer  50-100.png")
        );
    }

    #[test]
    fn test_long_key_filename() {
        let key = format!("Dev | 1-3 | {} | 50-100", "Yazılım ".repeat(20));
        let path = build_path(&key, "undefined");

        let stem = path.filename.strip_suffix(".png").unwrap();
        assert_eq!(stem.chars().count(), 100);
        assert_eq!(path.filename.chars().count(), 104);
    }

    #[test]
    fn test_split_is_lossy_with_embedded_delimiter() {
        // "A | B" as identity shifts every following field
        let path = build_path("A | B | 1-3 | Dev | 50-100", "undefined");
        assert_eq!(path.identity_dir, "A");
        assert_eq!(path.experience_dir, "B");
        assert_eq!(path.company_size_dir, "Dev");
    }
}
