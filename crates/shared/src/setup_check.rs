//! Setup-completion predicate over the private configuration file.
//!
//! The private configuration is a text template of `KEY: value,` assignments.
//! An installation counts as configured only when the file exists and the
//! secret key, database host and database name are all present and not bound
//! to an empty string literal.
//!
//! Both the CMS request gate and the setup wizard landing route call into this
//! module so that they always agree on what "configured" means.

use regex::Regex;
use std::fmt;
use std::io;
use std::path::Path;

/// Fields that must be present and non-empty for setup to count as complete.
pub const REQUIRED_FIELDS: [&str; 3] = ["JWT_SECRET_KEY", "DB_HOST", "DB_NAME"];

lazy_static::lazy_static! {
    static ref EMPTY_FIELD_PATTERNS: Vec<(&'static str, Regex)> = REQUIRED_FIELDS
        .iter()
        .map(|field| {
            let pattern = format!(r#"{}:\s*['"]{{2}}\s*[,}}]"#, regex::escape(field));
            (*field, Regex::new(&pattern).unwrap())
        })
        .collect();
}

/// Outcome of inspecting the private configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupStatus {
    /// All required fields are present and non-empty.
    Complete,
    /// The configuration file does not exist.
    Missing,
    /// The file exists but at least one required field is absent or empty.
    Incomplete { missing_fields: Vec<&'static str> },
    /// The file exists but could not be read.
    Unreadable { reason: String },
}

impl SetupStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, SetupStatus::Complete)
    }

    /// Short machine-readable label, used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            SetupStatus::Complete => "complete",
            SetupStatus::Missing => "missing",
            SetupStatus::Incomplete { .. } => "incomplete",
            SetupStatus::Unreadable { .. } => "unreadable",
        }
    }
}

impl fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupStatus::Complete => write!(f, "setup complete"),
            SetupStatus::Missing => write!(f, "config file missing"),
            SetupStatus::Incomplete { missing_fields } => {
                write!(f, "config has empty values: {}", missing_fields.join(", "))
            }
            SetupStatus::Unreadable { reason } => write!(f, "config unreadable: {}", reason),
        }
    }
}

/// Returns the required fields that are absent or bound to `''` / `""`.
pub fn missing_required_fields(content: &str) -> Vec<&'static str> {
    EMPTY_FIELD_PATTERNS
        .iter()
        .filter(|(field, empty)| !content.contains(field) || empty.is_match(content))
        .map(|(field, _)| *field)
        .collect()
}

/// Evaluates already-read configuration text.
pub fn evaluate_config_text(content: &str) -> SetupStatus {
    let missing_fields = missing_required_fields(content);
    if missing_fields.is_empty() {
        SetupStatus::Complete
    } else {
        SetupStatus::Incomplete { missing_fields }
    }
}

/// Inspects the private configuration file at `path`.
///
/// Never caches; every call reads the file again. Invalid UTF-8 is decoded
/// lossily, so only I/O failures yield [`SetupStatus::Unreadable`], which is
/// never treated as complete.
pub fn check_setup(path: &Path) -> SetupStatus {
    match std::fs::read(path) {
        Ok(bytes) => evaluate_config_text(&String::from_utf8_lossy(&bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => SetupStatus::Missing,
        Err(err) => SetupStatus::Unreadable {
            reason: err.to_string(),
        },
    }
}

/// Boolean form of [`check_setup`].
pub fn is_setup_complete(path: &Path) -> bool {
    check_setup(path).is_complete()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FILLED: &str = r#"export const privateEnv = createPrivateConfig({
	DB_TYPE: 'mongodb',
	DB_HOST: 'localhost',
	DB_PORT: 27017,
	DB_NAME: 'sveltycms',
	JWT_SECRET_KEY: 'abc123',
	MULTI_TENANT: false
});
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_all_fields_filled_is_complete() {
        assert_eq!(evaluate_config_text(FILLED), SetupStatus::Complete);
    }

    #[test]
    fn test_single_quoted_empty_secret() {
        let content = FILLED.replace("'abc123'", "''");
        assert_eq!(
            evaluate_config_text(&content),
            SetupStatus::Incomplete {
                missing_fields: vec!["JWT_SECRET_KEY"]
            }
        );
    }

    #[test]
    fn test_double_quoted_empty_host() {
        let content = FILLED.replace("'localhost'", "\"\"");
        assert_eq!(missing_required_fields(&content), vec!["DB_HOST"]);
    }

    #[test]
    fn test_empty_value_before_closing_brace() {
        let content = "{ JWT_SECRET_KEY: 'x', DB_HOST: 'h', DB_NAME: '' }";
        assert_eq!(missing_required_fields(content), vec!["DB_NAME"]);
    }

    #[test]
    fn test_whitespace_between_quotes_and_terminator() {
        let content = "JWT_SECRET_KEY: ''  ,\nDB_HOST: 'h',\nDB_NAME: 'n',";
        assert_eq!(missing_required_fields(content), vec!["JWT_SECRET_KEY"]);
    }

    #[test]
    fn test_absent_field_is_missing() {
        let content = "DB_HOST: 'localhost',\nDB_NAME: 'sveltycms',";
        assert_eq!(missing_required_fields(content), vec!["JWT_SECRET_KEY"]);
    }

    #[test]
    fn test_all_fields_empty() {
        let content = "JWT_SECRET_KEY: '',\nDB_HOST: \"\",\nDB_NAME: '',";
        assert_eq!(missing_required_fields(content), REQUIRED_FIELDS.to_vec());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private.ts");
        assert_eq!(check_setup(&path), SetupStatus::Missing);
        assert!(!is_setup_complete(&path));
    }

    #[test]
    fn test_check_setup_reads_file() {
        let file = write_config(FILLED);
        assert!(is_setup_complete(file.path()));
    }

    #[test]
    fn test_check_setup_is_idempotent() {
        let file = write_config(&FILLED.replace("'sveltycms'", "''"));
        let first = check_setup(file.path());
        let second = check_setup(file.path());
        assert_eq!(first, second);
        assert!(!first.is_complete());
    }

    #[test]
    fn test_non_utf8_bytes_are_decoded_lossily() {
        let mut content = FILLED
            .replace("\tMULTI_TENANT", "\tDB_PASSWORD: 'caf?',\n\tMULTI_TENANT")
            .into_bytes();
        let pos = content.iter().position(|&b| b == b'?').unwrap();
        content[pos] = 0xE9;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&content).unwrap();

        assert_eq!(check_setup(file.path()), SetupStatus::Complete);
    }

    #[test]
    fn test_non_utf8_with_empty_field_is_incomplete() {
        let mut content = FILLED.replace("'localhost'", "''").into_bytes();
        content.push(0xFF);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&content).unwrap();

        assert_eq!(
            check_setup(file.path()),
            SetupStatus::Incomplete {
                missing_fields: vec!["DB_HOST"]
            }
        );
    }

    #[test]
    fn test_directory_is_unreadable_not_complete() {
        let dir = tempfile::tempdir().unwrap();
        let status = check_setup(dir.path());
        assert!(matches!(status, SetupStatus::Unreadable { .. }));
        assert!(!status.is_complete());
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(SetupStatus::Complete.reason(), "complete");
        assert_eq!(SetupStatus::Missing.reason(), "missing");
        assert_eq!(
            SetupStatus::Incomplete {
                missing_fields: vec!["DB_HOST"]
            }
            .reason(),
            "incomplete"
        );
    }

    #[test]
    fn test_display_lists_fields() {
        let status = SetupStatus::Incomplete {
            missing_fields: vec!["DB_HOST", "DB_NAME"],
        };
        assert_eq!(status.to_string(), "config has empty values: DB_HOST, DB_NAME");
    }
}
