/// Manual export to and import from a JSON backup file

use crate::snapshot::Snapshot;
use crate::storage::{LINKS_KEY, TOPICS_KEY};
use serde_json::Value;
use thiserror::Error;

pub const EXPORT_FILENAME: &str = "link_organizer_backup.json";

/// Why an uploaded backup file was rejected. State is never touched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read the selected file: {0}")]
    Read(String),

    #[error("Failed to parse the backup file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid backup file: expected a JSON object")]
    NotAnObject,

    #[error("Invalid backup file: missing \"{0}\"")]
    MissingField(&'static str),

    #[error("Invalid backup file: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Serialize the full snapshot as UTF-8 JSON text for download
pub fn export_json(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// Validate an uploaded backup and turn it into a snapshot
///
/// Algorithm:
/// 1. Parse as JSON → `Parse` on failure
/// 2. Require an object with both `topics` and `links` present
/// 3. Require `topics` to be a list of strings and `links` a mapping of
///    topic to list of strings → `Malformed` otherwise
pub fn parse_import(text: &str) -> Result<Snapshot, ImportError> {
    let value: Value = serde_json::from_str(text)?;

    let Value::Object(fields) = &value else {
        return Err(ImportError::NotAnObject);
    };
    for field in [TOPICS_KEY, LINKS_KEY] {
        if !fields.contains_key(field) {
            return Err(ImportError::MissingField(field));
        }
    }

    serde_json::from_value(value).map_err(ImportError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.topics = vec!["Games".to_string(), "Reading".to_string()];
        snapshot.links.insert(
            "Games".to_string(),
            vec![
                "https://store.steampowered.com".to_string(),
                "https://www.epicgames.com/store".to_string(),
            ],
        );
        snapshot.links.insert("Reading".to_string(), Vec::new());
        snapshot
    }

    #[test]
    fn test_export_then_import_is_identity() {
        let snapshot = create_test_snapshot();

        let json = export_json(&snapshot).unwrap();
        let imported = parse_import(&json).unwrap();

        assert_eq!(imported, snapshot);
    }

    #[test]
    fn test_export_shape() {
        let json = export_json(&create_test_snapshot()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["topics"][1], "Reading");
        assert_eq!(value["links"]["Games"][1], "https://www.epicgames.com/store");
    }

    #[test]
    fn test_import_missing_links() {
        let result = parse_import(r#"{"topics": [1, 2, 3]}"#);

        assert!(matches!(result, Err(ImportError::MissingField("links"))));
        assert!(result.unwrap_err().to_string().starts_with("Invalid backup file"));
    }

    #[test]
    fn test_import_missing_topics() {
        let result = parse_import(r#"{"links": {}}"#);

        assert!(matches!(result, Err(ImportError::MissingField("topics"))));
    }

    #[test]
    fn test_import_unparseable() {
        let result = parse_import("{ not json");

        assert!(matches!(result, Err(ImportError::Parse(_))));
        assert!(result.unwrap_err().to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn test_import_not_an_object() {
        assert!(matches!(parse_import("[1, 2]"), Err(ImportError::NotAnObject)));
    }

    #[test]
    fn test_import_wrong_types() {
        let result = parse_import(r#"{"topics": [1, 2, 3], "links": {}}"#);

        assert!(matches!(result, Err(ImportError::Malformed(_))));
    }

    #[test]
    fn test_import_ignores_extra_fields() {
        let imported = parse_import(r#"{"topics": ["A"], "links": {"A": []}, "version": 2}"#).unwrap();

        assert_eq!(imported.topics, vec!["A".to_string()]);
    }
}
