use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core_api::{CoreError, CoreErrorCode};

#[derive(Debug, Deserialize)]
struct UsercacheEntry {
    uuid: Option<String>,
    name: Option<String>,
}

/// UUID to player name lookup built from the server's `usercache.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usercache {
    names: HashMap<String, String>,
    source_entries: usize,
}

impl Usercache {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path)
            .map_err(|e| CoreError::from_io(&e, "failed to read usercache file", path))?;
        Self::from_json_str(&text).map_err(|e| {
            CoreError::new(e.code, format!("usercache {}: {}", path.display(), e.message))
        })
    }

    /// Entries without a non-empty `uuid` and `name` are left out of the lookup
    /// but still count towards `source_entries`.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let entries: Vec<UsercacheEntry> = serde_json::from_str(text).map_err(|e| {
            CoreError::new(
                CoreErrorCode::MalformedJson,
                format!("expected an array of {{uuid, name}} records: {e}"),
            )
        })?;

        let source_entries = entries.len();
        let mut names = HashMap::with_capacity(source_entries);
        for entry in entries {
            match (entry.uuid, entry.name) {
                (Some(uuid), Some(name)) if !uuid.is_empty() && !name.is_empty() => {
                    names.insert(uuid, name);
                }
                _ => {}
            }
        }

        Ok(Self {
            names,
            source_entries,
        })
    }

    pub fn get(&self, uuid: &str) -> Option<&str> {
        self.names.get(uuid).map(String::as_str)
    }

    /// Like `get`, but a missing UUID is an error.
    pub fn resolve(&self, uuid: &str) -> Result<&str, CoreError> {
        self.get(uuid).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::MissingLookupKey,
                format!("player {uuid} is not present in the usercache"),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn source_entries(&self) -> usize {
        self.source_entries
    }

    /// Fails when any source entry was skipped or collapsed into another.
    pub fn ensure_complete(&self) -> Result<(), CoreError> {
        if self.names.len() == self.source_entries {
            return Ok(());
        }
        Err(CoreError::new(
            CoreErrorCode::UsercacheIncomplete,
            format!(
                "usercache preparation failed: {} of {} entries usable",
                self.names.len(),
                self.source_entries
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_entries_missing_fields() {
        let cache = Usercache::from_json_str(
            r#"[
                {"uuid": "a", "name": "Alex"},
                {"uuid": "b"},
                {"name": "Nobody"},
                {"uuid": "", "name": "Blank"}
            ]"#,
        )
        .unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.source_entries(), 4);
        assert_eq!(cache.get("a"), Some("Alex"));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn duplicate_uuid_keeps_last_name_and_fails_integrity() {
        let cache = Usercache::from_json_str(
            r#"[{"uuid": "a", "name": "Old"}, {"uuid": "a", "name": "New"}]"#,
        )
        .unwrap();

        assert_eq!(cache.get("a"), Some("New"));
        let err = cache.ensure_complete().unwrap_err();
        assert_eq!(err.code, CoreErrorCode::UsercacheIncomplete);
    }

    #[test]
    fn ignores_expiry_field() {
        let cache = Usercache::from_json_str(
            r#"[{"name":"Steve","uuid":"u1","expiresOn":"2024-01-01 00:00:00 +0000"}]"#,
        )
        .unwrap();
        assert!(cache.ensure_complete().is_ok());
        assert_eq!(cache.resolve("u1").unwrap(), "Steve");
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = Usercache::from_json_str(r#"{"uuid": "a", "name": "Alex"}"#).unwrap_err();
        assert_eq!(err.code, CoreErrorCode::MalformedJson);
    }

    #[test]
    fn resolve_reports_missing_uuid() {
        let cache = Usercache::default();
        let err = cache.resolve("ghost").unwrap_err();
        assert_eq!(err.code, CoreErrorCode::MissingLookupKey);
        assert!(err.message.contains("ghost"));
    }
}
