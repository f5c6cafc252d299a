use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::app::config::DEFAULT_MODEL;

// Indexed file as returned by /api/files, /api/search and /api/files/{id}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: i64,
    pub filename: String,
    pub path: String,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    // Comma-joined tag names (GROUP_CONCAT on the server)
    #[serde(default)]
    pub tags: Option<String>,
}

impl FileInfo {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "tag_name")]
    pub name: String,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub files: u64,
    #[serde(default)]
    pub tags: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OllamaStatus {
    #[serde(default)]
    pub installed: bool,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub models: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IndexingStatus {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub current_file: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub paths: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub ollama: OllamaStatus,
    #[serde(default)]
    pub indexing: IndexingStatus,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Settings as stored by the server: every value is a string.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsWire {
    #[serde(default)]
    pub auto_tag: Option<String>,
    #[serde(default)]
    pub auto_summarize: Option<String>,
    #[serde(default)]
    pub ollama_model: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub auto_tag: bool,
    pub auto_summarize: bool,
    pub ollama_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_tag: false,
            auto_summarize: false,
            ollama_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl From<SettingsWire> for Settings {
    fn from(wire: SettingsWire) -> Self {
        let model = wire
            .ollama_model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            auto_tag: wire.auto_tag.as_deref() == Some("true"),
            auto_summarize: wire.auto_summarize.as_deref() == Some("true"),
            ollama_model: model,
        }
    }
}

impl Settings {
    pub fn to_wire(&self) -> SaveSettingsArgs {
        SaveSettingsArgs {
            auto_tag: flag(self.auto_tag),
            auto_summarize: flag(self.auto_summarize),
            ollama_model: self.ollama_model.clone(),
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[derive(Debug, Serialize)]
pub struct SaveSettingsArgs {
    pub auto_tag: &'static str,
    pub auto_summarize: &'static str,
    pub ollama_model: String,
}

#[derive(Debug, Serialize)]
pub struct SearchArgs<'a> {
    pub query: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ScanArgs<'a> {
    pub folder: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PullModelArgs<'a> {
    pub model: &'a str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorizeArgs {
    pub file_ids: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MoveArgs {
    pub file_ids: Vec<i64>,
    pub category: String,
    pub destination_root: String,
}

/// Filters accepted by `GET /api/files`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileQuery {
    pub limit: usize,
    pub tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub results: Option<Vec<FileInfo>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategorizedFile {
    pub file_id: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BatchError {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MovedFile {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CategorizeResponse {
    #[serde(default)]
    pub categorized: Vec<CategorizedFile>,
    #[serde(default)]
    pub errors: Vec<BatchError>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MoveResponse {
    #[serde(default)]
    pub moved: Vec<MovedFile>,
    #[serde(default)]
    pub errors: Vec<BatchError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_decodes_with_null_optionals() {
        let file: FileInfo = serde_json::from_value(serde_json::json!({
            "id": 7,
            "filename": "notes.txt",
            "path": "/home/a/notes.txt",
            "extension": ".txt",
            "size": null,
            "modified_date": "2024-05-01 10:00:00",
            "summary": null,
            "tags": null,
            "file_hash": "abc"
        }))
        .unwrap();
        assert_eq!(file.id, 7);
        assert_eq!(file.size, None);
        assert!(file.tag_list().is_empty());
    }

    #[test]
    fn tag_list_splits_and_trims() {
        let file = FileInfo {
            id: 1,
            filename: "a".into(),
            path: "/a".into(),
            extension: None,
            size: Some(1),
            modified_date: None,
            summary: None,
            tags: Some("work, invoice,,2024".into()),
        };
        assert_eq!(file.tag_list(), vec!["work", "invoice", "2024"]);
    }

    #[test]
    fn settings_read_string_flags() {
        let wire: SettingsWire = serde_json::from_value(serde_json::json!({
            "auto_tag": "true",
            "auto_summarize": "yes",
            "scan_folders": "[]"
        }))
        .unwrap();
        let settings = Settings::from(wire);
        assert!(settings.auto_tag);
        assert!(!settings.auto_summarize);
        assert_eq!(settings.ollama_model, DEFAULT_MODEL);
    }

    #[test]
    fn saved_settings_use_string_booleans() {
        let settings = Settings {
            auto_tag: true,
            auto_summarize: false,
            ollama_model: "llama3.2:1b".into(),
        };
        let body = serde_json::to_value(settings.to_wire()).unwrap();
        assert_eq!(body["auto_tag"], serde_json::json!("true"));
        assert_eq!(body["auto_summarize"], serde_json::json!("false"));
        assert_eq!(body["ollama_model"], serde_json::json!("llama3.2:1b"));
    }

    #[test]
    fn status_tolerates_missing_paths() {
        let snapshot: StatusSnapshot = serde_json::from_value(serde_json::json!({
            "stats": {"files": 3, "tags": 2},
            "ollama": {"installed": true, "running": false, "models": []},
            "indexing": {"active": false, "progress": 0, "total": 0, "current_file": ""}
        }))
        .unwrap();
        assert_eq!(snapshot.stats.files, 3);
        assert!(snapshot.paths.is_none());
        assert!(snapshot.ollama.installed);
    }
}
