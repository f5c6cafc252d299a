//! Pure projections from view-model data to view descriptions. Components in
//! `components/` apply these to the page; nothing here touches the DOM.

use crate::app::types::{FileInfo, StatusSnapshot, TagInfo};
use crate::app::utils::{format_bytes, format_date};

pub const EMPTY_FILES: &str = "No files yet. Start a scan.";
pub const EMPTY_TAG_CLOUD: &str = "Index some files to see tags.";
pub const EMPTY_TAG_EXPLORER: &str = "No tags yet.";
pub const SEARCHING: &str = "Searching…";
pub const NO_MATCHES: &str = "No matches";
pub const SEARCH_FAILED: &str = "Search failed";
pub const IDLE_PROGRESS: &str = "Start a scan to populate results";

#[derive(Clone, Debug, PartialEq)]
pub struct FileRow {
    pub id: i64,
    pub title: String,
    pub path: String,
    pub meta: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub selectable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListView {
    Empty(&'static str),
    Rows(Vec<FileRow>),
}

pub fn project_file_list(files: &[FileInfo], selectable: bool) -> ListView {
    if files.is_empty() {
        return ListView::Empty(EMPTY_FILES);
    }
    ListView::Rows(files.iter().map(|f| project_file_row(f, selectable)).collect())
}

pub fn project_file_row(file: &FileInfo, selectable: bool) -> FileRow {
    FileRow {
        id: file.id,
        title: file.filename.clone(),
        path: file.path.clone(),
        meta: format!(
            "{} • {}",
            format_bytes(file.size.unwrap_or(0)),
            format_date(file.modified_date.as_deref())
        ),
        summary: file.summary.clone().filter(|s| !s.is_empty()),
        tags: file.tag_list(),
        selectable,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TagChip {
    pub name: String,
    pub label: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TagPanel {
    Placeholder(&'static str),
    Chips(Vec<TagChip>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TagPanels {
    pub cloud: TagPanel,
    pub explorer: TagPanel,
}

pub fn project_tags(tags: &[TagInfo], limit: usize) -> TagPanels {
    if tags.is_empty() {
        return TagPanels {
            cloud: TagPanel::Placeholder(EMPTY_TAG_CLOUD),
            explorer: TagPanel::Placeholder(EMPTY_TAG_EXPLORER),
        };
    }
    let chips: Vec<TagChip> = tags
        .iter()
        .take(limit)
        .map(|t| TagChip {
            name: t.name.clone(),
            label: format!("{} ({})", t.name, t.usage_count),
            color: t.color.clone(),
        })
        .collect();
    TagPanels {
        cloud: TagPanel::Chips(chips.clone()),
        explorer: TagPanel::Chips(chips),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressBar {
    pub label: String,
    pub percent: u64,
}

/// Text for every status element. Keeps the last applied values, so a failed
/// poll leaves the display stale but visible.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusView {
    pub files: String,
    pub tags: String,
    pub pill_files: String,
    pub pill_tags: String,
    pub home_path: String,
    pub ollama: String,
    pub models: String,
    pub pill_ollama: String,
    pub sidebar_ollama: String,
    pub index: String,
    pub progress: String,
    pub sidebar_indexing: String,
    pub bar: Option<ProgressBar>,
    pub platform: String,
}

impl Default for StatusView {
    fn default() -> Self {
        Self {
            files: "0".to_string(),
            tags: "0".to_string(),
            pill_files: "Files: 0".to_string(),
            pill_tags: "Tags: 0".to_string(),
            home_path: String::new(),
            ollama: "Checking…".to_string(),
            models: String::new(),
            pill_ollama: "Ollama: …".to_string(),
            sidebar_ollama: "Ollama • …".to_string(),
            index: "Idle".to_string(),
            progress: IDLE_PROGRESS.to_string(),
            sidebar_indexing: "Indexing • Idle".to_string(),
            bar: None,
            platform: String::new(),
        }
    }
}

impl StatusView {
    pub fn apply(&mut self, snapshot: &StatusSnapshot) {
        let stats = &snapshot.stats;
        self.files = stats.files.to_string();
        self.tags = stats.tags.to_string();
        self.pill_files = format!("Files: {}", stats.files);
        self.pill_tags = format!("Tags: {}", stats.tags);
        self.home_path = snapshot
            .paths
            .as_ref()
            .and_then(|p| p.get("home").cloned())
            .unwrap_or_default();

        let ollama = &snapshot.ollama;
        self.ollama = if ollama.running { "Running" } else { "Not Running" }.to_string();
        self.models = if ollama.models.is_empty() {
            "Models: none detected".to_string()
        } else {
            format!("Models: {}", ollama.models.join(", "))
        };
        self.pill_ollama = format!("Ollama: {}", if ollama.running { "Running" } else { "Not running" });
        self.sidebar_ollama = if ollama.running { "Ollama • Running" } else { "Ollama • Offline" }.to_string();

        let indexing = &snapshot.indexing;
        self.index = if indexing.active { "Indexing…" } else { "Idle" }.to_string();
        self.progress = if indexing.active {
            format!("{} / {} • {}", indexing.progress, indexing.total, indexing.current_file)
        } else {
            IDLE_PROGRESS.to_string()
        };
        self.sidebar_indexing = if indexing.active { "Indexing • Active" } else { "Indexing • Idle" }.to_string();

        // Bar only moves while there is something to count
        if indexing.total > 0 {
            let percent = (indexing.progress as f64 / indexing.total as f64 * 100.0).round() as u64;
            let label = if indexing.active {
                format!("Indexing {}%", percent)
            } else {
                "Complete".to_string()
            };
            self.bar = Some(ProgressBar { label, percent });
        }

        self.platform = snapshot.platform.clone().unwrap_or_default();
    }

    /// Label shown right after a scan was accepted, until the next poll.
    pub fn mark_scan_started(&mut self) {
        let percent = self.bar.as_ref().map(|b| b.percent).unwrap_or(0);
        self.bar = Some(ProgressBar {
            label: "Indexing…".to_string(),
            percent,
        });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchView {
    Idle,
    Searching,
    NoMatches,
    Failed,
    Results(ListView),
}

impl SearchView {
    pub fn from_results(files: &[FileInfo]) -> Self {
        if files.is_empty() {
            SearchView::NoMatches
        } else {
            SearchView::Results(project_file_list(files, false))
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchView::Idle | SearchView::Results(_) => None,
            SearchView::Searching => Some(SEARCHING),
            SearchView::NoMatches => Some(NO_MATCHES),
            SearchView::Failed => Some(SEARCH_FAILED),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
    Loading(i64),
    File(FileRow),
    Missing(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct OllamaTestView {
    pub text: String,
    pub class: &'static str,
}

impl OllamaTestView {
    pub fn testing() -> Self {
        Self {
            text: "Testing…".to_string(),
            class: "helper-text",
        }
    }

    pub fn from_status(running: bool, models: &[String]) -> Self {
        if running {
            let models = if models.is_empty() {
                "none".to_string()
            } else {
                models.join(", ")
            };
            Self {
                text: format!("✅ Ollama running. Models: {}", models),
                class: "helper-text success",
            }
        } else {
            Self {
                text: "❌ Ollama not reachable. Start the Ollama service.".to_string(),
                class: "helper-text error",
            }
        }
    }
}

pub fn categorize_feedback(tagged: usize, errors: usize) -> String {
    if errors > 0 {
        format!("Tagged {} files, {} errors.", tagged, errors)
    } else {
        format!("Tagged {} files.", tagged)
    }
}

pub fn move_feedback(moved: usize, errors: usize) -> String {
    if errors > 0 {
        format!("Moved {} files, {} errors.", moved, errors)
    } else {
        format!("Moved {} files.", moved)
    }
}

/// Idle label of a model's pull button: `llama3.2:3b` -> `Pull 3B`.
pub fn pull_button_label(model: &str) -> String {
    let variant = model.split_once(':').map(|(_, v)| v).unwrap_or(model);
    format!("Pull {}", variant.to_uppercase())
}
