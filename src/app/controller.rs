use crate::app::api::Backend;
use crate::app::config::ClientConfig;
use crate::app::error::{ApiError, ValidationError};
use crate::app::logging;
use crate::app::render::{
    categorize_feedback, move_feedback, project_file_row, DetailView, OllamaTestView, SearchView,
};
use crate::app::types::*;

pub const TAGGING: &str = "Tagging with Ollama…";
pub const MOVING: &str = "Moving files…";
pub const BATCH_FAILED: &str = "Batch request failed";

pub async fn load_files<B: Backend>(api: &B, config: &ClientConfig) -> Result<Vec<FileInfo>, ApiError> {
    let query = FileQuery {
        limit: config.page_size,
        ..FileQuery::default()
    };
    api.files(&query).await
}

pub async fn load_files_by_tag<B: Backend>(
    api: &B,
    config: &ClientConfig,
    tag: &str,
) -> Result<Vec<FileInfo>, ApiError> {
    let query = FileQuery {
        limit: config.page_size,
        tag: Some(tag.to_string()),
    };
    api.files(&query).await
}

pub async fn load_file_detail<B: Backend>(api: &B, id: i64) -> DetailView {
    match api.file_detail(id).await {
        Ok(file) => DetailView::File(project_file_row(&file, false)),
        Err(e) => DetailView::Missing(e.to_string()),
    }
}

/// Trimmed query, or `None` when there is nothing to search for.
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim();
    (!query.is_empty()).then(|| query.to_string())
}

/// Runs a search for an already normalized query. Failures become the fixed
/// failure view instead of propagating.
pub async fn search<B: Backend>(api: &B, query: &str) -> SearchView {
    match api.search(query).await {
        Ok(files) => SearchView::from_results(&files),
        Err(e) => {
            logging::error(&format!("Search error: {}", e));
            SearchView::Failed
        }
    }
}

fn validate_categorize(selected: Vec<i64>) -> Result<CategorizeArgs, ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NoSelection);
    }
    Ok(CategorizeArgs { file_ids: selected })
}

fn validate_move(selected: Vec<i64>, category: &str, destination: &str) -> Result<MoveArgs, ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NoSelection);
    }
    let category = category.trim();
    let destination = destination.trim();
    if category.is_empty() || destination.is_empty() {
        return Err(ValidationError::MissingMoveTarget);
    }
    Ok(MoveArgs {
        file_ids: selected,
        category: category.to_string(),
        destination_root: destination.to_string(),
    })
}

/// Feedback line for a finished categorize call.
async fn categorize<B: Backend>(api: &B, args: &CategorizeArgs) -> String {
    match api.categorize(args).await {
        Ok(reply) => categorize_feedback(reply.categorized.len(), reply.errors.len()),
        Err(e) => {
            logging::error(&format!("Categorize error: {}", e));
            BATCH_FAILED.to_string()
        }
    }
}

/// Feedback line for a finished move call.
async fn move_files<B: Backend>(api: &B, args: &MoveArgs) -> String {
    match api.move_files(args).await {
        Ok(reply) => move_feedback(reply.moved.len(), reply.errors.len()),
        Err(e) => {
            logging::error(&format!("Move error: {}", e));
            BATCH_FAILED.to_string()
        }
    }
}

/// Categorizes the selected files. An empty selection is rejected before any
/// request; `on_start` runs once the request is about to go out.
pub async fn categorize_selection<B: Backend>(
    api: &B,
    selected: Vec<i64>,
    on_start: impl FnOnce(),
) -> Result<String, ValidationError> {
    let args = validate_categorize(selected)?;
    on_start();
    Ok(categorize(api, &args).await)
}

pub async fn move_selection<B: Backend>(
    api: &B,
    selected: Vec<i64>,
    category: &str,
    destination: &str,
    on_start: impl FnOnce(),
) -> Result<String, ValidationError> {
    let args = validate_move(selected, category, destination)?;
    on_start();
    Ok(move_files(api, &args).await)
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScanOutcome {
    Started,
    Rejected(String),
}

pub fn validate_folder(raw: &str) -> Result<String, ValidationError> {
    let folder = raw.trim();
    if folder.is_empty() {
        return Err(ValidationError::MissingFolder);
    }
    Ok(folder.to_string())
}

pub async fn start_scan<B: Backend>(api: &B, folder: &str) -> ScanOutcome {
    match api.scan(folder).await {
        Ok(reply) if reply.status.as_deref() == Some("started") => ScanOutcome::Started,
        Ok(reply) => ScanOutcome::Rejected(reply.error.unwrap_or_else(|| "Scan was not started".to_string())),
        Err(e) => ScanOutcome::Rejected(e.to_string()),
    }
}

pub async fn pull_model<B: Backend>(api: &B, model: &str) -> &'static str {
    match api.pull_model(model).await {
        Ok(true) => "Started",
        Ok(false) => "Failed",
        Err(e) => {
            logging::error(&format!("Pull error: {}", e));
            "Failed"
        }
    }
}

pub async fn test_ollama<B: Backend>(api: &B) -> OllamaTestView {
    match api.status().await {
        Ok(snapshot) => OllamaTestView::from_status(snapshot.ollama.running, &snapshot.ollama.models),
        Err(_) => OllamaTestView::from_status(false, &[]),
    }
}

pub async fn save_settings<B: Backend>(api: &B, settings: &Settings) -> Result<bool, ApiError> {
    api.save_settings(settings).await
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;

    // Records every call and answers from canned data; `fail` makes every call
    // error out like a rejected fetch.
    #[derive(Default)]
    struct MockBackend {
        calls: RefCell<Vec<String>>,
        files: Vec<FileInfo>,
        tags: Vec<TagInfo>,
        categorize_reply: CategorizeResponse,
        move_reply: MoveResponse,
        scan_reply: ScanResponse,
        status_reply: StatusSnapshot,
        saved: RefCell<Option<Settings>>,
        fail: bool,
    }

    impl MockBackend {
        fn record(&self, call: impl Into<String>) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call.into());
            if self.fail {
                Err(ApiError::Network("connection refused".into()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Backend for MockBackend {
        async fn status(&self) -> Result<StatusSnapshot, ApiError> {
            self.record("status")?;
            Ok(self.status_reply.clone())
        }

        async fn files(&self, query: &FileQuery) -> Result<Vec<FileInfo>, ApiError> {
            self.record(format!("files limit={} tag={:?}", query.limit, query.tag))?;
            Ok(self.files.clone())
        }

        async fn file_detail(&self, id: i64) -> Result<FileInfo, ApiError> {
            self.record(format!("detail {}", id))?;
            self.files
                .iter()
                .find(|f| f.id == id)
                .cloned()
                .ok_or_else(|| ApiError::Server("File not found".into()))
        }

        async fn tags(&self) -> Result<Vec<TagInfo>, ApiError> {
            self.record("tags")?;
            Ok(self.tags.clone())
        }

        async fn settings(&self) -> Result<Settings, ApiError> {
            self.record("settings")?;
            Ok(Settings::default())
        }

        async fn save_settings(&self, settings: &Settings) -> Result<bool, ApiError> {
            self.record("save_settings")?;
            *self.saved.borrow_mut() = Some(settings.clone());
            Ok(true)
        }

        async fn search(&self, query: &str) -> Result<Vec<FileInfo>, ApiError> {
            self.record(format!("search {}", query))?;
            Ok(self.files.clone())
        }

        async fn scan(&self, folder: &str) -> Result<ScanResponse, ApiError> {
            self.record(format!("scan {}", folder))?;
            Ok(self.scan_reply.clone())
        }

        async fn pull_model(&self, model: &str) -> Result<bool, ApiError> {
            self.record(format!("pull {}", model))?;
            Ok(true)
        }

        async fn categorize(&self, args: &CategorizeArgs) -> Result<CategorizeResponse, ApiError> {
            self.record(format!("categorize {:?}", args.file_ids))?;
            Ok(self.categorize_reply.clone())
        }

        async fn move_files(&self, args: &MoveArgs) -> Result<MoveResponse, ApiError> {
            self.record(format!("move {:?} {} {}", args.file_ids, args.category, args.destination_root))?;
            Ok(self.move_reply.clone())
        }
    }

    fn file(id: i64) -> FileInfo {
        FileInfo {
            id,
            filename: format!("f{}.md", id),
            path: format!("/notes/f{}.md", id),
            extension: Some(".md".into()),
            size: Some(100),
            modified_date: None,
            summary: None,
            tags: None,
        }
    }

    #[test]
    fn empty_selection_never_reaches_the_server() {
        let api = MockBackend::default();
        let started = Cell::new(false);

        let categorized = block_on(categorize_selection(&api, Vec::new(), || started.set(true)));
        assert_eq!(categorized, Err(ValidationError::NoSelection));

        let moved = block_on(move_selection(&api, Vec::new(), "Invoices", "/archive", || started.set(true)));
        assert_eq!(moved, Err(ValidationError::NoSelection));

        assert!(api.calls().is_empty());
        assert!(!started.get());
    }

    #[test]
    fn incomplete_move_target_never_reaches_the_server() {
        let api = MockBackend::default();
        let moved = block_on(move_selection(&api, vec![1], " ", "/archive", || {}));
        assert_eq!(moved, Err(ValidationError::MissingMoveTarget));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn selection_is_sent_once_validated() {
        let api = MockBackend::default();
        let started = Cell::new(false);
        let feedback = block_on(categorize_selection(&api, vec![3, 1], || started.set(true)));
        assert_eq!(feedback, Ok("Tagged 0 files.".to_string()));
        assert!(started.get());
        assert_eq!(api.calls(), vec!["categorize [3, 1]"]);

        let feedback = block_on(move_selection(&api, vec![3], "Invoices", "/archive", || {}));
        assert_eq!(feedback, Ok("Moved 0 files.".to_string()));
        assert_eq!(api.calls().last().map(String::as_str), Some("move [3] Invoices /archive"));
    }

    #[test]
    fn move_needs_category_and_destination() {
        assert_eq!(validate_move(vec![1], "  ", "/archive"), Err(ValidationError::MissingMoveTarget));
        assert_eq!(validate_move(vec![1], "Invoices", ""), Err(ValidationError::MissingMoveTarget));
        let args = validate_move(vec![1, 2], " Invoices ", " /archive ").unwrap();
        assert_eq!(args.category, "Invoices");
        assert_eq!(args.destination_root, "/archive");
    }

    #[test]
    fn move_summary_counts_partial_failures() {
        let api = MockBackend {
            move_reply: MoveResponse {
                moved: vec![MovedFile {
                    from: "/a".into(),
                    to: "/archive/Invoices/a".into(),
                }],
                errors: vec![BatchError {
                    file: "/b".into(),
                    error: "File not found on disk".into(),
                }],
            },
            ..MockBackend::default()
        };
        let args = validate_move(vec![1, 2], "Invoices", "/archive").unwrap();
        let feedback = block_on(move_files(&api, &args));
        assert_eq!(feedback, "Moved 1 files, 1 errors.");
        assert_eq!(api.calls(), vec!["move [1, 2] Invoices /archive"]);
    }

    #[test]
    fn categorize_summary() {
        let api = MockBackend {
            categorize_reply: CategorizeResponse {
                categorized: vec![
                    CategorizedFile {
                        file_id: 1,
                        tags: vec!["work".into()],
                        summary: None,
                    },
                    CategorizedFile {
                        file_id: 2,
                        tags: vec![],
                        summary: Some("s".into()),
                    },
                ],
                errors: vec![],
            },
            ..MockBackend::default()
        };
        let args = validate_categorize(vec![1, 2]).unwrap();
        assert_eq!(block_on(categorize(&api, &args)), "Tagged 2 files.");
    }

    #[test]
    fn batch_transport_failure_is_reported() {
        let api = MockBackend {
            fail: true,
            ..MockBackend::default()
        };
        let args = validate_categorize(vec![4]).unwrap();
        assert_eq!(block_on(categorize(&api, &args)), BATCH_FAILED);
    }

    #[test]
    fn blank_query_is_ignored() {
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query("  budget 2024 "), Some("budget 2024".to_string()));
    }

    #[test]
    fn failed_search_shows_failure_view() {
        let api = MockBackend {
            fail: true,
            ..MockBackend::default()
        };
        assert_eq!(block_on(search(&api, "budget")), SearchView::Failed);
    }

    #[test]
    fn search_without_hits_is_no_matches() {
        let api = MockBackend::default();
        assert_eq!(block_on(search(&api, "budget")), SearchView::NoMatches);
        assert_eq!(api.calls(), vec!["search budget"]);
    }

    #[test]
    fn loaders_use_configured_page_size() {
        let api = MockBackend {
            files: vec![file(1), file(2)],
            ..MockBackend::default()
        };
        let config = ClientConfig::default();
        let files = block_on(load_files(&api, &config)).unwrap();
        assert_eq!(files.len(), 2);
        let _ = block_on(load_files_by_tag(&api, &config, "work")).unwrap();
        assert_eq!(
            api.calls(),
            vec!["files limit=80 tag=None", "files limit=80 tag=Some(\"work\")"]
        );
    }

    #[test]
    fn empty_tag_load_projects_placeholders() {
        use crate::app::render::{project_tags, TagPanel, EMPTY_TAG_CLOUD, EMPTY_TAG_EXPLORER};
        use crate::app::state::ViewModel;

        let api = MockBackend::default();
        let mut vm = ViewModel::default();
        vm.replace_tags(block_on(api.tags()).unwrap());
        let panels = project_tags(vm.tags(), 30);
        assert_eq!(panels.cloud, TagPanel::Placeholder(EMPTY_TAG_CLOUD));
        assert_eq!(panels.explorer, TagPanel::Placeholder(EMPTY_TAG_EXPLORER));
    }

    #[test]
    fn file_detail_found_and_missing() {
        let api = MockBackend {
            files: vec![file(9)],
            ..MockBackend::default()
        };
        match block_on(load_file_detail(&api, 9)) {
            DetailView::File(row) => assert_eq!(row.title, "f9.md"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            block_on(load_file_detail(&api, 10)),
            DetailView::Missing("File not found".into())
        );
    }

    #[test]
    fn scan_outcomes() {
        assert_eq!(validate_folder("  "), Err(ValidationError::MissingFolder));
        assert_eq!(validate_folder(" ~/Documents "), Ok("~/Documents".to_string()));

        let started = MockBackend {
            scan_reply: ScanResponse {
                status: Some("started".into()),
                error: None,
            },
            ..MockBackend::default()
        };
        assert_eq!(block_on(start_scan(&started, "/data")), ScanOutcome::Started);

        let rejected = MockBackend {
            scan_reply: ScanResponse {
                status: None,
                error: Some("Invalid folder path".into()),
            },
            ..MockBackend::default()
        };
        assert_eq!(
            block_on(start_scan(&rejected, "/nope")),
            ScanOutcome::Rejected("Invalid folder path".into())
        );
    }

    #[test]
    fn ollama_test_treats_failure_as_unreachable() {
        let api = MockBackend {
            fail: true,
            ..MockBackend::default()
        };
        assert_eq!(block_on(test_ollama(&api)).class, "helper-text error");
    }

    #[test]
    fn saving_settings_passes_values_through() {
        let api = MockBackend::default();
        let settings = Settings {
            auto_tag: false,
            auto_summarize: true,
            ollama_model: "llama3.2:1b".into(),
        };
        assert_eq!(block_on(save_settings(&api, &settings)), Ok(true));
        assert_eq!(api.saved.borrow().as_ref(), Some(&settings));
    }
}
