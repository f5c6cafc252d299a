use std::collections::{BTreeMap, BTreeSet};

use leptos::prelude::*;
use leptos_poller::Generation;

use crate::app::api::HttpBackend;
use crate::app::config::ClientConfig;
use crate::app::render::{DetailView, OllamaTestView, SearchView, StatusView};
use crate::app::types::{FileInfo, Settings, TagInfo};

/// Client-held projection of server state. Each field is replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewModel {
    files: Vec<FileInfo>,
    tags: Vec<TagInfo>,
    defaults: BTreeMap<String, String>,
}

impl ViewModel {
    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    pub fn tags(&self) -> &[TagInfo] {
        &self.tags
    }

    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    pub fn recent(&self, count: usize) -> &[FileInfo] {
        &self.files[..count.min(self.files.len())]
    }

    pub fn replace_files(&mut self, files: Vec<FileInfo>) {
        self.files = files;
    }

    pub fn replace_tags(&mut self, tags: Vec<TagInfo>) {
        self.tags = tags;
    }

    pub fn replace_defaults(&mut self, defaults: BTreeMap<String, String>) {
        self.defaults = defaults;
    }

    pub fn default_path(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str).filter(|p| !p.is_empty())
    }
}

/// Checked rows of the batch list. Only ids present in the list it is given
/// are ever added, and it starts over whenever that list is replaced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection(BTreeSet<i64>);

impl Selection {
    pub fn set(&mut self, id: i64, checked: bool, files: &[FileInfo]) {
        if !checked {
            self.0.remove(&id);
        } else if files.iter().any(|f| f.id == id) {
            self.0.insert(id);
        }
    }

    pub fn select_all(&mut self, flag: bool, files: &[FileInfo]) {
        self.0 = if flag {
            files.iter().map(|f| f.id).collect()
        } else {
            BTreeSet::new()
        };
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Selected ids in list order.
    pub fn ids_in(&self, files: &[FileInfo]) -> Vec<i64> {
        files.iter().map(|f| f.id).filter(|id| self.0.contains(id)).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Browse,
    Search,
    Tags,
    Batch,
    Scan,
    Settings,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Dashboard,
        Section::Browse,
        Section::Search,
        Section::Tags,
        Section::Batch,
        Section::Scan,
        Section::Settings,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Browse => "browse",
            Section::Search => "search",
            Section::Tags => "tags",
            Section::Batch => "batch",
            Section::Scan => "scan",
            Section::Settings => "settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Browse => "Browse",
            Section::Search => "Search",
            Section::Tags => "Tags",
            Section::Batch => "Batch",
            Section::Scan => "Scan",
            Section::Settings => "Settings",
        }
    }
}

/// Tag filter applied to the browse panel; does not touch the view model.
#[derive(Clone, Debug, PartialEq)]
pub struct TagFilter {
    pub tag: String,
    pub files: Vec<FileInfo>,
}

/// Everything the components read and the handlers write. Created once by `App`
/// and passed down explicitly.
#[derive(Clone, Copy)]
pub struct AppState {
    pub api: StoredValue<HttpBackend>,
    pub config: StoredValue<ClientConfig>,
    pub search_generation: StoredValue<Generation, LocalStorage>,
    pub view_model: RwSignal<ViewModel>,
    pub selection: RwSignal<Selection>,
    pub status: RwSignal<StatusView>,
    pub section: RwSignal<Section>,
    pub search_input: RwSignal<String>,
    pub search_results: RwSignal<SearchView>,
    pub batch_feedback: RwSignal<String>,
    pub batch_category: RwSignal<String>,
    pub batch_destination: RwSignal<String>,
    pub folder_path: RwSignal<String>,
    pub settings: RwSignal<Settings>,
    pub ollama_test: RwSignal<Option<OllamaTestView>>,
    pub detail: RwSignal<Option<DetailView>>,
    pub tag_filter: RwSignal<Option<TagFilter>>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        let api = HttpBackend::new(config.api_base.clone());
        let settings = Settings {
            ollama_model: config.default_model.clone(),
            ..Settings::default()
        };
        Self {
            api: StoredValue::new(api),
            config: StoredValue::new(config),
            search_generation: StoredValue::new_local(Generation::default()),
            view_model: RwSignal::new(ViewModel::default()),
            selection: RwSignal::new(Selection::default()),
            status: RwSignal::new(StatusView::default()),
            section: RwSignal::new(Section::Dashboard),
            search_input: RwSignal::new(String::new()),
            search_results: RwSignal::new(SearchView::Idle),
            batch_feedback: RwSignal::new(String::new()),
            batch_category: RwSignal::new(String::new()),
            batch_destination: RwSignal::new(String::new()),
            folder_path: RwSignal::new(String::new()),
            settings: RwSignal::new(settings),
            ollama_test: RwSignal::new(None),
            detail: RwSignal::new(None),
            tag_filter: RwSignal::new(None),
        }
    }

    pub fn show_section(&self, section: Section) {
        self.section.set(section);
    }

    /// New file list; the batch selection is dropped with the old one.
    pub fn replace_files(&self, files: Vec<FileInfo>) {
        self.view_model.update(|vm| vm.replace_files(files));
        self.selection.set(Selection::default());
    }
}
