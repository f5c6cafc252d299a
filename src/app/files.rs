use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::api::Backend;
use crate::app::controller;
use crate::app::logging;
use crate::app::render::{DetailView, SearchView};
use crate::app::state::{AppState, Section, TagFilter};

pub async fn load_files(state: AppState) {
    let api = state.api.get_value();
    let config = state.config.get_value();
    match controller::load_files(&api, &config).await {
        Ok(files) => {
            logging::info(&format!("Loaded {} files", files.len()));
            state.replace_files(files);
        }
        Err(e) => logging::error(&format!("Error loading files: {}", e)),
    }
}

pub async fn load_tags(state: AppState) {
    let api = state.api.get_value();
    match api.tags().await {
        Ok(tags) => {
            logging::info(&format!("Loaded {} tags", tags.len()));
            state.view_model.update(|vm| vm.replace_tags(tags));
        }
        Err(e) => logging::error(&format!("Error loading tags: {}", e)),
    }
}

pub async fn load_settings(state: AppState) {
    let api = state.api.get_value();
    match api.settings().await {
        Ok(settings) => state.settings.set(settings),
        Err(e) => logging::error(&format!("Error loading settings: {}", e)),
    }
}

/// Searches for the current contents of the search box. Blank input does nothing.
pub fn run_search(state: AppState) {
    let Some(query) = controller::normalize_query(&state.search_input.get_untracked()) else {
        return;
    };
    state.show_section(Section::Search);
    state.search_results.set(SearchView::Searching);

    let ticket = state.search_generation.with_value(|g| g.begin());
    let api = state.api.get_value();
    spawn_local(async move {
        let view = controller::search(&api, &query).await;
        match ticket.settle(view) {
            Some(view) => state.search_results.set(view),
            None => logging::info(&format!("[Search] dropping superseded results for '{}'", query)),
        }
    });
}

pub fn search_by_tag(state: AppState, tag: String) {
    state.search_input.set(tag);
    run_search(state);
}

/// Narrows the browse panel to one tag without replacing the view model. A
/// blank tag clears the filter.
pub fn filter_by_tag(state: AppState, tag: String) {
    let Some(tag) = controller::normalize_query(&tag) else {
        state.tag_filter.set(None);
        return;
    };
    let api = state.api.get_value();
    let config = state.config.get_value();
    spawn_local(async move {
        match controller::load_files_by_tag(&api, &config, &tag).await {
            Ok(files) => {
                state.tag_filter.set(Some(TagFilter { tag, files }));
                state.show_section(Section::Browse);
            }
            Err(e) => logging::error(&format!("Error filtering by tag '{}': {}", tag, e)),
        }
    });
}

pub fn open_detail(state: AppState, id: i64) {
    state.detail.set(Some(DetailView::Loading(id)));
    let api = state.api.get_value();
    spawn_local(async move {
        let view = controller::load_file_detail(&api, id).await;
        // Ignore if the pane was closed or another file was opened meanwhile
        let still_wanted = state
            .detail
            .with_untracked(|d| matches!(d, Some(DetailView::Loading(current)) if *current == id));
        if still_wanted {
            state.detail.set(Some(view));
        }
    });
}
