use leptos::prelude::*;
use leptos::task::spawn_local;

mod api;
mod batch;
mod components;
mod config;
mod controller;
mod error;
mod files;
mod logging;
mod polling;
mod render;
mod state;
mod system;
mod types;
mod utils;

use crate::app::components::file_list::{FileDetail, FileList};
use crate::app::components::status::{ProgressMeter, SidebarStatus, StatusCards, StatusPills};
use crate::app::components::tag_cloud::TagCloud;
use crate::app::config::ClientConfig;
use crate::app::files::{filter_by_tag, load_files, load_settings, load_tags, run_search, search_by_tag};
use crate::app::polling::init_status_poller;
use crate::app::render::{project_file_list, project_tags, pull_button_label, SearchView};
use crate::app::state::{AppState, Section};

const QUICK_FOLDERS: [(&str, &str); 5] = [
    ("home", "Home"),
    ("documents", "Documents"),
    ("downloads", "Downloads"),
    ("desktop", "Desktop"),
    ("pictures", "Pictures"),
];

const PULLABLE_MODELS: [&str; 2] = ["llama3.2:3b", "llama3.2:1b"];

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(ClientConfig::from_document());

    init_status_poller(state);

    // Load initial state; loaders are independent of each other
    Effect::new(move || {
        spawn_local(async move { load_files(state).await });
        spawn_local(async move { load_tags(state).await });
        spawn_local(async move { load_settings(state).await });
    });

    let recent_list = Memo::new(move |_| {
        let count = state.config.with_value(|c| c.recent_count);
        state.view_model.with(|vm| project_file_list(vm.recent(count), false))
    });
    let browse_list = Memo::new(move |_| match state.tag_filter.get() {
        Some(filter) => project_file_list(&filter.files, false),
        None => state.view_model.with(|vm| project_file_list(vm.files(), false)),
    });
    let batch_list = Memo::new(move |_| state.view_model.with(|vm| project_file_list(vm.files(), true)));
    let tag_panels = Memo::new(move |_| {
        let limit = state.config.with_value(|c| c.tag_cloud_limit);
        state.view_model.with(|vm| project_tags(vm.tags(), limit))
    });
    let cloud = Signal::derive(move || tag_panels.with(|p| p.cloud.clone()));
    let explorer = Signal::derive(move || tag_panels.with(|p| p.explorer.clone()));

    let is_active = move |section: Section| move || state.section.get() == section;
    let filter_input = RwSignal::new(String::new());

    view! {
        <div class="app">
            <nav class="sidebar">
                <h1>"FileSense"</h1>
                {Section::ALL
                    .into_iter()
                    .map(|section| view! {
                        <button
                            class="nav-link"
                            data-section=section.id()
                            class:active=is_active(section)
                            on:click=move |_| state.show_section(section)
                        >
                            {section.label()}
                        </button>
                    })
                    .collect_view()}
                <SidebarStatus state=state/>
            </nav>

            <main class="main-content">
                <div class="toolbar">
                    <input
                        type="text"
                        id="global-search"
                        placeholder="Search files, summaries, tags..."
                        prop:value=move || state.search_input.get()
                        on:input=move |ev| state.search_input.set(event_target_value(&ev))
                        on:keypress=move |ev| {
                            if ev.key() == "Enter" {
                                run_search(state);
                            }
                        }
                    />
                    <button id="search-submit" on:click=move |_| run_search(state)>"Search"</button>
                    <StatusPills state=state/>
                </div>

                <section class="panel" id="section-dashboard" class:active=is_active(Section::Dashboard)>
                    <StatusCards state=state/>
                    <ProgressMeter state=state/>
                    <h2>"Popular tags"</h2>
                    <div class="chips" id="tags-cloud">
                        <TagCloud panel=cloud on_pick=move |tag| search_by_tag(state, tag)/>
                    </div>
                    <h2>"Recent files"</h2>
                    <FileList list=recent_list state=state/>
                </section>

                <section class="panel" id="section-browse" class:active=is_active(Section::Browse)>
                    <div class="filter-controls">
                        <input
                            type="text"
                            id="browse-tag"
                            placeholder="Filter by tag"
                            prop:value=move || filter_input.get()
                            on:input=move |ev| filter_input.set(event_target_value(&ev))
                            on:keypress=move |ev| {
                                if ev.key() == "Enter" {
                                    filter_by_tag(state, filter_input.get_untracked());
                                }
                            }
                        />
                        <button on:click=move |_| filter_by_tag(state, filter_input.get_untracked())>"Filter"</button>
                    </div>
                    {move || state.tag_filter.get().map(|filter| view! {
                        <div class="filter-banner">
                            {format!("Tag: {}", filter.tag)}
                            <button on:click=move |_| {
                                filter_input.set(String::new());
                                state.tag_filter.set(None);
                            }>"Show all"</button>
                        </div>
                    })}
                    <FileList list=browse_list state=state/>
                </section>

                <section class="panel" id="section-search" class:active=is_active(Section::Search)>
                    <div id="search-results">
                        {move || match state.search_results.get() {
                            SearchView::Results(list) => {
                                view! { <FileList list=Signal::derive(move || list.clone()) state=state/> }.into_any()
                            }
                            SearchView::Searching => {
                                view! { <div class="list-item">{SearchView::Searching.message()}</div> }.into_any()
                            }
                            other => view! { <div class="list-item empty">{other.message()}</div> }.into_any(),
                        }}
                    </div>
                </section>

                <section class="panel" id="section-tags" class:active=is_active(Section::Tags)>
                    <div class="chips" id="tag-explorer">
                        <TagCloud panel=explorer on_pick=move |tag| search_by_tag(state, tag)/>
                    </div>
                </section>

                <section class="panel" id="section-batch" class:active=is_active(Section::Batch)>
                    <div class="batch-controls">
                        <button on:click=move |_| batch::select_all(state, true)>"Select all"</button>
                        <button on:click=move |_| batch::select_all(state, false)>"Select none"</button>
                        <button on:click=move |_| batch::categorize_selected(state)>"Categorize with Ollama"</button>
                    </div>
                    <div class="batch-controls">
                        <input
                            type="text"
                            id="batch-category"
                            placeholder="Category"
                            prop:value=move || state.batch_category.get()
                            on:input=move |ev| state.batch_category.set(event_target_value(&ev))
                        />
                        <input
                            type="text"
                            id="batch-destination"
                            placeholder="Destination folder"
                            prop:value=move || state.batch_destination.get()
                            on:input=move |ev| state.batch_destination.set(event_target_value(&ev))
                        />
                        <button on:click=move |_| batch::move_selected(state)>"Move"</button>
                    </div>
                    <div class="helper-text" id="batch-feedback">{move || state.batch_feedback.get()}</div>
                    <FileList list=batch_list state=state/>
                </section>

                <section class="panel" id="section-scan" class:active=is_active(Section::Scan)>
                    <div class="scan-controls">
                        <input
                            type="text"
                            id="folder-path"
                            placeholder="/path/to/folder"
                            prop:value=move || state.folder_path.get()
                            on:input=move |ev| state.folder_path.set(event_target_value(&ev))
                        />
                        <button on:click=move |_| system::start_scan(state)>"Start scan"</button>
                    </div>
                    <div class="quick-folders">
                        {QUICK_FOLDERS
                            .into_iter()
                            .map(|(key, label)| view! {
                                <button on:click=move |_| system::quick_folder(state, key)>{label}</button>
                            })
                            .collect_view()}
                    </div>
                    <ProgressMeter state=state/>
                </section>

                <section class="panel" id="section-settings" class:active=is_active(Section::Settings)>
                    <label>
                        <input
                            type="checkbox"
                            id="auto-tag"
                            prop:checked=move || state.settings.with(|s| s.auto_tag)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                state.settings.update(|s| s.auto_tag = checked);
                            }
                        />
                        "Auto-tag new files"
                    </label>
                    <label>
                        <input
                            type="checkbox"
                            id="auto-summarize"
                            prop:checked=move || state.settings.with(|s| s.auto_summarize)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                state.settings.update(|s| s.auto_summarize = checked);
                            }
                        />
                        "Summarize new files"
                    </label>
                    <input
                        type="text"
                        id="ollama-model"
                        prop:value=move || state.settings.with(|s| s.ollama_model.clone())
                        on:input=move |ev| {
                            let model = event_target_value(&ev);
                            state.settings.update(|s| s.ollama_model = model);
                        }
                    />
                    <button on:click=move |_| system::save_settings(state)>"Save settings"</button>

                    <div class="model-actions">
                        {PULLABLE_MODELS
                            .into_iter()
                            .map(|model| view! { <PullButton state=state model=model/> })
                            .collect_view()}
                        <button on:click=move |_| system::test_ollama(state)>"Test Ollama"</button>
                    </div>
                    {move || state.ollama_test.get().map(|result| view! {
                        <div id="test-result" class=result.class>{result.text}</div>
                    })}
                </section>
            </main>

            <FileDetail state=state/>
        </div>
    }
}

#[component]
fn PullButton(state: AppState, model: &'static str) -> impl IntoView {
    let label = RwSignal::new(pull_button_label(model));
    let busy = RwSignal::new(false);
    view! {
        <button
            disabled=move || busy.get()
            on:click=move |_| system::pull_model(state, model.to_string(), label, busy)
        >
            {move || label.get()}
        </button>
    }
}
