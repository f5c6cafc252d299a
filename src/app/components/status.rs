use leptos::prelude::*;

use crate::app::state::AppState;

#[component]
pub fn StatusCards(state: AppState) -> impl IntoView {
    let status = state.status;
    view! {
        <div class="stat-grid">
            <div class="stat-card">
                <span class="stat-label">"Files"</span>
                <strong id="stat-files">{move || status.with(|s| s.files.clone())}</strong>
            </div>
            <div class="stat-card">
                <span class="stat-label">"Tags"</span>
                <strong id="stat-tags">{move || status.with(|s| s.tags.clone())}</strong>
            </div>
            <div class="stat-card">
                <span class="stat-label">"Ollama"</span>
                <strong id="stat-ollama">{move || status.with(|s| s.ollama.clone())}</strong>
                <div class="helper-text" id="stat-models">{move || status.with(|s| s.models.clone())}</div>
            </div>
            <div class="stat-card">
                <span class="stat-label">"Index"</span>
                <strong id="stat-index">{move || status.with(|s| s.index.clone())}</strong>
                <div class="helper-text" id="stat-progress">{move || status.with(|s| s.progress.clone())}</div>
            </div>
            <div class="stat-card">
                <span class="stat-label">"Home"</span>
                <div class="path" id="stat-path">{move || status.with(|s| s.home_path.clone())}</div>
                <div class="helper-text">{move || status.with(|s| s.platform.clone())}</div>
            </div>
        </div>
    }
}

#[component]
pub fn StatusPills(state: AppState) -> impl IntoView {
    let status = state.status;
    view! {
        <div class="pills">
            <span class="pill" id="pill-files">{move || status.with(|s| s.pill_files.clone())}</span>
            <span class="pill" id="pill-tags">{move || status.with(|s| s.pill_tags.clone())}</span>
            <span class="pill" id="pill-ollama">{move || status.with(|s| s.pill_ollama.clone())}</span>
        </div>
    }
}

#[component]
pub fn SidebarStatus(state: AppState) -> impl IntoView {
    let status = state.status;
    view! {
        <div class="sidebar-status">
            <div id="sidebar-ollama">{move || status.with(|s| s.sidebar_ollama.clone())}</div>
            <div id="sidebar-indexing">{move || status.with(|s| s.sidebar_indexing.clone())}</div>
        </div>
    }
}

/// Stays empty until the first scan reports a total. Mounted on more than one
/// panel, so it carries classes only.
#[component]
pub fn ProgressMeter(state: AppState) -> impl IntoView {
    let bar = move || state.status.with(|s| s.bar.clone());
    view! {
        <div class="progress">
            <div class="progress-label">
                {move || bar().map(|b| b.label).unwrap_or_default()}
            </div>
            <div class="progress-track">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", bar().map(|b| b.percent).unwrap_or(0))
                ></div>
            </div>
        </div>
    }
}
