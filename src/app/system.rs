use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::controller::{self, ScanOutcome};
use crate::app::logging;
use crate::app::render::{pull_button_label, OllamaTestView};
use crate::app::state::AppState;
use crate::app::utils::alert;

pub fn start_scan(state: AppState) {
    let folder = match controller::validate_folder(&state.folder_path.get_untracked()) {
        Ok(folder) => folder,
        Err(e) => {
            alert(&e.to_string());
            return;
        }
    };

    let api = state.api.get_value();
    spawn_local(async move {
        match controller::start_scan(&api, &folder).await {
            ScanOutcome::Started => {
                logging::info(&format!("Scan started for {}", folder));
                state.status.update(|view| view.mark_scan_started());
            }
            ScanOutcome::Rejected(message) => alert(&message),
        }
    });
}

pub fn quick_folder(state: AppState, key: &str) {
    let path = state
        .view_model
        .with_untracked(|vm| vm.default_path(key).map(str::to_string));
    if let Some(path) = path {
        state.folder_path.set(path);
        start_scan(state);
    }
}

pub fn save_settings(state: AppState) {
    let settings = state.settings.get_untracked();
    let api = state.api.get_value();
    spawn_local(async move {
        match controller::save_settings(&api, &settings).await {
            Ok(true) => alert("Settings saved"),
            Ok(false) => logging::error("Settings were not saved"),
            Err(e) => logging::error(&format!("Error saving settings: {}", e)),
        }
    });
}

/// Drives one pull button: disabled while the request runs, then shows the
/// outcome for a moment before returning to its idle label.
pub fn pull_model(state: AppState, model: String, label: RwSignal<String>, busy: RwSignal<bool>) {
    busy.set(true);
    label.set("Pulling…".to_string());

    let api = state.api.get_value();
    let reset_ms = state.config.with_value(|c| c.pull_reset_ms);
    spawn_local(async move {
        let outcome = controller::pull_model(&api, &model).await;
        label.set(outcome.to_string());
        Timeout::new(reset_ms, move || {
            busy.set(false);
            label.set(pull_button_label(&model));
        })
        .forget();
    });
}

pub fn test_ollama(state: AppState) {
    state.ollama_test.set(Some(OllamaTestView::testing()));
    let api = state.api.get_value();
    spawn_local(async move {
        let view = controller::test_ollama(&api).await;
        state.ollama_test.set(Some(view));
    });
}
