use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::controller::{self, MOVING, TAGGING};
use crate::app::files::{load_files, load_tags};
use crate::app::state::AppState;
use crate::app::utils::alert;

pub fn select_all(state: AppState, flag: bool) {
    state
        .view_model
        .with_untracked(|vm| state.selection.update(|s| s.select_all(flag, vm.files())));
}

fn selected_ids(state: AppState) -> Vec<i64> {
    state
        .view_model
        .with_untracked(|vm| state.selection.with_untracked(|s| s.ids_in(vm.files())))
}

pub fn categorize_selected(state: AppState) {
    let selected = selected_ids(state);
    let api = state.api.get_value();
    spawn_local(async move {
        let started = move || state.batch_feedback.set(TAGGING.to_string());
        match controller::categorize_selection(&api, selected, started).await {
            Ok(feedback) => {
                state.batch_feedback.set(feedback);
                // Server is the source of truth for what changed
                load_files(state).await;
                load_tags(state).await;
            }
            Err(e) => alert(&e.to_string()),
        }
    });
}

pub fn move_selected(state: AppState) {
    let selected = selected_ids(state);
    let category = state.batch_category.get_untracked();
    let destination = state.batch_destination.get_untracked();
    let api = state.api.get_value();
    spawn_local(async move {
        let started = move || state.batch_feedback.set(MOVING.to_string());
        match controller::move_selection(&api, selected, &category, &destination, started).await {
            Ok(feedback) => {
                state.batch_feedback.set(feedback);
                load_files(state).await;
            }
            Err(e) => alert(&e.to_string()),
        }
    });
}
