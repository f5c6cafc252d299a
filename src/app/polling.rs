use leptos::prelude::*;

use crate::app::api::Backend;
use crate::app::logging;
use crate::app::state::AppState;

/// Polls `/api/status` for the lifetime of the page. Failures keep the last
/// displayed values. Status requests never overlap since the poller skips
/// ticks while one is pending, so replies always land in request order.
pub fn init_status_poller(state: AppState) {
    Effect::new(move |_| {
        let period = state.config.with_value(|c| c.poll_interval_ms);

        let handle = leptos_poller::start(period, move || {
            let api = state.api.get_value();
            async move {
                match api.status().await {
                    Ok(snapshot) => {
                        let paths = snapshot.paths.clone().unwrap_or_default();
                        if state.view_model.with_untracked(|vm| vm.defaults() != &paths) {
                            state.view_model.update(|vm| vm.replace_defaults(paths));
                        }
                        state.status.update(|view| view.apply(&snapshot));
                    }
                    Err(e) => logging::error(&format!("Status error: {}", e)),
                }
            }
        });
        handle.forget();
    });
}
