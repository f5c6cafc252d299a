use web_sys::Document;

use crate::app::logging;

pub const DEFAULT_MODEL: &str = "llama3.2:3b";

const API_BASE_META: &str = "filesense-api-base";
const POLL_MS_META: &str = "filesense-poll-ms";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every API path; empty means same origin.
    pub api_base: String,
    pub poll_interval_ms: u32,
    pub page_size: usize,
    pub recent_count: usize,
    pub tag_cloud_limit: usize,
    pub default_model: String,
    pub pull_reset_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            poll_interval_ms: 4000,
            page_size: 80,
            recent_count: 12,
            tag_cloud_limit: 30,
            default_model: DEFAULT_MODEL.to_string(),
            pull_reset_ms: 2500,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `<meta>` tags of the host page.
    pub fn from_document() -> Self {
        let mut config = Self::default();
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            config.apply_overrides(meta_content(&doc, API_BASE_META), meta_content(&doc, POLL_MS_META));
        }
        logging::info(&format!(
            "[Config] api_base='{}' poll={}ms",
            config.api_base, config.poll_interval_ms
        ));
        config
    }

    pub fn apply_overrides(&mut self, api_base: Option<String>, poll_ms: Option<String>) {
        if let Some(base) = api_base {
            self.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(ms) = poll_ms.and_then(|v| v.trim().parse::<u32>().ok()).filter(|ms| *ms > 0) {
            self.poll_interval_ms = ms;
        }
    }
}

fn meta_content(doc: &Document, name: &str) -> Option<String> {
    doc.query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("content"))
}
