use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::app::error::ApiError;
use crate::app::types::*;

/// The FileSense server as seen by the controller.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn status(&self) -> Result<StatusSnapshot, ApiError>;
    async fn files(&self, query: &FileQuery) -> Result<Vec<FileInfo>, ApiError>;
    async fn file_detail(&self, id: i64) -> Result<FileInfo, ApiError>;
    async fn tags(&self) -> Result<Vec<TagInfo>, ApiError>;
    async fn settings(&self) -> Result<Settings, ApiError>;
    async fn save_settings(&self, settings: &Settings) -> Result<bool, ApiError>;
    async fn search(&self, query: &str) -> Result<Vec<FileInfo>, ApiError>;
    async fn scan(&self, folder: &str) -> Result<ScanResponse, ApiError>;
    async fn pull_model(&self, model: &str) -> Result<bool, ApiError>;
    async fn categorize(&self, args: &CategorizeArgs) -> Result<CategorizeResponse, ApiError>;
    async fn move_files(&self, args: &MoveArgs) -> Result<MoveResponse, ApiError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;

        let opts = RequestInit::new();
        opts.set_method(method);
        let has_body = body.is_some();
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(&body));
        }

        let url = format!("{}{}", self.base, path);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(ApiError::network)?;
        if has_body {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(ApiError::network)?;
        }

        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(ApiError::network)?;
        value.dyn_into::<Response>().map_err(ApiError::network)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send("GET", path, None).await?;
        read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_string(body)?;
        let response = self.send("POST", path, Some(body)).await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let promise = response.json().map_err(ApiError::decode)?;
    let value = JsFuture::from(promise).await;

    if !response.ok() {
        // Error bodies look like {"error": "..."}
        return Err(value
            .ok()
            .and_then(|v| serde_wasm_bindgen::from_value::<ErrorResponse>(v).ok())
            .map(|body| ApiError::Server(body.error))
            .unwrap_or(ApiError::Status(status)));
    }

    let value = value.map_err(ApiError::decode)?;
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn files_path(query: &FileQuery) -> String {
    let mut path = format!("/api/files?limit={}", query.limit);
    if let Some(tag) = query.tag.as_deref().filter(|t| !t.is_empty()) {
        path.push_str("&tag=");
        path.push_str(&String::from(js_sys::encode_uri_component(tag)));
    }
    path
}

impl Backend for HttpBackend {
    async fn status(&self) -> Result<StatusSnapshot, ApiError> {
        self.get_json("/api/status").await
    }

    async fn files(&self, query: &FileQuery) -> Result<Vec<FileInfo>, ApiError> {
        let list: FileListResponse = self.get_json(&files_path(query)).await?;
        Ok(list.results.unwrap_or_default())
    }

    async fn file_detail(&self, id: i64) -> Result<FileInfo, ApiError> {
        self.get_json(&format!("/api/files/{}", id)).await
    }

    async fn tags(&self) -> Result<Vec<TagInfo>, ApiError> {
        self.get_json("/api/tags").await
    }

    async fn settings(&self) -> Result<Settings, ApiError> {
        let wire: SettingsWire = self.get_json("/api/settings").await?;
        Ok(Settings::from(wire))
    }

    async fn save_settings(&self, settings: &Settings) -> Result<bool, ApiError> {
        let reply: SuccessResponse = self.post_json("/api/settings", &settings.to_wire()).await?;
        Ok(reply.success)
    }

    async fn search(&self, query: &str) -> Result<Vec<FileInfo>, ApiError> {
        let list: FileListResponse = self.post_json("/api/search", &SearchArgs { query }).await?;
        Ok(list.results.unwrap_or_default())
    }

    async fn scan(&self, folder: &str) -> Result<ScanResponse, ApiError> {
        self.post_json("/api/scan", &ScanArgs { folder }).await
    }

    async fn pull_model(&self, model: &str) -> Result<bool, ApiError> {
        let reply: SuccessResponse = self.post_json("/api/ollama/pull", &PullModelArgs { model }).await?;
        Ok(reply.success)
    }

    async fn categorize(&self, args: &CategorizeArgs) -> Result<CategorizeResponse, ApiError> {
        self.post_json("/api/files/categorize", args).await
    }

    async fn move_files(&self, args: &MoveArgs) -> Result<MoveResponse, ApiError> {
        self.post_json("/api/files/move", args).await
    }
}
