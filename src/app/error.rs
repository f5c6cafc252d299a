use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("{0}")]
    Server(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn network(value: JsValue) -> Self {
        ApiError::Network(describe(&value))
    }

    pub fn decode(value: JsValue) -> Self {
        ApiError::Decode(describe(&value))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Encode(e.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for ApiError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

// Display strings are the exact messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Select at least one file")]
    NoSelection,

    #[error("Provide category and destination")]
    MissingMoveTarget,

    #[error("Enter a folder path")]
    MissingFolder,
}
