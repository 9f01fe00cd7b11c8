use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("DOM Error: {0}")]
    Dom(String),
}

pub type FinderResult<T> = Result<T, FinderError>;

impl From<FinderError> for wasm_bindgen::JsValue {
    fn from(err: FinderError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
