use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("browser global `{0}` is not available")]
    NoGlobal(&'static str),

    #[error("element `{0}` not found")]
    MissingElement(&'static str),

    #[error("no elements match `{0}`")]
    NothingToObserve(&'static str),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("invalid site content: {0}")]
    Content(#[from] serde_json::Error),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
