use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("element `{0}` is not mounted")]
    MissingElement(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("fetch failed: {0}")]
    Fetch(#[from] gloo_net::Error),
    #[error("bad static data: {0}")]
    Data(#[from] serde_json::Error),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub fn window() -> Result<web_sys::Window, PageError> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub fn document() -> Result<web_sys::Document, PageError> {
    window()?.document().ok_or(PageError::NoDocument)
}
