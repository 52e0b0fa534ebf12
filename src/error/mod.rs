use wasm_bindgen::JsValue;

/// Failures coming from the host page rather than from tag selection itself.
///
/// Selecting an unknown tag is not an error; it is reported through
/// [`crate::page::Selection::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum TagsError {
    #[error("no global `window` available")]
    NoWindow,

    #[error("window has no `document`")]
    NoDocument,

    #[error("DOM call failed: {0}")]
    Js(String),

    #[error("invalid interactive-tags config: {0}")]
    Config(#[from] serde_json::Error),
}

impl TagsError {
    pub(crate) fn js(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        Self::Js(msg)
    }
}

impl From<TagsError> for JsValue {
    fn from(err: TagsError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
