use serde::Deserialize;

use crate::error::TagsError;

/// Class of the container holding an item's tag labels.
pub const TAGS_CLASS: &str = "tags";
/// Class of a single tag label; its text content is the tag.
pub const TAG_CLASS: &str = "tag";
/// Class of the explanation block while it has something to say.
pub const EXPLANATION_CLASS: &str = "explanation";

/// Global the start hook looks at for a config object.
pub const WINDOW_CONFIG_KEY: &str = "INTERACTIVE_TAGS";

/// Page markup contract for one set of interactive tags.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagsConfig {
    /// Class name of the tagged item elements.
    pub item_class_name: String,
    /// Class name of the tag cloud element. Only the first match is used.
    pub tag_cloud_class_name: String,
    /// Id of the element where the selection is explained.
    pub tags_explanation_id: String,

    #[serde(default = "default_tags_class")]
    pub tags_class_name: String,

    #[serde(default = "default_tag_class")]
    pub tag_class_name: String,

    /// Re-apply the URL fragment on `hashchange` (back/forward navigation).
    #[serde(default = "default_true")]
    pub follow_hash_changes: bool,
}

fn default_tags_class() -> String {
    TAGS_CLASS.to_string()
}

fn default_tag_class() -> String {
    TAG_CLASS.to_string()
}

fn default_true() -> bool {
    true
}

impl TagsConfig {
    pub fn new(
        item_class_name: impl Into<String>,
        tag_cloud_class_name: impl Into<String>,
        tags_explanation_id: impl Into<String>,
    ) -> Self {
        Self {
            item_class_name: item_class_name.into(),
            tag_cloud_class_name: tag_cloud_class_name.into(),
            tags_explanation_id: tags_explanation_id.into(),
            tags_class_name: default_tags_class(),
            tag_class_name: default_tag_class(),
            follow_hash_changes: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TagsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config from an arbitrary JS value (usually a plain object
    /// literal handed over by the page).
    pub fn from_js(value: &wasm_bindgen::JsValue) -> Result<Self, TagsError> {
        let json = js_sys::JSON::stringify(value).map_err(TagsError::js)?;
        let json: String = json.into();
        Self::from_json(&json)
    }

    /// Config published by the page as `window.INTERACTIVE_TAGS`, if any.
    pub fn from_window() -> Option<Result<Self, TagsError>> {
        let window = web_sys::window()?;
        let value = window.get(WINDOW_CONFIG_KEY)?;
        if value.is_undefined() || !value.is_object() {
            return None;
        }
        Some(Self::from_js(&value))
    }
}
