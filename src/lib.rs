//! Tag filtering for static pages.
//!
//! Items on a page carry tag labels; clicking a label hides every item that
//! doesn't carry that tag, marks the matching labels active and mirrors the
//! selection in the URL fragment. Clicking it again shows everything.
//!
//! Markup contract:
//! - every tag label has class `tag` and its text content is the tag;
//! - inside an item, the labels live in the first element with class `tags`
//!   (the item itself is searched when there is none);
//! - hidden items get `hidden` appended to their class, active labels get
//!   `active`. Styling those classes is up to the page.

mod browser;
mod config;
mod dom;
mod error;
mod explanation;
mod fragment;
mod logging;
mod model;
mod page;

#[cfg(test)]
mod testing;

pub use browser::{setup, setup_with_config, BrowserDom, InteractiveTags};
pub use config::TagsConfig;
pub use dom::{Dom, Offset};
pub use error::TagsError;
pub use explanation::{Explanation, Segment};
pub use fragment::{fragment_for_tag, is_same_document_link, tag_from_fragment};
pub use model::{
    Activity, ItemWithTags, Owner, TagElement, TagElementRef, TagWithElements, Visibility,
};
pub use page::{PageWithTaggedItems, Selection};

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    // Pages that don't publish `window.INTERACTIVE_TAGS` call `setup` themselves.
    match TagsConfig::from_window() {
        Some(Ok(config)) => {
            if let Err(e) = InteractiveTags::start_when_ready(config) {
                tracing::warn!("interactive tags setup failed: {}", e);
            }
        }
        Some(Err(e)) => tracing::warn!("ignoring window.{}: {}", config::WINDOW_CONFIG_KEY, e),
        None => {}
    }
}
