//! `web-sys` host: the real document, listeners and the JS-facing handle.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCollection, Window};

use crate::config::{TagsConfig, TAG_CLASS};
use crate::dom::{Dom, Offset};
use crate::error::TagsError;
use crate::explanation::{Explanation, Segment};
use crate::fragment::is_same_document_link;
use crate::page::PageWithTaggedItems;

/// The current browser document.
#[derive(Clone, Debug)]
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    pub fn new() -> Result<Self, TagsError> {
        let window = web_sys::window().ok_or(TagsError::NoWindow)?;
        let document = window.document().ok_or(TagsError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn segment_node(&self, segment: &Segment) -> Result<web_sys::Node, TagsError> {
        let node: web_sys::Node = match segment {
            Segment::Text(text) => self.document.create_text_node(text).into(),
            Segment::Tag(tag) => {
                let span = self.document.create_element("span").map_err(TagsError::js)?;
                span.set_class_name(TAG_CLASS);
                span.set_text_content(Some(tag.as_str()));
                span.into()
            }
            Segment::Note(note) => {
                let i = self.document.create_element("i").map_err(TagsError::js)?;
                i.set_text_content(Some(*note));
                i.into()
            }
        };
        Ok(node)
    }
}

// Live collections shift under class changes; snapshot them.
fn collect_elements(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

impl Dom for BrowserDom {
    type Node = Element;

    fn elements_by_class(&self, scope: Option<&Element>, class: &str) -> Vec<Element> {
        let collection = match scope {
            Some(el) => el.get_elements_by_class_name(class),
            None => self.document.get_elements_by_class_name(class),
        };
        collect_elements(collection)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn class_name(&self, node: &Element) -> String {
        node.class_name()
    }

    fn set_class_name(&self, node: &Element, class: &str) {
        node.set_class_name(class);
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn render_explanation(
        &self,
        node: &Element,
        explanation: &Explanation,
    ) -> Result<(), TagsError> {
        node.set_text_content(None);
        node.set_class_name(explanation.class_name());
        for segment in explanation.segments() {
            let child = self.segment_node(&segment)?;
            node.append_child(&child).map_err(TagsError::js)?;
        }
        Ok(())
    }

    fn location_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn set_location_hash(&self, fragment: &str) -> Result<(), TagsError> {
        self.window
            .location()
            .set_hash(fragment)
            .map_err(TagsError::js)
    }

    fn screen_position(&self, node: &Element) -> Offset {
        let rect = node.get_bounding_client_rect();
        Offset::new(rect.left(), rect.top())
    }

    fn scroll_offset(&self) -> Offset {
        let doc = self.document.document_element();
        let body: Option<Element> = self.document.body().map(Into::into);

        // Whichever of <html>/<body> actually scrolls reports non-zero.
        let pick = |read: fn(&Element) -> i32| -> f64 {
            doc.as_ref()
                .map(read)
                .filter(|v| *v != 0)
                .or_else(|| body.as_ref().map(read))
                .unwrap_or(0) as f64
        };
        Offset::new(pick(Element::scroll_left), pick(Element::scroll_top))
    }

    fn scroll_to(&self, offset: Offset) {
        self.window.scroll_to_with_x_and_y(offset.left, offset.top);
    }
}

type SharedPage = Rc<RefCell<PageWithTaggedItems<BrowserDom>>>;

/// Interactive tags attached to the current page.
///
/// Owns the coordinator and its listeners; dropping it detaches them.
#[wasm_bindgen]
pub struct InteractiveTags {
    page: SharedPage,
    listeners: Vec<EventListener>,
}

impl InteractiveTags {
    /// Scan the document, apply the current fragment and wire every tag label.
    pub fn start(config: &TagsConfig) -> Result<Self, TagsError> {
        let dom = BrowserDom::new()?;
        let mut page = PageWithTaggedItems::new(dom, config);
        page.apply_location_hash();
        Ok(Self::attach(page, config.follow_hash_changes))
    }

    fn attach(page: PageWithTaggedItems<BrowserDom>, follow_hash_changes: bool) -> Self {
        let mut labels: Vec<(String, Element)> = Vec::new();
        for tag in page.tags() {
            let Some(entry) = page.tag_with_elements(tag) else {
                continue;
            };
            for &at in entry.tag_elements() {
                if let Some(tag_element) = page.tag_element(at) {
                    labels.push((tag.clone(), tag_element.node().clone()));
                }
            }
        }
        let window = page.dom().window().clone();

        let page: SharedPage = Rc::new(RefCell::new(page));
        let mut listeners = Vec::with_capacity(labels.len() + 1);

        // Labels linking to `#tag` would fight us over the fragment; labels
        // linking elsewhere still navigate.
        let options = EventListenerOptions::enable_prevent_default();
        for (tag, element) in labels {
            let shared = Rc::clone(&page);
            let clicked = element.clone();
            let own_fragment = is_same_document_link(element.get_attribute("href").as_deref());
            listeners.push(EventListener::new_with_options(
                &element,
                "click",
                options,
                move |event| {
                    if own_fragment {
                        event.prevent_default();
                    }
                    let Ok(mut page) = shared.try_borrow_mut() else {
                        tracing::warn!(tag = %tag, "tag click ignored while page is busy");
                        return;
                    };
                    page.click_tag(&tag, &clicked);
                },
            ));
        }

        if follow_hash_changes {
            let shared = Rc::clone(&page);
            listeners.push(EventListener::new(&window, "hashchange", move |_event| {
                let Ok(mut page) = shared.try_borrow_mut() else {
                    tracing::warn!("hashchange ignored while page is busy");
                    return;
                };
                let hash = page.dom().location_hash();
                if page.follow_fragment(&hash) {
                    tracing::debug!(hash = %hash, "followed fragment change");
                }
            }));
        }

        tracing::debug!(listeners = listeners.len(), "interactive tags attached");
        Self { page, listeners }
    }

    /// Keep the listeners for the rest of the page's life.
    pub fn leak(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }

    /// Start for the rest of the page's life once the document is parsed.
    /// Scanning earlier would only index the items parsed so far.
    pub fn start_when_ready(config: TagsConfig) -> Result<(), TagsError> {
        let dom = BrowserDom::new()?;
        let loading = dom.document().ready_state() == "loading";
        when_parsed(dom.document(), loading, move || match Self::start(&config) {
            Ok(tags) => tags.leak(),
            Err(e) => tracing::warn!("interactive tags setup failed: {}", e),
        });
        Ok(())
    }
}

/// Run `f` now, or on `DOMContentLoaded` while the document is `loading`.
fn when_parsed(document: &Document, loading: bool, f: impl FnOnce() + 'static) {
    if !loading {
        f();
        return;
    }
    tracing::debug!("document still loading; deferring interactive tags setup");
    EventListener::once(document, "DOMContentLoaded", move |_event| f()).forget();
}

#[wasm_bindgen]
impl InteractiveTags {
    /// Toggle selection of `tag`; `undefined`/`null` clears the selection.
    #[wasm_bindgen(js_name = selectTag)]
    pub fn select_tag(&self, tag: Option<String>) {
        match self.page.try_borrow_mut() {
            Ok(mut page) => page.select_tag(tag.as_deref()),
            Err(_) => tracing::warn!("selectTag called re-entrantly; ignored"),
        }
    }

    /// Currently selected tag, if it exists on the page.
    #[wasm_bindgen(js_name = selectedTag)]
    pub fn selected_tag(&self) -> Option<String> {
        let page = self.read("selectedTag")?;
        page.selected_tag().map(str::to_string)
    }

    /// Last tag asked for, including one the page doesn't have.
    #[wasm_bindgen(js_name = requestedTag)]
    pub fn requested_tag(&self) -> Option<String> {
        let page = self.read("requestedTag")?;
        page.selection().requested().map(str::to_string)
    }

    /// All tags on the page in first-seen order.
    pub fn tags(&self) -> Vec<String> {
        self.read("tags")
            .map(|page| page.tags().to_vec())
            .unwrap_or_default()
    }
}

impl InteractiveTags {
    fn read(&self, what: &str) -> Option<Ref<'_, PageWithTaggedItems<BrowserDom>>> {
        match self.page.try_borrow() {
            Ok(page) => Some(page),
            Err(_) => {
                tracing::warn!("{} called while page is busy; ignored", what);
                None
            }
        }
    }
}

/// Set up interactive tags on the current page.
///
/// * `item_class_name`: class of the tagged item elements
/// * `tag_cloud_class_name`: class of the tag cloud element
/// * `tags_explanation_id`: id of the element explaining the selection
#[wasm_bindgen]
pub fn setup(
    item_class_name: &str,
    tag_cloud_class_name: &str,
    tags_explanation_id: &str,
) -> Result<InteractiveTags, JsValue> {
    let config = TagsConfig::new(item_class_name, tag_cloud_class_name, tags_explanation_id);
    Ok(InteractiveTags::start(&config)?)
}

/// Same as [`setup`], from a config object such as
/// `{ itemClassName, tagCloudClassName, tagsExplanationId }`.
#[wasm_bindgen(js_name = setupWithConfig)]
pub fn setup_with_config(config: JsValue) -> Result<InteractiveTags, JsValue> {
    let config = TagsConfig::from_js(&config)?;
    Ok(InteractiveTags::start(&config)?)
}
