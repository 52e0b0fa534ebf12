//! The page-level coordinator.
//!
//! [`PageWithTaggedItems`] owns every wrapped element on the page plus the
//! tag index, and is the only thing that changes their classes, the
//! explanation block and the URL fragment.

use std::collections::HashMap;

use crate::config::TagsConfig;
use crate::dom::{Dom, Offset};
use crate::explanation::Explanation;
use crate::fragment::{fragment_for_tag, tag_from_fragment};
use crate::model::{
    Activity, ItemWithTags, Owner, TagElement, TagElementRef, TagWithElements, Visibility,
};

/// Current filter state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Tag(String),
    /// A tag was asked for that the page doesn't have. Filters nothing.
    NotFound(String),
}

impl Selection {
    /// The requested tag, found or not.
    pub fn requested(&self) -> Option<&str> {
        match self {
            Selection::None => None,
            Selection::Tag(tag) | Selection::NotFound(tag) => Some(tag),
        }
    }

    fn explanation(&self) -> Explanation {
        match self {
            Selection::None => Explanation::None,
            Selection::Tag(tag) => Explanation::Showing(tag.clone()),
            Selection::NotFound(tag) => Explanation::NotFound(tag.clone()),
        }
    }
}

pub struct PageWithTaggedItems<D: Dom> {
    dom: D,
    tag_with_elements_by_tag: HashMap<String, TagWithElements>,
    tags: Vec<String>,
    items: Vec<ItemWithTags<D::Node>>,
    tag_cloud: Option<ItemWithTags<D::Node>>,
    explanation_element: Option<D::Node>,
    selection: Selection,
}

impl<D: Dom> PageWithTaggedItems<D> {
    /// Scan the page described by `config` and build the tag index. Does not
    /// look at the URL fragment; see [`Self::apply_location_hash`].
    pub fn new(dom: D, config: &TagsConfig) -> Self {
        let mut page = Self {
            dom,
            tag_with_elements_by_tag: HashMap::new(),
            tags: Vec::new(),
            items: Vec::new(),
            tag_cloud: None,
            explanation_element: None,
            selection: Selection::None,
        };
        page.setup_tag_cloud(&config.tag_cloud_class_name, &config.tag_class_name);
        page.setup_items(
            &config.item_class_name,
            &config.tags_class_name,
            &config.tag_class_name,
        );
        page.explanation_element = page.dom.element_by_id(&config.tags_explanation_id);

        tracing::debug!(
            tags = page.tags.len(),
            items = page.items.len(),
            tag_cloud = page.tag_cloud.is_some(),
            explanation = page.explanation_element.is_some(),
            "interactive tags indexed"
        );
        page
    }

    fn setup_tag_cloud(&mut self, cloud_class: &str, tag_class: &str) {
        let Some(node) = self
            .dom
            .elements_by_class(None, cloud_class)
            .into_iter()
            .next()
        else {
            return;
        };
        let cloud = ItemWithTags::from_node(&self.dom, node, None, tag_class);
        self.index_tag_elements(Owner::TagCloud, cloud.tag_elements());
        self.tag_cloud = Some(cloud);
    }

    fn setup_items(&mut self, item_class: &str, tags_class: &str, tag_class: &str) {
        for node in self.dom.elements_by_class(None, item_class) {
            let item = ItemWithTags::from_node(&self.dom, node, Some(tags_class), tag_class);
            let owner = Owner::Item(self.items.len());
            self.index_tag_elements(owner, item.tag_elements());
            self.items.push(item);
        }
    }

    fn index_tag_elements(&mut self, owner: Owner, tag_elements: &[TagElement<D::Node>]) {
        for (index, tag_element) in tag_elements.iter().enumerate() {
            self.tag_with_elements_mut(tag_element.tag())
                .add_tag_element(TagElementRef { owner, index });
        }
    }

    /// Index entry for `tag`, created on first sight.
    fn tag_with_elements_mut(&mut self, tag: &str) -> &mut TagWithElements {
        if !self.tag_with_elements_by_tag.contains_key(tag) {
            self.tags.push(tag.to_string());
        }
        self.tag_with_elements_by_tag
            .entry(tag.to_string())
            .or_insert_with(|| TagWithElements::new(tag))
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Every tag on the page, in first-seen order (tag cloud first).
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn items(&self) -> &[ItemWithTags<D::Node>] {
        &self.items
    }

    pub fn tag_cloud(&self) -> Option<&ItemWithTags<D::Node>> {
        self.tag_cloud.as_ref()
    }

    pub fn tag_with_elements(&self, tag: &str) -> Option<&TagWithElements> {
        self.tag_with_elements_by_tag.get(tag)
    }

    pub fn tag_element(&self, at: TagElementRef) -> Option<&TagElement<D::Node>> {
        let owner = match at.owner {
            Owner::TagCloud => self.tag_cloud.as_ref()?,
            Owner::Item(i) => self.items.get(i)?,
        };
        owner.tag_elements().get(at.index)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The tag currently filtering the page, if it exists on the page.
    pub fn selected_tag(&self) -> Option<&str> {
        match &self.selection {
            Selection::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Toggle selection of `tag`: choosing the selected tag again clears the
    /// selection, anything else selects it. An unknown tag is never
    /// "selected", so asking for it again reports it missing again.
    pub fn select_tag(&mut self, tag: Option<&str>) {
        let tag = match tag {
            Some(tag) if self.selected_tag() == Some(tag) => None,
            other => other,
        };
        self.show_tag(tag);
    }

    /// Make `tag` the selection, writing the URL fragment and every affected
    /// class. Calling it twice with the same tag changes nothing.
    pub fn show_tag(&mut self, tag: Option<&str>) {
        if let Err(e) = self.dom.set_location_hash(&fragment_for_tag(tag)) {
            tracing::warn!("could not update location hash: {}", e);
        }

        if let Some(current) = self.selected_tag().map(str::to_string) {
            self.set_tag_selected(&current, false);
        }

        self.selection = match tag {
            None => Selection::None,
            Some(tag) if self.tag_with_elements_by_tag.contains_key(tag) => {
                Selection::Tag(tag.to_string())
            }
            Some(tag) => Selection::NotFound(tag.to_string()),
        };

        match self.selected_tag().map(str::to_string) {
            Some(selected) => {
                self.set_all_items_visibility(Visibility::Hidden);
                self.set_tag_selected(&selected, true);
            }
            None => self.set_all_items_visibility(Visibility::Visible),
        }

        tracing::debug!(selection = ?self.selection, "tag selection changed");
        self.show_explanation();
    }

    /// Apply a raw `location.hash` value (with or without `#`).
    pub fn apply_fragment(&mut self, raw: &str) {
        let tag = tag_from_fragment(raw);
        self.show_tag(tag.as_deref());
    }

    /// Re-apply `raw` after the fragment changed under us (back/forward).
    /// Returns whether the selection was touched; fragments that already
    /// match the selection, such as the echo of our own writes, are skipped.
    pub fn follow_fragment(&mut self, raw: &str) -> bool {
        let tag = tag_from_fragment(raw);
        if tag.as_deref() == self.selection.requested() {
            return false;
        }
        self.show_tag(tag.as_deref());
        true
    }

    /// Apply the page's current fragment, if it names anything.
    pub fn apply_location_hash(&mut self) {
        let hash = self.dom.location_hash();
        if tag_from_fragment(&hash).is_some() {
            self.apply_fragment(&hash);
        }
    }

    /// Handle a click on `clicked`, a label for `tag`: toggle the selection
    /// and scroll so the label stays where it was on screen.
    pub fn click_tag(&mut self, tag: &str, clicked: &D::Node) {
        let screen_before = self.dom.screen_position(clicked);

        self.select_tag(Some(tag));

        let screen_after = self.dom.screen_position(clicked);
        let page_after = self.dom.scroll_offset() + screen_after;
        let target: Offset = page_after - screen_before;
        self.dom.scroll_to(target);
    }

    fn set_all_items_visibility(&mut self, visibility: Visibility) {
        for item in self.items.iter_mut() {
            item.set_visibility(&self.dom, visibility);
        }
    }

    /// Show the items carrying `tag` and mark its labels active, or undo that.
    fn set_tag_selected(&mut self, tag: &str, selected: bool) {
        let Some(entry) = self.tag_with_elements_by_tag.get(tag) else {
            return;
        };

        for &i in entry.items() {
            if let Some(item) = self.items.get_mut(i) {
                item.set_visibility(&self.dom, Visibility::from_visible(selected));
            }
        }

        for &at in entry.tag_elements() {
            let owner = match at.owner {
                Owner::TagCloud => self.tag_cloud.as_mut(),
                Owner::Item(i) => self.items.get_mut(i),
            };
            if let Some(tag_element) = owner.and_then(|o| o.tag_element_mut(at.index)) {
                tag_element.set_activity(&self.dom, Activity::from_active(selected));
            }
        }
    }

    fn show_explanation(&self) {
        let Some(node) = &self.explanation_element else {
            return;
        };
        if let Err(e) = self.dom.render_explanation(node, &self.selection.explanation()) {
            tracing::warn!("could not render tag explanation: {}", e);
        }
    }
}
