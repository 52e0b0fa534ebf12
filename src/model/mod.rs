//! Tag labels, tagged items and the per-tag index entries built from them.

use crate::dom::Dom;

/// Whether an item is shown. Hidden items get `hidden` appended to their class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::AsRefStr, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

/// Whether a tag label shows the selected tag. Active labels get `active`
/// appended to their class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::AsRefStr, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Activity {
    #[default]
    Inactive,
    Active,
}

impl Activity {
    pub fn from_active(active: bool) -> Self {
        if active {
            Activity::Active
        } else {
            Activity::Inactive
        }
    }
}

/// `base` with `marker` appended as an extra class token.
fn with_marker(base: &str, marker: &str) -> String {
    if base.is_empty() {
        marker.to_string()
    } else {
        format!("{} {}", base, marker)
    }
}

/// A clickable label whose text is a tag.
#[derive(Clone, Debug)]
pub struct TagElement<N> {
    node: N,
    tag: String,
    inactive_class: String,
    active_class: String,
    activity: Activity,
}

impl<N: Clone> TagElement<N> {
    /// Capture the label's current class string as its inactive class.
    pub fn from_node<D: Dom<Node = N>>(dom: &D, node: N) -> Self {
        let tag = dom.text_content(&node);
        let inactive_class = dom.class_name(&node);
        let active_class = with_marker(&inactive_class, Activity::Active.as_ref());
        Self {
            node,
            tag,
            inactive_class,
            active_class,
            activity: Activity::Inactive,
        }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn class_name(&self) -> &str {
        match self.activity {
            Activity::Inactive => &self.inactive_class,
            Activity::Active => &self.active_class,
        }
    }

    pub fn set_activity<D: Dom<Node = N>>(&mut self, dom: &D, activity: Activity) {
        self.activity = activity;
        dom.set_class_name(&self.node, self.class_name());
    }
}

/// A content block (or the tag cloud) and the tag labels inside it.
#[derive(Clone, Debug)]
pub struct ItemWithTags<N> {
    node: N,
    visible_class: String,
    hidden_class: String,
    visibility: Visibility,
    tags: Vec<String>,
    tag_elements: Vec<TagElement<N>>,
}

impl<N: Clone> ItemWithTags<N> {
    /// Wrap `node`, collecting `tag_class` labels from the first descendant
    /// with `container_class`, or from `node` itself when there is none (or
    /// no container class is given).
    pub fn from_node<D: Dom<Node = N>>(
        dom: &D,
        node: N,
        container_class: Option<&str>,
        tag_class: &str,
    ) -> Self {
        let visible_class = dom.class_name(&node);
        let hidden_class = with_marker(&visible_class, Visibility::Hidden.as_ref());

        let container = container_class
            .and_then(|class| dom.elements_by_class(Some(&node), class).into_iter().next())
            .unwrap_or_else(|| node.clone());

        let tag_elements: Vec<TagElement<N>> = dom
            .elements_by_class(Some(&container), tag_class)
            .into_iter()
            .map(|el| TagElement::from_node(dom, el))
            .collect();
        let tags = tag_elements.iter().map(|t| t.tag().to_string()).collect();

        Self {
            node,
            visible_class,
            hidden_class,
            visibility: Visibility::Visible,
            tags,
            tag_elements,
        }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tag_elements(&self) -> &[TagElement<N>] {
        &self.tag_elements
    }

    pub(crate) fn tag_element_mut(&mut self, index: usize) -> Option<&mut TagElement<N>> {
        self.tag_elements.get_mut(index)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn class_name(&self) -> &str {
        match self.visibility {
            Visibility::Visible => &self.visible_class,
            Visibility::Hidden => &self.hidden_class,
        }
    }

    pub fn set_visibility<D: Dom<Node = N>>(&mut self, dom: &D, visibility: Visibility) {
        self.visibility = visibility;
        dom.set_class_name(&self.node, self.class_name());
    }
}

/// Which wrapped block a tag label lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    TagCloud,
    Item(usize),
}

/// Position of a [`TagElement`] inside the coordinator's items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagElementRef {
    pub owner: Owner,
    pub index: usize,
}

/// Everything on the page connected to one tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagWithElements {
    tag: String,
    items: Vec<usize>,
    tag_elements: Vec<TagElementRef>,
}

impl TagWithElements {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            items: Vec::new(),
            tag_elements: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Indices of the items carrying this tag. The tag cloud is never listed.
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    pub fn tag_elements(&self) -> &[TagElementRef] {
        &self.tag_elements
    }

    /// Record one label for this tag, and the item it belongs to unless the
    /// label sits in the tag cloud.
    pub(crate) fn add_tag_element(&mut self, element: TagElementRef) {
        if let Owner::Item(item) = element.owner {
            if self.items.last() != Some(&item) {
                self.items.push(item);
            }
        }
        self.tag_elements.push(element);
    }
}
