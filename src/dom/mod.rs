//! The slice of the DOM the coordinator needs.
//!
//! [`crate::browser::BrowserDom`] implements this over `web-sys`; unit tests
//! use an in-memory page instead.

use std::ops::{Add, Sub};

use crate::error::TagsError;
use crate::explanation::Explanation;

/// A `(left, top)` pair in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub left: f64,
    pub top: f64,
}

impl Offset {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.left + rhs.left, self.top + rhs.top)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.left - rhs.left, self.top - rhs.top)
    }
}

pub trait Dom {
    /// Handle to one element. Cheap to clone.
    type Node: Clone;

    /// Elements carrying `class` among the descendants of `scope` (or the
    /// whole document), in document order.
    fn elements_by_class(&self, scope: Option<&Self::Node>, class: &str) -> Vec<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn class_name(&self, node: &Self::Node) -> String;

    fn set_class_name(&self, node: &Self::Node, class: &str);

    fn text_content(&self, node: &Self::Node) -> String;

    /// Replace the content and class of `node` with `explanation`.
    fn render_explanation(
        &self,
        node: &Self::Node,
        explanation: &Explanation,
    ) -> Result<(), TagsError>;

    /// Raw `location.hash`, including the leading `#` if present.
    fn location_hash(&self) -> String;

    fn set_location_hash(&self, fragment: &str) -> Result<(), TagsError>;

    /// Top-left corner of `node` relative to the viewport.
    fn screen_position(&self, node: &Self::Node) -> Offset;

    fn scroll_offset(&self) -> Offset;

    /// Scroll the document; the host clamps to its bounds.
    fn scroll_to(&self, offset: Offset);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        let a = Offset::new(10.0, 250.0);
        let b = Offset::new(4.0, 50.0);
        assert_eq!(a + b, Offset::new(14.0, 300.0));
        assert_eq!(a - b, Offset::new(6.0, 200.0));
        assert_eq!(Offset::default(), Offset::new(0.0, 0.0));
    }
}
