use crate::config::EXPLANATION_CLASS;
use crate::model::Visibility;

/// What the explanation block should say about the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Explanation {
    None,
    Showing(String),
    NotFound(String),
}

/// One run of explanation content. Hosts decide how each kind is marked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Text(&'static str),
    /// Rendered like a tag label (`<span class="tag">`).
    Tag(String),
    /// Rendered as an aside (`<i>`).
    Note(&'static str),
}

impl Explanation {
    pub fn class_name(&self) -> &'static str {
        match self {
            Explanation::None => Visibility::Hidden.into(),
            Explanation::Showing(_) | Explanation::NotFound(_) => EXPLANATION_CLASS,
        }
    }

    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Explanation::None => Vec::new(),
            Explanation::Showing(tag) => vec![
                Segment::Text("Showing entries tagged with "),
                Segment::Tag(tag.clone()),
                Segment::Text(" "),
                Segment::Note("(click on active tag to deselect it and show all entries)"),
                Segment::Text("."),
            ],
            Explanation::NotFound(tag) => vec![
                Segment::Text("Tag "),
                Segment::Tag(tag.clone()),
                Segment::Text(" not found "),
                Segment::Note("(showing all entries)"),
                Segment::Text("."),
            ],
        }
    }

    /// Text content the block ends up with once rendered.
    pub fn plain_text(&self) -> String {
        self.segments()
            .iter()
            .map(|s| match s {
                Segment::Text(t) | Segment::Note(t) => *t,
                Segment::Tag(t) => t.as_str(),
            })
            .collect()
    }
}
