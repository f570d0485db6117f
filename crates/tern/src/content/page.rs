use crate::content::{ContentUnit, FrontMatter};

/// A content unit together with the metadata extracted for it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Page {
    pub meta: FrontMatter,
    pub unit: ContentUnit,
}

impl Page {
    pub fn new(unit: ContentUnit, meta: FrontMatter) -> Self {
        Self { meta, unit }
    }
}
