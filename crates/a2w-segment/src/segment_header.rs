//! Segment index header rendering.

use serde::{Deserialize, Serialize};

/// WeCom markdown header prepended to each segment of a split message.
pub const DEFAULT_SEGMENT_HEADER_TEMPLATE: &str =
    r#"<font color="comment">**({index}/{count})**</font>"#;

const INDEX_SLOT: &str = "{index}";
const COUNT_SLOT: &str = "{count}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Header template with `{index}` (1-based) and `{count}` slots.
pub struct SegmentHeader {
    template: String,
}

impl SegmentHeader {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders the header for segment `index` of `count`.
    pub fn render(&self, index: usize, count: usize) -> String {
        self.template
            .replace(INDEX_SLOT, &index.to_string())
            .replace(COUNT_SLOT, &count.to_string())
    }

    /// Byte length of the widest header any split into at most `max_count`
    /// segments can produce.
    ///
    /// Rendered length only grows with the digit width of the slot values, and
    /// every index and count is bounded by `max_count`, so rendering both slots
    /// at `max_count` yields an upper bound.
    pub fn max_rendered_len(&self, max_count: usize) -> usize {
        let bound = max_count.max(1);
        self.render(bound, bound).len()
    }
}

impl Default for SegmentHeader {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_HEADER_TEMPLATE)
    }
}
