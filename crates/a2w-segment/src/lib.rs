//! Markdown segmentation for length-limited chat webhooks.
//!
//! Splits a rendered notification on paragraph breaks into the fewest
//! segments a greedy left-to-right packing allows, reserving room for a
//! per-segment `(i/N)` header and the mention suffix every segment carries.

pub mod mention_suffix;
pub mod segment_engine;
pub mod segment_header;

pub use mention_suffix::build_mention_suffix;
pub use segment_engine::{
    segment_message, split_fragments, Segment, SegmentError, SegmentLimits, MARKDOWN_MAX_BYTES,
    PARAGRAPH_BREAK,
};
pub use segment_header::{SegmentHeader, DEFAULT_SEGMENT_HEADER_TEMPLATE};
