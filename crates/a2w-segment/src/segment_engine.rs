//! Greedy paragraph-boundary segmentation under a hard byte ceiling.
//!
//! A message that fits alongside its mention suffix is emitted untouched with
//! no header. Longer messages are split on [`PARAGRAPH_BREAK`], packed left to
//! right into segment bodies, and each body is framed by its `(i/N)` header and
//! a copy of the mention suffix. Fragments are never split internally: one
//! that cannot fit an empty segment fails the whole message.

use thiserror::Error;

use crate::segment_header::SegmentHeader;

/// WeCom renders a blank line only for three or more consecutive newlines.
pub const PARAGRAPH_BREAK: &str = "\n\n\n";
/// WeCom group-bot markdown content ceiling, in bytes.
pub const MARKDOWN_MAX_BYTES: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public struct `SegmentLimits` used across a2w components.
pub struct SegmentLimits {
    pub max_bytes: usize,
    pub header: SegmentHeader,
}

impl SegmentLimits {
    pub fn new(max_bytes: usize, header: SegmentHeader) -> Self {
        Self { max_bytes, header }
    }
}

impl Default for SegmentLimits {
    fn default() -> Self {
        Self::new(MARKDOWN_MAX_BYTES, SegmentHeader::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One delivery-ready message: header, packed fragments, mention suffix.
pub struct Segment {
    pub index: usize,
    pub count: usize,
    pub header: String,
    pub body: String,
    pub mention_suffix: String,
}

impl Segment {
    /// Total byte length of the delivered content.
    pub fn len(&self) -> usize {
        self.header.len() + self.body.len() + self.mention_suffix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn content(&self) -> String {
        let mut content = String::with_capacity(self.len());
        content.push_str(&self.header);
        content.push_str(&self.body);
        content.push_str(&self.mention_suffix);
        content
    }

    pub fn into_content(self) -> String {
        if self.header.is_empty() && self.mention_suffix.is_empty() {
            return self.body;
        }
        self.content()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Enumerates supported `SegmentError` values.
pub enum SegmentError {
    #[error(
        "segment header ({header_bytes} bytes) and mention suffix ({mention_bytes} bytes) exceed the {max_bytes} byte message limit"
    )]
    BudgetExhausted {
        max_bytes: usize,
        header_bytes: usize,
        mention_bytes: usize,
    },
    #[error(
        "fragment {fragment_index} is {fragment_bytes} bytes, exceeding the per-segment fragment limit of {max_fragment_bytes} bytes"
    )]
    OversizedFragment {
        fragment_index: usize,
        fragment_bytes: usize,
        max_fragment_bytes: usize,
    },
}

impl SegmentError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::BudgetExhausted { .. } => "segment_budget_exhausted",
            Self::OversizedFragment { .. } => "segment_fragment_oversized",
        }
    }
}

/// Splits rendered text into paragraph fragments, preserving order.
pub fn split_fragments(text: &str) -> Vec<&str> {
    text.split(PARAGRAPH_BREAK).collect()
}

/// Splits `text` into segments that each fit `limits.max_bytes`.
///
/// Returns a single header-less segment when `text` plus `mention_suffix`
/// already fits. No segment is returned when any fragment is oversized.
pub fn segment_message(
    text: &str,
    mention_suffix: &str,
    limits: &SegmentLimits,
) -> Result<Vec<Segment>, SegmentError> {
    if text.len().saturating_add(mention_suffix.len()) <= limits.max_bytes {
        return Ok(vec![Segment {
            index: 1,
            count: 1,
            header: String::new(),
            body: text.to_string(),
            mention_suffix: mention_suffix.to_string(),
        }]);
    }

    let fragments = split_fragments(text);
    // Each segment holds at least one fragment, so the fragment count bounds
    // the segment count the header must be sized for.
    let header_bytes = limits.header.max_rendered_len(fragments.len());
    let fragment_budget = limits
        .max_bytes
        .checked_sub(header_bytes)
        .and_then(|remaining| remaining.checked_sub(mention_suffix.len()))
        .ok_or(SegmentError::BudgetExhausted {
            max_bytes: limits.max_bytes,
            header_bytes,
            mention_bytes: mention_suffix.len(),
        })?;

    let bodies = pack_fragments(&fragments, fragment_budget)?;
    let count = bodies.len();
    Ok(bodies
        .into_iter()
        .enumerate()
        .map(|(position, body)| {
            let index = position + 1;
            Segment {
                index,
                count,
                header: limits.header.render(index, count),
                body,
                mention_suffix: mention_suffix.to_string(),
            }
        })
        .collect())
}

fn pack_fragments(fragments: &[&str], fragment_budget: usize) -> Result<Vec<String>, SegmentError> {
    let mut bodies = Vec::new();
    let mut buffer = String::with_capacity(fragment_budget);

    for (position, fragment) in fragments.iter().enumerate() {
        let piece_bytes = PARAGRAPH_BREAK.len() + fragment.len();
        if piece_bytes > fragment_budget {
            return Err(SegmentError::OversizedFragment {
                fragment_index: position + 1,
                fragment_bytes: fragment.len(),
                max_fragment_bytes: fragment_budget.saturating_sub(PARAGRAPH_BREAK.len()),
            });
        }
        if buffer.len() + piece_bytes > fragment_budget {
            bodies.push(std::mem::replace(
                &mut buffer,
                String::with_capacity(fragment_budget),
            ));
        }
        buffer.push_str(PARAGRAPH_BREAK);
        buffer.push_str(fragment);
    }

    bodies.push(buffer);
    Ok(bodies)
}
