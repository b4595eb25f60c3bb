//! Mention suffix construction for group-bot notifications.

use crate::segment_engine::PARAGRAPH_BREAK;

/// Builds the trailing mention block appended to every outbound segment.
///
/// Returns an empty string when `mentions` is empty. Otherwise the block is a
/// paragraph break followed by one `<@id>` marker per identifier, in input
/// order, with no separators and no trailing break.
pub fn build_mention_suffix<I, S>(mentions: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut suffix = String::new();
    for mention in mentions {
        if suffix.is_empty() {
            suffix.push_str(PARAGRAPH_BREAK);
        }
        suffix.push_str("<@");
        suffix.push_str(mention.as_ref());
        suffix.push('>');
    }
    suffix
}
