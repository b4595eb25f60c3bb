#![no_main]

use a2w_segment::{
    build_mention_suffix, segment_message, SegmentError, SegmentHeader, SegmentLimits,
    PARAGRAPH_BREAK,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let max_bytes = 16 + usize::from(u16::from_le_bytes([data[0], data[1]]) % 4096);
    let mention_count = usize::from(data[2] % 4);
    let text = String::from_utf8_lossy(&data[3..]);
    let mentions = (0..mention_count)
        .map(|index| format!("user{index}"))
        .collect::<Vec<_>>();
    let mention_suffix = build_mention_suffix(&mentions);
    let limits = SegmentLimits::new(max_bytes, SegmentHeader::new("({index}/{count})"));

    match segment_message(&text, &mention_suffix, &limits) {
        Ok(segments) => {
            assert!(!segments.is_empty());
            let count = segments.len();
            let mut bodies = String::new();
            for (offset, segment) in segments.iter().enumerate() {
                assert!(segment.len() <= max_bytes);
                assert_eq!(segment.index, offset + 1);
                assert_eq!(segment.count, count);
                assert_eq!(segment.mention_suffix, mention_suffix);
                bodies.push_str(&segment.body);
            }
            if count == 1 {
                assert_eq!(bodies, text);
            } else {
                assert_eq!(bodies.strip_prefix(PARAGRAPH_BREAK), Some(text.as_ref()));
            }
        }
        Err(SegmentError::OversizedFragment { fragment_bytes, max_fragment_bytes, .. }) => {
            assert!(fragment_bytes + PARAGRAPH_BREAK.len() > max_fragment_bytes);
        }
        Err(SegmentError::BudgetExhausted { .. }) => {}
    }
});
