// Truncation repair for UTF-8 byte content.
// Validation is core::str::from_utf8; this module only answers "did the
// truncation point land inside a multi-byte sequence, and how far back is
// the lead byte".

#[inline]
const fn seq_len(lead: u8) -> usize {
    if lead >= 0xf0 {
        4
    } else if lead >= 0xe0 {
        3
    } else {
        2
    }
}

/// Length of a trailing incomplete multi-byte sequence in `bytes`, or 0 if
/// the content ends on a scalar boundary. Malformed tails (a run of four or
/// more continuation bytes, or a stray continuation with no lead in reach)
/// are not a truncation artifact and report 0.
pub fn incomplete_suffix_len(bytes: &[u8]) -> usize {
    let len = bytes.len();
    let floor = len.saturating_sub(4);
    let mut i = len;
    while i > floor {
        let b = bytes[i - 1];
        if b < 0x80 {
            return 0;
        }
        if b >= 0xc0 {
            // lead byte at i-1: incomplete iff its sequence runs past the end
            let have = len - (i - 1);
            return if have < seq_len(b) { have } else { 0 };
        }
        i -= 1; // continuation byte, keep scanning back
    }
    0
}

/// Length of `bytes` after dropping a trailing incomplete sequence.
pub fn crop_incomplete(bytes: &[u8]) -> usize {
    bytes.len() - incomplete_suffix_len(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_content_is_untouched() {
        assert_eq!(incomplete_suffix_len(b""), 0);
        assert_eq!(incomplete_suffix_len(b"abc"), 0);
        assert_eq!(incomplete_suffix_len("aé".as_bytes()), 0);
        assert_eq!(incomplete_suffix_len("a\u{1F600}".as_bytes()), 0);
    }

    #[test]
    fn split_two_byte_sequence() {
        // "é" = C3 A9; keep only the lead
        assert_eq!(incomplete_suffix_len(b"ab\xc3"), 1);
        assert_eq!(crop_incomplete(b"ab\xc3"), 2);
    }

    #[test]
    fn split_four_byte_sequence() {
        // U+1F600 = F0 9F 98 80, cut after 1..3 bytes
        assert_eq!(incomplete_suffix_len(b"x\xf0"), 1);
        assert_eq!(incomplete_suffix_len(b"x\xf0\x9f"), 2);
        assert_eq!(incomplete_suffix_len(b"x\xf0\x9f\x98"), 3);
        assert_eq!(crop_incomplete(b"x\xf0\x9f\x98"), 1);
    }

    #[test]
    fn every_truncation_of_valid_text_crops_to_a_boundary() {
        let s = "aé\u{1F600}z";
        let bytes = s.as_bytes();
        for cut in 0..=bytes.len() {
            let kept = crop_incomplete(&bytes[..cut]);
            assert!(kept <= cut);
            assert!(core::str::from_utf8(&bytes[..kept]).is_ok());
        }
    }

    #[test]
    fn malformed_tails_are_not_cropped() {
        // stray continuation bytes with no lead in reach
        assert_eq!(incomplete_suffix_len(b"ab\x80"), 0);
        assert_eq!(incomplete_suffix_len(b"\x80\x80\x80\x80\x80"), 0);
    }
}
