// ASCII copy/filter primitives shared by both width variants.
// copy_ascii skips non-ASCII source bytes instead of stopping, so the
// in-place filter and the unchecked append reduce to the same behavior.

use crate::buf::Unit;

/// Bounded copy of ASCII bytes from `src` into `dst`. Non-ASCII bytes are
/// skipped; a NUL byte in `src` ends the copy (source terminator). Stops
/// when `dst` is exhausted. Returns the number of units written; writing
/// the sentinel afterwards is the caller's job.
pub fn copy_ascii<U: Unit>(dst: &mut [U], src: &[u8]) -> usize {
    let mut n = 0;
    for &b in src {
        if b == 0 || n == dst.len() {
            break;
        }
        if b < 0x80 {
            dst[n] = U::from_ascii(b);
            n += 1;
        }
    }
    n
}

/// Drop every non-ASCII unit of `content` in place, keeping the rest
/// contiguous. Returns the new length. Idempotent.
pub fn retain_ascii<U: Unit>(content: &mut [U]) -> usize {
    let mut kept = 0;
    for i in 0..content.len() {
        let u = content[i];
        if u.is_ascii() {
            content[kept] = u;
            kept += 1;
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_skips_non_ascii() {
        let mut dst = [0u8; 8];
        let n = copy_ascii(&mut dst, "aébc".as_bytes());
        assert_eq!(n, 3);
        assert_eq!(&dst[..3], b"abc");
    }

    #[test]
    fn copy_stops_at_source_nul() {
        let mut dst = [0u8; 8];
        let n = copy_ascii(&mut dst, b"ab\0cd");
        assert_eq!(n, 2);
        assert_eq!(&dst[..2], b"ab");
    }

    #[test]
    fn copy_stops_when_dst_exhausted() {
        let mut dst = [0u8; 3];
        let n = copy_ascii(&mut dst, b"abcdef");
        assert_eq!(n, 3);
        assert_eq!(&dst, b"abc");
    }

    #[test]
    fn retain_is_idempotent() {
        let mut content = *b"ab\xc3\xa9cd";
        let n = retain_ascii(&mut content);
        assert_eq!(n, 4);
        assert_eq!(&content[..n], b"abcd");

        let again = retain_ascii(&mut content[..n]);
        assert_eq!(again, 4);
        assert_eq!(&content[..again], b"abcd");
    }

    #[test]
    fn retain_filters_wide_scalars() {
        let mut content = ['a', 'é', 'b'];
        let n = retain_ascii(&mut content);
        assert_eq!(n, 2);
        assert_eq!(&content[..n], &['a', 'b']);
    }
}
