// Sentinel-terminated fixed store.
// StrBuf<U, N> owns [U; N]; index N-1 is reserved so the NUL sentinel
// always fits, even when content fills every other slot.
// Unit abstracts the element width: u8 (UTF-8 bytes) or char (scalars).

use core::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for char {}
}

/// Element width of a [`StrBuf`]: `u8` for UTF-8 byte storage, `char` for
/// decoded scalar storage. Sealed; the two widths differ only in how text
/// is encoded into units and whether truncation can split a character.
pub trait Unit: Copy + Eq + Ord + sealed::Sealed + 'static {
    /// End-of-content sentinel (the zero element).
    const NUL: Self;

    fn is_ascii(self) -> bool;

    fn from_ascii(b: u8) -> Self;

    /// Encode as much of `s` into `dst` as fits and return the unit count.
    /// `u8` copies raw bytes (a trailing scalar may be split at the bound);
    /// `char` copies whole scalars only.
    fn append_str(dst: &mut [Self], s: &str) -> usize;

    /// Number of units `s` would occupy in this width.
    fn str_units(s: &str) -> usize;

    /// Encode all of `s` at `dst` with no bound check; returns units written.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `str_units(s)` units.
    unsafe fn append_str_raw(dst: *mut Self, s: &str) -> usize;

    /// Length of `content` after dropping a trailing incomplete multi-byte
    /// sequence. Identity for `char`: decoded scalars cannot be split.
    fn crop_incomplete(content: &[Self]) -> usize;

    fn fmt_content(content: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Unit for u8 {
    const NUL: Self = 0;

    #[inline]
    fn is_ascii(self) -> bool {
        self < 0x80
    }

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b
    }

    fn append_str(dst: &mut [Self], s: &str) -> usize {
        let n = s.len().min(dst.len());
        dst[..n].copy_from_slice(&s.as_bytes()[..n]);
        n
    }

    #[inline]
    fn str_units(s: &str) -> usize {
        s.len()
    }

    unsafe fn append_str_raw(dst: *mut Self, s: &str) -> usize {
        unsafe { core::ptr::copy_nonoverlapping(s.as_ptr(), dst, s.len()) };
        s.len()
    }

    fn crop_incomplete(content: &[Self]) -> usize {
        crate::utf8::crop_incomplete(content)
    }

    fn fmt_content(content: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(core::str::from_utf8(content).unwrap_or(""))
    }
}

impl Unit for char {
    const NUL: Self = '\0';

    #[inline]
    fn is_ascii(self) -> bool {
        (self as u32) < 0x80
    }

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b as char
    }

    fn append_str(dst: &mut [Self], s: &str) -> usize {
        let mut n = 0;
        for c in s.chars() {
            if n == dst.len() {
                break;
            }
            dst[n] = c;
            n += 1;
        }
        n
    }

    #[inline]
    fn str_units(s: &str) -> usize {
        s.chars().count()
    }

    unsafe fn append_str_raw(dst: *mut Self, s: &str) -> usize {
        let mut n = 0;
        for c in s.chars() {
            unsafe { dst.add(n).write(c) };
            n += 1;
        }
        n
    }

    #[inline]
    fn crop_incomplete(content: &[Self]) -> usize {
        content.len()
    }

    fn fmt_content(content: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use core::fmt::Write;
        for &c in content {
            f.write_char(c)?;
        }
        Ok(())
    }
}

/// Fixed store of `N` units; the last slot is reserved for the sentinel.
/// Pure bounded-array bookkeeping: no encoding checks live here.
#[derive(Clone, Copy)]
pub struct StrBuf<U: Unit, const N: usize> {
    units: [U; N],
}

impl<U: Unit, const N: usize> StrBuf<U, N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "StrBuf needs room for its sentinel") };
        Self {
            units: [U::NUL; N],
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Logical length: units before the first sentinel. O(len) scan;
    /// nothing is cached, so mutators only have to keep the sentinel right.
    pub fn len(&self) -> usize {
        self.units.iter().position(|&u| u == U::NUL).unwrap_or(N - 1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units[0] == U::NUL
    }

    pub fn is_full(&self) -> bool {
        self.len() >= N - 1
    }

    /// The whole store, reserved sentinel slot included.
    #[inline]
    pub fn units(&self) -> &[U; N] {
        &self.units
    }

    /// Writable access to the whole store. Callers must keep a sentinel
    /// at or before index N-1.
    #[inline]
    pub fn units_mut(&mut self) -> &mut [U; N] {
        &mut self.units
    }

    /// The span below the reserved sentinel slot.
    #[inline]
    pub fn writable(&mut self) -> &mut [U] {
        &mut self.units[..N - 1]
    }

    /// Logical content, `[0, len)`.
    pub fn content(&self) -> &[U] {
        &self.units[..self.len()]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, U> {
        self.content().iter()
    }

    pub fn first(&self) -> Option<U> {
        let u = self.units[0];
        (u != U::NUL).then_some(u)
    }

    /// Last content unit, the one just before the sentinel.
    pub fn last(&self) -> Option<U> {
        match self.len() {
            0 => None,
            len => Some(self.units[len - 1]),
        }
    }

    pub fn clear(&mut self) {
        self.units[0] = U::NUL;
    }
}

impl<U: Unit, const N: usize> Default for StrBuf<U, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty_and_terminated() {
        let b = StrBuf::<u8, 8>::new();
        assert_eq!(b.len(), 0);
        assert!(b.is_empty());
        assert!(!b.is_full());
        assert_eq!(b.units()[0], 0);
    }

    #[test]
    fn len_scans_to_first_sentinel() {
        let mut b = StrBuf::<u8, 8>::new();
        b.units_mut()[..4].copy_from_slice(b"abcd");
        b.units_mut()[4] = 0;
        b.units_mut()[5] = b'z'; // garbage past the sentinel is ignored
        assert_eq!(b.len(), 4);
        assert_eq!(b.content(), b"abcd");
        assert_eq!(b.first(), Some(b'a'));
        assert_eq!(b.last(), Some(b'd'));
    }

    #[test]
    fn full_at_capacity_minus_one() {
        let mut b = StrBuf::<u8, 4>::new();
        b.units_mut()[..3].copy_from_slice(b"abc");
        b.units_mut()[3] = 0;
        assert_eq!(b.len(), 3);
        assert!(b.is_full());
        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn unterminated_store_reports_max_content_len() {
        let mut b = StrBuf::<u8, 4>::new();
        b.units_mut().copy_from_slice(b"abcd");
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn wide_store_counts_scalars() {
        let mut b = StrBuf::<char, 4>::new();
        b.units_mut()[0] = 'é';
        b.units_mut()[1] = '\0';
        assert_eq!(b.len(), 1);
        assert_eq!(b.last(), Some('é'));
    }
}
