// StackStr<U, N>: the composed fixed-capacity string type.
// Every public operation leaves the store bounded (len <= N-1) and
// sentinel-terminated; truncation is silent, rejection is a bool, and the
// only UB lives behind the two *_unchecked escape hatches.

use core::fmt::{self, Write};
use core::ops::{Index, IndexMut};

use crate::ascii;
use crate::buf::{StrBuf, Unit};
use crate::fmt::{BoundedFmt, UncheckedFmt};

/// Fixed-capacity sentinel-terminated string over `N` units of width `U`.
/// Unit `N-1` is reserved for the sentinel, so content holds at most `N-1`
/// units. Plain value type: `Copy` duplicates the whole store.
#[derive(Clone, Copy)]
pub struct StackStr<U: Unit, const N: usize> {
    buf: StrBuf<U, N>,
}

/// Byte-oriented variant storing UTF-8; truncation can split a scalar, so
/// [`StackStr::crop_incomplete_utf8`] does real work here.
pub type NarrowStr<const N: usize> = StackStr<u8, N>;

/// Scalar-oriented variant storing decoded `char`s; truncation can never
/// split a character and cropping is a no-op.
#[cfg(feature = "wide")]
pub type WideStr<const N: usize> = StackStr<char, N>;

impl<U: Unit, const N: usize> StackStr<U, N> {
    pub const fn new() -> Self {
        Self { buf: StrBuf::new() }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.buf.is_full()
    }

    /// Logical content as a unit view.
    #[inline]
    pub fn as_units(&self) -> &[U] {
        self.buf.content()
    }

    /// Writable access to the raw store for interop with unit-producing
    /// APIs. Callers must keep a sentinel at or before index N-1.
    #[inline]
    pub fn units_mut(&mut self) -> &mut [U; N] {
        self.buf.units_mut()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, U> {
        self.buf.iter()
    }

    pub fn first(&self) -> Option<U> {
        self.buf.first()
    }

    /// Last content unit, the one just before the sentinel.
    pub fn last(&self) -> Option<U> {
        self.buf.last()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Shorten content to `new_len` units. Growing is a precondition
    /// violation, checked in debug builds only. Cutting byte content inside
    /// a multi-byte scalar is allowed; follow with
    /// [`crop_incomplete_utf8`](Self::crop_incomplete_utf8).
    pub fn truncate(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.len(), "truncate cannot grow");
        self.buf.units_mut()[new_len] = U::NUL;
    }

    /// Replace content with `s`, silently truncated to fit.
    pub fn assign(&mut self, s: &str) {
        let n = U::append_str(self.buf.writable(), s);
        self.buf.units_mut()[n] = U::NUL;
    }

    /// Append `s`, silently truncated to the remaining room.
    pub fn append(&mut self, s: &str) {
        let at = self.len();
        let n = U::append_str(&mut self.buf.writable()[at..], s);
        self.buf.units_mut()[at + n] = U::NUL;
    }

    /// Replace content with a same-width unit view, truncated to fit.
    pub fn assign_units(&mut self, v: &[U]) {
        let dst = self.buf.writable();
        let n = v.len().min(dst.len());
        dst[..n].copy_from_slice(&v[..n]);
        self.buf.units_mut()[n] = U::NUL;
    }

    /// Append a same-width unit view, truncated to the remaining room.
    pub fn append_units(&mut self, v: &[U]) {
        let at = self.len();
        let dst = &mut self.buf.writable()[at..];
        let n = v.len().min(dst.len());
        dst[..n].copy_from_slice(&v[..n]);
        self.buf.units_mut()[at + n] = U::NUL;
    }

    /// Append one unit. Returns false (buffer untouched) when no room
    /// remains; never truncates.
    pub fn push_back(&mut self, u: U) -> bool {
        let len = self.len();
        if len >= N - 1 {
            return false;
        }
        let units = self.buf.units_mut();
        units[len] = u;
        units[len + 1] = U::NUL;
        true
    }

    pub fn equals(&self, other: &[U]) -> bool {
        self.as_units() == other
    }

    pub fn starts_with(&self, prefix: &[U]) -> bool {
        self.as_units().starts_with(prefix)
    }

    pub fn contains(&self, needle: &[U]) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.as_units().windows(needle.len()).any(|w| w == needle)
    }

    /// Replace content with ASCII bytes from `src`, skipping non-ASCII
    /// bytes, bounded by capacity. A NUL in `src` ends the copy.
    pub fn set_ascii(&mut self, src: &[u8]) {
        let n = ascii::copy_ascii(self.buf.writable(), src);
        self.buf.units_mut()[n] = U::NUL;
    }

    /// Drop every non-ASCII unit of the current content in place.
    /// Idempotent.
    pub fn clean_ascii(&mut self) {
        let len = self.len();
        let kept = ascii::retain_ascii(&mut self.buf.units_mut()[..len]);
        self.buf.units_mut()[kept] = U::NUL;
    }

    /// Replace content from a NUL-delimited UTF-8 byte sequence, bounded by
    /// capacity. Returns false on malformed input; the buffer is then left
    /// empty (and still terminated). On truncation the content never ends
    /// mid-scalar.
    pub fn set_utf8(&mut self, src: &[u8]) -> bool {
        let src = match src.iter().position(|&b| b == 0) {
            Some(nul) => &src[..nul],
            None => src,
        };
        match core::str::from_utf8(src) {
            Ok(s) => {
                self.assign(s);
                self.crop_incomplete_utf8();
                true
            }
            Err(err) => {
                log::warn!(
                    "rejecting malformed utf-8 input at byte {}",
                    err.valid_up_to()
                );
                self.clear();
                false
            }
        }
    }

    /// Drop a trailing incomplete multi-byte sequence left behind by a
    /// truncation ([`truncate`](Self::truncate), a bounding
    /// [`set_ascii`](Self::set_ascii) of raw bytes, or a formatted write
    /// that hit the capacity limit). No-op for the wide variant and for
    /// content already ending on a scalar boundary.
    pub fn crop_incomplete_utf8(&mut self) {
        let len = self.len();
        let new_len = U::crop_incomplete(&self.buf.units()[..len]);
        if new_len < len {
            self.buf.units_mut()[new_len] = U::NUL;
        }
    }

    /// Render `args` from offset 0, truncating at exactly `N-1` units.
    /// Returns the produced content view; an erroring `Display` impl yields
    /// an empty view with the store still bounded and terminated.
    ///
    /// Byte-width truncation may split a trailing scalar; crop afterwards
    /// if the content must stay valid UTF-8.
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> &[U] {
        let mut sink = BoundedFmt::new(self.buf.writable());
        let res = sink.write_fmt(args);
        let n = sink.written();
        self.buf.units_mut()[n] = U::NUL;
        match res {
            Ok(()) => &self.buf.units()[..n],
            Err(_) => &[],
        }
    }

    /// Render `args` starting at the current length. The formatter is
    /// handed the remaining span below the reserved sentinel slot and keeps
    /// one slot of that window for termination.
    pub fn append_format(&mut self, args: fmt::Arguments<'_>) -> &[U] {
        let at = self.len();
        let room = (N - 1).saturating_sub(at + 1);
        let mut sink = BoundedFmt::new(&mut self.buf.writable()[at..at + room]);
        let res = sink.write_fmt(args);
        let n = sink.written();
        self.buf.units_mut()[at + n] = U::NUL;
        match res {
            Ok(()) => &self.buf.units()[at..at + n],
            Err(_) => &[],
        }
    }

    /// Render `args` from offset 0 with no bound check.
    ///
    /// # Safety
    ///
    /// The rendered output plus a terminator must fit in `N` units; the
    /// caller must have proven the fit. Checked only by a debug assertion.
    pub unsafe fn format_unchecked(&mut self, args: fmt::Arguments<'_>) -> &[U] {
        let mut sink = unsafe { UncheckedFmt::new(self.buf.units_mut().as_mut_ptr(), N) };
        let res = sink.write_fmt(args);
        let n = sink.written();
        self.buf.units_mut()[n] = U::NUL;
        match res {
            Ok(()) => &self.buf.units()[..n],
            Err(_) => &[],
        }
    }

    /// Append ASCII bytes (non-ASCII skipped, NUL-delimited) with no bound
    /// check.
    ///
    /// # Safety
    ///
    /// The appended bytes plus a terminator must fit in `N` units; the
    /// caller must have proven the fit. Checked only by a debug assertion.
    pub unsafe fn append_ascii_unchecked(&mut self, src: &[u8]) {
        let mut n = self.len();
        let ptr = self.buf.units_mut().as_mut_ptr();
        for &b in src {
            if b == 0 {
                break;
            }
            if b < 0x80 {
                debug_assert!(n < N - 1, "unchecked ascii append past the store");
                unsafe { ptr.add(n).write(U::from_ascii(b)) };
                n += 1;
            }
        }
        unsafe { ptr.add(n).write(U::NUL) };
    }
}

impl<const N: usize> NarrowStr<N> {
    /// Content as &str; yields "" if the bytes are not valid UTF-8
    /// (possible after a raw truncation or unit-level writes).
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_units()).unwrap_or("")
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_units()
    }
}

#[cfg(feature = "wide")]
impl<const N: usize> WideStr<N> {
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.as_units().iter().copied()
    }
}

impl<U: Unit, const N: usize> Default for StackStr<U, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit, const N: usize> From<&str> for StackStr<U, N> {
    /// Construct from a view, silently truncated to fit.
    fn from(s: &str) -> Self {
        let mut out = Self::new();
        out.assign(s);
        out
    }
}

/// Appending truncating writer, so `write!(buf, ..)` works directly.
/// Overflow is silent; an Err can only come from a failing Display impl.
impl<U: Unit, const N: usize> Write for StackStr<U, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let at = self.len();
        let n = U::append_str(&mut self.buf.writable()[at..], s);
        self.buf.units_mut()[at + n] = U::NUL;
        Ok(())
    }
}

impl<U: Unit, const N: usize> fmt::Display for StackStr<U, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        U::fmt_content(self.as_units(), f)
    }
}

impl<U: Unit, const N: usize> fmt::Debug for StackStr<U, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        U::fmt_content(self.as_units(), f)?;
        f.write_char('"')
    }
}

/// Content comparison; capacities never participate, so instances of
/// different capacities with identical text compare equal.
impl<U: Unit, const N: usize, const M: usize> PartialEq<StackStr<U, M>> for StackStr<U, N> {
    fn eq(&self, other: &StackStr<U, M>) -> bool {
        self.as_units() == other.as_units()
    }
}

impl<U: Unit, const N: usize> Eq for StackStr<U, N> {}

impl<U: Unit, const N: usize, const M: usize> PartialOrd<StackStr<U, M>> for StackStr<U, N> {
    fn partial_cmp(&self, other: &StackStr<U, M>) -> Option<core::cmp::Ordering> {
        Some(self.as_units().cmp(other.as_units()))
    }
}

impl<U: Unit, const N: usize> Ord for StackStr<U, N> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_units().cmp(other.as_units())
    }
}

impl<U: Unit, const N: usize> PartialEq<[U]> for StackStr<U, N> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_units() == other
    }
}

impl<const N: usize> PartialEq<&str> for NarrowStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_units() == other.as_bytes()
    }
}

#[cfg(feature = "wide")]
impl<const N: usize> PartialEq<&str> for WideStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.chars().eq(other.chars())
    }
}

/// Unit access. Bounds beyond a debug assertion are the caller's problem;
/// `i == len()` reads the sentinel.
impl<U: Unit, const N: usize> Index<usize> for StackStr<U, N> {
    type Output = U;

    fn index(&self, i: usize) -> &U {
        debug_assert!(i <= self.len());
        &self.buf.units()[i]
    }
}

impl<U: Unit, const N: usize> IndexMut<usize> for StackStr<U, N> {
    fn index_mut(&mut self, i: usize) -> &mut U {
        debug_assert!(i <= self.len());
        &mut self.buf.units_mut()[i]
    }
}
