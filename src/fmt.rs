// Bounded core::fmt sinks, the backing of the checked/unchecked format
// tiers. BoundedFmt wraps a fixed window and silently truncates; overflow
// is never reported as fmt::Error, so an Err out of write_fmt can only
// come from a failing Display impl.

use core::fmt::{self, Write};

use crate::buf::Unit;

/// Truncating formatter over a borrowed unit window. The window is the
/// writable span only; terminating the store afterwards is the caller's job.
pub struct BoundedFmt<'a, U: Unit> {
    dst: &'a mut [U],
    pos: usize,
}

impl<'a, U: Unit> BoundedFmt<'a, U> {
    #[inline]
    pub fn new(dst: &'a mut [U]) -> Self {
        Self { dst, pos: 0 }
    }

    /// Units produced so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.pos
    }

    pub fn as_units(&self) -> &[U] {
        &self.dst[..self.pos]
    }
}

impl<U: Unit> Write for BoundedFmt<'_, U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.pos += U::append_str(&mut self.dst[self.pos..], s);
        Ok(())
    }
}

/// Format into `dst` via a closure; returns units written.
#[inline]
pub fn bounded_fmt<U: Unit>(dst: &mut [U], f: impl FnOnce(&mut BoundedFmt<'_, U>)) -> usize {
    let mut w = BoundedFmt::new(dst);
    f(&mut w);
    w.pos
}

/// Formatter with no bound check. Exists for call sites that have already
/// proven the rendered output fits; misuse is undefined behavior, caught
/// only by a debug assertion.
pub struct UncheckedFmt<U: Unit> {
    dst: *mut U,
    pos: usize,
    #[cfg(debug_assertions)]
    cap: usize,
}

impl<U: Unit> UncheckedFmt<U> {
    /// # Safety
    ///
    /// Everything subsequently written, plus a terminator, must fit within
    /// `cap` units starting at `dst`.
    pub unsafe fn new(dst: *mut U, cap: usize) -> Self {
        let _ = cap;
        Self {
            dst,
            pos: 0,
            #[cfg(debug_assertions)]
            cap,
        }
    }

    #[inline]
    pub fn written(&self) -> usize {
        self.pos
    }
}

impl<U: Unit> Write for UncheckedFmt<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        #[cfg(debug_assertions)]
        assert!(
            self.pos + U::str_units(s) < self.cap,
            "unchecked format past the store"
        );
        self.pos += unsafe { U::append_str_raw(self.dst.add(self.pos), s) };
        Ok(())
    }
}
