// stack-str: fixed-capacity sentinel-terminated strings for no_std text UIs.
// buf:    sentinel-terminated fixed store + element-width (Unit) trait
// ascii:  bounded ASCII copy and in-place non-ASCII filter
// utf8:   trailing-incomplete-sequence cropping for truncated UTF-8
// fmt:    bounded core::fmt sinks (checked truncating + unchecked)
// string: StackStr<U, N> public type; NarrowStr / WideStr width aliases

#![no_std]

pub mod ascii;
pub mod buf;
pub mod fmt;
pub mod string;
pub mod utf8;

pub use buf::{StrBuf, Unit};
#[cfg(feature = "wide")]
pub use string::WideStr;
pub use string::{NarrowStr, StackStr};
