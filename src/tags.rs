//! Tag values: insertions that change the format instead of producing
//! output.
//!
//! Each option has its own tag type, so the stream dispatches on the type of
//! what is inserted. The option enums from [`format`](crate::format) are tags
//! themselves; [`SetWidth`] and [`SetFill`] carry a payload.
//!
//! ```rust
//! use stackstream::tags::*;
//! use stackstream::{StaticString, StringStream};
//!
//! let mut buf = StaticString::<16>::new();
//! let mut ss = StringStream::new(&mut buf);
//! let _ = &mut ss << set_fill(b'.') << set_width(6) << RIGHT_ALIGN << 42u8;
//! assert_eq!(ss.str().as_bytes(), b"....42");
//! ```

use crate::format::Alignment;
use crate::format::BoolStyle;
use crate::format::Format;
use crate::format::LetterCase;
use crate::format::Radix;
use crate::format::SignDisplay;

/// A value that mutates a [`Format`] when inserted.
pub trait Tag: Copy {
  /// Folds this tag into `fmt`.
  fn apply(self, fmt: &mut Format);
}

/// Sets the minimum width of the next rendered value only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "constructors", derive(derive_more::Constructor))]
pub struct SetWidth(pub usize);

/// Sets the padding byte for every following value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "constructors", derive(derive_more::Constructor))]
pub struct SetFill(pub u8);

#[cfg(not(feature = "constructors"))]
impl SetWidth {
  /// Creates a new `SetWidth`.
  pub const fn new(width: usize) -> Self {
    Self(width)
  }
}

#[cfg(not(feature = "constructors"))]
impl SetFill {
  /// Creates a new `SetFill`.
  pub const fn new(fill: u8) -> Self {
    Self(fill)
  }
}

impl Tag for SetWidth {
  #[inline(always)]
  fn apply(self, fmt: &mut Format) {
    fmt.width = self.0;
  }
}

impl Tag for SetFill {
  #[inline(always)]
  fn apply(self, fmt: &mut Format) {
    fmt.fill = self.0;
  }
}

impl Tag for BoolStyle {
  #[inline(always)]
  fn apply(self, fmt: &mut Format) {
    fmt.bool_style = self;
  }
}

impl Tag for LetterCase {
  #[inline(always)]
  fn apply(self, fmt: &mut Format) {
    fmt.case = self;
  }
}

impl Tag for SignDisplay {
  #[inline(always)]
  fn apply(self, fmt: &mut Format) {
    fmt.sign = self;
  }
}

impl Tag for Alignment {
  #[inline(always)]
  fn apply(self, fmt: &mut Format) {
    fmt.alignment = self;
  }
}

impl Tag for Radix {
  #[inline(always)]
  fn apply(self, fmt: &mut Format) {
    fmt.radix = self;
  }
}

impl Format {
  /// Returns a copy of this format with `tag` applied.
  #[inline]
  pub fn with<T: Tag>(mut self, tag: T) -> Self {
    tag.apply(&mut self);
    self
  }
}

/// Minimum width for the next value; reset after it is rendered.
#[inline]
pub const fn set_width(width: usize) -> SetWidth {
  SetWidth(width)
}

/// Padding byte for all following values.
#[inline]
pub const fn set_fill(fill: u8) -> SetFill {
  SetFill(fill)
}

pub const BOOL_ALPHA: BoolStyle = BoolStyle::Alpha;
pub const NO_BOOL_ALPHA: BoolStyle = BoolStyle::Numeric;
pub const UPPER_CASE: LetterCase = LetterCase::Upper;
pub const NO_UPPER_CASE: LetterCase = LetterCase::Lower;
pub const SHOW_POS: SignDisplay = SignDisplay::Always;
pub const NO_SHOW_POS: SignDisplay = SignDisplay::NegativeOnly;
pub const LEFT_ALIGN: Alignment = Alignment::Left;
pub const RIGHT_ALIGN: Alignment = Alignment::Right;
pub const BIN: Radix = Radix::Bin;
pub const OCT: Radix = Radix::Oct;
pub const DEC: Radix = Radix::Dec;
pub const HEX: Radix = Radix::Hex;
