//! The format state consulted by the rendering kernel.
//!
//! Every field of [`Format`] is an independent option. All of them are
//! sticky except [`Format::width`], which the stream resets to `0` after
//! each rendered value.
//!
//! Each option enum doubles as its own tag: inserting `Alignment::Right`
//! into a [`StringStream`](crate::StringStream) sets the alignment. The
//! canonical constants in [`tags`](crate::tags) are values of these enums.

/// How booleans are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoolStyle {
  /// `0` / `1`.
  #[default]
  Numeric,
  /// `false` / `true`, cased by [`LetterCase`].
  Alpha,
}

/// Case of alphabetic digits and of boolean words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterCase {
  #[default]
  Lower,
  Upper,
}

/// Whether non-negative integers carry a leading `+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignDisplay {
  /// Only negative values carry a sign.
  #[default]
  NegativeOnly,
  /// Non-negative values are prefixed with `+`.
  Always,
}

/// Placement of a value inside a padded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
  /// Value first, fill after.
  #[default]
  Left,
  /// Fill first, value after.
  Right,
}

/// Base used for integer digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "is_variant", derive(derive_more::IsVariant))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Radix {
  Bin,
  Oct,
  #[default]
  Dec,
  Hex,
}

impl Radix {
  /// Returns the numeric base.
  #[inline]
  pub const fn base(self) -> u8 {
    match self {
      Radix::Bin => 2,
      Radix::Oct => 8,
      Radix::Dec => 10,
      Radix::Hex => 16,
    }
  }
}

/// The complete set of formatting options.
///
/// # Example
///
/// ```rust
/// # use stackstream::format::*;
/// let fmt = Format::default();
/// assert_eq!(fmt.alignment, Alignment::Left);
/// assert_eq!(fmt.fill, b' ');
/// assert_eq!(fmt.width, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Format {
  pub bool_style: BoolStyle,
  pub case:       LetterCase,
  pub sign:       SignDisplay,
  pub alignment:  Alignment,
  pub radix:      Radix,
  /// Padding byte. Sticky.
  pub fill:       u8,
  /// Minimum field width in bytes. One-shot.
  pub width:      usize,
}

impl Format {
  /// The defaults: numeric booleans, lower case, no `+`, left alignment,
  /// decimal, space fill, no width.
  pub const DEFAULT: Format = Format {
    bool_style: BoolStyle::Numeric,
    case:       LetterCase::Lower,
    sign:       SignDisplay::NegativeOnly,
    alignment:  Alignment::Left,
    radix:      Radix::Dec,
    fill:       b' ',
    width:      0,
  };

  /// Returns the default format.
  #[inline]
  pub const fn new() -> Self {
    Self::DEFAULT
  }

  /// Restores every field to its default.
  #[inline]
  pub fn reset(&mut self) {
    *self = Self::DEFAULT;
  }

  /// Returns how many fill bytes a value with `core_len` intrinsic bytes
  /// needs to reach the configured width.
  #[inline]
  pub const fn padding_for(&self, core_len: usize) -> usize {
    self.width.saturating_sub(core_len)
  }
}

impl Default for Format {
  #[inline(always)]
  fn default() -> Self {
    Self::DEFAULT
  }
}
