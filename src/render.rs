//! The rendering kernel.
//!
//! [`Render`] turns a value into bytes in a [`Sink`], honoring a [`Format`].
//! Every implementation follows the same two steps: produce the value's
//! *core* bytes (sign included, no padding), then hand them to
//! [`write_field`], which pads to the configured width on the configured
//! side.
//!
//! Output stops at the first byte the sink rejects. Nothing is reported
//! beyond the `bool` returned by [`Render::render`]; a partially written
//! field is the intended outcome of running out of room.
//!
//! User types plug in by implementing [`Render`]:
//!
//! ```rust
//! use stackstream::render::{write_field, Render};
//! use stackstream::{Format, Sink, StaticString, StringStream};
//! use stackstream::tags::*;
//!
//! struct Celsius(i8);
//!
//! impl Render for Celsius {
//!   fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
//!     let mut digits = StaticString::<8>::new();
//!     let inner = Format { width: 0, ..*fmt };
//!     self.0.render(&mut digits, &inner);
//!     write_field(sink, fmt, &[digits.as_bytes(), "°C".as_bytes()])
//!   }
//! }
//!
//! let mut buf = StaticString::<16>::new();
//! let mut ss = StringStream::new(&mut buf);
//! let _ = &mut ss << set_width(6) << RIGHT_ALIGN << Celsius(-5);
//! assert_eq!(ss.str().as_str(), " -5°C");
//! ```

use core::fmt;
use core::fmt::Display;
use core::fmt::Write;

use crate::format::Alignment;
use crate::format::BoolStyle;
use crate::format::Format;
use crate::format::LetterCase;
use crate::format::SignDisplay;
use crate::sink::Sink;
use crate::static_string::StaticString;

/// A value that can be written into a [`Sink`].
pub trait Render {
  /// Writes `self` into `sink` under `fmt`, returning `false` if the value
  /// could not be written in full.
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool;
}

impl<T: Render + ?Sized> Render for &T {
  #[inline(always)]
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    (**self).render(sink, fmt)
  }
}

impl<T: Render + ?Sized> Render for &mut T {
  #[inline(always)]
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    (**self).render(sink, fmt)
  }
}

/// Writes the concatenation of `parts` as one field, padded with
/// `fmt.fill` up to `fmt.width` on the side opposite `fmt.alignment`.
///
/// Stops at the first byte `sink` rejects and returns `false`.
pub fn write_field<S: Sink + ?Sized>(
  sink: &mut S,
  fmt: &Format,
  parts: &[&[u8]],
) -> bool {
  let core_len = parts.iter().map(|p| p.len()).sum();
  let pad = fmt.padding_for(core_len);
  match fmt.alignment {
    Alignment::Right => {
      sink.push_repeat(fmt.fill, pad)
        && parts.iter().all(|p| sink.push_slice(p))
    }
    Alignment::Left => {
      parts.iter().all(|p| sink.push_slice(p))
        && sink.push_repeat(fmt.fill, pad)
    }
  }
}

impl Render for str {
  #[inline]
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    write_field(sink, fmt, &[self.as_bytes()])
  }
}

impl Render for [u8] {
  #[inline]
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    write_field(sink, fmt, &[self])
  }
}

impl<const N: usize> Render for StaticString<N> {
  #[inline]
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    write_field(sink, fmt, &[self.as_bytes()])
  }
}

impl Render for char {
  #[inline]
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    let mut tmp = [0u8; 4];
    write_field(sink, fmt, &[self.encode_utf8(&mut tmp).as_bytes()])
  }
}

impl Render for bool {
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    let word: &[u8] = match (fmt.bool_style, fmt.case, *self) {
      (BoolStyle::Numeric, _, false) => b"0",
      (BoolStyle::Numeric, _, true) => b"1",
      (BoolStyle::Alpha, LetterCase::Lower, false) => b"false",
      (BoolStyle::Alpha, LetterCase::Lower, true) => b"true",
      (BoolStyle::Alpha, LetterCase::Upper, false) => b"FALSE",
      (BoolStyle::Alpha, LetterCase::Upper, true) => b"TRUE",
    };
    write_field(sink, fmt, &[word])
  }
}

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Unsigned magnitudes the digit encoder can divide down.
trait Magnitude: Copy {
  /// Returns `(self / base, self % base)`.
  fn div_rem(self, base: u8) -> (Self, u8);

  fn is_zero(self) -> bool;
}

/// Writes the digits of `value` in `fmt.radix` into the tail of `buf` and
/// returns them, most significant first. `buf` must hold at least as many
/// bytes as the type has bits.
fn encode_digits<'b, M: Magnitude>(
  mut value: M,
  fmt: &Format,
  buf: &'b mut [u8],
) -> &'b [u8] {
  let table = match fmt.case {
    LetterCase::Lower => LOWER_DIGITS,
    LetterCase::Upper => UPPER_DIGITS,
  };
  let base = fmt.radix.base();
  let mut pos = buf.len();
  loop {
    let (rest, digit) = value.div_rem(base);
    pos -= 1;
    buf[pos] = table[digit as usize];
    value = rest;
    if value.is_zero() {
      break;
    }
  }
  &buf[pos..]
}

/// Writes a sign (if any) and `digits` as one padded field.
#[inline]
fn write_integer<S: Sink + ?Sized>(
  sink: &mut S,
  fmt: &Format,
  negative: bool,
  digits: &[u8],
) -> bool {
  let sign: &[u8] = match (negative, fmt.sign) {
    (true, _) => b"-",
    (false, SignDisplay::Always) => b"+",
    (false, SignDisplay::NegativeOnly) => b"",
  };
  write_field(sink, fmt, &[sign, digits])
}

macro_rules! impl_render_unsigned {
  ($($t:ty),+ $(,)?) => {$(
    impl Magnitude for $t {
      #[inline(always)]
      fn div_rem(self, base: u8) -> (Self, u8) {
        let base = base as $t;
        (self / base, (self % base) as u8)
      }

      #[inline(always)]
      fn is_zero(self) -> bool {
        self == 0
      }
    }

    impl Render for $t {
      fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
        let mut buf = [0u8; <$t>::BITS as usize];
        let digits = encode_digits(*self, fmt, &mut buf);
        write_integer(sink, fmt, false, digits)
      }
    }
  )+};
}

macro_rules! impl_render_signed {
  ($($t:ty => $u:ty),+ $(,)?) => {$(
    impl Render for $t {
      fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
        let mut buf = [0u8; <$u>::BITS as usize];
        // Two's-complement negation in the unsigned domain, so MIN has a
        // representable magnitude.
        let magnitude: $u = if *self < 0 {
          (!(*self as $u)).wrapping_add(1)
        } else {
          *self as $u
        };
        let digits = encode_digits(magnitude, fmt, &mut buf);
        write_integer(sink, fmt, *self < 0, digits)
      }
    }
  )+};
}

impl_render_unsigned!(u8, u16, u32, u64, u128, usize);
impl_render_signed!(
  i8 => u8,
  i16 => u16,
  i32 => u32,
  i64 => u64,
  i128 => u128,
  isize => usize,
);

/// Counts the bytes a `Display` impl would produce without storing them.
struct Counter(usize);

impl Write for Counter {
  #[inline]
  fn write_str(&mut self, s: &str) -> fmt::Result {
    self.0 += s.len();
    Ok(())
  }
}

/// Forwards formatted text into a sink, failing once the sink is full.
struct SinkWriter<'s, S: Sink + ?Sized>(&'s mut S);

impl<S: Sink + ?Sized> Write for SinkWriter<'_, S> {
  #[inline]
  fn write_str(&mut self, s: &str) -> fmt::Result {
    if self.0.push_slice(s.as_bytes()) {
      Ok(())
    } else {
      Err(fmt::Error)
    }
  }
}

/// Adapter that renders any [`Display`] value, see [`display`].
#[derive(Debug, Clone, Copy)]
pub struct Displayed<T>(pub T);

/// Wraps a [`Display`] value so it can be inserted into a stream.
///
/// The value is formatted twice: once to measure its length for padding,
/// once into the sink. Only the stream's width, fill and alignment apply;
/// the other options are left to the `Display` impl.
///
/// ```rust
/// use stackstream::render::display;
/// use stackstream::tags::*;
/// use stackstream::{StaticString, StringStream};
///
/// let mut buf = StaticString::<16>::new();
/// let mut ss = StringStream::new(&mut buf);
/// let _ = &mut ss << set_width(8) << RIGHT_ALIGN << display(&core::f32::consts::PI);
/// assert_eq!(ss.str().as_str(), "3.1415927");
/// ```
#[inline]
pub fn display<T: Display>(value: T) -> Displayed<T> {
  Displayed(value)
}

impl<T: Display> Render for Displayed<T> {
  fn render<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &Format) -> bool {
    let mut counter = Counter(0);
    // Counting never fails; an error here comes from the Display impl.
    if write!(counter, "{}", self.0).is_err() {
      return false;
    }
    let pad = fmt.padding_for(counter.0);
    match fmt.alignment {
      Alignment::Right => {
        sink.push_repeat(fmt.fill, pad)
          && write!(SinkWriter(&mut *sink), "{}", self.0).is_ok()
      }
      Alignment::Left => {
        write!(SinkWriter(&mut *sink), "{}", self.0).is_ok()
          && sink.push_repeat(fmt.fill, pad)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::format::Radix;
  use crate::tags::*;

  fn render_with<T: Render + ?Sized>(value: &T, fmt: Format) -> StaticString<160> {
    let mut out = StaticString::<160>::new();
    assert!(value.render(&mut out, &fmt));
    out
  }

  fn plain<T: Render + ?Sized>(value: &T) -> StaticString<160> {
    render_with(value, Format::DEFAULT)
  }

  #[test]
  fn unsigned_decimal() {
    assert_eq!(plain(&0u8), "0");
    assert_eq!(plain(&7u8), "7");
    assert_eq!(plain(&255u8), "255");
    assert_eq!(plain(&1337u16), "1337");
    assert_eq!(plain(&u32::MAX), "4294967295");
    assert_eq!(plain(&u64::MAX), "18446744073709551615");
    assert_eq!(plain(&u128::MAX), "340282366920938463463374607431768211455");
    assert_eq!(plain(&1000usize), "1000");
  }

  #[test]
  fn signed_decimal() {
    assert_eq!(plain(&0i8), "0");
    assert_eq!(plain(&-1i8), "-1");
    assert_eq!(plain(&-42i16), "-42");
    assert_eq!(plain(&i32::MAX), "2147483647");
    assert_eq!(plain(&-100isize), "-100");
  }

  #[test]
  fn signed_minimum_values() {
    assert_eq!(plain(&i8::MIN), "-128");
    assert_eq!(plain(&i16::MIN), "-32768");
    assert_eq!(plain(&i32::MIN), "-2147483648");
    assert_eq!(plain(&i64::MIN), "-9223372036854775808");
    assert_eq!(
      plain(&i128::MIN),
      "-170141183460469231731687303715884105728"
    );
  }

  #[test]
  fn show_pos_applies_to_non_negative_only() {
    let fmt = Format::DEFAULT.with(SHOW_POS);
    assert_eq!(render_with(&0u8, fmt), "+0");
    assert_eq!(render_with(&5i32, fmt), "+5");
    assert_eq!(render_with(&-5i32, fmt), "-5");
  }

  #[test]
  fn other_radixes() {
    let hex = Format::DEFAULT.with(HEX);
    assert_eq!(render_with(&0xBEEFu16, hex), "beef");
    assert_eq!(render_with(&0xBEEFu16, hex.with(UPPER_CASE)), "BEEF");
    assert_eq!(render_with(&-255i16, hex), "-ff");
    assert_eq!(render_with(&i8::MIN, hex), "-80");
    assert_eq!(render_with(&u8::MAX, Format::DEFAULT.with(BIN)), "11111111");
    assert_eq!(render_with(&8u8, Format::DEFAULT.with(OCT)), "10");
    assert_eq!(
      render_with(&u128::MAX, Format::DEFAULT.with(BIN)).len(),
      128
    );
    assert_eq!(render_with(&0u32, Format { radix: Radix::Hex, ..hex }), "0");
  }

  #[test]
  fn booleans() {
    assert_eq!(plain(&true), "1");
    assert_eq!(plain(&false), "0");
    let alpha = Format::DEFAULT.with(BOOL_ALPHA);
    assert_eq!(render_with(&true, alpha), "true");
    assert_eq!(render_with(&false, alpha), "false");
    let upper = alpha.with(UPPER_CASE);
    assert_eq!(render_with(&true, upper), "TRUE");
    assert_eq!(render_with(&false, upper), "FALSE");
    assert_eq!(render_with(&true, Format::DEFAULT.with(UPPER_CASE)), "1");
  }

  #[test]
  fn character_sequences() {
    assert_eq!(plain("Hello"), "Hello");
    assert_eq!(plain(&"borrowed"), "borrowed");
    assert_eq!(plain(&b"raw"[..]), "raw");
    assert_eq!(plain(&'x'), "x");
    assert_eq!(plain(&'€'), "€");
    let s: StaticString<4> = "abc".parse().unwrap();
    assert_eq!(plain(&s), "abc");
  }

  #[test]
  fn padding_right_and_left() {
    let right = Format::DEFAULT.with(set_width(5)).with(RIGHT_ALIGN);
    let left = Format::DEFAULT.with(set_width(5));
    assert_eq!(render_with(&42u8, right), "   42");
    assert_eq!(render_with(&42u8, left), "42   ");
    assert_eq!(render_with("ab", right.with(set_fill(b'.'))), "...ab");
    assert_eq!(render_with("ab", left.with(set_fill(b'.'))), "ab...");
  }

  #[test]
  fn width_never_truncates_core() {
    let fmt = Format::DEFAULT.with(set_width(2)).with(RIGHT_ALIGN);
    assert_eq!(render_with(&12345u16, fmt), "12345");
    assert_eq!(render_with("Hello", fmt), "Hello");
  }

  #[test]
  fn fill_goes_before_sign() {
    let fmt = Format::DEFAULT
      .with(set_fill(b'0'))
      .with(set_width(4))
      .with(RIGHT_ALIGN)
      .with(SHOW_POS);
    assert_eq!(render_with(&7i8, fmt), "00+7");
    assert_eq!(render_with(&-7i8, fmt), "00-7");
  }

  #[test]
  fn truncation_stops_at_capacity() {
    let fmt = Format::DEFAULT.with(set_width(10)).with(RIGHT_ALIGN);
    let mut out = StaticString::<3>::new();
    assert!(!1u8.render(&mut out, &fmt));
    assert_eq!(out, "   ");

    let mut out = StaticString::<3>::new();
    assert!(!12345u32.render(&mut out, &Format::DEFAULT));
    assert_eq!(out, "123");

    let mut out = StaticString::<2>::new();
    assert!(!true.render(&mut out, &Format::DEFAULT.with(BOOL_ALPHA)));
    assert_eq!(out, "tr");
  }

  #[test]
  fn write_field_concatenates_parts() {
    let mut out = StaticString::<16>::new();
    let fmt = Format::DEFAULT.with(set_width(8)).with(set_fill(b'_'));
    assert!(write_field(&mut out, &fmt, &[b"ab", b"", b"cd"]));
    assert_eq!(out, "abcd____");
  }

  #[test]
  fn display_adapter_pads() {
    let fmt = Format::DEFAULT.with(set_width(6)).with(RIGHT_ALIGN);
    assert_eq!(render_with(&display(1.5f32), fmt), "   1.5");
    assert_eq!(render_with(&display(-12i32), Format::DEFAULT), "-12");
  }

  #[test]
  fn display_adapter_reports_failing_impl() {
    struct Broken;

    impl Display for Broken {
      fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
      }
    }

    let mut out = StaticString::<8>::new();
    assert!(!display(Broken).render(&mut out, &Format::DEFAULT));
    assert!(out.is_empty());
  }

  #[test]
  fn display_adapter_truncates() {
    let mut out = StaticString::<4>::new();
    assert!(!display("abcdef").render(&mut out, &Format::DEFAULT));
    assert_eq!(out, "abcd");
  }

  #[test]
  fn renders_into_dyn_sink() {
    let mut out = StaticString::<8>::new();
    let sink: &mut dyn Sink = &mut out;
    assert!((-3i64).render(sink, &Format::DEFAULT));
    assert_eq!(out, "-3");
  }
}
