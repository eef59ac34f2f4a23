//! The stream facade.
//!
//! A [`StringStream`] borrows a [`Sink`] and owns a [`Format`]. Everything
//! inserted with `<<` (or [`StringStream::insert`]) is either a tag, which
//! folds into the format, or a value, which is rendered into the sink. After
//! every value the one-shot width goes back to `0`; every other option
//! sticks until another tag changes it.
//!
//! ```rust
//! use stackstream::tags::*;
//! use stackstream::{StaticString, StringStream};
//!
//! let mut buf = StaticString::<32>::new();
//! let mut ss = StringStream::new(&mut buf);
//! let _ = &mut ss << "id=" << set_width(4) << RIGHT_ALIGN << 7u8 << " ok=" << BOOL_ALPHA << true;
//! assert_eq!(ss.str().as_str(), "id=   7 ok=true");
//! ```
//!
//! The sink never overflows: a value that does not fit is cut off where the
//! sink filled up, and the stream stays usable.

use core::fmt;
use core::ops::Shl;

use crate::format::Alignment;
use crate::format::BoolStyle;
use crate::format::Format;
use crate::format::LetterCase;
use crate::format::Radix;
use crate::format::SignDisplay;
use crate::render::Render;
use crate::sink::Sink;
use crate::tags::SetFill;
use crate::tags::SetWidth;
use crate::tags::Tag;

/// Anything that can appear on the right of `<<`.
///
/// Implemented by every tag type, and by every [`Render`] value. User types
/// should implement [`Render`] rather than this trait.
pub trait Insert {
  fn insert_into<S: Sink + ?Sized>(self, stream: &mut StringStream<'_, S>);
}

impl<T: Render> Insert for T {
  #[inline(always)]
  fn insert_into<S: Sink + ?Sized>(self, stream: &mut StringStream<'_, S>) {
    stream.put(&self);
  }
}

macro_rules! impl_insert_for_tags {
  ($($tag:ty),+ $(,)?) => {$(
    impl Insert for $tag {
      #[inline(always)]
      fn insert_into<S: Sink + ?Sized>(self, stream: &mut StringStream<'_, S>) {
        stream.apply(self);
      }
    }
  )+};
}

impl_insert_for_tags!(
  SetWidth,
  SetFill,
  BoolStyle,
  LetterCase,
  SignDisplay,
  Alignment,
  Radix,
);

/// A formatter bound to a borrowed sink.
///
/// The stream cannot be copied and does not own its sink; the sink outlives
/// it and can be read back with [`str`](StringStream::str) at any time.
pub struct StringStream<'a, S: Sink + ?Sized> {
  sink:   &'a mut S,
  format: Format,
}

impl<'a, S: Sink + ?Sized> StringStream<'a, S> {
  /// Binds a stream with the default format to `sink`. The sink's current
  /// contents are kept.
  #[inline]
  pub fn new(sink: &'a mut S) -> Self {
    Self::with_format(sink, Format::DEFAULT)
  }

  /// Binds a stream with a preset format to `sink`.
  #[inline]
  pub fn with_format(sink: &'a mut S, format: Format) -> Self {
    Self { sink, format }
  }

  /// Returns the sink.
  #[inline]
  pub fn str(&self) -> &S {
    &*self.sink
  }

  /// Returns the sink mutably.
  #[inline]
  pub fn str_mut(&mut self) -> &mut S {
    &mut *self.sink
  }

  /// Returns the current format.
  #[inline]
  pub fn format(&self) -> &Format {
    &self.format
  }

  /// Empties the sink and restores the default format.
  pub fn clear(&mut self) {
    self.sink.clear();
    self.format.reset();
  }

  /// Inserts a tag or a value; the method form of `<<`.
  #[inline]
  pub fn insert<T: Insert>(&mut self, item: T) -> &mut Self {
    item.insert_into(self);
    self
  }

  /// Folds `tag` into the format. The sink is not touched.
  #[inline]
  pub fn apply<T: Tag>(&mut self, tag: T) -> &mut Self {
    tag.apply(&mut self.format);
    self
  }

  /// Renders `value` and resets the width. Returns `false` if the value was
  /// cut off by the sink's capacity.
  pub fn put<T: Render + ?Sized>(&mut self, value: &T) -> bool {
    let complete = value.render(&mut *self.sink, &self.format);
    self.format.width = 0;
    if !complete {
      crate::trace!("stream truncated at capacity {}", self.sink.capacity());
    }
    complete
  }
}

impl<'s, 'a, S, T> Shl<T> for &'s mut StringStream<'a, S>
where
  S: Sink + ?Sized,
  T: Insert,
{
  type Output = &'s mut StringStream<'a, S>;

  #[inline(always)]
  fn shl(self, item: T) -> Self::Output {
    item.insert_into(self);
    self
  }
}

/// Raw text written through `write!` bypasses the format entirely.
impl<S: Sink + ?Sized> fmt::Write for StringStream<'_, S> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    if self.sink.push_slice(s.as_bytes()) {
      Ok(())
    } else {
      Err(fmt::Error)
    }
  }
}

impl<S: Sink + ?Sized> fmt::Debug for StringStream<'_, S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StringStream")
      .field("len", &self.sink.len())
      .field("capacity", &self.sink.capacity())
      .field("format", &self.format)
      .finish()
  }
}
