//! The byte sink contract consumed by the rendering kernel.
//!
//! A [`Sink`] is a bounded, append-only run of bytes. It never grows past
//! its capacity: once full, [`Sink::push_back`] reports failure and leaves
//! the contents untouched. Everything in [`render`](crate::render) and
//! [`stream`](crate::stream) is written against this trait, so any
//! fixed-capacity buffer can sit at the end of the pipeline.
//!
//! Two implementations ship with the crate: the owned
//! [`StaticString<N>`](crate::StaticString) and the borrowed [`SliceSink`].

use core::fmt;

/// A fixed-capacity, push-back-appendable sequence of bytes.
pub trait Sink {
  /// Returns the maximum number of bytes the sink can hold.
  fn capacity(&self) -> usize;

  /// Returns the number of live bytes.
  fn len(&self) -> usize;

  /// Drops every live byte.
  fn clear(&mut self);

  /// Appends `byte` if there is room and returns `true`; otherwise returns
  /// `false` and leaves the sink unchanged.
  fn push_back(&mut self, byte: u8) -> bool;

  /// Returns the live bytes, in the order they were pushed.
  fn as_bytes(&self) -> &[u8];

  /// Returns whether the sink holds no bytes.
  #[inline]
  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns whether another `push_back` would fail.
  #[inline]
  fn is_full(&self) -> bool {
    self.len() >= self.capacity()
  }

  /// Returns how many more bytes fit.
  #[inline]
  fn remaining(&self) -> usize {
    self.capacity().saturating_sub(self.len())
  }

  /// Appends `bytes` in order, stopping at the first byte that does not fit.
  /// Returns `true` only if every byte was appended.
  fn push_slice(&mut self, bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| self.push_back(b))
  }

  /// Appends `count` copies of `byte`, stopping at the first failure.
  fn push_repeat(&mut self, byte: u8, count: usize) -> bool {
    (0..count).all(|_| self.push_back(byte))
  }

  /// Iterates over the live bytes.
  #[inline]
  fn iter(&self) -> core::slice::Iter<'_, u8> {
    self.as_bytes().iter()
  }
}

impl<S: Sink + ?Sized> Sink for &mut S {
  #[inline(always)]
  fn capacity(&self) -> usize {
    (**self).capacity()
  }

  #[inline(always)]
  fn len(&self) -> usize {
    (**self).len()
  }

  #[inline(always)]
  fn clear(&mut self) {
    (**self).clear()
  }

  #[inline(always)]
  fn push_back(&mut self, byte: u8) -> bool {
    (**self).push_back(byte)
  }

  #[inline(always)]
  fn as_bytes(&self) -> &[u8] {
    (**self).as_bytes()
  }
}

/// A [`Sink`] over a caller-provided byte slice.
///
/// The slice's length is the capacity. Useful when the buffer lives in a
/// `static` or is carved out of a larger frame.
///
/// ```rust
/// use stackstream::{Sink, SliceSink};
///
/// let mut raw = [0u8; 4];
/// let mut sink = SliceSink::new(&mut raw);
/// assert!(sink.push_slice(b"abc"));
/// assert!(!sink.push_slice(b"de"));
/// assert_eq!(sink.as_bytes(), b"abcd");
/// ```
pub struct SliceSink<'a> {
  buf: &'a mut [u8],
  len: usize,
}

impl<'a> SliceSink<'a> {
  /// Wraps `buf` as an empty sink.
  #[inline]
  pub fn new(buf: &'a mut [u8]) -> Self {
    Self { buf, len: 0 }
  }

  /// Consumes the sink and returns the written prefix of the slice.
  #[inline]
  pub fn into_written(self) -> &'a mut [u8] {
    let Self { buf, len } = self;
    &mut buf[..len]
  }
}

impl Sink for SliceSink<'_> {
  #[inline]
  fn capacity(&self) -> usize {
    self.buf.len()
  }

  #[inline]
  fn len(&self) -> usize {
    self.len
  }

  #[inline]
  fn clear(&mut self) {
    self.len = 0;
  }

  #[inline]
  fn push_back(&mut self, byte: u8) -> bool {
    match self.buf.get_mut(self.len) {
      Some(slot) => {
        *slot = byte;
        self.len += 1;
        true
      }
      None => false,
    }
  }

  #[inline]
  fn as_bytes(&self) -> &[u8] {
    &self.buf[..self.len]
  }
}

impl fmt::Debug for SliceSink<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SliceSink")
      .field("len", &self.len)
      .field("capacity", &self.buf.len())
      .finish()
  }
}

impl fmt::Write for SliceSink<'_> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    if self.push_slice(s.as_bytes()) {
      Ok(())
    } else {
      Err(fmt::Error)
    }
  }
}
