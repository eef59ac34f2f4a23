use core::cmp::Ordering;
use core::convert::AsRef;
use core::convert::TryFrom;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::fmt::Formatter;
use core::hash::Hash;
use core::hash::Hasher;
use core::ops::Deref;
use core::str;
use core::str::FromStr;

use crate::sink::Sink;

/// Error returned when a string does not fit into a [`StaticString`] of the
/// requested capacity.
///
/// # Example
///
/// ```rust
/// # use stackstream::static_string::*;
/// # use core::convert::TryFrom;
/// # fn main() {
/// let result = StaticString::<4>::try_from("too long");
///
/// assert!(result.is_err());
/// assert!(matches!(result, Err(CapacityError)));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl Display for CapacityError {
  #[inline(always)]
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str("string exceeds the fixed capacity")
  }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

/// A fixed-capacity byte string stored in place, with no heap use.
///
/// `StaticString<N>` owns a `[u8; N]` and a live length. Appending past `N`
/// bytes is a saturating no-op, which makes it the natural [`Sink`] for a
/// [`StringStream`](crate::StringStream).
///
/// The buffer holds bytes, not guaranteed UTF-8: a truncated multi-byte
/// character may leave a partial sequence at the end. [`as_str`] therefore
/// returns the longest valid UTF-8 prefix, while [`as_bytes`] returns
/// everything.
///
/// [`as_str`]: StaticString::as_str
/// [`as_bytes`]: StaticString::as_bytes
///
/// # Example
///
/// ```rust
/// # use stackstream::static_string::*;
/// # fn main() -> Result<(), CapacityError> {
/// let mut s: StaticString<8> = "Hello".parse()?;
/// assert_eq!(s.as_str(), "Hello");
/// assert_eq!(s.len(), 5);
///
/// // Only three more bytes fit:
/// assert!(s.try_push_str(", world").is_err());
/// assert_eq!(s.as_str(), "Hello");
/// s.push_str(", world");
/// assert_eq!(s.as_str(), "Hello, w");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct StaticString<const N: usize> {
  buf: [u8; N],
  len: usize,
}

impl<const N: usize> StaticString<N> {
  /// The fixed capacity in bytes.
  pub const CAPACITY: usize = N;

  /// Creates an empty string.
  #[inline]
  pub const fn new() -> Self {
    Self {
      buf: [0u8; N],
      len: 0,
    }
  }

  /// Returns the length of the string in bytes.
  #[inline]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Returns whether the string is empty.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns the fixed capacity `N`.
  #[inline]
  pub const fn capacity(&self) -> usize {
    N
  }

  /// Returns whether the string has reached its capacity.
  #[inline]
  pub const fn is_full(&self) -> bool {
    self.len == N
  }

  /// Returns how many more bytes fit.
  #[inline]
  pub const fn remaining(&self) -> usize {
    N - self.len
  }

  /// Returns the live bytes.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.buf[..self.len]
  }

  /// Returns the live bytes mutably. The length cannot change through this
  /// slice.
  #[inline]
  pub fn as_bytes_mut(&mut self) -> &mut [u8] {
    &mut self.buf[..self.len]
  }

  /// Returns the longest prefix of the live bytes that is valid UTF-8.
  ///
  /// For content produced from `&str`, integers and booleans this is the
  /// whole string; it is shorter only when truncation split a multi-byte
  /// character or raw bytes were pushed.
  #[inline]
  pub fn as_str(&self) -> &str {
    match str::from_utf8(self.as_bytes()) {
      Ok(s) => s,
      Err(e) => {
        let valid = &self.buf[..e.valid_up_to()];
        // SAFETY: `valid_up_to` marks the end of a valid UTF-8 prefix.
        unsafe { str::from_utf8_unchecked(valid) }
      }
    }
  }

  /// Returns the live bytes as a string, or the UTF-8 error if any byte is
  /// not part of a valid sequence.
  #[inline]
  pub fn to_str(&self) -> Result<&str, str::Utf8Error> {
    str::from_utf8(self.as_bytes())
  }

  /// Appends one byte. Returns `false` and changes nothing when full.
  #[inline]
  pub fn push(&mut self, byte: u8) -> bool {
    if self.len < N {
      self.buf[self.len] = byte;
      self.len += 1;
      true
    } else {
      false
    }
  }

  /// Removes and returns the last byte.
  #[inline]
  pub fn pop(&mut self) -> Option<u8> {
    if self.len == 0 {
      return None;
    }
    self.len -= 1;
    Some(self.buf[self.len])
  }

  /// Appends as much of `s` as fits and returns the number of bytes written.
  pub fn push_str(&mut self, s: &str) -> usize {
    let n = s.len().min(self.remaining());
    self.buf[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
    self.len += n;
    n
  }

  /// Appends all of `s`, or nothing at all if it does not fit.
  pub fn try_push_str(&mut self, s: &str) -> Result<(), CapacityError> {
    if s.len() > self.remaining() {
      return Err(CapacityError);
    }
    self.push_str(s);
    Ok(())
  }

  /// Shortens the string to `len` bytes. Has no effect if `len` is not
  /// shorter than the current length.
  #[inline]
  pub fn truncate(&mut self, len: usize) {
    if len < self.len {
      self.len = len;
    }
  }

  /// Drops every byte.
  #[inline]
  pub fn clear(&mut self) {
    self.len = 0;
  }

  /// Iterates over the live bytes.
  #[inline]
  pub fn iter(&self) -> core::slice::Iter<'_, u8> {
    self.as_bytes().iter()
  }
}

impl<const N: usize> Sink for StaticString<N> {
  #[inline(always)]
  fn capacity(&self) -> usize {
    N
  }

  #[inline(always)]
  fn len(&self) -> usize {
    self.len
  }

  #[inline(always)]
  fn clear(&mut self) {
    StaticString::clear(self)
  }

  #[inline(always)]
  fn push_back(&mut self, byte: u8) -> bool {
    self.push(byte)
  }

  #[inline(always)]
  fn as_bytes(&self) -> &[u8] {
    StaticString::as_bytes(self)
  }

  fn push_slice(&mut self, bytes: &[u8]) -> bool {
    let n = bytes.len().min(self.remaining());
    self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
    self.len += n;
    n == bytes.len()
  }
}

impl<const N: usize> Default for StaticString<N> {
  #[inline(always)]
  fn default() -> Self {
    Self::new()
  }
}

impl<const N: usize> Display for StaticString<N> {
  #[inline(always)]
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl<const N: usize> Debug for StaticString<N> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Debug::fmt(self.as_str(), f)
  }
}

impl<const N: usize> fmt::Write for StaticString<N> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    if self.push_str(s) == s.len() {
      Ok(())
    } else {
      Err(fmt::Error)
    }
  }
}

impl<const N: usize> Deref for StaticString<N> {
  type Target = str;

  #[inline(always)]
  fn deref(&self) -> &str {
    self.as_str()
  }
}

impl<const N: usize> AsRef<str> for StaticString<N> {
  #[inline(always)]
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

impl<const N: usize> AsRef<[u8]> for StaticString<N> {
  #[inline(always)]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl<const N: usize> TryFrom<&str> for StaticString<N> {
  type Error = CapacityError;

  #[inline(always)]
  fn try_from(s: &str) -> Result<Self, CapacityError> {
    let mut out = Self::new();
    out.try_push_str(s)?;
    Ok(out)
  }
}

impl<const N: usize> FromStr for StaticString<N> {
  type Err = CapacityError;

  #[inline(always)]
  fn from_str(s: &str) -> Result<Self, CapacityError> {
    Self::try_from(s)
  }
}

impl<const N: usize> From<char> for StaticString<N> {
  /// Encodes `c` as UTF-8, keeping only the bytes that fit.
  #[inline(always)]
  fn from(c: char) -> Self {
    let mut tmp = [0u8; 4];
    let mut out = Self::new();
    out.push_str(c.encode_utf8(&mut tmp));
    out
  }
}

impl<'a, const N: usize> IntoIterator for &'a StaticString<N> {
  type Item = &'a u8;
  type IntoIter = core::slice::Iter<'a, u8>;

  #[inline(always)]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<const N: usize> Hash for StaticString<N> {
  #[inline(always)]
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.as_bytes().hash(state);
  }
}

impl<const N: usize, const M: usize> PartialEq<StaticString<M>>
  for StaticString<N>
{
  #[inline(always)]
  fn eq(&self, other: &StaticString<M>) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl<const N: usize> Eq for StaticString<N> {}

impl<const N: usize> PartialEq<str> for StaticString<N> {
  #[inline(always)]
  fn eq(&self, other: &str) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl<const N: usize> PartialEq<&str> for StaticString<N> {
  #[inline(always)]
  fn eq(&self, other: &&str) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl<const N: usize> PartialEq<StaticString<N>> for str {
  #[inline(always)]
  fn eq(&self, other: &StaticString<N>) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl<const N: usize> PartialEq<StaticString<N>> for &str {
  #[inline(always)]
  fn eq(&self, other: &StaticString<N>) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl<const N: usize> PartialEq<[u8]> for StaticString<N> {
  #[inline(always)]
  fn eq(&self, other: &[u8]) -> bool {
    self.as_bytes() == other
  }
}

impl<const N: usize> PartialOrd for StaticString<N> {
  #[inline(always)]
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<const N: usize> PartialOrd<str> for StaticString<N> {
  #[inline(always)]
  fn partial_cmp(&self, other: &str) -> Option<Ordering> {
    Some(self.as_bytes().cmp(other.as_bytes()))
  }
}

impl<const N: usize> Ord for StaticString<N> {
  #[inline(always)]
  fn cmp(&self, other: &Self) -> Ordering {
    self.as_bytes().cmp(other.as_bytes())
  }
}

#[cfg(feature = "serde")]
mod serde_impl {
  use super::*;
  use serde::de::Error;
  use serde::de::Visitor;

  impl<const N: usize> serde::Serialize for StaticString<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: serde::Serializer,
    {
      let s = self
        .to_str()
        .map_err(<S::Error as serde::ser::Error>::custom)?;
      serializer.serialize_str(s)
    }
  }

  struct StaticStringVisitor<const N: usize>;

  impl<'de, const N: usize> Visitor<'de> for StaticStringVisitor<N> {
    type Value = StaticString<N>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
      write!(f, "a string of at most {} bytes", N)
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
      StaticString::try_from(v).map_err(E::custom)
    }
  }

  impl<'de, const N: usize> serde::Deserialize<'de> for StaticString<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
      D: serde::Deserializer<'de>,
    {
      deserializer.deserialize_str(StaticStringVisitor::<N>)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_is_empty() {
    let s = StaticString::<16>::new();
    assert!(s.is_empty());
    assert_eq!(s.len(), 0);
    assert_eq!(s.capacity(), 16);
    assert_eq!(StaticString::<16>::CAPACITY, 16);
    assert_eq!(s.as_str(), "");
  }

  #[test]
  fn push_saturates() {
    let mut s = StaticString::<2>::new();
    assert!(s.push(b'a'));
    assert!(s.push(b'b'));
    assert!(s.is_full());
    assert!(!s.push(b'c'));
    assert_eq!(s, "ab");
  }

  #[test]
  fn try_from_exact_fit() {
    let s = StaticString::<5>::try_from("Hello").unwrap();
    assert_eq!(s.len(), 5);
    assert_eq!(s.as_str(), "Hello");
  }

  #[test]
  fn try_from_too_long() {
    let err = StaticString::<4>::try_from("Hello");
    assert!(matches!(err, Err(CapacityError)));
  }

  #[test]
  fn try_push_str_is_all_or_nothing() {
    let mut s: StaticString<6> = "abc".parse().unwrap();
    assert_eq!(s.try_push_str("defg"), Err(CapacityError));
    assert_eq!(s, "abc");
    assert_eq!(s.try_push_str("def"), Ok(()));
    assert_eq!(s, "abcdef");
  }

  #[test]
  fn push_str_truncates() {
    let mut s = StaticString::<4>::new();
    assert_eq!(s.push_str("abcdef"), 4);
    assert_eq!(s, "abcd");
    assert_eq!(s.push_str("x"), 0);
  }

  #[test]
  fn as_str_stops_at_split_character() {
    let mut s = StaticString::<3>::new();
    s.push_str("a");
    Sink::push_slice(&mut s, "é€".as_bytes());
    assert_eq!(s.len(), 3);
    assert_eq!(s.as_str(), "aé");
    assert!(s.to_str().is_ok());

    let mut t = StaticString::<2>::new();
    Sink::push_slice(&mut t, "€".as_bytes());
    assert_eq!(t.len(), 2);
    assert_eq!(t.as_str(), "");
    assert!(t.to_str().is_err());
  }

  #[test]
  fn pop_and_truncate() {
    let mut s: StaticString<8> = "hello".parse().unwrap();
    assert_eq!(s.pop(), Some(b'o'));
    s.truncate(2);
    assert_eq!(s, "he");
    s.truncate(10);
    assert_eq!(s, "he");
    s.clear();
    assert_eq!(s.pop(), None);
  }

  #[test]
  fn from_char() {
    let s: StaticString<4> = 'ü'.into();
    assert_eq!(s.as_str(), "ü");
    let narrow: StaticString<1> = 'ü'.into();
    assert_eq!(narrow.len(), 1);
  }

  #[test]
  fn sink_contract() {
    let mut s = StaticString::<3>::new();
    let sink: &mut dyn Sink = &mut s;
    assert_eq!(sink.capacity(), 3);
    assert!(!sink.push_slice(b"abcd"));
    assert_eq!(sink.len(), 3);
    sink.clear();
    assert!(sink.is_empty());
    assert!(sink.push_repeat(b'z', 3));
    assert_eq!(s, "zzz");
  }

  #[test]
  fn equality_and_ordering() {
    let a: StaticString<8> = "apple".parse().unwrap();
    let b: StaticString<8> = "banana".parse().unwrap();
    let a16: StaticString<16> = "apple".parse().unwrap();
    assert!(a < b);
    assert_eq!(a, a16);
    assert_eq!("apple", a);
    assert!(a == *"apple");
    assert_ne!(a, b);
  }

  #[test]
  fn hash_matches_for_equal_content() {
    use std::collections::hash_map::DefaultHasher;

    let a: StaticString<8> = "same".parse().unwrap();
    let b: StaticString<8> = "same".parse().unwrap();
    let mut h1 = DefaultHasher::new();
    a.hash(&mut h1);
    let mut h2 = DefaultHasher::new();
    b.hash(&mut h2);
    assert_eq!(h1.finish(), h2.finish());
  }

  #[test]
  fn write_macro() {
    use core::fmt::Write;
    let mut s = StaticString::<6>::new();
    assert!(write!(s, "{}-{}", 1, 2).is_ok());
    assert_eq!(s, "1-2");
    assert!(write!(s, "{}", "long").is_err());
    assert_eq!(s, "1-2lon");
  }

  #[test]
  fn display_debug_and_deref() {
    let s: StaticString<8> = "hi".parse().unwrap();
    assert_eq!(std::format!("{}", s), "hi");
    assert_eq!(std::format!("{:?}", s), "\"hi\"");
    assert!(s.starts_with('h'));
    assert_eq!(s.iter().count(), 2);
    assert_eq!((&s).into_iter().copied().sum::<u8>(), b'h' + b'i');
  }

  #[cfg(feature = "serde")]
  mod serde_tests {
    use super::*;
    use serde_json;

    #[test]
    fn serialize_and_deserialize() {
      let s: StaticString<16> = "serde test".parse().unwrap();
      let json = serde_json::to_string(&s).unwrap();
      assert_eq!(json, "\"serde test\"");
      let de: StaticString<16> = serde_json::from_str(&json).unwrap();
      assert_eq!(de, "serde test");
    }

    #[test]
    fn deserialize_escaped_string() {
      let de: StaticString<8> = serde_json::from_str("\"a\\nb\"").unwrap();
      assert_eq!(de, "a\nb");
    }

    #[test]
    fn deserialize_rejects_overflow() {
      let de: Result<StaticString<3>, _> = serde_json::from_str("\"abcd\"");
      assert!(de.is_err());
    }

    #[test]
    fn serialize_rejects_invalid_utf8() {
      let mut s = StaticString::<4>::new();
      Sink::push_slice(&mut s, b"ab\xffcd");
      assert_eq!(s.len(), 4);
      assert!(serde_json::to_string(&s).is_err());
    }

    #[test]
    fn serialize_rejects_split_character() {
      let mut s = StaticString::<3>::new();
      Sink::push_slice(&mut s, "a€".as_bytes());
      assert_eq!(s.as_str(), "a");
      assert!(serde_json::to_string(&s).is_err());
    }
  }
}
