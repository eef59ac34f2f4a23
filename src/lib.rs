//! # stackstream
//!
//! ### Heap-free formatted text for constrained targets
//!
//! This crate is a small formatted-output pipeline for environments where
//! there is no allocator and no `printf`: a fixed-capacity byte buffer, a
//! stream that is configured by inserting tag values, and a set of
//! type-dispatched renderers for integers, booleans and text.
//!
//! ---
//!
//! ## [`StaticString`]
//!
//! A `[u8; N]` plus a length. Appending past `N` bytes silently does
//! nothing, so it can never overflow. It is the usual [`Sink`] at the end of
//! a stream, though anything implementing [`Sink`] will do.
//!
//! ## [`StringStream`]
//!
//! Borrows a sink and carries a [`Format`]. Insert values and tags with
//! `<<`:
//!
//! ```rust
//! use stackstream::tags::*;
//! use stackstream::{StaticString, StringStream};
//!
//! let mut line = StaticString::<32>::new();
//! let mut ss = StringStream::new(&mut line);
//! let _ = &mut ss << "t=" << set_fill(b'0') << set_width(4) << RIGHT_ALIGN << 42u16
//!   << " v=" << SHOW_POS << -7i8 << " " << BOOL_ALPHA << UPPER_CASE << true;
//! assert_eq!(line.as_str(), "t=0042 v=-7 TRUE");
//! ```
//!
//! Width applies to the next value only; fill, alignment, sign, case, radix
//! and boolean style stay until changed.
//!
//! ### Running out of room
//!
//! Rendering never fails loudly. When the sink fills up the current value
//! is cut off and later bytes are dropped. Check
//! [`Sink::len`] against [`Sink::capacity`] when a partial line matters.
//!
//! ---
//!
//! ## `no_std` Support
//!
//! The crate is `no_std` and does not use `alloc`.
//!
//! ---
//!
//! ## Features
//!
//! - `std`: Enables integration with the Rust standard library.
//! - `serde`†: Serialization of [`StaticString`] and [`Format`] via Serde.
//! - `is_variant`†: `is_*` predicates on the option enums.
//! - `constructors`†: `new` constructors on the payload tags.
//! - `log`: Emits a `log` trace record whenever a value is truncated.
//!
//! > † enabled by default

#![cfg_attr(not(any(test, feature = "std")), no_std)]

macro_rules! trace {
  ($($arg:tt)*) => {{
    #[cfg(feature = "log")]
    log::trace!($($arg)*);
  }};
}

pub(crate) use trace;

pub mod format;
pub mod render;
pub mod sink;
pub mod static_string;
pub mod stream;
pub mod tags;

pub use format::*;
pub use render::Render;
pub use sink::*;
pub use static_string::*;
pub use stream::*;
