//! Nativebuf resolves where the data of a typed buffer lives so a native
//! rendering engine can read it in place.
//!
//! A buffer handle holds one of seven numeric element types and a cursor. For
//! the element at the cursor this crate computes the native address (when the
//! caller knows the address of element 0), or the locally accessible block and
//! the byte offset into it, plus the ordinal type tag the engine expects.
//!
//! ```
//! use nativebuf::{backing_block_offset, classify, BufferHandle, ElementType, TypedBuf};
//!
//! let mut indices = [0i32; 8];
//! let mut buf = TypedBuf::wrap_at(&mut indices, 2, 6).unwrap();
//! buf.set_cursor(3).unwrap();
//!
//! let shift = ElementType::Int32.size_shift();
//! assert_eq!(backing_block_offset(&buf, shift), 20);
//!
//! let handle = BufferHandle::from(buf);
//! assert_eq!(classify(&handle), ElementType::Int32.ordinal());
//! ```

#![warn(missing_docs, unreachable_pub)]

#[macro_use]
mod macros;

pub mod buf;

pub use buf::{
    backing_block, backing_block_offset, base_address, classify, BufferHandle, ElementType,
    Transfer, TypedBuf,
};
