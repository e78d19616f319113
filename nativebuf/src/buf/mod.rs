//! Typed buffer handles and the queries a native rendering engine needs to
//! read them without copying.
//!
//! A handle is either backed by a locally accessible block (a borrowed slice)
//! or by native memory whose address the caller pins on its own. The queries
//! in this module resolve, for the element at the handle's cursor, its native
//! address, its byte offset within the block, and the handle's type tag.

mod element;
pub use element::{Element, ElementType};

mod handle;
pub use handle::{BlockRef, BoundsError, BufferHandle, TypedBuf};

mod introspect;
pub use introspect::{backing_block, backing_block_offset, base_address, classify, Introspect};

mod transfer;
pub use transfer::{Source, Transfer, TransferError};
