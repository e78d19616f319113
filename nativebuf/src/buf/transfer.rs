use std::{error::Error, fmt};

use super::{backing_block_offset, base_address, ElementType, Introspect};

/// Where the bytes of a [`Transfer`] come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'b> {
    /// Native memory at this address.
    Address(usize),
    /// A locally accessible block, starting `offset` bytes in.
    Block {
        /// The whole backing block.
        bytes: &'b [u8],
        /// Byte offset of the element at the cursor.
        offset: usize,
    },
}

/// The elements a rendering engine should read from a buffer handle,
/// starting at its cursor.
///
/// # Examples
///
/// ```
/// use nativebuf::buf::{ElementType, Transfer, TypedBuf};
///
/// let mut vertices = [0.0f32, 1.0, 2.0, 3.0];
/// let mut buf = TypedBuf::wrap(&mut vertices);
/// buf.advance(2).unwrap();
///
/// let transfer = Transfer::resolve(&buf, 0, 2).unwrap();
/// assert_eq!(transfer.element_type(), ElementType::Float32);
/// assert_eq!(transfer.size(), 8);
/// assert_eq!(transfer.data().unwrap().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer<'b> {
    element_type: ElementType,
    size: usize,
    source: Source<'b>,
}

impl<'b> Transfer<'b> {
    /// Resolve a transfer of `count` elements from the cursor of `handle`.
    ///
    /// `known_address` is the native address of element 0, as pinned by the
    /// caller, or `0` when unknown. It is only consulted when the handle has
    /// no locally accessible block.
    pub fn resolve<H>(
        handle: &'b H,
        known_address: usize,
        count: usize,
    ) -> Result<Self, TransferError>
    where
        H: Introspect + ?Sized,
    {
        let element_type = handle.element_type();
        let shift = element_type.size_shift();
        let remaining = handle.remaining();
        if count > remaining {
            trace_transfer!(
                "transfer of {} {} overruns {} remaining",
                count,
                element_type,
                remaining
            );
            return Err(TransferError::Overrun {
                requested: count,
                remaining,
            });
        }
        let size = match count.checked_mul(element_type.byte_width()) {
            Some(size) => size,
            None => {
                trace_transfer!("transfer of {} {} overflows usize bytes", count, element_type);
                return Err(TransferError::TooLarge {
                    requested: count,
                    element_type,
                });
            }
        };

        let source = match handle.block_bytes() {
            Some(bytes) => Source::Block {
                bytes,
                offset: backing_block_offset(handle, shift),
            },
            None => match base_address(handle, known_address, shift) {
                0 => {
                    trace_transfer!("no native address for {} buffer", element_type);
                    return Err(TransferError::Unresolved);
                }
                address => Source::Address(address),
            },
        };
        trace_transfer!(
            "resolved transfer: type={} shift={} count={} source={:?}",
            element_type,
            shift,
            count,
            source
        );
        Ok(Self {
            element_type,
            size,
            source,
        })
    }

    /// Element type of the transferred data.
    #[inline]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Size of the transfer in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Where the data comes from.
    #[inline]
    pub const fn source(&self) -> Source<'b> {
        self.source
    }

    /// The transferred bytes, when they are locally accessible.
    pub fn data(&self) -> Option<&'b [u8]> {
        match self.source {
            Source::Block { bytes, offset } => bytes.get(offset..offset + self.size),
            Source::Address(_) => None,
        }
    }

    /// Pointer to the first transferred byte.
    ///
    /// For native sources this is the cursor-adjusted address. The pointer is
    /// only valid for as long as the caller keeps the memory pinned.
    pub fn as_ptr(&self) -> *const u8 {
        match self.source {
            Source::Block { bytes, offset } => bytes[offset..].as_ptr(),
            Source::Address(address) => address as *const u8,
        }
    }
}

/// A transfer could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// More elements were requested than remain after the cursor.
    Overrun {
        /// Elements requested.
        requested: usize,
        /// Elements between the cursor and the end of the buffer.
        remaining: usize,
    },
    /// The byte size of the requested elements does not fit in `usize`.
    TooLarge {
        /// Elements requested.
        requested: usize,
        /// Element type of the buffer.
        element_type: ElementType,
    },
    /// The buffer has no accessible block and no native address was given.
    Unresolved,
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Overrun {
                requested,
                remaining,
            } => write!(
                f,
                "requested {requested} elements but only {remaining} remain"
            ),
            TransferError::TooLarge {
                requested,
                element_type,
            } => write!(
                f,
                "{requested} {element_type} elements do not fit in the address space"
            ),
            TransferError::Unresolved => write!(
                f,
                "buffer has neither an accessible block nor a native address"
            ),
        }
    }
}

impl Error for TransferError {}
