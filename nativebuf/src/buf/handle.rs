use std::{error::Error, fmt};

use super::{Element, ElementType};

/// Where the elements of a [`TypedBuf`] live.
enum Backing<'a, T> {
    /// Storage is not locally addressable (e.g. pinned native memory). The
    /// rendering binding resolves its address on its own.
    Native,
    /// Storage is mirrored by a local block; logical element 0 sits at
    /// `array[offset]`.
    Block { array: &'a mut [T], offset: usize },
}

/// A caller-owned view over a fixed-capacity run of `T` with a movable cursor.
///
/// The cursor always satisfies `cursor <= capacity`. For block-backed buffers
/// `offset + capacity <= array.len()` holds as well.
///
/// # Examples
///
/// ```
/// use nativebuf::buf::TypedBuf;
///
/// let mut data = [1.0f32, 2.0, 3.0, 4.0];
/// let mut buf = TypedBuf::wrap(&mut data);
/// buf.advance(1).unwrap();
///
/// assert_eq!(buf.remaining(), 3);
/// assert_eq!(buf.as_slice(), Some(&[2.0f32, 3.0, 4.0][..]));
/// ```
pub struct TypedBuf<'a, T> {
    backing: Backing<'a, T>,
    cursor: usize,
    capacity: usize,
}

impl<'a, T: Element> TypedBuf<'a, T> {
    /// A buffer whose storage is not locally accessible.
    #[inline]
    pub const fn native(capacity: usize) -> Self {
        Self {
            backing: Backing::Native,
            cursor: 0,
            capacity,
        }
    }

    /// A buffer over the whole of `array`.
    #[inline]
    pub fn wrap(array: &'a mut [T]) -> Self {
        let capacity = array.len();
        Self {
            backing: Backing::Block { array, offset: 0 },
            cursor: 0,
            capacity,
        }
    }

    /// A buffer of `capacity` elements starting at `array[offset]`.
    pub fn wrap_at(
        array: &'a mut [T],
        offset: usize,
        capacity: usize,
    ) -> Result<Self, BoundsError> {
        let end = offset.checked_add(capacity).unwrap_or(usize::MAX);
        if end > array.len() {
            return Err(BoundsError {
                position: end,
                limit: array.len(),
            });
        }
        Ok(Self {
            backing: Backing::Block { array, offset },
            cursor: 0,
            capacity,
        })
    }

    /// The element type of this buffer.
    #[inline]
    pub const fn element_type(&self) -> ElementType {
        T::TYPE
    }

    /// Current position, in elements.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Element count, fixed for the lifetime of the buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements between the cursor and the end of the buffer.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// Whether the storage is mirrored by a locally accessible block.
    #[inline]
    pub const fn has_block(&self) -> bool {
        matches!(self.backing, Backing::Block { .. })
    }

    /// Move the cursor to `pos`.
    pub fn set_cursor(&mut self, pos: usize) -> Result<(), BoundsError> {
        if pos > self.capacity {
            return Err(BoundsError {
                position: pos,
                limit: self.capacity,
            });
        }
        self.cursor = pos;
        Ok(())
    }

    /// Move the cursor forward by `n` elements.
    pub fn advance(&mut self, n: usize) -> Result<(), BoundsError> {
        let pos = self.cursor.checked_add(n).unwrap_or(usize::MAX);
        self.set_cursor(pos)
    }

    /// Move the cursor back to 0.
    #[inline]
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// The elements from the cursor to the end, if block-backed.
    pub fn as_slice(&self) -> Option<&[T]> {
        match &self.backing {
            Backing::Native => None,
            Backing::Block { array, offset } => {
                Some(&array[offset + self.cursor..offset + self.capacity])
            }
        }
    }

    /// The elements from the cursor to the end, if block-backed.
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        match &mut self.backing {
            Backing::Native => None,
            Backing::Block { array, offset } => {
                Some(&mut array[*offset + self.cursor..*offset + self.capacity])
            }
        }
    }

    /// The whole backing block and the index of logical element 0 within it.
    #[inline]
    pub(crate) fn block(&self) -> Option<(&[T], usize)> {
        match &self.backing {
            Backing::Native => None,
            Backing::Block { array, offset } => Some((&**array, *offset)),
        }
    }
}

impl<T: Element> fmt::Debug for TypedBuf<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedBuf")
            .field("type", &T::TYPE)
            .field("cursor", &self.cursor)
            .field("capacity", &self.capacity)
            .field("block", &self.block().map(|(array, offset)| (array.len(), offset)))
            .finish()
    }
}

#[cfg(feature = "bytes")]
impl<'a> From<&'a mut bytes::BytesMut> for TypedBuf<'a, u8> {
    #[inline]
    fn from(buf: &'a mut bytes::BytesMut) -> Self {
        TypedBuf::wrap(&mut buf[..])
    }
}

/// A buffer handle of any of the supported element types.
///
/// The variant is fixed when the handle is built, so the element type never
/// has to be recovered by inspection.
#[derive(Debug)]
pub enum BufferHandle<'a> {
    /// A byte buffer.
    Byte(TypedBuf<'a, u8>),
    /// A 16-bit code unit buffer.
    Char16(TypedBuf<'a, u16>),
    /// A 16-bit integer buffer.
    Short16(TypedBuf<'a, i16>),
    /// A 32-bit integer buffer.
    Int32(TypedBuf<'a, i32>),
    /// A 64-bit integer buffer.
    Long64(TypedBuf<'a, i64>),
    /// A 32-bit float buffer.
    Float32(TypedBuf<'a, f32>),
    /// A 64-bit float buffer.
    Float64(TypedBuf<'a, f64>),
}

/// A borrowed backing block of any of the supported element types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockRef<'b> {
    /// Bytes.
    Byte(&'b [u8]),
    /// 16-bit code units.
    Char16(&'b [u16]),
    /// 16-bit integers.
    Short16(&'b [i16]),
    /// 32-bit integers.
    Int32(&'b [i32]),
    /// 64-bit integers.
    Long64(&'b [i64]),
    /// 32-bit floats.
    Float32(&'b [f32]),
    /// 64-bit floats.
    Float64(&'b [f64]),
}

macro_rules! each_variant {
    ($value:expr, $enum:ident, $inner:ident => $body:expr) => {
        match $value {
            $enum::Byte($inner) => $body,
            $enum::Char16($inner) => $body,
            $enum::Short16($inner) => $body,
            $enum::Int32($inner) => $body,
            $enum::Long64($inner) => $body,
            $enum::Float32($inner) => $body,
            $enum::Float64($inner) => $body,
        }
    };
}

impl BufferHandle<'_> {
    /// The element type carried by this handle.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        each_variant!(self, BufferHandle, buf => buf.element_type())
    }

    /// Current position, in elements.
    #[inline]
    pub fn cursor(&self) -> usize {
        each_variant!(self, BufferHandle, buf => buf.cursor())
    }

    /// Element count.
    #[inline]
    pub fn capacity(&self) -> usize {
        each_variant!(self, BufferHandle, buf => buf.capacity())
    }

    /// Elements between the cursor and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        each_variant!(self, BufferHandle, buf => buf.remaining())
    }

    /// Whether the storage is mirrored by a locally accessible block.
    #[inline]
    pub fn has_block(&self) -> bool {
        each_variant!(self, BufferHandle, buf => buf.has_block())
    }

    /// Move the cursor to `pos`.
    pub fn set_cursor(&mut self, pos: usize) -> Result<(), BoundsError> {
        each_variant!(self, BufferHandle, buf => buf.set_cursor(pos))
    }

    /// Move the cursor forward by `n` elements.
    pub fn advance(&mut self, n: usize) -> Result<(), BoundsError> {
        each_variant!(self, BufferHandle, buf => buf.advance(n))
    }

    /// Move the cursor back to 0.
    pub fn rewind(&mut self) {
        each_variant!(self, BufferHandle, buf => buf.rewind())
    }

    pub(crate) fn block(&self) -> Option<(BlockRef<'_>, usize)> {
        match self {
            BufferHandle::Byte(buf) => buf.block().map(|(a, o)| (BlockRef::Byte(a), o)),
            BufferHandle::Char16(buf) => buf.block().map(|(a, o)| (BlockRef::Char16(a), o)),
            BufferHandle::Short16(buf) => buf.block().map(|(a, o)| (BlockRef::Short16(a), o)),
            BufferHandle::Int32(buf) => buf.block().map(|(a, o)| (BlockRef::Int32(a), o)),
            BufferHandle::Long64(buf) => buf.block().map(|(a, o)| (BlockRef::Long64(a), o)),
            BufferHandle::Float32(buf) => buf.block().map(|(a, o)| (BlockRef::Float32(a), o)),
            BufferHandle::Float64(buf) => buf.block().map(|(a, o)| (BlockRef::Float64(a), o)),
        }
    }
}

impl<'b> BlockRef<'b> {
    /// The element type of the block.
    pub fn element_type(&self) -> ElementType {
        match self {
            BlockRef::Byte(_) => ElementType::Byte,
            BlockRef::Char16(_) => ElementType::Char16,
            BlockRef::Short16(_) => ElementType::Short16,
            BlockRef::Int32(_) => ElementType::Int32,
            BlockRef::Long64(_) => ElementType::Long64,
            BlockRef::Float32(_) => ElementType::Float32,
            BlockRef::Float64(_) => ElementType::Float64,
        }
    }

    /// Length of the block in elements.
    pub fn len(&self) -> usize {
        each_variant!(self, BlockRef, block => block.len())
    }

    /// Whether the block holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The block viewed as raw bytes.
    pub fn as_bytes(&self) -> &'b [u8] {
        each_variant!(*self, BlockRef, block => bytemuck::cast_slice(block))
    }
}

macro_rules! from_typed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<TypedBuf<'a, $ty>> for BufferHandle<'a> {
                #[inline]
                fn from(buf: TypedBuf<'a, $ty>) -> Self {
                    BufferHandle::$variant(buf)
                }
            }
        )*
    };
}

from_typed! {
    u8 => Byte,
    u16 => Char16,
    i16 => Short16,
    i32 => Int32,
    i64 => Long64,
    f32 => Float32,
    f64 => Float64,
}

/// A cursor or view bound was outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsError {
    /// The rejected position, in elements.
    pub position: usize,
    /// The largest position that would have been accepted.
    pub limit: usize,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {} is out of bounds (limit {})",
            self.position, self.limit
        )
    }
}

impl Error for BoundsError {}
