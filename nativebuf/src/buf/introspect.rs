//! Address, offset and type-tag queries over buffer handles.
//!
//! Every query is a pure read of the handle. Nothing here fails: a `0`
//! address, a `0` offset or a `None` block tells the caller to skip the
//! corresponding fast path.

use super::{BlockRef, BufferHandle, Element, ElementType, TypedBuf};

/// A buffer handle the introspection queries can read.
pub trait Introspect {
    /// The borrowed backing block type.
    type Block<'b>
    where
        Self: 'b;

    /// The element type the handle was built with.
    fn element_type(&self) -> ElementType;

    /// Current position, in elements.
    fn cursor(&self) -> usize;

    /// Elements between the cursor and the end of the buffer.
    fn remaining(&self) -> usize;

    /// The backing block and the index of logical element 0 within it, if
    /// the storage is locally accessible.
    fn block(&self) -> Option<(Self::Block<'_>, usize)>;

    /// The whole backing block viewed as bytes.
    fn block_bytes(&self) -> Option<&[u8]>;
}

impl<T: Element> Introspect for TypedBuf<'_, T> {
    type Block<'b> = &'b [T] where Self: 'b;

    #[inline]
    fn element_type(&self) -> ElementType {
        T::TYPE
    }

    #[inline]
    fn cursor(&self) -> usize {
        TypedBuf::cursor(self)
    }

    #[inline]
    fn remaining(&self) -> usize {
        TypedBuf::remaining(self)
    }

    #[inline]
    fn block(&self) -> Option<(&[T], usize)> {
        TypedBuf::block(self)
    }

    #[inline]
    fn block_bytes(&self) -> Option<&[u8]> {
        TypedBuf::block(self).map(|(array, _)| bytemuck::cast_slice(array))
    }
}

impl Introspect for BufferHandle<'_> {
    type Block<'b> = BlockRef<'b> where Self: 'b;

    #[inline]
    fn element_type(&self) -> ElementType {
        BufferHandle::element_type(self)
    }

    #[inline]
    fn cursor(&self) -> usize {
        BufferHandle::cursor(self)
    }

    #[inline]
    fn remaining(&self) -> usize {
        BufferHandle::remaining(self)
    }

    #[inline]
    fn block(&self) -> Option<(BlockRef<'_>, usize)> {
        BufferHandle::block(self)
    }

    #[inline]
    fn block_bytes(&self) -> Option<&[u8]> {
        BufferHandle::block(self).map(|(block, _)| block.as_bytes())
    }
}

/// Address of the element at the cursor, given the address of element 0.
///
/// `known_address == 0` means the buffer has no fixed native address and
/// yields `0`. Otherwise the result is `known_address + (cursor << size_shift)`
/// computed in wrapping pointer-width arithmetic.
///
/// # Examples
///
/// ```
/// use nativebuf::buf::{base_address, TypedBuf};
///
/// let mut buf = TypedBuf::<f32>::native(8);
/// buf.set_cursor(4).unwrap();
///
/// assert_eq!(base_address(&buf, 0x1000, 2), 0x1010);
/// assert_eq!(base_address(&buf, 0, 2), 0);
/// ```
#[inline]
pub fn base_address<H: Introspect + ?Sized>(
    handle: &H,
    known_address: usize,
    size_shift: u32,
) -> usize {
    if known_address == 0 {
        return 0;
    }
    known_address.wrapping_add(handle.cursor().wrapping_shl(size_shift))
}

/// The locally accessible block behind `handle`, if there is one.
///
/// The block is borrowed from the handle and is never copied.
#[inline]
pub fn backing_block<H: Introspect + ?Sized>(handle: &H) -> Option<H::Block<'_>> {
    handle.block().map(|(block, _)| block)
}

/// Byte offset, within the backing block, of the element at the cursor.
///
/// Returns `0` when there is no block; only meaningful together with a
/// `Some` from [`backing_block`].
#[inline]
pub fn backing_block_offset<H: Introspect + ?Sized>(handle: &H, size_shift: u32) -> usize {
    match handle.block() {
        Some((_, offset)) => offset.wrapping_add(handle.cursor()).wrapping_shl(size_shift),
        None => 0,
    }
}

/// Ordinal type tag of the handle's elements.
#[inline]
pub fn classify<H: Introspect + ?Sized>(handle: &H) -> u8 {
    match handle.element_type() {
        ElementType::Byte => ElementType::Byte.ordinal(),
        ElementType::Char16 => ElementType::Char16.ordinal(),
        ElementType::Short16 => ElementType::Short16.ordinal(),
        ElementType::Int32 => ElementType::Int32.ordinal(),
        ElementType::Long64 => ElementType::Long64.ordinal(),
        ElementType::Float32 => ElementType::Float32.ordinal(),
        // Whatever is left is taken as Float64 without checking; the set of
        // element types is closed.
        _ => ElementType::Float64.ordinal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_address_sentinel() {
        let mut buf = TypedBuf::<i32>::native(64);
        buf.set_cursor(17).unwrap();
        for shift in 0..8 {
            assert_eq!(base_address(&buf, 0, shift), 0);
        }
    }

    #[test]
    fn base_address_at_cursor_zero() {
        let buf = TypedBuf::<f64>::native(4);
        assert_eq!(base_address(&buf, 0xdead_0000, 3), 0xdead_0000);
    }

    #[test]
    fn base_address_wraps() {
        let mut buf = TypedBuf::<u8>::native(4);
        buf.set_cursor(2).unwrap();
        assert_eq!(base_address(&buf, usize::MAX, 0), 1);
    }

    #[test]
    fn base_address_shift_past_pointer_width() {
        let mut buf = TypedBuf::<i32>::native(usize::MAX);
        let cursor = usize::MAX / 2;
        buf.set_cursor(cursor).unwrap();

        let expected = 0x1000usize.wrapping_add(cursor.wrapping_mul(4));
        assert_eq!(base_address(&buf, 0x1000, 2), expected);
        assert_eq!(base_address(&buf, 0x1000, 2), 0x1000 - 4);
    }

    #[test]
    fn shift_amount_is_masked_to_word_width() {
        let mut buf = TypedBuf::<u8>::native(16);
        buf.set_cursor(5).unwrap();
        assert_eq!(base_address(&buf, 8, usize::BITS), 8 + 5);
        assert_eq!(base_address(&buf, 8, usize::BITS + 1), 8 + 10);
    }

    #[test]
    fn block_offset_wraps() {
        let mut data = [0i64; 8];
        let mut buf = TypedBuf::wrap_at(&mut data, 2, 4).unwrap();
        buf.set_cursor(3).unwrap();

        // 5 << (BITS - 1) keeps only the low bit
        assert_eq!(backing_block_offset(&buf, usize::BITS - 1), 1 << (usize::BITS - 1));
        assert_eq!(backing_block_offset(&buf, usize::BITS), 5);
        assert_eq!(backing_block_offset(&buf, usize::BITS + 3), 40);
    }

    #[test]
    fn block_offset_counts_view_origin() {
        let mut data = [0i32; 8];
        let mut buf = TypedBuf::wrap_at(&mut data, 2, 5).unwrap();
        buf.set_cursor(3).unwrap();
        assert_eq!(backing_block_offset(&buf, 2), 20);
        assert_eq!(backing_block(&buf).map(<[i32]>::len), Some(8));
    }

    #[test]
    fn native_has_no_block() {
        let mut buf = TypedBuf::<i64>::native(10);
        buf.set_cursor(5).unwrap();
        assert!(backing_block(&buf).is_none());
        for shift in 0..8 {
            assert_eq!(backing_block_offset(&buf, shift), 0);
        }
    }

    #[test]
    fn block_aliases_caller_storage() {
        let mut data = [7u16; 4];
        let ptr = data.as_ptr();
        let handle = BufferHandle::from(TypedBuf::wrap(&mut data));
        match backing_block(&handle) {
            Some(BlockRef::Char16(block)) => assert_eq!(block.as_ptr(), ptr),
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn classify_each_variant() {
        let mut b = [0u8; 1];
        let mut c = [0u16; 1];
        let mut s = [0i16; 1];
        let mut i = [0i32; 1];
        let mut l = [0i64; 1];
        let mut f = [0f32; 1];
        let mut d = [0f64; 1];
        let handles: [BufferHandle<'_>; 7] = [
            TypedBuf::wrap(&mut b).into(),
            TypedBuf::wrap(&mut c).into(),
            TypedBuf::wrap(&mut s).into(),
            TypedBuf::wrap(&mut i).into(),
            TypedBuf::wrap(&mut l).into(),
            TypedBuf::wrap(&mut f).into(),
            TypedBuf::wrap(&mut d).into(),
        ];
        let tags: Vec<u8> = handles.iter().map(classify).collect();
        assert_eq!(tags, vec![0, 1, 2, 3, 4, 5, 6]);
    }
}
