use nativebuf::buf::{
    backing_block, backing_block_offset, base_address, classify, BlockRef, BufferHandle,
    ElementType, TypedBuf,
};

const SHIFTS: [u32; 4] = [0, 1, 2, 3];

#[test]
fn zero_address_stays_zero() {
    for cursor in [0, 1, 7, 64] {
        let mut handle = BufferHandle::from(TypedBuf::<i16>::native(64));
        handle.set_cursor(cursor).unwrap();
        for shift in SHIFTS {
            assert_eq!(base_address(&handle, 0, shift), 0);
        }
    }
}

#[test]
fn address_moves_with_cursor() {
    let bases = [0x1usize, 0x1000, 0x7fff_0000];
    for cursor in 0..=16 {
        let mut buf = TypedBuf::<u8>::native(16);
        buf.set_cursor(cursor).unwrap();
        for base in bases {
            for shift in SHIFTS {
                assert_eq!(base_address(&buf, base, shift), base + (cursor << shift));
            }
        }
    }
}

#[test]
fn float32_address_at_cursor() {
    let mut buf = TypedBuf::<f32>::native(16);
    buf.set_cursor(4).unwrap();
    assert_eq!(base_address(&buf, 0x1000, 2), 0x1010);
}

#[test]
fn block_offset_from_view_origin_and_cursor() {
    let mut data = [0i32; 32];
    for origin in [0, 2, 5] {
        for cursor in [0, 3, 10] {
            let mut buf = TypedBuf::wrap_at(&mut data, origin, 20).unwrap();
            buf.set_cursor(cursor).unwrap();
            for shift in SHIFTS {
                assert_eq!(backing_block_offset(&buf, shift), (origin + cursor) << shift);
            }
        }
    }
}

#[test]
fn int32_block_offset() {
    let mut data = [0i32; 10];
    let mut handle = BufferHandle::from(TypedBuf::wrap_at(&mut data, 2, 8).unwrap());
    handle.set_cursor(3).unwrap();
    assert_eq!(backing_block_offset(&handle, 2), 20);
    assert!(matches!(backing_block(&handle), Some(BlockRef::Int32(block)) if block.len() == 10));
}

#[test]
fn long64_without_block() {
    let mut handle = BufferHandle::from(TypedBuf::<i64>::native(8));
    handle.set_cursor(5).unwrap();
    assert!(backing_block(&handle).is_none());
    for shift in 0..16 {
        assert_eq!(backing_block_offset(&handle, shift), 0);
    }
}

#[test]
fn every_native_variant_lacks_block() {
    let handles: Vec<BufferHandle<'static>> = vec![
        TypedBuf::<u8>::native(4).into(),
        TypedBuf::<u16>::native(4).into(),
        TypedBuf::<i16>::native(4).into(),
        TypedBuf::<i32>::native(4).into(),
        TypedBuf::<i64>::native(4).into(),
        TypedBuf::<f32>::native(4).into(),
        TypedBuf::<f64>::native(4).into(),
    ];
    for handle in &handles {
        assert!(backing_block(handle).is_none());
        assert_eq!(backing_block_offset(handle, handle.element_type().size_shift()), 0);
    }
}

#[test]
fn tags_are_distinct_and_stable() {
    let handles: Vec<BufferHandle<'static>> = vec![
        TypedBuf::<u8>::native(1).into(),
        TypedBuf::<u16>::native(1).into(),
        TypedBuf::<i16>::native(1).into(),
        TypedBuf::<i32>::native(1).into(),
        TypedBuf::<i64>::native(1).into(),
        TypedBuf::<f32>::native(1).into(),
        TypedBuf::<f64>::native(1).into(),
    ];
    for (handle, expected) in handles.iter().zip(ElementType::ALL) {
        assert_eq!(classify(handle), expected.ordinal());
        assert_eq!(classify(handle), classify(handle));
    }
    assert_eq!(classify(&handles[6]), ElementType::Float64.ordinal());
}

#[test]
fn typed_buf_classifies_directly() {
    let mut data = [0u16; 2];
    let buf = TypedBuf::wrap(&mut data);
    assert_eq!(classify(&buf), ElementType::Char16.ordinal());
    assert_eq!(backing_block(&buf).map(|block| block.len()), Some(2));
}

#[test]
fn native_address_wraps_at_pointer_width() {
    let mut handle = BufferHandle::from(TypedBuf::<i64>::native(usize::MAX));
    let cursor = usize::MAX / 2;
    handle.set_cursor(cursor).unwrap();

    for shift in SHIFTS {
        let expected = 0x4000usize.wrapping_add(cursor.wrapping_shl(shift));
        assert_eq!(base_address(&handle, 0x4000, shift), expected);
    }
    assert_eq!(base_address(&handle, 8, usize::BITS), 8usize.wrapping_add(cursor));
}

#[test]
fn block_offset_wraps_at_pointer_width() {
    let mut data = [0u16; 16];
    let mut handle = BufferHandle::from(TypedBuf::wrap_at(&mut data, 4, 8).unwrap());
    handle.set_cursor(6).unwrap();

    assert_eq!(backing_block_offset(&handle, usize::BITS), 10);
    assert_eq!(backing_block_offset(&handle, usize::BITS - 1), 0);
    assert_eq!(backing_block_offset(&handle, usize::BITS - 2), 1 << (usize::BITS - 1));
}
