use std::fmt;

/// Numeric element type held by a buffer handle.
///
/// The discriminants are the ordinal tags handed to the rendering engine, so
/// the variant order is part of the contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    /// 8-bit bytes.
    Byte = 0,
    /// 16-bit unsigned code units.
    Char16 = 1,
    /// 16-bit signed integers.
    Short16 = 2,
    /// 32-bit signed integers.
    Int32 = 3,
    /// 64-bit signed integers.
    Long64 = 4,
    /// 32-bit floats.
    Float32 = 5,
    /// 64-bit floats.
    Float64 = 6,
}

impl ElementType {
    /// Every element type, in ordinal order.
    pub const ALL: [ElementType; 7] = [
        ElementType::Byte,
        ElementType::Char16,
        ElementType::Short16,
        ElementType::Int32,
        ElementType::Long64,
        ElementType::Float32,
        ElementType::Float64,
    ];

    /// The ordinal tag of this type.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a type by its ordinal tag.
    #[inline]
    pub const fn from_ordinal(tag: u8) -> Option<ElementType> {
        if (tag as usize) < Self::ALL.len() {
            Some(Self::ALL[tag as usize])
        } else {
            None
        }
    }

    /// log2 of the element width in bytes.
    ///
    /// This is the shift the rendering binding pairs with each type when it
    /// calls into [`base_address`](super::base_address) and
    /// [`backing_block_offset`](super::backing_block_offset).
    #[inline]
    pub const fn size_shift(self) -> u32 {
        match self {
            ElementType::Byte => 0,
            ElementType::Char16 | ElementType::Short16 => 1,
            ElementType::Int32 | ElementType::Float32 => 2,
            ElementType::Long64 | ElementType::Float64 => 3,
        }
    }

    /// Element width in bytes.
    #[inline]
    pub const fn byte_width(self) -> usize {
        1 << self.size_shift()
    }

    const fn name(self) -> &'static str {
        match self {
            ElementType::Byte => "byte",
            ElementType::Char16 => "char16",
            ElementType::Short16 => "short16",
            ElementType::Int32 => "int32",
            ElementType::Long64 => "long64",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Sealed: `Element` is public but cannot be implemented outside this crate.
#[allow(unreachable_pub)]
mod private {
    pub trait Sealed {}
}

/// A Rust scalar that can back a buffer handle.
///
/// Implemented for exactly one scalar per [`ElementType`]; the set is closed.
pub trait Element: bytemuck::Pod + private::Sealed {
    /// The element type this scalar maps to.
    const TYPE: ElementType;
}

macro_rules! element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl Element for $ty {
                const TYPE: ElementType = ElementType::$variant;
            }
        )*
    };
}

element! {
    u8 => Byte,
    u16 => Char16,
    i16 => Short16,
    i32 => Int32,
    i64 => Long64,
    f32 => Float32,
    f64 => Float64,
}
