use std::hash::{Hash, Hasher};

use crate::macros::native_enum;

/// Win32 `BOOL`: a 4-byte integer where any non-zero value is true.
#[repr(transparent)]
#[derive(Clone, Copy, Default)]
pub struct Bool32(i32);

impl Bool32 {
    pub const FALSE: Self = Self(0);
    pub const TRUE: Self = Self(1);

    pub const fn new(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    pub const fn get(self) -> bool {
        self.0 != 0
    }
}

impl PartialEq for Bool32 {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for Bool32 {}

impl Hash for Bool32 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

impl std::fmt::Debug for Bool32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl From<bool> for Bool32 {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<Bool32> for bool {
    fn from(value: Bool32) -> Self {
        value.get()
    }
}

/// Hashes a float so that values comparing equal hash equally (`0.0 == -0.0`).
pub(crate) fn hash_f32<H: Hasher>(value: f32, state: &mut H) {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

native_enum! {
    #[derive(Default)]
    pub enum Usage("usage") {
        #[default]
        Default = 0,
        Immutable = 1,
        Dynamic = 2,
        Staging = 3,
    }
}

native_enum! {
    #[derive(Default)]
    pub enum ResourceDimension("resource dimension") {
        #[default]
        Unknown = 0,
        Buffer = 1,
        Texture1D = 2,
        Texture2D = 3,
        Texture3D = 4,
    }
}

native_enum! {
    #[derive(Default)]
    pub enum ComparisonFunc("comparison function") {
        #[default]
        Never = 1,
        Less = 2,
        Equal = 3,
        LessEqual = 4,
        Greater = 5,
        NotEqual = 6,
        GreaterEqual = 7,
        Always = 8,
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

impl SampleDesc {
    pub const fn new(count: u32, quality: u32) -> Self {
        Self { count, quality }
    }

    pub fn is_multisampled(&self) -> bool {
        self.count > 1
    }
}

impl Default for SampleDesc {
    fn default() -> Self {
        Self {
            count: 1,
            quality: 0,
        }
    }
}

/// `D3D11_BOX`: a half-open region of a subresource.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Box3 {
    pub left: u32,
    pub top: u32,
    pub front: u32,
    pub right: u32,
    pub bottom: u32,
    pub back: u32,
}

impl Box3 {
    pub const fn new(left: u32, top: u32, front: u32, right: u32, bottom: u32, back: u32) -> Self {
        Self {
            left,
            top,
            front,
            right,
            bottom,
            back,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn depth(&self) -> u32 {
        self.back.saturating_sub(self.front)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0 || self.depth() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn bool32_treats_any_nonzero_as_true() {
        assert_eq!(Bool32(7), Bool32::TRUE);
        assert_eq!(hash_of(&Bool32(-1)), hash_of(&Bool32::TRUE));
        assert_ne!(Bool32::FALSE, Bool32::TRUE);
        assert!(!bool::from(Bool32::default()));
    }

    #[test]
    fn signed_zero_hashes_like_zero() {
        let mut a = DefaultHasher::new();
        let mut b = DefaultHasher::new();
        hash_f32(0.0, &mut a);
        hash_f32(-0.0, &mut b);
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn enum_conversions() {
        assert_eq!(ComparisonFunc::try_from(2), Ok(ComparisonFunc::Less));
        assert_eq!(u32::from(Usage::Staging), 3);
        assert_eq!("lessequal".parse::<ComparisonFunc>(), Ok(ComparisonFunc::LessEqual));
        assert_eq!(
            Usage::try_from(9),
            Err(crate::Error::OutOfRange {
                what: "usage",
                value: 9
            })
        );
        assert!(matches!(
            "sometimes".parse::<ComparisonFunc>(),
            Err(crate::Error::UnknownName { .. })
        ));
    }

    #[test]
    fn box_extents() {
        let region = Box3::new(4, 0, 0, 20, 8, 1);
        assert_eq!((region.width(), region.height(), region.depth()), (16, 8, 1));
        assert!(!region.is_empty());
        assert!(Box3::default().is_empty());
    }
}
