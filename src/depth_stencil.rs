use static_assertions::assert_eq_size;

use crate::{
    common::{Bool32, ComparisonFunc},
    macros::native_enum,
};

native_enum! {
    #[derive(Default)]
    pub enum DepthWriteMask("depth write mask") {
        #[default]
        Zero = 0,
        All = 1,
    }
}

native_enum! {
    #[derive(Default)]
    pub enum StencilOp("stencil operation") {
        #[default]
        Keep = 1,
        Zero = 2,
        Replace = 3,
        IncrSat = 4,
        DecrSat = 5,
        Invert = 6,
        Incr = 7,
        Decr = 8,
    }
}

pub const DEFAULT_STENCIL_READ_MASK: u8 = 0xff;
pub const DEFAULT_STENCIL_WRITE_MASK: u8 = 0xff;

/// `D3D11_DEPTH_STENCILOP_DESC`, the stencil behavior of one face.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DepthStencilOpDesc {
    pub stencil_fail_op: StencilOp,
    pub stencil_depth_fail_op: StencilOp,
    pub stencil_pass_op: StencilOp,
    pub stencil_func: ComparisonFunc,
}

impl DepthStencilOpDesc {
    pub const DEFAULT: Self = Self::new(
        StencilOp::Keep,
        StencilOp::Keep,
        StencilOp::Keep,
        ComparisonFunc::Always,
    );

    pub const fn new(
        stencil_fail_op: StencilOp,
        stencil_depth_fail_op: StencilOp,
        stencil_pass_op: StencilOp,
        stencil_func: ComparisonFunc,
    ) -> Self {
        Self {
            stencil_fail_op,
            stencil_depth_fail_op,
            stencil_pass_op,
            stencil_func,
        }
    }
}

impl Default for DepthStencilOpDesc {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `D3D11_DEPTH_STENCIL_DESC`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DepthStencilDesc {
    pub depth_enable: Bool32,
    pub depth_write_mask: DepthWriteMask,
    pub depth_func: ComparisonFunc,
    pub stencil_enable: Bool32,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: DepthStencilOpDesc,
    pub back_face: DepthStencilOpDesc,
}

assert_eq_size!(DepthStencilDesc, [u8; 52]);

impl DepthStencilDesc {
    /// Depth test `Less` with writes, stencil off.
    pub const DEFAULT: Self = Self::depth(DepthWriteMask::All, ComparisonFunc::Less);

    pub const fn depth(depth_write_mask: DepthWriteMask, depth_func: ComparisonFunc) -> Self {
        Self {
            depth_enable: Bool32::TRUE,
            depth_write_mask,
            depth_func,
            stencil_enable: Bool32::FALSE,
            stencil_read_mask: DEFAULT_STENCIL_READ_MASK,
            stencil_write_mask: DEFAULT_STENCIL_WRITE_MASK,
            front_face: DepthStencilOpDesc::DEFAULT,
            back_face: DepthStencilOpDesc::DEFAULT,
        }
    }

    pub fn none() -> Self {
        Self {
            depth_enable: Bool32::FALSE,
            depth_write_mask: DepthWriteMask::Zero,
            ..Self::DEFAULT
        }
    }

    pub fn read_only() -> Self {
        Self::depth(DepthWriteMask::Zero, ComparisonFunc::LessEqual)
    }

    pub fn reverse_z() -> Self {
        Self::depth(DepthWriteMask::All, ComparisonFunc::GreaterEqual)
    }

    pub fn read_only_reverse_z() -> Self {
        Self::depth(DepthWriteMask::Zero, ComparisonFunc::GreaterEqual)
    }

    /// Enables stencil with the same operations on both faces.
    pub fn with_stencil(mut self, face: DepthStencilOpDesc, read_mask: u8, write_mask: u8) -> Self {
        self.stencil_enable = Bool32::TRUE;
        self.stencil_read_mask = read_mask;
        self.stencil_write_mask = write_mask;
        self.front_face = face;
        self.back_face = face;
        self
    }
}

impl Default for DepthStencilDesc {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tests_depth_without_stencil() {
        let desc = DepthStencilDesc::default();

        assert!(desc.depth_enable.get());
        assert_eq!(desc.depth_write_mask, DepthWriteMask::All);
        assert_eq!(desc.depth_func, ComparisonFunc::Less);
        assert!(!desc.stencil_enable.get());
        assert_eq!((desc.stencil_read_mask, desc.stencil_write_mask), (0xff, 0xff));
        for face in [desc.front_face, desc.back_face] {
            assert_eq!(face.stencil_fail_op, StencilOp::Keep);
            assert_eq!(face.stencil_depth_fail_op, StencilOp::Keep);
            assert_eq!(face.stencil_pass_op, StencilOp::Keep);
            assert_eq!(face.stencil_func, ComparisonFunc::Always);
        }
    }

    #[test]
    fn presets() {
        assert!(!DepthStencilDesc::none().depth_enable.get());
        assert_eq!(DepthStencilDesc::read_only().depth_write_mask, DepthWriteMask::Zero);
        assert_eq!(DepthStencilDesc::reverse_z().depth_func, ComparisonFunc::GreaterEqual);
        assert_ne!(DepthStencilDesc::reverse_z(), DepthStencilDesc::read_only_reverse_z());
    }

    #[test]
    fn stencil_applies_to_both_faces() {
        let face = DepthStencilOpDesc::new(
            StencilOp::Keep,
            StencilOp::Incr,
            StencilOp::Replace,
            ComparisonFunc::Equal,
        );
        let desc = DepthStencilDesc::DEFAULT.with_stencil(face, 0x0f, 0xf0);

        assert!(desc.stencil_enable.get());
        assert_eq!(desc.front_face, desc.back_face);
        assert_eq!(desc.back_face.stencil_pass_op, StencilOp::Replace);
        assert_eq!(desc.stencil_write_mask, 0xf0);
    }

    #[test]
    fn bool_equality_ignores_representation() {
        let mut a = DepthStencilDesc::DEFAULT;
        a.depth_enable = Bool32::from(true);
        assert_eq!(a, DepthStencilDesc::DEFAULT);
    }
}
