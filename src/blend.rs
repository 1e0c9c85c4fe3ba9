use static_assertions::assert_eq_size;

use crate::{
    common::Bool32,
    error::{Error, Result},
    flags::ColorWriteEnable,
    macros::native_enum,
};

/// Number of simultaneous render targets a blend state covers.
pub const SIMULTANEOUS_RENDER_TARGET_COUNT: usize = 8;

native_enum! {
    pub enum Blend("blend factor") {
        Zero = 1,
        One = 2,
        SrcColor = 3,
        InvSrcColor = 4,
        SrcAlpha = 5,
        InvSrcAlpha = 6,
        DestAlpha = 7,
        InvDestAlpha = 8,
        DestColor = 9,
        InvDestColor = 10,
        SrcAlphaSat = 11,
        BlendFactor = 14,
        InvBlendFactor = 15,
        Src1Color = 16,
        InvSrc1Color = 17,
        Src1Alpha = 18,
        InvSrc1Alpha = 19,
    }
}

native_enum! {
    pub enum BlendOp("blend operation") {
        Add = 1,
        Subtract = 2,
        RevSubtract = 3,
        Min = 4,
        Max = 5,
    }
}

/// `D3D11_RENDER_TARGET_BLEND_DESC`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderTargetBlendDesc {
    pub blend_enable: Bool32,
    pub src_blend: Blend,
    pub dest_blend: Blend,
    pub blend_op: BlendOp,
    pub src_blend_alpha: Blend,
    pub dest_blend_alpha: Blend,
    pub blend_op_alpha: BlendOp,
    pub render_target_write_mask: ColorWriteEnable,
}

assert_eq_size!(RenderTargetBlendDesc, [u8; 32]);

impl RenderTargetBlendDesc {
    /// Blending off, `One`/`Zero`, `Add`, every channel written.
    pub const DEFAULT: Self = Self {
        blend_enable: Bool32::FALSE,
        src_blend: Blend::One,
        dest_blend: Blend::Zero,
        blend_op: BlendOp::Add,
        src_blend_alpha: Blend::One,
        dest_blend_alpha: Blend::Zero,
        blend_op_alpha: BlendOp::Add,
        render_target_write_mask: ColorWriteEnable::ALL,
    };

    /// Blending on with the same factors for color and alpha.
    pub const fn new(src_blend: Blend, dest_blend: Blend) -> Self {
        Self {
            blend_enable: Bool32::TRUE,
            src_blend,
            dest_blend,
            blend_op: BlendOp::Add,
            src_blend_alpha: src_blend,
            dest_blend_alpha: dest_blend,
            blend_op_alpha: BlendOp::Add,
            render_target_write_mask: ColorWriteEnable::ALL,
        }
    }

    pub fn is_blend_enabled(&self) -> bool {
        self.blend_enable.get()
    }
}

impl Default for RenderTargetBlendDesc {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `D3D11_BLEND_DESC`. Equality compares all eight render targets.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlendDesc {
    pub alpha_to_coverage_enable: Bool32,
    pub independent_blend_enable: Bool32,
    render_target: [RenderTargetBlendDesc; SIMULTANEOUS_RENDER_TARGET_COUNT],
}

assert_eq_size!(BlendDesc, [u8; 264]);

impl BlendDesc {
    pub const DEFAULT: Self = Self::with_target(RenderTargetBlendDesc::DEFAULT);

    /// The same blend on every render target, independent blending off.
    pub const fn with_target(target: RenderTargetBlendDesc) -> Self {
        Self {
            alpha_to_coverage_enable: Bool32::FALSE,
            independent_blend_enable: Bool32::FALSE,
            render_target: [target; SIMULTANEOUS_RENDER_TARGET_COUNT],
        }
    }

    pub fn opaque() -> Self {
        Self::DEFAULT
    }

    /// Premultiplied alpha.
    pub fn alpha_blend() -> Self {
        Self::with_target(RenderTargetBlendDesc::new(Blend::One, Blend::InvSrcAlpha))
    }

    pub fn additive() -> Self {
        Self::with_target(RenderTargetBlendDesc::new(Blend::SrcAlpha, Blend::One))
    }

    pub fn non_premultiplied() -> Self {
        Self::with_target(RenderTargetBlendDesc::new(
            Blend::SrcAlpha,
            Blend::InvSrcAlpha,
        ))
    }

    pub fn render_target(&self, index: usize) -> Option<&RenderTargetBlendDesc> {
        self.render_target.get(index)
    }

    pub fn render_target_mut(&mut self, index: usize) -> Option<&mut RenderTargetBlendDesc> {
        self.render_target.get_mut(index)
    }

    /// A copy of all eight render-target blends.
    pub fn render_targets(&self) -> [RenderTargetBlendDesc; SIMULTANEOUS_RENDER_TARGET_COUNT] {
        self.render_target
    }

    pub fn set_render_targets(&mut self, targets: &[RenderTargetBlendDesc]) -> Result<()> {
        self.render_target = targets.try_into().map_err(|_| {
            Error::invalid_size(
                "render target blend array",
                SIMULTANEOUS_RENDER_TARGET_COUNT,
                targets.len(),
            )
        })?;

        Ok(())
    }
}

impl Default for BlendDesc {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blends_nothing_on_every_target() {
        let desc = BlendDesc::default();

        assert!(!desc.alpha_to_coverage_enable.get());
        assert!(!desc.independent_blend_enable.get());
        for target in desc.render_targets() {
            assert!(!target.is_blend_enabled());
            assert_eq!((target.src_blend, target.dest_blend), (Blend::One, Blend::Zero));
            assert_eq!(
                (target.src_blend_alpha, target.dest_blend_alpha),
                (Blend::One, Blend::Zero)
            );
            assert_eq!((target.blend_op, target.blend_op_alpha), (BlendOp::Add, BlendOp::Add));
            assert_eq!(target.render_target_write_mask, ColorWriteEnable::ALL);
        }
    }

    #[test]
    fn render_targets_must_be_exactly_eight() {
        let mut desc = BlendDesc::default();

        for len in [0, 1, 7, 9] {
            let targets = vec![RenderTargetBlendDesc::DEFAULT; len];
            assert_eq!(
                desc.set_render_targets(&targets),
                Err(Error::InvalidSize {
                    what: "render target blend array",
                    expected: 8,
                    actual: len,
                })
            );
        }
        assert_eq!(desc, BlendDesc::default());
    }

    #[test]
    fn render_targets_round_trip_as_copies() {
        let mut desc = BlendDesc::default();
        let mut targets = [RenderTargetBlendDesc::DEFAULT; 8];
        targets[3] = RenderTargetBlendDesc::new(Blend::SrcAlpha, Blend::InvSrcAlpha);

        desc.set_render_targets(&targets).unwrap();
        let mut copy = desc.render_targets();
        assert_eq!(copy, targets);

        copy[0].blend_enable = Bool32::TRUE;
        assert!(!desc.render_target(0).unwrap().is_blend_enabled());
    }

    #[test]
    fn equality_looks_at_every_target() {
        let mut a = BlendDesc::alpha_blend();
        let b = BlendDesc::alpha_blend();
        assert_eq!(a, b);

        a.render_target_mut(7).unwrap().render_target_write_mask = ColorWriteEnable::RED;
        assert_ne!(a, b);
    }

    #[test]
    fn presets() {
        let additive = BlendDesc::additive();
        let target = additive.render_target(0).unwrap();
        assert!(target.is_blend_enabled());
        assert_eq!((target.src_blend, target.dest_blend), (Blend::SrcAlpha, Blend::One));
        assert_eq!(BlendDesc::opaque(), BlendDesc::DEFAULT);
        assert!(BlendDesc::default().render_target(8).is_none());
    }
}
