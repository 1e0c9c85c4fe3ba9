use std::hash::{Hash, Hasher};

use static_assertions::assert_eq_size;

use crate::{
    common::{hash_f32, Bool32},
    macros::native_enum,
};

native_enum! {
    #[derive(Default)]
    pub enum FillMode("fill mode") {
        Wireframe = 2,
        #[default]
        Solid = 3,
    }
}

native_enum! {
    #[derive(Default)]
    pub enum CullMode("cull mode") {
        None = 1,
        Front = 2,
        #[default]
        Back = 3,
    }
}

/// `D3D11_RASTERIZER_DESC`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterizerDesc {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_counter_clockwise: Bool32,
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip_enable: Bool32,
    pub scissor_enable: Bool32,
    pub multisample_enable: Bool32,
    pub antialiased_line_enable: Bool32,
}

assert_eq_size!(RasterizerDesc, [u8; 40]);

impl RasterizerDesc {
    pub const DEFAULT: Self = Self::new(FillMode::Solid, CullMode::Back);

    pub const fn new(fill_mode: FillMode, cull_mode: CullMode) -> Self {
        Self {
            fill_mode,
            cull_mode,
            front_counter_clockwise: Bool32::FALSE,
            depth_bias: 0,
            depth_bias_clamp: 0.0,
            slope_scaled_depth_bias: 0.0,
            depth_clip_enable: Bool32::TRUE,
            scissor_enable: Bool32::FALSE,
            multisample_enable: Bool32::FALSE,
            antialiased_line_enable: Bool32::FALSE,
        }
    }

    pub fn cull_none() -> Self {
        Self::new(FillMode::Solid, CullMode::None)
    }

    pub fn cull_front() -> Self {
        Self::new(FillMode::Solid, CullMode::Front)
    }

    pub fn wireframe() -> Self {
        Self::new(FillMode::Wireframe, CullMode::None)
    }

    pub fn with_depth_bias(mut self, bias: i32, clamp: f32, slope_scaled: f32) -> Self {
        self.depth_bias = bias;
        self.depth_bias_clamp = clamp;
        self.slope_scaled_depth_bias = slope_scaled;
        self
    }
}

impl Default for RasterizerDesc {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Hash for RasterizerDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fill_mode.hash(state);
        self.cull_mode.hash(state);
        self.front_counter_clockwise.hash(state);
        self.depth_bias.hash(state);
        hash_f32(self.depth_bias_clamp, state);
        hash_f32(self.slope_scaled_depth_bias, state);
        self.depth_clip_enable.hash(state);
        self.scissor_enable.hash(state);
        self.multisample_enable.hash(state);
        self.antialiased_line_enable.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(desc: &RasterizerDesc) -> u64 {
        let mut hasher = DefaultHasher::new();
        desc.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn default_is_solid_back_with_depth_clip() {
        let desc = RasterizerDesc::default();

        assert_eq!(desc.fill_mode, FillMode::Solid);
        assert_eq!(desc.cull_mode, CullMode::Back);
        assert!(desc.depth_clip_enable.get());
        assert!(!desc.front_counter_clockwise.get());
        assert!(!desc.scissor_enable.get());
        assert!(!desc.multisample_enable.get());
        assert!(!desc.antialiased_line_enable.get());
        assert_eq!(desc.depth_bias, 0);
        assert_eq!(desc.depth_bias_clamp, 0.0);
        assert_eq!(desc.slope_scaled_depth_bias, 0.0);
    }

    #[test]
    fn presets() {
        assert_eq!(RasterizerDesc::cull_none().cull_mode, CullMode::None);
        assert_eq!(RasterizerDesc::cull_front().cull_mode, CullMode::Front);
        assert_eq!(RasterizerDesc::wireframe().fill_mode, FillMode::Wireframe);
    }

    #[test]
    fn signed_zero_bias_hashes_equal() {
        let a = RasterizerDesc::DEFAULT.with_depth_bias(1, 0.0, 0.0);
        let b = RasterizerDesc::DEFAULT.with_depth_bias(1, -0.0, 0.0);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, RasterizerDesc::DEFAULT.with_depth_bias(1, 0.5, 0.0));
    }

    #[test]
    fn names_parse() {
        assert_eq!("wireframe".parse::<FillMode>(), Ok(FillMode::Wireframe));
        assert_eq!(CullMode::try_from(3), Ok(CullMode::Back));
        assert!(CullMode::try_from(0).is_err());
    }
}
