use std::hash::{Hash, Hasher};

use static_assertions::assert_eq_size;

use crate::{
    common::{hash_f32, ComparisonFunc},
    error::{Error, Result},
    macros::native_enum,
};

pub const MAX_ANISOTROPY: u32 = 16;

native_enum! {
    #[derive(Default)]
    pub enum Filter("filter") {
        MinMagMipPoint = 0x0,
        MinMagPointMipLinear = 0x1,
        MinPointMagLinearMipPoint = 0x4,
        MinPointMagMipLinear = 0x5,
        MinLinearMagMipPoint = 0x10,
        MinLinearMagPointMipLinear = 0x11,
        MinMagLinearMipPoint = 0x14,
        #[default]
        MinMagMipLinear = 0x15,
        Anisotropic = 0x55,
        ComparisonMinMagMipPoint = 0x80,
        ComparisonMinMagPointMipLinear = 0x81,
        ComparisonMinPointMagLinearMipPoint = 0x84,
        ComparisonMinPointMagMipLinear = 0x85,
        ComparisonMinLinearMagMipPoint = 0x90,
        ComparisonMinLinearMagPointMipLinear = 0x91,
        ComparisonMinMagLinearMipPoint = 0x94,
        ComparisonMinMagMipLinear = 0x95,
        ComparisonAnisotropic = 0xd5,
        MinimumMinMagMipPoint = 0x100,
        MinimumMinMagPointMipLinear = 0x101,
        MinimumMinPointMagLinearMipPoint = 0x104,
        MinimumMinPointMagMipLinear = 0x105,
        MinimumMinLinearMagMipPoint = 0x110,
        MinimumMinLinearMagPointMipLinear = 0x111,
        MinimumMinMagLinearMipPoint = 0x114,
        MinimumMinMagMipLinear = 0x115,
        MinimumAnisotropic = 0x155,
        MaximumMinMagMipPoint = 0x180,
        MaximumMinMagPointMipLinear = 0x181,
        MaximumMinPointMagLinearMipPoint = 0x184,
        MaximumMinPointMagMipLinear = 0x185,
        MaximumMinLinearMagMipPoint = 0x190,
        MaximumMinLinearMagPointMipLinear = 0x191,
        MaximumMinMagLinearMipPoint = 0x194,
        MaximumMinMagMipLinear = 0x195,
        MaximumAnisotropic = 0x1d5,
    }
}

impl Filter {
    pub fn is_comparison(self) -> bool {
        (self as u32) & 0x180 == 0x80
    }

    pub fn is_anisotropic(self) -> bool {
        (self as u32) & 0x55 == 0x55
    }
}

native_enum! {
    #[derive(Default)]
    pub enum TextureAddressMode("texture address mode") {
        Wrap = 1,
        Mirror = 2,
        #[default]
        Clamp = 3,
        Border = 4,
        MirrorOnce = 5,
    }
}

/// `D3D11_SAMPLER_DESC`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerDesc {
    pub filter: Filter,
    pub address_u: TextureAddressMode,
    pub address_v: TextureAddressMode,
    pub address_w: TextureAddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub comparison_func: ComparisonFunc,
    border_color: [f32; 4],
    pub min_lod: f32,
    pub max_lod: f32,
}

assert_eq_size!(SamplerDesc, [u8; 52]);

impl SamplerDesc {
    pub const DEFAULT: Self = Self::new(Filter::MinMagMipLinear, TextureAddressMode::Clamp);

    /// The given filter and one address mode on all three axes.
    pub const fn new(filter: Filter, address: TextureAddressMode) -> Self {
        Self {
            filter,
            address_u: address,
            address_v: address,
            address_w: address,
            mip_lod_bias: 0.0,
            max_anisotropy: 1,
            comparison_func: ComparisonFunc::Never,
            border_color: [1.0; 4],
            min_lod: -f32::MAX,
            max_lod: f32::MAX,
        }
    }

    pub fn point_wrap() -> Self {
        Self::new(Filter::MinMagMipPoint, TextureAddressMode::Wrap)
    }

    pub fn point_clamp() -> Self {
        Self::new(Filter::MinMagMipPoint, TextureAddressMode::Clamp)
    }

    pub fn linear_wrap() -> Self {
        Self::new(Filter::MinMagMipLinear, TextureAddressMode::Wrap)
    }

    pub fn linear_clamp() -> Self {
        Self::new(Filter::MinMagMipLinear, TextureAddressMode::Clamp)
    }

    pub fn anisotropic_wrap() -> Self {
        Self {
            max_anisotropy: MAX_ANISOTROPY,
            ..Self::new(Filter::Anisotropic, TextureAddressMode::Wrap)
        }
    }

    pub fn anisotropic_clamp() -> Self {
        Self {
            max_anisotropy: MAX_ANISOTROPY,
            ..Self::new(Filter::Anisotropic, TextureAddressMode::Clamp)
        }
    }

    pub fn border_color(&self) -> [f32; 4] {
        self.border_color
    }

    pub fn set_border_color(&mut self, color: &[f32]) -> Result<()> {
        self.border_color = color
            .try_into()
            .map_err(|_| Error::invalid_size("border color", 4, color.len()))?;

        Ok(())
    }

    pub fn with_border_color(mut self, color: [f32; 4]) -> Self {
        self.border_color = color;
        self
    }

    pub fn with_comparison(mut self, comparison_func: ComparisonFunc) -> Self {
        self.comparison_func = comparison_func;
        self
    }
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Hash for SamplerDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filter.hash(state);
        self.address_u.hash(state);
        self.address_v.hash(state);
        self.address_w.hash(state);
        hash_f32(self.mip_lod_bias, state);
        self.max_anisotropy.hash(state);
        self.comparison_func.hash(state);
        for channel in self.border_color {
            hash_f32(channel, state);
        }
        hash_f32(self.min_lod, state);
        hash_f32(self.max_lod, state);
    }
}
