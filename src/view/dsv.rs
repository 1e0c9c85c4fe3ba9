use static_assertions::{assert_eq_size, const_assert_eq};

use super::{remaining, unsupported, ArrayMip, Multisampled, MultisampledArray, SingleMip, ViewRange};
use crate::{
    error::{Error, Result},
    flags::DsvFlags,
    format::Format,
    macros::{describe_trait, native_enum},
    resource::{Texture1D, Texture2D},
};

native_enum! {
    pub enum DsvDimension("depth stencil view dimension") {
        Unknown = 0,
        Texture1D = 1,
        Texture1DArray = 2,
        Texture2D = 3,
        Texture2DArray = 4,
        Texture2DMs = 5,
        Texture2DMsArray = 6,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DsvKind {
    Texture1D(SingleMip),
    Texture1DArray(ArrayMip),
    Texture2D(SingleMip),
    Texture2DArray(ArrayMip),
    Texture2DMs(Multisampled),
    Texture2DMsArray(MultisampledArray),
}

impl DsvKind {
    pub fn dimension(&self) -> DsvDimension {
        match self {
            Self::Texture1D(_) => DsvDimension::Texture1D,
            Self::Texture1DArray(_) => DsvDimension::Texture1DArray,
            Self::Texture2D(_) => DsvDimension::Texture2D,
            Self::Texture2DArray(_) => DsvDimension::Texture2DArray,
            Self::Texture2DMs(_) => DsvDimension::Texture2DMs,
            Self::Texture2DMsArray(_) => DsvDimension::Texture2DMsArray,
        }
    }
}

/// `D3D11_DEPTH_STENCIL_VIEW_DESC`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DepthStencilViewDesc {
    pub format: Format,
    pub flags: DsvFlags,
    pub kind: DsvKind,
}

describe_trait! {
    pub trait DepthStencilView -> DepthStencilViewDesc, "depth stencil view";
}

impl DepthStencilViewDesc {
    pub fn new(format: Format, kind: DsvKind) -> Self {
        Self {
            format,
            flags: DsvFlags::empty(),
            kind,
        }
    }

    pub fn texture2d(format: Format, mip_slice: u32) -> Self {
        Self::new(format, DsvKind::Texture2D(SingleMip { mip_slice }))
    }

    pub fn with_flags(mut self, flags: DsvFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn view_dimension(&self) -> DsvDimension {
        self.kind.dimension()
    }

    pub fn for_texture1d<T: Texture1D + ?Sized>(
        texture: &T,
        dimension: DsvDimension,
        range: ViewRange,
        flags: DsvFlags,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("depth stencil view", desc.format);

        let kind = match dimension {
            DsvDimension::Texture1D => DsvKind::Texture1D(SingleMip {
                mip_slice: range.first_mip,
            }),
            DsvDimension::Texture1DArray => DsvKind::Texture1DArray(ArrayMip {
                mip_slice: range.first_mip,
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            other => return Err(unsupported("depth stencil view dimension", other)),
        };

        Ok(Self::new(format, kind).with_flags(flags))
    }

    pub fn for_texture2d<T: Texture2D + ?Sized>(
        texture: &T,
        dimension: DsvDimension,
        range: ViewRange,
        flags: DsvFlags,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("depth stencil view", desc.format);

        let kind = match dimension {
            DsvDimension::Texture2D => DsvKind::Texture2D(SingleMip {
                mip_slice: range.first_mip,
            }),
            DsvDimension::Texture2DArray => DsvKind::Texture2DArray(ArrayMip {
                mip_slice: range.first_mip,
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            DsvDimension::Texture2DMs => DsvKind::Texture2DMs(Multisampled::default()),
            DsvDimension::Texture2DMsArray => DsvKind::Texture2DMsArray(MultisampledArray {
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            other => return Err(unsupported("depth stencil view dimension", other)),
        };

        Ok(Self::new(format, kind).with_flags(flags))
    }

    pub fn to_raw(&self) -> RawDepthStencilViewDesc {
        let mut u = RawDsvUnion::default();
        match self.kind {
            DsvKind::Texture1D(v) => u.texture1d = v,
            DsvKind::Texture1DArray(v) => u.texture1d_array = v,
            DsvKind::Texture2D(v) => u.texture2d = v,
            DsvKind::Texture2DArray(v) => u.texture2d_array = v,
            DsvKind::Texture2DMs(v) => u.texture2dms = v,
            DsvKind::Texture2DMsArray(v) => u.texture2dms_array = v,
        }

        RawDepthStencilViewDesc {
            format: self.format.into(),
            view_dimension: self.view_dimension().into(),
            flags: self.flags.bits(),
            u,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union RawDsvUnion {
    pub texture1d: SingleMip,
    pub texture1d_array: ArrayMip,
    pub texture2d: SingleMip,
    pub texture2d_array: ArrayMip,
    pub texture2dms: Multisampled,
    pub texture2dms_array: MultisampledArray,
    words: [u32; 3],
}

impl Default for RawDsvUnion {
    fn default() -> Self {
        Self { words: [0; 3] }
    }
}

/// Layout-exact `D3D11_DEPTH_STENCIL_VIEW_DESC`.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct RawDepthStencilViewDesc {
    pub format: u32,
    pub view_dimension: u32,
    pub flags: u32,
    pub u: RawDsvUnion,
}

assert_eq_size!(RawDepthStencilViewDesc, [u8; 24]);
const_assert_eq!(std::mem::offset_of!(RawDepthStencilViewDesc, flags), 8);
const_assert_eq!(std::mem::offset_of!(RawDepthStencilViewDesc, u), 12);

impl RawDepthStencilViewDesc {
    pub fn words(&self) -> [u32; 3] {
        // SAFETY: plain `u32` members over a zero-filled union.
        unsafe { self.u.words }
    }
}

impl TryFrom<&RawDepthStencilViewDesc> for DepthStencilViewDesc {
    type Error = Error;

    fn try_from(raw: &RawDepthStencilViewDesc) -> Result<Self> {
        let format = Format::try_from(raw.format)?;
        let dimension = DsvDimension::try_from(raw.view_dimension)?;

        // SAFETY: every member is plain `u32` data.
        let kind = unsafe {
            match dimension {
                DsvDimension::Texture1D => DsvKind::Texture1D(raw.u.texture1d),
                DsvDimension::Texture1DArray => DsvKind::Texture1DArray(raw.u.texture1d_array),
                DsvDimension::Texture2D => DsvKind::Texture2D(raw.u.texture2d),
                DsvDimension::Texture2DArray => DsvKind::Texture2DArray(raw.u.texture2d_array),
                DsvDimension::Texture2DMs => DsvKind::Texture2DMs(raw.u.texture2dms),
                DsvDimension::Texture2DMsArray => {
                    DsvKind::Texture2DMsArray(raw.u.texture2dms_array)
                }
                DsvDimension::Unknown => {
                    return Err(unsupported("depth stencil view dimension", dimension))
                }
            }
        };

        Ok(Self::new(format, kind).with_flags(DsvFlags::from_bits_retain(raw.flags)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Texture1DDesc, Texture2DDesc};

    #[test]
    fn read_only_depth_array() {
        let texture = Texture2DDesc::new(Format::D32Float, 1024, 1024).with_array_size(4);
        let desc = DepthStencilViewDesc::for_texture2d(
            &texture,
            DsvDimension::Texture2DArray,
            ViewRange::new().slices(1, None),
            DsvFlags::READ_ONLY_DEPTH,
        )
        .unwrap();

        assert_eq!(desc.format, Format::D32Float);
        assert_eq!(desc.flags, DsvFlags::READ_ONLY_DEPTH);
        assert_eq!(
            desc.kind,
            DsvKind::Texture2DArray(ArrayMip {
                mip_slice: 0,
                first_array_slice: 1,
                array_size: 3,
            })
        );
    }

    #[test]
    fn typeless_texture_gets_explicit_depth_format() {
        let texture = Texture2DDesc::new(Format::R24G8Typeless, 64, 64);
        let desc = DepthStencilViewDesc::for_texture2d(
            &texture,
            DsvDimension::Texture2D,
            ViewRange::new().format(Format::D24UnormS8Uint),
            DsvFlags::empty(),
        )
        .unwrap();

        assert_eq!(desc, DepthStencilViewDesc::texture2d(Format::D24UnormS8Uint, 0));
    }

    #[test]
    fn texture1d_rejects_2d_dimensions() {
        let texture = Texture1DDesc::new(Format::D16Unorm, 256);
        assert_eq!(
            DepthStencilViewDesc::for_texture1d(
                &texture,
                DsvDimension::Texture2D,
                ViewRange::new(),
                DsvFlags::empty(),
            ),
            Err(Error::OutOfRange {
                what: "depth stencil view dimension",
                value: 3
            })
        );
    }

    #[test]
    fn raw_round_trip_keeps_flags() {
        let desc = DepthStencilViewDesc::new(
            Format::D32FloatS8X24Uint,
            DsvKind::Texture2DMsArray(MultisampledArray {
                first_array_slice: 2,
                array_size: 2,
            }),
        )
        .with_flags(DsvFlags::READ_ONLY_DEPTH | DsvFlags::READ_ONLY_STENCIL);

        let raw = desc.to_raw();
        assert_eq!(raw.flags, 3);
        assert_eq!(raw.view_dimension, 6);
        assert_eq!(raw.words(), [2, 2, 0]);
        assert_eq!(DepthStencilViewDesc::try_from(&raw), Ok(desc));
    }
}
