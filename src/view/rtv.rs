use static_assertions::{assert_eq_size, const_assert_eq};

use super::{
    remaining, unsupported, ArrayMip, BufferElements, Multisampled, MultisampledArray, SingleMip,
    ViewRange, VolumeSlices,
};
use crate::{
    error::{Error, Result},
    format::Format,
    macros::{describe_trait, native_enum},
    resource::{mip_extent, Buffer, Texture1D, Texture2D, Texture3D},
};

native_enum! {
    pub enum RtvDimension("render target view dimension") {
        Unknown = 0,
        Buffer = 1,
        Texture1D = 2,
        Texture1DArray = 3,
        Texture2D = 4,
        Texture2DArray = 5,
        Texture2DMs = 6,
        Texture2DMsArray = 7,
        Texture3D = 8,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RtvKind {
    Buffer(BufferElements),
    Texture1D(SingleMip),
    Texture1DArray(ArrayMip),
    Texture2D(SingleMip),
    Texture2DArray(ArrayMip),
    Texture2DMs(Multisampled),
    Texture2DMsArray(MultisampledArray),
    Texture3D(VolumeSlices),
}

impl RtvKind {
    pub fn dimension(&self) -> RtvDimension {
        match self {
            Self::Buffer(_) => RtvDimension::Buffer,
            Self::Texture1D(_) => RtvDimension::Texture1D,
            Self::Texture1DArray(_) => RtvDimension::Texture1DArray,
            Self::Texture2D(_) => RtvDimension::Texture2D,
            Self::Texture2DArray(_) => RtvDimension::Texture2DArray,
            Self::Texture2DMs(_) => RtvDimension::Texture2DMs,
            Self::Texture2DMsArray(_) => RtvDimension::Texture2DMsArray,
            Self::Texture3D(_) => RtvDimension::Texture3D,
        }
    }
}

/// `D3D11_RENDER_TARGET_VIEW_DESC`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderTargetViewDesc {
    pub format: Format,
    pub kind: RtvKind,
}

describe_trait! {
    /// Anything that can report a render-target view description.
    pub trait RenderTargetView -> RenderTargetViewDesc, "render target view";
}

impl RenderTargetViewDesc {
    pub fn new(format: Format, kind: RtvKind) -> Self {
        Self { format, kind }
    }

    pub fn texture2d(format: Format, mip_slice: u32) -> Self {
        Self::new(format, RtvKind::Texture2D(SingleMip { mip_slice }))
    }

    pub fn view_dimension(&self) -> RtvDimension {
        self.kind.dimension()
    }

    /// Buffer views carry nothing to derive; the buffer is only checked for
    /// presence.
    pub fn for_buffer<B: Buffer + ?Sized>(
        buffer: &B,
        format: Format,
        first_element: u32,
        num_elements: u32,
    ) -> Result<Self> {
        buffer.desc()?;

        Ok(Self::new(
            format,
            RtvKind::Buffer(BufferElements::new(first_element, num_elements)),
        ))
    }

    pub fn for_texture1d<T: Texture1D + ?Sized>(
        texture: &T,
        dimension: RtvDimension,
        range: ViewRange,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("render target view", desc.format);

        let kind = match dimension {
            RtvDimension::Texture1D => RtvKind::Texture1D(SingleMip {
                mip_slice: range.first_mip,
            }),
            RtvDimension::Texture1DArray => RtvKind::Texture1DArray(ArrayMip {
                mip_slice: range.first_mip,
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            other => return Err(unsupported("render target view dimension", other)),
        };

        Ok(Self::new(format, kind))
    }

    pub fn for_texture2d<T: Texture2D + ?Sized>(
        texture: &T,
        dimension: RtvDimension,
        range: ViewRange,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("render target view", desc.format);

        let kind = match dimension {
            RtvDimension::Texture2D => RtvKind::Texture2D(SingleMip {
                mip_slice: range.first_mip,
            }),
            RtvDimension::Texture2DArray => RtvKind::Texture2DArray(ArrayMip {
                mip_slice: range.first_mip,
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            RtvDimension::Texture2DMs => RtvKind::Texture2DMs(Multisampled::default()),
            RtvDimension::Texture2DMsArray => RtvKind::Texture2DMsArray(MultisampledArray {
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            other => return Err(unsupported("render target view dimension", other)),
        };

        Ok(Self::new(format, kind))
    }

    /// The W range defaults to every slice of the volume at the view's mip.
    /// `CD3D11_RENDER_TARGET_VIEW_DESC` subtracts from the top-level depth
    /// instead, which overruns the mip for any `mip_slice > 0`.
    pub fn for_texture3d<T: Texture3D + ?Sized>(texture: &T, range: ViewRange) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("render target view", desc.format);

        let kind = RtvKind::Texture3D(VolumeSlices {
            mip_slice: range.first_mip,
            first_w_slice: range.first_slice,
            w_size: remaining(
                "first W slice",
                mip_extent(desc.depth, range.first_mip),
                range.first_slice,
                range.slice_count,
            )?,
        });

        Ok(Self::new(format, kind))
    }

    pub fn to_raw(&self) -> RawRenderTargetViewDesc {
        let mut u = RawRtvUnion::default();
        match self.kind {
            RtvKind::Buffer(v) => u.buffer = v,
            RtvKind::Texture1D(v) => u.texture1d = v,
            RtvKind::Texture1DArray(v) => u.texture1d_array = v,
            RtvKind::Texture2D(v) => u.texture2d = v,
            RtvKind::Texture2DArray(v) => u.texture2d_array = v,
            RtvKind::Texture2DMs(v) => u.texture2dms = v,
            RtvKind::Texture2DMsArray(v) => u.texture2dms_array = v,
            RtvKind::Texture3D(v) => u.texture3d = v,
        }

        RawRenderTargetViewDesc {
            format: self.format.into(),
            view_dimension: self.view_dimension().into(),
            u,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union RawRtvUnion {
    pub buffer: BufferElements,
    pub texture1d: SingleMip,
    pub texture1d_array: ArrayMip,
    pub texture2d: SingleMip,
    pub texture2d_array: ArrayMip,
    pub texture2dms: Multisampled,
    pub texture2dms_array: MultisampledArray,
    pub texture3d: VolumeSlices,
    words: [u32; 3],
}

impl Default for RawRtvUnion {
    fn default() -> Self {
        Self { words: [0; 3] }
    }
}

/// Layout-exact `D3D11_RENDER_TARGET_VIEW_DESC`.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct RawRenderTargetViewDesc {
    pub format: u32,
    pub view_dimension: u32,
    pub u: RawRtvUnion,
}

assert_eq_size!(RawRenderTargetViewDesc, [u8; 20]);
const_assert_eq!(std::mem::offset_of!(RawRenderTargetViewDesc, u), 8);

impl RawRenderTargetViewDesc {
    /// The union as plain words, whichever member is active.
    pub fn words(&self) -> [u32; 3] {
        // SAFETY: every member is plain `u32` data and `to_raw` zero-fills the
        // union first, so all 12 bytes are initialized.
        unsafe { self.u.words }
    }
}

impl TryFrom<&RawRenderTargetViewDesc> for RenderTargetViewDesc {
    type Error = Error;

    fn try_from(raw: &RawRenderTargetViewDesc) -> Result<Self> {
        let format = Format::try_from(raw.format)?;
        let dimension = RtvDimension::try_from(raw.view_dimension)?;

        // SAFETY: every member is plain `u32` data, so reading the member the
        // tag selects is valid for any bit pattern.
        let kind = unsafe {
            match dimension {
                RtvDimension::Buffer => RtvKind::Buffer(raw.u.buffer),
                RtvDimension::Texture1D => RtvKind::Texture1D(raw.u.texture1d),
                RtvDimension::Texture1DArray => RtvKind::Texture1DArray(raw.u.texture1d_array),
                RtvDimension::Texture2D => RtvKind::Texture2D(raw.u.texture2d),
                RtvDimension::Texture2DArray => RtvKind::Texture2DArray(raw.u.texture2d_array),
                RtvDimension::Texture2DMs => RtvKind::Texture2DMs(raw.u.texture2dms),
                RtvDimension::Texture2DMsArray => {
                    RtvKind::Texture2DMsArray(raw.u.texture2dms_array)
                }
                RtvDimension::Texture3D => RtvKind::Texture3D(raw.u.texture3d),
                RtvDimension::Unknown => {
                    return Err(unsupported("render target view dimension", dimension))
                }
            }
        };

        Ok(Self::new(format, kind))
    }
}
