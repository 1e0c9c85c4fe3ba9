use static_assertions::{assert_eq_size, const_assert_eq};

use super::{remaining, unsupported, BufferElements, Multisampled, MultisampledArray, ViewRange};
use crate::{
    error::{Error, Result},
    flags::BufferExSrvFlags,
    format::Format,
    macros::{describe_trait, native_enum},
    resource::{Buffer, Texture1D, Texture2D, Texture3D},
};

native_enum! {
    /// `D3D11_SRV_DIMENSION`
    pub enum SrvDimension("shader resource view dimension") {
        Unknown = 0,
        Buffer = 1,
        Texture1D = 2,
        Texture1DArray = 3,
        Texture2D = 4,
        Texture2DArray = 5,
        Texture2DMs = 6,
        Texture2DMsArray = 7,
        Texture3D = 8,
        TextureCube = 9,
        TextureCubeArray = 10,
        BufferEx = 11,
    }
}

/// Mips `most_detailed_mip .. most_detailed_mip + mip_levels`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MipRange {
    pub most_detailed_mip: u32,
    pub mip_levels: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArrayMipRange {
    pub most_detailed_mip: u32,
    pub mip_levels: u32,
    pub first_array_slice: u32,
    pub array_size: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CubeArrayMipRange {
    pub most_detailed_mip: u32,
    pub mip_levels: u32,
    pub first_2d_array_face: u32,
    pub num_cubes: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferExSrv {
    pub first_element: u32,
    pub num_elements: u32,
    pub flags: BufferExSrvFlags,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SrvKind {
    Buffer(BufferElements),
    Texture1D(MipRange),
    Texture1DArray(ArrayMipRange),
    Texture2D(MipRange),
    Texture2DArray(ArrayMipRange),
    Texture2DMs(Multisampled),
    Texture2DMsArray(MultisampledArray),
    Texture3D(MipRange),
    TextureCube(MipRange),
    TextureCubeArray(CubeArrayMipRange),
    BufferEx(BufferExSrv),
}

impl SrvKind {
    pub fn dimension(&self) -> SrvDimension {
        match self {
            Self::Buffer(_) => SrvDimension::Buffer,
            Self::Texture1D(_) => SrvDimension::Texture1D,
            Self::Texture1DArray(_) => SrvDimension::Texture1DArray,
            Self::Texture2D(_) => SrvDimension::Texture2D,
            Self::Texture2DArray(_) => SrvDimension::Texture2DArray,
            Self::Texture2DMs(_) => SrvDimension::Texture2DMs,
            Self::Texture2DMsArray(_) => SrvDimension::Texture2DMsArray,
            Self::Texture3D(_) => SrvDimension::Texture3D,
            Self::TextureCube(_) => SrvDimension::TextureCube,
            Self::TextureCubeArray(_) => SrvDimension::TextureCubeArray,
            Self::BufferEx(_) => SrvDimension::BufferEx,
        }
    }
}

/// `D3D11_SHADER_RESOURCE_VIEW_DESC`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderResourceViewDesc {
    pub format: Format,
    pub kind: SrvKind,
}

describe_trait! {
    pub trait ShaderResourceView -> ShaderResourceViewDesc, "shader resource view";
}

fn mip_range(total: u32, range: &ViewRange) -> Result<MipRange> {
    Ok(MipRange {
        most_detailed_mip: range.first_mip,
        mip_levels: remaining("most detailed mip", total, range.first_mip, range.mip_count)?,
    })
}

fn array_mip_range(mip_levels: u32, array_size: u32, range: &ViewRange) -> Result<ArrayMipRange> {
    let mips = mip_range(mip_levels, range)?;

    Ok(ArrayMipRange {
        most_detailed_mip: mips.most_detailed_mip,
        mip_levels: mips.mip_levels,
        first_array_slice: range.first_slice,
        array_size: remaining("first array slice", array_size, range.first_slice, range.slice_count)?,
    })
}

impl ShaderResourceViewDesc {
    pub fn new(format: Format, kind: SrvKind) -> Self {
        Self { format, kind }
    }

    /// Every mip of a plain 2D texture.
    pub fn texture2d(format: Format, mip_levels: u32) -> Self {
        Self::new(
            format,
            SrvKind::Texture2D(MipRange {
                most_detailed_mip: 0,
                mip_levels,
            }),
        )
    }

    pub fn view_dimension(&self) -> SrvDimension {
        self.kind.dimension()
    }

    /// Empty `flags` give a plain `Buffer` view, anything else a `BufferEx`
    /// view. Raw views are always `R32Typeless`.
    pub fn for_buffer<B: Buffer + ?Sized>(
        buffer: &B,
        format: Format,
        first_element: u32,
        num_elements: u32,
        flags: BufferExSrvFlags,
    ) -> Result<Self> {
        buffer.desc()?;

        if flags.is_empty() {
            return Ok(Self::new(
                format,
                SrvKind::Buffer(BufferElements::new(first_element, num_elements)),
            ));
        }

        let format = if flags.contains(BufferExSrvFlags::RAW) {
            Format::R32Typeless
        } else {
            format
        };

        Ok(Self::new(
            format,
            SrvKind::BufferEx(BufferExSrv {
                first_element,
                num_elements,
                flags,
            }),
        ))
    }

    pub fn for_texture1d<T: Texture1D + ?Sized>(
        texture: &T,
        dimension: SrvDimension,
        range: ViewRange,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("shader resource view", desc.format);

        let kind = match dimension {
            SrvDimension::Texture1D => SrvKind::Texture1D(mip_range(desc.mip_levels, &range)?),
            SrvDimension::Texture1DArray => SrvKind::Texture1DArray(array_mip_range(
                desc.mip_levels,
                desc.array_size,
                &range,
            )?),
            other => return Err(unsupported("shader resource view dimension", other)),
        };

        Ok(Self::new(format, kind))
    }

    /// For `TextureCubeArray`, the slice range is `first_2d_array_face` and
    /// the number of cubes; the derived cube count is the remaining faces / 6.
    pub fn for_texture2d<T: Texture2D + ?Sized>(
        texture: &T,
        dimension: SrvDimension,
        range: ViewRange,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("shader resource view", desc.format);

        let kind = match dimension {
            SrvDimension::Texture2D => SrvKind::Texture2D(mip_range(desc.mip_levels, &range)?),
            SrvDimension::Texture2DArray => SrvKind::Texture2DArray(array_mip_range(
                desc.mip_levels,
                desc.array_size,
                &range,
            )?),
            SrvDimension::Texture2DMs => SrvKind::Texture2DMs(Multisampled::default()),
            SrvDimension::Texture2DMsArray => SrvKind::Texture2DMsArray(MultisampledArray {
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            SrvDimension::TextureCube => SrvKind::TextureCube(mip_range(desc.mip_levels, &range)?),
            SrvDimension::TextureCubeArray => {
                let mips = mip_range(desc.mip_levels, &range)?;
                let num_cubes = match range.slice_count {
                    Some(cubes) => cubes,
                    None => remaining("first array face", desc.array_size, range.first_slice, None)? / 6,
                };

                SrvKind::TextureCubeArray(CubeArrayMipRange {
                    most_detailed_mip: mips.most_detailed_mip,
                    mip_levels: mips.mip_levels,
                    first_2d_array_face: range.first_slice,
                    num_cubes,
                })
            }
            other => return Err(unsupported("shader resource view dimension", other)),
        };

        Ok(Self::new(format, kind))
    }

    pub fn for_texture3d<T: Texture3D + ?Sized>(texture: &T, range: ViewRange) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("shader resource view", desc.format);

        Ok(Self::new(
            format,
            SrvKind::Texture3D(mip_range(desc.mip_levels, &range)?),
        ))
    }

    pub fn to_raw(&self) -> RawShaderResourceViewDesc {
        let mut u = RawSrvUnion::default();
        match self.kind {
            SrvKind::Buffer(v) => u.buffer = v,
            SrvKind::Texture1D(v) => u.texture1d = v,
            SrvKind::Texture1DArray(v) => u.texture1d_array = v,
            SrvKind::Texture2D(v) => u.texture2d = v,
            SrvKind::Texture2DArray(v) => u.texture2d_array = v,
            SrvKind::Texture2DMs(v) => u.texture2dms = v,
            SrvKind::Texture2DMsArray(v) => u.texture2dms_array = v,
            SrvKind::Texture3D(v) => u.texture3d = v,
            SrvKind::TextureCube(v) => u.texture_cube = v,
            SrvKind::TextureCubeArray(v) => u.texture_cube_array = v,
            SrvKind::BufferEx(v) => u.buffer_ex = v,
        }

        RawShaderResourceViewDesc {
            format: self.format.into(),
            view_dimension: self.view_dimension().into(),
            u,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union RawSrvUnion {
    pub buffer: BufferElements,
    pub texture1d: MipRange,
    pub texture1d_array: ArrayMipRange,
    pub texture2d: MipRange,
    pub texture2d_array: ArrayMipRange,
    pub texture2dms: Multisampled,
    pub texture2dms_array: MultisampledArray,
    pub texture3d: MipRange,
    pub texture_cube: MipRange,
    pub texture_cube_array: CubeArrayMipRange,
    pub buffer_ex: BufferExSrv,
    words: [u32; 4],
}

impl Default for RawSrvUnion {
    fn default() -> Self {
        Self { words: [0; 4] }
    }
}

/// Layout-exact `D3D11_SHADER_RESOURCE_VIEW_DESC`.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct RawShaderResourceViewDesc {
    pub format: u32,
    pub view_dimension: u32,
    pub u: RawSrvUnion,
}

assert_eq_size!(RawShaderResourceViewDesc, [u8; 24]);
const_assert_eq!(std::mem::offset_of!(RawShaderResourceViewDesc, u), 8);

impl RawShaderResourceViewDesc {
    pub fn words(&self) -> [u32; 4] {
        // SAFETY: plain `u32` members over a zero-filled union.
        unsafe { self.u.words }
    }
}

impl TryFrom<&RawShaderResourceViewDesc> for ShaderResourceViewDesc {
    type Error = Error;

    fn try_from(raw: &RawShaderResourceViewDesc) -> Result<Self> {
        let format = Format::try_from(raw.format)?;
        let dimension = SrvDimension::try_from(raw.view_dimension)?;

        // SAFETY: every member is plain `u32` data (the buffer-ex flags are a
        // transparent `u32` bit set accepting any value).
        let kind = unsafe {
            match dimension {
                SrvDimension::Buffer => SrvKind::Buffer(raw.u.buffer),
                SrvDimension::Texture1D => SrvKind::Texture1D(raw.u.texture1d),
                SrvDimension::Texture1DArray => SrvKind::Texture1DArray(raw.u.texture1d_array),
                SrvDimension::Texture2D => SrvKind::Texture2D(raw.u.texture2d),
                SrvDimension::Texture2DArray => SrvKind::Texture2DArray(raw.u.texture2d_array),
                SrvDimension::Texture2DMs => SrvKind::Texture2DMs(raw.u.texture2dms),
                SrvDimension::Texture2DMsArray => {
                    SrvKind::Texture2DMsArray(raw.u.texture2dms_array)
                }
                SrvDimension::Texture3D => SrvKind::Texture3D(raw.u.texture3d),
                SrvDimension::TextureCube => SrvKind::TextureCube(raw.u.texture_cube),
                SrvDimension::TextureCubeArray => {
                    SrvKind::TextureCubeArray(raw.u.texture_cube_array)
                }
                SrvDimension::BufferEx => SrvKind::BufferEx(raw.u.buffer_ex),
                SrvDimension::Unknown => {
                    return Err(unsupported("shader resource view dimension", dimension))
                }
            }
        };

        Ok(Self::new(format, kind))
    }
}
