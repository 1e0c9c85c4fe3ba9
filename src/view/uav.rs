use static_assertions::{assert_eq_size, const_assert_eq};

use super::{remaining, unsupported, ArrayMip, SingleMip, ViewRange, VolumeSlices};
use crate::{
    error::{Error, Result},
    flags::BufferUavFlags,
    format::Format,
    macros::{describe_trait, native_enum},
    resource::{mip_extent, Buffer, Texture1D, Texture2D, Texture3D},
};

native_enum! {
    pub enum UavDimension("unordered access view dimension") {
        Unknown = 0,
        Buffer = 1,
        Texture1D = 2,
        Texture1DArray = 3,
        Texture2D = 4,
        Texture2DArray = 5,
        Texture3D = 8,
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferUav {
    pub first_element: u32,
    pub num_elements: u32,
    pub flags: BufferUavFlags,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UavKind {
    Buffer(BufferUav),
    Texture1D(SingleMip),
    Texture1DArray(ArrayMip),
    Texture2D(SingleMip),
    Texture2DArray(ArrayMip),
    Texture3D(VolumeSlices),
}

impl UavKind {
    pub fn dimension(&self) -> UavDimension {
        match self {
            Self::Buffer(_) => UavDimension::Buffer,
            Self::Texture1D(_) => UavDimension::Texture1D,
            Self::Texture1DArray(_) => UavDimension::Texture1DArray,
            Self::Texture2D(_) => UavDimension::Texture2D,
            Self::Texture2DArray(_) => UavDimension::Texture2DArray,
            Self::Texture3D(_) => UavDimension::Texture3D,
        }
    }
}

/// `D3D11_UNORDERED_ACCESS_VIEW_DESC`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnorderedAccessViewDesc {
    pub format: Format,
    pub kind: UavKind,
}

describe_trait! {
    pub trait UnorderedAccessView -> UnorderedAccessViewDesc, "unordered access view";
}

impl UnorderedAccessViewDesc {
    pub fn new(format: Format, kind: UavKind) -> Self {
        Self { format, kind }
    }

    pub fn view_dimension(&self) -> UavDimension {
        self.kind.dimension()
    }

    /// Raw views are always `R32Typeless`; structured views `Unknown`.
    pub fn for_buffer<B: Buffer + ?Sized>(
        buffer: &B,
        format: Format,
        first_element: u32,
        num_elements: u32,
        flags: BufferUavFlags,
    ) -> Result<Self> {
        let desc = buffer.desc()?;

        let format = if flags.contains(BufferUavFlags::RAW) {
            Format::R32Typeless
        } else if desc.is_structured() {
            Format::Unknown
        } else {
            format
        };

        Ok(Self::new(
            format,
            UavKind::Buffer(BufferUav {
                first_element,
                num_elements,
                flags,
            }),
        ))
    }

    pub fn for_texture1d<T: Texture1D + ?Sized>(
        texture: &T,
        dimension: UavDimension,
        range: ViewRange,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("unordered access view", desc.format);

        let kind = match dimension {
            UavDimension::Texture1D => UavKind::Texture1D(SingleMip {
                mip_slice: range.first_mip,
            }),
            UavDimension::Texture1DArray => UavKind::Texture1DArray(ArrayMip {
                mip_slice: range.first_mip,
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            other => return Err(unsupported("unordered access view dimension", other)),
        };

        Ok(Self::new(format, kind))
    }

    pub fn for_texture2d<T: Texture2D + ?Sized>(
        texture: &T,
        dimension: UavDimension,
        range: ViewRange,
    ) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("unordered access view", desc.format);

        let kind = match dimension {
            UavDimension::Texture2D => UavKind::Texture2D(SingleMip {
                mip_slice: range.first_mip,
            }),
            UavDimension::Texture2DArray => UavKind::Texture2DArray(ArrayMip {
                mip_slice: range.first_mip,
                first_array_slice: range.first_slice,
                array_size: remaining(
                    "first array slice",
                    desc.array_size,
                    range.first_slice,
                    range.slice_count,
                )?,
            }),
            other => return Err(unsupported("unordered access view dimension", other)),
        };

        Ok(Self::new(format, kind))
    }

    /// Like the render target view, the default W range is measured at the
    /// view's mip rather than the top-level depth.
    pub fn for_texture3d<T: Texture3D + ?Sized>(texture: &T, range: ViewRange) -> Result<Self> {
        let desc = texture.desc()?;
        let format = range.resolve_format("unordered access view", desc.format);

        let kind = UavKind::Texture3D(VolumeSlices {
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

    pub fn to_raw(&self) -> RawUnorderedAccessViewDesc {
        let mut u = RawUavUnion::default();
        match self.kind {
            UavKind::Buffer(v) => u.buffer = v,
            UavKind::Texture1D(v) => u.texture1d = v,
            UavKind::Texture1DArray(v) => u.texture1d_array = v,
            UavKind::Texture2D(v) => u.texture2d = v,
            UavKind::Texture2DArray(v) => u.texture2d_array = v,
            UavKind::Texture3D(v) => u.texture3d = v,
        }

        RawUnorderedAccessViewDesc {
            format: self.format.into(),
            view_dimension: self.view_dimension().into(),
            u,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union RawUavUnion {
    pub buffer: BufferUav,
    pub texture1d: SingleMip,
    pub texture1d_array: ArrayMip,
    pub texture2d: SingleMip,
    pub texture2d_array: ArrayMip,
    pub texture3d: VolumeSlices,
    words: [u32; 3],
}

impl Default for RawUavUnion {
    fn default() -> Self {
        Self { words: [0; 3] }
    }
}

/// Layout-exact `D3D11_UNORDERED_ACCESS_VIEW_DESC`.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct RawUnorderedAccessViewDesc {
    pub format: u32,
    pub view_dimension: u32,
    pub u: RawUavUnion,
}

assert_eq_size!(RawUnorderedAccessViewDesc, [u8; 20]);
const_assert_eq!(std::mem::offset_of!(RawUnorderedAccessViewDesc, u), 8);

impl RawUnorderedAccessViewDesc {
    pub fn words(&self) -> [u32; 3] {
        // SAFETY: plain `u32` members over a zero-filled union.
        unsafe { self.u.words }
    }
}

impl TryFrom<&RawUnorderedAccessViewDesc> for UnorderedAccessViewDesc {
    type Error = Error;

    fn try_from(raw: &RawUnorderedAccessViewDesc) -> Result<Self> {
        let format = Format::try_from(raw.format)?;
        let dimension = UavDimension::try_from(raw.view_dimension)?;

        // SAFETY: every member is plain `u32` data.
        let kind = unsafe {
            match dimension {
                UavDimension::Buffer => UavKind::Buffer(raw.u.buffer),
                UavDimension::Texture1D => UavKind::Texture1D(raw.u.texture1d),
                UavDimension::Texture1DArray => UavKind::Texture1DArray(raw.u.texture1d_array),
                UavDimension::Texture2D => UavKind::Texture2D(raw.u.texture2d),
                UavDimension::Texture2DArray => UavKind::Texture2DArray(raw.u.texture2d_array),
                UavDimension::Texture3D => UavKind::Texture3D(raw.u.texture3d),
                UavDimension::Unknown => {
                    return Err(unsupported("unordered access view dimension", dimension))
                }
            }
        };

        Ok(Self::new(format, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resource::{BufferDesc, Texture2DDesc, Texture3DDesc},
        BindFlags,
    };

    #[test]
    fn structured_buffer_drops_format() {
        let buffer = BufferDesc::structured(64, 16, BindFlags::UNORDERED_ACCESS).unwrap();
        let desc = UnorderedAccessViewDesc::for_buffer(
            &buffer,
            Format::R32Float,
            0,
            64,
            BufferUavFlags::APPEND,
        )
        .unwrap();

        assert_eq!(desc.format, Format::Unknown);
        assert_eq!(
            desc.kind,
            UavKind::Buffer(BufferUav {
                first_element: 0,
                num_elements: 64,
                flags: BufferUavFlags::APPEND,
            })
        );
    }

    #[test]
    fn raw_buffer_is_r32_typeless() {
        let buffer = BufferDesc::new(1024, BindFlags::UNORDERED_ACCESS)
            .with_misc_flags(crate::ResourceMiscFlags::BUFFER_ALLOW_RAW_VIEWS);
        let desc =
            UnorderedAccessViewDesc::for_buffer(&buffer, Format::Unknown, 0, 256, BufferUavFlags::RAW)
                .unwrap();

        assert_eq!(desc.format, Format::R32Typeless);
    }

    #[test]
    fn texture2d_array_slices() {
        let texture = Texture2DDesc::new(Format::R32Uint, 64, 64)
            .with_array_size(5)
            .with_bind_flags(BindFlags::UNORDERED_ACCESS);
        let desc = UnorderedAccessViewDesc::for_texture2d(
            &texture,
            UavDimension::Texture2DArray,
            ViewRange::new().slices(4, None),
        )
        .unwrap();

        assert_eq!(
            desc.kind,
            UavKind::Texture2DArray(ArrayMip {
                mip_slice: 0,
                first_array_slice: 4,
                array_size: 1,
            })
        );
    }

    #[test]
    fn texture3d_full_depth() {
        let texture = Texture3DDesc::new(Format::R16Float, 16, 16, 16);
        let desc = UnorderedAccessViewDesc::for_texture3d(&texture, ViewRange::new()).unwrap();

        assert_eq!(
            desc.kind,
            UavKind::Texture3D(VolumeSlices {
                mip_slice: 0,
                first_w_slice: 0,
                w_size: 16,
            })
        );
        let raw = desc.to_raw();
        assert_eq!(raw.view_dimension, 8);
        assert_eq!(raw.words(), [0, 0, 16]);
    }

    #[test]
    fn texture3d_w_range_at_a_lower_mip() {
        let texture = Texture3DDesc::new(Format::R16Float, 32, 32, 32).with_mip_levels(6);
        let desc =
            UnorderedAccessViewDesc::for_texture3d(&texture, ViewRange::new().mip(1).slices(4, None))
                .unwrap();

        assert_eq!(desc.to_raw().words(), [1, 4, 12]);
    }

    #[test]
    fn buffer_dimension_needs_a_buffer() {
        let texture = Texture2DDesc::new(Format::R32Uint, 8, 8);
        assert_eq!(
            UnorderedAccessViewDesc::for_texture2d(&texture, UavDimension::Buffer, ViewRange::new()),
            Err(Error::OutOfRange {
                what: "unordered access view dimension",
                value: 1
            })
        );
    }
}
