use std::{ffi::c_void, marker::PhantomData};

use crate::{
    common::{ResourceDimension, SampleDesc, Usage},
    error::{Error, Result},
    flags::{BindFlags, CpuAccessFlags, ResourceMiscFlags},
    format::Format,
    macros::describe_trait,
};

/// Extent of mip `level` of a dimension whose top level is `base`; never 0.
pub fn mip_extent(base: u32, level: u32) -> u32 {
    base.checked_shr(level).unwrap_or(0).max(1)
}

/// Number of levels in a complete mip chain down to 1x1x1.
pub fn full_mip_chain(width: u32, height: u32, depth: u32) -> u32 {
    let largest = width.max(height).max(depth).max(1);
    u32::BITS - largest.leading_zeros()
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferDesc {
    pub byte_width: u32,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
    pub structure_byte_stride: u32,
}

impl BufferDesc {
    pub const DIMENSION: ResourceDimension = ResourceDimension::Buffer;

    pub fn new(byte_width: u32, bind_flags: BindFlags) -> Self {
        Self {
            byte_width,
            bind_flags,
            ..Default::default()
        }
    }

    /// Fails when `count * stride` does not fit a byte width.
    pub fn structured(count: u32, stride: u32, bind_flags: BindFlags) -> Result<Self> {
        let byte_width = count.checked_mul(stride).ok_or(Error::OutOfRange {
            what: "structured buffer element count",
            value: count,
        })?;

        Ok(Self {
            byte_width,
            bind_flags,
            misc_flags: ResourceMiscFlags::BUFFER_STRUCTURED,
            structure_byte_stride: stride,
            ..Default::default()
        })
    }

    /// Constant buffers must be a multiple of 16 bytes.
    pub fn constant(byte_width: u32) -> Result<Self> {
        let byte_width = byte_width.checked_next_multiple_of(16).ok_or(Error::OutOfRange {
            what: "constant buffer byte width",
            value: byte_width,
        })?;

        Ok(Self {
            byte_width,
            usage: Usage::Dynamic,
            bind_flags: BindFlags::CONSTANT_BUFFER,
            cpu_access_flags: CpuAccessFlags::WRITE,
            ..Default::default()
        })
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_cpu_access_flags(mut self, flags: CpuAccessFlags) -> Self {
        self.cpu_access_flags = flags;
        self
    }

    pub fn with_misc_flags(mut self, flags: ResourceMiscFlags) -> Self {
        self.misc_flags = flags;
        self
    }

    pub fn is_structured(&self) -> bool {
        self.misc_flags.contains(ResourceMiscFlags::BUFFER_STRUCTURED)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Texture1DDesc {
    pub width: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: Format,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
}

impl Texture1DDesc {
    pub const DIMENSION: ResourceDimension = ResourceDimension::Texture1D;

    pub fn new(format: Format, width: u32) -> Self {
        Self {
            width,
            mip_levels: 1,
            array_size: 1,
            format,
            usage: Usage::Default,
            bind_flags: BindFlags::SHADER_RESOURCE,
            cpu_access_flags: CpuAccessFlags::empty(),
            misc_flags: ResourceMiscFlags::empty(),
        }
    }

    pub fn with_mip_levels(mut self, mip_levels: u32) -> Self {
        self.mip_levels = mip_levels;
        self
    }

    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    pub fn with_bind_flags(mut self, flags: BindFlags) -> Self {
        self.bind_flags = flags;
        self
    }

    pub fn mip_width(&self, level: u32) -> u32 {
        mip_extent(self.width, level)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Texture2DDesc {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: Format,
    pub sample_desc: SampleDesc,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
}

impl Texture2DDesc {
    pub const DIMENSION: ResourceDimension = ResourceDimension::Texture2D;

    pub fn new(format: Format, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mip_levels: 1,
            array_size: 1,
            format,
            sample_desc: SampleDesc::default(),
            usage: Usage::Default,
            bind_flags: BindFlags::SHADER_RESOURCE,
            cpu_access_flags: CpuAccessFlags::empty(),
            misc_flags: ResourceMiscFlags::empty(),
        }
    }

    /// Six-face-per-cube array with the cube misc flag set.
    pub fn cube(format: Format, size: u32, cubes: u32) -> Result<Self> {
        let array_size = cubes.checked_mul(6).ok_or(Error::OutOfRange {
            what: "cube count",
            value: cubes,
        })?;

        Ok(Self {
            array_size,
            misc_flags: ResourceMiscFlags::TEXTURECUBE,
            ..Self::new(format, size, size)
        })
    }

    pub fn with_mip_levels(mut self, mip_levels: u32) -> Self {
        self.mip_levels = mip_levels;
        self
    }

    pub fn with_full_mip_chain(mut self) -> Self {
        self.mip_levels = full_mip_chain(self.width, self.height, 1);
        self
    }

    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    pub fn with_sample_desc(mut self, sample_desc: SampleDesc) -> Self {
        self.sample_desc = sample_desc;
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_bind_flags(mut self, flags: BindFlags) -> Self {
        self.bind_flags = flags;
        self
    }

    pub fn with_cpu_access_flags(mut self, flags: CpuAccessFlags) -> Self {
        self.cpu_access_flags = flags;
        self
    }

    pub fn with_misc_flags(mut self, flags: ResourceMiscFlags) -> Self {
        self.misc_flags = flags;
        self
    }

    pub fn mip_size(&self, level: u32) -> (u32, u32) {
        (mip_extent(self.width, level), mip_extent(self.height, level))
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Texture3DDesc {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_levels: u32,
    pub format: Format,
    pub usage: Usage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: CpuAccessFlags,
    pub misc_flags: ResourceMiscFlags,
}

impl Texture3DDesc {
    pub const DIMENSION: ResourceDimension = ResourceDimension::Texture3D;

    pub fn new(format: Format, width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
            mip_levels: 1,
            format,
            usage: Usage::Default,
            bind_flags: BindFlags::SHADER_RESOURCE,
            cpu_access_flags: CpuAccessFlags::empty(),
            misc_flags: ResourceMiscFlags::empty(),
        }
    }

    pub fn with_mip_levels(mut self, mip_levels: u32) -> Self {
        self.mip_levels = mip_levels;
        self
    }

    pub fn with_bind_flags(mut self, flags: BindFlags) -> Self {
        self.bind_flags = flags;
        self
    }

    pub fn mip_size(&self, level: u32) -> (u32, u32, u32) {
        (
            mip_extent(self.width, level),
            mip_extent(self.height, level),
            mip_extent(self.depth, level),
        )
    }
}

describe_trait! {
    /// Anything that can report a buffer description (`ID3D11Buffer::GetDesc`).
    pub trait Buffer -> BufferDesc, "buffer";
}

describe_trait! {
    pub trait Texture1D -> Texture1DDesc, "1D texture";
}

describe_trait! {
    pub trait Texture2D -> Texture2DDesc, "2D texture";
}

describe_trait! {
    pub trait Texture3D -> Texture3DDesc, "3D texture";
}

/// `D3D11_SUBRESOURCE_DATA` borrowing the caller's initial data.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubresourceData<'a> {
    sys_mem: *const c_void,
    sys_mem_pitch: u32,
    sys_mem_slice_pitch: u32,
    _data: PhantomData<&'a [u8]>,
}

// Only ever points at immutable borrowed data.
unsafe impl Send for SubresourceData<'_> {}
unsafe impl Sync for SubresourceData<'_> {}

impl<'a> SubresourceData<'a> {
    pub fn new<T: Copy>(data: &'a [T], pitch: u32, slice_pitch: u32) -> Self {
        Self {
            sys_mem: data.as_ptr() as *const c_void,
            sys_mem_pitch: pitch,
            sys_mem_slice_pitch: slice_pitch,
            _data: PhantomData,
        }
    }

    /// Tightly packed rows of `width` texels of `T`.
    pub fn packed<T: Copy>(data: &'a [T], width: u32, height: u32) -> Result<Self> {
        let pitch = u32::try_from(std::mem::size_of::<T>())
            .ok()
            .and_then(|size| width.checked_mul(size))
            .ok_or(Error::OutOfRange {
                what: "row width",
                value: width,
            })?;
        let slice_pitch = pitch.checked_mul(height).ok_or(Error::OutOfRange {
            what: "row count",
            value: height,
        })?;

        Ok(Self::new(data, pitch, slice_pitch))
    }

    pub fn as_ptr(&self) -> *const c_void {
        self.sys_mem
    }

    pub fn pitch(&self) -> u32 {
        self.sys_mem_pitch
    }

    pub fn slice_pitch(&self) -> u32 {
        self.sys_mem_slice_pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn mip_extent_never_reaches_zero() {
        assert_eq!(mip_extent(256, 2), 64);
        assert_eq!(mip_extent(5, 1), 2);
        assert_eq!(mip_extent(1, 3), 1);
        assert_eq!(mip_extent(256, 40), 1);
    }

    #[test]
    fn full_chain_lengths() {
        assert_eq!(full_mip_chain(256, 128, 1), 9);
        assert_eq!(full_mip_chain(1, 1, 1), 1);
        assert_eq!(full_mip_chain(0, 0, 0), 1);
        assert_eq!(full_mip_chain(300, 20, 1), 9);
    }

    #[test]
    fn texture2d_defaults() {
        let desc = Texture2DDesc::new(Format::R8G8B8A8Unorm, 64, 32);
        assert_eq!(desc.mip_levels, 1);
        assert_eq!(desc.array_size, 1);
        assert_eq!(desc.sample_desc, SampleDesc::new(1, 0));
        assert_eq!(desc.bind_flags, BindFlags::SHADER_RESOURCE);
        assert_eq!(desc.with_full_mip_chain().mip_levels, 7);
        assert_eq!(desc.mip_size(3), (8, 4));
    }

    #[test]
    fn cube_sets_six_faces() {
        let desc = Texture2DDesc::cube(Format::R16G16B16A16Float, 128, 2).unwrap();
        assert_eq!(desc.array_size, 12);
        assert!(desc.misc_flags.contains(ResourceMiscFlags::TEXTURECUBE));
    }

    #[test]
    fn oversized_requests_are_out_of_range() {
        assert_eq!(
            Texture2DDesc::cube(Format::R8G8B8A8Unorm, 16, u32::MAX / 4),
            Err(Error::OutOfRange { what: "cube count", value: u32::MAX / 4 })
        );
        assert!(matches!(
            BufferDesc::structured(1 << 20, 1 << 13, BindFlags::SHADER_RESOURCE),
            Err(Error::OutOfRange { value: 0x10_0000, .. })
        ));
        assert!(matches!(
            SubresourceData::packed(&[0u64; 4], u32::MAX / 4, 1),
            Err(Error::OutOfRange { what: "row width", .. })
        ));
        assert!(matches!(
            SubresourceData::packed(&[0u32; 4], 1 << 16, 1 << 16),
            Err(Error::OutOfRange { what: "row count", .. })
        ));
        assert!(BufferDesc::constant(u32::MAX - 3).is_err());
    }

    #[test]
    fn buffer_constructors() {
        let constant = BufferDesc::constant(20).unwrap();
        assert_eq!(constant.byte_width, 32);
        assert_eq!(constant.usage, Usage::Dynamic);

        let structured = BufferDesc::structured(10, 12, BindFlags::SHADER_RESOURCE).unwrap();
        assert_eq!(structured.byte_width, 120);
        assert!(structured.is_structured());
    }

    #[test]
    fn absent_resource_is_a_null_reference() {
        let missing: Option<Texture2DDesc> = None;
        assert_eq!(missing.desc(), Err(Error::NullReference("2D texture")));

        let present = Some(Texture3DDesc::new(Format::R8Unorm, 4, 4, 4));
        assert_eq!(present.desc().map(|d| d.depth), Ok(4));
    }

    #[test]
    fn subresource_data_pitches() {
        let texels = [0u32; 16];
        let data = SubresourceData::packed(&texels, 4, 4).unwrap();
        assert_eq!(data.pitch(), 16);
        assert_eq!(data.slice_pitch(), 64);
        assert_eq!(data.as_ptr(), texels.as_ptr() as *const c_void);
    }
}
