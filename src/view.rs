//! View descriptors and the logic that completes a partial view request from
//! the description of the resource it targets.
//!
//! Each descriptor is a format plus a tagged payload enum; the native tag is
//! derived from the variant. The `Raw*` twins reproduce the native union
//! layout for handing to the driver.

pub mod dsv;
pub mod rtv;
pub mod srv;
pub mod uav;

pub use dsv::*;
pub use rtv::*;
pub use srv::*;
pub use uav::*;

use crate::{
    error::{Error, Result},
    format::Format,
};

/// The parts of a view request that may be left for the resource to decide.
///
/// `first_mip` is the mip slice for render-target, depth-stencil and
/// unordered-access views, and the most detailed mip for shader-resource
/// views. `first_slice`/`slice_count` select array slices, W slices of a
/// volume, or (for cube arrays) the first 2D face and the number of cubes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewRange {
    pub format: Option<Format>,
    pub first_mip: u32,
    pub mip_count: Option<u32>,
    pub first_slice: u32,
    pub slice_count: Option<u32>,
}

impl ViewRange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn mip(mut self, mip_slice: u32) -> Self {
        self.first_mip = mip_slice;
        self
    }

    pub fn mips(mut self, first: u32, count: Option<u32>) -> Self {
        self.first_mip = first;
        self.mip_count = count;
        self
    }

    pub fn slices(mut self, first: u32, count: Option<u32>) -> Self {
        self.first_slice = first;
        self.slice_count = count;
        self
    }

    pub(crate) fn resolve_format(&self, view: &'static str, resource: Format) -> Format {
        self.format.unwrap_or_else(|| {
            log::debug!("{view}: format {resource} taken from resource");
            resource
        })
    }
}

/// `requested`, or whatever remains of `total` after skipping `first`.
pub(crate) fn remaining(
    what: &'static str,
    total: u32,
    first: u32,
    requested: Option<u32>,
) -> Result<u32> {
    match requested {
        Some(count) => Ok(count),
        None => {
            let count = total
                .checked_sub(first)
                .ok_or(Error::OutOfRange { what, value: first })?;
            log::debug!("{what} {first}: count {count} taken from resource total {total}");
            Ok(count)
        }
    }
}

pub(crate) fn unsupported(what: &'static str, dimension: impl Into<u32>) -> Error {
    Error::OutOfRange {
        what,
        value: dimension.into(),
    }
}

/// `FirstElement`/`NumElements` of a buffer view. The native struct overlays
/// these with `ElementOffset`/`ElementWidth`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferElements {
    pub first_element: u32,
    pub num_elements: u32,
}

impl BufferElements {
    pub const fn new(first_element: u32, num_elements: u32) -> Self {
        Self {
            first_element,
            num_elements,
        }
    }

    pub fn element_offset(&self) -> u32 {
        self.first_element
    }

    pub fn element_width(&self) -> u32 {
        self.num_elements
    }
}

/// A single mip of a non-array texture (`TEX1D_RTV`, `TEX2D_DSV`, `TEX2D_UAV`, ...).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SingleMip {
    pub mip_slice: u32,
}

/// A single mip of a range of array slices.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArrayMip {
    pub mip_slice: u32,
    pub first_array_slice: u32,
    pub array_size: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Multisampled {
    unused_field_nothing_to_define: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MultisampledArray {
    pub first_array_slice: u32,
    pub array_size: u32,
}

/// A single mip of a range of W slices of a volume texture.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VolumeSlices {
    pub mip_slice: u32,
    pub first_w_slice: u32,
    pub w_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_count_wins() {
        assert_eq!(remaining("first array slice", 4, 9, Some(2)), Ok(2));
    }

    #[test]
    fn derived_count_is_what_remains() {
        assert_eq!(remaining("first array slice", 12, 4, None), Ok(8));
        assert_eq!(remaining("first array slice", 12, 12, None), Ok(0));
    }

    #[test]
    fn start_past_the_end_is_out_of_range() {
        assert_eq!(
            remaining("most detailed mip", 3, 5, None),
            Err(Error::OutOfRange {
                what: "most detailed mip",
                value: 5
            })
        );
    }

    #[test]
    fn range_builder() {
        let range = ViewRange::new().format(Format::R32Float).mips(2, None).slices(1, Some(3));
        assert_eq!(range.format, Some(Format::R32Float));
        assert_eq!((range.first_mip, range.mip_count), (2, None));
        assert_eq!((range.first_slice, range.slice_count), (1, Some(3)));
        assert_eq!(range.resolve_format("view", Format::R8Unorm), Format::R32Float);
        assert_eq!(ViewRange::new().resolve_format("view", Format::R8Unorm), Format::R8Unorm);
    }
}
