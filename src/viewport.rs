use std::hash::{Hash, Hasher};

use crate::{
    common::hash_f32,
    error::{Error, Result},
    resource::{mip_extent, Buffer, Texture1D, Texture2D, Texture3D},
    view::{DepthStencilView, DsvKind, RenderTargetView, RtvKind},
};

/// `D3D11_VIEWPORT`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Hash for Viewport {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f32(self.top_left_x, state);
        hash_f32(self.top_left_y, state);
        hash_f32(self.width, state);
        hash_f32(self.height, state);
        hash_f32(self.min_depth, state);
        hash_f32(self.max_depth, state);
    }
}

fn unsupported(value: impl Into<u32>) -> Error {
    Error::OutOfRange {
        what: "viewport view dimension",
        value: value.into(),
    }
}

impl Viewport {
    /// Depth range 0..1.
    pub fn new(top_left_x: f32, top_left_y: f32, width: f32, height: f32) -> Self {
        Self {
            top_left_x,
            top_left_y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    pub fn with_depth(mut self, min_depth: f32, max_depth: f32) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0.0 {
            0.0
        } else {
            self.width / self.height
        }
    }

    /// Covers the elements of a buffer render-target view past `top_left_x`.
    pub fn for_buffer<B, V>(buffer: &B, view: &V, top_left_x: f32) -> Result<Self>
    where
        B: Buffer + ?Sized,
        V: RenderTargetView + ?Sized,
    {
        buffer.desc()?;
        let view = view.desc()?;

        let elements = match view.kind {
            RtvKind::Buffer(elements) => elements.num_elements,
            other => return Err(unsupported(other.dimension())),
        };

        Ok(Self::new(top_left_x, 0.0, elements as f32 - top_left_x, 1.0))
    }

    pub fn for_texture1d<T, V>(texture: &T, view: &V, top_left_x: f32) -> Result<Self>
    where
        T: Texture1D + ?Sized,
        V: RenderTargetView + ?Sized,
    {
        let desc = texture.desc()?;
        let view = view.desc()?;

        let mip_slice = match view.kind {
            RtvKind::Texture1D(v) => v.mip_slice,
            RtvKind::Texture1DArray(v) => v.mip_slice,
            other => return Err(unsupported(other.dimension())),
        };

        let width = mip_extent(desc.width, mip_slice);
        Ok(Self::new(top_left_x, 0.0, width as f32 - top_left_x, 1.0))
    }

    /// Covers the mip the render-target view selects, minus the top-left
    /// offset. Multisampled views always use mip 0.
    pub fn for_texture2d<T, V>(texture: &T, view: &V, top_left_x: f32, top_left_y: f32) -> Result<Self>
    where
        T: Texture2D + ?Sized,
        V: RenderTargetView + ?Sized,
    {
        let desc = texture.desc()?;
        let view = view.desc()?;

        let mip_slice = match view.kind {
            RtvKind::Texture2D(v) => v.mip_slice,
            RtvKind::Texture2DArray(v) => v.mip_slice,
            RtvKind::Texture2DMs(_) | RtvKind::Texture2DMsArray(_) => 0,
            other => return Err(unsupported(other.dimension())),
        };

        Ok(Self::texture2d_mip(desc.width, desc.height, mip_slice, top_left_x, top_left_y))
    }

    pub fn for_texture2d_dsv<T, V>(
        texture: &T,
        view: &V,
        top_left_x: f32,
        top_left_y: f32,
    ) -> Result<Self>
    where
        T: Texture2D + ?Sized,
        V: DepthStencilView + ?Sized,
    {
        let desc = texture.desc()?;
        let view = view.desc()?;

        let mip_slice = match view.kind {
            DsvKind::Texture2D(v) => v.mip_slice,
            DsvKind::Texture2DArray(v) => v.mip_slice,
            DsvKind::Texture2DMs(_) | DsvKind::Texture2DMsArray(_) => 0,
            other => return Err(unsupported(other.dimension())),
        };

        Ok(Self::texture2d_mip(desc.width, desc.height, mip_slice, top_left_x, top_left_y))
    }

    pub fn for_texture3d<T, V>(texture: &T, view: &V, top_left_x: f32, top_left_y: f32) -> Result<Self>
    where
        T: Texture3D + ?Sized,
        V: RenderTargetView + ?Sized,
    {
        let desc = texture.desc()?;
        let view = view.desc()?;

        let mip_slice = match view.kind {
            RtvKind::Texture3D(v) => v.mip_slice,
            other => return Err(unsupported(other.dimension())),
        };

        Ok(Self::texture2d_mip(desc.width, desc.height, mip_slice, top_left_x, top_left_y))
    }

    fn texture2d_mip(width: u32, height: u32, mip_slice: u32, x: f32, y: f32) -> Self {
        let width = mip_extent(width, mip_slice);
        let height = mip_extent(height, mip_slice);

        Self::new(x, y, width as f32 - x, height as f32 - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        format::Format,
        resource::{BufferDesc, Texture1DDesc, Texture2DDesc, Texture3DDesc},
        view::{
            ArrayMip, BufferElements, DepthStencilViewDesc, MultisampledArray,
            RenderTargetViewDesc, SingleMip,
        },
        BindFlags, SampleDesc,
    };

    fn texture() -> Texture2DDesc {
        Texture2DDesc::new(Format::R8G8B8A8Unorm, 256, 128).with_mip_levels(9)
    }

    #[test]
    fn extent_halves_per_mip() {
        let view = RenderTargetViewDesc::texture2d(Format::R8G8B8A8Unorm, 2);
        let viewport = Viewport::for_texture2d(&texture(), &view, 0.0, 0.0).unwrap();

        assert_eq!(viewport, Viewport::new(0.0, 0.0, 64.0, 32.0));
        assert_eq!(viewport.max_depth, 1.0);
    }

    #[test]
    fn offset_is_subtracted() {
        let view = RenderTargetViewDesc::texture2d(Format::R8G8B8A8Unorm, 2);
        let viewport = Viewport::for_texture2d(&texture(), &view, 4.0, 2.0).unwrap();

        assert_eq!((viewport.width, viewport.height), (60.0, 30.0));
        assert_eq!((viewport.top_left_x, viewport.top_left_y), (4.0, 2.0));
    }

    #[test]
    fn extent_floors_at_one() {
        let view = RenderTargetViewDesc::new(
            Format::R8G8B8A8Unorm,
            RtvKind::Texture2DArray(ArrayMip {
                mip_slice: 8,
                first_array_slice: 0,
                array_size: 1,
            }),
        );
        let viewport = Viewport::for_texture2d(&texture(), &view, 0.0, 0.0).unwrap();
        assert_eq!((viewport.width, viewport.height), (1.0, 1.0));

        let view = RenderTargetViewDesc::texture2d(Format::R8G8B8A8Unorm, 31);
        let viewport = Viewport::for_texture2d(&texture(), &view, 0.0, 0.0).unwrap();
        assert_eq!((viewport.width, viewport.height), (1.0, 1.0));
    }

    #[test]
    fn multisampled_views_cover_the_top_mip() {
        let texture = texture().with_sample_desc(SampleDesc::new(4, 0));
        let view = RenderTargetViewDesc::new(
            Format::R8G8B8A8Unorm,
            RtvKind::Texture2DMsArray(MultisampledArray {
                first_array_slice: 0,
                array_size: 1,
            }),
        );
        let viewport = Viewport::for_texture2d(&texture, &view, 0.0, 0.0).unwrap();
        assert_eq!((viewport.width, viewport.height), (256.0, 128.0));
    }

    #[test]
    fn unsupported_view_dimension() {
        let view = RenderTargetViewDesc::new(
            Format::R8G8B8A8Unorm,
            RtvKind::Texture1D(SingleMip { mip_slice: 0 }),
        );
        assert_eq!(
            Viewport::for_texture2d(&texture(), &view, 0.0, 0.0),
            Err(Error::OutOfRange {
                what: "viewport view dimension",
                value: 2
            })
        );
    }

    #[test]
    fn missing_view_is_a_null_reference() {
        let view: Option<RenderTargetViewDesc> = None;
        assert_eq!(
            Viewport::for_texture2d(&texture(), &view, 0.0, 0.0),
            Err(Error::NullReference("render target view"))
        );
    }

    #[test]
    fn depth_stencil_view() {
        let view = DepthStencilViewDesc::texture2d(Format::D32Float, 1);
        let viewport = Viewport::for_texture2d_dsv(&texture(), &view, 0.0, 0.0).unwrap();
        assert_eq!((viewport.width, viewport.height), (128.0, 64.0));
    }

    #[test]
    fn buffer_texture1d_and_texture3d() {
        let buffer = BufferDesc::new(400, BindFlags::RENDER_TARGET);
        let view = RenderTargetViewDesc::new(
            Format::R32Float,
            RtvKind::Buffer(BufferElements::new(0, 100)),
        );
        let viewport = Viewport::for_buffer(&buffer, &view, 10.0).unwrap();
        assert_eq!((viewport.width, viewport.height), (90.0, 1.0));

        let line = Texture1DDesc::new(Format::R32Float, 100);
        let view = RenderTargetViewDesc::new(
            Format::R32Float,
            RtvKind::Texture1D(SingleMip { mip_slice: 1 }),
        );
        let viewport = Viewport::for_texture1d(&line, &view, 0.0).unwrap();
        assert_eq!(viewport.width, 50.0);

        let volume = Texture3DDesc::new(Format::R32Float, 64, 32, 8);
        let view = RenderTargetViewDesc::for_texture3d(&volume, crate::ViewRange::new().mip(1))
            .unwrap();
        let viewport = Viewport::for_texture3d(&volume, &view, 0.0, 0.0).unwrap();
        assert_eq!((viewport.width, viewport.height), (32.0, 16.0));
    }

    #[test]
    fn aspect_ratio() {
        assert_eq!(Viewport::new(0.0, 0.0, 1920.0, 1080.0).aspect_ratio(), 1920.0 / 1080.0);
        assert_eq!(Viewport::default().aspect_ratio(), 0.0);
    }
}
