//! Bridges the descriptor types onto the `windows` bindings: description
//! traits for live resources and views, and the device calls that take the
//! layout-exact descriptors.

use std::{ffi::c_void, mem::size_of};

use anyhow::{Context, Result};
use windows::Win32::Graphics::{Direct3D11::*, Dxgi::Common::DXGI_SAMPLE_DESC};

use crate::{
    common::{SampleDesc, Usage},
    error,
    feature::FeatureData,
    flags::{BindFlags, CpuAccessFlags, ResourceMiscFlags},
    format::Format,
    resource::{
        Buffer, BufferDesc, Texture1D, Texture1DDesc, Texture2D, Texture2DDesc, Texture3D,
        Texture3DDesc,
    },
    view::{
        DepthStencilView, DepthStencilViewDesc, RawDepthStencilViewDesc, RawRenderTargetViewDesc,
        RawShaderResourceViewDesc, RawUnorderedAccessViewDesc, RenderTargetView,
        RenderTargetViewDesc, ShaderResourceView, ShaderResourceViewDesc, UnorderedAccessView,
        UnorderedAccessViewDesc,
    },
};

fn format(value: windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT) -> error::Result<Format> {
    Format::try_from(value.0 as u32)
}

fn usage(value: D3D11_USAGE) -> error::Result<Usage> {
    Usage::try_from(value.0 as u32)
}

fn sample_desc(value: DXGI_SAMPLE_DESC) -> SampleDesc {
    SampleDesc::new(value.Count, value.Quality)
}

impl Buffer for ID3D11Buffer {
    fn desc(&self) -> error::Result<BufferDesc> {
        let mut desc = D3D11_BUFFER_DESC::default();
        unsafe { self.GetDesc(&mut desc) };

        Ok(BufferDesc {
            byte_width: desc.ByteWidth,
            usage: usage(desc.Usage)?,
            bind_flags: BindFlags::from_bits_retain(desc.BindFlags),
            cpu_access_flags: CpuAccessFlags::from_bits_retain(desc.CPUAccessFlags),
            misc_flags: ResourceMiscFlags::from_bits_retain(desc.MiscFlags),
            structure_byte_stride: desc.StructureByteStride,
        })
    }
}

impl Texture1D for ID3D11Texture1D {
    fn desc(&self) -> error::Result<Texture1DDesc> {
        let mut desc = D3D11_TEXTURE1D_DESC::default();
        unsafe { self.GetDesc(&mut desc) };

        Ok(Texture1DDesc {
            width: desc.Width,
            mip_levels: desc.MipLevels,
            array_size: desc.ArraySize,
            format: format(desc.Format)?,
            usage: usage(desc.Usage)?,
            bind_flags: BindFlags::from_bits_retain(desc.BindFlags),
            cpu_access_flags: CpuAccessFlags::from_bits_retain(desc.CPUAccessFlags),
            misc_flags: ResourceMiscFlags::from_bits_retain(desc.MiscFlags),
        })
    }
}

impl Texture2D for ID3D11Texture2D {
    fn desc(&self) -> error::Result<Texture2DDesc> {
        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { self.GetDesc(&mut desc) };

        Ok(Texture2DDesc {
            width: desc.Width,
            height: desc.Height,
            mip_levels: desc.MipLevels,
            array_size: desc.ArraySize,
            format: format(desc.Format)?,
            sample_desc: sample_desc(desc.SampleDesc),
            usage: usage(desc.Usage)?,
            bind_flags: BindFlags::from_bits_retain(desc.BindFlags),
            cpu_access_flags: CpuAccessFlags::from_bits_retain(desc.CPUAccessFlags),
            misc_flags: ResourceMiscFlags::from_bits_retain(desc.MiscFlags),
        })
    }
}

impl Texture3D for ID3D11Texture3D {
    fn desc(&self) -> error::Result<Texture3DDesc> {
        let mut desc = D3D11_TEXTURE3D_DESC::default();
        unsafe { self.GetDesc(&mut desc) };

        Ok(Texture3DDesc {
            width: desc.Width,
            height: desc.Height,
            depth: desc.Depth,
            mip_levels: desc.MipLevels,
            format: format(desc.Format)?,
            usage: usage(desc.Usage)?,
            bind_flags: BindFlags::from_bits_retain(desc.BindFlags),
            cpu_access_flags: CpuAccessFlags::from_bits_retain(desc.CPUAccessFlags),
            misc_flags: ResourceMiscFlags::from_bits_retain(desc.MiscFlags),
        })
    }
}

// The raw view layouts match the native structs byte for byte.

impl RenderTargetView for ID3D11RenderTargetView {
    fn desc(&self) -> error::Result<RenderTargetViewDesc> {
        let mut raw = RawRenderTargetViewDesc::default();
        unsafe { self.GetDesc(&mut raw as *mut _ as *mut D3D11_RENDER_TARGET_VIEW_DESC) };
        RenderTargetViewDesc::try_from(&raw)
    }
}

impl DepthStencilView for ID3D11DepthStencilView {
    fn desc(&self) -> error::Result<DepthStencilViewDesc> {
        let mut raw = RawDepthStencilViewDesc::default();
        unsafe { self.GetDesc(&mut raw as *mut _ as *mut D3D11_DEPTH_STENCIL_VIEW_DESC) };
        DepthStencilViewDesc::try_from(&raw)
    }
}

impl ShaderResourceView for ID3D11ShaderResourceView {
    fn desc(&self) -> error::Result<ShaderResourceViewDesc> {
        let mut raw = RawShaderResourceViewDesc::default();
        unsafe { self.GetDesc(&mut raw as *mut _ as *mut D3D11_SHADER_RESOURCE_VIEW_DESC) };
        ShaderResourceViewDesc::try_from(&raw)
    }
}

impl UnorderedAccessView for ID3D11UnorderedAccessView {
    fn desc(&self) -> error::Result<UnorderedAccessViewDesc> {
        let mut raw = RawUnorderedAccessViewDesc::default();
        unsafe { self.GetDesc(&mut raw as *mut _ as *mut D3D11_UNORDERED_ACCESS_VIEW_DESC) };
        UnorderedAccessViewDesc::try_from(&raw)
    }
}

/// Fills `data` from the driver. Input fields such as the format of
/// [`FeatureDataFormatSupport`](crate::feature::FeatureDataFormatSupport)
/// are passed through as given.
pub fn check_feature_support<T: FeatureData>(device: &ID3D11Device, mut data: T) -> Result<T> {
    unsafe {
        device
            .CheckFeatureSupport(
                D3D11_FEATURE(T::FEATURE as i32),
                &mut data as *mut T as *mut c_void,
                size_of::<T>() as u32,
            )
            .with_context(|| format!("checking support for {}", T::FEATURE))?;
    }

    Ok(data)
}

pub fn create_render_target_view(
    device: &ID3D11Device,
    resource: &ID3D11Resource,
    desc: &RenderTargetViewDesc,
) -> Result<ID3D11RenderTargetView> {
    let raw = desc.to_raw();
    let mut view = None;
    unsafe {
        device.CreateRenderTargetView(
            resource,
            Some(&raw as *const _ as *const D3D11_RENDER_TARGET_VIEW_DESC),
            Some(&mut view),
        )?;
    }

    view.context("device returned no render target view")
}

pub fn create_depth_stencil_view(
    device: &ID3D11Device,
    resource: &ID3D11Resource,
    desc: &DepthStencilViewDesc,
) -> Result<ID3D11DepthStencilView> {
    let raw = desc.to_raw();
    let mut view = None;
    unsafe {
        device.CreateDepthStencilView(
            resource,
            Some(&raw as *const _ as *const D3D11_DEPTH_STENCIL_VIEW_DESC),
            Some(&mut view),
        )?;
    }

    view.context("device returned no depth stencil view")
}

pub fn create_shader_resource_view(
    device: &ID3D11Device,
    resource: &ID3D11Resource,
    desc: &ShaderResourceViewDesc,
) -> Result<ID3D11ShaderResourceView> {
    let raw = desc.to_raw();
    let mut view = None;
    unsafe {
        device.CreateShaderResourceView(
            resource,
            Some(&raw as *const _ as *const D3D11_SHADER_RESOURCE_VIEW_DESC),
            Some(&mut view),
        )?;
    }

    view.context("device returned no shader resource view")
}

pub fn create_unordered_access_view(
    device: &ID3D11Device,
    resource: &ID3D11Resource,
    desc: &UnorderedAccessViewDesc,
) -> Result<ID3D11UnorderedAccessView> {
    let raw = desc.to_raw();
    let mut view = None;
    unsafe {
        device.CreateUnorderedAccessView(
            resource,
            Some(&raw as *const _ as *const D3D11_UNORDERED_ACCESS_VIEW_DESC),
            Some(&mut view),
        )?;
    }

    view.context("device returned no unordered access view")
}

#[cfg(test)]
mod tests {
    use std::mem::{align_of, size_of};

    use windows::Win32::Graphics::Direct3D::D3D_DRIVER_TYPE_WARP;

    use super::*;
    use crate::feature::{FeatureDataFormatSupport, FeatureDataThreading};
    use crate::flags::FormatSupport;

    fn warp_device() -> ID3D11Device {
        let mut device = None;
        unsafe {
            D3D11CreateDevice(
                None,
                D3D_DRIVER_TYPE_WARP,
                None,
                D3D11_CREATE_DEVICE_FLAG(0),
                None,
                D3D11_SDK_VERSION,
                Some(&mut device),
                None,
                None,
            )
            .unwrap();
        }
        device.unwrap()
    }

    #[test]
    fn format_support_asks_about_the_given_format() {
        let device = warp_device();
        let data = check_feature_support(
            &device,
            FeatureDataFormatSupport::new(Format::D24UnormS8Uint),
        )
        .unwrap();
        assert_eq!(data.in_format(), Format::D24UnormS8Uint);
        assert!(data.format_support().contains(FormatSupport::DEPTH_STENCIL));
        assert!(!data.format_support().contains(FormatSupport::BUFFER));
    }

    #[test]
    fn output_only_features_start_from_default() {
        let device = warp_device();
        let data = check_feature_support(&device, FeatureDataThreading::default()).unwrap();
        assert!(data.driver_concurrent_creates());
    }

    #[test]
    fn raw_views_match_native_layout() {
        assert_eq!(size_of::<RawRenderTargetViewDesc>(), size_of::<D3D11_RENDER_TARGET_VIEW_DESC>());
        assert_eq!(size_of::<RawDepthStencilViewDesc>(), size_of::<D3D11_DEPTH_STENCIL_VIEW_DESC>());
        assert_eq!(size_of::<RawShaderResourceViewDesc>(), size_of::<D3D11_SHADER_RESOURCE_VIEW_DESC>());
        assert_eq!(
            size_of::<RawUnorderedAccessViewDesc>(),
            size_of::<D3D11_UNORDERED_ACCESS_VIEW_DESC>()
        );
        assert_eq!(align_of::<RawShaderResourceViewDesc>(), align_of::<D3D11_SHADER_RESOURCE_VIEW_DESC>());
    }

    #[test]
    fn feature_structs_match_native_layout() {
        assert_eq!(
            size_of::<crate::feature::FeatureDataD3D11Options>(),
            size_of::<D3D11_FEATURE_DATA_D3D11_OPTIONS>()
        );
        assert_eq!(
            size_of::<crate::feature::FeatureDataD3D11Options2>(),
            size_of::<D3D11_FEATURE_DATA_D3D11_OPTIONS2>()
        );
    }
}
