//! Feature-support structures filled by `CheckFeatureSupport`.
//!
//! Every structure starts zeroed and exposes its fields through getters only.
//! Enum-typed fields are kept as the raw value the driver wrote and converted
//! when read, so a value newer than this crate is reported instead of being
//! undefined behavior.

use std::{
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use crate::{
    common::Bool32,
    error::{Error, Result},
    flags::{FormatSupport, FormatSupport2, ShaderCacheSupport, ShaderMinPrecision},
    format::Format,
    macros::{native_enum, read_only_struct},
};

native_enum! {
    pub enum Feature("feature") {
        Threading = 0,
        Doubles = 1,
        FormatSupport = 2,
        FormatSupport2 = 3,
        D3D10XHardwareOptions = 4,
        D3D11Options = 5,
        ArchitectureInfo = 6,
        D3D9Options = 7,
        ShaderMinPrecisionSupport = 8,
        D3D9ShadowSupport = 9,
        D3D11Options1 = 10,
        D3D9SimpleInstancingSupport = 11,
        MarkerSupport = 12,
        D3D9Options1 = 13,
        D3D11Options2 = 14,
        D3D11Options3 = 15,
        GpuVirtualAddressSupport = 16,
        D3D11Options4 = 17,
        ShaderCache = 18,
        D3D11Options5 = 19,
        Displayable = 20,
    }
}

native_enum! {
    pub enum TiledResourcesTier("tiled resources tier") {
        NotSupported = 0,
        Tier1 = 1,
        Tier2 = 2,
        Tier3 = 3,
    }
}

native_enum! {
    pub enum ConservativeRasterizationTier("conservative rasterization tier") {
        NotSupported = 0,
        Tier1 = 1,
        Tier2 = 2,
        Tier3 = 3,
    }
}

native_enum! {
    pub enum SharedResourceTier("shared resource tier") {
        Tier0 = 0,
        Tier1 = 1,
        Tier2 = 2,
        Tier3 = 3,
    }
}

/// A driver-written enum field, converted to `T` when read.
#[repr(transparent)]
pub struct RawEnum<T> {
    value: u32,
    _kind: PhantomData<T>,
}

impl<T> RawEnum<T> {
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl<T> Clone for RawEnum<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawEnum<T> {}

impl<T> Default for RawEnum<T> {
    fn default() -> Self {
        Self {
            value: 0,
            _kind: PhantomData,
        }
    }
}

impl<T> PartialEq for RawEnum<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for RawEnum<T> {}

impl<T> Hash for RawEnum<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Debug for RawEnum<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: TryFrom<u32, Error = Error>> From<RawEnum<T>> for Result<T> {
    fn from(raw: RawEnum<T>) -> Self {
        T::try_from(raw.value)
    }
}

/// A structure `CheckFeatureSupport` fills for one [`Feature`].
pub trait FeatureData: Copy + Default {
    const FEATURE: Feature;
}

macro_rules! feature_data {
    ($($ty:ident => $feature:ident,)+) => {
        $(
            impl FeatureData for $ty {
                const FEATURE: Feature = Feature::$feature;
            }
        )+
    };
}

read_only_struct! {
    pub struct FeatureDataThreading {
        driver_concurrent_creates: Bool32 => driver_concurrent_creates -> bool,
        driver_command_lists: Bool32 => driver_command_lists -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataDoubles {
        double_precision_float_shader_ops: Bool32 => double_precision_float_shader_ops -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataFormatSupport {
        in_format: Format => in_format -> Format,
        out_format_support: FormatSupport => format_support -> FormatSupport,
    }
}

impl FeatureDataFormatSupport {
    /// Asks which resource and view uses `format` supports.
    pub fn new(format: Format) -> Self {
        Self {
            in_format: format,
            ..Default::default()
        }
    }
}

read_only_struct! {
    pub struct FeatureDataFormatSupport2 {
        in_format: Format => in_format -> Format,
        out_format_support2: FormatSupport2 => format_support2 -> FormatSupport2,
    }
}

impl FeatureDataFormatSupport2 {
    pub fn new(format: Format) -> Self {
        Self {
            in_format: format,
            ..Default::default()
        }
    }
}

read_only_struct! {
    pub struct FeatureDataD3D10XHardwareOptions {
        compute_shaders_plus_raw_and_structured_buffers_via_shader_4_x: Bool32
            => compute_shaders_plus_raw_and_structured_buffers_via_shader_4_x -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D11Options {
        output_merger_logic_op: Bool32 => output_merger_logic_op -> bool,
        uav_only_rendering_forced_sample_count: Bool32 => uav_only_rendering_forced_sample_count -> bool,
        discard_apis_seen_by_driver: Bool32 => discard_apis_seen_by_driver -> bool,
        flags_for_update_and_copy_seen_by_driver: Bool32 => flags_for_update_and_copy_seen_by_driver -> bool,
        clear_view: Bool32 => clear_view -> bool,
        copy_with_overlap: Bool32 => copy_with_overlap -> bool,
        constant_buffer_partial_update: Bool32 => constant_buffer_partial_update -> bool,
        constant_buffer_offsetting: Bool32 => constant_buffer_offsetting -> bool,
        map_no_overwrite_on_dynamic_constant_buffer: Bool32 => map_no_overwrite_on_dynamic_constant_buffer -> bool,
        map_no_overwrite_on_dynamic_buffer_srv: Bool32 => map_no_overwrite_on_dynamic_buffer_srv -> bool,
        multisample_rtv_with_forced_sample_count_one: Bool32 => multisample_rtv_with_forced_sample_count_one -> bool,
        sad4_shader_instructions: Bool32 => sad4_shader_instructions -> bool,
        extended_doubles_shader_instructions: Bool32 => extended_doubles_shader_instructions -> bool,
        extended_resource_sharing: Bool32 => extended_resource_sharing -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataArchitectureInfo {
        tile_based_deferred_renderer: Bool32 => tile_based_deferred_renderer -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D9Options {
        full_non_pow2_texture_support: Bool32 => full_non_pow2_texture_support -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataShaderMinPrecisionSupport {
        pixel_shader_min_precision: ShaderMinPrecision => pixel_shader_min_precision -> ShaderMinPrecision,
        all_other_shader_stages_min_precision: ShaderMinPrecision
            => all_other_shader_stages_min_precision -> ShaderMinPrecision,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D9ShadowSupport {
        supports_depth_as_texture_with_less_equal_comparison_filter: Bool32
            => supports_depth_as_texture_with_less_equal_comparison_filter -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D11Options1 {
        tiled_resources_tier: RawEnum<TiledResourcesTier> => tiled_resources_tier -> Result<TiledResourcesTier>,
        min_max_filtering: Bool32 => min_max_filtering -> bool,
        clear_view_also_supports_depth_only_formats: Bool32 => clear_view_also_supports_depth_only_formats -> bool,
        map_on_default_buffers: Bool32 => map_on_default_buffers -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D9SimpleInstancingSupport {
        simple_instancing_supported: Bool32 => simple_instancing_supported -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataMarkerSupport {
        profile: Bool32 => profile -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D9Options1 {
        full_non_pow2_texture_supported: Bool32 => full_non_pow2_texture_supported -> bool,
        depth_as_texture_with_less_equal_comparison_filter_supported: Bool32
            => depth_as_texture_with_less_equal_comparison_filter_supported -> bool,
        simple_instancing_supported: Bool32 => simple_instancing_supported -> bool,
        texture_cube_face_render_target_with_non_cube_depth_stencil_supported: Bool32
            => texture_cube_face_render_target_with_non_cube_depth_stencil_supported -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D11Options2 {
        ps_specified_stencil_ref_supported: Bool32 => ps_specified_stencil_ref_supported -> bool,
        typed_uav_load_additional_formats: Bool32 => typed_uav_load_additional_formats -> bool,
        rovs_supported: Bool32 => rovs_supported -> bool,
        conservative_rasterization_tier: RawEnum<ConservativeRasterizationTier>
            => conservative_rasterization_tier -> Result<ConservativeRasterizationTier>,
        tiled_resources_tier: RawEnum<TiledResourcesTier> => tiled_resources_tier -> Result<TiledResourcesTier>,
        map_on_default_textures: Bool32 => map_on_default_textures -> bool,
        standard_swizzle: Bool32 => standard_swizzle -> bool,
        unified_memory_architecture: Bool32 => unified_memory_architecture -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D11Options3 {
        vp_and_rt_array_index_from_any_shader_feeding_rasterizer: Bool32
            => vp_and_rt_array_index_from_any_shader_feeding_rasterizer -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataGpuVirtualAddressSupport {
        max_gpu_virtual_address_bits_per_resource: u32 => max_gpu_virtual_address_bits_per_resource -> u32,
        max_gpu_virtual_address_bits_per_process: u32 => max_gpu_virtual_address_bits_per_process -> u32,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D11Options4 {
        extended_nv12_shared_texture_supported: Bool32 => extended_nv12_shared_texture_supported -> bool,
    }
}

read_only_struct! {
    pub struct FeatureDataShaderCache {
        support_flags: ShaderCacheSupport => support_flags -> ShaderCacheSupport,
    }
}

read_only_struct! {
    pub struct FeatureDataD3D11Options5 {
        shared_resource_tier: RawEnum<SharedResourceTier> => shared_resource_tier -> Result<SharedResourceTier>,
    }
}

read_only_struct! {
    pub struct FeatureDataDisplayable {
        displayable_texture: Bool32 => displayable_texture -> bool,
        shared_resource_tier: RawEnum<SharedResourceTier> => shared_resource_tier -> Result<SharedResourceTier>,
    }
}

feature_data! {
    FeatureDataThreading => Threading,
    FeatureDataDoubles => Doubles,
    FeatureDataFormatSupport => FormatSupport,
    FeatureDataFormatSupport2 => FormatSupport2,
    FeatureDataD3D10XHardwareOptions => D3D10XHardwareOptions,
    FeatureDataD3D11Options => D3D11Options,
    FeatureDataArchitectureInfo => ArchitectureInfo,
    FeatureDataD3D9Options => D3D9Options,
    FeatureDataShaderMinPrecisionSupport => ShaderMinPrecisionSupport,
    FeatureDataD3D9ShadowSupport => D3D9ShadowSupport,
    FeatureDataD3D11Options1 => D3D11Options1,
    FeatureDataD3D9SimpleInstancingSupport => D3D9SimpleInstancingSupport,
    FeatureDataMarkerSupport => MarkerSupport,
    FeatureDataD3D9Options1 => D3D9Options1,
    FeatureDataD3D11Options2 => D3D11Options2,
    FeatureDataD3D11Options3 => D3D11Options3,
    FeatureDataGpuVirtualAddressSupport => GpuVirtualAddressSupport,
    FeatureDataD3D11Options4 => D3D11Options4,
    FeatureDataShaderCache => ShaderCache,
    FeatureDataD3D11Options5 => D3D11Options5,
    FeatureDataDisplayable => Displayable,
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;

    fn raw<T>(value: u32) -> RawEnum<T> {
        RawEnum {
            value,
            _kind: PhantomData,
        }
    }

    #[test]
    fn format_support_carries_its_format() {
        let data = FeatureDataFormatSupport::new(Format::R16G16B16A16Float);
        assert_eq!(data.in_format(), Format::R16G16B16A16Float);
        assert!(data.format_support().is_empty());
        assert_eq!(
            FeatureDataFormatSupport2::new(Format::R32Uint).in_format(),
            Format::R32Uint
        );
    }

    #[test]
    fn tiers_convert_when_read() {
        let mut data = FeatureDataD3D11Options2::default();
        assert_eq!(data.tiled_resources_tier(), Ok(TiledResourcesTier::NotSupported));

        data.tiled_resources_tier = raw(2);
        data.conservative_rasterization_tier = raw(9);
        assert_eq!(data.tiled_resources_tier(), Ok(TiledResourcesTier::Tier2));
        assert_eq!(
            data.conservative_rasterization_tier(),
            Err(Error::OutOfRange {
                what: "conservative rasterization tier",
                value: 9,
            })
        );
    }

    #[test]
    fn bools_read_as_bool() {
        let mut data = FeatureDataThreading::default();
        assert!(!data.driver_command_lists());
        data.driver_command_lists = Bool32::TRUE;
        assert!(data.driver_command_lists());
    }

    #[test]
    fn native_sizes() {
        assert_eq!(size_of::<FeatureDataD3D11Options>(), 14 * 4);
        assert_eq!(size_of::<FeatureDataD3D11Options2>(), 8 * 4);
        assert_eq!(size_of::<FeatureDataFormatSupport>(), 8);
        assert_eq!(size_of::<FeatureDataDisplayable>(), 8);
    }

    #[test]
    fn every_feature_has_a_structure() {
        let features = [
            FeatureDataThreading::FEATURE,
            FeatureDataDoubles::FEATURE,
            FeatureDataFormatSupport::FEATURE,
            FeatureDataFormatSupport2::FEATURE,
            FeatureDataD3D10XHardwareOptions::FEATURE,
            FeatureDataD3D11Options::FEATURE,
            FeatureDataArchitectureInfo::FEATURE,
            FeatureDataD3D9Options::FEATURE,
            FeatureDataShaderMinPrecisionSupport::FEATURE,
            FeatureDataD3D9ShadowSupport::FEATURE,
            FeatureDataD3D11Options1::FEATURE,
            FeatureDataD3D9SimpleInstancingSupport::FEATURE,
            FeatureDataMarkerSupport::FEATURE,
            FeatureDataD3D9Options1::FEATURE,
            FeatureDataD3D11Options2::FEATURE,
            FeatureDataD3D11Options3::FEATURE,
            FeatureDataGpuVirtualAddressSupport::FEATURE,
            FeatureDataD3D11Options4::FEATURE,
            FeatureDataShaderCache::FEATURE,
            FeatureDataD3D11Options5::FEATURE,
            FeatureDataDisplayable::FEATURE,
        ];
        assert_eq!(features.as_slice(), Feature::ALL);
    }
}
