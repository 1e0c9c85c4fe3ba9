//! INI manifests describing resources, views over them, and viewports.
//!
//! ```ini
//! [texture2d scene]
//! format = R16G16B16A16Float
//! width = 1920
//! height = 1080
//! bind = SHADER_RESOURCE | RENDER_TARGET
//!
//! [rtv scene-target]
//! resource = scene
//!
//! [viewport scene]
//! texture = scene
//! view = scene-target
//! ```
//!
//! Omitted keys are left unspecified and filled in from the resource when
//! the manifest is resolved.

use std::{collections::HashMap, fmt, path::Path, str::FromStr};

use anyhow::{bail, Context, Result};
use ini::{Ini, Properties};

use crate::{
    common::{SampleDesc, Usage},
    error::{self, Error},
    flags::{BindFlags, BufferExSrvFlags, BufferUavFlags, CpuAccessFlags, DsvFlags, ResourceMiscFlags},
    format::Format,
    resource::{full_mip_chain, BufferDesc, Texture1DDesc, Texture2DDesc, Texture3DDesc},
    view::{
        DepthStencilViewDesc, DsvDimension, RenderTargetViewDesc, RtvDimension,
        ShaderResourceViewDesc, SrvDimension, UavDimension, UnorderedAccessViewDesc, ViewRange,
    },
    viewport::Viewport,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceDesc {
    Buffer(BufferDesc),
    Texture1D(Texture1DDesc),
    Texture2D(Texture2DDesc),
    Texture3D(Texture3DDesc),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResourceKind {
    Buffer,
    Texture1D,
    Texture2D,
    Texture3D,
}

impl ResourceDesc {
    fn kind(&self) -> ResourceKind {
        match self {
            Self::Buffer(_) => ResourceKind::Buffer,
            Self::Texture1D(_) => ResourceKind::Texture1D,
            Self::Texture2D(_) => ResourceKind::Texture2D,
            Self::Texture3D(_) => ResourceKind::Texture3D,
        }
    }

    fn as_buffer(&self) -> Option<&BufferDesc> {
        match self {
            Self::Buffer(desc) => Some(desc),
            _ => None,
        }
    }

    fn as_texture1d(&self) -> Option<&Texture1DDesc> {
        match self {
            Self::Texture1D(desc) => Some(desc),
            _ => None,
        }
    }

    fn as_texture2d(&self) -> Option<&Texture2DDesc> {
        match self {
            Self::Texture2D(desc) => Some(desc),
            _ => None,
        }
    }

    fn as_texture3d(&self) -> Option<&Texture3DDesc> {
        match self {
            Self::Texture3D(desc) => Some(desc),
            _ => None,
        }
    }

    /// The dimension name a view takes when the manifest leaves it out.
    fn default_dimension(&self, cube_views: bool) -> &'static str {
        match self {
            Self::Buffer(_) => "Buffer",
            Self::Texture1D(desc) if desc.array_size > 1 => "Texture1DArray",
            Self::Texture1D(_) => "Texture1D",
            Self::Texture2D(desc) => {
                let cube = cube_views && desc.misc_flags.contains(ResourceMiscFlags::TEXTURECUBE);
                match (desc.sample_desc.is_multisampled(), desc.array_size > 1) {
                    _ if cube && desc.array_size > 6 => "TextureCubeArray",
                    _ if cube => "TextureCube",
                    (true, true) => "Texture2DMsArray",
                    (true, false) => "Texture2DMs",
                    (false, true) => "Texture2DArray",
                    (false, false) => "Texture2D",
                }
            }
            Self::Texture3D(_) => "Texture3D",
        }
    }

    /// Elements a buffer view covers when `num-elements` is omitted.
    fn element_count(&self) -> u32 {
        match self {
            Self::Buffer(desc) if desc.structure_byte_stride > 0 => {
                desc.byte_width / desc.structure_byte_stride
            }
            Self::Buffer(desc) => desc.byte_width / 4,
            _ => 0,
        }
    }
}

/// The resource kind a dimension name implies, for views whose resource
/// is missing.
fn implied_kind(dimension: &str) -> Option<ResourceKind> {
    match dimension {
        "Buffer" | "BufferEx" => Some(ResourceKind::Buffer),
        "Texture1D" | "Texture1DArray" => Some(ResourceKind::Texture1D),
        "Texture3D" => Some(ResourceKind::Texture3D),
        d if d.starts_with("Texture2D") || d.starts_with("TextureCube") => {
            Some(ResourceKind::Texture2D)
        }
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewType {
    Rtv,
    Dsv,
    Srv,
    Uav,
}

impl ViewType {
    fn section(self) -> &'static str {
        match self {
            Self::Rtv => "rtv",
            Self::Dsv => "dsv",
            Self::Srv => "srv",
            Self::Uav => "uav",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewEntry {
    pub name: String,
    pub ty: ViewType,
    pub resource: String,
    /// Variant name of the view type's dimension enum.
    pub dimension: Option<String>,
    pub range: ViewRange,
    pub first_element: u32,
    pub num_elements: Option<u32>,
    /// Raw `flags` text, parsed as the view type's flag set.
    pub flags: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportEntry {
    pub name: String,
    pub texture: String,
    pub view: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedView {
    Rtv(RenderTargetViewDesc),
    Dsv(DepthStencilViewDesc),
    Srv(ShaderResourceViewDesc),
    Uav(UnorderedAccessViewDesc),
}

impl fmt::Display for ResolvedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rtv(desc) => write!(f, "rtv {} {:?}", desc.format, desc.kind),
            Self::Dsv(desc) => write!(f, "dsv {} {:?} {:?}", desc.format, desc.flags, desc.kind),
            Self::Srv(desc) => write!(f, "srv {} {:?}", desc.format, desc.kind),
            Self::Uav(desc) => write!(f, "uav {} {:?}", desc.format, desc.kind),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolved {
    pub views: Vec<(String, ResolvedView)>,
    pub viewports: Vec<(String, Viewport)>,
}

#[derive(Clone, Debug, Default)]
pub struct Manifest {
    resources: HashMap<String, ResourceDesc>,
    views: Vec<ViewEntry>,
    viewports: Vec<ViewportEntry>,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conf = Ini::load_from_file_noescape(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;

        Self::from_ini(&conf).with_context(|| format!("loading manifest {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let conf = Ini::load_from_str_noescape(text).context("parsing manifest")?;
        Self::from_ini(&conf)
    }

    fn from_ini(conf: &Ini) -> Result<Self> {
        let mut manifest = Self::default();

        for (section, props) in conf.iter() {
            let Some(section) = section else {
                continue;
            };
            let (kind, name) = section
                .split_once(char::is_whitespace)
                .with_context(|| format!("section [{section}] has no name"))?;
            let (kind, name) = (kind.to_ascii_lowercase(), name.trim().to_string());

            match kind.as_str() {
                "buffer" | "texture1d" | "texture2d" | "texture3d" => {
                    let desc = parse_resource(&kind, props)
                        .with_context(|| format!("in [{section}]"))?;
                    if manifest.resources.insert(name.clone(), desc).is_some() {
                        bail!("resource {name:?} is declared twice");
                    }
                }
                "rtv" | "dsv" | "srv" | "uav" => {
                    let ty = match kind.as_str() {
                        "rtv" => ViewType::Rtv,
                        "dsv" => ViewType::Dsv,
                        "srv" => ViewType::Srv,
                        _ => ViewType::Uav,
                    };
                    let view =
                        parse_view(name, ty, props).with_context(|| format!("in [{section}]"))?;
                    manifest.views.push(view);
                }
                "viewport" => {
                    let viewport =
                        parse_viewport(name, props).with_context(|| format!("in [{section}]"))?;
                    manifest.viewports.push(viewport);
                }
                _ => bail!("unknown section kind {kind:?} in [{section}]"),
            }
        }

        log::info!(
            "manifest: {} resources, {} views, {} viewports",
            manifest.resources.len(),
            manifest.views.len(),
            manifest.viewports.len()
        );

        Ok(manifest)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDesc> {
        self.resources.get(name)
    }

    pub fn views(&self) -> &[ViewEntry] {
        &self.views
    }

    pub fn viewports(&self) -> &[ViewportEntry] {
        &self.viewports
    }

    /// Resolves every view, then every viewport, stopping at the first
    /// failure.
    pub fn resolve(&self) -> Result<Resolved> {
        let mut resolved = Resolved::default();

        for view in &self.views {
            let desc = self
                .resolve_entry(view)
                .with_context(|| format!("resolving [{} {}]", view.ty.section(), view.name))?;
            log::debug!("{} {}: {desc}", view.ty.section(), view.name);
            resolved.views.push((view.name.clone(), desc));
        }

        for viewport in &self.viewports {
            let desc = self
                .resolve_viewport_entry(viewport)
                .with_context(|| format!("resolving [viewport {}]", viewport.name))?;
            resolved.viewports.push((viewport.name.clone(), desc));
        }

        Ok(resolved)
    }

    pub fn resolve_view(&self, name: &str) -> error::Result<ResolvedView> {
        let view = self
            .views
            .iter()
            .find(|view| view.name == name)
            .ok_or(Error::NullReference("view"))?;
        self.resolve_entry(view)
    }

    pub fn resolve_viewport(&self, name: &str) -> error::Result<Viewport> {
        let viewport = self
            .viewports
            .iter()
            .find(|viewport| viewport.name == name)
            .ok_or(Error::NullReference("viewport"))?;
        self.resolve_viewport_entry(viewport)
    }

    fn resolve_entry(&self, view: &ViewEntry) -> error::Result<ResolvedView> {
        let resource = self.resources.get(&view.resource);
        let dimension = match (&view.dimension, resource) {
            (Some(dimension), _) => dimension.as_str(),
            (None, Some(resource)) => resource.default_dimension(view.ty == ViewType::Srv),
            (None, None) => return Err(Error::NullReference("resource")),
        };
        let kind = match resource {
            Some(resource) => resource.kind(),
            None => implied_kind(dimension).ok_or(Error::UnknownName {
                what: "view dimension",
                name: dimension.to_string(),
            })?,
        };

        let buffer = resource.and_then(ResourceDesc::as_buffer);
        let texture1d = resource.and_then(ResourceDesc::as_texture1d);
        let texture2d = resource.and_then(ResourceDesc::as_texture2d);
        let texture3d = resource.and_then(ResourceDesc::as_texture3d);

        let format = view.range.format.unwrap_or(Format::Unknown);
        let first = view.first_element;
        let count = view
            .num_elements
            .unwrap_or_else(|| resource.map_or(0, ResourceDesc::element_count));

        let resolved = match view.ty {
            ViewType::Rtv => {
                let dimension: RtvDimension = dimension.parse()?;
                ResolvedView::Rtv(match kind {
                    ResourceKind::Buffer => {
                        expect_dimension(dimension, RtvDimension::Buffer)?;
                        RenderTargetViewDesc::for_buffer(&buffer, format, first, count)?
                    }
                    ResourceKind::Texture1D => {
                        RenderTargetViewDesc::for_texture1d(&texture1d, dimension, view.range)?
                    }
                    ResourceKind::Texture2D => {
                        RenderTargetViewDesc::for_texture2d(&texture2d, dimension, view.range)?
                    }
                    ResourceKind::Texture3D => {
                        expect_dimension(dimension, RtvDimension::Texture3D)?;
                        RenderTargetViewDesc::for_texture3d(&texture3d, view.range)?
                    }
                })
            }
            ViewType::Dsv => {
                let dimension: DsvDimension = dimension.parse()?;
                let flags = parse_flags::<DsvFlags>(&view.flags)?;
                ResolvedView::Dsv(match kind {
                    ResourceKind::Texture1D => {
                        DepthStencilViewDesc::for_texture1d(&texture1d, dimension, view.range, flags)?
                    }
                    ResourceKind::Texture2D => {
                        DepthStencilViewDesc::for_texture2d(&texture2d, dimension, view.range, flags)?
                    }
                    ResourceKind::Buffer | ResourceKind::Texture3D => {
                        return Err(Error::OutOfRange {
                            what: "depth stencil view dimension",
                            value: dimension.into(),
                        })
                    }
                })
            }
            ViewType::Srv => {
                let dimension: SrvDimension = dimension.parse()?;
                ResolvedView::Srv(match kind {
                    ResourceKind::Buffer => {
                        let mut flags = parse_flags::<BufferExSrvFlags>(&view.flags)?;
                        if dimension != SrvDimension::BufferEx {
                            expect_dimension(dimension, SrvDimension::Buffer)?;
                            flags = BufferExSrvFlags::empty();
                        }
                        ShaderResourceViewDesc::for_buffer(&buffer, format, first, count, flags)?
                    }
                    ResourceKind::Texture1D => {
                        ShaderResourceViewDesc::for_texture1d(&texture1d, dimension, view.range)?
                    }
                    ResourceKind::Texture2D => {
                        ShaderResourceViewDesc::for_texture2d(&texture2d, dimension, view.range)?
                    }
                    ResourceKind::Texture3D => {
                        expect_dimension(dimension, SrvDimension::Texture3D)?;
                        ShaderResourceViewDesc::for_texture3d(&texture3d, view.range)?
                    }
                })
            }
            ViewType::Uav => {
                let dimension: UavDimension = dimension.parse()?;
                ResolvedView::Uav(match kind {
                    ResourceKind::Buffer => {
                        expect_dimension(dimension, UavDimension::Buffer)?;
                        let flags = parse_flags::<BufferUavFlags>(&view.flags)?;
                        UnorderedAccessViewDesc::for_buffer(&buffer, format, first, count, flags)?
                    }
                    ResourceKind::Texture1D => {
                        UnorderedAccessViewDesc::for_texture1d(&texture1d, dimension, view.range)?
                    }
                    ResourceKind::Texture2D => {
                        UnorderedAccessViewDesc::for_texture2d(&texture2d, dimension, view.range)?
                    }
                    ResourceKind::Texture3D => {
                        expect_dimension(dimension, UavDimension::Texture3D)?;
                        UnorderedAccessViewDesc::for_texture3d(&texture3d, view.range)?
                    }
                })
            }
        };

        Ok(resolved)
    }

    fn resolve_viewport_entry(&self, entry: &ViewportEntry) -> error::Result<Viewport> {
        let view = self
            .views
            .iter()
            .find(|view| view.name == entry.view)
            .map(|view| self.resolve_entry(view))
            .transpose()?;
        let resource = self.resources.get(&entry.texture);

        let (x, y) = (entry.x, entry.y);
        match view {
            Some(ResolvedView::Dsv(dsv)) => {
                let texture = resource.and_then(ResourceDesc::as_texture2d);
                Viewport::for_texture2d_dsv(&texture, &dsv, x, y)
            }
            Some(ResolvedView::Rtv(rtv)) => {
                let kind = match resource {
                    Some(resource) => resource.kind(),
                    None => implied_kind(rtv.view_dimension().name())
                        .ok_or(Error::NullReference("texture"))?,
                };
                match kind {
                    ResourceKind::Buffer => {
                        Viewport::for_buffer(&resource.and_then(ResourceDesc::as_buffer), &rtv, x)
                    }
                    ResourceKind::Texture1D => Viewport::for_texture1d(
                        &resource.and_then(ResourceDesc::as_texture1d),
                        &rtv,
                        x,
                    ),
                    ResourceKind::Texture2D => Viewport::for_texture2d(
                        &resource.and_then(ResourceDesc::as_texture2d),
                        &rtv,
                        x,
                        y,
                    ),
                    ResourceKind::Texture3D => Viewport::for_texture3d(
                        &resource.and_then(ResourceDesc::as_texture3d),
                        &rtv,
                        x,
                        y,
                    ),
                }
            }
            Some(_) => Err(Error::UnknownName {
                what: "render target or depth stencil view",
                name: entry.view.clone(),
            }),
            None => Viewport::for_texture2d(
                &resource.and_then(ResourceDesc::as_texture2d),
                &None::<RenderTargetViewDesc>,
                x,
                y,
            ),
        }
    }
}

fn expect_dimension<D: Copy + PartialEq + Into<u32>>(dimension: D, expected: D) -> error::Result<()> {
    if dimension == expected {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            what: "view dimension",
            value: dimension.into(),
        })
    }
}

fn parse_flags<F>(text: &Option<String>) -> error::Result<F>
where
    F: bitflags::Flags + FromStr,
{
    match text.as_deref().map(str::trim) {
        None | Some("") => Ok(F::empty()),
        Some(text) => text.parse().map_err(|_| Error::UnknownName {
            what: "flags",
            name: text.to_string(),
        }),
    }
}

fn parse_resource(kind: &str, props: &Properties) -> Result<ResourceDesc> {
    let usage = props.get_parsed::<Usage>("usage")?.unwrap_or_default();
    let bind = props.get_parsed::<BindFlags>("bind")?;
    let cpu_access = props.get_parsed::<CpuAccessFlags>("cpu-access")?.unwrap_or_default();
    let misc = props.get_parsed::<ResourceMiscFlags>("misc")?.unwrap_or_default();

    if kind == "buffer" {
        return Ok(ResourceDesc::Buffer(BufferDesc {
            byte_width: props.require::<u32>("byte-width")?,
            usage,
            bind_flags: bind.unwrap_or_default(),
            cpu_access_flags: cpu_access,
            misc_flags: misc,
            structure_byte_stride: props.get_u32("stride", 0)?,
        }));
    }

    let format = props.require::<Format>("format")?;
    let width = props.require::<u32>("width")?;
    let bind = bind.unwrap_or(BindFlags::SHADER_RESOURCE);

    let desc = match kind {
        "texture1d" => {
            let mut desc = Texture1DDesc::new(format, width)
                .with_array_size(props.get_u32("array-size", 1)?)
                .with_bind_flags(bind);
            desc.mip_levels = mip_levels(props, width, 1, 1)?;
            desc.usage = usage;
            desc.cpu_access_flags = cpu_access;
            desc.misc_flags = misc;
            ResourceDesc::Texture1D(desc)
        }
        "texture2d" => {
            let height = props.require::<u32>("height")?;
            let sample_desc = SampleDesc::new(
                props.get_u32("sample-count", 1)?,
                props.get_u32("sample-quality", 0)?,
            );
            ResourceDesc::Texture2D(
                Texture2DDesc::new(format, width, height)
                    .with_mip_levels(mip_levels(props, width, height, 1)?)
                    .with_array_size(props.get_u32("array-size", 1)?)
                    .with_sample_desc(sample_desc)
                    .with_usage(usage)
                    .with_bind_flags(bind)
                    .with_cpu_access_flags(cpu_access)
                    .with_misc_flags(misc),
            )
        }
        _ => {
            let height = props.require::<u32>("height")?;
            let depth = props.require::<u32>("depth")?;
            let mut desc = Texture3DDesc::new(format, width, height, depth)
                .with_mip_levels(mip_levels(props, width, height, depth)?)
                .with_bind_flags(bind);
            desc.usage = usage;
            desc.cpu_access_flags = cpu_access;
            desc.misc_flags = misc;
            ResourceDesc::Texture3D(desc)
        }
    };

    Ok(desc)
}

/// `mip-levels = 0` asks for the full chain, as it does for the device.
fn mip_levels(props: &Properties, width: u32, height: u32, depth: u32) -> Result<u32> {
    match props.get_u32("mip-levels", 1)? {
        0 => {
            let levels = full_mip_chain(width, height, depth);
            log::debug!("mip-levels 0: full chain of {levels} for {width}x{height}x{depth}");
            Ok(levels)
        }
        levels => Ok(levels),
    }
}

fn parse_view(name: String, ty: ViewType, props: &Properties) -> Result<ViewEntry> {
    let mut range = ViewRange::new()
        .mips(props.get_u32("first-mip", 0)?, props.get_parsed("mip-count")?)
        .slices(props.get_u32("first-slice", 0)?, props.get_parsed("slice-count")?);
    range.format = props.get_parsed("format")?;

    Ok(ViewEntry {
        name,
        ty,
        resource: props.require::<String>("resource")?,
        dimension: props.get("dimension").map(|d| d.trim().to_string()),
        range,
        first_element: props.get_u32("first-element", 0)?,
        num_elements: props.get_parsed("num-elements")?,
        flags: props.get("flags").map(str::to_string),
    })
}

fn parse_viewport(name: String, props: &Properties) -> Result<ViewportEntry> {
    Ok(ViewportEntry {
        name,
        texture: props.require::<String>("texture")?,
        view: props.require::<String>("view")?,
        x: props.get_f32("x", 0.0)?,
        y: props.get_f32("y", 0.0)?,
    })
}

trait IniGetter {
    fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static;

    fn require<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.get_parsed(key)?
            .with_context(|| format!("missing key {key:?}"))
    }

    fn get_u32(&self, key: &str, default: u32) -> Result<u32> {
        Ok(self.get_parsed(key)?.unwrap_or(default))
    }

    fn get_f32(&self, key: &str, default: f32) -> Result<f32> {
        Ok(self.get_parsed(key)?.unwrap_or(default))
    }
}

impl IniGetter for Properties {
    fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.get(key)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .with_context(|| format!("invalid {key} {value:?}"))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::view::{ArrayMip, BufferUav, RtvKind, UavKind};

    const SCENE: &str = "
[texture2d scene]
format = R8G8B8A8Unorm
width = 256
height = 128
mip-levels = 4
array-size = 6
bind = SHADER_RESOURCE | RENDER_TARGET

[rtv scene-slices]
resource = scene
dimension = Texture2DArray
first-mip = 1
first-slice = 2

[viewport scene]
texture = scene
view = scene-slices
";

    #[test]
    fn parses_sections() {
        let manifest = Manifest::parse(SCENE).unwrap();

        let Some(ResourceDesc::Texture2D(texture)) = manifest.resource("scene") else {
            panic!("scene is not a 2D texture");
        };
        assert_eq!(texture.mip_levels, 4);
        assert_eq!(texture.bind_flags, BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET);
        assert_eq!(manifest.views().len(), 1);
        assert_eq!(manifest.views()[0].range.slice_count, None);
        assert_eq!(manifest.viewports()[0].view, "scene-slices");
    }

    #[test]
    fn resolves_like_the_constructors() {
        let manifest = Manifest::parse(SCENE).unwrap();
        let resolved = manifest.resolve().unwrap();

        let expected = RenderTargetViewDesc::new(
            Format::R8G8B8A8Unorm,
            RtvKind::Texture2DArray(ArrayMip {
                mip_slice: 1,
                first_array_slice: 2,
                array_size: 4,
            }),
        );
        assert_eq!(resolved.views, vec![("scene-slices".to_string(), ResolvedView::Rtv(expected))]);
        assert_eq!(
            resolved.viewports,
            vec![("scene".to_string(), Viewport::new(0.0, 0.0, 128.0, 64.0))]
        );
    }

    #[test]
    fn missing_resource_is_a_null_reference() {
        let manifest = Manifest::parse(
            "
[srv orphan]
resource = nowhere
dimension = Texture2D
",
        )
        .unwrap();

        assert_eq!(
            manifest.resolve_view("orphan"),
            Err(Error::NullReference("2D texture"))
        );
        let err = manifest.resolve().unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::NullReference("2D texture"))
        );
    }

    #[test]
    fn default_dimension_follows_the_resource() {
        let manifest = Manifest::parse(
            "
[texture2d sky]
format = BC7Unorm
width = 64
height = 64
array-size = 12
misc = TEXTURECUBE

[srv sky]
resource = sky
",
        )
        .unwrap();

        let ResolvedView::Srv(srv) = manifest.resolve_view("sky").unwrap() else {
            panic!("expected a shader resource view");
        };
        assert_eq!(srv.view_dimension(), SrvDimension::TextureCubeArray);
    }

    #[test]
    fn bad_values_carry_context() {
        let err = Manifest::parse("[texture2d broken]\nformat = R8G8B8A8Unorm\nwidth = wide\n")
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("[texture2d broken]"), "{message}");
        assert!(message.contains("width"), "{message}");

        assert!(Manifest::parse("[sampler point]\n").is_err());
    }

    #[test]
    fn view_flags_are_read_by_name() {
        let manifest = Manifest::parse(
            "
[buffer particles]
byte-width = 4096
stride = 16
bind = UNORDERED_ACCESS | SHADER_RESOURCE
misc = BUFFER_STRUCTURED

[uav particles]
resource = particles
flags = APPEND | COUNTER

[uav shiny]
resource = particles
flags = APPEND | SHINY
",
        )
        .unwrap();

        let ResolvedView::Uav(uav) = manifest.resolve_view("particles").unwrap() else {
            panic!("expected an unordered access view");
        };
        assert_eq!(
            uav.kind,
            UavKind::Buffer(BufferUav {
                first_element: 0,
                num_elements: 256,
                flags: BufferUavFlags::APPEND | BufferUavFlags::COUNTER,
            })
        );
        assert_eq!(
            manifest.resolve_view("shiny"),
            Err(Error::UnknownName {
                what: "flags",
                name: "APPEND | SHINY".to_string(),
            })
        );
    }
}
