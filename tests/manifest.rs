use std::path::PathBuf;

use d3d11_descriptors::{
    manifest::{Manifest, ResolvedView},
    view::{ArrayMip, ArrayMipRange, BufferUav, DsvKind, RtvKind, SingleMip, SrvKind, UavKind},
    BufferUavFlags, DepthStencilViewDesc, DsvFlags, Error, Format, RenderTargetViewDesc,
    ShaderResourceViewDesc, UnorderedAccessViewDesc, Viewport,
};
use pretty_assertions::assert_eq;

fn scene() -> Manifest {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/scene.ini");
    Manifest::load(path).unwrap()
}

fn view(manifest: &Manifest, name: &str) -> ResolvedView {
    manifest.resolve_view(name).unwrap()
}

#[test]
fn loads_every_section() {
    let manifest = scene();

    assert!(manifest.resource("gbuffer").is_some());
    assert!(manifest.resource("lights").is_some());
    assert_eq!(manifest.views().len(), 6);
    assert_eq!(manifest.viewports().len(), 2);
}

#[test]
fn views_match_direct_construction() {
    let manifest = scene();

    assert_eq!(
        view(&manifest, "gbuffer-normals"),
        ResolvedView::Rtv(RenderTargetViewDesc::new(
            Format::R16G16B16A16Float,
            RtvKind::Texture2DArray(ArrayMip {
                mip_slice: 0,
                first_array_slice: 1,
                array_size: 1,
            }),
        ))
    );
    assert_eq!(
        view(&manifest, "depth"),
        ResolvedView::Dsv(DepthStencilViewDesc::texture2d(Format::D24UnormS8Uint, 0))
    );
    assert_eq!(
        view(&manifest, "depth-read-only"),
        ResolvedView::Dsv(
            DepthStencilViewDesc::texture2d(Format::D24UnormS8Uint, 0)
                .with_flags(DsvFlags::READ_ONLY_DEPTH | DsvFlags::READ_ONLY_STENCIL)
        )
    );
    assert_eq!(
        view(&manifest, "gbuffer"),
        ResolvedView::Srv(ShaderResourceViewDesc::new(
            Format::R16G16B16A16Float,
            SrvKind::Texture2DArray(ArrayMipRange {
                most_detailed_mip: 0,
                mip_levels: 1,
                first_array_slice: 0,
                array_size: 3,
            }),
        ))
    );
    assert_eq!(
        view(&manifest, "lights"),
        ResolvedView::Uav(UnorderedAccessViewDesc::new(
            Format::Unknown,
            UavKind::Buffer(BufferUav {
                first_element: 0,
                num_elements: 128,
                flags: BufferUavFlags::empty(),
            }),
        ))
    );
}

#[test]
fn zero_mip_levels_means_full_chain() {
    let manifest = scene();

    let ResolvedView::Dsv(dsv) = view(&manifest, "shadow-mip1") else {
        panic!("expected a depth stencil view");
    };
    assert_eq!(dsv.kind, DsvKind::Texture2D(SingleMip { mip_slice: 1 }));
}

#[test]
fn viewports_follow_their_views() {
    let resolved = scene().resolve().unwrap();

    assert_eq!(resolved.views.len(), 6);
    assert_eq!(
        resolved.viewports,
        vec![
            ("gbuffer".to_string(), Viewport::new(0.0, 0.0, 1280.0, 720.0)),
            ("shadow-mip1".to_string(), Viewport::new(24.0, 24.0, 1000.0, 1000.0)),
        ]
    );
}

#[test]
fn viewport_over_a_missing_view_is_a_null_reference() {
    let manifest = Manifest::parse(
        "
[texture2d target]
format = R8G8B8A8Unorm
width = 64
height = 64

[viewport target]
texture = target
view = nothing
",
    )
    .unwrap();

    assert_eq!(
        manifest.resolve_viewport("target"),
        Err(Error::NullReference("render target view"))
    );
}

#[test]
fn missing_file_names_the_path() {
    let err = Manifest::load("does/not/exist.ini").unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.ini"));
}
