//! Direct3D 11 descriptor structures as Rust values.
//!
//! Every descriptor keeps the native field order so it can be handed to the
//! device as-is. View and viewport descriptors can also be resolved against
//! the resource they describe, filling unspecified fields (format, mip and
//! slice counts) from the resource's own description.

mod macros;

pub mod blend;
pub mod common;
pub mod depth_stencil;
pub mod error;
pub mod feature;
pub mod flags;
pub mod format;
pub mod input_layout;
pub mod manifest;
#[cfg(windows)]
pub mod native;
pub mod query;
pub mod rasterizer;
pub mod resource;
pub mod sampler;
pub mod view;
pub mod viewport;

pub use blend::{Blend, BlendDesc, BlendOp, RenderTargetBlendDesc};
pub use common::{Bool32, Box3, ComparisonFunc, ResourceDimension, SampleDesc, Usage};
pub use depth_stencil::{DepthStencilDesc, DepthStencilOpDesc, DepthWriteMask, StencilOp};
pub use error::{Error, Result};
pub use flags::*;
pub use format::Format;
pub use input_layout::{InputClassification, InputElementDesc, SemanticName, SoDeclarationEntry};
pub use query::{QueryData, QueryDesc, QueryType};
pub use rasterizer::{CullMode, FillMode, RasterizerDesc};
pub use resource::{
    Buffer, BufferDesc, SubresourceData, Texture1D, Texture1DDesc, Texture2D, Texture2DDesc,
    Texture3D, Texture3DDesc,
};
pub use sampler::{Filter, SamplerDesc, TextureAddressMode};
pub use view::{
    DepthStencilView, DepthStencilViewDesc, RenderTargetView, RenderTargetViewDesc,
    ShaderResourceView, ShaderResourceViewDesc, UnorderedAccessView, UnorderedAccessViewDesc,
    ViewRange,
};
pub use viewport::Viewport;
