//! Flag sets of the descriptor structures. Any bit pattern is accepted so
//! values read back from the driver never fail to convert.

use bitflags::bitflags;

bitflags! {
    /// `D3D11_BIND_FLAG`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER = 0x1;
        const INDEX_BUFFER = 0x2;
        const CONSTANT_BUFFER = 0x4;
        const SHADER_RESOURCE = 0x8;
        const STREAM_OUTPUT = 0x10;
        const RENDER_TARGET = 0x20;
        const DEPTH_STENCIL = 0x40;
        const UNORDERED_ACCESS = 0x80;
        const DECODER = 0x200;
        const VIDEO_ENCODER = 0x400;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_CPU_ACCESS_FLAG`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CpuAccessFlags: u32 {
        const WRITE = 0x10000;
        const READ = 0x20000;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_RESOURCE_MISC_FLAG`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ResourceMiscFlags: u32 {
        const GENERATE_MIPS = 0x1;
        const SHARED = 0x2;
        const TEXTURECUBE = 0x4;
        const DRAWINDIRECT_ARGS = 0x10;
        const BUFFER_ALLOW_RAW_VIEWS = 0x20;
        const BUFFER_STRUCTURED = 0x40;
        const RESOURCE_CLAMP = 0x80;
        const SHARED_KEYEDMUTEX = 0x100;
        const GDI_COMPATIBLE = 0x200;
        const SHARED_NTHANDLE = 0x800;
        const RESTRICTED_CONTENT = 0x1000;
        const RESTRICT_SHARED_RESOURCE = 0x2000;
        const RESTRICT_SHARED_RESOURCE_DRIVER = 0x4000;
        const GUARDED = 0x8000;
        const TILE_POOL = 0x20000;
        const TILED = 0x40000;
        const HW_PROTECTED = 0x80000;
        const SHARED_DISPLAYABLE = 0x100000;
        const SHARED_EXCLUSIVE_WRITER = 0x200000;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_COLOR_WRITE_ENABLE`, stored in the byte-wide write mask.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ColorWriteEnable: u8 {
        const RED = 0x1;
        const GREEN = 0x2;
        const BLUE = 0x4;
        const ALPHA = 0x8;
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_BUFFEREX_SRV_FLAG`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BufferExSrvFlags: u32 {
        const RAW = 0x1;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_BUFFER_UAV_FLAG`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BufferUavFlags: u32 {
        const RAW = 0x1;
        const APPEND = 0x2;
        const COUNTER = 0x4;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_DSV_FLAG`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DsvFlags: u32 {
        const READ_ONLY_DEPTH = 0x1;
        const READ_ONLY_STENCIL = 0x2;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_QUERY_MISC_FLAG`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct QueryMiscFlags: u32 {
        const PREDICATE_HINT = 0x1;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_FORMAT_SUPPORT`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FormatSupport: u32 {
        const BUFFER = 0x1;
        const IA_VERTEX_BUFFER = 0x2;
        const IA_INDEX_BUFFER = 0x4;
        const SO_BUFFER = 0x8;
        const TEXTURE1D = 0x10;
        const TEXTURE2D = 0x20;
        const TEXTURE3D = 0x40;
        const TEXTURECUBE = 0x80;
        const SHADER_LOAD = 0x100;
        const SHADER_SAMPLE = 0x200;
        const SHADER_SAMPLE_COMPARISON = 0x400;
        const SHADER_SAMPLE_MONO_TEXT = 0x800;
        const MIP = 0x1000;
        const MIP_AUTOGEN = 0x2000;
        const RENDER_TARGET = 0x4000;
        const BLENDABLE = 0x8000;
        const DEPTH_STENCIL = 0x10000;
        const CPU_LOCKABLE = 0x20000;
        const MULTISAMPLE_RESOLVE = 0x40000;
        const DISPLAY = 0x80000;
        const CAST_WITHIN_BIT_LAYOUT = 0x100000;
        const MULTISAMPLE_RENDERTARGET = 0x200000;
        const MULTISAMPLE_LOAD = 0x400000;
        const SHADER_GATHER = 0x800000;
        const BACK_BUFFER_CAST = 0x1000000;
        const TYPED_UNORDERED_ACCESS_VIEW = 0x2000000;
        const SHADER_GATHER_COMPARISON = 0x4000000;
        const DECODER_OUTPUT = 0x8000000;
        const VIDEO_PROCESSOR_OUTPUT = 0x10000000;
        const VIDEO_PROCESSOR_INPUT = 0x20000000;
        const VIDEO_ENCODER = 0x40000000;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_FORMAT_SUPPORT2`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FormatSupport2: u32 {
        const UAV_ATOMIC_ADD = 0x1;
        const UAV_ATOMIC_BITWISE_OPS = 0x2;
        const UAV_ATOMIC_COMPARE_STORE_OR_COMPARE_EXCHANGE = 0x4;
        const UAV_ATOMIC_EXCHANGE = 0x8;
        const UAV_ATOMIC_SIGNED_MIN_OR_MAX = 0x10;
        const UAV_ATOMIC_UNSIGNED_MIN_OR_MAX = 0x20;
        const UAV_TYPED_LOAD = 0x40;
        const UAV_TYPED_STORE = 0x80;
        const OUTPUT_MERGER_LOGIC_OP = 0x100;
        const TILED = 0x200;
        const SHAREABLE = 0x400;
        const MULTIPLANE_OVERLAY = 0x4000;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_SHADER_MIN_PRECISION_SUPPORT`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShaderMinPrecision: u32 {
        const BIT_10 = 0x1;
        const BIT_16 = 0x2;
        const _ = !0;
    }
}

bitflags! {
    /// `D3D11_SHADER_CACHE_SUPPORT_FLAGS`
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShaderCacheSupport: u32 {
        const AUTOMATIC_INPROC_CACHE = 0x1;
        const AUTOMATIC_DISK_CACHE = 0x2;
        const _ = !0;
    }
}

/// Text form: `|`-separated flag names or `0x` hex, as written by `Display`.
macro_rules! parse_text_form {
    ($($flags:ty),* $(,)?) => {
        $(
            impl std::str::FromStr for $flags {
                type Err = bitflags::parser::ParseError;

                fn from_str(text: &str) -> Result<Self, Self::Err> {
                    bitflags::parser::from_str(text)
                }
            }

            impl std::fmt::Display for $flags {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    bitflags::parser::to_writer(self, f)
                }
            }
        )*
    };
}

parse_text_form!(
    BindFlags,
    CpuAccessFlags,
    ResourceMiscFlags,
    ColorWriteEnable,
    BufferExSrvFlags,
    BufferUavFlags,
    DsvFlags,
    QueryMiscFlags,
    FormatSupport,
    FormatSupport2,
    ShaderMinPrecision,
    ShaderCacheSupport,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_write_all_covers_every_channel() {
        assert_eq!(ColorWriteEnable::ALL.bits(), 0xF);
    }

    #[test]
    fn unknown_bits_survive() {
        let flags = BindFlags::from_bits_retain(0x8000_0008);
        assert!(flags.contains(BindFlags::SHADER_RESOURCE));
        assert_eq!(flags.bits(), 0x8000_0008);
    }

    #[test]
    fn parses_text_form() {
        let flags: BindFlags = "SHADER_RESOURCE | RENDER_TARGET".parse().unwrap();
        assert_eq!(flags, BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET);
    }

    #[test]
    fn text_form_survives_display() {
        let flags = BufferUavFlags::RAW | BufferUavFlags::COUNTER;
        assert_eq!(flags.to_string().parse::<BufferUavFlags>().unwrap(), flags);
        assert_eq!("".parse::<DsvFlags>().unwrap(), DsvFlags::empty());
        assert_eq!(
            "0x3".parse::<DsvFlags>().unwrap(),
            DsvFlags::READ_ONLY_DEPTH | DsvFlags::READ_ONLY_STENCIL
        );
    }

    #[test]
    fn unknown_flag_name_is_rejected() {
        assert!("READ_ONLY_DEPTH | SHINY".parse::<DsvFlags>().is_err());
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new("SHINY".parse::<BindFlags>().unwrap_err());
        assert!(err.to_string().contains("SHINY"));
    }
}
