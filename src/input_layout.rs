use std::{
    ffi::{c_char, CStr},
    hash::{Hash, Hasher},
    marker::PhantomData,
    ptr::NonNull,
};

use static_assertions::assert_eq_size;

use crate::{format::Format, macros::native_enum};

/// Lets the input assembler place an element right after the previous one.
pub const APPEND_ALIGNED_ELEMENT: u32 = 0xffff_ffff;

native_enum! {
    #[derive(Default)]
    pub enum InputClassification("input classification") {
        #[default]
        PerVertexData = 0,
        PerInstanceData = 1,
    }
}

/// A semantic such as `POSITION`, stored as the native `LPCSTR`.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct SemanticName<'a> {
    ptr: NonNull<c_char>,
    _text: PhantomData<&'a CStr>,
}

// Only ever points at an immutable, borrowed C string.
unsafe impl Send for SemanticName<'_> {}
unsafe impl Sync for SemanticName<'_> {}

impl<'a> SemanticName<'a> {
    pub const fn new(name: &'a CStr) -> Self {
        Self {
            // SAFETY: `CStr::as_ptr` is never null.
            ptr: unsafe { NonNull::new_unchecked(name.as_ptr().cast_mut()) },
            _text: PhantomData,
        }
    }

    pub fn as_c_str(&self) -> &'a CStr {
        // SAFETY: built from a `&'a CStr`, so the text is live and terminated.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    pub fn as_ptr(&self) -> *const c_char {
        self.ptr.as_ptr()
    }
}

impl<'a> From<&'a CStr> for SemanticName<'a> {
    fn from(name: &'a CStr) -> Self {
        Self::new(name)
    }
}

impl PartialEq for SemanticName<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_c_str() == other.as_c_str()
    }
}

impl Eq for SemanticName<'_> {}

impl Hash for SemanticName<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_c_str().hash(state);
    }
}

impl std::fmt::Debug for SemanticName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_c_str().fmt(f)
    }
}

/// `D3D11_INPUT_ELEMENT_DESC`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputElementDesc<'a> {
    pub semantic_name: SemanticName<'a>,
    pub semantic_index: u32,
    pub format: Format,
    pub input_slot: u32,
    pub aligned_byte_offset: u32,
    pub input_slot_class: InputClassification,
    pub instance_data_step_rate: u32,
}

#[cfg(target_pointer_width = "64")]
assert_eq_size!(InputElementDesc<'static>, [u8; 32]);

impl<'a> InputElementDesc<'a> {
    pub fn per_vertex(name: &'a CStr, format: Format) -> Self {
        Self {
            semantic_name: SemanticName::new(name),
            semantic_index: 0,
            format,
            input_slot: 0,
            aligned_byte_offset: APPEND_ALIGNED_ELEMENT,
            input_slot_class: InputClassification::PerVertexData,
            instance_data_step_rate: 0,
        }
    }

    pub fn per_instance(name: &'a CStr, format: Format, step: u32) -> Self {
        Self {
            input_slot_class: InputClassification::PerInstanceData,
            instance_data_step_rate: step,
            ..Self::per_vertex(name, format)
        }
    }

    pub fn with_semantic_index(mut self, index: u32) -> Self {
        self.semantic_index = index;
        self
    }

    pub fn with_slot(mut self, slot: u32) -> Self {
        self.input_slot = slot;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.aligned_byte_offset = offset;
        self
    }
}

/// `D3D11_SO_DECLARATION_ENTRY`. A `None` name leaves a gap of
/// `component_count` components in the output.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoDeclarationEntry<'a> {
    pub stream: u32,
    pub semantic_name: Option<SemanticName<'a>>,
    pub semantic_index: u32,
    pub start_component: u8,
    pub component_count: u8,
    pub output_slot: u8,
}

#[cfg(target_pointer_width = "64")]
assert_eq_size!(SoDeclarationEntry<'static>, [u8; 24]);

impl<'a> SoDeclarationEntry<'a> {
    pub fn new(name: &'a CStr, start_component: u8, component_count: u8) -> Self {
        Self {
            stream: 0,
            semantic_name: Some(SemanticName::new(name)),
            semantic_index: 0,
            start_component,
            component_count,
            output_slot: 0,
        }
    }

    pub fn gap(component_count: u8) -> Self {
        Self {
            stream: 0,
            semantic_name: None,
            semantic_index: 0,
            start_component: 0,
            component_count,
            output_slot: 0,
        }
    }

    pub fn with_stream(mut self, stream: u32) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_output_slot(mut self, slot: u8) -> Self {
        self.output_slot = slot;
        self
    }
}
