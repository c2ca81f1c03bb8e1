//! Code generation from annotated shader functions.
//!
//! Each backend is a pure function of an annotated tree and its options.
//! Expression forms a backend cannot translate are emitted as visible
//! placeholders rather than failing the whole call; they are reported in
//! [`Output::warnings`] so callers can decide whether to accept the result.
//!
//! - [`emit`]: indented line buffer
//! - [`render`]: the `Dialect` trait and shared expression rendering
//! - [`glsl`]: GLSL ES fragment code
//! - [`embree`]: Embree C++ material headers

pub mod embree;
pub mod emit;
pub mod error;
pub mod glsl;
pub mod render;

pub use embree::EmbreeOptions;
pub use error::CodegenError;
pub use glsl::GlslOptions;

/// Generated source text and the warnings raised while producing it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Output {
    pub code: String,
    pub warnings: Vec<String>,
}

impl Output {
    /// Whether the code contains no placeholders or markers.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
