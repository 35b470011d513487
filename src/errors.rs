//! Error types with diagnostics using miette
//!
//! Errors are grouped by the phase that produces them: configuration,
//! layout/slot allocation, rasterization, and persistence. Configuration
//! errors are raised at construction time, before any drawing occurs.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::style::ColorKey;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while building registries and libraries.
///
/// These fail fast: a bad style or language never reaches the renderer.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("unknown style: {style}")]
    #[diagnostic(
        code(mathfig::style::unknown),
        help("built-in styles are \"academic\" and \"modern\"")
    )]
    UnknownStyle { style: String },

    #[error("unsupported language code: {code}")]
    #[diagnostic(
        code(mathfig::text::unsupported_language),
        help("supported language codes are \"en\" and \"zh\"")
    )]
    UnsupportedLanguage { code: String },

    #[error("color scheme for style {style} is missing semantic keys")]
    #[diagnostic(
        code(mathfig::style::key_mismatch),
        help("every scheme must define the identical set of semantic keys")
    )]
    SchemeKeyMismatch {
        style: String,
        missing: Vec<ColorKey>,
    },

    #[error("duplicate color entry for {key:?} in style {style}")]
    #[diagnostic(code(mathfig::style::duplicate_key))]
    SchemeDuplicateKey { style: String, key: ColorKey },

    #[error("style {style} is already registered")]
    #[diagnostic(code(mathfig::style::already_registered))]
    StyleAlreadyRegistered { style: String },
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors raised while computing figure geometry and annotation slots.
#[derive(Error, Diagnostic, Debug)]
pub enum LayoutError {
    #[error("domain bounds are degenerate or non-finite")]
    #[diagnostic(
        code(mathfig::layout::invalid_bounds),
        help("both axes of the domain must have a positive, finite span")
    )]
    InvalidBounds,

    #[error("requested {requested} annotation slots but only {available} remain")]
    #[diagnostic(
        code(mathfig::slots::insufficient),
        help("a figure has exactly four corner slots; split annotations across figures")
    )]
    InsufficientSlots { requested: usize, available: usize },

    #[error("slot {name} was already consumed for this figure")]
    #[diagnostic(code(mathfig::slots::taken))]
    SlotTaken { name: &'static str },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors raised while rasterizing a figure scene.
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("drawing backend failure: {message}")]
    #[diagnostic(code(mathfig::render::backend))]
    Backend { message: String },

    #[error("figure size {width}x{height} is too small to rasterize")]
    #[diagnostic(code(mathfig::render::figure_too_small))]
    FigureTooSmall { width: u32, height: u32 },
}

// ============================================================================
// Persistence Errors
// ============================================================================

/// Errors raised while writing the finished image to disk.
///
/// Directory creation races are tolerated and never surface here; only a
/// genuine filesystem failure (permissions, disk full) does.
#[derive(Error, Diagnostic, Debug)]
pub enum PersistError {
    #[error("failed to write figure to {path}")]
    #[diagnostic(code(mathfig::persist::io_write))]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG for {path}")]
    #[diagnostic(code(mathfig::persist::encode))]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}

// ============================================================================
// Aggregate
// ============================================================================

/// Any error the figure pipeline can produce.
#[derive(Error, Diagnostic, Debug)]
pub enum FigureError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Persist(#[from] PersistError),
}

/// Crate-wide result alias.
pub type Result<T, E = FigureError> = std::result::Result<T, E>;
