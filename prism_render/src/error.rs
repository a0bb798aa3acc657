//! Error types for the Prism renderer
//!
//! All fallible operations in this crate return [`Result`], with [`Error`]
//! covering backend failures, resource misuse, and shader problems. Errors
//! are logged at the point of creation via the `render_err!`/`render_bail!`
//! macros, so call sites keep the "log then propagate" behavior in one line.

use crate::renderer::shader::UniformType;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Renderer error type
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A raw backend call failed (GL error, allocation failure, ...)
    BackendError(String),

    /// A resource was created or used with invalid parameters
    InvalidResource(String),

    /// Renderer or backend initialization failed
    InitializationFailed(String),

    /// Shader compilation or program linking failed; carries the info log
    ShaderCompilation(String),

    /// A render target failed its completeness check
    FramebufferIncomplete(String),

    /// A uniform name is not present in the shader's reflected interface
    UniformNotFound(String),

    /// A uniform was assigned a value of the wrong type
    UniformTypeMismatch {
        name: String,
        expected: UniformType,
        provided: UniformType,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => {
                write!(f, "Initialization failed: {}", msg)
            }
            Error::ShaderCompilation(log) => {
                write!(f, "Shader compilation failed: {}", log)
            }
            Error::FramebufferIncomplete(msg) => {
                write!(f, "Framebuffer incomplete: {}", msg)
            }
            Error::UniformNotFound(name) => {
                write!(f, "Uniform not found: '{}'", name)
            }
            Error::UniformTypeMismatch {
                name,
                expected,
                provided,
            } => {
                write!(
                    f,
                    "Uniform type mismatch for '{}': expected {:?}, provided {:?}",
                    name, expected, provided
                )
            }
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error`] from a tuple variant, logging it at ERROR severity
///
/// # Example
///
/// ```no_run
/// # use prism_render::{render_err, error::Error};
/// let err: Error = render_err!("prism::Renderer", InvalidResource,
///     "index count {} is not a multiple of 3", 7);
/// ```
#[macro_export]
macro_rules! render_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::render_error!($source, "{}", message);
        $crate::error::Error::$variant(message)
    }};
}

/// Log an error and return it from the current function
///
/// Shorthand for `return Err(render_err!(...))`.
#[macro_export]
macro_rules! render_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::render_err!($source, $variant, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
