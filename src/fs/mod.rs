//! Filesystem utilities and extensions.
//!
//! Provides the [`PathExt`](path_ext::PathExt) extension trait for [`Path`](std::path::Path),
//! used to make sure application directories exist.

pub mod path_ext;

pub use path_ext::{MkdirOptions, PathExt};
