//! Places - standard, OS-appropriate directories for applications.
//!
//! This crate resolves where an application should keep its configuration, data, cache and
//! runtime files, following the XDG Base Directory Specification on Unix-likes, the documented
//! environmental variables on Windows and `~/Library` on macOS.

pub mod dirs;
pub mod fs;
pub mod os;
