//! OS-level interactions: environment snapshots and operating system detection.

pub mod env;

/// Name of the running operating system, spelled the way
/// [`Variant::from_os_name`](crate::dirs::Variant::from_os_name) expects it.
///
/// Systems without a known spelling are returned as [`std::env::consts::OS`] reports them.
pub fn name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "freebsd" => "FreeBSD",
        "solaris" | "illumos" => "SunOS",
        // Rust no longer targets anything older than Vista.
        "windows" => "Windows 10",
        "macos" => "Mac OS X",
        other => other,
    }
}
