//! Standard places for configuration, data, cache and runtime files.
//!
//! Every operating system family has its own convention for where applications keep their
//! files. [`Places`] picks the right convention and hides it behind [`BaseDirs`]:
//!
//! ```rust,no_run
//! use places::dirs::{self, BaseDirs, RuntimePolicy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let places = dirs::get();
//!
//! // Most relevant first; read from all of them, write into the first one.
//! let _candidates = places.config_read("myapp");
//! let _config = places.config_write("myapp")?;
//! let _runtime = places.runtime_dir("myapp", RuntimePolicy::Strict)?;
//! # Ok(())
//! # }
//! ```

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use thiserror::Error;
use tracing::{debug, warn};

use crate::fs::{MkdirOptions, PathExt};
use crate::os::env::{Env, Environment, OS_NAME, USER_HOME};

mod macos;
mod windows;
mod xdg;

pub use macos::MacOs;
pub use windows::{WindowsVista, WindowsXp};
pub use xdg::Xdg;

/// Kind of files a base directory is meant for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Category {
    Config,
    Data,
    Cache,
    Runtime,
}

impl Category {
    /// Stem of the XDG variables for `self`, as in `XDG_<stem>_HOME`.
    pub const fn stem(self) -> &'static str {
        match self {
            Category::Config => "CONFIG",
            Category::Data => "DATA",
            Category::Cache => "CACHE",
            Category::Runtime => "RUNTIME",
        }
    }

    /// Hidden directory below the home directory used when nothing else is known, e.g. `.config`.
    pub const fn hidden_dir(self) -> &'static str {
        match self {
            Category::Config => ".config",
            Category::Data => ".data",
            Category::Cache => ".cache",
            Category::Runtime => ".runtime",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Config => "config",
            Category::Data => "data",
            Category::Cache => "cache",
            Category::Runtime => "runtime",
        })
    }
}

/// What [`BaseDirs::runtime_dir`] should do on systems without a runtime directory.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum RuntimePolicy {
    /// Report that there is none.
    Strict,
    /// Use the cache directory instead. Its contents may survive a restart.
    Lenient,
}

/// Errors encountered when resolving application directories.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Application directory could not be created.
    #[error("failed to create directory `{}`", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// There is no base directory of this category on the current system.
    #[error("no {0} base directory is known on this system")]
    MissingBase(Category),
}

/// Base directories of one operating system convention, plus application directories derived
/// from them.
///
/// Implementors provide the four base queries; the derived operations append an application
/// name and, for everything that is going to be written into, create the directory.
pub trait BaseDirs: fmt::Debug {
    /// Directories holding configuration, most relevant first. Never empty.
    fn config_bases(&self) -> &[PathBuf];

    /// Directories holding data files, most relevant first. Never empty.
    fn data_bases(&self) -> &[PathBuf];

    /// Directory for cached files.
    ///
    /// Only [`None`] on Windows without `%TEMP%`.
    fn cache_base(&self) -> Option<&Path>;

    /// Directory for files which must not survive a restart, like sockets.
    ///
    /// [`None`] if the system has no such convention.
    fn runtime_base(&self) -> Option<&Path>;

    /// Configuration directories of `app`, one per [`config_bases`](BaseDirs::config_bases)
    /// entry and in the same order.
    fn config_read(&self, app: &str) -> Vec<PathBuf> {
        append_to_bases(self.config_bases(), app)
    }

    /// Configuration directory `app` should write to, created if missing.
    fn config_write(&self, app: &str) -> Result<PathBuf, PlacesError> {
        let base = self
            .config_bases()
            .first()
            .ok_or(PlacesError::MissingBase(Category::Config))?;
        create_app_dir(base, app)
    }

    /// Data directories of `app`, one per [`data_bases`](BaseDirs::data_bases) entry and in
    /// the same order.
    fn data_read(&self, app: &str) -> Vec<PathBuf> {
        append_to_bases(self.data_bases(), app)
    }

    /// Data directory `app` should write to, created if missing.
    fn data_write(&self, app: &str) -> Result<PathBuf, PlacesError> {
        let base = self
            .data_bases()
            .first()
            .ok_or(PlacesError::MissingBase(Category::Data))?;
        create_app_dir(base, app)
    }

    /// Cache directory of `app`, created if missing.
    fn cache_dir(&self, app: &str) -> Result<PathBuf, PlacesError> {
        let base = self
            .cache_base()
            .ok_or(PlacesError::MissingBase(Category::Cache))?;
        create_app_dir(base, app)
    }

    /// Runtime directory of `app`, created if missing.
    ///
    /// # Returns
    /// [`Ok(None)`](Ok) if and only if there is no runtime base and `policy` is
    /// [`RuntimePolicy::Strict`]. With [`RuntimePolicy::Lenient`] the cache base is used instead.
    fn runtime_dir(
        &self,
        app: &str,
        policy: RuntimePolicy,
    ) -> Result<Option<PathBuf>, PlacesError> {
        let base = match (self.runtime_base(), policy) {
            (Some(base), _) => base,
            (None, RuntimePolicy::Strict) => return Ok(None),
            (None, RuntimePolicy::Lenient) => self
                .cache_base()
                .ok_or(PlacesError::MissingBase(Category::Cache))?,
        };
        create_app_dir(base, app).map(Some)
    }
}

/// `base` with `app` appended, even if `app` is absolute.
fn app_dir(base: &Path, app: &str) -> PathBuf {
    let relative: PathBuf = Path::new(app)
        .components()
        .filter(|component| !matches!(component, Component::Prefix(_) | Component::RootDir))
        .collect();
    base.join(relative)
}

fn append_to_bases(bases: &[PathBuf], app: &str) -> Vec<PathBuf> {
    bases.iter().map(|base| app_dir(base, app)).collect()
}

fn create_app_dir(base: &Path, app: &str) -> Result<PathBuf, PlacesError> {
    let dir = app_dir(base, app);
    if let Err(source) = dir.mkdir(MkdirOptions::WithParents) {
        return Err(PlacesError::CreateDir { path: dir, source });
    }
    debug!(dir = %dir.display(), "application directory ready");
    Ok(dir)
}

/// Operating system conventions [`Places`] knows about.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Variant {
    /// XDG Base Directory Specification, used by Linux and other Unix-likes.
    Xdg,
    /// Windows 2000, NT and XP.
    WindowsXp,
    /// Windows Vista and everything after.
    WindowsVista,
    /// macOS `~/Library`.
    MacOs,
}

impl Variant {
    /// Pick the convention for operating system `os_name`.
    ///
    /// Unknown systems get [`Variant::Xdg`] and a warning.
    ///
    /// # Examples
    /// ```rust
    /// use places::dirs::Variant;
    ///
    /// assert_eq!(Variant::from_os_name("Linux"), Variant::Xdg);
    /// assert_eq!(Variant::from_os_name("Windows XP"), Variant::WindowsXp);
    /// assert_eq!(Variant::from_os_name("Windows 11"), Variant::WindowsVista);
    /// assert_eq!(Variant::from_os_name("Mac OS X"), Variant::MacOs);
    /// ```
    pub fn from_os_name(os_name: &str) -> Self {
        if ["Linux", "FreeBSD", "SunOS"]
            .iter()
            .any(|prefix| os_name.starts_with(prefix))
        {
            Variant::Xdg
        } else if matches!(os_name, "Windows XP" | "Windows 2000" | "Windows NT") {
            Variant::WindowsXp
        } else if os_name.starts_with("Windows") {
            Variant::WindowsVista
        } else if os_name == "Mac OS X" {
            Variant::MacOs
        } else {
            warn!(os_name, "unknown operating system, falling back to XDG");
            Variant::Xdg
        }
    }
}

/// Base directories of the current operating system.
///
/// Everything is read from the [`Environment`] once, at construction.
#[derive(Debug)]
pub struct Places {
    variant: Variant,
    bases: Box<dyn BaseDirs + Send + Sync>,
}

impl Places {
    /// Resolve base directories for the system named by property [`OS_NAME`] of `env`.
    pub fn for_environment(env: &impl Environment) -> Self {
        match env.property_str(OS_NAME) {
            Ok(os_name) => Self::with_os_name(&os_name, env),
            Err(err) => {
                warn!(%err, "cannot determine operating system, falling back to XDG");
                Self::with_variant(Variant::Xdg, env)
            }
        }
    }

    /// Resolve base directories for operating system `os_name`.
    ///
    /// See [`Variant::from_os_name`].
    pub fn with_os_name(os_name: &str, env: &impl Environment) -> Self {
        Self::with_variant(Variant::from_os_name(os_name), env)
    }

    /// Resolve base directories following `variant`.
    pub fn with_variant(variant: Variant, env: &impl Environment) -> Self {
        let bases: Box<dyn BaseDirs + Send + Sync> = match variant {
            Variant::Xdg => Box::new(Xdg::new(env)),
            Variant::WindowsXp => Box::new(WindowsXp::new(env)),
            Variant::WindowsVista => Box::new(WindowsVista::new(env)),
            Variant::MacOs => Box::new(MacOs::new(env)),
        };
        debug!(?variant, ?bases, "resolved base directories");
        Self { variant, bases }
    }

    /// Convention `self` follows.
    pub fn variant(&self) -> Variant {
        self.variant
    }
}

impl BaseDirs for Places {
    fn config_bases(&self) -> &[PathBuf] {
        self.bases.config_bases()
    }

    fn data_bases(&self) -> &[PathBuf] {
        self.bases.data_bases()
    }

    fn cache_base(&self) -> Option<&Path> {
        self.bases.cache_base()
    }

    fn runtime_base(&self) -> Option<&Path> {
        self.bases.runtime_base()
    }
}

static PLACES: LazyLock<Places> = LazyLock::new(|| Places::for_environment(&Env::new()));

/// [`Places`] of the running process, resolved on first use.
pub fn get() -> &'static Places {
    &PLACES
}

/// Home directory of the user, or an empty path if `env` doesn't know it.
///
/// Fallbacks below an empty home are relative to the working directory.
fn home(env: &impl Environment) -> PathBuf {
    match env.property(USER_HOME) {
        Some(home) => PathBuf::from(home),
        None => {
            warn!("home directory unknown, fallbacks are relative to the working directory");
            PathBuf::new()
        }
    }
}

/// Non-empty environmental variable `key`.
fn var_nonempty(env: &impl Environment, key: &str) -> Option<OsString> {
    env.var_os(key).filter(|value| !value.is_empty())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::ffi::OsString;
    use std::path::Path;

    use crate::os::env::{Env, OS_NAME, USER_HOME};

    /// [`Env`] for `os_name` with home `home` and variables `vars`.
    ///
    /// `$h` in values is replaced by `home`.
    pub(crate) fn env(os_name: &str, home: &Path, vars: &[(&str, &str)]) -> Env {
        let home_str = home.to_str().expect("temporary dirs are UTF-8");
        let vars: HashMap<OsString, OsString> = vars
            .iter()
            .map(|(key, value)| (key.into(), value.replace("$h", home_str).into()))
            .collect();
        Env::new_from(vars)
            .with_property(OS_NAME, os_name)
            .with_property(USER_HOME, home)
    }
}
