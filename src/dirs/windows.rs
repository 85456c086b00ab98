//! Windows base directories.
//!
//! Windows makes no difference between configuration and data, so both share one list. The
//! layout of the user profile changed with Vista, hence two conventions.

use std::path::{Path, PathBuf};

use super::{BaseDirs, home, var_nonempty};
use crate::os::env::Environment;

const PROGRAM_FILES: &str = "C:\\Program Files";

/// `%key%`, or `fallback` if it is unset or empty.
fn var_or(env: &impl Environment, key: &str, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
    var_nonempty(env, key)
        .map(PathBuf::from)
        .unwrap_or_else(fallback)
}

/// `%TEMP%`, deliberately without a fallback.
fn temp(env: &impl Environment) -> Option<PathBuf> {
    var_nonempty(env, "TEMP").map(PathBuf::from)
}

/// Base directories of Windows 2000, NT and XP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsXp {
    bases: Vec<PathBuf>,
    temp: Option<PathBuf>,
}

impl WindowsXp {
    /// Read `%APPDATA%`, `%PROGRAMFILES%` and `%TEMP%` from `env`.
    pub fn new(env: &impl Environment) -> Self {
        let home = home(env);
        Self {
            bases: vec![
                var_or(env, "APPDATA", || home.join("AppData")),
                var_or(env, "PROGRAMFILES", || PathBuf::from(PROGRAM_FILES)),
            ],
            temp: temp(env),
        }
    }
}

/// Base directories of Windows Vista and later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsVista {
    bases: Vec<PathBuf>,
    temp: Option<PathBuf>,
}

impl WindowsVista {
    /// Read `%APPDATA%`, `%LOCALAPPDATA%`, `%PROGRAMDATA%` and `%TEMP%` from `env`.
    pub fn new(env: &impl Environment) -> Self {
        let home = home(env);
        Self {
            bases: vec![
                var_or(env, "APPDATA", || home.join("AppData").join("Roaming")),
                var_or(env, "LOCALAPPDATA", || home.join("AppData")),
                var_or(env, "PROGRAMDATA", || PathBuf::from(PROGRAM_FILES)),
            ],
            temp: temp(env),
        }
    }
}

macro_rules! impl_windows_base_dirs {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BaseDirs for $ty {
                fn config_bases(&self) -> &[PathBuf] {
                    &self.bases
                }

                fn data_bases(&self) -> &[PathBuf] {
                    &self.bases
                }

                fn cache_base(&self) -> Option<&Path> {
                    self.temp.as_deref()
                }

                // No separate convention for runtime files.
                fn runtime_base(&self) -> Option<&Path> {
                    self.temp.as_deref()
                }
            }
        )*
    };
}

impl_windows_base_dirs!(WindowsXp, WindowsVista);
