//! XDG Base Directory Specification support.
//!
//! <https://specifications.freedesktop.org/basedir-spec/latest/>

use std::env::split_paths;
use std::path::{Path, PathBuf};

use super::{BaseDirs, Category, home, var_nonempty};
use crate::os::env::{Environment, TEMP_DIR};

/// System wide fallback for `$XDG_CONFIG_DIRS`.
const CONFIG_DIRS: &[&str] = &["/etc/xdg"];
/// System wide fallback for `$XDG_DATA_DIRS`.
const DATA_DIRS: &[&str] = &["/usr/local/share/", "/usr/share/"];

/// Base directories of Linux, the BSDs and other Unix-likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xdg {
    config_bases: Vec<PathBuf>,
    data_bases: Vec<PathBuf>,
    cache_base: PathBuf,
    runtime_base: PathBuf,
}

impl Xdg {
    /// Read `$XDG_*` variables from `env`.
    pub fn new(env: &impl Environment) -> Self {
        let home = home(env);
        let cache_base = var_nonempty(env, &format!("XDG_{}_HOME", Category::Cache.stem()))
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(Category::Cache.hidden_dir()));
        let runtime_base = var_nonempty(env, &format!("XDG_{}_DIR", Category::Runtime.stem()))
            .or_else(|| env.property(TEMP_DIR).filter(|dir| !dir.is_empty()))
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(Category::Runtime.hidden_dir()));
        Self {
            config_bases: search_path(env, &home, Category::Config, CONFIG_DIRS),
            data_bases: search_path(env, &home, Category::Data, DATA_DIRS),
            cache_base,
            runtime_base,
        }
    }
}

/// `$XDG_<category>_HOME` followed by `$XDG_<category>_DIRS`, without duplicates.
///
/// `defaults` stand in for an unset `$XDG_<category>_DIRS` only next to an explicit
/// `$XDG_<category>_HOME`. With neither set the result is `~/.<category>` alone, which is what
/// callers of a bare environment expect (e.g. `[~/.config]`, `[~/.data]`).
fn search_path(
    env: &impl Environment,
    home: &Path,
    category: Category,
    defaults: &[&str],
) -> Vec<PathBuf> {
    let mut bases = Vec::new();
    if let Some(user) = var_nonempty(env, &format!("XDG_{}_HOME", category.stem())) {
        bases.push(PathBuf::from(user));
    }

    let dirs: Vec<PathBuf> = match var_nonempty(env, &format!("XDG_{}_DIRS", category.stem())) {
        Some(dirs) => split_paths(&dirs).collect(),
        None if !bases.is_empty() => defaults.iter().map(PathBuf::from).collect(),
        None => Vec::new(),
    };
    for dir in dirs {
        if !dir.as_os_str().is_empty() && !bases.contains(&dir) {
            bases.push(dir);
        }
    }

    if bases.is_empty() {
        bases.push(home.join(category.hidden_dir()));
    }
    bases
}

impl BaseDirs for Xdg {
    fn config_bases(&self) -> &[PathBuf] {
        &self.config_bases
    }

    fn data_bases(&self) -> &[PathBuf] {
        &self.data_bases
    }

    fn cache_base(&self) -> Option<&Path> {
        Some(&self.cache_base)
    }

    fn runtime_base(&self) -> Option<&Path> {
        Some(&self.runtime_base)
    }
}
