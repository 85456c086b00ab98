use std::path::{Path, PathBuf};

use super::{BaseDirs, home};
use crate::os::env::Environment;

/// Base directories of macOS, fixed below `~/Library`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacOs {
    config_bases: [PathBuf; 1],
    data_bases: [PathBuf; 1],
    cache_base: PathBuf,
}

impl MacOs {
    /// Derive `~/Library` paths from the home directory in `env`.
    pub fn new(env: &impl Environment) -> Self {
        let library = home(env).join("Library");
        Self {
            config_bases: [library.join("Preferences")],
            cache_base: library.join("Caches"),
            data_bases: [library],
        }
    }
}

impl BaseDirs for MacOs {
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
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dirs::testing::env;
    use claim::{assert_none, assert_some_eq};

    #[test]
    fn everything_lives_in_library() {
        let home = Path::new("/Users/u");
        let mac = MacOs::new(&env("Mac OS X", home, &[("XDG_CONFIG_HOME", "/ignored")]));
        assert_eq!(mac.config_bases(), [home.join("Library").join("Preferences")]);
        assert_eq!(mac.data_bases(), [home.join("Library")]);
        assert_some_eq!(mac.cache_base(), home.join("Library").join("Caches").as_path());
        assert_none!(mac.runtime_base());
    }
}
