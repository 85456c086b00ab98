use std::collections::HashMap;
use std::env::{home_dir, temp_dir};
use std::ffi::{OsStr, OsString};

use thiserror::Error;

/// Property holding the name of the running operating system, e.g. `"Linux"`.
pub const OS_NAME: &str = "os.name";
/// Property holding the home directory of the current user.
pub const USER_HOME: &str = "user.home";
/// Property holding the directory for temporary files.
pub const TEMP_DIR: &str = "temp.dir";

/// Read access to environmental variables and system properties.
///
/// Everything in [`dirs`](crate::dirs) reads its inputs through this trait, so tests can
/// swap the real process environment for an in-memory one.
pub trait Environment {
    /// Get environmental variable `key`, [`None`] if it is unset.
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// Get system property `key` (see [`OS_NAME`], [`USER_HOME`], [`TEMP_DIR`]).
    fn property(&self, key: &str) -> Option<OsString>;

    /// Get system property `key` and convert it to UTF-8.
    fn property_str(&self, key: &str) -> Result<String, EnvStrError> {
        self.property(key)
            .ok_or_else(|| EnvStrError::Missing(key.into()))?
            .into_string()
            .map_err(|_| EnvStrError::NonUTF8(key.into()))
    }
}

/// Snapshot of environmental variables and system properties.
///
/// Lookups of variables are case-insensitive on Windows, as its environmental variables are.
#[derive(Debug, Clone)]
pub struct Env {
    keys: HashMap<OsString, OsString>,

    normalised_keys: HashMap<OsString, OsString>,

    properties: HashMap<String, OsString>,
}

/// Errors encountered when getting environmental variable or property.
#[derive(Debug, Clone, Error)]
pub enum EnvStrError {
    /// This variant indicates, that variable `Missing.0` is missing.
    #[error("there is no environmental variable or property `{0:?}`")]
    Missing(OsString),

    /// This variant indicates, that variable `NonUTF8.0` is not an UTF-8 string.
    #[error("environmental variable or property `{0:?}` is not an UTF-8 string")]
    NonUTF8(OsString),
}

impl Env {
    /// Snapshot the environment of the current process.
    ///
    /// Properties are filled with [`os::name`](crate::os::name), [`std::env::home_dir`] and
    /// [`std::env::temp_dir`].
    pub fn new() -> Self {
        let mut env = Self::new_from(std::env::vars_os().collect())
            .with_property(OS_NAME, crate::os::name())
            .with_property(TEMP_DIR, temp_dir());
        if let Some(home) = home_dir() {
            env = env.with_property(USER_HOME, home);
        }
        env
    }

    /// Create new [`Env`] using `env` as existing environmental variables and no properties.
    pub fn new_from(env: HashMap<OsString, OsString>) -> Self {
        Self {
            normalised_keys: Env::normalize_map(env.clone()),
            keys: env,
            properties: HashMap::new(),
        }
    }

    /// Set property `key` to `value`.
    ///
    /// # Examples
    /// ```rust
    /// use places::os::env::{Env, Environment, USER_HOME};
    ///
    /// let env = Env::new_from(Default::default()).with_property(USER_HOME, "/home/u");
    /// assert_eq!(env.property(USER_HOME), Some("/home/u".into()));
    /// ```
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    fn normalize_key(key: impl AsRef<OsStr>) -> OsString {
        key.as_ref().to_ascii_uppercase()
    }
    fn normalize_map(keys: HashMap<OsString, OsString>) -> HashMap<OsString, OsString> {
        keys.into_iter()
            .map(|(key, value)| (Env::normalize_key(key), value))
            .collect()
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Returns
    /// `Option<&OsStr>`. `None` variant indicates missing key, `Some`: existing key.
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        match self.keys.get(key) {
            Some(x) => Some(x),
            None => {
                if cfg!(target_os = "windows") {
                    self.normalised_keys
                        .get(&Env::normalize_key(key))
                        .map(|x| x.as_ref())
                } else {
                    None
                }
            }
        }
    }

    /// Get environmental variable pointed by `key` and convert it to UTF-8.
    ///
    /// # Examples
    /// ```rust
    /// use places::os::env::Env;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let env = Env::new();
    /// let _path = env.get("PATH")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, key: impl AsRef<OsStr>) -> Result<&str, EnvStrError> {
        let key = key.as_ref();
        self.get_os(key)
            .ok_or_else(|| EnvStrError::Missing(key.to_os_string()))?
            .to_str()
            .ok_or_else(|| EnvStrError::NonUTF8(key.to_os_string()))
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for Env {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get_os(key).map(OsStr::to_os_string)
    }

    fn property(&self, key: &str) -> Option<OsString> {
        self.properties.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_matches, assert_none, assert_ok_eq, assert_some_eq};

    fn env_of(pairs: &[(&str, &str)]) -> Env {
        Env::new_from(
            pairs
                .iter()
                .map(|(k, v)| (OsString::from(k), OsString::from(v)))
                .collect(),
        )
    }

    #[test]
    fn variables_are_looked_up() {
        let env = env_of(&[("XDG_CONFIG_HOME", "/cfg")]);
        assert_some_eq!(env.var_os("XDG_CONFIG_HOME"), OsString::from("/cfg"));
        assert_ok_eq!(env.get("XDG_CONFIG_HOME"), "/cfg");
        assert_none!(env.var_os("XDG_DATA_HOME"));
        assert_matches!(env.get("XDG_DATA_HOME"), Err(EnvStrError::Missing(_)));
    }

    #[test]
    fn variables_are_not_properties() {
        let env = env_of(&[(OS_NAME, "Linux")]);
        assert_none!(env.property(OS_NAME));
        assert_matches!(env.property_str(OS_NAME), Err(EnvStrError::Missing(_)));
    }

    #[test]
    fn properties_are_looked_up() {
        let env = env_of(&[]).with_property(OS_NAME, "Mac OS X");
        assert_some_eq!(env.property(OS_NAME), OsString::from("Mac OS X"));
        assert_ok_eq!(env.property_str(OS_NAME), "Mac OS X".to_owned());
        assert_none!(env.property(USER_HOME));
    }

    #[test]
    fn later_property_wins() {
        let env = env_of(&[])
            .with_property(USER_HOME, "/a")
            .with_property(USER_HOME, "/b");
        assert_some_eq!(env.property(USER_HOME), OsString::from("/b"));
    }

    #[cfg(windows)]
    #[test]
    fn windows_lookup_ignores_case() {
        let env = env_of(&[("AppData", "C:\\Users\\u\\AppData\\Roaming")]);
        assert_ok_eq!(env.get("APPDATA"), "C:\\Users\\u\\AppData\\Roaming");
    }

    #[cfg(unix)]
    #[test]
    fn unix_lookup_respects_case() {
        let env = env_of(&[("AppData", "/a")]);
        assert_none!(env.var_os("APPDATA"));
    }

    #[test]
    fn process_snapshot_has_os_name_and_temp_dir() {
        let env = Env::new();
        assert_ok_eq!(env.property_str(OS_NAME), crate::os::name().to_owned());
        assert_some_eq!(env.property(TEMP_DIR), temp_dir().into_os_string());
    }
}
