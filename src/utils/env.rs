//! Environment variable handling
//!
//! The resolver never reads the process environment directly; it goes
//! through [`EnvLookup`] so tests can hand in a fixed set of variables.

use std::{collections::HashMap, env};
use tracing::debug;

/// Environment variable holding the default template path
pub const TEMPLATE_PATH_VAR: &str = "XSLT_TEMPLATE_PATH";

/// Read-only access to environment variables
pub trait EnvLookup {
    /// Value of `name`, or `None` when unset
    fn get(&self, name: &str) -> Option<String>;

    /// Value of `name`, treating an empty or whitespace-only value as unset
    fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }
}

/// Lookup backed by the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        let value = env::var(name).ok();
        debug!("Environment lookup {}: {:?}", name, value);
        value
    }
}

/// Lookup backed by an in-memory map
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_lookup() {
        let env = MapEnv::new().with_var(TEMPLATE_PATH_VAR, "/opt/freb.xsl");

        assert_eq!(env.get(TEMPLATE_PATH_VAR).as_deref(), Some("/opt/freb.xsl"));
        assert_eq!(env.get("NONEXISTENT_VAR"), None);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let env = MapEnv::new()
            .with_var("EMPTY", "")
            .with_var("BLANK", "   ")
            .with_var("SET", "value");

        assert_eq!(env.get("EMPTY").as_deref(), Some(""));
        assert_eq!(env.get_non_empty("EMPTY"), None);
        assert_eq!(env.get_non_empty("BLANK"), None);
        assert_eq!(env.get_non_empty("SET").as_deref(), Some("value"));
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |name: &str| (name == TEMPLATE_PATH_VAR).then(|| "tpl.xslt".to_string());

        assert_eq!(
            lookup.get_non_empty(TEMPLATE_PATH_VAR).as_deref(),
            Some("tpl.xslt")
        );
        assert_eq!(lookup.get("PATH"), None);
    }
}
