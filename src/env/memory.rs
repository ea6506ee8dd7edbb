//! In-memory environment for tests

use std::collections::HashMap;

use anyhow::{bail, Result};

use super::EnvironmentPort;

#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
    /// Exported entries in the order they were written
    pub exported: Vec<(String, String)>,
    fail_exports: bool,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Every export fails and records nothing
    pub fn failing_exports(mut self) -> Self {
        self.fail_exports = true;
        self
    }

    /// Last exported value of `key`
    pub fn exported_value(&self, key: &str) -> Option<&str> {
        self.exported
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

impl EnvironmentPort for MemoryEnvironment {
    fn get(&self, key: &str) -> String {
        self.vars.get(key).cloned().unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            self.vars.remove(key);
        } else {
            self.vars.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn export(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_exports {
            bail!("export of {} rejected", key);
        }
        self.exported.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
