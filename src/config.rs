use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_LDAP_PORT: u16 = 389;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub bind: BindDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub host: String,
    /// Defaults to 389 when omitted.
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindDefaults {
    /// Bind DN template; "{user}" is replaced with the login name,
    /// e.g. "uid={user},ou=people,dc=example,dc=com".
    pub dn_template: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Expand the login name through the configured DN template, or pass it
    /// through unchanged when no template is set.
    pub fn bind_dn(&self, username: &str) -> String {
        match &self.bind.dn_template {
            Some(template) => template.replace("{user}", username),
            None => username.to_string(),
        }
    }
}
