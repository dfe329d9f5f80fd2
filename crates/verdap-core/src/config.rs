//! Configuration for verdap
//!
//! The whole directory is declared here: the record tables below are the only
//! state the engine ever serves. The configuration is loaded once at startup
//! and treated as immutable for the lifetime of the process.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdapConfig {
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub groups: Vec<Group>,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub fruits: Vec<InventoryItem>,

    #[serde(default)]
    pub vegetables: Vec<InventoryItem>,
}

impl Default for VerdapConfig {
    fn default() -> Self {
        Self {
            debug: false,
            directory: DirectoryConfig::default(),
            web: WebConfig::default(),
            client: ClientConfig::default(),
            logging: LoggingConfig::default(),
            groups: Vec::new(),
            users: Vec::new(),
            fruits: Vec::new(),
            vegetables: Vec::new(),
        }
    }
}

impl VerdapConfig {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::ConfigError(format!("failed to read {path}: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| crate::Error::ConfigError(format!("failed to parse {path}: {e}")))
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_dn) = std::env::var("VERDAP_BASE_DN") {
            config.directory.base_dn = base_dn;
        }
        if let Ok(addr) = std::env::var("VERDAP_BIND_ADDRESS") {
            config.web.bind_address = addr;
        }
        if let Ok(port) = std::env::var("VERDAP_PORT") {
            if let Ok(p) = port.parse() {
                config.web.port = p;
            }
        }
        if let Ok(level) = std::env::var("VERDAP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }

    /// Eager diagnosis of referential problems in the record tables.
    ///
    /// Dangling references are reported but not fatal: a user whose primary
    /// group does not resolve simply fails every bind attempt.
    pub fn validate(&self) {
        for user in &self.users {
            if !self.groups.iter().any(|g| g.gid == user.primary_group) {
                warn!(
                    user = %user.name,
                    gid = user.primary_group,
                    "primary group does not resolve; every bind for this user will be rejected"
                );
            }
            for gid in &user.other_groups {
                if !self.groups.iter().any(|g| g.gid == *gid) {
                    warn!(user = %user.name, gid, "secondary group does not resolve; skipped");
                }
            }
        }
    }

    /// Log the effective configuration at debug level.
    pub fn dump(&self) {
        debug!("dumping configuration information");
        debug!(
            "web front end listening on: {}:{}",
            self.web.bind_address, self.web.port
        );
        debug!("base DN: {}", self.directory.base_dn);
        debug!("client binding as: {}", self.client.bind_dn);
        debug!(
            "records: {} groups, {} users, {} fruits, {} vegetables",
            self.groups.len(),
            self.users.len(),
            self.fruits.len(),
            self.vegetables.len()
        );
        debug!("debug mode: {}", self.debug);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub base_dn: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_dn: crate::DEFAULT_BASE_DN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Credentials the front end uses for its own directory session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub bind_dn: String,

    #[serde(default)]
    pub bind_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A posix-style group record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub gid: u32,
}

/// A user record. `name` is unique; `primary_group` must reference a
/// configured group for the user to be able to bind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub primary_group: u32,

    #[serde(default)]
    pub other_groups: Vec<u32>,

    /// SHA-256 of the password, lowercase hex.
    pub password_sha256: String,

    pub uid_number: u32,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub gecos: String,

    #[serde(default)]
    pub ssh_keys: Vec<String>,
}

/// A stock item. The category (fruit or vegetable) is carried by which table
/// the item sits in, not by a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub stock: i64,
}
