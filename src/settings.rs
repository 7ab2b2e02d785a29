use crate::endpoint::NodeEndpoint;
use config::{Config, ConfigError, Environment, File};
use serde::de::DeserializeOwned;

pub const DEFAULT_HOST: [u8; 4] = [127, 0, 0, 1];
pub const DEFAULT_PORT: u16 = 8686;

/// Environment variables with this prefix override file settings,
/// e.g. `GATEWAY_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "GATEWAY";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: [u8; 4],
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

/// Everything the gateway reads at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub nodes: Vec<NodeEndpoint>,
}

impl Settings {
    /// Load `config_name` (any format the config crate knows, extension optional) and apply
    /// environment overrides on top.
    pub fn load(config_name: &str) -> crate::Result<Settings> {
        let mut config = Config::default();
        config.merge(File::with_name(config_name))?;
        config.merge(Environment::with_prefix(ENV_PREFIX).separator("__"))?;
        Settings::from_config(&config)
    }

    pub fn from_config(config: &Config) -> crate::Result<Settings> {
        let server = ServerSettings {
            host: get_or(config, "server.host", DEFAULT_HOST)?,
            port: get_or(config, "server.port", DEFAULT_PORT)?,
        };
        let nodes = get_or(config, "nodes", vec![])?;
        Ok(Settings { server, nodes })
    }
}

//
// a missing key falls back to the default, a malformed one is an error
//
fn get_or<T: DeserializeOwned>(config: &Config, key: &str, default: T) -> crate::Result<T> {
    match config.get::<T>(key) {
        Ok(value) => Ok(value),
        Err(ConfigError::NotFound(_)) => Ok(default),
        Err(err) => Err(err.into()),
    }
}
