use std::env;
use std::str::FromStr;

/// Which subscribers receive mutation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadcastScope {
    /// Every connected client.
    #[default]
    Global,
    /// Only clients that joined the room of the message's workspace.
    Workspace,
}

impl FromStr for BroadcastScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "workspace" => Ok(Self::Workspace),
            other => Err(format!("unknown broadcast scope '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub broadcast_scope: BroadcastScope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            database_path: "./teamchat.db".into(),
            database_max_connections: 5,
            broadcast_scope: BroadcastScope::Global,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port),
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            broadcast_scope: parse_var("BROADCAST_SCOPE", defaults.broadcast_scope),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}={:?}: {}", name, raw, e);
            default
        }),
        Err(_) => default,
    }
}
