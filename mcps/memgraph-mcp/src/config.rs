//! Connection configuration for Memgraph MCP Server
//!
//! Each field is resolved independently: a non-empty command-line flag wins,
//! then a non-empty environment variable, then the built-in default. The URI
//! is not validated here; a malformed one fails when the driver connects.

use std::fmt;

/// Default Bolt endpoint of a local Memgraph instance
pub const DEFAULT_URI: &str = "bolt://localhost:7687";

pub const URI_ENV: &str = "MEMGRAPH_URI";
pub const USER_ENV: &str = "MEMGRAPH_USER";
pub const PASSWORD_ENV: &str = "MEMGRAPH_PASSWORD";

/// Connection values supplied on the command line (empty means unset)
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub connection_uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Resolved connection parameters
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
}

/// How the driver authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// Neither a username nor a password was configured
    None,
    Basic { username: String, password: String },
}

impl ConnectionConfig {
    /// Resolve from flags and the process environment
    pub fn resolve(overrides: &ConnectionOverrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve from flags and an arbitrary environment lookup
    pub fn resolve_with<F>(overrides: &ConnectionOverrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            uri: pick(overrides.connection_uri.as_deref(), env(URI_ENV), DEFAULT_URI),
            username: pick(overrides.username.as_deref(), env(USER_ENV), ""),
            password: pick(overrides.password.as_deref(), env(PASSWORD_ENV), ""),
        }
    }

    /// No-auth when both credentials are empty, basic auth otherwise
    pub fn auth(&self) -> Auth {
        if self.username.is_empty() && self.password.is_empty() {
            Auth::None
        } else {
            Auth::Basic {
                username: self.username.clone(),
                password: self.password.clone(),
            }
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::resolve_with(&ConnectionOverrides::default(), |_| None)
    }
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

fn pick(flag: Option<&str>, env: Option<String>, default: &str) -> String {
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return value.to_string();
    }
    match env {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
