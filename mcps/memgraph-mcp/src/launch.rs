//! Launch configuration printed by `--json`
//!
//! MCP hosts paste this object into their server list. Hosts reject `null`
//! for `args` and `env`, so both always serialize as `[]` / `{}` at minimum.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConnectionOverrides;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(rename = "type")]
    pub transport: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl LaunchConfig {
    /// Build a stdio launch entry for `command`, forwarding non-empty flags
    pub fn stdio(command: impl Into<String>, overrides: &ConnectionOverrides) -> Self {
        let mut args = Vec::new();
        let flags = [
            ("--connection-uri", &overrides.connection_uri),
            ("--username", &overrides.username),
            ("--password", &overrides.password),
        ];
        for (flag, value) in flags {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                args.push(flag.to_string());
                args.push(value.to_string());
            }
        }

        Self {
            transport: "stdio".to_string(),
            command: command.into(),
            args,
            env: BTreeMap::new(),
        }
    }

    /// Launch entry pointing at the running executable
    pub fn for_current_exe(overrides: &ConnectionOverrides) -> Self {
        Self::stdio(executable_path(), overrides)
    }
}

/// Absolute path of the running executable, or argv[0]'s file name if the
/// platform cannot tell us
pub fn executable_path() -> String {
    match std::env::current_exe() {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!("Could not determine executable path: {}", e);
            let argv0 = std::env::args().next().unwrap_or_default();
            Path::new(&argv0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or(argv0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_and_env_are_not_null() {
        let config = LaunchConfig::stdio("/usr/local/bin/memgraph-mcp", &ConnectionOverrides::default());
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["type"], "stdio");
        assert_eq!(json["command"], "/usr/local/bin/memgraph-mcp");
        assert_eq!(json["args"], serde_json::json!([]));
        assert_eq!(json["env"], serde_json::json!({}));
    }

    #[test]
    fn test_compact_output_shape() {
        let config = LaunchConfig::stdio("/bin/memgraph-mcp", &ConnectionOverrides::default());
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"type":"stdio","command":"/bin/memgraph-mcp","args":[],"env":{}}"#
        );
    }

    #[test]
    fn test_flags_forwarded_in_order() {
        let overrides = ConnectionOverrides {
            connection_uri: Some("bolt://graph:7687".into()),
            username: Some("admin".into()),
            password: Some("secret".into()),
        };
        let config = LaunchConfig::stdio("memgraph-mcp", &overrides);
        assert_eq!(
            config.args,
            vec![
                "--connection-uri",
                "bolt://graph:7687",
                "--username",
                "admin",
                "--password",
                "secret",
            ]
        );
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_empty_flags_skipped() {
        let overrides = ConnectionOverrides {
            connection_uri: Some(String::new()),
            username: None,
            password: Some("secret".into()),
        };
        let config = LaunchConfig::stdio("memgraph-mcp", &overrides);
        assert_eq!(config.args, vec!["--password", "secret"]);
    }

    #[test]
    fn test_current_exe_is_used() {
        let config = LaunchConfig::for_current_exe(&ConnectionOverrides::default());
        assert!(!config.command.is_empty());
    }
}
