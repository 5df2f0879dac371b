//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

/// What to do when the node fails to create an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InviteFailurePolicy {
    /// Log the error and terminate the process so a supervisor restarts it.
    #[default]
    Exit,
    /// Log the error and answer the request with `502 Bad Gateway`.
    Respond,
}

impl FromStr for InviteFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exit" => Ok(Self::Exit),
            "respond" => Ok(Self::Respond),
            other => anyhow::bail!("unknown invite failure policy {other:?} (expected \"exit\" or \"respond\")"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to listen on.
    pub host: String,

    /// HTTP port.
    pub port: u16,

    /// Path or name of the `sbot` executable.
    pub sbot_bin: PathBuf,

    /// Directory served for unmatched paths (stylesheets, images).
    pub public_dir: PathBuf,

    /// URL prefix the message viewer is mounted under, with leading and
    /// trailing slash (e.g. "/view/").
    pub viewer_base: String,

    /// Behaviour on invitation creation failure.
    pub invite_failure: InviteFailurePolicy,

    /// Port for the Prometheus `/metrics` endpoint; disabled when unset.
    pub metrics_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
            sbot_bin: PathBuf::from("sbot"),
            public_dir: PathBuf::from("public"),
            viewer_base: "/view/".to_string(),
            invite_failure: InviteFailurePolicy::Exit,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `GATEWAY_HOST`: Interface to bind (default: "0.0.0.0")
    /// - `HTTP_PORT`: Listening port (default: 80)
    /// - `SBOT_BIN`: sbot executable (default: "sbot")
    /// - `GATEWAY_PUBLIC_DIR`: Static asset directory (default: "public")
    /// - `GATEWAY_VIEWER_BASE`: Viewer mount prefix (default: "/view/")
    /// - `GATEWAY_INVITE_FAILURE`: "exit" or "respond" (default: "exit")
    /// - `METRICS_PORT`: Prometheus endpoint port (default: disabled)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_with_port(None)
    }

    /// Like [`Config::from_env`], with `port` (from the command line) taking
    /// precedence over `HTTP_PORT`.
    pub fn from_env_with_port(port: Option<u16>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("GATEWAY_HOST").unwrap_or(defaults.host);

        let port = match (port, std::env::var("HTTP_PORT")) {
            (Some(port), _) => port,
            (None, Ok(raw)) => raw
                .trim()
                .parse()
                .with_context(|| format!("HTTP_PORT must be a port number, got {raw:?}"))?,
            (None, Err(_)) => defaults.port,
        };

        let sbot_bin = std::env::var("SBOT_BIN")
            .map(PathBuf::from)
            .unwrap_or(defaults.sbot_bin);

        let public_dir = std::env::var("GATEWAY_PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.public_dir);

        let viewer_base = match std::env::var("GATEWAY_VIEWER_BASE") {
            Ok(raw) => normalize_base(&raw)?,
            Err(_) => defaults.viewer_base,
        };

        let invite_failure = match std::env::var("GATEWAY_INVITE_FAILURE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.invite_failure,
        };

        let metrics_port = std::env::var("METRICS_PORT")
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u16>()
                    .with_context(|| format!("METRICS_PORT must be a port number, got {raw:?}"))
            })
            .transpose()?;

        tracing::info!(
            host = %host,
            port,
            sbot_bin = %sbot_bin.display(),
            public_dir = %public_dir.display(),
            viewer_base = %viewer_base,
            invite_failure = ?invite_failure,
            metrics_port = ?metrics_port,
            "gateway configuration loaded"
        );

        Ok(Self {
            host,
            port,
            sbot_bin,
            public_dir,
            viewer_base,
            invite_failure,
            metrics_port,
        })
    }

    /// Socket address string to bind (e.g. "0.0.0.0:80").
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Viewer prefix in the form the router nests under (no trailing slash).
    pub fn viewer_mount(&self) -> &str {
        self.viewer_base.trim_end_matches('/')
    }
}

/// Force a leading and trailing slash. The root path is rejected because the
/// viewer would shadow every other route.
fn normalize_base(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        anyhow::bail!("GATEWAY_VIEWER_BASE must not be the root path");
    }
    Ok(format!("/{trimmed}/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "GATEWAY_HOST",
        "HTTP_PORT",
        "SBOT_BIN",
        "GATEWAY_PUBLIC_DIR",
        "GATEWAY_VIEWER_BASE",
        "GATEWAY_INVITE_FAILURE",
        "METRICS_PORT",
    ];

    /// Helper to run config tests with isolated env vars.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr(), "0.0.0.0:80");
            assert_eq!(config.sbot_bin, PathBuf::from("sbot"));
            assert_eq!(config.public_dir, PathBuf::from("public"));
            assert_eq!(config.viewer_base, "/view/");
            assert_eq!(config.viewer_mount(), "/view");
            assert_eq!(config.invite_failure, InviteFailurePolicy::Exit);
            assert_eq!(config.metrics_port, None);
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("GATEWAY_HOST", "127.0.0.1"),
                ("HTTP_PORT", "8080"),
                ("SBOT_BIN", "/usr/local/bin/ssb-server"),
                ("GATEWAY_PUBLIC_DIR", "/srv/pub/public"),
                ("GATEWAY_INVITE_FAILURE", "respond"),
                ("METRICS_PORT", "9091"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr(), "127.0.0.1:8080");
                assert_eq!(config.sbot_bin, PathBuf::from("/usr/local/bin/ssb-server"));
                assert_eq!(config.public_dir, PathBuf::from("/srv/pub/public"));
                assert_eq!(config.invite_failure, InviteFailurePolicy::Respond);
                assert_eq!(config.metrics_port, Some(9091));
            },
        );
    }

    #[test]
    fn config_port_override_wins() {
        with_env_vars(&[("HTTP_PORT", "8080")], || {
            let config = Config::from_env_with_port(Some(9000)).unwrap();
            assert_eq!(config.port, 9000);
        });
        with_env_vars(&[("HTTP_PORT", "eighty")], || {
            let config = Config::from_env_with_port(Some(9000)).unwrap();
            assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        });
    }

    #[test]
    fn config_invalid_port_rejected() {
        with_env_vars(&[("HTTP_PORT", "eighty")], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("HTTP_PORT"));
        });
    }

    #[test]
    fn config_invalid_metrics_port_rejected() {
        with_env_vars(&[("METRICS_PORT", "70000")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_viewer_base_normalized() {
        with_env_vars(&[("GATEWAY_VIEWER_BASE", "browse")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.viewer_base, "/browse/");
            assert_eq!(config.viewer_mount(), "/browse");
        });
    }

    #[test]
    fn config_viewer_base_root_rejected() {
        with_env_vars(&[("GATEWAY_VIEWER_BASE", "/")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn invite_failure_policy_parsing() {
        assert_eq!("exit".parse::<InviteFailurePolicy>().unwrap(), InviteFailurePolicy::Exit);
        assert_eq!(" Respond ".parse::<InviteFailurePolicy>().unwrap(), InviteFailurePolicy::Respond);
        assert!("retry".parse::<InviteFailurePolicy>().is_err());
    }
}
