//! HTTP Basic authentication settings and the optional bootstrap account.

use crate::{env_optional, env_or_default, ConfigError, FromEnv};
use std::fmt;

/// Credentials for the account created on first start.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

// Never print the password, even in debug logs
impl fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Realm advertised in `WWW-Authenticate` challenges
    pub realm: String,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm: "accounts".to_string(),
            bootstrap_admin: None,
        }
    }
}

impl FromEnv for AuthConfig {
    /// - AUTH_REALM: defaults to "accounts"
    /// - ADMIN_USERNAME / ADMIN_PASSWORD: both or neither
    fn from_env() -> Result<Self, ConfigError> {
        let realm = env_or_default("AUTH_REALM", "accounts");

        let username = env_optional("ADMIN_USERNAME");
        let password = env_optional("ADMIN_PASSWORD");

        let bootstrap_admin = match (username, password) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string())),
            (None, Some(_)) => return Err(ConfigError::MissingEnvVar("ADMIN_USERNAME".to_string())),
        };

        Ok(Self {
            realm,
            bootstrap_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        temp_env::with_vars(
            [
                ("AUTH_REALM", None::<&str>),
                ("ADMIN_USERNAME", None::<&str>),
                ("ADMIN_PASSWORD", None::<&str>),
            ],
            || {
                let config = AuthConfig::from_env().unwrap();
                assert_eq!(config.realm, "accounts");
                assert!(config.bootstrap_admin.is_none());
            },
        );
    }

    #[test]
    fn test_auth_config_with_bootstrap_admin() {
        temp_env::with_vars(
            [
                ("ADMIN_USERNAME", Some("admin")),
                ("ADMIN_PASSWORD", Some("password")),
            ],
            || {
                let admin = AuthConfig::from_env().unwrap().bootstrap_admin.unwrap();
                assert_eq!(admin.username, "admin");
                assert_eq!(admin.password, "password");
            },
        );
    }

    #[test]
    fn test_auth_config_requires_both_admin_vars() {
        temp_env::with_vars(
            [("ADMIN_USERNAME", Some("admin")), ("ADMIN_PASSWORD", None)],
            || {
                let err = AuthConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("ADMIN_PASSWORD"));
            },
        );
    }

    #[test]
    fn test_bootstrap_admin_debug_redacts_password() {
        let admin = BootstrapAdmin {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", admin);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
