//! Conversion between [`UserRecord`] and [`Principal`].

use std::collections::BTreeSet;

use crate::models::{Principal, UserRecord};

/// Namespace prepended to every stored authority
pub const ROLE_PREFIX: &str = "ROLE_";

/// Role name with surrounding whitespace and any `ROLE_` prefix removed.
///
/// `None` for names that are blank once stripped, including a bare `ROLE_`.
pub fn role_name(role: &str) -> Option<&str> {
    let role = role.trim();
    let name = role.strip_prefix(ROLE_PREFIX).unwrap_or(role).trim();
    (!name.is_empty()).then_some(name)
}

/// `ADMIN` -> `ROLE_ADMIN`; already-prefixed names keep a single prefix and
/// blank names are dropped
pub fn to_authorities<'a>(roles: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
    roles
        .into_iter()
        .filter_map(|role| role_name(role))
        .map(|name| format!("{ROLE_PREFIX}{name}"))
        .collect()
}

/// `ROLE_ADMIN` -> `ADMIN`
pub fn to_roles<'a>(authorities: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
    authorities
        .into_iter()
        .map(|authority| {
            authority
                .strip_prefix(ROLE_PREFIX)
                .unwrap_or(authority)
                .to_string()
        })
        .collect()
}

/// Build a storable principal from a validated record and its password hash
pub fn to_principal(record: &UserRecord, password_hash: String) -> Principal {
    Principal {
        username: record.username.clone(),
        password_hash,
        enabled: record.enabled,
        authorities: to_authorities(&record.authorities),
    }
}

/// Output record; the password is dropped
impl From<Principal> for UserRecord {
    fn from(principal: Principal) -> Self {
        Self {
            authorities: to_roles(&principal.authorities),
            username: principal.username,
            password: None,
            enabled: principal.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_to_authorities_adds_prefix_once() {
        let roles = set(&["ADMIN", "ROLE_USER", " AUDITOR ", ""]);
        assert_eq!(
            to_authorities(&roles),
            set(&["ROLE_ADMIN", "ROLE_AUDITOR", "ROLE_USER"])
        );
    }

    #[test]
    fn test_bare_prefix_is_not_a_role() {
        assert_eq!(role_name("ROLE_"), None);
        assert_eq!(role_name(" ROLE_ "), None);
        assert_eq!(role_name("ROLE_ADMIN"), Some("ADMIN"));
        assert_eq!(to_authorities(&set(&["ROLE_", "USER"])), set(&["ROLE_USER"]));
        assert!(to_authorities(&set(&["ROLE_"])).is_empty());
    }

    #[test]
    fn test_principal_to_record_strips_prefix_and_password() {
        let principal = Principal {
            username: "alice".to_string(),
            password_hash: "$argon2id$...".to_string(),
            enabled: true,
            authorities: set(&["ROLE_ADMIN", "ROLE_USER"]),
        };

        let record = UserRecord::from(principal);
        assert_eq!(record.username, "alice");
        assert!(record.enabled);
        assert!(record.password.is_none());
        assert_eq!(record.authorities, set(&["ADMIN", "USER"]));
    }

    #[test]
    fn test_record_principal_record_keeps_roles() {
        let record = UserRecord::new("bob", "pw", false, ["USER", "OPS"]);
        let principal = to_principal(&record, "hash".to_string());

        assert_eq!(principal.password_hash, "hash");
        assert_eq!(principal.authorities, set(&["ROLE_OPS", "ROLE_USER"]));
        assert_eq!(UserRecord::from(principal).authorities, record.authorities);
    }
}
