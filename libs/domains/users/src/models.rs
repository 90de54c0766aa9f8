use serde::{Deserialize, Deserializer, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// A user account as seen by API clients.
///
/// Every field tolerates being absent or `null` on input so that missing
/// values are reported by validation with a specific message instead of a
/// generic deserialization error. `password` is write-only: it is accepted on
/// create/update and never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRecord {
    /// Unique, immutable account name
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = "alice")]
    pub username: String,

    /// Plaintext password, input only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(write_only, example = "s3cret")]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,

    /// Role names without the `ROLE_` prefix
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(value_type = Vec<String>, example = json!(["ADMIN", "USER"]))]
    pub authorities: BTreeSet<String>,
}

/// `null` reads as the field's default, same as an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserRecord {
    pub fn new<I, R>(
        username: impl Into<String>,
        password: impl Into<String>,
        enabled: bool,
        roles: I,
    ) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            username: username.into(),
            password: Some(password.into()),
            enabled,
            authorities: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// Stored form of a user: hashed password and prefixed authorities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub enabled: bool,
    /// Authorities with the `ROLE_` prefix, e.g. `ROLE_ADMIN`
    pub authorities: BTreeSet<String>,
}

/// Identity attached to request extensions by the Basic auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    /// Role names without prefix
    pub roles: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let record: UserRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record, UserRecord::default());
        assert!(!record.enabled);
        assert!(record.password.is_none());
    }

    #[test]
    fn test_null_fields_default() {
        let record: UserRecord = serde_json::from_value(json!({
            "username": null,
            "password": null,
            "enabled": null,
            "authorities": null
        }))
        .unwrap();
        assert_eq!(record, UserRecord::default());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let record = UserRecord::new("alice", "s3cret", true, ["USER"]);
        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "alice");
        assert_eq!(value["authorities"], json!(["USER"]));
    }

    #[test]
    fn test_authorities_are_sorted_and_deduplicated() {
        let record: UserRecord =
            serde_json::from_value(json!({"authorities": ["USER", "ADMIN", "USER"]})).unwrap();
        assert_eq!(
            record.authorities.into_iter().collect::<Vec<_>>(),
            vec!["ADMIN", "USER"]
        );
    }
}
