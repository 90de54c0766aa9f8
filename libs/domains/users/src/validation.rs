//! Required-field checks for incoming user records.

use crate::error::{UserError, UserResult};
use crate::mapper::role_name;
use crate::models::UserRecord;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a record for the fields every create/update needs.
///
/// Checks run in a fixed order and the first failure wins: username,
/// then password, then authorities. Blank role names, and a bare
/// `ROLE_` prefix, do not count towards the authority set.
pub fn validate(record: &UserRecord) -> UserResult<()> {
    if is_blank(&record.username) {
        return Err(UserError::InvalidUser("Username cannot be empty".to_string()));
    }

    if record.password.as_deref().is_none_or(is_blank) {
        return Err(UserError::InvalidUser("Password cannot be empty".to_string()));
    }

    if record.authorities.iter().all(|role| role_name(role).is_none()) {
        return Err(UserError::InvalidUser("Authorities cannot be empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(record: &UserRecord) -> String {
        match validate(record) {
            Err(UserError::InvalidUser(msg)) => msg,
            other => panic!("expected InvalidUser, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(validate(&UserRecord::new("alice", "pw", false, ["USER"])).is_ok());
    }

    #[test]
    fn test_blank_username() {
        let record = UserRecord::new("   ", "pw", true, ["USER"]);
        assert_eq!(message(&record), "Username cannot be empty");
    }

    #[test]
    fn test_missing_or_blank_password() {
        let mut record = UserRecord::new("alice", "", true, ["USER"]);
        assert_eq!(message(&record), "Password cannot be empty");

        record.password = None;
        assert_eq!(message(&record), "Password cannot be empty");
    }

    #[test]
    fn test_empty_authorities() {
        let record = UserRecord::new("alice", "pw", true, Vec::<String>::new());
        assert_eq!(message(&record), "Authorities cannot be empty");

        let record = UserRecord::new("alice", "pw", true, [" "]);
        assert_eq!(message(&record), "Authorities cannot be empty");

        let record = UserRecord::new("alice", "pw", true, ["ROLE_"]);
        assert_eq!(message(&record), "Authorities cannot be empty");
    }

    #[test]
    fn test_username_checked_before_other_fields() {
        assert_eq!(message(&UserRecord::default()), "Username cannot be empty");

        let record = UserRecord {
            username: "alice".to_string(),
            ..Default::default()
        };
        assert_eq!(message(&record), "Password cannot be empty");
    }
}
