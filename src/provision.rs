//! Bulk user provisioning.
//!
//! Processes submitted user rows against the identity collaborator:
//! normalize, create the login, then insert the profile row. A bad row
//! never aborts the pass - every row gets its own outcome, and a profile
//! insert failure does not undo the login it follows.

use serde::{Deserialize, Serialize};

use crate::core::{Role, UserId};
use crate::store::{IdentityAdmin, StoreError};

/// One submitted row, fields as received (untrimmed, case unnormalized).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewUserRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
}

/// Profile row written for a created login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub is_active: bool,
}

/// What happened to one row.
#[derive(Clone, Debug)]
pub enum RowOutcome {
    Created { email: String, user_id: UserId },
    SkippedInvalid { row: usize, reason: String },
    AlreadyRegistered { email: String },
    LoginFailed { email: String, error: StoreError },
    ProfileInsertFailed {
        email: String,
        user_id: UserId,
        error: StoreError,
    },
}

/// Per-row outcomes for a whole provisioning pass.
#[derive(Clone, Debug, Default)]
pub struct ProvisionReport {
    pub outcomes: Vec<RowOutcome>,
}

impl ProvisionReport {
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Created { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::SkippedInvalid { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    RowOutcome::AlreadyRegistered { .. }
                        | RowOutcome::LoginFailed { .. }
                        | RowOutcome::ProfileInsertFailed { .. }
                )
            })
            .count()
    }
}

struct NormalizedRow {
    name: String,
    email: String,
    password: String,
    role: Role,
    department: Option<String>,
}

fn normalize(row: &NewUserRow) -> Result<NormalizedRow, String> {
    let name = row.name.trim();
    let email = row.email.trim().to_lowercase();
    let password = row.password.trim();
    let role_raw = row.role.trim();

    if name.is_empty() || email.is_empty() || password.is_empty() || role_raw.is_empty() {
        return Err("missing required field (name, email, password, role)".to_string());
    }
    let role = Role::parse(role_raw).ok_or_else(|| format!("unknown role `{role_raw}`"))?;

    let department = row.department.trim();
    Ok(NormalizedRow {
        name: name.to_string(),
        email,
        password: password.to_string(),
        role,
        department: (!department.is_empty()).then(|| department.to_string()),
    })
}

/// Run a provisioning pass over `rows`.
pub fn provision_users<A: IdentityAdmin>(admin: &mut A, rows: &[NewUserRow]) -> ProvisionReport {
    let mut report = ProvisionReport::default();

    for (idx, raw) in rows.iter().enumerate() {
        let row = match normalize(raw) {
            Ok(row) => row,
            Err(reason) => {
                tracing::warn!(row = idx, %reason, "skipping invalid row");
                report
                    .outcomes
                    .push(RowOutcome::SkippedInvalid { row: idx, reason });
                continue;
            }
        };

        let user_id = match admin.create_login(&row.email, &row.password) {
            Ok(id) => id,
            Err(StoreError::AlreadyRegistered { email }) => {
                tracing::warn!(%email, "login already registered");
                report.outcomes.push(RowOutcome::AlreadyRegistered { email });
                continue;
            }
            Err(error) => {
                tracing::warn!(email = %row.email, %error, "login creation failed");
                report.outcomes.push(RowOutcome::LoginFailed {
                    email: row.email,
                    error,
                });
                continue;
            }
        };

        let profile = UserProfile {
            id: user_id,
            name: row.name,
            email: row.email.clone(),
            role: row.role,
            department: row.department,
            is_active: true,
        };
        match admin.insert_profile(&profile) {
            Ok(()) => {
                tracing::info!(email = %row.email, user = %user_id, "user provisioned");
                report.outcomes.push(RowOutcome::Created {
                    email: row.email,
                    user_id,
                });
            }
            Err(error) => {
                // The login stays; only the profile row is missing.
                tracing::warn!(email = %row.email, %error, "profile insert failed");
                report.outcomes.push(RowOutcome::ProfileInsertFailed {
                    email: row.email,
                    user_id,
                    error,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::MemDirectory;

    fn row(name: &str, email: &str, role: &str) -> NewUserRow {
        NewUserRow {
            name: name.to_string(),
            email: email.to_string(),
            password: "hunter2xx".to_string(),
            role: role.to_string(),
            department: "Operations".to_string(),
        }
    }

    #[test]
    fn pass_creates_valid_rows_and_skips_bad_ones() {
        let mut dir = MemDirectory::default();
        let rows = vec![
            row("Asha", " Asha@Example.COM ", "account_manager"),
            NewUserRow::default(), // everything missing
            row("Lee", "lee@example.com", "astronaut"),
            row("Mona", "mona@example.com", "call_support"),
        ];
        let report = provision_users(&mut dir, &rows);

        assert_eq!(report.created(), 2);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.failed(), 0);

        // Email was trimmed and lowercased before the login was created.
        assert!(dir.logins.contains_key("asha@example.com"));
        let profile = dir
            .profiles
            .iter()
            .find(|p| p.email == "asha@example.com")
            .unwrap();
        assert_eq!(profile.role, Role::AccountManager);
        assert_eq!(profile.department.as_deref(), Some("Operations"));
        assert!(profile.is_active);
    }

    #[test]
    fn duplicate_registration_is_reported_not_fatal() {
        let mut dir = MemDirectory::default();
        let rows = vec![
            row("Asha", "asha@example.com", "sales"),
            row("Asha Again", "asha@example.com", "sales"),
            row("Lee", "lee@example.com", "ceo"),
        ];
        let report = provision_users(&mut dir, &rows);

        assert_eq!(report.created(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.outcomes[1],
            RowOutcome::AlreadyRegistered { .. }
        ));
    }

    #[test]
    fn profile_failure_keeps_the_login() {
        let mut dir = MemDirectory::default();
        dir.fail_profile_insert = Some(StoreError::backend(
            "insert_profile",
            "connection reset",
            true,
        ));
        let report = provision_users(&mut dir, &[row("Asha", "asha@example.com", "coo")]);

        assert_eq!(report.created(), 0);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.outcomes[0],
            RowOutcome::ProfileInsertFailed { .. }
        ));
        assert!(dir.logins.contains_key("asha@example.com"));
        assert!(dir.profiles.is_empty());
    }
}
