//! Save migrations - upgrade older documents to the current version.
//!
//! Migrations operate on the raw JSON value before it is decoded, so a
//! document only has to be valid for its own version.

use serde_json::Value;
use tracing::info;

use super::{SaveError, SAVE_VERSION};

/// Rewrites a document of version `from` into version `to`.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub from: u32,
    pub to: u32,
    pub apply: fn(Value) -> Result<Value, SaveError>,
}

/// Known migrations. The entry of the current version is the identity.
pub const MIGRATIONS: &[Migration] = &[Migration {
    from: 1,
    to: 1,
    apply: identity,
}];

fn identity(document: Value) -> Result<Value, SaveError> {
    Ok(document)
}

/// Bring a document of `version` up to the current version.
pub fn migrate(document: Value, version: u32) -> Result<Value, SaveError> {
    migrate_with(MIGRATIONS, document, version, SAVE_VERSION)
}

pub(crate) fn migrate_with(
    table: &[Migration],
    mut document: Value,
    mut version: u32,
    target: u32,
) -> Result<Value, SaveError> {
    if version > target {
        return Err(SaveError::SchemaVersion {
            found: u64::from(version),
            supported: target,
        });
    }

    loop {
        let step = table
            .iter()
            .find(|migration| migration.from == version)
            .ok_or_else(|| {
                SaveError::malformed("version", format!("no migration from version {version}"))
            })?;
        document = (step.apply)(document)?;

        if step.to == version {
            break;
        }
        if step.to < version || step.to > target {
            return Err(SaveError::malformed(
                "version",
                format!("migration from {version} leads to version {}", step.to),
            ));
        }
        info!(from = version, to = step.to, "migrated save document");
        version = step.to;
    }

    if version != target {
        return Err(SaveError::malformed(
            "version",
            format!("migrations stopped at version {version}"),
        ));
    }
    if let Value::Object(map) = &mut document {
        map.insert("version".to_string(), Value::from(target));
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rename_steps(mut document: Value) -> Result<Value, SaveError> {
        if let Some(history) = document.get_mut("steps").map(Value::take) {
            document["history"] = history;
        }
        Ok(document)
    }

    #[test]
    fn test_current_version_is_identity() {
        let document = json!({"version": 1, "history": []});
        let migrated = migrate(document.clone(), 1).unwrap();
        assert_eq!(migrated, document);
    }

    #[test]
    fn test_unknown_version_is_malformed() {
        let result = migrate(json!({"version": 0}), 0);
        assert!(matches!(result, Err(SaveError::Malformed { path, .. }) if path == "version"));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let result = migrate(json!({"version": 2}), 2);
        assert!(matches!(
            result,
            Err(SaveError::SchemaVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn test_migrations_run_in_sequence() {
        let table = [
            Migration { from: 1, to: 2, apply: rename_steps },
            Migration { from: 2, to: 2, apply: identity },
        ];

        let migrated = migrate_with(&table, json!({"version": 1, "steps": [1, 2]}), 1, 2).unwrap();

        assert_eq!(migrated["version"], 2);
        assert_eq!(migrated["history"], json!([1, 2]));
    }

    #[test]
    fn test_migration_must_move_forward() {
        let table = [Migration { from: 1, to: 3, apply: identity }];
        let result = migrate_with(&table, json!({}), 1, 2);
        assert!(matches!(result, Err(SaveError::Malformed { .. })));
    }
}
