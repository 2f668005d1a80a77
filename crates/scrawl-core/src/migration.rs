//! Schema versioning and document migration.
//!
//! Stored documents carry a semantic version string. Loading an older
//! document runs it through the migration chain, which currently only has
//! the 1.0.0 step (fill in every required field with its default). New
//! steps slot in sequentially as the schema evolves.

use crate::document::{generate_document_id, now_millis, Document};
use crate::storage::{Storage, StorageResult};
use serde_json::{json, Value};
use std::cmp::Ordering;

/// Current document schema version.
pub const CURRENT_VERSION: &str = "1.0.0";

/// Compare two dotted version strings numerically, part by part.
/// Missing parts count as zero, so "1.0" == "1.0.0".
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    let pa = parse(a);
    let pb = parse(b);
    for i in 0..pa.len().max(pb.len()) {
        let na = pa.get(i).copied().unwrap_or(0);
        let nb = pb.get(i).copied().unwrap_or(0);
        match na.cmp(&nb) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// Whether a document at the given version needs migrating.
pub fn needs_migration(version: Option<&str>) -> bool {
    match version {
        Some(v) => compare_versions(v, CURRENT_VERSION) == Ordering::Less,
        None => true,
    }
}

/// Migrate a raw JSON document to the current schema.
///
/// Unversioned data is treated as pre-1.0.0. Non-object input is returned
/// untouched; structural validation happens at import, not here.
pub fn migrate_json(value: Value) -> Value {
    let Value::Object(_) = &value else {
        return value;
    };
    let version = value
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or("0.0.0")
        .to_string();

    let mut migrated = value;
    if compare_versions(&version, "1.0.0") == Ordering::Less {
        migrated = migrate_to_v1_0_0(migrated);
    }
    if let Value::Object(map) = &mut migrated {
        map.insert("version".to_string(), json!(CURRENT_VERSION));
    }
    migrated
}

/// The 1.0.0 step: ensure every required field exists.
fn migrate_to_v1_0_0(value: Value) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        other => return other,
    };

    if !map.get("id").is_some_and(Value::is_string) {
        map.insert("id".to_string(), json!(generate_document_id()));
    }
    if !map.get("name").is_some_and(Value::is_string) {
        map.insert("name".to_string(), json!("Untitled Canvas"));
    }
    if !map.get("elements").is_some_and(Value::is_array) {
        map.insert("elements".to_string(), json!([]));
    }
    if !map.get("app_state").is_some_and(Value::is_object) {
        map.insert("app_state".to_string(), json!({}));
    }
    let now = now_millis();
    if !map.get("created_at").is_some_and(Value::is_u64) {
        map.insert("created_at".to_string(), json!(now));
    }
    if !map.get("updated_at").is_some_and(Value::is_u64) {
        map.insert("updated_at".to_string(), json!(now));
    }
    map.insert("version".to_string(), json!("1.0.0"));
    Value::Object(map)
}

/// Bring a deserialized document up to the current version.
/// Returns true if anything changed.
pub fn migrate_document(document: &mut Document) -> bool {
    if needs_migration(Some(&document.version)) {
        document.version = CURRENT_VERSION.to_string();
        return true;
    }
    false
}

/// Migrate every stored document in place; returns how many were updated.
pub async fn migrate_all<S: Storage>(storage: &S) -> StorageResult<usize> {
    let ids = storage.list().await?;
    let mut migrated = 0;
    for id in ids {
        let mut document = match storage.load(&id).await {
            Ok(doc) => doc,
            Err(err) => {
                log::warn!("skipping {id} during migration: {err}");
                continue;
            }
        };
        if migrate_document(&mut document) {
            storage.save(&id, &document).await?;
            migrated += 1;
        }
    }
    if migrated > 0 {
        log::info!("migrated {migrated} documents to version {CURRENT_VERSION}");
    }
    Ok(migrated)
}
