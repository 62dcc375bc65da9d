use crate::error::{NoteError, NoteResult};
use crate::models::{NoteRecord, ProfileId};
use crate::util::now_ms;
use serde::{Deserialize, Serialize};

fn note_key(id: &ProfileId) -> String {
    format!("account_note::{id}")
}

fn local_storage() -> NoteResult<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(NoteError::StorageUnavailable)
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage().ok()?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json)
        .map_err(|e| {
            tracing::warn!(target: "note.storage", key, error = %e, "discarding_unreadable_entry");
        })
        .ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) -> NoteResult<()> {
    let json = serde_json::to_string(value).map_err(|source| NoteError::Encode {
        key: key.to_string(),
        source,
    })?;
    local_storage()?
        .set_item(key, &json)
        .map_err(|_| NoteError::Storage {
            key: key.to_string(),
        })
}

/// The stored note for a profile; an unknown profile has an empty note.
pub(crate) fn load_note(id: &ProfileId) -> String {
    load_json_from_storage::<NoteRecord>(&note_key(id))
        .map(|r| r.value)
        .unwrap_or_default()
}

pub(crate) fn save_note(id: &ProfileId, value: &str) -> NoteResult<()> {
    let record = NoteRecord {
        value: value.to_string(),
        updated_ms: now_ms(),
    };
    save_json_to_storage(&note_key(id), &record)?;
    tracing::debug!(target: "note.storage", profile = %id, len = value.len(), "note_saved");
    Ok(())
}
