use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the profile a note is attached to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub username: String,
    pub display_name: String,
}

/// A stored personal note about one profile.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub(crate) struct NoteRecord {
    pub value: String,
    pub updated_ms: i64,
}

/// Profiles the demo app can switch between.
pub(crate) fn demo_profiles() -> Vec<Profile> {
    [
        ("1", "gargron", "Eugen"),
        ("2", "alice", "Alice Liddell"),
        ("3", "bob", "Bob ☕"),
    ]
    .into_iter()
    .map(|(id, username, display_name)| Profile {
        id: id.into(),
        username: username.to_string(),
        display_name: display_name.to_string(),
    })
    .collect()
}
