use serde::{Deserialize, Serialize};

/// One entry of a caller-supplied watch history.
///
/// History sources disagree on field naming: most report `title`, some
/// report `name`. Both are accepted; anything else on the record is
/// ignored. Entries are ephemeral — supplied per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl HistoryEntry {
    /// Whichever of `title`/`name` is present, `title` winning.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    pub fn titled(title: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: Some(title.into()),
            name: None,
            year,
        }
    }
}
