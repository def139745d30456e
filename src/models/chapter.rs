// file: src/models/chapter.rs
// description: chapter directory entries used for chapter-name validation

use crate::models::member::Status;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub status: Status,
    #[serde(default)]
    pub member_count: Option<u64>,
}

impl Chapter {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            id: None,
            name: name.into(),
            status,
            member_count: None,
        }
    }
}
