// file: src/database/store.rs
// description: collaborator interfaces the import pipeline consumes from the membership store

use crate::error::StoreError;
use crate::models::{Chapter, Member, NewMember};
use async_trait::async_trait;

/// Read-only view of the known chapters.
#[async_trait]
pub trait ChapterDirectory: Send + Sync {
    async fn list_chapters(&self) -> Result<Vec<Chapter>, StoreError>;
}

/// One-record-at-a-time member creation.
#[async_trait]
pub trait MemberCreator: Send + Sync {
    async fn create(&self, member: &NewMember) -> Result<Member, StoreError>;
}
