// file: src/database/memory.rs
// description: in-process membership store backing dry runs and tests

use crate::database::store::{ChapterDirectory, MemberCreator};
use crate::error::StoreError;
use crate::models::{Chapter, Member, NewMember};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryMembershipStore {
    chapters: Vec<Chapter>,
    members: Mutex<Vec<Member>>,
    failures: HashMap<String, String>,
    next_id: AtomicU64,
}

impl InMemoryMembershipStore {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self {
            chapters,
            ..Self::default()
        }
    }

    /// Makes every `create` for `email` fail with `message`.
    pub fn with_failure(mut self, email: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(email.into(), message.into());
        self
    }

    pub async fn members(&self) -> Vec<Member> {
        self.members.lock().await.clone()
    }

    pub async fn member_count(&self) -> usize {
        self.members.lock().await.len()
    }
}

#[async_trait]
impl ChapterDirectory for InMemoryMembershipStore {
    async fn list_chapters(&self) -> Result<Vec<Chapter>, StoreError> {
        Ok(self.chapters.clone())
    }
}

#[async_trait]
impl MemberCreator for InMemoryMembershipStore {
    async fn create(&self, member: &NewMember) -> Result<Member, StoreError> {
        if let Some(message) = self.failures.get(&member.email) {
            return Err(StoreError::Rejected(message.clone()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Member {
            id: format!("mem-{}", id),
            fields: member.clone(),
            join_date: Some(Utc::now().date_naive().format("%Y-%m-%d").to_string()),
        };

        self.members.lock().await.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberRole, Status};

    fn member(email: &str) -> NewMember {
        NewMember {
            name: "Jane Roe".to_string(),
            email: email.to_string(),
            business_name: "Roe Supply".to_string(),
            phone: "555 0100".to_string(),
            chapter_name: "Downtown Chapter".to_string(),
            member_role: MemberRole::Regular,
            membership_end_date: "2025-06-30".to_string(),
            status: Status::Active,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = InMemoryMembershipStore::new(vec![]);
        let first = store.create(&member("a@example.com")).await.unwrap();
        let second = store.create(&member("a@example.com")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.member_count().await, 2);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let store = InMemoryMembershipStore::new(vec![])
            .with_failure("bad@example.com", "duplicate key");

        let err = store.create(&member("bad@example.com")).await.unwrap_err();
        assert_eq!(err, StoreError::Rejected("duplicate key".to_string()));
        assert_eq!(store.member_count().await, 0);
    }

    #[tokio::test]
    async fn test_lists_seeded_chapters() {
        let store = InMemoryMembershipStore::new(vec![Chapter::new("North", Status::Active)]);
        let chapters = store.list_chapters().await.unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].name, "North");
    }
}
