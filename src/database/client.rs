// file: src/database/client.rs
// description: REST client for the hosted membership database
// reference: https://docs.rs/reqwest, PostgREST conventions

use crate::config::StoreConfig;
use crate::database::store::{ChapterDirectory, MemberCreator};
use crate::error::{ImportError, Result, StoreError};
use crate::models::{Chapter, Member, MemberRole, NewMember, Status};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Serialize)]
struct MemberInsert<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    business_name: &'a str,
    chapter_name: &'a str,
    member_role: MemberRole,
    membership_end_date: &'a str,
    status: Status,
}

impl<'a> From<&'a NewMember> for MemberInsert<'a> {
    fn from(member: &'a NewMember) -> Self {
        Self {
            name: &member.name,
            email: &member.email,
            phone: &member.phone,
            business_name: &member.business_name,
            chapter_name: &member.chapter_name,
            member_role: member.member_role,
            membership_end_date: &member.membership_end_date,
            status: member.status,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MemberRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    business_name: String,
    chapter_name: String,
    member_role: MemberRole,
    membership_end_date: String,
    status: Status,
    #[serde(default)]
    join_date: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: row.id,
            fields: NewMember {
                name: row.name,
                email: row.email,
                business_name: row.business_name,
                phone: row.phone,
                chapter_name: row.chapter_name,
                member_role: row.member_role,
                membership_end_date: row.membership_end_date,
                status: row.status,
            },
            join_date: row.join_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChapterRow {
    id: String,
    name: String,
    status: Status,
    #[serde(default)]
    member_count: Option<u64>,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter {
            id: Some(row.id),
            name: row.name,
            status: row.status,
            member_count: row.member_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    details: Option<String>,
}

#[derive(Clone)]
pub struct RestMembershipStore {
    client: Client,
    config: StoreConfig,
}

impl RestMembershipStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        info!("Connecting to membership store at {}", config.url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImportError::Store(StoreError::Transport(e.to_string())))?;

        Ok(Self { client, config })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.api_key() {
            Some(key) => request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    /// Round-trips a minimal chapters query and returns how long it took.
    pub async fn ping(&self) -> Result<Duration> {
        debug!("Checking membership store connection");
        let started = Instant::now();

        let request = self
            .client
            .get(self.table_url(&self.config.chapters_table))
            .query(&[("select", "id"), ("limit", "1")]);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        check_status(response).await?;

        Ok(started.elapsed())
    }
}

#[async_trait]
impl ChapterDirectory for RestMembershipStore {
    async fn list_chapters(&self) -> std::result::Result<Vec<Chapter>, StoreError> {
        let request = self
            .client
            .get(self.table_url(&self.config.chapters_table))
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let rows: Vec<ChapterRow> = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        debug!("Fetched {} chapters", rows.len());
        Ok(rows.into_iter().map(Chapter::from).collect())
    }
}

#[async_trait]
impl MemberCreator for RestMembershipStore {
    async fn create(&self, member: &NewMember) -> std::result::Result<Member, StoreError> {
        let request = self
            .client
            .post(self.table_url(&self.config.members_table))
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(&MemberInsert::from(member));

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let row: MemberRow = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        debug!("Created member {} ({})", row.name, row.id);
        Ok(row.into())
    }
}

async fn check_status(response: Response) -> std::result::Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(StoreError::Rejected(rejection_message(status.as_u16(), &body)))
}

/// Prefers the server's own message so row failures read like the database error.
fn rejection_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message: Some(message),
            details,
        }) => match details {
            Some(details) if !details.is_empty() => format!("{} ({})", message, details),
            _ => message,
        },
        _ if body.trim().is_empty() => format!("request failed with status {}", status),
        _ => format!("request failed with status {}: {}", status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn store_with_url(url: &str) -> RestMembershipStore {
        let mut config = Config::default_config().store;
        config.url = url.to_string();
        RestMembershipStore::new(config).unwrap()
    }

    #[test]
    fn test_empty_api_key_sends_no_auth_headers() {
        let mut config = Config::default_config().store;
        config.api_key = Some(String::new());
        let store = RestMembershipStore::new(config).unwrap();

        let request = store
            .authorize(store.client.get(store.table_url("chapters")))
            .build()
            .unwrap();
        assert!(request.headers().get("apikey").is_none());
        assert!(request.headers().get("Authorization").is_none());
    }

    #[test]
    fn test_api_key_sets_auth_headers() {
        let mut config = Config::default_config().store;
        config.api_key = Some("service-key".to_string());
        let store = RestMembershipStore::new(config).unwrap();

        let request = store
            .authorize(store.client.get(store.table_url("chapters")))
            .build()
            .unwrap();
        assert_eq!(request.headers()["apikey"], "service-key");
        assert_eq!(request.headers()["Authorization"], "Bearer service-key");
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = store_with_url("https://db.example.org/");
        assert_eq!(
            store.table_url("members"),
            "https://db.example.org/rest/v1/members"
        );
    }

    #[test]
    fn test_rejection_message_uses_server_message() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint \"members_email_key\"","details":null}"#;
        assert_eq!(
            rejection_message(409, body),
            "duplicate key value violates unique constraint \"members_email_key\""
        );
    }

    #[test]
    fn test_rejection_message_appends_details() {
        let body = r#"{"message":"invalid input value","details":"member_role"}"#;
        assert_eq!(
            rejection_message(400, body),
            "invalid input value (member_role)"
        );
    }

    #[test]
    fn test_rejection_message_falls_back_to_status() {
        assert_eq!(rejection_message(502, ""), "request failed with status 502");
        assert_eq!(
            rejection_message(500, "upstream down"),
            "request failed with status 500: upstream down"
        );
    }

    #[test]
    fn test_insert_payload_uses_column_names() {
        let member = NewMember {
            name: "Jane Roe".to_string(),
            email: "jane@example.com".to_string(),
            business_name: "Roe Supply".to_string(),
            phone: "555 0100".to_string(),
            chapter_name: "Downtown Chapter".to_string(),
            member_role: MemberRole::Leadership,
            membership_end_date: "2025-06-30".to_string(),
            status: Status::Active,
        };

        let value = serde_json::to_value(MemberInsert::from(&member)).unwrap();
        assert_eq!(value["business_name"], "Roe Supply");
        assert_eq!(value["chapter_name"], "Downtown Chapter");
        assert_eq!(value["member_role"], "leadership");
        assert_eq!(value["membership_end_date"], "2025-06-30");
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn test_member_row_conversion() {
        let body = r#"{"id":"m-1","name":"Jane Roe","email":"jane@example.com","phone":"555","business_name":"Roe Supply","chapter_name":"Downtown Chapter","member_role":"gold","membership_end_date":"2025-06-30","status":"inactive","join_date":"2024-01-01","profile_image":null}"#;
        let member: Member = serde_json::from_str::<MemberRow>(body).unwrap().into();
        assert_eq!(member.id, "m-1");
        assert_eq!(member.fields.member_role, MemberRole::Gold);
        assert_eq!(member.fields.status, Status::Inactive);
        assert_eq!(member.join_date.as_deref(), Some("2024-01-01"));
    }
}
