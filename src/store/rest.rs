//! Hosted store gateway
//!
//! Talks to the hosted record store's PostgREST-style API: collection
//! endpoints under `/rest/v1/{table}`, an `apikey` header plus bearer token,
//! merge-duplicates upserts, and `?{col}=eq.{value}` filters for targeted
//! writes. Categories are fetched already ordered by sector then name; the
//! aggregation layer preserves that ordering rather than re-sorting.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::model::{Partner, SectorMeta};
use crate::store::gateway::RepositoryGateway;
use crate::store::rows::{AssignmentRow, CategoryRow, DossierRow};
use crate::types::{DiiwaanError, Result};

const DOSSIER_TABLE: &str = "dossiers";
const CATEGORY_TABLE: &str = "archive_categories";
const ASSIGNMENT_TABLE: &str = "archive_assignments";
const PARTNER_TABLE: &str = "archive_partners";
const SECTOR_TABLE: &str = "archive_sectors";

/// Configuration for the hosted store connection
#[derive(Debug, Clone)]
pub struct RestGatewayConfig {
    /// Store base URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token
    pub api_key: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Repository gateway over the hosted store's REST API
pub struct RestGateway {
    config: RestGatewayConfig,
    client: reqwest::Client,
}

impl RestGateway {
    /// Create a gateway from config. Fails only on invalid client setup;
    /// connectivity problems surface per request.
    pub fn new(config: RestGatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DiiwaanError::Config(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { config, client })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url.trim_end_matches('/'), table)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// GET a whole table, with optional PostgREST query suffix
    async fn fetch_table<T: DeserializeOwned>(&self, table: &str, query: &str) -> Result<Vec<T>> {
        let url = format!("{}?select=*{}", self.table_url(table), query);
        debug!(table, "fetching rows from store");

        let response = self.authed(self.client.get(&url)).send().await?;
        if !response.status().is_success() {
            return Err(DiiwaanError::Store(format!(
                "HTTP {} fetching {}",
                response.status(),
                table
            )));
        }

        Ok(response.json::<Vec<T>>().await?)
    }

    /// POST an upsert with merge-duplicates resolution, returning the
    /// written representation
    async fn upsert_row<T: Serialize + DeserializeOwned>(&self, table: &str, row: &T) -> Result<T> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[row])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiiwaanError::Store(format!(
                "HTTP {} upserting into {}",
                response.status(),
                table
            )));
        }

        let mut written: Vec<T> = response.json().await?;
        written
            .pop()
            .ok_or_else(|| DiiwaanError::Store(format!("empty upsert response from {}", table)))
    }

    /// DELETE rows matching a single-column equality filter
    async fn delete_rows(&self, table: &str, column: &str, value: &str) -> Result<()> {
        let url = format!(
            "{}?{}=eq.{}",
            self.table_url(table),
            column,
            urlencoding::encode(value)
        );

        let response = self.authed(self.client.delete(&url)).send().await?;
        if !response.status().is_success() {
            return Err(DiiwaanError::Store(format!(
                "HTTP {} deleting from {}",
                response.status(),
                table
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RepositoryGateway for RestGateway {
    async fn fetch_dossiers(&self) -> Result<Vec<DossierRow>> {
        self.fetch_table(DOSSIER_TABLE, "").await
    }

    async fn fetch_categories(&self) -> Result<Vec<CategoryRow>> {
        self.fetch_table(CATEGORY_TABLE, "&order=section_type,category_name")
            .await
    }

    async fn fetch_assignments(&self) -> Result<Vec<AssignmentRow>> {
        self.fetch_table(ASSIGNMENT_TABLE, "&order=id").await
    }

    async fn fetch_partners(&self) -> Result<Vec<Partner>> {
        self.fetch_table(PARTNER_TABLE, "&order=name").await
    }

    async fn fetch_sector_meta(&self) -> Result<Vec<SectorMeta>> {
        self.fetch_table(SECTOR_TABLE, "&order=id").await
    }

    async fn upsert_dossier(&self, row: DossierRow) -> Result<String> {
        let written = self.upsert_row(DOSSIER_TABLE, &row).await?;
        written
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DiiwaanError::Store("store returned dossier without id".into()))
    }

    async fn delete_dossier(&self, id: &str) -> Result<()> {
        self.delete_rows(DOSSIER_TABLE, "id", id).await
    }

    async fn upsert_assignments(&self, profile_id: &str, rows: Vec<AssignmentRow>) -> Result<()> {
        // Replace semantics: clear the profile's rows, then write the new list
        self.delete_rows(ASSIGNMENT_TABLE, "user_id", profile_id)
            .await?;

        if rows.is_empty() {
            return Ok(());
        }

        let rows: Vec<AssignmentRow> = rows
            .into_iter()
            .map(|mut row| {
                row.user_id = Some(profile_id.to_string());
                row
            })
            .collect();

        let response = self
            .authed(self.client.post(self.table_url(ASSIGNMENT_TABLE)))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&rows)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DiiwaanError::Store(format!(
                "HTTP {} writing assignments for {}",
                response.status(),
                profile_id
            )));
        }
        Ok(())
    }

    async fn upsert_category(&self, row: CategoryRow) -> Result<i64> {
        let written = self.upsert_row(CATEGORY_TABLE, &row).await?;
        written
            .id
            .ok_or_else(|| DiiwaanError::Store("store returned category without id".into()))
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.delete_rows(CATEGORY_TABLE, "id", &id.to_string()).await
    }

    async fn upsert_partner(&self, partner: Partner) -> Result<String> {
        let written = self.upsert_row(PARTNER_TABLE, &partner).await?;
        if written.id.is_empty() {
            return Err(DiiwaanError::Store("store returned partner without id".into()));
        }
        Ok(written.id)
    }

    async fn delete_partner(&self, id: &str) -> Result<()> {
        self.delete_rows(PARTNER_TABLE, "id", id).await
    }

    async fn upsert_sector_meta(&self, meta: SectorMeta) -> Result<()> {
        self.upsert_row(SECTOR_TABLE, &meta).await.map(|_| ())
    }
}
