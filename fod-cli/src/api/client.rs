//! HTTP client for the Fortify on Demand REST API.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::ACCEPT;

use super::ImportApi;
use super::directory::UserDirectory;
use super::models::{
    AttributeDefinition, AttributePage, CreateApplicationRequest, DynamicScanSetupRequest,
    ReleasePage, TokenResponse, UserPage,
};

/// Production API host for the AMS tenant region.
pub const DEFAULT_BASE_URL: &str = "https://api.ams.fortify.com";

/// The user listing returns at most this many records per call.
const USER_PAGE_SIZE: u64 = 50;

/// Reqwest-backed API client.
///
/// Authentication happens once per run; the bearer token is then held
/// read-only for every subsequent request. There is no refresh: a token that
/// expires mid-run surfaces as per-row request failures.
#[derive(Debug)]
pub struct FodClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl FodClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Exchange the key/secret pair for a bearer token.
    ///
    /// A response without an `access_token` aborts the run: no request can
    /// proceed without credentials, so this is the one fatal failure mode.
    pub async fn authenticate(&mut self, key: &str, secret: &str) -> Result<()> {
        let url = format!("{}/oauth/token", self.base_url);
        let params = [
            ("scope", "api-tenant"),
            ("grant_type", "client_credentials"),
            ("client_id", key),
            ("client_secret", secret),
        ];

        let text = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .context("token request failed")?
            .text()
            .await
            .context("failed to read token response")?;

        let parsed: TokenResponse = serde_json::from_str(&text)
            .with_context(|| format!("unexpected token response: {text}"))?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => {
                info!("authenticated against {}", self.base_url);
                self.token = Some(token);
                Ok(())
            }
            _ => bail!("authentication failed, no token in response: {text}"),
        }
    }

    fn bearer(&self) -> Result<&str> {
        self.token.as_deref().context("client is not authenticated")
    }

    /// Materialize the full user directory.
    ///
    /// The first page carries the tenant's total user count, which determines
    /// how many further pages to fetch.
    pub async fn fetch_all_users(&self) -> Result<UserDirectory> {
        let mut directory = UserDirectory::new();

        let first = self.fetch_user_page(0).await?;
        let total = first.total_count;
        directory.extend(first.items);

        let pages = total.div_ceil(USER_PAGE_SIZE);
        for page in 1..pages {
            let batch = self.fetch_user_page(page * USER_PAGE_SIZE).await?;
            directory.extend(batch.items);
        }

        debug!(
            "loaded {} users across {} pages",
            directory.len(),
            pages.max(1)
        );
        Ok(directory)
    }

    async fn fetch_user_page(&self, offset: u64) -> Result<UserPage> {
        let url = format!("{}/api/v3/users", self.base_url);
        self.http
            .get(&url)
            .query(&[("offset", offset)])
            .bearer_auth(self.bearer()?)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("user listing at offset {offset} failed"))?
            .json()
            .await
            .with_context(|| format!("unexpected user listing response at offset {offset}"))
    }
}

impl Default for FodClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImportApi for FodClient {
    async fn create_application(&self, request: &CreateApplicationRequest) -> Result<String> {
        let url = format!("{}/api/v3/applications", self.base_url);
        // The status code is deliberately not inspected: the caller logs
        // whatever body came back and decides by parsing it.
        self.http
            .post(&url)
            .bearer_auth(self.bearer()?)
            .json(request)
            .send()
            .await
            .context("application creation request failed")?
            .text()
            .await
            .context("failed to read application creation response")
    }

    async fn first_release_id(&self, application_id: i64) -> Result<i64> {
        let url = format!(
            "{}/api/v3/applications/{application_id}/releases",
            self.base_url
        );
        let page: ReleasePage = self
            .http
            .get(&url)
            .bearer_auth(self.bearer()?)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("release listing for application {application_id} failed"))?
            .json()
            .await
            .with_context(|| {
                format!("unexpected release listing response for application {application_id}")
            })?;

        // The platform creates exactly one release at application creation;
        // the first listed entry is the one just created.
        page.items
            .first()
            .map(|release| release.release_id)
            .with_context(|| format!("application {application_id} has no releases"))
    }

    async fn configure_dynamic_scan(
        &self,
        release_id: i64,
        request: &DynamicScanSetupRequest,
    ) -> Result<String> {
        let url = format!(
            "{}/api/v3/releases/{release_id}/dynamic-scans/scan-setup",
            self.base_url
        );
        self.http
            .put(&url)
            .bearer_auth(self.bearer()?)
            .json(request)
            .send()
            .await
            .with_context(|| format!("scan-setup request for release {release_id} failed"))?
            .text()
            .await
            .context("failed to read scan-setup response")
    }

    async fn attributes_by_name(&self, name: &str) -> Result<Vec<AttributeDefinition>> {
        let url = format!("{}/api/v3/attributes", self.base_url);
        let page: AttributePage = self
            .http
            .get(&url)
            .query(&[("filters", format!("name:{name}"))])
            .bearer_auth(self.bearer()?)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("attribute listing for {name:?} failed"))?
            .json()
            .await
            .with_context(|| format!("unexpected attribute listing response for {name:?}"))?;
        Ok(page.items)
    }
}
