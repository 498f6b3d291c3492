use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use tracing::instrument;
use url::Url;
use zeroize::Zeroizing;

use crate::{
    entities::project::{NewProject, Project},
    errors::StoreError,
    repositories::project::{ListOrder, ProjectStore},
    settings::AppConfig,
};

/// PostgREST client for the hosted `projects` table.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    table_url: Url,
    api_key: Zeroizing<String>,
}

/// Error body PostgREST sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl SupabaseStore {
    pub fn new(
        base_url: &str,
        api_key: &str,
        table: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let base = Url::parse(base_url)
            .map_err(|e| StoreError::NotConfigured(format!("invalid store URL {base_url}: {e}")))?;
        let path = format!(
            "{}/rest/v1/{}",
            base.path().trim_end_matches('/'),
            urlencoding::encode(table)
        );
        let mut table_url = base;
        table_url.set_path(&path);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(SupabaseStore {
            client,
            table_url,
            api_key: Zeroizing::new(api_key.to_string()),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let timeout = config
            .request_timeout()
            .map_err(|e| StoreError::NotConfigured(e.to_string()))?;
        Self::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            &config.projects_table,
            timeout,
        )
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
    }
}

async fn into_store_error(response: Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(err) => {
            tracing::debug!(code = ?err.code, details = ?err.details, hint = ?err.hint, "Store rejected request");
            err.message.unwrap_or_else(|| fallback_message(status, &body))
        }
        Err(_) => fallback_message(status, &body),
    };
    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        body.trim().to_string()
    }
}

#[async_trait]
impl ProjectStore for SupabaseStore {
    #[instrument(skip(self))]
    async fn select_projects(&self, order: &ListOrder) -> Result<Vec<Project>, StoreError> {
        let response = self
            .authorized(self.client.get(self.table_url.clone()))
            .query(&[("select", "*".to_string()), ("order", order.to_query_value())])
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(into_store_error(response).await);
        }

        let body = response.bytes().await?;
        let projects: Vec<Project> = serde_json::from_slice(&body)?;
        Ok(projects)
    }

    #[instrument(skip(self, project), fields(title = %project.title))]
    async fn insert_project(&self, project: &NewProject) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url.clone()))
            .header("Prefer", "return=minimal")
            .json(project)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(into_store_error(response).await);
        }
        Ok(())
    }
}
