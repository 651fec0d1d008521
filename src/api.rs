//! REST client for the tender backend.
//!
//! Mutations follow a fire-and-refetch pattern: the app re-fetches the full
//! tender list and the distinct customer list after any create/update/delete
//! rather than patching state incrementally.  A fetch failure surfaces on
//! the dashboard notice bar with prior data retained; there is no retry
//! loop.

use serde::Deserialize;

use crate::model::{Tender, TenderDraft, TenderId};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status} for {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },
}

#[derive(Debug, Deserialize)]
struct CustomerList {
    #[serde(default)]
    customers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(resp: reqwest::Response, endpoint: &str) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(ApiError::Status {
                status: resp.status(),
                endpoint: endpoint.to_string(),
            })
        }
    }

    /// `GET /tenders` — the full tender collection.
    pub async fn list_tenders(&self) -> Result<Vec<Tender>, ApiError> {
        let resp = self.client.get(self.url("/tenders")).send().await?;
        let resp = Self::check(resp, "/tenders").await?;
        Ok(resp.json().await?)
    }

    /// `GET /tenders/filters/customers` — distinct customer names.
    pub async fn list_customers(&self) -> Result<Vec<String>, ApiError> {
        let resp = self
            .client
            .get(self.url("/tenders/filters/customers"))
            .send()
            .await?;
        let resp = Self::check(resp, "/tenders/filters/customers").await?;
        let list: CustomerList = resp.json().await?;
        Ok(list.customers)
    }

    /// `POST /tenders` — create from a form draft.
    pub async fn create_tender(&self, draft: &TenderDraft) -> Result<Tender, ApiError> {
        let resp = self
            .client
            .post(self.url("/tenders"))
            .json(draft)
            .send()
            .await?;
        let resp = Self::check(resp, "/tenders").await?;
        Ok(resp.json().await?)
    }

    /// `PUT /tenders/{id}` — update an existing record.
    pub async fn update_tender(
        &self,
        id: &TenderId,
        draft: &TenderDraft,
    ) -> Result<Tender, ApiError> {
        let endpoint = format!("/tenders/{}", id.as_str());
        let resp = self
            .client
            .put(self.url(&endpoint))
            .json(draft)
            .send()
            .await?;
        let resp = Self::check(resp, &endpoint).await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /tenders/{id}`.
    pub async fn delete_tender(&self, id: &TenderId) -> Result<(), ApiError> {
        let endpoint = format!("/tenders/{}", id.as_str());
        let resp = self.client.delete(self.url(&endpoint)).send().await?;
        Self::check(resp, &endpoint).await?;
        Ok(())
    }
}
