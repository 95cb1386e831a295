// # Contacts API Client
//
// HTTP client for the contact book REST API.
//
// ## Behavior
//
// - One HTTP request per call, no retries, no caching
// - Any non-success status is a failure; the message is taken from the
//   `{"error": ...}` body when present
// - Timeouts come from `ClientConfig::request_timeout_secs`
//
// ## API Reference
//
// - List: GET `{base}/contacts?q=...`
// - Create: POST `{base}/contacts`
// - Update: PUT `{base}/contacts/:id`
// - Delete: DELETE `{base}/contacts/:id`

use async_trait::async_trait;
use contacts_core::config::ClientConfig;
use contacts_core::{Contact, ContactDraft, ContactId, Error, Result};
use serde::Deserialize;

/// Operations the screen controller needs from the backend
///
/// Implemented over HTTP by [`HttpContactsApi`]; tests substitute their own.
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// Fetch the contact list; an empty `query` means unfiltered
    async fn list(&self, query: &str) -> Result<Vec<Contact>>;

    /// Create a contact
    async fn create(&self, draft: &ContactDraft) -> Result<Contact>;

    /// Update a contact; `None` when the server did not know the id
    async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Option<Contact>>;

    /// Delete a contact
    async fn delete(&self, id: ContactId) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed [`ContactsApi`]
#[derive(Debug, Clone)]
pub struct HttpContactsApi {
    /// `{api_base_url}/contacts`
    contacts_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl HttpContactsApi {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            contacts_url: format!("{}/contacts", config.api_base_url.trim_end_matches('/')),
            client,
        })
    }

    /// Create a client for `api_base_url` with default settings
    pub fn with_base_url(api_base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ClientConfig {
            api_base_url: api_base_url.into(),
            ..ClientConfig::default()
        })
    }

    fn contact_url(&self, id: ContactId) -> String {
        format!("{}/{}", self.contacts_url, id)
    }

    /// Send a request and turn a non-success status into `Error::Api`
    ///
    /// `fallback` is used when the error body carries no message.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => fallback.to_string(),
        };
        tracing::warn!("API call failed ({}): {}", status, message);
        Err(Error::api(status.as_u16(), message))
    }
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    async fn list(&self, query: &str) -> Result<Vec<Contact>> {
        let mut request = self.client.get(&self.contacts_url);
        if !query.is_empty() {
            request = request.query(&[("q", query)]);
        }

        let response = self.execute(request, "Failed to fetch contacts").await?;
        response
            .json()
            .await
            .map_err(|e| Error::http(format!("Failed to parse contact list: {}", e)))
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact> {
        let request = self.client.post(&self.contacts_url).json(draft);

        let response = self.execute(request, "Failed to add contact").await?;
        response
            .json()
            .await
            .map_err(|e| Error::http(format!("Failed to parse created contact: {}", e)))
    }

    async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Option<Contact>> {
        let request = self.client.put(self.contact_url(id)).json(draft);

        let response = self.execute(request, "Failed to update contact").await?;
        response
            .json()
            .await
            .map_err(|e| Error::http(format!("Failed to parse updated contact: {}", e)))
    }

    async fn delete(&self, id: ContactId) -> Result<()> {
        let request = self.client.delete(self.contact_url(id));
        self.execute(request, "Failed to delete contact").await?;
        Ok(())
    }
}
