//! Contact form submission.
//!
//! Posts the contact form fields to an externally configured form endpoint
//! (a hosted form service) and asks for a JSON reply. There is no retry; a
//! failure is reported once.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::notify::{Notice, Notifier};

/// Errors that can occur when submitting the contact form.
#[derive(Debug, Error)]
pub enum ContactError {
    /// A required field is blank.
    #[error("name, email and message are required")]
    MissingFields,

    /// No form endpoint is configured.
    #[error("contact endpoint not configured")]
    NotConfigured,

    /// The endpoint answered with a non-success status.
    #[error("endpoint rejected submission: {status}")]
    Rejected { status: u16 },

    /// The request never got an answer.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Contact form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    fn has_blank_field(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

/// HTTP client for the contact form endpoint.
#[derive(Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ContactClient {
    /// Create a new contact client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(endpoint: Url) -> Result<Self, ContactError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the form fields.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingFields` without sending anything if a
    /// field is blank.
    /// Returns `ContactError::Rejected` for a non-2xx status.
    /// Returns `ContactError::Http` if the request fails in transit.
    #[instrument(skip(self, form), fields(endpoint = %self.endpoint))]
    pub async fn submit(&self, form: &ContactForm) -> Result<(), ContactError> {
        if form.has_blank_field() {
            return Err(ContactError::MissingFields);
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Contact submission rejected");
            return Err(ContactError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!("Contact message sent");
        Ok(())
    }
}

/// Submit the contact form and report the outcome to `notifier`.
///
/// `client` is `None` when no endpoint is configured.
///
/// # Errors
///
/// Returns the `ContactError` after it has been reported.
pub async fn send_contact_message<N: Notifier + ?Sized>(
    client: Option<&ContactClient>,
    form: &ContactForm,
    notifier: &N,
) -> Result<(), ContactError> {
    let result = match client {
        _ if form.has_blank_field() => Err(ContactError::MissingFields),
        Some(client) => client.submit(form).await,
        None => Err(ContactError::NotConfigured),
    };

    notifier.notify(match &result {
        Ok(()) => Notice::success("Message sent successfully 📩", "Thank You"),
        Err(ContactError::MissingFields) => Notice::warn("Please fill all fields", "Warning"),
        Err(ContactError::Http(e)) => {
            tracing::error!(error = %e, "Contact submission failed in transit");
            Notice::error("Network error. Try again later.", "Error")
        }
        Err(ContactError::NotConfigured) => {
            tracing::error!("Contact endpoint not configured");
            Notice::error("Failed to send message ❌", "Error")
        }
        Err(ContactError::Rejected { .. }) => Notice::error("Failed to send message ❌", "Error"),
    });

    result
}
