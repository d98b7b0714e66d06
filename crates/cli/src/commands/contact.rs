//! Contact form command.
//!
//! # Usage
//!
//! ```bash
//! tidepool contact --name Ana --email ana@example.com --message "Do you ship?"
//! ```
//!
//! # Environment Variables
//!
//! - `TIDEPOOL_CONTACT_ENDPOINT` - Hosted form endpoint to post to

use tidepool_storefront::notify::Notifier;
use tidepool_storefront::services::{ContactClient, ContactForm, send_contact_message};

use super::CommandError;

/// Send the contact form.
///
/// # Errors
///
/// Returns the `ContactError` when the message is not delivered.
pub async fn send<N: Notifier + ?Sized>(
    client: Option<&ContactClient>,
    form: &ContactForm,
    notifier: &N,
) -> Result<String, CommandError> {
    send_contact_message(client, form, notifier).await?;
    Ok(format!("Sent message from {}", form.email))
}
