//! Reset-code email delivery through the SendGrid v3 mail API.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::domain::repository::Notifier;
use crate::domain::types::CODE_TTL_SECS;
use crate::error::DeliveryError;

pub const SENDGRID_MAIL_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

const SUBJECT: &str = "Password Reset Code";

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content; 1],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: String,
}

pub fn render_code_email(code: &str) -> String {
    let minutes = CODE_TTL_SECS / 60;
    format!(
        "<html><body>\
         <h2>Password reset</h2>\
         <p>Your verification code is:</p>\
         <p style=\"font-size: 24px; font-weight: bold;\">{code}</p>\
         <p>Use this code to reset your password. It is valid for {minutes} minutes.</p>\
         <p>If you did not request this code, you can ignore this email.</p>\
         </body></html>"
    )
}

#[derive(Clone)]
pub struct SendGridNotifier {
    client: Client,
    api_url: String,
    api_key: String,
    sender: String,
}

impl SendGridNotifier {
    /// `timeout` bounds the whole request; a slow provider counts as a failure.
    pub fn new(
        api_url: String,
        api_key: String,
        sender: String,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_url,
            api_key,
            sender,
        })
    }
}

impl Notifier for SendGridNotifier {
    async fn send_code(&self, email: &str, code: &str) -> Result<(), DeliveryError> {
        let body = MailSendRequest {
            personalizations: [Personalization {
                to: [Address { email }],
            }],
            from: Address {
                email: &self.sender,
            },
            subject: SUBJECT,
            content: [Content {
                content_type: "text/html",
                value: render_code_email(code),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "reset code email accepted");
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

/// Notifier selected at startup from configuration.
#[derive(Clone)]
pub enum EmailNotifier {
    SendGrid(SendGridNotifier),
    /// No provider configured: every delivery reports failure.
    Disabled,
}

impl Notifier for EmailNotifier {
    async fn send_code(&self, email: &str, code: &str) -> Result<(), DeliveryError> {
        match self {
            Self::SendGrid(notifier) => notifier.send_code(email, code).await,
            Self::Disabled => Err(DeliveryError::Disabled),
        }
    }
}
