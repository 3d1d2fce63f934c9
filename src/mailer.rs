// src/mailer.rs

use crate::config::MailConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("cannot attach {}: {source}", .path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct BrevoMailer {
    config: MailConfig,
    client: Client,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct BrevoAttachment {
    name: String,
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    subject: &'a str,
    text_content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachment: Vec<BrevoAttachment>,
}

impl BrevoMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Send a plain-text report with the given files attached.
    pub fn send_report(
        &self,
        subject: &str,
        body: &str,
        attachments: &[PathBuf],
    ) -> Result<(), MailerError> {
        let attachment = attachments
            .iter()
            .map(|path| encode_attachment(path))
            .collect::<Result<Vec<_>, _>>()?;

        let payload = BrevoPayload {
            sender: BrevoSender {
                name: &self.config.sender_name,
                email: &self.config.sender_email,
            },
            to: vec![BrevoRecipient {
                email: &self.config.recipient_email,
            }],
            subject,
            text_content: body,
            attachment,
        };

        let resp = self
            .client
            .post(BREVO_SEND_URL)
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(MailerError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

fn encode_attachment(path: &Path) -> Result<BrevoAttachment, MailerError> {
    let bytes = std::fs::read(path).map_err(|source| MailerError::Attachment {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment.csv".to_string());

    Ok(BrevoAttachment {
        name,
        content: STANDARD.encode(bytes),
    })
}
