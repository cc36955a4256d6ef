// Thin client for HTTP transactional email APIs (Resend-compatible).

pub mod models;
pub mod template;

use reqwest::Client;

use crate::models::{EmailRequest, EmailResponse};

pub use template::{render_otp_email, OTP_SUBJECT};

pub const DEFAULT_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Request to mail provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct MailerOptions {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct MailerService {
    options: MailerOptions,
    client: Client,
}

impl MailerService {
    pub fn new(options: MailerOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    pub fn from_address(&self) -> &str {
        &self.options.from
    }

    /// Build the passcode email for `recipient` without sending it.
    pub fn otp_request(&self, recipient: &str, code: &str, valid_for_minutes: i64) -> EmailRequest {
        EmailRequest {
            from: self.options.from.clone(),
            to: vec![recipient.to_string()],
            subject: OTP_SUBJECT.to_string(),
            html: render_otp_email(code, valid_for_minutes),
        }
    }

    pub async fn send_otp(
        &self,
        recipient: &str,
        code: &str,
        valid_for_minutes: i64,
    ) -> Result<EmailResponse, MailerError> {
        let request = self.otp_request(recipient, code, valid_for_minutes);
        self.send(&request).await
    }

    pub async fn send(&self, request: &EmailRequest) -> Result<EmailResponse, MailerError> {
        let response = self
            .client
            .post(&self.options.api_url)
            .bearer_auth(&self.options.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Mail provider rejected message");
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Some providers answer 202 with an empty body
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(EmailResponse { id: None });
        }
        match serde_json::from_slice(&bytes) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::debug!(error = %e, "Unparsable mail provider response, ignoring body");
                Ok(EmailResponse { id: None })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MailerService {
        MailerService::new(MailerOptions {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: "test_key".to_string(),
            from: "Note App <noreply@notes.app>".to_string(),
        })
    }

    #[test]
    fn test_otp_request_addresses_recipient() {
        let request = service().otp_request("a@x.com", "123456", 5);
        assert_eq!(request.to, vec!["a@x.com".to_string()]);
        assert_eq!(request.from, "Note App <noreply@notes.app>");
        assert_eq!(request.subject, OTP_SUBJECT);
        assert!(request.html.contains("123456"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        let service = MailerService::new(MailerOptions {
            api_url: "http://127.0.0.1:9/emails".to_string(),
            api_key: "test_key".to_string(),
            from: "noreply@notes.app".to_string(),
        });

        let result = service.send_otp("a@x.com", "123456", 5).await;
        assert!(matches!(result, Err(MailerError::Transport(_))));
    }

    /// Serve one canned HTTP response on a local port, returning its URL.
    async fn one_shot_provider(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // Drain the whole request before answering
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/emails", addr)
    }

    fn service_at(api_url: String) -> MailerService {
        MailerService::new(MailerOptions {
            api_url,
            api_key: "test_key".to_string(),
            from: "noreply@notes.app".to_string(),
        })
    }

    #[tokio::test]
    async fn test_accepted_message_returns_provider_id() {
        let url = one_shot_provider("HTTP/1.1 200 OK", r#"{"id":"msg_123"}"#).await;

        let response = service_at(url).send_otp("a@x.com", "123456", 5).await.unwrap();
        assert_eq!(response.id.as_deref(), Some("msg_123"));
    }

    #[tokio::test]
    async fn test_unparsable_success_body_is_still_success() {
        let url = one_shot_provider("HTTP/1.1 200 OK", "<html>queued</html>").await;

        let response = service_at(url).send_otp("a@x.com", "123456", 5).await.unwrap();
        assert!(response.id.is_none());
    }

    #[tokio::test]
    async fn test_rejection_carries_status_and_body() {
        let url = one_shot_provider("HTTP/1.1 422 Unprocessable Entity", r#"{"error":"bad from"}"#).await;

        let result = service_at(url).send_otp("a@x.com", "123456", 5).await;
        match result {
            Err(MailerError::Rejected { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("bad from"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
