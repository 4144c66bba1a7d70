use crate::error::Result;
use crate::models::iso_timestamp;

/// One outbound notification message
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail delivery collaborator. The pipeline never depends on delivery
/// succeeding; failures are absorbed by its policy layer.
pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Mail shim that writes the message to the log instead of a transport.
/// The deployment environment owns real delivery.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &OutboundEmail) -> Result<()> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "outbound notification"
        );
        Ok(())
    }
}

/// Compose the owner notification for one accepted signup
pub fn signup_notification(to: &str, email: &str, signup_number: u64, sent_at: i64) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: format!("New Dvand Waitlist Signup (#{signup_number})"),
        body: format!(
            "New signup details:\nEmail: {email}\nSignup #: {signup_number}\nTime: {}\n",
            iso_timestamp(sent_at)
        ),
    }
}
