//! Contact form handling
//!
//! Submission is simulated: a complete form waits a fixed delay and then
//! always succeeds with a toast. Nothing is sent or stored.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// The submitted form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Required fields that are empty after trimming, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ContactError::MissingFields(missing))
        }
    }
}

/// A transient notification shown once after a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn message_sent() -> Self {
        Self {
            title: "Message sent!".to_string(),
            description: "Thanks for reaching out. I'll get back to you soon.".to_string(),
        }
    }
}

/// Simulated message delivery
#[derive(Debug, Clone)]
pub struct ContactService {
    delay: Duration,
}

impl ContactService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Validate, wait the fixed delay, then report success
    pub async fn submit(&self, form: &ContactForm) -> Result<Toast, ContactError> {
        form.validate()?;
        tracing::info!(
            "Contact message from {} <{}> ({} chars)",
            form.name.trim(),
            form.email.trim(),
            form.message.chars().count()
        );
        tokio::time::sleep(self.delay).await;
        Ok(Toast::message_sent())
    }
}

/// State of one contact page render; owned by a single request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactPageState {
    pub form: ContactForm,
    pub toast: Option<Toast>,
    pub error: Option<String>,
}

impl ContactPageState {
    /// Run a submission and produce the state the page is rendered with.
    ///
    /// Success clears every field; a validation error keeps what was typed.
    pub async fn after_submit(service: &ContactService, form: ContactForm) -> Self {
        match service.submit(&form).await {
            Ok(toast) => Self {
                form: ContactForm::default(),
                toast: Some(toast),
                error: None,
            },
            Err(e) => {
                tracing::debug!("Rejected contact form: {}", e);
                Self {
                    form,
                    toast: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.toast.is_some()
    }
}
