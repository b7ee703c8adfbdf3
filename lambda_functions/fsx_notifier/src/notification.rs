use serde::Serialize;

use crate::event::{FileSystemCreated, Rejection};

pub const SUBJECT: &str = "FSx File System Created";
pub const SENT_BODY: &str = "Notification sent.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: &'static str,
    pub body: String,
}

impl NotificationMessage {
    pub fn from_created(created: &FileSystemCreated) -> Self {
        let mut body = format!(
            "A new FSx file system has been created: {}",
            created.file_system_id
        );

        let mut details = Vec::new();
        if let Some(file_system_type) = &created.file_system_type {
            details.push(format!("type: {file_system_type}"));
        }
        if let Some(capacity) = created.storage_capacity {
            details.push(format!("storage capacity: {capacity} GiB"));
        }
        if !details.is_empty() {
            body.push_str(&format!(" ({})", details.join(", ")));
        }

        Self {
            subject: SUBJECT,
            body,
        }
    }
}

/// Response handed back to the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResult {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResult {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: SENT_BODY.to_string(),
        }
    }

    pub fn rejected(rejection: &Rejection) -> Self {
        Self {
            status_code: 400,
            body: rejection.to_string(),
        }
    }
}
