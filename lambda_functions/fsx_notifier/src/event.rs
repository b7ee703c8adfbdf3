//! Classification of incoming events.
//!
//! Two payload shapes can announce a new FSx file system: an AWS Config rule
//! invocation carrying a JSON-encoded `invokingEvent`, and an EventBridge
//! CloudTrail record carrying a `detail` object. Anything else is unrelated.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const FSX_RESOURCE_TYPE: &str = "AWS::FSx::FileSystem";
pub const RESOURCE_DISCOVERED: &str = "ResourceDiscovered";
pub const CREATE_FILE_SYSTEM: &str = "CreateFileSystem";

/// Reason an event does not lead to a notification. The `Display` output is
/// returned verbatim as the body of the 400 result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Unrelated event: not an FSx file system creation.")]
    Unrelated,
    #[error("Malformed invokingEvent: {0}")]
    MalformedInvokingEvent(String),
    #[error("Malformed responseElements: {0}")]
    MalformedResponseElements(String),
    #[error("Missing field: configurationItem")]
    MissingConfigurationItem,
    #[error("Missing field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Unqualified configuration item: {resource_type} / {status}")]
    Unqualified { resource_type: String, status: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// AWS Config rule invocation. `invoking_event` is the raw field, expected
    /// to be a JSON-encoded string.
    ConfigSnapshot { invoking_event: Value },
    /// EventBridge record for a CloudTrail API call.
    ResourceChange { detail: Value },
    Unrelated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    ConfigSnapshot,
    ResourceChange,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::ConfigSnapshot => "config_snapshot",
            EventSource::ResourceChange => "resource_change",
        }
    }
}

/// Fields extracted from a qualifying event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemCreated {
    pub source: EventSource,
    pub file_system_id: String,
    pub file_system_type: Option<String>,
    /// GiB
    pub storage_capacity: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvokingEvent {
    configuration_item: Option<ConfigurationItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigurationItem {
    resource_type: Option<String>,
    configuration_item_status: Option<String>,
    resource_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseElements {
    file_system_id: Option<String>,
    file_system_type: Option<String>,
    storage_capacity: Option<u64>,
    file_system: Option<Box<ResponseElements>>,
}

impl ResponseElements {
    // CloudTrail nests the created resource under `fileSystem`; flat records are accepted too.
    fn resolve(self) -> ResponseElements {
        match self.file_system {
            Some(nested) => {
                let nested = nested.resolve();
                ResponseElements {
                    file_system_id: self.file_system_id.or(nested.file_system_id),
                    file_system_type: self.file_system_type.or(nested.file_system_type),
                    storage_capacity: self.storage_capacity.or(nested.storage_capacity),
                    file_system: None,
                }
            }
            None => self,
        }
    }
}

impl InputEvent {
    /// `invokingEvent` takes precedence over `detail` when a payload carries both.
    pub fn from_value(mut value: Value) -> Self {
        if let Some(invoking_event) = value.get_mut("invokingEvent").map(Value::take) {
            return InputEvent::ConfigSnapshot { invoking_event };
        }

        match value.get_mut("detail").map(Value::take) {
            Some(detail) => InputEvent::ResourceChange { detail },
            None => InputEvent::Unrelated,
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            InputEvent::ConfigSnapshot { .. } => EventSource::ConfigSnapshot.as_str(),
            InputEvent::ResourceChange { .. } => EventSource::ResourceChange.as_str(),
            InputEvent::Unrelated => "unrelated",
        }
    }

    pub fn qualify(self) -> Result<FileSystemCreated, Rejection> {
        match self {
            InputEvent::ConfigSnapshot { invoking_event } => qualify_config_snapshot(&invoking_event),
            InputEvent::ResourceChange { detail } => qualify_resource_change(&detail),
            InputEvent::Unrelated => Err(Rejection::Unrelated),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn qualify_config_snapshot(invoking_event: &Value) -> Result<FileSystemCreated, Rejection> {
    let encoded = invoking_event.as_str().ok_or_else(|| {
        Rejection::MalformedInvokingEvent("expected a JSON-encoded string".to_string())
    })?;
    let decoded: InvokingEvent = serde_json::from_str(encoded)
        .map_err(|e| Rejection::MalformedInvokingEvent(e.to_string()))?;
    let item = decoded
        .configuration_item
        .ok_or(Rejection::MissingConfigurationItem)?;

    let (resource_type, status) = match (item.resource_type, item.configuration_item_status) {
        (Some(resource_type), Some(status)) => (resource_type, status),
        (resource_type, status) => {
            let mut missing = Vec::new();
            if resource_type.is_none() {
                missing.push("configurationItem.resourceType");
            }
            if status.is_none() {
                missing.push("configurationItem.configurationItemStatus");
            }
            return Err(Rejection::MissingFields(missing));
        }
    };

    if resource_type != FSX_RESOURCE_TYPE || status != RESOURCE_DISCOVERED {
        return Err(Rejection::Unqualified { resource_type, status });
    }

    let file_system_id = non_empty(item.resource_id)
        .ok_or_else(|| Rejection::MissingFields(vec!["configurationItem.resourceId"]))?;

    Ok(FileSystemCreated {
        source: EventSource::ConfigSnapshot,
        file_system_id,
        file_system_type: None,
        storage_capacity: None,
    })
}

fn qualify_resource_change(detail: &Value) -> Result<FileSystemCreated, Rejection> {
    if detail.get("eventName").and_then(Value::as_str) != Some(CREATE_FILE_SYSTEM) {
        return Err(Rejection::Unrelated);
    }

    let elements = match detail.get("responseElements") {
        None | Some(Value::Null) => ResponseElements::default(),
        Some(raw) => ResponseElements::deserialize(raw)
            .map_err(|e| Rejection::MalformedResponseElements(e.to_string()))?
            .resolve(),
    };

    let file_system_id = non_empty(elements.file_system_id);
    let file_system_type = non_empty(elements.file_system_type);

    match (file_system_id, file_system_type) {
        (Some(file_system_id), Some(file_system_type)) => Ok(FileSystemCreated {
            source: EventSource::ResourceChange,
            file_system_id,
            file_system_type: Some(file_system_type),
            storage_capacity: elements.storage_capacity,
        }),
        (file_system_id, file_system_type) => {
            let mut missing = Vec::new();
            if file_system_id.is_none() {
                missing.push("responseElements.fileSystemId");
            }
            if file_system_type.is_none() {
                missing.push("responseElements.fileSystemType");
            }
            Err(Rejection::MissingFields(missing))
        }
    }
}
