use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::{
    error::{Error, Result, ValidationError},
    transport::Method,
    validator, Configuration,
};

const LOG_REQUIRED_KEYS: &[&str] = &["project", "channel", "event"];
const LOG_ALLOWED_KEYS: &[&str] = &[
    "project",
    "channel",
    "event",
    "user_id",
    "description",
    "icon",
    "notify",
    "tags",
    "parser",
    "timestamp",
];
const IDENTIFY_REQUIRED_KEYS: &[&str] = &["project", "user_id", "properties"];
const INSIGHT_REQUIRED_KEYS: &[&str] = &["project", "title", "value"];

/// The kinds of events LogSnag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Log,
    Identify,
    Insight,
    InsightMutation,
}

impl EventKind {
    /// HTTP method and path the event is sent to.
    pub const fn endpoint(self) -> (Method, &'static str) {
        match self {
            EventKind::Log => (Method::Post, "/v1/log"),
            EventKind::Identify => (Method::Post, "/v1/identify"),
            EventKind::Insight => (Method::Post, "/v1/insight"),
            EventKind::InsightMutation => (Method::Patch, "/v1/insight"),
        }
    }

    fn required_keys(self) -> &'static [&'static str] {
        match self {
            EventKind::Log => LOG_REQUIRED_KEYS,
            EventKind::Identify => IDENTIFY_REQUIRED_KEYS,
            EventKind::Insight | EventKind::InsightMutation => INSIGHT_REQUIRED_KEYS,
        }
    }

    /// Insight and identify payloads are not restricted to a fixed set of keys.
    fn allowed_keys(self) -> Option<&'static [&'static str]> {
        match self {
            EventKind::Log => Some(LOG_ALLOWED_KEYS),
            _ => None,
        }
    }

    /// Nested tag/property map that gets compacted and checked.
    fn value_map_key(self) -> Option<&'static str> {
        match self {
            EventKind::Log => Some("tags"),
            EventKind::Identify => Some("properties"),
            _ => None,
        }
    }

    fn validate_value(self, value: Option<&Value>) -> std::result::Result<(), ValidationError> {
        // Absence is reported by the required keys check.
        let Some(value) = value else {
            return Ok(());
        };
        match self {
            EventKind::Insight if !(value.is_string() || value.is_number()) => {
                Err(ValidationError::InvalidInsightValue(value.clone()))
            }
            EventKind::InsightMutation if !value.is_number() => {
                Err(ValidationError::InvalidMutationValue(value.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// A validated event, ready to be sent.
///
/// Events can only be obtained through the constructors below, all of which inject the configured
/// project and run the validation rules of their kind. Serializing an event produces exactly its
/// data.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    data: Map<String, Value>,
}

impl Event {
    /// Build a log event.
    ///
    /// Requires `channel` and `event`. May include `user_id`, `description`, `icon`, `notify`,
    /// `tags`, `parser` and `timestamp`; any other key is rejected. `null` tags are dropped.
    pub fn log(data: impl Serialize, config: &Configuration) -> Result<Self> {
        Event::new(EventKind::Log, data, config)
    }

    /// Build an identify event. Requires `user_id` and `properties`; `null` properties are dropped.
    pub fn identify(data: impl Serialize, config: &Configuration) -> Result<Self> {
        Event::new(EventKind::Identify, data, config)
    }

    /// Build an insight event. Requires `title` and `value`.
    ///
    /// With `mutate` set, `value` must be a number and the event increments the insight instead
    /// of setting it. Otherwise `value` may be a string or a number.
    pub fn insight(data: impl Serialize, config: &Configuration, mutate: bool) -> Result<Self> {
        let kind = if mutate {
            EventKind::InsightMutation
        } else {
            EventKind::Insight
        };
        Event::new(kind, data, config)
    }

    fn new(kind: EventKind, data: impl Serialize, config: &Configuration) -> Result<Self> {
        let mut data = match serde_json::to_value(data) {
            Ok(Value::Object(data)) => data,
            Ok(other) => return Err(Error::InvalidData(format!("got {other}"))),
            Err(err) => return Err(Error::InvalidData(err.to_string())),
        };
        let (_, project) = config.credentials()?;

        data.insert("project".to_owned(), Value::String(project.to_owned()));

        if let Some(key) = kind.value_map_key() {
            validator::compact_nested(&mut data, key);
        }

        validator::validate_required_keys(kind.required_keys(), &data)?;
        if let Some(allowed) = kind.allowed_keys() {
            validator::validate_allowed_keys(allowed, &data)?;
        }
        if let Some(key) = kind.value_map_key() {
            validator::validate_shallow_value_map(key, data.get(key))?;
        }
        kind.validate_value(data.get("value"))?;

        Ok(Event { kind, data })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    /// The event data as a JSON string.
    pub fn to_json(&self) -> String {
        Value::Object(self.data.clone()).to_string()
    }

    /// The request body for this event.
    ///
    /// Mutations wrap `value` in an increment operator: `{"value": {"$inc": value}}`.
    pub fn request_body(&self) -> Value {
        let mut body = self.data.clone();
        if self.kind == EventKind::InsightMutation {
            if let Some(value) = body.get_mut("value") {
                *value = json!({ "$inc": value.take() });
            }
        }
        Value::Object(body)
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}
