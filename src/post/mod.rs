use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ConvertError;

pub mod entry;
pub mod post_type;

/// A single value of a Micropub property, resolved once at the JSON boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Text(String),
    /// `{"html": ..., "value": ...}` as sent by rich text clients
    Rich { html: String, value: Option<String> },
    /// `{"value": ..., "alt": ...}`, used by photos and summaries
    Structured { value: String, alt: Option<String> },
    /// Nested microformat, e.g. an h-cite inside `in-reply-to` or an h-card author
    Embedded { types: Vec<String>, properties: Properties },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(pub BTreeMap<String, Vec<PropValue>>);

/// A Micropub post in its microformats2 JSON shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub types: Vec<String>,
    pub properties: Properties,
}

impl PropValue {
    fn from_json(value: &Value) -> Option<PropValue> {
        match value {
            Value::String(s) => Some(PropValue::Text(s.clone())),
            Value::Number(n) => Some(PropValue::Text(n.to_string())),
            Value::Bool(b) => Some(PropValue::Text(b.to_string())),
            Value::Object(obj) => Self::from_object(obj),
            Value::Null | Value::Array(_) => None,
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Option<PropValue> {
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(|s| s.to_string());

        if let Some(html) = text("html") {
            return Some(PropValue::Rich { html, value: text("value") });
        }
        if let Some(props) = obj.get("properties").and_then(Value::as_object) {
            return Some(PropValue::Embedded {
                types: string_list(obj.get("type")),
                properties: Properties::from_json(props),
            });
        }
        text("value").map(|value| PropValue::Structured { value, alt: text("alt") })
    }

    /// The plain text form, if the value has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s.as_str()),
            PropValue::Rich { value, .. } => value.as_deref(),
            PropValue::Structured { value, .. } => Some(value.as_str()),
            PropValue::Embedded { properties, .. } => properties.first_text("name"),
        }
    }
}

impl Properties {
    fn from_json(obj: &Map<String, Value>) -> Properties {
        let props = obj.iter()
            .map(|(key, value)| {
                let values = match value {
                    Value::Array(items) => items.iter().filter_map(PropValue::from_json).collect(),
                    single => PropValue::from_json(single).into_iter().collect(),
                };
                (key.clone(), values)
            })
            .collect();
        Properties(props)
    }

    pub fn get(&self, name: &str) -> &[PropValue] {
        self.0.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn first(&self, name: &str) -> Option<&PropValue> {
        self.get(name).first()
    }

    /// First value as plain text, `None` when absent or empty.
    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.first(name)
            .and_then(PropValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Whether the property was sent at all, even as an empty list.
    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// All the values of a property that have a text form.
    pub fn texts(&self, name: &str) -> Vec<String> {
        self.get(name).iter()
            .filter_map(PropValue::as_text)
            .map(|s| s.to_string())
            .collect()
    }
}

impl Post {
    pub fn from_json_str(json: &str) -> Result<Post, ConvertError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Post, ConvertError> {
        let Some(obj) = value.as_object() else {
            return Err(ConvertError::InvalidPost("top level must be a JSON object".to_string()));
        };

        let properties = match obj.get("properties") {
            None => Properties::default(),
            Some(Value::Object(props)) => Properties::from_json(props),
            Some(_) => return Err(ConvertError::InvalidPost("properties must be a JSON object".to_string())),
        };

        Ok(Post {
            types: string_list(obj.get("type")),
            properties,
        })
    }

    pub fn has_type(&self, mf_type: &str) -> bool {
        self.types.iter().any(|t| t == mf_type)
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items.iter()
            .filter_map(Value::as_str)
            .map(|s| s.to_string())
            .collect(),
        _ => vec![],
    }
}
