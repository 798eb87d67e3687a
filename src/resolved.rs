use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Outcome of one resolution pass.
///
/// Serializes untagged: keys-only mode renders as a JSON array, mapping mode
/// as a JSON object. Mapping entries keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// Ordered key names.
    Keys(Vec<String>),
    /// Key-value mapping; values are strings, or null when the source
    /// provided none.
    Vars(Map<String, Value>),
}

impl Resolved {
    pub fn keys(&self) -> Option<&[String]> {
        match self {
            Self::Keys(keys) => Some(keys),
            Self::Vars(_) => None,
        }
    }

    pub fn vars(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Keys(_) => None,
            Self::Vars(vars) => Some(vars),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Keys(keys) => keys.len(),
            Self::Vars(vars) => vars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as JSON text with 4-space indentation.
    pub fn to_pretty_json(&self) -> String {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .expect("in-memory JSON serialization");
        String::from_utf8(buf).expect("serializer emits UTF-8")
    }
}
