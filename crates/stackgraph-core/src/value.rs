//! Property values
//!
//! A [`Value`] is either a literal, a forward [`Reference`], or a composite
//! that may contain references anywhere inside it.

use crate::address::Reference;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Property value of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Number(i64),
    /// String literal
    String(String),
    /// Ordered list
    List(Vec<Value>),
    /// Insertion-ordered map
    Map(IndexMap<String, Value>),
    /// Forward reference to another declaration's attribute
    Ref(Reference),
    /// String interpolation of literal text and references
    Template(Vec<Fragment>),
    /// Value serialized to a JSON string when rendered
    Encoded(Box<Value>),
}

/// Piece of a [`Value::Template`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Literal text
    Text(String),
    /// Interpolated reference
    Ref(Reference),
}

impl Value {
    /// List from anything convertible to values
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Map from key/value pairs, keeping their order
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Template from fragments
    pub fn template(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        Self::Template(fragments.into_iter().collect())
    }

    /// Wrap a value so it renders as a JSON-encoded string
    #[must_use]
    pub fn encoded(inner: Value) -> Self {
        Self::Encoded(Box::new(inner))
    }

    /// String literal, if this is one
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer literal, if this is one
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean literal, if this is one
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reference, if this is one
    #[must_use]
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Ref(r) => Some(r),
            _ => None,
        }
    }

    /// List items, if this is a list
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map entry lookup, if this is a map
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Inner value of an encoded value
    #[must_use]
    pub fn decoded(&self) -> Option<&Value> {
        match self {
            Self::Encoded(inner) => Some(inner),
            _ => None,
        }
    }

    /// Every reference contained in this value, depth first
    #[must_use]
    pub fn references(&self) -> Vec<&Reference> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a Reference>) {
        match self {
            Self::Bool(_) | Self::Number(_) | Self::String(_) => {}
            Self::List(items) => items.iter().for_each(|v| v.collect_references(found)),
            Self::Map(entries) => entries.values().for_each(|v| v.collect_references(found)),
            Self::Ref(r) => found.push(r),
            Self::Template(fragments) => {
                for fragment in fragments {
                    if let Fragment::Ref(r) = fragment {
                        found.push(r);
                    }
                }
            }
            Self::Encoded(inner) => inner.collect_references(found),
        }
    }

    /// Render into the engine's JSON form
    ///
    /// References become `${...}` interpolations. Literal `${` and `%{`
    /// sequences are escaped as `$${` and `%%{` so they are never mistaken for
    /// interpolations or template directives.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Number(n) => JsonValue::from(*n),
            Self::String(s) => JsonValue::String(escape_literal(s)),
            Self::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Self::Map(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Ref(r) => JsonValue::String(r.expression()),
            Self::Template(fragments) => JsonValue::String(render_template(fragments)),
            Self::Encoded(inner) => JsonValue::String(inner.to_json().to_string()),
        }
    }
}

fn escape_literal(s: &str) -> String {
    s.replace("${", "$${").replace("%{", "%%{")
}

fn render_template(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => out.push_str(&escape_literal(text)),
            Fragment::Ref(r) => out.push_str(&r.expression()),
        }
    }
    out
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Self::Ref(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<&str> for Fragment {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Reference> for Fragment {
    fn from(value: Reference) -> Self {
        Self::Ref(value)
    }
}
