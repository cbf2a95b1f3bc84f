// ABOUTME: Dynamic values flowing between API entities, form state and payloads
// ABOUTME: FieldValue sum type, ModuleItem accessor wrapper, FormState, FormRole and reference lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use crate::constants::fields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One form-state slot
///
/// API entities are untyped JSON; everything a form edits is narrowed to
/// this closed set of primitives before it reaches the renderer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Unset
    #[default]
    Null,
    /// Checkbox state
    Bool(bool),
    /// Numeric value as received from the API
    Number(f64),
    /// Free text, select value, URL or `YYYY-MM-DD` date
    Text(String),
    /// Identifier list (only produced for `menu_item_ids`)
    List(Vec<String>),
}

impl FieldValue {
    /// Empty text value
    #[must_use]
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Truthiness with JavaScript semantics (`""`, `0`, `NaN`, `false`, null are falsy)
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::List(_) => true,
        }
    }

    /// Null, or text that is empty once trimmed
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::List(_) => false,
        }
    }

    /// Text representation used by inputs; whole numbers print without a fraction
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
            Self::List(values) => values.join(", "),
        }
    }

    /// Narrow a JSON value to a primitive slot; arrays and objects yield `None`
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// JSON form of the value; whole numbers become integers
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn is_whole(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}

pub(crate) fn format_number(n: f64) -> String {
    if is_whole(n) {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

pub(crate) fn number_to_json(n: f64) -> Value {
    if is_whole(n) {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Create vs edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormRole {
    /// New entity modal
    Create,
    /// Existing entity modal
    Edit,
}

impl FormRole {
    /// Lower-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for FormRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity as returned by the API
///
/// Accessors fail closed: a missing or oddly-typed key reads as unset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleItem(Map<String, Value>);

impl ModuleItem {
    /// Wrap a JSON object; any other JSON shape yields `None`
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Identifier as a string (string and numeric ids are accepted)
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get(fields::ID)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Raw JSON value of a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty text form of a string, number or boolean key
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.0.get(key)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), format_number),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Primitive value of a key narrowed to a form slot
    #[must_use]
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        self.0.get(key).and_then(FieldValue::from_json)
    }

    /// Set a key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Underlying JSON object
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert back into JSON
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ModuleItem {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Form state: field name to slot value, ordered for stable rendering and logs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, FieldValue>);

impl FormState {
    /// Empty state
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Slot value, if the field is present in state
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text form of a slot; absent slots read as ""
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.0.get(name).map(FieldValue::as_text).unwrap_or_default()
    }

    /// Set a slot
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Remove a slot
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    /// Whether the field has a slot
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterate slots in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Number of slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No slots at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Reference lists by name (`categories`, `restaurants`, `promotions`, ...)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleManagerReferences(HashMap<String, Vec<ModuleItem>>);

impl ModuleManagerReferences {
    /// Empty references
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of a reference list; unknown names read as an empty list
    #[must_use]
    pub fn get(&self, name: &str) -> &[ModuleItem] {
        self.0.get(name).map_or(&[], Vec::as_slice)
    }

    /// Replace a reference list
    pub fn insert(&mut self, name: impl Into<String>, items: Vec<ModuleItem>) {
        self.0.insert(name.into(), items);
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, items: Vec<ModuleItem>) -> Self {
        self.insert(name, items);
        self
    }
}
