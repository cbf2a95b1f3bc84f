// ABOUTME: Form state and payload helpers shared by every entity module
// ABOUTME: Default state, item projection, payload serialization, option resolution and row titles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! State and payload helpers
//!
//! [`build_payload`] defines exactly what is sent to the API: fields absent
//! from state are never sent, empty values are omitted, and checkboxes are
//! always sent as booleans.

use super::descriptor::ModuleDescriptor;
use super::field::{FieldOption, FieldType, ModuleFormField, OptionsContext, OptionsSource};
use super::value::{number_to_json, FieldValue, FormState, ModuleItem, ModuleManagerReferences};
use crate::constants::{fields, messages};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One slot per field: its default, `false` for checkboxes, `""` otherwise
#[must_use]
pub fn build_default_state(fields: &[ModuleFormField]) -> FormState {
    fields
        .iter()
        .map(|field| {
            let value = field.default.clone().unwrap_or_else(|| {
                if field.is_checkbox() {
                    FieldValue::Bool(false)
                } else {
                    FieldValue::empty()
                }
            });
            (field.name, value)
        })
        .collect()
}

/// Project an entity onto editable form state
///
/// Checkboxes become booleans, dates become `YYYY-MM-DD` (or `""`), a
/// `menu_item_ids` array becomes a list, other primitives are copied and
/// everything else becomes `""`.
#[must_use]
pub fn map_item_to_state(item: &ModuleItem, fields: &[ModuleFormField]) -> FormState {
    fields
        .iter()
        .map(|field| {
            let raw = item.get(field.name);
            let value = match field.field_type {
                FieldType::Checkbox => FieldValue::Bool(raw.is_some_and(json_truthy)),
                FieldType::Date => FieldValue::Text(raw.map(format_date_for_input).unwrap_or_default()),
                _ => match raw {
                    Some(Value::Array(entries)) if field.name == fields::MENU_ITEM_IDS => {
                        FieldValue::List(entries.iter().filter_map(scalar_text).collect())
                    }
                    Some(Value::Null) | None => FieldValue::empty(),
                    Some(value) => FieldValue::from_json(value).unwrap_or_else(FieldValue::empty),
                },
            };
            (field.name, value)
        })
        .collect()
}

/// Serialize form state into an API payload
#[must_use]
pub fn build_payload(state: &FormState, fields: &[ModuleFormField]) -> Map<String, Value> {
    let mut payload = Map::new();
    for field in fields {
        let Some(value) = state.get(field.name) else {
            continue;
        };
        if let Some(json) = serialize_field(field, value) {
            payload.insert(field.name.to_owned(), json);
        }
    }
    payload
}

fn serialize_field(field: &ModuleFormField, value: &FieldValue) -> Option<Value> {
    if field.field_type == FieldType::Number {
        return parse_number(value).map(number_to_json);
    }
    if field.field_type == FieldType::Date {
        return value.is_truthy().then(|| value.to_json());
    }
    if field.name == fields::MENU_ITEM_IDS {
        let ids = parse_id_list(value);
        return (!ids.is_empty()).then(|| Value::Array(ids.into_iter().map(Value::String).collect()));
    }
    if field.is_checkbox() {
        return Some(Value::Bool(value.is_truthy()));
    }
    match value {
        FieldValue::Null => None,
        FieldValue::Text(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| Value::String(trimmed.to_owned()))
        }
        other => Some(other.to_json()),
    }
}

fn parse_number(value: &FieldValue) -> Option<f64> {
    let n = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(text) if !text.trim().is_empty() => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Split a comma/newline separated identifier list, trimming and dropping empties
#[must_use]
pub fn parse_id_list(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::List(entries) => entries
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect(),
        FieldValue::Null => Vec::new(),
        other => other
            .as_text()
            .split([',', '\n'])
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect(),
    }
}

/// Normalize an API date to the `YYYY-MM-DD` value a date input expects
///
/// Accepts RFC 3339 timestamps (converted to their UTC date), plain dates,
/// naive date-times and epoch milliseconds. Anything else yields `""`.
#[must_use]
pub fn format_date_for_input(value: &Value) -> String {
    let date = match value {
        Value::String(text) => parse_date(text.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    };
    date.map(|d| d.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, INPUT_DATE_FORMAT) {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|dt| dt.date())
}

/// Locally resolved options of a field: the static list or the resolver's result
#[must_use]
pub fn resolve_options(
    field: &ModuleFormField,
    references: &ModuleManagerReferences,
    context: &OptionsContext<'_>,
) -> Vec<FieldOption> {
    match field.options {
        OptionsSource::None => Vec::new(),
        OptionsSource::Static(options) => options
            .iter()
            .map(|(value, label)| FieldOption::new(*value, *label))
            .collect(),
        OptionsSource::Derived(resolver) => resolver(references, context),
    }
}

/// Row title: descriptor override, then `name`, `title`, `reason`, `id`, placeholder
#[must_use]
pub fn build_item_title(
    descriptor: &ModuleDescriptor,
    item: &ModuleItem,
    references: &ModuleManagerReferences,
) -> String {
    descriptor
        .item_title
        .and_then(|title| title(item, references))
        .filter(|title| !title.is_empty())
        .or_else(|| ["name", "title", "reason", "id"].iter().find_map(|key| item.text(key)))
        .unwrap_or_else(|| messages::UNTITLED.to_owned())
}

/// Row subtitle: descriptor override, else active flag, order, reason and description
#[must_use]
pub fn build_item_subtitle(
    descriptor: &ModuleDescriptor,
    item: &ModuleItem,
    references: &ModuleManagerReferences,
) -> Option<String> {
    if let Some(subtitle) = descriptor.item_subtitle {
        return subtitle(item, references).filter(|s| !s.is_empty());
    }

    let mut meta = Vec::new();
    if let Some(active) = item.get("is_active").filter(|v| !v.is_null()) {
        let answer = if json_truthy(active) { messages::YES } else { messages::NO };
        meta.push(format!("{} {answer}", messages::ACTIVE_LABEL));
    }
    if let Some(order) = item.text("display_order") {
        meta.push(format!("{} {order}", messages::ORDER_LABEL));
    }
    meta.extend(item.text("reason"));
    meta.extend(item.text("description"));

    (!meta.is_empty()).then(|| meta.join(messages::META_SEPARATOR))
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<ModuleFormField> {
        vec![
            ModuleFormField::new("name", "Nom", FieldType::Text),
            ModuleFormField::new("display_order", "Ordre", FieldType::Number),
            ModuleFormField::new("is_active", "Actif", FieldType::Checkbox),
            ModuleFormField::new("start_date", "Début", FieldType::Date),
        ]
    }

    #[test]
    fn test_default_state_seeds_every_field() {
        let state = build_default_state(&fields());
        assert_eq!(state.len(), 4);
        assert_eq!(state.get("is_active"), Some(&FieldValue::Bool(false)));
        assert_eq!(state.get("name"), Some(&FieldValue::empty()));
    }

    #[test]
    fn test_number_payload_drops_non_finite() {
        let mut state = FormState::new();
        state.set("display_order", "abc");
        assert!(build_payload(&state, &fields()).get("display_order").is_none());
        state.set("display_order", " 4 ");
        assert_eq!(build_payload(&state, &fields()).get("display_order"), Some(&json!(4)));
        state.set("display_order", "2.5");
        assert_eq!(build_payload(&state, &fields()).get("display_order"), Some(&json!(2.5)));
    }

    #[test]
    fn test_date_parsing_variants() {
        assert_eq!(format_date_for_input(&json!("2024-03-05")), "2024-03-05");
        assert_eq!(format_date_for_input(&json!("2024-03-05T23:30:00-02:00")), "2024-03-06");
        assert_eq!(format_date_for_input(&json!("2024-03-05 08:00:00")), "2024-03-05");
        assert_eq!(format_date_for_input(&json!(1_709_632_800_000_i64)), "2024-03-05");
        assert_eq!(format_date_for_input(&json!(null)), "");
        assert_eq!(format_date_for_input(&json!("")), "");
    }

    #[test]
    fn test_title_fallback_chain() {
        let descriptor = ModuleDescriptor::new("k", "K", "", "/k");
        let refs = ModuleManagerReferences::new();
        let by_reason = ModuleItem::from_value(json!({"id": 9, "reason": "Ramadan"})).unwrap_or_default();
        assert_eq!(build_item_title(&descriptor, &by_reason, &refs), "Ramadan");
        let by_id = ModuleItem::from_value(json!({"id": 9})).unwrap_or_default();
        assert_eq!(build_item_title(&descriptor, &by_id, &refs), "9");
        assert_eq!(build_item_title(&descriptor, &ModuleItem::default(), &refs), messages::UNTITLED);
    }

    #[test]
    fn test_subtitle_absent_without_meta() {
        let descriptor = ModuleDescriptor::new("k", "K", "", "/k");
        let item = ModuleItem::from_value(json!({"id": 1, "name": "x"})).unwrap_or_default();
        assert_eq!(build_item_subtitle(&descriptor, &item, &ModuleManagerReferences::new()), None);
    }
}
