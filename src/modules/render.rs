// ABOUTME: Field renderer turning a field descriptor plus form state into a drawable control
// ABOUTME: Option merging and filtering, inline server errors, image state and required validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! Field rendering
//!
//! The renderer produces plain data ([`RenderedField`]) instead of UI nodes,
//! so a terminal, web or test front end can draw the same form. Value
//! changes go through [`ModuleManager::set_field_value`](super::ModuleManager::set_field_value)
//! which runs on-change effects in one place.

use super::descriptor::ModuleDescriptor;
use super::field::{FieldOption, FieldType, ModuleFormField, OptionsContext};
use super::form::resolve_options;
use super::upload::ImageFieldState;
use super::value::{FieldValue, FormRole, FormState, ModuleManagerReferences};
use crate::constants::messages;
use crate::errors::FieldError;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Per-form state the renderer needs besides the form values
#[derive(Debug, Clone, Default)]
pub struct RenderHelpers {
    /// Live filter text per select field
    pub select_filters: HashMap<String, String>,
    /// Fetched async options per field
    pub async_options: HashMap<String, Vec<FieldOption>>,
    /// Fields whose async options are in flight
    pub async_loading: HashSet<String>,
    /// Server-side validation errors per field
    pub field_errors: HashMap<String, String>,
    /// Upload state per image field
    pub images: HashMap<String, ImageFieldState>,
}

impl RenderHelpers {
    /// Index field-scoped errors by field name (first message wins)
    pub fn set_field_errors(&mut self, errors: &[FieldError]) {
        self.field_errors.clear();
        for error in errors {
            if let Some(field) = &error.field {
                self.field_errors
                    .entry(field.clone())
                    .or_insert_with(|| error.message.clone());
            }
        }
    }
}

/// Control kind with its bound value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// `<input type=...>` for text, number, url and date fields
    Input {
        /// HTML input type
        kind: &'static str,
        /// Current value
        value: String,
    },
    /// Multi-line text
    TextArea {
        /// Current value
        value: String,
    },
    /// Boolean toggle
    Checkbox {
        /// Current state
        checked: bool,
    },
    /// Option list
    Select {
        /// Options after merge and filter
        options: Vec<FieldOption>,
        /// Selected value
        selected: String,
        /// Live filter text
        filter: String,
        /// Async options in flight
        loading: bool,
        /// Filter input shown
        searchable: bool,
    },
    /// Image upload
    Image {
        /// Stored URL
        url: String,
        /// Local preview, while the value is the uploaded URL
        preview: Option<String>,
        /// Upload in flight
        uploading: bool,
        /// Inline upload error
        error: Option<String>,
    },
}

/// A field ready to be drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    /// Field name
    pub name: &'static str,
    /// Label
    pub label: &'static str,
    /// Declared type
    pub field_type: FieldType,
    /// Placeholder
    pub placeholder: Option<&'static str>,
    /// Help text
    pub hint: Option<&'static str>,
    /// Enforced at submit
    pub required: bool,
    /// Input disabled (form busy)
    pub disabled: bool,
    /// Server validation error shown beneath the control
    pub error: Option<String>,
    /// Control and bound value
    pub control: Control,
}

/// Render one field; `None` when its visibility predicate rejects the state
#[must_use]
pub fn render_field(
    _descriptor: &ModuleDescriptor,
    field: &ModuleFormField,
    state: &FormState,
    role: FormRole,
    disabled: bool,
    references: &ModuleManagerReferences,
    helpers: &RenderHelpers,
) -> Option<RenderedField> {
    if !field.is_visible(state, role) {
        return None;
    }

    let value = state.get(field.name).cloned().unwrap_or_default();
    let control = match field.field_type {
        FieldType::Checkbox => Control::Checkbox {
            checked: value.is_truthy(),
        },
        FieldType::Textarea => Control::TextArea {
            value: value.as_text(),
        },
        FieldType::Select => render_select(field, state, role, &value, references, helpers),
        FieldType::Image => render_image(field, &value, helpers),
        FieldType::Text | FieldType::Number | FieldType::Url | FieldType::Date => Control::Input {
            kind: field.field_type.input_type(),
            value: value.as_text(),
        },
    };

    Some(RenderedField {
        name: field.name,
        label: field.label,
        field_type: field.field_type,
        placeholder: field.placeholder,
        hint: field.hint,
        required: field.required,
        disabled,
        error: helpers.field_errors.get(field.name).cloned(),
        control,
    })
}

fn render_select(
    field: &ModuleFormField,
    state: &FormState,
    role: FormRole,
    value: &FieldValue,
    references: &ModuleManagerReferences,
    helpers: &RenderHelpers,
) -> Control {
    let resolved = resolve_options(field, references, &OptionsContext::form(state, role));
    let fetched = helpers
        .async_options
        .get(field.name)
        .map_or(&[][..], Vec::as_slice);
    let merged = merge_options(resolved, fetched);

    let filter = helpers
        .select_filters
        .get(field.name)
        .cloned()
        .unwrap_or_default();
    let options = if field.searchable {
        filter_options(merged, &filter)
    } else {
        merged
    };

    Control::Select {
        options,
        selected: value.as_text(),
        filter,
        loading: helpers.async_loading.contains(field.name),
        searchable: field.searchable,
    }
}

fn render_image(field: &ModuleFormField, value: &FieldValue, helpers: &RenderHelpers) -> Control {
    let url = value.as_text();
    let image = helpers.images.get(field.name);
    Control::Image {
        preview: image.and_then(|i| i.preview_for(&url)).map(str::to_owned),
        uploading: image.is_some_and(|i| i.uploading),
        error: image.and_then(|i| i.error.clone()),
        url,
    }
}

/// Merge local and fetched options, de-duplicated by value
///
/// The first occurrence of a value wins, so locally resolved options shadow
/// fetched ones with the same value.
#[must_use]
pub fn merge_options(resolved: Vec<FieldOption>, fetched: &[FieldOption]) -> Vec<FieldOption> {
    let mut seen = HashSet::new();
    resolved
        .into_iter()
        .chain(fetched.iter().cloned())
        .filter(|option| seen.insert(option.value.clone()))
        .collect()
}

/// Case-insensitive substring filter on label or value; blank filters keep everything
#[must_use]
pub fn filter_options(options: Vec<FieldOption>, filter: &str) -> Vec<FieldOption> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return options;
    }
    options
        .into_iter()
        .filter(|o| o.label.to_lowercase().contains(&needle) || o.value.to_lowercase().contains(&needle))
        .collect()
}

/// Submit-time `required` check over visible, non-checkbox fields
#[must_use]
pub fn validate_required(fields: &[ModuleFormField], state: &FormState, role: FormRole) -> Vec<FieldError> {
    fields
        .iter()
        .filter(|f| f.required && !f.is_checkbox() && f.is_visible(state, role))
        .filter(|f| state.get(f.name).is_none_or(FieldValue::is_blank))
        .map(|f| FieldError::for_field(f.name, messages::FIELD_REQUIRED))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_label_or_value() {
        let options = vec![FieldOption::new("r1", "Pizza Roma"), FieldOption::new("r2", "Sushi Bar")];
        assert_eq!(filter_options(options.clone(), "roma").len(), 1);
        assert_eq!(filter_options(options.clone(), "R2").len(), 1);
        assert_eq!(filter_options(options, "  ").len(), 2);
    }

    #[test]
    fn test_required_skips_hidden_and_checkbox() {
        fn never(_: &FormState, _: FormRole) -> bool {
            false
        }
        let fields = vec![
            ModuleFormField::new("name", "Nom", FieldType::Text).required(),
            ModuleFormField::new("hidden", "Caché", FieldType::Text).required().visible_when(never),
            ModuleFormField::new("is_active", "Actif", FieldType::Checkbox).required(),
        ];
        let mut state = FormState::new();
        state.set("name", "   ");
        let errors = validate_required(&fields, &state, FormRole::Create);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field.as_deref(), Some("name"));
    }
}
