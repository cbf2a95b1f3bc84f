// ABOUTME: Declarative field descriptors for entity modules
// ABOUTME: Field types, option sources, async option configs, visibility predicates and change effects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::value::{FieldValue, FormRole, FormState, ModuleItem, ModuleManagerReferences};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text
    Text,
    /// Multi-line text
    Textarea,
    /// Numeric input
    Number,
    /// URL input
    Url,
    /// Option list
    Select,
    /// Boolean toggle
    Checkbox,
    /// Calendar date (`YYYY-MM-DD`)
    Date,
    /// Uploaded image URL
    Image,
}

impl FieldType {
    /// HTML input type the field binds to
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Url => "url",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Image => "file",
            Self::Text | Self::Textarea | Self::Select => "text",
        }
    }
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldOption {
    /// Value stored in form state
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl FieldOption {
    /// Build an option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Context handed to derived option resolvers
#[derive(Debug, Clone, Copy)]
pub struct OptionsContext<'a> {
    /// Current form state, when rendering a form
    pub state: Option<&'a FormState>,
    /// Entity being displayed, when rendering a list row
    pub item: Option<&'a ModuleItem>,
    /// Form role, when rendering a form
    pub role: Option<FormRole>,
}

impl<'a> OptionsContext<'a> {
    /// Context for a form render
    #[must_use]
    pub const fn form(state: &'a FormState, role: FormRole) -> Self {
        Self {
            state: Some(state),
            item: None,
            role: Some(role),
        }
    }

    /// Context for a list row
    #[must_use]
    pub const fn item(item: &'a ModuleItem) -> Self {
        Self {
            state: None,
            item: Some(item),
            role: None,
        }
    }

    /// No context at all
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            state: None,
            item: None,
            role: None,
        }
    }

    /// Text value of `name` from the form state, or from the row item
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<String> {
        if let Some(state) = self.state {
            let text = state.text(name);
            return (!text.is_empty()).then_some(text);
        }
        self.item.and_then(|item| item.text(name))
    }
}

/// Resolver computing options from reference lists and context
pub type DerivedOptionsFn = fn(&ModuleManagerReferences, &OptionsContext<'_>) -> Vec<FieldOption>;

/// Maps one fetched entity to an option; `None` skips the entity
pub type OptionMapperFn = fn(&ModuleItem) -> Option<FieldOption>;

/// Visibility predicate over the current form
pub type VisibleWhenFn = fn(&FormState, FormRole) -> bool;

/// Side effects of a field value change
pub type OnChangeFn = fn(&ChangeContext<'_>) -> Vec<FieldEffect>;

/// Where a select's locally resolved options come from
#[derive(Clone, Copy, Default)]
pub enum OptionsSource {
    /// No local options
    #[default]
    None,
    /// Fixed list
    Static(&'static [(&'static str, &'static str)]),
    /// Computed from reference lists and context
    Derived(DerivedOptionsFn),
}

impl fmt::Debug for OptionsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(options) => f.debug_tuple("Static").field(&options.len()).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Options fetched once per mount from an endpoint
#[derive(Clone, Copy)]
pub struct AsyncOptionsConfig {
    /// Endpoint path returning an entity list
    pub endpoint: &'static str,
    /// Entity-to-option mapping
    pub mapper: OptionMapperFn,
}

impl fmt::Debug for AsyncOptionsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncOptionsConfig")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Arguments of an on-change callback
#[derive(Debug, Clone, Copy)]
pub struct ChangeContext<'a> {
    /// New value of the field
    pub value: &'a FieldValue,
    /// Form state after the change was applied
    pub state: &'a FormState,
    /// Form being edited
    pub role: FormRole,
    /// Field that changed
    pub field_name: &'a str,
}

/// Mutation requested by an on-change callback
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEffect {
    /// Reset a field to empty
    Clear(String),
    /// Assign a value to another field
    Set(String, FieldValue),
    /// Fetch (or reuse) the menu of a restaurant
    LoadRestaurantMenu(String),
}

/// One editable attribute of a module's entity
#[derive(Clone)]
pub struct ModuleFormField {
    /// API field name
    pub name: &'static str,
    /// Display label
    pub label: &'static str,
    /// Input type
    pub field_type: FieldType,
    /// Placeholder text
    pub placeholder: Option<&'static str>,
    /// Help text shown under the control
    pub hint: Option<&'static str>,
    /// Enforced at submit time
    pub required: bool,
    /// Initial value for new entities
    pub default: Option<FieldValue>,
    /// Select with a live filter input
    pub searchable: bool,
    /// Local option source
    pub options: OptionsSource,
    /// Remote option source
    pub async_options: Option<AsyncOptionsConfig>,
    /// Hide the field unless the predicate holds
    pub visible_when: Option<VisibleWhenFn>,
    /// Dependent-field side effects
    pub on_value_change: Option<OnChangeFn>,
}

impl ModuleFormField {
    /// Field with no options, rules or effects
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            placeholder: None,
            hint: None,
            required: false,
            default: None,
            searchable: false,
            options: OptionsSource::None,
            async_options: None,
            visible_when: None,
            on_value_change: None,
        }
    }

    /// Mark as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the placeholder
    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the hint
    #[must_use]
    pub const fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Set the default value
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Enable the live filter input
    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Fixed `(value, label)` options
    #[must_use]
    pub const fn options(mut self, options: &'static [(&'static str, &'static str)]) -> Self {
        self.options = OptionsSource::Static(options);
        self
    }

    /// Options computed from reference lists
    #[must_use]
    pub const fn derived_options(mut self, resolver: DerivedOptionsFn) -> Self {
        self.options = OptionsSource::Derived(resolver);
        self
    }

    /// Options fetched from `endpoint`
    #[must_use]
    pub const fn async_options(mut self, endpoint: &'static str, mapper: OptionMapperFn) -> Self {
        self.async_options = Some(AsyncOptionsConfig { endpoint, mapper });
        self
    }

    /// Conditional visibility
    #[must_use]
    pub const fn visible_when(mut self, predicate: VisibleWhenFn) -> Self {
        self.visible_when = Some(predicate);
        self
    }

    /// Change side effects
    #[must_use]
    pub const fn on_change(mut self, callback: OnChangeFn) -> Self {
        self.on_value_change = Some(callback);
        self
    }

    /// Evaluate the visibility predicate (visible when none is set)
    #[must_use]
    pub fn is_visible(&self, state: &FormState, role: FormRole) -> bool {
        self.visible_when.is_none_or(|predicate| predicate(state, role))
    }

    /// Checkbox field
    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        self.field_type == FieldType::Checkbox
    }
}

impl fmt::Debug for ModuleFormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleFormField")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .field("options", &self.options)
            .field("async_options", &self.async_options)
            .field("visible_when", &self.visible_when.is_some())
            .field("on_value_change", &self.on_value_change.is_some())
            .finish_non_exhaustive()
    }
}
