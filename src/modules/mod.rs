// ABOUTME: Generic entity-module framework: descriptors, form helpers, renderer and manager
// ABOUTME: One declarative descriptor per module drives list, create, edit and delete flows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! # Entity modules
//!
//! A [`ModuleDescriptor`] declares one manageable entity type: its REST
//! endpoints and ordered [`ModuleFormField`]s. A [`ModuleManager`] runs that
//! descriptor against an [`ApiTransport`](crate::api::ApiTransport) without
//! any per-module code.

/// Typed option and menu caches
pub mod cache;
/// Module descriptors and per-item endpoints
pub mod descriptor;
/// Field descriptors, option sources and change effects
pub mod field;
/// State and payload helpers
pub mod form;
/// Lifecycle orchestration
pub mod manager;
/// Field rendering view model
pub mod render;
/// Image upload flow
pub mod upload;
/// Dynamic values, items and form state
pub mod value;

pub use cache::{MenuItemCache, OptionsCache, OptionsCacheKey, RestaurantId};
pub use descriptor::{ItemEndpoint, ModuleDescriptor};
pub use field::{
    AsyncOptionsConfig, ChangeContext, FieldEffect, FieldOption, FieldType, ModuleFormField,
    OptionsContext, OptionsSource,
};
pub use form::{
    build_default_state, build_item_subtitle, build_item_title, build_payload,
    format_date_for_input, map_item_to_state, parse_id_list, resolve_options,
};
pub use manager::{
    FormView, ItemView, ModuleManager, ModuleSnapshot, StatusKind, StatusMessage, UpdateOutcome,
};
pub use render::{filter_options, merge_options, render_field, validate_required, Control, RenderHelpers, RenderedField};
pub use upload::{upload_image, validate_image, ImageFieldState};
pub use value::{FieldValue, FormRole, FormState, ModuleItem, ModuleManagerReferences};
