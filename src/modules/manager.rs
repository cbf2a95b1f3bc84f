// ABOUTME: Lifecycle orchestration for one entity module (load, create, edit, delete)
// ABOUTME: Owns list/form/busy state, typed option and menu caches, and per-role status messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! # Module manager
//!
//! One [`ModuleManager`] drives one [`ModuleDescriptor`]. Every method takes
//! `&self`; state lives behind a `tokio::sync::RwLock` that is never held
//! across a network call, so a shared manager observes busy flags from
//! concurrent tasks and refuses duplicate submissions before they reach the
//! transport.

use super::cache::{MenuItemCache, OptionsCache, OptionsCacheKey, RestaurantId};
use super::descriptor::ModuleDescriptor;
use super::field::{ChangeContext, FieldEffect, FieldType};
use super::form::{build_default_state, build_item_subtitle, build_item_title, build_payload, map_item_to_state};
use super::render::{render_field, validate_required, RenderHelpers, RenderedField};
use super::upload::{self, ImageFieldState};
use super::value::{FieldValue, FormRole, FormState, ModuleItem, ModuleManagerReferences};
use crate::api::{unwrap_list, ApiRequest, ApiTransport, UploadFile};
use crate::constants::{endpoints, fields, messages, references as reference_lists};
use crate::errors::{AppError, AppResult, ErrorCode, FieldError};
use crate::logging::AppLogger;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Operation failed
    Error,
    /// Operation succeeded
    Success,
    /// Nothing happened (e.g. nothing to save)
    Neutral,
}

/// Transient status shown in a modal or above the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    /// Severity
    pub kind: StatusKind,
    /// Text shown to the user
    pub text: String,
}

impl StatusMessage {
    /// Error status
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Success status
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    /// Neutral status
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Neutral,
            text: text.into(),
        }
    }
}

/// Result of an update request that passed the client-side guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Payload sent and list reloaded
    Saved,
    /// Payload was empty; no request sent
    NothingToSave,
}

/// A form as the front end draws it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    /// Create or edit
    pub role: FormRole,
    /// Modal open
    pub open: bool,
    /// Submission in flight
    pub busy: bool,
    /// Last status of this form
    pub status: Option<StatusMessage>,
    /// Visible fields in descriptor order
    pub fields: Vec<RenderedField>,
}

/// One list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Entity id
    pub id: Option<String>,
    /// Row title
    pub title: String,
    /// Row subtitle
    pub subtitle: Option<String>,
    /// Delete in flight for this row
    pub deleting: bool,
}

/// Flags and statuses of a module at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSnapshot {
    /// Module key
    pub key: &'static str,
    /// Number of items listed
    pub item_count: usize,
    /// List fetch in flight
    pub loading: bool,
    /// Last list fetch error
    pub list_error: Option<String>,
    /// Last delete outcome
    pub list_status: Option<StatusMessage>,
    /// Create modal open
    pub create_open: bool,
    /// Create submission in flight
    pub creating: bool,
    /// Create form status
    pub create_status: Option<StatusMessage>,
    /// Edit modal open
    pub edit_open: bool,
    /// Update submission in flight
    pub updating: bool,
    /// Edit form status
    pub edit_status: Option<StatusMessage>,
    /// Item bound to the edit modal
    pub selected_id: Option<String>,
    /// Row being deleted
    pub deleting_id: Option<String>,
}

#[derive(Debug, Default)]
struct FormSlot {
    open: bool,
    values: FormState,
    busy: bool,
    status: Option<StatusMessage>,
    field_errors: Vec<FieldError>,
    select_filters: HashMap<String, String>,
    images: HashMap<String, ImageFieldState>,
}

impl FormSlot {
    fn reset(&mut self, values: FormState) {
        self.values = values;
        self.status = None;
        self.field_errors.clear();
        self.select_filters.clear();
        self.images.clear();
    }

    fn record_failure(&mut self, error: &AppError) {
        self.field_errors.clone_from(&error.field_errors);
        self.status = Some(StatusMessage::error(error.message.clone()));
    }
}

#[derive(Debug, Default)]
struct ManagerState {
    items: Vec<ModuleItem>,
    loading: bool,
    loads_in_flight: usize,
    load_generation: u64,
    list_error: Option<String>,
    list_status: Option<StatusMessage>,
    create: FormSlot,
    edit: FormSlot,
    selected_id: Option<String>,
    deleting_id: Option<String>,
    options: OptionsCache,
    async_loading: HashSet<&'static str>,
    menu_items: MenuItemCache,
}

impl ManagerState {
    const fn slot(&self, role: FormRole) -> &FormSlot {
        match role {
            FormRole::Create => &self.create,
            FormRole::Edit => &self.edit,
        }
    }

    fn slot_mut(&mut self, role: FormRole) -> &mut FormSlot {
        match role {
            FormRole::Create => &mut self.create,
            FormRole::Edit => &mut self.edit,
        }
    }

    fn find_item(&self, id: &str) -> Option<&ModuleItem> {
        self.items.iter().find(|item| item.id().as_deref() == Some(id))
    }

    fn begin_load(&mut self) -> u64 {
        self.loads_in_flight += 1;
        self.loading = true;
        self.load_generation += 1;
        self.load_generation
    }

    /// Settle one fetch; `true` when it is the latest one started
    fn finish_load(&mut self, generation: u64) -> bool {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        self.loading = self.loads_in_flight > 0;
        generation == self.load_generation
    }
}

/// Orchestrates one module's list, forms and mutations
pub struct ModuleManager {
    descriptor: ModuleDescriptor,
    transport: Arc<dyn ApiTransport>,
    menu_items_limit: u32,
    state: RwLock<ManagerState>,
}

impl std::fmt::Debug for ModuleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleManager")
            .field("key", &self.descriptor.key)
            .field("menu_items_limit", &self.menu_items_limit)
            .finish_non_exhaustive()
    }
}

impl ModuleManager {
    /// Manager for `descriptor` sending requests through `transport`
    #[must_use]
    pub fn new(descriptor: ModuleDescriptor, transport: Arc<dyn ApiTransport>, menu_items_limit: u32) -> Self {
        let create = FormSlot {
            values: build_default_state(&descriptor.fields),
            ..FormSlot::default()
        };
        Self {
            descriptor,
            transport,
            menu_items_limit,
            state: RwLock::new(ManagerState {
                create,
                ..ManagerState::default()
            }),
        }
    }

    /// Descriptor driving this manager
    #[must_use]
    pub const fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    /// Module key
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.descriptor.key
    }

    /// Mount: reset option caches, then load the list and async options together
    pub async fn mount(&self) -> AppResult<()> {
        self.state.write().await.options.clear();
        let (loaded, ()) = tokio::join!(self.load(), self.load_async_options());
        loaded
    }

    /// Fetch the item list and replace the current one
    ///
    /// Refused while another fetch is in flight. The edit form is re-derived
    /// from the refreshed item when the selection survives; otherwise the
    /// selection is cleared and the edit modal closed.
    pub async fn load(&self) -> AppResult<()> {
        let generation = {
            let mut state = self.state.write().await;
            if state.loading {
                return Err(AppError::operation_in_progress());
            }
            state.begin_load()
        };
        self.fetch_items(generation).await
    }

    /// Fetch that supersedes any fetch already in flight
    async fn refresh(&self) -> AppResult<()> {
        let generation = self.state.write().await.begin_load();
        self.fetch_items(generation).await
    }

    async fn fetch_items(&self, generation: u64) -> AppResult<()> {
        debug!(module = %self.key(), endpoint = %self.descriptor.fetch_endpoint, "Loading module items");

        let result = self
            .transport
            .request(ApiRequest::get(self.descriptor.fetch_endpoint.clone()))
            .await;

        let mut state = self.state.write().await;
        if !state.finish_load(generation) {
            debug!(module = %self.key(), "Discarding superseded item list");
            return result.map(|_| ());
        }
        match result {
            Ok(body) => {
                state.items = unwrap_list(body);
                state.list_error = None;
                let selected = state
                    .selected_id
                    .as_deref()
                    .and_then(|id| state.find_item(id))
                    .map(|item| map_item_to_state(item, &self.descriptor.fields));
                match selected {
                    Some(values) => state.edit.values = values,
                    None if state.selected_id.is_some() => {
                        state.selected_id = None;
                        state.edit.open = false;
                    }
                    None => {}
                }
                AppLogger::log_module_operation(self.key(), "load", true, "");
                Ok(())
            }
            Err(error) => {
                state.list_error = Some(error.message.clone());
                AppLogger::log_module_operation(self.key(), "load", false, &error.message);
                Err(error)
            }
        }
    }

    /// Fetch every async option list not yet cached; failures are only logged
    pub async fn load_async_options(&self) {
        for field in &self.descriptor.fields {
            let Some(config) = field.async_options else {
                continue;
            };
            let key = OptionsCacheKey::new(self.key(), field.name);
            {
                let mut state = self.state.write().await;
                if state.options.contains(&key) || !state.async_loading.insert(field.name) {
                    continue;
                }
            }

            let result = self.transport.request(ApiRequest::get(config.endpoint)).await;

            let mut state = self.state.write().await;
            state.async_loading.remove(field.name);
            match result {
                Ok(body) => {
                    let options: Vec<_> = unwrap_list(body).iter().filter_map(config.mapper).collect();
                    debug!(options.key = %key, options.count = options.len(), "Async options loaded");
                    state.options.insert(key, options);
                }
                Err(error) => {
                    warn!(options.key = %key, error = %error, "Async options failed to load");
                }
            }
        }
    }

    /// Open the create modal with default values
    pub async fn open_create(&self) {
        let mut state = self.state.write().await;
        state.create.reset(build_default_state(&self.descriptor.fields));
        state.create.open = true;
    }

    /// Close the create modal
    pub async fn close_create(&self) {
        self.state.write().await.create.open = false;
    }

    /// Open the edit modal bound to the item `id`
    ///
    /// Preloads the restaurant menu when the form depends on it.
    pub async fn open_edit(&self, id: &str) -> AppResult<()> {
        let restaurant = {
            let mut state = self.state.write().await;
            let values = state
                .find_item(id)
                .map(|item| map_item_to_state(item, &self.descriptor.fields))
                .ok_or_else(|| AppError::not_found(messages::ITEM_NOT_FOUND))?;
            let restaurant = values.text(fields::RESTAURANT_ID);
            state.edit.reset(values);
            state.edit.open = true;
            state.selected_id = Some(id.to_owned());
            restaurant
        };

        if self.loads_restaurant_menu() && !restaurant.is_empty() {
            if let Err(error) = self.ensure_menu_items(&restaurant).await {
                warn!(module = %self.key(), error = %error, "Menu preload failed");
            }
        }
        Ok(())
    }

    /// Close the edit modal and drop the selection
    pub async fn close_edit(&self) {
        let mut state = self.state.write().await;
        state.edit.open = false;
        state.selected_id = None;
    }

    fn loads_restaurant_menu(&self) -> bool {
        self.descriptor
            .find_field(fields::RESTAURANT_ID)
            .is_some_and(|f| f.on_value_change.is_some())
    }

    /// Set a form value and apply the field's change effects
    ///
    /// Clears and assignments are applied before any menu fetch starts, so the
    /// dependent select is empty while the fetch is in flight.
    pub async fn set_field_value(&self, role: FormRole, name: &str, value: FieldValue) -> AppResult<()> {
        let field = self
            .descriptor
            .find_field(name)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown field: {name}")))?;

        let menus_to_load: Vec<String> = {
            let mut state = self.state.write().await;
            let slot = state.slot_mut(role);
            slot.values.set(field.name, value.clone());
            slot.field_errors.retain(|e| e.field.as_deref() != Some(name));

            let effects = field.on_value_change.map_or_else(Vec::new, |callback| {
                callback(&ChangeContext {
                    value: &value,
                    state: &slot.values,
                    role,
                    field_name: field.name,
                })
            });

            let mut menus = Vec::new();
            for effect in effects {
                match effect {
                    FieldEffect::Clear(target) => self.clear_slot(slot, &target),
                    FieldEffect::Set(target, v) => {
                        if self.descriptor.find_field(&target).is_some() {
                            slot.values.set(target, v);
                        }
                    }
                    FieldEffect::LoadRestaurantMenu(restaurant) => menus.push(restaurant),
                }
            }
            menus
        };

        for restaurant in menus_to_load {
            if let Err(error) = self.ensure_menu_items(&restaurant).await {
                warn!(module = %self.key(), restaurant = %restaurant, error = %error, "Menu fetch failed");
            }
        }
        Ok(())
    }

    fn clear_slot(&self, slot: &mut FormSlot, target: &str) {
        let Some(field) = self.descriptor.find_field(target) else {
            return;
        };
        let cleared = if field.is_checkbox() {
            FieldValue::Bool(false)
        } else {
            FieldValue::empty()
        };
        slot.values.set(field.name, cleared);
    }

    /// Set the live filter text of a select
    pub async fn set_select_filter(&self, role: FormRole, name: &str, text: &str) {
        let mut state = self.state.write().await;
        state
            .slot_mut(role)
            .select_filters
            .insert(name.to_owned(), text.to_owned());
    }

    /// Fetch a restaurant's menu items once; later calls reuse the cache
    pub async fn ensure_menu_items(&self, restaurant_id: &str) -> AppResult<()> {
        let Some(restaurant) = RestaurantId::parse(restaurant_id) else {
            return Ok(());
        };
        if !self.state.write().await.menu_items.begin(&restaurant) {
            return Ok(());
        }

        let path = format!(
            "{}?restaurant_id={}&limit={}",
            endpoints::MENU_ITEMS,
            urlencoding::encode(restaurant.as_str()),
            self.menu_items_limit
        );
        let result = self.transport.request(ApiRequest::get(path)).await;

        let mut state = self.state.write().await;
        match result {
            Ok(body) => {
                let items = unwrap_list(body);
                debug!(restaurant = %restaurant, count = items.len(), "Menu items cached");
                state.menu_items.finish(&restaurant, items);
                Ok(())
            }
            Err(error) => {
                state.menu_items.abort(&restaurant);
                Err(error)
            }
        }
    }

    /// Upload an image for an image field and store the returned URL
    ///
    /// Failures are kept on the field and do not touch the form status.
    pub async fn upload_image(&self, role: FormRole, name: &str, file: UploadFile) -> AppResult<String> {
        let field = self
            .descriptor
            .find_field(name)
            .filter(|f| f.field_type == FieldType::Image)
            .ok_or_else(|| AppError::invalid_input(format!("Not an image field: {name}")))?;

        {
            let mut state = self.state.write().await;
            let image = state.slot_mut(role).images.entry(field.name.to_owned()).or_default();
            if image.uploading {
                return Err(AppError::operation_in_progress());
            }
            image.begin();
        }

        let preview = file.file_name.clone();
        let result = upload::upload_image(self.transport.as_ref(), file).await;

        let mut state = self.state.write().await;
        let slot = state.slot_mut(role);
        let image = slot.images.entry(field.name.to_owned()).or_default();
        match result {
            Ok(url) => {
                image.succeed(preview, url.clone());
                slot.values.set(field.name, url.as_str());
                Ok(url)
            }
            Err(error) => {
                image.fail(error.message.clone());
                Err(error)
            }
        }
    }

    /// Remove an image: the field becomes "" and the preview is dropped
    pub async fn remove_image(&self, role: FormRole, name: &str) {
        let mut state = self.state.write().await;
        let slot = state.slot_mut(role);
        if let Some(image) = slot.images.get_mut(name) {
            image.reset();
        }
        if self.descriptor.find_field(name).is_some() {
            slot.values.set(name, "");
        }
    }

    /// Submit the create form
    pub async fn create(&self) -> AppResult<()> {
        let (endpoint, payload) = {
            let mut state = self.state.write().await;
            if state.create.busy {
                return Err(AppError::operation_in_progress());
            }
            let Some(endpoint) = self.descriptor.create_endpoint.clone() else {
                state.create.status = Some(StatusMessage::error(messages::CREATE_UNSUPPORTED));
                return Err(AppError::unsupported(messages::CREATE_UNSUPPORTED));
            };
            self.check_required(&mut state.create, FormRole::Create)?;
            let payload = build_payload(&state.create.values, &self.descriptor.fields);
            state.create.busy = true;
            state.create.status = None;
            (endpoint, payload)
        };

        debug!(module = %self.key(), fields = payload.len(), "Creating item");
        let result = self
            .transport
            .request(ApiRequest::post(endpoint, Value::Object(payload)))
            .await;

        if let Err(error) = result {
            let mut state = self.state.write().await;
            state.create.busy = false;
            state.create.record_failure(&error);
            AppLogger::log_module_operation(self.key(), "create", false, &error.message);
            return Err(error);
        }

        self.reload_after_mutation().await;
        let mut state = self.state.write().await;
        state.create.busy = false;
        state.create.reset(build_default_state(&self.descriptor.fields));
        state.create.status = Some(StatusMessage::success(messages::CREATED));
        state.create.open = false;
        AppLogger::log_module_operation(self.key(), "create", true, "");
        Ok(())
    }

    /// Submit the edit form for the selected item
    pub async fn update(&self) -> AppResult<UpdateOutcome> {
        let (endpoint, payload) = {
            let mut state = self.state.write().await;
            if state.edit.busy {
                return Err(AppError::operation_in_progress());
            }
            let Some(update_endpoint) = self.descriptor.update_endpoint.clone() else {
                state.edit.status = Some(StatusMessage::error(messages::UPDATE_UNSUPPORTED));
                return Err(AppError::unsupported(messages::UPDATE_UNSUPPORTED));
            };
            let selected = state
                .selected_id
                .clone()
                .and_then(|id| state.find_item(&id).cloned());
            let Some(item) = selected else {
                state.edit.status = Some(StatusMessage::error(messages::NO_SELECTION));
                return Err(AppError::invalid_input(messages::NO_SELECTION));
            };
            let endpoint = update_endpoint
                .resolve(&item)
                .ok_or_else(|| AppError::not_found(messages::ITEM_NOT_FOUND))?;

            self.check_required(&mut state.edit, FormRole::Edit)?;
            let payload = build_payload(&state.edit.values, &self.descriptor.fields);
            if payload.is_empty() {
                state.edit.status = Some(StatusMessage::neutral(messages::NOTHING_TO_SAVE));
                return Ok(UpdateOutcome::NothingToSave);
            }
            state.edit.busy = true;
            state.edit.status = None;
            (endpoint, payload)
        };

        debug!(module = %self.key(), endpoint = %endpoint, "Updating item");
        let result = self
            .transport
            .request(ApiRequest::put(endpoint, Value::Object(payload)))
            .await;

        if let Err(error) = result {
            let mut state = self.state.write().await;
            state.edit.busy = false;
            state.edit.record_failure(&error);
            AppLogger::log_module_operation(self.key(), "update", false, &error.message);
            return Err(error);
        }

        self.reload_after_mutation().await;
        let mut state = self.state.write().await;
        state.edit.busy = false;
        state.edit.field_errors.clear();
        state.edit.status = Some(StatusMessage::success(messages::UPDATED));
        state.edit.open = false;
        state.selected_id = None;
        AppLogger::log_module_operation(self.key(), "update", true, "");
        Ok(UpdateOutcome::Saved)
    }

    /// Delete the item `id`; only that row shows a busy state
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let endpoint = {
            let mut state = self.state.write().await;
            let Some(delete_endpoint) = self.descriptor.delete_endpoint.clone() else {
                state.list_status = Some(StatusMessage::error(messages::DELETE_UNSUPPORTED));
                return Err(AppError::unsupported(messages::DELETE_UNSUPPORTED));
            };
            if state.deleting_id.is_some() {
                return Err(AppError::operation_in_progress());
            }
            let endpoint = state
                .find_item(id)
                .and_then(|item| delete_endpoint.resolve(item))
                .ok_or_else(|| AppError::not_found(messages::ITEM_NOT_FOUND))?;
            state.deleting_id = Some(id.to_owned());
            state.list_status = None;
            endpoint
        };

        debug!(module = %self.key(), endpoint = %endpoint, "Deleting item");
        let result = self.transport.request(ApiRequest::delete(endpoint)).await;

        if let Err(error) = result {
            let mut state = self.state.write().await;
            state.deleting_id = None;
            state.list_status = Some(StatusMessage::error(error.message.clone()));
            AppLogger::log_module_operation(self.key(), "delete", false, &error.message);
            return Err(error);
        }

        self.reload_after_mutation().await;
        let mut state = self.state.write().await;
        state.deleting_id = None;
        state.list_status = Some(StatusMessage::success(messages::DELETED));
        AppLogger::log_module_operation(self.key(), "delete", true, "");
        Ok(())
    }

    async fn reload_after_mutation(&self) {
        if let Err(error) = self.refresh().await {
            warn!(module = %self.key(), error = %error, "Reload after mutation failed");
        }
    }

    fn check_required(&self, slot: &mut FormSlot, role: FormRole) -> AppResult<()> {
        let missing = validate_required(&self.descriptor.fields, &slot.values, role);
        if missing.is_empty() {
            return Ok(());
        }
        let error = AppError::new(ErrorCode::MissingRequiredField, messages::FIELD_REQUIRED)
            .with_field_errors(missing);
        slot.record_failure(&error);
        Err(error)
    }

    /// Render a form against the page's reference lists
    ///
    /// Cached restaurant menus are exposed to option resolvers as the
    /// `menu_items` reference list.
    pub async fn render_form(&self, role: FormRole, references: &ModuleManagerReferences) -> FormView {
        let state = self.state.read().await;
        let slot = state.slot(role);

        let mut references = references.clone();
        references.insert(reference_lists::MENU_ITEMS, state.menu_items.all_items());

        let mut helpers = RenderHelpers {
            select_filters: slot.select_filters.clone(),
            images: slot.images.clone(),
            async_loading: state.async_loading.iter().map(|n| (*n).to_owned()).collect(),
            ..RenderHelpers::default()
        };
        helpers.set_field_errors(&slot.field_errors);
        for field in &self.descriptor.fields {
            let key = OptionsCacheKey::new(self.key(), field.name);
            if let Some(options) = state.options.get(&key) {
                helpers.async_options.insert(field.name.to_owned(), options.to_vec());
            }
        }

        let fields = self
            .descriptor
            .fields
            .iter()
            .filter_map(|field| {
                render_field(&self.descriptor, field, &slot.values, role, slot.busy, &references, &helpers)
            })
            .collect();

        FormView {
            role,
            open: slot.open,
            busy: slot.busy,
            status: slot.status.clone(),
            fields,
        }
    }

    /// List rows with titles and subtitles
    pub async fn items_view(&self, references: &ModuleManagerReferences) -> Vec<ItemView> {
        let state = self.state.read().await;
        state
            .items
            .iter()
            .map(|item| {
                let id = item.id();
                ItemView {
                    deleting: id.is_some() && id == state.deleting_id,
                    title: build_item_title(&self.descriptor, item, references),
                    subtitle: build_item_subtitle(&self.descriptor, item, references),
                    id,
                }
            })
            .collect()
    }

    /// Flags and statuses at this instant
    pub async fn snapshot(&self) -> ModuleSnapshot {
        let state = self.state.read().await;
        ModuleSnapshot {
            key: self.key(),
            item_count: state.items.len(),
            loading: state.loading,
            list_error: state.list_error.clone(),
            list_status: state.list_status.clone(),
            create_open: state.create.open,
            creating: state.create.busy,
            create_status: state.create.status.clone(),
            edit_open: state.edit.open,
            updating: state.edit.busy,
            edit_status: state.edit.status.clone(),
            selected_id: state.selected_id.clone(),
            deleting_id: state.deleting_id.clone(),
        }
    }

    /// Current items
    pub async fn items(&self) -> Vec<ModuleItem> {
        self.state.read().await.items.clone()
    }

    /// Current values of a form
    pub async fn form_state(&self, role: FormRole) -> FormState {
        self.state.read().await.slot(role).values.clone()
    }

    /// Current status of a form
    pub async fn status(&self, role: FormRole) -> Option<StatusMessage> {
        self.state.read().await.slot(role).status.clone()
    }

    /// Server validation errors recorded on a form
    pub async fn field_errors(&self, role: FormRole) -> Vec<FieldError> {
        self.state.read().await.slot(role).field_errors.clone()
    }

    /// Cached menu of a restaurant
    pub async fn menu_items(&self, restaurant_id: &str) -> Vec<ModuleItem> {
        let state = self.state.read().await;
        RestaurantId::parse(restaurant_id)
            .map(|r| state.menu_items.items(&r).to_vec())
            .unwrap_or_default()
    }
}
