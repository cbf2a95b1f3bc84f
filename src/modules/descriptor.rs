// ABOUTME: Static definition of one manageable entity type
// ABOUTME: REST endpoints, per-item endpoint resolution, ordered fields and title/subtitle hooks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::field::ModuleFormField;
use super::value::{ModuleItem, ModuleManagerReferences};
use std::fmt;

/// Display text derived from an item and the page's reference lists
pub type ItemTextFn = fn(&ModuleItem, &ModuleManagerReferences) -> Option<String>;

/// Per-item endpoint path
#[derive(Clone)]
pub enum ItemEndpoint {
    /// `<base>/<urlencoded id>`
    IdSuffix(&'static str),
    /// Arbitrary function of the item; must only read `id`
    Custom(fn(&ModuleItem) -> Option<String>),
}

impl ItemEndpoint {
    /// Endpoint for one item, `None` when the item has no usable id
    #[must_use]
    pub fn resolve(&self, item: &ModuleItem) -> Option<String> {
        match self {
            Self::IdSuffix(base) => {
                let id = item.id()?;
                Some(format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    urlencoding::encode(&id)
                ))
            }
            Self::Custom(resolver) => resolver(item),
        }
    }
}

impl fmt::Debug for ItemEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdSuffix(base) => f.debug_tuple("IdSuffix").field(base).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One entity module: endpoints plus an ordered field list
#[derive(Clone)]
pub struct ModuleDescriptor {
    /// Unique key, also the reference-list name of this module's items
    pub key: &'static str,
    /// Section title
    pub title: &'static str,
    /// Section description
    pub description: &'static str,
    /// List endpoint
    pub fetch_endpoint: String,
    /// Create endpoint; `None` disables creation
    pub create_endpoint: Option<String>,
    /// Update endpoint per item; `None` disables editing
    pub update_endpoint: Option<ItemEndpoint>,
    /// Delete endpoint per item; `None` disables deletion
    pub delete_endpoint: Option<ItemEndpoint>,
    /// Ordered form fields
    pub fields: Vec<ModuleFormField>,
    /// Row title override
    pub item_title: Option<ItemTextFn>,
    /// Row subtitle override
    pub item_subtitle: Option<ItemTextFn>,
}

impl ModuleDescriptor {
    /// Read-only module listing `fetch_endpoint`
    pub fn new(
        key: &'static str,
        title: &'static str,
        description: &'static str,
        fetch_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            key,
            title,
            description,
            fetch_endpoint: fetch_endpoint.into(),
            create_endpoint: None,
            update_endpoint: None,
            delete_endpoint: None,
            fields: Vec::new(),
            item_title: None,
            item_subtitle: None,
        }
    }

    /// Full CRUD on one collection path: POST `base`, PUT/DELETE `base/<id>`
    #[must_use]
    pub fn crud(mut self, base: &'static str) -> Self {
        self.create_endpoint = Some(base.to_owned());
        self.update_endpoint = Some(ItemEndpoint::IdSuffix(base));
        self.delete_endpoint = Some(ItemEndpoint::IdSuffix(base));
        self
    }

    /// Set the create endpoint
    #[must_use]
    pub fn create_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.create_endpoint = Some(endpoint.into());
        self
    }

    /// Set the update endpoint
    #[must_use]
    pub fn update_endpoint(mut self, endpoint: ItemEndpoint) -> Self {
        self.update_endpoint = Some(endpoint);
        self
    }

    /// Set the delete endpoint
    #[must_use]
    pub fn delete_endpoint(mut self, endpoint: ItemEndpoint) -> Self {
        self.delete_endpoint = Some(endpoint);
        self
    }

    /// Drop the delete endpoint
    #[must_use]
    pub fn without_delete(mut self) -> Self {
        self.delete_endpoint = None;
        self
    }

    /// Append a field
    #[must_use]
    pub fn field(mut self, field: ModuleFormField) -> Self {
        self.fields.push(field);
        self
    }

    /// Row title override
    #[must_use]
    pub fn item_title(mut self, title: ItemTextFn) -> Self {
        self.item_title = Some(title);
        self
    }

    /// Row subtitle override
    #[must_use]
    pub fn item_subtitle(mut self, subtitle: ItemTextFn) -> Self {
        self.item_subtitle = Some(subtitle);
        self
    }

    /// Field by name
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&ModuleFormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field by name, mutable (used when deriving module variants)
    pub fn find_field_mut(&mut self, name: &str) -> Option<&mut ModuleFormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("key", &self.key)
            .field("fetch_endpoint", &self.fetch_endpoint)
            .field("create_endpoint", &self.create_endpoint)
            .field("update_endpoint", &self.update_endpoint)
            .field("delete_endpoint", &self.delete_endpoint)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_suffix_encodes_id() {
        let item = ModuleItem::from_value(json!({"id": "a b/c"})).unwrap_or_default();
        let endpoint = ItemEndpoint::IdSuffix("/admin/promotions/");
        assert_eq!(endpoint.resolve(&item).as_deref(), Some("/admin/promotions/a%20b%2Fc"));
    }

    #[test]
    fn test_missing_id_has_no_endpoint() {
        let item = ModuleItem::from_value(json!({"name": "x"})).unwrap_or_default();
        assert_eq!(ItemEndpoint::IdSuffix("/admin/promotions").resolve(&item), None);
    }

    #[test]
    fn test_crud_sets_all_endpoints() {
        let descriptor = ModuleDescriptor::new("k", "K", "", "/k").crud("/k");
        assert!(descriptor.create_endpoint.is_some());
        assert!(descriptor.update_endpoint.is_some());
        assert!(descriptor.without_delete().delete_endpoint.is_none());
    }
}
