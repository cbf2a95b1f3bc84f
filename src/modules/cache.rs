// ABOUTME: Typed caches owned by one module manager
// ABOUTME: Async select options keyed by (module, field) and menu items keyed by restaurant id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::field::FieldOption;
use super::value::ModuleItem;
use crate::constants::fields;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Composite key of an async option list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionsCacheKey {
    /// Owning module
    pub module_key: &'static str,
    /// Select field
    pub field_name: &'static str,
}

impl OptionsCacheKey {
    /// Build a key
    #[must_use]
    pub const fn new(module_key: &'static str, field_name: &'static str) -> Self {
        Self {
            module_key,
            field_name,
        }
    }
}

impl fmt::Display for OptionsCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module_key, self.field_name)
    }
}

/// Fetched async options, one list per key
#[derive(Debug, Clone, Default)]
pub struct OptionsCache {
    entries: HashMap<OptionsCacheKey, Vec<FieldOption>>,
}

impl OptionsCache {
    /// Cached list, if fetched
    #[must_use]
    pub fn get(&self, key: &OptionsCacheKey) -> Option<&[FieldOption]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Whether the key has been fetched
    #[must_use]
    pub fn contains(&self, key: &OptionsCacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a fetched list
    pub fn insert(&mut self, key: OptionsCacheKey, options: Vec<FieldOption>) {
        self.entries.insert(key, options);
    }

    /// Drop everything (new mount)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Restaurant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RestaurantId(String);

impl RestaurantId {
    /// Trimmed id; blank ids are rejected
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Menu items fetched per restaurant
#[derive(Debug, Clone, Default)]
pub struct MenuItemCache {
    loaded: HashMap<RestaurantId, Vec<ModuleItem>>,
    in_flight: HashSet<RestaurantId>,
}

impl MenuItemCache {
    /// Whether the restaurant's menu is cached
    #[must_use]
    pub fn is_loaded(&self, restaurant: &RestaurantId) -> bool {
        self.loaded.contains_key(restaurant)
    }

    /// Whether a fetch for the restaurant is running
    #[must_use]
    pub fn is_loading(&self, restaurant: &RestaurantId) -> bool {
        self.in_flight.contains(restaurant)
    }

    /// Claim the fetch for a restaurant; `false` if cached or already in flight
    pub fn begin(&mut self, restaurant: &RestaurantId) -> bool {
        if self.is_loaded(restaurant) || self.is_loading(restaurant) {
            return false;
        }
        self.in_flight.insert(restaurant.clone())
    }

    /// Store a fetched menu, tagging items that lack their `restaurant_id`
    pub fn finish(&mut self, restaurant: &RestaurantId, items: Vec<ModuleItem>) {
        self.in_flight.remove(restaurant);
        let items = items
            .into_iter()
            .map(|mut item| {
                if item.text(fields::RESTAURANT_ID).is_none() {
                    item.insert(fields::RESTAURANT_ID, Value::String(restaurant.to_string()));
                }
                item
            })
            .collect();
        self.loaded.insert(restaurant.clone(), items);
    }

    /// Release a failed fetch so it can be retried
    pub fn abort(&mut self, restaurant: &RestaurantId) {
        self.in_flight.remove(restaurant);
    }

    /// Cached menu of one restaurant
    #[must_use]
    pub fn items(&self, restaurant: &RestaurantId) -> &[ModuleItem] {
        self.loaded.get(restaurant).map_or(&[], Vec::as_slice)
    }

    /// Every cached menu item, ordered by restaurant id
    #[must_use]
    pub fn all_items(&self) -> Vec<ModuleItem> {
        let mut restaurants: Vec<&RestaurantId> = self.loaded.keys().collect();
        restaurants.sort();
        restaurants
            .into_iter()
            .flat_map(|r| self.items(r).iter().cloned())
            .collect()
    }
}
