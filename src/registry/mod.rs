// ABOUTME: Homepage module registry: categories, selections, recommended, promotions, deals, announcements
// ABOUTME: Declares fields, cross-module references and the restaurant-menu variant of descriptors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! # Module registry
//!
//! The homepage admin screen is six entity modules. Cross-module links are
//! declarative: a select either reads another module's current items through
//! [`ModuleManagerReferences`] or fetches a list once per mount.

/// Page-level composition and session handling
pub mod page;

pub use page::{AdminPage, PageOutcome};

use crate::constants::{endpoints, fields, references};
use crate::modules::{
    ChangeContext, FieldEffect, FieldOption, FieldType, FormRole, FormState, ModuleDescriptor,
    ModuleFormField, ModuleItem, ModuleManagerReferences, OptionsContext,
};

/// Module keys, also used as reference-list names
pub mod keys {
    /// Homepage categories
    pub const CATEGORIES: &str = "categories";
    /// Thematic selections
    pub const THEMATIC_SELECTIONS: &str = "thematic_selections";
    /// Recommended dishes
    pub const RECOMMENDED: &str = "recommended";
    /// Promotions
    pub const PROMOTIONS: &str = "promotions";
    /// Daily deals
    pub const DAILY_DEALS: &str = "daily_deals";
    /// Announcements
    pub const ANNOUNCEMENTS: &str = "announcements";
}

const PROMOTION_TYPES: &[(&str, &str)] = &[
    ("percentage", "Pourcentage"),
    ("fixed_amount", "Montant fixe"),
    ("free_delivery", "Livraison gratuite"),
    ("buy_x_get_y", "Achetez X, obtenez Y"),
];

/// Homepage modules in display order, without derived side effects
#[must_use]
pub fn homepage_modules() -> Vec<ModuleDescriptor> {
    vec![
        categories(),
        thematic_selections(),
        recommended(),
        promotions(),
        daily_deals(),
        announcements(),
    ]
}

/// Homepage modules as mounted on the page
///
/// `recommended` and `promotions` get the restaurant-menu loader attached to
/// their `restaurant_id` select.
#[must_use]
pub fn page_modules() -> Vec<ModuleDescriptor> {
    homepage_modules()
        .into_iter()
        .map(|descriptor| match descriptor.key {
            keys::RECOMMENDED | keys::PROMOTIONS => with_restaurant_menu_loader(descriptor),
            _ => descriptor,
        })
        .collect()
}

/// Attach the menu loader to a descriptor's `restaurant_id` field
#[must_use]
pub fn with_restaurant_menu_loader(mut descriptor: ModuleDescriptor) -> ModuleDescriptor {
    if let Some(field) = descriptor.find_field_mut(fields::RESTAURANT_ID) {
        field.on_value_change = Some(clear_menu_and_load);
    }
    descriptor
}

/// Restaurant change: clear menu selections, then load that restaurant's menu
#[must_use]
pub fn clear_menu_and_load(ctx: &ChangeContext<'_>) -> Vec<FieldEffect> {
    let mut effects = vec![
        FieldEffect::Clear(fields::MENU_ITEM_ID.to_owned()),
        FieldEffect::Clear(fields::MENU_ITEM_IDS.to_owned()),
    ];
    if !ctx.value.is_blank() {
        effects.push(FieldEffect::LoadRestaurantMenu(ctx.value.as_text().trim().to_owned()));
    }
    effects
}

fn categories() -> ModuleDescriptor {
    ModuleDescriptor::new(
        keys::CATEGORIES,
        "Catégories",
        "Catégories affichées sur la page d'accueil de l'application",
        endpoints::HOMEPAGE_CATEGORIES,
    )
    .crud(endpoints::HOMEPAGE_CATEGORIES)
    .field(ModuleFormField::new("name", "Nom", FieldType::Text).required())
    .field(ModuleFormField::new("description", "Description", FieldType::Textarea))
    .field(ModuleFormField::new("image_url", "Image", FieldType::Image))
    .field(display_order())
    .field(is_active())
}

fn thematic_selections() -> ModuleDescriptor {
    ModuleDescriptor::new(
        keys::THEMATIC_SELECTIONS,
        "Sélections thématiques",
        "Regroupements éditoriaux rattachés à une catégorie",
        endpoints::HOMEPAGE_THEMATIC,
    )
    .crud(endpoints::HOMEPAGE_THEMATIC)
    .field(ModuleFormField::new("name", "Nom", FieldType::Text).required())
    .field(
        ModuleFormField::new("category_id", "Catégorie", FieldType::Select)
            .required()
            .derived_options(category_options),
    )
    .field(ModuleFormField::new("description", "Description", FieldType::Textarea))
    .field(ModuleFormField::new("image_url", "Image", FieldType::Image))
    .field(display_order())
    .field(is_active())
    .item_subtitle(selection_subtitle)
}

fn recommended() -> ModuleDescriptor {
    ModuleDescriptor::new(
        keys::RECOMMENDED,
        "Plats recommandés",
        "Plats mis en avant sur la page d'accueil",
        endpoints::HOMEPAGE_RECOMMENDED,
    )
    .crud(endpoints::HOMEPAGE_RECOMMENDED)
    .field(restaurant_select().required())
    .field(menu_item_select().required())
    .field(ModuleFormField::new("reason", "Raison", FieldType::Text).placeholder("Coup de cœur de la semaine"))
    .field(display_order())
    .field(is_active())
}

fn promotions() -> ModuleDescriptor {
    ModuleDescriptor::new(
        keys::PROMOTIONS,
        "Promotions",
        "Réductions, livraisons offertes et offres groupées",
        endpoints::PROMOTIONS,
    )
    .crud(endpoints::PROMOTIONS)
    .field(ModuleFormField::new("title", "Titre", FieldType::Text).required())
    .field(ModuleFormField::new("description", "Description", FieldType::Textarea))
    .field(
        ModuleFormField::new("type", "Type", FieldType::Select)
            .required()
            .options(PROMOTION_TYPES)
            .default_value("percentage"),
    )
    .field(
        ModuleFormField::new("discount_value", "Valeur de la réduction", FieldType::Number)
            .hint("Pourcentage ou montant en DA selon le type")
            .visible_when(has_discount_value),
    )
    .field(ModuleFormField::new("buy_quantity", "Quantité achetée", FieldType::Number).visible_when(is_buy_x_get_y))
    .field(ModuleFormField::new("free_quantity", "Quantité offerte", FieldType::Number).visible_when(is_buy_x_get_y))
    .field(restaurant_select())
    .field(menu_item_select())
    .field(
        ModuleFormField::new(fields::MENU_ITEM_IDS, "Plats concernés", FieldType::Textarea)
            .hint("Identifiants séparés par des virgules ou des retours à la ligne"),
    )
    .field(ModuleFormField::new("start_date", "Début", FieldType::Date))
    .field(ModuleFormField::new("end_date", "Fin", FieldType::Date))
    .field(ModuleFormField::new("image_url", "Image", FieldType::Image))
    .field(is_active())
    .item_subtitle(promotion_subtitle)
}

fn daily_deals() -> ModuleDescriptor {
    ModuleDescriptor::new(
        keys::DAILY_DEALS,
        "Offres du jour",
        "Promotions mises en avant pour la journée",
        endpoints::HOMEPAGE_DAILY_DEALS,
    )
    .crud(endpoints::HOMEPAGE_DAILY_DEALS)
    .field(
        ModuleFormField::new("promotion_id", "Promotion", FieldType::Select)
            .required()
            .searchable()
            .derived_options(promotion_options),
    )
    .field(ModuleFormField::new("deal_date", "Date", FieldType::Date))
    .field(display_order())
    .field(is_active())
    .item_title(deal_title)
}

fn announcements() -> ModuleDescriptor {
    ModuleDescriptor::new(
        keys::ANNOUNCEMENTS,
        "Annonces",
        "Bannières d'information affichées aux clients",
        endpoints::HOMEPAGE_ANNOUNCEMENTS,
    )
    .crud(endpoints::HOMEPAGE_ANNOUNCEMENTS)
    .field(ModuleFormField::new("title", "Titre", FieldType::Text).required())
    .field(ModuleFormField::new("message", "Message", FieldType::Textarea))
    .field(ModuleFormField::new("image_url", "Image", FieldType::Image))
    .field(ModuleFormField::new("link_url", "Lien", FieldType::Url).placeholder("https://"))
    .field(ModuleFormField::new("start_date", "Début", FieldType::Date))
    .field(ModuleFormField::new("end_date", "Fin", FieldType::Date))
    .field(display_order())
    .field(is_active())
}

fn display_order() -> ModuleFormField {
    ModuleFormField::new("display_order", "Ordre d'affichage", FieldType::Number).default_value(0_i64)
}

fn is_active() -> ModuleFormField {
    ModuleFormField::new("is_active", "Actif", FieldType::Checkbox).default_value(true)
}

fn restaurant_select() -> ModuleFormField {
    ModuleFormField::new(fields::RESTAURANT_ID, "Restaurant", FieldType::Select)
        .searchable()
        .async_options(endpoints::RESTAURANTS, item_option)
}

fn menu_item_select() -> ModuleFormField {
    ModuleFormField::new(fields::MENU_ITEM_ID, "Plat", FieldType::Select)
        .searchable()
        .derived_options(menu_items_of_selected_restaurant)
}

fn item_option(item: &ModuleItem) -> Option<FieldOption> {
    let id = item.id()?;
    let label = item
        .text("name")
        .or_else(|| item.text("title"))
        .unwrap_or_else(|| id.clone());
    Some(FieldOption::new(id, label))
}

fn category_options(refs: &ModuleManagerReferences, _ctx: &OptionsContext<'_>) -> Vec<FieldOption> {
    refs.get(references::CATEGORIES).iter().filter_map(item_option).collect()
}

fn promotion_options(refs: &ModuleManagerReferences, _ctx: &OptionsContext<'_>) -> Vec<FieldOption> {
    refs.get(references::PROMOTIONS).iter().filter_map(item_option).collect()
}

fn menu_items_of_selected_restaurant(
    refs: &ModuleManagerReferences,
    ctx: &OptionsContext<'_>,
) -> Vec<FieldOption> {
    let Some(restaurant) = ctx.value_of(fields::RESTAURANT_ID) else {
        return Vec::new();
    };
    let restaurant = restaurant.trim();
    if restaurant.is_empty() {
        return Vec::new();
    }
    refs.get(references::MENU_ITEMS)
        .iter()
        .filter(|item| item.text(fields::RESTAURANT_ID).is_some_and(|r| r.trim() == restaurant))
        .filter_map(item_option)
        .collect()
}

fn has_discount_value(state: &FormState, _role: FormRole) -> bool {
    matches!(state.text("type").as_str(), "percentage" | "fixed_amount")
}

fn is_buy_x_get_y(state: &FormState, _role: FormRole) -> bool {
    state.text("type") == "buy_x_get_y"
}

fn lookup_label(refs: &ModuleManagerReferences, list: &str, id: &str) -> Option<String> {
    refs.get(list)
        .iter()
        .find(|item| item.id().as_deref() == Some(id))
        .and_then(item_option)
        .map(|option| option.label)
}

fn selection_subtitle(item: &ModuleItem, refs: &ModuleManagerReferences) -> Option<String> {
    let category = item.text("category_id")?;
    let label = lookup_label(refs, references::CATEGORIES, &category).unwrap_or(category);
    Some(format!("Catégorie : {label}"))
}

fn promotion_subtitle(item: &ModuleItem, _refs: &ModuleManagerReferences) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(kind) = item.text("type") {
        let label = PROMOTION_TYPES
            .iter()
            .find(|(value, _)| *value == kind)
            .map_or(kind.as_str(), |(_, label)| *label);
        parts.push(label.to_owned());
    }
    if let Some(value) = item.text("discount_value") {
        let unit = if item.text("type").as_deref() == Some("percentage") { "%" } else { " DA" };
        parts.push(format!("-{value}{unit}"));
    }
    match (item.text("start_date"), item.text("end_date")) {
        (Some(start), Some(end)) => parts.push(format!("du {} au {}", short_date(&start), short_date(&end))),
        (Some(start), None) => parts.push(format!("dès le {}", short_date(&start))),
        _ => {}
    }
    (!parts.is_empty()).then(|| parts.join(crate::constants::messages::META_SEPARATOR))
}

fn short_date(raw: &str) -> String {
    let formatted = crate::modules::format_date_for_input(&serde_json::Value::String(raw.to_owned()));
    if formatted.is_empty() {
        raw.to_owned()
    } else {
        formatted
    }
}

fn deal_title(item: &ModuleItem, refs: &ModuleManagerReferences) -> Option<String> {
    let promotion = item.text("promotion_id")?;
    lookup_label(refs, references::PROMOTIONS, &promotion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_keys_are_unique() {
        let modules = homepage_modules();
        let mut keys: Vec<_> = modules.iter().map(|m| m.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), modules.len());
    }

    #[test]
    fn test_loader_only_on_restaurant_modules() {
        for descriptor in page_modules() {
            let has_loader = descriptor
                .find_field(fields::RESTAURANT_ID)
                .is_some_and(|f| f.on_value_change.is_some());
            let expected = matches!(descriptor.key, keys::RECOMMENDED | keys::PROMOTIONS);
            assert_eq!(has_loader, expected, "{}", descriptor.key);
        }
    }
}
