// ABOUTME: Integration tests for the module manager lifecycle against a mock transport
// ABOUTME: Covers load, create, update, delete, busy guards, menu dependencies and image uploads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{as_transport, menu_path, wait_until, MockTransport, Reply};
use serde_json::json;
use std::sync::Arc;
use tawsil_admin::api::{ApiMethod, UploadFile};
use tawsil_admin::errors::ErrorCode;
use tawsil_admin::modules::{
    Control, FieldType, FieldValue, FormRole, ItemEndpoint, ModuleDescriptor, ModuleFormField,
    ModuleItem, ModuleManager, ModuleManagerReferences, StatusKind, UpdateOutcome,
};
use tawsil_admin::registry::{keys, page_modules};

const CATEGORIES: &str = "/admin/homepage/categories";
const PROMOTIONS: &str = "/admin/promotions";
const RECOMMENDED: &str = "/admin/homepage/recommended";

fn page_descriptor(key: &str) -> ModuleDescriptor {
    page_modules()
        .into_iter()
        .find(|d| d.key == key)
        .expect("registered module")
}

fn manager(mock: &Arc<MockTransport>, key: &str) -> Arc<ModuleManager> {
    common::init_test_logging();
    Arc::new(ModuleManager::new(page_descriptor(key), as_transport(mock), 500))
}

fn select_options(control: &Control) -> usize {
    match control {
        Control::Select { options, .. } => options.len(),
        other => panic!("expected a select, got {other:?}"),
    }
}

#[tokio::test]
async fn test_categories_list_titles_and_subtitles() {
    let mock = MockTransport::new();
    mock.get_json(
        CATEGORIES,
        json!([{"id": "c1", "name": "Burgers", "is_active": true, "display_order": 1}]),
    );
    let categories = manager(&mock, keys::CATEGORIES);

    categories.mount().await.unwrap();
    let rows = categories.items_view(&ModuleManagerReferences::new()).await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id.as_deref(), Some("c1"));
    assert_eq!(rows[0].title, "Burgers");
    assert_eq!(rows[0].subtitle.as_deref(), Some("Actif Oui • Ordre 1"));
    assert!(!rows[0].deleting);
}

#[tokio::test]
async fn test_list_accepts_enveloped_bodies() {
    let mock = MockTransport::new();
    mock.get_json(CATEGORIES, json!({"data": [{"id": 1}, {"id": 2}]}));
    let categories = manager(&mock, keys::CATEGORIES);

    categories.load().await.unwrap();
    assert_eq!(categories.snapshot().await.item_count, 2);
}

#[tokio::test]
async fn test_load_failure_is_kept_on_the_module() {
    let mock = MockTransport::new();
    mock.reply(
        ApiMethod::Get,
        CATEGORIES,
        Reply::Status(500, Some(json!({"message": "Base indisponible"}))),
    );
    let categories = manager(&mock, keys::CATEGORIES);

    let error = categories.load().await.unwrap_err();
    assert_eq!(error.status, Some(500));
    let snapshot = categories.snapshot().await;
    assert_eq!(snapshot.list_error.as_deref(), Some("Base indisponible"));
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_create_posts_payload_and_reloads() {
    let mock = MockTransport::new();
    let categories = manager(&mock, keys::CATEGORIES);
    categories.mount().await.unwrap();

    categories.open_create().await;
    categories
        .set_field_value(FormRole::Create, "name", "Pizzas".into())
        .await
        .unwrap();
    categories
        .set_field_value(FormRole::Create, "display_order", "2".into())
        .await
        .unwrap();
    categories.create().await.unwrap();

    let posts = mock.requests_to(ApiMethod::Post, CATEGORIES);
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].body,
        Some(json!({"name": "Pizzas", "display_order": 2, "is_active": true}))
    );
    assert_eq!(mock.count(ApiMethod::Get, CATEGORIES), 2);

    let snapshot = categories.snapshot().await;
    assert!(!snapshot.create_open);
    assert!(!snapshot.creating);
    assert_eq!(snapshot.create_status.map(|s| s.kind), Some(StatusKind::Success));
    assert_eq!(categories.form_state(FormRole::Create).await.text("name"), "");
}

#[tokio::test]
async fn test_create_refuses_missing_required_fields() {
    let mock = MockTransport::new();
    let categories = manager(&mock, keys::CATEGORIES);
    categories.open_create().await;

    let error = categories.create().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(mock.mutation_count(), 0);
    let field_errors = categories.field_errors(FormRole::Create).await;
    assert_eq!(field_errors.len(), 1);
    assert_eq!(field_errors[0].field.as_deref(), Some("name"));
}

#[tokio::test]
async fn test_create_keeps_server_field_errors_and_form_open() {
    let mock = MockTransport::new();
    mock.reply(
        ApiMethod::Post,
        CATEGORIES,
        Reply::Status(
            422,
            Some(json!({"message": "Validation échouée", "errors": [{"field": "name", "message": "Nom déjà utilisé"}]})),
        ),
    );
    let categories = manager(&mock, keys::CATEGORIES);
    categories.open_create().await;
    categories
        .set_field_value(FormRole::Create, "name", "Burgers".into())
        .await
        .unwrap();

    assert!(categories.create().await.is_err());
    let snapshot = categories.snapshot().await;
    assert!(snapshot.create_open);
    assert!(!snapshot.creating);
    assert_eq!(snapshot.create_status.map(|s| s.kind), Some(StatusKind::Error));
    assert_eq!(categories.form_state(FormRole::Create).await.text("name"), "Burgers");

    let view = categories
        .render_form(FormRole::Create, &ModuleManagerReferences::new())
        .await;
    let name = view.fields.iter().find(|f| f.name == "name").unwrap();
    assert_eq!(name.error.as_deref(), Some("Nom déjà utilisé"));
}

#[tokio::test]
async fn test_concurrent_create_is_refused_while_busy() {
    let mock = MockTransport::new();
    let gate = mock.gate(ApiMethod::Post, CATEGORIES);
    let categories = manager(&mock, keys::CATEGORIES);
    categories.open_create().await;
    categories
        .set_field_value(FormRole::Create, "name", "Tacos".into())
        .await
        .unwrap();

    let first = {
        let categories = Arc::clone(&categories);
        tokio::spawn(async move { categories.create().await })
    };
    wait_until(|| mock.count(ApiMethod::Post, CATEGORIES) == 1).await;
    assert!(categories.snapshot().await.creating);

    let second = categories.create().await.unwrap_err();
    assert_eq!(second.code, ErrorCode::ResourceLocked);
    assert_eq!(mock.count(ApiMethod::Post, CATEGORIES), 1);

    gate.notify_one();
    first.await.unwrap().unwrap();
    assert!(!categories.snapshot().await.creating);
}

#[tokio::test]
async fn test_load_is_refused_while_a_load_is_in_flight() {
    let mock = MockTransport::new();
    mock.get_json(CATEGORIES, json!([{"id": "c1", "name": "Burgers"}]));
    let gate = mock.gate(ApiMethod::Get, CATEGORIES);
    let categories = manager(&mock, keys::CATEGORIES);

    let first = {
        let categories = Arc::clone(&categories);
        tokio::spawn(async move { categories.load().await })
    };
    wait_until(|| mock.count(ApiMethod::Get, CATEGORIES) == 1).await;
    assert!(categories.snapshot().await.loading);

    let second = categories.load().await.unwrap_err();
    assert_eq!(second.code, ErrorCode::ResourceLocked);
    assert_eq!(mock.count(ApiMethod::Get, CATEGORIES), 1);

    gate.notify_one();
    first.await.unwrap().unwrap();
    let snapshot = categories.snapshot().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.item_count, 1);
}

#[tokio::test]
async fn test_reload_after_create_is_not_overwritten_by_older_load() {
    let mock = MockTransport::new();
    mock.get_json(CATEGORIES, json!([{"id": "c1", "name": "Burgers"}]));
    mock.get_json(
        CATEGORIES,
        json!([{"id": "c1", "name": "Burgers"}, {"id": "c2", "name": "Pizzas"}]),
    );
    let gates = mock.gate_each(ApiMethod::Get, CATEGORIES, 2);
    let categories = manager(&mock, keys::CATEGORIES);

    let older = {
        let categories = Arc::clone(&categories);
        tokio::spawn(async move { categories.load().await })
    };
    wait_until(|| mock.count(ApiMethod::Get, CATEGORIES) == 1).await;

    categories.open_create().await;
    categories
        .set_field_value(FormRole::Create, "name", "Pizzas".into())
        .await
        .unwrap();
    let creating = {
        let categories = Arc::clone(&categories);
        tokio::spawn(async move { categories.create().await })
    };
    wait_until(|| mock.count(ApiMethod::Get, CATEGORIES) == 2).await;

    gates[1].notify_one();
    creating.await.unwrap().unwrap();
    let snapshot = categories.snapshot().await;
    assert_eq!(snapshot.item_count, 2);
    assert!(snapshot.loading);

    gates[0].notify_one();
    older.await.unwrap().unwrap();
    let snapshot = categories.snapshot().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.item_count, 2);
}

fn note_content_path(item: &ModuleItem) -> Option<String> {
    item.id().map(|id| format!("/admin/notes/{id}/content"))
}

#[tokio::test]
async fn test_custom_endpoints_route_each_mutation() {
    let descriptor = ModuleDescriptor::new("notes", "Notes", "", "/admin/notes")
        .create_endpoint("/admin/notes/new")
        .update_endpoint(ItemEndpoint::Custom(note_content_path))
        .delete_endpoint(ItemEndpoint::IdSuffix("/admin/notes/archive"))
        .field(ModuleFormField::new("title", "Titre", FieldType::Text).required());
    let mock = MockTransport::new();
    mock.get_json("/admin/notes", json!([{"id": "n1", "title": "Ouverture"}]));
    common::init_test_logging();
    let notes = ModuleManager::new(descriptor, as_transport(&mock), 500);
    notes.load().await.unwrap();

    notes.open_create().await;
    notes
        .set_field_value(FormRole::Create, "title", "Horaires".into())
        .await
        .unwrap();
    notes.create().await.unwrap();

    notes.open_edit("n1").await.unwrap();
    notes
        .set_field_value(FormRole::Edit, "title", "Fermeture".into())
        .await
        .unwrap();
    assert_eq!(notes.update().await.unwrap(), UpdateOutcome::Saved);

    notes.delete("n1").await.unwrap();

    assert_eq!(mock.count(ApiMethod::Post, "/admin/notes/new"), 1);
    assert_eq!(mock.count(ApiMethod::Put, "/admin/notes/n1/content"), 1);
    assert_eq!(mock.count(ApiMethod::Delete, "/admin/notes/archive/n1"), 1);
    assert_eq!(mock.mutation_count(), 3);
}

#[tokio::test]
async fn test_update_puts_to_item_endpoint() {
    let mock = MockTransport::new();
    mock.get_json(
        CATEGORIES,
        json!([{"id": "c 1", "name": "Burgers", "is_active": true, "display_order": 1}]),
    );
    let categories = manager(&mock, keys::CATEGORIES);
    categories.load().await.unwrap();

    categories.open_edit("c 1").await.unwrap();
    categories
        .set_field_value(FormRole::Edit, "name", "Smash burgers".into())
        .await
        .unwrap();
    let outcome = categories.update().await.unwrap();

    assert_eq!(outcome, UpdateOutcome::Saved);
    let puts = mock.requests_to(ApiMethod::Put, "/admin/homepage/categories/c%201");
    assert_eq!(puts.len(), 1);
    assert_eq!(
        puts[0].body,
        Some(json!({"name": "Smash burgers", "display_order": 1, "is_active": true}))
    );
    let snapshot = categories.snapshot().await;
    assert!(!snapshot.edit_open);
    assert_eq!(snapshot.selected_id, None);
    assert_eq!(snapshot.edit_status.map(|s| s.kind), Some(StatusKind::Success));
}

#[tokio::test]
async fn test_update_with_empty_payload_sends_nothing() {
    let fields = vec![
        ModuleFormField::new("title", "Titre", FieldType::Text),
        ModuleFormField::new("message", "Message", FieldType::Textarea),
    ];
    let descriptor = fields.into_iter().fold(
        ModuleDescriptor::new("notes", "Notes", "", "/admin/notes").crud("/admin/notes"),
        ModuleDescriptor::field,
    );
    let mock = MockTransport::new();
    mock.get_json("/admin/notes", json!([{"id": "n1", "title": "", "message": null}]));
    let notes = ModuleManager::new(descriptor, as_transport(&mock), 500);
    notes.load().await.unwrap();
    notes.open_edit("n1").await.unwrap();

    let outcome = notes.update().await.unwrap();

    assert_eq!(outcome, UpdateOutcome::NothingToSave);
    assert_eq!(mock.mutation_count(), 0);
    let status = notes.status(FormRole::Edit).await.unwrap();
    assert_eq!(status.kind, StatusKind::Neutral);
}

#[tokio::test]
async fn test_update_without_selection_is_refused() {
    let mock = MockTransport::new();
    let categories = manager(&mock, keys::CATEGORIES);

    assert!(categories.update().await.is_err());
    assert_eq!(mock.mutation_count(), 0);
    assert_eq!(
        categories.status(FormRole::Edit).await.map(|s| s.kind),
        Some(StatusKind::Error)
    );
}

#[tokio::test]
async fn test_delete_without_endpoint_makes_no_call() {
    let descriptor = page_descriptor(keys::ANNOUNCEMENTS).without_delete();
    let mock = MockTransport::new();
    mock.get_json("/admin/homepage/announcements", json!([{"id": "a1", "title": "Aïd"}]));
    let announcements = ModuleManager::new(descriptor, as_transport(&mock), 500);
    announcements.load().await.unwrap();
    let before = mock.requests().len();

    let error = announcements.delete("a1").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::OperationUnsupported);
    assert_eq!(mock.requests().len(), before);
    let status = announcements.snapshot().await.list_status.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
}

#[tokio::test]
async fn test_delete_marks_only_that_row_busy() {
    let mock = MockTransport::new();
    mock.get_json(CATEGORIES, json!([{"id": "c1", "name": "A"}, {"id": "c2", "name": "B"}]));
    let gate = mock.gate(ApiMethod::Delete, "/admin/homepage/categories/c1");
    let categories = manager(&mock, keys::CATEGORIES);
    categories.load().await.unwrap();

    let pending = {
        let categories = Arc::clone(&categories);
        tokio::spawn(async move { categories.delete("c1").await })
    };
    wait_until(|| mock.count(ApiMethod::Delete, "/admin/homepage/categories/c1") == 1).await;

    let rows = categories.items_view(&ModuleManagerReferences::new()).await;
    assert!(rows[0].deleting);
    assert!(!rows[1].deleting);
    let refused = categories.delete("c2").await.unwrap_err();
    assert_eq!(refused.code, ErrorCode::ResourceLocked);

    gate.notify_one();
    pending.await.unwrap().unwrap();
    let snapshot = categories.snapshot().await;
    assert_eq!(snapshot.deleting_id, None);
    assert_eq!(snapshot.list_status.map(|s| s.kind), Some(StatusKind::Success));
}

#[tokio::test]
async fn test_restaurant_change_clears_menu_fields_and_waits_for_menu() {
    let mock = MockTransport::new();
    mock.get_json("/restaurant/getall", json!([{"id": "r1", "name": "Chez Karim"}]));
    mock.get_json(&menu_path("r1"), json!([{"id": "m1", "name": "Couscous royal"}]));
    let gate = mock.gate(ApiMethod::Get, &menu_path("r1"));
    let promotions = manager(&mock, keys::PROMOTIONS);
    promotions.mount().await.unwrap();

    promotions.open_create().await;
    promotions
        .set_field_value(FormRole::Create, "menu_item_id", "m0".into())
        .await
        .unwrap();
    promotions
        .set_field_value(FormRole::Create, "menu_item_ids", "m0, m9".into())
        .await
        .unwrap();

    let selecting = {
        let promotions = Arc::clone(&promotions);
        tokio::spawn(async move {
            promotions
                .set_field_value(FormRole::Create, "restaurant_id", "r1".into())
                .await
        })
    };
    wait_until(|| mock.count(ApiMethod::Get, &menu_path("r1")) == 1).await;

    let state = promotions.form_state(FormRole::Create).await;
    assert_eq!(state.text("restaurant_id"), "r1");
    assert_eq!(state.text("menu_item_id"), "");
    assert_eq!(state.text("menu_item_ids"), "");

    let refs = ModuleManagerReferences::new();
    let view = promotions.render_form(FormRole::Create, &refs).await;
    let menu = view.fields.iter().find(|f| f.name == "menu_item_id").unwrap();
    assert_eq!(select_options(&menu.control), 0);
    let restaurants = view.fields.iter().find(|f| f.name == "restaurant_id").unwrap();
    assert_eq!(select_options(&restaurants.control), 1);

    gate.notify_one();
    selecting.await.unwrap().unwrap();

    let view = promotions.render_form(FormRole::Create, &refs).await;
    let menu = view.fields.iter().find(|f| f.name == "menu_item_id").unwrap();
    assert_eq!(select_options(&menu.control), 1);
    assert_eq!(promotions.menu_items("r1").await.len(), 1);
}

#[tokio::test]
async fn test_menu_is_fetched_once_per_restaurant() {
    let mock = MockTransport::new();
    let recommended = manager(&mock, keys::RECOMMENDED);
    recommended.open_create().await;

    for restaurant in ["r1", "r2", "r1"] {
        recommended
            .set_field_value(FormRole::Create, "restaurant_id", restaurant.into())
            .await
            .unwrap();
    }
    recommended
        .set_field_value(FormRole::Create, "restaurant_id", "".into())
        .await
        .unwrap();

    assert_eq!(mock.count(ApiMethod::Get, &menu_path("r1")), 1);
    assert_eq!(mock.count(ApiMethod::Get, &menu_path("r2")), 1);
}

#[tokio::test]
async fn test_padded_restaurant_id_lists_its_menu() {
    let mock = MockTransport::new();
    mock.get_json(&menu_path("r1"), json!([{"id": "m1", "name": "Couscous royal"}]));
    let recommended = manager(&mock, keys::RECOMMENDED);
    recommended.open_create().await;

    recommended
        .set_field_value(FormRole::Create, "restaurant_id", " r1 ".into())
        .await
        .unwrap();

    assert_eq!(mock.count(ApiMethod::Get, &menu_path("r1")), 1);
    let view = recommended
        .render_form(FormRole::Create, &ModuleManagerReferences::new())
        .await;
    let menu = view.fields.iter().find(|f| f.name == "menu_item_id").unwrap();
    assert_eq!(select_options(&menu.control), 1);
}

#[tokio::test]
async fn test_edit_preloads_selected_restaurant_menu() {
    let mock = MockTransport::new();
    mock.get_json(
        RECOMMENDED,
        json!([{"id": "x1", "restaurant_id": "r7", "menu_item_id": "m3", "reason": "Coup de cœur"}]),
    );
    mock.get_json(&menu_path("r7"), json!({"data": [{"id": "m3", "name": "Tajine"}]}));
    let recommended = manager(&mock, keys::RECOMMENDED);
    recommended.load().await.unwrap();

    recommended.open_edit("x1").await.unwrap();

    assert_eq!(mock.count(ApiMethod::Get, &menu_path("r7")), 1);
    let view = recommended
        .render_form(FormRole::Edit, &ModuleManagerReferences::new())
        .await;
    let menu = view.fields.iter().find(|f| f.name == "menu_item_id").unwrap();
    match &menu.control {
        Control::Select { options, selected, .. } => {
            assert_eq!(selected, "m3");
            assert_eq!(options.len(), 1);
            assert_eq!(options[0].label, "Tajine");
        }
        other => panic!("expected a select, got {other:?}"),
    }
}

#[tokio::test]
async fn test_async_option_failure_does_not_fail_mount() {
    let mock = MockTransport::new();
    mock.reply(ApiMethod::Get, "/restaurant/getall", Reply::Network);
    let promotions = manager(&mock, keys::PROMOTIONS);

    promotions.mount().await.unwrap();
    let view = promotions
        .render_form(FormRole::Create, &ModuleManagerReferences::new())
        .await;
    let restaurants = view.fields.iter().find(|f| f.name == "restaurant_id").unwrap();
    assert_eq!(select_options(&restaurants.control), 0);
}

#[tokio::test]
async fn test_image_upload_sets_field_value() {
    let mock = MockTransport::new();
    let categories = manager(&mock, keys::CATEGORIES);
    categories.open_create().await;

    let url = categories
        .upload_image(
            FormRole::Create,
            "image_url",
            UploadFile::new("burger.png", "image/png", vec![1, 2, 3]),
        )
        .await
        .unwrap();

    assert_eq!(url, "https://cdn.tawsil.test/burger.png");
    assert_eq!(categories.form_state(FormRole::Create).await.text("image_url"), url);
    let view = categories
        .render_form(FormRole::Create, &ModuleManagerReferences::new())
        .await;
    let image = view.fields.iter().find(|f| f.name == "image_url").unwrap();
    assert!(matches!(&image.control, Control::Image { preview: Some(p), .. } if p == "burger.png"));

    categories.remove_image(FormRole::Create, "image_url").await;
    assert_eq!(categories.form_state(FormRole::Create).await.text("image_url"), "");
}

#[tokio::test]
async fn test_rejected_upload_stays_on_the_field() {
    let mock = MockTransport::new();
    let categories = manager(&mock, keys::CATEGORIES);
    categories.open_create().await;

    let error = categories
        .upload_image(
            FormRole::Create,
            "image_url",
            UploadFile::new("menu.pdf", "application/pdf", vec![0; 8]),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidFormat);
    assert!(mock.uploads().is_empty());
    assert_eq!(categories.status(FormRole::Create).await, None);
    let view = categories
        .render_form(FormRole::Create, &ModuleManagerReferences::new())
        .await;
    let image = view.fields.iter().find(|f| f.name == "image_url").unwrap();
    assert!(matches!(&image.control, Control::Image { error: Some(_), uploading: false, .. }));
}

#[tokio::test]
async fn test_upload_without_url_is_an_error() {
    let mock = MockTransport::new();
    mock.upload_reply(Reply::Json(json!({"ok": true})));
    let categories = manager(&mock, keys::CATEGORIES);

    let error = categories
        .upload_image(
            FormRole::Create,
            "image_url",
            UploadFile::new("a.png", "image/png", vec![0; 4]),
        )
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(categories.form_state(FormRole::Create).await.text("image_url"), "");
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let mock = MockTransport::new();
    let categories = manager(&mock, keys::CATEGORIES);
    let error = categories
        .set_field_value(FormRole::Create, "colour", FieldValue::from("red"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
