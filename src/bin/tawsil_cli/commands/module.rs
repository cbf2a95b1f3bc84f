// ABOUTME: Entity module commands: list items, show forms, create, update and delete
// ABOUTME: Every command mounts the full page so cross-module references resolve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::{into_result, transport};
use crate::helpers::display;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tawsil_admin::api::UploadFile;
use tawsil_admin::config::environment::AdminConfig;
use tawsil_admin::modules::{FieldValue, FormRole, ModuleManager, UpdateOutcome};
use tawsil_admin::registry::{page_modules, AdminPage, PageOutcome};
use tracing::warn;

/// Print every module with the operations it offers
pub fn list_modules() {
    display::print_modules(&page_modules());
}

async fn mount(config: &AdminConfig, key: &str) -> Result<(AdminPage, Arc<ModuleManager>)> {
    let page = AdminPage::new(transport(config)?, config);
    let manager = page
        .manager(key)
        .with_context(|| format!("Unknown module '{key}' (see `tawsil-admin modules`)"))?;

    match page.mount_all().await {
        PageOutcome::Done(()) => {}
        PageOutcome::Failed(error) => warn!(error = %error, "Some modules failed to load"),
        redirect @ PageOutcome::RedirectToLogin { .. } => into_result(redirect)?,
    }
    if let Some(error) = manager.snapshot().await.list_error {
        bail!("{key}: {error}");
    }
    Ok((page, manager))
}

fn split_assignment(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .with_context(|| format!("Expected FIELD=VALUE, got '{assignment}'"))
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "oui" | "on" => Ok(true),
        "false" | "0" | "no" | "non" | "off" | "" => Ok(false),
        other => bail!("Expected a boolean, got '{other}'"),
    }
}

async fn apply_form_input(
    page: &AdminPage,
    manager: &ModuleManager,
    role: FormRole,
    assignments: &[String],
    images: &[String],
) -> Result<()> {
    for assignment in assignments {
        let (name, raw) = split_assignment(assignment)?;
        let field = manager
            .descriptor()
            .find_field(name)
            .with_context(|| format!("Unknown field '{name}' for module {}", manager.key()))?;
        let value = if field.is_checkbox() {
            FieldValue::Bool(parse_flag(raw)?)
        } else {
            FieldValue::from(raw)
        };
        manager.set_field_value(role, name, value).await?;
    }

    for assignment in images {
        let (name, path) = split_assignment(assignment)?;
        let file = UploadFile::from_path(Path::new(path)).await?;
        let url = into_result(page.run(manager.upload_image(role, name, file)).await)?;
        println!("Image {name}: {url}");
    }
    Ok(())
}

/// List the items of a module
pub async fn list(config: &AdminConfig, key: &str) -> Result<()> {
    let (page, manager) = mount(config, key).await?;
    let references = page.references().await;
    let rows = manager.items_view(&references).await;
    display::print_items(manager.descriptor().title, &rows);
    Ok(())
}

/// Show the create form, or the edit form of `edit`
pub async fn form(config: &AdminConfig, key: &str, edit: Option<&str>) -> Result<()> {
    let (page, manager) = mount(config, key).await?;
    let role = match edit {
        Some(id) => {
            manager.open_edit(id).await?;
            FormRole::Edit
        }
        None => {
            manager.open_create().await;
            FormRole::Create
        }
    };
    let view = manager.render_form(role, &page.references().await).await;
    display::print_form(manager.descriptor().title, &view);
    Ok(())
}

/// Create an item from field assignments
pub async fn create(config: &AdminConfig, key: &str, assignments: &[String], images: &[String]) -> Result<()> {
    let (page, manager) = mount(config, key).await?;
    manager.open_create().await;
    apply_form_input(&page, &manager, FormRole::Create, assignments, images).await?;

    into_result(page.run(manager.create()).await)?;
    display::print_status(manager.status(FormRole::Create).await.as_ref());
    Ok(())
}

/// Update an item; unchanged forms are reported and nothing is sent
pub async fn update(
    config: &AdminConfig,
    key: &str,
    id: &str,
    assignments: &[String],
    images: &[String],
) -> Result<()> {
    let (page, manager) = mount(config, key).await?;
    manager.open_edit(id).await?;
    apply_form_input(&page, &manager, FormRole::Edit, assignments, images).await?;

    let outcome = into_result(page.run(manager.update()).await)?;
    if outcome == UpdateOutcome::NothingToSave {
        warn!(module = %key, id = %id, "Update skipped, empty payload");
    }
    display::print_status(manager.status(FormRole::Edit).await.as_ref());
    Ok(())
}

/// Delete an item
pub async fn delete(config: &AdminConfig, key: &str, id: &str) -> Result<()> {
    let (page, manager) = mount(config, key).await?;
    into_result(page.run(manager.delete(id)).await)?;
    display::print_status(manager.snapshot().await.list_status.as_ref());
    Ok(())
}
