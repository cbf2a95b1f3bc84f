// ABOUTME: Output formatting helpers for tawsil-admin
// ABOUTME: Provides consistent display of modules, items, forms, statuses and dashboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use serde_json::{Map, Value};
use tawsil_admin::dashboard::{AdminNotification, CacheStats};
use tawsil_admin::errors::AppError;
use tawsil_admin::modules::{Control, FormRole, FormView, ItemView, ModuleDescriptor, StatusKind, StatusMessage};

/// Display the module catalogue
pub fn print_modules(descriptors: &[ModuleDescriptor]) {
    println!("{:<22} {:<28} OPERATIONS", "KEY", "TITLE");
    println!("{}", "=".repeat(72));
    for descriptor in descriptors {
        let mut operations = vec!["list"];
        if descriptor.create_endpoint.is_some() {
            operations.push("create");
        }
        if descriptor.update_endpoint.is_some() {
            operations.push("update");
        }
        if descriptor.delete_endpoint.is_some() {
            operations.push("delete");
        }
        println!("{:<22} {:<28} {}", descriptor.key, descriptor.title, operations.join(", "));
        println!("   {}", descriptor.description);
    }
}

/// Display list rows
pub fn print_items(title: &str, rows: &[ItemView]) {
    println!("\n{title} ({})", rows.len());
    println!("{}", "=".repeat(60));
    if rows.is_empty() {
        println!("   (aucun élément)");
        return;
    }
    for row in rows {
        println!("[{}] {}", row.id.as_deref().unwrap_or("-"), row.title);
        if let Some(subtitle) = &row.subtitle {
            println!("      {subtitle}");
        }
    }
}

/// Display a rendered form
pub fn print_form(title: &str, view: &FormView) {
    let heading = match view.role {
        FormRole::Create => "Nouveau",
        FormRole::Edit => "Modifier",
    };
    println!("\n{heading} : {title}");
    println!("{}", "=".repeat(60));
    for field in &view.fields {
        let marker = if field.required { "*" } else { " " };
        println!("{marker} {} ({})", field.label, field.name);
        match &field.control {
            Control::Input { kind, value } => println!("     <{kind}> {value}"),
            Control::TextArea { value } => println!("     {value}"),
            Control::Checkbox { checked } => println!("     [{}]", if *checked { "x" } else { " " }),
            Control::Select {
                options,
                selected,
                loading,
                ..
            } => {
                if *loading {
                    println!("     (chargement...)");
                }
                for option in options {
                    let mark = if option.value == *selected { ">" } else { " " };
                    println!("   {mark} {} = {}", option.value, option.label);
                }
            }
            Control::Image { url, error, .. } => {
                println!("     image: {}", if url.is_empty() { "-" } else { url });
                if let Some(error) = error {
                    println!("     ! {error}");
                }
            }
        }
        if let Some(hint) = field.hint {
            println!("     ({hint})");
        }
        if let Some(error) = &field.error {
            println!("     ! {error}");
        }
    }
    print_status(view.status.as_ref());
}

/// Display a status message
pub fn print_status(status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    match status.kind {
        StatusKind::Success => println!("Success {}", status.text),
        StatusKind::Neutral => println!("{}", status.text),
        StatusKind::Error => eprintln!("Error {}", status.text),
    }
}

/// Display a one-line success message
pub fn print_success(message: &str) {
    println!("Success {message}");
}

/// Display an error with its field errors
pub fn print_error(error: &AppError) {
    eprintln!("Error {}", error.message);
    for field_error in &error.field_errors {
        match &field_error.field {
            Some(field) => eprintln!("   {field}: {}", field_error.message),
            None => eprintln!("   {}", field_error.message),
        }
    }
}

/// Display cache statistics
pub fn print_cache_stats(stats: &CacheStats) {
    let count = |value: Option<u64>| value.map_or_else(|| "-".to_owned(), |v| v.to_string());
    println!("\nCache");
    println!("{}", "=".repeat(40));
    println!("   Hits: {}", count(stats.hits));
    println!("   Misses: {}", count(stats.misses));
    println!("   Keys: {}", count(stats.keys));
    if let Some(rate) = stats.hit_rate() {
        println!("   Hit rate: {:.1}%", rate * 100.0);
    }
    for (name, value) in &stats.extra {
        println!("   {name}: {}", scalar(value));
    }
}

/// Display a server-reported document
pub fn print_document(document: &Map<String, Value>) {
    println!("\nMonitoring");
    println!("{}", "=".repeat(40));
    for (name, value) in document {
        println!("   {name}: {}", scalar(value));
    }
}

/// Display notifications with the unread total
pub fn print_notifications(notifications: &[AdminNotification], unread: usize) {
    println!("\nNotifications ({unread} non lues)");
    println!("{}", "=".repeat(60));
    for notification in notifications {
        let marker = if notification.read { " " } else { "•" };
        println!("{marker} [{}] {}", notification.id, notification.headline());
        if let (Some(message), Some(_)) = (&notification.message, &notification.title) {
            println!("      {message}");
        }
        if let Some(created_at) = &notification.created_at {
            println!("      {created_at}");
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
