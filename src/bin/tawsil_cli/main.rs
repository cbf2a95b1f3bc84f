// ABOUTME: Tawsil admin CLI - drives homepage modules, cache, notifications and token storage
// ABOUTME: Thin front end over the module managers and dashboard clients of the library
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil
//!
//! Usage:
//! ```bash
//! # Store the admin bearer token
//! tawsil-admin token set eyJhbGciOi...
//!
//! # List homepage modules and the items of one of them
//! tawsil-admin modules
//! tawsil-admin module list promotions
//!
//! # Create, update and delete items
//! tawsil-admin module create categories --set name=Burgers --set display_order=1
//! tawsil-admin module update promotions 42 --set discount_value=15 --image image_url=./banner.png
//! tawsil-admin module delete announcements 7
//!
//! # Server cache and notifications
//! tawsil-admin cache stats
//! tawsil-admin cache invalidate "restaurants:*"
//! tawsil-admin notifications watch
//! tawsil-admin monitoring --watch
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tawsil_admin::config::environment::AdminConfig;
use tawsil_admin::errors::AppError;
use tawsil_admin::logging::LoggingConfig;
use url::Url;

/// Exit code for a rejected session
const EXIT_REAUTHENTICATE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "tawsil-admin",
    about = "Tawsil admin CLI",
    long_about = "Command-line front end for the Tawsil admin API: homepage modules, server cache, notifications and token storage."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL override
    #[arg(long, global = true)]
    api_url: Option<Url>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List the homepage modules
    Modules,

    /// Entity module commands
    Module {
        #[command(subcommand)]
        action: ModuleCommand,
    },

    /// Server cache commands
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },

    /// Show the monitoring overview
    Monitoring {
        /// Refresh periodically until interrupted
        #[arg(long)]
        watch: bool,
    },

    /// Admin notification commands
    Notifications {
        #[command(subcommand)]
        action: NotificationsCommand,
    },

    /// Bearer token storage
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ModuleCommand {
    /// List the items of a module
    List {
        /// Module key (see `tawsil-admin modules`)
        key: String,
    },

    /// Show the create form, or the edit form of an item
    Form {
        /// Module key
        key: String,

        /// Item id to edit
        #[arg(long)]
        edit: Option<String>,
    },

    /// Create an item
    Create {
        /// Module key
        key: String,

        /// Field assignments, `name=value`
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Image uploads, `field=path`
        #[arg(long = "image", value_name = "FIELD=PATH")]
        image: Vec<String>,
    },

    /// Update an item
    Update {
        /// Module key
        key: String,

        /// Item id
        id: String,

        /// Field assignments, `name=value`
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Image uploads, `field=path`
        #[arg(long = "image", value_name = "FIELD=PATH")]
        image: Vec<String>,
    },

    /// Delete an item
    Delete {
        /// Module key
        key: String,

        /// Item id
        id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CacheCommand {
    /// Show cache statistics
    Stats,

    /// Flush every cache entry
    Clear,

    /// Invalidate entries matching a pattern
    Invalidate {
        /// Key pattern
        pattern: String,
    },

    /// Refresh statistics periodically until interrupted
    Watch,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum NotificationsCommand {
    /// List notifications
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },

    /// Mark a notification as read
    Read {
        /// Notification id
        id: String,
    },

    /// Refresh notifications periodically until interrupted
    Watch,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum TokenCommand {
    /// Store a bearer token
    Set {
        /// Token value
        token: String,
    },

    /// Remove the stored token
    Clear,

    /// Print the token file location
    Path,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::for_cli(cli.verbose).init() {
        eprintln!("Logging disabled: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match error.downcast_ref::<AppError>() {
            Some(app_error) if app_error.is_auth_error() => {
                eprintln!("{}", app_error.message);
                eprintln!("Run `tawsil-admin token set <token>` after signing in again.");
                ExitCode::from(EXIT_REAUTHENTICATE)
            }
            Some(app_error) => {
                helpers::display::print_error(app_error);
                ExitCode::FAILURE
            }
            None => {
                eprintln!("Error: {error:#}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AdminConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    match cli.command {
        Command::Modules => commands::module::list_modules(),
        Command::Module { action } => match action {
            ModuleCommand::List { key } => commands::module::list(&config, &key).await?,
            ModuleCommand::Form { key, edit } => {
                commands::module::form(&config, &key, edit.as_deref()).await?;
            }
            ModuleCommand::Create { key, set, image } => {
                commands::module::create(&config, &key, &set, &image).await?;
            }
            ModuleCommand::Update {
                key,
                id,
                set,
                image,
            } => commands::module::update(&config, &key, &id, &set, &image).await?,
            ModuleCommand::Delete { key, id } => {
                commands::module::delete(&config, &key, &id).await?;
            }
        },
        Command::Cache { action } => match action {
            CacheCommand::Stats => commands::cache::stats(&config).await?,
            CacheCommand::Clear => commands::cache::clear(&config).await?,
            CacheCommand::Invalidate { pattern } => {
                commands::cache::invalidate(&config, &pattern).await?;
            }
            CacheCommand::Watch => commands::cache::watch(&config).await?,
        },
        Command::Monitoring { watch } => commands::monitoring::overview(&config, watch).await?,
        Command::Notifications { action } => match action {
            NotificationsCommand::List { unread } => {
                commands::notifications::list(&config, unread).await?;
            }
            NotificationsCommand::Read { id } => commands::notifications::read(&config, &id).await?,
            NotificationsCommand::Watch => commands::notifications::watch(&config).await?,
        },
        Command::Token { action } => match action {
            TokenCommand::Set { token } => commands::token::set(&config, &token).await?,
            TokenCommand::Clear => commands::token::clear(&config).await?,
            TokenCommand::Path => commands::token::path(&config)?,
        },
    }

    Ok(())
}
