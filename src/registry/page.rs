// ABOUTME: Page-level composition wiring every homepage module to one authenticated transport
// ABOUTME: Builds cross-module references and turns 401/403 into a delayed re-login redirect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::page_modules;
use crate::api::{ApiTransport, TokenStore};
use crate::config::environment::AdminConfig;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::modules::{ModuleDescriptor, ModuleManager, ModuleManagerReferences};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Outcome of an operation run through the page guard
#[derive(Debug)]
pub enum PageOutcome<T> {
    /// Operation succeeded
    Done(T),
    /// Operation failed; the error is already reflected in module state
    Failed(AppError),
    /// Session rejected: show `message`, then go to login after `after`
    RedirectToLogin {
        /// Message to display before redirecting
        message: String,
        /// Delay before the redirect
        after: Duration,
    },
}

impl<T> PageOutcome<T> {
    /// Whether the operation succeeded
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Whether the session must be re-established
    #[must_use]
    pub const fn needs_login(&self) -> bool {
        matches!(self, Self::RedirectToLogin { .. })
    }
}

/// The homepage admin page: one manager per module
pub struct AdminPage {
    managers: Vec<Arc<ModuleManager>>,
    token_store: Option<TokenStore>,
    reauth_delay: Duration,
    banner: RwLock<Option<String>>,
}

impl std::fmt::Debug for AdminPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPage")
            .field("modules", &self.managers.iter().map(|m| m.key()).collect::<Vec<_>>())
            .field("reauth_delay", &self.reauth_delay)
            .finish_non_exhaustive()
    }
}

impl AdminPage {
    /// Page with the standard homepage modules
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>, config: &AdminConfig) -> Self {
        Self::with_descriptors(transport, page_modules(), config)
    }

    /// Page with an explicit module list
    #[must_use]
    pub fn with_descriptors(
        transport: Arc<dyn ApiTransport>,
        descriptors: Vec<ModuleDescriptor>,
        config: &AdminConfig,
    ) -> Self {
        let managers = descriptors
            .into_iter()
            .map(|d| Arc::new(ModuleManager::new(d, Arc::clone(&transport), config.menu_items_limit)))
            .collect();
        Self {
            managers,
            token_store: config.token_file.clone().map(TokenStore::new),
            reauth_delay: config.reauth_delay,
            banner: RwLock::new(None),
        }
    }

    /// Manager of a module
    #[must_use]
    pub fn manager(&self, key: &str) -> Option<Arc<ModuleManager>> {
        self.managers.iter().find(|m| m.key() == key).cloned()
    }

    /// All managers in display order
    #[must_use]
    pub fn managers(&self) -> &[Arc<ModuleManager>] {
        &self.managers
    }

    /// Reference lists: each module's current items under its key
    pub async fn references(&self) -> ModuleManagerReferences {
        let mut references = ModuleManagerReferences::new();
        for manager in &self.managers {
            references.insert(manager.key(), manager.items().await);
        }
        references
    }

    /// Page-level banner (unreachable server)
    pub async fn banner(&self) -> Option<String> {
        self.banner.read().await.clone()
    }

    /// Mount every module in order
    ///
    /// Stops at the first rejected session; other failures are kept on
    /// their module and the first one is returned once all modules mounted.
    pub async fn mount_all(&self) -> PageOutcome<()> {
        let mut first_failure = None;
        for manager in &self.managers {
            match self.guard(manager.mount().await).await {
                PageOutcome::Done(()) => {}
                PageOutcome::Failed(error) => {
                    first_failure.get_or_insert(error);
                }
                redirect @ PageOutcome::RedirectToLogin { .. } => return redirect,
            }
        }
        info!(modules = self.managers.len(), "Admin page mounted");
        first_failure.map_or(PageOutcome::Done(()), PageOutcome::Failed)
    }

    /// Await an operation and route its failure through [`Self::guard`]
    pub async fn run<T, F>(&self, operation: F) -> PageOutcome<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.guard(operation.await).await
    }

    /// Classify an operation result for the page
    ///
    /// 401/403 clear the stored token and request a delayed re-login;
    /// unreachable-server failures raise the page banner, which the next
    /// success clears.
    pub async fn guard<T>(&self, result: AppResult<T>) -> PageOutcome<T> {
        match result {
            Ok(value) => {
                self.banner.write().await.take();
                PageOutcome::Done(value)
            }
            Err(error) if error.is_auth_error() => {
                warn!(status = ?error.status, "Session rejected, redirecting to login");
                if let Some(store) = &self.token_store {
                    if let Err(e) = store.clear().await {
                        warn!(error = %e, "Failed to clear stored token");
                    }
                }
                PageOutcome::RedirectToLogin {
                    message: error.message,
                    after: self.reauth_delay,
                }
            }
            Err(error) if error.is_network_error() => {
                *self.banner.write().await = Some(messages::NETWORK_UNREACHABLE.to_owned());
                PageOutcome::Failed(error)
            }
            Err(error) => PageOutcome::Failed(error),
        }
    }
}
