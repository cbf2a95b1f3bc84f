// ABOUTME: Constants module with domain-separated organization
// ABOUTME: REST paths, upload limits, default intervals and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list.

/// User-facing status and error messages (French, as shown in the admin UI)
pub mod messages;

/// REST endpoints consumed by the admin toolkit
pub mod endpoints {
    /// Multipart image upload endpoint
    pub const UPLOAD: &str = "/api/upload";
    /// Global restaurant list
    pub const RESTAURANTS: &str = "/restaurant/getall";
    /// Menu items, filtered by `restaurant_id` and `limit` query parameters
    pub const MENU_ITEMS: &str = "/menuitem/getall";

    /// Homepage categories collection
    pub const HOMEPAGE_CATEGORIES: &str = "/admin/homepage/categories";
    /// Homepage thematic selections collection
    pub const HOMEPAGE_THEMATIC: &str = "/admin/homepage/thematic-selections";
    /// Homepage recommended dishes collection
    pub const HOMEPAGE_RECOMMENDED: &str = "/admin/homepage/recommended";
    /// Homepage daily deals collection
    pub const HOMEPAGE_DAILY_DEALS: &str = "/admin/homepage/daily-deals";
    /// Homepage announcements collection
    pub const HOMEPAGE_ANNOUNCEMENTS: &str = "/admin/homepage/announcements";
    /// Promotions collection
    pub const PROMOTIONS: &str = "/admin/promotions";

    /// Admin notifications collection
    pub const NOTIFICATIONS: &str = "/admin/notifications";
    /// Server cache statistics
    pub const CACHE_STATS: &str = "/admin/cache/stats";
    /// Flush every server cache entry
    pub const CACHE_CLEAR: &str = "/admin/cache/clear";
    /// Invalidate server cache entries matching a pattern (pattern appended)
    pub const CACHE_INVALIDATE: &str = "/admin/cache/invalidate";
    /// Server-reported monitoring overview
    pub const MONITORING: &str = "/admin/monitoring";
}

/// Limits enforced on the client before any network call
pub mod limits {
    /// Maximum accepted image size for uploads (5 MiB)
    pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
    /// MIME prefix every uploaded image must carry
    pub const IMAGE_MIME_PREFIX: &str = "image/";
    /// Default `limit` query parameter when fetching a restaurant's menu
    pub const DEFAULT_MENU_ITEMS_LIMIT: u32 = 500;
    /// Toasts kept in memory before the oldest is dropped
    pub const TOAST_QUEUE_CAPACITY: usize = 20;
}

/// Default refresh periods for dashboard polling, in seconds
pub mod intervals {
    /// Cache statistics refresh
    pub const CACHE_STATS_SECS: u64 = 10;
    /// Monitoring overview refresh
    pub const MONITORING_SECS: u64 = 30;
    /// Admin notifications refresh
    pub const NOTIFICATIONS_SECS: u64 = 20;
    /// Delay before redirecting to login after an auth failure, in milliseconds
    pub const REAUTH_REDIRECT_MS: u64 = 1500;
}

/// Field names with special meaning in payload construction
pub mod fields {
    /// Entity identifier, the only key endpoint functions may read
    pub const ID: &str = "id";
    /// Multi-value identifier list parsed from comma/newline separated text
    pub const MENU_ITEM_IDS: &str = "menu_item_ids";
    /// Single menu item selection
    pub const MENU_ITEM_ID: &str = "menu_item_id";
    /// Restaurant selection driving the menu item fields
    pub const RESTAURANT_ID: &str = "restaurant_id";
}

/// Reference list names used to resolve cross-module options
pub mod references {
    /// Categories module items
    pub const CATEGORIES: &str = "categories";
    /// Promotions module items
    pub const PROMOTIONS: &str = "promotions";
    /// Restaurants loaded for selects
    pub const RESTAURANTS: &str = "restaurants";
    /// Menu items cached per restaurant, flattened
    pub const MENU_ITEMS: &str = "menu_items";
}
