// ABOUTME: User-facing messages shown in status banners and inline field errors
// ABOUTME: Kept in one place so the CLI and any other front end word things identically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

/// Transport failure, no response received
pub const NETWORK_UNREACHABLE: &str = "Impossible de joindre le serveur";
/// Body was not valid JSON
pub const INVALID_RESPONSE: &str = "Réponse invalide du serveur";
/// 401 without a backend message
pub const SESSION_EXPIRED: &str = "Session expirée, veuillez vous reconnecter";
/// 403 without a backend message
pub const ACCESS_DENIED: &str = "Accès refusé";
/// 404 without a backend message
pub const NOT_FOUND: &str = "Ressource introuvable";
/// Other failures without a backend message
pub const REQUEST_FAILED: &str = "La requête a échoué";

/// Create succeeded
pub const CREATED: &str = "Élément créé avec succès";
/// Update succeeded
pub const UPDATED: &str = "Modifications enregistrées";
/// Delete succeeded
pub const DELETED: &str = "Élément supprimé";
/// Update with an empty payload
pub const NOTHING_TO_SAVE: &str = "Aucune modification à enregistrer";
/// Descriptor lacks a create endpoint
pub const CREATE_UNSUPPORTED: &str = "La création n'est pas disponible pour ce module";
/// Descriptor lacks an update endpoint
pub const UPDATE_UNSUPPORTED: &str = "La modification n'est pas disponible pour ce module";
/// Descriptor lacks a delete endpoint
pub const DELETE_UNSUPPORTED: &str = "La suppression n'est pas disponible pour ce module";
/// Update attempted without a selected item
pub const NO_SELECTION: &str = "Aucun élément sélectionné";
/// Item id not present in the loaded list
pub const ITEM_NOT_FOUND: &str = "Élément introuvable";
/// Duplicate submission while a mutation is in flight
pub const OPERATION_IN_PROGRESS: &str = "Une opération est déjà en cours";
/// Required field left empty at submit time
pub const FIELD_REQUIRED: &str = "Ce champ est obligatoire";

/// Uploaded file is not an image
pub const UPLOAD_NOT_IMAGE: &str = "Le fichier doit être une image";
/// Uploaded file exceeds the size limit
pub const UPLOAD_TOO_LARGE: &str = "L'image ne doit pas dépasser 5 Mo";
/// Upload response lacks a `url`
pub const UPLOAD_NO_URL: &str = "Le serveur n'a pas renvoyé d'URL pour l'image";

/// Placeholder title for items with no usable label
pub const UNTITLED: &str = "Sans titre";
/// Subtitle label for `is_active`
pub const ACTIVE_LABEL: &str = "Actif";
/// Subtitle label for `display_order`
pub const ORDER_LABEL: &str = "Ordre";
/// Boolean rendering, true
pub const YES: &str = "Oui";
/// Boolean rendering, false
pub const NO: &str = "Non";
/// Separator between subtitle meta parts
pub const META_SEPARATOR: &str = " • ";

/// Empty cache invalidation pattern
pub const EMPTY_PATTERN: &str = "Le motif d'invalidation ne peut pas être vide";
