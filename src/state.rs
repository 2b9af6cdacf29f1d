//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::external::fcm::FcmClient;
use crate::external::firestore::FirestoreClient;
use crate::services::PingNotifier;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since the notifier shares its collaborators behind Arc.
#[derive(Clone)]
pub struct AppState {
    /// The ping fan-out pipeline
    pub notifier: PingNotifier,
}

impl AppState {
    /// Creates a new AppState from loaded settings.
    ///
    /// Wires the document store and push client into the notifier. The
    /// Firestore client serves both the group and token reads.
    pub fn new(settings: &Settings) -> Self {
        let firestore = Arc::new(FirestoreClient::new(settings.firestore.clone()));
        let fcm = Arc::new(FcmClient::new(settings.fcm.clone()));
        let notifier = PingNotifier::new(firestore.clone(), firestore, fcm);
        Self { notifier }
    }

    /// Creates an AppState around an already-built notifier.
    ///
    /// Used by tests and the dry-run mode to substitute collaborators.
    pub fn with_notifier(notifier: PingNotifier) -> Self {
        Self { notifier }
    }
}
