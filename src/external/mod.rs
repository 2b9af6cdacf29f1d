//! Clients for the external document store and push-delivery service.

pub mod client;
pub mod fcm;
pub mod firestore;
