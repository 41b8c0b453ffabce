//! Core domain logic for the MenuQR backend.
//!
//! Pure types, validation, ordering and projection rules, the single-table
//! key scheme, and the trait seams implemented by the storage and auth
//! crates. Nothing in here talks to the network.

pub mod auth;
pub mod menu;
pub mod storage;
