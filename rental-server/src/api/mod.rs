//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - admin authentication
//! - [`upload`] - photo uploads
//! - [`state_sync`] - full-state pull/push for the mobile client
//! - [`bikes`] - fleet management
//! - [`parking_zones`] - parking zone management
//! - [`rentals`] - rental lifecycle + admin views
//! - [`issues`] - issue reporting and triage
//! - [`users`] - user listing
//! - [`stats`] - dashboard aggregates

pub mod auth;
pub mod bikes;
pub mod health;
pub mod issues;
pub mod parking_zones;
pub mod rentals;
pub mod state_sync;
pub mod stats;
pub mod upload;
pub mod users;
