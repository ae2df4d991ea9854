//! # StudyBuddy Bot
//!
//! A Telegram bot that helps a student keep track of a class schedule,
//! assignment deadlines, and free-text notes.
//!
//! ## Features
//! - Button-menu navigation with multi-step input flows
//! - Quick-note capture of any unrecognized idle text
//! - Case-insensitive substring search over notes
//! - Daily morning digest to every known user
//! - JSON-file persistence, rewritten after every mutation
//! - Plain-text liveness endpoints for the hosting platform

/// Message routing, keyboards, conversation flows
pub mod bot;
/// Configuration from environment variables
pub mod config;
/// Background services: reminders and liveness probes
pub mod services;
/// The file-backed user record store
pub mod store;
/// Small shared helpers
pub mod utils;
