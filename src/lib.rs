//! smartlink - smart link and pre-save pages for musicians
//!
//! One public landing page per release with every streaming platform, an
//! optional Spotify player, socials and contact; pre-save pages wired to
//! Spotify OAuth; a bearer-token admin API for a dashboard (profiles, links,
//! presaves, a multi-step form wizard, metrics).
//!
//! # Architecture
//! - `storage`: SeaORM backends (SQLite / MySQL / PostgreSQL) and models
//! - `render`: page view building, embed resolution, themed HTML
//! - `wizard`: server-side multi-step drafts
//! - `services`: business logic shared by HTTP handlers and the CLI
//! - `api`: HTTP services and middleware
//! - `interfaces`: command-line interface
//! - `runtime`: startup, shutdown and server mode

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
pub mod wizard;
