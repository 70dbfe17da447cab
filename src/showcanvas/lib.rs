//! # Showcanvas Architecture
//!
//! Showcanvas turns Dragvertising shows into design elements: a poster with the title,
//! date, venue and lineup, or a grid of performer headshots. It is a **UI-agnostic
//! library** with a CLI client on top; a design-editor plugin would be another client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders views, runs the shell          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controller (controller.rs)                                 │
//! │  - View state: Unauthenticated/Loading/ShowList/ShowDetail  │
//! │  - Search, selection, error banner, one action at a time    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) + Layout Engine (layout/)         │
//! │  - Layout is pure: Show in, ordered placements out          │
//! │  - commands::insert submits placements to a canvas          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Outside world, behind traits                               │
//! │  - catalog::Catalog        (HttpCatalog, InMemoryCatalog)   │
//! │  - canvas::CanvasSink      (DesignFile, RecordingCanvas)    │
//! │  - auth::CredentialProvider (FileCredentials, InMemory...)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From the controller inward, code takes Rust values and returns Rust values. It
//! never prints and never exits. Network, disk, and the canvas are reached only
//! through the traits above, so every layer can be tested with the in-memory
//! implementations.
//!
//! ## Module Overview
//!
//! - [`model`]: `Show`, `Performer`, `ShowDate`
//! - [`layout`]: placements and the poster/grid strategies
//! - [`canvas`]: the canvas trait and its implementations
//! - [`catalog`]: the show catalog trait, HTTP client, and test fixtures
//! - [`auth`]: bearer tokens and where they are kept
//! - [`commands`]: loading, searching, selecting, inserting
//! - [`controller`]: view state machine for UI clients
//! - [`config`]: configuration and directories
//! - [`error`]: error types

pub mod auth;
pub mod canvas;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod model;
