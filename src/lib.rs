//! # Drop Four
//!
//! A Connect Four game with a machine opponent at three difficulty levels.
//! Features a terminal UI built with Ratatui and a headless arena for pitting
//! the difficulty levels against each other.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, state machine
//! - [`ai`] — Heuristic, alpha-beta search, difficulty strategies
//! - [`session`] — Turn orchestration, scores, deferred machine moves, events
//! - [`ui`] — Terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod ui;
