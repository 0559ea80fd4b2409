//! Terminal frontend for the noughts tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **App**: screen state around a [`noughts_core::GameState`]
//! - **Orchestrator**: runs the minimax search on a blocking worker
//! - **Store**: JSON save file, written after every change
//! - **Config**: TOML settings with CLI overrides

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod orchestrator;
pub mod store;
pub mod ui;

pub use app::{App, Flow};
pub use cli::{Cli, ModeArg};
pub use config::{Config, ConfigError};
pub use orchestrator::{AiReply, AiRequest, AiWorker};
pub use store::{SaveStore, StoreError};
