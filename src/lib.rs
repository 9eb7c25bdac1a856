//! bettrWrite - rewrite selected text in place with an LLM
//!
//! A global hotkey copies the current selection, sends it with the
//! shortcut's prompt to OpenAI or a local Ollama server, and pastes the
//! answer over the selection. The clipboard is restored afterwards.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Key combinations, shortcut definitions, configuration, and the run state machine
//! - **Application**: Port traits, the selection bridge, the transform engine, the hotkey listener
//! - **Infrastructure**: Adapters (arboard, enigo, reqwest backends, notify-rust, global-hotkey)
//! - **CLI**: Command-line interface, argument parsing, logging, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
