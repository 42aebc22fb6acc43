//! GraceWise TUI - Terminal chat surface
//!
//! A full-screen terminal front-end for a GraceWise chat session. All
//! conversation logic lives in `gracewise_conductor`; this crate turns key
//! presses into surface events and directives into pixels.
//!
//! # Architecture
//!
//! - **SessionClient**: Embeds the `ChatSession` and runs exchanges on tasks
//! - **Display**: Directive-driven display state (bubbles, pending indicator,
//!   input field, welcome placeholder, sidebar)
//! - **App**: Event loop and rendering

pub mod app;
pub mod display;
pub mod session_client;
pub mod theme;

pub use app::App;
pub use display::DisplayState;
pub use session_client::SessionClient;
