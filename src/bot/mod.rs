/// Slash-command definitions
pub mod commands;
/// Per-user conversation state machine
pub mod fsm;
/// Dispatcher schema and message handlers
pub mod handlers;
/// Reply keyboards and button routing
pub mod keyboards;
/// Listing and search-result formatting
pub mod render;
