//! TUI module for the interactive menu.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Session, Screen, Action, Transition)
//! - `update`: Pure transitions (Session, Action) → Transition
//! - `view`: Pure rendering Session → Frame
//! - `input`: Byte accumulation and key decoding
//! - `terminal`: Control/input terminal modes
//! - `run`: Effects (event loop, terminal lifecycle)

pub mod input;
pub mod run;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;
pub mod view;
