//! Board-agnostic core logic for the cubepad motion controller
//!
//! This crate turns the state of up to three wireless sensor cubes into a
//! virtual joystick report and streams it over a flow-controlled radio pipe:
//!
//! - Sensor tracking (accelerometer, touch, neighbor adjacency)
//! - Axis and button mapping into control packets
//! - Bounded transmit/receive pipes with reserve/commit semantics
//! - Connection lifecycle and event dispatch table
//! - Link counters and periodic reporting
//! - Mapping configuration (postcard storage, TOML subset)
//!
//! Everything runs inside single-threaded, run-to-completion event handlers;
//! nothing in this crate blocks.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod link;
pub mod mapping;
pub mod sensor;
pub mod traits;
