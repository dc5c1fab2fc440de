//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control loop of the well pump controller:
//! sampling cadence, button handling, state machine orchestration and pump
//! policy.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
