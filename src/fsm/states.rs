//! Concrete state handler functions and table builder.
//!
//! Each state is one plain `fn` pointer, with no closures and no heap.
//! Handlers see only the current [`WetPair`]; the fault
//! precondition has already been applied by the engine.
//!
//! ```text
//!  (min_wet, max_wet)
//!
//!  EMPTY    ──(T,F)──▶ FILLING     EMPTY    ──(T,T)──▶ FULL
//!  FILLING  ──(T,T)──▶ FULL        FILLING  ──(F,F)──▶ EMPTY
//!  FULL     ──(T,F)──▶ DRAINING    FULL     ──(F,F)──▶ EMPTY
//!  DRAINING ──(T,T)──▶ FULL        DRAINING ──(F,F)──▶ EMPTY
//!
//!  Any state ──(F,T)──▶ SENSOR_FAULT ──(anything else)──▶ EMPTY
//!  ELECTRICAL_FAULT: no table exits
//! ```

use super::{StateDescriptor, WellState, WetPair};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once per state machine.
pub fn build_state_table() -> [StateDescriptor; WellState::COUNT] {
    [
        // Index 0: Empty
        StateDescriptor {
            id: WellState::Empty,
            name: "EMPTY",
            on_update: empty_update,
        },
        // Index 1: Filling
        StateDescriptor {
            id: WellState::Filling,
            name: "FILLING",
            on_update: filling_update,
        },
        // Index 2: Full
        StateDescriptor {
            id: WellState::Full,
            name: "FULL",
            on_update: full_update,
        },
        // Index 3: Draining
        StateDescriptor {
            id: WellState::Draining,
            name: "DRAINING",
            on_update: draining_update,
        },
        // Index 4: SensorFault
        StateDescriptor {
            id: WellState::SensorFault,
            name: "SENSOR_FAULT",
            on_update: sensor_fault_update,
        },
        // Index 5: ElectricalFault
        StateDescriptor {
            id: WellState::ElectricalFault,
            name: "ELECTRICAL_FAULT",
            on_update: electrical_fault_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Level states
// ═══════════════════════════════════════════════════════════════════════════

fn empty_update(wet: WetPair) -> Option<WellState> {
    match (wet.min_wet, wet.max_wet) {
        (true, true) => Some(WellState::Full),
        (true, false) => Some(WellState::Filling),
        _ => None,
    }
}

fn filling_update(wet: WetPair) -> Option<WellState> {
    match (wet.min_wet, wet.max_wet) {
        (true, true) => Some(WellState::Full),
        (false, false) => Some(WellState::Empty),
        _ => None,
    }
}

fn full_update(wet: WetPair) -> Option<WellState> {
    match (wet.min_wet, wet.max_wet) {
        (true, false) => Some(WellState::Draining),
        (false, false) => Some(WellState::Empty),
        _ => None,
    }
}

fn draining_update(wet: WetPair) -> Option<WellState> {
    match (wet.min_wet, wet.max_wet) {
        (false, false) => Some(WellState::Empty),
        (true, true) => Some(WellState::Full),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Fault states
// ═══════════════════════════════════════════════════════════════════════════

/// Recover to EMPTY (never straight to FULL) once the probes agree again.
fn sensor_fault_update(wet: WetPair) -> Option<WellState> {
    if wet.min_wet || !wet.max_wet {
        Some(WellState::Empty)
    } else {
        None
    }
}

// Latched: nothing in the level table leaves this state.
fn electrical_fault_update(_wet: WetPair) -> Option<WellState> {
    None
}
