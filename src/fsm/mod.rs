//! Well-level finite state machine.
//!
//! Table-driven engine in the classic embedded style:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  StateTable                                          │
//! │  ┌─────────────────┬──────────────────────────────┐  │
//! │  │ WellState       │ on_update                    │  │
//! │  ├─────────────────┼──────────────────────────────┤  │
//! │  │ Empty           │ fn(WetPair) -> Option<Next>  │  │
//! │  │ Filling         │ fn(WetPair) -> Option<Next>  │  │
//! │  │ Full            │ fn(WetPair) -> Option<Next>  │  │
//! │  │ Draining        │ fn(WetPair) -> Option<Next>  │  │
//! │  │ SensorFault     │ fn(WetPair) -> Option<Next>  │  │
//! │  │ ElectricalFault │ fn(WetPair) -> Option<Next>  │  │
//! │  └─────────────────┴──────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Each step first applies the fault precondition (upper probe wet while
//! the lower one is dry), which overrides the table from every state.
//! Otherwise the current state's `on_update` decides: `Some(next)` moves,
//! `None` holds. Handlers are pure; reporting is left to the caller, which
//! diffs the returned [`Transition`].

pub mod context;
pub mod states;

use log::{debug, info, warn};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Water level in the well as derived from the two probes.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WellState {
    Empty = 0,
    Filling = 1,
    Full = 2,
    Draining = 3,
    SensorFault = 4,
    ElectricalFault = 5,
}

impl WellState {
    /// Total number of states: used to size the table array.
    pub const COUNT: usize = 6;

    /// Every state, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Empty,
        Self::Filling,
        Self::Full,
        Self::Draining,
        Self::SensorFault,
        Self::ElectricalFault,
    ];

    /// Convert a table index back to `WellState`.  Panics on out-of-range in
    /// debug builds; returns `SensorFault` in release (pump-off fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Empty,
            1 => Self::Filling,
            2 => Self::Full,
            3 => Self::Draining,
            4 => Self::SensorFault,
            5 => Self::ElectricalFault,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::SensorFault
            }
        }
    }

    /// True for the states in which the pump must stay off unconditionally.
    pub const fn is_fault(self) -> bool {
        matches!(self, Self::SensorFault | Self::ElectricalFault)
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Wet/dry classification of both probes for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WetPair {
    /// Lower probe is submerged.
    pub min_wet: bool,
    /// Upper probe is submerged.
    pub max_wet: bool,
}

impl WetPair {
    pub const fn new(min_wet: bool, max_wet: bool) -> Self {
        Self { min_wet, max_wet }
    }

    /// Classify filtered voltages against the wet threshold.
    /// A reading at or below the threshold counts as dry.
    pub fn classify(min_volts: f32, max_volts: f32, wet_threshold_volts: f32) -> Self {
        Self {
            min_wet: min_volts > wet_threshold_volts,
            max_wet: max_volts > wet_threshold_volts,
        }
    }

    /// The upper probe can only be wet if the lower one is too.
    pub const fn is_inconsistent(self) -> bool {
        !self.min_wet && self.max_wet
    }
}

// ---------------------------------------------------------------------------
// Table types
// ---------------------------------------------------------------------------

/// Signature for the per-step update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to hold.
pub type StateUpdateFn = fn(WetPair) -> Option<WellState>;

/// Static descriptor for a single state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: WellState,
    pub name: &'static str,
    pub on_update: StateUpdateFn,
}

/// Outcome of one [`WellStateMachine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: WellState,
    pub to: WellState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Pure transition function: the next state for `(state, wet)`.
pub fn next_state(
    table: &[StateDescriptor; WellState::COUNT],
    state: WellState,
    wet: WetPair,
) -> WellState {
    if wet.is_inconsistent() {
        return WellState::SensorFault;
    }
    (table[state as usize].on_update)(wet).unwrap_or(state)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Holds the current (and previous) well state and advances it.
pub struct WellStateMachine {
    table: [StateDescriptor; WellState::COUNT],
    current: WellState,
    previous: WellState,
}

impl Default for WellStateMachine {
    fn default() -> Self {
        Self::new(WellState::Empty)
    }
}

impl WellStateMachine {
    pub fn new(initial: WellState) -> Self {
        Self {
            table: states::build_state_table(),
            current: initial,
            previous: initial,
        }
    }

    /// Advance by one sampling cycle.
    pub fn step(&mut self, wet: WetPair) -> Transition {
        let from = self.current;
        let to = next_state(&self.table, from, wet);

        if to != from {
            if wet.is_inconsistent() {
                warn!(
                    "WELL: inconsistent probes (min dry, max wet) in {}",
                    self.name(from)
                );
            }
            info!("WELL transition: {} -> {}", self.name(from), self.name(to));
            self.previous = from;
            self.current = to;
        } else {
            debug!(
                "WELL: holding {} (min_wet={}, max_wet={})",
                self.name(from),
                wet.min_wet,
                wet.max_wet
            );
        }

        Transition { from, to }
    }

    /// Jump directly to `next` (debug / testing only).
    pub fn force_transition(&mut self, next: WellState) -> Transition {
        let from = self.current;
        if next != from {
            info!("WELL forced: {} -> {}", self.name(from), self.name(next));
            self.previous = from;
            self.current = next;
        }
        Transition { from, to: next }
    }

    pub fn current_state(&self) -> WellState {
        self.current
    }

    /// State before the most recent transition.
    pub fn previous_state(&self) -> WellState {
        self.previous
    }

    pub fn name(&self, state: WellState) -> &'static str {
        self.table[state as usize].name
    }
}
