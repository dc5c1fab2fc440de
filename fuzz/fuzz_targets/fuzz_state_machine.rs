//! Fuzz target: `WellStateMachine::step` + `safety::decide`
//!
//! Each input byte is one sampling cycle: bit 0 is the lower probe, bit 1
//! the upper probe.  Asserts that an inconsistent pair always lands in
//! SENSOR_FAULT, that the pump is never on in a fault state, and that the
//! machine never reaches ELECTRICAL_FAULT on its own.
//!
//! cargo fuzz run fuzz_state_machine

#![no_main]

use libfuzzer_sys::fuzz_target;
use wellpump::fsm::{WellState, WellStateMachine, WetPair};
use wellpump::safety;

fuzz_target!(|data: &[u8]| {
    let mut fsm = WellStateMachine::default();

    for &byte in data {
        let wet = WetPair::new(byte & 0b01 != 0, byte & 0b10 != 0);
        let t = fsm.step(wet);

        assert_eq!(t.to, fsm.current_state());
        if wet.is_inconsistent() {
            assert_eq!(t.to, WellState::SensorFault);
        }
        if t.from == WellState::SensorFault && !wet.is_inconsistent() {
            assert_eq!(t.to, WellState::Empty, "fault recovery must pass through EMPTY");
        }
        if t.to.is_fault() {
            assert!(!safety::decide(t.to));
        }
        assert_ne!(t.to, WellState::ElectricalFault);
    }
});
