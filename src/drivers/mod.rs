//! Actuator drivers, input conditioning, and hardware initialisation.

pub mod button;
pub mod hw_init;
pub mod pump;
pub mod status_led;
pub mod watchdog;
