//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements               | Connects to            |
//! |------------|--------------------------|------------------------|
//! | `gpio`     | embedded-hal digital     | ESP32 GPIO (hw_init)   |
//! | `hardware` | AnalogInput              | ESP32 ADC1             |
//! |            | DigitalInput             | button GPIOs           |
//! |            | ActuatorPort             | pump relays, mode LED  |
//! | `log_sink` | EventSink                | Serial log / plotter   |
//! | `time`     | TimePort, DelayNs        | ESP32 system timer     |

pub mod gpio;
pub mod hardware;
pub mod log_sink;
pub mod time;
