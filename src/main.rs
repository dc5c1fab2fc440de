//! Well-pump controller firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  HardwareAdapter            LogEventSink    Esp32Time      │
//! │  (Analog+Digital+Actuator)  (EventSink)     (TimePort)     │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ────────────────     │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │            ControlLoop (pure logic)              │      │
//! │  │  Sampler · Filter · Calibrator · FSM · Policy    │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use embedded_hal::delay::DelayNs;
use log::info;

use wellpump::adapters::gpio::GpioPin;
use wellpump::adapters::hardware::HardwareAdapter;
use wellpump::adapters::log_sink::LogEventSink;
use wellpump::adapters::time::{Esp32TimeAdapter, SystemDelay};
use wellpump::app::ports::TimePort;
use wellpump::app::service::ControlLoop;
use wellpump::config::SystemConfig;
use wellpump::drivers::hw_init;
use wellpump::drivers::pump::PumpDriver;
use wellpump::drivers::status_led::StatusLed;
use wellpump::drivers::watchdog::{Watchdog, DEFAULT_TIMEOUT_MS};
use wellpump::error::Error;
use wellpump::pins;

/// Main loop yield between ticks.  Well below the debounce window.
const LOOP_YIELD_MS: u32 = 1;

fn load_config() -> Result<SystemConfig> {
    match option_env!("WELLPUMP_CONFIG") {
        Some(json) => {
            let config = SystemConfig::from_json(json).context("WELLPUMP_CONFIG rejected")?;
            info!("Config: build-time override applied");
            Ok(config)
        }
        None => {
            let config = SystemConfig::default();
            config.validate().context("default config rejected")?;
            Ok(config)
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  WellPump v{:<26}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;
    info!(
        "Config: wet>{:.0}V, alpha={}, N={}, cadence={}ms, debounce={}ms",
        config.wet_threshold_volts,
        config.filter_alpha,
        config.samples_per_rms,
        config.control_loop_interval_ms,
        config.debounce_ms,
    );

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals(config.relay_active_low)
        .map_err(Error::from)
        .context("peripheral init failed")?;

    let [relay_a, relay_b] = pins::PUMP_RELAY_GPIOS;
    let mut pump = PumpDriver::new(
        [GpioPin::new(relay_a), GpioPin::new(relay_b)],
        config.relay_active_low,
    );
    pump.stop()
        .map_err(Error::from)
        .context("pump relay idle write failed")?;
    let mut hw = HardwareAdapter::new(
        GpioPin::new(pins::BUTTON_MODE_GPIO),
        GpioPin::new(pins::BUTTON_CALIBRATE_GPIO),
        pump,
        StatusLed::new(GpioPin::new(pins::MODE_LED_GPIO)),
    );
    info!(
        "Probes: MIN on GPIO{}, MAX on GPIO{}",
        pins::PROBE_MIN_GPIO,
        pins::PROBE_MAX_GPIO
    );

    let clock = Esp32TimeAdapter::new();
    let mut delay = SystemDelay;
    let mut sink = LogEventSink::new();
    let watchdog = Watchdog::new(DEFAULT_TIMEOUT_MS);

    // ── 4. Control loop ───────────────────────────────────────
    let mut app = ControlLoop::new(config);
    app.start(clock.now_ms(), &mut hw, &mut delay, &mut sink);
    watchdog.feed();

    info!("System ready. Entering control loop.");
    loop {
        app.tick(clock.now_ms(), &mut hw, &mut delay, &mut sink);
        watchdog.feed();
        delay.delay_ms(LOOP_YIELD_MS);
    }
}
