//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the serial
//! console.  `Plot` samples are printed as bare `min<TAB>max` lines on
//! stdout so a serial plotter can graph them; everything else goes through
//! the ESP-IDF logger.

use core::fmt::Write;

use heapless::String;
use log::{info, warn};

use crate::app::events::{AppEvent, PlotSample};
use crate::app::ports::EventSink;

/// `-f32::MAX` at two decimals is 43 characters; two of them plus the tab.
const PLOT_LINE_CAPACITY: usize = 96;

/// Render one plotter line (`"{min:.2}\t{max:.2}"`).
pub fn format_plot_line(sample: &PlotSample) -> String<PLOT_LINE_CAPACITY> {
    let mut line = String::new();
    if write!(line, "{:.2}\t{:.2}", sample.min_volts, sample.max_volts).is_err() {
        warn!("Plot line truncated to {} bytes", PLOT_LINE_CAPACITY);
    }
    line
}

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Plot(sample) => {
                println!("{}", format_plot_line(sample));
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Calibrated(result) => {
                info!(
                    "CAL | target={:.2}V | min={:.2}V gain={:.4} ({:?}) | max={:.2}V gain={:.4} ({:?})",
                    result.target_volts,
                    result.min.measured_volts,
                    result.min.gain,
                    result.min.outcome,
                    result.max.measured_volts,
                    result.max.gain,
                    result.max.outcome,
                );
            }
            AppEvent::PumpChanged { on } => {
                info!("PUMP | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::FaultDetected(fault) => {
                warn!("FAULT | detected: {}", fault);
            }
            AppEvent::FaultCleared => {
                info!("FAULT | cleared");
            }
            AppEvent::ModeChanged { enabled } => {
                info!("MODE | {}", if *enabled { "enabled" } else { "disabled" });
            }
            AppEvent::Started { state } => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
