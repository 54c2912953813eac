//! Simulated table hardware shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

use gantry_motion::{Axis, AxisPins, MotionController, StatusSink, TableConfig};

#[derive(Debug, Default)]
struct PinState {
    high: bool,
    rising_edges: u32,
    writes: Vec<bool>,
    highs_before_failure: Option<u32>,
}

/// Error returned by a [`SimPin`] told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPinError;

impl embedded_hal::digital::Error for SimPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that remembers its level, every write and its rising edges.
#[derive(Debug, Clone, Default)]
pub struct SimPin(Rc<RefCell<PinState>>);

impl SimPin {
    pub fn is_high(&self) -> bool {
        self.0.borrow().high
    }

    pub fn rising_edges(&self) -> u32 {
        self.0.borrow().rising_edges
    }

    pub fn writes(&self) -> Vec<bool> {
        self.0.borrow().writes.clone()
    }

    /// Let `count` more `set_high` calls succeed, then fail every one after.
    pub fn fail_high_after(&self, count: u32) {
        self.0.borrow_mut().highs_before_failure = Some(count);
    }

    fn set_high_checked(&self) -> Result<(), SimPinError> {
        {
            let mut state = self.0.borrow_mut();
            match state.highs_before_failure {
                Some(0) => return Err(SimPinError),
                Some(ref mut left) => *left -= 1,
                None => {}
            }
        }
        self.set(true);
        Ok(())
    }

    fn set(&self, high: bool) {
        let mut state = self.0.borrow_mut();
        if high && !state.high {
            state.rising_edges += 1;
        }
        state.high = high;
        state.writes.push(high);
    }
}

impl ErrorType for SimPin {
    type Error = SimPinError;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_high_checked()
    }
}

/// Limit sensor that reads high once its axis has issued a given number of
/// pulses after arming.
#[derive(Debug, Clone)]
pub struct SimLimit {
    step: SimPin,
    trigger: Rc<RefCell<Option<(u32, u32)>>>,
}

impl SimLimit {
    pub fn new(step: SimPin) -> Self {
        Self {
            step,
            trigger: Rc::new(RefCell::new(None)),
        }
    }

    /// Assert after `pulses` more rising edges on the step pin.
    pub fn arm_after(&self, pulses: u32) {
        *self.trigger.borrow_mut() = Some((self.step.rising_edges(), pulses));
    }

    pub fn disarm(&self) {
        *self.trigger.borrow_mut() = None;
    }

    fn triggered(&self) -> bool {
        match *self.trigger.borrow() {
            Some((baseline, pulses)) => self.step.rising_edges() - baseline >= pulses,
            None => false,
        }
    }
}

impl ErrorType for SimLimit {
    type Error = Infallible;
}

impl InputPin for SimLimit {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.triggered())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.triggered())
    }
}

/// Handles to one axis' simulated lines.
#[derive(Debug, Clone)]
pub struct AxisLines {
    pub step: SimPin,
    pub dir: SimPin,
    pub enable: SimPin,
    pub limit: SimLimit,
}

impl AxisLines {
    fn new() -> Self {
        let step = SimPin::default();
        Self {
            limit: SimLimit::new(step.clone()),
            step,
            dir: SimPin::default(),
            enable: SimPin::default(),
        }
    }

    pub fn pins(&self) -> AxisPins<SimPin, SimPin, SimPin, SimLimit> {
        AxisPins::new(
            self.step.clone(),
            self.dir.clone(),
            self.enable.clone(),
            self.limit.clone(),
        )
    }
}

/// Handles to every simulated line of a table.
#[derive(Debug, Clone)]
pub struct Rig {
    pub axes: [AxisLines; 3],
}

impl Rig {
    pub fn new() -> Self {
        Self {
            axes: [AxisLines::new(), AxisLines::new(), AxisLines::new()],
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisLines {
        &self.axes[axis.index()]
    }

    pub fn pulses(&self) -> [u32; 3] {
        [
            self.axes[0].step.rising_edges(),
            self.axes[1].step.rising_edges(),
            self.axes[2].step.rising_edges(),
        ]
    }

    pub fn all_disabled(&self) -> bool {
        self.axes.iter().all(|a| a.enable.is_high())
    }
}

pub type SimTable = MotionController<SimPin, SimPin, SimPin, SimLimit, NoopDelay>;

/// Build a table on simulated hardware.
pub fn build_table(config: &TableConfig) -> (SimTable, Rig) {
    let rig = Rig::new();
    let table = MotionController::builder()
        .from_config(config)
        .x_axis(rig.axes[0].pins())
        .y_axis(rig.axes[1].pins())
        .z_axis(rig.axes[2].pins())
        .delay(NoopDelay::new())
        .build()
        .expect("simulated table should build");
    (table, rig)
}

/// The reference table with the 0.00079257 in/step ratio used in the
/// truncation examples.
pub fn coarse_config() -> TableConfig {
    let mut config = TableConfig::reference();
    config.step_ratio = gantry_motion::InchesPerStep(0.000_792_57);
    config
}

/// Delay that only advances a simulated clock.
#[derive(Debug, Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn elapsed_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}

/// Status sink that keeps every message.
#[derive(Debug, Default)]
pub struct Recorder(pub Vec<String>);

impl StatusSink for Recorder {
    fn write_status(&mut self, message: &str) {
        self.0.push(message.to_string());
    }
}
