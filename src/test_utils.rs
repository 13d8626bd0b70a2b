use crate::color::Channel;
use crate::device::Lines;

use core::cell::Cell;
use embedded_hal::digital::{Error, ErrorKind, ErrorType, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    Anode(usize, bool),
    Channel(Channel, bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeLineError;

/// Records logical line levels and every write made to them.
pub struct FakeLines<const N: usize> {
    pub anodes: [bool; N],
    pub channels: [bool; 3],
    pub events: heapless::Vec<LineEvent, 256>,
    pub max_active_anodes: usize,
    pub failing_anode: Option<usize>,
    /// Anode that can be released but not selected
    pub failing_select: Option<usize>,
}

impl<const N: usize> FakeLines<N> {
    pub fn new() -> Self {
        Self {
            anodes: [false; N],
            channels: [false; 3],
            events: heapless::Vec::new(),
            max_active_anodes: 0,
            failing_anode: None,
            failing_select: None,
        }
    }

    pub fn failing_anode(index: usize) -> Self {
        Self {
            failing_anode: Some(index),
            ..Self::new()
        }
    }

    pub fn failing_select(index: usize) -> Self {
        Self {
            failing_select: Some(index),
            ..Self::new()
        }
    }

    /// Index of the selected anode, if any
    pub fn active_anode(&self) -> Option<usize> {
        self.anodes.iter().position(|active| *active)
    }

    pub fn is_blank(&self) -> bool {
        self.active_anode().is_none() && self.channels == [false; 3]
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, event: LineEvent) {
        // Long runs only look at levels, drop what does not fit
        let _ = self.events.push(event);
    }
}

impl<const N: usize> Lines for FakeLines<N> {
    type Error = FakeLineError;

    fn anode_count(&self) -> usize {
        N
    }

    fn set_anode(&mut self, index: usize, active: bool) -> Result<(), FakeLineError> {
        if self.failing_anode == Some(index) || (active && self.failing_select == Some(index)) {
            return Err(FakeLineError);
        }
        self.anodes[index] = active;
        self.record(LineEvent::Anode(index, active));

        let active_count = self.anodes.iter().filter(|active| **active).count();
        self.max_active_anodes = self.max_active_anodes.max(active_count);
        Ok(())
    }

    fn set_channel(&mut self, channel: Channel, active: bool) -> Result<(), FakeLineError> {
        self.channels[channel.index()] = active;
        self.record(LineEvent::Channel(channel, active));
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakePinError;

impl Error for FakePinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin writing its electrical level into a shared cell
pub struct FakePin<'a> {
    level: &'a Cell<bool>,
    fail: bool,
}

impl<'a> FakePin<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level, fail: false }
    }

    pub fn failing(level: &'a Cell<bool>) -> Self {
        Self { level, fail: true }
    }
}

impl ErrorType for FakePin<'_> {
    type Error = FakePinError;
}

impl OutputPin for FakePin<'_> {
    fn set_low(&mut self) -> Result<(), FakePinError> {
        if self.fail {
            return Err(FakePinError);
        }
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), FakePinError> {
        if self.fail {
            return Err(FakePinError);
        }
        self.level.set(true);
        Ok(())
    }
}

/// Async delay that only counts what it was asked to wait
#[derive(Default)]
pub struct FakeDelay {
    pub calls: usize,
    pub total_ns: u64,
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }
}

#[cfg(feature = "auto-update")]
pub use timer::*;

#[cfg(feature = "auto-update")]
mod timer {
    use crate::scheduler::PeriodicTimer;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FakeTimerError;

    /// Periodic timer whose interrupt is raised by hand with [`FakeTimer::fire`]
    #[derive(Default)]
    pub struct FakeTimer {
        pub armed: Option<(u32, fn())>,
        pub starts: usize,
        pub cancels: usize,
        pub fail: bool,
    }

    impl FakeTimer {
        pub fn fire(&self) {
            if let Some((_, handler)) = self.armed {
                handler();
            }
        }
    }

    impl PeriodicTimer for FakeTimer {
        type Error = FakeTimerError;

        fn start(&mut self, period_us: u32, handler: fn()) -> Result<(), FakeTimerError> {
            if self.fail {
                return Err(FakeTimerError);
            }
            self.starts += 1;
            self.armed = Some((period_us, handler));
            Ok(())
        }

        fn cancel(&mut self) -> Result<(), FakeTimerError> {
            if self.fail {
                return Err(FakeTimerError);
            }
            self.cancels += 1;
            self.armed = None;
            Ok(())
        }
    }
}
