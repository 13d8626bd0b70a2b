use crate::color::{Channel, Rgb};
use crate::config::*;
use crate::device::Lines;
use crate::power;
use crate::state::{Frame, State};

use embedded_hal_async::delay::DelayNs;

/// A line write failed while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MultiplexError<E> {
    Anode { index: usize, source: E },
    Channel { channel: Channel, source: E },
}

/// Time-multiplexed driver for `N` discrete-color RGB LEDs.
///
/// Every LED has its own anode select line while the red, green and blue
/// channel lines are shared. [`Multiplex::update`] lights one LED at a time
/// and has to be called often, well under a millisecond apart, for the array
/// to look steady.
pub struct Multiplex<L, const N: usize> {
    lines: L,
    state: State<N>,
    electrical: ElectricalParameters,
}

// Line independent implementation
impl<L, const N: usize> Multiplex<L, N> {
    const NOT_EMPTY: () = assert!(N > 0, "a multiplexed array needs at least one LED");

    pub fn into_inner(self) -> L {
        self.lines
    }

    pub fn inner(&self) -> &L {
        &self.lines
    }

    pub fn inner_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Number of LEDs in the array
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether `index` addresses an LED of this array. Every index based
    /// setter silently ignores indices for which this returns false.
    pub const fn contains(&self, index: usize) -> bool {
        index < N
    }

    /// Set the channels of one LED
    ///
    /// # Arguments
    /// * `index` - The LED to change
    /// * `red`, `green`, `blue` - Whether each channel is lit
    pub fn set_rgb(&mut self, index: usize, red: bool, green: bool, blue: bool) {
        self.set_color(index, Rgb::new(red, green, blue));
    }

    /// Set the color of one LED, from a [`Color`](crate::Color) or an [`Rgb`]
    ///
    /// The change shows up on the next scan step that reaches the LED.
    pub fn set_color(&mut self, index: usize, color: impl Into<Rgb>) {
        if !self.state.set(index, color.into()) {
            trace!("rgb-multiplex: ignoring LED index {} out of {}", index, N);
        }
    }

    /// Configured color of one LED, `None` when out of range
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.state.get(index)
    }

    pub fn colors(&self) -> &[Rgb; N] {
        self.state.leds()
    }

    /// Set the global brightness
    ///
    /// # Arguments
    /// * `level` - 0 keeps the array dark, 8 shows every frame. Larger
    ///   values are clamped to 8.
    pub fn set_global_brightness(&mut self, level: u8) {
        self.state.set_brightness(level);
        debug!("rgb-multiplex: brightness {}", self.state.brightness());
    }

    pub fn global_brightness(&self) -> u8 {
        self.state.brightness()
    }

    /// LED the next scan step services
    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    /// Current dimming phase, in `0..8`
    pub fn phase(&self) -> u8 {
        self.state.phase()
    }

    /// Set the series resistors, in ohms. A value that is not positive marks
    /// the channel as not fitted.
    pub fn set_resistor_values(&mut self, red: f32, green: f32, blue: f32) {
        self.electrical.resistance = [red, green, blue];
    }

    /// Set the LED forward voltages, in volts
    pub fn set_forward_voltages(&mut self, red: f32, green: f32, blue: f32) {
        self.electrical.forward_voltage = [red, green, blue];
    }

    pub fn set_supply_voltage(&mut self, volts: f32) {
        self.electrical.supply_voltage = volts;
    }

    pub fn supply_voltage(&self) -> f32 {
        self.electrical.supply_voltage
    }

    pub fn electrical(&self) -> &ElectricalParameters {
        &self.electrical
    }

    pub fn set_electrical(&mut self, electrical: ElectricalParameters) {
        self.electrical = electrical;
    }

    /// Peak current of the configured colors, in amperes.
    ///
    /// Only one LED conducts at any time, so this is the draw of the
    /// heaviest LED rather than a sum over the array.
    pub fn estimated_current(&self) -> f32 {
        power::estimated_current(&self.electrical, self.state.leds())
    }

    /// Current of one LED with all channels lit, in amperes
    pub fn estimated_max_current(&self) -> f32 {
        power::estimated_max_current(&self.electrical)
    }

    /// [`Self::estimated_current`] as a fraction of
    /// [`Self::estimated_max_current`]
    pub fn current_utilization(&self) -> f32 {
        power::utilization(&self.electrical, self.state.leds())
    }
}

impl<L: Lines, const N: usize> Multiplex<L, N> {
    /// Create a new driver
    /// # Arguments
    /// * `lines` - The output lines, with exactly `N` anode lines
    ///
    /// # Returns
    /// A new driver with every LED off and full brightness
    ///
    /// # Panics
    /// If `lines` does not have exactly `N` anode lines
    pub fn new(lines: L) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NOT_EMPTY;
        core::assert_eq!(lines.anode_count(), N);

        Self {
            lines,
            state: State::default(),
            electrical: ElectricalParameters::default(),
        }
    }

    /// Bring the lines to a known state
    ///
    /// Every anode and channel line is driven inactive, the table is cleared
    /// and the scan restarts at the first LED.
    ///
    /// # Returns
    /// * Ok(()) if all lines were written
    pub fn begin(&mut self) -> Result<(), MultiplexError<L::Error>> {
        debug!("rgb-multiplex: begin with {} LEDs", N);
        self.blank()?;
        self.state.clear();
        self.state.restart();
        Ok(())
    }

    /// Switch one LED off and scan once so the change is on the lines
    /// straight away. Does nothing, not even the scan, when `index` is out
    /// of range.
    pub fn off(&mut self, index: usize) -> Result<(), MultiplexError<L::Error>> {
        if !self.state.set(index, Rgb::OFF) {
            trace!("rgb-multiplex: ignoring LED index {} out of {}", index, N);
            return Ok(());
        }
        self.update()
    }

    /// Switch every LED off and scan once
    pub fn all_off(&mut self) -> Result<(), MultiplexError<L::Error>> {
        self.state.clear();
        self.update()
    }

    /// Perform one multiplexing step
    ///
    /// Releases every line, then, unless the dimming phase blanks this
    /// frame, drives the channels for the LED under the cursor and selects
    /// its anode. The cursor and the dimming phase move on once every write
    /// went through, so a failed step is retried on the same LED.
    ///
    /// # Returns
    /// * Ok(()) if all lines were written
    pub fn update(&mut self) -> Result<(), MultiplexError<L::Error>> {
        self.blank()?;

        if let Frame::Lit { index, rgb } = self.state.frame() {
            for channel in Channel::ALL {
                self.set_channel(channel, rgb.channel(channel))?;
            }
            self.set_anode(index, true)?;
        }

        self.state.step();
        Ok(())
    }

    /// Scan every LED once, waiting `period_us` after each step
    pub async fn scan_pass<D: DelayNs>(
        &mut self,
        delay: &mut D,
        period_us: u32,
    ) -> Result<(), MultiplexError<L::Error>> {
        for _ in 0..N {
            self.update()?;
            delay.delay_us(period_us).await;
        }

        Ok(())
    }

    /// Keep scanning until a line write fails
    ///
    /// For async executors without a spare periodic interrupt.
    ///
    /// # Returns
    /// The error that stopped the scan
    pub async fn run<D: DelayNs>(
        &mut self,
        delay: &mut D,
        period_us: u32,
    ) -> MultiplexError<L::Error> {
        debug!("rgb-multiplex: scanning every {} us", period_us);
        loop {
            if let Err(error) = self.scan_pass(delay, period_us).await {
                return error;
            }
        }
    }

    fn blank(&mut self) -> Result<(), MultiplexError<L::Error>> {
        for channel in Channel::ALL {
            self.set_channel(channel, false)?;
        }
        for index in 0..N {
            self.set_anode(index, false)?;
        }
        Ok(())
    }

    fn set_anode(&mut self, index: usize, active: bool) -> Result<(), MultiplexError<L::Error>> {
        self.lines
            .set_anode(index, active)
            .map_err(|source| MultiplexError::Anode { index, source })
    }

    fn set_channel(
        &mut self,
        channel: Channel,
        active: bool,
    ) -> Result<(), MultiplexError<L::Error>> {
        self.lines
            .set_channel(channel, active)
            .map_err(|source| MultiplexError::Channel { channel, source })
    }
}
