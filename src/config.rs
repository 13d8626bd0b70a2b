/// Number of frames in one dimming cycle. The PWM phase counts `0..PWM_PHASES`.
pub const PWM_PHASES: u8 = 8;

/// Highest global brightness, every frame is shown.
pub const MAX_BRIGHTNESS: u8 = PWM_PHASES;

/// Interval between two scan steps when the periodic timer drives the display.
pub const AUTO_UPDATE_PERIOD_US: u32 = 100;

/// Electrical level at which a line is considered active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    /// Level to drive for the requested logical state
    pub const fn is_high(self, active: bool) -> bool {
        match self {
            ActiveLevel::High => active,
            ActiveLevel::Low => !active,
        }
    }
}

/// Wiring of the anode select lines and the shared channel lines.
///
/// The default matches common-anode LEDs: the anode line sources current when
/// high and a channel line sinks it when low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineConfig {
    pub anode: ActiveLevel,
    pub channel: ActiveLevel,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            anode: ActiveLevel::High,
            channel: ActiveLevel::Low,
        }
    }
}

/// Electrical parameters used by the current estimate.
///
/// Per-channel arrays are indexed red, green, blue. A resistance that is not
/// strictly positive marks the channel as absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElectricalParameters {
    /// Series resistor per channel, in ohms
    pub resistance: [f32; 3],
    /// LED forward voltage per channel, in volts
    pub forward_voltage: [f32; 3],
    /// Supply voltage, in volts
    pub supply_voltage: f32,
}
