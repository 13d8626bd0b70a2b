//! Linear current estimate for a multiplexed array.
//!
//! Only one LED conducts at a time, so the draw of the whole array is the
//! draw of whichever LED is currently selected. The estimates below report
//! the worst case across the table rather than a sum over it.

use crate::color::{Channel, Rgb};
use crate::config::ElectricalParameters;

/// Current through one conducting channel, in amperes.
///
/// Channels without a positive series resistance contribute nothing.
pub fn channel_current(params: &ElectricalParameters, channel: Channel) -> f32 {
    let resistance = params.resistance[channel.index()];
    if resistance > 0.0 {
        (params.supply_voltage - params.forward_voltage[channel.index()]) / resistance
    } else {
        0.0
    }
}

/// Current drawn by one LED showing `rgb`, in amperes
pub fn led_current(params: &ElectricalParameters, rgb: Rgb) -> f32 {
    Channel::ALL
        .iter()
        .filter(|channel| rgb.channel(**channel))
        .map(|channel| channel_current(params, *channel))
        .sum()
}

/// Peak current over the configured colors, in amperes.
pub fn estimated_current(params: &ElectricalParameters, leds: &[Rgb]) -> f32 {
    leds.iter()
        .map(|rgb| led_current(params, *rgb))
        .fold(0.0, f32::max)
}

/// Current of a single LED with all three channels on, in amperes.
pub fn estimated_max_current(params: &ElectricalParameters) -> f32 {
    led_current(params, Rgb::new(true, true, true))
}

/// Peak current as a fraction of [`estimated_max_current`], `0.0` when no
/// ceiling can be computed.
pub fn utilization(params: &ElectricalParameters, leds: &[Rgb]) -> f32 {
    let max = estimated_max_current(params);
    if max > 0.0 {
        estimated_current(params, leds) / max
    } else {
        0.0
    }
}
