//! Coolant flow pulse task
//!
//! Counts leading edges from the flow meter into the shared counter. The
//! control tick converts the count to L/min once per window.

use defmt::*;
use embassy_rp::gpio::Input;

use foundry_core::sensor::FlowPulseCounter;

#[embassy_executor::task]
pub async fn flow_task(
    mut pin: Input<'static>,
    active_low: bool,
    pulses: &'static FlowPulseCounter,
) {
    info!("Flow task started (active {})", if active_low { "low" } else { "high" });

    loop {
        if active_low {
            pin.wait_for_falling_edge().await;
        } else {
            pin.wait_for_rising_edge().await;
        }
        pulses.record_pulse();
    }
}
