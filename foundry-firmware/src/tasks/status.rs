//! Status reporting task

use defmt::*;

use crate::channels::STATUS;

#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    loop {
        let s = STATUS.wait().await;
        info!(
            "{} enabled={} set={}% power={}W crucible={}°C coil={}°C water={}°C flow={}L/min fault={} runtime={}h",
            s.phase,
            s.enabled,
            s.power_setpoint,
            s.actual_power,
            s.crucible_temp,
            s.coil_temp,
            s.water_temp,
            s.flow_rate,
            s.fault_code,
            s.runtime_hours
        );
        if s.cooldown_remaining_s > 0 {
            info!("Cooldown: {}s remaining", s.cooldown_remaining_s);
        }
        if s.meter_stale {
            warn!("Power meter reading is stale");
        }
    }
}
