//! Control loop task
//!
//! Owns the [`FurnaceController`]. Every tick it applies queued
//! supervisor commands, runs one control cycle and reports shutdowns.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use foundry_core::config::{SHUTDOWN_DEADLINE_MS, TICK_PERIOD_MS};
use foundry_core::safety::FaultRecord;
use foundry_core::FurnaceController;

use crate::board::Board;
use crate::channels::{COMMANDS, STATUS};

/// Ticks between status publications (1 s)
const STATUS_EVERY_TICKS: u32 = 100;

#[embassy_executor::task]
pub async fn control_task(mut controller: FurnaceController<'static, Board>) {
    info!("Control task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS as u64));
    let mut ticks: u32 = 0;

    loop {
        ticker.next().await;

        while let Ok(command) = COMMANDS.try_receive() {
            if let Err(e) = controller.apply(command) {
                warn!("Command {} rejected: {}", command, e);
            }
        }

        let started = Instant::now();
        controller.tick();
        let elapsed_ms = started.elapsed().as_millis();
        if elapsed_ms > SHUTDOWN_DEADLINE_MS as u64 {
            warn!("Control cycle overran: {}ms", elapsed_ms);
        }

        while let Some(record) = controller.take_fault_record() {
            report_shutdown(&record);
        }

        ticks = ticks.wrapping_add(1);
        if ticks % STATUS_EVERY_TICKS == 0 {
            STATUS.signal(controller.status());
        }
    }
}

fn report_shutdown(record: &FaultRecord) {
    error!(
        "EMERGENCY SHUTDOWN: {} (code {}), runtime {}s, crucible {}°C, power {}W",
        record.fault.name(),
        record.fault.code(),
        record.runtime_seconds,
        record.crucible_temp,
        record.actual_power
    );
}
