//! Power meter UART task
//!
//! Runs the meter exchange off the control tick. Each poll request
//! triggers one request/reply; the outcome is parked in
//! [`METER_REPLY`] for the control tick to pick up.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};

use foundry_core::sensor::{METER_REQUEST, METER_RESPONSE_LEN};
use foundry_core::traits::UartError;
use foundry_hal::UartConfig;

use crate::board::{MeterReply, METER_REPLY};
use crate::channels::METER_POLL;

#[embassy_executor::task]
pub async fn meter_task(mut tx: BufferedUartTx, mut rx: BufferedUartRx, config: UartConfig) {
    info!("Meter task started");

    let timeout = Duration::from_millis(config.rx_timeout_ms as u64);

    loop {
        METER_POLL.wait().await;

        let reply = exchange(&mut tx, &mut rx, timeout).await;
        if let MeterReply::Failed(e) = reply {
            debug!("Meter exchange failed: {}", e);
        }
        METER_REPLY.lock(|latest| latest.set(Some(reply)));
    }
}

async fn exchange(tx: &mut BufferedUartTx, rx: &mut BufferedUartRx, timeout: Duration) -> MeterReply {
    // Drop anything left over from an earlier, abandoned reply
    let mut scratch = [0u8; METER_RESPONSE_LEN];
    while let Ok(Ok(n)) = with_timeout(Duration::from_millis(1), rx.read(&mut scratch)).await {
        if n == 0 {
            break;
        }
    }

    if tx.write_all(&METER_REQUEST).await.is_err() || tx.flush().await.is_err() {
        return MeterReply::Failed(UartError::Bus);
    }

    let mut bytes = [0u8; METER_RESPONSE_LEN];
    let mut len = 0;
    while len < METER_RESPONSE_LEN {
        match with_timeout(timeout, rx.read(&mut bytes[len..])).await {
            Ok(Ok(0)) | Err(_) => break,
            Ok(Ok(n)) => len += n,
            Ok(Err(_)) => return MeterReply::Failed(UartError::Bus),
        }
    }

    if len == 0 {
        MeterReply::Failed(UartError::Timeout)
    } else {
        MeterReply::Frame { bytes, len }
    }
}
