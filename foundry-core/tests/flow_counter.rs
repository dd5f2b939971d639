//! Flow pulses recorded from other threads are never lost or double counted

use foundry_core::sensor::FlowPulseCounter;
use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn test_concurrent_pulses_are_conserved() {
    const PRODUCERS: u32 = 4;
    const PULSES_EACH: u32 = 50_000;

    let counter = FlowPulseCounter::new();
    let done = AtomicBool::new(false);

    let taken = std::thread::scope(|s| {
        let consumer = s.spawn(|| {
            let mut total = 0u64;
            while !done.load(Ordering::Acquire) {
                total += counter.take() as u64;
                std::thread::yield_now();
            }
            total
        });

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|_| {
                s.spawn(|| {
                    for _ in 0..PULSES_EACH {
                        counter.record_pulse();
                    }
                })
            })
            .collect();

        for producer in producers {
            producer.join().unwrap();
        }
        done.store(true, Ordering::Release);
        consumer.join().unwrap()
    });

    let total = taken + counter.take() as u64;
    assert_eq!(total, (PRODUCERS * PULSES_EACH) as u64);
    assert_eq!(counter.peek(), 0);
}
