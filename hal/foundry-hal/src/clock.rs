//! Monotonic time base

/// Millisecond clock that never goes backwards
///
/// The counter is allowed to wrap; consumers compare instants with
/// `wrapping_sub`.
pub trait Monotonic {
    /// Milliseconds since an arbitrary epoch (usually boot)
    fn now_ms(&self) -> u32;
}
