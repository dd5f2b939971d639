//! Interlock evaluation
//!
//! Six protective conditions, checked in a fixed order. Any failing
//! condition makes the snapshot unsafe; the *last* failing condition in
//! table order is the one reported. The order is the table below, not an
//! accident of control flow.

use crate::config::InterlockLimits;
use crate::state::FaultKind;

/// Everything the interlocks look at, sampled at evaluation time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterlockInputs {
    /// Emergency-stop contact reads closed (electrically high)
    pub estop_closed: bool,
    /// Door contact reads closed (electrically high)
    pub door_closed: bool,
    /// L/min
    pub flow_rate: f32,
    /// °C
    pub coil_temperature: f32,
    /// °C
    pub water_temperature: f32,
    /// °C
    pub crucible_temperature: f32,
}

/// One protective condition
pub struct Interlock {
    /// Code reported when this condition fails
    pub fault: FaultKind,
    /// Returns `true` when the condition is violated
    pub violated: fn(&InterlockInputs, &InterlockLimits) -> bool,
}

// Comparisons are written so a NaN reading counts as a violation.

fn estop_open(inputs: &InterlockInputs, _: &InterlockLimits) -> bool {
    !inputs.estop_closed
}

fn door_open(inputs: &InterlockInputs, _: &InterlockLimits) -> bool {
    !inputs.door_closed
}

fn flow_low(inputs: &InterlockInputs, limits: &InterlockLimits) -> bool {
    !(inputs.flow_rate >= limits.min_flow_lpm)
}

fn coil_hot(inputs: &InterlockInputs, limits: &InterlockLimits) -> bool {
    !(inputs.coil_temperature <= limits.max_coil_c)
}

fn water_hot(inputs: &InterlockInputs, limits: &InterlockLimits) -> bool {
    !(inputs.water_temperature <= limits.max_water_c)
}

fn crucible_hot(inputs: &InterlockInputs, limits: &InterlockLimits) -> bool {
    !(inputs.crucible_temperature <= limits.max_crucible_c)
}

/// Interlocks in evaluation order, lowest to highest reporting priority
pub const INTERLOCKS: [Interlock; 6] = [
    Interlock {
        fault: FaultKind::EStop,
        violated: estop_open,
    },
    Interlock {
        fault: FaultKind::DoorOpen,
        violated: door_open,
    },
    Interlock {
        fault: FaultKind::NoFlow,
        violated: flow_low,
    },
    Interlock {
        fault: FaultKind::OvertempCoil,
        violated: coil_hot,
    },
    Interlock {
        fault: FaultKind::OvertempWater,
        violated: water_hot,
    },
    Interlock {
        fault: FaultKind::OvertempCrucible,
        violated: crucible_hot,
    },
];

/// Interlock verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockStatus {
    /// All conditions hold
    Safe,
    /// At least one condition failed; carries the reported code
    Unsafe(FaultKind),
}

/// Evaluate every interlock against one snapshot
///
/// Pure: no state is read or written besides the arguments.
pub fn evaluate(inputs: &InterlockInputs, limits: &InterlockLimits) -> InterlockStatus {
    // Every check runs; a later failure overwrites an earlier one
    INTERLOCKS.iter().fold(InterlockStatus::Safe, |status, interlock| {
        if (interlock.violated)(inputs, limits) {
            InterlockStatus::Unsafe(interlock.fault)
        } else {
            status
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nominal() -> InterlockInputs {
        InterlockInputs {
            estop_closed: true,
            door_closed: true,
            flow_rate: 2.0,
            coil_temperature: 25.0,
            water_temperature: 20.0,
            crucible_temperature: 25.0,
        }
    }

    fn check(inputs: &InterlockInputs) -> InterlockStatus {
        evaluate(inputs, &InterlockLimits::new())
    }

    #[test]
    fn test_nominal_is_safe() {
        assert_eq!(check(&nominal()), InterlockStatus::Safe);
    }

    #[test]
    fn test_each_condition_alone() {
        let mut inputs = nominal();
        inputs.estop_closed = false;
        assert_eq!(check(&inputs), InterlockStatus::Unsafe(FaultKind::EStop));

        let mut inputs = nominal();
        inputs.door_closed = false;
        assert_eq!(check(&inputs), InterlockStatus::Unsafe(FaultKind::DoorOpen));

        let mut inputs = nominal();
        inputs.flow_rate = 1.49;
        assert_eq!(check(&inputs), InterlockStatus::Unsafe(FaultKind::NoFlow));

        let mut inputs = nominal();
        inputs.coil_temperature = 60.5;
        assert_eq!(
            check(&inputs),
            InterlockStatus::Unsafe(FaultKind::OvertempCoil)
        );

        let mut inputs = nominal();
        inputs.water_temperature = 35.1;
        assert_eq!(
            check(&inputs),
            InterlockStatus::Unsafe(FaultKind::OvertempWater)
        );

        let mut inputs = nominal();
        inputs.crucible_temperature = 1600.5;
        assert_eq!(
            check(&inputs),
            InterlockStatus::Unsafe(FaultKind::OvertempCrucible)
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut inputs = nominal();
        inputs.flow_rate = 1.5;
        inputs.coil_temperature = 60.0;
        inputs.water_temperature = 35.0;
        inputs.crucible_temperature = 1600.0;
        assert_eq!(check(&inputs), InterlockStatus::Safe);
    }

    #[test]
    fn test_last_failing_condition_is_reported() {
        let mut inputs = nominal();
        inputs.estop_closed = false;
        inputs.crucible_temperature = 1650.0;
        assert_eq!(
            check(&inputs),
            InterlockStatus::Unsafe(FaultKind::OvertempCrucible)
        );

        let mut inputs = nominal();
        inputs.door_closed = false;
        inputs.flow_rate = 0.0;
        assert_eq!(check(&inputs), InterlockStatus::Unsafe(FaultKind::NoFlow));
    }

    #[test]
    fn test_nan_reading_trips() {
        let mut inputs = nominal();
        inputs.crucible_temperature = f32::NAN;
        assert_eq!(
            check(&inputs),
            InterlockStatus::Unsafe(FaultKind::OvertempCrucible)
        );
    }

    #[test]
    fn test_sensor_sentinel_trips() {
        let mut inputs = nominal();
        inputs.coil_temperature = 999.0;
        assert_ne!(check(&inputs), InterlockStatus::Safe);
    }

    #[test]
    fn test_table_order() {
        let order: [FaultKind; 6] = [
            FaultKind::EStop,
            FaultKind::DoorOpen,
            FaultKind::NoFlow,
            FaultKind::OvertempCoil,
            FaultKind::OvertempWater,
            FaultKind::OvertempCrucible,
        ];
        for (interlock, expected) in INTERLOCKS.iter().zip(order) {
            assert_eq!(interlock.fault, expected);
        }
    }
}
