//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod control;
pub mod flow;
pub mod meter;
pub mod status;

pub use control::control_task;
pub use flow::flow_task;
pub use meter::meter_task;
pub use status::status_task;
