//! Energy meter telemetry for TP-Link smart plugs, relayed through the TP-Link cloud.
//!
//! [`EmeterDevice`] sends emeter commands through a [`PassThrough`] channel and turns the
//! responses into [`RealtimeReading`], [`DaySummary`] and [`MonthSummary`] values in
//! canonical units, whichever firmware generation produced them.

pub mod config;
pub mod device;
pub mod emeter_device;
pub mod errors;
pub mod logging;
pub mod manager_tplink_cloud;
pub mod models;
pub mod normalizer;
pub mod outcome;
pub mod pass_through;

pub use device::{Device, DeviceKind};
pub use emeter_device::EmeterDevice;
pub use errors::EmeterError;
pub use manager_tplink_cloud::errors::CloudError;
pub use models::emeter_readings::{DaySummary, MonthSummary, RealtimeReading};
pub use outcome::QueryOutcome;
pub use pass_through::PassThrough;
