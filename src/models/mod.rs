pub mod emeter_readings;
pub mod tplink_passthrough;
