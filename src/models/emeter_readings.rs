use std::fmt;
use std::fmt::Formatter;
use chrono::NaiveDate;
use serde::Serialize;

/// A single instant measurement from the device emeter, in canonical units
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RealtimeReading {
    pub voltage_mv: Option<i64>,
    pub current_ma: Option<i64>,
    pub power_mw: Option<i64>,
    pub total_wh: Option<i64>,
}

/// Energy used during one day
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DaySummary {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub energy_wh: Option<i64>,
}

impl DaySummary {
    /// Returns the calendar date of the summary if all its parts are present and valid
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}

/// Energy used during one month
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthSummary {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub energy_wh: Option<i64>,
}

/// Formats an optional value, absent values are shown as a dash
struct Opt<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.0 {
            Some(v) => f.pad(&v.to_string()),
            None => f.pad("-"),
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for RealtimeReading {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "voltage: {:>8} mV, current: {:>7} mA, power: {:>8} mW, total: {:>8} Wh",
               Opt(self.voltage_mv), Opt(self.current_ma), Opt(self.power_mw), Opt(self.total_wh))
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:>4}-{:0>2}-{:0>2}: {:>8} Wh",
               Opt(self.year), Opt(self.month), Opt(self.day), Opt(self.energy_wh))
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for MonthSummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:>4}-{:0>2}: {:>8} Wh", Opt(self.year), Opt(self.month), Opt(self.energy_wh))
    }
}
