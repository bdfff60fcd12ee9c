use serde_json::Value;
use crate::errors::EmeterError;
use crate::models::emeter_readings::{DaySummary, MonthSummary, RealtimeReading};

/// Transforms a realtime emeter response to canonical milli units.
///
/// Devices report either milli unit fields (newer firmware) or base unit fields (older
/// firmware). Milli unit fields take precedence, base unit fields are scaled by 1000 and
/// a quantity missing in both forms stays absent.
///
/// # Arguments
///
/// * 'raw' - the `get_realtime` response document
pub fn normalize_realtime(raw: &Value) -> RealtimeReading {
    RealtimeReading {
        voltage_mv: milli_or_scaled(raw, "voltage_mv", "voltage"),
        current_ma: milli_or_scaled(raw, "current_ma", "current"),
        power_mw: milli_or_scaled(raw, "power_mw", "power"),
        total_wh: raw.get("total_wh").and_then(as_integer),
    }
}

/// Transforms a daily statistics response to one summary per reported day, keeping the
/// reported order.
///
/// # Arguments
///
/// * 'raw' - the `get_daystat` response document
pub fn normalize_day_list(raw: &Value) -> Result<Vec<DaySummary>, EmeterError> {
    let days = entry_list(raw, "day_list", "get_daystat")?
        .iter()
        .map(|d| DaySummary {
            year: calendar_part(d, "year"),
            month: calendar_part(d, "month"),
            day: calendar_part(d, "day"),
            energy_wh: d.get("energy_wh").and_then(as_integer),
        })
        .collect();

    Ok(days)
}

/// Transforms a monthly statistics response to one summary per reported month, keeping
/// the reported order.
///
/// # Arguments
///
/// * 'raw' - the `get_monthstat` response document
pub fn normalize_month_list(raw: &Value) -> Result<Vec<MonthSummary>, EmeterError> {
    let months = entry_list(raw, "month_list", "get_monthstat")?
        .iter()
        .map(|m| MonthSummary {
            year: calendar_part(m, "year"),
            month: calendar_part(m, "month"),
            energy_wh: m.get("energy_wh").and_then(as_integer),
        })
        .collect();

    Ok(months)
}

/// Reads a quantity in milli units, falling back to the base unit field scaled by 1000
///
/// # Arguments
///
/// * 'raw' - the document to read from
/// * 'milli_key' - key of the milli unit field
/// * 'base_key' - key of the base unit field
fn milli_or_scaled(raw: &Value, milli_key: &str, base_key: &str) -> Option<i64> {
    if let Some(milli) = raw.get(milli_key) {
        return as_integer(milli);
    }

    raw.get(base_key)
        .and_then(Value::as_f64)
        .map(|base| (base * 1000.0).round() as i64)
}

/// Integer view of a json number, fractional values are rounded
fn as_integer(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64))
}

fn calendar_part<T: TryFrom<i64>>(entry: &Value, key: &str) -> Option<T> {
    entry.get(key)
        .and_then(Value::as_i64)
        .and_then(|v| T::try_from(v).ok())
}

fn entry_list<'a>(raw: &'a Value, key: &str, command: &str) -> Result<&'a Vec<Value>, EmeterError> {
    raw.get(key)
        .ok_or_else(|| EmeterError::malformed(command, &format!("missing '{}'", key)))?
        .as_array()
        .ok_or_else(|| EmeterError::malformed(command, &format!("'{}' is not a list", key)))
}
