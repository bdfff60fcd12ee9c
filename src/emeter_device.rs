use std::future::Future;
use log::{debug, info, warn};
use serde_json::{json, Value};
use tokio::runtime::{Builder, Handle};
use crate::device::Device;
use crate::errors::EmeterError;
use crate::models::emeter_readings::{DaySummary, MonthSummary, RealtimeReading};
use crate::normalizer::{normalize_day_list, normalize_month_list, normalize_realtime};
use crate::outcome::{classify, QueryOutcome};
use crate::pass_through::PassThrough;

const EMETER_MODULE: &str = "emeter";
const GET_REALTIME: &str = "get_realtime";
const GET_DAYSTAT: &str = "get_daystat";
const GET_MONTHSTAT: &str = "get_monthstat";

/// A device with an energy meter, queried through a pass-through channel.
///
/// Every query comes in an async form and a blocking form. The blocking form runs the
/// async form on a dedicated runtime and must not be called from within an async runtime.
///
/// Queries that get no response, or a response with a non-zero status code, give no data:
/// `None` for realtime readings and an empty list for statistics. Use the `query_*`
/// functions to tell those cases apart.
pub struct EmeterDevice<P: PassThrough> {
    device: Device,
    channel: P,
}

impl<P: PassThrough> EmeterDevice<P> {
    /// Returns a new EmeterDevice
    ///
    /// # Arguments
    ///
    /// * 'device' - the device identity
    /// * 'channel' - pass-through channel addressing the device
    pub fn new(device: Device, channel: P) -> Self {
        Self { device, channel }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn channel(&self) -> &P {
        &self.channel
    }

    /// Always true, regardless of what the model name says
    pub fn has_emeter(&self) -> bool {
        true
    }

    /// Obtain the current voltage, current, power and total energy
    pub fn get_power_usage_realtime(&self) -> Result<Option<RealtimeReading>, EmeterError> {
        block_on(self.get_power_usage_realtime_async())?
    }

    pub async fn get_power_usage_realtime_async(&self) -> Result<Option<RealtimeReading>, EmeterError> {
        Ok(self.query_realtime().await?.into_option())
    }

    /// Obtain energy used per day for the given month
    ///
    /// # Arguments
    ///
    /// * 'year' - the year of the month
    /// * 'month' - month of the year, 1 - 12
    pub fn get_power_usage_day(&self, year: i32, month: u32) -> Result<Vec<DaySummary>, EmeterError> {
        block_on(self.get_power_usage_day_async(year, month))?
    }

    pub async fn get_power_usage_day_async(&self, year: i32, month: u32) -> Result<Vec<DaySummary>, EmeterError> {
        Ok(self.query_day(year, month).await?.unwrap_or_default())
    }

    /// Obtain energy used per month for the given year
    ///
    /// # Arguments
    ///
    /// * 'year' - the year to get statistics for
    pub fn get_power_usage_month(&self, year: i32) -> Result<Vec<MonthSummary>, EmeterError> {
        block_on(self.get_power_usage_month_async(year))?
    }

    pub async fn get_power_usage_month_async(&self, year: i32) -> Result<Vec<MonthSummary>, EmeterError> {
        Ok(self.query_month(year).await?.unwrap_or_default())
    }

    pub async fn query_realtime(&self) -> Result<QueryOutcome<RealtimeReading>, EmeterError> {
        let outcome = self.fetch(GET_REALTIME, None).await?;

        Ok(outcome.map(|doc| normalize_realtime(&doc)))
    }

    pub async fn query_day(&self, year: i32, month: u32) -> Result<QueryOutcome<Vec<DaySummary>>, EmeterError> {
        let outcome = self.fetch(GET_DAYSTAT, Some(json!({ "year": year, "month": month }))).await?;

        outcome.try_map(|doc| normalize_day_list(&doc))
    }

    pub async fn query_month(&self, year: i32) -> Result<QueryOutcome<Vec<MonthSummary>>, EmeterError> {
        let outcome = self.fetch(GET_MONTHSTAT, Some(json!({ "year": year }))).await?;

        outcome.try_map(|doc| normalize_month_list(&doc))
    }

    /// Sends one emeter command and classifies the response envelope
    ///
    /// # Arguments
    ///
    /// * 'command' - the emeter command
    /// * 'params' - command parameters
    async fn fetch(&self, command: &str, params: Option<Value>) -> Result<QueryOutcome<Value>, EmeterError> {
        debug!("{}: sending {}/{}", self.device.alias, EMETER_MODULE, command);

        let outcome = classify(self.channel.send(EMETER_MODULE, command, params).await?);

        match &outcome {
            QueryOutcome::Success(_) => debug!("{}: {} succeeded", self.device.alias, command),
            QueryOutcome::Empty => info!("{}: {} returned no data", self.device.alias, command),
            QueryOutcome::Failure(code) => warn!("{}: {} failed with err_code {:?}", self.device.alias, command, code),
        }

        Ok(outcome)
    }
}

/// Drives a future to completion on a new single threaded runtime
///
/// # Arguments
///
/// * 'future' - the future to run
fn block_on<F: Future>(future: F) -> Result<F::Output, EmeterError> {
    if Handle::try_current().is_ok() {
        return Err(EmeterError::NestedRuntime);
    }

    let runtime = Builder::new_current_thread().enable_all().build()?;

    Ok(runtime.block_on(future))
}
