use std::env;
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use log::{error, info, warn};
use tplink_emeter::config::load_config;
use tplink_emeter::logging::setup_logger;
use tplink_emeter::manager_tplink_cloud::{CloudChannel, TPLinkCloud};
use tplink_emeter::{EmeterDevice, EmeterError};

const USAGE: &str = "usage: tplink-emeter <config.toml> [realtime | day [YEAR MONTH] | month [YEAR]]";

/// Available report types
#[derive(Debug, PartialEq, Eq)]
enum Query {
    Realtime,
    Day { year: i32, month: u32 },
    Month { year: i32 },
}

fn main() -> Result<()> {
    let args = env::args().skip(1).collect::<Vec<String>>();
    let config_path = args.first().ok_or_else(|| anyhow!(USAGE))?;
    let query = parse_query(&args[1..], Local::now().date_naive())?;

    let config = load_config(config_path)
        .with_context(|| format!("loading config from {}", config_path))?;
    setup_logger(&config.general)?;

    info!("tplink-emeter version: {}", env!("CARGO_PKG_VERSION"));

    let cloud = TPLinkCloud::new(&config.cloud)?;

    for device in config.devices.iter().map(|d| d.to_device()) {
        if !device.has_emeter() {
            warn!("skipping {}, no emeter", device);
            continue;
        }

        let emeter = EmeterDevice::new(device.clone(), cloud.channel(&device));

        println!("{}", device);
        if let Err(e) = report(&emeter, &query) {
            error!("{}: {}", device.alias, e);
        }
    }

    Ok(())
}

/// Runs one query against a device and prints the result
///
/// # Arguments
///
/// * 'emeter' - the device to query
/// * 'query' - the report to produce
fn report(emeter: &EmeterDevice<CloudChannel>, query: &Query) -> Result<(), EmeterError> {
    match *query {
        Query::Realtime => match emeter.get_power_usage_realtime()? {
            Some(reading) => println!("  {}", reading),
            None => println!("  no data"),
        },
        Query::Day { year, month } => print_list(&emeter.get_power_usage_day(year, month)?),
        Query::Month { year } => print_list(&emeter.get_power_usage_month(year)?),
    }

    Ok(())
}

fn print_list<T: std::fmt::Display>(list: &[T]) {
    if list.is_empty() {
        println!("  no data");
    }
    list.iter().for_each(|s| println!("  {}", s));
}

/// Parses the report arguments, missing year and month default to the given date
///
/// # Arguments
///
/// * 'args' - arguments following the config path
/// * 'today' - the date to take default year and month from
fn parse_query(args: &[String], today: NaiveDate) -> Result<Query> {
    let number = |i: usize, default: i64| -> Result<i64> {
        match args.get(i) {
            Some(a) => a.parse::<i64>().with_context(|| format!("'{}' is not a number\n{}", a, USAGE)),
            None => Ok(default),
        }
    };

    let query = match args.first().map(|a| a.as_str()) {
        None | Some("realtime") => Query::Realtime,
        Some("day") => Query::Day {
            year: i32::try_from(number(1, today.year() as i64)?)?,
            month: u32::try_from(number(2, today.month() as i64)?)?,
        },
        Some("month") => Query::Month { year: i32::try_from(number(1, today.year() as i64)?)? },
        Some(other) => bail!("unknown report '{}'\n{}", other, USAGE),
    };

    if let Query::Day { month, .. } = query {
        if !(1..=12).contains(&month) {
            bail!("month must be 1 - 12, got {}", month);
        }
    }

    Ok(query)
}
