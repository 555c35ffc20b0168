use std::str::FromStr;

use mindstat_core::{Dataset, Error, Record, Region, parse_year};

use crate::errors::Result;

/// Sentinel region name that disables region filtering.
pub const GLOBAL_REGION: &str = "global";

/// Parsed region argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFilter {
    Global,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(self, record: &Record) -> bool {
        match self {
            RegionFilter::Global => true,
            RegionFilter::Only(region) => record.region == region,
        }
    }
}

impl FromStr for RegionFilter {
    type Err = Error;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case(GLOBAL_REGION) {
            Ok(RegionFilter::Global)
        } else {
            value.parse().map(RegionFilter::Only)
        }
    }
}

/// A year given either as a number or as text.
pub trait YearArg {
    fn to_year(&self) -> std::result::Result<i32, Error>;
}

impl YearArg for i32 {
    fn to_year(&self) -> std::result::Result<i32, Error> {
        Ok(*self)
    }
}

impl YearArg for &str {
    fn to_year(&self) -> std::result::Result<i32, Error> {
        parse_year(self)
    }
}

impl YearArg for String {
    fn to_year(&self) -> std::result::Result<i32, Error> {
        parse_year(self)
    }
}

impl YearArg for &String {
    fn to_year(&self) -> std::result::Result<i32, Error> {
        parse_year(self)
    }
}

/// Records of one region; `"global"` returns everything unchanged.
pub fn filter_by_region(records: &[Record], region: &str) -> Result<Dataset> {
    let filter: RegionFilter = region.parse()?;
    Ok(records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect())
}

/// Records dated `year`.
pub fn filter_by_year(records: &[Record], year: impl YearArg) -> Result<Dataset> {
    let year = year.to_year()?;
    Ok(records
        .iter()
        .filter(|record| record.year == year)
        .cloned()
        .collect())
}
