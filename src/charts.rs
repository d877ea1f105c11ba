//! Comparison chart normalization.
//!
//! Backend versions disagree on the shape of `/compare-graph-data`: a plain
//! array of `{location, data}` records, the same array wrapped in `{data}`,
//! or a map of location to series (where a series may itself be an array,
//! a `{data}` wrapper, or a `{date: value}` map). The decoder names each
//! accepted shape explicitly and rejects anything else with a typed error
//! instead of duck-typing its way through.
//!
//! The x-axis is the sorted union of every date seen across the compared
//! locations; lexicographic order is correct because dates are zero-padded
//! `YYYY-MM-DD`. Missing dates become `None` and the renderer gaps them,
//! never interpolates.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use thiserror::Error;

use crate::browser;
use crate::types::GraphPoint;

/// Chart.js default palette, cycled by series index.
pub const SERIES_PALETTE: [&str; 6] = [
    "#4bc0c0", "#ff6384", "#36a2eb", "#ffce56", "#9966ff", "#ff9f40",
];

pub fn series_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("No data received from server")]
    Empty,
    #[error("Unsupported data format received from server")]
    UnsupportedShape,
    #[error("No valid data available for the selected parameters")]
    NoSeries,
}

/// One location's raw series, before axis alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationSeries {
    pub location: String,
    pub points: Vec<GraphPoint>,
}

/// One location's series aligned to the shared axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedSeries {
    pub label: String,
    pub color: &'static str,
    /// One slot per axis date; `None` where the location has no reading.
    pub values: Vec<Option<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComparisonChart {
    pub dates: Vec<String>,
    pub series: Vec<AlignedSeries>,
}

/// Accepts a number or a numeric string; anything else is not a value.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode one location's series from any of its accepted shapes. `None`
/// means the shape is unusable and the location should be dropped.
fn decode_series(value: &Value) -> Option<Vec<GraphPoint>> {
    match value {
        Value::Array(entries) => {
            let points = entries
                .iter()
                .filter_map(|entry| {
                    let date = entry.get("date")?.as_str()?.to_string();
                    let value = numeric(entry.get("value")?)?;
                    Some(GraphPoint { date, value })
                })
                .collect();
            Some(points)
        }
        Value::Object(map) => {
            if let Some(inner) = map.get("data") {
                return decode_series(inner);
            }
            // {date: value} map.
            let points = map
                .iter()
                .filter_map(|(date, value)| {
                    Some(GraphPoint { date: date.clone(), value: numeric(value)? })
                })
                .collect();
            Some(points)
        }
        _ => None,
    }
}

fn decode_record_list(entries: &[Value]) -> Vec<LocationSeries> {
    entries
        .iter()
        .filter_map(|entry| {
            let location = entry.get("location")?.as_str()?.to_string();
            match entry.get("data").and_then(decode_series) {
                Some(points) => Some(LocationSeries { location, points }),
                None => {
                    browser::console_warn(&format!(
                        "Invalid data format for location {location}"
                    ));
                    None
                }
            }
        })
        .collect()
}

/// Decode the full payload into per-location series. A location whose data
/// doesn't decode is dropped with a warning; an unrecognized top-level
/// shape is a hard error.
pub fn decode_payload(payload: &Value) -> Result<Vec<LocationSeries>, ChartError> {
    match payload {
        Value::Null => Err(ChartError::Empty),
        Value::Array(entries) => Ok(decode_record_list(entries)),
        Value::Object(map) => {
            if let Some(Value::Array(entries)) = map.get("data") {
                return Ok(decode_record_list(entries));
            }
            Ok(map
                .iter()
                .filter_map(|(location, series)| match decode_series(series) {
                    Some(points) => Some(LocationSeries { location: location.clone(), points }),
                    None => {
                        browser::console_warn(&format!(
                            "Invalid data format for location {location}"
                        ));
                        None
                    }
                })
                .collect())
        }
        _ => Err(ChartError::UnsupportedShape),
    }
}

/// Full normalization: decode, build the union axis, align every series to
/// it, and color each series deterministically by index.
pub fn normalize_comparison(payload: &Value) -> Result<ComparisonChart, ChartError> {
    let series_list = decode_payload(payload)?;
    if series_list.is_empty() {
        return Err(ChartError::Empty);
    }

    let axis: BTreeSet<&str> = series_list
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.date.as_str()))
        .collect();
    if axis.is_empty() {
        return Err(ChartError::NoSeries);
    }
    let dates: Vec<String> = axis.into_iter().map(str::to_string).collect();

    let series = series_list
        .iter()
        .enumerate()
        .map(|(index, ls)| {
            let by_date: HashMap<&str, f64> = ls
                .points
                .iter()
                .map(|p| (p.date.as_str(), p.value))
                .collect();
            AlignedSeries {
                label: ls.location.clone(),
                color: series_color(index),
                values: dates.iter().map(|d| by_date.get(d.as_str()).copied()).collect(),
            }
        })
        .collect();

    Ok(ComparisonChart { dates, series })
}

/// Contiguous runs of present values, as `(axis index, value)` pairs. The
/// line renderer draws one polyline per run so gaps stay gaps.
pub fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(usize, f64)> = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(value) => current.push((i, *value)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Padded (min, max) over every present value, widened so a flat series
/// still gets a visible band.
pub fn value_range<'a>(series: impl Iterator<Item = &'a [Option<f64>]>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for values in series {
        for v in values.iter().flatten() {
            min = min.min(*v);
            max = max.max(*v);
        }
    }
    if min > max {
        return None;
    }
    if min == max {
        min -= 1.0;
        max += 1.0;
    }
    let pad = (max - min) * 0.05;
    Some((min - pad, max + pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn union_axis_with_null_padding() {
        // Locations A and B with dates {1,2} and {2,3}: axis is the sorted
        // union, and each series gets null slots where it has no reading.
        let payload = json!([
            {"location": "A", "data": [
                {"date": "2026-01-01", "value": 1.0},
                {"date": "2026-01-02", "value": 2.0},
            ]},
            {"location": "B", "data": [
                {"date": "2026-01-02", "value": 5.0},
                {"date": "2026-01-03", "value": 6.0},
            ]},
        ]);
        let chart = normalize_comparison(&payload).unwrap();
        assert_eq!(chart.dates, vec!["2026-01-01", "2026-01-02", "2026-01-03"]);
        assert_eq!(chart.series[0].values, vec![Some(1.0), Some(2.0), None]);
        assert_eq!(chart.series[1].values, vec![None, Some(5.0), Some(6.0)]);
    }

    #[test]
    fn empty_object_is_rejected_as_no_data() {
        assert_eq!(normalize_comparison(&json!({})), Err(ChartError::Empty));
        assert_eq!(normalize_comparison(&json!([])), Err(ChartError::Empty));
        assert_eq!(normalize_comparison(&Value::Null), Err(ChartError::Empty));
    }

    #[test]
    fn scalar_payload_is_unsupported() {
        assert_eq!(
            normalize_comparison(&json!("oops")),
            Err(ChartError::UnsupportedShape)
        );
        assert_eq!(normalize_comparison(&json!(42)), Err(ChartError::UnsupportedShape));
    }

    #[test]
    fn wrapped_and_keyed_shapes_decode() {
        let wrapped = json!({"data": [
            {"location": "A", "data": [{"date": "2026-01-01", "value": 7.0}]},
        ]});
        let chart = normalize_comparison(&wrapped).unwrap();
        assert_eq!(chart.series[0].label, "A");

        let keyed = json!({
            "Amsterdam": [{"date": "2026-01-01", "value": "7.2"}],
            "Boston": {"2026-01-02": 6.9},
        });
        let chart = normalize_comparison(&keyed).unwrap();
        assert_eq!(chart.dates, vec!["2026-01-01", "2026-01-02"]);
        assert_eq!(chart.series.len(), 2);
    }

    #[test]
    fn bad_location_is_dropped_not_fatal() {
        let payload = json!([
            {"location": "A", "data": [{"date": "2026-01-01", "value": 1.0}]},
            {"location": "B", "data": "not a series"},
        ]);
        let chart = normalize_comparison(&payload).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "A");
    }

    #[test]
    fn all_locations_bad_is_no_series() {
        let payload = json!([
            {"location": "A", "data": 3},
        ]);
        assert_eq!(normalize_comparison(&payload), Err(ChartError::Empty));

        // Series decode but hold no usable points.
        let empty_points = json!([{"location": "A", "data": []}]);
        assert_eq!(normalize_comparison(&empty_points), Err(ChartError::NoSeries));
    }

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(series_color(0), SERIES_PALETTE[0]);
        assert_eq!(series_color(6), SERIES_PALETTE[0]);
        assert_eq!(series_color(8), SERIES_PALETTE[2]);
    }

    #[test]
    fn runs_split_at_gaps() {
        let values = [Some(1.0), None, Some(2.0), Some(3.0), None];
        let runs = contiguous_runs(&values);
        assert_eq!(runs, vec![vec![(0, 1.0)], vec![(2, 2.0), (3, 3.0)]]);
    }

    #[test]
    fn range_pads_and_widens_flat_series() {
        let flat = [Some(5.0), Some(5.0)];
        let (lo, hi) = value_range([flat.as_slice()].into_iter()).unwrap();
        assert!(lo < 5.0 && hi > 5.0);

        let empty: [Option<f64>; 2] = [None, None];
        assert_eq!(value_range([empty.as_slice()].into_iter()), None);
    }
}
