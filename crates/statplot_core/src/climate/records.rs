//! Per-calendar-day record temperatures and record-breaking detection.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::observations::{Element, Observation};
use crate::date_math::MonthDay;
use crate::error::ClimateError;

/// Degrees of padding around the observed range on the temperature axis
const AXIS_PADDING: f64 = 5.0;

/// Historical extremes of one calendar day over the baseline years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayExtremes {
    /// Lowest TMIN, °C
    pub record_low: Option<f64>,
    /// Highest TMAX, °C
    pub record_high: Option<f64>,
    /// Distinct baseline years with a reading on this day
    pub years: usize,
}

/// The target year's readings for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetDay {
    /// Lowest TMIN, °C
    pub low: Option<f64>,
    /// Highest TMAX, °C
    pub high: Option<f64>,
}

/// Baseline and target side by side for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayComparison {
    pub month_day: MonthDay,
    pub baseline: DayExtremes,
    pub target: Option<TargetDay>,
    /// Target high beat the historical record high
    pub above_record_high: bool,
    /// Target low fell under the historical record low
    pub below_record_low: bool,
}

#[derive(Default)]
struct DayAccumulator {
    low: Option<f64>,
    high: Option<f64>,
    years: FxHashSet<i16>,
}

impl DayAccumulator {
    fn add(&mut self, observation: &Observation) {
        let value = observation.celsius();
        match observation.element {
            Element::Tmin => self.low = Some(self.low.map_or(value, |low| low.min(value))),
            Element::Tmax => self.high = Some(self.high.map_or(value, |high| high.max(value))),
        }
        self.years.insert(observation.date.year());
    }
}

/// Target-year extremes compared against the baseline records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAnalysis {
    pub target_year: i16,
    /// First and last baseline year
    pub baseline_span: (i16, i16),
    /// Distinct baseline years
    pub baseline_year_count: usize,
    /// Distinct years in the whole dataset, target included
    pub total_year_count: usize,
    /// Feb 29 rows removed before aggregation
    pub leap_days_dropped: usize,
    /// One entry per baseline calendar day, in calendar order
    pub days: Vec<DayComparison>,
    /// Temperature axis range, °C
    pub temperature_range: (f64, f64),
}

impl RecordAnalysis {
    /// Aggregate `observations` into per-day baseline records (every year but
    /// `target_year`) and flag the target year's record-breaking days.
    pub fn compute(observations: &[Observation], target_year: i16) -> Result<Self, ClimateError> {
        let mut baseline: FxHashMap<MonthDay, DayAccumulator> = FxHashMap::default();
        let mut target: FxHashMap<MonthDay, DayAccumulator> = FxHashMap::default();
        let mut all_years: FxHashSet<i16> = FxHashSet::default();
        let mut baseline_years: FxHashSet<i16> = FxHashSet::default();
        let mut leap_days_dropped = 0usize;
        let mut lowest = f64::INFINITY;
        let mut highest = f64::NEG_INFINITY;

        for observation in observations {
            let Some(month_day) = MonthDay::from_date(observation.date) else {
                leap_days_dropped += 1;
                continue;
            };
            let year = observation.date.year();
            all_years.insert(year);
            lowest = lowest.min(observation.value_tenths);
            highest = highest.max(observation.value_tenths);

            if year == target_year {
                target.entry(month_day).or_default().add(observation);
            } else {
                baseline_years.insert(year);
                baseline.entry(month_day).or_default().add(observation);
            }
        }

        if baseline.is_empty() {
            return Err(ClimateError::NoBaselineData { target_year });
        }
        if target.is_empty() {
            return Err(ClimateError::NoTargetData { target_year });
        }

        let mut days: Vec<DayComparison> = baseline
            .into_iter()
            .map(|(month_day, acc)| {
                let extremes = DayExtremes {
                    record_low: acc.low,
                    record_high: acc.high,
                    years: acc.years.len(),
                };
                let target_day = target.get(&month_day).map(|t| TargetDay {
                    low: t.low,
                    high: t.high,
                });
                compare_day(month_day, extremes, target_day)
            })
            .collect();
        days.sort_by_key(|d| d.month_day);

        let first = baseline_years.iter().copied().min().unwrap_or(target_year);
        let last = baseline_years.iter().copied().max().unwrap_or(target_year);

        let analysis = Self {
            target_year,
            baseline_span: (first, last),
            baseline_year_count: baseline_years.len(),
            total_year_count: all_years.len(),
            leap_days_dropped,
            days,
            temperature_range: (
                (lowest / 10.0).round_ties_even() - AXIS_PADDING,
                (highest / 10.0).round_ties_even() + AXIS_PADDING,
            ),
        };

        tracing::debug!(
            target_year,
            baseline_days = analysis.days.len(),
            record_highs = analysis.record_highs().count(),
            record_lows = analysis.record_lows().count(),
            "computed record analysis"
        );
        Ok(analysis)
    }

    /// Target-year days above the historical high, with the target high
    pub fn record_highs(&self) -> impl Iterator<Item = (MonthDay, f64)> + '_ {
        self.days.iter().filter(|d| d.above_record_high).filter_map(|d| {
            d.target
                .and_then(|t| t.high)
                .map(|high| (d.month_day, high))
        })
    }

    /// Target-year days below the historical low, with the target low
    pub fn record_lows(&self) -> impl Iterator<Item = (MonthDay, f64)> + '_ {
        self.days.iter().filter(|d| d.below_record_low).filter_map(|d| {
            d.target
                .and_then(|t| t.low)
                .map(|low| (d.month_day, low))
        })
    }

    /// Historical record lows in calendar order
    pub fn baseline_lows(&self) -> impl Iterator<Item = (MonthDay, f64)> + '_ {
        self.days
            .iter()
            .filter_map(|d| d.baseline.record_low.map(|low| (d.month_day, low)))
    }

    /// Historical record highs in calendar order
    pub fn baseline_highs(&self) -> impl Iterator<Item = (MonthDay, f64)> + '_ {
        self.days
            .iter()
            .filter_map(|d| d.baseline.record_high.map(|high| (d.month_day, high)))
    }

    pub fn headline(&self) -> String {
        let (first, last) = self.baseline_span;
        format!(
            "{} temperatures exceeding the record temperatures of the {first}-{last} period (°C)",
            self.target_year
        )
    }
}

fn compare_day(month_day: MonthDay, baseline: DayExtremes, target: Option<TargetDay>) -> DayComparison {
    let above_record_high = matches!(
        (target.and_then(|t| t.high), baseline.record_high),
        (Some(high), Some(record)) if high > record
    );
    let below_record_low = matches!(
        (target.and_then(|t| t.low), baseline.record_low),
        (Some(low), Some(record)) if low < record
    );
    DayComparison {
        month_day,
        baseline,
        target,
        above_record_high,
        below_record_low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn obs(y: i16, m: i8, d: i8, element: Element, value_tenths: f64) -> Observation {
        Observation {
            date: date(y, m, d),
            element,
            value_tenths,
        }
    }

    #[test]
    fn test_compare_day_requires_both_sides() {
        let md = MonthDay { month: 1, day: 1 };
        let baseline = DayExtremes {
            record_low: None,
            record_high: Some(10.0),
            years: 1,
        };
        let target = Some(TargetDay {
            low: Some(-50.0),
            high: Some(10.0),
        });
        let day = compare_day(md, baseline, target);
        // equal to the record is not a new record
        assert!(!day.above_record_high);
        // no baseline low to beat
        assert!(!day.below_record_low);

        let day = compare_day(md, baseline, None);
        assert!(!day.above_record_high && !day.below_record_low);
    }

    #[test]
    fn test_errors_when_a_side_is_empty() {
        let only_target = [obs(2015, 1, 1, Element::Tmax, 10.0)];
        assert!(matches!(
            RecordAnalysis::compute(&only_target, 2015),
            Err(ClimateError::NoBaselineData { target_year: 2015 })
        ));

        let only_baseline = [obs(2010, 1, 1, Element::Tmax, 10.0)];
        assert!(matches!(
            RecordAnalysis::compute(&only_baseline, 2015),
            Err(ClimateError::NoTargetData { target_year: 2015 })
        ));
    }

    #[test]
    fn test_temperature_range_rounds_then_pads() {
        let observations = [
            obs(2010, 1, 1, Element::Tmin, -343.0),
            obs(2010, 1, 1, Element::Tmax, 387.0),
            obs(2015, 1, 1, Element::Tmax, 100.0),
        ];
        let analysis = RecordAnalysis::compute(&observations, 2015).unwrap();
        assert_eq!(analysis.temperature_range, (-39.0, 44.0));
    }
}
