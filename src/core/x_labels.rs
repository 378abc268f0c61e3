//! Category labels along the x axis.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DEFAULT_CLOCK_SKIP: usize = 12;
const DEFAULT_CLOCK_STEP_MINUTES: i64 = 30;

/// Optional parts of calendar labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateLabelFormat {
    /// Prefix with the weekday name (`Mon 3/4`).
    #[serde(default)]
    pub show_day: bool,
    /// `4-Mar` instead of numeric day and month.
    #[serde(default)]
    pub long_date: bool,
    #[serde(default)]
    pub show_year: bool,
    /// Four-digit year instead of `year % 100`.
    #[serde(default)]
    pub long_year: bool,
    /// Numeric dates as `d/m` instead of `m/d`.
    #[serde(default)]
    pub day_first: bool,
}

/// Labelling strategy for the x axis.
///
/// `skip` is the number of categories covered by one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XScale {
    Values(Vec<String>),
    Numeric {
        start: f64,
        skip: usize,
        step: f64,
    },
    Clock {
        start: NaiveTime,
        skip: usize,
        step_minutes: i64,
    },
    Calendar {
        start: NaiveDate,
        skip: usize,
        step_days: i64,
        format: DateLabelFormat,
    },
}

impl XScale {
    /// Numeric labels `start, start + step, ...`; zero skip or step fall back to 1.
    #[must_use]
    pub fn numeric(start: f64, skip: usize, step: f64) -> Self {
        Self::Numeric {
            start,
            skip: skip.max(1),
            step: if step == 0.0 { 1.0 } else { step },
        }
    }

    /// Clock labels; zero skip or step fall back to 12 categories and 30 minutes.
    pub fn clock(hour: u32, minute: u32, skip: usize, step_minutes: i64) -> ChartResult<Self> {
        let start = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            ChartError::InvalidData(format!("invalid clock start {hour}:{minute}"))
        })?;
        Ok(Self::Clock {
            start,
            skip: if skip == 0 { DEFAULT_CLOCK_SKIP } else { skip },
            step_minutes: if step_minutes == 0 {
                DEFAULT_CLOCK_STEP_MINUTES
            } else {
                step_minutes
            },
        })
    }

    /// Calendar labels; a zero step defaults to the skip, a zero skip to 1.
    pub fn calendar(
        month: u32,
        day: u32,
        year: i32,
        skip: usize,
        step_days: i64,
        format: DateLabelFormat,
    ) -> ChartResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ChartError::InvalidData(format!("invalid calendar start {year}-{month}-{day}"))
        })?;
        let skip = skip.max(1);
        Ok(Self::Calendar {
            start,
            skip,
            step_days: if step_days == 0 { skip as i64 } else { step_days },
            format,
        })
    }

    #[must_use]
    pub fn skip(&self) -> usize {
        match self {
            Self::Values(_) => 1,
            Self::Numeric { skip, .. } | Self::Clock { skip, .. } | Self::Calendar { skip, .. } => {
                (*skip).max(1)
            }
        }
    }

    /// One label per category.
    ///
    /// Generated labels advance by one step per category; explicit values are
    /// padded with empty labels.
    #[must_use]
    pub fn labels(&self, count: usize, time24: bool) -> Vec<String> {
        match self {
            Self::Values(values) => (0..count)
                .map(|index| values.get(index).cloned().unwrap_or_default())
                .collect(),
            Self::Numeric { start, step, .. } => (0..count)
                .map(|index| (start + index as f64 * step).to_string())
                .collect(),
            Self::Clock {
                start,
                step_minutes,
                ..
            } => {
                let step = TimeDelta::try_minutes(*step_minutes).unwrap_or_else(TimeDelta::zero);
                let mut time = *start;
                (0..count)
                    .map(|_| {
                        let label = format_clock(time, time24);
                        time = time.overflowing_add_signed(step).0;
                        label
                    })
                    .collect()
            }
            Self::Calendar {
                start,
                step_days,
                format,
                ..
            } => {
                let step = TimeDelta::try_days(*step_days).unwrap_or_else(TimeDelta::zero);
                let mut date = *start;
                (0..count)
                    .map(|_| {
                        let label = format_date(date, *format);
                        date = date.checked_add_signed(step).unwrap_or(date);
                        label
                    })
                    .collect()
            }
        }
    }
}

fn format_clock(time: NaiveTime, time24: bool) -> String {
    if time24 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%-I:%M%P").to_string()
    }
}

fn format_date(date: NaiveDate, format: DateLabelFormat) -> String {
    let mut label = String::new();
    if format.show_day {
        label.push_str(WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]);
        label.push(' ');
    }
    if format.long_date {
        label.push_str(&format!(
            "{}-{}",
            date.day(),
            MONTH_LABELS[date.month0() as usize]
        ));
    } else if format.day_first {
        label.push_str(&format!("{}/{}", date.day(), date.month()));
    } else {
        label.push_str(&format!("{}/{}", date.month(), date.day()));
    }
    if format.show_year {
        label.push(if format.long_date { '-' } else { '/' });
        if format.long_year {
            label.push_str(&date.year().to_string());
        } else {
            label.push_str(&(date.year() % 100).to_string());
        }
    }
    label
}

/// Splits a label into display lines at spaces and dashes.
///
/// Labels that start with a number (`12:30`, `4-Mar-05`) stay on one line.
#[must_use]
pub fn display_lines(label: &str) -> Vec<String> {
    if label.is_empty() || starts_with_integer(label) {
        return vec![label.to_owned()];
    }
    label
        .split([' ', '-'])
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

fn starts_with_integer(label: &str) -> bool {
    let trimmed = label.trim_start();
    let digits = trimmed
        .strip_prefix(['-', '+'])
        .unwrap_or(trimmed);
    digits.starts_with(|c: char| c.is_ascii_digit())
}
