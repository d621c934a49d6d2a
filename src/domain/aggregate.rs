use super::session::Task;
use chrono::{Datelike, Duration, Local, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chart view: one bar per task, or tasks grouped into time buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    PerTask,
    Aggregate,
}

/// Width of an aggregation bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Hourly,
    Daily,
    Weekly,
}

/// Value computed for each bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    #[default]
    Count,
    TotalDuration,
    AverageDuration,
}

impl ViewMode {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "per-task" | "history" | "task" => Some(Self::PerTask),
            "aggregate" => Some(Self::Aggregate),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PerTask => "History",
            Self::Aggregate => "Aggregate",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::PerTask => Self::Aggregate,
            Self::Aggregate => Self::PerTask,
        }
    }
}

impl Granularity {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "hourly" | "hour" => Some(Self::Hourly),
            "daily" | "day" => Some(Self::Daily),
            "weekly" | "week" => Some(Self::Weekly),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Hourly => Self::Daily,
            Self::Daily => Self::Weekly,
            Self::Weekly => Self::Hourly,
        }
    }

    /// Start of the bucket containing `dt`
    fn bucket_start(&self, dt: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Hourly => dt.date().and_hms_opt(dt.hour(), 0, 0).unwrap_or(dt),
            Self::Daily => dt.date().and_hms_opt(0, 0, 0).unwrap_or(dt),
            Self::Weekly => {
                // ISO week: Monday at local midnight
                let back = i64::from(dt.weekday().num_days_from_monday());
                (dt.date() - Duration::days(back))
                    .and_hms_opt(0, 0, 0)
                    .unwrap_or(dt)
            }
        }
    }

    fn step(&self) -> Duration {
        match self {
            Self::Hourly => Duration::hours(1),
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::weeks(1),
        }
    }

    fn label(&self, start: NaiveDateTime) -> String {
        let day = start.format("%d %b %Y");
        match self {
            Self::Hourly => format!("{}, {}", day, hour_12(start.hour())),
            Self::Daily => day.to_string(),
            Self::Weekly => format!("Week of {}", day),
        }
    }
}

impl Metric {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "count" => Some(Self::Count),
            "total" | "totalduration" | "total-duration" => Some(Self::TotalDuration),
            "average" | "avg" | "averageduration" | "average-duration" => {
                Some(Self::AverageDuration)
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::TotalDuration => "Total",
            Self::AverageDuration => "Average",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Count => Self::TotalDuration,
            Self::TotalDuration => Self::AverageDuration,
            Self::AverageDuration => Self::Count,
        }
    }

    /// Whether values are durations in seconds (as opposed to counts)
    pub fn is_duration(&self) -> bool {
        !matches!(self, Self::Count)
    }

    fn value(&self, bucket: &Bucket) -> f64 {
        match self {
            Self::Count => bucket.count as f64,
            Self::TotalDuration => bucket.total as f64,
            Self::AverageDuration if bucket.count == 0 => 0.0,
            Self::AverageDuration => bucket.total as f64 / bucket.count as f64,
        }
    }
}

fn hour_12(hour: u32) -> String {
    match hour {
        0 => "12am".to_string(),
        h if h < 12 => format!("{}am", h),
        12 => "12pm".to_string(),
        h => format!("{}pm", h - 12),
    }
}

/// Chart settings chosen in the UI or on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default)]
    pub view: ViewMode,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub metric: Metric,
}

impl ChartOptions {
    /// Whether the produced values are durations in seconds
    pub fn values_are_durations(&self) -> bool {
        self.view == ViewMode::PerTask || self.metric.is_duration()
    }
}

/// Data handed to the chart: labels, values and the mean of the values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub running_average: f64,
}

impl ChartSeries {
    fn from_points(labels: Vec<String>, values: Vec<f64>) -> Self {
        let running_average = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        Self {
            labels,
            values,
            running_average,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Default)]
struct Bucket {
    count: u64,
    total: u64,
}

/// Build the chart series for `tasks` in local time
pub fn aggregate(tasks: &[Task], options: &ChartOptions) -> ChartSeries {
    aggregate_in(tasks, options, &Local)
}

/// Build the chart series for `tasks`, bucketing in the given time zone
pub fn aggregate_in<Tz: TimeZone>(tasks: &[Task], options: &ChartOptions, tz: &Tz) -> ChartSeries {
    match options.view {
        ViewMode::PerTask => per_task(tasks),
        ViewMode::Aggregate => bucketed(tasks, options.granularity, options.metric, tz),
    }
}

fn per_task(tasks: &[Task]) -> ChartSeries {
    let labels = (1..=tasks.len()).map(|n| format!("Task {}", n)).collect();
    let values = tasks.iter().map(|t| t.time as f64).collect();
    ChartSeries::from_points(labels, values)
}

fn bucketed<Tz: TimeZone>(
    tasks: &[Task],
    granularity: Granularity,
    metric: Metric,
    tz: &Tz,
) -> ChartSeries {
    let mut buckets: BTreeMap<NaiveDateTime, Bucket> = BTreeMap::new();
    for task in tasks {
        // Unset (0) or unusable timestamps can't be placed on the time axis
        if task.datetime == 0 {
            continue;
        }
        let Some(local) = tz.timestamp_millis_opt(task.datetime).single() else {
            continue;
        };
        let bucket = buckets
            .entry(granularity.bucket_start(local.naive_local()))
            .or_default();
        bucket.count += 1;
        bucket.total += task.time;
    }

    let (Some(first), Some(last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return ChartSeries::default();
    };
    let (first, last) = (*first, *last);

    // Every bucket between the first and last, so empty stretches show as zero
    let empty = Bucket::default();
    let mut labels = Vec::new();
    let mut values = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        labels.push(granularity.label(cursor));
        values.push(metric.value(buckets.get(&cursor).unwrap_or(&empty)));
        cursor += granularity.step();
    }

    ChartSeries::from_points(labels, values)
}
