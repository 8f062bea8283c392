use crate::loader::{DataBundle, Source};
use crate::models::{Interval, TremorReading};
use crate::palette::ColorPool;
use chrono::{DateTime, Days, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const LANE_START: f64 = 0.15;
pub const LANE_STEP: f64 = 0.15;
pub const SCORE_MAX: f64 = 10.0;

const RESTING_COLOR: &str = "blue";
const POSTURAL_COLOR: &str = "red";
const INTERVAL_LINE_WIDTH: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: DateTime<Utc>,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Point>,
    pub fill: bool,
    pub show_line: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stepped_line: bool,
    #[serde(skip)]
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLabel {
    pub display: bool,
    pub label_string: String,
}

impl ScaleLabel {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            label_string: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeTicks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxis {
    pub display: bool,
    pub scale_label: ScaleLabel,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: String,
    pub ticks: TimeTicks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueTicks {
    pub begin_at_zero: bool,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    pub scale_label: ScaleLabel,
    pub ticks: ValueTicks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<TimeAxis>,
    pub y_axes: Vec<ValueAxis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

/// Chart configuration in the shape the browser-side charting library
/// consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn datasets_from(&self, source: Source) -> impl Iterator<Item = &Dataset> {
        self.data.datasets.iter().filter(move |d| d.source == source)
    }

    pub fn x_min(&self) -> Option<DateTime<Utc>> {
        self.options.scales.x_axes.first().and_then(|axis| axis.ticks.min)
    }

    pub fn set_x_min(&mut self, min: DateTime<Utc>) {
        for axis in &mut self.options.scales.x_axes {
            axis.ticks.min = Some(min);
        }
    }
}

/// Quick filters for the visible time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Range {
    Week,
    Month,
    Year,
}

impl Range {
    pub fn days_back(self) -> u64 {
        match self {
            Range::Week => 6,
            Range::Month => 30,
            Range::Year => 365,
        }
    }

    /// Midnight, in `now`'s time zone, of the first day in the window.
    /// Counts calendar days, so a DST change inside the window does not
    /// move the start by a day.
    pub fn window_start<Tz: TimeZone>(self, now: &DateTime<Tz>) -> DateTime<Utc> {
        let today = now.date_naive();
        let first_day = today
            .checked_sub_days(Days::new(self.days_back()))
            .unwrap_or(today);
        let midnight = first_day.and_time(NaiveTime::MIN);
        match now.timezone().from_local_datetime(&midnight).earliest() {
            Some(start) => start.with_timezone(&Utc),
            // midnight skipped by a DST change
            None => now.with_timezone(&Utc) - Duration::days(self.days_back() as i64),
        }
    }
}

pub fn build_chart(bundle: &DataBundle, palette: &mut ColorPool, now: DateTime<Utc>) -> ChartSpec {
    let readings: &[TremorReading] = bundle.tremors.as_deref().unwrap_or(&[]);
    let medications: &[Interval] = bundle.medications.as_deref().unwrap_or(&[]);
    let exercises: &[Interval] = bundle.exercises.as_deref().unwrap_or(&[]);

    let mut datasets = vec![
        score_dataset("resting score", RESTING_COLOR, readings, |r| r.resting),
        score_dataset("postural score", POSTURAL_COLOR, readings, |r| r.postural),
    ];

    let mut lane = LANE_START;
    for interval in medications {
        datasets.push(lane_dataset(interval, Source::Medications, lane, palette, now));
        lane += LANE_STEP;
    }
    for interval in exercises {
        datasets.push(lane_dataset(interval, Source::Exercises, lane, palette, now));
        lane += LANE_STEP;
    }

    ChartSpec {
        kind: "scatter".to_string(),
        data: ChartData { datasets },
        options: ChartOptions {
            scales: Scales {
                x_axes: vec![TimeAxis {
                    display: true,
                    scale_label: ScaleLabel::shown("Time"),
                    kind: "time".to_string(),
                    position: "bottom".to_string(),
                    ticks: TimeTicks::default(),
                }],
                y_axes: vec![ValueAxis {
                    scale_label: ScaleLabel::shown("Severity Score"),
                    ticks: ValueTicks {
                        begin_at_zero: true,
                        min: 0.0,
                        max: SCORE_MAX,
                    },
                }],
            },
        },
    }
}

fn score_dataset(
    label: &str,
    color: &str,
    readings: &[TremorReading],
    score: impl Fn(&TremorReading) -> f64,
) -> Dataset {
    Dataset {
        label: label.to_string(),
        data: readings
            .iter()
            .map(|reading| Point {
                x: reading.date,
                y: score(reading) / 10.0,
            })
            .collect(),
        fill: false,
        show_line: false,
        border_color: None,
        background_color: Some(color.to_string()),
        point_background_color: Some(color.to_string()),
        point_border_color: Some(color.to_string()),
        point_radius: None,
        border_width: None,
        stepped_line: false,
        source: Source::Tremors,
    }
}

fn lane_dataset(
    interval: &Interval,
    source: Source,
    lane: f64,
    palette: &mut ColorPool,
    now: DateTime<Utc>,
) -> Dataset {
    let end = interval.enddate.unwrap_or(now);
    Dataset {
        label: interval.name.clone(),
        data: vec![
            Point {
                x: interval.startdate,
                y: lane,
            },
            Point { x: end, y: lane },
        ],
        fill: false,
        show_line: true,
        border_color: Some(palette.next_color().to_string()),
        background_color: None,
        point_background_color: None,
        point_border_color: None,
        point_radius: Some(0),
        border_width: Some(INTERVAL_LINE_WIDTH),
        stepped_line: source == Source::Exercises,
        source,
    }
}
