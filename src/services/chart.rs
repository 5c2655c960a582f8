//! Dense per-day project series for the dashboard chart.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::project::{ProjectRecord, ProjectStatus};
use crate::services::window::{ChartTimeframe, TimeWindow};

/// One day of the chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_count: u32,
    pub completed_count: u32,
}

/// Payload of `GET /api/project/get-project-chart-data/{timeframe}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChartData {
    pub timeframe: ChartTimeframe,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub chart_data: Vec<ChartPoint>,
}

#[derive(Default)]
struct DayBucket {
    total: u32,
    completed: u32,
}

/// Bucket projects by start day, with a zero entry for every day in `window`.
///
/// Projects without a start date, outside the window, or owned by another
/// company are skipped.
pub fn build_series(company_id: Uuid, window: &TimeWindow, projects: &[ProjectRecord]) -> Vec<ChartPoint> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = window
        .days()
        .into_iter()
        .map(|day| (day, DayBucket::default()))
        .collect();

    for project in projects.iter().filter(|p| p.company_id == company_id) {
        let Some(start) = project.start_date else {
            continue;
        };
        if !window.contains(start) {
            continue;
        }
        if let Some(bucket) = buckets.get_mut(&start.date_naive()) {
            bucket.total += 1;
            if project.status == ProjectStatus::Completed {
                bucket.completed += 1;
            }
        }
    }

    buckets
        .into_iter()
        .map(|(day, bucket)| ChartPoint {
            date: day.format("%Y-%m-%d").to_string(),
            total_count: bucket.total,
            completed_count: bucket.completed,
        })
        .collect()
}

pub fn build_chart_data(
    company_id: Uuid,
    timeframe: ChartTimeframe,
    window: &TimeWindow,
    projects: &[ProjectRecord],
) -> ProjectChartData {
    ProjectChartData {
        timeframe,
        start_date: window.start,
        end_date: window.end,
        chart_data: build_series(company_id, window, projects),
    }
}
