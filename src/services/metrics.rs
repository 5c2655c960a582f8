//! Dashboard metric computation: per-period aggregates and change/trend
//! relative to the preceding period of equal length.
//!
//! Everything here is pure. Records are filtered again by tenant and window,
//! so callers may push coarser predicates into SQL without changing results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::employee::EmployeeRecord;
use crate::models::project::ProjectRecord;
use crate::services::window::{PeriodWindows, TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// A dashboard figure with its signed percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricValue {
    pub value: f64,
    pub change: f64,
    pub trend: Trend,
}

impl MetricValue {
    /// Value reported without a previous-period comparison.
    pub fn unchanged(value: f64) -> Self {
        Self {
            value,
            change: 0.0,
            trend: Trend::Up,
        }
    }
}

/// Compare a value against the previous period.
///
/// No prior baseline (`previous == 0`) yields a change of 0, and a change of
/// exactly 0 is reported as `Up`. No rounding is applied.
pub fn compute_metric(current: f64, previous: f64) -> MetricValue {
    let change = if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    };

    MetricValue {
        value: current,
        change,
        trend: if change >= 0.0 { Trend::Up } else { Trend::Down },
    }
}

/// Which metrics get a real previous-period comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangePolicy {
    /// All four dashboard metrics are compared with the previous window.
    #[default]
    Symmetric,
    /// Only projects and sales are compared; employees and gross profit
    /// always report `change: 0, trend: up`, matching the legacy dashboard.
    SourceCompatible,
}

impl ChangePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "symmetric" => Some(Self::Symmetric),
            "source-compatible" => Some(Self::SourceCompatible),
            _ => None,
        }
    }
}

/// Raw sums for one tenant over one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub projects: i64,
    pub sales: i64,
    pub extra_costs: i64,
    pub employees: i64,
    pub employee_costs: i64,
}

impl PeriodTotals {
    /// Sales minus extra costs minus salaries. May be negative.
    pub fn gross_profit(&self) -> i64 {
        self.sales
            .saturating_sub(self.extra_costs)
            .saturating_sub(self.employee_costs)
    }
}

/// Reduce tenant records falling inside `window` to period totals.
pub fn aggregate_period(
    company_id: Uuid,
    window: &TimeWindow,
    projects: &[ProjectRecord],
    employees: &[EmployeeRecord],
) -> PeriodTotals {
    let mut totals = PeriodTotals::default();

    for project in projects
        .iter()
        .filter(|p| p.company_id == company_id && window.contains(p.effective_date()))
    {
        totals.projects += 1;
        totals.sales = totals.sales.saturating_add(project.budget_amount());
        totals.extra_costs = totals.extra_costs.saturating_add(i64::from(project.extra_cost));
    }

    for employee in employees
        .iter()
        .filter(|e| e.company_id == company_id && window.contains(e.created_at))
    {
        totals.employees += 1;
        // Salary text is unbounded; clamp instead of overflowing.
        totals.employee_costs = totals.employee_costs.saturating_add(employee.salary_amount());
    }

    totals
}

/// Payload of `GET /api/company/get-dashboard-metrics`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_projects: MetricValue,
    pub total_employees: MetricValue,
    pub total_sales: MetricValue,
    pub gross_profit: MetricValue,
}

impl DashboardMetrics {
    pub fn from_totals(current: &PeriodTotals, previous: &PeriodTotals, policy: ChangePolicy) -> Self {
        let total_projects = compute_metric(current.projects as f64, previous.projects as f64);
        let total_sales = compute_metric(current.sales as f64, previous.sales as f64);

        let (total_employees, gross_profit) = match policy {
            ChangePolicy::Symmetric => (
                compute_metric(current.employees as f64, previous.employees as f64),
                compute_metric(
                    current.gross_profit() as f64,
                    previous.gross_profit() as f64,
                ),
            ),
            ChangePolicy::SourceCompatible => (
                MetricValue::unchanged(current.employees as f64),
                MetricValue::unchanged(current.gross_profit() as f64),
            ),
        };

        Self {
            total_projects,
            total_employees,
            total_sales,
            gross_profit,
        }
    }
}

/// Aggregate both windows and derive the four dashboard metrics.
///
/// Without a previous window (all-time) every change is 0.
pub fn build_dashboard_metrics(
    company_id: Uuid,
    windows: &PeriodWindows,
    projects: &[ProjectRecord],
    employees: &[EmployeeRecord],
    policy: ChangePolicy,
) -> DashboardMetrics {
    let current = aggregate_period(company_id, &windows.current, projects, employees);
    let previous = windows
        .previous
        .map(|w| aggregate_period(company_id, &w, projects, employees))
        .unwrap_or_default();

    DashboardMetrics::from_totals(&current, &previous, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::ProjectStatus;
    use crate::models::user::UserRole;
    use crate::services::window::MetricsTimeframe;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn project(company: Uuid, budget: Option<i32>, extra: i32, at: DateTime<Utc>) -> ProjectRecord {
        ProjectRecord {
            id: Uuid::new_v4(),
            name: "p".to_string(),
            budget,
            extra_cost: extra,
            status: ProjectStatus::InProgress,
            company_id: company,
            start_date: Some(at),
            created_at: at,
        }
    }

    fn employee(company: Uuid, salary: &str, at: DateTime<Utc>) -> EmployeeRecord {
        EmployeeRecord {
            user_id: Uuid::new_v4(),
            salary: Some(salary.to_string()),
            company_id: company,
            created_at: at,
            role: UserRole::AssignedEmployee,
        }
    }

    #[test]
    fn zero_baseline_reports_flat_up() {
        for current in [0.0, 1.0, 500.0, -20.0] {
            let m = compute_metric(current, 0.0);
            assert_eq!(m.change, 0.0);
            assert_eq!(m.trend, Trend::Up);
            assert_eq!(m.value, current);
        }
    }

    #[test]
    fn change_is_relative_percentage() {
        let cases = [(3000.0, 2000.0), (1.0, 3.0), (7.0, 7.0), (0.0, 10.0)];
        for (current, previous) in cases {
            let m = compute_metric(current, previous);
            let expected = (current - previous) / previous * 100.0;
            assert!((m.change - expected).abs() < 1e-9);
        }
        assert_eq!(compute_metric(7.0, 7.0).trend, Trend::Up);
        assert_eq!(compute_metric(1.0, 3.0).trend, Trend::Down);
    }

    #[test]
    fn sales_growth_against_previous_window() {
        let company = Uuid::new_v4();
        let windows = MetricsTimeframe::LastThreeMonths.windows(now());
        let in_current = now() - Duration::days(10);
        let in_previous = windows.previous.unwrap().start + Duration::days(5);

        let projects = vec![
            project(company, Some(1000), 0, in_current),
            project(company, Some(2000), 0, in_current),
            project(company, Some(0), 0, in_current),
            project(company, Some(1000), 0, in_previous),
            project(company, Some(1000), 0, in_previous),
        ];

        let metrics =
            build_dashboard_metrics(company, &windows, &projects, &[], ChangePolicy::Symmetric);
        assert_eq!(metrics.total_sales.value, 3000.0);
        assert!((metrics.total_sales.change - 50.0).abs() < 1e-9);
        assert_eq!(metrics.total_sales.trend, Trend::Up);
        assert_eq!(metrics.total_projects.value, 3.0);
        assert!((metrics.total_projects.change - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_previous_window_gives_zero_change() {
        let company = Uuid::new_v4();
        let windows = MetricsTimeframe::LastYear.windows(now());
        let projects = vec![project(company, Some(500), 0, now() - Duration::days(1))];

        let metrics =
            build_dashboard_metrics(company, &windows, &projects, &[], ChangePolicy::Symmetric);
        assert_eq!(metrics.total_sales.value, 500.0);
        assert_eq!(metrics.total_sales.change, 0.0);
        assert_eq!(metrics.total_sales.trend, Trend::Up);
    }

    #[test]
    fn gross_profit_subtracts_extra_and_salary() {
        let company = Uuid::new_v4();
        let window = MetricsTimeframe::AllTime.windows(now()).current;
        let at = now() - Duration::days(2);

        let totals = aggregate_period(
            company,
            &window,
            &[project(company, Some(5000), 1000, at)],
            &[employee(company, "2000", at)],
        );
        assert_eq!(totals.gross_profit(), 2000);
        assert_eq!(totals.employees, 1);
        assert_eq!(totals.employee_costs, 2000);
    }

    #[test]
    fn negative_gross_profit_keeps_computed_trend() {
        let current = PeriodTotals {
            sales: 100,
            employee_costs: 400,
            ..Default::default()
        };
        let metrics =
            DashboardMetrics::from_totals(&current, &PeriodTotals::default(), ChangePolicy::Symmetric);
        assert_eq!(metrics.gross_profit.value, -300.0);
        assert_eq!(metrics.gross_profit.change, 0.0);
        assert_eq!(metrics.gross_profit.trend, Trend::Up);
    }

    #[test]
    fn source_compatible_policy_skips_employee_and_profit_change() {
        let current = PeriodTotals {
            projects: 4,
            sales: 4000,
            employees: 6,
            employee_costs: 1000,
            ..Default::default()
        };
        let previous = PeriodTotals {
            projects: 2,
            sales: 2000,
            employees: 3,
            employee_costs: 500,
            ..Default::default()
        };

        let legacy = DashboardMetrics::from_totals(&current, &previous, ChangePolicy::SourceCompatible);
        assert_eq!(legacy.total_employees, MetricValue::unchanged(6.0));
        assert_eq!(legacy.gross_profit, MetricValue::unchanged(3000.0));
        assert!((legacy.total_projects.change - 100.0).abs() < 1e-9);

        let symmetric = DashboardMetrics::from_totals(&current, &previous, ChangePolicy::Symmetric);
        assert!((symmetric.total_employees.change - 100.0).abs() < 1e-9);
        assert!((symmetric.gross_profit.change - 100.0).abs() < 1e-9);
    }

    #[test]
    fn other_tenants_are_ignored() {
        let mine = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let window = MetricsTimeframe::AllTime.windows(now()).current;
        let at = now() - Duration::days(1);

        let totals = aggregate_period(
            mine,
            &window,
            &[
                project(mine, Some(100), 10, at),
                project(theirs, Some(9000), 900, at),
            ],
            &[employee(theirs, "5000", at)],
        );
        assert_eq!(totals.projects, 1);
        assert_eq!(totals.sales, 100);
        assert_eq!(totals.extra_costs, 10);
        assert_eq!(totals.employees, 0);
    }

    #[test]
    fn boundary_record_counted_once() {
        let company = Uuid::new_v4();
        let windows = MetricsTimeframe::LastSixMonths.windows(now());
        let projects = vec![project(company, Some(700), 0, windows.current.start)];

        let current = aggregate_period(company, &windows.current, &projects, &[]);
        let previous = aggregate_period(company, &windows.previous.unwrap(), &projects, &[]);
        assert_eq!(current.projects, 1);
        assert_eq!(previous.projects, 0);
    }

    #[test]
    fn project_without_start_date_uses_creation_time() {
        let company = Uuid::new_v4();
        let windows = MetricsTimeframe::LastThreeMonths.windows(now());
        let mut old = project(company, Some(50), 0, now() - Duration::days(400));
        old.start_date = None;
        old.created_at = now() - Duration::days(3);

        let totals = aggregate_period(company, &windows.current, &[old], &[]);
        assert_eq!(totals.projects, 1);
    }

    #[test]
    fn huge_salaries_saturate_instead_of_overflowing() {
        let company = Uuid::new_v4();
        let windows = MetricsTimeframe::AllTime.windows(now());
        let hired = now() - Duration::days(30);
        let employees = vec![
            employee(company, "9223372036854775807", hired),
            employee(company, "1", hired),
        ];
        let projects = vec![project(company, Some(1000), 10, hired)];

        let totals = aggregate_period(company, &windows.current, &projects, &employees);
        assert_eq!(totals.employees, 2);
        assert_eq!(totals.employee_costs, i64::MAX);
        assert_eq!(totals.gross_profit(), 1000 - 10 - i64::MAX);

        let negative = PeriodTotals {
            sales: 0,
            extra_costs: i64::MAX,
            employee_costs: i64::MAX,
            ..PeriodTotals::default()
        };
        assert_eq!(negative.gross_profit(), i64::MIN);

        let metrics =
            build_dashboard_metrics(company, &windows, &projects, &employees, ChangePolicy::Symmetric);
        assert!(metrics.gross_profit.value.is_finite());
        assert!(metrics.gross_profit.value < 0.0);
    }

    #[test]
    fn all_time_reports_no_change() {
        let company = Uuid::new_v4();
        let windows = MetricsTimeframe::AllTime.windows(now());
        assert!(windows.previous.is_none());

        let projects = vec![
            project(company, Some(500), 50, now() - Duration::days(5)),
            project(company, Some(800), 0, now() - Duration::days(100)),
            project(company, Some(1200), 100, now() - Duration::days(400)),
            project(company, Some(300), 0, now() - Duration::days(2000)),
        ];
        let employees = vec![
            employee(company, "1000", now() - Duration::days(20)),
            employee(company, "2000", now() - Duration::days(250)),
            employee(company, "1500", now() - Duration::days(900)),
        ];

        for policy in [ChangePolicy::Symmetric, ChangePolicy::SourceCompatible] {
            let metrics = build_dashboard_metrics(company, &windows, &projects, &employees, policy);
            assert_eq!(metrics.total_projects.value, 4.0);
            assert_eq!(metrics.total_employees.value, 3.0);
            assert_eq!(metrics.total_sales.value, 2800.0);
            assert_eq!(metrics.gross_profit.value, -1850.0);
            for metric in [
                &metrics.total_projects,
                &metrics.total_employees,
                &metrics.total_sales,
                &metrics.gross_profit,
            ] {
                assert_eq!(metric.change, 0.0);
                assert_eq!(metric.trend, Trend::Up);
            }
        }
    }

    #[test]
    fn change_policy_parse() {
        assert_eq!(ChangePolicy::parse("symmetric"), Some(ChangePolicy::Symmetric));
        assert_eq!(
            ChangePolicy::parse("source-compatible"),
            Some(ChangePolicy::SourceCompatible)
        );
        assert_eq!(ChangePolicy::parse("legacy"), None);
        assert_eq!(ChangePolicy::default(), ChangePolicy::Symmetric);
    }

    #[test]
    fn metrics_serialize_camel_case() {
        let metrics = DashboardMetrics::from_totals(
            &PeriodTotals::default(),
            &PeriodTotals::default(),
            ChangePolicy::Symmetric,
        );
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["totalProjects"]["trend"], "up");
        assert_eq!(json["grossProfit"]["change"], 0.0);
        assert!(json.get("totalEmployees").is_some());
        assert!(json.get("totalSales").is_some());
    }
}
