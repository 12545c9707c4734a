//! Month-End Projection Calculator
//!
//! Extrapolates the daily income and expense rates observed so far this
//! month to the last day of the month, under three spending assumptions.

use chrono::{Datelike, NaiveDate};

use crate::config::ProjectionFactors;
use crate::models::{FinancialSummary, Outlook, Projection, Scenario, ScenarioKind};

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        // Only reachable at the edge of chrono's supported range
        .unwrap_or(31)
}

/// Project the end-of-month balance as of `today`
pub fn project_month_end(
    summary: &FinancialSummary,
    today: NaiveDate,
    factors: &ProjectionFactors,
) -> Projection {
    let days_in_month = days_in_month(today);
    let days_elapsed = today.day();
    let days_remaining = days_in_month.saturating_sub(days_elapsed);

    let (daily_expense_rate, daily_income_rate) = if days_elapsed > 0 {
        (
            summary.total_expenses / days_elapsed as f64,
            summary.total_income / days_elapsed as f64,
        )
    } else {
        (0.0, 0.0)
    };

    let balance = summary.available_balance;
    let scenario = |kind: ScenarioKind, factor: f64| {
        let projected_balance = if days_remaining == 0 {
            balance
        } else {
            balance + (daily_income_rate - daily_expense_rate * factor) * days_remaining as f64
        };
        Scenario {
            kind,
            factor,
            projected_balance,
        }
    };

    let optimistic = scenario(ScenarioKind::Optimistic, factors.optimistic);
    let realistic = scenario(ScenarioKind::Realistic, 1.0);
    let pessimistic = scenario(ScenarioKind::Pessimistic, factors.pessimistic);

    let recommended_daily_spend = balance.max(0.0) / days_remaining.max(1) as f64;

    let outlook = if days_remaining == 0 {
        Outlook::MonthClosed
    } else if realistic.projected_balance < 0.0 {
        Outlook::Shortfall {
            amount: realistic.projected_balance.abs(),
        }
    } else {
        Outlook::OnTrack
    };

    tracing::debug!(
        days_elapsed,
        days_remaining,
        realistic = realistic.projected_balance,
        "Projected month end"
    );

    Projection {
        days_in_month,
        days_elapsed,
        days_remaining,
        daily_expense_rate,
        daily_income_rate,
        optimistic,
        realistic,
        pessimistic,
        recommended_daily_spend,
        outlook,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 1, 15)), 31);
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2023, 2, 28)), 28);
        assert_eq!(days_in_month(date(2024, 4, 30)), 30);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
    }

    #[test]
    fn test_realistic_projection() {
        // 10 days in, 20 to go: 100/day income, 60/day expenses
        let summary = FinancialSummary::new(1000.0, 600.0);
        let factors = ProjectionFactors::default();
        let projection = project_month_end(&summary, date(2024, 6, 10), &factors);

        assert_eq!(projection.days_in_month, 30);
        assert_eq!(projection.days_elapsed, 10);
        assert_eq!(projection.days_remaining, 20);
        assert_eq!(projection.daily_income_rate, 100.0);
        assert_eq!(projection.daily_expense_rate, 60.0);
        assert!((projection.realistic.projected_balance - 1200.0).abs() < 1e-9);
        assert!((projection.optimistic.projected_balance - 1440.0).abs() < 1e-9);
        assert!((projection.pessimistic.projected_balance - 960.0).abs() < 1e-9);
        assert_eq!(projection.outlook, Outlook::OnTrack);
        assert!((projection.recommended_daily_spend - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_scenarios_are_ordered() {
        let summary = FinancialSummary::new(2500.0, 3100.0);
        for day in 1..30 {
            let p = project_month_end(&summary, date(2024, 9, day), &ProjectionFactors::default());
            assert!(p.pessimistic.projected_balance <= p.realistic.projected_balance);
            assert!(p.realistic.projected_balance <= p.optimistic.projected_balance);
        }
    }

    #[test]
    fn test_last_day_of_month_is_final() {
        let summary = FinancialSummary::new(3000.0, 2100.0);
        let factors = ProjectionFactors::default();
        let projection = project_month_end(&summary, date(2024, 9, 30), &factors);

        assert_eq!(projection.days_remaining, 0);
        for scenario in projection.scenarios() {
            assert_eq!(scenario.projected_balance, summary.available_balance);
        }
        assert_eq!(projection.outlook, Outlook::MonthClosed);
        assert_eq!(projection.recommended_daily_spend, 900.0);
    }

    #[test]
    fn test_shortfall_outlook() {
        // 5 days in, 26 to go, spending twice the income
        let summary = FinancialSummary::new(500.0, 1000.0);
        let factors = ProjectionFactors::default();
        let projection = project_month_end(&summary, date(2024, 1, 5), &factors);

        match projection.outlook {
            Outlook::Shortfall { amount } => {
                assert!((amount - (500.0 + 100.0 * 26.0)).abs() < 1e-9);
            }
            other => panic!("expected shortfall, got {:?}", other),
        }
        // Negative balance leaves nothing to spread over the remaining days
        assert_eq!(projection.recommended_daily_spend, 0.0);
    }

    #[test]
    fn test_zero_activity() {
        let projection = project_month_end(
            &FinancialSummary::empty(),
            date(2024, 3, 1),
            &ProjectionFactors::default(),
        );
        assert_eq!(projection.daily_expense_rate, 0.0);
        for scenario in projection.scenarios() {
            assert_eq!(scenario.projected_balance, 0.0);
        }
        assert_eq!(projection.outlook, Outlook::OnTrack);
    }

    #[test]
    fn test_custom_factors() {
        let factors = ProjectionFactors {
            optimistic: 0.5,
            pessimistic: 1.5,
        };
        let summary = FinancialSummary::new(0.0, 100.0);
        let projection = project_month_end(&summary, date(2024, 6, 10), &factors);

        assert_eq!(projection.optimistic.factor, 0.5);
        assert!((projection.optimistic.projected_balance - (-100.0 - 5.0 * 20.0)).abs() < 1e-9);
        assert!((projection.pessimistic.projected_balance - (-100.0 - 15.0 * 20.0)).abs() < 1e-9);
    }
}
