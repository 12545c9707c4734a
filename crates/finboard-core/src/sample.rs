//! Built-in sample figures
//!
//! Shown only through the explicit fallback mode, always tagged as
//! `DataSource::Sample` so the renderer can tell them apart from live data.

use crate::models::{CategoryExpense, DataSource, FinancialSummary, Snapshot};

/// Sample month: income, expenses and a five-category breakdown
pub fn sample_snapshot(reason: impl Into<String>) -> Snapshot {
    let categories = [
        ("Alimentación", 850.00),
        ("Transporte", 420.50),
        ("Entretenimiento", 320.00),
        ("Servicios", 650.00),
        ("Compras", 880.00),
    ];
    let total: f64 = categories.iter().map(|(_, amount)| amount).sum();

    Snapshot {
        summary: FinancialSummary {
            total_income: 4850.75,
            total_expenses: 3120.50,
            available_balance: 1730.25,
        },
        categories: categories
            .iter()
            .map(|(name, amount)| {
                let percentage = (amount / total * 10000.0).round() / 100.0;
                CategoryExpense::new(*name, *amount, percentage)
            })
            .collect(),
        source: DataSource::Sample {
            reason: reason.into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_consistent() {
        let snapshot = sample_snapshot("test");
        let total: f64 = snapshot.categories.iter().map(|c| c.amount).sum();

        assert!((total - snapshot.summary.total_expenses).abs() < 1e-9);
        assert!(
            (snapshot.summary.total_income
                - snapshot.summary.total_expenses
                - snapshot.summary.available_balance)
                .abs()
                < 1e-9
        );
        assert_eq!(snapshot.categories[0].percentage, 27.24);
    }

    #[test]
    fn test_sample_is_labelled() {
        let snapshot = sample_snapshot("connection refused");
        assert_eq!(
            snapshot.source,
            DataSource::Sample {
                reason: "connection refused".into()
            }
        );
    }
}
