//! Budget Utilization Calculator

use crate::config::BudgetConfig;
use crate::models::{BudgetStatus, BudgetUtilization, CategoryExpense};

/// Compute spend against limit for every category in the breakdown or the config
///
/// Breakdown categories come first in input order, followed by configured
/// categories with no recorded spend in configuration order. Repeated
/// breakdown labels are summed into their first occurrence.
pub fn compute_utilization(
    categories: &[CategoryExpense],
    config: &BudgetConfig,
) -> Vec<BudgetUtilization> {
    let mut spent_by_category: Vec<(&str, f64)> = Vec::new();
    for expense in categories {
        match spent_by_category
            .iter_mut()
            .find(|(name, _)| *name == expense.category)
        {
            Some((_, spent)) => *spent += expense.amount,
            None => spent_by_category.push((expense.category.as_str(), expense.amount)),
        }
    }

    let mut budgets: Vec<BudgetUtilization> = spent_by_category
        .iter()
        .map(|(category, spent)| {
            let configured = config.limit_for(category);
            let limit = configured.map(|l| l.limit).unwrap_or(config.default_limit);
            let icon = configured.and_then(|l| l.icon.clone());
            utilization(category, *spent, limit, icon, config)
        })
        .collect();

    for limit in &config.limits {
        if !spent_by_category
            .iter()
            .any(|(name, _)| *name == limit.category)
        {
            budgets.push(utilization(
                &limit.category,
                0.0,
                limit.limit,
                limit.icon.clone(),
                config,
            ));
        }
    }

    budgets
}

fn utilization(
    category: &str,
    spent: f64,
    limit: f64,
    icon: Option<String>,
    config: &BudgetConfig,
) -> BudgetUtilization {
    // A non-positive limit cannot be divided by; report it as unused
    let raw_percentage = if limit > 0.0 {
        spent / limit * 100.0
    } else {
        0.0
    };
    let percentage = raw_percentage.clamp(0.0, 100.0);

    BudgetUtilization {
        category: category.to_string(),
        spent,
        limit,
        percentage,
        raw_percentage,
        remaining: limit - spent,
        status: classify(percentage, config),
        icon,
    }
}

/// Map a display percentage onto a status band
pub fn classify(percentage: f64, config: &BudgetConfig) -> BudgetStatus {
    if percentage >= config.exceeded_percent {
        BudgetStatus::Exceeded
    } else if percentage >= config.warning_percent {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    }
}
