use super::types::BudgetSummary;

/// Checks whether a yearly budget leaves room for the planned savings.
pub fn summarize_budget(
    annual_income: f64,
    annual_spending: f64,
    annual_savings: f64,
) -> BudgetSummary {
    let delta = annual_income - annual_spending;
    let savings_rate = if annual_income == 0.0 {
        0.0
    } else {
        annual_savings / annual_income
    };

    BudgetSummary {
        annual_income,
        annual_spending,
        annual_savings,
        delta,
        savings_rate,
        buffer: delta - annual_savings,
        supports_plan: delta >= annual_savings,
        shortfall: (annual_savings - delta).max(0.0),
    }
}
