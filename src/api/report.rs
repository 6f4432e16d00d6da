use serde::Serialize;

use super::args::{BudgetInputs, FireInputs, Spending};
use crate::core::{
    BudgetBreakdown, BudgetSummary, MonthlyExpenses, ProgressTier, fire_number, fire_progress,
    investable_net_worth, progress_tier, project, project_with_inflating_goal, summarize_budget,
    summarize_lifestyle_budget,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireReport {
    pub fire_goal: f64,
    pub current_net_worth: f64,
    pub total_net_worth: f64,
    pub progress: f64,
    pub progress_tier: ProgressTier,
    pub years_to_target: u32,
    pub final_net_worth: f64,
    pub reached: bool,
    pub net_worth_history: Vec<f64>,
    /// Present only when the goal grows with inflation.
    pub goal_history: Option<Vec<f64>>,
    pub final_goal: f64,
}

pub fn build_fire_report(inputs: &FireInputs) -> FireReport {
    let fire_goal = fire_number(inputs.annual_expenses, inputs.withdrawal_rate);
    let current_net_worth = investable_net_worth(
        inputs.liquid_assets,
        inputs.illiquid_assets,
        inputs.include_illiquid,
    );
    let progress = fire_progress(current_net_worth, fire_goal);

    let (projection, goal_history, final_goal) = if inputs.inflate_goal {
        let inflating = project_with_inflating_goal(
            current_net_worth,
            inputs.annual_savings,
            inputs.annual_return,
            fire_goal,
            inputs.inflation_rate,
        );
        (
            inflating.projection,
            Some(inflating.goal_history),
            inflating.final_goal,
        )
    } else {
        let projection = project(
            current_net_worth,
            inputs.annual_savings,
            inputs.annual_return,
            fire_goal,
        );
        (projection, None, fire_goal)
    };

    FireReport {
        fire_goal,
        current_net_worth,
        total_net_worth: inputs.liquid_assets + inputs.illiquid_assets,
        progress,
        progress_tier: progress_tier(progress),
        years_to_target: projection.years_to_target,
        final_net_worth: projection.final_net_worth,
        reached: projection.reached,
        net_worth_history: projection.net_worth_history,
        goal_history,
        final_goal,
    }
}

/// Budget check; `expenses` and `breakdown` are set for itemized spending.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub expenses: Option<MonthlyExpenses>,
    pub breakdown: Option<BudgetBreakdown>,
    pub summary: BudgetSummary,
}

pub fn build_budget_report(inputs: BudgetInputs) -> BudgetReport {
    match inputs.spending {
        Spending::Annual(annual_spending) => BudgetReport {
            expenses: None,
            breakdown: None,
            summary: summarize_budget(
                inputs.annual_income,
                annual_spending,
                inputs.annual_savings,
            ),
        },
        Spending::Itemized(expenses) => {
            let budget =
                summarize_lifestyle_budget(inputs.annual_income, inputs.annual_savings, expenses);
            BudgetReport {
                expenses: Some(budget.expenses),
                breakdown: Some(budget.breakdown),
                summary: budget.summary,
            }
        }
    }
}
