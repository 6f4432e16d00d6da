mod amortization;
mod budget;
mod comparator;
mod compounding;
mod lifestyle;
mod portfolio;
mod property;
mod types;

pub use amortization::{amortize, monthly_payment};
pub use budget::summarize_budget;
pub use comparator::{analyze, break_even_year, compare, roi_multiple, summarize};
pub use compounding::{
    MAX_PROJECTION_YEARS, fire_number, fire_progress, investable_net_worth, progress_tier,
    project, project_with_inflating_goal,
};
pub use lifestyle::{
    ExpenseCategory, HouseholdType, Lifestyle, LocationTier, MonthlyExpenses, budget_breakdown,
    empty_expenses, expense_template, summarize_lifestyle_budget,
};
pub use portfolio::project_portfolio;
pub use property::{project_cash_flow, project_equity, simulate_real_estate};
pub use types::{
    AmortizationYear, BudgetBreakdown, BudgetSummary, Comparison, ComparisonRow, EquityYear,
    ExpenseGroup, FireProjection, GroupTotal, InflatingGoalProjection, InvestmentAnalysis,
    InvestmentScenario, LifestyleBudget, MarketScenario, PortfolioProjection, PortfolioYear,
    ProgressTier, PropertyScenario, RealEstateProjection, Strategy, StrategySummary,
};
