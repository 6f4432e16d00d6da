use serde::Serialize;

use super::lifestyle::MonthlyExpenses;

/// Outcome of compounding savings toward a fixed goal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireProjection {
    pub years_to_target: u32,
    pub final_net_worth: f64,
    /// Net worth at the start of each year; index 0 is the starting value.
    pub net_worth_history: Vec<f64>,
    /// False when the year cap was hit before the goal.
    pub reached: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InflatingGoalProjection {
    pub projection: FireProjection,
    pub goal_history: Vec<f64>,
    pub final_goal: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressTier {
    Reached,
    AlmostThere,
    Halfway,
    Underway,
    JustStarted,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    pub year: i32,
    pub beginning_balance: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityYear {
    pub year: i32,
    pub property_value: f64,
    /// Always nominal, even when value and equity are deflated.
    pub loan_balance: f64,
    pub equity: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioYear {
    /// Years since purchase, starting at 1. Not a calendar year.
    pub year: u32,
    pub portfolio_value: f64,
    pub dividends: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProjection {
    pub fire_contribution: f64,
    pub years: Vec<PortfolioYear>,
}

#[derive(Debug, Clone)]
pub struct PropertyScenario {
    pub purchase_price: f64,
    pub down_payment: f64,
    pub mortgage_rate: f64,
    pub term_years: u32,
    pub appreciation_rate: f64,
    pub annual_rent: f64,
    pub annual_expenses: f64,
    pub rent_growth_rate: f64,
    pub years_held: u32,
    pub inflation_rate: f64,
    pub adjust_for_inflation: bool,
    pub closing_costs: f64,
    pub renovation_costs: f64,
    pub start_year: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateProjection {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub annual_debt_service: f64,
    pub initial_investment: f64,
    pub upfront_costs: f64,
    pub fire_contribution: f64,
    pub amortization: Vec<AmortizationYear>,
    pub equity: Vec<EquityYear>,
    pub cash_flow: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct MarketScenario {
    /// Falls back to the real-estate initial investment when absent.
    pub initial_investment: Option<f64>,
    pub annual_return: f64,
    pub dividend_yield: f64,
    pub reinvest_dividends: bool,
}

#[derive(Debug, Clone)]
pub struct InvestmentScenario {
    pub property: PropertyScenario,
    pub market: MarketScenario,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub year: i32,
    pub real_estate_annual: f64,
    pub real_estate_cumulative: f64,
    pub index_fund_annual: f64,
    pub index_fund_cumulative: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub break_even_year: Option<i32>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    RealEstate,
    IndexFund,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySummary {
    pub real_estate_lead_years: Vec<i32>,
    pub index_fund_lead_years: Vec<i32>,
    pub final_leader: Option<Strategy>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAnalysis {
    pub real_estate: RealEstateProjection,
    pub index_fund_investment: f64,
    pub index_fund: PortfolioProjection,
    pub comparison: Comparison,
    pub real_estate_roi: f64,
    pub index_fund_roi: f64,
    pub summary: StrategySummary,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub annual_income: f64,
    pub annual_spending: f64,
    pub annual_savings: f64,
    pub delta: f64,
    pub savings_rate: f64,
    pub buffer: f64,
    pub supports_plan: bool,
    pub shortfall: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseGroup {
    Essentials,
    LifeServices,
    Lifestyle,
    GoalsGiving,
}

impl ExpenseGroup {
    pub const ALL: [Self; 4] = [
        Self::Essentials,
        Self::LifeServices,
        Self::Lifestyle,
        Self::GoalsGiving,
    ];
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotal {
    pub group: ExpenseGroup,
    pub monthly: f64,
    pub annual: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub groups: Vec<GroupTotal>,
    pub monthly_total: f64,
    pub annual_total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleBudget {
    pub expenses: MonthlyExpenses,
    pub breakdown: BudgetBreakdown,
    pub summary: BudgetSummary,
}
