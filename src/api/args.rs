use chrono::Datelike;
use clap::Args;

use super::error::InputError;
use crate::core::{
    ExpenseCategory, HouseholdType, InvestmentScenario, Lifestyle, LocationTier, MarketScenario,
    MonthlyExpenses, PropertyScenario, empty_expenses, expense_template,
};

/// Longest horizon accepted for loans and holding periods.
const MAX_YEARS: u32 = 100;

/// Purchase years may sit this far either side of the current year.
const PURCHASE_YEAR_WINDOW: i32 = 50;

#[derive(Args, Debug, Clone)]
pub struct FireArgs {
    #[arg(long, default_value_t = 100_000.0, help = "Liquid or investable assets")]
    pub liquid_assets: f64,
    #[arg(long, default_value_t = 0.0, help = "Illiquid assets such as home equity")]
    pub illiquid_assets: f64,
    #[arg(long, help = "Count illiquid assets toward the FIRE projection")]
    pub include_illiquid: bool,
    #[arg(long, default_value_t = 30_000.0, allow_negative_numbers = true)]
    pub annual_savings: f64,
    #[arg(long, default_value_t = 50_000.0, help = "Target annual expenses at FI")]
    pub annual_expenses: f64,
    #[arg(long, default_value_t = 4.0, help = "Safe withdrawal rate in percent")]
    pub withdrawal_rate: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        allow_negative_numbers = true,
        help = "Expected annual return in percent"
    )]
    pub annual_return: f64,
    #[arg(long, default_value_t = 2.5, help = "Annual inflation in percent")]
    pub inflation_rate: f64,
    #[arg(long, help = "Grow the FIRE goal with inflation while saving")]
    pub inflate_goal: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PropertyArgs {
    #[arg(long, help = "Purchase year; defaults to the current year")]
    pub purchase_year: Option<i32>,
    #[arg(long, default_value_t = 400_000.0)]
    pub purchase_price: f64,
    #[arg(long, default_value_t = 25.0, help = "Down payment in percent of price")]
    pub down_payment: f64,
    #[arg(long, help = "Buy outright with no mortgage")]
    pub all_cash: bool,
    #[arg(long, default_value_t = 6.0, help = "Mortgage interest rate in percent")]
    pub mortgage_rate: f64,
    #[arg(long, default_value_t = 30)]
    pub term_years: u32,
    #[arg(
        long,
        default_value_t = 3.0,
        allow_negative_numbers = true,
        help = "Annual appreciation in percent"
    )]
    pub appreciation_rate: f64,
    #[arg(long, default_value_t = 24_000.0)]
    pub annual_rent: f64,
    #[arg(long, default_value_t = 5_000.0, help = "Annual operating expenses")]
    pub annual_expenses: f64,
    #[arg(
        long,
        default_value_t = 1.5,
        allow_negative_numbers = true,
        help = "Annual rent growth in percent, may be negative"
    )]
    pub rent_growth_rate: f64,
    #[arg(long, default_value_t = 15)]
    pub years_held: u32,
    #[arg(long, default_value_t = 10_000.0)]
    pub closing_costs: f64,
    #[arg(long, default_value_t = 15_000.0)]
    pub renovation_costs: f64,
    #[arg(long, default_value_t = 2.5, help = "Annual inflation in percent")]
    pub inflation_rate: f64,
    #[arg(long, help = "Report nominal values instead of today's money")]
    pub nominal: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MarketArgs {
    #[arg(
        long,
        help = "Index fund investment; defaults to the real-estate initial investment"
    )]
    pub index_investment: Option<f64>,
    #[arg(
        long,
        default_value_t = 7.0,
        allow_negative_numbers = true,
        help = "Annual market return in percent"
    )]
    pub index_return: f64,
    #[arg(long, default_value_t = 1.5, help = "Dividend yield in percent")]
    pub dividend_yield: f64,
    #[arg(long, help = "Pay dividends out instead of reinvesting them")]
    pub no_reinvest: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub property: PropertyArgs,
    #[command(flatten)]
    pub market: MarketArgs,
}

#[derive(Args, Debug, Clone)]
pub struct BudgetArgs {
    #[arg(long, default_value_t = 0.0)]
    pub annual_income: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Used when no expense template or items are given"
    )]
    pub annual_spending: f64,
    #[arg(long, default_value_t = 30_000.0)]
    pub annual_savings: f64,
    #[arg(long, help = "Start from this household's expense template")]
    pub household: Option<HouseholdType>,
    #[arg(long, default_value_t = Lifestyle::Suburban)]
    pub lifestyle: Lifestyle,
    #[arg(long, default_value_t = LocationTier::MajorMetro)]
    pub location: LocationTier,
    #[arg(
        long = "expense",
        value_name = "CATEGORY=AMOUNT",
        value_parser = parse_expense,
        help = "Monthly amount for one category, repeatable"
    )]
    pub expenses: Vec<(ExpenseCategory, f64)>,
}

fn parse_expense(s: &str) -> Result<(ExpenseCategory, f64), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{s}'"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount for {category}: {e}"))?;
    Ok((category.trim().parse()?, amount))
}

/// How the budget's spending side was given.
#[derive(Debug, Clone)]
pub enum Spending {
    Annual(f64),
    Itemized(MonthlyExpenses),
}

#[derive(Debug, Clone)]
pub struct BudgetInputs {
    pub annual_income: f64,
    pub annual_savings: f64,
    pub spending: Spending,
}

/// FIRE assumptions with every rate as a fraction.
#[derive(Debug, Clone)]
pub struct FireInputs {
    pub liquid_assets: f64,
    pub illiquid_assets: f64,
    pub include_illiquid: bool,
    pub annual_savings: f64,
    pub annual_expenses: f64,
    pub withdrawal_rate: f64,
    pub annual_return: f64,
    pub inflation_rate: f64,
    pub inflate_goal: bool,
}

pub fn default_fire_args() -> FireArgs {
    FireArgs {
        liquid_assets: 100_000.0,
        illiquid_assets: 0.0,
        include_illiquid: false,
        annual_savings: 30_000.0,
        annual_expenses: 50_000.0,
        withdrawal_rate: 4.0,
        annual_return: 7.0,
        inflation_rate: 2.5,
        inflate_goal: false,
    }
}

pub fn default_property_args() -> PropertyArgs {
    PropertyArgs {
        purchase_year: None,
        purchase_price: 400_000.0,
        down_payment: 25.0,
        all_cash: false,
        mortgage_rate: 6.0,
        term_years: 30,
        appreciation_rate: 3.0,
        annual_rent: 24_000.0,
        annual_expenses: 5_000.0,
        rent_growth_rate: 1.5,
        years_held: 15,
        closing_costs: 10_000.0,
        renovation_costs: 15_000.0,
        inflation_rate: 2.5,
        nominal: false,
    }
}

pub fn default_market_args() -> MarketArgs {
    MarketArgs {
        index_investment: None,
        index_return: 7.0,
        dividend_yield: 1.5,
        no_reinvest: false,
    }
}

pub fn default_budget_args() -> BudgetArgs {
    BudgetArgs {
        annual_income: 0.0,
        annual_spending: 0.0,
        annual_savings: 30_000.0,
        household: None,
        lifestyle: Lifestyle::Suburban,
        location: LocationTier::MajorMetro,
        expenses: Vec::new(),
    }
}

fn finite(flag: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { flag })
    }
}

fn non_negative(flag: &'static str, value: f64) -> Result<f64, InputError> {
    if finite(flag, value)? < 0.0 {
        return Err(InputError::Negative { flag });
    }
    Ok(value)
}

/// Percent in `0..=100`, returned as a fraction.
fn percent(flag: &'static str, value: f64) -> Result<f64, InputError> {
    if !(0.0..=100.0).contains(&finite(flag, value)?) {
        return Err(InputError::OutOfRange {
            flag,
            min: 0.0,
            max: 100.0,
        });
    }
    Ok(value / 100.0)
}

/// Growth percent that may be negative but cannot wipe out the base.
fn growth_rate(flag: &'static str, value: f64) -> Result<f64, InputError> {
    if finite(flag, value)? <= -100.0 {
        return Err(InputError::TotalLoss { flag });
    }
    Ok(value / 100.0)
}

fn horizon(flag: &'static str, value: u32, min: u32) -> Result<u32, InputError> {
    if !(min..=MAX_YEARS).contains(&value) {
        return Err(InputError::OutOfRange {
            flag,
            min: min as f64,
            max: MAX_YEARS as f64,
        });
    }
    Ok(value)
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn purchase_year(value: Option<i32>) -> Result<i32, InputError> {
    let this_year = current_year();
    let Some(year) = value else {
        return Ok(this_year);
    };
    let (min, max) = (this_year - PURCHASE_YEAR_WINDOW, this_year + PURCHASE_YEAR_WINDOW);
    if !(min..=max).contains(&year) {
        return Err(InputError::OutOfRange {
            flag: "--purchase-year",
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(year)
}

pub fn build_fire_inputs(args: FireArgs) -> Result<FireInputs, InputError> {
    let withdrawal_rate = percent("--withdrawal-rate", args.withdrawal_rate)?;
    if withdrawal_rate == 0.0 {
        return Err(InputError::NotPositive {
            flag: "--withdrawal-rate",
        });
    }

    Ok(FireInputs {
        liquid_assets: non_negative("--liquid-assets", args.liquid_assets)?,
        illiquid_assets: non_negative("--illiquid-assets", args.illiquid_assets)?,
        include_illiquid: args.include_illiquid,
        annual_savings: finite("--annual-savings", args.annual_savings)?,
        annual_expenses: non_negative("--annual-expenses", args.annual_expenses)?,
        withdrawal_rate,
        annual_return: growth_rate("--annual-return", args.annual_return)?,
        inflation_rate: growth_rate("--inflation-rate", args.inflation_rate)?,
        inflate_goal: args.inflate_goal,
    })
}

pub fn build_property_scenario(args: PropertyArgs) -> Result<PropertyScenario, InputError> {
    let down_payment = if args.all_cash {
        1.0
    } else {
        percent("--down-payment", args.down_payment)?
    };
    let all_cash = down_payment >= 1.0;
    let term_years = if all_cash {
        0
    } else {
        horizon("--term-years", args.term_years, 1)?
    };

    Ok(PropertyScenario {
        purchase_price: non_negative("--purchase-price", args.purchase_price)?,
        down_payment,
        mortgage_rate: if all_cash {
            0.0
        } else {
            percent("--mortgage-rate", args.mortgage_rate)?
        },
        term_years,
        appreciation_rate: growth_rate("--appreciation-rate", args.appreciation_rate)?,
        annual_rent: non_negative("--annual-rent", args.annual_rent)?,
        annual_expenses: non_negative("--annual-expenses", args.annual_expenses)?,
        rent_growth_rate: growth_rate("--rent-growth-rate", args.rent_growth_rate)?,
        years_held: horizon("--years-held", args.years_held, 1)?,
        inflation_rate: growth_rate("--inflation-rate", args.inflation_rate)?,
        adjust_for_inflation: !args.nominal,
        closing_costs: non_negative("--closing-costs", args.closing_costs)?,
        renovation_costs: non_negative("--renovation-costs", args.renovation_costs)?,
        start_year: purchase_year(args.purchase_year)?,
    })
}

pub fn build_market_scenario(args: MarketArgs) -> Result<MarketScenario, InputError> {
    let initial_investment = match args.index_investment {
        Some(amount) => Some(non_negative("--index-investment", amount)?),
        None => None,
    };

    Ok(MarketScenario {
        initial_investment,
        annual_return: growth_rate("--index-return", args.index_return)?,
        dividend_yield: percent("--dividend-yield", args.dividend_yield)?,
        reinvest_dividends: !args.no_reinvest,
    })
}

pub fn build_investment_scenario(args: CompareArgs) -> Result<InvestmentScenario, InputError> {
    Ok(InvestmentScenario {
        property: build_property_scenario(args.property)?,
        market: build_market_scenario(args.market)?,
    })
}

/// A household template or any `--expense` item switches the budget to
/// itemized monthly spending; otherwise `--annual-spending` is used.
pub fn build_budget(args: BudgetArgs) -> Result<BudgetInputs, InputError> {
    let spending = if args.household.is_none() && args.expenses.is_empty() {
        Spending::Annual(non_negative("--annual-spending", args.annual_spending)?)
    } else {
        let mut expenses = match args.household {
            Some(household) => expense_template(household, args.lifestyle, args.location),
            None => empty_expenses(),
        };
        for (category, amount) in args.expenses {
            expenses.insert(category, non_negative("--expense", amount)?);
        }
        Spending::Itemized(expenses)
    };

    Ok(BudgetInputs {
        annual_income: non_negative("--annual-income", args.annual_income)?,
        annual_savings: finite("--annual-savings", args.annual_savings)?,
        spending,
    })
}
