use super::amortization::{amortize, monthly_payment};
use super::types::{AmortizationYear, EquityYear, PropertyScenario, RealEstateProjection};

fn inflation_factor(inflation_rate: f64, offset: u32) -> f64 {
    (1.0 + inflation_rate).powi(offset as i32)
}

/// Property value, loan balance and equity for each year of `schedule`.
///
/// The first projected year is valued at the purchase price: appreciation is
/// compounded with the zero-based year offset. When `adjust_for_inflation` is
/// set, value and equity are expressed in start-year money; the loan balance
/// stays nominal.
pub fn project_equity(
    purchase_price: f64,
    appreciation_rate: f64,
    schedule: &[AmortizationYear],
    inflation_rate: f64,
    adjust_for_inflation: bool,
    start_year: i32,
) -> Vec<EquityYear> {
    schedule
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let offset = offset as u32;
            let mut property_value = purchase_price * (1.0 + appreciation_rate).powi(offset as i32);
            let mut equity = property_value - row.ending_balance;
            if adjust_for_inflation {
                let factor = inflation_factor(inflation_rate, offset);
                property_value /= factor;
                equity /= factor;
            }
            EquityYear {
                year: start_year + offset as i32,
                property_value,
                loan_balance: row.ending_balance,
                equity,
            }
        })
        .collect()
}

/// Net rental cash flow per year.
///
/// Rent grows at its own rate while expenses always track inflation. Debt
/// service is subtracted in nominal terms and the optional deflation applies
/// to the resulting net figure as a whole.
pub fn project_cash_flow(
    annual_rent: f64,
    annual_expenses: f64,
    rent_growth_rate: f64,
    annual_debt_service: f64,
    years: u32,
    inflation_rate: f64,
    adjust_for_inflation: bool,
) -> Vec<f64> {
    (0..years)
        .map(|offset| {
            let rent = annual_rent * (1.0 + rent_growth_rate).powi(offset as i32);
            let expenses = annual_expenses * inflation_factor(inflation_rate, offset);
            let cash_flow = (rent - expenses) - annual_debt_service;
            if adjust_for_inflation {
                cash_flow / inflation_factor(inflation_rate, offset)
            } else {
                cash_flow
            }
        })
        .collect()
}

/// Financing, amortization, equity and cash flow of one rental purchase.
pub fn simulate_real_estate(scenario: &PropertyScenario) -> RealEstateProjection {
    let all_cash = scenario.down_payment >= 1.0;
    let loan_amount = if all_cash {
        0.0
    } else {
        scenario.purchase_price * (1.0 - scenario.down_payment)
    };
    let payment = monthly_payment(loan_amount, scenario.mortgage_rate, scenario.term_years);
    let annual_debt_service = payment * 12.0;

    let upfront_costs = scenario.closing_costs + scenario.renovation_costs;
    let down_payment = scenario.purchase_price * scenario.down_payment.min(1.0);
    let initial_investment = down_payment + upfront_costs;

    let amortization = amortize(
        loan_amount,
        scenario.mortgage_rate,
        scenario.term_years,
        scenario.years_held,
        scenario.start_year,
    );
    let equity = project_equity(
        scenario.purchase_price,
        scenario.appreciation_rate,
        &amortization,
        scenario.inflation_rate,
        scenario.adjust_for_inflation,
        scenario.start_year,
    );
    let cash_flow = project_cash_flow(
        scenario.annual_rent,
        scenario.annual_expenses,
        scenario.rent_growth_rate,
        annual_debt_service,
        scenario.years_held,
        scenario.inflation_rate,
        scenario.adjust_for_inflation,
    );

    let final_equity = equity.last().map(|row| row.equity).unwrap_or(0.0);
    let fire_contribution = final_equity + cash_flow.iter().sum::<f64>() - upfront_costs;

    RealEstateProjection {
        loan_amount,
        monthly_payment: payment,
        annual_debt_service,
        initial_investment,
        upfront_costs,
        fire_contribution,
        amortization,
        equity,
        cash_flow,
    }
}
