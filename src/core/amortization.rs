use super::types::AmortizationYear;

/// Fixed monthly payment that retires `loan_amount` over `term_years`.
///
/// A zero loan or a zero-length term has no payment; a zero rate repays the
/// principal in equal instalments.
pub fn monthly_payment(loan_amount: f64, annual_rate: f64, term_years: u32) -> f64 {
    let payments = term_years.saturating_mul(12);
    if loan_amount == 0.0 || payments == 0 {
        return 0.0;
    }
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return loan_amount / payments as f64;
    }
    loan_amount * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(payments as i32)))
}

/// Year-by-year principal/interest split of a fixed-payment loan, simulated
/// month by month for `years_to_project` years starting at `start_year`.
pub fn amortize(
    loan_amount: f64,
    annual_rate: f64,
    term_years: u32,
    years_to_project: u32,
    start_year: i32,
) -> Vec<AmortizationYear> {
    let monthly_rate = annual_rate / 12.0;
    let payment = monthly_payment(loan_amount, annual_rate, term_years);
    let mut balance = loan_amount;
    let mut schedule = Vec::with_capacity(years_to_project as usize);

    for offset in 0..years_to_project {
        let beginning_balance = balance;
        let mut principal_paid = 0.0;
        let mut interest_paid = 0.0;
        for _ in 0..12 {
            let interest = balance * monthly_rate;
            // Never pay past zero once the loan is retired.
            let principal = (payment - interest).min(balance);
            balance -= principal;
            interest_paid += interest;
            principal_paid += principal;
        }
        schedule.push(AmortizationYear {
            year: start_year + offset as i32,
            beginning_balance,
            principal_paid,
            interest_paid,
            ending_balance: balance,
        });
    }

    schedule
}
