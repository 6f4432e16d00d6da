use super::portfolio::project_portfolio;
use super::property::simulate_real_estate;
use super::types::{
    Comparison, ComparisonRow, EquityYear, InvestmentAnalysis, InvestmentScenario, PortfolioYear,
    Strategy, StrategySummary,
};

/// Lines up real-estate and index-fund contributions year by year.
///
/// Series are truncated to the shortest input. Real estate starts out behind
/// by `upfront_costs`; the index fund's cumulative contribution is simply its
/// portfolio value.
pub fn compare(
    equity: &[EquityYear],
    cash_flow: &[f64],
    portfolio: &[PortfolioYear],
    upfront_costs: f64,
) -> Comparison {
    let len = equity.len().min(cash_flow.len()).min(portfolio.len());
    let mut rows = Vec::with_capacity(len);
    let mut real_estate_cumulative = 0.0;

    for i in 0..len {
        let real_estate_annual = if i == 0 {
            equity[0].equity + cash_flow[0] - upfront_costs
        } else {
            (equity[i].equity - equity[i - 1].equity) + cash_flow[i]
        };
        real_estate_cumulative += real_estate_annual;

        let previous_value = if i == 0 {
            0.0
        } else {
            portfolio[i - 1].portfolio_value
        };
        rows.push(ComparisonRow {
            year: equity[i].year,
            real_estate_annual,
            real_estate_cumulative,
            index_fund_annual: portfolio[i].portfolio_value - previous_value,
            index_fund_cumulative: portfolio[i].portfolio_value,
        });
    }

    let break_even_year = break_even_year(&rows);
    Comparison {
        rows,
        break_even_year,
    }
}

/// First year real estate's cumulative contribution strictly exceeds the
/// index fund's.
pub fn break_even_year(rows: &[ComparisonRow]) -> Option<i32> {
    rows.iter()
        .find(|row| row.real_estate_cumulative > row.index_fund_cumulative)
        .map(|row| row.year)
}

/// Contribution as a multiple of the money put in; 0 when nothing was invested.
pub fn roi_multiple(contribution: f64, invested: f64) -> f64 {
    if invested == 0.0 {
        return 0.0;
    }
    contribution / invested
}

/// Years each strategy led, with ties counted for neither.
pub fn summarize(comparison: &Comparison) -> StrategySummary {
    let mut real_estate_lead_years = Vec::new();
    let mut index_fund_lead_years = Vec::new();
    for row in &comparison.rows {
        if row.real_estate_cumulative > row.index_fund_cumulative {
            real_estate_lead_years.push(row.year);
        } else if row.index_fund_cumulative > row.real_estate_cumulative {
            index_fund_lead_years.push(row.year);
        }
    }

    let final_leader = comparison.rows.last().map(|row| {
        if row.real_estate_cumulative > row.index_fund_cumulative {
            Strategy::RealEstate
        } else {
            Strategy::IndexFund
        }
    });

    StrategySummary {
        real_estate_lead_years,
        index_fund_lead_years,
        final_leader,
    }
}

/// Runs both strategies over the holding period and compares them.
pub fn analyze(scenario: &InvestmentScenario) -> InvestmentAnalysis {
    let property = &scenario.property;
    let market = &scenario.market;

    let real_estate = simulate_real_estate(property);
    let index_fund_investment = market
        .initial_investment
        .unwrap_or(real_estate.initial_investment);
    let index_fund = project_portfolio(
        index_fund_investment,
        property.years_held,
        market.annual_return,
        market.dividend_yield,
        market.reinvest_dividends,
        property.inflation_rate,
        property.adjust_for_inflation,
    );

    let comparison = compare(
        &real_estate.equity,
        &real_estate.cash_flow,
        &index_fund.years,
        real_estate.upfront_costs,
    );
    let summary = summarize(&comparison);
    log::debug!(
        "compared {} years, break-even {:?}",
        comparison.rows.len(),
        comparison.break_even_year
    );

    InvestmentAnalysis {
        real_estate_roi: roi_multiple(
            real_estate.fire_contribution,
            real_estate.initial_investment,
        ),
        index_fund_roi: roi_multiple(index_fund.fire_contribution, index_fund_investment),
        real_estate,
        index_fund_investment,
        index_fund,
        comparison,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{MarketScenario, PropertyScenario};
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn equity_rows(start_year: i32, equity: &[f64]) -> Vec<EquityYear> {
        equity
            .iter()
            .enumerate()
            .map(|(offset, &equity)| EquityYear {
                year: start_year + offset as i32,
                property_value: equity,
                loan_balance: 0.0,
                equity,
            })
            .collect()
    }

    fn portfolio_rows(values: &[f64]) -> Vec<PortfolioYear> {
        values
            .iter()
            .enumerate()
            .map(|(offset, &portfolio_value)| PortfolioYear {
                year: offset as u32 + 1,
                portfolio_value,
                dividends: 0.0,
            })
            .collect()
    }

    fn sample_scenario() -> InvestmentScenario {
        InvestmentScenario {
            property: PropertyScenario {
                purchase_price: 400_000.0,
                down_payment: 0.25,
                mortgage_rate: 0.06,
                term_years: 30,
                appreciation_rate: 0.03,
                annual_rent: 24_000.0,
                annual_expenses: 5_000.0,
                rent_growth_rate: 0.015,
                years_held: 15,
                inflation_rate: 0.025,
                adjust_for_inflation: true,
                closing_costs: 10_000.0,
                renovation_costs: 15_000.0,
                start_year: 2025,
            },
            market: MarketScenario {
                initial_investment: None,
                annual_return: 0.07,
                dividend_yield: 0.015,
                reinvest_dividends: true,
            },
        }
    }

    #[test]
    fn first_row_subtracts_upfront_costs() {
        let equity = equity_rows(2025, &[100.0, 130.0, 170.0]);
        let cash_flow = [10.0, 12.0, 14.0];
        let portfolio = portfolio_rows(&[120.0, 150.0, 190.0]);
        let comparison = compare(&equity, &cash_flow, &portfolio, 25.0);

        let rows = &comparison.rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 2025);
        assert_approx(rows[0].real_estate_annual, 85.0);
        assert_approx(rows[0].real_estate_cumulative, 85.0);
        assert_approx(rows[1].real_estate_annual, 42.0);
        assert_approx(rows[1].real_estate_cumulative, 127.0);
        assert_approx(rows[2].real_estate_cumulative, 181.0);

        assert_approx(rows[0].index_fund_annual, 120.0);
        assert_approx(rows[1].index_fund_annual, 30.0);
        assert_approx(rows[2].index_fund_cumulative, 190.0);
        assert_eq!(comparison.break_even_year, None);
    }

    #[test]
    fn cumulative_equals_equity_plus_cash_minus_upfront() {
        let equity = equity_rows(2030, &[50.0, 40.0, 90.0, 140.0]);
        let cash_flow = [-5.0, 3.0, 8.0, 1.0];
        let portfolio = portfolio_rows(&[0.0, 0.0, 0.0, 0.0]);
        let comparison = compare(&equity, &cash_flow, &portfolio, 12.0);

        let mut cash_total = 0.0;
        for (i, row) in comparison.rows.iter().enumerate() {
            cash_total += cash_flow[i];
            assert_approx(row.real_estate_cumulative, equity[i].equity + cash_total - 12.0);
        }
    }

    #[test]
    fn break_even_is_first_year_real_estate_pulls_ahead() {
        let equity = equity_rows(2025, &[0.0, 100.0, 250.0, 450.0, 700.0]);
        let cash_flow = [0.0; 5];
        let portfolio = portfolio_rows(&[100.0, 150.0, 200.0, 250.0, 300.0]);
        let comparison = compare(&equity, &cash_flow, &portfolio, 0.0);
        assert_eq!(comparison.break_even_year, Some(2027));
    }

    #[test]
    fn ties_do_not_count_as_break_even() {
        let equity = equity_rows(2025, &[100.0, 200.0]);
        let portfolio = portfolio_rows(&[100.0, 200.0]);
        let comparison = compare(&equity, &[0.0, 0.0], &portfolio, 0.0);
        assert_eq!(comparison.break_even_year, None);

        let summary = summarize(&comparison);
        assert!(summary.real_estate_lead_years.is_empty());
        assert!(summary.index_fund_lead_years.is_empty());
        assert_eq!(summary.final_leader, Some(Strategy::IndexFund));
    }

    #[test]
    fn mismatched_lengths_truncate_to_shortest() {
        let equity = equity_rows(2025, &[10.0, 20.0, 30.0, 40.0]);
        let portfolio = portfolio_rows(&[5.0, 6.0, 7.0]);
        let comparison = compare(&equity, &[1.0, 1.0], &portfolio, 0.0);
        assert_eq!(comparison.rows.len(), 2);

        let empty = compare(&equity, &[], &portfolio, 0.0);
        assert!(empty.rows.is_empty());
        assert_eq!(empty.break_even_year, None);
        assert_eq!(summarize(&empty).final_leader, None);
    }

    #[test]
    fn summary_counts_lead_years_per_strategy() {
        let equity = equity_rows(2025, &[0.0, 100.0, 250.0]);
        let portfolio = portfolio_rows(&[50.0, 100.0, 120.0]);
        let comparison = compare(&equity, &[0.0, 0.0, 0.0], &portfolio, 0.0);
        let summary = summarize(&comparison);
        assert_eq!(summary.index_fund_lead_years, vec![2025]);
        assert_eq!(summary.real_estate_lead_years, vec![2027]);
        assert_eq!(summary.final_leader, Some(Strategy::RealEstate));
    }

    #[test]
    fn roi_multiple_guards_against_zero_investment() {
        assert_approx(roi_multiple(250_000.0, 125_000.0), 2.0);
        assert_approx(roi_multiple(250_000.0, 0.0), 0.0);
    }

    #[test]
    fn analyze_syncs_index_investment_with_real_estate_outlay() {
        let analysis = analyze(&sample_scenario());

        assert_approx(analysis.index_fund_investment, 125_000.0);
        assert_eq!(analysis.comparison.rows.len(), 15);
        assert_eq!(analysis.index_fund.years.len(), 15);
        assert_eq!(analysis.comparison.rows[0].year, 2025);
        assert_approx(
            analysis.real_estate_roi,
            analysis.real_estate.fire_contribution / 125_000.0,
        );
        assert_approx(
            analysis.index_fund_roi,
            analysis.index_fund.fire_contribution / 125_000.0,
        );
        let last = analysis.comparison.rows[14];
        assert_approx(
            last.index_fund_cumulative,
            analysis.index_fund.years[14].portfolio_value,
        );
        assert_approx(
            last.real_estate_cumulative,
            analysis.real_estate.fire_contribution,
        );
    }

    #[test]
    fn analyze_honours_explicit_index_investment() {
        let mut scenario = sample_scenario();
        scenario.market.initial_investment = Some(50_000.0);
        let analysis = analyze(&scenario);
        assert_approx(analysis.index_fund_investment, 50_000.0);
        assert_approx(analysis.real_estate.initial_investment, 125_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_break_even_matches_crossover_index(
            crossover in 0usize..20,
            len_extra in 1usize..10,
            gap in 1u32..10_000
        ) {
            let len = crossover + len_extra;
            let index_values: Vec<f64> = (0..len).map(|i| 1_000.0 + 100.0 * i as f64).collect();
            let equity_values: Vec<f64> = (0..len)
                .map(|i| {
                    if i < crossover {
                        index_values[i] - gap as f64
                    } else {
                        index_values[i] + gap as f64 * (1 + i - crossover) as f64
                    }
                })
                .collect();
            let equity = equity_rows(2000, &equity_values);
            let portfolio = portfolio_rows(&index_values);
            let comparison = compare(&equity, &vec![0.0; len], &portfolio, 0.0);
            prop_assert_eq!(comparison.break_even_year, Some(2000 + crossover as i32));
            prop_assert!(comparison.rows.len() == len);
        }
    }
}
