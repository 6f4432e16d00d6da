use super::types::{PortfolioProjection, PortfolioYear};

/// Grows an index-fund position for `years` years.
///
/// Dividends are paid on the start-of-year value, then either folded back
/// into the position or set aside, before the year's market return applies.
/// Year `n` values are deflated by `(1 + inflation_rate)^n` when requested.
/// Dividends that were set aside are always brought back to today's money,
/// even for a nominal projection.
pub fn project_portfolio(
    initial_investment: f64,
    years: u32,
    annual_return: f64,
    dividend_yield: f64,
    reinvest_dividends: bool,
    inflation_rate: f64,
    adjust_for_inflation: bool,
) -> PortfolioProjection {
    let deflator = |year: u32| {
        if adjust_for_inflation {
            (1.0 + inflation_rate).powi(year as i32)
        } else {
            1.0
        }
    };

    let mut portfolio_value = initial_investment;
    let mut dividends_set_aside = 0.0;
    let mut history = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let dividends = portfolio_value * dividend_yield;
        if reinvest_dividends {
            portfolio_value += dividends;
        } else {
            dividends_set_aside += dividends;
        }
        portfolio_value *= 1.0 + annual_return;

        let factor = deflator(year);
        history.push(PortfolioYear {
            year,
            portfolio_value: portfolio_value / factor,
            dividends: dividends / factor,
        });
    }

    let set_aside_factor = (1.0 + inflation_rate).powi(years as i32);
    let fire_contribution =
        portfolio_value / deflator(years) + dividends_set_aside / set_aside_factor;

    PortfolioProjection {
        fire_contribution,
        years: history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn reinvested_dividends_beat_plain_compounding() {
        let projection = project_portfolio(100_000.0, 10, 0.07, 0.015, true, 0.025, false);
        assert_eq!(projection.years.len(), 10);

        let last = projection.years[9];
        assert_eq!(last.year, 10);
        assert!(last.portfolio_value > 100_000.0 * 1.07_f64.powi(10));
        assert_approx(last.portfolio_value, 100_000.0 * (1.015_f64 * 1.07).powi(10));
        assert_approx(projection.fire_contribution, last.portfolio_value);
    }

    #[test]
    fn dividends_are_paid_before_growth() {
        let projection = project_portfolio(1_000.0, 2, 0.10, 0.02, true, 0.0, false);
        // (1000 + 20) * 1.1 = 1122; dividends next year on 1122
        assert_approx(projection.years[0].dividends, 20.0);
        assert_approx(projection.years[0].portfolio_value, 1_122.0);
        assert_approx(projection.years[1].dividends, 22.44);
    }

    #[test]
    fn withheld_dividends_are_added_to_contribution() {
        let projection = project_portfolio(1_000.0, 2, 0.10, 0.02, false, 0.0, false);
        // Year 1 dividends 20 on 1000, year 2 dividends 22 on 1100.
        assert_approx(projection.years[1].portfolio_value, 1_210.0);
        assert_approx(projection.fire_contribution, 1_210.0 + 20.0 + 22.0);
    }

    #[test]
    fn contribution_is_deflated_to_today() {
        let projection = project_portfolio(1_000.0, 2, 0.10, 0.02, false, 0.05, true);
        let factor = 1.05_f64.powi(2);
        assert_approx(projection.years[0].portfolio_value, 1_100.0 / 1.05);
        assert_approx(projection.years[0].dividends, 20.0 / 1.05);
        assert_approx(projection.fire_contribution, (1_210.0 + 42.0) / factor);
    }

    #[test]
    fn nominal_projection_still_deflates_withheld_dividends() {
        let projection = project_portfolio(1_000.0, 2, 0.10, 0.02, false, 0.05, false);
        assert_approx(projection.years[1].portfolio_value, 1_210.0);
        assert_approx(projection.years[1].dividends, 22.0);
        assert_approx(projection.fire_contribution, 1_210.0 + 42.0 / 1.05_f64.powi(2));
        assert_approx(projection.fire_contribution, 1_248.095_238);
    }

    #[test]
    fn negative_return_shrinks_the_position() {
        let projection = project_portfolio(50_000.0, 5, -0.10, 0.0, true, 0.0, false);
        assert!(
            projection
                .years
                .windows(2)
                .all(|pair| pair[1].portfolio_value < pair[0].portfolio_value)
        );
        assert_approx(projection.fire_contribution, 50_000.0 * 0.9_f64.powi(5));
    }

    #[test]
    fn zero_years_returns_initial_investment() {
        let projection = project_portfolio(25_000.0, 0, 0.07, 0.015, true, 0.025, true);
        assert!(projection.years.is_empty());
        assert_approx(projection.fire_contribution, 25_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(40))]

        #[test]
        fn prop_nominal_equals_deflated_times_inflation_factor(
            initial in 1_000u32..2_000_000,
            years in 1u32..40,
            return_bp in -2_000i32..2_000,
            yield_bp in 0u32..500,
            reinvest in proptest::bool::ANY,
            inflation_bp in 0u32..1_000
        ) {
            let inflation = inflation_bp as f64 / 10_000.0;
            let args = (initial as f64, years, return_bp as f64 / 10_000.0, yield_bp as f64 / 10_000.0, reinvest);
            let nominal = project_portfolio(args.0, args.1, args.2, args.3, args.4, inflation, false);
            let real = project_portfolio(args.0, args.1, args.2, args.3, args.4, inflation, true);

            for (n, r) in nominal.years.iter().zip(&real.years) {
                let factor = (1.0 + inflation).powi(n.year as i32);
                let tol = 1e-9 * n.portfolio_value.abs().max(1.0);
                prop_assert!((n.portfolio_value - r.portfolio_value * factor).abs() <= tol);
                prop_assert!((n.dividends - r.dividends * factor).abs() <= tol);
            }
            if reinvest {
                let factor = (1.0 + inflation).powi(years as i32);
                let tol = 1e-9 * nominal.fire_contribution.abs().max(1.0);
                prop_assert!((nominal.fire_contribution - real.fire_contribution * factor).abs() <= tol);
            } else {
                prop_assert!(nominal.fire_contribution >= real.fire_contribution);
            }
        }
    }
}
