mod args;
mod cli;
mod error;
mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ExpenseCategory, HouseholdType, Lifestyle, LocationTier, MonthlyExpenses, analyze,
    simulate_real_estate,
};

pub use args::{
    BudgetArgs, BudgetInputs, CompareArgs, FireArgs, FireInputs, MarketArgs, PropertyArgs,
    Spending, build_budget, build_fire_inputs, build_investment_scenario, build_market_scenario,
    build_property_scenario,
};
pub use cli::{Cli, Command, run};
pub use error::{AppError, InputError};
pub use report::{BudgetReport, FireReport, build_budget_report, build_fire_report};

use args::{default_budget_args, default_fire_args, default_market_args, default_property_args};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FirePayload {
    liquid_assets: Option<f64>,
    illiquid_assets: Option<f64>,
    include_illiquid: Option<bool>,
    annual_savings: Option<f64>,
    annual_expenses: Option<f64>,
    withdrawal_rate: Option<f64>,
    annual_return: Option<f64>,
    inflation_rate: Option<f64>,
    inflate_goal: Option<bool>,
}

/// Real-estate and index-fund assumptions share one flat payload so the same
/// keys work for both query strings and JSON bodies.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InvestmentPayload {
    purchase_year: Option<i32>,
    purchase_price: Option<f64>,
    down_payment: Option<f64>,
    all_cash: Option<bool>,
    mortgage_rate: Option<f64>,
    term_years: Option<u32>,
    appreciation_rate: Option<f64>,
    annual_rent: Option<f64>,
    annual_expenses: Option<f64>,
    rent_growth_rate: Option<f64>,
    years_held: Option<u32>,
    closing_costs: Option<f64>,
    renovation_costs: Option<f64>,
    inflation_rate: Option<f64>,
    adjust_for_inflation: Option<bool>,

    index_investment: Option<f64>,
    index_return: Option<f64>,
    dividend_yield: Option<f64>,
    reinvest_dividends: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BudgetPayload {
    annual_income: Option<f64>,
    annual_spending: Option<f64>,
    annual_savings: Option<f64>,
    household: Option<HouseholdType>,
    lifestyle: Option<Lifestyle>,
    location: Option<LocationTier>,
    monthly_expenses: Option<MonthlyExpenses>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn fire_args_from_payload(payload: FirePayload) -> FireArgs {
    let mut args = default_fire_args();
    if let Some(v) = payload.liquid_assets {
        args.liquid_assets = v;
    }
    if let Some(v) = payload.illiquid_assets {
        args.illiquid_assets = v;
    }
    if let Some(v) = payload.include_illiquid {
        args.include_illiquid = v;
    }
    if let Some(v) = payload.annual_savings {
        args.annual_savings = v;
    }
    if let Some(v) = payload.annual_expenses {
        args.annual_expenses = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        args.withdrawal_rate = v;
    }
    if let Some(v) = payload.annual_return {
        args.annual_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    if let Some(v) = payload.inflate_goal {
        args.inflate_goal = v;
    }
    args
}

fn compare_args_from_payload(payload: InvestmentPayload) -> CompareArgs {
    let mut property = default_property_args();
    if payload.purchase_year.is_some() {
        property.purchase_year = payload.purchase_year;
    }
    if let Some(v) = payload.purchase_price {
        property.purchase_price = v;
    }
    if let Some(v) = payload.down_payment {
        property.down_payment = v;
    }
    if let Some(v) = payload.all_cash {
        property.all_cash = v;
    }
    if let Some(v) = payload.mortgage_rate {
        property.mortgage_rate = v;
    }
    if let Some(v) = payload.term_years {
        property.term_years = v;
    }
    if let Some(v) = payload.appreciation_rate {
        property.appreciation_rate = v;
    }
    if let Some(v) = payload.annual_rent {
        property.annual_rent = v;
    }
    if let Some(v) = payload.annual_expenses {
        property.annual_expenses = v;
    }
    if let Some(v) = payload.rent_growth_rate {
        property.rent_growth_rate = v;
    }
    if let Some(v) = payload.years_held {
        property.years_held = v;
    }
    if let Some(v) = payload.closing_costs {
        property.closing_costs = v;
    }
    if let Some(v) = payload.renovation_costs {
        property.renovation_costs = v;
    }
    if let Some(v) = payload.inflation_rate {
        property.inflation_rate = v;
    }
    if let Some(v) = payload.adjust_for_inflation {
        property.nominal = !v;
    }

    let mut market = default_market_args();
    if payload.index_investment.is_some() {
        market.index_investment = payload.index_investment;
    }
    if let Some(v) = payload.index_return {
        market.index_return = v;
    }
    if let Some(v) = payload.dividend_yield {
        market.dividend_yield = v;
    }
    if let Some(v) = payload.reinvest_dividends {
        market.no_reinvest = !v;
    }

    CompareArgs { property, market }
}

fn budget_args_from_payload(payload: BudgetPayload) -> BudgetArgs {
    let mut args = default_budget_args();
    if let Some(v) = payload.annual_income {
        args.annual_income = v;
    }
    if let Some(v) = payload.annual_spending {
        args.annual_spending = v;
    }
    if let Some(v) = payload.annual_savings {
        args.annual_savings = v;
    }
    if payload.household.is_some() {
        args.household = payload.household;
    }
    if let Some(v) = payload.lifestyle {
        args.lifestyle = v;
    }
    if let Some(v) = payload.location {
        args.location = v;
    }
    if let Some(expenses) = payload.monthly_expenses {
        args.expenses = expenses.into_iter().collect::<Vec<(ExpenseCategory, f64)>>();
    }
    args
}

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/fire", get(fire_get_handler).post(fire_post_handler))
        .route(
            "/api/real-estate",
            get(real_estate_get_handler).post(real_estate_post_handler),
        )
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .route(
            "/api/budget",
            get(budget_get_handler).post(budget_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    log::info!("FIRE projection API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn fire_get_handler(Query(payload): Query<FirePayload>) -> Response {
    fire_handler_impl(payload)
}

async fn fire_post_handler(Json(payload): Json<FirePayload>) -> Response {
    fire_handler_impl(payload)
}

fn fire_handler_impl(payload: FirePayload) -> Response {
    let inputs = match build_fire_inputs(fire_args_from_payload(payload)) {
        Ok(inputs) => inputs,
        Err(err) => return input_error_response(err),
    };
    let report = build_fire_report(&inputs);
    log::debug!(
        "fire projection: {} years, reached {}",
        report.years_to_target,
        report.reached
    );
    json_response(StatusCode::OK, report)
}

async fn real_estate_get_handler(Query(payload): Query<InvestmentPayload>) -> Response {
    real_estate_handler_impl(payload)
}

async fn real_estate_post_handler(Json(payload): Json<InvestmentPayload>) -> Response {
    real_estate_handler_impl(payload)
}

fn real_estate_handler_impl(payload: InvestmentPayload) -> Response {
    let args = compare_args_from_payload(payload);
    let scenario = match build_property_scenario(args.property) {
        Ok(scenario) => scenario,
        Err(err) => return input_error_response(err),
    };
    json_response(StatusCode::OK, simulate_real_estate(&scenario))
}

async fn compare_get_handler(Query(payload): Query<InvestmentPayload>) -> Response {
    compare_handler_impl(payload)
}

async fn compare_post_handler(Json(payload): Json<InvestmentPayload>) -> Response {
    compare_handler_impl(payload)
}

fn compare_handler_impl(payload: InvestmentPayload) -> Response {
    let scenario = match build_investment_scenario(compare_args_from_payload(payload)) {
        Ok(scenario) => scenario,
        Err(err) => return input_error_response(err),
    };
    json_response(StatusCode::OK, analyze(&scenario))
}

async fn budget_get_handler(Query(payload): Query<BudgetPayload>) -> Response {
    budget_handler_impl(payload)
}

async fn budget_post_handler(Json(payload): Json<BudgetPayload>) -> Response {
    budget_handler_impl(payload)
}

fn budget_handler_impl(payload: BudgetPayload) -> Response {
    let inputs = match build_budget(budget_args_from_payload(payload)) {
        Ok(inputs) => inputs,
        Err(err) => return input_error_response(err),
    };
    json_response(StatusCode::OK, build_budget_report(inputs))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn input_error_response(err: InputError) -> Response {
    log::warn!("rejected request: {err}");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn fire_inputs_from_json(json: &str) -> Result<FireInputs, String> {
        let payload = serde_json::from_str::<FirePayload>(json)
            .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
        build_fire_inputs(fire_args_from_payload(payload)).map_err(|e| e.to_string())
    }

    fn compare_args_from_json(json: &str) -> CompareArgs {
        let payload = serde_json::from_str::<InvestmentPayload>(json).expect("json should parse");
        compare_args_from_payload(payload)
    }

    #[test]
    fn fire_payload_parses_camel_case_keys() {
        let json = r#"{
          "liquidAssets": 250000,
          "illiquidAssets": 80000,
          "includeIlliquid": true,
          "annualSavings": 42000,
          "annualExpenses": 60000,
          "withdrawalRate": 3.5,
          "annualReturn": 6,
          "inflationRate": 3,
          "inflateGoal": true
        }"#;
        let inputs = fire_inputs_from_json(json).expect("json should parse");

        assert_approx(inputs.liquid_assets, 250_000.0);
        assert_approx(inputs.illiquid_assets, 80_000.0);
        assert!(inputs.include_illiquid);
        assert_approx(inputs.annual_savings, 42_000.0);
        assert_approx(inputs.annual_expenses, 60_000.0);
        assert_approx(inputs.withdrawal_rate, 0.035);
        assert_approx(inputs.annual_return, 0.06);
        assert_approx(inputs.inflation_rate, 0.03);
        assert!(inputs.inflate_goal);
    }

    #[test]
    fn empty_fire_payload_uses_defaults() {
        let inputs = fire_inputs_from_json("{}").expect("defaults are valid");
        assert_approx(inputs.liquid_assets, 100_000.0);
        assert_approx(inputs.withdrawal_rate, 0.04);
        assert!(!inputs.include_illiquid);
    }

    #[test]
    fn fire_payload_rejects_invalid_withdrawal_rate() {
        let err = fire_inputs_from_json(r#"{"withdrawalRate": 0}"#).expect_err("must reject");
        assert!(err.contains("--withdrawal-rate"));
    }

    #[test]
    fn investment_payload_overrides_property_and_market() {
        let args = compare_args_from_json(
            r#"{
              "purchaseYear": 2024,
              "purchasePrice": 550000,
              "downPayment": 20,
              "mortgageRate": 5.5,
              "termYears": 25,
              "rentGrowthRate": -2,
              "yearsHeld": 10,
              "adjustForInflation": false,
              "indexInvestment": 90000,
              "indexReturn": 10,
              "dividendYield": 3,
              "reinvestDividends": false
            }"#,
        );
        let scenario = build_investment_scenario(args).expect("valid scenario");

        assert_eq!(scenario.property.start_year, 2024);
        assert_approx(scenario.property.purchase_price, 550_000.0);
        assert_approx(scenario.property.down_payment, 0.20);
        assert_approx(scenario.property.mortgage_rate, 0.055);
        assert_eq!(scenario.property.term_years, 25);
        assert_approx(scenario.property.rent_growth_rate, -0.02);
        assert_eq!(scenario.property.years_held, 10);
        assert!(!scenario.property.adjust_for_inflation);
        assert_eq!(scenario.market.initial_investment, Some(90_000.0));
        assert_approx(scenario.market.annual_return, 0.10);
        assert_approx(scenario.market.dividend_yield, 0.03);
        assert!(!scenario.market.reinvest_dividends);
    }

    #[test]
    fn investment_payload_all_cash_drops_the_loan() {
        let args = compare_args_from_json(r#"{"allCash": true, "purchaseYear": 2025}"#);
        let scenario = build_property_scenario(args.property).expect("valid scenario");
        let projection = simulate_real_estate(&scenario);
        assert_eq!(projection.loan_amount, 0.0);
        assert_eq!(projection.annual_debt_service, 0.0);
    }

    #[test]
    fn analysis_serializes_with_camel_case_fields() {
        let args = compare_args_from_json(r#"{"purchaseYear": 2025, "yearsHeld": 3}"#);
        let scenario = build_investment_scenario(args).expect("valid scenario");
        let value = serde_json::to_value(analyze(&scenario)).expect("serializable");

        let rows = value["comparison"]["rows"].as_array().expect("rows");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["year"], 2025);
        assert!(rows[0].get("realEstateCumulative").is_some());
        assert!(value["comparison"].get("breakEvenYear").is_some());
        assert!(value["realEstate"]["equity"][0].get("propertyValue").is_some());
        assert!(value["summary"].get("finalLeader").is_some());
    }

    #[test]
    fn budget_payload_falls_back_to_default_savings() {
        let payload = serde_json::from_str::<BudgetPayload>(
            r#"{"annualIncome": 100000, "annualSpending": 60000}"#,
        )
        .expect("json should parse");
        let inputs = build_budget(budget_args_from_payload(payload)).expect("valid budget");
        let summary = build_budget_report(inputs).summary;
        assert_approx(summary.annual_savings, 30_000.0);
        assert_approx(summary.buffer, 10_000.0);
        assert!(summary.supports_plan);
    }

    #[test]
    fn budget_payload_applies_template_and_monthly_overrides() {
        let payload = serde_json::from_str::<BudgetPayload>(
            r#"{
              "annualIncome": 120000,
              "household": "retiree",
              "lifestyle": "lean",
              "location": "rural",
              "monthlyExpenses": {"housing": 1000, "travel": 250}
            }"#,
        )
        .expect("json should parse");
        let inputs = build_budget(budget_args_from_payload(payload)).expect("valid budget");
        let value = serde_json::to_value(build_budget_report(inputs)).expect("serializable");

        assert_eq!(value["expenses"]["housing"], 1000.0);
        assert_eq!(value["expenses"]["travel"], 250.0);
        // 500 * 0.85 from the retiree lean template
        assert_eq!(value["expenses"]["food"], 425.0);
        assert_eq!(value["breakdown"]["groups"][0]["group"], "essentials");
        let annual_total = value["breakdown"]["annualTotal"].as_f64().expect("number");
        assert_eq!(value["summary"]["annualSpending"].as_f64(), Some(annual_total));
    }

    #[test]
    fn budget_payload_rejects_unknown_category() {
        let json = r#"{"monthlyExpenses": {"yacht": 10}}"#;
        assert!(serde_json::from_str::<BudgetPayload>(json).is_err());
    }

    #[test]
    fn huge_purchase_year_is_rejected_before_simulating() {
        let args = compare_args_from_json(r#"{"purchaseYear": 2147483647, "yearsHeld": 2}"#);
        let err = build_property_scenario(args.property).expect_err("must reject");
        assert!(matches!(
            err,
            InputError::OutOfRange {
                flag: "--purchase-year",
                ..
            }
        ));
    }

    #[test]
    fn error_responses_carry_no_store_header() {
        let response = input_error_response(InputError::Negative {
            flag: "--annual-rent",
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
    }
}
