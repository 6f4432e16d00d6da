use clap::{Parser, Subcommand};
use serde::Serialize;

use super::args::{
    BudgetArgs, CompareArgs, FireArgs, PropertyArgs, build_budget, build_fire_inputs,
    build_investment_scenario, build_property_scenario,
};
use super::error::AppError;
use super::report::{build_budget_report, build_fire_report};
use super::run_http_server;
use crate::core::{analyze, simulate_real_estate};

#[derive(Parser, Debug)]
#[command(
    name = "firepath",
    version,
    about = "Financial-independence projections and real estate vs index fund comparisons"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Years until net worth reaches the FIRE number.
    Fire(FireArgs),
    /// Amortization, equity and cash flow of a rental property.
    RealEstate(PropertyArgs),
    /// Rental property against an index fund, year by year.
    Compare(CompareArgs),
    /// Whether income covers spending plus the planned savings.
    Budget(BudgetArgs),
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Serve { port } => run_http_server(port).await?,
        Command::Fire(args) => {
            let inputs = build_fire_inputs(args)?;
            print_json(&build_fire_report(&inputs))?;
        }
        Command::RealEstate(args) => {
            let scenario = build_property_scenario(args)?;
            print_json(&simulate_real_estate(&scenario))?;
        }
        Command::Compare(args) => {
            let scenario = build_investment_scenario(args)?;
            print_json(&analyze(&scenario))?;
        }
        Command::Budget(args) => {
            let inputs = build_budget(args)?;
            print_json(&build_budget_report(inputs))?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
