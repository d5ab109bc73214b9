//! Project Economics CLI
//!
//! Command-line interface for estimates, financial metrics, risk scoring and
//! PDF reports

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use project_economics::api::{CocomoResponse, FinancialResponse, RiskResponse};
use project_economics::financial::DEFAULT_DISCOUNT_RATE;
use project_economics::presentation::{fixed2, payback_text};
use project_economics::request::ReportRequest;
use project_economics::risk::{load_risk_register, parse_risk_list, score_all};
use project_economics::{
    analyze, estimate, EstimationInput, FinancialInput, ProjectMode, ReportAssembler, ReportConfig,
    RiskItem,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "project_economics", version, about = "Software project economics calculator")]
struct Cli {
    /// JSON file with report labels (title, currency_label, filename, never_label)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print API-shaped JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Basic COCOMO effort and schedule estimate
    Cocomo(EstimationArgs),
    /// ROI, NPV and payback period
    Financial(FinancialArgs),
    /// Score and categorize risks
    Risk(RiskArgs),
    /// Write the combined PDF report
    Report {
        #[command(flatten)]
        estimation: EstimationArgs,
        #[command(flatten)]
        financial: FinancialArgs,
        #[command(flatten)]
        risks: RiskArgs,
        /// Output path; defaults to the configured filename
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct EstimationArgs {
    /// Project size in thousands of lines of code
    #[arg(long, default_value_t = 0.0)]
    kloc: f64,
    /// organic, semi-detached or embedded
    #[arg(long, default_value = "organic")]
    project_type: String,
}

#[derive(Args, Debug)]
struct FinancialArgs {
    #[arg(long, default_value_t = 0.0)]
    cost: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    annual_benefit: f64,
    #[arg(long, default_value_t = 5)]
    years: u32,
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE)]
    discount_rate: f64,
}

#[derive(Args, Debug)]
struct RiskArgs {
    /// Risk as name|probability|impact, comma separated or repeated
    #[arg(long = "risk")]
    risks: Vec<String>,
    /// CSV risk register with name,probability,impact columns
    #[arg(long)]
    risks_csv: Option<PathBuf>,
}

impl EstimationArgs {
    fn input(&self) -> Result<EstimationInput> {
        Ok(EstimationInput::new(self.kloc, ProjectMode::parse(&self.project_type))?)
    }
}

impl FinancialArgs {
    fn input(&self) -> Result<FinancialInput> {
        Ok(FinancialInput::new(self.cost, self.annual_benefit, self.years, self.discount_rate)?)
    }
}

impl RiskArgs {
    fn items(&self) -> Result<Vec<RiskItem>> {
        let mut items = Vec::new();
        if let Some(path) = &self.risks_csv {
            items.extend(load_risk_register(path).map_err(|e| anyhow!("{}", e))?);
        }
        for raw in &self.risks {
            items.extend(parse_risk_list(raw));
        }
        Ok(items)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ReportConfig::from_json_path(path)
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ReportConfig::default(),
    };

    match cli.command {
        Command::Cocomo(args) => {
            let input = args.input()?;
            let result = estimate(&input);
            if cli.json {
                return print_json(&CocomoResponse::from(&result));
            }
            println!("COCOMO ({}, {} KLOC)", input.mode, fixed2(input.size_kloc));
            println!("  Effort:           {:>10} person-months", fixed2(result.effort_person_months));
            println!("  Development Time: {:>10} months", fixed2(result.dev_time_months));
            println!("  Average Staff:    {:>10}", fixed2(result.average_staff));
        }
        Command::Financial(args) => {
            let result = analyze(&args.input()?);
            if cli.json {
                return print_json(&FinancialResponse::from(&result));
            }
            println!("Financial Analysis");
            println!("  ROI:            {:>12}%", fixed2(result.roi_percent));
            println!("  NPV:            {:>12} {}", fixed2(result.npv), config.currency_label);
            println!("  Payback Period: {:>12}", payback_text(result.payback_years, &config.never_label));
        }
        Command::Risk(args) => {
            let results = score_all(&args.items()?);
            if cli.json {
                return print_json(&RiskResponse { risks: results });
            }
            println!("{:<40} {:>5} {:>8}", "Risk", "Score", "Category");
            println!("{}", "-".repeat(55));
            for risk in &results {
                println!("{:<40} {:>5} {:>8}", risk.name, risk.score, risk.category);
            }
        }
        Command::Report { estimation, financial, risks, output } => {
            let request = ReportRequest {
                estimation: estimation.input()?,
                financial: financial.input()?,
                risks: risks.items()?,
            };
            let bytes = ReportAssembler::new(config.clone())
                .generate(&request)
                .context("Failed to render report")?;

            let path = output.unwrap_or_else(|| PathBuf::from(&config.filename));
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report written to: {} ({} bytes)", path.display(), bytes.len());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}
