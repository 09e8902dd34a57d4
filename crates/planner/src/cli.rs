//! CLI wiring for the upconv toolkit.

use crate::eval::{CaseSuite, SuiteReport};
use crate::table::{render_table, TableStyle};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use upconv_params::{ConvTransposeParams, SolveRequest};

#[derive(Parser, Debug)]
#[command(
    name = "upconv",
    about = "Stride/padding/output-padding solver for exact-multiple ConvTranspose3d layers"
)]
pub struct Cli {
    /// Render tables without ANSI colors.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a single input size / multiplier / kernel size combination.
    Solve {
        #[arg(long, allow_negative_numbers = true)]
        input: i64,
        #[arg(long, allow_negative_numbers = true)]
        multiplier: i64,
        #[arg(long, allow_negative_numbers = true)]
        kernel: i64,
        /// Restrict the search to output_padding = 0.
        #[arg(long, default_value_t = false)]
        no_output_padding: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the table for the built-in demonstration cases.
    Demo,
    /// Run a case suite file, print its table and optionally write a JSON report.
    Suite {
        /// JSON case suite; defaults to the demonstration cases.
        #[arg(long)]
        cases: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        baseline: Option<PathBuf>,
    },
}

pub fn run_cli(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let Cli { no_color, command } = cli;
    if no_color {
        colored::control::set_override(false);
    }
    let style = TableStyle {
        color: !no_color,
        ..TableStyle::default()
    };

    let stdout = io::stdout();
    execute(command, &style, &mut stdout.lock())
}

/// Run one subcommand, writing everything it prints to `out`.
pub fn execute(command: Command, style: &TableStyle, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Solve {
            input,
            multiplier,
            kernel,
            no_output_padding,
            format,
        } => {
            let request =
                SolveRequest::new(input, multiplier, kernel).with_output_padding(!no_output_padding);
            let params = request.solve()?;
            writeln!(out, "{}", solve_summary(&request, params, format)?)?;
        }
        Command::Demo => {
            let report = CaseSuite::demo().run()?;
            writeln!(out, "{}", render_table(&report, style))?;
        }
        Command::Suite {
            cases,
            output,
            baseline,
        } => {
            let suite = match cases {
                Some(path) => {
                    info!(path = %path.display(), "loading case suite");
                    CaseSuite::load(path)?
                }
                None => CaseSuite::demo(),
            };
            let report = suite.run()?;
            writeln!(out, "{}", render_table(&report, style))?;
            writeln!(
                out,
                "cases={}, solved={}, generated_at={}",
                report.cases.len(),
                report.solved(),
                report.generated_at_unix_ms
            )?;

            if let Some(path) = baseline {
                if path.exists() {
                    let baseline_report = SuiteReport::load(&path)?;
                    for (name, change) in report.diff(&baseline_report) {
                        writeln!(
                            out,
                            "Δ {}: {} -> {}",
                            name,
                            outcome_label(change.baseline),
                            outcome_label(change.current)
                        )?;
                    }
                } else {
                    info!(path = %path.display(), "baseline report not found; skipping diff");
                }
            }

            if let Some(path) = output {
                report.save(path)?;
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct SolveSummary<'a> {
    request: &'a SolveRequest,
    params: Option<ConvTransposeParams>,
    output_size: Option<i128>,
}

/// Single-request answer in the requested format.
pub fn solve_summary(
    request: &SolveRequest,
    params: Option<ConvTransposeParams>,
    format: OutputFormat,
) -> Result<String> {
    let output_size = params.map(|p| p.output_size(request.input_size, request.kernel_size));
    let summary = match format {
        OutputFormat::Text => match (params, output_size) {
            (Some(params), Some(output)) => format!("{params} output={output}"),
            _ => "no solution".to_string(),
        },
        OutputFormat::Json => serde_json::to_string_pretty(&SolveSummary {
            request,
            params,
            output_size,
        })?,
    };
    Ok(summary)
}

fn outcome_label(outcome: &crate::eval::CaseOutcome) -> String {
    match outcome.params {
        Some(params) => format!("{:?} ({})", outcome.status, params),
        None => format!("{:?}", outcome.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve_command() {
        let cli = Cli::try_parse_from([
            "upconv",
            "solve",
            "--input",
            "32",
            "--multiplier",
            "2",
            "--kernel",
            "3",
            "--no-output-padding",
        ])
        .unwrap();
        match cli.command {
            Command::Solve {
                input,
                multiplier,
                kernel,
                no_output_padding,
                format,
            } => {
                assert_eq!((input, multiplier, kernel), (32, 2, 3));
                assert!(no_output_padding);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_text_summary() {
        let request = SolveRequest::new(32, 2, 3);
        let summary = solve_summary(&request, request.solve().unwrap(), OutputFormat::Text).unwrap();
        assert_eq!(summary, "stride=2 padding=1 output_padding=1 output=64");

        let request = SolveRequest::new(16, 4, 2);
        let summary = solve_summary(&request, request.solve().unwrap(), OutputFormat::Text).unwrap();
        assert_eq!(summary, "no solution");
    }

    #[test]
    fn test_json_summary() {
        let request = SolveRequest::new(128, 2, 1);
        let summary = solve_summary(&request, request.solve().unwrap(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(value["params"]["output_padding"], 1);
        assert_eq!(value["output_size"], 256);
        assert_eq!(value["request"]["allow_output_padding"], true);

        let request = SolveRequest::new(128, 4, 2);
        let summary = solve_summary(&request, None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&summary).unwrap();
        assert!(value["params"].is_null());
    }
}
