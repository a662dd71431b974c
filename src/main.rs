use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kira_gentest::cascade::KeywordPolicy;
use kira_gentest::cli::{Cli, Commands};
use kira_gentest::ctx::{Ctx, SubsetPaths};
use kira_gentest::io;
use kira_gentest::io::reports::ReportColumns;
use kira_gentest::labels::StageKind;
use kira_gentest::pipeline::Pipeline;
use kira_gentest::pipeline::stage0_scaffold::Stage0Scaffold;
use kira_gentest::pipeline::stage1_input::Stage1Input;
use kira_gentest::pipeline::stage2_models::Stage2Models;
use kira_gentest::pipeline::stage3_classify::Stage3Classify;
use kira_gentest::pipeline::stage4_cases::Stage4Cases;
use kira_gentest::pipeline::stage5_output::Stage5Output;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let mut ctx = Ctx::new(
                Some(args.input),
                args.out,
                args.models,
                args.patterns,
                args.marker.markers(),
            );
            ctx.policy = if args.keyword_gate {
                KeywordPolicy::Gate
            } else {
                KeywordPolicy::Ensemble
            };
            ctx.threads = args.threads;
            ctx.write_json = args.json;
            ctx.columns = ReportColumns {
                id: args.id_column,
                text: args.text_column,
            };
            ctx.subset = SubsetPaths {
                records: args.only_records,
                patients: args.only_patients,
                skip_cases: args.skip_cases,
            };

            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage1Input::new()),
                Box::new(Stage2Models::new()),
                Box::new(Stage3Classify::new()),
                Box::new(Stage4Cases::new()),
                Box::new(Stage5Output::new()),
            ]);
            pipeline.run(&mut ctx)?;

            print_summary(&ctx)?;
        }
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.input,
                std::path::PathBuf::from("."),
                args.models,
                args.patterns,
                args.marker.markers(),
            );
            ctx.columns = ReportColumns {
                id: args.id_column,
                text: args.text_column,
            };

            let pipeline = Pipeline::new(vec![
                Box::new(Stage1Input::new()),
                Box::new(Stage2Models::new()),
            ]);
            pipeline.run(&mut ctx)?;

            print_validate_summary(&ctx)?;
        }
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}

fn print_validate_summary(ctx: &Ctx) -> Result<()> {
    let store = ctx.models.as_ref().context("models not loaded")?;
    let patterns = ctx.patterns.as_ref().context("patterns not loaded")?;
    println!("kira-gentest validate ok");
    println!(
        "patterns: {} test rules, {} section rules, {} keyword rules",
        patterns.tests.len(),
        patterns.sections.len(),
        patterns.keywords.len()
    );
    for marker in store.markers() {
        println!("{}: {} stages loaded", marker, StageKind::ALL.len());
    }
    if ctx.input.is_some() {
        println!("reports: {}", ctx.reports.len());
        println!("rows: {}", ctx.rows_read);
    }
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
