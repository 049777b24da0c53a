//! The `generate`, `check` and `inspect` commands

use crate::CommonArgs;
use crate::manifest::{LoadedModel, Manifest, nullable_marker};
use crate::source::SourceScanner;
use anyhow::{Context, Result};
use moshigen_core::strategy::FieldPlan;
use moshigen_core::{
    CodeSink, DecodePlan, DecodeStrategy, FileSink, GenerationRound, GeneratorConfig, MemorySink,
    RoundReport,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Load target types from the manifest or Rust source named in `common`
pub fn load(common: &CommonArgs) -> Result<LoadedModel> {
    let package = common.package.as_deref();

    if let Some(path) = &common.input.model {
        if common.config.is_some() {
            tracing::warn!("--config is ignored with --model; use the [generator] table");
        }
        let manifest = Manifest::from_file(path)?;
        manifest
            .validate()
            .with_context(|| format!("Invalid manifest: {path:?}"))?;
        return manifest.into_model(package);
    }

    let Some(path) = &common.input.source else {
        anyhow::bail!("Either --model or --source is required");
    };

    let config = match &common.config {
        Some(config_path) => load_config(config_path)?,
        None => GeneratorConfig::default(),
    };

    let scanner = SourceScanner::new(common.package.clone(), nullable_marker(&config));
    let (targets, registrations) = scanner.scan_file(path)?;

    Ok(LoadedModel {
        config,
        targets,
        registrations,
    })
}

fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read config: {path:?}"))?;
    GeneratorConfig::from_json(&bytes).with_context(|| format!("Failed to parse config: {path:?}"))
}

/// Generate adapters and factories
pub fn run(
    common: &CommonArgs,
    output: Option<PathBuf>,
    dry_run: bool,
    trace_performance: bool,
) -> Result<()> {
    let model = load(common)?;
    let round = GenerationRound::new(model.config.clone()).trace_performance(trace_performance);

    let report = if dry_run {
        let mut sink = MemorySink::new(model.config.indent.clone());
        let report = execute(&round, &model, &mut sink);
        for file in sink.files() {
            println!("// {}", file.relative_path().display());
            println!("{}", file.render(&model.config.indent));
        }
        report
    } else {
        let output = output.context("--output is required unless --dry-run is given")?;
        std::fs::create_dir_all(&output)
            .with_context(|| format!("Failed to create output directory: {output:?}"))?;

        let mut sink = FileSink::new(&output, model.config.indent.clone());
        let report = execute(&round, &model, &mut sink);
        println!("Wrote {} file(s) to {}", sink.written().len(), output.display());
        report
    };

    print!("{}", summarize(&report));

    if !report.is_success() {
        anyhow::bail!("{} type(s) failed to generate", report.failures.len());
    }

    Ok(())
}

/// Run generation in memory and report problems
pub fn check(common: &CommonArgs) -> Result<()> {
    let model = load(common)?;
    let round = GenerationRound::new(model.config.clone());

    let mut sink = MemorySink::new(model.config.indent.clone());
    let report = execute(&round, &model, &mut sink);

    print!("{}", summarize(&report));

    if !report.is_success() {
        anyhow::bail!("{} type(s) failed to generate", report.failures.len());
    }

    println!("\n✓ All {} type(s) generate cleanly", report.adapter_count());
    Ok(())
}

/// Print how every target type will be decoded
pub fn inspect(common: &CommonArgs) -> Result<()> {
    let model = load(common)?;
    let round = GenerationRound::new(model.config.clone());

    let mut sink = MemorySink::new(model.config.indent.clone());
    let report = execute(&round, &model, &mut sink);

    for plan in &report.plans {
        print!("{}", describe_plan(plan));
    }
    for failure in &report.failures {
        println!("{}: {failure}", failure.type_name());
    }

    Ok(())
}

fn execute(round: &GenerationRound, model: &LoadedModel, sink: &mut dyn CodeSink) -> RoundReport {
    tracing::debug!(
        targets = model.targets.len(),
        factories = model.registrations.len(),
        "starting generation round"
    );
    round.run(&model.targets, &model.registrations, sink)
}

/// Generated units, failures and warnings of a round
fn summarize(report: &RoundReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Generated {} unit(s):", report.generated.len());
    for unit in &report.generated {
        let _ = writeln!(out, "  {}", unit.name);
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "\nFailures:");
        for failure in &report.failures {
            let _ = writeln!(out, "  error: {failure}");
        }
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  warning: {warning}");
        }
    }

    for timing in &report.timings {
        let _ = writeln!(
            out,
            "==PERFORMANCE== {}: {:.3}ms",
            timing.phase,
            timing.elapsed.as_secs_f64() * 1000.0
        );
    }

    out
}

/// One line per field: parameter, JSON key, read strategy
fn describe_plan(plan: &DecodePlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.target);
    for field_plan in &plan.fields {
        let _ = writeln!(out, "  {}", describe_field(field_plan));
    }
    out
}

fn describe_field(plan: &FieldPlan) -> String {
    let field = &plan.field;
    let read = describe_strategy(&plan.strategy);
    let nullable = if field.nullable { " (nullable)" } else { "" };

    format!(
        "{} {} <- \"{}\": {read}{nullable}",
        field.ty, field.name, field.json_name
    )
}

fn describe_strategy(strategy: &DecodeStrategy) -> String {
    match strategy {
        DecodeStrategy::Primitive {
            method,
            narrow_to: Some(narrow),
            ..
        } => format!("reader.{}() as {narrow}", method.name()),
        DecodeStrategy::Primitive { method, .. } => format!("reader.{}()", method.name()),
        DecodeStrategy::String => "reader.nextString()".to_string(),
        DecodeStrategy::Delegated { expr, .. } => format!("moshi.adapter({expr})"),
    }
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
