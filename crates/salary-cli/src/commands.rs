use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use salary_cli::demo::demo_inputs;
use salary_cli::logging::redact_value;
use salary_core::{PredictionEngine, Source};
use salary_map::MatchMethod;
use salary_model::{BlendWeights, PredictionBreakdown, PredictionInput};
use salary_report::{read_batch_csv, write_breakdowns_csv, write_breakdowns_json};
use salary_standards::{
    DoctorReport, SalaryTables, StandardsRegistry, standards_root, standards_root_from_env,
};

use crate::cli::{
    BatchArgs, DemoArgs, DoctorArgs, OutputArgs, PredictArgs, TablesArgs, TablesSource, WeightArgs,
};
use crate::summary::{print_batch_summary, print_breakdown, print_tables};

pub fn run_predict(args: &PredictArgs) -> Result<()> {
    let engine = build_engine(&args.tables, args.weights)?;
    let mut input = PredictionInput::new(
        args.role.as_str(),
        args.level.as_str(),
        args.years,
        args.location.as_str(),
    )
    .with_skills(args.skills.iter().map(String::as_str));
    if let Some(description) = &args.description {
        input = input.with_description(description.as_str());
    }

    let breakdowns = predict_all(&engine, &[input]);
    write_outputs(&args.output, &breakdowns)?;

    if args.json {
        let json = serde_json::to_string_pretty(&breakdowns[0]).context("serialize breakdown")?;
        println!("{json}");
    } else {
        print_breakdown(&breakdowns[0]);
    }
    Ok(())
}

pub fn run_batch(args: &BatchArgs) -> Result<()> {
    let engine = build_engine(&args.tables, args.weights)?;
    let inputs = read_batch_csv(&args.input)
        .with_context(|| format!("read batch file {}", args.input.display()))?;
    info!(path = %args.input.display(), rows = inputs.len(), "loaded batch requests");

    let breakdowns = predict_all(&engine, &inputs);
    write_outputs(&args.output, &breakdowns)?;
    print_batch_summary(&breakdowns);
    Ok(())
}

pub fn run_demo(args: &DemoArgs) -> Result<()> {
    let engine = build_engine(&args.tables, args.weights)?;
    let breakdowns = predict_all(&engine, &demo_inputs());
    write_outputs(&args.output, &breakdowns)?;
    for breakdown in &breakdowns {
        print_breakdown(breakdown);
        println!();
    }
    print_batch_summary(&breakdowns);
    Ok(())
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let tables = load_tables(&args.tables)?;
    print_tables(&tables);
    Ok(())
}

pub fn run_doctor(args: &DoctorArgs) -> Result<()> {
    let standards_dir = args
        .standards
        .clone()
        .or_else(standards_root_from_env)
        .unwrap_or_else(standards_root);
    let (registry, summary) = StandardsRegistry::verify_and_load(&standards_dir)
        .with_context(|| format!("verify standards in {}", standards_dir.display()))?;
    let report = DoctorReport::from_verify_summary(&summary, registry.files.clone());
    let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
    println!("{json}");
    Ok(())
}

/// Tables from `--standards`, then `$SALARY_STANDARDS_DIR`, then the built-in guide.
fn load_tables(source: &TablesSource) -> Result<SalaryTables> {
    let Some(dir) = source.standards.clone().or_else(standards_root_from_env) else {
        return Ok(SalaryTables::builtin());
    };
    let (registry, _summary) = StandardsRegistry::verify_and_load(&dir)
        .with_context(|| format!("verify standards in {}", dir.display()))?;
    Ok(registry.into_tables())
}

fn build_engine(source: &TablesSource, weights: WeightArgs) -> Result<PredictionEngine> {
    let tables = load_tables(source)?;
    let weights = BlendWeights::new(weights.skills, weights.geo, weights.regression)
        .context("invalid blend weights")?;
    Ok(PredictionEngine::new(tables, weights))
}

fn predict_all(engine: &PredictionEngine, inputs: &[PredictionInput]) -> Vec<PredictionBreakdown> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let span = info_span!("request", index);
            let _guard = span.enter();
            info!(
                role = %input.role,
                level = %input.level,
                location = %input.location,
                description = input.description.as_deref().map(redact_value),
                "predicting"
            );
            let request = engine.resolve(input);
            if request.role_source == Source::Request(MatchMethod::Fallback) {
                suggest_known_role(engine, input);
            }
            engine.predict_resolved(input, request)
        })
        .collect()
}

/// Warn with the closest known role phrase for a role that fell back to the default.
fn suggest_known_role(engine: &PredictionEngine, input: &PredictionInput) {
    if input.role.trim().is_empty() {
        return;
    }
    if let Some(suggestion) = engine.normalizer().suggest_role(&input.role) {
        warn!(
            role = %input.role,
            suggestion = %suggestion.phrase,
            similarity = suggestion.similarity,
            "role not recognized; did you mean this?"
        );
    }
}

fn write_outputs(output: &OutputArgs, breakdowns: &[PredictionBreakdown]) -> Result<()> {
    if let Some(path) = &output.csv {
        write_breakdowns_csv(path, breakdowns)
            .with_context(|| format!("write CSV report {}", path.display()))?;
        println!("CSV: {}", path.display());
    }
    if let Some(path) = &output.json {
        write_breakdowns_json(path, breakdowns)
            .with_context(|| format!("write JSON report {}", path.display()))?;
        println!("JSON: {}", path.display());
    }
    Ok(())
}
