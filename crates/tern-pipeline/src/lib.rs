pub mod error;
pub mod pipeline;
pub mod report;
pub mod stages;

pub use error::{PipelineDiagnostics, PipelineError};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineStage};
pub use report::CheckReport;
pub use stages::{ParseStage, ResolveStage, TypedSource, TypingStage};

use eyre::WrapErr;
use std::path::{Path, PathBuf};
use tern_core::source_map::SourceFile;
use tern_typing::TypingOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a `tracing` subscriber honouring `RUST_LOG`, falling back to
/// `default_level`. Later calls are no-ops.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true);
    let _ = tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .try_init();
}

/// parse -> resolve -> typing
pub fn build_pipeline(options: TypingOptions) -> Pipeline<SourceFile, TypedSource> {
    PipelineBuilder::new()
        .add_stage(ParseStage)
        .add_stage(ResolveStage)
        .add_stage(TypingStage::new(options))
        .build()
}

pub fn check_source(name: impl Into<PathBuf>, source: &str) -> eyre::Result<CheckReport> {
    check_source_with(name, source, TypingOptions::from_env())
}

pub fn check_source_with(
    name: impl Into<PathBuf>,
    source: &str,
    options: TypingOptions,
) -> eyre::Result<CheckReport> {
    check(SourceFile::new(name, source), options)
}

pub fn check_file(path: &Path, options: TypingOptions) -> eyre::Result<CheckReport> {
    let file = SourceFile::load(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    check(file, options)
}

fn check(file: SourceFile, options: TypingOptions) -> eyre::Result<CheckReport> {
    let name = file.path.display().to_string();
    tracing::info!("checking {}", name);
    let mut diagnostics = PipelineDiagnostics::default();
    let typed = build_pipeline(options)
        .run(file, &mut diagnostics)
        .wrap_err_with(|| format!("failed to check {}", name))?;
    Ok(CheckReport {
        file: typed.file,
        program: typed.program,
        diagnostics: diagnostics.into_items(),
        program_ty: typed.program_ty,
        skipped: typed.skipped,
    })
}
