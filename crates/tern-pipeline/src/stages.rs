use crate::error::{PipelineDiagnostics, PipelineError};
use crate::pipeline::PipelineStage;
use tern_core::ast::Program;
use tern_core::diagnostics::{describe_location, Diagnostic};
use tern_core::source_map::SourceFile;
use tern_core::types::Ty;
use tern_lang::{parse_program, resolve_program};
use tern_typing::{AstTypeInferencer, TypingOptions};

pub struct ParsedSource {
    pub file: SourceFile,
    pub program: Program,
}

pub struct ResolvedSource {
    pub file: SourceFile,
    pub program: Program,
    /// Handed to inference, which refuses to run when it holds errors.
    pub resolution: Vec<Diagnostic>,
}

pub struct TypedSource {
    pub file: SourceFile,
    pub program: Program,
    pub program_ty: Option<Ty>,
    pub skipped: bool,
}

pub struct ParseStage;

impl PipelineStage for ParseStage {
    type SrcCtx = SourceFile;
    type DstCtx = ParsedSource;

    fn name(&self) -> &'static str {
        "parse"
    }

    fn run(
        &self,
        file: SourceFile,
        _diagnostics: &mut PipelineDiagnostics,
    ) -> Result<ParsedSource, PipelineError> {
        match parse_program(&file.source) {
            Ok(program) => Ok(ParsedSource { file, program }),
            Err(err) => {
                let location = describe_location(err.span(), Some(&file));
                Err(PipelineError::new(
                    self.name(),
                    format!("{} at {}", err, location),
                ))
            }
        }
    }
}

pub struct ResolveStage;

impl PipelineStage for ResolveStage {
    type SrcCtx = ParsedSource;
    type DstCtx = ResolvedSource;

    fn name(&self) -> &'static str {
        "resolve"
    }

    fn run(
        &self,
        context: ParsedSource,
        _diagnostics: &mut PipelineDiagnostics,
    ) -> Result<ResolvedSource, PipelineError> {
        let resolution = resolve_program(&context.program);
        Ok(ResolvedSource {
            file: context.file,
            program: context.program,
            resolution,
        })
    }
}

pub struct TypingStage {
    pub options: TypingOptions,
}

impl TypingStage {
    pub fn new(options: TypingOptions) -> Self {
        Self { options }
    }
}

impl PipelineStage for TypingStage {
    type SrcCtx = ResolvedSource;
    type DstCtx = TypedSource;

    fn name(&self) -> &'static str {
        "typing"
    }

    fn run(
        &self,
        context: ResolvedSource,
        diagnostics: &mut PipelineDiagnostics,
    ) -> Result<TypedSource, PipelineError> {
        let ResolvedSource {
            file,
            mut program,
            resolution,
        } = context;
        let outcome =
            AstTypeInferencer::with_options(self.options).infer_resolved(&mut program, resolution);
        diagnostics.extend(outcome.diagnostics);
        Ok(TypedSource {
            file,
            program,
            program_ty: outcome.program_ty,
            skipped: outcome.skipped,
        })
    }
}
