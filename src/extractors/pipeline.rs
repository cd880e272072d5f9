// src/extractors/pipeline.rs
use crate::extractors::compiler::{MatcherCompiler, MatcherLimits};
use crate::extractors::extractor::{extract, MatchResult};
use crate::extractors::template::{substitute, ReplacementTemplate};
use crate::utils::error::PipelineError;

/// Caller supplied parameters for one extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest<'a> {
    pub pattern: &'a str,
    pub flags: &'a str,
    pub template: Option<&'a str>,
    pub no_match: Option<&'a str>,
}

/// Compile, match, then substitute or fall back.
///
/// Holds only configuration; every call builds its own matcher, so a single
/// pipeline can serve concurrent callers.
pub struct ExtractionPipeline {
    compiler: MatcherCompiler,
}

impl ExtractionPipeline {
    pub fn new(limits: MatcherLimits) -> Self {
        Self { compiler: MatcherCompiler::new(limits) }
    }

    pub fn run(&self, document: &[u8], request: &ExtractionRequest<'_>) -> Result<String, PipelineError> {
        let matcher = self
            .compiler
            .compile(request.pattern, request.flags)
            .map_err(|cause| PipelineError::InvalidRegex { cause })?;

        let value = match extract(&matcher, document) {
            MatchResult::Absent => {
                let fallback = request.no_match.unwrap_or_default();
                tracing::debug!("No match, using fallback {:?}", fallback);
                fallback.to_string()
            }
            MatchResult::Present(matched) => {
                let template = request
                    .template
                    .map(|t| ReplacementTemplate::parse(t, &matcher));
                substitute(&matched, template.as_ref(), &matcher)
            }
        };

        tracing::debug!("Resolved value {:?}", value);
        Ok(value)
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(MatcherLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CompileError;

    const DOC: &[u8] = b"Every month it serves 2.4 billion images";

    fn run(request: ExtractionRequest<'_>) -> Result<String, PipelineError> {
        ExtractionPipeline::default().run(DOC, &request)
    }

    #[test]
    fn test_end_to_end_with_template() {
        let out = run(ExtractionRequest {
            pattern: "serves (.*?) billion",
            template: Some("$1"),
            ..Default::default()
        });
        assert_eq!(out.unwrap(), "2.4");
    }

    #[test]
    fn test_full_match_without_template() {
        let out = run(ExtractionRequest { pattern: "serves (.*?) billion", ..Default::default() });
        assert_eq!(out.unwrap(), "serves 2.4 billion");
    }

    #[test]
    fn test_no_match_uses_fallback() {
        let out = run(ExtractionRequest {
            pattern: "nonexistent",
            template: Some("$1"),
            no_match: Some("n/a"),
            ..Default::default()
        });
        assert_eq!(out.unwrap(), "n/a");
    }

    #[test]
    fn test_no_match_defaults_to_empty() {
        let out = run(ExtractionRequest { pattern: "nonexistent", ..Default::default() });
        assert_eq!(out.unwrap(), "");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = run(ExtractionRequest { pattern: "serves (.*? billion", ..Default::default() })
            .unwrap_err();
        let PipelineError::InvalidRegex { cause } = err;
        assert!(matches!(cause, CompileError::InvalidPattern(_)));
    }

    #[test]
    fn test_invalid_flag_is_reported() {
        let err = run(ExtractionRequest { pattern: "serves", flags: "iq", ..Default::default() })
            .unwrap_err();
        assert_eq!(err, PipelineError::InvalidRegex { cause: CompileError::UnsupportedFlag('q') });
    }

    #[test]
    fn test_flags_reach_the_matcher() {
        let out = run(ExtractionRequest {
            pattern: "EVERY (\\w+)",
            flags: "i",
            template: Some("$1"),
            ..Default::default()
        });
        assert_eq!(out.unwrap(), "month");
    }

    #[test]
    fn test_calls_are_independent() {
        let pipeline = ExtractionPipeline::default();
        let first = ExtractionRequest { pattern: r"(\d+)\.(\d+)", template: Some("$2"), ..Default::default() };
        let second = ExtractionRequest { pattern: "month", ..Default::default() };
        assert_eq!(pipeline.run(DOC, &first).unwrap(), "4");
        assert_eq!(pipeline.run(DOC, &second).unwrap(), "month");
        assert_eq!(pipeline.run(DOC, &first).unwrap(), "4");
    }

    #[test]
    fn test_concurrent_runs_share_nothing() {
        let pipeline = ExtractionPipeline::default();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let pipeline = &pipeline;
                    s.spawn(move || {
                        let doc = format!("build {} ok", i);
                        let request = ExtractionRequest {
                            pattern: r"build (\d+)",
                            template: Some("#$1"),
                            ..Default::default()
                        };
                        pipeline.run(doc.as_bytes(), &request).unwrap()
                    })
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                assert_eq!(handle.join().unwrap(), format!("#{}", i));
            }
        });
    }
}
