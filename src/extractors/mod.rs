pub mod compiler;
pub mod extractor;
pub mod flags;
pub mod pipeline;
pub mod template;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use self::{
    compiler::{CompiledMatcher, MatcherCompiler, MatcherLimits},
    extractor::{extract, MatchResult, MatchedText},
    flags::FlagSet,
    pipeline::{ExtractionPipeline, ExtractionRequest},
    template::{substitute, ReplacementTemplate},
};
