pub mod config;
pub mod identifiers;
pub mod matching;
pub mod metrics;
pub mod similarity;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, BatchConfig, Config,
    ConfigError,
};
pub use matching::{
    match_all, AlternativeMatch, BatchMatchResult, BatchMatcher, BatchSummary, CriterionKind,
    MatchCriterion, MatchError, MatchResult, MatchSelector, MatchingConfig, RecordingCandidate,
    RecordingIndex, ScorecardEntry,
};
