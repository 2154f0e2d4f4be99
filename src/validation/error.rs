use thiserror::Error;

/// The only error the validation engine itself raises. Individual rule
/// findings are never errors — they are `Issue` values inside the report,
/// per the propagation policy in §7. This variant exists for the one case
/// where the driver treats an aggregated report as fatal: a final,
/// budget-exhausted report that is still invalid.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{error_count} error-or-critical issue(s) remained after the refinement budget was exhausted (doc ref: validation.failure)")]
    ValidationFailure { error_count: usize },
}
