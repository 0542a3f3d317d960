//! Model fallback — tries an ordered list of model candidates and returns the
//! first successful completion together with the model that produced it.
//!
//! Exhaustion is a distinct terminal state from a per-call error: the invoker
//! never raises, it returns `None` and leaves the user-facing translation to
//! the calling handler.

use tracing::{info, warn};

use super::{ChatCompleter, ChatRequest, LlmError};

/// Model candidates in priority order, shared by every flow.
pub const MODEL_CANDIDATES: [&str; 2] = ["gpt-4o-mini", "gpt-3.5-turbo"];

/// A successful completion and the candidate that produced it.
/// Never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

/// How the invoker treats provider errors other than rate limiting.
/// Rate limits always fall through to the next candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Any failure moves on to the next candidate (analysis, suggestions).
    ContinueOnError,
    /// A non-rate-limit failure stops the whole attempt. The cover-letter
    /// flow carries this asymmetry over from the original service; do not
    /// unify it with `ContinueOnError` without explicit sign-off.
    StopOnApiError,
}

/// Attempts `request` against each candidate in order, returning the first
/// success. `None` means every candidate was exhausted (or the policy stopped
/// the attempt early) without producing text.
pub async fn complete_with_fallback(
    chat: &dyn ChatCompleter,
    candidates: &[&str],
    request: &ChatRequest,
    policy: ErrorPolicy,
) -> Option<Completion> {
    for model in candidates {
        info!("Trying model: {model}");

        match chat.complete(model, request).await {
            Ok(text) => {
                return Some(Completion {
                    text,
                    model: (*model).to_string(),
                });
            }
            Err(LlmError::RateLimited { message }) => {
                warn!("Model {model} is rate-limited, trying next: {message}");
            }
            Err(err) => {
                warn!("Model {model} failed: {err}");
                if policy == ErrorPolicy::StopOnApiError {
                    break;
                }
            }
        }
    }

    None
}
