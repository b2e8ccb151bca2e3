//! Fatal error kinds.
//!
//! Both variants signal programmer or configuration mistakes (an empty word
//! list, a clause node rendered on its own), never bad input data -- there is
//! no external input at generation time. Callers should treat either as a
//! defect to fix, not as control flow to handle.

use thiserror::Error;

/// Errors raised by the sampler and the node model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `sample()` was called on a sampler with no registered choices.
    ///
    /// In practice this means an empty word list reached the generator.
    #[error("sample() called on a sampler with no choices")]
    EmptySampler,

    /// A branch clause was rendered outside its owning branch group.
    ///
    /// Clauses carry no keyword of their own; only the group knows whether a
    /// clause prints as `if`, `else if`, or `else`.
    #[error("branch clauses render only through their owning branch group")]
    InvalidRenderContext,
}
