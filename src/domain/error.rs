//! Errors raised by the simulation core.

use thiserror::Error;

/// All kinds of errors in the simulation core.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The rule string is not of the form `B<digits>/S<digits>`.
    #[error("invalid rule {0:?}: expected B<digits>/S<digits> with digits 0-8")]
    InvalidRuleFormat(String),
}
