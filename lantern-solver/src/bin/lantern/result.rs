use thiserror::Error;

use lantern_solver::automaton::AutomatonError;

pub(crate) type LanternResult<T> = Result<T, LanternError>;

#[derive(Error, Debug)]
pub(crate) enum LanternError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The automaton could not be created, more details: {0}")]
    InvalidAutomaton(#[from] AutomatonError),
    #[error("The domain '{0}' is not of the form 'position=value,value,...'.")]
    InvalidDomain(String),
    #[error("The domain of position {position} was given, but the sequence has length {length}.")]
    PositionOutOfRange { position: usize, length: usize },
}

impl LanternError {
    pub(crate) fn invalid_domain(domain: &str) -> Self {
        Self::InvalidDomain(domain.to_owned())
    }
}
