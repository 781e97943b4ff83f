use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("residue {0} is not present in the loaded structure")]
    InvalidResidue(isize),

    #[error("chain '{0}' is not present in the loaded structure")]
    InvalidChain(char),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepresentationError {
    #[error("cannot remove the last remaining representation")]
    CannotRemoveLast,

    #[error("representation limit of {0} reached")]
    LimitReached(usize),

    #[error("unknown representation id")]
    UnknownId,
}
