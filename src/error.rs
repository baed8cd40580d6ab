use std::io;
use std::path::PathBuf;

/// Fatal conditions; any of these aborts the run before output is written.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("can't open rules file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed rules document: {reason}")]
    Malformed { reason: String },
    #[error("offset not available for {field} in {instruction}")]
    MissingOffset { field: String, instruction: String },
    #[error("can't allocate new bitstring character for instruction {instruction}")]
    SymbolExhausted { instruction: String },
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::Malformed {
            reason: reason.into(),
        }
    }
}
