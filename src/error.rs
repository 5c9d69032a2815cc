use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("failed to read word list at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("word list at {} contains no words", path.display())]
    Empty { path: PathBuf },
}
