/// Failure while reading a binary dictionary. Any of these aborts the
/// load attempt and leaves the dictionary unloaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Dictionary stream truncated while reading {context}")]
    Truncated { context: &'static str },

    #[error("Bad length prefix for {context}: {detail}")]
    BadLengthPrefix {
        context: &'static str,
        detail: String,
    },

    #[error("{table} index references entry {index}, but only {len} entries exist")]
    EntryIndexOutOfRange {
        table: &'static str,
        index: i64,
        len: usize,
    },

    #[error("Entry references example sentence {index}, but only {len} sentences exist")]
    SentenceIndexOutOfRange { index: i64, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Maps a read failure, turning an unexpected EOF into `Truncated`.
    pub fn from_read(err: std::io::Error, context: &'static str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            LoadError::Truncated { context }
        } else {
            LoadError::Io(err)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Dictionary not loaded")]
    NotLoaded,
}
