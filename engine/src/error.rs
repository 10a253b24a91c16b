use thiserror::Error;

/// Everything here is a contract violation, not a transient condition; no
/// variant is retried, and any error inside a worker fails the whole run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("encounter level must be in 1..=20, got {0}")]
    LevelOutOfRange(u8),

    #[error("encounter kind must be 'any', 'spellcaster' or 'regular', got '{0}'")]
    UnknownEncounterKind(String),

    #[error("no eligible opponents at level {0}")]
    EmptyPool(u8),

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("failed to spawn worker {index}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker thread panicked")]
    WorkerPanicked,
}
