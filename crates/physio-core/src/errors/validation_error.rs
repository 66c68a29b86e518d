/// Per-record validation errors. Recoverable: a bad record is skipped with a
/// recorded reason, never aborting the rest of a batch.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("record is missing a non-blank identifier")]
    MissingId,

    #[error("record '{id}' is missing a non-blank name")]
    MissingName { id: String },
}
