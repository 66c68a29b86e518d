/// Errors from lexicon persistence (serialize/deserialize round-trip).
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("lexicon failed to encode: {reason}")]
    EncodeFailed { reason: String },

    #[error("lexicon blob failed to decode: {reason}")]
    DecodeFailed { reason: String },

    #[error("lexicon blob is structurally invalid: {reason}")]
    Corrupt { reason: String },
}
