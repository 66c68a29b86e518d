//! Built-in stopword lists. RuleSet stopwords are added on top.

use physio_core::Language;

/// Common English function words that carry no domain signal.
pub const ENGLISH: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "by", "for", "from", "in", "is", "it", "of", "on", "or",
    "per", "the", "to", "with",
];

/// Common Arabic function words (post-normalization forms).
pub const ARABIC: &[&str] = &[
    "في", "من", "الي", "علي", "عن", "مع", "او", "ثم", "هذا", "هذه", "ذلك", "تلك", "التي",
    "الذي", "كل", "بعض", "غير", "بين", "حتي",
];

/// The built-in list for a language. Mixed text filters both lists.
pub fn builtin(language: Language) -> Vec<&'static str> {
    match language {
        Language::English => ENGLISH.to_vec(),
        Language::Arabic => ARABIC.to_vec(),
        Language::Mixed => {
            let mut all = ENGLISH.to_vec();
            all.extend_from_slice(ARABIC);
            all
        }
    }
}
