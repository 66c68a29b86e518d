use std::fmt;

use serde::{Deserialize, Serialize};

/// Language detected for a record's text, by script-range presence.
///
/// `Mixed` means both Arabic and Latin scripts appear above a minimal
/// character count; such records are scored with the English ruleset but
/// matched against both vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
    Mixed,
}

impl Language {
    /// Short code as surfaced in results ("ar", "en", "mixed").
    pub fn code(self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
            Language::Mixed => "mixed",
        }
    }

    /// The language whose RuleSet governs scoring for this detection.
    /// Mixed-script records fall back to the English ruleset.
    pub fn ruleset_language(self) -> Language {
        match self {
            Language::Mixed => Language::English,
            other => other,
        }
    }

    /// Languages that must carry a RuleSet in every valid configuration.
    pub fn supported() -> [Language; 2] {
        [Language::Arabic, Language::English]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
