//! Configuration-driven text canonicalization.
//!
//! A fixed built-in baseline per language runs first (diacritic/tatweel
//! stripping and character unification for Arabic, case folding and
//! punctuation stripping for Latin), then the RuleSet's ordered
//! pattern → replacement rewrites. Order matters: later rules may depend on
//! earlier folding, so rules run exactly as declared.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use physio_core::errors::ConfigError;
use physio_core::rules::RewriteRule;
use physio_core::Language;

/// A rewrite rule with its pattern compiled once at configuration time.
#[derive(Debug, Clone)]
struct CompiledRewrite {
    regex: Regex,
    replacement: String,
}

/// Pure, reusable normalizer. Same input and language always yield the same
/// output; unknown or empty input returns an empty string, never an error.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: HashMap<Language, Vec<CompiledRewrite>>,
}

impl Normalizer {
    /// Baseline-only normalizer with no configured rewrites.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile per-language rewrite rules. A pattern that fails to compile
    /// is a fatal configuration error.
    pub fn from_rules<'a, I>(rules: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Language, &'a [RewriteRule])>,
    {
        let mut compiled: HashMap<Language, Vec<CompiledRewrite>> = HashMap::new();
        for (language, language_rules) in rules {
            let mut list = Vec::with_capacity(language_rules.len());
            for rule in language_rules {
                let regex =
                    Regex::new(&rule.pattern).map_err(|e| ConfigError::InvalidRewriteRule {
                        pattern: rule.pattern.clone(),
                        reason: e.to_string(),
                    })?;
                list.push(CompiledRewrite {
                    regex,
                    replacement: rule.replacement.clone(),
                });
            }
            debug!(%language, rules = list.len(), "compiled normalization rules");
            compiled.insert(language, list);
        }
        Ok(Self { rules: compiled })
    }

    /// Canonicalize `text` for `language`.
    pub fn normalize(&self, text: &str, language: Language) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let folded = match language {
            Language::Arabic | Language::Mixed => fold_chars(text, true),
            Language::English => fold_chars(text, false),
        };

        let mut out = folded;
        if let Some(rules) = self.rules.get(&language.ruleset_language()) {
            for rule in rules {
                out = rule.regex.replace_all(&out, rule.replacement.as_str()).into_owned();
            }
        }

        collapse_whitespace(&out)
    }
}

/// Character-level folding pass.
///
/// Always: lowercase, punctuation → space except hyphens between
/// alphanumerics, whitespace preserved for the final collapse.
/// With `arabic`: strip tashkīl and tatweel, unify hamza/ya/ta-marbuta
/// variants, fold Arabic-Indic digits to ASCII.
fn fold_chars(text: &str, arabic: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if arabic {
            match c {
                // Tashkīl (combining diacritics) and Quranic annotation marks.
                '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}'
                | '\u{06D6}'..='\u{06ED}' => continue,
                // Tatweel (kashida).
                '\u{0640}' => continue,
                'أ' | 'إ' | 'آ' | 'ٱ' => {
                    out.push('ا');
                    continue;
                }
                'ى' => {
                    out.push('ي');
                    continue;
                }
                'ة' => {
                    out.push('ه');
                    continue;
                }
                'ؤ' => {
                    out.push('و');
                    continue;
                }
                'ئ' => {
                    out.push('ي');
                    continue;
                }
                // Arabic-Indic and extended Arabic-Indic digits.
                '٠'..='٩' => {
                    out.push((b'0' + (c as u32 - 0x0660) as u8) as char);
                    continue;
                }
                '۰'..='۹' => {
                    out.push((b'0' + (c as u32 - 0x06F0) as u8) as char);
                    continue;
                }
                _ => {}
            }
        }

        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else if c == '-' {
            let prev_alnum = i > 0 && chars[i - 1].is_alphanumeric();
            let next_alnum = i + 1 < chars.len() && chars[i + 1].is_alphanumeric();
            // Internal hyphens survive ("anti-gravity"); dangling ones don't.
            out.push(if prev_alnum && next_alnum { '-' } else { ' ' });
        } else {
            out.push(' ');
        }
    }

    out
}

/// Collapse runs of whitespace to single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
