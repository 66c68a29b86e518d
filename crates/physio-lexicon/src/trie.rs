//! Compressed radix trie over canonical terms.
//!
//! Edges carry multi-character labels; inserting a key that shares a partial
//! prefix with an existing edge splits that edge around the common part, so
//! edge count stays proportional to term count rather than character count.
//! Nodes are arena-allocated and referenced by index, which makes the whole
//! tree a flat `Vec` that serializes as-is.

use serde::{Deserialize, Serialize};
use tracing::debug;

use physio_core::constants::MAX_FUZZY_DISTANCE;
use physio_core::errors::LexiconError;
use physio_core::VocabTerm;

const ROOT: usize = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Node {
    /// Edge label leading into this node (empty only for the root).
    label: String,
    /// Terminal payload; `Some` iff a canonical term ends here.
    value: Option<VocabTerm>,
    /// Arena indices of child nodes.
    children: Vec<usize>,
}

impl Node {
    fn new(label: String, value: Option<VocabTerm>) -> Self {
        Self {
            label,
            value,
            children: Vec::new(),
        }
    }
}

/// A fuzzy-lookup hit with its true edit distance.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub distance: usize,
    pub term: VocabTerm,
}

/// The vocabulary store. Single-writer during build, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    nodes: Vec<Node>,
    terms: usize,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None)],
            terms: 0,
        }
    }

    /// Number of canonical terms stored.
    pub fn term_count(&self) -> usize {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms == 0
    }

    /// Number of arena nodes (terminal and intermediate).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert or overwrite a canonical term. Duplicate canonicals never
    /// create a second entry; the value is replaced.
    pub fn insert(&mut self, term: &str, value: VocabTerm) {
        if term.is_empty() {
            return;
        }

        let mut node = ROOT;
        let mut offset = 0;

        loop {
            let rest = &term[offset..];
            if rest.is_empty() {
                if self.nodes[node].value.is_none() {
                    self.terms += 1;
                }
                self.nodes[node].value = Some(value);
                return;
            }

            let first = rest.chars().next().unwrap_or_default();
            let child_pos = self.nodes[node]
                .children
                .iter()
                .position(|&c| self.nodes[c].label.chars().next() == Some(first));

            let Some(pos) = child_pos else {
                // No edge shares the first char: attach the whole remainder.
                let leaf = self.nodes.len();
                self.nodes.push(Node::new(rest.to_string(), Some(value)));
                self.nodes[node].children.push(leaf);
                self.terms += 1;
                return;
            };

            let child = self.nodes[node].children[pos];
            let common = common_prefix_bytes(&self.nodes[child].label, rest);

            if common == self.nodes[child].label.len() {
                // Edge fully matched: descend.
                node = child;
                offset += common;
                continue;
            }

            // Partial match: split the edge at the common boundary.
            let (head, tail) = {
                let label = &self.nodes[child].label;
                (label[..common].to_string(), label[common..].to_string())
            };
            let mid = self.nodes.len();
            self.nodes.push(Node::new(head, None));
            self.nodes[mid].children.push(child);
            self.nodes[child].label = tail;
            self.nodes[node].children[pos] = mid;

            let rest_tail = &rest[common..];
            if rest_tail.is_empty() {
                // The inserted key ends exactly at the split point.
                self.nodes[mid].value = Some(value);
            } else {
                let leaf = self.nodes.len();
                self.nodes.push(Node::new(rest_tail.to_string(), Some(value)));
                self.nodes[mid].children.push(leaf);
            }
            self.terms += 1;
            return;
        }
    }

    /// Exact lookup of a canonical term.
    pub fn lookup_exact(&self, term: &str) -> Option<&VocabTerm> {
        let mut node = ROOT;
        let mut offset = 0;

        loop {
            let rest = &term[offset..];
            if rest.is_empty() {
                return self.nodes[node].value.as_ref();
            }

            let first = rest.chars().next()?;
            let child = *self.nodes[node]
                .children
                .iter()
                .find(|&&c| self.nodes[c].label.chars().next() == Some(first))?;

            let label = &self.nodes[child].label;
            if !rest.starts_with(label.as_str()) {
                return None;
            }
            node = child;
            offset += label.len();
        }
    }

    /// All terms under a prefix, up to `limit`, ranked by descending weight
    /// then descending frequency. Traversal stops as soon as `limit`
    /// candidates are collected.
    pub fn lookup_prefix(&self, prefix: &str, limit: usize) -> Vec<&VocabTerm> {
        if limit == 0 {
            return Vec::new();
        }

        // Descend to the node covering the prefix; the prefix may end
        // mid-edge, in which case the edge's target subsumes it.
        let mut node = ROOT;
        let mut offset = 0;
        let start = loop {
            let rest = &prefix[offset..];
            if rest.is_empty() {
                break node;
            }
            let Some(first) = rest.chars().next() else {
                break node;
            };
            let Some(&child) = self.nodes[node]
                .children
                .iter()
                .find(|&&c| self.nodes[c].label.chars().next() == Some(first))
            else {
                return Vec::new();
            };

            let label = &self.nodes[child].label;
            let common = common_prefix_bytes(label, rest);
            if common == rest.len() {
                break child;
            }
            if common < label.len() {
                return Vec::new();
            }
            node = child;
            offset += common;
        };

        let mut collected = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if let Some(value) = &self.nodes[current].value {
                collected.push(value);
                if collected.len() >= limit {
                    break;
                }
            }
            stack.extend(self.nodes[current].children.iter().copied());
        }

        collected.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.frequency.cmp(&a.frequency))
        });
        collected
    }

    /// Terms within `max_distance` character edits of `query`, up to
    /// `limit`, ranked by ascending distance then descending weight.
    ///
    /// Iterative branch-and-bound over the trie with one Levenshtein row per
    /// branch; a branch is abandoned as soon as its minimum possible
    /// distance exceeds the budget. The budget is capped because branching
    /// cost grows combinatorially with it.
    pub fn lookup_fuzzy(&self, query: &str, max_distance: usize, limit: usize) -> Vec<FuzzyMatch> {
        if limit == 0 || query.is_empty() {
            return Vec::new();
        }
        let budget = max_distance.min(MAX_FUZZY_DISTANCE);
        let query_chars: Vec<char> = query.chars().collect();
        let initial_row: Vec<usize> = (0..=query_chars.len()).collect();

        let mut results: Vec<FuzzyMatch> = Vec::new();
        // Work queue of (node, Levenshtein row at node entry).
        let mut work: Vec<(usize, Vec<usize>)> = vec![(ROOT, initial_row)];

        while let Some((node, entry_row)) = work.pop() {
            let Some(row) = advance_row(&entry_row, &self.nodes[node].label, &query_chars, budget)
            else {
                continue;
            };

            if let Some(value) = &self.nodes[node].value {
                let distance = row[query_chars.len()];
                if distance <= budget {
                    results.push(FuzzyMatch {
                        distance,
                        term: value.clone(),
                    });
                    if results.len() >= limit {
                        break;
                    }
                }
            }

            for &child in &self.nodes[node].children {
                work.push((child, row.clone()));
            }
        }

        results.sort_by(|a, b| {
            a.distance.cmp(&b.distance).then(
                b.term
                    .weight
                    .partial_cmp(&a.term.weight)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
        results.truncate(limit);
        results
    }

    /// Opaque persistence blob. Round-trips exactly through [`Lexicon::from_bytes`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, LexiconError> {
        serde_json::to_vec(self).map_err(|e| LexiconError::EncodeFailed {
            reason: e.to_string(),
        })
    }

    /// Decode and structurally validate a persisted lexicon.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LexiconError> {
        let lexicon: Lexicon =
            serde_json::from_slice(bytes).map_err(|e| LexiconError::DecodeFailed {
                reason: e.to_string(),
            })?;
        lexicon.validate()?;
        debug!(
            terms = lexicon.terms,
            nodes = lexicon.nodes.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Structural invariants: a root exists, child indices are in bounds,
    /// every non-root node has exactly one parent, non-root labels are
    /// non-empty, and the term counter matches the terminal nodes.
    fn validate(&self) -> Result<(), LexiconError> {
        if self.nodes.is_empty() {
            return Err(LexiconError::Corrupt {
                reason: "no root node".into(),
            });
        }

        let mut parents = vec![0usize; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            if index != ROOT && node.label.is_empty() {
                return Err(LexiconError::Corrupt {
                    reason: format!("node {index} has an empty edge label"),
                });
            }
            for &child in &node.children {
                if child >= self.nodes.len() || child == ROOT {
                    return Err(LexiconError::Corrupt {
                        reason: format!("node {index} references invalid child {child}"),
                    });
                }
                parents[child] += 1;
            }
        }
        for (index, &count) in parents.iter().enumerate() {
            let expected = usize::from(index != ROOT);
            if count != expected {
                return Err(LexiconError::Corrupt {
                    reason: format!("node {index} has {count} parents, expected {expected}"),
                });
            }
        }

        let terminals = self.nodes.iter().filter(|n| n.value.is_some()).count();
        if terminals != self.terms {
            return Err(LexiconError::Corrupt {
                reason: format!(
                    "term counter {} does not match {} terminal nodes",
                    self.terms, terminals
                ),
            });
        }
        Ok(())
    }
}

/// Byte length of the common char-wise prefix of two strings.
fn common_prefix_bytes(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

/// Advance a Levenshtein row across an edge label. Returns `None` when the
/// branch can no longer come within `budget` edits of the query.
fn advance_row(
    entry_row: &[usize],
    label: &str,
    query: &[char],
    budget: usize,
) -> Option<Vec<usize>> {
    let mut row = entry_row.to_vec();
    for c in label.chars() {
        let mut next = Vec::with_capacity(row.len());
        next.push(row[0] + 1);
        for i in 1..row.len() {
            let cost = usize::from(query[i - 1] != c);
            let value = (next[i - 1] + 1).min(row[i] + 1).min(row[i - 1] + cost);
            next.push(value);
        }
        if next.iter().copied().min().unwrap_or(usize::MAX) > budget {
            return None;
        }
        row = next;
    }
    Some(row)
}
