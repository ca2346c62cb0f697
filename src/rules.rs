//! Group match rules and the batch matcher.
//!
//! Rules come from the extraction section of the arguments file:
//!
//! ```text
//! Extract
//! minimum of 2 (A10 and/or B10 and/or C10)   # any two of the three
//! minimum of 2 (D10, E10 and/or F10)         # D10 with E10, or D10 with F10
//! ```
//!
//! A batch is retained when at least one rule finds its minimum number of
//! species among the batch's sample identifiers.

use rustc_hash::FxHashSet;

use crate::{error::LociError, species::SpeciesExpression};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

const EXTRACT_KEYWORD: &str = "extract";
const MINIMUM_MARKER: &str = "minimum of ";
const COMMENT_MARKER: char = '#';

/// A minimum-count requirement over a fixed set of species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    minimum_matches: usize,
    species: Vec<String>,
}

impl MatchRule {
    /// Creates a rule. Repeated species are collapsed, keeping first
    /// occurrence order.
    ///
    /// A minimum larger than the number of species is accepted; such a rule
    /// never matches.
    #[must_use]
    pub fn new<I, S>(minimum_matches: usize, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in species {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            minimum_matches,
            species: unique,
        }
    }

    #[must_use]
    pub fn minimum_matches(&self) -> usize {
        self.minimum_matches
    }

    #[must_use]
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Returns `true` if at least `minimum_matches` of the rule's species
    /// are among `batch_ids`.
    #[must_use]
    pub fn is_satisfied_by(&self, batch_ids: &FxHashSet<&str>) -> bool {
        self.species
            .iter()
            .filter(|name| batch_ids.contains(name.as_str()))
            .count()
            >= self.minimum_matches
    }
}

/// The ordered rules of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRuleSet {
    rules: Vec<MatchRule>,
}

impl MatchRuleSet {
    /// Parses the extraction section of an arguments file.
    ///
    /// Lines are ignored up to and including the first one containing
    /// "extract" (any case). After it, every line containing `minimum of ` is
    /// a group definition. Blank lines are skipped; once a group line has been
    /// seen, the first other line ends the section.
    ///
    /// # Errors
    ///
    /// Returns [`LociError::ConfigFormat`] naming the first malformed group
    /// definition line.
    pub fn from_config(text: &str) -> Result<Self, LociError> {
        let mut lines = text.lines();
        if !lines
            .by_ref()
            .any(|line| line.to_lowercase().contains(EXTRACT_KEYWORD))
        {
            #[cfg(feature = "tracing")]
            warn!("No extract section found; every batch will be discarded");
            return Ok(Self::default());
        }

        let mut rules = Vec::new();
        let mut seen_group = false;
        for line in lines {
            if line.contains(MINIMUM_MARKER) {
                rules.extend(parse_group_line(line)?);
                seen_group = true;
            } else if line.trim().is_empty() || !seen_group {
                continue;
            } else {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        debug!(rules = rules.len(), "Parsed extract section");

        Ok(Self { rules })
    }

    /// Returns `true` if any rule is satisfied by `batch_ids`.
    #[must_use]
    pub fn is_retained(&self, batch_ids: &FxHashSet<&str>) -> bool {
        self.rules.iter().any(|rule| rule.is_satisfied_by(batch_ids))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRule> {
        self.rules.iter()
    }
}

impl From<Vec<MatchRule>> for MatchRuleSet {
    fn from(rules: Vec<MatchRule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a MatchRuleSet {
    type Item = &'a MatchRule;
    type IntoIter = std::slice::Iter<'a, MatchRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Parses one `minimum of D (expression)` line into its rules.
///
/// Anything after `#` is a comment. A single-clause expression gives one rule;
/// several clauses give one rule per combination of their alternatives.
///
/// # Errors
///
/// Returns [`LociError::ConfigFormat`] if the minimum is not a single digit
/// from 1 to 9, the species list is not parenthesized, or the species list is
/// malformed.
pub fn parse_group_line(line: &str) -> Result<Vec<MatchRule>, LociError> {
    let malformed = |details: &str| LociError::ConfigFormat {
        line: line.trim_end().to_string(),
        details: details.to_string(),
    };

    let content = line
        .split(COMMENT_MARKER)
        .next()
        .unwrap_or_default()
        .trim_end();
    let start = content
        .find(MINIMUM_MARKER)
        .ok_or_else(|| malformed("missing \"minimum of \" before any comment"))?
        + MINIMUM_MARKER.len();

    let mut rest = content[start..].chars();
    let minimum = rest
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| malformed("minimum is not a digit"))?;
    let after = rest.as_str();
    if after.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(malformed("minimum must be a single digit"));
    }
    if minimum == 0 {
        return Err(malformed("minimum must be at least 1"));
    }

    let inner = after
        .trim_start()
        .strip_prefix('(')
        .and_then(|expr| expr.strip_suffix(')'))
        .ok_or_else(|| malformed("species list must be enclosed in parentheses"))?;
    let expression = SpeciesExpression::parse(inner).map_err(|e| malformed(&e.to_string()))?;

    let minimum = minimum as usize;
    Ok(expression
        .expand()
        .into_iter()
        .map(|species| MatchRule::new(minimum, species))
        .collect())
}
