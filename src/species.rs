//! Species expressions of `minimum of` group definitions.
//!
//! The text between the parentheses of a group line lists samples in clauses:
//!
//! ```text
//! expression := clause ("," clause)*
//! clause     := sample ("and/or" sample)*
//! ```
//!
//! Samples joined by `and/or` form one pool: any of them may count towards the
//! minimum. Commas separate clauses, and one representative is picked from
//! each clause; every combination of representatives is a distinct
//! requirement.
//!
//! # Example
//!
//! ```rust
//! use lociphy::species::{parse_species_object, SpeciesExpression};
//!
//! let expression = SpeciesExpression::parse("A, B and/or C")?;
//! assert_eq!(expression.combination_count(), 2);
//!
//! let combinations = parse_species_object("A, B and/or C")?;
//! assert_eq!(combinations, vec![vec!["A", "B"], vec!["A", "C"]]);
//! # Ok::<(), lociphy::error::SpeciesExpressionError>(())
//! ```

use std::fmt;

use crate::error::SpeciesExpressionError;

const AND_OR: &str = "and/or";

/// A parsed species expression: clauses of alternative samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesExpression {
    clauses: Vec<Vec<String>>,
}

impl SpeciesExpression {
    /// Parses the text found between the parentheses of a group line.
    ///
    /// # Errors
    ///
    /// Returns a [`SpeciesExpressionError`] locating the first empty clause,
    /// stray `and/or`, missing separator or parenthesis.
    pub fn parse(input: &str) -> Result<Self, SpeciesExpressionError> {
        Parser::new(input).parse_expression()
    }

    /// The clauses, each holding its alternative samples in written order.
    #[must_use]
    pub fn clauses(&self) -> &[Vec<String>] {
        &self.clauses
    }

    /// Number of sample combinations [`expand`](Self::expand) produces.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        if self.clauses.len() == 1 {
            1
        } else {
            self.clauses.iter().map(Vec::len).product()
        }
    }

    /// Expands the expression into sample combinations.
    ///
    /// A single clause is returned as-is. Several clauses expand to their
    /// Cartesian product, with the first clause varying slowest.
    #[must_use]
    pub fn expand(&self) -> Vec<Vec<String>> {
        if let [single] = self.clauses.as_slice() {
            return vec![single.clone()];
        }

        let mut combinations: Vec<Vec<String>> = vec![Vec::with_capacity(self.clauses.len())];
        for clause in &self.clauses {
            combinations = combinations
                .into_iter()
                .flat_map(|prefix| {
                    clause.iter().map(move |sample| {
                        let mut combination = prefix.clone();
                        combination.push(sample.clone());
                        combination
                    })
                })
                .collect();
        }
        combinations
    }
}

impl fmt::Display for SpeciesExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            for (j, sample) in clause.iter().enumerate() {
                if j > 0 {
                    write!(f, " {AND_OR} ")?;
                }
                f.write_str(sample)?;
            }
        }
        Ok(())
    }
}

/// Parses a species expression and expands it into sample combinations.
///
/// `"A and/or B"` gives `[["A", "B"]]`; `"A, B and/or C"` gives
/// `[["A", "B"], ["A", "C"]]`.
///
/// # Errors
///
/// Returns a [`SpeciesExpressionError`] if the expression is malformed.
pub fn parse_species_object(input: &str) -> Result<Vec<Vec<String>>, SpeciesExpressionError> {
    Ok(SpeciesExpression::parse(input)?.expand())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Comma,
    AndOr,
    Sample(&'a str),
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse_expression(mut self) -> Result<SpeciesExpression, SpeciesExpressionError> {
        if self.input.trim().is_empty() {
            return Err(SpeciesExpressionError::Empty);
        }

        let mut clauses = vec![self.parse_clause()?];
        while let Some((Token::Comma, _)) = self.peek() {
            self.next();
            clauses.push(self.parse_clause()?);
        }
        Ok(SpeciesExpression { clauses })
    }

    fn parse_clause(&mut self) -> Result<Vec<String>, SpeciesExpressionError> {
        let mut alternatives = match self.next() {
            Some((Token::Sample(sample), column)) => vec![Self::sample(sample, column)?],
            Some((Token::AndOr, column)) => {
                return Err(SpeciesExpressionError::StrayAndOr { column })
            }
            Some((Token::Comma, column)) => {
                return Err(SpeciesExpressionError::EmptyClause { column })
            }
            None => {
                return Err(SpeciesExpressionError::EmptyClause {
                    column: self.input.len(),
                })
            }
        };

        loop {
            match self.peek() {
                Some((Token::AndOr, column)) => {
                    self.next();
                    match self.next() {
                        Some((Token::Sample(sample), at)) => {
                            alternatives.push(Self::sample(sample, at)?);
                        }
                        _ => return Err(SpeciesExpressionError::StrayAndOr { column }),
                    }
                }
                Some((Token::Sample(sample), column)) => {
                    return Err(SpeciesExpressionError::MissingSeparator {
                        sample: sample.to_string(),
                        column,
                    })
                }
                Some((Token::Comma, _)) | None => return Ok(alternatives),
            }
        }
    }

    fn sample(sample: &str, column: usize) -> Result<String, SpeciesExpressionError> {
        if sample.contains(['(', ')']) {
            return Err(SpeciesExpressionError::Parenthesis {
                sample: sample.to_string(),
                column,
            });
        }
        Ok(sample.to_string())
    }

    fn peek(&self) -> Option<(Token<'a>, usize)> {
        self.scan().map(|(token, column, _)| (token, column))
    }

    fn next(&mut self) -> Option<(Token<'a>, usize)> {
        let (token, column, end) = self.scan()?;
        self.pos = end;
        Some((token, column))
    }

    /// Returns the token at the cursor with its start and end offsets.
    fn scan(&self) -> Option<(Token<'a>, usize, usize)> {
        let input: &'a str = self.input;
        let rest = &input[self.pos..];
        let trimmed = rest.trim_start();
        let start = self.pos + (rest.len() - trimmed.len());

        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with(',') {
            return Some((Token::Comma, start, start + 1));
        }

        let len = trimmed
            .find(|c: char| c.is_whitespace() || c == ',')
            .unwrap_or(trimmed.len());
        let word = &trimmed[..len];
        let token = if word == AND_OR {
            Token::AndOr
        } else {
            Token::Sample(word)
        };
        Some((token, start, start + len))
    }
}
