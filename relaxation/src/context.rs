use std::collections::BTreeSet;

use crate::names::FreshNames;
use crate::options::RelaxOptions;

/// Direction in which the enclosing Boolean context can be weakened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    /// Non-Boolean position, or one whose truth does not transmit a direction
    /// (operands of `=`, `xor` and arithmetic).
    Neutral,
}

impl Polarity {
    pub fn flip(self) -> Polarity {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
            Polarity::Neutral => Polarity::Neutral,
        }
    }
}

/// Rewritten operand texts of one `div`, `mod` or `*` application.
pub type OperandPair = (String, String);

/// State accumulated while rewriting a whole script.
///
/// The pair sets are ordered so that axiom instances come out in lexicographic order.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    pub options: RelaxOptions,
    pub names: FreshNames,
    pub div_pairs: BTreeSet<OperandPair>,
    pub mul_pairs: BTreeSet<OperandPair>,
    /// Some `div`/`mod` was rewritten into the fraction function, recorded or not.
    pub uses_frac: bool,
    pub uses_abs: bool,
}

impl RewriteContext {
    pub fn new(options: RelaxOptions, names: FreshNames) -> RewriteContext {
        RewriteContext {
            options,
            names,
            div_pairs: BTreeSet::new(),
            mul_pairs: BTreeSet::new(),
            uses_frac: false,
            uses_abs: false,
        }
    }
}
