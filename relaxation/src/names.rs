//! Collision-free names for the synthesized axioms and uninterpreted functions.

const AXIOM_FRAC_BOUND: &str = "axiom_frac_bound";
const AXIOM_FRAC_ZERO: &str = "axiom_frac_zero";
const AXIOM_INT_APPROX: &str = "axiom_int_approximation";
const UNINTERP_MOD: &str = "uninterp_mod";
const UNINTERP_FRAC: &str = "uninterp_frac";
const UNINTERP_ABS: &str = "uninterp_abs";

/// Returns `base`, or `base` followed by the smallest number such that the result
/// does not occur anywhere in `text`.
///
/// Containment is a plain substring test, so a name is rejected even when it only
/// appears inside a longer identifier.
pub fn allocate(text: &str, base: &str) -> String {
    if !text.contains(base) {
        return base.to_string();
    }
    let mut i = 0usize;
    loop {
        let name = format!("{base}{i}");
        if !text.contains(&name) {
            return name;
        }
        i += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshNames {
    pub frac_bound: String,
    pub frac_zero: String,
    pub int_approx: String,
    pub modulus: String,
    pub frac: String,
    pub abs: String,
}

impl FreshNames {
    /// Must run on the original script, before any rewriting.
    pub fn allocate(text: &str) -> FreshNames {
        FreshNames {
            frac_bound: allocate(text, AXIOM_FRAC_BOUND),
            frac_zero: allocate(text, AXIOM_FRAC_ZERO),
            int_approx: allocate(text, AXIOM_INT_APPROX),
            modulus: allocate(text, UNINTERP_MOD),
            frac: allocate(text, UNINTERP_FRAC),
            abs: allocate(text, UNINTERP_ABS),
        }
    }

    pub fn all(&self) -> [&str; 6] {
        [
            self.frac_bound.as_str(),
            self.frac_zero.as_str(),
            self.int_approx.as_str(),
            self.modulus.as_str(),
            self.frac.as_str(),
            self.abs.as_str(),
        ]
    }
}
