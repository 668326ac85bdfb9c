/// How `mod` is expressed in the relaxed script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModEncoding {
    /// Uninterpreted modulus function with three exact cases before falling back to the fraction.
    #[default]
    Full,
    /// Same function with a single exact case.
    Simple,
    /// No modulus function; `(mod a b)` becomes `(* (frac a b) b)`.
    Simplest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxOptions {
    pub relax_inequalities: bool,
    pub mod_encoding: ModEncoding,
    pub frac_zero: bool,
    pub int_approx: bool,
}

impl Default for RelaxOptions {
    fn default() -> Self {
        RelaxOptions {
            relax_inequalities: true,
            mod_encoding: ModEncoding::Full,
            frac_zero: true,
            int_approx: true,
        }
    }
}
