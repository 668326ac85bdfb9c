//! Support declarations and axiom instances for the uninterpreted symbols introduced
//! by the rewriter.

use std::collections::BTreeSet;

use log::debug;

use crate::context::RewriteContext;
use crate::names::FreshNames;
use crate::options::ModEncoding;

/// Material to splice into the rewritten script.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Synthesized {
    /// Goes right before the first declaration.
    pub prelude: Vec<String>,
    /// Goes right after the last declaration.
    pub instances: Vec<String>,
}

fn frac_declaration(n: &FreshNames) -> String {
    format!("(declare-fun {} (Real Real) Real)", n.frac)
}

// 0 <= frac < 1 for a positive divisor, -1 < frac <= 0 for a negative one
fn frac_bound_definition(n: &FreshNames) -> String {
    let f = &n.frac;
    format!(
        "(define-fun {} ((d1 Real) (d2 Real)) Bool \
         (and (=> (> d2 0) (and (<= 0.0 ({f} d1 d2)) (< ({f} d1 d2) 1.0))) \
         (=> (< d2 0) (and (>= 0.0 ({f} d1 d2)) (> ({f} d1 d2) (- 1.0))))))",
        n.frac_bound
    )
}

fn frac_zero_definition(n: &FreshNames) -> String {
    format!(
        "(define-fun {} ((d1 Real) (d2 Real) (m1 Real) (m2 Real) (e Real)) Bool \
         (=> (and (= d1 (* m1 m2)) (or (= d2 m1) (= d2 m2))) (= e 0)))",
        n.frac_zero
    )
}

fn modulus_definition(n: &FreshNames, encoding: ModEncoding) -> Option<String> {
    let (m, f) = (&n.modulus, &n.frac);
    match encoding {
        ModEncoding::Full => Some(format!(
            "(define-fun {m} ((x Real) (m Real)) Real \
             (ite (and (>= x 0) (< x m)) x \
             (ite (and (>= x m) (< x (+ m m))) (- x m) \
             (ite (and (>= x (- m)) (< x 0)) (+ x m) (* m ({f} x m))))))"
        )),
        ModEncoding::Simple => Some(format!(
            "(define-fun {m} ((x Real) (m Real)) Real \
             (ite (and (>= x 0) (< x m)) x (* m ({f} x m))))"
        )),
        ModEncoding::Simplest => None,
    }
}

fn int_approx_definition(n: &FreshNames) -> String {
    format!(
        "(define-fun {} ((x Real)) Bool (or (= x 0) (>= x 1) (<= x (- 1))))",
        n.int_approx
    )
}

fn abs_definition(n: &FreshNames) -> String {
    format!("(define-fun {} ((x Real)) Real (ite (>= x 0) x (- x)))", n.abs)
}

/// Decides which definitions the rewritten script needs and instantiates the axioms
/// for every recorded operand pair and integer symbol.
pub fn synthesize(ctx: &RewriteContext, int_symbols: &BTreeSet<String>) -> Synthesized {
    let options = &ctx.options;
    let names = &ctx.names;
    let has_div = !ctx.div_pairs.is_empty();
    let with_zero = options.frac_zero && has_div && !ctx.mul_pairs.is_empty();
    let with_int_approx = options.int_approx && !int_symbols.is_empty();
    let modulus = modulus_definition(names, options.mod_encoding);

    let mut prelude = Vec::new();
    if ctx.uses_frac || has_div || modulus.is_some() {
        prelude.push(frac_declaration(names));
    }
    if has_div {
        prelude.push(frac_bound_definition(names));
    }
    if with_zero {
        prelude.push(frac_zero_definition(names));
    }
    prelude.extend(modulus);
    if with_int_approx {
        prelude.push(int_approx_definition(names));
    }
    if ctx.uses_abs {
        prelude.push(abs_definition(names));
    }

    let mut instances = Vec::new();
    for (d1, d2) in &ctx.div_pairs {
        instances.push(format!("(assert ({} {d1} {d2}))", names.frac_bound));
        if with_zero {
            let frac = format!("({} {d1} {d2})", names.frac);
            for (m1, m2) in &ctx.mul_pairs {
                instances.push(format!(
                    "(assert ({} {d1} {d2} {m1} {m2} {frac}))",
                    names.frac_zero
                ));
            }
        }
    }
    if with_int_approx {
        for symbol in int_symbols {
            instances.push(format!("(assert ({} {symbol}))", names.int_approx));
        }
    }

    debug!(
        "synthesized {} definitions and {} axiom instances",
        prelude.len(),
        instances.len()
    );
    Synthesized { prelude, instances }
}
