//! Streaming rewrite of SMT-LIB terms from NIA into NRA with uninterpreted functions.
//!
//! Terms are never materialized: each call consumes tokens until the nesting level it
//! was given returns to zero, and hands back the rewritten text. Operand calls with
//! level 0 read exactly one term; calls with level 1 read the rest of the enclosing
//! application including its closing parenthesis.

use log::trace;

use crate::context::{OperandPair, Polarity, RewriteContext};
use crate::error::{RelaxError, Result};
use crate::lexer::Lexer;
use crate::options::ModEncoding;

pub struct TermRewriter<'c, I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    ctx: &'c mut RewriteContext,
}

fn close(level: usize, token: &str) -> Result<usize> {
    level.checked_sub(1).ok_or_else(|| RelaxError::UnbalancedParen {
        token: token.to_string(),
    })
}

// `rhs` carries the closing parenthesis of the application.
fn pair_text(lhs: &str, rhs: &str) -> OperandPair {
    let rhs = rhs.strip_suffix(')').unwrap_or(rhs);
    (lhs.trim().to_string(), rhs.trim().to_string())
}

impl<'c, I: Iterator<Item = char>> TermRewriter<'c, I> {
    pub fn new(lexer: Lexer<I>, ctx: &'c mut RewriteContext) -> Self {
        TermRewriter { lexer, ctx }
    }

    /// Rewrites the next top-level form, or returns `None` at end of input.
    pub fn next_form(&mut self) -> Result<Option<String>> {
        let token = match self.lexer.next() {
            None => return Ok(None),
            Some(token) => token?,
        };
        if token != "(" {
            return Err(RelaxError::ExpectedOpenParen { token });
        }
        let body = self.rewrite(1, Polarity::Positive, true, true)?;
        Ok(Some(format!("({body}")))
    }

    fn next_token(&mut self) -> Result<String> {
        match self.lexer.next() {
            Some(token) => Ok(token?),
            None => Err(RelaxError::UnexpectedEof),
        }
    }

    /// Consumes tokens until `level` drops to zero.
    ///
    /// `after_open` suppresses the separating space before the first token, which is
    /// how the text right after a `(` is written.
    pub fn rewrite(
        &mut self,
        level: usize,
        polarity: Polarity,
        collect: bool,
        after_open: bool,
    ) -> Result<String> {
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            self.rewrite_term(level, polarity, collect, after_open)
        })
    }

    fn operand(&mut self, level: usize, polarity: Polarity, collect: bool) -> Result<String> {
        self.rewrite(level, polarity, collect, false)
    }

    fn operand_pair(&mut self, collect: bool) -> Result<(String, String)> {
        let lhs = self.operand(0, Polarity::Neutral, collect)?;
        let rhs = self.operand(1, Polarity::Neutral, collect)?;
        Ok((lhs, rhs))
    }

    fn rewrite_term(
        &mut self,
        mut level: usize,
        polarity: Polarity,
        mut collect: bool,
        mut after_open: bool,
    ) -> Result<String> {
        let relax = self.ctx.options.relax_inequalities;
        let mut out = String::new();
        loop {
            let token = self.next_token()?;
            if !after_open && token != ")" {
                out.push(' ');
            }
            match token.as_str() {
                "(" => level += 1,
                ")" => level = close(level, &token)?,
                _ => {}
            }

            match (token.as_str(), polarity) {
                ("div", _) => {
                    let (lhs, rhs) = self.operand_pair(collect)?;
                    if collect {
                        let pair = pair_text(&lhs, &rhs);
                        trace!("division pair ({}, {})", pair.0, pair.1);
                        self.ctx.div_pairs.insert(pair);
                    }
                    self.ctx.uses_frac = true;
                    let frac = &self.ctx.names.frac;
                    out.push_str(&format!("- (/{lhs}{rhs} ({frac}{lhs}{rhs})"));
                    level = close(level, &token)?;
                }
                ("*", _) => {
                    let (lhs, rhs) = self.operand_pair(collect)?;
                    if collect {
                        let pair = pair_text(&lhs, &rhs);
                        trace!("multiplication pair ({}, {})", pair.0, pair.1);
                        self.ctx.mul_pairs.insert(pair);
                    }
                    out.push_str(&format!("*{lhs}{rhs}"));
                    level = close(level, &token)?;
                }
                ("mod", _) => {
                    let (lhs, rhs) = self.operand_pair(collect)?;
                    if collect {
                        let pair = pair_text(&lhs, &rhs);
                        trace!("modulus pair ({}, {})", pair.0, pair.1);
                        self.ctx.div_pairs.insert(pair);
                    }
                    if self.ctx.options.mod_encoding == ModEncoding::Simplest {
                        self.ctx.uses_frac = true;
                        let frac = &self.ctx.names.frac;
                        out.push_str(&format!("* ({frac}{lhs}{rhs}{rhs}"));
                    } else {
                        let modulus = &self.ctx.names.modulus;
                        out.push_str(&format!("{modulus}{lhs}{rhs}"));
                    }
                    level = close(level, &token)?;
                }
                ("abs", _) => {
                    self.ctx.uses_abs = true;
                    out.push_str(&self.ctx.names.abs);
                }
                ("<=", Polarity::Negative) if relax => {
                    let bound = self.operand(0, Polarity::Neutral, collect)?;
                    out.push_str(&format!("< (-{bound} 1)"));
                }
                (">=", Polarity::Negative) if relax => {
                    let bound = self.operand(0, Polarity::Neutral, collect)?;
                    out.push_str(&format!("> (+{bound} 1)"));
                }
                ("<", Polarity::Positive) if relax => {
                    let bound = self.operand(0, Polarity::Neutral, collect)?;
                    out.push_str(&format!("<= (+{bound} 1)"));
                }
                (">", Polarity::Positive) if relax => {
                    let bound = self.operand(0, Polarity::Neutral, collect)?;
                    out.push_str(&format!(">= (-{bound} 1)"));
                }
                _ => out.push_str(&token),
            }

            if polarity != Polarity::Neutral {
                match token.as_str() {
                    "not" => {
                        out.push_str(&self.operand(1, polarity.flip(), collect)?);
                        level = close(level, &token)?;
                    }
                    "=>" => {
                        out.push_str(&self.operand(0, polarity.flip(), collect)?);
                        out.push_str(&self.operand(1, polarity, collect)?);
                        level = close(level, &token)?;
                    }
                    "=" | "xor" => {
                        out.push_str(&self.operand(0, Polarity::Neutral, collect)?);
                        out.push_str(&self.operand(1, Polarity::Neutral, collect)?);
                        level = close(level, &token)?;
                    }
                    "ite" => {
                        out.push_str(&self.operand(0, polarity.flip(), collect)?);
                        out.push_str(&self.operand(0, polarity, collect)?);
                        out.push_str(&self.operand(1, polarity, collect)?);
                        level = close(level, &token)?;
                    }
                    "and" | "or" | "assert" | "(" | ")" => {}
                    _ => {
                        // pairs inside local definitions mention bound parameters
                        if token.starts_with("define-") {
                            collect = false;
                        }
                        if level > 0 {
                            out.push_str(&self.operand(1, Polarity::Neutral, collect)?);
                            level -= 1;
                        }
                    }
                }
            }

            if level == 0 {
                return Ok(out);
            }
            after_open = token == "(";
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::FreshNames;
    use crate::options::RelaxOptions;

    fn rewrite_with(input: &str, options: RelaxOptions) -> (Vec<String>, RewriteContext) {
        let mut ctx = RewriteContext::new(options, FreshNames::allocate(input));
        let mut forms = Vec::new();
        {
            let mut rewriter = TermRewriter::new(Lexer::from_text(input), &mut ctx);
            while let Some(form) = rewriter.next_form().unwrap() {
                forms.push(form);
            }
        }
        (forms, ctx)
    }

    fn rewrite_one(input: &str) -> (String, RewriteContext) {
        let (mut forms, ctx) = rewrite_with(input, RelaxOptions::default());
        assert_eq!(forms.len(), 1);
        (forms.remove(0), ctx)
    }

    fn pair(a: &str, b: &str) -> OperandPair {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_plain_forms_are_reprinted() {
        let (forms, _) = rewrite_with(
            "(set-logic QF_NIA)\n(declare-fun x () Int)\n(check-sat)\n(exit)",
            RelaxOptions::default(),
        );
        assert_eq!(
            forms,
            vec!["(set-logic QF_NIA)", "(declare-fun x () Int)", "(check-sat)", "(exit)"]
        );
    }

    #[test]
    fn test_div_under_positive_comparison() {
        let (form, ctx) = rewrite_one("(assert (> (div x 2) 0))");
        assert_eq!(form, "(assert (>= (- (- (/ x 2) (uninterp_frac x 2)) 1) 0))");
        assert!(form.contains("(- (/ x 2) (uninterp_frac x 2))"));
        assert_eq!(ctx.div_pairs.into_iter().collect::<Vec<_>>(), vec![pair("x", "2")]);
        assert!(ctx.uses_frac);
    }

    #[test]
    fn test_not_flips_polarity() {
        let (form, _) = rewrite_one("(assert (not (<= a b)))");
        assert_eq!(form, "(assert (not (< (- a 1) b)))");
    }

    #[test]
    fn test_positive_non_strict_is_kept() {
        let (form, _) = rewrite_one("(assert (<= a b))");
        assert_eq!(form, "(assert (<= a b))");
        let (form, _) = rewrite_one("(assert (>= a b))");
        assert_eq!(form, "(assert (>= a b))");
    }

    #[test]
    fn test_positive_strict_is_relaxed() {
        let (form, _) = rewrite_one("(assert (< a b))");
        assert_eq!(form, "(assert (<= (+ a 1) b))");
    }

    #[test]
    fn test_negative_ge_is_relaxed() {
        let (form, _) = rewrite_one("(assert (not (>= a b)))");
        assert_eq!(form, "(assert (not (> (+ a 1) b)))");
    }

    #[test]
    fn test_relaxation_disabled() {
        let options = RelaxOptions {
            relax_inequalities: false,
            ..RelaxOptions::default()
        };
        let (forms, _) = rewrite_with("(assert (< a b))(assert (not (<= a b)))", options);
        assert_eq!(forms, vec!["(assert (< a b))", "(assert (not (<= a b)))"]);
    }

    #[test]
    fn test_implication_flips_antecedent_only() {
        let (form, _) = rewrite_one("(assert (=> (>= x 1) (> y 0)))");
        assert_eq!(form, "(assert (=> (> (+ x 1) 1) (>= (- y 1) 0)))");
    }

    #[test]
    fn test_equality_operands_are_neutral() {
        let (form, _) = rewrite_one("(assert (= (< a b) (> c d)))");
        assert_eq!(form, "(assert (= (< a b) (> c d)))");
    }

    #[test]
    fn test_xor_operands_are_neutral() {
        let (form, _) = rewrite_one("(assert (not (xor (< a b) (> c d))))");
        assert_eq!(form, "(assert (not (xor (< a b) (> c d))))");
        let (form, _) = rewrite_one("(assert (xor (<= a b) (>= c d)))");
        assert_eq!(form, "(assert (xor (<= a b) (>= c d)))");
    }

    #[test]
    fn test_ite_operands() {
        let (form, _) = rewrite_one("(assert (ite (> a b) (> c d) (> e f)))");
        // first operand is read flipped, the other two keep the outer polarity
        assert_eq!(form, "(assert (ite (> a b) (>= (- c 1) d) (>= (- e 1) f)))");
    }

    #[test]
    fn test_and_keeps_polarity_for_all_conjuncts() {
        let (form, _) = rewrite_one("(assert (and (< a b) (or (> c d) (not (<= e f)))))");
        assert_eq!(
            form,
            "(assert (and (<= (+ a 1) b) (or (>= (- c 1) d) (not (< (- e 1) f)))))"
        );
    }

    #[test]
    fn test_define_fun_body_is_not_collected() {
        let (form, ctx) = rewrite_one("(define-fun f ((x Int)) Int (div x 2))");
        assert_eq!(form, "(define-fun f ((x Int)) Int (- (/ x 2) (uninterp_frac x 2)))");
        assert!(ctx.div_pairs.is_empty());
        assert!(ctx.uses_frac);
    }

    #[test]
    fn test_mod_encodings() {
        let (form, ctx) = rewrite_one("(assert (= (mod x 3) 1))");
        assert_eq!(form, "(assert (= (uninterp_mod x 3) 1))");
        assert_eq!(ctx.div_pairs.into_iter().collect::<Vec<_>>(), vec![pair("x", "3")]);
        assert!(!ctx.uses_frac);

        let options = RelaxOptions {
            mod_encoding: ModEncoding::Simplest,
            ..RelaxOptions::default()
        };
        let (forms, ctx) = rewrite_with("(assert (= (mod x 3) 1))", options);
        assert_eq!(forms, vec!["(assert (= (* (uninterp_frac x 3) 3) 1))"]);
        assert!(ctx.uses_frac);
    }

    #[test]
    fn test_compound_operands_are_recorded_by_text() {
        let (form, ctx) = rewrite_one("(assert (= (div (* a b) (+ c 1)) 0))");
        assert_eq!(
            form,
            "(assert (= (- (/ (* a b) (+ c 1)) (uninterp_frac (* a b) (+ c 1))) 0))"
        );
        assert_eq!(
            ctx.div_pairs.into_iter().collect::<Vec<_>>(),
            vec![pair("(* a b)", "(+ c 1)")]
        );
        assert_eq!(ctx.mul_pairs.into_iter().collect::<Vec<_>>(), vec![pair("a", "b")]);
    }

    #[test]
    fn test_duplicate_pairs_are_merged() {
        let (forms, ctx) = rewrite_with(
            "(assert (= (div x 2) 1))(assert (= (mod x 2) 0))",
            RelaxOptions::default(),
        );
        assert_eq!(forms.len(), 2);
        assert_eq!(ctx.div_pairs.len(), 1);
    }

    #[test]
    fn test_abs_is_replaced() {
        let (form, ctx) = rewrite_one("(assert (= (abs x) 1))");
        assert_eq!(form, "(assert (= (uninterp_abs x) 1))");
        assert!(ctx.uses_abs);
    }

    #[test]
    fn test_fresh_name_avoids_input_symbols() {
        let (forms, _) = rewrite_with(
            "(declare-fun uninterp_frac () Int)(assert (> (div uninterp_frac 2) 0))",
            RelaxOptions::default(),
        );
        assert!(forms[1].contains("(uninterp_frac0 uninterp_frac 2)"));
    }

    #[test]
    fn test_quoted_symbols_pass_through() {
        let (form, ctx) = rewrite_one("(assert (= (div |x y| 2) 0))");
        assert_eq!(form, "(assert (= (- (/ |x y| 2) (uninterp_frac |x y| 2)) 0))");
        assert!(ctx.div_pairs.contains(&pair("|x y|", "2")));
    }

    #[test]
    fn test_top_level_atom_is_rejected() {
        let mut ctx = RewriteContext::new(RelaxOptions::default(), FreshNames::allocate(""));
        let mut rewriter = TermRewriter::new(Lexer::from_text("check-sat"), &mut ctx);
        assert!(matches!(
            rewriter.next_form(),
            Err(RelaxError::ExpectedOpenParen { token }) if token == "check-sat"
        ));
    }

    #[test]
    fn test_unclosed_form_is_rejected() {
        let mut ctx = RewriteContext::new(RelaxOptions::default(), FreshNames::allocate(""));
        let mut rewriter = TermRewriter::new(Lexer::from_text("(assert (> x 0)"), &mut ctx);
        assert!(matches!(rewriter.next_form(), Err(RelaxError::UnexpectedEof)));
    }

    #[test]
    fn test_stray_close_in_operand() {
        let mut ctx = RewriteContext::new(RelaxOptions::default(), FreshNames::allocate(""));
        let mut rewriter = TermRewriter::new(Lexer::from_text(")"), &mut ctx);
        assert!(matches!(
            rewriter.rewrite(0, Polarity::Neutral, true, false),
            Err(RelaxError::UnbalancedParen { .. })
        ));
    }

    #[test]
    fn test_lex_error_surfaces() {
        let mut ctx = RewriteContext::new(RelaxOptions::default(), FreshNames::allocate(""));
        let mut rewriter = TermRewriter::new(Lexer::from_text(r"(assert |a\z|)"), &mut ctx);
        assert!(matches!(rewriter.next_form(), Err(RelaxError::Lex(_))));
    }

    #[test]
    fn test_subterm_in_isolation() {
        let mut ctx = RewriteContext::new(RelaxOptions::default(), FreshNames::allocate(""));
        let mut rewriter = TermRewriter::new(Lexer::from_text("(div a b)"), &mut ctx);
        let text = rewriter.rewrite(0, Polarity::Neutral, false, true).unwrap();
        assert_eq!(text, "(- (/ a b) (uninterp_frac a b))");
        assert!(ctx.div_pairs.is_empty());
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 20_000;
        let input = format!("(assert {}p{})", "(not ".repeat(depth), ")".repeat(depth + 1));
        let (form, _) = rewrite_one(&input);
        assert_eq!(form, input);
    }
}
