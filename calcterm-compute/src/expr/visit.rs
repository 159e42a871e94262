//! The restructurer: a post-order rebuilding traversal, and the base of every rewrite pass.
//!
//! [`Restructurer::visit`] descends into children first, left to right, then hands the node's
//! method the freshly rebuilt children; the method returns exactly one replacement expression.
//! Every method defaults to rebuilding the node unchanged through the builder (preserving the
//! sign vector for additions), so a rewrite pass overrides only the kinds it cares about and
//! inherits the rebuild for everything else. The input tree is never mutated; unchanged subtrees
//! are shared with the result by reference.

use crate::number::Number;
use std::rc::Rc;
use super::{builder, Expr, Sign};

pub trait Restructurer {
    /// Rebuilds the given expression bottom-up, dispatching each node to its method with the
    /// already restructured children in original order.
    fn visit(&mut self, expr: &Rc<Expr>) -> Rc<Expr> {
        match &**expr {
            Expr::Literal(n) => self.literal(n),
            Expr::Symbol { name, args } => {
                let children = args.iter().map(|arg| self.visit(arg)).collect();
                self.symbol(name, children)
            }
            Expr::Add { terms, signs } => {
                let children = terms.iter().map(|term| self.visit(term)).collect();
                self.add(children, signs)
            }
            Expr::Mul(factors) => {
                let children = factors.iter().map(|factor| self.visit(factor)).collect();
                self.multiply(children)
            }
            Expr::Div(top, bottom) => {
                let (top, bottom) = (self.visit(top), self.visit(bottom));
                self.divide(top, bottom)
            }
            Expr::Mod(top, bottom) => {
                let (top, bottom) = (self.visit(top), self.visit(bottom));
                self.modulus(top, bottom)
            }
            Expr::Pow(base, exponent) => {
                let (base, exponent) = (self.visit(base), self.visit(exponent));
                self.power(base, exponent)
            }
            Expr::Neg(operand) => {
                let operand = self.visit(operand);
                self.negate(operand)
            }
            Expr::Factorial(operand) => {
                let operand = self.visit(operand);
                self.factorial(operand)
            }
        }
    }

    fn literal(&mut self, n: &Number) -> Rc<Expr> {
        builder::literal(n.clone())
    }

    fn symbol(&mut self, name: &str, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        builder::symbol_call(name, children)
    }

    fn add(&mut self, children: Vec<Rc<Expr>>, signs: &[Sign]) -> Rc<Expr> {
        builder::add_signed(children, signs.to_vec())
    }

    fn multiply(&mut self, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        builder::multiply_all(children)
    }

    fn divide(&mut self, top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
        builder::divide(top, bottom)
    }

    fn modulus(&mut self, top: Rc<Expr>, bottom: Rc<Expr>) -> Rc<Expr> {
        builder::modulus(top, bottom)
    }

    fn power(&mut self, base: Rc<Expr>, exponent: Rc<Expr>) -> Rc<Expr> {
        builder::power(base, exponent)
    }

    fn negate(&mut self, operand: Rc<Expr>) -> Rc<Expr> {
        builder::negate(operand)
    }

    fn factorial(&mut self, operand: Rc<Expr>) -> Rc<Expr> {
        builder::factorial(operand)
    }
}

#[cfg(test)]
mod tests {
    use calcterm_parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    /// A restructurer with no overrides at all.
    struct Identity;

    impl Restructurer for Identity {}

    /// Renames every free `x` to `y`.
    struct RenameX;

    impl Restructurer for RenameX {
        fn symbol(&mut self, name: &str, children: Vec<Rc<Expr>>) -> Rc<Expr> {
            if name == "x" && children.is_empty() {
                builder::symbol("y")
            } else {
                builder::symbol_call(name, children)
            }
        }
    }

    fn parse(input: &str) -> Rc<Expr> {
        builder::build(&Parser::new(input).unwrap().parse().unwrap()).unwrap()
    }

    #[test]
    fn default_rebuild_is_structurally_identical() {
        let expr = parse("1+2*x^3-f(4,-5)!%6");
        assert_eq!(Identity.visit(&expr), expr);
    }

    #[test]
    fn default_rebuild_preserves_sign_vectors() {
        let expr = parse("a-b+c");
        assert_eq!(Identity.visit(&expr), expr);
    }

    #[test]
    fn overriding_one_kind_leaves_the_rest_to_the_default() {
        let expr = parse("x+2*x(1)");
        // the call `x(1)` keeps its name; only the free symbol is renamed
        let expected = parse("y+2*x(1)");
        assert_eq!(RenameX.visit(&expr), expected);
    }

    #[test]
    fn input_tree_is_left_unchanged() {
        let expr = parse("-(x+1)");
        let before = expr.clone();
        let _ = RenameX.visit(&expr);
        assert_eq!(expr, before);
    }
}
