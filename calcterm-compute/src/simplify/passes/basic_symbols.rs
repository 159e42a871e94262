//! Rewriting of symbolic constant aliases into their canonical forms.

use crate::expr::{builder, visit::Restructurer, Expr};
use std::rc::Rc;

/// Alias names and the canonical symbols they rewrite to.
const ALIASES: &[(&str, &str)] = &[("π", "pi")];

/// Rewrites zero-argument symbol aliases into their canonical symbols, so later passes and the
/// evaluator only ever see one spelling of each named constant.
pub struct BasicSymbols;

impl Restructurer for BasicSymbols {
    fn symbol(&mut self, name: &str, children: Vec<Rc<Expr>>) -> Rc<Expr> {
        if children.is_empty() {
            if let Some((_, canonical)) = ALIASES.iter().find(|(alias, _)| *alias == name) {
                return builder::symbol(*canonical);
            }
        }
        builder::symbol_call(name, children)
    }
}
