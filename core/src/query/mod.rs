//! Boolean queries over a [`PostingStore`].
//!
//! Terms are word runs joined by `&&`, `||` and prefix `!`, grouped with
//! parentheses. Each term becomes a bitmap over the current corpus and the
//! expression is evaluated bitwise.

mod lexer;
mod parser;

pub use parser::{Expr, MAX_DEPTH};

use crate::bitmap::Bitmap;
use crate::error::{Malformed, QueryError};
use crate::index::PostingStore;

/// Never valid in a term or an operator.
const FORBIDDEN: [char; 6] = [',', '.', '/', '?', '\'', '"'];

/// Parse `query`. The empty string parses to `None`.
pub fn parse(query: &str) -> Result<Option<Expr>, QueryError> {
    if let Some((offset, ch)) = query.char_indices().find(|(_, ch)| FORBIDDEN.contains(ch)) {
        return Err(Malformed::ForbiddenCharacter { ch, offset }.into());
    }
    if query.is_empty() {
        return Ok(None);
    }
    let expr = parser::Parser::new(query)?.parse()?;
    tracing::trace!(%expr, "parsed query");
    Ok(Some(expr))
}

/// Evaluates queries against a snapshot of a store. Holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    store: &'a PostingStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a PostingStore) -> Self {
        Self { store }
    }

    /// Names of the matching documents in ascending id order.
    ///
    /// `Ok(None)` means no query was run (empty input); `Ok(Some(vec![]))`
    /// means the query ran and matched nothing.
    pub fn evaluate(&self, query: &str) -> Result<Option<Vec<String>>, QueryError> {
        let Some(bitmap) = self.evaluate_bitmap(query)? else {
            return Ok(None);
        };
        let names = bitmap
            .ones()
            .filter_map(|pos| self.store.document_name(pos as u32 + 1))
            .map(str::to_owned)
            .collect();
        Ok(Some(names))
    }

    pub fn evaluate_bitmap(&self, query: &str) -> Result<Option<Bitmap>, QueryError> {
        Ok(parse(query)?.map(|expr| self.eval(&expr)))
    }

    /// Evaluate an already-parsed expression.
    pub fn eval(&self, expr: &Expr) -> Bitmap {
        match expr {
            Expr::Term(term) => self.store.resolve(term),
            Expr::And(operands) => self.fold(operands, |acc, next| &acc & &next),
            Expr::Or(operands) => self.fold(operands, |acc, next| &acc | &next),
            Expr::Not(inner) => !self.eval(inner),
            Expr::Group(inner) => self.eval(inner),
        }
    }

    fn fold(&self, operands: &[Expr], op: fn(Bitmap, Bitmap) -> Bitmap) -> Bitmap {
        let mut operands = operands.iter().map(|operand| self.eval(operand));
        match operands.next() {
            Some(first) => operands.fold(first, op),
            None => Bitmap::zeros(self.store.len()),
        }
    }
}
