//! Position numbering: give every letter occurrence a unique position.

use crate::rational::expr::{Expr, Position, Span};

/// Counter threaded through one numbering walk.
struct Numbering {
    next: Position,
}

impl Numbering {
    fn new() -> Self {
        Self { next: 1 }
    }

    /// Number `expr` and return the span of positions it received.
    fn visit(&mut self, expr: &mut Expr) -> Span {
        match expr {
            Expr::Epsilon => Span::default(),
            Expr::Letter { position, .. } => {
                *position = self.next;
                self.next += 1;
                Span::new(*position, *position)
            }
            Expr::Union { left, right, span } | Expr::Concat { left, right, span } => {
                let left_span = self.visit(left);
                let right_span = self.visit(right);
                *span = merge(left_span, right_span);
                *span
            }
            Expr::Star { child, span } => {
                *span = self.visit(child);
                *span
            }
        }
    }
}

/// Left child is numbered first, so its positions are all smaller.
fn merge(left: Span, right: Span) -> Span {
    match (left.is_numbered(), right.is_numbered()) {
        (true, true) => Span::new(left.min(), right.max()),
        (true, false) => left,
        (false, _) => right,
    }
}

/// Number the letters of `expr` 1, 2, ... from left to right and record on
/// every internal node the range of positions below it.
///
/// Any previous numbering is discarded, which invalidates automata built
/// from it. Returns the number of letters.
pub fn number(expr: &mut Expr) -> Position {
    let mut numbering = Numbering::new();
    numbering.visit(expr);
    let count = numbering.next - 1;
    tracing::trace!(letters = count, "numbered expression");
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(expr: &Expr, out: &mut Vec<(char, Position)>) {
        match expr {
            Expr::Epsilon => {}
            Expr::Letter { letter, position } => out.push((*letter, *position)),
            Expr::Union { left, right, .. } | Expr::Concat { left, right, .. } => {
                positions(left, out);
                positions(right, out);
            }
            Expr::Star { child, .. } => positions(child, out),
        }
    }

    #[test]
    fn test_number_left_to_right() {
        // (a + b).c*
        let mut expr = Expr::concat(
            Expr::union(Expr::letter('a'), Expr::letter('b')),
            Expr::star(Expr::letter('c')),
        );
        assert_eq!(number(&mut expr), 3);

        let mut seen = Vec::new();
        positions(&expr, &mut seen);
        assert_eq!(seen, vec![('a', 1), ('b', 2), ('c', 3)]);

        assert_eq!(expr.position_min(), 1);
        assert_eq!(expr.position_max(), 3);
        assert_eq!(expr.left().position_max(), 2);
        assert_eq!(expr.right().position_min(), 3);
        assert!(expr.is_numbered());
    }

    #[test]
    fn test_epsilon_is_not_numbered() {
        // (a + ε).b
        let mut expr = Expr::concat(
            Expr::union(Expr::letter('a'), Expr::epsilon()),
            Expr::letter('b'),
        );
        assert_eq!(number(&mut expr), 2);
        assert_eq!(expr.left().position_min(), 1);
        assert_eq!(expr.left().position_max(), 1);
        assert_eq!(expr.right().position_min(), 2);

        let mut only_epsilon = Expr::star(Expr::epsilon());
        assert_eq!(number(&mut only_epsilon), 0);
        assert_eq!(only_epsilon.position_min(), 0);
    }

    #[test]
    fn test_renumbering_restarts_at_one() {
        let mut expr = Expr::concat(Expr::letter('a'), Expr::letter('a'));
        number(&mut expr);
        assert_eq!(number(&mut expr), 2);
        assert_eq!(expr.right().position_min(), 2);
    }
}
