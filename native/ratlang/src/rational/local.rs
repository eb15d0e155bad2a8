//! Nullability and local position sets of a numbered expression.
//!
//! `first`, `last` and `follow` return sets of positions; they are only
//! meaningful once [`number`](crate::rational::number) has run on the tree.

use crate::formlang::StateSet;
use crate::rational::expr::{Expr, Position};

/// Whether the language of `expr` contains the empty word.
pub fn nullable(expr: &Expr) -> bool {
    match expr {
        Expr::Epsilon | Expr::Star { .. } => true,
        Expr::Letter { .. } => false,
        Expr::Union { left, right, .. } => nullable(left) || nullable(right),
        Expr::Concat { left, right, .. } => nullable(left) && nullable(right),
    }
}

/// Positions that can start a word of the language.
pub fn first(expr: &Expr) -> StateSet {
    match expr {
        Expr::Epsilon => StateSet::new(),
        Expr::Letter { position, .. } => StateSet::singleton(*position),
        Expr::Union { left, right, .. } => first(left).union(&first(right)),
        Expr::Concat { left, right, .. } => {
            let mut positions = first(left);
            if nullable(left) {
                positions.union_with(&first(right));
            }
            positions
        }
        Expr::Star { child, .. } => first(child),
    }
}

/// Positions that can end a word of the language.
pub fn last(expr: &Expr) -> StateSet {
    match expr {
        Expr::Epsilon => StateSet::new(),
        Expr::Letter { position, .. } => StateSet::singleton(*position),
        Expr::Union { left, right, .. } => last(left).union(&last(right)),
        Expr::Concat { left, right, .. } => {
            let mut positions = last(right);
            if nullable(right) {
                positions.union_with(&last(left));
            }
            positions
        }
        Expr::Star { child, .. } => last(child),
    }
}

/// Positions that can immediately follow `position` in a word of the
/// language.
pub fn follow(expr: &Expr, position: Position) -> StateSet {
    // Nothing below this node can involve a position outside its span.
    if !expr.span().is_some_and(|span| span.contains(position)) {
        return StateSet::new();
    }

    match expr {
        Expr::Epsilon | Expr::Letter { .. } => StateSet::new(),
        Expr::Union { left, right, .. } => follow(left, position).union(&follow(right, position)),
        Expr::Concat { left, right, .. } => {
            let mut positions = follow(left, position).union(&follow(right, position));
            if last(left).contains(position) {
                positions.union_with(&first(right));
            }
            positions
        }
        Expr::Star { child, .. } => {
            let mut positions = follow(child, position);
            if last(child).contains(position) {
                positions.union_with(&first(child));
            }
            positions
        }
    }
}

/// `follow(expr, p)` for every position `p` at once, indexed by position
/// (index 0 is unused). One bottom-up pass: a concatenation links the last
/// positions of its left operand to the first of its right one, a star
/// links its own last positions back to its first.
pub fn follow_all(expr: &Expr) -> Vec<StateSet> {
    let mut follows = vec![StateSet::new(); expr.letter_count() + 1];
    collect_follows(expr, &mut follows);
    follows
}

/// Nullability, first and last positions of one subtree.
struct Summary {
    nullable: bool,
    first: StateSet,
    last: StateSet,
}

fn collect_follows(expr: &Expr, follows: &mut [StateSet]) -> Summary {
    match expr {
        Expr::Epsilon => Summary {
            nullable: true,
            first: StateSet::new(),
            last: StateSet::new(),
        },
        Expr::Letter { position, .. } => Summary {
            nullable: false,
            first: StateSet::singleton(*position),
            last: StateSet::singleton(*position),
        },
        Expr::Union { left, right, .. } => {
            let left = collect_follows(left, follows);
            let right = collect_follows(right, follows);
            Summary {
                nullable: left.nullable || right.nullable,
                first: left.first.union(&right.first),
                last: left.last.union(&right.last),
            }
        }
        Expr::Concat { left, right, .. } => {
            let left = collect_follows(left, follows);
            let right = collect_follows(right, follows);
            for position in left.last.iter() {
                follows[position as usize].union_with(&right.first);
            }
            let mut first = left.first;
            if left.nullable {
                first.union_with(&right.first);
            }
            let mut last = right.last;
            if right.nullable {
                last.union_with(&left.last);
            }
            Summary {
                nullable: left.nullable && right.nullable,
                first,
                last,
            }
        }
        Expr::Star { child, .. } => {
            let child = collect_follows(child, follows);
            for position in child.last.iter() {
                follows[position as usize].union_with(&child.first);
            }
            Summary {
                nullable: true,
                ..child
            }
        }
    }
}

/// Letter carried by `position`, found by descending into the child whose
/// span contains it.
pub fn letter_at(expr: &Expr, position: Position) -> Option<char> {
    match expr {
        Expr::Epsilon => None,
        Expr::Letter {
            letter,
            position: p,
        } => (*p == position).then_some(*letter),
        Expr::Union { left, right, span } | Expr::Concat { left, right, span } => {
            if !span.contains(position) {
                None
            } else if left.span().is_some_and(|s| s.contains(position)) {
                letter_at(left, position)
            } else {
                letter_at(right, position)
            }
        }
        Expr::Star { child, span } => {
            if span.contains(position) {
                letter_at(child, position)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::number;

    fn numbered(mut expr: Expr) -> Expr {
        number(&mut expr);
        expr
    }

    /// (a + b)*.a.b  positions: a=1, b=2, a=3, b=4
    fn sample() -> Expr {
        numbered(Expr::concat(
            Expr::concat(
                Expr::star(Expr::union(Expr::letter('a'), Expr::letter('b'))),
                Expr::letter('a'),
            ),
            Expr::letter('b'),
        ))
    }

    #[test]
    fn test_nullable() {
        assert!(nullable(&Expr::epsilon()));
        assert!(nullable(&Expr::star(Expr::letter('a'))));
        assert!(!nullable(&Expr::letter('a')));
        assert!(nullable(&Expr::union(Expr::letter('a'), Expr::epsilon())));
        assert!(!nullable(&Expr::concat(
            Expr::star(Expr::letter('a')),
            Expr::letter('b')
        )));
        assert!(!nullable(&sample()));
    }

    #[test]
    fn test_first_and_last() {
        let expr = sample();
        assert_eq!(first(&expr).to_vec(), vec![1, 2, 3]);
        assert_eq!(last(&expr).to_vec(), vec![4]);

        let star = numbered(Expr::concat(
            Expr::letter('a'),
            Expr::star(Expr::letter('b')),
        ));
        assert_eq!(first(&star).to_vec(), vec![1]);
        assert_eq!(last(&star).to_vec(), vec![1, 2]);

        assert!(first(&Expr::epsilon()).is_empty());
        assert!(last(&Expr::epsilon()).is_empty());
    }

    #[test]
    fn test_follow() {
        let expr = sample();
        assert_eq!(follow(&expr, 1).to_vec(), vec![1, 2, 3]);
        assert_eq!(follow(&expr, 2).to_vec(), vec![1, 2, 3]);
        assert_eq!(follow(&expr, 3).to_vec(), vec![4]);
        assert!(follow(&expr, 4).is_empty());
        assert!(follow(&expr, 99).is_empty());
    }

    #[test]
    fn test_follow_without_loops_is_sequential() {
        // a.b.c
        let expr = numbered(Expr::concat(
            Expr::concat(Expr::letter('a'), Expr::letter('b')),
            Expr::letter('c'),
        ));
        assert_eq!(follow(&expr, 1).to_vec(), vec![2]);
        assert_eq!(follow(&expr, 2).to_vec(), vec![3]);
        assert!(follow(&expr, 3).is_empty());
    }

    #[test]
    fn test_follow_all_matches_follow() {
        let expr = numbered(Expr::concat(
            Expr::star(Expr::concat(
                Expr::union(Expr::letter('a'), Expr::epsilon()),
                Expr::star(Expr::letter('b')),
            )),
            Expr::union(Expr::letter('c'), Expr::star(Expr::letter('a'))),
        ));
        let follows = follow_all(&expr);
        assert_eq!(follows.len(), 5);
        for position in 1..=4 {
            assert_eq!(follows[position as usize], follow(&expr, position));
        }
    }

    #[test]
    fn test_letter_at() {
        let expr = sample();
        let letters: String = (1..=4).filter_map(|p| letter_at(&expr, p)).collect();
        assert_eq!(letters, "abab");
        assert_eq!(letter_at(&expr, 0), None);
        assert_eq!(letter_at(&expr, 5), None);
    }
}
