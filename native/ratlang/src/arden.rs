//! From automata back to rational expressions.
//!
//! An automaton with states `0..n` is read as the linear system
//!
//! ```text
//! X_i = label[i][0]·X_0 + ... + label[i][n-1]·X_(n-1) + boundary[i]
//! ```
//!
//! over regular languages, where `X_i` is the language accepted from state
//! `i`. Variables are eliminated one at a time with Arden's lemma
//! (`X = A·X + B` has least solution `X = A*·B` when ε ∉ A) and substitution,
//! until each row is a closed expression.

use crate::formlang::Automaton;
use crate::rational::{self, Expr, Language};
use std::fmt;

/// One equation: `n` coefficients followed by the boundary term. `None` is
/// the empty language.
pub type Row = Vec<Option<Expr>>;

/// The `n × (n + 1)` table of an automaton's language equations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSystem {
    rows: Vec<Row>,
}

impl EquationSystem {
    /// Read the equations of `automaton`. Parallel transitions between the
    /// same pair of states collapse into a union of letters; final states get
    /// ε as boundary term.
    pub fn from_automaton(automaton: &Automaton) -> Self {
        let n = automaton.num_states() as usize;
        let mut rows: Vec<Row> = vec![vec![None; n + 1]; n];

        automaton.for_each_transition(|origin, letter, destination| {
            let cell = &mut rows[origin as usize][destination as usize];
            *cell = rational::union(cell.take(), Some(Expr::letter(letter)));
        });

        for state in automaton.final_states().iter() {
            rows[state as usize][n] = Some(Expr::epsilon());
        }

        Self { rows }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, variable: usize) -> &[Option<Expr>] {
        &self.rows[variable]
    }

    /// Whether every coefficient has been eliminated.
    pub fn is_solved(&self) -> bool {
        let n = self.len();
        self.rows
            .iter()
            .all(|row| row[..n].iter().all(Option::is_none))
    }

    /// Closed form of `X_variable`, once solved.
    pub fn solution(&self, variable: usize) -> Option<&Expr> {
        self.rows[variable][self.len()].as_ref()
    }

    /// Solve by Gaussian elimination.
    ///
    /// The downward pass leaves row `v` referring only to variables below
    /// `v`; the upward pass then closes rows from `X_0` up.
    pub fn solve(&mut self) {
        let n = self.len();
        if n == 0 {
            return;
        }

        for v in (1..n).rev() {
            arden_eliminate(&mut self.rows[v], v, n);
            let (above, rest) = self.rows.split_at_mut(v);
            for row in above {
                substitute(row, v, &rest[0], n);
            }
        }

        for v in 0..n - 1 {
            arden_eliminate(&mut self.rows[v], v, n);
            let (upto, below) = self.rows.split_at_mut(v + 1);
            for row in below {
                substitute(row, v, &upto[v], n);
            }
        }

        arden_eliminate(&mut self.rows[0], 0, n);
        debug_assert!(self.is_solved());
    }
}

/// Remove the self-reference of `X_variable` from its own equation.
///
/// `X = A·X + B_0·X_0 + ... + C` becomes `X = A*·B_0·X_0 + ... + A*·C`. When
/// `A·X` is the only term left, the boundary is set to `A*`.
pub fn arden_eliminate(row: &mut [Option<Expr>], variable: usize, n: usize) {
    let Some(coefficient) = row[variable].take() else {
        return;
    };
    let repeated = Expr::star(coefficient);

    let mut any = false;
    for (column, cell) in row.iter_mut().enumerate().take(n + 1) {
        if column == variable {
            continue;
        }
        if let Some(term) = cell.take() {
            *cell = Some(Expr::concat(repeated.clone(), term));
            any = true;
        }
    }

    if !any {
        row[n] = Some(repeated);
    }
}

/// Replace `X_variable` in `row` by its closed form `solved`.
pub fn substitute(row: &mut [Option<Expr>], variable: usize, solved: &[Option<Expr>], n: usize) {
    let Some(coefficient) = row[variable].take() else {
        return;
    };

    for column in 0..=n {
        if let Some(term) = &solved[column] {
            let product = Expr::concat(coefficient.clone(), term.clone());
            row[column] = rational::union(row[column].take(), Some(product));
        }
    }
}

/// Rational expression for the language of `automaton`: the union of the
/// solutions of its initial states. `None` when the language is empty.
///
/// `automaton` must be trim: a state that loops on itself but reaches no
/// final state is read as accepting the star of its loop. Glushkov automata
/// and the output of [`Automaton::minimize`] are trim.
pub fn arden(automaton: &Automaton) -> Option<Expr> {
    let mut system = EquationSystem::from_automaton(automaton);
    tracing::trace!(equations = %system, "equation system");
    system.solve();
    tracing::trace!(solution = %system, "solved equation system");

    let expr = automaton
        .initial_states()
        .iter()
        .map(|state| system.solution(state as usize).cloned())
        .fold(None, rational::union);

    tracing::debug!(expression = %Language(expr.as_ref()), "Arden elimination");
    expr
}

impl fmt::Display for EquationSystem {
    /// One line per equation: `X0 = c0 X0 + c1 X1 + ... + boundary`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.len();
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "X{i}\t= ")?;
            for (j, cell) in row.iter().enumerate() {
                if j < n {
                    write!(f, "{} X{j}\t+\t", Language(cell.as_ref()))?;
                } else {
                    writeln!(f, "{}", Language(cell.as_ref()))?;
                }
            }
        }
        Ok(())
    }
}
