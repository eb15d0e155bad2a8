//! PyO3 bindings.
//!
//! Exposes the Glushkov construction, Arden elimination and the
//! equivalence check to Python. Parse errors raise `ValueError`.

use crate::arden::arden;
use crate::equivalence;
use crate::error::ParseError;
use crate::formlang::{Automaton, StateId};
use crate::glushkov::glushkov_from;
use crate::rational;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PySet;

impl From<ParseError> for PyErr {
    fn from(err: ParseError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// A finite automaton over single-character letters.
#[pyclass(name = "Automaton", module = "ratlang")]
#[derive(Clone, Default)]
pub struct PyAutomaton {
    automaton: Automaton,
}

#[pymethods]
impl PyAutomaton {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn add_transition(&mut self, origin: StateId, letter: char, destination: StateId) {
        self.automaton.add_transition(origin, letter, destination);
    }

    fn add_initial_state(&mut self, state: StateId) {
        self.automaton.add_initial_state(state);
    }

    fn add_final_state(&mut self, state: StateId) {
        self.automaton.add_final_state(state);
    }

    #[getter]
    fn num_states(&self) -> StateId {
        self.automaton.num_states()
    }

    #[getter]
    fn initial_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.automaton.initial_states().iter() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    #[getter]
    fn final_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.automaton.final_states().iter() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    /// Transitions as `(origin, letter, destination)` tuples, sorted.
    #[getter]
    fn transitions(&self) -> Vec<(StateId, char, StateId)> {
        self.automaton.transitions().collect()
    }

    #[getter]
    fn alphabet(&self) -> Vec<char> {
        self.automaton.alphabet().iter().copied().collect()
    }

    fn accepts(&self, word: &str) -> bool {
        self.automaton.accepts(word)
    }

    fn is_empty(&self) -> bool {
        self.automaton.is_empty()
    }

    /// Canonical minimal automaton for the same language.
    fn minimize(&self) -> PyAutomaton {
        PyAutomaton {
            automaton: self.automaton.minimize(),
        }
    }

    /// Rational expression for the accepted language, or `None` when it is
    /// empty. The automaton must be trim; call `minimize()` first otherwise.
    fn to_regex(&self) -> Option<String> {
        arden(&self.automaton).map(|expr| expr.to_string())
    }

    fn to_dot(&self) -> String {
        self.automaton.to_dot()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, initial={}, final={})",
            self.automaton.num_states(),
            self.automaton.initial_states(),
            self.automaton.final_states()
        )
    }
}

/// Glushkov automaton of an expression given as text.
#[pyfunction]
fn glushkov(text: &str) -> PyResult<PyAutomaton> {
    let expr = rational::parse(text)?;
    Ok(PyAutomaton {
        automaton: glushkov_from(expr.as_ref()),
    })
}

/// Whether two expressions denote the same language.
#[pyfunction]
fn same_language(first: &str, second: &str) -> PyResult<bool> {
    Ok(equivalence::same_language(first, second)?)
}

/// Fully parenthesized rendering of an expression, `∅` for the empty
/// language.
#[pyfunction]
fn normalize(text: &str) -> PyResult<String> {
    let expr = rational::parse(text)?;
    Ok(rational::Language(expr.as_ref()).to_string())
}

#[pymodule]
fn ratlang(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    m.add_function(wrap_pyfunction!(glushkov, m)?)?;
    m.add_function(wrap_pyfunction!(same_language, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    Ok(())
}
