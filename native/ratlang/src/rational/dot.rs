//! DOT export of expression trees, for debugging.

use crate::rational::expr::Expr;
use std::fmt::Write as _;

/// Render `expr` as a DOT digraph. Each node shows its tag and its position
/// range; letters show the letter and their position.
pub fn to_dot(expr: &Expr) -> String {
    let mut out = String::from("digraph G {\n");
    let mut next_id = 0;
    write_node(expr, None, &mut next_id, &mut out);
    out.push_str("}\n");
    out
}

/// Emit `expr` and its subtree, with an edge from `parent` if any.
fn write_node(expr: &Expr, parent: Option<usize>, next_id: &mut usize, out: &mut String) {
    let id = *next_id;
    *next_id += 1;

    if let Some(parent) = parent {
        let _ = writeln!(out, "\tnode{parent} -> node{id};");
    }

    let label = match expr {
        Expr::Epsilon => "ε".to_string(),
        Expr::Letter { letter, position } => format!("{letter}-{position}"),
        Expr::Union { span, .. } => format!("+ [{}/{}]", span.min(), span.max()),
        Expr::Concat { span, .. } => format!(". [{}/{}]", span.min(), span.max()),
        Expr::Star { span, .. } => format!("* [{}/{}]", span.min(), span.max()),
    };
    let _ = writeln!(out, "\tnode{id} [label = \"{label}\"];");

    match expr {
        Expr::Epsilon | Expr::Letter { .. } => {}
        Expr::Union { left, right, .. } | Expr::Concat { left, right, .. } => {
            write_node(left, Some(id), next_id, out);
            write_node(right, Some(id), next_id, out);
        }
        Expr::Star { child, .. } => {
            write_node(child, Some(id), next_id, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::number;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_dot() {
        let mut expr = Expr::concat(Expr::letter('a'), Expr::star(Expr::letter('b')));
        number(&mut expr);

        let expected = "digraph G {\n\
            \tnode0 [label = \". [1/2]\"];\n\
            \tnode0 -> node1;\n\
            \tnode1 [label = \"a-1\"];\n\
            \tnode0 -> node2;\n\
            \tnode2 [label = \"* [2/2]\"];\n\
            \tnode2 -> node3;\n\
            \tnode3 [label = \"b-2\"];\n\
            }\n";
        assert_eq!(to_dot(&expr), expected);
    }
}
