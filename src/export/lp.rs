//! CPLEX LP text writer.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::qubo::QuboObjective;

/// Terms per objective line; CPLEX rejects lines past 510 characters.
const TERMS_PER_LINE: usize = 6;

/// LP export switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LpOptions {
    /// Emit a `Binaries` section instead of leaving variables continuous
    /// on `[0, 1]`.
    pub binaries: bool,
}

/// Appends one signed term; the first term of a block omits a leading `+`.
fn push_term(out: &mut String, count: &mut usize, coefficient: f64, body: &str) {
    if *count > 0 && *count % TERMS_PER_LINE == 0 {
        out.push_str("\n     ");
    }
    let sign = if coefficient < 0.0 { "-" } else { "+" };
    if *count == 0 && coefficient >= 0.0 {
        let _ = write!(out, " {} {}", coefficient, body);
    } else {
        let _ = write!(out, " {} {} {}", sign, coefficient.abs(), body);
    }
    *count += 1;
}

/// Renders `objective` in CPLEX LP format.
///
/// Quadratic terms go inside `[ ... ] / 2` with doubled coefficients, and
/// every variable is bounded to `[0, 1]`.
///
/// # Examples
///
/// ```
/// use qubo_routing::distance::sample;
/// use qubo_routing::export::{to_lp_string, LpOptions};
/// use qubo_routing::qubo::assemble;
///
/// let objective = assemble(&sample::five_node(), 2, 1000.0);
/// let lp = to_lp_string(&objective, LpOptions::default());
/// assert!(lp.starts_with("\\ "));
/// assert!(lp.contains("0 <= x_0_1 <= 1"));
/// assert!(lp.trim_end().ends_with("End"));
/// ```
pub fn to_lp_string(objective: &QuboObjective, options: LpOptions) -> String {
    let grid = objective.grid();
    let expression = objective.expression();
    let name = |id| grid.arc(id).name();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "\\ QUBO routing model: {} nodes, {} vehicles, penalty weight {}",
        grid.nodes(),
        objective.vehicles(),
        objective.penalty_weight()
    );
    out.push_str("Minimize\n obj:");

    let mut count = 0;
    for (v, c) in expression.linear_terms() {
        push_term(&mut out, &mut count, c, &name(v));
    }

    if expression.num_quadratic() > 0 {
        if count == 0 {
            out.push_str(" [");
        } else {
            out.push_str("\n      + [");
        }
        let mut inner = 0;
        for ((a, b), c) in expression.quadratic_terms() {
            let body = format!("{} * {}", name(a), name(b));
            push_term(&mut out, &mut inner, 2.0 * c, &body);
        }
        out.push_str(" ] / 2");
        count += 1;
    }

    let constant = expression.constant_term();
    if constant != 0.0 || count == 0 {
        push_term(&mut out, &mut count, constant, "");
        // drop the trailing space left by the empty variable name
        out.truncate(out.trim_end().len());
    }
    out.push('\n');

    out.push_str("Subject To\nBounds\n");
    for arc in grid.arcs() {
        let _ = writeln!(out, " 0 <= {} <= 1", arc.name());
    }

    if options.binaries && !grid.is_empty() {
        out.push_str("Binaries\n");
        for arc in grid.arcs() {
            let _ = writeln!(out, " {}", arc.name());
        }
    }
    out.push_str("End\n");
    out
}

/// Writes the LP text of `objective` to `writer`.
pub fn write_lp<W: Write>(objective: &QuboObjective, writer: &mut W, options: LpOptions) -> io::Result<()> {
    writer.write_all(to_lp_string(objective, options).as_bytes())
}

/// Writes the LP text of `objective` to a file at `path`.
pub fn export_lp(objective: &QuboObjective, path: impl AsRef<Path>, options: LpOptions) -> io::Result<()> {
    fs::write(path, to_lp_string(objective, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::qubo::assemble;

    fn two_node() -> QuboObjective {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 3.0], vec![4.5, 0.0]]).expect("valid");
        assemble(&dm, 1, 10.0)
    }

    #[test]
    fn test_two_node_text() {
        // x_0_1: 3 − 10 − 10, x_1_0: 4.5 − 10 − 10, constant 4 · 10
        let lp = to_lp_string(&two_node(), LpOptions::default());
        let expected = "\\ QUBO routing model: 2 nodes, 1 vehicles, penalty weight 10\n\
                        Minimize\n \
                        obj: - 17 x_0_1 - 15.5 x_1_0 + 40\n\
                        Subject To\n\
                        Bounds\n \
                        0 <= x_0_1 <= 1\n \
                        0 <= x_1_0 <= 1\n\
                        End\n";
        assert_eq!(lp, expected);
    }

    #[test]
    fn test_binaries_section() {
        let lp = to_lp_string(&two_node(), LpOptions { binaries: true });
        assert!(lp.contains("Binaries\n x_0_1\n x_1_0\nEnd\n"));
    }

    #[test]
    fn test_quadratic_block_doubles_coefficients() {
        let dm = DistanceMatrix::new(3);
        let lp = to_lp_string(&assemble(&dm, 1, 1.0), LpOptions::default());
        // pair coefficient 2A is written as 4 inside [ ] / 2
        assert!(lp.contains("[ 4 x_0_1 * x_0_2"));
        assert!(lp.contains("] / 2"));
        for line in lp.lines() {
            assert!(line.len() < 510);
        }
    }

    #[test]
    fn test_leading_sign_per_block() {
        // zero distances, A = 1: every linear coefficient is −2, pairs are 2
        let lp = to_lp_string(&assemble(&DistanceMatrix::new(3), 1, 1.0), LpOptions::default());
        assert!(lp.contains("obj: - 2 x_0_1 - 2 x_0_2 - 2 x_1_0"));
        assert!(lp.contains("+ [ 4 x_0_1 * x_0_2 + 4 "));
        // six constraints with target 1
        assert!(lp.contains("] / 2 + 6\n"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("qubo.lp");
        export_lp(&two_node(), &path, LpOptions::default()).expect("write");
        let text = std::fs::read_to_string(&path).expect("read");
        assert_eq!(text, to_lp_string(&two_node(), LpOptions::default()));

        let mut buf = Vec::new();
        write_lp(&two_node(), &mut buf, LpOptions::default()).expect("write");
        assert_eq!(buf, text.into_bytes());
    }
}
