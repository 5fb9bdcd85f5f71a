use std::fmt;

use crate::zmatrix::ZVector;

use super::types::Cone;

/// One row per line, entries comma separated; every entry but the matrix's last
/// is followed by a comma.
fn write_rows(f: &mut fmt::Formatter<'_>, rows: &[ZVector]) -> fmt::Result {
    for (i, row) in rows.iter().enumerate() {
        let last_row = i + 1 == rows.len();
        for (j, x) in row.iter().enumerate() {
            write!(f, "{x}")?;
            if !(last_row && j + 1 == row.len()) {
                write!(f, ",")?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Diagnostic dump of the H-representation; not meant to be parsed back.
impl fmt::Display for Cone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.h_rep();
        writeln!(f, "AMBIENT_DIM")?;
        writeln!(f, "{}", self.ambient_dim)?;
        writeln!(f, "INEQUALITIES")?;
        write_rows(f, &h.inequalities)?;
        writeln!(f, "EQUATIONS")?;
        write_rows(f, &h.equations)
    }
}
