use crate::sparsity::Sparsity;
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

impl Sparsity {
    /// Print the pattern row by row, `*` for a nonzero and `.` otherwise.
    pub fn spy(&self, out: &mut impl Write) -> Result<()> {
        let mut lines = vec![vec![b'.'; self.ncol()]; self.nrow()];
        for (r, c) in self.entries() {
            lines[r][c] = b'*';
        }
        for line in lines.iter() {
            out.write_all(line)?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write a MATLAB script that rebuilds the pattern and calls `spy`.
    pub fn spy_matlab(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_matlab(&mut out)?;
        out.flush()
    }

    fn write_matlab(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "% sparsity pattern {}", self.dim(true))?;
        writeln!(out, "n = {};", self.nrow())?;
        writeln!(out, "m = {};", self.ncol())?;

        // MATLAB indices are one based
        let (rows, cols) = self.get_triplet();
        let list = |v: &[usize]| {
            v.iter()
                .map(|i| (i + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        writeln!(out, "sp_row = [{}];", list(&rows))?;
        writeln!(out, "sp_col = [{}];", list(&cols))?;

        writeln!(out, "M = sparse(sp_row, sp_col, 1, n, m);")?;
        writeln!(out, "spy(M);")?;
        Ok(())
    }
}
