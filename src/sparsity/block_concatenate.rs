use super::{Sparsity, SparsityError};

impl Sparsity {
    /// Horizontal concatenation of patterns with a common row count.
    ///
    /// Operands with zero rows are accepted whatever the row count of the
    /// others, and contribute empty columns.
    pub fn horzcat(sp: &[Sparsity]) -> Result<Sparsity, SparsityError> {
        match sp {
            [] => return Ok(Sparsity::zeros(0, 0)),
            [single] => return Ok(single.clone()),
            _ => {}
        }

        let nnz_total = sp.iter().map(|s| s.nnz()).sum();
        let mut rows = Vec::with_capacity(nnz_total);
        let mut cols = Vec::with_capacity(nnz_total);

        let nrow = sp.iter().map(|s| s.nrow()).find(|&n| n != 0).unwrap_or(0);
        let mut ncol = 0;

        for s in sp {
            if s.nrow() != nrow && s.nrow() != 0 {
                return Err(SparsityError::mismatch(
                    "Sparsity::horzcat",
                    (nrow, ncol),
                    s.size(),
                ));
            }
            for (r, c) in s.entries() {
                rows.push(r);
                cols.push(c + ncol);
            }
            ncol += s.ncol();
        }

        Ok(Sparsity::triplet_unchecked(nrow, ncol, &rows, &cols, false).0)
    }

    /// Vertical concatenation of patterns with a common column count.
    ///
    /// Operands with zero columns are accepted whatever the column count
    /// of the others, and contribute empty rows.
    pub fn vertcat(sp: &[Sparsity]) -> Result<Sparsity, SparsityError> {
        match sp {
            [] => return Ok(Sparsity::zeros(0, 0)),
            [single] => return Ok(single.clone()),
            _ => {}
        }

        let nnz_total = sp.iter().map(|s| s.nnz()).sum();
        let mut rows = Vec::with_capacity(nnz_total);
        let mut cols = Vec::with_capacity(nnz_total);

        let ncol = sp.iter().map(|s| s.ncol()).find(|&n| n != 0).unwrap_or(0);
        let mut nrow = 0;

        for s in sp {
            if s.ncol() != ncol && s.ncol() != 0 {
                return Err(SparsityError::mismatch(
                    "Sparsity::vertcat",
                    (nrow, ncol),
                    s.size(),
                ));
            }
            for (r, c) in s.entries() {
                rows.push(r + nrow);
                cols.push(c);
            }
            nrow += s.nrow();
        }

        Ok(Sparsity::triplet_unchecked(nrow, ncol, &rows, &cols, false).0)
    }

    /// Block diagonal concatenation
    pub fn diagcat(sp: &[Sparsity]) -> Sparsity {
        let mut nrow = 0;
        let mut colind = vec![0];
        let mut row = Vec::with_capacity(sp.iter().map(|s| s.nnz()).sum());

        for s in sp {
            let nz = row.len();
            colind.extend(s.colind()[1..].iter().map(|&c| c + nz));
            row.extend(s.row().iter().map(|&r| r + nrow));
            nrow += s.nrow();
        }

        let ncol = colind.len() - 1;
        Sparsity::intern(nrow, ncol, colind, row)
    }

    /// Concatenate a grid of blocks, given as a list of block rows.
    pub fn blockcat(blocks: &[Vec<Sparsity>]) -> Result<Sparsity, SparsityError> {
        let rows = blocks
            .iter()
            .map(|b| Sparsity::horzcat(b))
            .collect::<Result<Vec<_>, _>>()?;
        Sparsity::vertcat(&rows)
    }

    /// Append the rows of `sp` below `self`.
    pub fn append(&mut self, sp: &Sparsity) -> Result<(), SparsityError> {
        if sp.is_empty(true) {
            return Ok(());
        }
        if self.is_empty(true) {
            *self = sp.clone();
            return Ok(());
        }
        if self.ncol() != sp.ncol() {
            return Err(SparsityError::mismatch("Sparsity::append", self.size(), sp.size()));
        }
        if sp.nrow() == 0 {
            return Ok(());
        }
        if self.nrow() == 0 {
            *self = sp.clone();
            return Ok(());
        }
        *self = Sparsity::vertcat(&[self.clone(), sp.clone()])?;
        Ok(())
    }

    /// Append the columns of `sp` to the right of `self`.
    pub fn append_columns(&mut self, sp: &Sparsity) -> Result<(), SparsityError> {
        if sp.is_empty(true) {
            return Ok(());
        }
        if self.is_empty(true) {
            *self = sp.clone();
            return Ok(());
        }
        if self.nrow() != sp.nrow() {
            return Err(SparsityError::mismatch(
                "Sparsity::append_columns",
                self.size(),
                sp.size(),
            ));
        }
        if sp.ncol() == 0 {
            return Ok(());
        }
        if self.ncol() == 0 {
            *self = sp.clone();
            return Ok(());
        }

        // column offsets of sp shifted past the existing nonzeros
        let nnz = self.nnz();
        let mut colind = self.get_colind();
        colind.extend(sp.colind()[1..].iter().map(|&c| c + nnz));
        let mut row = self.get_row();
        row.extend_from_slice(sp.row());
        *self = Sparsity::intern(self.nrow(), self.ncol() + sp.ncol(), colind, row);
        Ok(())
    }
}

#[test]
fn test_horzcat() {
    let sp = Sparsity::horzcat(&[Sparsity::dense(2, 2), Sparsity::dense(2, 3)]).unwrap();
    assert_eq!(sp.size(), (2, 5));
    assert_eq!(sp.nnz(), 10);
    assert!(sp.is_same(&Sparsity::dense(2, 5)));
}

#[test]
fn test_horzcat_zero_rows() {
    // [⋅ ⋅ ⋅ ⋅ x ⋅ ]
    // [⋅ ⋅ ⋅ ⋅ ⋅ x ]
    let sp = Sparsity::horzcat(&[Sparsity::zeros(0, 4), Sparsity::diag(2, 2)]).unwrap();
    assert_eq!(sp.size(), (2, 6));
    assert_eq!(sp.colind(), &[0, 0, 0, 0, 0, 1, 2]);

    let err = Sparsity::horzcat(&[Sparsity::dense(2, 1), Sparsity::dense(3, 1)]);
    assert!(matches!(err, Err(SparsityError::DimensionMismatch { .. })));
}

#[test]
fn test_vertcat() {
    // [x ⋅ ]
    // [⋅ x ]
    // [x x ]
    let sp = Sparsity::vertcat(&[Sparsity::diag(2, 2), Sparsity::dense(1, 2)]).unwrap();
    assert_eq!(sp.size(), (3, 2));
    assert_eq!(sp.colind(), &[0, 2, 4]);
    assert_eq!(sp.row(), &[0, 2, 1, 2]);
}

#[test]
fn test_diagcat() {
    // [x x ⋅ ]
    // [⋅ ⋅ x ]
    let sp = Sparsity::diagcat(&[Sparsity::dense(1, 2), Sparsity::scalar(true)]);
    assert_eq!(sp.size(), (2, 3));
    assert_eq!(sp.colind(), &[0, 1, 2, 3]);
    assert_eq!(sp.row(), &[0, 0, 1]);
    assert!(Sparsity::diagcat(&[]).is_same(&Sparsity::empty()));
}

#[test]
fn test_blockcat() {
    let d = Sparsity::dense(1, 1);
    let z = Sparsity::zeros(1, 1);
    let sp = Sparsity::blockcat(&[vec![d.clone(), z.clone()], vec![z, d]]).unwrap();
    assert!(sp.is_same(&Sparsity::diag(2, 2)));
}

#[test]
fn test_append() {
    let mut sp = Sparsity::empty();
    sp.append(&Sparsity::unit(2, 1).t()).unwrap();
    sp.append(&Sparsity::dense(1, 2)).unwrap();
    assert_eq!(sp.size(), (2, 2));
    assert_eq!(sp.row(), &[1, 0, 1]);
    assert!(sp.append(&Sparsity::dense(1, 3)).is_err());

    let mut sp = Sparsity::diag(2, 2);
    sp.append_columns(&Sparsity::unit(2, 0)).unwrap();
    assert_eq!(sp.colind(), &[0, 1, 2, 3]);
    assert_eq!(sp.row(), &[0, 1, 0]);
}
