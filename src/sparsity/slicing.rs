use super::utils::{check_offsets, colcount_to_colind, index_lookup};
use super::{Sparsity, SparsityError};

impl Sparsity {
    /// Split into column blocks at `offset`, which must run from zero to
    /// `ncol` in non-decreasing order.
    pub fn horzsplit(&self, offset: &[usize]) -> Result<Vec<Sparsity>, SparsityError> {
        check_offsets("Sparsity::horzsplit", offset, self.ncol())?;

        let colind = self.colind();
        let out = offset
            .windows(2)
            .map(|w| {
                let (first, last) = (w[0], w[1]);
                let base = colind[first];
                let sub_colind = colind[first..=last].iter().map(|&c| c - base).collect();
                let sub_row = self.row()[base..colind[last]].to_vec();
                Sparsity::intern(self.nrow(), last - first, sub_colind, sub_row)
            })
            .collect();
        Ok(out)
    }

    /// Split into row blocks at `offset`, which must run from zero to
    /// `nrow` in non-decreasing order.
    pub fn vertsplit(&self, offset: &[usize]) -> Result<Vec<Sparsity>, SparsityError> {
        check_offsets("Sparsity::vertsplit", offset, self.nrow())?;
        Ok(self.t().horzsplit(offset)?.iter().map(|s| s.t()).collect())
    }

    /// Split into the diagonal blocks delimited by row offsets `offset1`
    /// and column offsets `offset2`.
    pub fn diagsplit(
        &self,
        offset1: &[usize],
        offset2: &[usize],
    ) -> Result<Vec<Sparsity>, SparsityError> {
        check_offsets("Sparsity::diagsplit rows", offset1, self.nrow())?;
        check_offsets("Sparsity::diagsplit columns", offset2, self.ncol())?;
        if offset1.len() != offset2.len() {
            return Err(SparsityError::IncompatibleLength {
                context: "Sparsity::diagsplit",
                expected: offset1.len(),
                got: offset2.len(),
            });
        }

        offset1
            .windows(2)
            .zip(offset2.windows(2))
            .map(|(r, c)| {
                let rr: Vec<usize> = (r[0]..r[1]).collect();
                let cc: Vec<usize> = (c[0]..c[1]).collect();
                self.sub(&rr, &cc).map(|(sp, _)| sp)
            })
            .collect()
    }

    /// Sub-pattern of rows `rr` and columns `cc`, in the given order.
    ///
    /// Indices may repeat.  The mapping gives, for each nonzero of the
    /// result, its offset in `self`.
    pub fn sub(&self, rr: &[usize], cc: &[usize]) -> Result<(Sparsity, Vec<usize>), SparsityError> {
        let nrow = self.nrow();
        if let Some(&c) = cc.iter().find(|&&c| c >= self.ncol()) {
            return Err(SparsityError::out_of_range("Sparsity::sub column", c as isize, self.ncol()));
        }

        // positions in rr of every original row, compressed by row
        let mut rowind = vec![0; nrow + 1];
        for &r in rr {
            if r >= nrow {
                return Err(SparsityError::out_of_range("Sparsity::sub row", r as isize, nrow));
            }
            rowind[r + 1] += 1;
        }
        colcount_to_colind(&mut rowind);
        let mut next = rowind[..nrow].to_vec();
        let mut positions = vec![0; rr.len()];
        for (i, &r) in rr.iter().enumerate() {
            positions[next[r]] = i;
            next[r] += 1;
        }

        let mut rows = Vec::new();
        let mut cols = Vec::new();
        let mut source = Vec::new();
        for (j, &c) in cc.iter().enumerate() {
            for k in self.colind()[c]..self.colind()[c + 1] {
                let r = self.row()[k];
                for &i in &positions[rowind[r]..rowind[r + 1]] {
                    rows.push(i);
                    cols.push(j);
                    source.push(k);
                }
            }
        }

        let (sp, mapping) = Sparsity::triplet_unchecked(rr.len(), cc.len(), &rows, &cols, false);
        let mapping = mapping.into_iter().map(|t| source[t]).collect();
        Ok((sp, mapping))
    }

    /// Remove every entry `(rr[i], cc[j])`.  Returns the original offsets
    /// of the nonzeros that remain.
    pub fn erase(&mut self, rr: &[usize], cc: &[usize]) -> Result<Vec<usize>, SparsityError> {
        let row_hit = index_lookup("Sparsity::erase row", rr, self.nrow())?;
        let col_hit = index_lookup("Sparsity::erase column", cc, self.ncol())?;
        Ok(self.retain_entries(|r, c| row_hit[r].is_none() || col_hit[c].is_none()))
    }

    /// Remove the entries at the given column major linear indices.
    /// Returns the original offsets of the nonzeros that remain.
    pub fn erase_elements(&mut self, elements: &[usize]) -> Result<Vec<usize>, SparsityError> {
        let nrow = self.nrow();
        let hit = index_lookup("Sparsity::erase_elements", elements, self.numel())?;
        Ok(self.retain_entries(|r, c| hit[r + c * nrow].is_none()))
    }

    // keep the entries for which keep(row,col) holds, returning their offsets
    fn retain_entries<F>(&mut self, keep: F) -> Vec<usize>
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut colind = vec![0; self.ncol() + 1];
        let mut row = Vec::with_capacity(self.nnz());
        let mut mapping = Vec::with_capacity(self.nnz());
        for (k, (r, c)) in self.entries().enumerate() {
            if keep(r, c) {
                row.push(r);
                colind[c + 1] += 1;
                mapping.push(k);
            }
        }
        if mapping.len() != self.nnz() {
            colcount_to_colind(&mut colind);
            *self = Sparsity::intern(self.nrow(), self.ncol(), colind, row);
        }
        mapping
    }

    /// Embed into an `nrow x ncol` pattern, moving row `r` to `rr[r]` and
    /// column `c` to `cc[c]`.
    pub fn enlarge(
        &mut self,
        nrow: usize,
        ncol: usize,
        rr: &[usize],
        cc: &[usize],
    ) -> Result<(), SparsityError> {
        self.enlarge_columns(ncol, cc)?;
        self.enlarge_rows(nrow, rr)
    }

    /// Embed into `nrow` rows, moving row `r` to `rr[r]`.
    pub fn enlarge_rows(&mut self, nrow: usize, rr: &[usize]) -> Result<(), SparsityError> {
        check_embedding("Sparsity::enlarge_rows", rr, self.nrow(), nrow)?;
        let (rows, cols): (Vec<usize>, Vec<usize>) =
            self.entries().map(|(r, c)| (rr[r], c)).unzip();
        *self = Sparsity::triplet_unchecked(nrow, self.ncol(), &rows, &cols, false).0;
        Ok(())
    }

    /// Embed into `ncol` columns, moving column `c` to `cc[c]`.
    pub fn enlarge_columns(&mut self, ncol: usize, cc: &[usize]) -> Result<(), SparsityError> {
        check_embedding("Sparsity::enlarge_columns", cc, self.ncol(), ncol)?;
        let (rows, cols): (Vec<usize>, Vec<usize>) =
            self.entries().map(|(r, c)| (r, cc[c])).unzip();
        *self = Sparsity::triplet_unchecked(self.nrow(), ncol, &rows, &cols, false).0;
        Ok(())
    }
}

fn check_embedding(
    context: &'static str,
    idx: &[usize],
    len: usize,
    bound: usize,
) -> Result<(), SparsityError> {
    if idx.len() != len {
        return Err(SparsityError::IncompatibleLength {
            context,
            expected: len,
            got: idx.len(),
        });
    }
    match idx.iter().find(|&&i| i >= bound) {
        Some(&i) => Err(SparsityError::out_of_range(context, i as isize, bound)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // [x ⋅ x ⋅ ]
    // [⋅ ⋅ x x ]
    // [x ⋅ ⋅ x ]
    fn test_pattern() -> Sparsity {
        Sparsity::new(3, 4, vec![0, 2, 2, 4, 6], vec![0, 2, 0, 1, 1, 2])
    }

    #[test]
    fn test_horzsplit() {
        let a = test_pattern();
        let parts = a.horzsplit(&[0, 1, 4]).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].size(), (3, 1));
        assert_eq!(parts[0].row(), &[0, 2]);
        assert_eq!(parts[1].colind(), &[0, 0, 2, 4]);
        assert!(Sparsity::horzcat(&parts).unwrap().is_same(&a));

        assert!(matches!(
            a.horzsplit(&[0, 3]),
            Err(SparsityError::InvalidOffsets { .. })
        ));
    }

    #[test]
    fn test_vertsplit() {
        let a = test_pattern();
        let parts = a.vertsplit(&[0, 2, 3]).unwrap();
        assert_eq!(parts[0].size(), (2, 4));
        assert_eq!(parts[1].size(), (1, 4));
        assert_eq!(parts[1].find(), vec![0, 3]);
        assert!(Sparsity::vertcat(&parts).unwrap().is_same(&a));
    }

    #[test]
    fn test_diagsplit() {
        let a = Sparsity::diagcat(&[Sparsity::dense(2, 1), Sparsity::lower(2)]);
        let parts = a.diagsplit(&[0, 2, 4], &[0, 1, 3]).unwrap();
        assert!(parts[0].is_same(&Sparsity::dense(2, 1)));
        assert!(parts[1].is_same(&Sparsity::lower(2)));
    }

    #[test]
    fn test_sub() {
        let a = test_pattern();
        let (s, map) = a.sub(&[2, 0], &[0, 3]).unwrap();
        // [x x ]
        // [x ⋅ ]
        assert_eq!(s.colind(), &[0, 2, 3]);
        assert_eq!(s.row(), &[0, 1, 0]);
        assert_eq!(map, vec![1, 0, 5]);

        // repeated rows
        let (s, _) = a.sub(&[0, 0], &[2]).unwrap();
        assert!(s.is_same(&Sparsity::dense(2, 1)));

        assert!(a.sub(&[3], &[0]).is_err());
    }

    #[test]
    fn test_erase() {
        let mut a = test_pattern();
        let kept = a.erase(&[0], &[0, 2]).unwrap();
        assert_eq!(kept, vec![1, 3, 4, 5]);
        assert_eq!(a.colind(), &[0, 1, 1, 2, 4]);

        let mut b = test_pattern();
        let kept = b.erase_elements(&[0, 11]).unwrap();
        assert_eq!(kept, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_enlarge() {
        let mut a = Sparsity::dense(2, 2);
        a.enlarge(4, 3, &[0, 3], &[0, 2]).unwrap();
        assert_eq!(a.size(), (4, 3));
        assert_eq!(a.find(), vec![0, 3, 8, 11]);
        assert!(a.enlarge_rows(5, &[0]).is_err());
    }
}
