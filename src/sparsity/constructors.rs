use super::utils::colcount_to_colind;
use super::{rows_sequential, SparseFormatError, Sparsity, SparsityError};
use itertools::{iproduct, Itertools};
use std::iter::zip;

impl Sparsity {
    /// Pattern of an `nrow x ncol` matrix with no structural nonzeros
    pub fn zeros(nrow: usize, ncol: usize) -> Self {
        Sparsity::intern(nrow, ncol, vec![0; ncol + 1], vec![])
    }

    /// Pattern of a fully dense `nrow x ncol` matrix
    pub fn dense(nrow: usize, ncol: usize) -> Self {
        let colind = (0..=ncol).map(|c| c * nrow).collect();
        let row = iproduct!(0..ncol, 0..nrow).map(|(_, r)| r).collect();
        Sparsity::intern(nrow, ncol, colind, row)
    }

    /// Diagonal of an `nrow x ncol` matrix, i.e. entries `(i,i)` for
    /// `i < min(nrow,ncol)`
    pub fn diag(nrow: usize, ncol: usize) -> Self {
        let n = nrow.min(ncol);
        let colind = (0..=ncol).map(|c| c.min(n)).collect();
        Sparsity::intern(nrow, ncol, colind, (0..n).collect())
    }

    /// Column vector of length `n` with a single nonzero at `el`
    ///
    /// # Panics
    /// Panics if `el >= n`.
    pub fn unit(n: usize, el: usize) -> Self {
        assert!(el < n, "Sparsity::unit: element {} out of range [0,{})", el, n);
        Sparsity::intern(n, 1, vec![0, 1], vec![el])
    }

    /// Upper triangular `n x n` pattern, diagonal included
    pub fn upper(n: usize) -> Self {
        let mut colind = vec![0; n + 1];
        let mut row = Vec::with_capacity((n * (n + 1)) / 2);
        for cc in 0..n {
            row.extend(0..=cc);
            colind[cc + 1] = row.len();
        }
        Sparsity::intern(n, n, colind, row)
    }

    /// Lower triangular `n x n` pattern, diagonal included
    pub fn lower(n: usize) -> Self {
        let mut colind = vec![0; n + 1];
        let mut row = Vec::with_capacity((n * (n + 1)) / 2);
        for cc in 0..n {
            row.extend(cc..n);
            colind[cc + 1] = row.len();
        }
        Sparsity::intern(n, n, colind, row)
    }

    /// A single band of an `n x n` pattern: the entries `(c+p, c)`.
    ///
    /// `band(n,0)` is the diagonal, negative `p` lies above it.
    ///
    /// # Panics
    /// Panics if `|p| >= n`.
    pub fn band(n: usize, p: isize) -> Self {
        let dist = p.unsigned_abs();
        assert!(
            dist < n,
            "Sparsity::band: band offset {} must be smaller than the size {}",
            p,
            n
        );
        let nc = n - dist;
        let (row_offset, col_offset) = if p >= 0 { (dist, 0) } else { (0, dist) };

        let row = (0..nc).map(|i| i + row_offset).collect();
        let colind = (0..=n)
            .map(|c| c.saturating_sub(col_offset).min(nc))
            .collect();
        Sparsity::intern(n, n, colind, row)
    }

    /// All entries within distance `p` of the diagonal of an `n x n` pattern
    pub fn banded(n: usize, p: usize) -> Self {
        let mut colind = vec![0; n + 1];
        let mut row = Vec::new();
        for cc in 0..n {
            row.extend(cc.saturating_sub(p)..n.min(cc.saturating_add(p).saturating_add(1)));
            colind[cc + 1] = row.len();
        }
        Sparsity::intern(n, n, colind, row)
    }

    /// Every combination of the given rows and columns
    pub fn rowcol(
        rows: &[usize],
        cols: &[usize],
        nrow: usize,
        ncol: usize,
    ) -> Result<Self, SparsityError> {
        let (all_rows, all_cols): (Vec<usize>, Vec<usize>) =
            iproduct!(cols, rows).map(|(&c, &r)| (r, c)).unzip();
        Sparsity::triplet(nrow, ncol, &all_rows, &all_cols)
    }

    /// Pattern from unordered `(row, col)` pairs.  Duplicates are coalesced.
    pub fn triplet(
        nrow: usize,
        ncol: usize,
        rows: &[usize],
        cols: &[usize],
    ) -> Result<Self, SparsityError> {
        Sparsity::triplet_with_mapping(nrow, ncol, rows, cols, false).map(|(sp, _)| sp)
    }

    /// Pattern from unordered `(row, col)` pairs, with an index mapping.
    ///
    /// If `invert_mapping` is false, the mapping holds for each nonzero
    /// of the result one of the input pairs that produced it.  Otherwise
    /// it holds for each input pair the nonzero it was collapsed into.
    pub fn triplet_with_mapping(
        nrow: usize,
        ncol: usize,
        rows: &[usize],
        cols: &[usize],
        invert_mapping: bool,
    ) -> Result<(Self, Vec<usize>), SparsityError> {
        if rows.len() != cols.len() {
            return Err(SparsityError::IncompatibleLength {
                context: "Sparsity::triplet",
                expected: rows.len(),
                got: cols.len(),
            });
        }
        if let Some(&r) = rows.iter().find(|&&r| r >= nrow) {
            return Err(SparsityError::out_of_range("Sparsity::triplet row", r as isize, nrow));
        }
        if let Some(&c) = cols.iter().find(|&&c| c >= ncol) {
            return Err(SparsityError::out_of_range("Sparsity::triplet column", c as isize, ncol));
        }
        Ok(Sparsity::triplet_unchecked(nrow, ncol, rows, cols, invert_mapping))
    }

    /// Pattern from compressed column data whose columns may repeat a
    /// row index.  Rows must be sorted within each column.
    ///
    /// `mapping` holds one value per input nonzero.  On return it holds
    /// the values of the entries that were kept, one per nonzero of the
    /// result.
    pub fn remove_duplicates(
        nrow: usize,
        ncol: usize,
        mut colind: Vec<usize>,
        mut row: Vec<usize>,
        mapping: &mut Vec<usize>,
    ) -> Result<Self, SparsityError> {
        if colind.len() != ncol + 1 || colind[ncol] != row.len() {
            return Err(SparseFormatError::IncompatibleDimension.into());
        }
        if colind[0] != 0 || colind.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColind.into());
        }
        if mapping.len() != row.len() {
            return Err(SparsityError::IncompatibleLength {
                context: "Sparsity::remove_duplicates",
                expected: row.len(),
                got: mapping.len(),
            });
        }
        if !rows_sequential(&colind, &row, false) {
            return Err(SparseFormatError::BadRowOrdering.into());
        }

        let mut k_strict = 0;
        for cc in 0..ncol {
            let (start, end) = (colind[cc], colind[cc + 1]);
            colind[cc] = k_strict;
            for k in start..end {
                if k > start && row[k] == row[k - 1] {
                    continue;
                }
                row[k_strict] = row[k];
                mapping[k_strict] = mapping[k];
                k_strict += 1;
            }
        }
        colind[ncol] = k_strict;
        row.truncate(k_strict);
        mapping.truncate(k_strict);

        Sparsity::try_new(nrow, ncol, colind, row).map_err(SparsityError::from)
    }

    // triplet construction for pairs already known to be in range
    pub(crate) fn triplet_unchecked(
        nrow: usize,
        ncol: usize,
        rows: &[usize],
        cols: &[usize],
        invert_mapping: bool,
    ) -> (Self, Vec<usize>) {
        let nnz = rows.len();

        // quick return if pairs are column major, strictly increasing rows
        let ordered = zip(cols, rows)
            .tuple_windows()
            .all(|((c0, r0), (c1, r1))| c1 > c0 || (c1 == c0 && r1 > r0));

        if ordered {
            let mut colind = vec![0; ncol + 1];
            cols.iter().for_each(|&c| colind[c + 1] += 1);
            colcount_to_colind(&mut colind);
            let sp = Sparsity::intern(nrow, ncol, colind, rows.to_vec());
            return (sp, (0..nnz).collect());
        }

        // bucket by row
        let mut rowcount = vec![0; nrow + 1];
        rows.iter().for_each(|&r| rowcount[r + 1] += 1);
        colcount_to_colind(&mut rowcount);
        let mut by_row = vec![0; nnz];
        for (k, &r) in rows.iter().enumerate() {
            by_row[rowcount[r]] = k;
            rowcount[r] += 1;
        }

        // stable bucket by column
        let mut colcount = vec![0; ncol + 1];
        by_row.iter().for_each(|&k| colcount[cols[k] + 1] += 1);
        colcount_to_colind(&mut colcount);
        let mut order = vec![0; nnz];
        for &k in by_row.iter() {
            order[colcount[cols[k]]] = k;
            colcount[cols[k]] += 1;
        }

        // collapse duplicates
        let mut colind = vec![0; ncol + 1];
        let mut row = Vec::with_capacity(nnz);
        let mut mapping = if invert_mapping {
            vec![0; nnz]
        } else {
            Vec::with_capacity(nnz)
        };
        let mut last = None;
        for &k in order.iter() {
            let entry = (rows[k], cols[k]);
            if last != Some(entry) {
                row.push(entry.0);
                colind[entry.1 + 1] += 1;
                if !invert_mapping {
                    mapping.push(k);
                }
                last = Some(entry);
            }
            if invert_mapping {
                mapping[k] = row.len() - 1;
            }
        }
        colcount_to_colind(&mut colind);

        (Sparsity::intern(nrow, ncol, colind, row), mapping)
    }
}

#[test]
fn test_dense() {
    let sp = Sparsity::dense(2, 3);
    assert_eq!(sp.nnz(), 6);
    assert_eq!(sp.colind(), &[0, 2, 4, 6]);
    assert_eq!(sp.row(), &[0, 1, 0, 1, 0, 1]);
    assert!(sp.is_dense());
}

#[test]
fn test_band() {
    // [⋅ ⋅ ⋅ ]
    // [x ⋅ ⋅ ]
    // [⋅ x ⋅ ]
    let sub = Sparsity::band(3, 1);
    assert_eq!(sub.colind(), &[0, 1, 2, 2]);
    assert_eq!(sub.row(), &[1, 2]);

    // [⋅ x ⋅ ]
    // [⋅ ⋅ x ]
    // [⋅ ⋅ ⋅ ]
    let sup = Sparsity::band(3, -1);
    assert_eq!(sup.colind(), &[0, 0, 1, 2]);
    assert_eq!(sup.row(), &[0, 1]);

    assert!(Sparsity::band(4, 0).is_same(&Sparsity::diag(4, 4)));
}

#[test]
#[should_panic]
fn test_band_too_wide() {
    Sparsity::band(3, -3);
}

#[test]
fn test_triangles() {
    let u = Sparsity::upper(3);
    assert_eq!(u.colind(), &[0, 1, 3, 6]);
    assert_eq!(u.row(), &[0, 0, 1, 0, 1, 2]);
    let l = Sparsity::lower(3);
    assert_eq!(l.colind(), &[0, 3, 5, 6]);
    assert_eq!(l.row(), &[0, 1, 2, 1, 2, 2]);
    assert!(u.is_triu() && l.is_tril());
}

#[test]
fn test_triplet_duplicates() {
    // unordered input with a repeated (1,0)
    let rows = [1, 0, 1, 2];
    let cols = [0, 1, 0, 1];
    let (sp, map) = Sparsity::triplet_with_mapping(3, 2, &rows, &cols, false).unwrap();
    assert_eq!(sp.colind(), &[0, 1, 3]);
    assert_eq!(sp.row(), &[1, 0, 2]);
    assert_eq!(map.len(), 3);
    assert_eq!(rows[map[1]], 0);

    let (_, inv) = Sparsity::triplet_with_mapping(3, 2, &rows, &cols, true).unwrap();
    assert_eq!(inv, vec![0, 1, 0, 2]);
}

#[test]
fn test_triplet_ordered_fast_path() {
    let (sp, map) = Sparsity::triplet_with_mapping(3, 3, &[0, 2, 1], &[0, 0, 2], false).unwrap();
    assert_eq!(sp.colind(), &[0, 2, 2, 3]);
    assert_eq!(map, vec![0, 1, 2]);
}

#[test]
fn test_triplet_errors() {
    assert!(matches!(
        Sparsity::triplet(2, 2, &[0, 1], &[0]),
        Err(SparsityError::IncompatibleLength { .. })
    ));
    assert!(matches!(
        Sparsity::triplet(2, 2, &[0, 2], &[0, 0]),
        Err(SparsityError::OutOfRange { index: 2, bound: 2, .. })
    ));
}

#[test]
fn test_remove_duplicates() {
    // column 0 repeats row 1, column 2 repeats row 0 twice
    let mut mapping = vec![10, 11, 12, 13, 14, 15, 16];
    let sp = Sparsity::remove_duplicates(
        3,
        3,
        vec![0, 3, 3, 7],
        vec![0, 1, 1, 0, 0, 0, 2],
        &mut mapping,
    )
    .unwrap();
    assert_eq!(sp.colind(), &[0, 2, 2, 4]);
    assert_eq!(sp.row(), &[0, 1, 0, 2]);
    assert_eq!(mapping, vec![10, 11, 13, 16]);

    let mut mapping = vec![0, 1];
    assert!(matches!(
        Sparsity::remove_duplicates(3, 1, vec![0, 2], vec![2, 1], &mut mapping),
        Err(SparsityError::Format(SparseFormatError::BadRowOrdering))
    ));
    assert!(matches!(
        Sparsity::remove_duplicates(2, 1, vec![0, 2], vec![1, 2], &mut mapping),
        Err(SparsityError::Format(SparseFormatError::BadRowIndex))
    ));
    assert!(matches!(
        Sparsity::remove_duplicates(3, 1, vec![0, 2], vec![1, 2], &mut vec![0]),
        Err(SparsityError::IncompatibleLength { .. })
    ));
}

#[test]
fn test_rowcol() {
    let sp = Sparsity::rowcol(&[0, 2], &[1], 3, 2).unwrap();
    assert_eq!(sp.colind(), &[0, 0, 2]);
    assert_eq!(sp.row(), &[0, 2]);
}
