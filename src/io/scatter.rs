use crate::sparsity::Sparsity;
use num_traits::Zero;

impl Sparsity {
    /// Scatter nonzero values stored on this pattern into a dense
    /// column-major buffer, zeroing every structurally empty entry.
    ///
    /// # Panics
    /// Panics if `values` does not hold one value per nonzero, or if
    /// `out` does not hold `nrow * ncol` entries.
    pub fn scatter_dense<T>(&self, values: &[T], out: &mut [T])
    where
        T: Copy + Zero,
    {
        assert_eq!(values.len(), self.nnz(), "Sparsity::scatter_dense: values");
        assert_eq!(out.len(), self.numel(), "Sparsity::scatter_dense: out");

        out.fill(T::zero());
        let nrow = self.nrow();
        for ((r, c), &v) in self.entries().zip(values) {
            out[r + c * nrow] = v;
        }
    }
}

#[test]
fn test_scatter_dense() {
    // [1 ⋅ 2 ]
    // [⋅ ⋅ 3 ]
    let sp = Sparsity::new(2, 3, vec![0, 1, 1, 3], vec![0, 0, 1]);
    let mut out = vec![-1.0; 6];
    sp.scatter_dense(&[1.0, 2.0, 3.0], &mut out);
    assert_eq!(out, vec![1.0, 0.0, 0.0, 0.0, 2.0, 3.0]);
}

#[test]
#[should_panic]
fn test_scatter_dense_bad_length() {
    let mut out = vec![0.0; 4];
    Sparsity::diag(2, 2).scatter_dense(&[1.0], &mut out);
}
