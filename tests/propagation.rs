use structsparse::*;

// [x ⋅ x ]
// [⋅ x ⋅ ]
// [x ⋅ ⋅ ]
// [⋅ x x ]
fn x_pattern() -> Sparsity {
    Sparsity::triplet(4, 3, &[0, 2, 1, 3, 0, 3], &[0, 0, 1, 1, 2, 2]).unwrap()
}

// [x ⋅ ]
// [x x ]
// [⋅ x ]
fn y_pattern() -> Sparsity {
    Sparsity::triplet(3, 2, &[0, 1, 1, 2], &[0, 0, 1, 1]).unwrap()
}

#[test]
fn propagation_forward_matches_product_pattern() {
    let (x_sp, y_sp) = (x_pattern(), y_pattern());
    let z_sp = Sparsity::mtimes(&x_sp, &y_sp).unwrap();

    // one seed direction per nonzero of x
    let x: Vec<Bvec> = (0..x_sp.nnz()).map(|k| 1 << k).collect();
    let y: Vec<Bvec> = vec![0; y_sp.nnz()];
    let mut z: Vec<Bvec> = vec![0; z_sp.nnz()];
    let mut w: Vec<Bvec> = vec![0; z_sp.nrow()];
    Sparsity::mul_sparsity_fwd(&x, &x_sp, &y, &y_sp, &mut z, &z_sp, &mut w).unwrap();

    let x_entries: Vec<(usize, usize)> = x_sp.entries().collect();
    for (kz, (r, c)) in z_sp.entries().enumerate() {
        let expected = x_entries
            .iter()
            .enumerate()
            .filter(|&(_, &(xr, xj))| xr == r && y_sp.has_nz(xj as isize, c as isize).unwrap())
            .fold(0 as Bvec, |acc, (k, _)| acc | (1 << k));
        assert_eq!(z[kz], expected, "z({},{})", r, c);
        assert_ne!(z[kz], 0);
    }
}

#[test]
fn propagation_reverse_matches_product_pattern() {
    let (x_sp, y_sp) = (x_pattern(), y_pattern());
    let z_sp = Sparsity::mtimes(&x_sp, &y_sp).unwrap();

    // one seed direction per nonzero of z
    let mut z: Vec<u32> = (0..z_sp.nnz()).map(|k| 1 << k).collect();
    let z_seed = z.clone();
    let mut x: Vec<u32> = vec![0; x_sp.nnz()];
    let mut y: Vec<u32> = vec![0; y_sp.nnz()];
    let mut w: Vec<u32> = vec![0; z_sp.nrow()];
    Sparsity::mul_sparsity_rev(&mut x, &x_sp, &mut y, &y_sp, &mut z, &z_sp, &mut w).unwrap();
    assert_eq!(z, z_seed);

    let z_entries: Vec<(usize, usize)> = z_sp.entries().collect();
    let bits_from = |keep: &dyn Fn(usize, usize) -> bool| {
        z_entries
            .iter()
            .enumerate()
            .filter(|&(_, &(r, c))| keep(r, c))
            .fold(0u32, |acc, (k, _)| acc | (1 << k))
    };

    // x(r,j) feeds every z(r,c) with y(j,c)
    for (kx, (r, j)) in x_sp.entries().enumerate() {
        let expected = bits_from(&|zr, zc| zr == r && y_sp.has_nz(j as isize, zc as isize).unwrap());
        assert_eq!(x[kx], expected, "x({},{})", r, j);
    }
    // y(j,c) feeds every z(r,c) with x(r,j)
    for (ky, (j, c)) in y_sp.entries().enumerate() {
        let expected = bits_from(&|zr, zc| zc == c && x_sp.has_nz(zr as isize, j as isize).unwrap());
        assert_eq!(y[ky], expected, "y({},{})", j, c);
    }
}

#[test]
fn propagation_dimension_mismatch() {
    let (x_sp, y_sp) = (x_pattern(), y_pattern());
    let z_sp = Sparsity::dense(3, 2);
    let x: Vec<Bvec> = vec![0; x_sp.nnz()];
    let y: Vec<Bvec> = vec![0; y_sp.nnz()];
    let mut z: Vec<Bvec> = vec![0; z_sp.nnz()];
    let mut w: Vec<Bvec> = vec![0; 4];
    let result = Sparsity::mul_sparsity_fwd(&x, &x_sp, &y, &y_sp, &mut z, &z_sp, &mut w);
    assert!(matches!(
        result,
        Err(SparsityError::DimensionMismatch { .. })
    ));
}

#[test]
fn propagation_through_triangular_solve() {
    let n = 5;
    let sp = Sparsity::upper(n);
    let b: Vec<Bvec> = (0..n).map(|k| 1 << k).collect();
    let mut x: Vec<Bvec> = vec![0; n];

    // back substitution: x(j) needs b(i) for every i >= j
    sp.spsolve(&mut x, &b, false);
    for (j, &bits) in x.iter().enumerate() {
        let expected = (j..n).fold(0 as Bvec, |acc, i| acc | (1 << i));
        assert_eq!(bits, expected, "x({})", j);
    }

    // the transposed solve is a forward substitution
    sp.spsolve(&mut x, &b, true);
    for (j, &bits) in x.iter().enumerate() {
        let expected = (0..=j).fold(0 as Bvec, |acc, i| acc | (1 << i));
        assert_eq!(bits, expected, "x({})", j);
    }
}

#[test]
fn propagation_solve_irreducible_block() {
    // every unknown of a dense block depends on every right hand side
    let sp = Sparsity::dense(3, 3);
    let mut x = vec![0u16; 3];
    sp.spsolve(&mut x, &[1, 2, 4], false);
    assert_eq!(x, vec![7, 7, 7]);
}
