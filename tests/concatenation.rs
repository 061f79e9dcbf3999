use structsparse::*;

// [x ⋅ x ]
// [⋅ x x ]
fn test_pattern() -> Sparsity {
    Sparsity::new(2, 3, vec![0, 1, 2, 4], vec![0, 1, 0, 1])
}

#[test]
fn concatenation_horzcat_dense() {
    let sp = Sparsity::horzcat(&[Sparsity::dense(2, 2), Sparsity::dense(2, 3)]).unwrap();
    assert_eq!(sp.size(), (2, 5));
    assert_eq!(sp.nnz(), 10);
    assert!(sp.is_same(&Sparsity::dense(2, 5)));
}

#[test]
fn concatenation_vertcat() {
    let a = test_pattern();
    let sp = Sparsity::vertcat(&[a.clone(), Sparsity::zeros(1, 3), a.clone()]).unwrap();
    assert_eq!(sp.size(), (5, 3));
    assert_eq!(sp.nnz(), 8);
    assert_eq!(sp.get_row(), vec![0, 3, 1, 4, 0, 1, 3, 4]);

    assert!(Sparsity::vertcat(&[a, Sparsity::dense(2, 2)]).is_err());
}

#[test]
fn concatenation_zero_size_operands() {
    let a = test_pattern();
    let sp = Sparsity::horzcat(&[Sparsity::zeros(0, 0), a.clone()]).unwrap();
    assert!(sp.is_same(&a));

    // zero-row operands still add their (empty) columns
    let sp = Sparsity::horzcat(&[a.clone(), Sparsity::zeros(0, 4)]).unwrap();
    assert_eq!(sp.size(), (2, 7));
    assert_eq!(sp.nnz(), a.nnz());
    assert!(Sparsity::horzcat(&[]).unwrap().is_same(&Sparsity::empty()));
}

#[test]
fn concatenation_split_round_trip() {
    let a = test_pattern();
    let big = Sparsity::blockcat(&[
        vec![a.clone(), Sparsity::dense(2, 1)],
        vec![Sparsity::zeros(3, 3), Sparsity::diag(3, 1)],
    ])
    .unwrap();
    assert_eq!(big.size(), (5, 4));
    assert_eq!(big.nnz(), 7);

    let cols = big.horzsplit(&[0, 3, 4]).unwrap();
    assert_eq!(Sparsity::horzcat(&cols).unwrap(), big);

    let rows = big.vertsplit(&[0, 2, 5]).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(Sparsity::vertcat(&rows).unwrap(), big);

    let blocks = big.diagsplit(&[0, 2, 5], &[0, 3, 4]).unwrap();
    assert_eq!(blocks[0], a);
    assert_eq!(blocks[1], Sparsity::diag(3, 1));
}

#[test]
fn concatenation_diagcat() {
    let sp = Sparsity::diagcat(&[Sparsity::dense(1, 2), test_pattern(), Sparsity::scalar(true)]);
    assert_eq!(sp.size(), (4, 6));
    assert_eq!(sp.nnz(), 7);
    let blocks = sp.diagsplit(&[0, 1, 3, 4], &[0, 2, 5, 6]).unwrap();
    assert!(blocks[0].is_dense());
    assert_eq!(blocks[1], test_pattern());
    assert!(blocks[2].is_same(&Sparsity::scalar(true)));
}

#[test]
fn concatenation_bad_offsets() {
    let a = test_pattern();
    assert!(matches!(
        a.horzsplit(&[0, 2]),
        Err(SparsityError::InvalidOffsets { .. })
    ));
    assert!(matches!(
        a.vertsplit(&[1, 2]),
        Err(SparsityError::InvalidOffsets { .. })
    ));
    assert!(a.horzsplit(&[0, 2, 1, 3]).is_err());
}

#[test]
fn concatenation_append_in_place() {
    let mut sp = test_pattern();
    sp.append(&Sparsity::dense(1, 3)).unwrap();
    assert_eq!(sp.size(), (3, 3));
    assert_eq!(sp.nnz(), 7);

    sp.append_columns(&Sparsity::diag(3, 1)).unwrap();
    assert_eq!(sp.size(), (3, 4));
    assert_eq!(sp.nnz(), 8);

    assert!(sp.append(&Sparsity::dense(1, 2)).is_err());
}

#[test]
fn concatenation_sub() {
    let a = test_pattern();
    // columns reversed, rows repeated
    let (sub, mapping) = a.sub(&[1, 1], &[2, 0]).unwrap();
    assert_eq!(sub.size(), (2, 2));
    assert_eq!(sub.get_colind(), vec![0, 2, 2]);
    assert_eq!(sub.get_row(), vec![0, 1]);
    assert_eq!(mapping, vec![3, 3]);

    assert!(a.sub(&[0], &[3]).is_err());
    assert!(a.sub(&[2], &[0]).is_err());
}

#[test]
fn concatenation_erase_and_enlarge() {
    let mut sp = test_pattern();
    let kept = sp.erase(&[0], &[0, 2]).unwrap();
    assert_eq!(kept, vec![1, 3]);
    assert_eq!(sp.nnz(), 2);

    sp.enlarge(4, 5, &[1, 3], &[0, 2, 4]).unwrap();
    assert_eq!(sp.size(), (4, 5));
    let (rows, cols) = sp.get_triplet();
    assert_eq!(rows, vec![3, 3]);
    assert_eq!(cols, vec![2, 4]);
}
