use structsparse::*;

// patterns are interned: equal structure means the same shared instance

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn interning_dense_layout() {
    let sp = Sparsity::dense(2, 3);
    assert_eq!(sp.nnz(), 6);
    assert_eq!(sp.colind(), &[0, 2, 4, 6]);
    assert_eq!(sp.row(), &[0, 1, 0, 1, 0, 1]);
    assert!(sp.is_dense());
}

#[test]
fn interning_empty_singleton() {
    fn first_call_site() -> Sparsity {
        Sparsity::new(0, 0, vec![0], vec![])
    }
    fn second_call_site() -> Sparsity {
        Sparsity::zeros(0, 0)
    }
    let a = first_call_site();
    let b = second_call_site();
    assert!(a.is_same(&b));
    assert!(a.is_same(&Sparsity::empty()));
}

#[test]
fn interning_scalar_singletons() {
    assert!(Sparsity::dense(1, 1).is_same(&Sparsity::scalar(true)));
    assert!(Sparsity::zeros(1, 1).is_same(&Sparsity::scalar(false)));
    assert!(!Sparsity::scalar(true).is_same(&Sparsity::scalar(false)));
}

#[test]
fn interning_identical_content() {
    // [x ⋅ x ]
    // [⋅ x x ]
    let colind = vec![0, 1, 2, 4];
    let row = vec![0, 1, 0, 1];
    let a = Sparsity::new(2, 3, colind.clone(), row.clone());
    let b = Sparsity::new(2, 3, colind.clone(), row.clone());
    assert!(a.is_same(&b));
    assert!(a.is_equal(2, 3, &colind, &row));
    assert_eq!(a, b);
    assert_eq!(a.hash_value(), b.hash_value());

    // built along a different route
    let (rows, cols) = a.get_triplet();
    let c = Sparsity::triplet(2, 3, &rows, &cols).unwrap();
    assert!(c.is_same(&a));
}

#[test]
fn interning_distinct_content() {
    let a = Sparsity::diag(3, 3);
    let b = Sparsity::lower(3);
    assert!(!a.is_same(&b));
    assert_ne!(a, b);
}

#[test]
fn interning_across_threads() {
    assert_send_sync::<Sparsity>();

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Sparsity::banded(6, 2)))
        .collect();
    let patterns: Vec<Sparsity> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let local = Sparsity::banded(6, 2);
    for sp in patterns.iter() {
        assert_eq!(*sp, local);
    }
    // all live at once, so all are one instance
    assert!(patterns.iter().all(|sp| sp.is_same(&local)));
}

#[test]
fn interning_mutation_rebinds() {
    let original = Sparsity::zeros(3, 3);
    let mut sp = original.clone();
    sp.add_nz(2, 1).unwrap();
    assert_eq!(original.nnz(), 0);
    assert_eq!(sp.nnz(), 1);
    assert!(!sp.is_same(&original));
}
