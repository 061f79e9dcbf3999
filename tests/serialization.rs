use structsparse::*;

fn serialization_test_patterns() -> Vec<Sparsity> {
    vec![
        Sparsity::empty(),
        Sparsity::scalar(false),
        Sparsity::dense(3, 2),
        Sparsity::zeros(4, 0),
        Sparsity::banded(5, 1),
        Sparsity::triplet(3, 4, &[2, 0, 1], &[0, 3, 3]).unwrap(),
    ]
}

#[test]
fn serialization_compressed_round_trip() {
    for sp in serialization_test_patterns() {
        let v = sp.compress();
        assert_eq!(v.len(), 3 + sp.ncol() + sp.nnz());
        assert_eq!(v[2 + sp.ncol()], sp.nnz());
        let back = Sparsity::compressed(&v).unwrap();
        assert!(back.is_same(&sp), "{}", sp);
    }
}

#[test]
fn serialization_compressed_dense_short_form() {
    // [nrow, ncol, colind] with nnz == nrow*ncol
    let sp = Sparsity::compressed(&[3, 2, 0, 3, 6]).unwrap();
    assert!(sp.is_same(&Sparsity::dense(3, 2)));
}

#[test]
fn serialization_compressed_rejects_malformed() {
    // truncated row indices
    assert!(Sparsity::compressed(&[3, 2, 0, 1, 2, 0]).is_err());
    // unsorted rows within a column
    assert!(matches!(
        Sparsity::compressed(&[3, 1, 0, 2, 2, 1]),
        Err(SparsityError::Format(SparseFormatError::BadRowOrdering))
    ));
}

#[cfg(feature = "serde")]
#[test]
fn serialization_json_file_round_trip() {
    use std::io::{Seek, SeekFrom};

    for sp in serialization_test_patterns() {
        let mut file = tempfile::tempfile().unwrap();
        sp.write_to_file(&mut file).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let back = Sparsity::read_from_file(&mut file).unwrap();
        assert!(back.is_same(&sp));
    }
}

#[cfg(feature = "serde")]
#[test]
fn serialization_json_settings() {
    let settings = ColoringSettingsBuilder::default()
        .strategy(ColoringStrategy::Star)
        .cutoff(8)
        .build()
        .unwrap();
    let json = serde_json::to_string(&settings).unwrap();
    let back: ColoringSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);

    // missing fields take their defaults
    let partial: ColoringSettings = serde_json::from_str(r#"{"cutoff":3}"#).unwrap();
    assert_eq!(partial.cutoff, 3);
    assert_eq!(partial.ordering, ColoringOrdering::LargestFirst);
}

#[test]
fn serialization_spy_matlab() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banded.m");
    Sparsity::banded(3, 1).spy_matlab(&path).unwrap();
    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("sp_row = [1 2 1 2 3 2 3];"));
    assert!(script.contains("sp_col = [1 1 2 2 2 3 3];"));
    assert!(script.contains("M = sparse(sp_row, sp_col, 1, n, m);"));

    let mut text = Vec::new();
    Sparsity::banded(3, 1).spy(&mut text).unwrap();
    assert_eq!(String::from_utf8(text).unwrap(), "**.\n***\n.**\n");
}

#[test]
fn serialization_scatter_dense() {
    // [1 ⋅ ]
    // [2 3 ]
    let sp = Sparsity::lower(2);
    let mut out = [0; 4];
    sp.scatter_dense(&[1, 2, 3], &mut out);
    assert_eq!(out, [1, 2, 0, 3]);
}
