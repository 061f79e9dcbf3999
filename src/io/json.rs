use crate::sparsity::{SparseFormatError, Sparsity};

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// Plain compressed column data, the serialized form of a [`Sparsity`].
///
/// Deserializing a `Sparsity` goes through this type and checks the
/// pattern invariants before interning.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SparsityRaw {
    pub nrow: usize,
    pub ncol: usize,
    pub colind: Vec<usize>,
    pub row: Vec<usize>,
}

impl From<Sparsity> for SparsityRaw {
    fn from(sp: Sparsity) -> Self {
        SparsityRaw {
            nrow: sp.nrow(),
            ncol: sp.ncol(),
            colind: sp.get_colind(),
            row: sp.get_row(),
        }
    }
}

impl TryFrom<SparsityRaw> for Sparsity {
    type Error = SparseFormatError;

    fn try_from(raw: SparsityRaw) -> Result<Self, Self::Error> {
        Sparsity::try_new(raw.nrow, raw.ncol, raw.colind, raw.row)
    }
}

impl Sparsity {
    /// Write the pattern to a file as JSON.
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Read a pattern written by [`Sparsity::write_to_file`].
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let sp: Sparsity = serde_json::from_str(&buffer)?;
        Ok(sp)
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    // [x ⋅ x ]
    // [⋅ ⋅ x ]
    let sp = Sparsity::new(2, 3, vec![0, 1, 1, 3], vec![0, 0, 1]);

    // write the pattern to a file
    let mut file = tempfile::tempfile().unwrap();
    sp.write_to_file(&mut file).unwrap();

    // read the pattern from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let sp2 = Sparsity::read_from_file(&mut file).unwrap();
    assert!(sp2.is_same(&sp));
}

#[test]
fn test_json_rejects_malformed() {
    let json = r#"{"nrow":2,"ncol":1,"colind":[0,2],"row":[1,0]}"#;
    let result: Result<Sparsity, _> = serde_json::from_str(json);
    assert!(result.is_err());

    let json = r#"{"nrow":2,"ncol":1,"colind":[0,2],"row":[0,1]}"#;
    let sp: Sparsity = serde_json::from_str(json).unwrap();
    assert!(sp.is_same(&Sparsity::dense(2, 1)));
    assert_eq!(
        serde_json::to_string(&sp).unwrap(),
        r#"{"nrow":2,"ncol":1,"colind":[0,2],"row":[0,1]}"#
    );
}
