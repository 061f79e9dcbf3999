//---------------------------------------------------------
// low-level internal utilities shared by the pattern
// constructors and transforms.
//---------------------------------------------------------

use super::SparsityError;

// Convert per-column counts stored one slot to the right
// (count of column i in v[i+1], v[0] == 0) into offsets.
pub(crate) fn colcount_to_colind(v: &mut [usize]) {
    for i in 1..v.len() {
        v[i] += v[i - 1];
    }
}

// wrap a possibly negative index into [0,bound)
pub(crate) fn wrap_index(
    context: &'static str,
    index: isize,
    bound: usize,
) -> Result<usize, SparsityError> {
    let wrapped = if index < 0 {
        index + bound as isize
    } else {
        index
    };
    if wrapped < 0 || wrapped as usize >= bound {
        return Err(SparsityError::out_of_range(context, index, bound));
    }
    Ok(wrapped as usize)
}

// split offsets must start at zero, end at `total` and be monotone
pub(crate) fn check_offsets(
    context: &'static str,
    offset: &[usize],
    total: usize,
) -> Result<(), SparsityError> {
    let reason = match (offset.first(), offset.last()) {
        (None, _) | (_, None) => "offset list is empty".to_string(),
        (Some(&first), _) if first != 0 => format!("first offset is {}, expected 0", first),
        (_, Some(&last)) if last != total => {
            format!("last offset is {}, expected {}", last, total)
        }
        _ if offset.windows(2).any(|w| w[0] > w[1]) => "offsets are not monotone".to_string(),
        _ => return Ok(()),
    };
    Err(SparsityError::InvalidOffsets { context, reason })
}

// position map for a list of indices: entry i holds Some(k) if index i
// appears at position k.  Fails on an index outside [0,bound).
pub(crate) fn index_lookup(
    context: &'static str,
    idx: &[usize],
    bound: usize,
) -> Result<Vec<Option<usize>>, SparsityError> {
    let mut lookup = vec![None; bound];
    for (k, &i) in idx.iter().enumerate() {
        if i >= bound {
            return Err(SparsityError::out_of_range(context, i as isize, bound));
        }
        lookup[i] = Some(k);
    }
    Ok(lookup)
}

#[test]
fn test_colcount_to_colind() {
    let mut v = vec![0, 2, 0, 3];
    colcount_to_colind(&mut v);
    assert_eq!(v, vec![0, 2, 2, 5]);
}

#[test]
fn test_wrap_index() {
    assert_eq!(wrap_index("t", -1, 4), Ok(3));
    assert_eq!(wrap_index("t", 2, 4), Ok(2));
    assert!(wrap_index("t", 4, 4).is_err());
    assert!(wrap_index("t", -5, 4).is_err());
}

#[test]
fn test_check_offsets() {
    assert!(check_offsets("t", &[0, 2, 5], 5).is_ok());
    assert!(check_offsets("t", &[], 5).is_err());
    assert!(check_offsets("t", &[1, 5], 5).is_err());
    assert!(check_offsets("t", &[0, 4], 5).is_err());
    assert!(check_offsets("t", &[0, 3, 2, 5], 5).is_err());
}
