use num_traits::PrimInt;
use std::fmt::Debug;

/// Dependency bit vector used by the propagation kernels.
///
/// Each bit stands for one seed direction.  Any primitive unsigned
/// integer qualifies; wider types propagate more directions per sweep.
pub trait BitVecT: PrimInt + Default + Debug + Send + Sync + 'static {
    /// number of seed directions carried by one value
    const WIDTH: usize;
}

macro_rules! impl_bitvec_t {
    ($($t:ty),*) => {
        $(
        impl BitVecT for $t {
            const WIDTH: usize = <$t>::BITS as usize;
        }
        )*
    };
}
impl_bitvec_t!(u8, u16, u32, u64, u128);

/// Default bit vector type.
pub type Bvec = u64;

#[test]
fn test_bitvec_width() {
    assert_eq!(<Bvec as BitVecT>::WIDTH, 64);
    assert_eq!(<u8 as BitVecT>::WIDTH, 8);
}
