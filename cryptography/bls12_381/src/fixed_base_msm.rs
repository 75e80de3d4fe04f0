use crate::lincomb::g1_lincomb;
use crate::{G1Projective, Scalar};
use blstrs::{Fp, G1Affine};
use ff::PrimeField;

/// FixedBaseMSMPrecompBLST computes a multi scalar multiplication using a windowed
/// precomputation table built by blst.
///
/// The table trades memory for time: increasing `wbits` shrinks the number of point
/// additions needed per MSM at the cost of a larger table.
#[derive(Debug)]
pub struct FixedBaseMSMPrecompBLST {
    table: Vec<blst::blst_p1_affine>,
    wbits: usize,
    num_points: usize,
    scratch_space_size: usize,
}

/// UsePrecomp indicates whether we should use pre-computations to speed up the MSM
/// and the level of precomputation to perform.
#[derive(Debug, Copy, Clone)]
pub enum UsePrecomp {
    Yes { width: usize },
    No,
}

/// FixedBaseMSM computes a multi scalar multiplication where the points are known beforehand.
///
/// Since the points are known, one can choose to precompute a windowed table for them
/// in order to reduce the amount of work needed to compute the MSM, at the cost
/// of memory.
#[derive(Debug)]
pub enum FixedBaseMSM {
    Precomp(FixedBaseMSMPrecompBLST),
    NoPrecomp(Vec<G1Affine>),
}

impl FixedBaseMSM {
    pub fn new(generators: Vec<G1Affine>, use_precomp: UsePrecomp) -> Self {
        match use_precomp {
            UsePrecomp::Yes { width } => {
                Self::Precomp(FixedBaseMSMPrecompBLST::new(&generators, width))
            }
            UsePrecomp::No => Self::NoPrecomp(generators),
        }
    }

    pub fn msm(&self, scalars: &[Scalar]) -> G1Projective {
        match self {
            Self::Precomp(precomp) => precomp.msm(scalars.to_vec()),
            Self::NoPrecomp(generators) => g1_lincomb(generators, scalars)
                .expect("number of generators and scalars should be equal"),
        }
    }
}

impl FixedBaseMSMPrecompBLST {
    pub fn new(generators_affine: &[G1Affine], wbits: usize) -> Self {
        let num_points = generators_affine.len();
        let table_size_bytes =
            unsafe { blst::blst_p1s_mult_wbits_precompute_sizeof(wbits, num_points) };

        // blst expects these to be references, so we convert from Vec<T> to Vec<&T>
        let generators_affine: Vec<&G1Affine> = generators_affine.iter().collect();

        // Calculate the number of blst_p1_affine elements
        let table_size = table_size_bytes / std::mem::size_of::<blst::blst_p1_affine>();

        let points = generators_affine
            .as_ptr()
            .cast::<*const blst::blst_p1_affine>();

        let mut table = vec![blst::blst_p1_affine::default(); table_size];
        unsafe {
            blst::blst_p1s_mult_wbits_precompute(table.as_mut_ptr(), wbits, points, num_points);
        };

        let scratch_space_size = unsafe { blst::blst_p1s_mult_wbits_scratch_sizeof(num_points) };

        Self {
            table,
            wbits,
            num_points,
            scratch_space_size,
        }
    }

    #[allow(clippy::ptr_as_ptr)]
    pub fn msm(&self, scalars: Vec<Scalar>) -> G1Projective {
        const NUM_BITS_SCALAR: usize = Scalar::NUM_BITS as usize;

        assert_eq!(
            scalars.len(),
            self.num_points,
            "number of scalars must match the number of points in the precomputed table"
        );

        let mut ret = blst::blst_p1::default();

        let blst_scalars: Vec<_> = scalars
            .into_iter()
            .map(|scalar| Into::<blst::blst_scalar>::into(scalar).b)
            .collect();
        let blst_scalar_ptrs: Vec<*const u8> = blst_scalars
            .iter()
            .map(|s| s as *const _ as *const u8)
            .collect();

        let mut scratch_pad: Vec<blst::limb_t> = Vec::with_capacity(self.scratch_space_size);

        unsafe {
            blst::blst_p1s_mult_wbits(
                &mut ret,
                self.table.as_ptr(),
                self.wbits,
                self.num_points,
                blst_scalar_ptrs.as_ptr(),
                NUM_BITS_SCALAR,
                scratch_pad.as_mut_ptr(),
            );
        }

        let x = Fp::from_raw_unchecked(ret.x.l);
        let y = Fp::from_raw_unchecked(ret.y.l);
        let z = Fp::from_raw_unchecked(ret.z.l);

        G1Projective::from_raw_unchecked(x, y, z)
    }
}
