use group::{prime::PrimeCurveAffine, Group};

use crate::{G1Point, G1Projective, G2Point, G2Projective, Scalar};

/// A multi-scalar multiplication algorithm over G1 elements
///
/// Note: "unsafe" refers to the fact that blst will return the identity
/// element, if any of the points are the identity element.
///
/// Calling this method means that the caller is aware that there are no
/// identity elements amongst their points.
///
/// See test below named `blst_footgun` for the edge case.
pub fn g1_lincomb_unsafe(points: &[G1Point], scalars: &[Scalar]) -> Option<G1Projective> {
    if points.len() != scalars.len() {
        return None;
    }
    let proj_points: Vec<_> = points.iter().map(Into::into).collect();
    Some(G1Projective::multi_exp(&proj_points, scalars))
}

/// A multi-scalar multiplication algorithm over G2 elements
///
/// Returns None if the points and the scalars are not the
/// same length.
///
/// Note: "unsafe" refers to the fact that blst will return the identity
/// element, if any of the points are the identity element.
///
/// Calling this method means that the caller is aware that there are no
/// identity elements amongst their points.
///
/// See test below named `blst_footgun` for the edge case.
pub fn g2_lincomb_unsafe(points: &[G2Point], scalars: &[Scalar]) -> Option<G2Projective> {
    if points.len() != scalars.len() {
        return None;
    }
    let proj_points: Vec<_> = points.iter().map(Into::into).collect();
    Some(G2Projective::multi_exp(&proj_points, scalars))
}

/// A multi-scalar multiplication algorithm over G1 elements
///
/// Returns None if the points and the scalars are not the
/// same length.
///
/// This method is a safe wrapper around `g1_lincomb_unsafe`.
///
/// It filters out any points that are the identity, since the underlying
/// Pippenger routine collapses the whole sum to the identity if even one
/// input point is the identity.
pub fn g1_lincomb(points: &[G1Point], scalars: &[Scalar]) -> Option<G1Projective> {
    if points.len() != scalars.len() {
        return None;
    }
    let (points_filtered, scalars_filtered): (Vec<_>, Vec<_>) = points
        .iter()
        .zip(scalars)
        .filter(|(point, _)| !(bool::from(point.is_identity())))
        .map(|(point, scalar)| (*point, *scalar))
        .unzip();
    if points_filtered.is_empty() {
        return Some(G1Projective::identity());
    }
    g1_lincomb_unsafe(&points_filtered, &scalars_filtered)
}

/// A multi-scalar multiplication algorithm over G2 elements
///
/// Returns None if the points and the scalars are not the
/// same length.
///
/// This method is a safe wrapper around `g2_lincomb_unsafe`.
///
/// It filters out any points that are the identity.
pub fn g2_lincomb(points: &[G2Point], scalars: &[Scalar]) -> Option<G2Projective> {
    if points.len() != scalars.len() {
        return None;
    }
    let (points_filtered, scalars_filtered): (Vec<_>, Vec<_>) = points
        .iter()
        .zip(scalars)
        .filter(|(point, _)| !(bool::from(point.is_identity())))
        .map(|(point, scalar)| (*point, *scalar))
        .unzip();
    if points_filtered.is_empty() {
        return Some(G2Projective::identity());
    }
    g2_lincomb_unsafe(&points_filtered, &scalars_filtered)
}

#[cfg(test)]
mod tests {
    use group::{prime::PrimeCurveAffine, Group};

    use super::*;
    use crate::G1Projective;

    #[test]
    fn blst_footgun() {
        let points = vec![G1Point::generator(), G1Point::identity()];
        let scalars = vec![Scalar::ONE, Scalar::ONE];

        // Ideally, we expect the answer to be:
        // 1 * G + 1 * 0 = G
        // However, since one of the points is the identity, the answer is 0 for blst

        let result = g1_lincomb_unsafe(&points, &scalars)
            .expect("number of points and number of scalars should be equal");
        assert_eq!(result, G1Projective::identity());

        // Doing it with the g1_lincomb method will give the correct result
        let result = g1_lincomb(&points, &scalars)
            .expect("number of points and number of scalars should be equal");
        assert_eq!(result, G1Projective::generator());
    }

    #[test]
    fn length_mismatch_returns_none() {
        let points = vec![G1Point::generator()];
        let scalars = vec![];
        assert_eq!(g1_lincomb(&points, &scalars), None);
        assert_eq!(g1_lincomb_unsafe(&points, &scalars), None);
    }

    #[test]
    fn empty_input_is_identity() {
        let result = g1_lincomb(&[], &[]).expect("empty input is valid");
        assert_eq!(result, G1Projective::identity());
    }
}
