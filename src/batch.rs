//! Bulk helpers over packed [`Float3`] arrays, the exchange format of mesh data.

use crate::float::Float3;
use crate::matrix::Mat44;
use crate::vector::{UVec4, UVec8, Vec3, Vec4, Vec8};

/// Minimum number of points before `transform_points` splits work across threads.
pub const PARALLEL_THRESHOLD: usize = 4096;

#[cfg(feature = "parallel")]
const CHUNK_SIZE: usize = 1024;

/// Transform every point in place by `m` (affine, no perspective divide).
pub fn transform_points(m: &Mat44, points: &mut [Float3]) {
    if cfg!(feature = "parallel") && points.len() >= PARALLEL_THRESHOLD {
        log::trace!("transforming {} points in parallel", points.len());
        transform_parallel(m, points);
    } else {
        log::trace!("transforming {} points sequentially", points.len());
        transform_sequential(m, points);
    }
}

fn transform_sequential(m: &Mat44, points: &mut [Float3]) {
    for p in points {
        *p = Float3::from(*m * Vec3::load_float3(p));
    }
}

#[cfg(feature = "parallel")]
fn transform_parallel(m: &Mat44, points: &mut [Float3]) {
    use rayon::prelude::*;

    points
        .par_chunks_mut(CHUNK_SIZE)
        .for_each(|chunk| transform_sequential(m, chunk));
}

#[cfg(not(feature = "parallel"))]
fn transform_parallel(m: &Mat44, points: &mut [Float3]) {
    transform_sequential(m, points);
}

/// Axis-aligned bounds of `points` as `(min, max)`, or `None` when empty.
pub fn bounds(points: &[Float3]) -> Option<(Vec3, Vec3)> {
    let (first, rest) = points.split_first()?;
    let first = Vec3::load_float3(first);
    Some(rest.iter().fold((first, first), |(lo, hi), p| {
        let p = Vec3::load_float3(p);
        (Vec3::min(lo, p), Vec3::max(hi, p))
    }))
}

/// Number of points inside the closed box `[min, max]`. Points with a NaN
/// coordinate are never inside.
pub fn count_in_box(points: &[Float3], min: Vec3, max: Vec3) -> usize {
    let (min4, max4) = (Vec4::from(min), Vec4::from(max));
    let (min_x, min_y, min_z) = (Vec8::splat_x(min4), Vec8::splat_y(min4), Vec8::splat_z(min4));
    let (max_x, max_y, max_z) = (Vec8::splat_x(max4), Vec8::splat_y(max4), Vec8::splat_z(max4));

    let axis_inside = |v: Vec8, lo: Vec8, hi: Vec8| {
        UVec8::and(Vec8::greater_or_equal(v, lo), Vec8::less_or_equal(v, hi))
    };

    let mut chunks = points.chunks_exact(8);
    let mut count = 0;
    for chunk in &mut chunks {
        let xs: [f32; 8] = std::array::from_fn(|i| chunk[i].x);
        let ys: [f32; 8] = std::array::from_fn(|i| chunk[i].y);
        let zs: [f32; 8] = std::array::from_fn(|i| chunk[i].z);
        let (xs, ys, zs) = (Vec8::from(xs), Vec8::from(ys), Vec8::from(zs));
        let inside = UVec8::and(
            axis_inside(xs, min_x, max_x),
            UVec8::and(axis_inside(ys, min_y, max_y), axis_inside(zs, min_z, max_z)),
        );
        count += inside.count_trues() as usize;
    }

    count
        + chunks
            .remainder()
            .iter()
            .filter(|p| {
                let p = Vec3::load_float3(p);
                UVec4::and(Vec3::greater_or_equal(p, min), Vec3::less_or_equal(p, max))
                    .test_all_xyz_true()
            })
            .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(n: usize) -> Vec<Float3> {
        (0..n)
            .map(|i| Float3::new((i % 10) as f32, (i / 10 % 10) as f32, (i / 100) as f32))
            .collect()
    }

    #[test]
    fn test_transform_points_matches_matrix() {
        let m = Mat44::translation(Vec3::new(1.0, 2.0, 3.0)) * Mat44::scale(2.0);
        let mut points = grid(25);
        let expected: Vec<Float3> = points
            .iter()
            .map(|p| Float3::from(m * Vec3::from(*p)))
            .collect();
        transform_points(&m, &mut points);
        assert_eq!(points, expected);
        assert_eq!(points[0], Float3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_points_large_input() {
        let m = Mat44::rotation_z(0.25);
        let mut points = grid(PARALLEL_THRESHOLD + 17);
        let expected: Vec<Float3> = points
            .iter()
            .map(|p| Float3::from(m * Vec3::from(*p)))
            .collect();
        transform_points(&m, &mut points);
        assert_eq!(points, expected);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds(&[]), None);
        let points = [
            Float3::new(1.0, -2.0, 3.0),
            Float3::new(-4.0, 5.0, 0.5),
            Float3::new(2.0, 0.0, -6.0),
        ];
        let (lo, hi) = bounds(&points).unwrap();
        assert_eq!(lo, Vec3::new(-4.0, -2.0, -6.0));
        assert_eq!(hi, Vec3::new(2.0, 5.0, 3.0));
    }

    #[test]
    fn test_count_in_box() {
        let points = grid(1000);
        let min = Vec3::new(2.0, 3.0, 4.0);
        let max = Vec3::new(5.0, 5.0, 4.0);
        assert_eq!(count_in_box(&points, min, max), 4 * 3);
        assert_eq!(count_in_box(&points[..13], Vec3::zero(), Vec3::replicate(9.0)), 13);

        let mut with_nan = grid(9);
        with_nan[3].y = f32::NAN;
        with_nan[8].x = f32::NAN;
        assert_eq!(count_in_box(&with_nan, Vec3::zero(), Vec3::replicate(9.0)), 7);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn count_in_box_matches_scalar(
            coords in prop::collection::vec((-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0), 0..64),
        ) {
            let points: Vec<Float3> = coords.iter().map(|&(x, y, z)| Float3::new(x, y, z)).collect();
            let (min, max) = (Vec3::new(-5.0, -2.0, 0.0), Vec3::new(3.0, 8.0, 10.0));
            let expected = points
                .iter()
                .filter(|p| (-5.0..=3.0).contains(&p.x) && (-2.0..=8.0).contains(&p.y) && (0.0..=10.0).contains(&p.z))
                .count();
            prop_assert_eq!(count_in_box(&points, min, max), expected);
        }
    }
}
