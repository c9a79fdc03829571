use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use quarry_geom::Vec3;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn bounded_nonzero_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded_nonzero", |v| {
        v.is_finite() && {
            let a = v.abs();
            (1e-6..=1e6).contains(&a)
        }
    })
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_nondegenerate_vec3() -> impl Strategy<Value = Vec3> {
    (
        bounded_nonzero_f32(),
        bounded_nonzero_f32(),
        bounded_nonzero_f32(),
    )
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Distributive property of dot over addition: (a + b)·c = a·c + b·c
    #[test]
    fn vec3_dot_distributive(
        a in arb_vec3(),
        b in arb_vec3(),
        c in arb_vec3(),
    ) {
        let left = (a + b).dot(c);
        let right = a.dot(c) + b.dot(c);
        prop_assert!(approx_abs_rel(left, right, 1e-6, 1e-5));
    }

    // Normalized length: |normalize(v)| = 1 for non-zero input
    #[test]
    fn vec3_normalized_length(
        v in arb_nondegenerate_vec3(),
    ) {
        let n = v.normalized();
        prop_assert!(approx(n.length(), 1.0, 1e-3));
    }

    // Cauchy-Schwarz: |a·b| <= |a||b|
    #[test]
    fn vec3_cauchy_schwarz(
        a in arb_vec3(),
        b in arb_vec3(),
    ) {
        let lhs = a.dot(b).abs();
        let rhs = a.length() * b.length();
        prop_assert!(lhs <= rhs + 1e-6 + 1e-5 * rhs.max(1.0));
    }

    // Triangle inequality: |a + b| <= |a| + |b|
    #[test]
    fn vec3_triangle_inequality(
        a in arb_vec3(),
        b in arb_vec3(),
    ) {
        let lhs = (a + b).length();
        let rhs = a.length() + b.length();
        prop_assert!(lhs <= rhs + 1e-6 + 1e-5 * rhs.max(1.0));
    }
}
