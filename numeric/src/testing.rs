#![cfg(test)]

pub const EPS: f32 = 1e-6;

#[track_caller]
pub fn assert_close(got: f32, expected: f32, tol: f32) {
    assert!((got - expected).abs() < tol, "got {got}, expected {expected}");
}

#[test]
fn tolerance_is_strict() {
    assert_close(0.1 + 0.2, 0.3, EPS);

    let outside = std::panic::catch_unwind(|| assert_close(1., 1.1, 0.1));
    assert!(outside.is_err());
}
