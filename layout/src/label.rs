/// Fixed-decimal label text, the way every value in a diagram is printed.
pub fn format_value(value: f32, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_the_requested_precision() {
        assert_eq!(format_value(0.37995, 2), "0.38");
        assert_eq!(format_value(-2., 1), "-2.0");
        assert_eq!(format_value(6., 0), "6");
    }
}
