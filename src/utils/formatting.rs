/// Probability rendered as a percentage without trailing zeros.
///
/// `0.05` -> `"5"`, `0.005` -> `"0.5"`.
pub fn format_percent(rate: f64) -> String {
    let percent = (rate * 10_000.0).round() / 100.0;
    format!("{}", percent)
}

/// Mean generation count as written to sweep grids.
pub fn format_mean(mean: f64) -> String {
    format!("{:.2}", mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.05), "5");
        assert_eq!(format_percent(0.1), "10");
        assert_eq!(format_percent(0.005), "0.5");
        assert_eq!(format_percent(0.07), "7");
        assert_eq!(format_percent(1.0), "100");
    }

    #[test]
    fn test_format_mean() {
        assert_eq!(format_mean(12.0), "12.00");
        assert_eq!(format_mean(10.25), "10.25");
    }
}
