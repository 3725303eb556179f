/// Computes the arithmetic mean of integer scores. Returns 0.0 for empty input.
///
/// The sum is accumulated as `i64` so four `i32` scores cannot overflow.
pub fn mean(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    sum as f64 / values.len() as f64
}
