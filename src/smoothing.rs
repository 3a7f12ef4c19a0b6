/// Single-pass 3-tap moving average used for line and area rendering.
///
/// Sequences shorter than three come back unchanged. Otherwise both endpoints
/// pass through and every interior point becomes the mean of itself and its two
/// neighbours, all taken from the *input* sequence. The input is never mutated;
/// raw samples stay available for tooltips and stats.
pub fn smooth<T>(values: &[T]) -> Vec<f64>
where
    T: Copy + Into<f64>,
{
    let raw: Vec<f64> = values.iter().map(|v| (*v).into()).collect();
    if raw.len() < 3 {
        return raw;
    }
    let last = raw.len() - 1;
    (0..raw.len())
        .map(|i| {
            if i == 0 || i == last {
                raw[i]
            } else {
                (raw[i - 1] + raw[i] + raw[i + 1]) / 3.0
            }
        })
        .collect()
}
