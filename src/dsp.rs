// NoiseNode — Signal Conditioning
//
// In-place per-packet transform: remove the DC offset (the packet mean) and
// scale by a fixed gain, saturating to the i16 range. MEMS microphones sit on
// a DC bias, so centering each batch is required before the server can treat
// the stream as a waveform.

/// Remove the DC offset from `samples` and scale by `gain`, in place.
///
/// The mean is accumulated in i64 (no overflow for any slice that fits in
/// memory) and applied in f32 to avoid truncation bias; results are rounded
/// and saturated to the i16 range. Runs in O(N) with no allocation.
pub fn condition(samples: &mut [i16], gain: f32) {
    if samples.is_empty() {
        return;
    }

    let sum: i64 = samples.iter().map(|&s| s as i64).sum();
    let mean = sum as f32 / samples.len() as f32;

    for s in samples.iter_mut() {
        let v = (*s as f32 - mean) * gain;
        *s = v.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_of(samples: &[i16]) -> f32 {
        samples.iter().map(|&s| s as i64).sum::<i64>() as f32 / samples.len() as f32
    }

    #[test]
    fn worked_example() {
        // mean 250; offset removal gives [-150,-50,50,150]; gain 0.5 halves.
        let mut samples = [100, 200, 300, 400];
        condition(&mut samples, 0.5);
        assert_eq!(samples, [-75, -25, 25, 75]);
    }

    #[test]
    fn offset_is_removed() {
        let mut samples = [1500i16, 1520, 1480, 1510, 1490, 1505];
        let input_mean = mean_of(&samples).abs();

        condition(&mut samples, 1.0);

        assert!(mean_of(&samples).abs() < input_mean);
        assert!(mean_of(&samples).abs() <= 1.0);
    }

    #[test]
    fn output_stays_in_range_at_extremes() {
        let mut samples = [i16::MIN, i16::MAX, i16::MIN, i16::MAX, i16::MAX];
        condition(&mut samples, 1.0);
        // No panic and every value representable — the saturating clamp held.
        for &s in &samples {
            assert!(s >= i16::MIN && s <= i16::MAX);
        }
    }

    #[test]
    fn zero_mean_buffer_degenerates_to_pure_scaling() {
        let mut samples = [-100i16, 100, -40, 40, 0];
        condition(&mut samples, 0.5);
        assert_eq!(samples, [-50, 50, -20, 20, 0]);
    }

    #[test]
    fn constant_buffer_flattens_to_zero() {
        let mut samples = [777i16; 32];
        condition(&mut samples, 0.8);
        assert_eq!(samples, [0i16; 32]);
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let mut samples: [i16; 0] = [];
        condition(&mut samples, 0.5);
    }
}
