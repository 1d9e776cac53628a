//! Affine int8 quantization
//!
//! Maps pixel intensities to the network's fixed-point input domain:
//!
//! ```text
//! normalized = raw / 255.0
//! q          = clamp(round(normalized / scale) + zero_point, -128, 127)
//! ```
//!
//! Rounding is half-away-from-zero and the clamp saturates. The order
//! normalize, divide, round, offset, clamp is fixed; the model was calibrated
//! against it.

/// Largest raw pixel value
const PIXEL_MAX: f32 = 255.0;

/// Quantization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QuantError {
    /// Scale is zero, negative, NaN or infinite
    InvalidScale,
    /// Source and destination lengths differ
    LengthMismatch { expected: usize, actual: usize },
}

/// Affine quantization parameters of the network input
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuantParams {
    scale: f32,
    zero_point: i32,
}

impl QuantParams {
    /// Create parameters, rejecting non-positive or non-finite scales
    pub fn new(scale: f32, zero_point: i32) -> Result<Self, QuantError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(QuantError::InvalidScale);
        }
        Ok(Self { scale, zero_point })
    }

    /// Step size between adjacent fixed-point values
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Fixed-point value representing real 0.0
    pub fn zero_point(&self) -> i32 {
        self.zero_point
    }

    /// Quantize a real value
    pub fn quantize(&self, x: f32) -> i8 {
        let steps = libm::roundf(x / self.scale);
        // `as` saturates on overflow; widen so the offset cannot wrap
        let q = (steps as i64).saturating_add(self.zero_point as i64);
        q.clamp(i8::MIN as i64, i8::MAX as i64) as i8
    }

    /// Quantize one raw pixel byte
    pub fn quantize_pixel(&self, raw: u8) -> i8 {
        self.quantize(raw as f32 / PIXEL_MAX)
    }

    /// Quantize a whole image into `dst`
    ///
    /// `dst` is normally the engine's input view. It is left untouched when
    /// the lengths differ.
    pub fn quantize_frame(&self, raw: &[u8], dst: &mut [i8]) -> Result<(), QuantError> {
        if raw.len() != dst.len() {
            return Err(QuantError::LengthMismatch {
                expected: raw.len(),
                actual: dst.len(),
            });
        }
        for (out, &pixel) in dst.iter_mut().zip(raw) {
            *out = self.quantize_pixel(pixel);
        }
        Ok(())
    }

    /// Real value represented by `q`
    pub fn dequantize(&self, q: i8) -> f32 {
        (q as i32 - self.zero_point) as f32 * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Typical TFLM uint8-image input calibration
    fn mnist_params() -> QuantParams {
        QuantParams::new(1.0 / 255.0, -128).unwrap()
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert_eq!(QuantParams::new(0.0, 0), Err(QuantError::InvalidScale));
        assert_eq!(QuantParams::new(-0.5, 0), Err(QuantError::InvalidScale));
        assert_eq!(QuantParams::new(f32::NAN, 0), Err(QuantError::InvalidScale));
        assert_eq!(QuantParams::new(f32::INFINITY, 0), Err(QuantError::InvalidScale));
        assert!(QuantParams::new(1e-6, 0).is_ok());
    }

    #[test]
    fn test_mnist_endpoints() {
        let params = mnist_params();
        assert_eq!(params.quantize_pixel(0), -128);
        assert_eq!(params.quantize_pixel(128), 0);
        assert_eq!(params.quantize_pixel(255), 127);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let params = QuantParams::new(1.0, 0).unwrap();
        assert_eq!(params.quantize(0.5), 1);
        assert_eq!(params.quantize(-0.5), -1);
        assert_eq!(params.quantize(2.5), 3);
        assert_eq!(params.quantize(-2.5), -3);
        assert_eq!(params.quantize(2.4), 2);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        // 255 / 255 / 0.001 = 1000, far above the int8 range
        let params = QuantParams::new(0.001, 0).unwrap();
        assert_eq!(params.quantize_pixel(255), 127);

        let params = QuantParams::new(1.0, 200).unwrap();
        assert_eq!(params.quantize_pixel(0), 127);

        let params = QuantParams::new(1.0, -300).unwrap();
        assert_eq!(params.quantize_pixel(255), -128);

        let params = QuantParams::new(1e-30, i32::MAX).unwrap();
        assert_eq!(params.quantize_pixel(255), 127);
    }

    #[test]
    fn test_rounding_happens_before_clamp() {
        // 127.4 rounds to 127 and fits; clamping first would not change it,
        // but 127.6 must round up to 128 and then saturate to 127
        let params = QuantParams::new(1.0, 0).unwrap();
        assert_eq!(params.quantize(127.4), 127);
        assert_eq!(params.quantize(127.6), 127);
        assert_eq!(params.quantize(-128.6), -128);
    }

    #[test]
    fn test_zero_frame_maps_to_zero_point() {
        let params = QuantParams::new(0.02, 5).unwrap();
        let raw = [0u8; 16];
        let mut dst = [0i8; 16];
        params.quantize_frame(&raw, &mut dst).unwrap();
        assert!(dst.iter().all(|&q| q == 5));
    }

    #[test]
    fn test_frame_length_mismatch_leaves_destination() {
        let params = mnist_params();
        let raw = [255u8; 4];
        let mut dst = [7i8; 3];
        assert_eq!(
            params.quantize_frame(&raw, &mut dst),
            Err(QuantError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(dst, [7, 7, 7]);
    }

    #[test]
    fn test_dequantize_inverts_on_grid() {
        let params = QuantParams::new(0.5, 10).unwrap();
        assert_eq!(params.dequantize(10), 0.0);
        assert_eq!(params.dequantize(14), 2.0);
        assert_eq!(params.quantize(params.dequantize(-3)), -3);
    }

    proptest! {
        #[test]
        fn prop_matches_reference_formula(
            raw in any::<u8>(),
            scale in 1e-4f32..10.0,
            zero_point in -1000i32..1000,
        ) {
            let params = QuantParams::new(scale, zero_point).unwrap();
            let expected = (libm::roundf(raw as f32 / 255.0 / scale) as i64 + zero_point as i64)
                .clamp(-128, 127);
            prop_assert_eq!(params.quantize_pixel(raw) as i64, expected);
        }

        #[test]
        fn prop_deterministic(
            raw in proptest::collection::vec(any::<u8>(), 32),
            scale in 1e-4f32..10.0,
            zero_point in -300i32..300,
        ) {
            let params = QuantParams::new(scale, zero_point).unwrap();
            let mut a = [0i8; 32];
            let mut b = [0i8; 32];
            params.quantize_frame(&raw, &mut a).unwrap();
            params.quantize_frame(&raw, &mut b).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_monotonic_in_pixel(
            lo in any::<u8>(),
            hi in any::<u8>(),
            scale in 1e-4f32..10.0,
            zero_point in -300i32..300,
        ) {
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            let params = QuantParams::new(scale, zero_point).unwrap();
            prop_assert!(params.quantize_pixel(lo) <= params.quantize_pixel(hi));
        }
    }
}
