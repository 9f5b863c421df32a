//! Star rating fill computation
//!
//! A 0-5 rating is drawn as five stars, each filled by a percentage.

/// Number of stars drawn
pub const STAR_COUNT: usize = 5;

/// Fill percentage (0-100) for each of the five stars
///
/// Non-finite ratings count as 0 and everything is clamped to `[0, 5]`.
/// Stars up to `floor(rating)` are full; the star at `ceil(rating)` gets the
/// fractional part.
pub fn star_fills(rating: f64) -> [f64; STAR_COUNT] {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, STAR_COUNT as f64)
    } else {
        0.0
    };

    let full = rating.floor();
    let partial = rating.ceil();
    let mut fills = [0.0; STAR_COUNT];
    for (i, fill) in fills.iter_mut().enumerate() {
        let position = (i + 1) as f64;
        if position <= full {
            *fill = 100.0;
        } else if position == partial {
            *fill = ((rating.fract() * 100.0) * 10_000.0).round() / 10_000.0;
        }
    }
    fills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_rating() {
        assert_eq!(star_fills(3.0), [100.0, 100.0, 100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_fractional_rating() {
        assert_eq!(star_fills(3.5), [100.0, 100.0, 100.0, 50.0, 0.0]);
    }

    #[test]
    fn test_clamped_and_invalid() {
        assert_eq!(star_fills(7.2), [100.0; 5]);
        assert_eq!(star_fills(-1.0), [0.0; 5]);
        assert_eq!(star_fills(f64::NAN), [0.0; 5]);
    }
}
