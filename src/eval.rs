use crate::error::NoOverlap;
use crate::types::RatingGroup;

/// Root mean square error between two rating groups. Only keys present in
/// both groups count, their vectors are compared positionally up to the
/// shorter length. Comparing groups with nothing in common is an error,
/// not a zero.
pub fn root_mean_square_error(
    predicted: &RatingGroup,
    actual: &RatingGroup,
) -> Result<f64, NoOverlap> {
    let mut sum = 0.0;
    let mut count = 0u64;

    for (key, predicted_ratings) in predicted {
        if let Some(actual_ratings) = actual.get(key) {
            for (&p, &a) in predicted_ratings.iter().zip(actual_ratings) {
                let difference = p as f64 - a as f64;
                sum += difference * difference;
                count += 1;
            }
        }
    }

    if count == 0 {
        return Err(NoOverlap);
    }

    Ok((sum / count as f64).sqrt())
}
