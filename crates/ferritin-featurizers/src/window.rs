use crate::alphabet::PAD;
use crate::error::FeatureError;

/// Cut `size` residues centered on the 1-based `position`.
///
/// Flanks that run past either end of the sequence are filled with [`PAD`].
///
/// ```
/// use ferritin_featurizers::centered_window;
/// assert_eq!(centered_window("MSKTY", 2, 5).unwrap(), "*MSKT");
/// ```
pub fn centered_window(
    sequence: &str,
    position: usize,
    size: usize,
) -> Result<String, FeatureError> {
    if size % 2 == 0 {
        return Err(FeatureError::EvenWindow(size));
    }
    let residues: Vec<char> = sequence.chars().collect();
    if position == 0 || position > residues.len() {
        return Err(FeatureError::PositionOutOfRange {
            position,
            length: residues.len(),
        });
    }
    let half = size / 2;
    let center = position - 1;
    let window = (0..size)
        .map(|offset| {
            (center + offset)
                .checked_sub(half)
                .and_then(|idx| residues.get(idx))
                .copied()
                .unwrap_or(PAD)
        })
        .collect();
    Ok(window)
}
