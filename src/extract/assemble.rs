use crate::types::AudioFeatures;

use super::{
    ExtractError,
    table::{FeatureRow, FeatureTable},
};

/// Marks every position whose audio-feature record is present.
pub fn feature_mask(features: &[Option<AudioFeatures>]) -> Vec<bool> {
    features.iter().map(Option::is_some).collect()
}

/// Keeps the items whose mask entry is `true`, preserving order.
///
/// Applying the same mask to several index-aligned sequences keeps them
/// aligned with each other.
pub fn apply_mask<T>(items: Vec<T>, mask: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(mask)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

/// Builds the feature table from the concatenated per-page sequences.
///
/// The mask is derived once from `features` and applied to both sequences,
/// so every surviving label stays paired with the feature record it was
/// resolved alongside. Tracks without features never produce a row.
///
/// # Errors
///
/// Returns [`ExtractError::Misaligned`] when the sequences differ in length.
pub fn assemble_table(
    features: Vec<Option<AudioFeatures>>,
    labels: Vec<Option<String>>,
) -> Result<FeatureTable, ExtractError> {
    if features.len() != labels.len() {
        return Err(ExtractError::Misaligned {
            features: features.len(),
            labels: labels.len(),
        });
    }

    let mask = feature_mask(&features);
    let features = apply_mask(features, &mask);
    let labels = apply_mask(labels, &mask);

    let rows = features
        .into_iter()
        .flatten()
        .zip(labels)
        .map(|(features, label)| FeatureRow { features, label })
        .collect();

    Ok(FeatureTable::from_rows(rows))
}
