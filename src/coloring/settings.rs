use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug)]
/// Error type returned by coloring settings validation
pub enum ColoringSettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Greedy coloring algorithm used by [`Sparsity::coloring`](crate::Sparsity::coloring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColoringStrategy {
    /// distance-2 coloring of the columns: no two columns of the same
    /// color share a row.  Suited to Jacobians.
    #[default]
    Unidirectional,
    /// star coloring of a symmetric pattern.  Suited to Hessians.
    Star,
    /// star coloring that tracks two-colored stars and their hubs
    StarHub,
}

/// Order in which the greedy colorings visit the columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColoringOrdering {
    /// columns in increasing index order
    Natural,
    /// columns by decreasing number of nonzeros
    #[default]
    LargestFirst,
}

/// Settings for [`Sparsity::coloring`](crate::Sparsity::coloring)

#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColoringSettings {
    ///coloring algorithm
    #[builder(default = "ColoringStrategy::Unidirectional")]
    pub strategy: ColoringStrategy,

    ///column visiting order
    #[builder(default = "ColoringOrdering::LargestFirst")]
    pub ordering: ColoringOrdering,

    ///maximum number of colors before falling back to one color per column
    #[builder(default = "usize::MAX")]
    pub cutoff: usize,
}

impl Default for ColoringSettings {
    fn default() -> ColoringSettings {
        ColoringSettingsBuilder::default().build().unwrap()
    }
}

impl From<ColoringSettingsError> for ColoringSettingsBuilderError {
    fn from(e: ColoringSettingsError) -> Self {
        ColoringSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl ColoringSettingsBuilder {
    /// check that the cutoff allows at least one color
    pub fn validate(&self) -> Result<(), ColoringSettingsError> {
        if let Some(cutoff) = self.cutoff {
            if cutoff == 0 {
                return Err(ColoringSettingsError::BadFieldValue("cutoff"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coloring_settings_default() {
        let settings = ColoringSettings::default();
        assert_eq!(settings.strategy, ColoringStrategy::Unidirectional);
        assert_eq!(settings.ordering, ColoringOrdering::LargestFirst);
        assert_eq!(settings.cutoff, usize::MAX);
    }

    #[test]
    fn test_coloring_settings_builder() {
        let settings = ColoringSettingsBuilder::default()
            .strategy(ColoringStrategy::Star)
            .ordering(ColoringOrdering::Natural)
            .cutoff(4)
            .build()
            .unwrap();
        assert_eq!(settings.strategy, ColoringStrategy::Star);
        assert_eq!(settings.ordering, ColoringOrdering::Natural);
        assert_eq!(settings.cutoff, 4);
    }

    #[test]
    fn test_coloring_settings_zero_cutoff() {
        let result = ColoringSettingsBuilder::default().cutoff(0).build();
        assert!(matches!(
            result,
            Err(ColoringSettingsBuilderError::ValidationError(_))
        ));
    }
}
