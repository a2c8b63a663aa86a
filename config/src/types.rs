//! Radix factorization presets for the Monarch transform.

use serde::{Deserialize, Serialize};

/// Supported radix factorizations of the transform length.
///
/// Each preset names the ordered list of radix stages the decomposition
/// engine runs. The transform length is the product of the stages; other
/// lengths are a configuration error, not a runtime case.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Factorization {
    /// Two radix-16 stages, N = 256.
    #[default]
    #[serde(rename = "16x16")]
    N256,
    /// Three radix-16 stages, N = 4096.
    #[serde(rename = "16x16x16")]
    N4096,
    /// One radix-16 stage and two radix-32 stages, N = 16384.
    #[serde(rename = "16x32x32")]
    N16384,
}

impl Factorization {
    /// Ordered radix stages, outermost first.
    #[must_use]
    pub fn radices(self) -> &'static [usize] {
        match self {
            Self::N256 => &[16, 16],
            Self::N4096 => &[16, 16, 16],
            Self::N16384 => &[16, 32, 32],
        }
    }

    /// Transform length N (product of the radix stages).
    #[must_use]
    pub fn transform_size(self) -> usize {
        self.radices().iter().product()
    }

    /// Largest radix in the factorization, which bounds the dense
    /// matrix-multiply size of any stage.
    #[must_use]
    pub fn max_radix(self) -> usize {
        *self.radices().iter().max().unwrap_or(&1)
    }

    /// Look up the preset for a transform length, if one exists.
    #[must_use]
    pub fn for_transform_size(n: usize) -> Option<Self> {
        match n {
            256 => Some(Self::N256),
            4096 => Some(Self::N4096),
            16384 => Some(Self::N16384),
            _ => None,
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::N256, Self::N4096, Self::N16384]
    }
}

impl std::fmt::Display for Factorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::N256 => write!(f, "16x16"),
            Self::N4096 => write!(f, "16x16x16"),
            Self::N16384 => write!(f, "16x32x32"),
        }
    }
}

impl std::str::FromStr for Factorization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "16x16" | "256" => Ok(Self::N256),
            "16x16x16" | "4096" => Ok(Self::N4096),
            "16x32x32" | "16384" => Ok(Self::N16384),
            _ => Err(format!(
                "unknown factorization '{s}', expected one of: 16x16, 16x16x16, 16x32x32 \
                 (or the lengths 256, 4096, 16384)"
            )),
        }
    }
}
