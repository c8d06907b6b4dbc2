//! Profile and threshold configuration loader.
//!
//! Loads anthropometric profiles and classifier thresholds from YAML files,
//! allowing the reference data to be adjusted without recompiling. The
//! built-in table stays the default; a loaded store overrides it wholesale.
//!
//! ## Directory Structure
//!
//! ```text
//! profiles/
//! ├── age_1.yaml
//! ├── age_2.yaml
//! ├── ...
//! ├── age_5.yaml
//! └── thresholds.yaml
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{AgeProfile, RiskThresholds};

/// Error type for profile loading operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("profile not found: {0}")]
    NotFound(String),

    #[error("invalid profile data: {0}")]
    Invalid(String),
}

/// Reject profiles that would poison the physics downstream.
pub(crate) fn validate_profile(profile: &AgeProfile) -> Result<(), ProfileError> {
    if !(1..=5).contains(&profile.age_class) {
        return Err(ProfileError::Invalid(format!(
            "age class must be 1-5, got {}",
            profile.age_class
        )));
    }
    if profile.neck_circumference_mm <= 0.0 || profile.neck_height_mm <= 0.0 {
        return Err(ProfileError::Invalid(format!(
            "neck dimensions must be positive for age class {}",
            profile.age_class
        )));
    }
    if profile.head_mass_kg <= 0.0 {
        return Err(ProfileError::Invalid(format!(
            "head mass must be positive for age class {}",
            profile.age_class
        )));
    }
    let (lo, hi) = profile.vertebrae_strength_mpa;
    if lo > hi {
        return Err(ProfileError::Invalid(format!(
            "vertebrae strength range is inverted for age class {}: ({}, {})",
            profile.age_class, lo, hi
        )));
    }
    Ok(())
}

/// Profile loader with configurable base directory.
pub struct ProfileLoader {
    base_path: PathBuf,
}

impl ProfileLoader {
    /// Create a new loader pointed at a directory of `age_*.yaml` files plus
    /// `thresholds.yaml`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load the profile for one age class.
    ///
    /// # Example
    /// ```ignore
    /// let loader = ProfileLoader::new("profiles");
    /// let toddler = loader.load_profile(1)?;
    /// ```
    pub fn load_profile(&self, age_class: u8) -> Result<AgeProfile, ProfileError> {
        let path = self.base_path.join(format!("age_{}.yaml", age_class));
        if !path.exists() {
            return Err(ProfileError::NotFound(format!("age_{}", age_class)));
        }
        let contents = fs::read_to_string(&path)?;
        let profile: AgeProfile = serde_yaml::from_str(&contents)?;
        if profile.age_class != age_class {
            return Err(ProfileError::Invalid(format!(
                "file age_{}.yaml declares age class {}",
                age_class, profile.age_class
            )));
        }
        validate_profile(&profile)?;
        Ok(profile)
    }

    /// Load the classifier thresholds.
    pub fn load_thresholds(&self) -> Result<RiskThresholds, ProfileError> {
        let path = self.base_path.join("thresholds.yaml");
        if !path.exists() {
            return Err(ProfileError::NotFound("thresholds".to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let thresholds: RiskThresholds = serde_yaml::from_str(&contents)?;
        Ok(thresholds)
    }

    /// List available age classes, sorted.
    pub fn list_age_classes(&self) -> Result<Vec<u8>, ProfileError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut classes = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_prefix("age_").and_then(|s| s.strip_suffix(".yaml")) {
                if let Ok(age_class) = stem.parse::<u8>() {
                    classes.push(age_class);
                }
            }
        }
        classes.sort_unstable();
        Ok(classes)
    }
}

/// Complete reference data set: one profile per age class plus thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStore {
    profiles: BTreeMap<u8, AgeProfile>,
    thresholds: RiskThresholds,
}

impl ProfileStore {
    /// The built-in reference table.
    pub fn builtin() -> Self {
        let profiles = (1..=5u8)
            .map(|age_class| (age_class, AgeProfile::builtin(age_class).unwrap()))
            .collect();
        Self {
            profiles,
            thresholds: RiskThresholds::default(),
        }
    }

    /// Load every age class a loader's directory offers, plus thresholds.
    ///
    /// Fails unless all five classes are present: partial tables would break
    /// the one-profile-per-class invariant.
    pub fn from_loader(loader: &ProfileLoader) -> Result<Self, ProfileError> {
        let mut profiles = BTreeMap::new();
        for age_class in 1..=5u8 {
            profiles.insert(age_class, loader.load_profile(age_class)?);
        }
        let thresholds = loader.load_thresholds()?;
        Ok(Self {
            profiles,
            thresholds,
        })
    }

    /// Profile for an age class, or `None` outside the table.
    pub fn profile(&self, age_class: u8) -> Option<&AgeProfile> {
        self.profiles.get(&age_class)
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Tests
// =============================================================================
