//! Object descriptors and the material-category enums they're built from.

#[cfg(test)]
mod tests;

/// Broad impact-material category, independent of object size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactMaterialCategory {
    Ceramic,
    Glass,
    Metal,
    WoodHard,
    WoodMedium,
    WoodSoft,
    Cardboard,
    Paper,
    PlasticHard,
    PlasticSoftFoam,
    Rubber,
    Fabric,
    Leather,
    Stone,
}

/// Bounding-box-extent-sum thresholds (meters) used to bucket an object's
/// size into one of six buckets.
const SIZE_THRESHOLDS_M: [f64; 5] = [0.1, 0.2, 0.5, 1.0, 3.0];

/// An impact material category paired with a size bucket in `0..=5`.
///
/// Every object descriptor carries one of these, derived either directly
/// or via [`ImpactMaterial::from_bbox_extent_sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImpactMaterial {
    pub category: ImpactMaterialCategory,
    pub size_bucket: u8,
}

impl ImpactMaterial {
    /// Builds a sized impact material from an explicit bucket.
    ///
    /// # Panics
    ///
    /// Panics if `size_bucket > 5`; bucket assignment is otherwise the
    /// caller's responsibility (see [`Self::from_bbox_extent_sum`] for the
    /// standard derivation).
    #[must_use]
    pub fn new(category: ImpactMaterialCategory, size_bucket: u8) -> Self {
        assert!(size_bucket <= 5, "size bucket must be in 0..=5");
        Self {
            category,
            size_bucket,
        }
    }

    /// Derives the size bucket from the sum of an object's bounding-box
    /// extents, using the threshold table `{0.1, 0.2, 0.5, 1.0, 3.0}` m.
    #[must_use]
    pub fn from_bbox_extent_sum(category: ImpactMaterialCategory, extent_sum: f64) -> Self {
        let size_bucket = SIZE_THRESHOLDS_M
            .iter()
            .position(|&t| extent_sum < t)
            .unwrap_or(SIZE_THRESHOLDS_M.len()) as u8;
        Self {
            category,
            size_bucket,
        }
    }
}

/// Continuous-scrape surface materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrapeMaterial {
    Plywood,
    Ceramic,
    Pvc,
    RoughWood,
    Acrylic,
    SandedAcrylic,
    Vinyl,
    PoplarWood,
    BassWood,
    Polycarbonate,
    Polyethylene,
    Sandpaper,
}

/// A colliding body's static and per-tick-updated properties.
///
/// The multiplexer never mutates a descriptor; the host engine is
/// responsible for updating `speed`/`angular_speed` each tick before
/// constructing new [`crate::collision::CollisionEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDescriptor {
    pub id: u32,
    pub impact_material: ImpactMaterial,
    pub scrape_material: Option<ScrapeMaterial>,
    pub amp: f64,
    pub resonance: f64,
    pub mass: f64,
    pub speed: f64,
    pub angular_speed: f64,
}

impl ObjectDescriptor {
    #[must_use]
    pub fn new(
        id: u32,
        impact_material: ImpactMaterial,
        amp: f64,
        resonance: f64,
        mass: f64,
        scrape_material: Option<ScrapeMaterial>,
    ) -> Self {
        Self {
            id,
            impact_material,
            scrape_material,
            amp,
            resonance,
            mass,
            speed: 0.0,
            angular_speed: 0.0,
        }
    }
}
