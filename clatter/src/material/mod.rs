//! The material catalog: decoded modal/surface records, loaded once and
//! looked up by enum value for the lifetime of the process.


use std::sync::{Arc, Mutex};

use fxhash::FxHashMap;

use crate::config::SCRAPE_SURFACE_PITCH_M;
use crate::object::{ImpactMaterial, ScrapeMaterial};

/// Error decoding a binary material record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialError {
    /// The byte slice was too short, or its declared lengths overran it.
    MalformedRecord,
}

impl std::fmt::Display for MaterialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialError::MalformedRecord => write!(f, "malformed material record"),
        }
    }
}

impl std::error::Error for MaterialError {}

fn read_i32_le(bytes: &[u8], offset: usize) -> Result<i32, MaterialError> {
    let slice = bytes
        .get(offset..offset + 4)
        .ok_or(MaterialError::MalformedRecord)?;
    Ok(i32::from_le_bytes(slice.try_into().unwrap()))
}

fn read_f64_array(bytes: &[u8], offset: usize, len: usize) -> Result<(Vec<f64>, usize), MaterialError> {
    let byte_len = len * 8;
    let slice = bytes
        .get(offset..offset + byte_len)
        .ok_or(MaterialError::MalformedRecord)?;
    let values = slice
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
        .collect();
    Ok((values, offset + byte_len))
}

/// Modal parameters for an impact material: center frequencies (Hz),
/// onset powers (dB), and RT60 decay times (s) — three same-length arrays
///.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactMaterialData {
    pub cf: Vec<f64>,
    pub op: Vec<f64>,
    pub rt: Vec<f64>,
}

impl ImpactMaterialData {
    /// Decodes `[i32 cf_len][i32 op_len][i32 rt_len][f64 x cf_len][f64 x op_len][f64 x rt_len]`
    ///.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MaterialError> {
        let cf_len = read_i32_le(bytes, 0)?;
        let op_len = read_i32_le(bytes, 4)?;
        let rt_len = read_i32_le(bytes, 8)?;
        if cf_len < 0 || op_len < 0 || rt_len < 0 {
            return Err(MaterialError::MalformedRecord);
        }
        let (cf, offset) = read_f64_array(bytes, 12, cf_len as usize)?;
        let (op, offset) = read_f64_array(bytes, offset, op_len as usize)?;
        let (rt, _offset) = read_f64_array(bytes, offset, rt_len as usize)?;
        Ok(Self { cf, op, rt })
    }
}

/// Surface-profile derivatives for a scrape material, plus the per-material
/// roughness gain.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeMaterialData {
    pub dsdx: Vec<f64>,
    pub d2sdx2: Vec<f64>,
    pub roughness_ratio: f64,
}

impl ScrapeMaterialData {
    /// Derives `dsdx` (length `surface.len() - 1`) and `d2sdx2` (length
    /// `dsdx.len() - 1`) from a raw surface-height profile, using
    /// [`SCRAPE_SURFACE_PITCH_M`] as the spatial step.
    #[must_use]
    pub fn from_surface(surface: &[f64], roughness_ratio: f64) -> Self {
        let dsdx: Vec<f64> = surface
            .windows(2)
            .map(|w| (w[1] - w[0]) / SCRAPE_SURFACE_PITCH_M)
            .collect();
        let d2sdx2: Vec<f64> = dsdx
            .windows(2)
            .map(|w| (w[1] - w[0]) / SCRAPE_SURFACE_PITCH_M)
            .collect();
        Self {
            dsdx,
            d2sdx2,
            roughness_ratio,
        }
    }

    /// Decodes `[f64 roughness_ratio][f64 x surface_len]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MaterialError> {
        let (ratio, offset) = read_f64_array(bytes, 0, 1)?;
        let surface_byte_len = bytes.len().checked_sub(offset).ok_or(MaterialError::MalformedRecord)?;
        if surface_byte_len % 8 != 0 {
            return Err(MaterialError::MalformedRecord);
        }
        let (surface, _offset) = read_f64_array(bytes, offset, surface_byte_len / 8)?;
        Ok(Self::from_surface(&surface, ratio[0]))
    }
}

/// Process-wide, load-on-demand registry of material records.
///
/// Insertion is idempotent: the first successful load for a given material
/// wins, and later loads of the same key are no-ops. Once inserted, a
/// record is immutable, so concurrent lookups during synthesis never race
/// with a writer.
#[derive(Debug, Default)]
pub struct MaterialCatalog {
    impacts: Mutex<FxHashMap<ImpactMaterial, Arc<ImpactMaterialData>>>,
    scrapes: Mutex<FxHashMap<ScrapeMaterial, Arc<ScrapeMaterialData>>>,
}

impl MaterialCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `data` for `material` unless it's already present.
    pub fn load_impact(&self, material: ImpactMaterial, data: ImpactMaterialData) {
        let mut impacts = self.impacts.lock().unwrap();
        impacts.entry(material).or_insert_with(|| {
            log::debug!("loaded impact material {material:?}");
            Arc::new(data)
        });
    }

    /// Decodes and loads a binary impact record.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError`] if `bytes` is malformed; the catalog is
    /// left unchanged.
    pub fn load_impact_from_bytes(
        &self,
        material: ImpactMaterial,
        bytes: &[u8],
    ) -> Result<(), MaterialError> {
        let data = ImpactMaterialData::from_bytes(bytes)?;
        self.load_impact(material, data);
        Ok(())
    }

    /// Loads `data` for `material` unless it's already present.
    pub fn load_scrape(&self, material: ScrapeMaterial, data: ScrapeMaterialData) {
        let mut scrapes = self.scrapes.lock().unwrap();
        scrapes.entry(material).or_insert_with(|| {
            log::debug!("loaded scrape material {material:?}");
            Arc::new(data)
        });
    }

    /// Decodes and loads a binary scrape record.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError`] if `bytes` is malformed; the catalog is
    /// left unchanged.
    pub fn load_scrape_from_bytes(
        &self,
        material: ScrapeMaterial,
        bytes: &[u8],
    ) -> Result<(), MaterialError> {
        let data = ScrapeMaterialData::from_bytes(bytes)?;
        self.load_scrape(material, data);
        Ok(())
    }

    #[must_use]
    pub fn get_impact(&self, material: ImpactMaterial) -> Option<Arc<ImpactMaterialData>> {
        self.impacts.lock().unwrap().get(&material).cloned()
    }

    #[must_use]
    pub fn get_scrape(&self, material: ScrapeMaterial) -> Option<Arc<ScrapeMaterialData>> {
        self.scrapes.lock().unwrap().get(&material).cloned()
    }
}
