//! The bache (pothole) record aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{BacheoError, Result};
use crate::geometry::{build_polygon, parse_measurements};
use crate::models::curb::CurbSide;
use crate::models::geometry::{GeoPoint, Polygon, ShapeKind, Vertex};
use crate::models::status::BacheStatus;

/// Unique identifier for a bache record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BacheId(pub Uuid);

impl BacheId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BacheId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BacheId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BacheId {
    type Err = BacheoError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(BacheId)
            .map_err(|_| BacheoError::BacheNotFound { id: s.to_string() })
    }
}

/// Street metadata, usually pre-filled by reverse geocoding
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetMeta {
    #[serde(default)]
    pub calle: String,
    #[serde(default)]
    pub entre_calles: Vec<String>,
}

impl StreetMeta {
    pub fn new(calle: impl Into<String>, entre_calles: Vec<String>) -> Self {
        Self { calle: calle.into(), entre_calles }
    }

    /// Street key used for per-street numbering
    pub fn street_key(&self) -> String {
        self.calle.trim().to_lowercase()
    }
}

/// Repair phase a photo belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidencePhase {
    Before,
    During,
    After,
}

impl FromStr for EvidencePhase {
    type Err = BacheoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "before" | "antes" => Ok(EvidencePhase::Before),
            "during" | "proceso" => Ok(EvidencePhase::During),
            "after" | "final" => Ok(EvidencePhase::After),
            _ => Err(BacheoError::UnknownEvidencePhase { token: s.to_string() }),
        }
    }
}

/// Photo evidence URLs per repair phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evidence {
    pub before: Option<String>,
    #[serde(default)]
    pub during: Vec<String>,
    pub after: Option<String>,
}

impl Evidence {
    /// Before/after photos replace the previous one; during photos accumulate
    pub fn attach(&mut self, phase: EvidencePhase, url: impl Into<String>) {
        let url = url.into();
        match phase {
            EvidencePhase::Before => self.before = Some(url),
            EvidencePhase::During => self.during.push(url),
            EvidencePhase::After => self.after = Some(url),
        }
    }
}

/// Measurements together with the polygon derived from them.
///
/// Every constructor goes through the builder, so `forma`, `vertices` and
/// `area` can never drift from `medidas`. Deserializing rebuilds the polygon
/// from the stored measurements and ignores the stored geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredShape")]
pub struct BacheShape {
    medidas: Vec<f64>,
    #[serde(flatten)]
    polygon: Polygon,
}

impl BacheShape {
    /// Parse measurement text and derive the polygon
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_measurements(parse_measurements(text))
    }

    fn from_measurements(medidas: Vec<f64>) -> Result<Self> {
        let polygon = build_polygon(&medidas)
            .ok_or(BacheoError::InsufficientMeasurements { found: medidas.len() })?;
        Ok(Self { medidas, polygon })
    }

    /// All parsed measurements, including any beyond the four a trapezoid uses
    pub fn medidas(&self) -> &[f64] {
        &self.medidas
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn forma(&self) -> ShapeKind {
        self.polygon.forma()
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.polygon.vertices()
    }

    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    /// Measurements as one line per value, the format the capture form uses
    pub fn medidas_text(&self) -> String {
        self.medidas.iter().map(|m| m.to_string()).collect::<Vec<_>>().join("\n")
    }
}

/// Persisted fields a shape is rebuilt from
#[derive(Deserialize)]
struct StoredShape {
    medidas: Vec<f64>,
}

impl TryFrom<StoredShape> for BacheShape {
    type Error = BacheoError;

    fn try_from(stored: StoredShape) -> Result<Self> {
        let mut medidas = stored.medidas;
        medidas.retain(|m| m.is_finite() && *m > 0.0);
        Self::from_measurements(medidas)
    }
}

/// A registered pothole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacheRecord {
    pub id: BacheId,
    #[serde(flatten)]
    pub street: StreetMeta,
    #[serde(flatten)]
    shape: BacheShape,
    pub curb_side: Option<CurbSide>,
    pub coordenadas: GeoPoint,
    pub residente_uid: Option<String>,
    pub no_bache: u32,
    pub status: BacheStatus,
    #[serde(default)]
    pub evidence: Evidence,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BacheRecord {
    /// Create a freshly registered record
    pub fn new(
        street: StreetMeta,
        shape: BacheShape,
        curb_side: Option<CurbSide>,
        coordenadas: GeoPoint,
        residente_uid: Option<String>,
        no_bache: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BacheId::new(),
            street,
            shape,
            curb_side,
            coordenadas,
            residente_uid,
            no_bache,
            status: BacheStatus::Registrado,
            evidence: Evidence::default(),
            created_at,
            updated_at: created_at,
        }
    }

    pub fn shape(&self) -> &BacheShape {
        &self.shape
    }

    pub fn forma(&self) -> ShapeKind {
        self.shape.forma()
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.shape.vertices()
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    pub fn medidas(&self) -> &[f64] {
        self.shape.medidas()
    }

    /// Replace measurements, polygon and curb side in one step
    pub fn apply_geometry(
        &mut self,
        shape: BacheShape,
        curb_side: Option<CurbSide>,
        at: DateTime<Utc>,
    ) {
        self.shape = shape;
        self.curb_side = curb_side;
        self.updated_at = at;
    }

    /// Move the anchor; local geometry is left untouched
    pub fn move_anchor(&mut self, coordenadas: GeoPoint, at: DateTime<Utc>) {
        self.coordenadas = coordenadas;
        self.updated_at = at;
    }

    /// Advance the status; returns whether it changed
    pub fn advance_status(&mut self, next: BacheStatus, at: DateTime<Utc>) -> Result<bool> {
        let next = self.status.transition_to(next)?;
        if next == self.status {
            return Ok(false);
        }
        self.status = next;
        self.updated_at = at;
        Ok(true)
    }
}
