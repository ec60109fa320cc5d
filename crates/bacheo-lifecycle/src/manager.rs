use async_trait::async_trait;
use bacheo_core::config::{LayeredConfig, ValidityMode};
use bacheo_core::error::{BacheoError, Result};
use bacheo_core::models::{
    parse_curb_token, BacheId, BacheRecord, BacheShape, BacheStatus, CurbSide, EvidencePhase,
    GeoPoint, GeometryEdit, ListFilter, NewBache, ShapeKind,
};
use bacheo_geo::{map_overlay, render_svg, GeoProjector, MapOverlay, SketchOptions};
use bacheo_store::{BacheStore, PendingOperation, QueueProcessor};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Geometry derived from measurement text without touching the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryPreview {
    #[serde(flatten)]
    pub shape: BacheShape,
    pub curb_side: Option<CurbSide>,
    /// Curb sides the resolved shape accepts
    pub curb_options: Vec<CurbSide>,
}

/// Owns every mutation of bache records.
///
/// Each geometry-affecting operation rebuilds the whole [`BacheShape`] from
/// measurement text and validates the curb side against it before anything
/// is written, so a failed operation never leaves a partial record.
pub struct BacheManager<S: ?Sized> {
    store: Arc<S>,
    curb_validity: ValidityMode,
    projector: GeoProjector,
    /// Serializes per-street numbering with the insert that uses it
    create_lock: Mutex<()>,
}

impl<S> BacheManager<S>
where
    S: BacheStore + ?Sized,
{
    /// Create a manager with lenient curb handling and the default map shrink
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            curb_validity: ValidityMode::default(),
            projector: GeoProjector::default(),
            create_lock: Mutex::new(()),
        }
    }

    /// Create a manager from layered configuration
    pub fn from_config(store: Arc<S>, config: &LayeredConfig) -> Result<Self> {
        Ok(Self::new(store)
            .with_curb_validity(config.curb_validity.value)
            .with_projector(GeoProjector::new(config.shrink_factor.value)?))
    }

    pub fn with_curb_validity(mut self, mode: ValidityMode) -> Self {
        self.curb_validity = mode;
        self
    }

    pub fn with_projector(mut self, projector: GeoProjector) -> Self {
        self.projector = projector;
        self
    }

    pub fn curb_validity(&self) -> ValidityMode {
        self.curb_validity
    }

    pub fn projector(&self) -> &GeoProjector {
        &self.projector
    }

    /// Parse and build a shape, resolving the curb side the way an edit would
    pub fn preview(&self, medidas: &str, curb_side: Option<&str>) -> Result<GeometryPreview> {
        let shape = BacheShape::from_text(medidas)?;
        let curb_side = self.resolve_curb(curb_side, shape.forma())?;
        let curb_options = shape.forma().curb_sides();
        Ok(GeometryPreview { shape, curb_side, curb_options })
    }

    /// Register a new bache
    pub async fn create(&self, input: &NewBache) -> Result<BacheRecord> {
        self.create_with_id(BacheId::new(), input).await
    }

    /// Register a new bache under a caller-chosen id.
    ///
    /// Requires at least 3 usable measurements and an anchor. The display
    /// number is one more than the highest number already used on the same
    /// street (case-insensitive), starting at 1.
    pub async fn create_with_id(&self, id: BacheId, input: &NewBache) -> Result<BacheRecord> {
        let shape = BacheShape::from_text(&input.medidas)?;
        let anchor = input.coordenadas.ok_or(BacheoError::MissingAnchor)?.validate()?;
        let curb_side = self.resolve_curb(input.curb_side.as_deref(), shape.forma())?;

        let _guard = self.create_lock.lock().await;

        let street_key = input.street.street_key();
        let no_bache = self.store.max_no_bache(&street_key).await?.unwrap_or(0) + 1;

        let mut record = BacheRecord::new(
            input.street.clone(),
            shape,
            curb_side,
            anchor,
            input.residente_uid.clone(),
            no_bache,
            Utc::now(),
        );
        record.id = id;

        self.store.insert(&record).await?;

        tracing::info!(
            id = %record.id,
            no_bache = record.no_bache,
            calle = %record.street.calle,
            forma = %record.forma(),
            area = record.area(),
            "Registered bache"
        );
        Ok(record)
    }

    /// Re-measure a bache: rebuilds forma, vertices and area together and
    /// re-validates the curb side against the new shape.
    pub async fn edit_geometry(&self, id: BacheId, edit: &GeometryEdit) -> Result<BacheRecord> {
        let mut record = self.get(id).await?;

        let shape = BacheShape::from_text(&edit.medidas)?;
        let curb_side = self.resolve_curb(edit.curb_side.as_deref(), shape.forma())?;
        let previous = record.forma();

        record.apply_geometry(shape, curb_side, Utc::now());
        self.store.update(&record).await?;

        tracing::info!(
            id = %id,
            from = %previous,
            forma = %record.forma(),
            area = record.area(),
            "Edited bache geometry"
        );
        Ok(record)
    }

    /// Move the anchor; the local polygon is unchanged
    pub async fn move_anchor(&self, id: BacheId, coordenadas: GeoPoint) -> Result<BacheRecord> {
        let coordenadas = coordenadas.validate()?;
        let mut record = self.get(id).await?;

        record.move_anchor(coordenadas, Utc::now());
        self.store.update(&record).await?;

        tracing::info!(id = %id, lat = coordenadas.lat, lng = coordenadas.lng, "Moved bache anchor");
        Ok(record)
    }

    /// Advance the repair status; going back is rejected, repeating is a no-op
    pub async fn advance_status(&self, id: BacheId, status: BacheStatus) -> Result<BacheRecord> {
        let mut record = self.get(id).await?;

        if record.advance_status(status, Utc::now())? {
            self.store.update(&record).await?;
            tracing::info!(id = %id, status = %record.status, "Advanced bache status");
        } else {
            tracing::debug!(id = %id, status = %record.status, "Status unchanged");
        }
        Ok(record)
    }

    /// Record the URL of an evidence photo
    pub async fn attach_evidence(
        &self,
        id: BacheId,
        phase: EvidencePhase,
        url: &str,
    ) -> Result<BacheRecord> {
        let mut record = self.get(id).await?;

        record.evidence.attach(phase, url.trim());
        record.updated_at = Utc::now();
        self.store.update(&record).await?;

        tracing::info!(id = %id, phase = ?phase, "Attached evidence");
        Ok(record)
    }

    /// Delete a bache
    pub async fn delete(&self, id: BacheId) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(BacheoError::BacheNotFound { id: id.to_string() });
        }
        tracing::info!(id = %id, "Deleted bache");
        Ok(())
    }

    pub async fn get(&self, id: BacheId) -> Result<BacheRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| BacheoError::BacheNotFound { id: id.to_string() })
    }

    /// Records matching the filter, ordered by `noBache`
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<BacheRecord>> {
        self.store.list(filter).await
    }

    /// GeoJSON overlay and padded bounds for the matching records
    pub async fn overlay(&self, filter: &ListFilter, user: Option<GeoPoint>) -> Result<MapOverlay> {
        let records = self.list(filter).await?;
        Ok(map_overlay(&records, &self.projector, user))
    }

    /// SVG sketch of a stored record
    pub async fn sketch(&self, id: BacheId, options: &SketchOptions) -> Result<String> {
        let record = self.get(id).await?;
        Ok(render_svg(record.shape(), record.curb_side, options))
    }

    /// Validate a curb token against the shape it will be stored with
    fn resolve_curb(&self, token: Option<&str>, forma: ShapeKind) -> Result<Option<CurbSide>> {
        let Some(side) = parse_curb_token(token)? else {
            return Ok(None);
        };

        if side.applies_to(forma) {
            return Ok(Some(side));
        }

        match self.curb_validity {
            ValidityMode::Strict => Err(BacheoError::InapplicableCurbSide {
                side: side.to_string(),
                forma: forma.to_string(),
            }),
            ValidityMode::Lenient => {
                tracing::warn!(side = %side, forma = %forma, "Clearing curb side that does not fit the shape");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<S> QueueProcessor for BacheManager<S>
where
    S: BacheStore + ?Sized,
{
    /// Apply a queued operation. Replaying a create or delete that already
    /// reached the store succeeds, so a lost acknowledgement cannot wedge
    /// the queue.
    async fn apply(&self, operation: &PendingOperation) -> Result<()> {
        match operation {
            PendingOperation::Create { id, bache } => {
                if self.store.get(*id).await?.is_some() {
                    tracing::debug!(id = %id, "Queued create already applied");
                    return Ok(());
                }
                self.create_with_id(*id, bache).await.map(|_| ())
            }
            PendingOperation::EditGeometry { id, edit } => {
                self.edit_geometry(*id, edit).await.map(|_| ())
            }
            PendingOperation::MoveAnchor { id, coordenadas } => {
                self.move_anchor(*id, *coordenadas).await.map(|_| ())
            }
            PendingOperation::AdvanceStatus { id, status } => {
                self.advance_status(*id, *status).await.map(|_| ())
            }
            PendingOperation::Delete { id } => match self.delete(*id).await {
                Err(BacheoError::BacheNotFound { .. }) => Ok(()),
                other => other,
            },
            PendingOperation::AttachEvidence { id, phase, url } => {
                self.attach_evidence(*id, *phase, url).await.map(|_| ())
            }
        }
    }
}
