//! Requests accepted by the record lifecycle manager

use serde::{Deserialize, Serialize};

use crate::models::geometry::GeoPoint;
use crate::models::record::{BacheRecord, StreetMeta};

/// Input for registering a new bache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBache {
    /// Line-separated edge measurements in meters
    pub medidas: String,
    pub coordenadas: Option<GeoPoint>,
    #[serde(flatten)]
    pub street: StreetMeta,
    #[serde(default)]
    pub curb_side: Option<String>,
    #[serde(default)]
    pub residente_uid: Option<String>,
}

/// Input for re-measuring an existing bache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryEdit {
    pub medidas: String,
    #[serde(default)]
    pub curb_side: Option<String>,
}

/// Listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    pub residente_uid: Option<String>,
}

impl ListFilter {
    pub fn by_residente(uid: impl Into<String>) -> Self {
        Self { residente_uid: Some(uid.into()) }
    }

    pub fn matches(&self, record: &BacheRecord) -> bool {
        match &self.residente_uid {
            Some(uid) => record.residente_uid.as_deref() == Some(uid.as_str()),
            None => true,
        }
    }
}
