//! Curb (guarnición) sides and the edge tables that resolve them.
//!
//! The tables are positional: entry `(side, a, b)` names the edge from
//! vertex `a` to vertex `b` in the order the polygon builder emits vertices.
//! Changing the builder's vertex order requires changing these tables too.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BacheoError;
use crate::models::geometry::ShapeKind;

/// Polygon edge adjacent to a street curb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurbSide {
    Base,
    Arriba,
    Derecha,
    Abajo,
    Izquierda,
}

/// Triangle edges: top base, right side, left side.
pub const TRIANGLE_EDGES: [(CurbSide, usize, usize); 3] = [
    (CurbSide::Base, 0, 1),
    (CurbSide::Derecha, 1, 2),
    (CurbSide::Izquierda, 2, 0),
];

/// Trapezoid edges: top, right, bottom, left.
pub const TRAPEZOID_EDGES: [(CurbSide, usize, usize); 4] = [
    (CurbSide::Arriba, 0, 1),
    (CurbSide::Derecha, 1, 2),
    (CurbSide::Abajo, 2, 3),
    (CurbSide::Izquierda, 3, 0),
];

impl ShapeKind {
    /// Edge table for this shape kind
    pub fn edges(&self) -> &'static [(CurbSide, usize, usize)] {
        match self {
            ShapeKind::Triangle => &TRIANGLE_EDGES,
            ShapeKind::Trapezoid => &TRAPEZOID_EDGES,
        }
    }

    /// Curb sides valid for this shape kind, in edge order
    pub fn curb_sides(&self) -> Vec<CurbSide> {
        self.edges().iter().map(|(side, _, _)| *side).collect()
    }
}

impl CurbSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurbSide::Base => "base",
            CurbSide::Arriba => "arriba",
            CurbSide::Derecha => "derecha",
            CurbSide::Abajo => "abajo",
            CurbSide::Izquierda => "izquierda",
        }
    }

    /// Vertex indices of this side's edge, if the side exists on `kind`
    pub fn edge_indices(self, kind: ShapeKind) -> Option<(usize, usize)> {
        kind.edges()
            .iter()
            .find(|(side, _, _)| *side == self)
            .map(|(_, start, end)| (*start, *end))
    }

    pub fn applies_to(self, kind: ShapeKind) -> bool {
        self.edge_indices(kind).is_some()
    }
}

impl std::fmt::Display for CurbSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurbSide {
    type Err = BacheoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(CurbSide::Base),
            "arriba" => Ok(CurbSide::Arriba),
            "derecha" => Ok(CurbSide::Derecha),
            "abajo" => Ok(CurbSide::Abajo),
            "izquierda" => Ok(CurbSide::Izquierda),
            _ => Err(BacheoError::InvalidCurbSide { token: s.to_string() }),
        }
    }
}

/// Parse an optional curb token; blank input means "no curb side".
pub fn parse_curb_token(token: Option<&str>) -> Result<Option<CurbSide>, BacheoError> {
    match token.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) => t.parse().map(Some),
    }
}
