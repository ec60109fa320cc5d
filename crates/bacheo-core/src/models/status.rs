//! Repair status state machine

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BacheoError;

/// Repair status. Transitions only move forward through [`BacheStatus::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BacheStatus {
    #[default]
    Registrado,
    Iniciado,
    EnProceso,
    Terminado,
}

impl BacheStatus {
    pub const ALL: [BacheStatus; 4] = [
        BacheStatus::Registrado,
        BacheStatus::Iniciado,
        BacheStatus::EnProceso,
        BacheStatus::Terminado,
    ];

    /// Position in the lifecycle
    pub fn index(&self) -> usize {
        match self {
            BacheStatus::Registrado => 0,
            BacheStatus::Iniciado => 1,
            BacheStatus::EnProceso => 2,
            BacheStatus::Terminado => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BacheStatus::Registrado => "registrado",
            BacheStatus::Iniciado => "iniciado",
            BacheStatus::EnProceso => "en-proceso",
            BacheStatus::Terminado => "terminado",
        }
    }

    /// Whether moving to `next` keeps the lifecycle monotonic
    pub fn can_transition_to(&self, next: BacheStatus) -> bool {
        next.index() >= self.index()
    }

    /// Check a transition, naming both ends on failure
    pub fn transition_to(self, next: BacheStatus) -> Result<BacheStatus, BacheoError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(BacheoError::StatusRegression {
                current: self.to_string(),
                requested: next.to_string(),
            })
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BacheStatus::Terminado)
    }
}

impl std::fmt::Display for BacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BacheStatus {
    type Err = BacheoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "registrado" => Ok(BacheStatus::Registrado),
            "iniciado" => Ok(BacheStatus::Iniciado),
            "en-proceso" | "en_proceso" | "en proceso" => Ok(BacheStatus::EnProceso),
            "terminado" => Ok(BacheStatus::Terminado),
            _ => Err(BacheoError::UnknownStatus { token: s.to_string() }),
        }
    }
}
