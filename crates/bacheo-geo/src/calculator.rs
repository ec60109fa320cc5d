//! Asphalt volume and tonnage estimate for a rectangular repair

use bacheo_core::error::{BacheoError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unit the lengths and thicknesses are entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    M,
    Cm,
}

impl LengthUnit {
    /// Factor converting this unit to meters
    pub fn to_meters(&self) -> f64 {
        match self {
            LengthUnit::M => 1.0,
            LengthUnit::Cm => 0.01,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::M => "m",
            LengthUnit::Cm => "cm",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = BacheoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" => Ok(LengthUnit::M),
            "cm" => Ok(LengthUnit::Cm),
            other => Err(BacheoError::InvalidCalculatorInput {
                field: "unidad".to_string(),
                reason: format!("unknown unit '{}', use m or cm", other),
            }),
        }
    }
}

/// Calculator input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsphaltInput {
    pub largo: f64,
    pub ancho: f64,
    pub esp_asfalto: f64,
    pub esp_escombro: f64,
    #[serde(default)]
    pub unidad: LengthUnit,
    /// Compacted density in t/m³
    pub densidad: f64,
}

/// Calculator result, all in meters and tonnes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsphaltEstimate {
    /// m²
    pub area: f64,
    /// Average thickness, m
    pub esp_prom: f64,
    /// m³
    pub volumen: f64,
    pub toneladas: f64,
}

impl AsphaltInput {
    /// Every field must be a finite positive number
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("largo", self.largo),
            ("ancho", self.ancho),
            ("espAsfalto", self.esp_asfalto),
            ("espEscombro", self.esp_escombro),
            ("densidad", self.densidad),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(BacheoError::InvalidCalculatorInput {
                    field: field.to_string(),
                    reason: format!("{} is not a positive number", value),
                });
            }
        }
        Ok(())
    }

    pub fn estimate(&self) -> Result<AsphaltEstimate> {
        self.validate()?;

        let factor = self.unidad.to_meters();
        let area = (self.largo * factor) * (self.ancho * factor);
        let esp_prom = (self.esp_asfalto + self.esp_escombro) / 2.0 * factor;
        let volumen = area * esp_prom;

        Ok(AsphaltEstimate { area, esp_prom, volumen, toneladas: volumen * self.densidad })
    }
}

/// Running totals over several estimates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsphaltTotals {
    pub count: usize,
    pub area: f64,
    pub volumen: f64,
    pub toneladas: f64,
}

impl AsphaltTotals {
    pub fn add(&mut self, estimate: &AsphaltEstimate) {
        self.count += 1;
        self.area += estimate.area;
        self.volumen += estimate.volumen;
        self.toneladas += estimate.toneladas;
    }
}

impl<'a> FromIterator<&'a AsphaltEstimate> for AsphaltTotals {
    fn from_iter<I: IntoIterator<Item = &'a AsphaltEstimate>>(iter: I) -> Self {
        let mut totals = AsphaltTotals::default();
        for estimate in iter {
            totals.add(estimate);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(unidad: LengthUnit) -> AsphaltInput {
        AsphaltInput {
            largo: 2.0,
            ancho: 1.5,
            esp_asfalto: 0.05,
            esp_escombro: 0.15,
            unidad,
            densidad: 2.4,
        }
    }

    #[test]
    fn test_estimate_in_meters() {
        let est = input(LengthUnit::M).estimate().unwrap();
        assert!((est.area - 3.0).abs() < 1e-12);
        assert!((est.esp_prom - 0.1).abs() < 1e-12);
        assert!((est.volumen - 0.3).abs() < 1e-12);
        assert!((est.toneladas - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_in_centimeters() {
        let cm = AsphaltInput {
            largo: 200.0,
            ancho: 150.0,
            esp_asfalto: 5.0,
            esp_escombro: 15.0,
            unidad: LengthUnit::Cm,
            densidad: 2.4,
        };
        let est = cm.estimate().unwrap();
        assert!((est.area - 3.0).abs() < 1e-9);
        assert!((est.toneladas - 0.72).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive() {
        let mut bad = input(LengthUnit::M);
        bad.densidad = 0.0;
        let err = bad.estimate().unwrap_err();
        assert!(matches!(err, BacheoError::InvalidCalculatorInput { ref field, .. } if field == "densidad"));

        bad = input(LengthUnit::M);
        bad.largo = f64::NAN;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_totals() {
        let a = input(LengthUnit::M).estimate().unwrap();
        let b = input(LengthUnit::M).estimate().unwrap();
        let totals: AsphaltTotals = [a, b].iter().collect();
        assert_eq!(totals.count, 2);
        assert!((totals.toneladas - 1.44).abs() < 1e-12);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("CM".parse::<LengthUnit>().unwrap(), LengthUnit::Cm);
        assert!("ft".parse::<LengthUnit>().is_err());
    }
}
