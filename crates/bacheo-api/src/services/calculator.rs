use bacheo_geo::{AsphaltEstimate, AsphaltInput, AsphaltTotals, LengthUnit};

use crate::dto::{CalculatorRequest, CalculatorResponse, CalculatorRow};
use crate::error::ApiError;

/// Service for the asphalt calculator
pub struct CalculatorService;

impl CalculatorService {
    /// Estimate every row and sum them; one bad row rejects the request
    pub fn estimate(
        request: &CalculatorRequest,
        default_density: f64,
    ) -> Result<CalculatorResponse, ApiError> {
        if request.rows.is_empty() {
            return Err(ApiError::bad_request("At least one calculator row is required"));
        }

        let rows = request
            .rows
            .iter()
            .map(|row| Self::to_input(row, default_density).and_then(|input| input.estimate()))
            .collect::<Result<Vec<AsphaltEstimate>, _>>()?;

        let totals: AsphaltTotals = rows.iter().collect();
        Ok(CalculatorResponse { rows, totals })
    }

    fn to_input(row: &CalculatorRow, default_density: f64) -> bacheo_core::Result<AsphaltInput> {
        let unidad = match row.unidad.as_deref() {
            Some(token) => token.parse::<LengthUnit>()?,
            None => LengthUnit::default(),
        };

        Ok(AsphaltInput {
            largo: row.largo,
            ancho: row.ancho,
            esp_asfalto: row.esp_asfalto,
            esp_escombro: row.esp_escombro,
            unidad,
            densidad: row.densidad.unwrap_or(default_density),
        })
    }
}
