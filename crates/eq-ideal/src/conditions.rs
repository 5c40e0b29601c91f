//! Conditions for one ideal solve.

use crate::specs::IdealSpecs;
use eq_core::units::{Pressure, Temperature, pressure_from, temperature_from};
use eq_core::ensure_finite;
use eq_engine::{EngineError, EngineResult, EquilibriumConditions};

/// Numeric targets for the unknowns of an [`IdealSpecs`].
#[derive(Debug, Clone)]
pub struct IdealConditions {
    input_names: Vec<String>,
    pub(crate) temperature: Option<Temperature>,
    pub(crate) pressure: Option<Pressure>,
    pub(crate) ph: Option<f64>,
    pub(crate) fugacities: Vec<(String, Pressure)>,
    pub(crate) inputs: Vec<Option<f64>>,
}

impl IdealConditions {
    pub fn new(specs: &IdealSpecs) -> Self {
        Self {
            input_names: specs.inputs.clone(),
            temperature: None,
            pressure: None,
            ph: None,
            fugacities: Vec::new(),
            inputs: vec![None; specs.inputs.len()],
        }
    }

    pub fn fugacity_of(&self, species: &str) -> Option<Pressure> {
        self.fugacities
            .iter()
            .find(|(s, _)| s == species)
            .map(|(_, f)| *f)
    }

    pub fn input(&self, name: &str) -> Option<f64> {
        let index = self.input_names.iter().position(|n| n == name)?;
        self.inputs[index]
    }
}

impl EquilibriumConditions for IdealConditions {
    fn temperature(&mut self, value: f64, unit: &str) -> EngineResult<()> {
        self.temperature = Some(temperature_from(ensure_finite(value, "temperature")?, unit)?);
        Ok(())
    }

    fn pressure(&mut self, value: f64, unit: &str) -> EngineResult<()> {
        self.pressure = Some(pressure_from(ensure_finite(value, "pressure")?, unit)?);
        Ok(())
    }

    fn fugacity(&mut self, species: &str, value: f64, unit: &str) -> EngineResult<()> {
        let f = pressure_from(ensure_finite(value, "fugacity")?, unit)?;
        match self.fugacities.iter_mut().find(|(s, _)| s == species) {
            Some(entry) => entry.1 = f,
            None => self.fugacities.push((species.to_string(), f)),
        }
        Ok(())
    }

    fn ph(&mut self, value: f64) -> EngineResult<()> {
        self.ph = Some(ensure_finite(value, "pH")?);
        Ok(())
    }

    fn set(&mut self, name: &str, value: f64) -> EngineResult<()> {
        let index = self
            .input_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| EngineError::UnknownInput {
                name: name.to_string(),
            })?;
        self.inputs[index] = Some(ensure_finite(value, "input")?);
        Ok(())
    }
}
