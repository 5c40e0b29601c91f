//! Chemical state of an ideal system.

use crate::props::IdealProps;
use crate::system::IdealSystem;
use eq_core::units::{Pressure, SubstanceQuantity, Temperature, bar, k, substance_quantity_from};
use eq_core::{EqError, ensure_finite};
use eq_engine::{ChemicalState, EngineError, EngineResult};

/// Default temperature of a fresh state [K]
pub const DEFAULT_TEMPERATURE_K: f64 = 298.15;

/// Default pressure of a fresh state [bar]
pub const DEFAULT_PRESSURE_BAR: f64 = 1.0;

/// Species amounts plus temperature and pressure.
#[derive(Debug, Clone)]
pub struct IdealState {
    system: IdealSystem,
    temperature: Temperature,
    pressure: Pressure,
    amounts: Vec<f64>,
}

impl IdealState {
    pub fn new(system: &IdealSystem) -> Self {
        Self {
            system: system.clone(),
            temperature: k(DEFAULT_TEMPERATURE_K),
            pressure: bar(DEFAULT_PRESSURE_BAR),
            amounts: vec![0.0; system.len()],
        }
    }

    pub fn system(&self) -> &IdealSystem {
        &self.system
    }

    /// Amounts in mol, indexed like the system's species.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    pub fn set_temperature(&mut self, t: Temperature) {
        self.temperature = t;
    }

    pub fn set_pressure(&mut self, p: Pressure) {
        self.pressure = p;
    }

    pub(crate) fn set_amounts(&mut self, amounts: Vec<f64>) {
        debug_assert_eq!(amounts.len(), self.amounts.len());
        self.amounts = amounts;
    }

    /// Aqueous and gas properties of this state.
    pub fn props(&self) -> IdealProps<'_> {
        IdealProps::new(&self.system, &self.amounts, self.pressure)
    }
}

impl ChemicalState for IdealState {
    fn add(&mut self, substance: &str, amount: f64, unit: &str) -> EngineResult<()> {
        let index = self
            .system
            .species_index(substance)
            .ok_or_else(|| EngineError::UnknownSpecies {
                name: substance.to_string(),
            })?;
        ensure_finite(amount, "substance amount")?;
        if amount < 0.0 {
            return Err(EqError::OutOfRange {
                what: "substance amount",
                value: amount,
            }
            .into());
        }

        let moles = match substance_quantity_from(amount, unit)? {
            SubstanceQuantity::Amount(n) => n.value,
            // kg / (g/mol) * 1000 = mol
            SubstanceQuantity::Mass(m) => m.value * 1000.0 / self.system.molar_mass(index),
        };
        self.amounts[index] += moles;
        Ok(())
    }

    fn temperature(&self) -> Temperature {
        self.temperature
    }

    fn pressure(&self) -> Pressure {
        self.pressure
    }

    fn amount(&self, species: &str) -> f64 {
        self.system
            .species_index(species)
            .map(|i| self.amounts[i])
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{Phase, SpeciesDef, SystemDef};
    use eq_core::units::in_kelvin;

    fn system() -> IdealSystem {
        IdealSystem::new(SystemDef {
            species: vec![
                SpeciesDef::new("H2O(aq)", Phase::Solvent, &[("H", 2.0), ("O", 1.0)]),
                SpeciesDef::new("Na+", Phase::Aqueous, &[("Na", 1.0)]),
            ],
        })
        .unwrap()
    }

    #[test]
    fn add_by_mass_and_amount() {
        let mut state = IdealState::new(&system());
        state.add("H2O(aq)", 1.0, "kg").unwrap();
        state.add("Na+", 10.0, "mmol").unwrap();
        state.add("Na+", 0.02, "mol").unwrap();

        assert!((state.amount("H2O(aq)") - 1000.0 / 18.015).abs() < 1e-9);
        assert!((state.amount("Na+") - 0.03).abs() < 1e-12);
        assert_eq!(state.amount("Cl-"), 0.0);
        assert!((in_kelvin(state.temperature()) - DEFAULT_TEMPERATURE_K).abs() < 1e-12);
    }

    #[test]
    fn add_rejects_unknown_species_and_unit() {
        let mut state = IdealState::new(&system());
        assert!(matches!(
            state.add("Cl-", 1.0, "mol"),
            Err(EngineError::UnknownSpecies { .. })
        ));
        assert!(matches!(
            state.add("Na+", 1.0, "furlong"),
            Err(EngineError::Quantity(EqError::UnknownUnit { .. }))
        ));
        assert!(state.add("Na+", -1.0, "mol").is_err());
    }

    #[test]
    fn clones_are_independent() {
        let mut a = IdealState::new(&system());
        a.add("Na+", 1.0, "mol").unwrap();
        let mut b = a.clone();
        b.add("Na+", 1.0, "mol").unwrap();
        assert_eq!(a.amount("Na+"), 1.0);
        assert_eq!(b.amount("Na+"), 2.0);
    }
}
