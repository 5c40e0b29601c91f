//! Derived properties of an ideal state.

use crate::system::{IdealSystem, Phase};
use eq_core::units::{Pressure, in_bar};
use eq_engine::AqueousProps;

/// Properties computed from a set of species amounts.
///
/// Borrowed so trial amounts inside the Newton loop need no state copy.
#[derive(Debug, Clone, Copy)]
pub struct IdealProps<'a> {
    system: &'a IdealSystem,
    amounts: &'a [f64],
    pressure: Pressure,
}

impl<'a> IdealProps<'a> {
    pub fn new(system: &'a IdealSystem, amounts: &'a [f64], pressure: Pressure) -> Self {
        Self {
            system,
            amounts,
            pressure,
        }
    }

    /// Mass of solvent [kg]
    pub fn solvent_mass_kg(&self) -> f64 {
        let w = self.system.solvent();
        self.amounts[w] * self.system.molar_mass(w) / 1000.0
    }

    /// Molality of species `index` [mol/kg], zero without solvent.
    pub fn species_molality(&self, index: usize) -> f64 {
        let kg = self.solvent_mass_kg();
        if kg <= 0.0 {
            return 0.0;
        }
        self.amounts[index] / kg
    }

    /// -log10 of the H+ molality, if the system has H+ and solvent.
    pub fn ph(&self) -> Option<f64> {
        let h = self.system.species_index("H+")?;
        let m = self.species_molality(h);
        (m > 0.0).then(|| -m.log10())
    }

    /// Mole fraction of gas species `index` within the gas phase.
    pub fn gas_mole_fraction(&self, index: usize) -> f64 {
        let total: f64 = self
            .system
            .species()
            .iter()
            .zip(self.amounts)
            .filter(|(s, _)| s.phase == Phase::Gas)
            .map(|(_, n)| *n)
            .sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.amounts[index] / total
    }

    /// Ideal fugacity of gas species `index` [bar]
    pub fn fugacity_bar(&self, index: usize) -> f64 {
        self.gas_mole_fraction(index) * in_bar(self.pressure)
    }
}

impl AqueousProps for IdealProps<'_> {
    fn element_molality(&self, element: &str) -> f64 {
        let kg = self.solvent_mass_kg();
        if kg <= 0.0 {
            return 0.0;
        }
        let moles: f64 = self
            .system
            .species()
            .iter()
            .zip(self.amounts)
            .filter(|(s, _)| s.phase == Phase::Aqueous)
            .filter_map(|(s, n)| s.elements.get(element).map(|coef| coef * n))
            .sum();
        moles / kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{SpeciesDef, SystemDef};
    use eq_core::units::bar;

    fn system() -> IdealSystem {
        IdealSystem::new(SystemDef {
            species: vec![
                SpeciesDef::new("H2O(aq)", Phase::Solvent, &[("H", 2.0), ("O", 1.0)]),
                SpeciesDef::new("H+", Phase::Aqueous, &[("H", 1.0)]),
                SpeciesDef::new("SO4-2", Phase::Aqueous, &[("S", 1.0), ("O", 4.0)]),
                SpeciesDef::new("H2S(g)", Phase::Gas, &[("H", 2.0), ("S", 1.0)]),
                SpeciesDef::new("N2(g)", Phase::Gas, &[("N", 2.0)]),
            ],
        })
        .unwrap()
    }

    #[test]
    fn element_molality_counts_aqueous_species_only() {
        let system = system();
        let water_mol = 1000.0 / system.molar_mass(0);
        let amounts = [water_mol, 1e-7, 0.02, 5.0, 5.0];
        let props = IdealProps::new(&system, &amounts, bar(1.0));

        assert!((props.solvent_mass_kg() - 1.0).abs() < 1e-12);
        assert!((props.element_molality("S") - 0.02).abs() < 1e-12);
        assert_eq!(props.element_molality("Cl"), 0.0);
        assert!((props.ph().unwrap() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn ideal_gas_fugacity() {
        let system = system();
        let amounts = [55.0, 0.0, 0.0, 1.0, 3.0];
        let props = IdealProps::new(&system, &amounts, bar(2.0));
        assert!((props.gas_mole_fraction(3) - 0.25).abs() < 1e-12);
        assert!((props.fugacity_bar(3) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn no_solvent_means_zero_molality() {
        let system = system();
        let amounts = [0.0, 1.0, 1.0, 0.0, 0.0];
        let props = IdealProps::new(&system, &amounts, bar(1.0));
        assert_eq!(props.element_molality("S"), 0.0);
        assert!(props.ph().is_none());
    }
}
