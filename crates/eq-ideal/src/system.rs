//! Chemical system definitions for the ideal engine.

use eq_engine::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Phase a species belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The aqueous solvent (water). Exactly one per system.
    Solvent,
    /// A solute in the aqueous phase.
    Aqueous,
    /// A member of the ideal gas phase.
    Gas,
}

/// One species of a chemical system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub name: String,
    pub phase: Phase,
    /// Element symbol -> stoichiometric coefficient.
    pub elements: BTreeMap<String, f64>,
}

impl SpeciesDef {
    pub fn new(name: impl Into<String>, phase: Phase, elements: &[(&str, f64)]) -> Self {
        Self {
            name: name.into(),
            phase,
            elements: elements
                .iter()
                .map(|(symbol, coef)| (symbol.to_string(), *coef))
                .collect(),
        }
    }
}

/// Serializable chemical system definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemDef {
    #[serde(default)]
    pub species: Vec<SpeciesDef>,
}

#[derive(Debug)]
struct SystemData {
    species: Vec<SpeciesDef>,
    molar_masses: Vec<f64>,
    solvent: usize,
}

/// Validated chemical system; cheap to clone.
#[derive(Debug, Clone)]
pub struct IdealSystem {
    data: Arc<SystemData>,
}

impl IdealSystem {
    /// Validate a definition.
    ///
    /// Species names must be unique, every element must be known to the
    /// element-mass table, and exactly one species must be the solvent.
    pub fn new(def: SystemDef) -> EngineResult<Self> {
        let mut molar_masses = Vec::with_capacity(def.species.len());
        let mut solvent = None;

        for (i, species) in def.species.iter().enumerate() {
            if species.name.trim().is_empty() {
                return Err(EngineError::InvalidSystem {
                    what: format!("species #{i} has an empty name"),
                });
            }
            if def.species[..i].iter().any(|s| s.name == species.name) {
                return Err(EngineError::InvalidSystem {
                    what: format!("duplicate species {}", species.name),
                });
            }

            let mut mass = 0.0;
            for (symbol, coef) in &species.elements {
                let element_mass =
                    atomic_mass(symbol).ok_or_else(|| EngineError::InvalidSystem {
                        what: format!("unknown element {symbol} in {}", species.name),
                    })?;
                mass += coef * element_mass;
            }
            molar_masses.push(mass);

            if species.phase == Phase::Solvent {
                if solvent.is_some() {
                    return Err(EngineError::InvalidSystem {
                        what: "more than one solvent species".to_string(),
                    });
                }
                solvent = Some(i);
            }
        }

        let solvent = solvent.ok_or_else(|| EngineError::InvalidSystem {
            what: "no solvent species".to_string(),
        })?;

        Ok(Self {
            data: Arc::new(SystemData {
                species: def.species,
                molar_masses,
                solvent,
            }),
        })
    }

    pub fn species(&self) -> &[SpeciesDef] {
        &self.data.species
    }

    pub fn len(&self) -> usize {
        self.data.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.species.is_empty()
    }

    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.data.species.iter().position(|s| s.name == name)
    }

    /// Molar mass of species `index` in g/mol.
    pub fn molar_mass(&self, index: usize) -> f64 {
        self.data.molar_masses[index]
    }

    pub fn solvent(&self) -> usize {
        self.data.solvent
    }

    /// First aqueous solute carrying `element`, with its coefficient.
    pub fn carrier_of(&self, element: &str) -> Option<(usize, f64)> {
        self.data.species.iter().enumerate().find_map(|(i, s)| {
            if s.phase != Phase::Aqueous {
                return None;
            }
            s.elements
                .get(element)
                .filter(|coef| **coef > 0.0)
                .map(|coef| (i, *coef))
        })
    }
}

/// Standard atomic mass in g/mol.
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    let mass = match symbol {
        "H" => 1.008,
        "He" => 4.0026,
        "C" => 12.011,
        "N" => 14.007,
        "O" => 15.999,
        "F" => 18.998,
        "Na" => 22.990,
        "Mg" => 24.305,
        "Al" => 26.982,
        "Si" => 28.085,
        "P" => 30.974,
        "S" => 32.06,
        "Cl" => 35.45,
        "Ar" => 39.948,
        "K" => 39.098,
        "Ca" => 40.078,
        "Mn" => 54.938,
        "Fe" => 55.845,
        "Cu" => 63.546,
        "Zn" => 65.38,
        "Br" => 79.904,
        _ => return None,
    };
    Some(mass)
}
