// eq-core/src/units.rs

use crate::{EqError, EqResult};
use uom::si::f64::{
    AmountOfSubstance as UomAmountOfSubstance, Mass as UomMass, Molality as UomMolality,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Amount = UomAmountOfSubstance;
pub type Mass = UomMass;
pub type Molality = UomMolality;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn molal(v: f64) -> Molality {
    use uom::si::molality::mole_per_kilogram;
    Molality::new::<mole_per_kilogram>(v)
}

/// Value of a temperature in kelvin.
#[inline]
pub fn in_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Value of a pressure in bar.
#[inline]
pub fn in_bar(p: Pressure) -> f64 {
    use uom::si::pressure::bar;
    p.get::<bar>()
}

/// Value of a molality in mol/kg.
#[inline]
pub fn in_molal(m: Molality) -> f64 {
    use uom::si::molality::mole_per_kilogram;
    m.get::<mole_per_kilogram>()
}

/// Build a temperature from a value and a unit tag.
///
/// An empty tag means kelvin.
pub fn temperature_from(value: f64, unit: &str) -> EqResult<Temperature> {
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};

    let t = match unit.trim().to_lowercase().as_str() {
        "" | "k" | "kelvin" => Temperature::new::<kelvin>(value),
        "c" | "°c" | "degc" | "celsius" => Temperature::new::<degree_celsius>(value),
        "f" | "°f" | "degf" | "fahrenheit" => Temperature::new::<degree_fahrenheit>(value),
        _ => {
            return Err(EqError::UnknownUnit {
                unit: unit.to_string(),
                quantity: "temperature",
            });
        }
    };

    if in_kelvin(t) <= 0.0 {
        return Err(EqError::OutOfRange {
            what: "absolute temperature",
            value: in_kelvin(t),
        });
    }
    Ok(t)
}

/// Build an absolute pressure from a value and a unit tag.
///
/// An empty tag means pascal.
pub fn pressure_from(value: f64, unit: &str) -> EqResult<Pressure> {
    use uom::si::pressure::{atmosphere, bar, kilopascal, megapascal, pascal, pound_force_per_square_inch};

    let p = match unit.trim().to_lowercase().as_str() {
        "" | "pa" | "pascal" => Pressure::new::<pascal>(value),
        "kpa" => Pressure::new::<kilopascal>(value),
        "mpa" => Pressure::new::<megapascal>(value),
        "bar" => Pressure::new::<bar>(value),
        "atm" => Pressure::new::<atmosphere>(value),
        "psia" | "psi" => Pressure::new::<pound_force_per_square_inch>(value),
        _ => {
            return Err(EqError::UnknownUnit {
                unit: unit.to_string(),
                quantity: "pressure",
            });
        }
    };

    if p.value <= 0.0 {
        return Err(EqError::OutOfRange {
            what: "absolute pressure",
            value: p.value,
        });
    }
    Ok(p)
}

/// Scale factor from a molality unit tag to mol/kg.
///
/// An empty tag means mol/kg.
pub fn molality_scale(unit: &str) -> EqResult<f64> {
    match unit.trim().to_lowercase().as_str() {
        "" | "molal" | "mol/kg" => Ok(1.0),
        "mmolal" | "mmol/kg" => Ok(1e-3),
        "umolal" | "umol/kg" | "µmol/kg" => Ok(1e-6),
        _ => Err(EqError::UnknownUnit {
            unit: unit.to_string(),
            quantity: "molality",
        }),
    }
}

/// Build a molality from a value and a unit tag.
pub fn molality_from(value: f64, unit: &str) -> EqResult<Molality> {
    Ok(molal(value * molality_scale(unit)?))
}

/// Quantity of substance given either as an amount or as a mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubstanceQuantity {
    Amount(Amount),
    Mass(Mass),
}

/// Parse an amount-of-substance or mass unit tag.
///
/// An empty tag means mol.
pub fn substance_quantity_from(value: f64, unit: &str) -> EqResult<SubstanceQuantity> {
    use uom::si::amount_of_substance::{micromole, millimole, mole};
    use uom::si::mass::{gram, kilogram, milligram};

    let q = match unit.trim().to_lowercase().as_str() {
        "" | "mol" => SubstanceQuantity::Amount(Amount::new::<mole>(value)),
        "mmol" => SubstanceQuantity::Amount(Amount::new::<millimole>(value)),
        "umol" | "µmol" => SubstanceQuantity::Amount(Amount::new::<micromole>(value)),
        "kg" => SubstanceQuantity::Mass(Mass::new::<kilogram>(value)),
        "g" => SubstanceQuantity::Mass(Mass::new::<gram>(value)),
        "mg" => SubstanceQuantity::Mass(Mass::new::<milligram>(value)),
        _ => {
            return Err(EqError::UnknownUnit {
                unit: unit.to_string(),
                quantity: "amount of substance",
            });
        }
    };
    Ok(q)
}
