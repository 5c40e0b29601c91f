//! Constraint registration, element molality targets and failure handling.

use eq_core::EqError;
use eq_core::units::in_bar;
use eq_engine::{AqueousProps, ChemicalState, EngineError, EquilibriumSpecs};
use eq_ideal::{IdealEngine, IdealSystem, Phase, SpeciesDef, SystemDef};
use eq_sweep::{
    ConstrainedEquilibration, ConstraintKind, EquilibriumStatus, SweepError, SweepPlan, Values,
};

fn sulfate_system() -> IdealSystem {
    IdealSystem::new(SystemDef {
        species: vec![
            SpeciesDef::new("H2O(aq)", Phase::Solvent, &[("H", 2.0), ("O", 1.0)]),
            SpeciesDef::new("H+", Phase::Aqueous, &[("H", 1.0)]),
            SpeciesDef::new("SO4-2", Phase::Aqueous, &[("S", 1.0), ("O", 4.0)]),
            SpeciesDef::new("O2(g)", Phase::Gas, &[("O", 2.0)]),
            SpeciesDef::new("N2(g)", Phase::Gas, &[("N", 2.0)]),
        ],
    })
    .unwrap()
}

fn sweep(system: &IdealSystem) -> ConstrainedEquilibration<'_, IdealEngine> {
    let mut sweep = ConstrainedEquilibration::new(IdealEngine::default(), system);
    sweep.initialize("H2O(aq)", 1.0, "kg").unwrap();
    sweep
}

#[test]
fn sulfur_molality_is_reached() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep.add_named_constraint("S", 0.01, "").unwrap();

    let results = sweep.equilibrate().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results.statuses()[0], EquilibriumStatus::Success);

    let molality = results.states()[0].props().element_molality("S");
    assert!((molality - 0.01).abs() < 1e-8, "S molality {molality}");
    assert!(results.states()[0].amount("SO4-2") > 0.0);
}

#[test]
fn millimolal_units_are_converted() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep
        .add_constraint(ConstraintKind::element("S"), [1.0, 10.0], "mmol/kg")
        .unwrap();

    let results = sweep.equilibrate().unwrap();
    let molalities: Vec<f64> = results
        .states()
        .iter()
        .map(|s| s.props().element_molality("S"))
        .collect();
    assert!((molalities[0] - 0.001).abs() < 1e-9);
    assert!((molalities[1] - 0.01).abs() < 1e-9);
}

#[test]
fn element_molality_rejects_non_molality_units() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);

    let err = sweep.add_named_constraint("S", 0.01, "K").unwrap_err();
    assert!(matches!(err, SweepError::InvalidUnit { .. }), "{err:?}");
    assert!(sweep.constraints().is_empty());
}

#[test]
fn unknown_name_is_rejected_without_side_effects() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep.add_named_constraint("temperature", 300.0, "K").unwrap();

    for _ in 0..2 {
        let err = sweep.add_named_constraint("Xyz", [1.0, 2.0], "").unwrap_err();
        assert!(
            matches!(&err, SweepError::UnknownConstraint { name } if name == "Xyz"),
            "{err:?}"
        );
    }
    assert_eq!(sweep.constraints().len(), 1);
    assert!(sweep.specs().inputs().is_empty());

    let results = sweep.equilibrate().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results.axes(), ["temperature"]);
}

#[test]
fn duplicate_and_empty_constraints_are_rejected() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep.add_constraint(ConstraintKind::Ph, [5.0, 6.0], "").unwrap();

    let err = sweep.add_named_constraint("pH", 7.0, "").unwrap_err();
    assert!(matches!(err, SweepError::DuplicateConstraint { .. }));

    let err = sweep
        .add_constraint(ConstraintKind::Temperature, Values::from(Vec::new()), "K")
        .unwrap_err();
    assert!(matches!(err, SweepError::EmptyValues { .. }));

    let err = sweep
        .add_constraint(ConstraintKind::Pressure, [1.0, f64::NAN], "bar")
        .unwrap_err();
    assert!(matches!(err, SweepError::Quantity(EqError::NonFinite { .. })));

    assert_eq!(sweep.constraints().len(), 1);
    assert_eq!(sweep.grid().len(), 2);
}

#[test]
fn short_names_select_temperature_and_pressure() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep.add_named_constraint("T", [300.0, 350.0], "K").unwrap();
    sweep.add_named_constraint("P", [1.0, 10.0], "bar").unwrap();

    assert_eq!(sweep.constraints()[1].kind(), &ConstraintKind::Pressure);
    assert!(sweep.specs().inputs().is_empty());

    let results = sweep.equilibrate().unwrap();
    assert_eq!(results.axes(), ["temperature", "pressure"]);
    assert_eq!(results.num_failed(), 0);
    let pressures: Vec<f64> = results.states().iter().map(|s| in_bar(s.pressure())).collect();
    for (p, expected) in pressures.iter().zip([1.0, 10.0, 1.0, 10.0]) {
        assert!((p - expected).abs() < 1e-9);
    }
}

#[test]
fn unaddressable_grid_is_rejected_at_registration() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    let fits = usize::BITS as usize - 1;
    for i in 0..fits {
        sweep
            .add_constraint(ConstraintKind::element(format!("X{i}")), [0.0, 1.0], "")
            .unwrap();
    }

    let err = sweep
        .add_constraint(ConstraintKind::element("Xlast"), [0.0, 1.0], "")
        .unwrap_err();
    assert!(matches!(err, SweepError::GridTooLarge { .. }), "{err:?}");
    assert_eq!(sweep.constraints().len(), fits);
    assert_eq!(sweep.specs().inputs().len(), fits);
    assert_eq!(sweep.grid().len(), 1 << fits);

    // A single-valued axis does not grow the grid.
    sweep
        .add_constraint(ConstraintKind::element("Xone"), 0.0, "")
        .unwrap();
}

#[test]
fn unreachable_fugacity_fails_only_its_point() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep.initialize("N2(g)", 1.0, "mol").unwrap();
    // 2 bar of O2 cannot exist in a 1 bar gas phase.
    sweep.add_named_constraint("fO2", [0.1, 2.0, 0.2], "bar").unwrap();

    let results = sweep.equilibrate().unwrap();
    assert_eq!(
        results.statuses(),
        [
            EquilibriumStatus::Success,
            EquilibriumStatus::Failure,
            EquilibriumStatus::Success
        ]
    );
    assert_eq!(results.num_failed(), 1);
    assert_eq!(results.statuses()[1].message(), "Computation has failed!");

    let o2 = system.species_index("O2(g)").unwrap();
    let f = results.states()[2].props().fugacity_bar(o2);
    assert!((f - 0.2).abs() < 1e-8, "fO2 {f}");

    // The failed point keeps the unsolved initial amounts.
    assert_eq!(results.states()[1].amount("O2(g)"), 0.0);
}

#[test]
fn fugacity_of_missing_gas_aborts_the_sweep() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep.add_named_constraint("fCO2", 0.1, "bar").unwrap();

    let err = sweep.equilibrate().unwrap_err();
    assert!(matches!(err, SweepError::Engine(_)), "{err:?}");
    assert!(sweep.results().is_none());
}

#[test]
fn unit_the_engine_rejects_aborts_the_sweep() {
    let system = sulfate_system();
    let mut sweep = sweep(&system);
    sweep
        .add_named_constraint("temperature", [300.0, 400.0], "furlong")
        .unwrap();

    let err = sweep.equilibrate().unwrap_err();
    assert!(
        matches!(
            err,
            SweepError::Engine(EngineError::Quantity(EqError::UnknownUnit { .. }))
        ),
        "{err:?}"
    );
}

#[test]
fn plan_file_round_trips_and_runs() {
    let plan = SweepPlan::from_yaml_str(
        r#"
system:
  species:
    - {name: "H2O(aq)", phase: solvent, elements: {H: 2, O: 1}}
    - {name: "H+", phase: aqueous, elements: {H: 1}}
    - {name: "SO4-2", phase: aqueous, elements: {S: 1, O: 4}}
initial:
  - {substance: "H2O(aq)", amount: 1000, unit: g}
constraints:
  - {name: temperature, values: [25, 50], unit: C}
  - {name: S, values: {start: 0.001, end: 0.1, points: 3, spacing: logarithmic}}
"#,
    )
    .unwrap();

    let dir = std::env::temp_dir().join(format!("eq-sweep-plan-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("plan.yaml");
    plan.save_yaml(&path).unwrap();
    let loaded = SweepPlan::load_yaml(&path).unwrap();
    std::fs::remove_dir_all(&dir).ok();
    assert_eq!(loaded, plan);

    let results = loaded.run().unwrap();
    assert_eq!(results.len(), 6);
    assert_eq!(results.num_failed(), 0);

    let molality = results.states()[4].props().element_molality("S");
    assert!((molality - 0.01).abs() < 1e-8, "S molality {molality}");

    let json = results.summary().to_json().unwrap();
    assert!(json.contains("\"success\""));
}
