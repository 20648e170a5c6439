use approx::assert_relative_eq;
use czm_analytical::{Coefficients, Record, Specimen, SpecimenKind};
use serde_json::json;

const KINDS: [SpecimenKind; 3] = [SpecimenKind::Enf, SpecimenKind::Aslb, SpecimenKind::Adcb];

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("fixture must be an object"),
    }
}

#[test]
fn small_opening_follows_initial_compliance() {
    for kind in KINDS {
        let specimen = Specimen::new(kind).expect("defaults are valid");
        let u = 1e-3;
        let force = specimen.reaction_force(&[u]).force[0];
        assert_eq!(specimen.crack_length(u), specimen.state().initial_crack);
        assert_relative_eq!(u / force, specimen.compliance(60.0), max_relative = 1e-12);
    }
}

#[test]
fn crack_length_is_monotone_in_opening() {
    let openings = [0.01, 0.5, 1.0, 2.0, 3.0, 5.0, 8.0, 12.0, 20.0, 40.0];
    for kind in KINDS {
        let specimen = Specimen::new(kind).expect("defaults are valid");
        let cracks: Vec<f64> = openings.iter().map(|&u| specimen.crack_length(u)).collect();
        for pair in cracks.windows(2) {
            assert!(pair[1] >= pair[0], "{kind}: {cracks:?}");
        }
        assert!(cracks.iter().all(|&a| a >= 60.0));
        assert!(cracks[cracks.len() - 1] > 150.0, "{kind}: {cracks:?}");
    }
}

#[test]
fn grown_cracks_sit_on_the_toughness() {
    for kind in KINDS {
        let specimen = Specimen::new(kind).expect("defaults are valid");
        let u = 20.0;
        let crack = specimen.crack_length(u);
        let force = specimen.reaction_force_at(u);
        assert_relative_eq!(specimen.resistance(force, crack), 0.42, max_relative = 1e-7);
    }
}

#[test]
fn r_curve_recovers_analytical_history() {
    let displacement = [0.0, 0.5, 1.0, 2.0, 3.0, 5.0, 8.0, 12.0, 20.0];
    for kind in KINDS {
        let specimen = Specimen::new(kind).expect("defaults are valid");
        let force = specimen.reaction_force(&displacement).force;
        let curve = specimen.r_curve(&displacement, &force).expect("valid history");
        assert_eq!(curve.crack_length.len(), displacement.len() - 2);
        assert_eq!(curve.fracture_resistance.len(), displacement.len() - 2);

        for (i, &u) in displacement[1..displacement.len() - 1].iter().enumerate() {
            let expected = specimen.crack_length(u);
            assert_relative_eq!(curve.crack_length[i], expected, max_relative = 1e-7);
            if expected > 60.0 + 1e-6 {
                assert_relative_eq!(curve.fracture_resistance[i], 0.42, max_relative = 1e-6);
            } else {
                assert!(curve.fracture_resistance[i] < 0.42);
            }
        }
    }
}

#[test]
fn inversion_without_admissible_root_keeps_previous_crack() {
    let specimen = Specimen::new(SpecimenKind::Enf).expect("defaults are valid");
    let Coefficients::Enf(enf) = specimen.coefficients() else {
        panic!("ENF specimen carries ENF coefficients");
    };
    // ENF compliance never drops below P2, the uncracked beam.
    assert_eq!(specimen.invert_compliance(0.5 * enf.p2, 70.0), 70.0);
    assert_eq!(specimen.invert_compliance(f64::INFINITY, 65.0), 65.0);
}

#[test]
fn record_driven_reaction_force() {
    let mut specimen = Specimen::new(SpecimenKind::Adcb).expect("defaults are valid");
    let record = record(json!({
        "JobID": "ADCB_03",
        "Length": 200.0,
        "Width": 20.0,
        "tTop": 3.0,
        "tBot": 2.0,
        "tCz": 0.1,
        "Crack": 50.0,
        "ETop": [70000.0, 70000.0, 70000.0, 0.33, 0.33, 0.33, 26300.0, 26300.0, 26300.0],
        "gT": 0.8,
        "Displacement": [0.0, 0.1, 0.2],
        "Mesh Size": 0.25
    }));

    let history = specimen
        .reaction_force_from_record(&record)
        .expect("complete record");
    assert_eq!(specimen.state().name, "ADCB_03");
    assert_eq!(specimen.state().half_length, 100.0);
    assert_eq!(specimen.state().fracture_toughness, 0.8);
    assert_eq!(specimen.stiffness().g13, 26300.0);
    assert_eq!(history.force.len(), 3);
    assert_eq!(history.force[0], 0.0);
    assert_relative_eq!(history.force[1], 0.1 / specimen.compliance(50.0), max_relative = 1e-12);
}

#[test]
fn record_without_toughness_keeps_previous_value() {
    let mut specimen = Specimen::new(SpecimenKind::Aslb).expect("defaults are valid");
    let record = record(json!({
        "JobID": "ASLB_01", "Length": 100.0, "Width": 25.0, "tTop": 2.4, "tBot": 2.4,
        "tCz": 0.2, "Crack": 60.0,
        "E": [109000.0, 8819.0, 8819.0, 0.34, 0.34, 0.38, 4315.0, 4315.0, 3200.0]
    }));
    specimen.setup_from_record(&record).expect("complete record");
    assert_eq!(specimen.state().fracture_toughness, 0.42);
    assert_eq!(specimen.state().name, "ASLB_01");

    let err = specimen
        .r_curve_from_record(&record)
        .expect_err("no force-displacement history");
    assert_eq!(err.to_string(), "missing field: Displacement");
}
