mod common;
use common::{write_point, write_point_with_tag};
use ictal::{LabeledPoint, PointClass, PopulationIndex, ReferencePopulation};

#[test]
fn load_dir_skips_unknown_tags_and_test_files() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    write_point(d, "Dog_1_interictal_point_1.safetensors", [0.1, 0.2, 0.3], PointClass::Interictal);
    write_point(d, "Dog_1_interictal_point_2.safetensors", [0.1, 0.2, 0.4], PointClass::Interictal);
    write_point(d, "Dog_1_ictal_point_1.safetensors", [0.7, 0.2, 0.8], PointClass::EarlyIctal);
    write_point(d, "Dog_1_ictal_point_2.safetensors", [0.6, 0.3, 0.7], PointClass::LateIctal);
    write_point(d, "Dog_1_test_point_1.safetensors", [0.5, 0.5, 0.5], PointClass::Interictal);
    write_point_with_tag(d, "Dog_1_ictal_point_3.safetensors", [0.9, 0.9, 0.9], "x");
    std::fs::write(d.join("Dog_1_ictal_point_4.safetensors"), b"not a tensor file").unwrap();
    std::fs::create_dir(d.join("nested")).unwrap();

    let pop = ReferencePopulation::load_dir(d).unwrap();
    assert_eq!(pop.class(PointClass::Interictal).len(), 2);
    assert_eq!(pop.class(PointClass::EarlyIctal).len(), 1);
    assert_eq!(pop.class(PointClass::LateIctal).len(), 1);
    assert_eq!(pop.len(), 4);
}

#[test]
fn unknown_tag_is_reported_by_point_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_point_with_tag(dir.path(), "p.safetensors", [0.0; 3], "ictal");
    let err = LabeledPoint::load(&path).unwrap_err();
    assert!(matches!(err, ictal::Error::UnknownClass { .. }), "{err}");
}

#[test]
fn point_files_keep_vector_and_class() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_point(dir.path(), "p.safetensors", [0.25, 0.5, 0.75], PointClass::LateIctal);
    let p = LabeledPoint::load(&path).unwrap();
    assert_eq!(p.class, PointClass::LateIctal);
    assert_eq!(p.vector.as_array(), &[0.25, 0.5, 0.75]);
}

#[test]
fn missing_directory_is_missing_data() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReferencePopulation::load_dir(&dir.path().join("Dog_9")).unwrap_err();
    assert!(matches!(err, ictal::Error::MissingData { .. }), "{err}");
}

#[test]
fn patients_do_not_mix() {
    let root = tempfile::tempdir().unwrap();
    let a = root.path().join("Dog_1");
    let b = root.path().join("Patient_2");
    std::fs::create_dir_all(&a).unwrap();
    std::fs::create_dir_all(&b).unwrap();
    write_point(&a, "a_interictal_point_1.safetensors", [0.1, 0.1, 0.1], PointClass::Interictal);
    write_point(&a, "a_interictal_point_2.safetensors", [0.2, 0.1, 0.1], PointClass::Interictal);
    write_point(&b, "b_ictal_point_1.safetensors", [0.9, 0.1, 0.1], PointClass::EarlyIctal);

    let mut index = PopulationIndex::new();
    index.load_patient("Dog_1", &a).unwrap();
    index.load_patient("Patient_2", &b).unwrap();

    let dog = index.get("Dog_1").unwrap();
    let patient = index.get("Patient_2").unwrap();
    assert_eq!((dog.class(PointClass::Interictal).len(), dog.class(PointClass::EarlyIctal).len()), (2, 0));
    assert_eq!((patient.class(PointClass::Interictal).len(), patient.class(PointClass::EarlyIctal).len()), (0, 1));
    assert_eq!(index.patients().collect::<Vec<_>>(), vec!["Dog_1", "Patient_2"]);

    // Rebuilding one patient leaves the other untouched.
    index.rebuild("Dog_1", ReferencePopulation::new());
    assert!(index.get("Dog_1").unwrap().is_empty());
    assert_eq!(index.get("Patient_2").unwrap().len(), 1);
}
