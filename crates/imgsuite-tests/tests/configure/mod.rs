use imgsuite::provision::{MissingReason, Outcome, Provisioned, Provisioner};
use imgsuite::registrar::{BatchOutcome, CTestManifest, Registration};
use imgsuite_tests::{Fixture, NoSymlinks};

fn outcome_of<'a>(report: &'a imgsuite::Report, name: &str) -> &'a Outcome {
    &report
        .datasets
        .iter()
        .find(|(n, _)| n == name)
        .unwrap_or_else(|| panic!("dataset {name} not in report"))
        .1
}

#[test]
fn provisioned_data_enables_tests() {
    let fixture = Fixture::new();
    fixture.local_dataset("fits-images");
    let config = fixture.config().build();
    let mut registered: Vec<Registration> = Vec::new();

    let provisioner = Provisioner::new(&config).linker(NoSymlinks);
    let report = imgsuite::configure_with(&config, provisioner, &mut registered);

    assert_eq!(
        *outcome_of(&report, "fits-images"),
        Outcome::Provisioned(Provisioned::Copied)
    );
    assert_eq!(
        *outcome_of(&report, "openexr-images"),
        Outcome::Missing(MissingReason::DownloadDisabled)
    );

    let names: Vec<_> = report.registered().collect();
    assert!(names.contains(&"fits"));
    assert!(!names.contains(&"openexr-suite"));
    assert!(
        report
            .batches
            .iter()
            .any(|b| matches!(b, BatchOutcome::MissingData { tests, .. } if tests[0] == "openexr-suite"))
    );
    assert_eq!(names.len(), registered.len());
}

#[test]
fn disabled_features_are_excluded() {
    let fixture = Fixture::new();
    let config = fixture
        .config()
        .variable("ENABLE_PNG", "OFF")
        .variable("PNG_FOUND", "1")
        .build();
    let mut registered: Vec<Registration> = Vec::new();

    let report = imgsuite::configure(&config, &mut registered);
    assert!(!report.registered().any(|n| n.starts_with("png")));
    assert!(report.registered().any(|n| n == "oiiotool"));
}

#[test]
fn writes_ctest_manifest() {
    let fixture = Fixture::new();
    let config = fixture.config().build();
    let mut manifest = CTestManifest::new(Vec::new());

    let report = imgsuite::configure(&config, &mut manifest);
    let text = String::from_utf8(manifest.into_inner()).unwrap();

    let add_tests = text.lines().filter(|l| l.starts_with("add_test(")).count();
    assert_eq!(add_tests, report.registered().count());
    assert!(text.contains("add_test(\"png-broken\""));
    assert!(text.contains("LABELS \"imgsuite;broken\""));
    assert!(text.contains("OCIO=ocio://default"));
}
