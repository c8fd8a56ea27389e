use imgsuite::registrar::{
    Batch, BatchOutcome, Registrar, Registration, BROKEN_MARKER, ENV_TESTSUITE_CUR,
    ENV_TESTSUITE_IMAGEDIR, ENV_TESTSUITE_ROOT, ENV_TESTSUITE_SRC,
};
use imgsuite_tests::Fixture;

#[test]
fn disabled_batch_registers_nothing() {
    let fixture = Fixture::new();
    let config = fixture.config().variable("ENABLE_PNG", "FALSE").build();
    let mut registered: Vec<Registration> = Vec::new();

    let batch = Batch::new(["png", "png-damaged"]).enable_var("ENABLE_PNG");
    let outcome = Registrar::new(&config).register(&batch, &mut registered);

    assert!(registered.is_empty());
    assert!(matches!(outcome, BatchOutcome::Disabled { .. }));
}

#[test]
fn broken_batch_stays_visible() {
    let fixture = Fixture::new();
    let config = fixture.config().build();
    let mut registered: Vec<Registration> = Vec::new();

    let batch = Batch::new(["jpeg2000", "jpeg2000-j2kp4files"]).found_var("OPENJPEG_FOUND");
    Registrar::new(&config).register(&batch, &mut registered);

    assert_eq!(registered.len(), 2);
    assert!(registered.iter().all(|r| r.name.ends_with(BROKEN_MARKER)));
}

#[test]
fn missing_data_skips_batch_with_pointer() {
    let fixture = Fixture::new();
    let config = fixture.config().build();
    let mut registered: Vec<Registration> = Vec::new();

    let batch = Batch::new(["openexr-suite", "openexr-v2"])
        .image_dir("openexr-images")
        .url("http://github.com/AcademySoftwareFoundation/openexr-images");
    let outcome = Registrar::new(&config).register(&batch, &mut registered);

    assert!(registered.is_empty());
    let diagnostic = outcome.to_string();
    assert!(diagnostic.contains("http://github.com/AcademySoftwareFoundation/openexr-images"));
    assert!(!diagnostic.contains(BROKEN_MARKER));
}

#[test]
fn present_data_registers_batch() {
    let fixture = Fixture::new();
    let config = fixture.config().build();
    std::fs::create_dir_all(config.dataset_dir("openexr-images")).unwrap();
    let mut registered: Vec<Registration> = Vec::new();

    let batch = Batch::new(["openexr-suite", "openexr-v2"])
        .image_dir("openexr-images")
        .url("http://github.com/AcademySoftwareFoundation/openexr-images");
    let outcome = Registrar::new(&config).register(&batch, &mut registered);
    assert_eq!(outcome.registered(), ["openexr-suite", "openexr-v2"]);

    let suite_root = config.suite_root();
    let image_dir = config.dataset_dir("openexr-images");
    for r in &registered {
        assert!(r.working_dir.is_dir());
        let src = config.test_source_dir(&r.name);
        let env = &r.environment;
        assert_eq!(env.get(ENV_TESTSUITE_ROOT), Some(&*suite_root.to_string_lossy()));
        assert_eq!(env.get(ENV_TESTSUITE_SRC), Some(&*src.to_string_lossy()));
        assert_eq!(env.get(ENV_TESTSUITE_CUR), Some(&*r.working_dir.to_string_lossy()));
        assert_eq!(env.get(ENV_TESTSUITE_IMAGEDIR), Some(&*image_dir.to_string_lossy()));
    }
}

#[test]
fn working_directories_are_disjoint() {
    let fixture = Fixture::new();
    let config = fixture.config().build();
    let mut registered: Vec<Registration> = Vec::new();

    let registrar = Registrar::new(&config);
    registrar.register(&Batch::new(["oiiotool", "maketx"]), &mut registered);
    registrar.register(&Batch::new(["oiiotool"]).suffix(".batch"), &mut registered);

    let dirs: std::collections::BTreeSet<_> =
        registered.iter().map(|r| r.working_dir.clone()).collect();
    assert_eq!(dirs.len(), registered.len());
}
