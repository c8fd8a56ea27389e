use imgsuite::provision::{Dataset, MissingReason, Outcome, Provisioned, Provisioner};
use imgsuite_tests::{self as util, Fixture, NoSymlinks};

#[cfg(unix)]
#[test]
fn local_dataset_is_linked() {
    let fixture = Fixture::new();
    let local = fixture.local_dataset("d1");
    let config = fixture.config().build();

    let outcome = Provisioner::new(&config).ensure_dataset(&Dataset::local("d1"));
    assert_eq!(outcome, Outcome::Provisioned(Provisioned::Linked));

    let dest = config.dataset_dir("d1");
    assert!(std::fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
    assert_eq!(std::fs::read_link(&dest).unwrap(), local);
    assert_eq!(util::listing(&dest), util::listing(&local));
}

#[test]
fn local_dataset_is_copied_without_symlinks() {
    let fixture = Fixture::new();
    let local = fixture.local_dataset("d1");
    let config = fixture.config().build();

    let outcome = Provisioner::new(&config)
        .linker(NoSymlinks)
        .ensure_dataset(&Dataset::local("d1"));
    assert_eq!(outcome, Outcome::Provisioned(Provisioned::Copied));

    let dest = config.dataset_dir("d1");
    assert!(!std::fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
    assert_eq!(util::listing(&dest), util::listing(&local));
    assert_eq!(std::fs::read(dest.join("nested/sample.tif")).unwrap(), b"tif");
}

#[test]
fn absent_dataset_without_download() {
    let fixture = Fixture::new();
    let config = fixture.config().build();

    let outcome = Provisioner::new(&config).ensure_dataset(&Dataset::local("d2"));
    assert_eq!(outcome, Outcome::Missing(MissingReason::NoRemote));
    assert!(!config.dataset_dir("d2").exists());
    assert!(!outcome.to_string().is_empty());
}

#[test]
fn present_dataset_is_not_touched() {
    let fixture = Fixture::new();
    let config = fixture.config().download_missing(true).build();
    let dest = config.dataset_dir("d3");
    util::write_sample_tree(&dest);
    let modified = std::fs::metadata(dest.join("sample.exr")).unwrap().modified().unwrap();
    let before = util::listing(&dest);

    let dataset = Dataset::remote("d3", "https://example.invalid/d3.git");
    let outcome = Provisioner::new(&config).ensure_dataset(&dataset);
    assert_eq!(outcome, Outcome::Provisioned(Provisioned::AlreadyPresent));
    assert_eq!(util::listing(&dest), before);
    assert_eq!(
        std::fs::metadata(dest.join("sample.exr")).unwrap().modified().unwrap(),
        modified
    );
}

#[test]
fn ensuring_twice_is_idempotent() {
    for symlinks in [true, false] {
        let fixture = Fixture::new();
        fixture.local_dataset("d1");
        let config = fixture.config().build();
        let mut provisioner = Provisioner::new(&config);
        if !symlinks {
            provisioner = provisioner.linker(NoSymlinks);
        }

        let first = provisioner.ensure_dataset(&Dataset::local("d1"));
        let after_first = util::listing(&config.working_root());
        let second = provisioner.ensure_dataset(&Dataset::local("d1"));

        assert!(first.is_available());
        assert_eq!(second, Outcome::Provisioned(Provisioned::AlreadyPresent));
        assert_eq!(util::listing(&config.working_root()), after_first);
    }
}
