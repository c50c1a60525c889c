//! Concurrent checks are independent.

mod common;

use std::sync::Arc;
use toolcheck::check::AvailabilityChecker;
use toolcheck::locator::{Locator, StaticPathEnvironment};
use toolcheck::probe::StubRunner;
use toolcheck::profile::ToolProfile;
use toolcheck::{ExecutableSpec, ProbeResult};

#[test]
fn spawned_checks_with_stub_runner_each_spawn_once() {
    let runner = Arc::new(StubRunner::succeeding(common::CHECK_REPORT));
    let checker = AvailabilityChecker::new(
        ToolProfile::buildifier(),
        Locator::new(
            StaticPathEnvironment::new()
                .with_dir("/tools")
                .with_executable("/tools/buildifier"),
        ),
        runner.clone(),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| checker.spawn_check(ExecutableSpec::new("buildifier").unwrap()))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().status, ProbeResult::Compatible);
    }
    assert_eq!(runner.spawn_count(), 8);
}

#[cfg(unix)]
#[test]
fn concurrent_checks_with_different_specs_do_not_interfere() {
    use common::write_script;
    use std::time::Duration;
    use tempfile::TempDir;
    use toolcheck::locator::SystemPathEnvironment;
    use toolcheck::probe::SystemProcessRunner;

    let temp = TempDir::new().unwrap();
    // The good tool answers slowly so the bad one usually finishes first.
    write_script(
        temp.path(),
        "good-tool",
        &format!("sleep 1; echo '{}'", common::CHECK_REPORT),
    );
    write_script(temp.path(), "old-tool", "echo 'unknown flag'; exit 2");

    let checker = AvailabilityChecker::new(
        ToolProfile::buildifier(),
        Locator::new(SystemPathEnvironment::with_path(temp.path().as_os_str())),
        Arc::new(SystemProcessRunner::with_timeout(Duration::from_secs(20))),
    );

    let good = checker.spawn_check(ExecutableSpec::new("good-tool").unwrap());
    let old = checker.spawn_check(ExecutableSpec::new("old-tool").unwrap());
    let missing = checker.spawn_check(ExecutableSpec::new("no-such-tool").unwrap());

    assert_eq!(old.join().unwrap().status, ProbeResult::IncompatibleVersion);
    assert_eq!(missing.join().unwrap().status, ProbeResult::NotFound);
    assert_eq!(good.join().unwrap().status, ProbeResult::Compatible);
}
