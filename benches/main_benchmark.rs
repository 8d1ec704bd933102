use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use fargo::profile;
use fargo::project::Project;
use fargo::state::{self, Mode};
use fargo::templates;

/// Scaffold a minimal project with a profile that overrides a few keys.
fn setup_project() -> (tempfile::TempDir, Project) {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("CMakeLists.txt"), "project(bench_app)").unwrap();
    let profiles = tmp.path().join(".fargo").join("profiles");
    std::fs::create_dir_all(&profiles).unwrap();
    std::fs::write(profiles.join("default.conf"), templates::default_profile()).unwrap();
    std::fs::write(
        profiles.join("strict.conf"),
        "CXX_FLAGS_DEBUG=\"-Wall -Wextra -Werror -g\"\nCMAKE_CXX_STANDARD=\"23\"\n",
    )
    .unwrap();
    let project = Project::locate(tmp.path()).unwrap();
    (tmp, project)
}

fn bench_profile_resolve(c: &mut Criterion) {
    let (_tmp, project) = setup_project();

    c.bench_function("resolve_default_profile", |b| {
        b.iter(|| profile::resolve(black_box(&project), black_box(None), black_box(&[])).unwrap())
    });

    c.bench_function("resolve_named_profile", |b| {
        b.iter(|| {
            profile::resolve(black_box(&project), black_box(Some("strict")), black_box(&[]))
                .unwrap()
        })
    });

    let overrides = vec![("BUILD_PARALLEL_JOBS".to_string(), "8".to_string())];
    c.bench_function("resolve_with_overrides", |b| {
        b.iter(|| {
            profile::resolve(
                black_box(&project),
                black_box(Some("strict")),
                black_box(&overrides),
            )
            .unwrap()
        })
    });
}

fn bench_fingerprint(c: &mut Criterion) {
    let (_tmp, project) = setup_project();
    let cfg = profile::resolve(&project, None, &[]).unwrap();

    c.bench_function("configuration_fingerprint", |b| {
        b.iter(|| {
            for mode in Mode::ALL {
                let _ = state::fingerprint(black_box(mode), black_box("Ninja"), black_box(&cfg));
            }
        })
    });
}

fn bench_templates(c: &mut Criterion) {
    c.bench_function("render_cmakelists", |b| {
        b.iter(|| templates::cmakelists(black_box("myapp")))
    });

    c.bench_function("render_default_profile", |b| {
        b.iter(|| templates::default_profile())
    });
}

criterion_group!(
    benches,
    bench_profile_resolve,
    bench_fingerprint,
    bench_templates
);
criterion_main!(benches);
