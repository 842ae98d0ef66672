use super::*;
use tempfile::TempDir;

#[test]
fn test_discover_modules_sorted() {
    let dir = TempDir::new().unwrap();
    for name in ["zeta", "alpha", "mid"] {
        std::fs::create_dir_all(dir.path().join("src").join(name)).unwrap();
    }
    std::fs::write(dir.path().join("src/README.md"), "not a module").unwrap();

    let layout = ProjectLayout::new(dir.path()).unwrap();
    let modules = layout.discover_modules().unwrap();
    let names: Vec<&str> = modules.iter().map(|m| m.as_str()).collect();
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_discover_modules_includes_empty_directories() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src/empty")).unwrap();

    let layout = ProjectLayout::new(dir.path()).unwrap();
    assert_eq!(layout.discover_modules().unwrap(), vec![ModuleName::try_new("empty").unwrap()]);
}

#[test]
fn test_missing_source_root() {
    let dir = TempDir::new().unwrap();
    let layout = ProjectLayout::new(dir.path()).unwrap();
    let err = layout.discover_modules().unwrap_err();
    assert!(matches!(err, CoreError::SourceRootNotFound { .. }));
}

#[test]
fn test_feature_paths() {
    let layout = ProjectLayout::new(Path::new("/tmp/project")).unwrap();
    let module = ModuleName::try_new("perf").unwrap();
    assert_eq!(
        layout.feature_source_dir(&module, FeatureKind::SqlModules),
        PathBuf::from("/tmp/project/src/perf/sql_modules")
    );
    assert_eq!(
        layout.module_output_dir(&module),
        PathBuf::from("/tmp/project/modules/perf")
    );
    assert_eq!(layout.manifest_path(), PathBuf::from("/tmp/project/manifest"));
}

#[test]
fn test_existing_outputs_ignores_foreign_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("modules/perf");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("sql_modules"), "{}\n").unwrap();
    std::fs::write(out.join("macros"), "{}\n").unwrap();
    std::fs::write(out.join("notes.txt"), "keep me").unwrap();
    std::fs::write(dir.path().join("manifest"), "{}\n").unwrap();

    let layout = ProjectLayout::new(dir.path()).unwrap();
    let outputs = layout.existing_outputs().unwrap();
    assert_eq!(
        outputs,
        vec![
            out.join("macros"),
            out.join("sql_modules"),
            dir.path().join("manifest"),
        ]
    );
}
