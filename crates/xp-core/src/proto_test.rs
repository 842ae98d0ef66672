use super::*;
use serial_test::serial;
use tempfile::TempDir;

fn write_protos(dir: &Path, names: &[&str]) {
    std::fs::create_dir_all(dir).unwrap();
    for name in names {
        std::fs::write(dir.join(name), "syntax = \"proto3\";\n").unwrap();
    }
}

/// Write an executable shell script standing in for protoc.
#[cfg(unix)]
fn fake_protoc(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-protoc");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_discover_proto_files_sorted_and_filtered() {
    let dir = TempDir::new().unwrap();
    write_protos(dir.path(), &["b.proto", "a.proto"]);
    std::fs::write(dir.path().join("notes.txt"), "").unwrap();

    let files = discover_proto_files(dir.path()).unwrap();
    assert_eq!(
        files,
        vec![dir.path().join("a.proto"), dir.path().join("b.proto")]
    );
}

#[test]
fn test_discover_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(discover_proto_files(&dir.path().join("absent")).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_missing_compiler_is_not_retried() {
    let dir = TempDir::new().unwrap();
    let protos = dir.path().join("proto_descriptors");
    write_protos(&protos, &["a.proto", "b.proto"]);

    let mut compiler = ProtoCompiler::new(dir.path().join("fake-protoc"));
    let outcome = compiler.compile(&protos, &protos.join("a.proto")).unwrap();
    assert_eq!(outcome, CompileOutcome::Skipped);

    // Installing the program afterwards does not bring the handle back
    fake_protoc(dir.path(), "exit 1");
    let outcome = compiler.compile(&protos, &protos.join("b.proto")).unwrap();
    assert_eq!(outcome, CompileOutcome::Skipped);
}

#[cfg(unix)]
#[test]
#[serial]
fn test_successful_compile_is_base64_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let protos = dir.path().join("protos");
    write_protos(&protos, &["trace.proto"]);
    let log = dir.path().join("args.log");
    let script = fake_protoc(
        dir.path(),
        &format!(
            r#"printf '%s\n' "$@" > "{log}"
for arg in "$@"; do
  case "$arg" in
    --descriptor_set_out=*) printf 'desc' > "${{arg#--descriptor_set_out=}}" ;;
  esac
done"#,
            log = log.display()
        ),
    );

    let mut compiler = ProtoCompiler::new(&script);
    let outcome = compiler.compile(&protos, &protos.join("trace.proto")).unwrap();
    assert_eq!(
        outcome,
        CompileOutcome::Compiled {
            descriptor: "ZGVzYw==".to_string(),
            diagnostics: None,
        }
    );

    let args = std::fs::read_to_string(&log).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args.len(), 3);
    assert_eq!(args[0], format!("--proto_path={}", protos.display()));
    assert!(args[1].starts_with("--descriptor_set_out="));
    assert!(args[1].ends_with(".desc"));
    assert_eq!(args[2], protos.join("trace.proto").display().to_string());

    let descriptor_path = args[1].trim_start_matches("--descriptor_set_out=");
    assert!(!Path::new(descriptor_path).exists());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_stderr_on_success_is_returned_as_diagnostics() {
    let dir = TempDir::new().unwrap();
    let protos = dir.path().join("protos");
    write_protos(&protos, &["trace.proto"]);
    let script = fake_protoc(
        dir.path(),
        r#"echo 'trace.proto:3:1: warning: Import unused.proto is unused.' >&2
for arg in "$@"; do
  case "$arg" in
    --descriptor_set_out=*) printf 'desc' > "${arg#--descriptor_set_out=}" ;;
  esac
done"#,
    );

    let mut compiler = ProtoCompiler::new(&script);
    let outcome = compiler.compile(&protos, &protos.join("trace.proto")).unwrap();
    assert_eq!(
        outcome,
        CompileOutcome::Compiled {
            descriptor: "ZGVzYw==".to_string(),
            diagnostics: Some("trace.proto:3:1: warning: Import unused.proto is unused.".to_string()),
        }
    );
}

#[cfg(unix)]
#[test]
#[serial]
fn test_compiler_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let protos = dir.path().join("protos");
    write_protos(&protos, &["broken.proto"]);
    let script = fake_protoc(
        dir.path(),
        "echo 'broken.proto:1:1: Expected top-level statement' >&2\nexit 1",
    );

    let mut compiler = ProtoCompiler::new(&script);
    let err = compiler
        .compile(&protos, &protos.join("broken.proto"))
        .unwrap_err();
    assert!(matches!(err, CoreError::ProtocFailed { .. }));
    let msg = err.to_string();
    assert!(msg.contains("broken.proto"));
    assert!(msg.contains("Expected top-level statement"));
}
