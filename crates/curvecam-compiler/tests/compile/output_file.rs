use curvecam_compiler::{Compiler, CompilerError, CompilerParameters, GcodeInterface};
use curvecam_geometry::{Curve, Line, Vector};
use std::fs;
use tempfile::tempdir;

fn compiler_with_line() -> Compiler {
    let mut compiler = Compiler::new(GcodeInterface::new(), CompilerParameters::default()).unwrap();
    let line: Curve = Line::new(Vector::new(0.0, 0.0), Vector::new(3.0, 4.0)).into();
    compiler.append_curves([&line]).unwrap();
    compiler
}

#[test]
fn test_compile_to_file_writes_program() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.gcode");

    let mut compiler = compiler_with_line();
    compiler.compile_to_file(&path, 2).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, compiler.compile(2).unwrap());
    assert!(written.contains("G1 X3.000000 Y4.000000;"));
}

#[test]
fn test_compile_to_file_truncates_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("job.gcode");
    fs::write(&path, "x".repeat(100_000)).unwrap();

    let mut compiler = compiler_with_line();
    compiler.compile_to_file(&path, 1).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(!written.contains('x'));
    assert!(written.starts_with("G90;"));
}

#[test]
fn test_compile_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("job.gcode");

    let mut compiler = compiler_with_line();
    let err = compiler.compile_to_file(&path, 1).unwrap_err();
    assert!(matches!(err, CompilerError::Io(_)));
}
