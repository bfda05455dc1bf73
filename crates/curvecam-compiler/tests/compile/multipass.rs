use curvecam_compiler::{Compiler, CompilerParameters, GcodeConfig, GcodeInterface};
use curvecam_geometry::{LineSegmentChain, StrokeStyle, Vector};

const DESCENT: [&str; 4] = ["M5;", "G91;", "G1 Z-1.5;", "G90;"];

fn compiler(pass_depth: f64) -> Compiler {
    let interface = GcodeInterface::with_config(GcodeConfig {
        precision: Some(1),
        ..GcodeConfig::default()
    });
    let params = CompilerParameters {
        pass_depth,
        unit: Some("mm".into()),
        ..CompilerParameters::default()
    };
    let mut compiler = Compiler::new(interface, params).unwrap();
    let points = [
        Vector::new(0.0, 0.0),
        Vector::new(4.0, 0.0),
        Vector::new(4.0, 4.0),
    ];
    compiler
        .append_line_chain(&LineSegmentChain::from_points(&points, &StrokeStyle::default()))
        .unwrap();
    compiler
}

fn count_descents(lines: &[&str]) -> usize {
    lines.windows(DESCENT.len()).filter(|w| *w == DESCENT).count()
}

#[test]
fn test_descent_between_passes() {
    let mut compiler = compiler(1.5);
    let body: Vec<String> = compiler.body().to_vec();
    let header_len = compiler.header().len() + 1;

    let program = compiler.compile(3).unwrap();
    let lines: Vec<&str> = program.lines().collect();

    assert_eq!(count_descents(&lines), 2);
    assert_eq!(
        lines.len(),
        header_len + 3 * body.len() + 2 * DESCENT.len() + compiler.footer().len()
    );

    let stride = body.len() + DESCENT.len();
    for pass in 0..3 {
        let start = header_len + pass * stride;
        assert_eq!(&lines[start..start + body.len()], body.as_slice());
    }
}

#[test]
fn test_negative_depth_descends() {
    let mut compiler = compiler(-1.5);
    let program = compiler.compile(2).unwrap();
    let lines: Vec<&str> = program.lines().collect();
    assert_eq!(count_descents(&lines), 1);
    assert!(!program.contains("Z1.5"));
}

#[test]
fn test_single_pass_has_no_descent() {
    let mut compiler = compiler(1.5);
    let program = compiler.compile(1).unwrap();
    assert!(!program.contains("G91;"));
}

#[test]
fn test_zero_depth_repeats_body_back_to_back() {
    let mut compiler = compiler(0.0);
    let body: Vec<String> = compiler.body().to_vec();
    let program = compiler.compile(2).unwrap();
    let lines: Vec<&str> = program.lines().collect();

    assert!(!program.contains("G91;"));
    let start = compiler.header().len() + 1;
    let repeated: Vec<String> = body.iter().chain(body.iter()).cloned().collect();
    assert_eq!(&lines[start..start + repeated.len()], repeated.as_slice());
}

#[test]
fn test_compile_is_idempotent() {
    let mut compiler = compiler(1.5);
    let first = compiler.compile(4).unwrap();
    let second = compiler.compile(4).unwrap();
    assert_eq!(first, second);
}
