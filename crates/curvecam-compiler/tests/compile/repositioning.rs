use curvecam_compiler::{Compiler, CompilerParameters, GcodeConfig, GcodeInterface};
use curvecam_geometry::{LineSegmentChain, StrokeStyle, Vector};

fn compiler() -> Compiler {
    let interface = GcodeInterface::with_config(GcodeConfig {
        precision: Some(2),
        ..GcodeConfig::default()
    });
    Compiler::new(interface, CompilerParameters::default()).unwrap()
}

fn chain(points: &[(f64, f64)]) -> LineSegmentChain {
    let points: Vec<Vector> = points.iter().map(|&p| p.into()).collect();
    LineSegmentChain::from_points(&points, &StrokeStyle::default())
}

fn reposition_count(compiler: &Compiler) -> usize {
    compiler
        .body()
        .iter()
        .filter(|c| c.ends_with("C0.00;"))
        .count()
}

#[test]
fn test_continuous_chains_share_one_reposition() {
    let mut compiler = compiler();
    compiler.append_line_chain(&chain(&[(0.0, 0.0), (5.0, 0.0)])).unwrap();
    let after_first = compiler.body().len();

    compiler.append_line_chain(&chain(&[(5.0, 0.0), (5.0, 5.0), (0.0, 5.0)])).unwrap();

    assert_eq!(reposition_count(&compiler), 1);
    assert_eq!(
        &compiler.body()[after_first..],
        ["G1 X5.00 Y5.00;", "G1 X0.00 Y5.00;"]
    );
}

#[test]
fn test_start_within_operation_tolerance_is_continuous() {
    let mut compiler = compiler();
    compiler.append_line_chain(&chain(&[(0.0, 0.0), (5.0, 0.0)])).unwrap();
    compiler
        .append_line_chain(&chain(&[(5.0 + 1e-9, 0.0), (6.0, 0.0)]))
        .unwrap();
    assert_eq!(reposition_count(&compiler), 1);
}

#[test]
fn test_discontinuity_emits_exactly_one_reposition() {
    let mut compiler = compiler();
    compiler.append_line_chain(&chain(&[(0.0, 0.0), (5.0, 0.0)])).unwrap();
    let after_first = compiler.body().len();

    compiler.append_line_chain(&chain(&[(10.0, 10.0), (12.0, 10.0)])).unwrap();

    assert_eq!(reposition_count(&compiler), 2);
    assert_eq!(
        &compiler.body()[after_first..],
        [
            "M5;",
            "F1000;",
            "G1 X10.00 Y10.00 C0.00;",
            "F300;",
            "M3 S255;",
            "G1 X12.00 Y10.00;",
        ]
    );
}

#[test]
fn test_continuation_keeps_previous_power() {
    let mut compiler = compiler();
    compiler.append_line_chain(&chain(&[(0.0, 0.0), (5.0, 0.0)])).unwrap();

    let white = StrokeStyle::new("0", "#ffffff", "");
    let points = [Vector::new(5.0, 0.0), Vector::new(9.0, 0.0)];
    compiler
        .append_line_chain(&LineSegmentChain::from_points(&points, &white))
        .unwrap();

    let power_commands = compiler
        .body()
        .iter()
        .filter(|c| c.starts_with("M3"))
        .count();
    assert_eq!(power_commands, 1);
}
