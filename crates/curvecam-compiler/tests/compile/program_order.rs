use curvecam_compiler::{
    Compiler, CompilerParameters, GcodeConfig, GcodeInterface, Interface, LaserSettings,
};
use curvecam_geometry::{CubicBazier, Curve, Line, StrokeStyle, Vector};

fn interface() -> GcodeInterface {
    GcodeInterface::with_config(GcodeConfig {
        precision: Some(1),
        ..GcodeConfig::default()
    })
}

fn line_job_parameters() -> CompilerParameters {
    CompilerParameters {
        movement_speed: 1000.0,
        cutting_speed: 500.0,
        pass_depth: 0.0,
        unit: Some("mm".into()),
        ..CompilerParameters::default()
    }
}

#[test]
fn test_single_line_program_order() {
    let params = CompilerParameters {
        custom_header: Some(Vec::new()),
        ..line_job_parameters()
    };
    let mut compiler = Compiler::new(interface(), params).unwrap();
    let line: Curve = Line::new(Vector::new(0.0, 0.0), Vector::new(10.0, 0.0)).into();
    compiler.append_curves([&line]).unwrap();

    let program = compiler.compile(1).unwrap();
    let lines: Vec<&str> = program.lines().collect();
    assert_eq!(
        lines,
        [
            "G90;",
            "F1000;",
            "G21;",
            "M5;",
            "F1000;",
            "G1 X0.0 Y0.0 C0.0;",
            "F500;",
            "M3 S255;",
            "G1 X10.0 Y0.0;",
            "M5;",
        ]
    );
}

#[test]
fn test_default_prologue_switches_laser_off() {
    let mut compiler = Compiler::new(interface(), line_job_parameters()).unwrap();
    let line: Curve = Line::new(Vector::new(0.0, 0.0), Vector::new(10.0, 0.0)).into();
    compiler.append_curves([&line]).unwrap();

    let program = compiler.compile(1).unwrap();
    let lines: Vec<&str> = program.lines().collect();
    assert_eq!(&lines[..4], ["G90;", "F1000;", "M5;", "G21;"]);
    assert_eq!(lines.last(), Some(&"M5;"));
}

#[test]
fn test_black_stroke_style_derivation() {
    let style = StrokeStyle::new("0.6", "#000000", "");
    let line = Line::new(Vector::new(0.0, 0.0), Vector::new(10.0, 0.0)).with_style(style);
    let chain = curvecam_geometry::approximate(&line.into());

    let mut compiler = Compiler::new(interface(), line_job_parameters()).unwrap();
    let settings = compiler.append_line_chain(&chain).unwrap();
    assert_eq!(
        settings,
        Some(LaserSettings {
            laser_power: 1.0,
            speed_multiplier: 1.0,
        })
    );
    assert!(compiler.body().iter().any(|c| c == "M3 S255;"));
}

#[test]
fn test_gray_stroke_lowers_power() {
    let style = StrokeStyle::new("0", "#808080", "");
    let line = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).with_style(style);
    let chain = curvecam_geometry::approximate(&line.into());

    let mut compiler = Compiler::new(interface(), line_job_parameters()).unwrap();
    let settings = compiler.append_line_chain(&chain).unwrap().unwrap();
    assert!(settings.laser_power > 0.49 && settings.laser_power < 0.51);
    assert!(compiler.body().iter().any(|c| c == "M3 S127;"));
}

#[test]
fn test_bezier_program_ends_at_curve_end() {
    let curve: Curve = CubicBazier::new(
        Vector::new(0.0, 0.0),
        Vector::new(20.0, 0.0),
        Vector::new(0.0, 15.0),
        Vector::new(20.0, 15.0),
    )
    .into();
    let segments = curvecam_geometry::approximate(&curve).len();
    assert!(segments > 1);

    let mut compiler = Compiler::new(interface(), line_job_parameters()).unwrap();
    compiler.append_curves([&curve]).unwrap();

    assert_eq!(compiler.body().len(), 5 + segments);
    assert_eq!(compiler.body().last().map(String::as_str), Some("G1 X20.0 Y0.0;"));
    assert_eq!(compiler.interface().position(), Some(curve.end()));
}

#[test]
fn test_non_finite_curve_is_rejected() {
    let curve: Curve = Line::new(Vector::new(0.0, 0.0), Vector::new(f64::NAN, 1.0)).into();
    let mut compiler = Compiler::new(interface(), line_job_parameters()).unwrap();
    assert!(compiler.append_curves([&curve]).is_err());
    assert!(compiler.body().is_empty());
}
