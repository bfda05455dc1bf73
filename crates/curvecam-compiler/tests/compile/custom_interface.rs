use curvecam_compiler::{
    check_power, Compiler, CompilerError, CompilerParameters, GcodeInterface, Interface,
    InterfaceError, MoveTarget,
};
use curvecam_core::Unit;
use curvecam_geometry::{Line, LineSegmentChain, StrokeStyle, Vector};

/// Pen plotter dialect: pen up/down instead of laser power, no feed rates.
#[derive(Debug, Default)]
struct PenPlotter {
    position: Option<Vector>,
    calls: Vec<&'static str>,
}

impl Interface for PenPlotter {
    fn laser_off(&mut self) -> String {
        self.calls.push("laser_off");
        "PU;".to_string()
    }

    fn set_laser_power(&mut self, power: f64) -> Result<String, InterfaceError> {
        self.calls.push("set_laser_power");
        let power = check_power(power)?;
        Ok(if power > 0.0 { "PD;" } else { "PU;" }.to_string())
    }

    fn set_movement_speed(&mut self, _speed: f64) -> String {
        self.calls.push("set_movement_speed");
        String::new()
    }

    fn set_absolute_coordinates(&mut self) -> String {
        self.calls.push("set_absolute_coordinates");
        "PA;".to_string()
    }

    fn set_relative_coordinates(&mut self) -> String {
        self.calls.push("set_relative_coordinates");
        "PR;".to_string()
    }

    fn linear_move(&mut self, target: MoveTarget) -> String {
        self.calls.push("linear_move");
        match (target.x, target.y) {
            (Some(x), Some(y)) => {
                self.position = Some(Vector::new(x, y));
                format!("PA{},{};", x, y)
            }
            _ => String::new(),
        }
    }

    fn set_unit(&mut self, _unit: Option<Unit>) -> String {
        self.calls.push("set_unit");
        String::new()
    }

    fn dwell(&mut self, milliseconds: u64) -> String {
        self.calls.push("dwell");
        format!("WAIT{};", milliseconds)
    }

    fn position(&self) -> Option<Vector> {
        self.position
    }
}

fn square() -> LineSegmentChain {
    let points = [
        Vector::new(0.0, 0.0),
        Vector::new(1.0, 0.0),
        Vector::new(1.0, 1.0),
        Vector::new(0.0, 0.0),
    ];
    LineSegmentChain::from_points(&points, &StrokeStyle::default())
}

#[test]
fn test_compiler_drives_any_interface() {
    let mut compiler = Compiler::new(PenPlotter::default(), CompilerParameters::default()).unwrap();
    compiler.append_line_chain(&square()).unwrap();

    let program = compiler.compile(1).unwrap();
    assert_eq!(
        program,
        "PA;\nPU;\nPU;\nPA0,0;\nPD;\nPA1,0;\nPA1,1;\nPA0,0;\nPU;"
    );
}

#[test]
fn test_reposition_call_order() {
    let params = CompilerParameters {
        dwell_time: 40,
        ..CompilerParameters::default()
    };
    let mut compiler = Compiler::new(PenPlotter::default(), params).unwrap();
    let construction_calls = compiler.interface().calls.len();

    let segment = Line::new(Vector::new(2.0, 2.0), Vector::new(3.0, 2.0));
    let mut chain = LineSegmentChain::new();
    chain.append(segment).unwrap();
    compiler.append_line_chain(&chain).unwrap();

    assert_eq!(
        &compiler.interface().calls[construction_calls..],
        [
            "set_laser_power",
            "dwell",
            "laser_off",
            "set_movement_speed",
            "linear_move",
            "set_movement_speed",
            "linear_move",
        ]
    );
    assert_eq!(compiler.body()[0], "WAIT40;");
}

#[test]
fn test_custom_interface_enforces_power_range() {
    let style = StrokeStyle::new("0", "#000", "opacity:2");
    let line = Line::new(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).with_style(style);
    let mut chain = LineSegmentChain::new();
    chain.append(line).unwrap();

    let mut compiler = Compiler::new(PenPlotter::default(), CompilerParameters::default()).unwrap();
    let err = compiler.append_line_chain(&chain).unwrap_err();
    assert!(matches!(
        err,
        CompilerError::Interface(InterfaceError::PowerOutOfRange { power }) if power == 2.0
    ));
    assert!(compiler.body().is_empty());
}

#[test]
fn test_compiler_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Compiler<GcodeInterface>>();
    assert_send::<Compiler<PenPlotter>>();
}
