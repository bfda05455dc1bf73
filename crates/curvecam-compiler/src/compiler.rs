//! Program assembly.
//!
//! A [`Compiler`] owns one [`Interface`] and three command buffers. The header
//! and footer are fixed at construction; the body grows with every appended
//! chain. [`Compiler::compile`] stitches them together, repeating the body
//! once per pass.

use crate::error::CompilerResult;
use crate::gcode::GcodeInterface;
use crate::interface::{Interface, MoveTarget};
use crate::style::{derive_laser_settings, LaserSettings};
use curvecam_core::{tolerances, Unit};
use curvecam_geometry::{approximate, Curve, LineSegmentChain};
use std::path::Path;

/// Machine parameters of a [`Compiler`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerParameters {
    /// Feed rate while repositioning with the laser off
    pub movement_speed: f64,
    /// Feed rate while cutting, before the per-chain multiplier
    pub cutting_speed: f64,
    /// Depth lowered between passes; the sign is ignored
    pub pass_depth: f64,
    /// Pause in milliseconds before each reposition, 0 to disable
    pub dwell_time: u64,
    /// Unit name, validated against [`Unit`]
    pub unit: Option<String>,
    /// Commands placed after the mode/speed preamble; defaults to laser off
    pub custom_header: Option<Vec<String>>,
    /// Commands closing the program; defaults to laser off
    pub custom_footer: Option<Vec<String>>,
}

impl Default for CompilerParameters {
    fn default() -> Self {
        Self {
            movement_speed: 1000.0,
            cutting_speed: 300.0,
            pass_depth: 0.0,
            dwell_time: 0,
            unit: None,
            custom_header: None,
            custom_footer: None,
        }
    }
}

/// Translates line-segment chains into a machine program.
#[derive(Debug)]
pub struct Compiler<I: Interface = GcodeInterface> {
    interface: I,
    parameters: CompilerParameters,
    unit: Option<Unit>,
    header: Vec<String>,
    body: Vec<String>,
    footer: Vec<String>,
}

impl<I: Interface> Compiler<I> {
    /// Build a compiler around `interface`.
    ///
    /// Fails when `parameters.unit` names an unknown unit.
    pub fn new(mut interface: I, mut parameters: CompilerParameters) -> CompilerResult<Self> {
        let unit = Unit::parse_optional(parameters.unit.as_deref())?;
        parameters.pass_depth = parameters.pass_depth.abs();

        let mut header = vec![
            interface.set_absolute_coordinates(),
            interface.set_movement_speed(parameters.movement_speed),
        ];
        match &parameters.custom_header {
            Some(commands) => header.extend(commands.iter().cloned()),
            None => header.push(interface.laser_off()),
        }

        let footer = match &parameters.custom_footer {
            Some(commands) => commands.clone(),
            None => vec![interface.laser_off()],
        };

        Ok(Self {
            interface,
            parameters,
            unit,
            header,
            body: Vec::new(),
            footer,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn footer(&self) -> &[String] {
        &self.footer
    }

    pub fn interface(&self) -> &I {
        &self.interface
    }

    pub fn parameters(&self) -> &CompilerParameters {
        &self.parameters
    }

    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    /// Drop everything appended so far. Header, footer and the interface's
    /// tracked position are kept.
    pub fn clear_body(&mut self) {
        self.body.clear();
    }

    /// Draw `chain` and append the commands to the body.
    ///
    /// Returns the laser settings derived from the first segment's style, or
    /// `None` for an empty chain. If the interface rejects a command the body
    /// and the tracked position are left as they were.
    pub fn append_line_chain(
        &mut self,
        chain: &LineSegmentChain,
    ) -> CompilerResult<Option<LaserSettings>> {
        let Some(first) = chain.first() else {
            tracing::warn!("Attempted to append an empty line chain");
            return Ok(None);
        };

        let settings = derive_laser_settings(&first.style);
        tracing::debug!(
            laser_power = settings.laser_power,
            speed_multiplier = settings.speed_multiplier,
            segments = chain.len(),
            "Derived laser settings for chain"
        );

        let start = first.start;
        let needs_reposition = match self.interface.position() {
            Some(position) => position.distance_to(&start) > tolerances().operation,
            None => true,
        };

        let mut commands = Vec::with_capacity(chain.len() + 6);
        if needs_reposition {
            // Validated before any move so a rejected power leaves the
            // interface position untouched.
            let power = self.interface.set_laser_power(settings.laser_power)?;

            if self.parameters.dwell_time > 0 {
                commands.push(self.interface.dwell(self.parameters.dwell_time));
            }
            commands.push(self.interface.laser_off());
            commands.push(self.interface.set_movement_speed(self.parameters.movement_speed));
            commands.push(self.interface.linear_move(MoveTarget::to(start).with_c(0.0)));
            commands.push(
                self.interface
                    .set_movement_speed(self.parameters.cutting_speed * settings.speed_multiplier),
            );
            commands.push(power);
        }

        for segment in chain {
            commands.push(self.interface.linear_move(MoveTarget::to(segment.end)));
        }

        self.body.extend(commands);
        Ok(Some(settings))
    }

    /// Approximate each curve and append the resulting chains in order.
    pub fn append_curves<'a>(
        &mut self,
        curves: impl IntoIterator<Item = &'a Curve>,
    ) -> CompilerResult<()> {
        for curve in curves {
            curve.validate()?;
            let chain = approximate(curve);
            self.append_line_chain(&chain)?;
        }
        Ok(())
    }

    /// Assemble header, unit selection, `passes` copies of the body and the
    /// footer into the program text.
    ///
    /// Between passes the laser is switched off and, when a pass depth is
    /// set, the tool is lowered by it. `passes == 0` counts as one pass.
    pub fn compile(&mut self, passes: u32) -> CompilerResult<String> {
        if self.body.is_empty() {
            tracing::warn!("Compiling with an empty body (no curves). Is this intentional?");
        }

        let passes = passes.max(1);
        let mut program: Vec<String> = Vec::new();
        program.extend(self.header.iter().cloned());
        program.push(self.interface.set_unit(self.unit));

        for pass in 0..passes {
            program.extend(self.body.iter().cloned());

            if pass + 1 < passes && self.parameters.pass_depth > 0.0 {
                program.push(self.interface.laser_off());
                program.push(self.interface.set_relative_coordinates());
                program.push(
                    self.interface
                        .linear_move(MoveTarget::z(-self.parameters.pass_depth)),
                );
                program.push(self.interface.set_absolute_coordinates());
            }
        }

        program.extend(self.footer.iter().cloned());

        let lines: Vec<String> = program
            .into_iter()
            .filter(|command| !command.is_empty())
            .collect();
        Ok(lines.join("\n"))
    }

    /// Compile and write the program to `path`, replacing any existing file.
    pub fn compile_to_file<P: AsRef<Path>>(&mut self, path: P, passes: u32) -> CompilerResult<()> {
        let path = path.as_ref();
        let program = self.compile(passes)?;
        std::fs::write(path, &program)?;
        tracing::info!(
            "Wrote {} lines of G-code to {}",
            program.lines().count(),
            path.display()
        );
        Ok(())
    }
}
