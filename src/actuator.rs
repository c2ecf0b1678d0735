use std::fmt;

use crate::trace;

/// Operands of one executed move instruction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Drive {
    pub left_dir: i32,
    pub right_dir: i32,
    pub left_speed: i32,
    pub right_speed: i32,
}

impl fmt::Display for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ld={} rd={} ls={} rs={}",
            self.left_dir, self.right_dir, self.left_speed, self.right_speed
        )
    }
}

/// Motor controller receiving every move the machine executes.
pub trait Actuator {
    fn drive(&mut self, command: Drive);
}

/// Reports each command through the trace output and otherwise does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceActuator;

impl Actuator for TraceActuator {
    fn drive(&mut self, command: Drive) {
        trace!("Robot.move {command}");
    }
}

/// Keeps every command in order of execution.
#[derive(Clone, Debug, Default)]
pub struct RecordingActuator {
    commands: Vec<Drive>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Drive] {
        &self.commands
    }
}

impl Actuator for RecordingActuator {
    fn drive(&mut self, command: Drive) {
        self.commands.push(command);
    }
}
