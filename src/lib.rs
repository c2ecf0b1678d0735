// Assembling
mod register;
pub use register::{Allocator, Register, RegisterKind};
mod symbol;
pub use symbol::{Function, Marker};
mod emitter;
pub use emitter::{Emitter, Entry, Instruction, Operand, Target, Value};
mod script;
pub use script::Script;
mod link;
pub use link::{LinkedEntry, LinkedInstruction, LinkedProgram};
pub mod serialize;

// Running
pub mod decode;
mod runtime;
pub use runtime::{Vm, DEFAULT_STEP_LIMIT};
pub mod actuator;

#[macro_use]
pub mod output;
pub mod demo;
pub mod env;
pub mod error;
pub mod isa;
