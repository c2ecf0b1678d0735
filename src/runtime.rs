use crate::actuator::{Actuator, Drive, TraceActuator};
use crate::decode::{parse_bits, RawInstruction};
use crate::error::VmError;
use crate::isa::{CompareKind, Opcode, MEMORY_SLOTS, ONE_SLOT, ZERO_SLOT};
use crate::trace;

/// Upper bound on executed instructions unless configured otherwise.
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// Longest operand list of any opcode.
const MAX_ARITY: usize = 4;

type Handler<A> = fn(&mut Vm<A>, &[u8]) -> Result<(), VmError>;

/// Represents complete machine state during execution.
pub struct Vm<A: Actuator = TraceActuator> {
    /// Registers and addressable memory are the same array
    mem: [i32; MEMORY_SLOTS],
    /// Program counter, as an index into `program`
    pc: usize,
    program: Vec<RawInstruction>,
    actuator: A,
    steps: u64,
    step_limit: u64,
}

impl Vm<TraceActuator> {
    pub fn new(program: Vec<RawInstruction>) -> Self {
        Self::with_actuator(program, TraceActuator)
    }

    /// Decode a bit stream into a machine ready to run. Nothing executes if decoding fails.
    pub fn from_bits(input: &str) -> Result<Self, VmError> {
        Ok(Self::new(parse_bits(input)?))
    }
}

impl<A: Actuator> Vm<A> {
    pub fn with_actuator(program: Vec<RawInstruction>, actuator: A) -> Self {
        let mut mem = [0; MEMORY_SLOTS];
        mem[ONE_SLOT as usize] = 1;
        mem[ZERO_SLOT as usize] = 0;
        Vm {
            mem,
            pc: 0,
            program,
            actuator,
            steps: 0,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    pub fn set_step_limit(&mut self, limit: u64) {
        self.step_limit = limit;
    }

    pub fn memory(&self) -> &[i32] {
        &self.mem
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn program(&self) -> &[RawInstruction] {
        &self.program
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn is_halted(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Run until the program counter passes the last instruction.
    ///
    /// On error, memory is left as it was after the last successful instruction.
    pub fn run(&mut self) -> Result<(), VmError> {
        while !self.is_halted() {
            if self.steps >= self.step_limit {
                return Err(VmError::StepLimitExceeded {
                    limit: self.step_limit,
                });
            }
            self.step()?;
        }
        Ok(())
    }

    /// Execute the instruction at the program counter. Does nothing once halted.
    pub fn step(&mut self) -> Result<(), VmError> {
        if self.is_halted() {
            return Ok(());
        }
        let pc = self.pc;
        let instr = &self.program[pc];
        let op = Opcode::decode(instr.domain, instr.opcode).ok_or(VmError::UnknownOpcode {
            pc,
            domain: instr.domain,
            opcode: instr.opcode,
        })?;
        let count = instr.operands.len();
        if count != op.arity() {
            return Err(VmError::MalformedInstruction {
                index: pc,
                reason: format!("`{op}` takes {} operands, found {count}", op.arity()),
            });
        }
        trace!("VM.run {pc} {instr}");

        let mut operands = [0u8; MAX_ARITY];
        operands[..count].copy_from_slice(&instr.operands);
        Self::handler(op)(self, &operands[..count])?;

        self.steps += 1;
        if !op.transfers_control() {
            self.pc += 1;
        }
        Ok(())
    }

    fn handler(op: Opcode) -> Handler<A> {
        match op {
            Opcode::MoveImm => Self::move_imm,
            Opcode::MoveReg => Self::move_reg,
            Opcode::Compare => Self::compare,
            Opcode::Jump => Self::jump,
            Opcode::JumpImm => Self::jump_imm,
            Opcode::JumpIfNotTrue => Self::jump_not_true,
            Opcode::Add => Self::add,
            Opcode::AddImm => Self::add_imm,
            Opcode::Sub => Self::sub,
            Opcode::SubImm => Self::sub_imm,
            Opcode::Load => Self::load,
            Opcode::Store => Self::store,
        }
    }

    /// Check that `address` names a memory cell.
    fn slot(&self, op: Opcode, address: i64) -> Result<usize, VmError> {
        if (0..MEMORY_SLOTS as i64).contains(&address) {
            Ok(address as usize)
        } else {
            Err(VmError::AddressOutOfRange {
                pc: self.pc,
                op,
                address,
            })
        }
    }

    #[inline]
    fn get(&self, op: Opcode, slot: u8) -> Result<i32, VmError> {
        let slot = self.slot(op, slot as i64)?;
        Ok(self.mem[slot])
    }

    #[inline]
    fn set(&mut self, op: Opcode, slot: u8, value: i32) -> Result<(), VmError> {
        let slot = self.slot(op, slot as i64)?;
        self.mem[slot] = value;
        Ok(())
    }

    fn add(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (out, lhs, rhs) = (args[0], args[1], args[2]);
        let val = self
            .get(Opcode::Add, lhs)?
            .wrapping_add(self.get(Opcode::Add, rhs)?);
        self.set(Opcode::Add, out, val)
    }

    fn add_imm(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (out, lhs, imm) = (args[0], args[1], args[2]);
        let val = self.get(Opcode::AddImm, lhs)?.wrapping_add(imm as i32);
        self.set(Opcode::AddImm, out, val)
    }

    fn sub(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (out, lhs, rhs) = (args[0], args[1], args[2]);
        let val = self
            .get(Opcode::Sub, lhs)?
            .wrapping_sub(self.get(Opcode::Sub, rhs)?);
        self.set(Opcode::Sub, out, val)
    }

    fn sub_imm(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (out, lhs, imm) = (args[0], args[1], args[2]);
        let val = self.get(Opcode::SubImm, lhs)?.wrapping_sub(imm as i32);
        self.set(Opcode::SubImm, out, val)
    }

    fn load(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (addr, dest) = (args[0], args[1]);
        let ptr = self.get(Opcode::Load, addr)?;
        let src = self.slot(Opcode::Load, ptr as i64)?;
        trace!("Memory.load register={addr} address={src} dest={dest}");
        self.set(Opcode::Load, dest, self.mem[src])
    }

    fn store(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (addr, value) = (args[0], args[1]);
        let ptr = self.get(Opcode::Store, addr)?;
        let dest = self.slot(Opcode::Store, ptr as i64)?;
        let val = self.get(Opcode::Store, value)?;
        trace!("Memory.store register={addr} address={dest} value={val}");
        self.mem[dest] = val;
        Ok(())
    }

    fn compare(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (kind, lhs, rhs, result) = (args[0], args[1], args[2], args[3]);
        let kind = CompareKind::from_code(kind).ok_or(VmError::UnknownComparison {
            pc: self.pc,
            kind,
        })?;
        let lhs = self.get(Opcode::Compare, lhs)?;
        let rhs = self.get(Opcode::Compare, rhs)?;
        self.set(Opcode::Compare, result, kind.eval(lhs, rhs) as i32)
    }

    fn jump(&mut self, args: &[u8]) -> Result<(), VmError> {
        let target = self.get(Opcode::Jump, args[0])?;
        if target < 0 {
            return Err(VmError::AddressOutOfRange {
                pc: self.pc,
                op: Opcode::Jump,
                address: target as i64,
            });
        }
        trace!("VM.jump location={} mem_loc={target}", args[0]);
        self.pc = target as usize;
        Ok(())
    }

    fn jump_imm(&mut self, args: &[u8]) -> Result<(), VmError> {
        trace!("VM.jumpi location={}", args[0]);
        self.pc = args[0] as usize;
        Ok(())
    }

    fn jump_not_true(&mut self, args: &[u8]) -> Result<(), VmError> {
        let (cond, location) = (args[0], args[1]);
        if self.get(Opcode::JumpIfNotTrue, cond)? == 0 {
            trace!("VM.jnt location={location}");
            self.pc = location as usize;
        } else {
            self.pc += 1;
        }
        Ok(())
    }

    fn move_imm(&mut self, args: &[u8]) -> Result<(), VmError> {
        self.actuator.drive(Drive {
            left_dir: args[0] as i32,
            right_dir: args[1] as i32,
            left_speed: args[2] as i32,
            right_speed: args[3] as i32,
        });
        Ok(())
    }

    fn move_reg(&mut self, args: &[u8]) -> Result<(), VmError> {
        let op = Opcode::MoveReg;
        let command = Drive {
            left_dir: self.get(op, args[0])?,
            right_dir: self.get(op, args[1])?,
            left_speed: self.get(op, args[2])?,
            right_speed: self.get(op, args[3])?,
        };
        self.actuator.drive(command);
        Ok(())
    }
}
