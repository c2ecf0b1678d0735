use std::fmt;

use crate::error::AsmError;
use crate::isa::{CompareKind, Opcode, ONE_SLOT, ZERO_SLOT};
use crate::register::{Allocator, Register, RegisterKind};
use crate::symbol::{Function, Marker, Symbols};

/// Operand of an emitter operation: a literal, a register, or the address of a marker.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    Imm(u32),
    Reg(Register),
    /// Resolves to the marker's instruction address
    Marker(Marker),
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Imm(value)
    }
}

impl From<Register> for Value {
    fn from(value: Register) -> Self {
        Value::Reg(value)
    }
}

impl From<Marker> for Value {
    fn from(value: Marker) -> Self {
        Value::Marker(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Imm(value) => write!(f, "{value}"),
            Value::Reg(reg) => write!(f, "{reg}"),
            Value::Marker(marker) => write!(f, "{marker}"),
        }
    }
}

/// Destination of a jump.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    /// Address currently held in the register
    Reg(Register),
    Function(Function),
    Marker(Marker),
}

impl From<Register> for Target {
    fn from(value: Register) -> Self {
        Target::Reg(value)
    }
}

impl From<Function> for Target {
    fn from(value: Function) -> Self {
        Target::Function(value)
    }
}

impl From<Marker> for Target {
    fn from(value: Marker) -> Self {
        Target::Marker(value)
    }
}

/// Instruction operand before linking.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operand {
    Lit(u32),
    Reg(Register),
    Marker(Marker),
    Function(Function),
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        match value {
            Value::Imm(value) => Operand::Lit(value),
            Value::Reg(reg) => Operand::Reg(reg),
            Value::Marker(marker) => Operand::Marker(marker),
        }
    }
}

/// Unlinked instruction record.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    op: Opcode,
    operands: Vec<Operand>,
    comment: String,
}

impl Instruction {
    pub fn new(op: Opcode, operands: Vec<Operand>, comment: impl Into<String>) -> Self {
        debug_assert_eq!(op.arity(), operands.len(), "wrong operand count for `{op}`");
        Instruction {
            op,
            operands,
            comment: comment.into(),
        }
    }

    pub fn op(&self) -> Opcode {
        self.op
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Single item of the bytecode list. Only [`Entry::Instruction`] takes up an address.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Entry {
    Instruction(Instruction),
    /// Placement of a jump marker: resolves to the next instruction's address
    Marker(Marker),
    /// Log-only annotation, `None` is a blank separator
    Note(Option<String>),
}

/// State shared by the program and all of its functions.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) allocator: Allocator,
    pub(crate) symbols: Symbols,
    /// Finished function bodies, in registration order
    pub(crate) functions: Vec<Vec<Entry>>,
    zero: Register,
    one: Register,
    return_stack: Register,
}

impl Context {
    pub(crate) fn new() -> Result<Self, AsmError> {
        let mut allocator = Allocator::new();
        // Zero and one are fixed by the machine, no initialising instruction needed
        let zero = allocator.reserve(ZERO_SLOT)?;
        let one = allocator.reserve(ONE_SLOT)?;
        let return_stack = allocator.allocate(RegisterKind::StackPointer)?;
        Ok(Context {
            allocator,
            symbols: Symbols::new(),
            functions: Vec::new(),
            zero,
            one,
            return_stack,
        })
    }
}

/// Appends instruction records to one body of code, either the main program or a function.
pub struct Emitter<'a> {
    ctx: &'a mut Context,
    code: &'a mut Vec<Entry>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(ctx: &'a mut Context, code: &'a mut Vec<Entry>) -> Self {
        Emitter { ctx, code }
    }

    /// Register pre-set to `0`.
    pub fn zero(&self) -> Register {
        self.ctx.zero
    }

    /// Register pre-set to `1`.
    pub fn one(&self) -> Register {
        self.ctx.one
    }

    /// Stack pointer holding return addresses of active calls.
    pub fn return_stack(&self) -> Register {
        self.ctx.return_stack
    }

    pub fn allocator(&self) -> &Allocator {
        &self.ctx.allocator
    }

    pub fn variable(&mut self) -> Result<Register, AsmError> {
        self.ctx.allocator.allocate(RegisterKind::Variable)
    }

    pub fn global(&mut self) -> Result<Register, AsmError> {
        self.ctx.allocator.allocate(RegisterKind::Global)
    }

    pub fn system(&mut self) -> Result<Register, AsmError> {
        self.ctx.allocator.allocate(RegisterKind::System)
    }

    pub fn release(&mut self, register: Register) {
        self.ctx.allocator.release(register)
    }

    /// Create a constant register at a fixed slot, optionally initialising it.
    pub fn constant(&mut self, slot: u8, value: Option<u32>) -> Result<Register, AsmError> {
        let reg = self.ctx.allocator.reserve(slot)?;
        if let Some(value) = value {
            self.note(format!("Set {reg} to {value}"));
            let zero = self.zero();
            self.instr(
                Opcode::AddImm,
                vec![Operand::Reg(reg), Operand::Reg(zero), Operand::Lit(value)],
                format!("Add {zero} to num {value} output to {reg}"),
            );
        }
        Ok(reg)
    }

    /// Allocate a stack pointer starting at memory offset `base`.
    pub fn stack_pointer(&mut self, base: u32) -> Result<Register, AsmError> {
        let sp = self.ctx.allocator.allocate(RegisterKind::StackPointer)?;
        self.set(sp, base)?;
        Ok(sp)
    }

    /// Create a new, unplaced jump marker.
    pub fn marker(&mut self) -> Marker {
        self.ctx.symbols.marker()
    }

    /// Place a marker so it resolves to the address of the next instruction.
    pub fn place(&mut self, marker: Marker) {
        self.code.push(Entry::Marker(marker));
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.code.push(Entry::Note(Some(text.into())));
    }

    pub fn blank(&mut self) {
        self.code.push(Entry::Note(None));
    }

    fn instr(&mut self, op: Opcode, operands: Vec<Operand>, comment: String) {
        self.code
            .push(Entry::Instruction(Instruction::new(op, operands, comment)));
    }

    fn writable(register: Register) -> Result<(), AsmError> {
        if register.is_static() {
            return Err(AsmError::IllegalMutation {
                slot: register.slot(),
            });
        }
        Ok(())
    }

    /// `register = value`, done by adding the value to the zero register.
    pub fn set(&mut self, register: Register, value: impl Into<Value>) -> Result<(), AsmError> {
        let value = value.into();
        Self::writable(register)?;
        self.note(format!("Set {register} to {value}"));
        let zero = self.zero();
        self.add(register, zero, value)
    }

    pub fn add(
        &mut self,
        output: Register,
        in1: Register,
        in2: impl Into<Value>,
    ) -> Result<(), AsmError> {
        Self::writable(output)?;
        let in2 = in2.into();
        let (op, comment) = match in2 {
            Value::Reg(_) => (Opcode::Add, format!("Add {in1} to {in2} output to {output}")),
            _ => (
                Opcode::AddImm,
                format!("Add {in1} to num {in2} output to {output}"),
            ),
        };
        self.instr(
            op,
            vec![Operand::Reg(output), Operand::Reg(in1), in2.into()],
            comment,
        );
        Ok(())
    }

    pub fn sub(
        &mut self,
        output: Register,
        in1: Register,
        in2: impl Into<Value>,
    ) -> Result<(), AsmError> {
        Self::writable(output)?;
        let in2 = in2.into();
        let (op, comment) = match in2 {
            Value::Reg(_) => (
                Opcode::Sub,
                format!("Subtract {in2} from {in1} output to {output}"),
            ),
            _ => (
                Opcode::SubImm,
                format!("Subtract num {in2} from {in1} output to {output}"),
            ),
        };
        self.instr(
            op,
            vec![Operand::Reg(output), Operand::Reg(in1), in2.into()],
            comment,
        );
        Ok(())
    }

    /// `dest = memory[address]`, where `address` is the value held in `address`.
    pub fn load(&mut self, address: Register, dest: Register) -> Result<(), AsmError> {
        Self::writable(dest)?;
        self.instr(
            Opcode::Load,
            vec![Operand::Reg(address), Operand::Reg(dest)],
            format!("Load Mem {address} Into {dest}"),
        );
        Ok(())
    }

    /// `memory[address] = value`, where `address` is the value held in `address`.
    pub fn store(&mut self, address: Register, value: Register) {
        self.instr(
            Opcode::Store,
            vec![Operand::Reg(address), Operand::Reg(value)],
            format!("Store {value} Into Mem {address}"),
        );
    }

    /// Increment `sp` and store `value` at the new top.
    pub fn push(&mut self, sp: Register, value: impl Into<Value>) -> Result<(), AsmError> {
        let value = value.into();
        Self::writable(sp)?;
        self.note(format!("Push {value} to Stack {sp}"));
        self.add(sp, sp, 1u32)?;
        match value {
            Value::Reg(reg) => self.store(sp, reg),
            _ => {
                let temp = self.system()?;
                self.set(temp, value)?;
                self.store(sp, temp);
                self.release(temp);
            }
        }
        Ok(())
    }

    /// Load the top of `sp` into `dest` and decrement `sp`.
    pub fn pop(&mut self, sp: Register, dest: Register) -> Result<(), AsmError> {
        Self::writable(sp)?;
        Self::writable(dest)?;
        self.note(format!("Pop Stack {sp}"));
        self.load(sp, dest)?;
        self.sub(sp, sp, 1u32)
    }

    /// Emit a move command for the actuator.
    ///
    /// Literal arguments are carried directly unless at least one argument is a register, in
    /// which case every literal is first copied into a temporary register.
    pub fn drive(
        &mut self,
        left_dir: impl Into<Value>,
        right_dir: impl Into<Value>,
        left_speed: impl Into<Value>,
        right_speed: impl Into<Value>,
    ) -> Result<(), AsmError> {
        let args = [
            left_dir.into(),
            right_dir.into(),
            left_speed.into(),
            right_speed.into(),
        ];
        let [ld, rd, ls, rs] = args;

        if !args.iter().any(|arg| matches!(arg, Value::Reg(_))) {
            self.instr(
                Opcode::MoveImm,
                args.into_iter().map(Operand::from).collect(),
                format!("Move with values ld-{ld} rd-{rd} ls-{ls} rs-{rs}"),
            );
            return Ok(());
        }

        let mut temps = Vec::new();
        let mut regs = Vec::with_capacity(args.len());
        for arg in args {
            let reg = match arg {
                Value::Reg(reg) => reg,
                _ => {
                    let temp = self.system()?;
                    self.set(temp, arg)?;
                    temps.push(temp);
                    temp
                }
            };
            regs.push(reg);
        }
        let comment = format!(
            "Move with register values ld-{} rd-{} ls-{} rs-{}",
            regs[0], regs[1], regs[2], regs[3]
        );
        self.instr(
            Opcode::MoveReg,
            regs.into_iter().map(Operand::Reg).collect(),
            comment,
        );
        for temp in temps {
            self.release(temp);
        }
        Ok(())
    }

    pub fn jump(&mut self, target: impl Into<Target>) {
        match target.into() {
            Target::Reg(reg) => self.instr(
                Opcode::Jump,
                vec![Operand::Reg(reg)],
                format!("Jump to {reg}"),
            ),
            Target::Function(func) => self.instr(
                Opcode::JumpImm,
                vec![Operand::Function(func)],
                format!("Jumpi to {func}"),
            ),
            Target::Marker(marker) => self.instr(
                Opcode::JumpImm,
                vec![Operand::Marker(marker)],
                format!("Jumpi to {marker}"),
            ),
        }
    }

    /// Push the resume address and jump into `function`.
    pub fn call(&mut self, function: Function) -> Result<(), AsmError> {
        let resume = self.marker();
        let sp = self.return_stack();
        self.push(sp, resume)?;
        self.jump(function);
        self.place(resume);
        Ok(())
    }

    /// Call `function` only if `var1` and `var2` compare true under `kind`.
    pub fn conditional_call(
        &mut self,
        kind: CompareKind,
        var1: Register,
        var2: Register,
        function: Function,
    ) -> Result<(), AsmError> {
        self.blank();
        self.note(format!(
            "If compare {kind} with {var1} and {var2} then jump to {function}"
        ));

        let result = self.system()?;
        self.instr(
            Opcode::Compare,
            vec![
                Operand::Lit(kind as u32),
                Operand::Reg(var1),
                Operand::Reg(var2),
                Operand::Reg(result),
            ],
            format!("Set {result} to 1 if true, 0 if false"),
        );
        let skip = self.marker();
        self.instr(
            Opcode::JumpIfNotTrue,
            vec![Operand::Reg(result), Operand::Marker(skip)],
            format!("Jump if not true to {skip}"),
        );
        // Result is consumed by the branch above, the slot can be reused by the call
        self.release(result);

        self.call(function)?;
        self.place(skip);
        self.note("End If");
        self.blank();
        Ok(())
    }

    /// Define a subroutine. `body` emits into the function, after which the return sequence is
    /// appended and the function is registered in the function table.
    pub fn function<F>(&mut self, body: F) -> Result<Function, AsmError>
    where
        F: FnOnce(&mut Emitter<'_>) -> Result<(), AsmError>,
    {
        let func = self.ctx.symbols.function();
        let mut code = Vec::new();
        // Slots the body touches stay out of the caller's reach once it is closed
        self.ctx.allocator.open_scope();
        let built = {
            let mut emitter = Emitter::new(&mut *self.ctx, &mut code);
            emitter.note(format!("{func} begin"));
            emitter.place(func.entry());
            body(&mut emitter).and_then(|()| emitter.end(func))
        };
        self.ctx.allocator.close_scope();
        built?;
        self.ctx.functions.push(code);
        Ok(func)
    }

    /// Return sequence: pop the resume address and jump to it.
    fn end(&mut self, func: Function) -> Result<(), AsmError> {
        self.note(format!("{func} return"));
        let resume = self.system()?;
        let sp = self.return_stack();
        self.pop(sp, resume)?;
        self.jump(resume);
        self.release(resume);
        self.note(format!("{func} end"));
        self.blank();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(code: &[Entry]) -> Vec<Opcode> {
        code.iter()
            .filter_map(|entry| match entry {
                Entry::Instruction(instr) => Some(instr.op()),
                _ => None,
            })
            .collect()
    }

    fn instrs(code: &[Entry]) -> Vec<&Instruction> {
        code.iter()
            .filter_map(|entry| match entry {
                Entry::Instruction(instr) => Some(instr),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn add_picks_variant() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let a = e.variable().unwrap();
        let b = e.global().unwrap();
        e.add(a, a, b).unwrap();
        e.add(a, a, 10u32).unwrap();
        e.sub(a, b, a).unwrap();
        e.sub(a, a, 3u32).unwrap();
        assert_eq!(
            ops(&code),
            vec![Opcode::Add, Opcode::AddImm, Opcode::Sub, Opcode::SubImm]
        );
        assert_eq!(
            instrs(&code)[1].operands(),
            &[Operand::Reg(a), Operand::Reg(a), Operand::Lit(10)]
        );
    }

    #[test]
    fn constants_reject_writes() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let zero = e.zero();
        let var = e.variable().unwrap();
        assert_eq!(
            e.set(zero, 4u32),
            Err(AsmError::IllegalMutation { slot: ZERO_SLOT })
        );
        let one = e.one();
        assert_eq!(
            e.load(var, one),
            Err(AsmError::IllegalMutation { slot: ONE_SLOT })
        );
        assert_eq!(
            e.pop(var, zero),
            Err(AsmError::IllegalMutation { slot: ZERO_SLOT })
        );
        // Reads are fine
        e.add(var, zero, one).unwrap();
    }

    #[test]
    fn constant_initialised_once() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let seven = e.constant(245, Some(7)).unwrap();
        assert_eq!(ops(&code).len(), 1);
        let mut e = Emitter::new(&mut ctx, &mut code);
        assert_eq!(
            e.set(seven, 8u32),
            Err(AsmError::IllegalMutation { slot: 245 })
        );
        assert_eq!(
            e.constant(245, None),
            Err(AsmError::SlotInUse { slot: 245 })
        );
    }

    #[test]
    fn move_with_constants_is_immediate() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        e.drive(1u32, 0u32, 100u32, 100u32).unwrap();
        let instrs = instrs(&code);
        assert_eq!(instrs.len(), 1);
        assert_eq!(instrs[0].op(), Opcode::MoveImm);
        assert_eq!(
            instrs[0].operands(),
            &[
                Operand::Lit(1),
                Operand::Lit(0),
                Operand::Lit(100),
                Operand::Lit(100)
            ]
        );
    }

    #[test]
    fn move_with_register_copies_constants() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let speed = e.variable().unwrap();
        let before = e.allocator().allocated_count();
        e.drive(1u32, 0u32, speed, 80u32).unwrap();
        assert_eq!(e.allocator().allocated_count(), before);
        assert!(e.allocator().is_allocated(speed.slot()));

        let instrs = instrs(&code);
        assert_eq!(
            instrs.iter().map(|i| i.op()).collect::<Vec<_>>(),
            vec![
                Opcode::AddImm,
                Opcode::AddImm,
                Opcode::AddImm,
                Opcode::MoveReg
            ]
        );
        let moved = instrs[3].operands();
        assert_eq!(moved[2], Operand::Reg(speed));
        for operand in [moved[0], moved[1], moved[3]] {
            let Operand::Reg(reg) = operand else {
                panic!("expected register operand, found {operand:?}");
            };
            assert_eq!(reg.kind(), RegisterKind::System);
        }
    }

    #[test]
    fn push_then_pop_shape() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let sp = e.stack_pointer(20).unwrap();
        let val = e.variable().unwrap();
        let dest = e.variable().unwrap();
        e.push(sp, val).unwrap();
        e.pop(sp, dest).unwrap();
        assert_eq!(
            ops(&code),
            vec![
                Opcode::AddImm, // sp = 20
                Opcode::AddImm, // sp += 1
                Opcode::Store,
                Opcode::Load,
                Opcode::SubImm,
            ]
        );
    }

    #[test]
    fn push_marker_materialises_address() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let marker = e.marker();
        let sp = e.return_stack();
        let before = e.allocator().allocated_count();
        e.push(sp, marker).unwrap();
        assert_eq!(e.allocator().allocated_count(), before);

        let instrs = instrs(&code);
        assert_eq!(instrs.len(), 3);
        assert_eq!(instrs[1].op(), Opcode::AddImm);
        assert_eq!(instrs[1].operands()[2], Operand::Marker(marker));
        assert_eq!(instrs[2].op(), Opcode::Store);
    }

    #[test]
    fn conditional_call_releases_temporaries() {
        let mut ctx = Context::new().unwrap();
        let mut main = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut main);
        let func = e.function(|_| Ok(())).unwrap();
        let a = e.variable().unwrap();
        let before = e.allocator().allocated_count();
        e.conditional_call(CompareKind::Equal, a, a, func).unwrap();
        assert_eq!(e.allocator().allocated_count(), before);
        assert_eq!(
            ops(&main),
            vec![
                Opcode::Compare,
                Opcode::JumpIfNotTrue,
                Opcode::AddImm,
                Opcode::AddImm,
                Opcode::Store,
                Opcode::JumpImm,
            ]
        );
    }

    #[test]
    fn function_body_registered_on_end() {
        let mut ctx = Context::new().unwrap();
        let mut main = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut main);
        let counter = e.global().unwrap();
        let func = e.function(|f| f.add(counter, counter, 10u32)).unwrap();
        assert_eq!(func.id(), 1);
        assert!(main.is_empty());
        assert_eq!(ctx.functions.len(), 1);

        let body = &ctx.functions[0];
        assert!(body.contains(&Entry::Marker(func.entry())));
        assert_eq!(
            ops(body),
            vec![Opcode::AddImm, Opcode::Load, Opcode::SubImm, Opcode::Jump]
        );
    }

    #[test]
    fn function_keeps_its_slots() {
        let mut ctx = Context::new().unwrap();
        let mut main = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut main);
        let mut scratch = None;
        e.function(|f| {
            let temp = f.variable()?;
            f.set(temp, 99u32)?;
            f.release(temp);
            scratch = Some(temp);
            Ok(())
        })
        .unwrap();
        let scratch = scratch.unwrap();

        // Epilogue temporary and the released body register are both kept
        assert!(e.allocator().is_allocated(scratch.slot()));
        assert!(e.allocator().is_allocated(125));
        assert_ne!(e.variable().unwrap().slot(), scratch.slot());
        assert_ne!(e.system().unwrap().slot(), 125);
    }

    #[test]
    fn failed_function_still_closes_scope() {
        let mut ctx = Context::new().unwrap();
        let mut main = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut main);
        let zero = e.zero();
        assert_eq!(
            e.function(|f| f.set(zero, 1u32)).unwrap_err(),
            AsmError::IllegalMutation { slot: ZERO_SLOT }
        );
        let temp = e.system().unwrap();
        e.release(temp);
        assert!(!e.allocator().is_allocated(temp.slot()));
    }

    #[test]
    fn rejected_write_leaves_no_note() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let one = e.one();
        let var = e.variable().unwrap();
        assert!(e.set(one, 3u32).is_err());
        assert!(e.push(one, var).is_err());
        assert!(e.pop(one, var).is_err());
        assert!(e.pop(var, one).is_err());
        assert!(code.is_empty());
    }

    #[test]
    fn nested_function_finishes_first() {
        let mut ctx = Context::new().unwrap();
        let mut main = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut main);
        let outer = e
            .function(|f| {
                let inner = f.function(|_| Ok(()))?;
                f.call(inner)
            })
            .unwrap();
        assert_eq!(outer.id(), 1);
        assert_eq!(ctx.functions.len(), 2);
        // Inner body registered before the outer one
        assert!(ctx.functions[1].contains(&Entry::Marker(outer.entry())));
    }

    #[test]
    fn exhausted_system_registers() {
        let mut ctx = Context::new().unwrap();
        let mut code = Vec::new();
        let mut e = Emitter::new(&mut ctx, &mut code);
        let held: Vec<_> = (0..115).map(|_| e.system().unwrap()).collect();
        assert_eq!(held.len(), 115);
        let var = e.variable().unwrap();
        assert_eq!(
            e.drive(var, 1u32, 1u32, 1u32),
            Err(AsmError::ExhaustedCategory {
                kind: RegisterKind::System
            })
        );
    }
}
