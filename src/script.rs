use crate::emitter::{Context, Emitter, Entry};
use crate::error::{AsmError, LinkError};
use crate::isa::RETURN_STACK_BASE;
use crate::link::{link, LinkedProgram};
use crate::register::{Allocator, Register};
use crate::symbol::Function;

/// A whole program: prologue, function table and main body.
///
/// Layout of the linked stream is the prologue (return stack setup and a jump to main), then
/// every function body in the order its definition finished, then the main body.
pub struct Script {
    ctx: Context,
    prologue: Vec<Entry>,
    main: Vec<Entry>,
}

impl Script {
    pub fn new() -> Result<Self, AsmError> {
        let mut ctx = Context::new()?;
        let mut prologue = Vec::new();
        let mut main = Vec::new();

        let start = ctx.symbols.marker();
        {
            let mut emitter = Emitter::new(&mut ctx, &mut prologue);
            let sp = emitter.return_stack();
            emitter.set(sp, RETURN_STACK_BASE)?;
            emitter.jump(start);
        }
        {
            let mut emitter = Emitter::new(&mut ctx, &mut main);
            emitter.place(start);
            emitter.note("Main");
        }

        Ok(Script {
            ctx,
            prologue,
            main,
        })
    }

    /// Emitter appending to the main body.
    pub fn main(&mut self) -> Emitter<'_> {
        Emitter::new(&mut self.ctx, &mut self.main)
    }

    /// Define a function, see [`Emitter::function`].
    pub fn function<F>(&mut self, body: F) -> Result<Function, AsmError>
    where
        F: FnOnce(&mut Emitter<'_>) -> Result<(), AsmError>,
    {
        self.main().function(body)
    }

    pub fn global(&mut self) -> Result<Register, AsmError> {
        self.main().global()
    }

    pub fn variable(&mut self) -> Result<Register, AsmError> {
        self.main().variable()
    }

    pub fn allocator(&self) -> &Allocator {
        &self.ctx.allocator
    }

    /// Number of finished function bodies.
    pub fn function_count(&self) -> usize {
        self.ctx.functions.len()
    }

    /// Every entry in program order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.prologue
            .iter()
            .chain(self.ctx.functions.iter().flatten())
            .chain(self.main.iter())
    }

    /// Resolve addresses and operands. Consumes the script, it cannot be linked twice.
    pub fn link(self) -> Result<LinkedProgram, LinkError> {
        let markers = self.ctx.symbols.marker_count();
        let Script {
            ctx,
            prologue,
            main,
        } = self;
        let stream = prologue
            .into_iter()
            .chain(ctx.functions.into_iter().flatten())
            .chain(main);
        link(stream, markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Opcode;

    fn ops(script: &Script) -> Vec<Opcode> {
        script
            .entries()
            .filter_map(|entry| match entry {
                Entry::Instruction(instr) => Some(instr.op()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn prologue_sets_stack_and_jumps_to_main() {
        let script = Script::new().unwrap();
        assert_eq!(ops(&script), vec![Opcode::AddImm, Opcode::JumpImm]);
        assert_eq!(script.allocator().allocated_count(), 3);
    }

    #[test]
    fn functions_precede_main() {
        let mut script = Script::new().unwrap();
        let counter = script.global().unwrap();
        let func = script
            .function(|f| f.add(counter, counter, 10u32))
            .unwrap();
        script.main().call(func).unwrap();
        assert_eq!(script.function_count(), 1);

        let first_main = script
            .entries()
            .position(|entry| *entry == Entry::Note(Some("Main".into())))
            .unwrap();
        let entry = script
            .entries()
            .position(|entry| *entry == Entry::Marker(func.entry()))
            .unwrap();
        assert!(entry < first_main);
    }

    #[test]
    fn independent_scripts_number_identically() {
        let build = || {
            let mut script = Script::new().unwrap();
            let func = script.function(|_| Ok(())).unwrap();
            script.main().call(func).unwrap();
            script.link().unwrap()
        };
        assert_eq!(build(), build());
    }
}
