use std::cell::RefCell;
use std::str::Chars;

use colored::{ColoredString, Colorize};

/// Print a line to the trace stream, only when tracing is enabled.
#[macro_export]
macro_rules! trace {
    ( $fmt:literal $($tt:tt)* ) => {{
        if $crate::output::Output::is_tracing() {
            let mut s = format!($fmt $($tt)*);
            s.push('\n');
            $crate::output::Output::Trace.print_str(&s);
        }
    }};
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// Program results, to stdout
    Normal,
    /// Execution trace, to stderr
    Trace,
}

struct Decolored<'a> {
    chars: Chars<'a>,
}

impl Output {
    thread_local! {
        static IS_MINIMAL: RefCell<bool> = const { RefCell::new(false) };
        static IS_TRACING: RefCell<bool> = const { RefCell::new(false) };
    }

    pub fn set_minimal(new_value: bool) -> bool {
        Self::IS_MINIMAL.with(|value| value.replace(new_value))
    }
    pub fn is_minimal() -> bool {
        Self::IS_MINIMAL.with(|value| *value.borrow())
    }
    pub fn set_tracing(new_value: bool) -> bool {
        Self::IS_TRACING.with(|value| value.replace(new_value))
    }
    pub fn is_tracing() -> bool {
        Self::IS_TRACING.with(|value| *value.borrow())
    }

    pub fn print_str(&self, string: &str) {
        match self {
            Self::Normal => print!("{}", string),
            // Always remove color if `--minimal`
            Self::Trace if Self::is_minimal() => eprint_colorless(string),
            Self::Trace => eprint!("{}", ColoredString::from(string).blue()),
        }
    }

    /// Print the final contents of the register/memory array.
    ///
    /// Minimal output is the whole array on one line. Otherwise only non-zero cells are listed.
    pub fn print_memory(&self, memory: &[i32]) {
        if Self::is_minimal() {
            self.print_str(&format!("{:?}\n", memory));
            return;
        }

        self.print_str("\x1b[2m┌──────────────────────────────┐\x1b[0m\n");
        self.print_str("\x1b[2m│\x1b[0m \x1b[3mslot        hex         int\x1b[0m \x1b[2m│\x1b[0m\n");
        for (slot, value) in memory.iter().enumerate() {
            if *value == 0 {
                continue;
            }
            self.print_str("\x1b[2m│\x1b[0m");
            self.print_str(&format!(" \x1b[1m{:>4}\x1b[0m  ", slot));
            self.print_str(&format!("0x{:08x}  {:>10}", value, value));
            self.print_str(" \x1b[2m│\x1b[0m\n");
        }
        self.print_str("\x1b[2m└──────────────────────────────┘\x1b[0m\n");
    }
}

impl<'a> Decolored<'a> {
    pub fn new(string: &'a str) -> Self {
        Self {
            chars: string.chars(),
        }
    }
}

impl<'a> Iterator for Decolored<'a> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ch) = self.chars.next() {
            // Skip everything between '\x1b' and 'm' (inclusive)
            if ch == '\x1b' {
                while self.chars.next().is_some_and(|ch| ch != 'm') {}
                continue;
            }
            return Some(ch);
        }
        None
    }
}

fn eprint_colorless(string: &str) {
    for ch in Decolored::new(string) {
        eprint!("{}", ch);
    }
}
