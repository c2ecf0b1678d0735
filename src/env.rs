use std::{cell::RefCell, ffi::OsStr};

/// Settings read from the process environment once at startup.
#[derive(Clone, Copy, Debug)]
struct Env {
    /// `BOTASM_TRACE=1`
    trace: bool,
    /// `BOTASM_MAX_STEPS=<n>`
    max_steps: Option<u64>,
}

thread_local! {
    /// Must only be mutated within `set_env`
    static ENV: RefCell<Option<Env>> = const { RefCell::new(None) };
}

pub fn init() {
    let value = Env {
        trace: var_is("BOTASM_TRACE", "1"),
        max_steps: var_parsed("BOTASM_MAX_STEPS"),
    };
    set_env(value);
}

pub fn is_trace_enabled() -> bool {
    with_env(|env| env.trace)
}

/// Step limit override for the virtual machine, if set and valid.
pub fn max_steps() -> Option<u64> {
    with_env(|env| env.max_steps)
}

fn set_env(value: Env) {
    ENV.with(|env| {
        let mut env = env.borrow_mut();
        assert!(
            env.is_none(),
            "tried to initialize environment state multiple times"
        );
        *env = Some(value);
    });
}

fn with_env<F, R>(callback: F) -> R
where
    F: Fn(&Env) -> R,
{
    ENV.with(|env| {
        let env = env.borrow();
        let env = env.unwrap_or_else(|| {
            panic!("tried to access environment state before initialization");
        });
        callback(&env)
    })
}

fn var_is(name: impl AsRef<OsStr>, value: impl AsRef<str>) -> bool {
    std::env::var(name.as_ref()).is_ok_and(|v| v == value.as_ref())
}

// Unparseable values are ignored rather than aborting startup
fn var_parsed(name: impl AsRef<OsStr>) -> Option<u64> {
    std::env::var(name.as_ref()).ok()?.trim().parse().ok()
}
