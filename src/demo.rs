//! Sample program exercising functions, calls and guarded calls.

use crate::error::AsmError;
use crate::isa::CompareKind;
use crate::register::Register;
use crate::script::Script;

/// Build the sample program. Returns it together with the register it writes its result to.
///
/// Three functions set the result register to 50, 40 and 30. Main calls the first, calls it
/// again only if the result equals 0 (it does not), calls the second only if the result equals
/// 50 (it does), then calls the second and third unconditionally, leaving 30 behind. Each result
/// is also sent to the motors as a speed.
pub fn build() -> Result<(Script, Register), AsmError> {
    let mut script = Script::new()?;
    let result = script.global()?;

    let mut setters = Vec::new();
    for value in [50u32, 40, 30] {
        let func = script.function(|f| {
            let zero = f.zero();
            f.add(result, zero, value)?;
            f.drive(1u32, 1u32, result, result)
        })?;
        setters.push(func);
    }
    let (set50, set40, set30) = (setters[0], setters[1], setters[2]);

    let mut main = script.main();
    main.drive(0u32, 0u32, 0u32, 0u32)?;
    main.call(set50)?;

    let expected = main.variable()?;
    main.set(expected, 0u32)?;
    main.conditional_call(CompareKind::Equal, result, expected, set50)?;
    main.set(expected, 50u32)?;
    main.conditional_call(CompareKind::Equal, result, expected, set40)?;
    main.release(expected);

    main.call(set40)?;
    main.call(set30)?;

    Ok((script, result))
}
