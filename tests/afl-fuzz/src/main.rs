use logic_stack_afl_fuzz::FuzzInput;

fn main() {
    afl::fuzz!(|data: &[u8]| {
        if let Ok(input) = arbitrary::Unstructured::new(data).arbitrary::<FuzzInput>() {
            // Runs every operation on the checked stack, the unchecked stack and a `Vec<bool>` model,
            // or checks that a parsed region evaluates without breaking a stack precondition.
            input.run(&mut ());
        }
    });
}
