use std::{env, fs};

use anyhow::Context as _;
use logic_stack::{interface::OpcodeType, StackInterface, Tracer};
use logic_stack_afl_fuzz::{contents, FuzzInput};

/// Prints every stack operation together with the resulting stack contents.
struct PrintTracer;

impl Tracer for PrintTracer {
    fn after_op<OP: OpcodeType, S: StackInterface>(&mut self, stack: &S) {
        let rendered: String = contents(stack)
            .into_iter()
            .map(|value| if value { '1' } else { '0' })
            .collect();
        println!("{:?} -> [{rendered}]", OP::VALUE);
    }
}

fn main() -> anyhow::Result<()> {
    let filename = env::args()
        .nth(1)
        .context("Please provide the test case to show as argument.")?;
    let bytes = fs::read(&filename).with_context(|| format!("Failed to read {filename}"))?;

    let input: FuzzInput = arbitrary::Unstructured::new(&bytes)
        .arbitrary()
        .context("Failed to decode the test case")?;
    println!("{input:#?}");

    input.run(&mut PrintTracer);
    println!("OK");
    Ok(())
}
