use arbitrary::Arbitrary;
use logic_stack::{
    CheckedLogicStack, Expression, LogicStack, Op, StackError, StackInterface, Token, Tracer,
};
use pretty_assertions::assert_eq;

/// Input decoded from the fuzzer's bytes.
#[derive(Arbitrary, Debug)]
pub enum FuzzInput {
    Stack(StackProgram),
    Region { tokens: Vec<Token>, senses: u64 },
}

impl FuzzInput {
    /// Runs the input and panics on any disagreement between the implementations.
    pub fn run<T: Tracer>(&self, tracer: &mut T) {
        match self {
            Self::Stack(program) => program.run_differential(tracer),
            Self::Region { tokens, senses } => check_region(tokens, *senses, tracer),
        }
    }
}

#[derive(Arbitrary, Debug)]
pub struct StackProgram {
    pub ops: Vec<Op>,
}

impl StackProgram {
    /// Executes the program on the checked stack, the unchecked stack and a `Vec` model in lockstep.
    /// Operations rejected by the checked stack are skipped for the unchecked one.
    pub fn run_differential<T: Tracer>(&self, tracer: &mut T) {
        let mut checked = CheckedLogicStack::new();
        let mut unchecked = LogicStack::new();
        let mut model = Vec::new();

        for &op in &self.ops {
            let before = checked;
            let expected = apply_to_model(&mut model, op);
            let actual = op.try_apply(&mut checked);
            assert_eq!(actual, expected, "{op:?} applied to {before:?}");

            match actual {
                Ok(popped) => assert_eq!(op.apply_traced(&mut unchecked, tracer), popped),
                Err(_) => assert_eq!(checked, before),
            }
            assert_eq!(contents(&checked), model);
            assert_eq!(checked.as_unchecked(), &unchecked);
        }
    }
}

/// Checks that every expression accepted by the parser evaluates without violating a stack
/// precondition, and that the short-circuit and textual paths agree with stack evaluation.
fn check_region<T: Tracer>(tokens: &[Token], senses: u64, tracer: &mut T) {
    let Ok(expression) = Expression::from_infix(tokens.iter().copied()) else {
        return;
    };
    let sense = |surface: u32| (senses >> (surface % u64::BITS)) & 1 == 1;

    let mut stack = CheckedLogicStack::new();
    for token in expression.tokens() {
        let op = match token {
            Token::Halfspace(surface) => Op::Push(sense(surface.unsigned_abs()) == (surface > 0)),
            Token::Complement => Op::Not,
            Token::Intersection => Op::And,
            Token::Union => Op::Or,
            Token::LeftParen | Token::RightParen => panic!("parenthesis in postfix form"),
        };
        op.try_apply(&mut stack).expect("validated expression violated a stack precondition");
        assert!(stack.size() <= expression.max_depth());
    }
    assert_eq!(stack.size(), 1);
    let expected = stack.top().unwrap();

    assert_eq!(expression.evaluate(sense, tracer), expected);
    assert_eq!(expression.contains(sense), expected);
    assert_eq!(
        expression.to_string().parse::<Expression>().as_ref(),
        Ok(&expression)
    );
}

fn apply_to_model(model: &mut Vec<bool>, op: Op) -> Result<Option<bool>, StackError> {
    let required = op.opcode().operands();
    if model.len() < required {
        return Err(StackError::Underflow {
            required,
            available: model.len(),
        });
    }
    let result = match op {
        Op::Push(_) if model.len() == LogicStack::max_stack_depth() => {
            return Err(StackError::Overflow {
                capacity: LogicStack::max_stack_depth(),
            });
        }
        Op::Push(value) => {
            model.push(value);
            None
        }
        Op::Pop => model.pop(),
        Op::Not => {
            let top = model.len() - 1;
            model[top] = !model[top];
            None
        }
        Op::And | Op::Or => {
            let b = model.pop().unwrap();
            let a = model.pop().unwrap();
            model.push(if op == Op::And { a && b } else { a || b });
            None
        }
    };
    Ok(result)
}

/// Bottom-to-top contents of a stack.
pub fn contents(stack: &impl StackInterface) -> Vec<bool> {
    (0..stack.size()).map(|i| stack.get(i)).collect()
}
