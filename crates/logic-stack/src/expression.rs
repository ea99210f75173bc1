//! Region expressions evaluated on a [`LogicStack`].
//!
//! A region is a boolean combination of halfspaces. Halfspace `5` is the positive side of
//! surface 5 and `-5` its negative side. In the textual form, juxtaposition means intersection,
//! `|` union and `~` complement; complement binds tighter than intersection, which binds
//! tighter than union:
//!
//! ```
//! use logic_stack::Expression;
//!
//! let region: Expression = "1 -2 | ~(3 4)".parse()?;
//! assert_eq!(region.to_string(), "1 -2 | ~(3 4)");
//! assert!(!region.is_simple());
//!
//! // Point on the positive side of surfaces 1 and 3 only.
//! let sense = |surface: u32| surface == 1 || surface == 3;
//! assert!(region.contains(sense));
//! # Ok::<_, logic_stack::ExpressionError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use logic_stack_interface::Tracer;

use crate::{LogicStack, Op};

/// Token of a region expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Token {
    /// Signed surface ID; positive values denote the positive side of the surface. Must be non-zero.
    Halfspace(i32),
    /// Prefix complement.
    Complement,
    /// Intersection. Never produced by [`tokenize()`]; adjacent operands are intersected implicitly.
    Intersection,
    /// Union.
    Union,
    /// Opening parenthesis (infix form only).
    LeftParen,
    /// Closing parenthesis (infix form only).
    RightParen,
}

impl Token {
    fn precedence(self) -> Option<u8> {
        match self {
            Self::Complement => Some(3),
            Self::Intersection => Some(2),
            Self::Union => Some(1),
            Self::Halfspace(_) | Self::LeftParen | Self::RightParen => None,
        }
    }

    fn ends_operand(self) -> bool {
        matches!(self, Self::Halfspace(_) | Self::RightParen)
    }

    fn starts_operand(self) -> bool {
        matches!(self, Self::Halfspace(_) | Self::LeftParen | Self::Complement)
    }
}

/// Error building an [`Expression`].
///
/// Positions refer to the byte offset for [`tokenize()`] and to the index in the postfix sequence otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionError {
    /// No tokens.
    Empty,
    /// Unrecognized character or malformed surface ID.
    InvalidToken {
        /// Byte offset of the token start.
        position: usize,
    },
    /// Halfspace with surface ID 0.
    InvalidHalfspace {
        /// Token position.
        position: usize,
    },
    /// Unbalanced parentheses in an infix expression.
    MismatchedParenthesis,
    /// Parenthesis in a postfix sequence.
    UnexpectedParenthesis {
        /// Token position.
        position: usize,
    },
    /// Operator without enough operands.
    MissingOperand {
        /// Token position.
        position: usize,
    },
    /// More than one value would remain after evaluation.
    DanglingOperands {
        /// Number of values left on the stack.
        remaining: usize,
    },
    /// Evaluation would need more stack slots than [`LogicStack`] provides.
    TooDeep {
        /// Stack depth the expression reaches.
        depth: usize,
        /// Maximum supported depth.
        max: usize,
    },
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("empty region expression"),
            Self::InvalidToken { position } => write!(formatter, "invalid token at {position}"),
            Self::InvalidHalfspace { position } => {
                write!(formatter, "halfspace at {position} refers to surface 0")
            }
            Self::MismatchedParenthesis => formatter.write_str("mismatched parenthesis"),
            Self::UnexpectedParenthesis { position } => {
                write!(formatter, "parenthesis at {position} in postfix expression")
            }
            Self::MissingOperand { position } => {
                write!(formatter, "operator at {position} is missing an operand")
            }
            Self::DanglingOperands { remaining } => {
                write!(formatter, "expression leaves {remaining} values instead of one")
            }
            Self::TooDeep { depth, max } => write!(
                formatter,
                "expression needs stack depth {depth}, but at most {max} is supported"
            ),
        }
    }
}

impl Error for ExpressionError {}

/// Splits a textual region into tokens.
///
/// # Errors
///
/// Fails on characters other than whitespace, digits, signs, `(`, `)`, `|` and `~`, and on
/// surface IDs not fitting into `i32`.
pub fn tokenize(region: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = region.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '~' => Token::Complement,
            '|' => Token::Union,
            '+' | '-' | '0'..='9' => {
                let mut end = position + 1;
                while let Some(&(i, digit)) = chars.peek() {
                    if !digit.is_ascii_digit() {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }
                let surface = region[position..end]
                    .parse()
                    .map_err(|_| ExpressionError::InvalidToken { position })?;
                Token::Halfspace(surface)
            }
            c if c.is_whitespace() => continue,
            _ => return Err(ExpressionError::InvalidToken { position }),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Step {
    Halfspace(i32),
    Complement,
    Intersection,
    Union,
}

impl Step {
    fn token(self) -> Token {
        match self {
            Self::Halfspace(surface) => Token::Halfspace(surface),
            Self::Complement => Token::Complement,
            Self::Intersection => Token::Intersection,
            Self::Union => Token::Union,
        }
    }
}

/// Validated region expression in postfix form.
///
/// Construction guarantees that evaluation never underflows or overflows the [`LogicStack`],
/// so evaluation runs on the unchecked stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    steps: Vec<Step>,
    max_depth: usize,
    simple: bool,
}

impl Expression {
    /// Converts an infix token sequence into an expression.
    ///
    /// Adjacent operands (e.g., two halfspaces or a halfspace followed by `(`) are joined by an implicit intersection.
    ///
    /// # Errors
    ///
    /// Fails on unbalanced parentheses and on anything [`Self::from_postfix()`] rejects.
    pub fn from_infix(tokens: impl IntoIterator<Item = Token>) -> Result<Self, ExpressionError> {
        let mut output = Vec::new();
        let mut operators = Vec::new();
        let mut previous: Option<Token> = None;

        for token in tokens {
            if previous.is_some_and(Token::ends_operand) && token.starts_operand() {
                push_binary_operator(Token::Intersection, &mut output, &mut operators);
            }
            match token {
                Token::Halfspace(_) => output.push(token),
                Token::Complement | Token::LeftParen => operators.push(token),
                Token::Intersection | Token::Union => {
                    push_binary_operator(token, &mut output, &mut operators);
                }
                Token::RightParen => loop {
                    match operators.pop() {
                        Some(Token::LeftParen) => break,
                        Some(operator) => output.push(operator),
                        None => return Err(ExpressionError::MismatchedParenthesis),
                    }
                },
            }
            previous = Some(token);
        }

        while let Some(operator) = operators.pop() {
            if operator == Token::LeftParen {
                return Err(ExpressionError::MismatchedParenthesis);
            }
            output.push(operator);
        }
        Self::from_postfix(output)
    }

    /// Validates a postfix token sequence.
    ///
    /// # Errors
    ///
    /// Fails if the sequence is empty, contains parentheses or surface 0, applies an operator
    /// to too few operands, leaves other than exactly one value, or needs more than
    /// [`LogicStack::max_stack_depth()`] stack slots.
    pub fn from_postfix(tokens: impl IntoIterator<Item = Token>) -> Result<Self, ExpressionError> {
        let mut steps = Vec::new();
        let mut depth = 0_usize;
        let mut max_depth = 0;

        for (position, token) in tokens.into_iter().enumerate() {
            let (step, operands) = match token {
                Token::Halfspace(0) => return Err(ExpressionError::InvalidHalfspace { position }),
                Token::Halfspace(surface) => (Step::Halfspace(surface), 0),
                Token::Complement => (Step::Complement, 1),
                Token::Intersection => (Step::Intersection, 2),
                Token::Union => (Step::Union, 2),
                Token::LeftParen | Token::RightParen => {
                    return Err(ExpressionError::UnexpectedParenthesis { position })
                }
            };
            if depth < operands {
                return Err(ExpressionError::MissingOperand { position });
            }
            depth = match step {
                Step::Halfspace(_) => depth + 1,
                Step::Complement => depth,
                Step::Intersection | Step::Union => depth - 1,
            };
            if depth > LogicStack::max_stack_depth() {
                return Err(ExpressionError::TooDeep {
                    depth,
                    max: LogicStack::max_stack_depth(),
                });
            }
            max_depth = max_depth.max(depth);
            steps.push(step);
        }

        match depth {
            0 if steps.is_empty() => Err(ExpressionError::Empty),
            1 => Ok(Self {
                simple: steps
                    .iter()
                    .all(|step| matches!(step, Step::Halfspace(_) | Step::Intersection)),
                steps,
                max_depth,
            }),
            remaining => Err(ExpressionError::DanglingOperands { remaining }),
        }
    }

    /// Iterates over the postfix tokens of this expression.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.steps.iter().map(|step| step.token())
    }

    /// Returns the greatest stack depth reached during evaluation.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Checks whether this expression is a plain intersection of halfspaces.
    pub fn is_simple(&self) -> bool {
        self.simple
    }

    /// Evaluates this expression on a [`LogicStack`], reporting every stack operation to `tracer`.
    ///
    /// `sense(surface)` must return whether the point is on the positive side of `surface`.
    pub fn evaluate<T: Tracer>(&self, mut sense: impl FnMut(u32) -> bool, tracer: &mut T) -> bool {
        let mut stack = LogicStack::new();
        for &step in &self.steps {
            let op = match step {
                Step::Halfspace(surface) => Op::Push(sense(surface.unsigned_abs()) == (surface > 0)),
                Step::Complement => Op::Not,
                Step::Intersection => Op::And,
                Step::Union => Op::Or,
            };
            op.apply_traced(&mut stack, tracer);
        }
        Op::Pop
            .apply_traced(&mut stack, tracer)
            .unwrap_or_default()
    }

    /// Evaluates a [simple](Self::is_simple()) expression, stopping at the first halfspace that
    /// does not contain the point. Returns `None` for other expressions.
    pub fn evaluate_simple(&self, mut sense: impl FnMut(u32) -> bool) -> Option<bool> {
        if !self.simple {
            return None;
        }
        Some(self.steps.iter().all(|&step| match step {
            Step::Halfspace(surface) => sense(surface.unsigned_abs()) == (surface > 0),
            Step::Complement | Step::Intersection | Step::Union => true,
        }))
    }

    /// Checks whether the point described by `sense` lies inside the region, choosing the
    /// short-circuit path for simple expressions.
    pub fn contains(&self, mut sense: impl FnMut(u32) -> bool) -> bool {
        match self.evaluate_simple(&mut sense) {
            Some(inside) => inside,
            None => self.evaluate(sense, &mut ()),
        }
    }
}

fn push_binary_operator(token: Token, output: &mut Vec<Token>, operators: &mut Vec<Token>) {
    while let Some(&top) = operators.last() {
        match (top.precedence(), token.precedence()) {
            (Some(top_precedence), Some(precedence)) if top_precedence >= precedence => {
                output.push(top);
                operators.pop();
            }
            _ => break,
        }
    }
    operators.push(token);
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(region: &str) -> Result<Self, Self::Err> {
        Self::from_infix(tokenize(region)?)
    }
}

/// Renders the expression in the infix form accepted by [`FromStr`], with minimal parentheses.
impl fmt::Display for Expression {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ATOM: u8 = 4;

        fn wrap(operand: (String, u8), needs_parens: bool) -> String {
            if needs_parens {
                format!("({})", operand.0)
            } else {
                operand.0
            }
        }

        let mut operands: Vec<(String, u8)> = Vec::with_capacity(self.max_depth);
        for &step in &self.steps {
            let precedence = step.token().precedence().unwrap_or(ATOM);
            let rendered = match step {
                Step::Halfspace(surface) => surface.to_string(),
                Step::Complement => {
                    let operand = operands.pop().ok_or(fmt::Error)?;
                    let needs_parens = operand.1 < precedence;
                    format!("~{}", wrap(operand, needs_parens))
                }
                Step::Intersection | Step::Union => {
                    let right = operands.pop().ok_or(fmt::Error)?;
                    let left = operands.pop().ok_or(fmt::Error)?;
                    let separator = if step == Step::Union { " | " } else { " " };
                    let left_parens = left.1 < precedence;
                    let right_parens = right.1 <= precedence;
                    format!(
                        "{}{separator}{}",
                        wrap(left, left_parens),
                        wrap(right, right_parens)
                    )
                }
            };
            operands.push((rendered, precedence));
        }
        let (rendered, _) = operands.pop().ok_or(fmt::Error)?;
        formatter.write_str(&rendered)
    }
}
