//! Formula tokenizing and evaluation.
//!
//! Formulas are flat chains of operands joined by `+ - * /`:
//!
//! ```text
//! operand (operator operand)*
//! ```
//!
//! An operand is an integer literal or a cell address. Evaluation folds the
//! chain strictly left to right with no operator precedence, so `2+3*4` is
//! `20`. Arithmetic is checked 64-bit integer arithmetic.
//!
//! References are resolved on demand through the [`Sheet`]. Referenced
//! formulas are evaluated on an explicit stack of frames rather than by
//! recursion, so reference chains are bounded by memory and not by the
//! thread's stack. A [`Visited`] set holds the addresses of the frames on
//! that stack and turns a revisit into `#RECURSIVELINKS`.

use std::collections::HashSet;
use tracing::{debug, trace};

use super::address::Address;
use super::cell::{Cell, is_integer_literal, parse_integer_literal};
use super::error::CellError;
use super::sheet::Sheet;

/// Addresses currently being resolved along the active chain of frames.
#[derive(Debug, Default)]
pub struct Visited {
    active: HashSet<Address>,
}

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, addr: &Address) -> bool {
        self.active.contains(addr)
    }

    /// Mark `addr` as being resolved. Returns false if it already was.
    pub fn enter(&mut self, addr: &Address) -> bool {
        self.active.insert(addr.clone())
    }

    pub fn leave(&mut self, addr: &Address) {
        self.active.remove(addr);
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// A binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// Apply the operator, failing on division by zero and overflow.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, CellError> {
        let result = match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Sub => lhs.checked_sub(rhs),
            Operator::Mul => lhs.checked_mul(rhs),
            Operator::Div => {
                if rhs == 0 {
                    return Err(CellError::DivByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        result.ok_or(CellError::Overflow)
    }
}

/// A tokenized formula: the first operand followed by operator/operand pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression<'a> {
    pub first: &'a str,
    pub rest: Vec<(Operator, &'a str)>,
}

impl<'a> Expression<'a> {
    pub fn operands(&self) -> impl Iterator<Item = &'a str> + '_ {
        std::iter::once(self.first).chain(self.rest.iter().map(|(_, operand)| *operand))
    }
}

/// Split a formula into operands and operators.
///
/// Operands are runs of ASCII alphanumerics; every other character is read
/// as an operator and must be one of `+ - * /`. Operands may come out empty
/// (e.g. `"-5"`), which fails later as an invalid reference.
pub fn tokenize(expr: &str) -> Result<Expression<'_>, CellError> {
    let mut operands = Vec::new();
    let mut operators = Vec::new();
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        if c.is_ascii_alphanumeric() {
            continue;
        }
        let op = Operator::from_char(c).ok_or(CellError::InvalidOp)?;
        operands.push(&expr[start..i]);
        operators.push(op);
        start = i + c.len_utf8();
    }
    operands.push(&expr[start..]);

    let mut operands = operands.into_iter();
    let first = operands.next().unwrap_or_default();
    Ok(Expression {
        first,
        rest: operators.into_iter().zip(operands).collect(),
    })
}

/// One formula under evaluation: its tokens and the operand values
/// resolved so far. The next operand to resolve is `values.len()`.
#[derive(Debug)]
struct Frame {
    owner: Address,
    operands: Vec<String>,
    operators: Vec<Operator>,
    values: Vec<i64>,
    failed: Option<CellError>,
}

enum Step {
    /// A referenced formula has to be evaluated first.
    Descend(Frame),
    Done(Result<i64, CellError>),
}

enum Operand {
    Value(i64),
    Failed(CellError),
    Formula(Frame),
}

impl Frame {
    fn new(owner: Address, expr: &str) -> Frame {
        let mut frame = Frame {
            owner,
            operands: Vec::new(),
            operators: Vec::new(),
            values: Vec::new(),
            failed: None,
        };
        match tokenize(expr) {
            Ok(expression) => {
                frame.operands = expression.operands().map(str::to_string).collect();
                frame.operators = expression.rest.iter().map(|(op, _)| *op).collect();
            }
            Err(err) => frame.failed = Some(err),
        }
        frame
    }

    /// Resolve operands until the frame finishes or needs another formula.
    fn step(&mut self, sheet: &mut Sheet, visited: &mut Visited) -> Step {
        loop {
            if let Some(err) = self.failed {
                return Step::Done(Err(err));
            }
            let Some(token) = self.operands.get(self.values.len()) else {
                return Step::Done(self.fold());
            };
            match resolve_operand(sheet, &self.owner, token, visited) {
                Operand::Value(value) => self.values.push(value),
                Operand::Failed(err) => self.failed = Some(err),
                Operand::Formula(child) => return Step::Descend(child),
            }
        }
    }

    /// Take the final state of a referenced formula as the next operand.
    fn accept(&mut self, cell: &Cell) {
        match operand_value(cell) {
            Ok(value) => self.values.push(value),
            Err(err) => self.failed = Some(err),
        }
    }

    fn fold(&self) -> Result<i64, CellError> {
        let (&first, rest) = self
            .values
            .split_first()
            .ok_or(CellError::InvalidReference)?;
        self.operators
            .iter()
            .zip(rest)
            .try_fold(first, |acc, (op, &rhs)| op.apply(acc, rhs))
    }
}

/// Resolve the formula owned by `owner` and store the outcome in the sheet.
///
/// If `owner` is already on the active chain this returns
/// `#RECURSIVELINKS` without touching the cell: the frame that is
/// resolving it will store the final state.
pub fn resolve_formula(
    sheet: &mut Sheet,
    owner: &Address,
    expr: &str,
    visited: &mut Visited,
) -> Cell {
    if !visited.enter(owner) {
        debug!(cell = %owner, "circular reference");
        return Cell::Error(CellError::RecursiveLinks);
    }
    let outcome = run(sheet, Frame::new(owner.clone(), expr), visited);
    visited.leave(owner);
    store(sheet, owner, outcome)
}

/// Evaluate a formula to a value without storing it. Referenced formulas
/// are still resolved and stored.
pub fn evaluate(
    sheet: &mut Sheet,
    owner: &Address,
    expr: &str,
    visited: &mut Visited,
) -> Result<i64, CellError> {
    run(sheet, Frame::new(owner.clone(), expr), visited)
}

/// Drive `root` to completion. Every frame pushed on the way is entered in
/// `visited` when created and left, and its cell stored, when it finishes.
fn run(sheet: &mut Sheet, root: Frame, visited: &mut Visited) -> Result<i64, CellError> {
    let mut pending: Vec<Frame> = Vec::new();
    let mut current = root;
    loop {
        match current.step(sheet, visited) {
            Step::Descend(child) => {
                pending.push(current);
                current = child;
            }
            Step::Done(outcome) => {
                let Some(mut parent) = pending.pop() else {
                    return outcome;
                };
                visited.leave(&current.owner);
                let cell = store(sheet, &current.owner, outcome);
                parent.accept(&cell);
                current = parent;
            }
        }
    }
}

fn store(sheet: &mut Sheet, owner: &Address, outcome: Result<i64, CellError>) -> Cell {
    let cell = match outcome {
        Ok(value) => Cell::number(value),
        Err(err) => Cell::Error(err),
    };
    debug!(cell = %owner, result = %cell.display(), "formula resolved");
    sheet.replace(owner, cell.clone());
    cell
}

fn resolve_operand(
    sheet: &mut Sheet,
    owner: &Address,
    token: &str,
    visited: &mut Visited,
) -> Operand {
    trace!(cell = %owner, token, "resolving operand");

    if is_integer_literal(token) {
        return match parse_integer_literal(token) {
            Some(value) => Operand::Value(value),
            None => Operand::Failed(CellError::Overflow),
        };
    }

    let Some(target) = Address::from_str(token) else {
        return Operand::Failed(CellError::InvalidReference);
    };
    match sheet.classify_at(&target) {
        None => Operand::Failed(CellError::InvalidReference),
        Some(Cell::Formula(expr)) => {
            if !visited.enter(&target) {
                debug!(cell = %target, "circular reference");
                return Operand::Failed(CellError::RecursiveLinks);
            }
            Operand::Formula(Frame::new(target, &expr))
        }
        Some(cell) => match operand_value(&cell) {
            Ok(value) => Operand::Value(value),
            Err(err) => Operand::Failed(err),
        },
    }
}

fn operand_value(cell: &Cell) -> Result<i64, CellError> {
    match cell {
        Cell::Number { value, .. } => Ok(*value),
        Cell::Empty | Cell::String(_) => Err(CellError::InvalidType),
        Cell::Error(err) if err.is_evaluation_failure() => Err(*err),
        Cell::Error(_) => Err(CellError::InvalidType),
        Cell::Undefined(_) | Cell::Formula(_) => Err(CellError::BadLink),
    }
}
