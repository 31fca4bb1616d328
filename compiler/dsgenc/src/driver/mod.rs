//! Generation driver.
//!
//! A finite-state machine sequences parsed records through expansion:
//!
//! ```text
//! ParseFile → Header → Cases ⇄ {Integer, IntegerWithReals, Real, Complex}Case
//!                        ↓
//!                  EndOfOperation → ParseFile … → EndOfFile
//! ```
//!
//! [`transition`] is a pure function of the current state and the event the
//! state's action produced; the [`Driver`] performs actions and applies
//! transitions until `EndOfFile`.

use dsgen_codegen::{expand_block, OperationUnit};
use dsgen_diagnostic::{GenError, GenResult};
use dsgen_ir::{KindFamily, KindTag, OperationRecord};
use dsgen_parse::SpecParser;
use tracing::{debug, info};

/// Driver state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum State {
    /// Looking for the next record header.
    ParseFile,
    /// Opening the operation for a freshly parsed record.
    Header,
    /// Choosing the case state for the next code block.
    Cases,
    IntegerCase,
    IntegerWithRealsCase,
    RealCase,
    ComplexCase,
    /// Emitting the default branch and epilogue.
    EndOfOperation,
    /// Terminal.
    EndOfFile,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::ParseFile => "ParseFile",
            State::Header => "Header",
            State::Cases => "Cases",
            State::IntegerCase => "IntegerCase",
            State::IntegerWithRealsCase => "IntegerWithRealsCase",
            State::RealCase => "RealCase",
            State::ComplexCase => "ComplexCase",
            State::EndOfOperation => "EndOfOperation",
            State::EndOfFile => "EndOfFile",
        }
    }

    /// Case state handling blocks with `tag`.
    pub fn for_tag(tag: KindTag) -> Self {
        match tag {
            KindTag::Integer => State::IntegerCase,
            KindTag::IntegerWithReals => State::IntegerWithRealsCase,
            KindTag::Real => State::RealCase,
            KindTag::Complex => State::ComplexCase,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == State::EndOfFile
    }
}

/// Outcome of a state's action.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Event {
    RecordFound,
    EndOfInput,
    Opened,
    Block(KindTag),
    NoMoreBlocks,
    Expanded,
    Finished,
}

/// Next state for `event` in `state`.
pub fn transition(state: State, event: Event) -> GenResult<State> {
    let next = match (state, event) {
        (State::ParseFile, Event::RecordFound) => State::Header,
        (State::ParseFile, Event::EndOfInput) => State::EndOfFile,
        (State::Header, Event::Opened) => State::Cases,
        (State::Cases, Event::Block(tag)) => State::for_tag(tag),
        (State::Cases, Event::NoMoreBlocks) => State::EndOfOperation,
        (
            State::IntegerCase
            | State::IntegerWithRealsCase
            | State::RealCase
            | State::ComplexCase,
            Event::Expanded,
        ) => State::Cases,
        (State::EndOfOperation, Event::Finished) => State::ParseFile,
        (state, event) => {
            return Err(GenError::driver_invariant(
                state.as_str(),
                format!("no transition on {event:?}"),
            ));
        }
    };
    Ok(next)
}

/// An operation between `Header` and `EndOfOperation`.
struct Operation {
    record: OperationRecord,
    unit: OperationUnit,
    next_block: usize,
}

/// Runs the state machine over one specification.
pub struct Driver<'src> {
    parser: SpecParser<'src>,
    state: State,
    pending: Option<OperationRecord>,
    current: Option<Operation>,
    output: String,
    operations: usize,
}

impl<'src> Driver<'src> {
    pub fn new(spec: &'src str) -> Self {
        Driver {
            parser: SpecParser::new(spec),
            state: State::ParseFile,
            pending: None,
            current: None,
            output: String::new(),
            operations: 0,
        }
    }

    /// Generate every operation, in specification order.
    ///
    /// Output is returned only once the whole specification was processed.
    pub fn run(mut self) -> GenResult<String> {
        while !self.state.is_terminal() {
            let event = self.step()?;
            let next = transition(self.state, event)?;
            debug!(from = self.state.as_str(), to = next.as_str(), "driver transition");
            self.state = next;
        }
        info!(operations = self.operations, "generation finished");
        Ok(self.output)
    }

    /// Perform the action of the current state.
    fn step(&mut self) -> GenResult<Event> {
        let state = self.state;
        match state {
            State::ParseFile => match self.parser.next_record()? {
                Some(record) => {
                    self.pending = Some(record);
                    Ok(Event::RecordFound)
                }
                None => Ok(Event::EndOfInput),
            },
            State::Header => {
                let record = self
                    .pending
                    .take()
                    .ok_or_else(|| invariant(state, "no parsed record to open"))?;
                let unit = OperationUnit::open(&record)?;
                debug!(name = unit.name(), "opened operation");
                self.current = Some(Operation {
                    record,
                    unit,
                    next_block: 0,
                });
                Ok(Event::Opened)
            }
            State::Cases => {
                let operation = self
                    .current
                    .as_ref()
                    .ok_or_else(|| invariant(state, "no open operation"))?;
                Ok(
                    match operation.record.code_blocks.get(operation.next_block) {
                        Some(block) => Event::Block(block.tag),
                        None => Event::NoMoreBlocks,
                    },
                )
            }
            State::IntegerCase
            | State::IntegerWithRealsCase
            | State::RealCase
            | State::ComplexCase => {
                self.expand_case(state)?;
                Ok(Event::Expanded)
            }
            State::EndOfOperation => {
                let operation = self
                    .current
                    .take()
                    .ok_or_else(|| invariant(state, "no open operation"))?;
                self.output.push_str(&operation.unit.render());
                self.operations += 1;
                Ok(Event::Finished)
            }
            State::EndOfFile => Err(invariant(state, "step after end of file")),
        }
    }

    fn expand_case(&mut self, state: State) -> GenResult<()> {
        let operation = self
            .current
            .as_mut()
            .ok_or_else(|| invariant(state, "no open operation"))?;
        let block = operation
            .record
            .code_blocks
            .get(operation.next_block)
            .ok_or_else(|| invariant(state, "no pending code block"))?;
        if State::for_tag(block.tag) != state {
            return Err(invariant(
                state,
                format!("block `{}:` dispatched to the wrong case", block.tag.as_str()),
            ));
        }

        let flags = operation.record.flags();
        let mut families: Vec<KindFamily> = Vec::with_capacity(4);
        if block.tag == KindTag::Real && !operation.unit.covers(KindFamily::Integer) {
            // no integer block: integer kinds reuse the real statements
            families.extend(KindTag::Integer.families());
        }
        families.extend(block.tag.families());

        for family in families {
            let branches =
                expand_block(block, family, flags).map_err(|e| e.at_line(block.line))?;
            operation.unit.add_branches(family, branches);
        }
        operation.next_block += 1;
        Ok(())
    }
}

fn invariant(state: State, detail: impl Into<String>) -> GenError {
    GenError::driver_invariant(state.as_str(), detail)
}
