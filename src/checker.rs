//! Detection of variables read before they are assigned.
//!
//! Instructions are visited in the order they are stored in the procedure,
//! block after block. Branches are never followed, so the result is only exact
//! when that order happens to be an execution order (e.g. straight-line code).

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use crate::ir::{Instruction, Name, Procedure};

/// Tracks the variables that have been allocated but not stored to yet,
/// and the ones that were read while in that state.
#[derive(Debug, Default)]
pub struct InitializationChecker {
    uninitialized: HashSet<Name>,
    /// Only ever grows during a run.
    flagged: BTreeSet<Name>,
}

impl InitializationChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the variables of `procedure` that are read before being stored to,
    /// sorted by name.
    pub fn check(procedure: &Procedure) -> Vec<Name> {
        Self::new().run_on(procedure)
    }

    /// Like [`InitializationChecker::check`], reusing this checker's sets.
    /// Nothing is carried over from a previous run.
    pub fn run_on(&mut self, procedure: &Procedure) -> Vec<Name> {
        self.uninitialized.clear();
        self.flagged.clear();
        for instruction in procedure.instructions() {
            self.visit_instruction(instruction);
        }
        debug!(count = self.flagged.len(), "initialization check finished");
        std::mem::take(&mut self.flagged).into_iter().collect()
    }

    fn visit_instruction(&mut self, instruction: &Instruction) {
        trace!(%instruction, "visiting");
        match instruction {
            Instruction::Allocate { name } => {
                self.uninitialized.insert(name.clone());
            }

            // Neither the stored value nor the target counts as a read.
            Instruction::Store { target, .. } => {
                if let Some(name) = target.name() {
                    self.uninitialized.remove(name);
                }
            }

            Instruction::Generic { operands, .. } => {
                for name in operands.iter().filter_map(|operand| operand.name()) {
                    if self.uninitialized.contains(name) && self.flagged.insert(name.clone()) {
                        trace!(%name, "read before initialization");
                    }
                }
            }
        }
    }
}
