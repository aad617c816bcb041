//! Passes that can be looked up by name and run over every procedure of a module.

use std::io::Write;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::{
    checker::InitializationChecker,
    error::Error,
    fixer::NullFixer,
    ir::{Module, Procedure},
};

/// Something run once per procedure.
///
/// A fresh instance is created for every procedure, so no state carries over
/// from one procedure to the next.
pub trait ProcedurePass {
    /// Runs the pass, writing any findings to `diagnostics`.
    /// Returns whether `procedure` was modified.
    fn run(&mut self, procedure: &mut Procedure, diagnostics: &mut dyn Write) -> std::io::Result<bool>;
}

impl ProcedurePass for InitializationChecker {
    fn run(&mut self, procedure: &mut Procedure, diagnostics: &mut dyn Write) -> std::io::Result<bool> {
        for name in self.run_on(procedure) {
            writeln!(diagnostics, "{name}")?;
        }
        Ok(false)
    }
}

impl ProcedurePass for NullFixer {
    fn run(&mut self, procedure: &mut Procedure, _diagnostics: &mut dyn Write) -> std::io::Result<bool> {
        Ok(self.fix(procedure))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Only inspects procedures.
    Analysis,
    /// May rewrite procedures.
    Transform,
}

pub struct PassInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: PassKind,
    create: fn() -> Box<dyn ProcedurePass>,
}

impl PassInfo {
    pub fn create(&self) -> Box<dyn ProcedurePass> {
        (self.create)()
    }
}

impl std::fmt::Debug for PassInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassInfo")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("kind", &self.kind)
            .finish()
    }
}

static PASSES: Lazy<Vec<PassInfo>> = Lazy::new(|| {
    vec![
        PassInfo {
            name: "def-pass",
            description: "Reaching definitions pass",
            kind: PassKind::Analysis,
            create: || Box::new(InitializationChecker::new()),
        },
        PassInfo {
            name: "fix-pass",
            description: "Fixing initialization pass",
            kind: PassKind::Transform,
            create: || Box::new(NullFixer),
        },
    ]
});

/// All registered passes, in registration order.
pub fn passes() -> &'static [PassInfo] {
    &PASSES
}

pub fn lookup(name: &str) -> Result<&'static PassInfo, Error> {
    passes()
        .iter()
        .find(|pass| pass.name == name)
        .ok_or_else(|| Error::UnknownPass {
            name: name.to_string(),
        })
}

/// Runs `info`'s pass over every procedure of `module`, in order.
/// Returns whether any procedure was modified.
pub fn run_pass(info: &PassInfo, module: &mut Module, diagnostics: &mut dyn Write) -> Result<bool, Error> {
    let mut modified = false;
    for procedure in &mut module.procedures {
        debug!(pass = info.name, procedure = %procedure.name, "running pass");
        modified |= info.create().run(procedure, diagnostics)?;
    }
    Ok(modified)
}
