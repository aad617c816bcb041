//! In-memory representation of the procedures the passes run over.
//!
//! Values are identified purely by their textual name. Two distinct variables
//! sharing a name are the same variable as far as this representation is concerned.

use std::fmt;

/// Textual identifier of a value, block or procedure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name(name.to_string())
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Name(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All procedures of one IR source file, in the order they were written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub procedures: Vec<Procedure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: Name,
    /// Blocks in storage order, which is not necessarily an execution order.
    pub blocks: Vec<Block>,
}

impl Procedure {
    pub fn new(name: impl Into<Name>, blocks: Vec<Block>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }

    /// Iterates over every instruction, block by block.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.blocks.iter().flat_map(|block| block.instructions.iter())
    }
}

/// A straight-line sequence of instructions.
///
/// Control flow between blocks is only visible through the label operands of
/// branching instructions; blocks carry no explicit edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// `None` for the instructions written before the first label of a procedure.
    pub label: Option<Name>,
    pub instructions: Vec<Instruction>,
}

impl Block {
    pub fn new(label: impl Into<Name>, instructions: Vec<Instruction>) -> Self {
        Self {
            label: Some(label.into()),
            instructions,
        }
    }

    pub fn unlabeled(instructions: Vec<Instruction>) -> Self {
        Self {
            label: None,
            instructions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `%name = alloca`
    Allocate { name: Name },

    /// `store value, target`
    Store { value: Operand, target: Operand },

    /// `%result = opcode op1, op2, ...`, or without a result.
    Generic {
        result: Option<Name>,
        opcode: String,
        operands: Vec<Operand>,
    },
}

impl Instruction {
    pub fn allocate(name: impl Into<Name>) -> Self {
        Self::Allocate { name: name.into() }
    }

    pub fn store(value: Operand, target: impl Into<Name>) -> Self {
        Self::Store {
            value,
            target: Operand::Local(target.into()),
        }
    }

    pub fn generic(opcode: &str, operands: Vec<Operand>) -> Self {
        Self::Generic {
            result: None,
            opcode: opcode.to_string(),
            operands,
        }
    }

    /// Builds an instruction from its textual parts, picking the kind from the opcode.
    pub fn from_parts(
        result: Option<Name>,
        opcode: &str,
        mut operands: Vec<Operand>,
    ) -> Result<Self, String> {
        match opcode {
            "alloca" => {
                let name = result.ok_or_else(|| "`alloca` must be assigned to a value".to_string())?;
                if !operands.is_empty() {
                    return Err(format!("`alloca` takes no operands, found {}", operands.len()));
                }
                Ok(Self::Allocate { name })
            }

            "store" => {
                if let Some(result) = result {
                    return Err(format!("`store` produces no value, but is assigned to %{result}"));
                }
                if operands.len() != 2 {
                    return Err(format!("`store` takes 2 operands, found {}", operands.len()));
                }
                let target = operands.pop();
                let value = operands.pop();
                match (value, target) {
                    (Some(value), Some(target)) => Ok(Self::Store { value, target }),
                    _ => Err("`store` takes 2 operands".to_string()),
                }
            }

            _ => Ok(Self::Generic {
                result,
                opcode: opcode.to_string(),
                operands,
            }),
        }
    }

    /// The value produced by this instruction, if it has a name.
    pub fn result(&self) -> Option<&Name> {
        match self {
            Self::Allocate { name } => Some(name),
            Self::Store { .. } => None,
            Self::Generic { result, .. } => result.as_ref(),
        }
    }

    /// Operands in index order. A store's value comes before its target.
    pub fn operands(&self) -> Vec<&Operand> {
        match self {
            Self::Allocate { .. } => vec![],
            Self::Store { value, target } => vec![value, target],
            Self::Generic { operands, .. } => operands.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// `%name`
    Local(Name),
    /// `@name`
    Global(Name),
    /// `label %name`
    Label(Name),
    Const(i64),
}

impl Operand {
    pub fn local(name: &str) -> Self {
        Self::Local(Name::from(name))
    }

    /// The identifier this operand refers to. Constants have none.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::Local(name) | Self::Global(name) | Self::Label(name) => Some(name),
            Self::Const(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(name) => write!(f, "%{name}"),
            Self::Global(name) => write!(f, "@{name}"),
            Self::Label(name) => write!(f, "label %{name}"),
            Self::Const(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = self.result() {
            write!(f, "%{result} = ")?;
        }
        let opcode = match self {
            Self::Allocate { .. } => "alloca",
            Self::Store { .. } => "store",
            Self::Generic { opcode, .. } => opcode.as_str(),
        };
        f.write_str(opcode)?;
        for (index, operand) in self.operands().into_iter().enumerate() {
            let separator = if index == 0 { " " } else { ", " };
            write!(f, "{separator}{operand}")?;
        }
        Ok(())
    }
}
