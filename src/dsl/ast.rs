//! Abstract Syntax Tree types for the module-list DSL.

/// Complete AST representation of a parsed module list.
#[derive(Debug, Clone, Default)]
pub struct NetworkAst {
    /// Module definitions in declaration order
    pub modules: Vec<ModuleDef>,
}

impl NetworkAst {
    /// Create a new empty AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a module definition by name.
    pub fn find(&self, name: &str) -> Option<&ModuleDef> {
        self.modules.iter().find(|m| m.name == name)
    }
}

/// A single `[prefix]<name> -> <targets>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDef {
    /// Module behavior, selected by the line prefix
    pub kind: ModuleKind,
    /// Module name
    pub name: String,
    /// Target names in the order they were written
    pub targets: Vec<String>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Module behaviors supported by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Unprefixed `broadcaster`: forwards every pulse unchanged
    Relay,
    /// `%` flip-flop: toggles on low pulses
    Toggle,
    /// `&` conjunction: NAND of remembered inputs
    Gate,
}

impl ModuleKind {
    /// Map a prefix character to its module kind.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            '%' => Some(Self::Toggle),
            '&' => Some(Self::Gate),
            _ => None,
        }
    }
}
