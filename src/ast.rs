//! Syntax node model for the generated program text.
//!
//! Nodes form an immutable-once-built tree: a parent exclusively owns its
//! children and nothing is shared or mutated after attachment. Every node
//! renders itself to text; container bodies additionally get the statement
//! terminator rule and a four-space indent. Rendering is pure -- it depends
//! only on the node's own fields and, recursively, on its children.
//!
//! Branch clauses are the one deliberate exception to "everything renders":
//! a clause only knows its condition and body, not whether it prints as
//! `if`, `else if`, or `else`, so rendering a bare clause is an error.

use crate::error::Error;

/// Number of spaces per indentation level.
const INDENT_WIDTH: usize = 4;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One element of a generated program tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An `#include <path>` directive.
    Include { path: String },
    /// A `#define NAME value` constant macro.
    Define { name: String, value: Box<Node> },
    /// A function definition.
    Function(Function),
    /// A local variable declaration, with an optional initializer.
    VarDecl {
        ty: String,
        name: String,
        init: Option<Box<Node>>,
    },
    /// An if / else-if / else group.
    Branch(Box<Branch>),
    /// A conditional clause outside its group. Not renderable.
    IfClause(Box<Clause>),
    /// An else clause outside its group. Not renderable.
    ElseClause(ElseClause),
    /// A binary operation, rendered `lhs op rhs` without parentheses.
    Binary {
        lhs: Box<Node>,
        op: String,
        rhs: Box<Node>,
    },
    /// A call to a (virtual, never-defined) function.
    Call { name: String, args: Vec<Node> },
    /// A pointer dereference.
    Deref(Box<Node>),
    /// An address-of expression.
    AddrOf(Box<Node>),
    /// A return statement.
    Return(Box<Node>),
    /// A literal token or identifier, kept as an opaque string.
    Atom(String),
    /// An empty line separating declarations.
    Spacer,
}

/// A function definition: signature plus statement body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Node>,
}

/// A single `type name` function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

/// A condition/body pair; the first clause of a group prints as `if`,
/// the rest as `else if`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub condition: Node,
    pub body: Vec<Node>,
}

/// The trailing, condition-less clause of a branch group.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    pub body: Vec<Node>,
}

/// A whole if / else-if / else construct. Only the group is renderable;
/// its clauses have no standalone textual form.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub if_clause: Clause,
    pub else_if_clauses: Vec<Clause>,
    pub else_clause: Option<ElseClause>,
}

/// The root of a generated program: an ordered sequence of top-level nodes.
///
/// Top-level items are joined with newlines verbatim -- no terminators, no
/// indentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Node>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

impl Node {
    /// Render this node to its textual form.
    pub fn render(&self) -> Result<String, Error> {
        match self {
            Node::Include { path } => Ok(format!("#include <{path}>")),
            Node::Define { name, value } => {
                Ok(format!("#define {name} {}", value.render()?))
            }
            Node::Function(function) => function.render(),
            Node::VarDecl { ty, name, init } => match init {
                Some(expr) => Ok(format!("{ty} {name} = {}", expr.render()?)),
                None => Ok(format!("{ty} {name}")),
            },
            Node::Branch(branch) => branch.render(),
            Node::IfClause(_) | Node::ElseClause(_) => Err(Error::InvalidRenderContext),
            Node::Binary { lhs, op, rhs } => {
                Ok(format!("{} {op} {}", lhs.render()?, rhs.render()?))
            }
            Node::Call { name, args } => {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    rendered.push(arg.render()?);
                }
                Ok(format!("{name}({})", rendered.join(", ")))
            }
            Node::Deref(target) => Ok(format!("*{}", wrap_compound(target)?)),
            Node::AddrOf(target) => Ok(format!("&{}", wrap_compound(target)?)),
            Node::Return(value) => Ok(format!("return {}", value.render()?)),
            Node::Atom(value) => Ok(value.clone()),
            Node::Spacer => Ok(String::new()),
        }
    }
}

impl Program {
    /// Render the whole program: top-level items joined with newlines.
    pub fn render(&self) -> Result<String, Error> {
        let mut parts = Vec::with_capacity(self.items.len());
        for item in &self.items {
            parts.push(item.render()?);
        }
        Ok(parts.join("\n"))
    }
}

impl Function {
    fn render(&self) -> Result<String, Error> {
        let parameters: Vec<String> = self.parameters.iter().map(Parameter::render).collect();
        Ok(format!(
            "{} {} ({}) {{\n{}\n}}",
            self.return_type,
            self.name,
            parameters.join(", "),
            render_block(&self.body)?
        ))
    }
}

impl Parameter {
    fn render(&self) -> String {
        format!("{} {}", self.ty, self.name)
    }
}

impl Branch {
    fn render(&self) -> Result<String, Error> {
        let mut out = format!(
            "if ({}) {{\n{}\n}}",
            self.if_clause.condition.render()?,
            render_block(&self.if_clause.body)?
        );
        for clause in &self.else_if_clauses {
            out.push_str(&format!(
                " else if ({}) {{\n{}\n}}",
                clause.condition.render()?,
                render_block(&clause.body)?
            ));
        }
        if let Some(else_clause) = &self.else_clause {
            out.push_str(&format!(
                " else {{\n{}\n}}",
                render_block(&else_clause.body)?
            ));
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Block helpers
// ---------------------------------------------------------------------------

/// Render a container body: children joined with newlines, every line given a
/// statement terminator where one belongs, the whole block indented one level.
fn render_block(body: &[Node]) -> Result<String, Error> {
    let mut rendered = Vec::with_capacity(body.len());
    for node in body {
        rendered.push(node.render()?);
    }
    Ok(indent(&terminate(&rendered.join("\n"))))
}

/// Append `;` to each line unless it is blank or already ends with `{`, `}`,
/// `,`, or `;`. Blank separators stay blank, block openers/closers stay
/// untouched, and already-terminated lines are never double-terminated.
fn terminate(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() || line.ends_with(['{', '}', ',', ';']) {
                line.to_string()
            } else {
                format!("{line};")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent every line (blank ones included) by one level.
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{line}", " ".repeat(INDENT_WIDTH)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a dereference/address-of target with minimal parenthesization:
/// a single atomic token needs none, any compound target gets wrapped.
fn wrap_compound(target: &Node) -> Result<String, Error> {
    match target {
        Node::Atom(_) => target.render(),
        _ => Ok(format!("({})", target.render()?)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
