//! Recursive randomized program generation.
//!
//! [`CodeGenerator`] owns the tunable parameters, the word lists, and the
//! random source. Everything that is scoped to a single `random_program()`
//! call -- visible constant names, the current function's locals and
//! arguments, the invented external-function pool -- lives in a [`Session`]
//! created fresh per call, so back-to-back calls are independent and separate
//! generator instances share nothing.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::ast::{Branch, Clause, ElseClause, Function, Node, Parameter, Program};
use crate::error::Error;
use crate::sampler::Sampler;
use crate::words;

// ---------------------------------------------------------------------------
// Fixed vocabulary
// ---------------------------------------------------------------------------

/// Primitive C type keywords offered alongside the synthetic struct-like type.
const NATIVE_TYPES: &[&str] = &["void", "int", "char", "bool", "long", "unsigned int"];

/// Operators for conditions and for nested boolean sub-expressions.
const COMPARISON_OPS: &[&str] = &["<", ">", "<=", ">=", "==", "!="];

/// Operators for a boolean expression at the top nesting level. Nested
/// boolean sub-expressions stick to comparisons: `a >= (b && c)` reads as
/// nonsense even where the syntax would pass.
const CONDITION_OPS: &[&str] = &["<", ">", ">=", "<=", "==", "!=", "||", "&&"];

/// Operators for value expressions.
const ARITHMETIC_OPS: &[&str] = &["+", "-", "*"];

/// Functions emitted per program.
const FUNCTIONS_PER_PROGRAM: usize = 10;

/// Size of the invented external-function pool. These are referenced from
/// call expressions but never defined anywhere, as though declared in an
/// unseen header.
const EXTERNAL_POOL_SIZE: usize = 16;

// ---------------------------------------------------------------------------
// GenParams
// ---------------------------------------------------------------------------

/// Tunable generation parameters.
///
/// Ranges are inclusive `(min, max)` pairs; chances are probabilities in
/// `0.0..=1.0`. Out-of-range values (a negative chance, `min > max`) are not
/// validated. Profile TOML files only need to name the fields they change;
/// everything else inherits the `Default` impl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenParams {
    /// Fraction of declared types promoted to pointer types.
    pub pointer_ratio: f64,
    /// Stop growing an identifier once it reaches this length.
    pub max_name_length: usize,
    /// Chance of appending one more `_`-joined term to an identifier.
    pub name_add_chance: f64,
    /// Stop growing a constant name once it reaches this length.
    pub max_const_length: usize,
    /// Chance of appending one more `_`-joined term to a constant name.
    pub const_add_chance: f64,
    /// Parameters per function, and arity of invented external functions.
    pub num_args_range: (usize, usize),
    /// Local variable declarations per function.
    pub local_vars_range: (usize, usize),
    /// Constant macros per program; also the include-directive count.
    pub global_vars_range: (usize, usize),
    /// Chance that an atomic expression is a literal rather than a name.
    pub literal_chance: f64,
    /// Condition/body clause pairs per branch group.
    pub branch_conditions_range: (usize, usize),
    /// Chance that a branch group gains a trailing else clause.
    pub else_chance: f64,
    /// Nesting limit for expression generation.
    pub expr_max_depth: usize,
    /// Chance that expression generation terminates with an atomic node.
    pub atomic_chance: f64,
    /// Nesting limit for control-flow blocks.
    pub max_depth: usize,
    /// Statements per generated body.
    pub body_fill_range: (usize, usize),
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            pointer_ratio: 0.5,
            max_name_length: 24,
            name_add_chance: 0.3,
            max_const_length: 16,
            const_add_chance: 0.3,
            num_args_range: (1, 4),
            local_vars_range: (0, 5),
            global_vars_range: (4, 16),
            literal_chance: 0.3,
            branch_conditions_range: (1, 3),
            else_chance: 0.5,
            expr_max_depth: 2,
            atomic_chance: 0.5,
            max_depth: 2,
            body_fill_range: (1, 5),
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// An invented, never-rendered call target: a name and how many arguments a
/// call to it must supply.
#[derive(Debug, Clone)]
struct ExternalFn {
    name: String,
    arity: usize,
}

/// Per-generation-call state. Reset wholesale by `random_program()`; the
/// locals and args are additionally reset per function.
#[derive(Debug, Default)]
struct Session {
    /// Constant-macro names declared so far, visible everywhere.
    globals: Vec<String>,
    /// Local variable names of the function currently being built.
    locals: Vec<String>,
    /// Parameter names of the function currently being built.
    args: Vec<String>,
    /// The external-function pool, filled once per program.
    externals: Vec<ExternalFn>,
}

impl Session {
    /// Every name an expression may reference.
    fn usable_symbols(&self) -> Vec<String> {
        let mut symbols =
            Vec::with_capacity(self.globals.len() + self.locals.len() + self.args.len());
        symbols.extend_from_slice(&self.globals);
        symbols.extend_from_slice(&self.locals);
        symbols.extend_from_slice(&self.args);
        symbols
    }

    /// Names an assignment may target: locals and parameters only.
    fn local_symbols(&self) -> Vec<String> {
        let mut symbols = Vec::with_capacity(self.locals.len() + self.args.len());
        symbols.extend_from_slice(&self.locals);
        symbols.extend_from_slice(&self.args);
        symbols
    }
}

/// Statement kinds offered to the body sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StmtKind {
    Assignment,
    Return,
    Branch,
}

/// Expression shapes offered once generation decides not to stay atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprKind {
    Binary,
    Call,
    Deref,
    AddrOf,
}

// ---------------------------------------------------------------------------
// CodeGenerator
// ---------------------------------------------------------------------------

/// Randomized fake-program generator.
///
/// The random source is injectable: [`seeded`](CodeGenerator::seeded) gives
/// reproducible output, [`with_rng`](CodeGenerator::with_rng) accepts any
/// [`Rng`] for tests or embedding.
pub struct CodeGenerator<R = StdRng> {
    params: GenParams,
    var_terms: Vec<String>,
    const_terms: Vec<String>,
    rng: R,
}

impl CodeGenerator<StdRng> {
    /// Create a generator seeded from OS entropy, with the built-in word
    /// lists.
    pub fn new(params: GenParams) -> Self {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Create a deterministic generator: the same seed, parameters, and word
    /// lists always produce the same programs.
    pub fn seeded(params: GenParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CodeGenerator<R> {
    /// Create a generator over an arbitrary random source.
    pub fn with_rng(params: GenParams, rng: R) -> Self {
        Self {
            params,
            var_terms: words::VAR_TERMS.iter().map(|t| t.to_string()).collect(),
            const_terms: words::CONST_TERMS.iter().map(|t| t.to_string()).collect(),
            rng,
        }
    }

    /// Replace the built-in word lists. The lists are opaque; the only
    /// requirement is that each contains at least one term that does not
    /// start with a digit.
    pub fn with_wordlists(mut self, var_terms: Vec<String>, const_terms: Vec<String>) -> Self {
        self.var_terms = var_terms;
        self.const_terms = const_terms;
        self
    }

    /// The parameters this generator was built with.
    pub fn params(&self) -> &GenParams {
        &self.params
    }

    // -- Public generation entry points -------------------------------------

    /// Generate one whole fake program.
    pub fn random_program(&mut self) -> Result<Program, Error> {
        let mut session = Session::default();
        let mut items = Vec::new();

        for _ in 0..self.rand_in(self.params.global_vars_range) {
            let path = format!("{}.h", self.random_name()?);
            items.push(Node::Include { path });
        }
        items.push(Node::Spacer);

        for _ in 0..EXTERNAL_POOL_SIZE {
            session.externals.push(ExternalFn {
                name: self.random_name()?,
                arity: self.rand_in(self.params.num_args_range),
            });
        }

        for _ in 0..self.rand_in(self.params.global_vars_range) {
            let name = self.random_const_name()?;
            session.globals.push(name.clone());
            items.push(Node::Define {
                name,
                value: Box::new(Node::Atom(self.random_literal())),
            });
        }
        items.push(Node::Spacer);

        for _ in 0..FUNCTIONS_PER_PROGRAM {
            items.push(self.random_function(&mut session)?);
            items.push(Node::Spacer);
        }

        Ok(Program { items })
    }

    /// Generate one identifier, usable on its own (e.g. as a fake file name).
    pub fn random_name(&mut self) -> Result<String, Error> {
        grow_name(
            &mut self.rng,
            &self.var_terms,
            self.params.max_name_length,
            self.params.name_add_chance,
        )
    }

    /// Generate one constant-macro name.
    pub fn random_const_name(&mut self) -> Result<String, Error> {
        grow_name(
            &mut self.rng,
            &self.const_terms,
            self.params.max_const_length,
            self.params.const_add_chance,
        )
    }

    // -- Types and literals --------------------------------------------------

    /// Pick a type: one of the primitives, or (at double weight) a synthetic
    /// struct-like type drawn from the variable word list; either may then be
    /// promoted to a pointer type.
    fn random_type(&mut self) -> Result<String, Error> {
        let mut sampler = Sampler::new();
        for ty in NATIVE_TYPES {
            sampler.add((*ty).to_string());
        }
        let synthetic = self
            .var_terms
            .choose(&mut self.rng)
            .ok_or(Error::EmptySampler)?
            .clone();
        sampler.add_weighted(synthetic, 2.0);

        let mut ty = sampler.sample(&mut self.rng)?.clone();
        if self.rng.gen_bool(self.params.pointer_ratio) {
            ty.push('*');
        }
        Ok(ty)
    }

    /// A decimal byte-sized integer, or a `0x`-prefixed token of 1-4 bytes,
    /// each zero-padded to two uppercase hex digits.
    fn random_literal(&mut self) -> String {
        if self.rng.gen_bool(0.5) {
            self.rng.gen_range(0..=255u32).to_string()
        } else {
            let mut hex = String::from("0x");
            for _ in 0..self.rng.gen_range(1..=4) {
                let byte: u8 = self.rng.gen_range(0..=255);
                hex.push_str(&format!("{byte:02X}"));
            }
            hex
        }
    }

    // -- Expressions ---------------------------------------------------------

    /// An atomic expression: a literal (when allowed, with probability
    /// `literal_chance`) or a name from the visible symbol set.
    fn random_atom(&mut self, visible: &[String]) -> Result<Node, Error> {
        if self.rng.gen_bool(self.params.literal_chance) {
            Ok(Node::Atom(self.random_literal()))
        } else {
            self.name_atom(visible)
        }
    }

    /// A name reference drawn from `names`, or a freshly generated name when
    /// nothing is visible.
    fn name_atom(&mut self, names: &[String]) -> Result<Node, Error> {
        match names.choose(&mut self.rng) {
            Some(name) => Ok(Node::Atom(name.clone())),
            None => Ok(Node::Atom(self.random_name()?)),
        }
    }

    /// Recursively build an expression such as `(a - foo(b)) * 4`.
    ///
    /// Termination is forced at `expr_max_depth` (except for a boolean
    /// expression at depth 0, which must still produce an operator);
    /// otherwise the tree expands into a binary op, a call into the external
    /// pool, a dereference, or an address-of. Dereference and address-of
    /// forbid literals in their immediate target: you cannot take `&200`.
    fn random_expression(
        &mut self,
        session: &Session,
        depth: usize,
        boolean: bool,
        allow_literals: bool,
    ) -> Result<Node, Error> {
        let forced_atomic =
            depth >= self.params.expr_max_depth && !(boolean && depth == 0);
        if self.rng.gen_bool(self.params.atomic_chance) || forced_atomic {
            let visible = session.usable_symbols();
            return if allow_literals {
                self.random_atom(&visible)
            } else {
                self.name_atom(&visible)
            };
        }

        let mut kinds = Sampler::new();
        kinds
            .add(ExprKind::Binary)
            .add(ExprKind::Call)
            .add(ExprKind::Deref)
            .add(ExprKind::AddrOf);

        match *kinds.sample(&mut self.rng)? {
            ExprKind::Binary => {
                let ops: &[&str] = if boolean {
                    if depth > 0 { COMPARISON_OPS } else { CONDITION_OPS }
                } else {
                    ARITHMETIC_OPS
                };
                let op = (*ops.choose(&mut self.rng).ok_or(Error::EmptySampler)?).to_string();
                Ok(Node::Binary {
                    lhs: Box::new(self.random_expression(session, depth + 1, boolean, true)?),
                    op,
                    rhs: Box::new(self.random_expression(session, depth + 1, boolean, true)?),
                })
            }
            ExprKind::Call => {
                let external = session
                    .externals
                    .choose(&mut self.rng)
                    .ok_or(Error::EmptySampler)?
                    .clone();
                let mut args = Vec::with_capacity(external.arity);
                for _ in 0..external.arity {
                    args.push(self.random_expression(session, depth + 1, boolean, true)?);
                }
                Ok(Node::Call {
                    name: external.name,
                    args,
                })
            }
            ExprKind::Deref => Ok(Node::Deref(Box::new(self.random_expression(
                session,
                depth + 1,
                boolean,
                false,
            )?))),
            ExprKind::AddrOf => Ok(Node::AddrOf(Box::new(self.random_expression(
                session,
                depth + 1,
                boolean,
                false,
            )?))),
        }
    }

    /// Exactly one comparison over two sub-expressions.
    ///
    /// Policy, kept as documented: the left operand may contain numeric
    /// literals, the right may not.
    fn random_condition(&mut self, session: &Session) -> Result<Node, Error> {
        let op = (*COMPARISON_OPS
            .choose(&mut self.rng)
            .ok_or(Error::EmptySampler)?)
        .to_string();
        Ok(Node::Binary {
            lhs: Box::new(self.random_expression(session, 0, false, true)?),
            op,
            rhs: Box::new(self.random_expression(session, 0, false, false)?),
        })
    }

    // -- Statements and bodies -----------------------------------------------

    /// Fill one body with weighted-chosen statements. A sampled return ends
    /// the body early; no statement may follow it.
    fn random_body(&mut self, session: &Session, depth: usize) -> Result<Vec<Node>, Error> {
        let mut body = Vec::new();
        for _ in 0..self.rand_in(self.params.body_fill_range) {
            let mut kinds = Sampler::new();
            kinds
                .add(StmtKind::Assignment)
                .add_weighted(StmtKind::Return, 0.5);
            if depth < self.params.max_depth {
                kinds.add(StmtKind::Branch);
            }
            let kind = *kinds.sample(&mut self.rng)?;
            body.push(self.random_statement(session, kind, depth)?);
            if kind == StmtKind::Return {
                break;
            }
        }
        Ok(body)
    }

    fn random_statement(
        &mut self,
        session: &Session,
        kind: StmtKind,
        depth: usize,
    ) -> Result<Node, Error> {
        match kind {
            StmtKind::Assignment => {
                let targets = session.local_symbols();
                let target = self.name_atom(&targets)?;
                let lhs = if self.rng.gen_bool(0.6) {
                    target
                } else {
                    Node::Deref(Box::new(target))
                };
                let mut ops = Sampler::new();
                ops.add_weighted("=", 3.0).add("+=");
                let op = (*ops.sample(&mut self.rng)?).to_string();
                Ok(Node::Binary {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(self.random_expression(session, 0, false, true)?),
                })
            }
            StmtKind::Return => Ok(Node::Return(Box::new(
                self.random_expression(session, 0, false, true)?,
            ))),
            StmtKind::Branch => {
                let clause_count = self.rand_in(self.params.branch_conditions_range).max(1);
                let mut clauses = Vec::with_capacity(clause_count);
                for _ in 0..clause_count {
                    clauses.push(Clause {
                        condition: self.random_condition(session)?,
                        body: self.random_body(session, depth + 1)?,
                    });
                }
                let if_clause = clauses.remove(0);
                let else_clause = if self.rng.gen_bool(self.params.else_chance) {
                    Some(ElseClause {
                        body: self.random_body(session, depth + 1)?,
                    })
                } else {
                    None
                };
                Ok(Node::Branch(Box::new(Branch {
                    if_clause,
                    else_if_clauses: clauses,
                    else_clause,
                })))
            }
        }
    }

    // -- Functions -----------------------------------------------------------

    /// One function: signature, local declarations (plus a separating blank
    /// line when any exist), then a statement body over the combined visible
    /// symbol set.
    fn random_function(&mut self, session: &mut Session) -> Result<Node, Error> {
        let return_type = self.random_type()?;
        let name = self.random_name()?;

        session.args.clear();
        let mut parameters = Vec::new();
        for _ in 0..self.rand_in(self.params.num_args_range) {
            let param_name = self.random_name()?;
            parameters.push(Parameter {
                ty: self.random_type()?,
                name: param_name.clone(),
            });
            session.args.push(param_name);
        }

        session.locals.clear();
        let mut body = Vec::new();
        for _ in 0..self.rand_in(self.params.local_vars_range) {
            let ty = self.random_type()?;
            let var_name = self.random_name()?;
            body.push(Node::VarDecl {
                ty,
                name: var_name.clone(),
                init: None,
            });
            session.locals.push(var_name);
        }
        if !session.locals.is_empty() {
            body.push(Node::Spacer);
        }

        body.extend(self.random_body(session, 0)?);

        Ok(Node::Function(Function {
            return_type,
            name,
            parameters,
            body,
        }))
    }

    // -- Helpers -------------------------------------------------------------

    /// Uniform draw from an inclusive `(min, max)` range.
    fn rand_in(&mut self, (min, max): (usize, usize)) -> usize {
        self.rng.gen_range(min..=max)
    }
}

/// Build a multi-word identifier: draw a leading term (redrawing while it
/// starts with a digit), then append `_`-joined terms while the name is under
/// `max_length` and an `add_chance` coin comes up.
///
/// The list must contain at least one term that does not start with a digit;
/// an empty list is [`Error::EmptySampler`].
fn grow_name<R: Rng>(
    rng: &mut R,
    terms: &[String],
    max_length: usize,
    add_chance: f64,
) -> Result<String, Error> {
    let mut name = loop {
        let term = terms.choose(rng).ok_or(Error::EmptySampler)?;
        if !term.starts_with(|c: char| c.is_ascii_digit()) {
            break term.clone();
        }
    };
    while name.len() < max_length && rng.gen_bool(add_chance) {
        let term = terms.choose(rng).ok_or(Error::EmptySampler)?;
        name.push('_');
        name.push_str(term);
    }
    Ok(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> CodeGenerator {
        CodeGenerator::seeded(GenParams::default(), seed)
    }

    fn session_with_symbols() -> Session {
        Session {
            globals: vec!["PAGE_SIZE".to_string()],
            locals: vec!["cursor".to_string(), "tmp".to_string()],
            args: vec!["fd".to_string()],
            externals: vec![
                ExternalFn {
                    name: "sync_cache".to_string(),
                    arity: 2,
                },
                ExternalFn {
                    name: "probe_port".to_string(),
                    arity: 1,
                },
            ],
        }
    }

    /// Expression nesting depth: atoms are 0, every expansion adds one.
    fn expr_depth(node: &Node) -> usize {
        match node {
            Node::Atom(_) => 0,
            Node::Binary { lhs, rhs, .. } => 1 + expr_depth(lhs).max(expr_depth(rhs)),
            Node::Call { args, .. } => {
                1 + args.iter().map(expr_depth).max().unwrap_or(0)
            }
            Node::Deref(inner) | Node::AddrOf(inner) => 1 + expr_depth(inner),
            _ => 0,
        }
    }

    /// Collect every dereference/address-of target in an expression tree.
    fn pointer_targets<'n>(node: &'n Node, out: &mut Vec<&'n Node>) {
        match node {
            Node::Binary { lhs, rhs, .. } => {
                pointer_targets(lhs, out);
                pointer_targets(rhs, out);
            }
            Node::Call { args, .. } => {
                for arg in args {
                    pointer_targets(arg, out);
                }
            }
            Node::Deref(inner) | Node::AddrOf(inner) => {
                out.push(inner);
                pointer_targets(inner, out);
            }
            _ => {}
        }
    }

    // -- Names --------------------------------------------------------------

    #[test]
    fn names_never_start_with_a_digit() {
        let mut generator = generator(3);
        for _ in 0..200 {
            let name = generator.random_name().unwrap();
            assert!(!name.is_empty());
            assert!(
                !name.starts_with(|c: char| c.is_ascii_digit()),
                "name starts with digit: {name}"
            );
        }
    }

    #[test]
    fn digit_leading_terms_are_skipped() {
        let params = GenParams::default();
        let mut generator = CodeGenerator::seeded(params, 5).with_wordlists(
            vec!["9lives".to_string(), "cat".to_string()],
            vec!["MAX".to_string()],
        );
        for _ in 0..100 {
            let name = generator.random_name().unwrap();
            assert!(name.starts_with("cat"), "unexpected leading term: {name}");
        }
    }

    #[test]
    fn empty_word_list_is_an_empty_sampler() {
        let mut generator =
            CodeGenerator::seeded(GenParams::default(), 1).with_wordlists(vec![], vec![]);
        assert_eq!(generator.random_name(), Err(Error::EmptySampler));
        assert_eq!(generator.random_program(), Err(Error::EmptySampler));
    }

    #[test]
    fn name_growth_respects_the_length_budget() {
        let params = GenParams {
            name_add_chance: 1.0,
            max_name_length: 10,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 8);
        for _ in 0..50 {
            let name = generator.random_name().unwrap();
            // Growth stops at the first check past the budget, so one term
            // past the limit is the worst case.
            let last = name.rsplit('_').next().unwrap().len();
            assert!(name.len() <= 10 + 1 + last, "overgrown name: {name}");
        }
    }

    // -- Types --------------------------------------------------------------

    #[test]
    fn pointer_ratio_one_makes_everything_a_pointer() {
        let params = GenParams {
            pointer_ratio: 1.0,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 2);
        for _ in 0..50 {
            assert!(generator.random_type().unwrap().ends_with('*'));
        }
    }

    #[test]
    fn pointer_ratio_zero_makes_no_pointers() {
        let params = GenParams {
            pointer_ratio: 0.0,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 2);
        for _ in 0..50 {
            assert!(!generator.random_type().unwrap().ends_with('*'));
        }
    }

    // -- Literals -----------------------------------------------------------

    #[test]
    fn literals_are_decimal_bytes_or_padded_hex() {
        let mut generator = generator(4);
        for _ in 0..200 {
            let literal = generator.random_literal();
            if let Some(hex) = literal.strip_prefix("0x") {
                assert!(hex.len() % 2 == 0 && (2..=8).contains(&hex.len()), "{literal}");
                assert!(
                    hex.chars()
                        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()),
                    "{literal}"
                );
            } else {
                let value: u32 = literal.parse().expect("decimal literal");
                assert!(value <= 255);
            }
        }
    }

    // -- Expressions --------------------------------------------------------

    #[test]
    fn expressions_respect_the_depth_bound() {
        let params = GenParams {
            atomic_chance: 0.0,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 6);
        let session = session_with_symbols();
        for _ in 0..100 {
            let expr = generator.random_expression(&session, 0, false, true).unwrap();
            assert!(
                expr_depth(&expr) <= generator.params.expr_max_depth,
                "too deep: {expr:?}"
            );
        }
    }

    #[test]
    fn pointer_ops_never_target_literals() {
        let params = GenParams {
            atomic_chance: 0.2,
            literal_chance: 0.9,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 9);
        let session = session_with_symbols();
        for _ in 0..200 {
            let expr = generator.random_expression(&session, 0, false, true).unwrap();
            let mut targets = Vec::new();
            pointer_targets(&expr, &mut targets);
            for target in targets {
                if let Node::Atom(token) = target {
                    assert!(
                        !token.starts_with(|c: char| c.is_ascii_digit()),
                        "literal behind a pointer op: {token}"
                    );
                }
            }
        }
    }

    #[test]
    fn conditions_are_single_comparisons() {
        let mut generator = generator(12);
        let session = session_with_symbols();
        for _ in 0..100 {
            let condition = generator.random_condition(&session).unwrap();
            match condition {
                Node::Binary { op, .. } => {
                    assert!(COMPARISON_OPS.contains(&op.as_str()), "op: {op}")
                }
                other => panic!("condition is not a binary op: {other:?}"),
            }
        }
    }

    // -- Bodies -------------------------------------------------------------

    #[test]
    fn nothing_follows_a_return() {
        let params = GenParams {
            body_fill_range: (5, 5),
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 21);
        let session = session_with_symbols();
        for _ in 0..100 {
            let body = generator.random_body(&session, 0).unwrap();
            for (index, statement) in body.iter().enumerate() {
                if matches!(statement, Node::Return(_)) {
                    assert_eq!(index, body.len() - 1, "statement after return");
                }
            }
        }
    }

    #[test]
    fn body_length_stays_within_the_fill_range() {
        let mut generator = generator(22);
        let session = session_with_symbols();
        for _ in 0..100 {
            let body = generator.random_body(&session, 0).unwrap();
            assert!(!body.is_empty());
            assert!(body.len() <= generator.params.body_fill_range.1);
        }
    }

    #[test]
    fn branches_stop_at_max_depth() {
        let params = GenParams {
            max_depth: 0,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 23);
        let session = session_with_symbols();
        for _ in 0..100 {
            let body = generator.random_body(&session, 0).unwrap();
            assert!(
                !body.iter().any(|s| matches!(s, Node::Branch(_))),
                "branch generated at the depth cap"
            );
        }
    }

    #[test]
    fn else_chance_controls_the_trailing_clause() {
        let always = GenParams {
            else_chance: 1.0,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(always, 31);
        let session = session_with_symbols();
        for _ in 0..20 {
            match generator
                .random_statement(&session, StmtKind::Branch, 0)
                .unwrap()
            {
                Node::Branch(branch) => assert!(branch.else_clause.is_some()),
                other => panic!("expected a branch: {other:?}"),
            }
        }

        let never = GenParams {
            else_chance: 0.0,
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(never, 31);
        for _ in 0..20 {
            match generator
                .random_statement(&session, StmtKind::Branch, 0)
                .unwrap()
            {
                Node::Branch(branch) => assert!(branch.else_clause.is_none()),
                other => panic!("expected a branch: {other:?}"),
            }
        }
    }

    #[test]
    fn branch_clause_counts_stay_in_range() {
        let params = GenParams {
            branch_conditions_range: (2, 3),
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 33);
        let session = session_with_symbols();
        for _ in 0..50 {
            match generator
                .random_statement(&session, StmtKind::Branch, 0)
                .unwrap()
            {
                Node::Branch(branch) => {
                    let clauses = 1 + branch.else_if_clauses.len();
                    assert!((2..=3).contains(&clauses), "{clauses} clauses");
                }
                other => panic!("expected a branch: {other:?}"),
            }
        }
    }

    // -- Programs -----------------------------------------------------------

    #[test]
    fn programs_hold_exactly_ten_functions() {
        let mut generator = generator(40);
        let program = generator.random_program().unwrap();
        let functions = program
            .items
            .iter()
            .filter(|item| matches!(item, Node::Function(_)))
            .count();
        assert_eq!(functions, FUNCTIONS_PER_PROGRAM);
    }

    #[test]
    fn locals_get_a_separating_blank_line() {
        let params = GenParams {
            local_vars_range: (2, 2),
            ..GenParams::default()
        };
        let mut generator = CodeGenerator::seeded(params, 41);
        let mut session = Session::default();
        session.externals.push(ExternalFn {
            name: "noop".to_string(),
            arity: 1,
        });
        match generator.random_function(&mut session).unwrap() {
            Node::Function(function) => {
                assert!(matches!(function.body[0], Node::VarDecl { .. }));
                assert!(matches!(function.body[1], Node::VarDecl { .. }));
                assert_eq!(function.body[2], Node::Spacer);
            }
            other => panic!("expected a function: {other:?}"),
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let first = generator(99).random_program().unwrap().render().unwrap();
        let second = generator(99).random_program().unwrap().render().unwrap();
        assert_eq!(first, second);

        let other = generator(100).random_program().unwrap().render().unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn successive_calls_are_independent() {
        // Two fresh generators, one consumed twice: the second call must
        // still succeed and produce a full program (state fully reset).
        let mut generator = generator(55);
        let _ = generator.random_program().unwrap();
        let program = generator.random_program().unwrap();
        let functions = program
            .items
            .iter()
            .filter(|item| matches!(item, Node::Function(_)))
            .count();
        assert_eq!(functions, FUNCTIONS_PER_PROGRAM);
    }

    #[test]
    fn rendered_programs_balance_their_braces() {
        for seed in 0..10 {
            let text = generator(seed).random_program().unwrap().render().unwrap();
            assert_eq!(
                text.matches('{').count(),
                text.matches('}').count(),
                "seed {seed}"
            );
        }
    }
}
