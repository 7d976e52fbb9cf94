//! Variable environments and evaluation contexts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::diagnostic::Frame;
use crate::token::Position;
use crate::value::{Number, Value};

/// Shared handle to a symbol table. Callers keep one alive across
/// `run` calls to persist variables between inputs.
pub type Environment = Rc<RefCell<SymbolTable>>;

/// Mapping from variable name to value, chained to an optional parent
/// scope for lookups.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Value>,
    parent: Option<Environment>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nested scope whose lookups fall back to `parent`.
    #[must_use]
    pub fn with_parent(parent: Environment) -> Self {
        Self {
            symbols: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Top-level environment, seeded with `null = 0`.
    #[must_use]
    pub fn global() -> Environment {
        let mut table = Self::new();
        table.set("null", Value::new(Number::Int(0)));
        Rc::new(RefCell::new(table))
    }

    /// Look `name` up here, then in each parent in turn. Returns a
    /// copy, so stamping the result never touches the stored binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.symbols.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|p| p.borrow().get(name)),
        }
    }

    /// Bind `name` in this scope, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    /// Remove `name` from this scope only.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.symbols.remove(name)
    }

    /// Whether `name` resolves here or in any parent.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|p| p.borrow().contains(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Frame of evaluation used for tracebacks. A child borrows its
/// parent, so a context never outlives the context that created it.
#[derive(Debug)]
pub struct Context<'a> {
    pub display_name: String,
    pub parent: Option<&'a Context<'a>>,
    /// Position in the parent at which this context was entered.
    pub entry: Option<Position>,
    pub symbols: Environment,
}

impl<'a> Context<'a> {
    #[must_use]
    pub fn new(display_name: impl Into<String>, symbols: Environment) -> Self {
        Self {
            display_name: display_name.into(),
            parent: None,
            entry: None,
            symbols,
        }
    }

    /// Context entered from `parent` at `entry`, with a fresh scope
    /// chained to the parent's.
    #[must_use]
    pub fn child(parent: &'a Context<'a>, display_name: impl Into<String>, entry: Position) -> Self {
        let symbols = Rc::new(RefCell::new(SymbolTable::with_parent(Rc::clone(
            &parent.symbols,
        ))));
        Self {
            display_name: display_name.into(),
            parent: Some(parent),
            entry: Some(entry),
            symbols,
        }
    }

    /// Frames from this context outward. The innermost frame is at
    /// `start`; each ancestor is at the position its child was
    /// entered from. The walk ends at a context with no parent.
    #[must_use]
    pub fn traceback(&self, start: &Position) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut position = start.clone();
        let mut context = Some(self);

        while let Some(ctx) = context {
            frames.push(Frame {
                name: ctx.display_name.clone(),
                position: position.clone(),
            });
            match (&ctx.entry, ctx.parent) {
                (Some(entry), Some(parent)) => {
                    position = entry.clone();
                    context = Some(parent);
                }
                _ => context = None,
            }
        }

        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Source;

    #[test]
    fn global_has_null() {
        let env = SymbolTable::global();
        let null = env.borrow().get("null").expect("null is seeded");
        assert_eq!(null.number, Number::Int(0));
    }

    #[test]
    fn lookup_chains_to_parent() {
        let global = SymbolTable::global();
        global.borrow_mut().set("x", Value::new(Number::Int(1)));

        let mut local = SymbolTable::with_parent(Rc::clone(&global));
        assert_eq!(local.get("x").map(|v| v.number), Some(Number::Int(1)));
        assert!(local.contains("null"));

        local.set("x", Value::new(Number::Int(2)));
        assert_eq!(local.get("x").map(|v| v.number), Some(Number::Int(2)));
        assert_eq!(
            global.borrow().get("x").map(|v| v.number),
            Some(Number::Int(1))
        );

        assert!(local.remove("x").is_some());
        assert_eq!(local.get("x").map(|v| v.number), Some(Number::Int(1)));
    }

    #[test]
    fn child_scope_starts_empty() {
        let global = SymbolTable::global();
        assert_eq!(global.borrow().len(), 1);

        let mut local = SymbolTable::with_parent(Rc::clone(&global));
        assert!(local.is_empty());
        local.set("y", Value::new(Number::Int(3)));
        assert_eq!(local.len(), 1);
        assert_eq!(global.borrow().len(), 1);
    }

    #[test]
    fn traceback_walks_outward() {
        let source = Source::new("<test>", "a\nb\nc");
        let mut entry = Position::start(Rc::clone(&source));
        entry.advance('a');
        entry.advance('\n');
        let mut error_at = entry.clone();
        error_at.advance('b');
        error_at.advance('\n');

        let root = Context::new("<program>", SymbolTable::global());
        let inner = Context::child(&root, "inner", entry);
        let frames = inner.traceback(&error_at);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].name, "inner");
        assert_eq!(frames[0].position.line, 2);
        assert_eq!(frames[1].name, "<program>");
        assert_eq!(frames[1].position.line, 1);
    }
}
