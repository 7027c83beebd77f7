//! Command tree nodes
//!
//! A [`Command`] is a cheap handle to a node holding a name, flags, an
//! optional handler and its children. Parents own their children; children
//! keep only a weak reference back to their parent, set once.

mod parse;

use core::fmt;
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::error::{ExecError, ParseError, WireError};
use crate::flag::{Flag, FlagStore, FlagValue};
use parse::parse_flags;

/// What a command's parse failure does to the run
///
/// The root always stops the run on a failed parse and a help request
/// always diverts to usage. The policy decides what happens when a
/// subcommand's flags fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ErrorHandling {
    /// Stop the run with exit code 1
    #[default]
    ExitOnError,
    /// Log a warning and keep resolving with what is left
    ContinueOnError,
}

/// Signature of a command handler: the command being executed and a
/// snapshot of the root's flags
pub type Handler = dyn Fn(&Command, &FlagStore) -> Result<(), ExecError>;

struct Node {
    name: String,
    description: Option<String>,
    detail: Option<String>,
    error_handling: ErrorHandling,
    flags: FlagStore,
    args: Vec<String>,
    handler: Option<Rc<Handler>>,
    parent: Option<Weak<RefCell<Node>>>,
    children: Vec<Command>,
}

/// A named node of the command tree
///
/// Cloning a `Command` clones the handle, not the node.
///
/// # Example
/// ```
/// use kli::{Command, ErrorHandling};
///
/// let root = Command::new("cow", ErrorHandling::ExitOnError);
/// root.flag("eat", false, "informs the cow to eat");
///
/// let say = Command::new("say", ErrorHandling::ExitOnError);
/// say.flag("what", "mooooo", "what the cow will say");
/// root.set_children([say.clone()]).unwrap();
///
/// assert_eq!(say.parent().map(|p| p.name()), Some("cow".to_owned()));
/// assert!(root.set_children([say]).is_err());
/// ```
#[derive(Clone)]
pub struct Command {
    node: Rc<RefCell<Node>>,
}

impl Command {
    /// Create a detached command with no flags, handler or children
    #[must_use]
    pub fn new<S: Into<String>>(name: S, error_handling: ErrorHandling) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node {
                name: name.into(),
                description: None,
                detail: None,
                error_handling,
                flags: FlagStore::new(),
                args: Vec::new(),
                handler: None,
                parent: None,
                children: Vec::new(),
            })),
        }
    }

    // ==================== Declaration ====================

    /// Set the one-line description shown next to the name in usage
    #[inline]
    pub fn set_description<S: Into<String>>(&self, description: S) -> &Self {
        self.node.borrow_mut().description = Some(description.into());
        self
    }

    /// Set the long-form text shown under USAGE
    #[inline]
    pub fn set_detail<S: Into<String>>(&self, detail: S) -> &Self {
        self.node.borrow_mut().detail = Some(detail.into());
        self
    }

    /// Declare a flag on this command; the type of `default` fixes its kind
    pub fn flag<N, V, U>(&self, name: N, default: V, usage: U) -> &Self
    where
        N: Into<String>,
        V: Into<FlagValue>,
        U: Into<String>,
    {
        self.node.borrow_mut().flags.register(name, default, usage);
        self
    }

    /// Register the function run when this command is the execution target
    pub fn handler<F>(&self, handler: F) -> &Self
    where
        F: Fn(&Self, &FlagStore) -> Result<(), ExecError> + 'static,
    {
        self.node.borrow_mut().handler = Some(Rc::new(handler));
        self
    }

    /// Attach `children` beneath this command, in order
    ///
    /// Either every child is attached or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A child already has a parent, or is given twice
    /// - A child is this command or one of its ancestors
    pub fn set_children<I>(&self, children: I) -> Result<(), WireError>
    where
        I: IntoIterator<Item = Self>,
    {
        let children: Vec<Self> = children.into_iter().collect();

        for (position, child) in children.iter().enumerate() {
            if self.is_self_or_descendant_of(child) {
                return Err(WireError::Cycle {
                    child: child.name(),
                    parent: self.name(),
                });
            }
            if !child.is_root() {
                return Err(WireError::AlreadyParented {
                    child: child.name(),
                    parent: child
                        .parent()
                        .map_or_else(|| "<dropped>".to_owned(), |parent| parent.name()),
                });
            }
            if children[..position].iter().any(|c| Rc::ptr_eq(&c.node, &child.node)) {
                return Err(WireError::AlreadyParented {
                    child: child.name(),
                    parent: self.name(),
                });
            }
        }

        for child in &children {
            child.node.borrow_mut().parent = Some(Rc::downgrade(&self.node));
        }
        self.node.borrow_mut().children.extend(children);
        Ok(())
    }

    fn is_self_or_descendant_of(&self, other: &Self) -> bool {
        let mut current = Some(self.clone());
        while let Some(command) = current {
            if Rc::ptr_eq(&command.node, &other.node) {
                return true;
            }
            current = command.parent();
        }
        false
    }

    // ==================== Accessors ====================

    #[must_use]
    #[inline]
    pub fn name(&self) -> String {
        self.node.borrow().name.clone()
    }

    #[must_use]
    #[inline]
    pub fn description(&self) -> Option<String> {
        self.node.borrow().description.clone()
    }

    #[must_use]
    #[inline]
    pub fn detail(&self) -> Option<String> {
        self.node.borrow().detail.clone()
    }

    #[must_use]
    #[inline]
    pub fn error_handling(&self) -> ErrorHandling {
        self.node.borrow().error_handling
    }

    /// The children in declaration order
    #[must_use]
    #[inline]
    pub fn children(&self) -> Vec<Self> {
        self.node.borrow().children.clone()
    }

    /// The first direct child named `name`
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<Self> {
        self.node
            .borrow()
            .children
            .iter()
            .find(|child| child.node.borrow().name == name)
            .cloned()
    }

    #[must_use]
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.node
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|node| Self { node })
    }

    #[must_use]
    #[inline]
    pub fn is_root(&self) -> bool {
        self.node.borrow().parent.is_none()
    }

    /// Names from the root down to this command, space separated
    #[must_use]
    pub fn path_name(&self) -> String {
        let mut names = vec![self.name()];
        let mut current = self.parent();
        while let Some(command) = current {
            names.push(command.name());
            current = command.parent();
        }
        names.reverse();
        names.join(" ")
    }

    /// This command's own flags
    ///
    /// # Panics
    ///
    /// Panics if called while the command is being declared or parsed
    /// through another handle.
    #[must_use]
    #[inline]
    pub fn flags(&self) -> Ref<'_, FlagStore> {
        Ref::map(self.node.borrow(), |node| &node.flags)
    }

    /// A copy of one declared flag
    #[must_use]
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Flag> {
        self.node.borrow().flags.lookup(name).cloned()
    }

    /// Positional remainder left by the last [`parse`](Self::parse)
    #[must_use]
    #[inline]
    pub fn args(&self) -> Vec<String> {
        self.node.borrow().args.clone()
    }

    // ==================== Parsing & execution ====================

    /// Parse this command's own flags from the front of `tokens`
    ///
    /// The positional remainder, from the first non-flag token onward, is
    /// kept and available through [`args`](Self::args).
    ///
    /// # Errors
    ///
    /// Returns an error if a flag is unknown, malformed, missing its value or
    /// has an invalid value, or if help was requested.
    pub fn parse(&self, tokens: &[String]) -> Result<(), ParseError> {
        let mut node = self.node.borrow_mut();
        let parsed = parse_flags(&mut node.flags, tokens);
        debug!(
            "{} parsed {} of {} tokens",
            node.name,
            tokens.len() - parsed.remainder.len(),
            tokens.len()
        );
        node.args = parsed.remainder;
        parsed.result
    }

    /// Whether a handler is registered
    #[must_use]
    #[inline]
    pub fn is_executable(&self) -> bool {
        self.node.borrow().handler.is_some()
    }

    /// Run the handler with the given global flags
    ///
    /// # Errors
    ///
    /// Returns the handler's error, or a [`CANNOT_EXECUTE`] error when no
    /// handler is registered.
    ///
    /// [`CANNOT_EXECUTE`]: crate::error::exit_code::CANNOT_EXECUTE
    pub fn execute(&self, globals: &FlagStore) -> Result<(), ExecError> {
        let handler = self.node.borrow().handler.clone();
        match handler {
            Some(handler) => handler(self, globals),
            None => Err(ExecError::cannot_execute(format!(
                "command {} does not have an executing method",
                self.name()
            ))),
        }
    }
}

impl PartialEq for Command {
    /// Handles are equal when they point at the same node
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Command {}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("Command")
            .field("name", &node.name)
            .field("flags", &node.flags.kinds())
            .field("executable", &node.handler.is_some())
            .field(
                "children",
                &node
                    .children
                    .iter()
                    .map(Self::name)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
