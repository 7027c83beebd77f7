//! Resolution and dispatch
//!
//! [`App::resolve`] walks the command tree, [`App::dispatch`] turns the walk
//! into an [`Outcome`] and [`App::run`] applies that outcome to the process.

pub mod context;
pub mod resolve;

use std::collections::VecDeque;
use std::io::Write;

use tracing::{debug, error, warn};

use crate::command::{Command, ErrorHandling};
use crate::error::ParseError;
use crate::system::System;
use crate::usage::{OutputFormat, UsageRenderer};
pub use context::Context;
pub use resolve::{Outcome, Resolution, Unresolved};

/// An application: a root command plus resolution settings
///
/// # Example
/// ```
/// use kli::{App, Command, Context, ErrorHandling, Outcome};
///
/// let root = Command::new("root", ErrorHandling::ExitOnError);
/// root.flag("foo", "", "the echoed string");
/// let sub = Command::new("sub", ErrorHandling::ExitOnError);
/// sub.handler(|_, globals| {
///     assert_eq!(globals.get::<String>("foo").as_deref(), Some("bar"));
///     Ok(())
/// });
/// root.set_children([sub]).unwrap();
///
/// let app = App::new(root);
/// let ctx = Context::new().with_args(["--foo", "bar", "sub"]);
/// let outcome = app.dispatch(&ctx, &mut std::io::sink());
///
/// assert_eq!(outcome, Outcome::Completed { command: "sub".to_owned() });
/// ```
pub struct App {
    root: Command,
    strict: bool,
    renderer: Box<dyn UsageRenderer>,
}

impl App {
    /// Create an app around `root`, with lenient resolution and text usage
    #[must_use]
    pub fn new(root: Command) -> Self {
        Self {
            root,
            strict: false,
            renderer: OutputFormat::Text.renderer(),
        }
    }

    /// Reject tokens naming none of the current command's children
    ///
    /// By default such tokens are skipped and matching continues with the
    /// next token against the same children.
    #[must_use]
    pub fn with_strict_resolution(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Choose one of the bundled usage formats
    #[must_use]
    pub fn with_usage_format(self, format: OutputFormat) -> Self {
        self.with_renderer(format.renderer())
    }

    /// Use a custom usage renderer
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn UsageRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    #[inline]
    pub const fn root(&self) -> &Command {
        &self.root
    }

    /// Walk the tree, parsing each matched command's own flags
    ///
    /// # Errors
    ///
    /// Returns the command at which resolution stopped, and why, when:
    /// - The root's flags fail to parse
    /// - A subcommand requests help
    /// - A subcommand's flags fail to parse under [`ErrorHandling::ExitOnError`]
    /// - Strict resolution meets a token naming none of the children
    pub fn resolve(&self, ctx: &Context) -> Result<Resolution, Unresolved> {
        self.root.parse(ctx.args()).map_err(|error| Unresolved {
            command: self.root.clone(),
            error,
        })?;

        let mut resolution = Resolution::new(self.root.clone());
        let mut queue: VecDeque<String> = self.root.args().into();

        while let Some(token) = queue.pop_front() {
            let current = resolution.target().clone();

            let Some(child) = current.find_child(&token) else {
                if !self.strict {
                    debug!("skipping unmatched token {token:?} under {}", current.name());
                    continue;
                }
                if current.children().is_empty() {
                    // positional arguments of a leaf, already in its args()
                    break;
                }
                return Err(Unresolved {
                    error: ParseError::UnknownCommand {
                        name: token,
                        parent: current.path_name(),
                    },
                    command: current,
                });
            };

            let rest: Vec<String> = queue.drain(..).collect();
            if let Err(error) = child.parse(&rest) {
                if error.is_help() || child.error_handling() == ErrorHandling::ExitOnError {
                    return Err(Unresolved {
                        command: child,
                        error,
                    });
                }
                warn!("could not parse arguments of {}: {error}", child.path_name());
            }

            queue = child.args().into();
            resolution.push(child);
        }

        Ok(resolution)
    }

    /// Resolve and execute, writing usage and errors to `out`
    ///
    /// Nothing here terminates the process; see [`run`](Self::run).
    pub fn dispatch(&self, ctx: &Context, out: &mut dyn Write) -> Outcome {
        if ctx.args().is_empty() && !self.root.is_executable() {
            self.render(&self.root, out);
            return Outcome::Help {
                command: self.root.name(),
            };
        }

        let resolution = match self.resolve(ctx) {
            Ok(resolution) => resolution,
            Err(Unresolved { command, error }) if error.is_help() => {
                self.render(&command, out);
                return Outcome::Help {
                    command: command.name(),
                };
            }
            Err(Unresolved { command, error }) => {
                error!("could not parse arguments: {error}");
                if let Err(e) = writeln!(out, "{error}") {
                    warn!("could not write error message: {e}");
                }
                self.render(&command, out);
                return Outcome::ParseFailed {
                    command: command.name(),
                    error,
                };
            }
        };

        let target = resolution.target();
        if !target.is_executable() {
            error!("command {} does not have an executing method", target.name());
            self.render(target, out);
            return Outcome::MissingHandler {
                command: target.name(),
            };
        }

        let globals = resolution.globals().flags().clone();
        match target.execute(&globals) {
            Ok(()) => Outcome::Completed {
                command: target.name(),
            },
            Err(e) => {
                error!(code = e.code(), "{e}");
                Outcome::Failed {
                    command: target.name(),
                    error: e,
                }
            }
        }
    }

    /// Dispatch against the system's error stream, then exit with the
    /// outcome's code
    ///
    /// `system.exit` is called exactly once, after the stream is flushed.
    pub fn run(&self, ctx: &Context, system: &dyn System) {
        let code = {
            let mut stderr = system.stderr();
            let outcome = self.dispatch(ctx, &mut *stderr);
            if let Err(e) = stderr.flush() {
                warn!("could not flush error stream: {e}");
            }
            outcome.exit_code()
        };
        system.exit(code);
    }

    fn render(&self, command: &Command, out: &mut dyn Write) {
        if let Err(e) = self.renderer.render(command, out) {
            warn!("could not render usage of {}: {e}", command.name());
        }
    }
}
