//! `kli` - a small framework for command-line applications built as a tree
//! of subcommands
//!
//! Each [`Command`] owns its typed flags, an optional handler and its
//! children. [`App`] walks a flat argument list down the tree: every matched
//! command parses only its own flags, the deepest match is executed, and the
//! root's flags are handed to it as globals.
//!
//! ```
//! use kli::{App, Command, Context, ErrorHandling, ExecError};
//!
//! let root = Command::new("cow", ErrorHandling::ExitOnError);
//! root.flag("eat", false, "informs the cow to eat");
//!
//! let say = Command::new("say", ErrorHandling::ExitOnError);
//! say.flag("repeat", 1, "how many times it repeats the word");
//! say.handler(|cmd, globals| {
//!     if globals.get::<bool>("eat") == Some(true) {
//!         return Err(ExecError::general("can't talk while eating"));
//!     }
//!     assert_eq!(cmd.flags().get::<i32>("repeat"), Some(5));
//!     Ok(())
//! });
//! root.set_children([say]).unwrap();
//!
//! let app = App::new(root);
//! let outcome = app.dispatch(
//!     &Context::new().with_args(["say", "-repeat", "5"]),
//!     &mut std::io::sink(),
//! );
//! assert_eq!(outcome.exit_code(), 0);
//! ```

pub mod app;
pub mod command;
pub mod error;
pub mod flag;
pub mod system;
pub mod usage;

pub use app::{App, Context, Outcome, Resolution, Unresolved};
pub use command::{Command, ErrorHandling, Handler};
pub use error::{ExecError, ParseError, WireError, exit_code};
pub use flag::{Flag, FlagKind, FlagStore, FlagValue, FromFlagValue};
pub use usage::{JsonUsage, OutputFormat, TextUsage, UsageRenderer};
