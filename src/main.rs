//! # `cow`
//!
//! A tiny command-line cow, built on `kli` to show nested subcommands,
//! global flags and exit codes.
//!
//! ```sh
//! cow -eat
//! cow say -what moo -repeat 3
//! cow -eat say
//! cow graze -for 1h30m meadow
//! cow herd count -size 12
//! cow say -h
//! ```

use anyhow::Result;
use core::time::Duration;
use kli::flag::format_duration;
use kli::system::RealSystem;
use kli::{App, Command, Context, ErrorHandling, ExecError};
use std::io::IsTerminal as _;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let root = build_commands()?;
    let system = RealSystem::new();
    App::new(root).run(&Context::from_system(&system), &system);
    Ok(())
}

fn build_commands() -> Result<Command> {
    let root = Command::new("cow", ErrorHandling::ExitOnError);
    root.set_description("a cow that does cow things")
        .flag("eat", false, "informs the cow to eat")
        .handler(|cmd, _| {
            if cmd.flags().get::<bool>("eat") == Some(true) {
                println!("{}", "munch ".repeat(3).trim_end());
            } else {
                println!("the cow stands there looking smug");
            }
            Ok(())
        });

    let say = Command::new("say", ErrorHandling::ExitOnError);
    say.set_description("the cow speaks")
        .set_detail("cow say -what moo -repeat 3\ncow -eat say")
        .flag("what", "mooooo", "what the cow will say")
        .flag("repeat", 1, "how many times it repeats the word")
        .handler(|cmd, globals| {
            if globals.get::<bool>("eat") == Some(true) {
                println!("munch... can't say anything, I'm eating");
                return Ok(());
            }

            let flags = cmd.flags();
            let what = flags.get::<String>("what").unwrap_or_default();
            let repeat = flags.get::<i32>("repeat").unwrap_or(1);
            if repeat < 1 {
                return Err(ExecError::invalid_argument(format!(
                    "repeat must be at least 1, got {repeat}"
                )));
            }
            for _ in 0..repeat {
                println!("{what}");
            }
            Ok(())
        });

    let graze = Command::new("graze", ErrorHandling::ExitOnError);
    graze
        .set_description("the cow wanders off to eat grass")
        .set_detail("cow graze -for 1h30m meadow")
        .flag("for", Duration::from_secs(30 * 60), "how long the cow grazes")
        .handler(|cmd, globals| {
            if globals.get::<bool>("eat") == Some(true) {
                return Err(ExecError::general("the cow is already eating"));
            }

            let time = cmd.flags().get::<Duration>("for").unwrap_or_default();
            let field = cmd.args().first().cloned().unwrap_or_else(|| "the field".to_owned());
            println!("grazing in {field} for {}", format_duration(time));
            Ok(())
        });

    let herd = Command::new("herd", ErrorHandling::ExitOnError);
    herd.set_description("commands for the whole herd");

    let count = Command::new("count", ErrorHandling::ExitOnError);
    count
        .set_description("count the cows in the herd")
        .flag("size", 3_u32, "number of cows in the herd")
        .handler(|cmd, _| {
            let size = cmd.flags().get::<u32>("size").unwrap_or_default();
            for n in 1..=size {
                println!("cow {n}");
            }
            Ok(())
        });

    herd.set_children([count])?;
    root.set_children([say, graze, herd])?;
    Ok(root)
}
