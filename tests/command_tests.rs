//! Unit tests for command trees
//!
//! Tests tree wiring and per-command parsing, including:
//! - A command has at most one parent
//! - Wiring is all-or-nothing and refuses cycles
//! - Each command parses only its own flags

use kli::{Command, ErrorHandling, ExecError, FlagStore, ParseError, WireError, exit_code};

fn command(name: &str) -> Command {
    Command::new(name, ErrorHandling::ExitOnError)
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn test_set_children_links_both_ways() {
    let root = command("root");
    let sub = command("sub");
    let other = command("other");

    root.set_children([sub.clone(), other.clone()]).unwrap();

    assert!(root.is_root());
    assert!(root.parent().is_none());
    assert_eq!(root.children(), vec![sub.clone(), other.clone()]);
    assert_eq!(sub.parent(), Some(root.clone()));
    assert_eq!(other.parent(), Some(root));
    assert!(!sub.is_root());
}

#[test]
fn test_second_parent_is_refused() {
    let root = command("root");
    let elsewhere = command("elsewhere");
    let sub = command("sub");
    root.set_children([sub.clone()]).unwrap();

    let err = elsewhere.set_children([sub.clone()]).unwrap_err();
    assert_eq!(
        err,
        WireError::AlreadyParented {
            child: "sub".to_owned(),
            parent: "root".to_owned()
        }
    );
    assert!(elsewhere.children().is_empty());
    assert_eq!(sub.parent(), Some(root.clone()));

    // re-attaching to the same parent is refused as well
    assert!(root.set_children([sub]).is_err());
    assert_eq!(root.children().len(), 1);
}

#[test]
fn test_failed_wiring_leaves_tree_unchanged() {
    let root = command("root");
    let owned = command("owned");
    let first = command("first");
    first.set_children([owned.clone()]).unwrap();

    let fresh = command("fresh");
    assert!(root.set_children([fresh.clone(), owned.clone()]).is_err());

    assert!(root.children().is_empty());
    assert!(fresh.parent().is_none());
    assert_eq!(owned.parent(), Some(first));
}

#[test]
fn test_parent_slot_outlives_the_parent() {
    let sub = command("sub");
    command("gone").set_children([sub.clone()]).unwrap();

    assert!(sub.parent().is_none());
    assert!(!sub.is_root());
    assert!(command("root").set_children([sub]).is_err());
}

#[test]
fn test_same_child_twice_in_one_call() {
    let root = command("root");
    let sub = command("sub");

    let err = root.set_children([sub.clone(), sub.clone()]).unwrap_err();
    assert!(matches!(err, WireError::AlreadyParented { .. }));
    assert!(sub.parent().is_none());
}

#[test]
fn test_cycles_are_refused() {
    let root = command("root");
    let sub = command("sub");
    let third = command("third");
    root.set_children([sub.clone()]).unwrap();
    sub.set_children([third.clone()]).unwrap();

    assert_eq!(
        third.set_children([root.clone()]).unwrap_err(),
        WireError::Cycle {
            child: "root".to_owned(),
            parent: "third".to_owned()
        }
    );
    assert!(matches!(
        third.set_children([third.clone()]),
        Err(WireError::Cycle { .. })
    ));
    assert!(root.is_root());
}

#[test]
fn test_find_child_first_match_wins() {
    let root = command("root");
    let first = command("dup");
    first.set_description("first");
    let second = command("dup");
    second.set_description("second");
    root.set_children([first.clone(), second]).unwrap();

    assert_eq!(root.find_child("dup"), Some(first));
    assert_eq!(root.find_child("missing"), None);
}

#[test]
fn test_path_name() {
    let root = command("cow");
    let herd = command("herd");
    let count = command("count");
    root.set_children([herd.clone()]).unwrap();
    herd.set_children([count.clone()]).unwrap();

    assert_eq!(count.path_name(), "cow herd count");
    assert_eq!(root.path_name(), "cow");
}

#[test]
fn test_flag_locality() {
    let root = command("root");
    root.flag("foo", "", "global");
    let a = command("a");
    a.flag("alpha", false, "a only");
    let b = command("b");
    b.flag("beta", 0, "b only");
    root.set_children([a.clone()]).unwrap();
    a.set_children([b.clone()]).unwrap();

    let a_kinds = a.flags().kinds();
    let b_kinds = b.flags().kinds();
    assert!(a_kinds.contains_key("alpha"));
    assert!(!a_kinds.contains_key("beta"));
    assert!(!a_kinds.contains_key("foo"));
    assert!(b_kinds.contains_key("beta"));
    assert!(!b_kinds.contains_key("alpha"));

    // a never parses b's flags
    let err = a.parse(&tokens(&["-beta", "3"])).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownFlag {
            name: "beta".to_owned()
        }
    );
}

#[test]
fn test_parse_keeps_positional_remainder() {
    let sub = command("sub");
    sub.flag("str", "", "the echoed string value");

    sub.parse(&tokens(&["-str", "fuzzfizz", "third", "-cup", "tea"]))
        .unwrap();

    assert_eq!(sub.flags().get::<String>("str"), Some("fuzzfizz".to_owned()));
    assert_eq!(sub.args(), tokens(&["third", "-cup", "tea"]));
    assert_eq!(
        sub.lookup("str").map(|f| f.usage().to_owned()),
        Some("the echoed string value".to_owned())
    );
}

#[test]
fn test_help_flag_is_reported() {
    let sub = command("sub");
    assert_eq!(
        sub.parse(&tokens(&["-h"])),
        Err(ParseError::HelpRequested)
    );
}

#[test]
fn test_execute_without_handler() {
    let leaf = command("leaf");
    assert!(!leaf.is_executable());

    let err = leaf.execute(&FlagStore::new()).unwrap_err();
    assert_eq!(err.code(), exit_code::CANNOT_EXECUTE);
    assert!(err.message().contains("leaf"));
}

#[test]
fn test_execute_passes_command_and_globals() {
    let mut globals = FlagStore::new();
    globals.register("eat", false, "");
    globals.set("eat", "true").unwrap();

    let say = command("say");
    say.flag("what", "mooooo", "");
    say.handler(|cmd, globals| {
        assert_eq!(cmd.name(), "say");
        assert_eq!(cmd.flags().get::<String>("what"), Some("mooooo".to_owned()));
        if globals.get::<bool>("eat") == Some(true) {
            return Err(ExecError::new("eating", 42));
        }
        Ok(())
    });

    assert!(say.is_executable());
    assert_eq!(say.execute(&globals).unwrap_err().code(), 42);
    assert!(say.execute(&FlagStore::new()).is_ok());
}

#[test]
fn test_descriptions() {
    let sub = command("sub");
    assert_eq!(sub.description(), None);
    sub.set_description("a sub command, yeah!")
        .set_detail("sub -str value");

    assert_eq!(sub.description().as_deref(), Some("a sub command, yeah!"));
    assert_eq!(sub.detail().as_deref(), Some("sub -str value"));
    assert_eq!(sub.error_handling(), ErrorHandling::ExitOnError);
}
