//! Integration tests for toolpipe-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end.

use toolpipe_core::{
    error::Error,
    execution::{Delivery, Encoding, Invocation},
    options::OptionSpec,
    tool::{CliTool, MergePolicy},
    tools::{Gum, Htmlq},
};

/// Test untyped option data validated into a tool's defaults
#[test]
fn test_untyped_options_workflow() {
    let value: serde_yaml::Value =
        serde_yaml::from_str(r#"["no-limit", ["height", 10], ["header", "PICK ONE"]]"#).unwrap();
    let tool = CliTool::new("gum", OptionSpec::from_value(&value).unwrap()).unwrap();

    assert_eq!(
        tool.command_line(&Invocation::new("choose")).unwrap(),
        vec!["gum", "choose", "--no-limit", "--height=10", "--header=PICK ONE"]
    );

    let value: serde_yaml::Value = serde_yaml::from_str("[[3, x]]").unwrap();
    assert!(matches!(
        OptionSpec::from_value(&value),
        Err(Error::OptionKey(_))
    ));
}

/// Test merging raw defaults with call-site options
#[test]
fn test_call_site_wins_with_raw_defaults() {
    let tool = CliTool::new("fzf", "--hidden --height=10 --follow")
        .unwrap()
        .with_merge_policy(MergePolicy::CallSiteWins);
    let invocation = Invocation::new("")
        .with_value("height", 5)
        .with_flag("m");

    assert_eq!(
        tool.command_line(&invocation).unwrap(),
        vec!["fzf", "--height=5", "-m", "--hidden", "--follow"]
    );
}

/// Test the option normalization contract through a tool's command line
#[test]
fn test_option_normalization_workflow() {
    let defaults = OptionSpec::new()
        .with_flag("reverse")
        .with_flag("m")
        .with_flag("+x")
        .with_value("margin", "1 2 3 4")
        .with_value("empty", " ");
    let tool = CliTool::new("fzf", defaults).unwrap();

    assert_eq!(
        tool.options(),
        ["--reverse", "-m", "+x", "--margin='1 2 3 4'", "--empty"]
    );

    let argv = tool.command_line(&Invocation::default()).unwrap();
    assert_eq!(
        argv,
        vec!["fzf", "--reverse", "-m", "+x", "--margin=1 2 3 4", "--empty"]
    );
}

#[cfg(unix)]
mod process {
    use super::*;

    /// A stand-in for `gum` that prints its arguments and then its input.
    fn echoing_tool() -> CliTool {
        CliTool::new("sh", OptionSpec::from_line("--reverse")).unwrap()
    }

    const ECHO_ARGS_THEN_INPUT: &str = r#"-c 'printf "%s\n" "$@"; cat' sh"#;

    #[test]
    fn test_end_to_end_arguments_and_input() {
        let tool = echoing_tool();
        let invocation = Invocation::new(ECHO_ARGS_THEN_INPUT).with_value("header", "PICK ONE");

        let outcome = tool.execute([1, 2, 3], &invocation).unwrap();

        assert_eq!(
            outcome.output(),
            Some("--header=PICK ONE\n--reverse\n1\n2\n3\n")
        );
        assert_eq!(outcome.delivery, Delivery::Complete { sent: 3 });
        assert!(outcome.success());
    }

    #[test]
    fn test_tool_instance_is_reusable() {
        let tool = CliTool::new("cat", "").unwrap();
        let invocation = Invocation::default();

        for round in 0..3 {
            let outcome = tool.execute([round], &invocation).unwrap();
            assert_eq!(outcome.output(), Some(format!("{round}\n").as_str()));
        }
    }

    #[test]
    fn test_child_exiting_before_reading() {
        let tool = CliTool::new("sh", "").unwrap();
        let items = (0..200_000).map(|i| format!("item number {i}"));

        let outcome = tool
            .execute(items, &Invocation::new("-c 'echo early'"))
            .unwrap();

        assert_eq!(outcome.output(), Some("early\n"));
        assert!(!outcome.delivery.is_complete());
    }

    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        // `sh choose` fails to open a script named `choose`
        let gum = Gum::from_tool(CliTool::new("sh", "").unwrap());
        let outcome = gum.choose(["a", "b"], OptionSpec::new()).unwrap();

        assert!(outcome.output.is_none());
        assert!(!outcome.success());
        assert!(matches!(
            outcome.into_success(),
            Err(Error::SubProcessExit(Some(_)))
        ));
    }

    #[test]
    fn test_items_in_latin1() {
        let latin1 = Encoding::for_label("iso-8859-1").unwrap();
        let tool = CliTool::new("cat", "").unwrap();
        let invocation = Invocation::new("").with_encoding(latin1);

        let outcome = tool.execute(["crème", "brûlée"], &invocation).unwrap();
        assert_eq!(outcome.output(), Some("crème\nbrûlée\n"));
    }

    #[test]
    fn test_htmlq_feeds_document() {
        let htmlq = Htmlq::from_tool(CliTool::new("cat", "").unwrap());
        // `cat '<selector>'` would read a file; a `-` selector makes cat read stdin
        let outcome = htmlq.css("<p>hi</p>", "-", OptionSpec::new()).unwrap();
        assert_eq!(outcome.output(), Some("<p>hi</p>\n"));
    }
}
