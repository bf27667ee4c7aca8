use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diary", bin_name = "diary", version)]
#[command(about = "A book-shaped diary with sticky notes, in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the diary records, config and logs
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the diary in an interactive session (default)
    Open,

    /// Print the book at its first spread, or at the spread holding a page
    Show {
        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Replace the text of a page
    Write {
        /// Page number (1-based)
        page: usize,

        /// New text; leave empty to clear the page
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Sticky note commands
    #[command(subcommand)]
    Sticky(StickyCommands),

    /// Show or set configuration
    Config {
        /// Config key (e.g. page-count, flip-duration-ms)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },

    /// Print where the toolbar's "New" action points
    Link,
}

#[derive(Subcommand, Debug)]
pub enum StickyCommands {
    /// Place a note centred on a point in the book
    Add {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Drop a note as if dragged to a point
    #[command(alias = "mv")]
    Move {
        /// Note id or unique id prefix
        id: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Replace a note's text
    Edit {
        /// Note id or unique id prefix
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "remove")]
    Rm {
        /// Note id or unique id prefix
        id: String,
    },

    /// List all notes
    #[command(alias = "ls")]
    List,
}

/// One line typed into the interactive session.
#[derive(Parser, Debug)]
#[command(
    name = "diary",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// Turn to the next spread
    #[command(visible_alias = "n")]
    Next,

    /// Turn to the previous spread
    #[command(visible_alias = "p")]
    Prev,

    /// Replace the text of a page
    #[command(visible_alias = "w")]
    Write {
        page: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Toggle sticky placement mode
    Sticky,

    /// Click at a point in the book
    Click {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Drop a note at a point, as at the end of a drag
    Drag {
        id: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Replace a note's text
    Note {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Delete a note
    Rm { id: String },

    /// Re-read the diary from disk
    Reload,

    /// Show where "New" points
    New,

    /// Redraw the book
    Show,

    /// List sticky notes
    Notes,

    /// List session commands
    Help,

    /// Leave the session
    #[command(visible_aliases = ["q", "exit"])]
    Quit,
}

/// Help text for the interactive session.
pub fn session_help() -> String {
    let cmd = SessionLine::command();
    let mut output = String::from("Commands:\n");
    for sc in cmd.get_subcommands() {
        let mut name = sc.get_name().to_string();
        let aliases: Vec<&str> = sc.get_visible_aliases().collect();
        if !aliases.is_empty() {
            name = format!("{} ({})", name, aliases.join(", "));
        }
        let args: Vec<String> = sc
            .get_positionals()
            .map(|arg| {
                let id = arg.get_id().as_str().to_string();
                if arg.is_trailing_var_arg_set() {
                    format!("<{}…>", id)
                } else {
                    format!("<{}>", id)
                }
            })
            .collect();
        let usage = if args.is_empty() {
            name
        } else {
            format!("{} {}", name, args.join(" "))
        };
        let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
        output.push_str(&format!("  {:<24} {}\n", usage, about));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> SessionCommand {
        SessionLine::try_parse_from(line.split_whitespace())
            .unwrap()
            .command
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
        SessionLine::command().debug_assert();
    }

    #[test]
    fn test_session_aliases() {
        assert_eq!(parse("n"), SessionCommand::Next);
        assert_eq!(parse("p"), SessionCommand::Prev);
        assert_eq!(parse("q"), SessionCommand::Quit);
        assert_eq!(parse("exit"), SessionCommand::Quit);
    }

    #[test]
    fn test_session_write_collects_words() {
        assert_eq!(
            parse("write 3 Today was good"),
            SessionCommand::Write {
                page: 3,
                text: vec!["Today".into(), "was".into(), "good".into()],
            }
        );
    }

    #[test]
    fn test_session_click_accepts_negative_coordinates() {
        assert_eq!(
            parse("click -5 20.5"),
            SessionCommand::Click { x: -5.0, y: 20.5 }
        );
    }

    #[test]
    fn test_session_rejects_unknown_command() {
        assert!(SessionLine::try_parse_from(["dance"]).is_err());
        assert!(SessionLine::try_parse_from(["write", "two"]).is_err());
    }

    #[test]
    fn test_cli_parses_sticky_move() {
        let cli = Cli::try_parse_from(["diary", "sticky", "move", "ab12", "10", "-4"]).unwrap();
        match cli.command {
            Some(Commands::Sticky(StickyCommands::Move { id, x, y })) => {
                assert_eq!(id, "ab12");
                assert_eq!((x, y), (10.0, -4.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_session_help_lists_commands() {
        let help = session_help();
        assert!(help.contains("next (n)"));
        assert!(help.contains("write (w) <page> <text…>"));
        assert!(help.contains("quit (q, exit)"));
    }
}
