use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "querydeck", bin_name = "querydeck", version)]
#[command(about = "Edit a deck of named queries and push them to a remote store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// User id (defaults to $QUERYDECK_USER)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Instance whose queries are edited
    #[arg(short, long, global = true, default_value = "default")]
    pub instance: String,

    /// Starting URL, e.g. "/editor?queryId=<uuid>" to reopen a query
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive editing session (default)
    Shell,

    /// List the instance's queries
    #[command(alias = "ls")]
    List,

    /// Get or set configuration
    Config {
        /// Configuration key (default-query-name, push-failure)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// List queries with their status
    #[command(alias = "ls")]
    List,

    /// Create a new query and open it
    #[command(alias = "n")]
    New,

    /// Open a query (index, id or name)
    #[command(alias = "o")]
    Open {
        #[arg(required = true, num_args = 1..)]
        selector: Vec<String>,
    },

    /// Print the open query's buffer
    Show,

    /// Replace the open query's buffer
    Set {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Append a line to the open query's buffer
    Append {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Rename the open query (applied on save)
    Rename {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Edit the open query in $EDITOR
    #[command(alias = "e")]
    Edit,

    /// Commit the buffer
    #[command(alias = "w")]
    Save,

    /// Mark a query for deletion on next push
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        selector: Vec<String>,
    },

    /// Unmark a query marked for deletion
    Recover {
        #[arg(required = true, num_args = 1..)]
        selector: Vec<String>,
    },

    /// Send saved changes and deletions to the remote store
    #[command(alias = "p")]
    Push,

    /// Show unsaved/unpushed state
    Status,

    /// Explain the status markers
    Legend,

    /// Leave the shell
    #[command(aliases = ["exit", "q"])]
    Quit,
}

/// Splits a shell line into words. Single or double quotes group words.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}
