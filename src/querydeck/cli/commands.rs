use super::print::{print_buffer, print_legend, print_messages, print_queries, print_status};
use super::setup::{split_line, Cli, Commands, ShellCommand, ShellLine};
use clap::Parser;
use directories::ProjectDirs;
use querydeck::api::{Choice, CmdResult, Popup, QueryManager};
use querydeck::config::QueryDeckConfig;
use querydeck::editor::{edit_buffer, EditorBuffer};
use querydeck::error::{QueryDeckError, Result};
use querydeck::identity::{EnvIdentity, IdentityProvider, StaticIdentity};
use querydeck::logging::{init_logging, LogConfig};
use querydeck::remote::fs::FileRemote;
use querydeck::routing::UrlState;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

const HOME_ENV_VAR: &str = "QUERYDECK_HOME";
const EDITOR_PATH: &str = "/editor";

type Manager = QueryManager<FileRemote, UrlState>;

struct AppContext {
    data_dir: PathBuf,
    config: QueryDeckConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Shell) | None => handle_shell(&ctx, &cli),
        Some(Commands::List) => handle_list(&ctx, &cli),
        Some(Commands::Config { ref key, ref value }) => {
            handle_config(&ctx, key.as_deref(), value.as_deref())
        }
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match std::env::var_os(HOME_ENV_VAR) {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "querydeck", "querydeck")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| QueryDeckError::Api("Could not determine data dir".to_string()))?,
    };
    let config = QueryDeckConfig::load(&data_dir)?;

    let log_config = LogConfig {
        level: if cli.verbose {
            "querydeck=debug".to_string()
        } else {
            config.log_level.clone()
        },
        format: config.log_format,
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: {}", e);
    }

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    Ok(AppContext { data_dir, config })
}

fn open_manager(ctx: &AppContext, cli: &Cli) -> Result<Manager> {
    let identity: Box<dyn IdentityProvider> = match &cli.user {
        Some(user) => Box::new(StaticIdentity::signed_in(user.clone())),
        None => Box::new(EnvIdentity),
    };
    let remote = FileRemote::new(ctx.data_dir.join("remote"));
    let nav = cli
        .url
        .as_deref()
        .map(UrlState::parse)
        .unwrap_or_else(|| UrlState::new(EDITOR_PATH));

    let (manager, result) = QueryManager::open(
        identity.as_ref(),
        remote,
        nav,
        cli.instance.clone(),
        ctx.config.clone(),
    )?;
    print_messages(&result.messages);
    Ok(manager)
}

fn handle_list(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let manager = open_manager(ctx, cli)?;
    print_queries(&manager.list_queries()?.listed_queries);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut config = ctx.config.clone();
    match (key, value) {
        (None, _) => {
            println!("default-query-name: {}", config.default_query_name);
            println!("push-failure: {}", config.push_failure);
            return Ok(());
        }
        (Some("default-query-name"), None) => println!("{}", config.default_query_name),
        (Some("default-query-name"), Some(v)) => config.set_default_query_name(v)?,
        (Some("push-failure"), None) => println!("{}", config.push_failure),
        (Some("push-failure"), Some(v)) => config.push_failure = v.parse()?,
        (Some(other), _) => {
            return Err(QueryDeckError::Api(format!("Unknown config key: {}", other)));
        }
    }

    if value.is_some() {
        config.save(&ctx.data_dir)?;
        println!("Configuration saved.");
    }
    Ok(())
}

/// Reads shell lines until `quit` or end of input.
struct Shell<I: Iterator<Item = io::Result<String>>> {
    manager: Manager,
    lines: I,
    interactive: bool,
}

fn handle_shell(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let manager = open_manager(ctx, cli)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut shell = Shell {
        manager,
        lines: stdin.lock().lines(),
        interactive,
    };

    if interactive {
        println!("Type `help` for commands, `legend` for status markers.");
    }
    print_queries(&shell.manager.list_queries()?.listed_queries);

    while let Some(line) = shell.next_line("querydeck> ")? {
        let words = split_line(&line);
        if words.is_empty() {
            continue;
        }
        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };
        if matches!(parsed.command, ShellCommand::Quit) {
            break;
        }
        if let Err(e) = shell.dispatch(parsed.command) {
            eprintln!("Error: {}", e);
        }
    }

    if shell.manager.has_unsaved_changes() || shell.manager.has_unpushed_changes() {
        println!("Leaving with changes that were not pushed.");
    }
    Ok(())
}

impl<I: Iterator<Item = io::Result<String>>> Shell<I> {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.interactive {
            print!("{}", prompt);
            io::stdout().flush()?;
        }
        match self.lines.next() {
            Some(line) => Ok(Some(line?)),
            None => Ok(None),
        }
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        let result = match command {
            ShellCommand::List => {
                print_queries(&self.manager.list_queries()?.listed_queries);
                return Ok(());
            }
            ShellCommand::New => self.manager.create_query()?,
            ShellCommand::Open { selector } => {
                let id = self.manager.resolve_selector(&selector.join(" "))?;
                let result = self.manager.select_query(id)?;
                if result.popup.is_none() && self.manager.selected_query().is_some() {
                    self.show();
                }
                result
            }
            ShellCommand::Show => {
                self.show();
                return Ok(());
            }
            ShellCommand::Set { text } => self.manager.set_editing_content(text.join(" "))?,
            ShellCommand::Append { text } => self.manager.append_editing_content(&text.join(" "))?,
            ShellCommand::Rename { name } => self.manager.set_editing_name(name.join(" "))?,
            ShellCommand::Edit => self.edit_in_editor()?,
            ShellCommand::Save => self.manager.save_query()?,
            ShellCommand::Delete { selector } => {
                let id = self.manager.resolve_selector(&selector.join(" "))?;
                self.manager.delete_query(id)?
            }
            ShellCommand::Recover { selector } => {
                let id = self.manager.resolve_selector(&selector.join(" "))?;
                self.manager.request_recover(id)?
            }
            ShellCommand::Push => self.manager.push()?,
            ShellCommand::Status => {
                print_status(
                    self.manager.has_unsaved_changes(),
                    self.manager.has_unpushed_changes(),
                    self.manager.deleted_queries().len(),
                    self.manager.last_synced(),
                );
                return Ok(());
            }
            ShellCommand::Legend => {
                print_legend();
                return Ok(());
            }
            ShellCommand::Quit => return Ok(()),
        };
        self.finish(result)
    }

    /// Prints a result, answering any popup it raised.
    fn finish(&mut self, mut result: CmdResult) -> Result<()> {
        loop {
            print_messages(&result.messages);
            let Some(popup) = result.popup.take() else {
                return Ok(());
            };
            let question = match popup {
                Popup::SaveBeforeProceed { pending } => {
                    format!("Save changes before {}? [y/N] ", pending)
                }
                Popup::RecoverDeleted { id } => {
                    let name = self
                        .manager
                        .queries()
                        .iter()
                        .find(|q| q.id() == id)
                        .map(|q| q.name.clone())
                        .unwrap_or_default();
                    format!("Recover '{}' marked for deletion? [y/N] ", name)
                }
            };
            println!("{}", question.trim_end());
            let answer = match self.next_line("> ")? {
                Some(answer) => answer,
                None => {
                    self.manager.dismiss_popup()?;
                    return Ok(());
                }
            };
            let choice = match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => Choice::Confirm,
                _ => Choice::Cancel,
            };
            result = self.manager.resolve_popup(choice)?;
        }
    }

    fn show(&self) {
        match self.manager.selected_query() {
            Some(query) => {
                let name = self.manager.editing_name().unwrap_or(&query.name);
                print_buffer(
                    name,
                    self.manager.status_of(query.id()),
                    self.manager.editing_content(),
                );
            }
            None => println!("No query is open."),
        }
    }

    fn edit_in_editor(&mut self) -> Result<CmdResult> {
        let Some(query) = self.manager.selected_query() else {
            return Err(QueryDeckError::Api("No query is open.".to_string()));
        };
        let name = self.manager.editing_name().unwrap_or(&query.name).to_string();
        let initial = EditorBuffer::new(name, self.manager.editing_content());
        let edited = edit_buffer(&initial)?;

        let mut result = self.manager.set_editing_content(edited.content)?;
        if !edited.name.is_empty() && edited.name != initial.name {
            result.absorb(self.manager.set_editing_name(edited.name)?);
        }
        Ok(result)
    }
}
