//! # Interactive Shell
//!
//! Line-oriented shell over the engine. Commands are read from stdin;
//! `try` dispatches in the background and the result is printed when the
//! engine reports it settled, so several endpoints can be in flight at once.
//!
//! ```text
//! apidock> toggle anime-details
//! apidock> try anime-details
//! apidock> try jikan-top
//! ```

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::engine::models::InvocationResult;
use crate::engine::{ClipboardService, EndpointDescriptor, EndpointEngine, EngineEvent};
use crate::render::{render_card, render_catalog, render_result};

const PROMPT: &str = "apidock> ";

const HELP: &str = "\
Commands:
  list                 list endpoints
  toggle <id>          expand or collapse an endpoint
  show <id>            show an endpoint card
  try <id> [url]       invoke an endpoint (at its target URL unless given)
  copy <id>            copy the endpoint URL to the clipboard
  state <id>           print the runtime state as JSON
  help                 this text
  quit                 leave
";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    List,
    Toggle(String),
    Show(String),
    Try { id: String, url: Option<String> },
    Copy(String),
    State(String),
    Quit,
}

impl ReplCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let id = words.next().map(str::to_string);
        let extra = words.next().map(str::to_string);

        let require_id = |id: Option<String>| {
            id.ok_or_else(|| anyhow::anyhow!("'{verb}' needs an endpoint id"))
        };

        let command = match verb.to_lowercase().as_str() {
            "help" | "h" | "?" => ReplCommand::Help,
            "list" | "ls" => ReplCommand::List,
            "toggle" | "t" => ReplCommand::Toggle(require_id(id)?),
            "show" | "s" => ReplCommand::Show(require_id(id)?),
            "try" | "run" | "r" => ReplCommand::Try {
                id: require_id(id)?,
                url: extra,
            },
            "copy" | "c" => ReplCommand::Copy(require_id(id)?),
            "state" => ReplCommand::State(require_id(id)?),
            "quit" | "q" | "exit" => ReplCommand::Quit,
            other => return Err(anyhow::anyhow!("Unknown command: '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Result of executing one command
#[derive(Debug)]
pub enum Flow {
    /// Print the text and keep going
    Continue(String),
    /// Print the text; an invocation is running in the background
    Pending(String, JoinHandle<InvocationResult>),
    Quit,
}

/// The interactive shell
pub struct Repl {
    engine: EndpointEngine,
    clipboard: ClipboardService,
}

impl Repl {
    pub fn new(engine: EndpointEngine, clipboard: ClipboardService) -> Self {
        Self { engine, clipboard }
    }

    /// Apply one command to the engine
    ///
    /// Must run inside a tokio runtime, `try` spawns a task.
    pub fn execute(&self, command: ReplCommand) -> Result<Flow> {
        let flow = match command {
            ReplCommand::Help => Flow::Continue(HELP.to_string()),
            ReplCommand::List => Flow::Continue(render_catalog(&self.engine)),
            ReplCommand::Toggle(id) => {
                self.known(&id)?;
                self.engine.toggle_expansion(&id);
                Flow::Continue(self.card(&id)?)
            }
            ReplCommand::Show(id) => Flow::Continue(self.card(&id)?),
            ReplCommand::Try { id, url } => {
                if self.engine.get_state(&id).loading {
                    return Ok(Flow::Continue(format!("{id} is already loading\n")));
                }
                let target = match url {
                    Some(url) => url,
                    None => self.known(&id)?.target_url().to_string(),
                };
                let handle = self.engine.spawn_invoke(&id, &target);
                Flow::Pending(format!("Trying {id}: GET {target}\n"), handle)
            }
            ReplCommand::Copy(id) => {
                let url = self.known(&id)?.target_url().to_string();
                self.clipboard.copy_text(&url);
                Flow::Continue(format!("Copied {url}\n"))
            }
            ReplCommand::State(id) => {
                let state = self.engine.get_state(&id);
                Flow::Continue(format!("{}\n", serde_json::to_string_pretty(&state)?))
            }
            ReplCommand::Quit => Flow::Quit,
        };
        Ok(flow)
    }

    fn known(&self, id: &str) -> Result<&EndpointDescriptor> {
        self.engine
            .descriptor(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown endpoint: '{id}'"))
    }

    fn card(&self, id: &str) -> Result<String> {
        let descriptor = self.known(id)?;
        Ok(render_card(descriptor, &self.engine.get_state(id)))
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(&self) -> Result<()> {
        let interactive = atty::is(atty::Stream::Stdin);
        let mut events = self.engine.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut pending: Vec<JoinHandle<InvocationResult>> = Vec::new();

        if interactive {
            println!("Type 'help' for commands.");
        }
        prompt(interactive)?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match ReplCommand::parse(&line).and_then(|cmd| match cmd {
                        Some(cmd) => self.execute(cmd).map(Some),
                        None => Ok(None),
                    }) {
                        Ok(Some(Flow::Continue(text))) => print!("{text}"),
                        Ok(Some(Flow::Pending(text, handle))) => {
                            print!("{text}");
                            pending.retain(|handle| !handle.is_finished());
                            pending.push(handle);
                        }
                        Ok(Some(Flow::Quit)) => break,
                        Ok(None) => {}
                        Err(e) => println!("{e}"),
                    }
                    prompt(interactive)?;
                }
                event = events.recv() => match event {
                    Ok(EngineEvent::InvocationSettled { id, result }) => {
                        println!("\n[{id}]\n{}", render_result(&result));
                        prompt(interactive)?;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Shell skipped {} engine events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }

        // Input ended with requests still in flight: wait and print them
        for handle in pending {
            if handle.is_finished() {
                continue;
            }
            match handle.await {
                Ok(result) => println!("{}", render_result(&result)),
                Err(e) => tracing::error!("Invocation task failed: {}", e),
            }
        }
        Ok(())
    }
}

fn prompt(interactive: bool) -> Result<()> {
    if interactive {
        print!("{PROMPT}");
        std::io::stdout().flush()?;
    }
    Ok(())
}
