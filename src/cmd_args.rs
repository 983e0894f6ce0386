use std::ffi::OsString;
use std::time::Duration;

pub use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Catalog file
    /// Optional. Falls back to $APIDOCK_CATALOG_PATH, then ~/.apidock/catalog.ini.
    #[clap(short = 'c', long, help = "endpoint catalog file")]
    catalog: Option<String>,

    /// Request timeout
    /// Optional. Overrides the catalog's timeout_secs. No timeout by default.
    #[clap(short = 't', long, help = "request timeout in seconds")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<ClapCommand>,
}

#[derive(Subcommand, Debug)]
enum ClapCommand {
    /// List the endpoints of the catalog
    List,
    /// Show the full card of an endpoint
    Show { id: String },
    /// Invoke endpoints and print their responses
    Try {
        #[clap(required = true)]
        ids: Vec<String>,
        /// Print results as JSON
        #[clap(long)]
        json: bool,
    },
    /// Copy the URL of an endpoint to the clipboard
    Copy { id: String },
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive shell
    Shell,
    List,
    Show(String),
    Try { ids: Vec<String>, json: bool },
    Copy(String),
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    catalog: Option<String>,
    timeout: Option<u64>,
    command: Command,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        let command = match args.command {
            None => Command::Shell,
            Some(ClapCommand::List) => Command::List,
            Some(ClapCommand::Show { id }) => Command::Show(id),
            Some(ClapCommand::Try { ids, json }) => Command::Try { ids, json },
            Some(ClapCommand::Copy { id }) => Command::Copy(id),
        };
        Self {
            catalog: args.catalog,
            timeout: args.timeout,
            command,
        }
    }

    pub fn catalog(&self) -> Option<&String> {
        self.catalog.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}
