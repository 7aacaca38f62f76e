use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::FormConfig;
use crate::errors::{FormError, FormResult};
use crate::form::{FormSession, RequestForm, ResultView, Submission};
use crate::method::RpcMethod;

/// Top-level CLI interface
#[derive(Parser, Debug)]
#[command(
    name = "rpc-form",
    version,
    about = "Fill in a JSON-RPC request, send it to the bridge, show the reply"
)]
pub struct Cli {
    /// Configuration file (defaults to ./rpc_form.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the JSON-RPC endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit one request and print the result
    Send {
        /// Method to call (see `methods`)
        #[arg(short, long)]
        method: Option<RpcMethod>,
        /// Params as a JSON object; empty means {}
        #[arg(short, long, default_value = "")]
        params: String,
    },

    /// List selectable methods with a params hint for each
    Methods,

    /// Interactive form: set method and params, then send
    Shell,
}

/// Status on stderr, results on stdout.
pub struct StdioView;

impl ResultView for StdioView {
    fn show_status(&self, status: &str) {
        eprintln!("{status}");
    }

    fn show_outcome(&self, submission: &Submission) {
        println!("{}", submission.render());
    }
}

/// Writes status and results to one sink, used by the shell.
pub struct WriterView<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> WriterView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn line(&self, text: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // Terminal output; a closed pipe is not worth aborting the shell over.
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl<W: Write> ResultView for WriterView<W> {
    fn show_status(&self, status: &str) {
        self.line(status);
    }

    fn show_outcome(&self, submission: &Submission) {
        self.line(&submission.render());
    }
}

pub fn methods_listing() -> String {
    RpcMethod::ALL
        .iter()
        .map(|m| format!("{:<16} {}", m.as_str(), m.params_template()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn dispatch(cli: Cli, config: &FormConfig, session: &FormSession) -> FormResult<ExitCode> {
    match cli.command {
        Commands::Send { method, params } => {
            let form = RequestForm::new(method.unwrap_or(config.default_method), params);
            let submission = session.submit(&form, &StdioView).await;
            Ok(if submission.succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Methods => {
            println!("{}", methods_listing());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let view = WriterView::new(std::io::stdout());
            run_shell(session, config.default_method, stdin, &view).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

const SHELL_HELP: &str = "Available commands:
  method <name>   - Select the method to call
  params <json>   - Set the params text (blank clears it)
  send            - Submit the form
  show            - Display the current form fields
  methods         - List selectable methods
  help            - Show this help message
  exit            - Leave the shell";

/// Line-oriented form. Reads commands until `exit` or end of input.
pub async fn run_shell<R, W>(
    session: &FormSession,
    initial_method: RpcMethod,
    input: R,
    view: &WriterView<W>,
) -> FormResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = RequestForm::new(initial_method, "");
    view.line(&format!("rpc-form shell [endpoint: {}]", session.client().endpoint()));
    view.line("Type 'help' for a list of commands.");

    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| FormError::io("read shell input", e))?
    {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "help" => view.line(SHELL_HELP),
            "methods" => view.line(&methods_listing()),
            "method" => match rest.parse::<RpcMethod>() {
                Ok(method) => {
                    form.method = method;
                    view.line(&format!(
                        "method set to {method}; params hint: {}",
                        method.params_template()
                    ));
                }
                Err(err) => view.line(&err.to_string()),
            },
            "params" => {
                form.params_text = rest.to_string();
            }
            "show" => {
                let params = if form.params_text.is_empty() {
                    "{}"
                } else {
                    form.params_text.as_str()
                };
                view.line(&format!("method: {}\nparams: {params}", form.method));
            }
            "send" => {
                session.submit(&form, view).await;
            }
            "exit" | "quit" => break,
            other => view.line(&format!("Unknown command: {other}")),
        }
    }

    Ok(())
}
