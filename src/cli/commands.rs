use clap::{Parser, Subcommand};

/// `Mailroom` - Email triage and reply drafting over a hosted language model.
#[derive(Parser, Debug)]
#[command(name = "mailroom")]
#[command(author = "theonlyhennygod")]
#[command(version)]
#[command(about = "Classify emails and draft replies with a language model.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway and the liveness keeper
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Classify a single email and print the result as JSON
    Classify {
        /// Email text to classify
        text: String,
    },

    /// Rewrite a text according to an instruction
    Revise {
        /// Instruction to apply (e.g. "tornar mais formal")
        #[arg(short, long)]
        action: String,

        /// Text to revise
        text: String,
    },
}
