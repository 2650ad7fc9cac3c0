use clap::{Parser, Subcommand};

mod access;
mod db;
mod token;

#[derive(Debug, Parser)]
#[command(name = "hr-trainer-app", about = "HR Trainer admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(token::TokenCommand),
    Db(db::DbCommand),
    Access(access::AccessArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
            Commands::Access(args) => access::run(args).await,
        }
    }
}
