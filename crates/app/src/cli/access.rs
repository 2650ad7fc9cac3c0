use std::{sync::Arc, time::Duration};

use clap::Args;
use hr_trainer::{
    clock::SystemClock,
    tokens::{AccessGate, GateState, TokenLifecycle, TokenSecret},
};
use hr_trainer_app::{database, tokens::PgTokenStore};
use tokio::{
    io::{AsyncBufReadExt, BufReader, stdin},
    sync::watch,
    time::timeout,
};

/// Extra time allowed for the last input to be verified after stdin closes.
const DRAIN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Args)]
pub(crate) struct AccessArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Secret used to sign access tokens
    #[arg(long, env = "TOKEN_SIGNING_SECRET", hide_env_values = true)]
    signing_secret: String,

    /// Quiet period before a typed token is checked, in milliseconds (minimum 300)
    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,
}

/// Read candidate input line by line and report gate state changes until unlocked.
pub(crate) async fn run(args: AccessArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = Arc::new(TokenLifecycle::new(
        Arc::new(PgTokenStore::new(pool)),
        TokenSecret::from(args.signing_secret),
        Arc::new(SystemClock),
    ));

    let debounce = Duration::from_millis(args.debounce_ms);
    let gate = AccessGate::spawn(service, debounce);
    let mut states = gate.subscribe();
    let mut lines = BufReader::new(stdin()).lines();

    println!("paste an access token and press enter");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.map_err(|error| format!("failed to read input: {error}"))? {
                    Some(line) => gate.input(line.trim()),
                    None => break,
                }
            }
            changed = states.changed() => {
                if changed.is_err() {
                    return Err("access gate stopped".to_string());
                }

                if report(&mut states) == GateState::Unlocked {
                    return Ok(());
                }
            }
        }
    }

    timeout(debounce + DRAIN_GRACE, async {
        while states.changed().await.is_ok() {
            if report(&mut states) == GateState::Unlocked {
                return true;
            }
        }

        false
    })
    .await
    .ok()
    .filter(|unlocked| *unlocked)
    .map(|_| ())
    .ok_or_else(|| "input closed while still locked".to_string())
}

fn report(states: &mut watch::Receiver<GateState>) -> GateState {
    let state = *states.borrow_and_update();

    match state {
        GateState::Locked => println!("locked"),
        GateState::Verifying => println!("verifying..."),
        GateState::Unlocked => println!("access granted"),
    }

    state
}
