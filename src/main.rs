// activation - sample CLI for runtime key activation
//
// Posts an activation request to a License Manager server, prints the raw
// JSON response, and surfaces the token when the server returned one. The
// process exit code is the client's status code: 0 on a completed exchange.

use std::time::Duration;

use clap::Parser;

use license_manager::activate_with_timeout;

#[derive(Parser, Debug)]
#[command(name = "activation")]
#[command(about = "Activate a runtime key against a License Manager server", version)]
struct Args {
    /// Server URL to connect to, e.g. https://localhost:3600
    #[arg(long)]
    url: String,

    /// Secret master key or slave key (base64)
    #[arg(long = "masterOrSlaveKey")]
    master_or_slave_key: String,

    /// Runtime key to activate (base64)
    #[arg(long = "runtimeKey")]
    runtime_key: String,

    /// Connection timeout in milliseconds; 0 disables the deadline
    #[arg(long = "timeoutMillis", default_value_t = 10_000)]
    timeout_millis: u64,
}

fn main() {
    init_tracing();

    let args = Args::parse();

    match activate_with_timeout(
        &args.url,
        &args.master_or_slave_key,
        &args.runtime_key,
        Duration::from_millis(args.timeout_millis),
    ) {
        Ok(response) => {
            println!("{response}");
            if let Some(token) = extract_token(&response) {
                println!("token: {token}");
            }
        }
        Err(err) => {
            let code = err.code();
            eprintln!("error: {:#}", anyhow::Error::new(err));
            std::process::exit(code);
        }
    }
}

/// Log level control: INFO by default, overridden with RUST_LOG.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Best-effort extraction of the `token` field from the server's response.
/// `None` when the body is not JSON or carries no string `token`.
fn extract_token(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    Some(value.get("token")?.as_str()?.to_owned())
}
