//! Send a single email using the key in `MAILNOW_API_KEY`.
//!
//! ```sh
//! MAILNOW_API_KEY=mn_test_... RUST_LOG=mailnow=debug \
//!     cargo run --example send -- sender@example.com recipient@example.com
//! ```

use std::time::Duration;

use mailnow::{Client, EmailRequest, ErrorKind, cancel_after};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), mailnow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let from = args.next().unwrap_or_else(|| "sender@example.com".to_string());
    let to = args.next().unwrap_or_else(|| "recipient@example.com".to_string());

    let client = Client::from_env()?;
    let request = EmailRequest::new(from, to, "Hello from Rust", "<h1>Hello World</h1>");

    match client
        .send_email(&cancel_after(Duration::from_secs(10)), &request)
        .await
    {
        Ok(response) => {
            println!(
                "Sent: {} ({})",
                response.data.message_id, response.data.status
            );
        }
        Err(e) if e.kind() == ErrorKind::RateLimit => {
            eprintln!("Rate limited, try again later: {e}");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
