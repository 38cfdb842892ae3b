//! Example demonstrating call updates with the Twilio API client.
//!
//! Run with:
//! ```
//! TWILIO_ACCOUNT_SID=AC... TWILIO_AUTH_TOKEN=... cargo run --example update_call -- CA...
//! ```

use tracing_subscriber::EnvFilter;
use twilapi::{CallStatus, CallUpdater, HttpMethod, TwilioClient, TwilioError, Updater};
use url::Url;

#[tokio::main]
async fn main() -> twilapi::Result<()> {
    // RUST_LOG=twilapi=debug shows request details
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let sid = std::env::args().nth(1).ok_or_else(|| {
        TwilioError::ConfigMissing("usage: update_call <CallSid>".to_string())
    })?;

    // Create client from environment variables
    println!("Creating Twilio client...");
    let client = TwilioClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Preview the request without sending it
    let updater = CallUpdater::new(&sid)
        .with_url(Url::parse("http://demo.twilio.com/docs/voice.xml")?)
        .with_method(HttpMethod::Get);
    let request = updater.build_request(twilapi::RestClient::account_sid(&client));
    println!("\n--- Redirect Request ---");
    println!("{} {}", request.method(), request.path());
    for (name, value) in request.post_params() {
        println!("  {name} = {value}");
    }

    // Redirect the call to the demo TwiML
    println!("\n--- Redirecting Call ---");
    match updater.execute(&client).await {
        Ok(call) => println!("Call {} is {}", call.sid, call.status),
        Err(TwilioError::Api { code, message, .. }) => {
            println!("Redirect rejected ({code}): {message}");
        }
        Err(e) => return Err(e),
    }

    // Hang up
    println!("\n--- Completing Call ---");
    let call = CallUpdater::new(&sid)
        .with_status(CallStatus::Completed)
        .execute(&client)
        .await?;
    println!("Call {} is {}", call.sid, call.status);
    if let Some(duration) = call.duration {
        println!("  Duration: {duration}s");
    }

    Ok(())
}
