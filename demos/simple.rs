use serde_json::json;

pub fn main() -> Result<(), logsnag::Error> {
    env_logger::init();

    let api_token = std::env::var("LOGSNAG_API_TOKEN").unwrap();
    let project = std::env::var("LOGSNAG_PROJECT").unwrap();
    let client = logsnag::Configuration::new(api_token, project)?.to_client();

    // Invalid input is rejected before anything is sent.
    let outcome = client.log(json!({
        "channel": "waitlist",
        "event": "User Joined",
        "icon": "🎉",
        "notify": true,
        "tags": { "source": "demo", "referrer": null },
    }))?;
    println!("Log: {:?}", outcome);

    let outcome = client.mutate_insight(json!({ "title": "Waitlist", "value": 1 }))?;
    if outcome.is_error() {
        println!(
            "Insight mutation failed ({:?}): {}",
            outcome.status_code(),
            outcome.error_message().unwrap_or_default()
        );
    }

    Ok(())
}
