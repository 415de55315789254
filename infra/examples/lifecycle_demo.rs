//! Credential lifecycle walkthrough
//!
//! Registers an account, verifies its email, logs in, rotates the refresh
//! token, resets the password and shows the rate limiter closing.
//!
//! Run with: cargo run -p cl_infra --example lifecycle_demo

use anyhow::Context;

use cl_core::{AuditTrail, ClientInfo};
use cl_infra::{initialize, load_config};
use cl_shared::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(None)?;
    init_tracing(&config.logging);

    let services = initialize(config).await?;
    let manager = services.manager.clone();
    let client = ClientInfo::new("127.0.0.1", "lifecycle-demo/0.1");

    println!("=== Credential lifecycle demo ===\n");

    let account = services
        .directory
        .register("demo@example.com", "$argon2id$demo-hash", "Demo User")
        .await
        .context("registering demo account")?;
    println!("Registered account {}", account.subject_id);

    let verification = manager
        .issue_email_verification(&account.subject_id, &account.email)
        .await?;
    manager.confirm_email_verification(&verification).await?;
    println!("Email verified");

    let pair = manager.login(&account.subject_id, &client).await?;
    println!(
        "Logged in: token_type={} expires_in={}",
        pair.token_type, pair.expires_in
    );

    let rotated = manager.refresh_rotate(&pair.refresh_token, &client).await?;
    match manager.refresh_rotate(&pair.refresh_token, &client).await {
        Ok(_) => println!("Replay unexpectedly accepted"),
        Err(e) => println!("Replay of the old refresh token rejected: {e}"),
    }

    let outcome = manager.request_password_reset("demo@example.com").await?;
    println!("Password reset requested: {}", outcome.public_message());
    if let Some(token) = outcome.token() {
        manager
            .confirm_password_reset(token, "$argon2id$new-demo-hash")
            .await?;
        println!("Password reset completed");
    }

    let unknown = manager.request_password_reset("nobody@example.com").await?;
    println!("Unknown email response:   {}", unknown.public_message());

    println!(
        "\nActive sessions: {}",
        manager.list_sessions(&account.subject_id).await.len()
    );
    manager
        .logout(&rotated.access_token, Some(&rotated.refresh_token))
        .await?;
    println!(
        "Active sessions after logout: {}",
        manager.list_sessions(&account.subject_id).await.len()
    );

    println!("\nRate limiter ({} per window):", services.limiter.limit());
    for attempt in 1..=services.limiter.limit() + 1 {
        match services.limiter.check("127.0.0.1").await {
            Ok(status) => println!("  attempt {attempt}: allowed, {} remaining", status.remaining),
            Err(e) => println!("  attempt {attempt}: {e}"),
        }
    }

    println!("\nAudit trail (newest first):");
    for event in services
        .audit_log
        .find_by_subject(&account.subject_id, 20)
        .await?
    {
        println!("  {} success={}", event.event_type, event.success);
    }

    Ok(())
}
