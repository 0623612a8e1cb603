//! Mint a hosted verification link for a user.
//!
//! Run with real sandbox credentials:
//! `cargo run --example generate_link`

use kyc_sdk::{GenerateLinkRequest, KycClient, KycConfig, KycError};

#[tokio::main]
async fn main() -> Result<(), KycError> {
    let client = KycClient::new(KycConfig {
        base_url: "https://api.sumsub.com".into(),
        app_token: "sbx:your-app-token".into(),
        secret_key: "your-signing-secret".into(),
        webhook_secret: "your-webhook-secret".into(),
        ..Default::default()
    })?;

    let url = client
        .generate_link(GenerateLinkRequest {
            user_id: "user-123".into(),
            level_name: "id-and-liveness".into(),
            ttl_secs: 1800,
            ..Default::default()
        })
        .await?;

    println!("verification link: {url}");
    Ok(())
}
