use std::env;

use anyhow::{Context, Result};
use wechat_jssdk::types::{RemoteStatus, access_token_of, ticket_of};
use wechat_jssdk::{CredentialRequest, TicketRequest, WechatClient, compute_signature};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <appid> <secret> <page_url>", args[0]);
        std::process::exit(1);
    }
    let (app_id, secret, page_url) = (&args[1], &args[2], &args[3]);

    let client = WechatClient::new()?;

    let token = client
        .fetch_access_token(&CredentialRequest::client_credential(app_id, secret))
        .await?;
    if let Some(status) = RemoteStatus::from_json(&token) {
        anyhow::bail!("Token request rejected: {}", status);
    }
    let access_token = access_token_of(&token).context("No access_token in response")?;

    let ticket = client
        .fetch_jsapi_ticket(&TicketRequest::jsapi(access_token))
        .await?;
    let jsapi_ticket = ticket_of(&ticket).context("No ticket in response")?;

    let payload = compute_signature(jsapi_ticket, page_url)?;

    println!("noncestr:  {}", payload.input.nonce);
    println!("timestamp: {}", payload.input.timestamp);
    println!("signature: {}", payload.signature);
    println!(
        "\nwx.config: {}",
        serde_json::to_string_pretty(&payload.bridge_config(app_id.as_str()))?
    );

    Ok(())
}
