/// Example HTTP client calling the signing server
///
/// Run the server first:
/// ```bash
/// WECHAT_APP_ID=wx... WECHAT_APP_SECRET=... cargo run --bin server
/// ```
///
/// Then run this example:
/// ```bash
/// cargo run --example api_client
/// ```

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct SignRequest {
    jsapi_ticket: String,
    url: String,
}

#[derive(Deserialize, Debug)]
struct ConfigResponse {
    success: bool,
    data: BridgeConfig,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BridgeConfig {
    app_id: String,
    timestamp: String,
    nonce_str: String,
    signature: String,
}

#[derive(Deserialize, Debug)]
struct SignResponse {
    success: bool,
    data: SignedPayload,
}

#[derive(Deserialize, Debug)]
struct SignedPayload {
    #[serde(rename = "nonceStr")]
    nonce_str: String,
    timestamp: String,
    url: String,
    signature: String,
}

#[derive(Deserialize, Debug)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Deserialize, Debug)]
struct MetricsResponse {
    total_requests: u64,
    requests_in_flight: u64,
    uptime_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let page_url = "https://example.com/article/42?from=timeline#comments";
    let client = reqwest::Client::new();

    println!("=== JS-SDK Signing API Client Demo ===\n");

    // 1. Health Check
    println!("1. Checking server health...");
    let health: HealthResponse = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json()
        .await?;
    println!("   Server status: {}", health.status);
    println!("   Version: {}\n", health.version);

    // 2. Bridge config for a page
    println!("2. Requesting bridge config...");
    match client
        .get(format!("{}/api/jssdk/config", base_url))
        .query(&[("url", page_url)])
        .send()
        .await
    {
        Ok(response) => {
            if response.status().is_success() {
                let result: ConfigResponse = response.json().await?;
                println!("   success: {}", result.success);
                println!("   appId: {}", result.data.app_id);
                println!("   timestamp: {}", result.data.timestamp);
                println!("   nonceStr: {}", result.data.nonce_str);
                println!("   signature: {}\n", result.data.signature);
            } else {
                let error_text = response.text().await?;
                println!("   Error: {}\n", error_text);
            }
        }
        Err(e) => {
            println!("   Request failed: {}\n", e);
        }
    }

    // 3. Sign with a known ticket
    println!("3. Signing with an explicit ticket...");
    let request = SignRequest {
        jsapi_ticket: "sM4AOVdWfPE4DxkXGEs8VMCPGGVi4C3VM0P37wVUCFvkVAy_90u5h9nbSlYy3-Sl-HhTdfl2fzFy1AOcHKP7qg".to_string(),
        url: "http://mp.weixin.qq.com?params=value".to_string(),
    };
    match client
        .post(format!("{}/api/signature", base_url))
        .json(&request)
        .send()
        .await
    {
        Ok(response) => {
            if response.status().is_success() {
                let result: SignResponse = response.json().await?;
                println!("   success: {}", result.success);
                println!("   url: {}", result.data.url);
                println!("   nonceStr: {}", result.data.nonce_str);
                println!("   timestamp: {}", result.data.timestamp);
                println!("   signature: {}\n", result.data.signature);
            } else {
                let error_text = response.text().await?;
                println!("   Error: {}\n", error_text);
            }
        }
        Err(e) => {
            println!("   Request failed: {}\n", e);
        }
    }

    // 4. Get Metrics
    println!("4. Getting server metrics...");
    let metrics: MetricsResponse = client
        .get(format!("{}/api/metrics", base_url))
        .send()
        .await?
        .json()
        .await?;
    println!("   Total requests: {}", metrics.total_requests);
    println!("   Requests in flight: {}", metrics.requests_in_flight);
    println!("   Uptime: {} seconds\n", metrics.uptime_seconds);

    println!("=== Demo Complete ===");

    Ok(())
}
