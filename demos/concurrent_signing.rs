use std::time::Instant;

use anyhow::Result;
use wechat_jssdk::{canonicalize, compute_signature, sha1_hex};

#[tokio::main]
async fn main() -> Result<()> {
    let pages: Vec<String> = (0..1000)
        .map(|i| format!("https://example.com/article/{i}?from=timeline"))
        .collect();

    println!("Signing {} pages concurrently...", pages.len());
    let start = Instant::now();

    // Spawn concurrent tasks
    let handles: Vec<_> = pages
        .iter()
        .enumerate()
        .map(|(i, url)| {
            let ticket = format!("ticket-{}", i % 7);
            let url = url.clone();
            tokio::spawn(async move { compute_signature(&ticket, &url) })
        })
        .collect();

    let mut mismatches = 0;
    let mut signed = 0;
    for handle in futures::future::join_all(handles).await {
        let payload = handle??;
        let expected = sha1_hex(&canonicalize(payload.input.fields()));
        if expected != payload.signature {
            mismatches += 1;
        }
        signed += 1;
    }

    let elapsed = start.elapsed();
    println!("\n=== Results ===");
    println!("Signed {} pages in {:?}", signed, elapsed);
    println!(
        "Throughput: {:.2} signatures/sec",
        signed as f64 / elapsed.as_secs_f64()
    );
    println!("Mismatches: {}", mismatches);

    Ok(())
}
