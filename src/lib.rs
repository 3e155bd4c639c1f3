//! Helpers for authenticating a web page against the WeChat JS-SDK bridge.
//!
//! ```rust,no_run
//! # async fn example() -> wechat_jssdk::Result<()> {
//! use wechat_jssdk::{CredentialRequest, TicketRequest, WechatClient, compute_signature};
//! use wechat_jssdk::types::{access_token_of, ticket_of};
//!
//! let client = WechatClient::new()?;
//! let token = client
//!     .fetch_access_token(&CredentialRequest::client_credential("wx123", "secret"))
//!     .await?;
//! let ticket = client
//!     .fetch_jsapi_ticket(&TicketRequest::jsapi(access_token_of(&token).unwrap_or_default()))
//!     .await?;
//!
//! let payload = compute_signature(
//!     ticket_of(&ticket).unwrap_or_default(),
//!     "https://example.com/page",
//! )?;
//! println!("{}", payload.signature);
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod client;
pub mod error;
pub mod nonce;
pub mod signature;
pub mod timestamp;
pub mod types;

pub use canonical::canonicalize;
pub use client::{ClientConfig, WechatClient, fetch_access_token, fetch_jsapi_ticket};
pub use error::{Error, NetworkError, Result};
pub use nonce::create_nonce_str;
pub use signature::{compute_signature, sha1_hex, sign_with, signable_url};
pub use timestamp::create_timestamp;
pub use types::{
    AccessToken, BridgeConfig, CredentialRequest, SignatureInput, SignedPayload, Ticket,
    TicketRequest,
};
