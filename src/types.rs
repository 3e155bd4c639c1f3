use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};

/// The only grant type the token endpoint accepts.
pub const GRANT_TYPE_CLIENT_CREDENTIAL: &str = "client_credential";

/// Ticket type used for page signatures.
pub const TICKET_TYPE_JSAPI: &str = "jsapi";

/// Response of the token endpoint, returned verbatim.
pub type AccessToken = Value;

/// Response of the ticket endpoint, returned verbatim.
pub type Ticket = Value;

fn require(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidArgument(field));
    }
    Ok(())
}

/// Query for `GET /cgi-bin/token`
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRequest {
    pub grant_type: String,
    #[serde(rename = "appid")]
    pub app_id: String,
    pub secret: String,
}

impl CredentialRequest {
    pub fn new(
        grant_type: impl Into<String>,
        app_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: grant_type.into(),
            app_id: app_id.into(),
            secret: secret.into(),
        }
    }

    /// `client_credential` request for an app id/secret pair
    pub fn client_credential(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(GRANT_TYPE_CLIENT_CREDENTIAL, app_id, secret)
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.grant_type, "grant_type")?;
        require(&self.app_id, "appid")?;
        require(&self.secret, "secret")
    }
}

/// Query for `GET /cgi-bin/ticket/getticket`
#[derive(Debug, Clone, Serialize)]
pub struct TicketRequest {
    pub access_token: String,
    #[serde(rename = "type")]
    pub ticket_type: String,
}

impl TicketRequest {
    pub fn new(access_token: impl Into<String>, ticket_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ticket_type: ticket_type.into(),
        }
    }

    pub fn jsapi(access_token: impl Into<String>) -> Self {
        Self::new(access_token, TICKET_TYPE_JSAPI)
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.access_token, "access_token")?;
        require(&self.ticket_type, "type")
    }
}

/// Fields that go into a page signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInput {
    pub jsapi_ticket: String,
    #[serde(rename = "nonceStr")]
    pub nonce: String,
    pub timestamp: String,
    pub url: String,
}

impl SignatureInput {
    pub fn validate(&self) -> Result<()> {
        require(&self.jsapi_ticket, "jsapi_ticket")?;
        require(&self.url, "url")?;
        require(&self.nonce, "noncestr")?;
        require(&self.timestamp, "timestamp")
    }

    /// Name/value pairs in the spelling the signature covers.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("jsapi_ticket", self.jsapi_ticket.as_str()),
            ("noncestr", self.nonce.as_str()),
            ("timestamp", self.timestamp.as_str()),
            ("url", self.url.as_str()),
        ]
    }
}

/// A signature together with everything it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPayload {
    #[serde(flatten)]
    pub input: SignatureInput,
    /// Lowercase hex SHA-1 of the canonical string
    pub signature: String,
}

impl SignedPayload {
    /// The object a page passes to `wx.config`, minus `jsApiList`.
    pub fn bridge_config(&self, app_id: impl Into<String>) -> BridgeConfig {
        BridgeConfig {
            app_id: app_id.into(),
            timestamp: self.input.timestamp.clone(),
            nonce_str: self.input.nonce.clone(),
            signature: self.signature.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    pub app_id: String,
    pub timestamp: String,
    pub nonce_str: String,
    pub signature: String,
}

/// `access_token` field of a token response
pub fn access_token_of(value: &Value) -> Option<&str> {
    value.get("access_token")?.as_str()
}

/// `ticket` field of a ticket response
pub fn ticket_of(value: &Value) -> Option<&str> {
    value.get("ticket")?.as_str()
}

/// `expires_in` (seconds) of a token or ticket response
pub fn expires_in_of(value: &Value) -> Option<u64> {
    value.get("expires_in")?.as_u64()
}

/// `{errcode, errmsg}` pair the platform embeds in its JSON bodies.
///
/// The ticket endpoint always sends it (`errcode: 0` on success); the token
/// endpoint only on failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteStatus {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl RemoteStatus {
    /// `None` when the body carries no integer `errcode`.
    pub fn from_json(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    pub fn is_ok(&self) -> bool {
        self.errcode == 0
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "errcode {}: {}", self.errcode, self.errmsg)
    }
}
