//! Network URL constants for the wallet pass API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://walletobjects.googleapis.com/walletobjects/v1";

/// Default batch endpoint.
pub const DEFAULT_BATCH_URL: &str = "https://walletobjects.googleapis.com/batch";

/// Default OAuth2 token endpoint, used when a key file omits `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth scope granting the wallet-issuer role.
pub const WALLET_ISSUER_SCOPE: &str = "https://www.googleapis.com/auth/wallet_object.issuer";

/// Prefix of every save-to-wallet link. The signed token is appended after a `/`.
pub const SAVE_URL_PREFIX: &str = "https://pay.google.com/gp/v/save";
