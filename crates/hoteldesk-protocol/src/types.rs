//! Core protocol types for the HotelDesk API.
//!
//! These are the structures that travel "on the wire" between the
//! front-desk client and the remote REST API: the authenticated identity
//! returned by a login, the login request itself, and the generic
//! `{ success, message, data }` envelope every endpoint answers with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a user account.
///
/// Newtype wrapper around the numeric id the API hands out, so a
/// `UserId` can never be passed where a [`HotelId`] is expected.
/// `#[serde(transparent)]` keeps it a bare number in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A unique identifier for a hotel (the owning organization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelId(pub u64);

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AccountType
// ---------------------------------------------------------------------------

/// Which kind of account is logging in.
///
/// The API distinguishes two closed cases:
/// - `Hotel`: an organization-level account (the hotel itself).
/// - `User`: a staff-level account working for a hotel.
///
/// On the wire these are `"HOTEL"` and `"USER"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Hotel,
    User,
}

impl AccountType {
    /// The wire representation (`"HOTEL"` / `"USER"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotel => "HOTEL",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `"HOTEL"`/`"USER"` in any letter case.
impl FromStr for AccountType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOTEL" => Ok(Self::Hotel),
            "USER" => Ok(Self::User),
            other => Err(ProtocolError::InvalidMessage(format!(
                "unknown account type: {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The authenticated principal returned by `POST /auth/login`.
///
/// This is the session record: the session store holds exactly one of
/// these (or nothing), persists it as JSON under `currentUser`, and the
/// API client reads its `token` to sign every outgoing request.
///
/// An identity is either absent or *fully populated*: a record with an
/// empty token is not a valid session. [`Identity::validate`] enforces
/// that before anything is stored.
///
/// Field names follow the API's camelCase JSON. `type` is a Rust keyword,
/// so the token type lives in `token_type` and is renamed on the wire.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Opaque bearer credential.
    pub token: String,

    /// Token scheme reported by the server, usually `"Bearer"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    pub id: UserId,
    pub email: String,

    /// Display name. Some account types only fill in first/last name, so
    /// a missing `name` decodes as empty rather than failing.
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    pub account_type: AccountType,

    /// Owning hotel. Null for accounts that are not attached to one.
    #[serde(default)]
    pub hotel_id: Option<HotelId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Identity {
    /// Checks the "fully populated" invariant.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] when the token is empty
    /// or whitespace.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.token.trim().is_empty() {
            return Err(ProtocolError::InvalidMessage(format!(
                "identity {} has an empty token",
                self.id
            )));
        }
        Ok(())
    }

    /// Returns `true` if the identity carries the given role.
    ///
    /// An identity without a role list has no roles.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles
            .as_ref()
            .is_some_and(|roles| roles.iter().any(|r| r == role))
    }

    /// Returns `true` if the identity carries the given permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|perms| perms.iter().any(|p| p == permission))
    }

    /// `"First Last"` when both parts are known, otherwise `name`.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => self.name.clone(),
        }
    }
}

/// Hand-written so the bearer token never ends up in a log line.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("account_type", &self.account_type)
            .field("hotel_id", &self.hotel_id)
            .field("hotel_name", &self.hotel_name)
            .field("roles", &self.roles)
            .field("permissions", &self.permissions)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// LoginRequest
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub account_type: AccountType,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("account_type", &self.account_type)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ApiEnvelope
// ---------------------------------------------------------------------------

/// The `{ success, message, data }` wrapper around every API response.
///
/// `data` is an `Option` because failures usually omit it (or send
/// `null`), and "void" endpoints such as `DELETE /chambres/{id}` never
/// carry any. `message` defaults to an empty string when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload of a successful envelope.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] with the server's message
    /// when `success` is false, or when a successful envelope has no data.
    pub fn into_data(self) -> Result<T, ProtocolError> {
        if !self.success {
            return Err(ProtocolError::InvalidMessage(self.message));
        }
        self.data.ok_or_else(|| {
            ProtocolError::InvalidMessage("response carried no data".into())
        })
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// UI colour scheme preference, persisted under the `theme` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme. Mirrors the header's toggle button.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ProtocolError::InvalidMessage(format!(
                "unknown theme: {other:?}"
            ))),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Wire-format tests: each one pins a JSON shape the remote API
    //! produces or expects.

    use super::*;
    use serde_json::json;

    fn login_payload() -> serde_json::Value {
        json!({
            "token": "tok123",
            "type": "Bearer",
            "id": 1,
            "email": "a@b.com",
            "name": "Awa Diop",
            "firstName": "Awa",
            "lastName": "Diop",
            "accountType": "USER",
            "hotelId": 12,
            "hotelName": "Hotel Teranga",
            "roles": ["RECEPTION"],
            "permissions": ["RESERVATION_WRITE"]
        })
    }

    // =====================================================================
    // UserId / HotelId
    // =====================================================================

    #[test]
    fn test_user_id_serializes_as_bare_number() {
        let json = serde_json::to_value(UserId(42)).unwrap();
        assert_eq!(json, json!(42));
    }

    #[test]
    fn test_ids_display_with_prefix() {
        assert_eq!(UserId(7).to_string(), "U-7");
        assert_eq!(HotelId(3).to_string(), "H-3");
    }

    // =====================================================================
    // AccountType
    // =====================================================================

    #[test]
    fn test_account_type_wire_names_are_uppercase() {
        assert_eq!(serde_json::to_value(AccountType::Hotel).unwrap(), "HOTEL");
        assert_eq!(serde_json::to_value(AccountType::User).unwrap(), "USER");
    }

    #[test]
    fn test_account_type_from_str_ignores_case() {
        assert_eq!("hotel".parse::<AccountType>().unwrap(), AccountType::Hotel);
        assert_eq!(" User ".parse::<AccountType>().unwrap(), AccountType::User);
    }

    #[test]
    fn test_account_type_from_str_unknown_returns_error() {
        let result = "ADMIN".parse::<AccountType>();
        assert!(matches!(result, Err(ProtocolError::InvalidMessage(_))));
    }

    // =====================================================================
    // Identity
    // =====================================================================

    #[test]
    fn test_identity_decodes_full_login_payload() {
        let identity: Identity = serde_json::from_value(login_payload()).unwrap();

        assert_eq!(identity.token, "tok123");
        assert_eq!(identity.token_type.as_deref(), Some("Bearer"));
        assert_eq!(identity.id, UserId(1));
        assert_eq!(identity.account_type, AccountType::User);
        assert_eq!(identity.hotel_id, Some(HotelId(12)));
        assert!(identity.has_role("RECEPTION"));
        assert!(identity.has_permission("RESERVATION_WRITE"));
    }

    #[test]
    fn test_identity_decodes_null_hotel_id() {
        let mut payload = login_payload();
        payload["hotelId"] = serde_json::Value::Null;
        payload["accountType"] = json!("HOTEL");

        let identity: Identity = serde_json::from_value(payload).unwrap();

        assert_eq!(identity.hotel_id, None);
        assert_eq!(identity.account_type, AccountType::Hotel);
    }

    #[test]
    fn test_identity_serializes_token_type_as_type() {
        let identity: Identity = serde_json::from_value(login_payload()).unwrap();
        let json = serde_json::to_value(&identity).unwrap();

        assert_eq!(json["type"], "Bearer");
        assert_eq!(json["accountType"], "USER");
        assert_eq!(json["firstName"], "Awa");
        assert!(json.get("tokenType").is_none());
    }

    #[test]
    fn test_identity_validate_empty_token_returns_error() {
        let mut identity: Identity =
            serde_json::from_value(login_payload()).unwrap();
        identity.token = "   ".into();

        assert!(identity.validate().is_err());
    }

    #[test]
    fn test_identity_has_role_without_list_is_false() {
        let mut identity: Identity =
            serde_json::from_value(login_payload()).unwrap();
        identity.roles = None;

        assert!(!identity.has_role("RECEPTION"));
    }

    #[test]
    fn test_identity_display_name_prefers_first_and_last() {
        let mut identity: Identity =
            serde_json::from_value(login_payload()).unwrap();
        assert_eq!(identity.display_name(), "Awa Diop");

        identity.last_name = None;
        identity.name = "Reception desk".into();
        assert_eq!(identity.display_name(), "Reception desk");
    }

    #[test]
    fn test_identity_debug_redacts_token() {
        let identity: Identity = serde_json::from_value(login_payload()).unwrap();
        let printed = format!("{identity:?}");

        assert!(!printed.contains("tok123"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_login_request_wire_format_and_redaction() {
        let request = LoginRequest {
            email: "a@b.com".into(),
            password: "x".into(),
            account_type: AccountType::User,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            json!({"email": "a@b.com", "password": "x", "accountType": "USER"})
        );
        assert!(!format!("{request:?}").contains("\"x\""));
    }

    // =====================================================================
    // ApiEnvelope
    // =====================================================================

    #[test]
    fn test_envelope_failure_without_data_decodes() {
        let envelope: ApiEnvelope<Identity> =
            serde_json::from_value(json!({"success": false, "message": "bad creds"}))
                .unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.message, "bad creds");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_null_data_for_non_default_payload_decodes() {
        let envelope: ApiEnvelope<Identity> =
            serde_json::from_value(json!({"success": true, "message": "", "data": null}))
                .unwrap();

        assert!(envelope.data.is_none());
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn test_envelope_missing_message_defaults_to_empty() {
        let envelope: ApiEnvelope<u32> =
            serde_json::from_value(json!({"success": true, "data": 3})).unwrap();

        assert_eq!(envelope.message, "");
        assert_eq!(envelope.into_data().unwrap(), 3);
    }

    #[test]
    fn test_envelope_into_data_failure_carries_message() {
        let envelope: ApiEnvelope<u32> = ApiEnvelope {
            success: false,
            message: "not found".into(),
            data: None,
        };

        let err = envelope.into_data().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_envelope_void_data_null_decodes() {
        let envelope: ApiEnvelope<()> =
            serde_json::from_value(json!({"success": true, "message": "deleted", "data": null}))
                .unwrap();

        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    // =====================================================================
    // Theme
    // =====================================================================

    #[test]
    fn test_theme_parses_stored_values() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_toggled_flips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
