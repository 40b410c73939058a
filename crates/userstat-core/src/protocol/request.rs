//! Request and response bodies (JSON).

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, UserstatError};

/// Body of `POST /`.
///
/// `user` is optional on the wire: absent, `null`, and `""` all decode to the
/// empty string. The key is matched case-insensitively (`"User"`, `"USER"`),
/// a later key overrides an earlier one, and a `null` value leaves the field
/// untouched. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserRequest {
    pub user: String,
}

impl UserRequest {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Decode a raw body. A bare `null` body decodes to the default request.
    /// The parse error text is kept for the 400 response.
    pub fn decode(body: &[u8]) -> Result<Self> {
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| UserstatError::BadRequest(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for UserRequest {
    fn deserialize<D>(de: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de.deserialize_map(UserRequestVisitor)
    }
}

struct UserRequestVisitor;

impl<'de> Visitor<'de> for UserRequestVisitor {
    type Value = UserRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with an optional \"user\" string")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<UserRequest, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut req = UserRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("user") {
                if let Some(user) = map.next_value::<Option<String>>()? {
                    req.user = user;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(req)
    }
}

/// Body of a successful `POST /` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}
