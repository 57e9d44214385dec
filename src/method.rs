//! HTTP method type for schema-declared operations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods an operation may declare in the schema.
///
/// The schema parser accepts any casing (`put`, `PUT`); `Display` always
/// renders uppercase, which is also what the request fingerprint hashes.
///
/// ## Examples
///
/// ```rust
/// use registry_acl::RestMethod;
///
/// let method: RestMethod = "put".parse().unwrap();
/// assert_eq!(method, RestMethod::Put);
/// assert_eq!(method.to_string(), "PUT");
/// assert!(method.has_body());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource. Schema default when no method is given.
    #[default]
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP DELETE - Remove a resource.
    Delete,
}

impl RestMethod {
    /// Returns `true` if this method carries a request body.
    ///
    /// A trailing data object becomes the request body for POST and PUT,
    /// and the query string for GET.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
