use serde::{Deserialize, Deserializer, Serialize};

/// A user record as held by the Identity Store.
///
/// The password is stored and compared as a plain value because that is the
/// contract of the mock Identity Store this client talks to. A production
/// store must hash credentials at its boundary instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, rename = "profilePic")]
    pub profile_pic: String,
}

/// Payload for creating a user; the Identity Store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(rename = "profilePic")]
    pub profile_pic: String,
}

// json-server hands out numeric ids for seeded records and string ids for
// created ones; the client treats both as opaque strings.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(u64),
        Str(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Num(n) => n.to_string(),
        Id::Str(s) => s,
    })
}
