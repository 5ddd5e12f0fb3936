use secrecy::{ExposeSecret, SecretString};
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Doctor,
    Patient,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Doctor => "doctor",
            UserType::Patient => "patient",
        }
    }
}

/// Authentication record as returned by the backend; the password hash is
/// write-only on the server and never comes back.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRecord {
    pub user_id: String,
    pub user_type: UserType,
    pub phone_number: String,
    pub email: String,
}

/// Answer of the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub user_type: UserType,
}

/// Body of `POST authentication/`.
#[derive(Debug)]
pub struct NewAuthRecord {
    pub user_id: String,
    pub user_type: UserType,
    pub phone_number: String,
    pub email: String,
    pub password: SecretString,
}

impl Serialize for NewAuthRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NewAuthRecord", 5)?;
        state.serialize_field("user_id", &self.user_id)?;
        state.serialize_field("user_type", &self.user_type)?;
        state.serialize_field("phone_number", &self.phone_number)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

/// Body of `POST authentication/login/`.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: &str, password: SecretString) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password,
        }
    }
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Credentials", 2)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}

/// Body of `PUT authentication/{user_id}/` when rotating the password.
#[derive(Debug)]
pub struct PasswordUpdate {
    pub password: SecretString,
}

impl Serialize for PasswordUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PasswordUpdate", 1)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.end()
    }
}
