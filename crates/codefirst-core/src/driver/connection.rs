use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the store lives and how to log into it.
///
/// The descriptor is assembled into a connection string for providers that
/// want one; it is never parsed back.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Host name, or a file path for file-based stores
    pub data_source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ConnectionDescriptor {
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            ..Default::default()
        }
    }

    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// `DATA SOURCE=<source>[/<service>];PASSWORD=<pw>;PERSIST SECURITY
    /// INFO=True;POOLING=False;USER ID=<USER>`
    pub fn connection_string(&self) -> String {
        self.format(self.password.as_deref().unwrap_or_default())
    }

    /// The connection string with the password masked, for logs.
    pub fn redacted(&self) -> String {
        self.format("***")
    }

    fn format(&self, password: &str) -> String {
        let mut source = self.data_source.clone();
        if let Some(service) = self.service_name.as_deref().filter(|s| !s.is_empty()) {
            source.push('/');
            source.push_str(service);
        }

        format!(
            "DATA SOURCE={source};PASSWORD={password};PERSIST SECURITY INFO=True;POOLING=False;USER ID={}",
            self.user.as_deref().unwrap_or_default().to_uppercase()
        )
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("data_source", &self.data_source)
            .field("service_name", &self.service_name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ConnectionDescriptor {
        ConnectionDescriptor::new("db.example.com:1521")
            .service_name("ORCL")
            .user("scott")
            .password("tiger")
    }

    #[test]
    fn connection_string_upper_cases_user() {
        assert_eq!(
            descriptor().connection_string(),
            "DATA SOURCE=db.example.com:1521/ORCL;PASSWORD=tiger;PERSIST SECURITY INFO=True;POOLING=False;USER ID=SCOTT"
        );
    }

    #[test]
    fn service_name_is_optional() {
        let conn = ConnectionDescriptor::new("app.db");
        assert_eq!(
            conn.connection_string(),
            "DATA SOURCE=app.db;PASSWORD=;PERSIST SECURITY INFO=True;POOLING=False;USER ID="
        );
    }

    #[test]
    fn redacted_masks_password() {
        let redacted = descriptor().redacted();
        assert!(redacted.contains("PASSWORD=***;"));
        assert!(!redacted.contains("tiger"));
        assert!(!format!("{:?}", descriptor()).contains("tiger"));
    }
}
