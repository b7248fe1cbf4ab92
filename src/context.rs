use std::fmt;

/// Credentials for a team services collection.
///
/// The password is deliberately kept out of `Debug` output; the only place it
/// ever leaves this type in the clear is `login_token`, which feeds the real
/// (non-display) argument list.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The `-login:` token passed to the command line
    pub fn login_token(&self) -> String {
        format!("-login:{},{}", self.username, self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identifies the remote collection a command is issued against.
///
/// Immutable once constructed; commands borrow it only while building their
/// argument list, so one context can serve any number of concurrent commands.
#[derive(Debug, Clone)]
pub struct ServerContext {
    collection_url: String,
    credentials: Option<Credentials>,
}

impl ServerContext {
    pub fn new<S: Into<String>>(collection_url: S) -> Self {
        Self {
            collection_url: collection_url.into(),
            credentials: None,
        }
    }

    pub fn with_credentials<S: Into<String>>(collection_url: S, credentials: Credentials) -> Self {
        Self {
            collection_url: collection_url.into(),
            credentials: Some(credentials),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}
