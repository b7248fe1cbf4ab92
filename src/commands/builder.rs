use crate::context::ServerContext;

/// Fixed-length stand-in for the credential token in display renderings.
/// Constant length so the rendering leaks nothing about the secret.
const CREDENTIAL_MASK: &str = "********";

/// Builds the ordered argument list for one invocation of the TFVC client.
///
/// Every invocation starts with `-noprompt`. When a server context with
/// credentials is supplied, the collection and login tokens are injected ahead
/// of any positional arguments.
#[derive(Debug)]
pub struct ArgumentBuilder {
    command: String,
    arguments: Vec<String>,
    secret_indexes: Vec<usize>,
}

impl ArgumentBuilder {
    pub fn new(command: &str) -> Self {
        Self::with_context(command, None)
    }

    pub fn with_context(command: &str, context: Option<&ServerContext>) -> Self {
        let mut builder = Self {
            command: command.to_string(),
            arguments: Vec::new(),
            secret_indexes: Vec::new(),
        };
        builder = builder.add_switch("noprompt");
        if let Some(context) = context {
            if let Some(credentials) = context.credentials() {
                builder = builder.add_option("collection", context.collection_url());
                builder = builder.add_secret(credentials.login_token());
            }
        }
        builder
    }

    /// Append a raw token
    pub fn add<S: Into<String>>(mut self, token: S) -> Self {
        self.arguments.push(token.into());
        self
    }

    /// Append tokens in caller order. Order is significant: it determines the
    /// order results are reported in by most commands.
    pub fn add_all<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self = self.add(token);
        }
        self
    }

    /// Append `-name`
    pub fn add_switch(self, name: &str) -> Self {
        self.add(format!("-{}", name))
    }

    /// Append `-name:value`
    pub fn add_option(self, name: &str, value: &str) -> Self {
        self.add(format!("-{}:{}", name, value))
    }

    /// Append a token that must be masked in display renderings
    fn add_secret(mut self, token: String) -> Self {
        self.secret_indexes.push(self.arguments.len());
        self.arguments.push(token);
        self
    }

    pub fn build(self) -> ArgumentProvider {
        ArgumentProvider {
            command: self.command,
            arguments: self.arguments,
            secret_indexes: self.secret_indexes,
        }
    }
}

/// The finalized, ordered argument list for one invocation, with a parallel
/// credential-masked rendering for display and logging.
#[derive(Debug, Clone)]
pub struct ArgumentProvider {
    command: String,
    arguments: Vec<String>,
    secret_indexes: Vec<usize>,
}

impl ArgumentProvider {
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The real argument list. Never passes through the masking transform, so
    /// the mask string can never reach the external tool.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Token-for-token rendering with credential tokens replaced by the mask.
    /// Always the same length as `arguments`.
    pub fn arguments_for_display(&self) -> Vec<String> {
        self.arguments
            .iter()
            .enumerate()
            .map(|(index, token)| {
                if self.secret_indexes.contains(&index) {
                    CREDENTIAL_MASK.to_string()
                } else {
                    token.clone()
                }
            })
            .collect()
    }

    /// Command plus masked arguments, space-joined. Safe for logs and UI.
    pub fn display_string(&self) -> String {
        let mut parts = vec![self.command.clone()];
        parts.extend(self.arguments_for_display());
        parts.join(" ")
    }
}
