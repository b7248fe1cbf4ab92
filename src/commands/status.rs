use crate::commands::builder::{ArgumentBuilder, ArgumentProvider};
use crate::commands::helper::{self, XmlElement};
use crate::commands::TfvcCommand;
use crate::context::ServerContext;
use crate::error::TfvcResult;
use crate::exec::ExecutionResult;

/// One pending (or candidate) change reported by the status command.
///
/// Fields are carried as the tool reports them; dates and versions stay
/// textual because their formats vary with server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingChange {
    pub change_type: String,
    pub computer: String,
    pub date: String,
    pub local_item: String,
    pub lock: String,
    pub owner: String,
    pub server_item: String,
    pub version: String,
    pub workspace: String,
    /// True for detected local changes not yet pended on the server
    pub is_candidate: bool,
}

/// Lists pending changes for the workspace, or for the given items only.
///
/// `status -recursive -format:xml [<itemSpec>...]`
pub struct Status<'a> {
    context: Option<&'a ServerContext>,
    local_paths: Vec<String>,
}

impl<'a> Status<'a> {
    /// An empty path list means the whole workspace
    pub fn new<I, S>(context: Option<&'a ServerContext>, local_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            context,
            local_paths: local_paths.into_iter().map(Into::into).collect(),
        }
    }

    fn pending_change(element: &XmlElement, is_candidate: bool) -> PendingChange {
        let attr = |name: &str| element.attribute(name).unwrap_or_default().to_string();
        PendingChange {
            change_type: attr("changetype"),
            computer: attr("computer"),
            date: attr("date"),
            local_item: attr("localitem"),
            lock: attr("lock"),
            owner: attr("owner"),
            server_item: attr("serveritem"),
            version: attr("version"),
            workspace: attr("workspace"),
            is_candidate,
        }
    }

    fn collect(tree: &XmlElement, section: &str, is_candidate: bool, into: &mut Vec<PendingChange>) {
        if let Some(changes) = tree.child(section) {
            for change in changes.children_named("pendingchange") {
                into.push(Self::pending_change(change, is_candidate));
            }
        }
    }
}

impl TfvcCommand for Status<'_> {
    type Output = Vec<PendingChange>;

    fn arguments(&self) -> ArgumentProvider {
        ArgumentBuilder::with_context("status", self.context)
            .add_switch("recursive")
            .add_option("format", "xml")
            .add_all(self.local_paths.iter().cloned())
            .build()
    }

    /// Example output:
    /// ```text
    /// <?xml version="1.0" encoding="UTF-8"?><status>
    /// <pending-changes><pending-change server-item="$/project/file.txt" .../></pending-changes>
    /// <candidate-pending-changes>...</candidate-pending-changes></status>
    /// ```
    fn parse_output(&self, result: &ExecutionResult) -> TfvcResult<Self::Output> {
        helper::process_errors(self.arguments().command(), result, false)?;

        // No document at all (empty output, or banner noise only) means no
        // pending changes; a present-but-broken document is still an error
        if !result.stdout.contains("<?xml") {
            return Ok(Vec::new());
        }

        let tree = helper::parse_xml(helper::trim_to_xml(&result.stdout))?;
        let mut changes = Vec::new();
        Self::collect(&tree, "pendingchanges", false, &mut changes);
        Self::collect(&tree, "candidatependingchanges", true, &mut changes);
        Ok(changes)
    }
}
