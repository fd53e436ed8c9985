use crate::core::document::node::Branch;
use serde::Serialize;

/// A downloadable file belonging to a potential implementation.
///
/// Stored in documents as `artifact/web-link{URL, label, link-text}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Artifact {
    pub url: Option<String>,
    pub label: Option<String>,
    /// Local file name the artifact is saved under.
    pub filename: Option<String>,
}

impl Artifact {
    pub(crate) fn from_branch(branch: &Branch) -> Self {
        match branch.get("web-link").and_then(|node| node.as_branch()) {
            Some(link) => Self {
                url: link.get_text("URL"),
                label: link.get_text("label"),
                filename: link.get_text("link-text"),
            },
            None => Self::default(),
        }
    }

    pub(crate) fn to_branch(&self) -> Branch {
        let mut link = Branch::new();
        for (tag, value) in [
            ("URL", &self.url),
            ("label", &self.label),
            ("link-text", &self.filename),
        ] {
            if let Some(value) = value {
                link.insert(tag, value.as_str());
            }
        }
        let mut branch = Branch::new();
        branch.insert("web-link", link);
        branch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_branch_reads_web_link_fields() {
        let mut link = Branch::new();
        link.insert("URL", "https://example.org/Cu.eam")
            .insert("label", "EAM file")
            .insert("link-text", "Cu.eam");
        let mut branch = Branch::new();
        branch.insert("web-link", link);

        let artifact = Artifact::from_branch(&branch);
        assert_eq!(artifact.url.as_deref(), Some("https://example.org/Cu.eam"));
        assert_eq!(artifact.label.as_deref(), Some("EAM file"));
        assert_eq!(artifact.filename.as_deref(), Some("Cu.eam"));
        assert_eq!(Artifact::from_branch(&artifact.to_branch()), artifact);
    }

    #[test]
    fn from_branch_without_web_link_is_empty() {
        assert_eq!(Artifact::from_branch(&Branch::new()), Artifact::default());
    }
}
