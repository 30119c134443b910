use shared::domain::RuleId;
use thiserror::Error;
use url::Url;

use crate::EditorLinkResolver;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid editor base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("editor base url '{0}' cannot carry a path")]
    CannotBeABase(String),
    #[error("editor links need both a project and a transform task")]
    MissingTaskContext,
}

/// Links into the formula editor of one transform task:
/// `{base}/transform/{project}/{task}/editor?rule={id}`.
#[derive(Debug, Clone)]
pub struct TransformEditorLinks {
    base: Url,
    project: String,
    transform_task: String,
}

impl TransformEditorLinks {
    pub fn new(
        base_url: &str,
        project: impl Into<String>,
        transform_task: impl Into<String>,
    ) -> Result<Self, LinkError> {
        let base = Url::parse(base_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(LinkError::CannotBeABase(base_url.to_string()));
        }

        let project = project.into();
        let transform_task = transform_task.into();
        if project.is_empty() || transform_task.is_empty() {
            return Err(LinkError::MissingTaskContext);
        }

        Ok(Self {
            base,
            project,
            transform_task,
        })
    }
}

impl EditorLinkResolver for TransformEditorLinks {
    fn editor_href(&self, id: &RuleId) -> Option<String> {
        if id.is_empty() {
            return None;
        }

        let mut url = self.base.clone();
        url.path_segments_mut().ok()?.pop_if_empty().extend([
            "transform",
            self.project.as_str(),
            self.transform_task.as_str(),
            "editor",
        ]);
        url.query_pairs_mut().clear().append_pair("rule", id.as_str());
        Some(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_editor_href_under_base_path() {
        let links = TransformEditorLinks::new("http://localhost:9090/dataintegration/", "movies", "mapping")
            .expect("links");
        assert_eq!(
            links.editor_href(&RuleId::from("name")).as_deref(),
            Some("http://localhost:9090/dataintegration/transform/movies/mapping/editor?rule=name")
        );
    }

    #[test]
    fn builds_editor_href_for_bare_host() {
        let links = TransformEditorLinks::new("http://localhost:9090", "p", "t").expect("links");
        assert_eq!(
            links.editor_href(&RuleId::from("r1")).as_deref(),
            Some("http://localhost:9090/transform/p/t/editor?rule=r1")
        );
    }

    #[test]
    fn empty_rule_id_has_no_link() {
        let links = TransformEditorLinks::new("http://localhost", "p", "t").expect("links");
        assert_eq!(links.editor_href(&RuleId::default()), None);
    }

    #[test]
    fn rejects_unusable_configuration() {
        assert!(matches!(
            TransformEditorLinks::new("not a url", "p", "t"),
            Err(LinkError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            TransformEditorLinks::new("mailto:someone@example.com", "p", "t"),
            Err(LinkError::CannotBeABase(_))
        ));
        assert!(matches!(
            TransformEditorLinks::new("http://localhost", "", "t"),
            Err(LinkError::MissingTaskContext)
        ));
    }
}
