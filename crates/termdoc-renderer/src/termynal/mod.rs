//! Animated transcript boxes (`termynal`).
//!
//! ```text
//! :::termynal[termynal:install]{startDelay=600}
//! - value: pip install termdoc
//!   type: input
//! - type: progress
//! - Successfully installed termdoc
//! :::
//! ```
//!
//! Without a body the transcript is read from `<termynal.dir>/install.yml`.

mod activation;
mod lines;
mod schema;

pub use activation::{ACTIVATION_SCRIPT, activation_script, inject_activation, validate_containment};
pub use lines::{LineType, TranscriptLine, parse_lines};
pub use schema::{BoxOption, BoxOptions, Constraint, LineField};

use crate::directive::{DirectiveContext, Invocation, TranscriptDirective, transcript_id};
use crate::error::Result;
use crate::source::{load_content, resolve_source};
use crate::transcript::TranscriptFormat;
use crate::tree::{AnimatedBox, Node};

/// `termynal` directive handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct TermynalDirective;

impl TranscriptDirective for TermynalDirective {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::Termynal
    }

    fn run(&self, invocation: &Invocation, ctx: &mut DirectiveContext<'_>) -> Result<Node> {
        let id = transcript_id(self.format(), &invocation.args)?;
        let options = BoxOptions::from_args(&invocation.args)?;

        let source = resolve_source(&id, invocation.body.as_deref(), ctx)?;
        let content = load_content(&source, ctx)?;
        let lines = parse_lines(id.as_str(), &content)?;

        tracing::debug!(
            id = %id,
            location = %ctx.location(),
            lines = lines.len(),
            inline = invocation.body.is_some(),
            "Built termynal box"
        );

        Ok(Node::AnimatedBox(AnimatedBox {
            ids: vec![id.box_id()],
            names: vec![id.as_str().to_owned()],
            options,
            children: lines.into_iter().map(Node::AnimatedLine).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveArgs;
    use crate::error::{Error, SchemaError};
    use crate::pipeline::TermConfig;
    use crate::source::DependencyGraph;
    use pretty_assertions::assert_eq;

    fn invocation(content: &str, attrs: &str, body: Option<&str>) -> Invocation {
        Invocation {
            name: "termynal".to_owned(),
            args: DirectiveArgs::parse(content, attrs),
            body: body.map(|b| b.lines().map(str::to_owned).collect()),
            line: 1,
        }
    }

    fn run(invocation: &Invocation, config: &TermConfig) -> Result<Node> {
        let mut deps = DependencyGraph::new();
        let mut ctx = DirectiveContext::new("index", 1, config, &mut deps);
        TermynalDirective.run(invocation, &mut ctx)
    }

    #[test]
    fn test_inline_box() {
        let config = TermConfig::new("/nonexistent");
        let node = run(
            &invocation(
                "termynal:demo",
                "startDelay=1500",
                Some("- value: ls\n  type: input\n- file.txt"),
            ),
            &config,
        )
        .unwrap();

        let Node::AnimatedBox(animated) = node else {
            panic!("expected animated box");
        };
        assert_eq!(animated.ids, vec!["termynal-demo-box"]);
        assert_eq!(animated.names, vec!["termynal:demo"]);
        assert_eq!(animated.options.get(BoxOption::StartDelay), Some("1500"));
        assert_eq!(animated.children.len(), 2);
    }

    #[test]
    fn test_file_backed_box() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp_dir.path().join("ty")).unwrap();
        std::fs::write(temp_dir.path().join("ty/install.yml"), "- pip install\n- done\n").unwrap();
        let config = TermConfig::new(temp_dir.path()).with_termynal_dir("/ty");

        let node = run(&invocation("termynal:install", "", None), &config).unwrap();
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.astext(), "pip install\ndone");
    }

    #[test]
    fn test_option_checked_before_content() {
        let config = TermConfig::new("/nonexistent");
        let err = run(&invocation("termynal:demo", "progressLength=0", None), &config).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::InvalidOption {
                option: "progressLength",
                ..
            })
        ));
    }

    #[test]
    fn test_wrong_prefix_builds_nothing() {
        let config = TermConfig::new("/nonexistent");
        let err = run(&invocation("cssterm:demo", "", Some("- ls")), &config).unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaError::MissingPrefix { .. })));
    }
}
