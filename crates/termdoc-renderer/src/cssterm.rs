//! Static transcript boxes (`cssterm`).
//!
//! ```text
//! ::cssterm[cssterm:build]
//! ```
//!
//! reads `<cssterm.dir>/build.log`; the container form carries the
//! transcript inline. The directive takes no options.

use crate::directive::{DirectiveContext, Invocation, TranscriptDirective, transcript_id};
use crate::error::{Result, SchemaError};
use crate::source::{load_content, resolve_source};
use crate::transcript::TranscriptFormat;
use crate::tree::{Node, StaticBox};

/// `cssterm` directive handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsstermDirective;

impl TranscriptDirective for CsstermDirective {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::Cssterm
    }

    fn run(&self, invocation: &Invocation, ctx: &mut DirectiveContext<'_>) -> Result<Node> {
        let id = transcript_id(self.format(), &invocation.args)?;
        if let Some(option) = invocation.args.option_names().into_iter().next() {
            return Err(SchemaError::UnknownOption {
                directive: self.format(),
                option,
            }
            .into());
        }

        let source = resolve_source(&id, invocation.body.as_deref(), ctx)?;
        let raw = load_content(&source, ctx)?;

        tracing::debug!(id = %id, location = %ctx.location(), bytes = raw.len(), "Built cssterm box");

        Ok(Node::StaticBox(StaticBox::new(
            id.box_id(),
            id.as_str().to_owned(),
            raw,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveArgs;
    use crate::error::Error;
    use crate::pipeline::TermConfig;
    use crate::source::DependencyGraph;
    use pretty_assertions::assert_eq;

    fn run(content: &str, attrs: &str, body: Option<Vec<&str>>) -> Result<Node> {
        let config = TermConfig::new("/nonexistent");
        let mut deps = DependencyGraph::new();
        let mut ctx = DirectiveContext::new("index", 1, &config, &mut deps);
        let invocation = Invocation {
            name: "cssterm".to_owned(),
            args: DirectiveArgs::parse(content, attrs),
            body: body.map(|lines| lines.into_iter().map(str::to_owned).collect()),
            line: 1,
        };
        CsstermDirective.run(&invocation, &mut ctx)
    }

    #[test]
    fn test_inline_box_keeps_raw_and_display() {
        let node = run("cssterm:demo", "", Some(vec!["  $ ls", "file.txt", ""])).unwrap();
        let Node::StaticBox(static_box) = node else {
            panic!("expected static box");
        };
        assert_eq!(static_box.ids, vec!["cssterm-demo-box"]);
        assert_eq!(static_box.names, vec!["cssterm:demo"]);
        assert_eq!(static_box.raw, "  $ ls\nfile.txt");
        assert_eq!(static_box.display, "$ ls\nfile.txt");
    }

    #[test]
    fn test_options_rejected() {
        let err = run("cssterm:demo", "startDelay=10", Some(vec!["$ ls"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::UnknownOption { ref option, .. }) if option == "startDelay"
        ));
    }

    #[test]
    fn test_forbidden_extension() {
        let err = run("cssterm:demo.log", "", Some(vec!["$ ls"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::ForbiddenExtension { .. })
        ));
    }

    #[test]
    fn test_missing_argument() {
        let err = run("", "", Some(vec!["$ ls"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::ArgumentCount { found: 0, .. })
        ));
    }
}
