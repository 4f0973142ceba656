//! RenderPipeline trait definition.
//!
//! The collaborator boundary for presentation. The core hands over the
//! entire accumulated markdown on every delta and treats the conversion
//! as an opaque pure function; the terminal implementation lives in
//! charla-cli.

/// Converts accumulated markdown to styled output, decorating code
/// regions along the way.
///
/// Must be idempotent: the same input always produces the same output,
/// because the full text is re-rendered from scratch on each increment
/// (markdown structure can retroactively change as more tokens arrive).
pub trait RenderPipeline {
    fn render(&self, markdown: &str) -> String;
}
