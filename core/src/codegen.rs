#![deny(missing_docs)]

//! # Code Generation
//!
//! Renders a [`WorkItem`] into the C# source of the dispose pattern.
//!
//! The layout is fixed: one `using`, a namespace block, and a partial class
//! holding (depending on the item) a disposed flag, the public `Dispose()`,
//! the private `Dispose(bool)` and a finalizer. Output is byte-for-byte
//! deterministic for a given item.

use crate::work::{WorkItem, DISPOSE_MANAGED, DISPOSE_METHOD, DISPOSE_UNMANAGED};

const INDENT: &str = "    ";

/// Name of the generated "already disposed" flag.
pub const DISPOSED_FLAG: &str = "_isDisposed";

/// Name of the private routine's parameter.
pub const DISPOSING_PARAM: &str = "disposing";

/// Line-oriented builder that tracks the current nesting depth.
struct SourceWriter {
    code: String,
    depth: usize,
}

impl SourceWriter {
    fn new() -> Self {
        Self {
            code: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.code.push_str(INDENT);
        }
        self.code.push_str(text);
        self.code.push('\n');
    }

    fn blank(&mut self) {
        self.code.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        self.code
    }
}

/// Renders the dispose pattern for `work`.
///
/// # Examples
///
/// ```
/// use disposegen_core::{render, WorkItem};
///
/// let work = WorkItem {
///     namespace_name: "App".into(),
///     class_name: "Idle".into(),
///     ..Default::default()
/// };
/// let code = render(&work);
/// assert!(code.contains("    partial class Idle\n"));
/// assert!(!code.contains("_isDisposed"));
/// ```
pub fn render(work: &WorkItem) -> String {
    let mut out = SourceWriter::new();

    out.line("using System;");
    out.blank();
    out.line(&format!("namespace {}", work.namespace_name));
    out.open();
    write_class(work, &mut out);
    out.close();

    out.finish()
}

fn write_class(work: &WorkItem, out: &mut SourceWriter) {
    let accessibility = &work.declared_accessibility;
    let space = if accessibility.is_empty() { "" } else { " " };
    out.line(&format!("{}{}partial class {}", accessibility, space, work.class_name));
    out.open();

    if work.has_work() {
        out.line(&format!("private bool {} = false;", DISPOSED_FLAG));
        out.blank();
    }

    write_public_dispose(work, out);

    if work.has_work() {
        out.blank();
        write_private_dispose(work, out);
    }

    if work.implement_unmanaged {
        out.blank();
        out.line(&format!("~{}() => {}(false);", work.class_name, DISPOSE_METHOD));
    }

    out.close();
}

fn write_public_dispose(work: &WorkItem, out: &mut SourceWriter) {
    out.line(&format!("public void {}()", DISPOSE_METHOD));
    out.open();
    if work.has_work() {
        out.line(&format!("{}(true);", DISPOSE_METHOD));
        out.line("GC.SuppressFinalize(this);");
    }
    out.close();
}

fn write_private_dispose(work: &WorkItem, out: &mut SourceWriter) {
    out.line(&format!("private void {}(bool {})", DISPOSE_METHOD, DISPOSING_PARAM));
    out.open();

    out.line(&format!("if ({})", DISPOSED_FLAG));
    out.open();
    out.line("return;");
    out.close();
    out.blank();

    out.line(&format!("if ({})", DISPOSING_PARAM));
    out.open();
    // An explicit managed hook replaces member cascading.
    if work.implement_managed {
        out.line(&format!("{}();", DISPOSE_MANAGED));
    } else {
        for member in &work.disposable_member_names {
            out.line(&format!("{}.{}();", member, DISPOSE_METHOD));
        }
    }
    out.close();
    out.blank();

    if work.implement_unmanaged {
        out.line(&format!("{}();", DISPOSE_UNMANAGED));
        out.blank();
    }

    out.line(&format!("{} = true;", DISPOSED_FLAG));
    out.close();
}

/// Binds a [`WorkItem`] to the emitter.
#[derive(Debug, Clone, Copy)]
pub struct DisposeWriter<'a> {
    work: &'a WorkItem,
}

impl<'a> DisposeWriter<'a> {
    /// Wraps `work`.
    pub fn new(work: &'a WorkItem) -> Self {
        Self { work }
    }

    /// Rendered source text.
    pub fn emit(&self) -> String {
        render(self.work)
    }

    /// Artifact key for the rendered source, e.g. `App.Owner.Dispose.g.cs`.
    pub fn suggest_file_name(&self, suffix: &str) -> String {
        self.work.artifact_key(suffix)
    }
}
