//! Typed filter-graph statements.
//!
//! A [`FilterGraph`] is an ordered list of [`Statement`]s. Each statement
//! reads some pads, runs a chain of filters, and writes labelled pads.
//! Text is produced only by the `Display` impls, in the engine's
//! `[in]filter=a:b,filter2[out];` syntax.

use std::fmt;

use tessera_media_model::media::MediaId;

use crate::expr::Expr;

/// Stream type of an engine input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    pub fn suffix(self) -> &'static str {
        match self {
            StreamKind::Video => "v",
            StreamKind::Audio => "a",
        }
    }
}

/// Name of an intermediate or output pad.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<segment>_bg`: the canvas every tile is composited onto.
    pub fn background(segment: &str) -> Self {
        Self(format!("{segment}_bg"))
    }

    /// `<segment>_out_v`: final video of a segment.
    pub fn video_out(segment: &str) -> Self {
        Self(format!("{segment}_out_v"))
    }

    /// `<segment>_out_a`: final stereo audio of a segment.
    pub fn audio_out(segment: &str) -> Self {
        Self(format!("{segment}_out_a"))
    }

    /// `<segment>_<media>_<v|a>`: one item's trimmed stream.
    pub fn item(segment: &str, media: MediaId, kind: StreamKind) -> Self {
        Self(format!("{segment}_{media}_{}", kind.suffix()))
    }

    /// `<segment>_overlay_<media>`: composite after overlaying `media`.
    pub fn overlay(segment: &str, media: MediaId) -> Self {
        Self(format!("{segment}_overlay_{media}"))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something a statement reads from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pad {
    /// A stream of an engine input, `[<input>:<v|a>]`.
    Stream { input: MediaId, kind: StreamKind },
    /// A labelled pad written by an earlier statement.
    Label(Label),
}

impl Pad {
    pub fn video(input: MediaId) -> Self {
        Pad::Stream {
            input,
            kind: StreamKind::Video,
        }
    }

    pub fn audio(input: MediaId) -> Self {
        Pad::Stream {
            input,
            kind: StreamKind::Audio,
        }
    }

    pub fn label(&self) -> Option<&Label> {
        match self {
            Pad::Label(label) => Some(label),
            Pad::Stream { .. } => None,
        }
    }
}

impl From<Label> for Pad {
    fn from(label: Label) -> Self {
        Pad::Label(label)
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pad::Stream { input, kind } => write!(f, "[{input}:{}]", kind.suffix()),
            Pad::Label(label) => write!(f, "[{label}]"),
        }
    }
}

/// A filter parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Printed as-is.
    Text(String),
    /// Printed inside single quotes.
    Quoted(String),
    /// Engine expression printed as-is.
    Expr(Expr),
    /// Engine expression printed inside single quotes.
    QuotedExpr(Expr),
}

impl Value {
    pub fn text(value: impl fmt::Display) -> Self {
        Value::Text(value.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Quoted(text) => write!(f, "'{text}'"),
            Value::Expr(expr) => write!(f, "{expr}"),
            Value::QuotedExpr(expr) => write!(f, "'{expr}'"),
        }
    }
}

/// One filter parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(Value),
    Named(&'static str, Value),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Positional(value) => write!(f, "{value}"),
            Arg::Named(key, value) => write!(f, "{key}={value}"),
        }
    }
}

/// A filter invocation: name plus ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub name: &'static str,
    pub args: Vec<Arg>,
}

impl Filter {
    pub fn new(name: &'static str) -> Self {
        Self { name, args: vec![] }
    }

    pub fn positional(mut self, value: Value) -> Self {
        self.args.push(Arg::Positional(value));
        self
    }

    pub fn named(mut self, key: &'static str, value: Value) -> Self {
        self.args.push(Arg::Named(key, value));
        self
    }

    /// Value of a named parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.args.iter().find_map(|arg| match arg {
            Arg::Named(k, value) if *k == key => Some(value),
            _ => None,
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            f.write_str(if i == 0 { "=" } else { ":" })?;
            write!(f, "{arg}")?;
        }
        Ok(())
    }
}

/// Inputs, a filter chain, and outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub inputs: Vec<Pad>,
    pub filters: Vec<Filter>,
    pub outputs: Vec<Label>,
}

impl Statement {
    /// Start a statement from a filter chain.
    pub fn chain(filters: Vec<Filter>) -> Self {
        Self {
            inputs: vec![],
            filters,
            outputs: vec![],
        }
    }

    pub fn input(mut self, pad: impl Into<Pad>) -> Self {
        self.inputs.push(pad.into());
        self
    }

    pub fn output(mut self, label: Label) -> Self {
        self.outputs.push(label);
        self
    }

    /// First filter in the chain with the given name.
    pub fn filter(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.name == name)
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filter(name).is_some()
    }

    pub fn reads(&self, label: &Label) -> bool {
        self.inputs.iter().any(|pad| pad.label() == Some(label))
    }

    pub fn writes(&self, label: &Label) -> bool {
        self.outputs.contains(label)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pad in &self.inputs {
            write!(f, "{pad}")?;
        }
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{filter}")?;
        }
        for label in &self.outputs {
            write!(f, "[{label}]")?;
        }
        f.write_str(";")
    }
}

/// An immutable, ordered filter graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGraph {
    statements: Vec<Statement>,
}

impl FilterGraph {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements that contain a filter with the given name.
    pub fn with_filter<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Statement> + 'a {
        self.statements.iter().filter(move |s| s.has_filter(name))
    }

    /// The statement writing a label, if any.
    pub fn producer(&self, label: &Label) -> Option<&Statement> {
        self.statements.iter().find(|s| s.writes(label))
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// Append-only builder for a [`FilterGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    statements: Vec<Statement>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn extend(&mut self, graph: FilterGraph) {
        self.statements.extend(graph.statements);
    }

    pub fn finish(self) -> FilterGraph {
        FilterGraph {
            statements: self.statements,
        }
    }
}
