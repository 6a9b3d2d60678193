//! Deferred arithmetic expressions evaluated by the engine.
//!
//! Some filter parameters depend on values only known while the graph
//! runs (the input resolution `iw`/`ih`, the rendered text size
//! `tw`/`th`). They are kept as expression trees here and printed in
//! the engine's expression syntax; the planner never evaluates them.

use std::fmt;
use std::ops::{Add, Div, Sub};

/// Binary operators supported by the engine's evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Div,
}

impl BinOp {
    fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Div => '/',
        }
    }
}

/// An engine expression.
///
/// Binary nodes print without parentheses; precedence is made explicit
/// with [`Expr::group`], so the printed text is exactly what was built.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    /// An engine variable such as `iw` or `th`.
    Var(&'static str),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: &'static str,
        args: Vec<Expr>,
    },
    Group(Box<Expr>),
}

impl Expr {
    pub fn int(value: impl Into<i64>) -> Self {
        Expr::Int(value.into())
    }

    pub fn var(name: &'static str) -> Self {
        Expr::Var(name)
    }

    pub fn call(func: &'static str, args: Vec<Expr>) -> Self {
        Expr::Call { func, args }
    }

    /// Wrap in parentheses.
    pub fn group(self) -> Self {
        Expr::Group(Box::new(self))
    }

    /// `if(cond, then, otherwise)`.
    pub fn if_then(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Self::call("if", vec![cond, then, otherwise])
    }

    /// `gt(a, b)`: 1 when `a > b`.
    pub fn gt(lhs: Expr, rhs: Expr) -> Self {
        Self::call("gt", vec![lhs, rhs])
    }

    fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Whether the expression still depends on engine variables.
    pub fn is_deferred(&self) -> bool {
        match self {
            Expr::Int(_) => false,
            Expr::Var(_) => true,
            Expr::Binary { lhs, rhs, .. } => lhs.is_deferred() || rhs.is_deferred(),
            Expr::Call { args, .. } => args.iter().any(Expr::is_deferred),
            Expr::Group(inner) => inner.is_deferred(),
        }
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }
    };
}

impl_binop!(Add, add, BinOp::Add);
impl_binop!(Sub, sub, BinOp::Sub);
impl_binop!(Div, div, BinOp::Div);

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(value) => write!(f, "{value}"),
            Expr::Var(name) => f.write_str(name),
            Expr::Binary { op, lhs, rhs } => write!(f, "{lhs}{}{rhs}", op.symbol()),
            Expr::Call { func, args } => {
                write!(f, "{func}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::Group(inner) => write!(f, "({inner})"),
        }
    }
}

/// Input width / height of the filter being configured.
pub fn input_aspect() -> Expr {
    Expr::var("iw") / Expr::var("ih")
}

/// `w/(h)` for a box, compared against the input aspect.
fn box_aspect(w: u32, h: u32) -> Expr {
    Expr::int(w) / Expr::int(h).group()
}

/// Target width when fitting the input inside a `w`×`h` box.
///
/// Wider inputs take the full box width; taller ones let the engine
/// derive an even width (`-2`) from the height.
pub fn fit_width(w: u32, h: u32) -> Expr {
    Expr::if_then(
        Expr::gt(input_aspect(), box_aspect(w, h)),
        Expr::int(w),
        Expr::int(-2),
    )
}

/// Target height when fitting the input inside a `w`×`h` box.
pub fn fit_height(w: u32, h: u32) -> Expr {
    Expr::if_then(
        Expr::gt(input_aspect(), box_aspect(w, h)),
        Expr::int(-2),
        Expr::int(h),
    )
}

/// Offset that centers content of size `inner` in a span of `outer`
/// pixels starting at `origin`: `(outer-inner)/2+origin`.
pub fn centered_in(outer: u32, inner: &'static str, origin: u32) -> Expr {
    (Expr::int(outer) - Expr::var(inner)).group() / Expr::int(2) + Expr::int(origin)
}

/// Horizontal position that centers rendered text: `(w-tw)/2`.
pub fn text_center_x() -> Expr {
    (Expr::var("w") - Expr::var("tw")).group() / Expr::int(2)
}

/// Vertical position that centers rendered text: `((h-th)/2)`.
pub fn text_center_y() -> Expr {
    ((Expr::var("h") - Expr::var("th")).group() / Expr::int(2)).group()
}

/// Vertical position of text resting `margin` pixels above the bottom.
pub fn text_bottom_y(margin: u32) -> Expr {
    Expr::var("h") - Expr::var("th") - Expr::int(margin)
}
