//! RcDoc-based pretty-printer with termcolor annotations for expressions.
//!
//! This module builds annotated `RcDoc<Style>` trees from [`ExpView`]s and renders them to
//! a `termcolor::WriteColor` sink with width-aware layout. When the whole expression fits
//! on one line the plain output is identical to [`Exp::render`].

use std::io::{self, Write};

use pretty::{RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    erased::DynExp,
    error::ExpResult,
    exp::{Exp, ExpView},
    space::Space,
};

/// Styles that we annotate parts of the document with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // colons, label brackets
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // `$`, `@erased`, `@`
    Operator, // +
    Label,    // node labels
    Level,    // budgets shown next to labels
    Literal,  // leaf values
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Label => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Level => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Literal => {
                s.set_fg(Some(Color::White));
            }
        }
        s
    }
}

fn styled(style: Style, s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(style)
}

fn punct(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Punct, s)
}

fn kw(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Keyword, s)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn to_doc_with_depth<V: Space>(
    node: &dyn DynExp<V>,
    depth: u8,
) -> ExpResult<RcDoc<'static, Style>> {
    view_to_doc(node.dyn_view()?, depth)
}

fn view_to_doc<V: Space>(view: ExpView<'_, V>, depth: u8) -> ExpResult<RcDoc<'static, Style>> {
    let doc = match view {
        ExpView::Leaf(value) => RcDoc::as_string(value.to_string()).annotate(Style::Literal),
        ExpView::Binary { symbol, lhs, rhs } => lparen(depth)
            .append(
                to_doc_with_depth(lhs, depth.wrapping_add(1))?
                    .append(RcDoc::line())
                    .append(RcDoc::as_string(symbol).annotate(Style::Operator))
                    .append(RcDoc::space())
                    .append(to_doc_with_depth(rhs, depth.wrapping_add(1))?)
                    .nest(1),
            )
            .append(rparen(depth))
            .group(),
        ExpView::Named {
            label,
            level,
            inner,
        } => RcDoc::as_string(label.to_string())
            .annotate(Style::Label)
            .append(punct("("))
            .append(RcDoc::as_string(format!("L{level}")).annotate(Style::Level))
            .append(punct(")"))
            .append(punct(":"))
            .append(to_doc_with_depth(inner, depth)?),
        ExpView::Variable(value) => {
            kw("$").append(RcDoc::as_string(value.to_string()).annotate(Style::Literal))
        }
        ExpView::Erased(inner) => kw("@erased")
            .append(punct(":"))
            .append(to_doc_with_depth(inner, depth)?),
        ExpView::Handle(inner) => kw("@").append(to_doc_with_depth(inner, depth)?),
    };
    Ok(doc)
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Convenience: retrieve the width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for any [`Exp`].
///
/// ```
/// use texpr::prelude::*;
///
/// let e = name("x", SimpleSpace::new(1) + SimpleSpace::new(2));
/// assert_eq!(e.pretty_string().unwrap(), e.render().unwrap());
/// ```
pub trait PrettyExp {
    /// Build an RcDoc representation of this expression with style annotations.
    fn pretty_doc(&self) -> ExpResult<RcDoc<'static, Style>>;

    /// Render this expression with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W)
    -> ExpResult<()>;

    /// Print this expression to stdout with colors (TTY-aware), at the terminal width.
    fn pretty_print(&self) -> ExpResult<()>;

    /// Format this expression into a plain string (no colors) at width 80.
    fn pretty_string(&self) -> ExpResult<String>;
}

impl<T: Exp> PrettyExp for T {
    #[inline]
    fn pretty_doc(&self) -> ExpResult<RcDoc<'static, Style>> {
        view_to_doc(self.view()?, 0)
    }

    fn pretty_render_to<W: WriteColor + Write>(
        &self,
        width: usize,
        out: &mut W,
    ) -> ExpResult<()> {
        let doc = self.pretty_doc()?;
        render_to(&doc, width, out)?;
        Ok(())
    }

    fn pretty_print(&self) -> ExpResult<()> {
        let doc = self.pretty_doc()?;
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        render_to(&doc, terminal_width(), &mut stdout)?;
        Ok(())
    }

    fn pretty_string(&self) -> ExpResult<String> {
        let mut buf = String::new();
        self.pretty_doc()?.render_fmt(80, &mut buf)?;
        Ok(buf)
    }
}
