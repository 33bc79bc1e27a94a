use super::error::{RuntimeError, RuntimeErrorKind};
use super::LoxValue;
use ariadne::{Color, ColorGenerator, Fmt, Label, Report, ReportKind, Source};
use std::path::Path;

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

pub trait ValueFormatter {
    fn format(&self, value: &LoxValue) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: &LoxValue) -> String {
        format!("{value:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{error:?}")
    }
}

/// Plain output: values in their display form, errors as `message\n[line N]`.
pub struct BasicFormatter;

impl BasicFormatter {
    fn format_verbose(value: &LoxValue) -> String {
        match value {
            LoxValue::Number(v) => format!("Number({v})"),
            LoxValue::String(v) => format!("String(\"{v}\")"),
            LoxValue::Nil => "Nil".into(),
            LoxValue::Bool(v) => format!("Bool({v})"),
        }
    }
}

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: &LoxValue) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{}\n[line {}]", error.kind, error.line())
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }
}

impl<'src> ValueFormatter for PrettyFormatter<'src> {
    fn format(&self, value: &LoxValue) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let path = self.path.to_string_lossy();
        let path: &str = &path;
        let span = error.token.span.range();
        let label = match &error.kind {
            RuntimeErrorKind::NonNumeric(v) => format!(
                "Type is {} instead of numeric",
                BasicFormatter::format_verbose(v).fg(Color::BrightRed)
            ),
            RuntimeErrorKind::NonNumerics(lhs, rhs) => format!(
                "One or both of {} and {} is not numeric",
                BasicFormatter::format_verbose(lhs).fg(Color::BrightRed),
                BasicFormatter::format_verbose(rhs).fg(Color::BrightRed),
            ),
            RuntimeErrorKind::NonAddable(lhs, rhs) => {
                let mut colors = ColorGenerator::new();
                format!(
                    "{} and {} cannot be added together",
                    BasicFormatter::format_verbose(lhs).fg(colors.next()),
                    BasicFormatter::format_verbose(rhs).fg(colors.next()),
                )
            }
            RuntimeErrorKind::DivisionByZero => "The divisor evaluated to zero".into(),
            RuntimeErrorKind::UndefinedVariable(name) => format!(
                "{} has not been defined yet",
                name.as_str().fg(Color::BrightYellow)
            ),
        };

        let mut output = std::io::Cursor::new(Vec::new());
        Report::build(ReportKind::Error, (path, span.clone()))
            .with_code(error.code())
            .with_message(error.kind.to_string())
            .with_label(
                Label::new((path, span))
                    .with_message(label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
