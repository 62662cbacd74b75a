use ariadne::{Color, Label, Report, ReportKind, Source};
use zinc::ZincError;

/// Format a ZincError with fancy terminal output using Ariadne
pub fn format_error(error: &ZincError) -> String {
    match error {
        ZincError::Parse(details) => {
            let mut output = Vec::new();

            let message = format!(
                "Parse error: {} (in {} at line {}, column {})",
                details.message, details.source_id, details.span.line, details.span.col
            );

            let end = details.span.end.max(details.span.start + 1);
            let mut report = Report::build(ReportKind::Error, &details.source_id, details.span.start)
                .with_message(message)
                .with_label(
                    Label::new((&details.source_id, details.span.start..end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        ZincError::UndeclaredVariable(name) => format!(
            "Undeclared variable: {}\n  Declare it with 'var <low>..<high>: {};' or drop --no-auto-declare",
            name, name
        ),
        other => other.to_string(),
    }
}
