//! Fixed-width table rendering for suite reports.

use crate::eval::{CaseOutcome, CaseStatus, SuiteReport};
use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy)]
pub struct TableStyle {
    pub color: bool,
    pub rule_width: usize,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            color: true,
            rule_width: 80,
        }
    }
}

impl TableStyle {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    fn paint(&self, text: String, brush: fn(ColoredString) -> ColoredString) -> String {
        if self.color {
            brush(text.normal()).to_string()
        } else {
            text
        }
    }
}

pub fn render_table(report: &SuiteReport, style: &TableStyle) -> String {
    let mut lines = Vec::with_capacity(report.cases.len() + 3);

    let header = format!(
        "{:>6}   {:>3}   {:>7}   {:>7}   {:>8}   {:>7}   {:>8}   {:<12}",
        "Input", "m", "Kernel", "Stride", "Padding", "OutPad", "Output", "Status"
    );
    lines.push(style.paint(header, |s| s.bold().yellow()));

    let rule = "-".repeat(style.rule_width);
    lines.push(style.paint(rule.clone(), |s| s.bright_black()));
    lines.extend(report.cases.iter().map(|case| render_row(case, style)));
    lines.push(style.paint(rule, |s| s.bright_black()));

    lines.join("\n")
}

fn render_row(outcome: &CaseOutcome, style: &TableStyle) -> String {
    let request = &outcome.request;

    let (stride, padding, output_padding, output) = match (outcome.params, outcome.output_size) {
        (Some(params), Some(output)) => (
            style.paint(format!("{:>7}", params.stride), |s| s.yellow()),
            style.paint(format!("{:>8}", params.padding), |s| s.yellow()),
            style.paint(format!("{:>7}", params.output_padding), |s| s.yellow()),
            style.paint(format!("{:>8}", output), |s| s.yellow()),
        ),
        _ => (
            style.paint(format!("{:>7}", "-"), |s| s.bright_black()),
            style.paint(format!("{:>8}", "-"), |s| s.bright_black()),
            style.paint(format!("{:>7}", "-"), |s| s.bright_black()),
            style.paint(format!("{:>8}", "-"), |s| s.bright_black()),
        ),
    };

    let status = match outcome.status {
        CaseStatus::Solved => style.paint("Success".to_string(), |s| s.green()),
        CaseStatus::NotPossible => style.paint("Not possible".to_string(), |s| s.red()),
        CaseStatus::Invalid => style.paint("Invalid".to_string(), |s| s.red()),
    };

    format!(
        "{:>6}   {:>3}   {:>7}   {}   {}   {}   {}   {}",
        request.input_size,
        request.multiplier,
        request.kernel_size,
        stride,
        padding,
        output_padding,
        output,
        status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::CaseSuite;

    #[test]
    fn test_plain_table_layout() {
        let report = CaseSuite::demo().run().unwrap();
        let table = render_table(&report, &TableStyle::plain());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), report.cases.len() + 3);
        assert_eq!(
            lines[0].trim_end(),
            " Input     m    Kernel    Stride    Padding    OutPad     Output   Status"
        );
        assert_eq!(lines[1], "-".repeat(80));
        assert_eq!(
            lines[2],
            "    32     2         2         2          0         0         64   Success"
        );
        assert_eq!(
            lines[7],
            "    16     4         2         -          -         -          -   Not possible"
        );
        assert_eq!(lines.last().copied(), Some("-".repeat(80).as_str()));
        assert!(!table.contains('\u{1b}'));
    }

    #[test]
    fn test_invalid_row_status() {
        use crate::eval::SuiteCase;
        use upconv_params::SolveRequest;

        let suite = CaseSuite::new(vec![SuiteCase::new("zero", SolveRequest::new(8, 0, 2))]);
        let report = suite.run().unwrap();
        let table = render_table(&report, &TableStyle::plain());
        assert!(table.lines().nth(2).unwrap().ends_with("Invalid"));
    }
}
