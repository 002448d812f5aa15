use std::borrow::Cow;

use crate::records::Invoice;
use crate::state::ListState;

use super::format::{customer_display_name, format_currency};

/// Title line of the expanded detail panel.
pub const DETAIL_TITLE: &str = "Invoice Details";

const ID_HEADER: &str = "ID";
const NAME_HEADER: &str = "Name";
const BALANCE_HEADER: &str = "Balance";
const MAX_ID_WIDTH: usize = 36;
const MAX_NAME_WIDTH: usize = 40;

/// One summary row, already formatted for display.
struct SummaryRow<'a> {
    invoice: &'a Invoice,
    id: &'a str,
    name: Cow<'a, str>,
    balance: String,
}

/// Box-drawing table of invoices with an optional inline detail panel.
pub struct TableFormatter<'a> {
    rows: Vec<SummaryRow<'a>>,
    expanded_id: Option<&'a str>,
    id_width: usize,
    name_width: usize,
    balance_width: usize,
}

impl<'a> TableFormatter<'a> {
    pub fn new(state: &'a ListState) -> Self {
        let rows: Vec<SummaryRow<'a>> = state
            .records()
            .iter()
            .map(|invoice| SummaryRow {
                invoice,
                id: invoice.id(),
                name: customer_display_name(invoice),
                balance: format_currency(invoice.balance()),
            })
            .collect();

        let id_width = column_width(ID_HEADER, rows.iter().map(|r| r.id), MAX_ID_WIDTH);
        let name_width = column_width(NAME_HEADER, rows.iter().map(|r| r.name.as_ref()), MAX_NAME_WIDTH);
        let balance_width = column_width(
            BALANCE_HEADER,
            rows.iter().map(|r| r.balance.as_str()),
            usize::MAX,
        );

        let mut formatter = Self {
            rows,
            expanded_id: state.selected_id(),
            id_width,
            name_width,
            balance_width,
        };

        // Widen the last column so the detail panel fits without truncation.
        let detail_width = formatter
            .detail_lines()
            .and_then(|lines| lines.iter().map(|l| l.chars().count()).max());
        if let Some(detail_width) = detail_width {
            let inner = formatter.inner_width();
            if detail_width > inner {
                formatter.balance_width += detail_width - inner;
            }
        }

        formatter
    }

    /// Render the table, one line per `String`.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![self.top_border(), self.header_row()];

        if !self.rows.is_empty() {
            out.push(self.separator());
        }

        for (index, row) in self.rows.iter().enumerate() {
            out.push(self.summary_row(row));

            if self.expanded_id == Some(row.id) {
                let is_last = index + 1 == self.rows.len();
                out.push(self.panel_open_border());
                out.extend(self.panel_lines(row.invoice));
                if is_last {
                    out.push(self.panel_bottom_border());
                    return out;
                }
                out.push(self.panel_close_border());
            }
        }

        out.push(self.bottom_border());
        out
    }

    /// Detail lines for the expanded row, if it is in the snapshot.
    fn detail_lines(&self) -> Option<Vec<String>> {
        let id = self.expanded_id?;
        let row = self.rows.iter().find(|r| r.id == id)?;
        Some(detail_panel_lines(row.invoice))
    }

    /// Width of a cell that spans all three columns.
    fn inner_width(&self) -> usize {
        self.id_width + self.name_width + self.balance_width + 6
    }

    fn summary_row(&self, row: &SummaryRow<'_>) -> String {
        format!(
            "│ {} │ {} │ {} │",
            truncate(row.id, self.id_width),
            truncate(&row.name, self.name_width),
            truncate(&row.balance, self.balance_width),
        )
    }

    fn header_row(&self) -> String {
        format!(
            "│ {:<id_w$} │ {:<name_w$} │ {:<bal_w$} │",
            ID_HEADER,
            NAME_HEADER,
            BALANCE_HEADER,
            id_w = self.id_width,
            name_w = self.name_width,
            bal_w = self.balance_width,
        )
    }

    fn panel_lines(&self, invoice: &Invoice) -> Vec<String> {
        let inner = self.inner_width();
        detail_panel_lines(invoice)
            .into_iter()
            .map(|line| format!("│ {:<inner$} │", line, inner = inner))
            .collect()
    }

    fn border(&self, left: char, joint: char, right: char) -> String {
        format!(
            "{}{}{}{}{}{}{}",
            left,
            "─".repeat(self.id_width + 2),
            joint,
            "─".repeat(self.name_width + 2),
            joint,
            "─".repeat(self.balance_width + 2),
            right,
        )
    }

    fn spanning_border(&self, left: char, right: char) -> String {
        format!("{}{}{}", left, "─".repeat(self.inner_width() + 2), right)
    }

    fn top_border(&self) -> String {
        self.border('┌', '┬', '┐')
    }

    fn separator(&self) -> String {
        self.border('├', '┼', '┤')
    }

    fn bottom_border(&self) -> String {
        self.border('└', '┴', '┘')
    }

    fn panel_open_border(&self) -> String {
        self.border('├', '┴', '┤')
    }

    fn panel_close_border(&self) -> String {
        self.border('├', '┬', '┤')
    }

    fn panel_bottom_border(&self) -> String {
        self.spanning_border('└', '┘')
    }
}

/// Title plus the record's pretty-printed JSON.
pub fn detail_panel_lines(invoice: &Invoice) -> Vec<String> {
    let mut lines = vec![DETAIL_TITLE.to_string()];
    lines.extend(invoice.to_pretty_json().lines().map(str::to_string));
    lines
}

fn column_width<'s>(header: &str, values: impl Iterator<Item = &'s str>, max: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
        .min(max.max(header.chars().count()))
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to handle multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
