//! Presentation: derives the text view purely from [`ListState`].
//!
//! The view is the "last updated" readout, the invoice table (with the
//! expanded row's detail panel inline), and the readout again.

pub mod format;
pub mod table;

pub use format::{
    NOT_AVAILABLE, customer_display_name, format_currency, format_last_updated,
    last_updated_label,
};
pub use table::{DETAIL_TITLE, TableFormatter, detail_panel_lines, truncate};

use crate::state::ListState;

/// Render the full view as newline-terminated text.
pub fn render_view(state: &ListState) -> String {
    let label = last_updated_label(state.last_updated());
    let mut out = String::new();

    out.push_str(&label);
    out.push('\n');
    for line in TableFormatter::new(state).lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&label);
    out.push('\n');

    out
}
