// TUI widget modules for each panel.

pub mod form;
pub mod output;
pub mod status_bar;

/// Flatten a rendered test buffer into one string per row.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
