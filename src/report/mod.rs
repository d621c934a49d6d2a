pub mod csv;
pub mod format;
pub mod summary;

pub use csv::{export_file_name, render_csv, write_csv};
pub use format::{countdown_text, format_datetime, format_time, format_timestamp};
pub use summary::{deadline_text, format_value, render_chart, render_session_list, render_session_summary};
