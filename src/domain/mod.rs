pub mod aggregate;
pub mod enums;
pub mod history;
pub mod session;
pub mod timer;
pub mod validation;

pub use aggregate::{aggregate, ChartOptions, ChartSeries, Granularity, Metric, ViewMode};
pub use enums::{RunStatus, UiMode};
pub use history::UNDO_LIMIT;
pub use session::{DeadlineStatus, Session, Task};
pub use timer::{TimerEngine, TimerState};
