pub mod clock;
pub mod progress;
pub mod search;
pub mod state;

pub use clock::{completion_percent, compose_clock, format_clock, parse_clock, relative_label, split_clock};
pub use progress::ProgressEditor;
pub use search::{SearchSession, SearchTicket};
pub use state::StateHandle;
