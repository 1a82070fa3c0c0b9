/// Width of the progress bar in cells.
pub const PROGRESS_BAR_WIDTH: usize = 40;
pub const PROGRESS_FILLED: char = '#';
pub const PROGRESS_EMPTY: char = '.';

pub const LABEL_INFO: &str = "info";
pub const LABEL_WARNING: &str = "warning";
pub const LABEL_DANGER: &str = "error";
pub const LABEL_SUCCESS: &str = "ok";
