pub mod logging;
pub mod period;
pub mod settings;
pub mod stopwatch;
pub mod storage;
pub mod tracker;
pub mod ui;
