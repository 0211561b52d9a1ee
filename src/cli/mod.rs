pub mod dashboard;
pub mod indicators;
pub mod market;
pub mod tariffs;
pub mod taxes;
pub mod ui;
