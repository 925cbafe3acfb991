pub mod run;
pub mod ui;
