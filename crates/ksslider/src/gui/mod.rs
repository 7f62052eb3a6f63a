pub mod app;
pub mod dialog;
pub mod theme;
