pub mod app;
pub mod input;
pub mod presenter;
pub mod theme;
pub mod view;
