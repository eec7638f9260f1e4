pub mod components;
pub mod display_text;
pub mod event_bus;
pub mod icons;
pub mod inline_edit;
pub mod page_config;
