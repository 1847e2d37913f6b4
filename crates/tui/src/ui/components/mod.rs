pub mod card;
pub mod charts;
pub mod form;
pub mod money;
pub mod notice;
pub mod tabs;
