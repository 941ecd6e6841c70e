pub mod card;
pub mod tabs;
