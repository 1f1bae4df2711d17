pub mod accordion;
pub mod content;
pub mod feedback;
pub mod platform;
pub mod slug;

pub use zoon;
