pub mod cache;
pub mod meme;
pub mod moderation;
pub mod mood;
pub mod template;
pub mod topic;
