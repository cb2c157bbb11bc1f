pub mod generator;
pub mod trending;
pub mod web;
