pub mod book;
pub mod db;
