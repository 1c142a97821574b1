pub mod announcement;
pub mod fallible;
pub mod teacher;
pub mod unixtime;
pub mod uuid;
