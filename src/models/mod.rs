pub mod announcement;
pub mod assignment;
pub mod attendance;
pub mod career;
pub mod catalog;
pub mod fee;
pub mod grade;
pub mod list_view;
pub mod listing;
pub mod nav_item;
pub mod role;
pub mod schedule;
pub mod student;
pub mod ticket;
