//! Shared mock catalog: courses, instructors and the student body. Every
//! dataset's fixtures draw from here so names line up across pages.

use crate::models::role::{DEMO_STUDENT, DEMO_TEACHER};

pub struct Course {
    pub code: &'static str,
    pub title: &'static str,
    pub instructor: &'static str,
    pub credits: u8,
}

pub const COURSES: &[Course] = &[
    Course { code: "CS101", title: "Intro to Programming", instructor: DEMO_TEACHER, credits: 4 },
    Course { code: "CS220", title: "Data Structures", instructor: DEMO_TEACHER, credits: 4 },
    Course { code: "MATH201", title: "Linear Algebra", instructor: "Prof. Grace Lee", credits: 3 },
    Course { code: "ENG105", title: "Academic Writing", instructor: "Ms. Priya Patel", credits: 2 },
    Course { code: "PHY110", title: "Physics I", instructor: "Dr. Omar Haddad", credits: 3 },
];

pub const PROGRAMS: &[&str] = &["Computer Science", "Mathematics", "Physics", "English"];

pub struct Enrollee {
    pub id: &'static str,
    pub name: &'static str,
    pub program: &'static str,
    pub year: u8,
    pub advisor: &'static str,
}

pub const STUDENTS: &[Enrollee] = &[
    Enrollee { id: "S1001", name: DEMO_STUDENT, program: "Computer Science", year: 2, advisor: DEMO_TEACHER },
    Enrollee { id: "S1002", name: "Bob Martinez", program: "Computer Science", year: 2, advisor: DEMO_TEACHER },
    Enrollee { id: "S1003", name: "Carol Nguyen", program: "Mathematics", year: 3, advisor: "Prof. Grace Lee" },
    Enrollee { id: "S1004", name: "David Kim", program: "Physics", year: 1, advisor: "Dr. Omar Haddad" },
    Enrollee { id: "S1005", name: "Emma Wilson", program: "English", year: 4, advisor: "Ms. Priya Patel" },
    Enrollee { id: "S1006", name: "Farid Rahman", program: "Computer Science", year: 1, advisor: DEMO_TEACHER },
    Enrollee { id: "S1007", name: "Grace O'Connor", program: "Mathematics", year: 2, advisor: "Prof. Grace Lee" },
    Enrollee { id: "S1008", name: "Hiro Tanaka", program: "Physics", year: 3, advisor: "Dr. Omar Haddad" },
    Enrollee { id: "S1009", name: "Isabel Costa", program: "Computer Science", year: 4, advisor: DEMO_TEACHER },
    Enrollee { id: "S1010", name: "Jamal Wright", program: "English", year: 1, advisor: "Ms. Priya Patel" },
    Enrollee { id: "S1011", name: "Katarzyna Nowak", program: "Mathematics", year: 4, advisor: "Prof. Grace Lee" },
    Enrollee { id: "S1012", name: "Liam Murphy", program: "Computer Science", year: 3, advisor: DEMO_TEACHER },
    Enrollee { id: "S1013", name: "Maya Singh", program: "Physics", year: 2, advisor: "Dr. Omar Haddad" },
    Enrollee { id: "S1014", name: "Noah Fischer", program: "English", year: 3, advisor: "Ms. Priya Patel" },
    Enrollee { id: "S1015", name: "Olivia Brown", program: "Computer Science", year: 1, advisor: DEMO_TEACHER },
    Enrollee { id: "S1016", name: "Pedro Alvarez", program: "Mathematics", year: 1, advisor: "Prof. Grace Lee" },
    Enrollee { id: "S1017", name: "Quinn Taylor", program: "Physics", year: 4, advisor: "Dr. Omar Haddad" },
    Enrollee { id: "S1018", name: "Rosa Delgado", program: "Computer Science", year: 2, advisor: DEMO_TEACHER },
];

/// Each student takes three consecutive courses (wrapping), so every course
/// has a mix of students.
pub fn courses_for(student_index: usize) -> impl Iterator<Item = &'static Course> {
    (0..3).map(move |offset| &COURSES[(student_index + offset) % COURSES.len()])
}

pub fn course(code: &str) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.code == code)
}

pub fn course_codes() -> Vec<&'static str> {
    COURSES.iter().map(|c| c.code).collect()
}

pub fn courses_taught_by(instructor: &str) -> Vec<&'static str> {
    COURSES.iter().filter(|c| c.instructor == instructor).map(|c| c.code).collect()
}

/// Deterministic pseudo-random spread in `0..modulo`, stable across runs.
pub fn spread(a: usize, b: usize, c: usize, modulo: usize) -> usize {
    (a.wrapping_mul(7) + b.wrapping_mul(13) + c.wrapping_mul(31) + 5) % modulo
}
