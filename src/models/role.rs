use serde::Serialize;

/// Portal audiences. Chosen by the first path segment; there is no login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Parent,
    Teacher,
    Admin,
}

/// Pages a role may open from its sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Students,
    Attendance,
    Fees,
    Assignments,
    Grades,
    Schedule,
    Announcements,
    Careers,
    Tickets,
}

impl Section {
    pub fn slug(&self) -> &'static str {
        match self {
            Section::Dashboard => "",
            Section::Students => "students",
            Section::Attendance => "attendance",
            Section::Fees => "fees",
            Section::Assignments => "assignments",
            Section::Grades => "grades",
            Section::Schedule => "schedule",
            Section::Announcements => "announcements",
            Section::Careers => "careers",
            Section::Tickets => "tickets",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Students => "Students",
            Section::Attendance => "Attendance",
            Section::Fees => "Fees",
            Section::Assignments => "Assignments",
            Section::Grades => "Grades",
            Section::Schedule => "Schedule",
            Section::Announcements => "Announcements",
            Section::Careers => "Careers",
            Section::Tickets => "Support Tickets",
        }
    }
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Parent, Role::Teacher, Role::Admin];

    pub fn from_slug(slug: &str) -> Option<Role> {
        match slug {
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            "teacher" => Some(Role::Teacher),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Parent => "Parent",
            Role::Teacher => "Teacher / Leader",
            Role::Admin => "Administrator",
        }
    }

    /// Sidebar order per role; the dashboard is always first.
    pub fn sections(&self) -> &'static [Section] {
        use Section::*;
        match self {
            Role::Student => &[Dashboard, Schedule, Assignments, Grades, Attendance, Fees, Announcements, Careers],
            Role::Parent => &[Dashboard, Attendance, Grades, Assignments, Fees, Announcements],
            Role::Teacher => &[Dashboard, Schedule, Students, Attendance, Assignments, Announcements],
            Role::Admin => &[Dashboard, Students, Attendance, Fees, Tickets, Announcements, Careers],
        }
    }

    pub fn can_view(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }

    pub fn url_for(&self, section: Section) -> String {
        match section {
            Section::Dashboard => format!("/{}", self.slug()),
            s => format!("/{}/{}", self.slug(), s.slug()),
        }
    }
}

/// Who is looking at the portal. Stands in for the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub role: Role,
    pub display_name: String,
    /// The student whose records a student or parent sees.
    pub student_name: Option<String>,
    /// The instructor whose courses and advisees a teacher sees.
    pub teacher_name: Option<String>,
}

pub const DEMO_STUDENT: &str = "Alice Johnson";
pub const DEMO_PARENT: &str = "Margaret Johnson";
pub const DEMO_TEACHER: &str = "Dr. Alan Smith";

impl Profile {
    pub fn demo(role: Role) -> Self {
        let (display_name, student_name, teacher_name) = match role {
            Role::Student => (DEMO_STUDENT, Some(DEMO_STUDENT), None),
            Role::Parent => (DEMO_PARENT, Some(DEMO_STUDENT), None),
            Role::Teacher => (DEMO_TEACHER, None, Some(DEMO_TEACHER)),
            Role::Admin => ("Registrar Office", None, None),
        };
        Profile {
            role,
            display_name: display_name.to_string(),
            student_name: student_name.map(str::to_string),
            teacher_name: teacher_name.map(str::to_string),
        }
    }

    pub fn avatar_initial(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter(|w| !w.ends_with('.'))
            .find_map(|w| w.chars().next())
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}
