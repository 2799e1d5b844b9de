use askama::Template;

use crate::models::role::Role;

pub struct RoleCard {
    pub label: String,
    pub url: String,
    pub blurb: String,
}

impl RoleCard {
    pub fn all() -> Vec<RoleCard> {
        Role::ALL
            .iter()
            .map(|role| RoleCard {
                label: role.label().to_string(),
                url: format!("/{}", role.slug()),
                blurb: match role {
                    Role::Student => "Classes, assignments, grades and fees.",
                    Role::Parent => "Follow attendance, grades and payments.",
                    Role::Teacher => "Timetable, advisees and coursework.",
                    Role::Admin => "Enrollment, finance and support desk.",
                }
                .to_string(),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app_name: String,
    pub roles: Vec<RoleCard>,
}
