use crate::models::role::Role;

/// Portal switcher entry in the header (one per role).
pub struct NavModule {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

pub struct NavSidebarItem {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

/// Returns (header_modules, sidebar_items) for a role and the current path.
pub fn find_navigation(role: Role, current_path: &str) -> (Vec<NavModule>, Vec<NavSidebarItem>) {
    let modules = Role::ALL
        .iter()
        .map(|r| NavModule {
            label: r.label().to_string(),
            url: format!("/{}", r.slug()),
            is_active: *r == role,
        })
        .collect();

    let entries: Vec<(String, &'static str)> = role
        .sections()
        .iter()
        .map(|s| (role.url_for(*s), s.label()))
        .collect();

    // Longest-prefix match: "/student" must not light up on "/student/fees"
    let best_match_len = entries
        .iter()
        .filter(|(url, _)| path_matches(current_path, url))
        .map(|(url, _)| url.len())
        .max()
        .unwrap_or(0);

    let sidebar = entries
        .into_iter()
        .map(|(url, label)| NavSidebarItem {
            is_active: url.len() == best_match_len && path_matches(current_path, &url),
            label: label.to_string(),
            url,
        })
        .collect();

    (modules, sidebar)
}

/// Prefix match on whole path segments.
fn path_matches(current_path: &str, url: &str) -> bool {
    match current_path.strip_prefix(url) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_labels(items: &[NavSidebarItem]) -> Vec<&str> {
        items.iter().filter(|i| i.is_active).map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn dashboard_active_on_role_root() {
        let (modules, sidebar) = find_navigation(Role::Student, "/student");
        assert_eq!(active_labels(&sidebar), vec!["Dashboard"]);
        let active: Vec<_> = modules.iter().filter(|m| m.is_active).map(|m| m.url.as_str()).collect();
        assert_eq!(active, vec!["/student"]);
    }

    #[test]
    fn only_most_specific_entry_is_active() {
        let (_, sidebar) = find_navigation(Role::Admin, "/admin/tickets");
        assert_eq!(active_labels(&sidebar), vec!["Support Tickets"]);
    }

    #[test]
    fn sidebar_follows_role_sections() {
        let (_, sidebar) = find_navigation(Role::Parent, "/parent");
        assert_eq!(sidebar.len(), Role::Parent.sections().len());
        assert!(sidebar.iter().all(|i| i.url.starts_with("/parent")));
    }

    #[test]
    fn segment_prefix_only() {
        assert!(path_matches("/student/fees", "/student"));
        assert!(!path_matches("/students", "/student"));
    }
}
