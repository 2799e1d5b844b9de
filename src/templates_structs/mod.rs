// Template context structures for Askama templates, one file per page family.

use chrono::NaiveDate;

use crate::models::nav_item::{self, NavModule, NavSidebarItem};
use crate::models::role::Profile;

mod api;
mod dashboard;
mod home;
mod list;

pub use self::api::{ApiErrorResponse, ApiListResponse};
pub use self::dashboard::{DashboardTemplate, PANEL_PAGE, Panel};
pub use self::home::{IndexTemplate, RoleCard};
pub use self::list::{FilterOption, FilterView, HeaderView, ListTemplate, PageLink, Pager};

/// Common context shared by every role page.
/// Templates access these as `ctx.display_name`, `ctx.nav_modules`, etc.
pub struct PageContext {
    pub app_name: String,
    pub role_slug: String,
    pub role_label: String,
    pub display_name: String,
    pub avatar_initial: String,
    pub nav_modules: Vec<NavModule>,
    pub sidebar_items: Vec<NavSidebarItem>,
    pub title: String,
    pub today_label: String,
}

impl PageContext {
    pub fn build(app_name: &str, profile: &Profile, current_path: &str, title: &str, today: NaiveDate) -> Self {
        let (nav_modules, sidebar_items) = nav_item::find_navigation(profile.role, current_path);
        Self {
            app_name: app_name.to_string(),
            role_slug: profile.role.slug().to_string(),
            role_label: profile.role.label().to_string(),
            display_name: profile.display_name.clone(),
            avatar_initial: profile.avatar_initial(),
            nav_modules,
            sidebar_items,
            title: title.to_string(),
            today_label: today.format("%A, %B %-d, %Y").to_string(),
        }
    }
}
