use actix_web::{web, HttpResponse};

use crate::AppState;
use crate::errors::{AppError, render};
use crate::templates_structs::{IndexTemplate, RoleCard};

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render(IndexTemplate {
        app_name: state.config.app_name.clone(),
        roles: RoleCard::all(),
    })
}
