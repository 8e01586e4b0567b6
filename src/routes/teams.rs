use actix_web::web;

use crate::handlers::teams;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/teams").route("/{code}", web::get().to(teams::get_team_by_code)));
}
