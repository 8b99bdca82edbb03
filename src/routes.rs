use crate::{
    api::{self, attendance, employee, health},
    service::Services,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(web::Data::new(services.employees.clone()))
        .app_data(web::Data::new(services.ledger.clone()))
        .app_data(web::Data::new(services.summary.clone()))
        .app_data(api::json_config())
        .app_data(api::query_config())
        .app_data(api::path_config())
        .service(health::index)
        .service(health::health)
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::post().to(employee::create_employee))
                        .route(web::get().to(employee::list_employees)),
                )
                // /employees/{employee_id}
                .service(
                    web::resource("/{employee_id}")
                        .route(web::get().to(employee::get_employee))
                        .route(web::delete().to(employee::delete_employee)),
                ),
        )
        .service(
            web::scope("/attendance")
                // /attendance
                .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
                // fixed segments must be registered before /{record_id}
                .service(web::resource("/all").route(web::get().to(attendance::all_attendance)))
                .service(
                    web::resource("/summary").route(web::get().to(attendance::attendance_summary)),
                )
                .service(
                    web::resource("/filter").route(web::get().to(attendance::filter_attendance)),
                )
                // /attendance/employee/{employee_id}
                .service(
                    web::resource("/employee/{employee_id}")
                        .route(web::get().to(attendance::employee_attendance)),
                )
                // /attendance/{record_id}
                .service(
                    web::resource("/{record_id}")
                        .route(web::patch().to(attendance::update_attendance)),
                ),
        );
}
