use actix_web::web;

use crate::handlers;

pub fn scoped_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(web::resource("/register").route(web::post().to(handlers::auth::register)))
            .service(web::resource("/login").route(web::post().to(handlers::auth::login))),
    )
    .service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(handlers::projects::all))
                    .route(web::post().to(handlers::projects::create)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(handlers::projects::get_project))
                    .route(web::put().to(handlers::projects::update))
                    .route(web::delete().to(handlers::projects::delete)),
            ),
    )
    .service(
        web::scope("/events")
            .service(
                web::resource("")
                    .route(web::get().to(handlers::events::all))
                    .route(web::post().to(handlers::events::create)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(handlers::events::get_event))
                    .route(web::put().to(handlers::events::update))
                    .route(web::delete().to(handlers::events::delete)),
            ),
    )
    .service(
        web::scope("/news")
            .service(
                web::resource("")
                    .route(web::get().to(handlers::news::all))
                    .route(web::post().to(handlers::news::create)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(handlers::news::get_article))
                    .route(web::put().to(handlers::news::update))
                    .route(web::delete().to(handlers::news::delete)),
            ),
    )
    .service(
        web::scope("/volunteers").service(
            web::resource("")
                .route(web::get().to(handlers::volunteers::all))
                .route(web::post().to(handlers::volunteers::create)),
        ),
    )
    .service(
        web::scope("/contacts").service(
            web::resource("")
                .route(web::get().to(handlers::contacts::all))
                .route(web::post().to(handlers::contacts::create)),
        ),
    )
    .service(
        web::scope("/subscribers").service(
            web::resource("")
                .route(web::get().to(handlers::subscribers::all))
                .route(web::post().to(handlers::subscribers::create)),
        ),
    )
    .service(
        web::scope("/donations")
            .service(web::resource("").route(web::get().to(handlers::donations::all)))
            .service(web::resource("/payfast").route(web::post().to(handlers::donations::initiate)))
            .service(web::resource("/notify").route(web::post().to(handlers::donations::notify)))
            .service(web::resource("/success").route(web::get().to(handlers::donations::success)))
            .service(web::resource("/cancel").route(web::get().to(handlers::donations::cancel))),
    );
}
