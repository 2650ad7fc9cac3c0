//! App Router

use salvo::Router;

use crate::{access, admin, sessions};

pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("access").post(access::unlock::handler))
        .push(Router::with_path("sessions/{session}").push(session_router()))
        .push(
            Router::with_path("admin/tokens")
                .hoop(admin::middleware::handler)
                .get(admin::index::handler)
                .post(admin::create::handler)
                .push(Router::with_path("{token}").delete(admin::delete::handler)),
        )
}

fn session_router() -> Router {
    Router::new()
        .get(sessions::get::handler)
        .delete(sessions::close::handler)
        .push(Router::with_path("search").post(sessions::search::handler))
        .push(Router::with_path("more").post(sessions::more::handler))
        .push(Router::with_path("reset").post(sessions::reset::handler))
        .push(
            Router::with_path("questions")
                .get(sessions::questions::handler)
                .push(
                    Router::with_path("{question}")
                        .push(Router::with_path("masterclass").get(sessions::masterclass::handler))
                        .push(Router::with_path("evaluation").post(sessions::evaluation::handler)),
                ),
        )
        .push(
            Router::with_path("intelligence")
                .push(Router::with_path("career-path").get(sessions::intelligence::career_path))
                .push(Router::with_path("salary").get(sessions::intelligence::salary))
                .push(Router::with_path("networking").get(sessions::intelligence::networking)),
        )
        .push(Router::with_path("simulation-report").post(sessions::simulation::handler))
}
