//! Test service builder.
//! Given an AppState, build an initialized Actix **test service** with the
//! production routes, fallback and trace middleware.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::Error as ActixError;
use actix_web::{web, App};

use crate::middleware::RequestTrace;
use crate::state::app_state::AppState;

pub fn create_test_app_builder(state: AppState) -> TestAppBuilder {
    TestAppBuilder { state }
}

pub struct TestAppBuilder {
    state: AppState,
}

impl TestAppBuilder {
    /// Build and initialize the Actix test service.
    pub async fn build(
        self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>
    {
        let app = App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(self.state))
            .configure(crate::routes::configure)
            .default_service(web::to(crate::routes::not_found));

        actix_web::test::init_service(app).await
    }
}
