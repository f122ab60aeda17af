use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use flipkit_engine::{ExchangeRateApi, OrderFlowApi, SqliteDatabase, UserApi, VendorApi};

use crate::{
    auth::TokenIssuer,
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    integrations::{GoogleOauthApi, PaystackApi, RateApi},
    routes::{
        health,
        AddVendorRoute,
        CreateOrderRoute,
        ExchangeRateRoute,
        GoogleCallbackRoute,
        GoogleLoginRoute,
        MeRoute,
        MyOrdersRoute,
        PaystackVerifyRoute,
        VendorByIdRoute,
        VendorsRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let paystack = PaystackApi::new(config.paystack.clone())?;
    let google = GoogleOauthApi::new(config.google.clone());
    let rates = RateApi::new(config.rate_api_url.clone());
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone());
        let vendors_api = VendorApi::new(db.clone());
        let users_api = UserApi::new(db.clone());
        let rates_api = ExchangeRateApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        let options = ServerOptions { frontend_url: config.frontend_url.clone() };
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("fks::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(vendors_api))
            .app_data(web::Data::new(users_api))
            .app_data(web::Data::new(rates_api))
            .app_data(web::Data::new(jwt_signer))
            .app_data(web::Data::new(options))
            .app_data(web::Data::new(paystack.clone()))
            .app_data(web::Data::new(google.clone()))
            .app_data(web::Data::new(rates.clone()))
            .service(health)
            .service(PaystackVerifyRoute::<SqliteDatabase, PaystackApi>::new())
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(MyOrdersRoute::<SqliteDatabase>::new())
            .service(VendorByIdRoute::<SqliteDatabase>::new())
            .service(VendorsRoute::<SqliteDatabase>::new())
            .service(AddVendorRoute::<SqliteDatabase>::new())
            .service(GoogleLoginRoute::<GoogleOauthApi>::new())
            .service(GoogleCallbackRoute::<SqliteDatabase, GoogleOauthApi>::new())
            .service(MeRoute::<SqliteDatabase>::new())
            .service(ExchangeRateRoute::<SqliteDatabase, RateApi>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
