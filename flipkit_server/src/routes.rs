//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (I/O, database calls, outbound
//! HTTP) must be expressed as futures or asynchronous functions, which get executed concurrently by worker threads.

use actix_web::{get, http::header, web, HttpResponse, Responder};
use flipkit_engine::{
    db_types::{NewOrder, NewVendor, PaymentRef},
    traits::{ExchangeRates, OrderManagement, UserManagement, VendorManagement},
    ExchangeRateApi,
    OrderFlowApi,
    PaymentClaim,
    UserApi,
    VendorApi,
};
use log::*;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::ServerOptions,
    data_objects::{CallbackQuery, NewOrderParams, VendorQuery, VerifyPaymentParams, VerifyPaymentResult},
    errors::ServerError,
    integrations::{OauthProvider, PaymentVerifier, RateSource},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//---------------------------------------   Payment verification  ----------------------------------------------
route!(paystack_verify => Post "/paystack/verify" impl OrderManagement, PaymentVerifier);
/// Route handler for the Paystack verification endpoint.
///
/// The client submits the reference it paid against, along with the email and amount it believes it paid. The
/// reference is looked up with the gateway, cross-checked against the claim, and reconciled into the order store
/// (see [`OrderFlowApi::reconcile_payment`] for the exact semantics). Nothing in the request is trusted until the
/// gateway has confirmed it.
pub async fn paystack_verify<B, V>(
    body: web::Json<VerifyPaymentParams>,
    api: web::Data<OrderFlowApi<B>>,
    gateway: web::Data<V>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderManagement,
    V: PaymentVerifier,
{
    let params = body.into_inner();
    if params.reference.as_str().trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("A payment reference is required".to_string()));
    }
    if params.email.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("An email address is required".to_string()));
    }
    if !params.amount.is_positive() {
        return Err(ServerError::InvalidRequestBody("The amount must be a positive number of kobo".to_string()));
    }
    debug!("💻️ POST verify payment [{}] for {}", params.reference, params.email);
    let payment = gateway.verify_transaction(&params.reference).await?;
    let claim = PaymentClaim {
        reference: params.reference,
        email: params.email,
        amount: params.amount,
        username: params.username,
    };
    let order = api.reconcile_payment(&claim, &payment).await?;
    info!("💻️ Payment [{}] verified and reconciled", order.payment_reference);
    let result = VerifyPaymentResult {
        success: true,
        message: "Payment verified".to_string(),
        reference: order.payment_reference.clone(),
        order,
    };
    Ok(HttpResponse::Ok().json(result))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders" impl OrderManagement);
/// Reserve an order reference before the client starts the gateway checkout. The reference is generated server-side
/// unless the client supplies its own, in which case a duplicate is a 409.
pub async fn create_order<B: OrderManagement>(
    body: web::Json<NewOrderParams>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    if params.email.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("An email address is required".to_string()));
    }
    let reference = params.reference.unwrap_or_else(PaymentRef::generate);
    let mut order = NewOrder::new(params.email, params.amount.unwrap_or_default(), reference);
    order.username = params.username;
    order.metadata = params.metadata;
    if let Some(currency) = params.currency {
        order.currency = currency;
    }
    debug!("💻️ POST new pending order [{}]", order.payment_reference);
    let order = api.create_pending_order(order).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(my_orders => Get "/orders/me" impl OrderManagement);
pub async fn my_orders<B: OrderManagement>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my_orders for {}", claims.sub);
    let orders = api.orders_for_email(&claims.email).await?;
    Ok(HttpResponse::Ok().json(orders))
}

//----------------------------------------------   Vendors  ----------------------------------------------------
route!(vendors => Get "/vendors" impl VendorManagement);
pub async fn vendors<B: VendorManagement>(
    query: web::Query<VendorQuery>,
    api: web::Data<VendorApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let vendors = match query.into_inner().product {
        Some(category) => {
            debug!("💻️ GET vendors in category [{category}]");
            api.vendors_by_category(&category).await?
        },
        None => api.all_vendors().await?,
    };
    Ok(HttpResponse::Ok().json(vendors))
}

route!(vendor_by_id => Get "/vendors/{id}" impl VendorManagement);
pub async fn vendor_by_id<B: VendorManagement>(
    path: web::Path<String>,
    api: web::Data<VendorApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET vendor [{id}]");
    let vendor = api.vendor_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(vendor))
}

route!(add_vendor => Post "/vendors" impl VendorManagement);
pub async fn add_vendor<B: VendorManagement>(
    body: web::Json<NewVendor>,
    api: web::Data<VendorApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let vendor = body.into_inner();
    if vendor.name.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("A vendor name is required".to_string()));
    }
    let vendor = api.add_vendor(vendor).await?;
    Ok(HttpResponse::Ok().json(vendor))
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(google_login => Get "/auth/google" impl OauthProvider);
pub async fn google_login<P: OauthProvider>(provider: web::Data<P>) -> Result<HttpResponse, ServerError> {
    let url = provider.authorize_url();
    trace!("💻️ Redirecting to Google consent screen");
    Ok(HttpResponse::Found().insert_header((header::LOCATION, url)).finish())
}

route!(google_callback => Get "/auth/google/callback" impl UserManagement, OauthProvider);
/// Route handler for the Google OAuth callback.
///
/// Exchanges the code for a profile, resolves it to a local user (creating or linking as needed), issues a session
/// JWT and bounces the browser back to the frontend with `?token=<jwt>`.
pub async fn google_callback<B, P>(
    query: web::Query<CallbackQuery>,
    api: web::Data<UserApi<B>>,
    provider: web::Data<P>,
    signer: web::Data<TokenIssuer>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError>
where
    B: UserManagement,
    P: OauthProvider,
{
    let query = query.into_inner();
    if let Some(error) = query.error {
        warn!("💻️ Google sign-in was refused: {error}");
        let url = format!("{}?error={}", options.frontend_url, urlencoding::encode(&error));
        return Ok(HttpResponse::Found().insert_header((header::LOCATION, url)).finish());
    }
    let code =
        query.code.ok_or_else(|| ServerError::InvalidRequestBody("Missing authorization code".to_string()))?;
    let profile = provider.fetch_profile(&code).await?;
    let user = api.resolve_google_user(profile).await?;
    let token = signer.issue_token(&user, None)?;
    info!("💻️ User {} signed in with Google", user.id);
    let url = format!("{}?token={}", options.frontend_url, urlencoding::encode(&token));
    Ok(HttpResponse::Found().insert_header((header::LOCATION, url)).finish())
}

route!(me => Get "/auth/me" impl UserManagement);
pub async fn me<B: UserManagement>(
    claims: JwtClaims,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET profile for {}", claims.sub);
    let user = api.fetch_user(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(user))
}

//----------------------------------------------   Rates  ----------------------------------------------------
route!(exchange_rate => Get "/rates" impl ExchangeRates, RateSource);
/// The current USD→NGN rate. The upstream feed is the source of truth; every successful fetch is persisted so that
/// the last known rate can still be served when the feed is down.
pub async fn exchange_rate<B, R>(
    api: web::Data<ExchangeRateApi<B>>,
    source: web::Data<R>,
) -> Result<HttpResponse, ServerError>
where
    B: ExchangeRates,
    R: RateSource,
{
    let rate = match source.fetch_usd_rate().await {
        Ok(rate) => {
            api.set_exchange_rate(&rate).await?;
            rate
        },
        Err(e) => {
            warn!("💻️ Rate provider is unavailable ({e}). Serving the stored rate.");
            api.fetch_last_rate("USD").await?
        },
    };
    Ok(HttpResponse::Ok().json(rate))
}
