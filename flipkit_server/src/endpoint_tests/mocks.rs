use flipkit_engine::{
    db_types::{GoogleProfile, NewOrder, NewVendor, Order, PaymentRef, SeedVendor, User, Vendor, VerifiedPayment},
    exchange_objects::ExchangeRate,
    traits::{
        ExchangeRateError,
        ExchangeRates,
        NewUser,
        OrderApiError,
        OrderManagement,
        UserApiError,
        UserManagement,
        VendorApiError,
        VendorManagement,
    },
};
use mockall::mock;

use crate::integrations::{GoogleApiError, OauthProvider, PaymentVerifier, PaystackApiError, RateApiError, RateSource};

mock! {
    pub OrderStore {}
    impl OrderManagement for OrderStore {
        async fn insert_pending_order(&self, order: NewOrder) -> Result<Order, OrderApiError>;
        async fn insert_paid_order(&self, order: NewOrder, payment: &VerifiedPayment) -> Result<Order, OrderApiError>;
        async fn fetch_order_by_reference(&self, reference: &PaymentRef) -> Result<Option<Order>, OrderApiError>;
        async fn mark_order_paid(&self, reference: &PaymentRef, payment: &VerifiedPayment) -> Result<Order, OrderApiError>;
        async fn fetch_orders_for_email(&self, email: &str) -> Result<Vec<Order>, OrderApiError>;
    }
}

mock! {
    pub VendorStore {}
    impl VendorManagement for VendorStore {
        async fn fetch_vendors(&self) -> Result<Vec<Vendor>, VendorApiError>;
        async fn fetch_vendors_by_category(&self, category: &str) -> Result<Vec<Vendor>, VendorApiError>;
        async fn fetch_vendor_by_id(&self, id: &str) -> Result<Option<Vendor>, VendorApiError>;
        async fn insert_vendor(&self, vendor: NewVendor) -> Result<Vendor, VendorApiError>;
        async fn import_vendors(&self, vendors: &[SeedVendor]) -> Result<usize, VendorApiError>;
    }
}

mock! {
    pub UserStore {}
    impl UserManagement for UserStore {
        async fn fetch_user_by_id(&self, id: &str) -> Result<Option<User>, UserApiError>;
        async fn fetch_user_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserApiError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, UserApiError>;
        async fn create_user(&self, user: NewUser) -> Result<User, UserApiError>;
        async fn link_google_id(&self, user_id: &str, google_id: &str) -> Result<User, UserApiError>;
    }
}

mock! {
    pub RateStore {}
    impl ExchangeRates for RateStore {
        async fn fetch_last_rate(&self, currency: &str) -> Result<ExchangeRate, ExchangeRateError>;
        async fn set_exchange_rate(&self, rate: &ExchangeRate) -> Result<(), ExchangeRateError>;
    }
}

mock! {
    pub Gateway {}
    impl PaymentVerifier for Gateway {
        async fn verify_transaction(&self, reference: &PaymentRef) -> Result<VerifiedPayment, PaystackApiError>;
    }
}

mock! {
    pub Oauth {}
    impl OauthProvider for Oauth {
        fn authorize_url(&self) -> String;
        async fn fetch_profile(&self, code: &str) -> Result<GoogleProfile, GoogleApiError>;
    }
}

mock! {
    pub RateFeed {}
    impl RateSource for RateFeed {
        async fn fetch_usd_rate(&self) -> Result<ExchangeRate, RateApiError>;
    }
}
