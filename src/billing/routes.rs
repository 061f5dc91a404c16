//! The web app routes on the URL fragment, so every URL handed to the billing
//! provider has to carry its client route after `#`.

use url::Url;

pub const SUBSCRIPTION_ROUTE: &str = "/dashboard/subscription";
/// `{CHECKOUT_SESSION_ID}` is substituted by the billing provider.
pub const CHECKOUT_SUCCESS_ROUTE: &str = "/checkout/success?session_id={CHECKOUT_SESSION_ID}";
pub const CHECKOUT_CANCEL_ROUTE: &str = "/checkout/cancel";

/// `https://app.example/` + `/dashboard` -> `https://app.example/#/dashboard`.
pub fn hash_route_url(app_url: &Url, route: &str) -> Url {
    let mut url = app_url.clone();
    url.set_query(None);
    let route = route.trim_start_matches('#');
    if route.starts_with('/') {
        url.set_fragment(Some(route));
    } else {
        url.set_fragment(Some(&format!("/{route}")));
    }
    url
}
