//! Pricing page: billing period toggle, plan selection, scroll reveal.

mod reveal;

use std::fmt;
use std::str::FromStr;

pub use reveal::{RevealId, RevealKind, RevealState, RevealTracker};

use crate::config::pages;
use crate::error::ClientError;
use crate::messages;
use crate::session::{Redirect, SessionManager};

/// Billing period shown on the pricing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl BillingPeriod {
    #[must_use]
    pub const fn from_yearly(yearly: bool) -> Self {
        if yearly { Self::Yearly } else { Self::Monthly }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Unit label next to a price.
    #[must_use]
    pub const fn unit_label(self) -> &'static str {
        match self {
            Self::Monthly => messages::PERIOD_MONTHLY,
            Self::Yearly => messages::PERIOD_YEARLY,
        }
    }

    /// Billing interval in Spanish, as used in the plan confirmation.
    #[must_use]
    pub const fn interval_name(self) -> &'static str {
        match self {
            Self::Monthly => "mes",
            Self::Yearly => "año",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Pro,
    Team,
    Academic,
}

impl Plan {
    pub const ALL: [Self; 4] = [Self::Free, Self::Pro, Self::Team, Self::Academic];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Team => "team",
            Self::Academic => "academic",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Team => "Team",
            Self::Academic => "Academic",
        }
    }

    /// List price for one billing interval (a month, or a whole year).
    #[must_use]
    pub const fn price(self, period: BillingPeriod) -> f64 {
        match (self, period) {
            (Self::Free, _) => 0.0,
            (Self::Pro, BillingPeriod::Monthly) => 9.99,
            (Self::Pro, BillingPeriod::Yearly) => 99.0,
            (Self::Team, BillingPeriod::Monthly) => 29.99,
            (Self::Team, BillingPeriod::Yearly) => 299.0,
            (Self::Academic, BillingPeriod::Monthly) => 4.99,
            (Self::Academic, BillingPeriod::Yearly) => 49.0,
        }
    }
}

impl FromStr for Plan {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClientError::validation("plan", format!("unknown plan: {s}")))
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A price on the page, carrying its `data-monthly` / `data-yearly` base prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceElement {
    monthly: Option<String>,
    yearly: Option<String>,
    has_unit_label: bool,

    /// Text currently displayed, e.g. `$9.99`.
    pub amount: String,

    /// Text of the adjacent unit label, when there is one.
    pub unit_label: Option<String>,
}

impl PriceElement {
    /// A price with both base prices and a unit label.
    #[must_use]
    pub fn new(monthly: impl Into<String>, yearly: impl Into<String>) -> Self {
        Self::from_attributes(Some(monthly.into()), Some(yearly.into()), true)
    }

    #[must_use]
    pub fn from_attributes(
        monthly: Option<String>,
        yearly: Option<String>,
        has_unit_label: bool,
    ) -> Self {
        let amount = monthly.as_ref().map(|m| format!("${m}")).unwrap_or_default();
        Self {
            monthly,
            yearly,
            has_unit_label,
            amount,
            unit_label: has_unit_label.then(|| messages::PERIOD_MONTHLY.to_string()),
        }
    }

    /// Recompute the displayed amount. Elements missing either base price are skipped.
    pub fn update(&mut self, period: BillingPeriod) {
        let (Some(monthly), Some(yearly)) = (&self.monthly, &self.yearly) else {
            return;
        };

        match period {
            BillingPeriod::Monthly => self.amount = format!("${monthly}"),
            BillingPeriod::Yearly => match yearly.trim().parse::<f64>() {
                Ok(yearly) => self.amount = format!("${:.2}", round_cents(yearly / 12.0)),
                Err(e) => {
                    tracing::warn!(yearly = %yearly, error = %e, "Unparseable yearly price");
                    return;
                }
            },
        }

        if self.has_unit_label {
            self.unit_label = Some(period.unit_label().to_string());
        }
    }
}

/// Round to cents, halves away from zero.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// What selecting a plan leads to.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanSelection {
    /// Not logged in: go to signup, carrying plan and period.
    Signup(Redirect),
    /// Logged in and picked the free plan.
    AlreadyFree { message: String },
    /// Logged in and picked a paid plan; checkout is not available yet.
    CheckoutPending { plan: Plan, period: BillingPeriod, price: f64, message: String },
}

/// Pricing page state.
#[derive(Debug, Clone)]
pub struct PricingPage {
    period: BillingPeriod,
    prices: Vec<PriceElement>,
    monthly_label_active: bool,
    yearly_label_active: bool,
    reveal: RevealTracker,
}

impl PricingPage {
    /// Page in monthly mode.
    #[must_use]
    pub fn new(prices: Vec<PriceElement>) -> Self {
        let mut page = Self {
            period: BillingPeriod::Monthly,
            prices,
            monthly_label_active: true,
            yearly_label_active: false,
            reveal: RevealTracker::new(),
        };
        page.set_period(BillingPeriod::Monthly);
        page
    }

    /// Page with one price per paid plan.
    #[must_use]
    pub fn with_plan_table() -> Self {
        let prices = Plan::ALL
            .into_iter()
            .filter(|plan| *plan != Plan::Free)
            .map(|plan| {
                PriceElement::new(
                    plan.price(BillingPeriod::Monthly).to_string(),
                    plan.price(BillingPeriod::Yearly).to_string(),
                )
            })
            .collect();
        Self::new(prices)
    }

    #[must_use]
    pub const fn period(&self) -> BillingPeriod {
        self.period
    }

    #[must_use]
    pub fn prices(&self) -> &[PriceElement] {
        &self.prices
    }

    #[must_use]
    pub const fn monthly_label_active(&self) -> bool {
        self.monthly_label_active
    }

    #[must_use]
    pub const fn yearly_label_active(&self) -> bool {
        self.yearly_label_active
    }

    #[must_use]
    pub const fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut RevealTracker {
        &mut self.reveal
    }

    /// Billing toggle changed.
    pub fn toggle(&mut self, yearly: bool) {
        self.set_period(BillingPeriod::from_yearly(yearly));
    }

    pub fn set_period(&mut self, period: BillingPeriod) {
        self.period = period;
        for price in &mut self.prices {
            price.update(period);
        }
        self.monthly_label_active = period == BillingPeriod::Monthly;
        self.yearly_label_active = period == BillingPeriod::Yearly;
        tracing::debug!(%period, "Billing period changed");
    }

    /// Stage a plan selection for the current billing period.
    #[must_use]
    pub fn select_plan(&self, plan: Plan, session: &SessionManager) -> PlanSelection {
        let period = self.period;
        tracing::info!(%plan, %period, "Plan selected");

        if !session.is_logged_in() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("plan", plan.slug())
                .append_pair("period", period.as_str())
                .finish();
            return PlanSelection::Signup(Redirect::immediate(format!(
                "{}?{query}",
                pages::SIGNUP
            )));
        }

        if plan == Plan::Free {
            return PlanSelection::AlreadyFree { message: messages::FREE_PLAN_ACK.to_string() };
        }

        let price = plan.price(period);
        let message = format!(
            "¡Excelente elección!\n\nPlan: {}\nPrecio: ${}/{}\n\n\
             La integración con Stripe estará disponible próximamente.\n\
             Por ahora, puedes contactarnos para activar tu plan manualmente.",
            plan.display_name(),
            price,
            period.interval_name(),
        );
        PlanSelection::CheckoutPending { plan, period, price, message }
    }

    /// Plan the logged-in user is on.
    ///
    /// There is no subscription endpoint yet, so any user with a valid
    /// session is reported on the free plan. Read-only: a rejected token is
    /// left in storage.
    pub async fn current_plan(&self, session: &SessionManager) -> Option<Plan> {
        let token = session.token()?;
        match session.client().current_user(&token).await {
            Ok(user) => {
                tracing::debug!(email = %user.email, "Assuming free plan for user");
                Some(Plan::Free)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error checking current plan");
                None
            }
        }
    }
}

impl Default for PricingPage {
    fn default() -> Self {
        Self::with_plan_table()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::ApiClient;
    use crate::config::Config;
    use crate::storage::{MemoryTokenStore, TokenStore};

    fn session(logged_in: bool) -> SessionManager {
        let store = MemoryTokenStore::new();
        if logged_in {
            store.set("auth_token", "tok").unwrap();
        }
        let client = ApiClient::new(&Config::for_testing("http://localhost:9")).unwrap();
        SessionManager::new(client, Arc::new(store))
    }

    #[test]
    fn test_yearly_price_is_monthly_equivalent() {
        let mut price = PriceElement::new("9.99", "99");
        price.update(BillingPeriod::Yearly);
        assert_eq!(price.amount, "$8.25");
        assert_eq!(price.unit_label.as_deref(), Some("/mes (facturado anualmente)"));

        price.update(BillingPeriod::Monthly);
        assert_eq!(price.amount, "$9.99");
        assert_eq!(price.unit_label.as_deref(), Some("/mes"));
    }

    #[test]
    fn test_yearly_half_cent_rounds_up() {
        let mut price = PriceElement::new("4.99", "49.5");
        price.update(BillingPeriod::Yearly);
        assert_eq!(price.amount, "$4.13");

        let mut price = PriceElement::new("1", "1.5");
        price.update(BillingPeriod::Yearly);
        assert_eq!(price.amount, "$0.13");
    }

    #[test]
    fn test_price_without_both_bases_is_skipped() {
        let mut price = PriceElement::from_attributes(Some("5".to_string()), None, true);
        price.update(BillingPeriod::Yearly);
        assert_eq!(price.amount, "$5");
        assert_eq!(price.unit_label.as_deref(), Some("/mes"));
    }

    #[test]
    fn test_price_without_unit_label() {
        let mut price =
            PriceElement::from_attributes(Some("29.99".to_string()), Some("299".to_string()), false);
        price.update(BillingPeriod::Yearly);
        assert_eq!(price.amount, "$24.92");
        assert_eq!(price.unit_label, None);
    }

    #[test]
    fn test_toggle_labels_are_exclusive() {
        let mut page = PricingPage::default();
        assert!(page.monthly_label_active());
        assert!(!page.yearly_label_active());

        page.toggle(true);
        assert_eq!(page.period(), BillingPeriod::Yearly);
        assert!(!page.monthly_label_active());
        assert!(page.yearly_label_active());
        assert_eq!(page.prices()[0].amount, "$8.25");

        page.toggle(false);
        assert!(page.monthly_label_active());
        assert_eq!(page.prices()[0].amount, "$9.99");
    }

    #[test]
    fn test_select_plan_logged_out_redirects_to_signup() {
        let mut page = PricingPage::default();
        page.toggle(true);
        match page.select_plan(Plan::Pro, &session(false)) {
            PlanSelection::Signup(redirect) => {
                assert_eq!(redirect.location, "/static/signup.html?plan=pro&period=yearly");
            }
            other => panic!("expected signup redirect, got {other:?}"),
        }
    }

    #[test]
    fn test_select_free_plan_logged_in() {
        let page = PricingPage::default();
        assert_eq!(
            page.select_plan(Plan::Free, &session(true)),
            PlanSelection::AlreadyFree { message: messages::FREE_PLAN_ACK.to_string() }
        );
    }

    #[test]
    fn test_select_paid_plan_logged_in() {
        let mut page = PricingPage::default();
        page.toggle(true);
        match page.select_plan(Plan::Team, &session(true)) {
            PlanSelection::CheckoutPending { plan, price, message, .. } => {
                assert_eq!(plan, Plan::Team);
                assert!((price - 299.0).abs() < f64::EPSILON);
                assert!(message.contains("Plan: Team"));
                assert!(message.contains("Precio: $299/año"));
            }
            other => panic!("expected pending checkout, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!("academic".parse::<Plan>().unwrap(), Plan::Academic);
        assert_eq!("PRO".parse::<Plan>().unwrap(), Plan::Pro);
        assert!("enterprise".parse::<Plan>().is_err());
    }
}
