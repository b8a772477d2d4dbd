//! Grocery checkout demo: cart, totals, screen flow and payment.

use rand::Rng;

use helios_core::constants::{ECO_DISCOUNT_RATE, ORDER_NUMBER_PREFIX, PAYMENT_PROCESSING_MS, TAX_RATE};
use helios_core::enums::{DeliveryOption, OrderScreen, PaymentMethod};
use helios_core::state::{GroceryView, OrderTotals};
use helios_core::types::CartItem;
use helios_core::{HeliosError, HeliosResult};

use crate::timers::{Scheduler, TimerId, TimerKey};

pub fn delivery_fee(option: DeliveryOption) -> f64 {
    match option {
        DeliveryOption::Drone => 4.99,
        DeliveryOption::Standard => 0.0,
        DeliveryOption::Hyperloop => 12.99,
    }
}

pub fn delivery_eta(option: DeliveryOption) -> &'static str {
    match option {
        DeliveryOption::Drone => "15-30 minutes",
        DeliveryOption::Standard => "2-4 hours",
        DeliveryOption::Hyperloop => "5-10 minutes",
    }
}

pub fn payment_fee(method: PaymentMethod) -> f64 {
    match method {
        PaymentMethod::CreditCard => 2.99,
        PaymentMethod::DigitalWallet | PaymentMethod::Crypto => 0.0,
    }
}

fn screen_rank(screen: OrderScreen) -> u8 {
    match screen {
        OrderScreen::Dashboard => 0,
        OrderScreen::Cart => 1,
        OrderScreen::Finalization => 2,
        OrderScreen::Payment => 3,
        OrderScreen::Confirmation => 4,
    }
}

fn seeded_cart() -> Vec<CartItem> {
    [
        ("1", "Organic Avocados", 2.99, 3, "Produce"),
        ("2", "Grass-Fed Beef", 12.99, 1, "Meat"),
        ("3", "Quinoa Blend", 4.99, 2, "Grains"),
    ]
    .into_iter()
    .map(|(id, name, price, quantity, category)| CartItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        quantity,
        category: category.to_string(),
    })
    .collect()
}

/// Checkout arithmetic for a cart and the chosen options.
pub fn compute_totals(items: &[CartItem], delivery: DeliveryOption, payment: PaymentMethod) -> OrderTotals {
    let subtotal: f64 = items.iter().map(CartItem::line_total).sum();
    let discount = subtotal * ECO_DISCOUNT_RATE;
    let tax = (subtotal - discount) * TAX_RATE;
    let delivery_fee = delivery_fee(delivery);
    let payment_fee = payment_fee(payment);
    OrderTotals {
        total_items: items.iter().map(|i| i.quantity).sum(),
        subtotal,
        discount,
        tax,
        delivery_fee,
        payment_fee,
        total: subtotal - discount + tax + delivery_fee + payment_fee,
    }
}

#[derive(Debug)]
pub struct GroceryOrder {
    items: Vec<CartItem>,
    screen: OrderScreen,
    payment: PaymentMethod,
    delivery: DeliveryOption,
    payment_timer: Option<TimerId>,
    order_number: Option<String>,
}

impl Default for GroceryOrder {
    fn default() -> Self {
        Self {
            items: seeded_cart(),
            screen: OrderScreen::default(),
            payment: PaymentMethod::default(),
            delivery: DeliveryOption::default(),
            payment_timer: None,
            order_number: None,
        }
    }
}

impl GroceryOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> OrderScreen {
        self.screen
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_processing(&self) -> bool {
        self.payment_timer.is_some()
    }

    pub fn totals(&self) -> OrderTotals {
        compute_totals(&self.items, self.delivery, self.payment)
    }

    /// Set a line's quantity; zero removes the line.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> HeliosResult<()> {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            return Err(HeliosError::InvalidTransition(format!("no cart item {id}")));
        };
        if quantity == 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = quantity;
        }
        Ok(())
    }

    pub fn remove_item(&mut self, id: &str) -> HeliosResult<()> {
        self.update_quantity(id, 0)
    }

    /// Move between screens: back anywhere, forward one screen at a time.
    /// Confirmation is only reached by completing the order.
    pub fn navigate(&mut self, screen: OrderScreen) -> HeliosResult<()> {
        if self.is_processing() {
            return Err(HeliosError::InvalidTransition(
                "payment is being processed".to_string(),
            ));
        }
        if screen == OrderScreen::Confirmation {
            return Err(HeliosError::InvalidTransition(
                "confirmation is reached by completing the order".to_string(),
            ));
        }
        let from = screen_rank(self.screen);
        let to = screen_rank(screen);
        if self.screen != OrderScreen::Confirmation && to > from + 1 {
            return Err(HeliosError::InvalidTransition(format!(
                "cannot skip from {:?} to {:?}",
                self.screen, screen
            )));
        }
        if to >= screen_rank(OrderScreen::Finalization) && to > from && self.items.is_empty() {
            return Err(HeliosError::EmptyCart);
        }
        tracing::debug!(from = ?self.screen, to = ?screen, "order screen");
        self.screen = screen;
        Ok(())
    }

    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.payment = method;
    }

    pub fn select_delivery(&mut self, option: DeliveryOption) {
        self.delivery = option;
    }

    /// Start payment processing from the payment screen.
    pub fn complete_order(&mut self, now_ms: u64, timers: &mut Scheduler<TimerKey>) -> HeliosResult<()> {
        if self.items.is_empty() {
            return Err(HeliosError::EmptyCart);
        }
        if self.is_processing() {
            return Err(HeliosError::InvalidTransition(
                "payment is already being processed".to_string(),
            ));
        }
        if self.screen != OrderScreen::Payment {
            return Err(HeliosError::InvalidTransition(format!(
                "orders are completed from the payment screen, not {:?}",
                self.screen
            )));
        }
        self.payment_timer =
            Some(timers.schedule_after(now_ms, PAYMENT_PROCESSING_MS, TimerKey::PaymentProcessed));
        tracing::info!(total = self.totals().total, "processing payment");
        Ok(())
    }

    /// Payment went through: assign the order number and confirm.
    pub fn on_payment_processed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        self.payment_timer.take()?;
        let number = format!("{ORDER_NUMBER_PREFIX}-{:06}", rng.gen_range(0..1_000_000u32));
        self.order_number = Some(number.clone());
        self.screen = OrderScreen::Confirmation;
        tracing::info!(order = %number, "order confirmed");
        Some(number)
    }

    pub fn view(&self) -> GroceryView {
        GroceryView {
            screen: self.screen,
            items: self.items.clone(),
            totals: self.totals(),
            payment: self.payment,
            delivery: self.delivery,
            delivery_eta: delivery_eta(self.delivery).to_string(),
            processing_payment: self.is_processing(),
            order_number: self.order_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn to_payment(order: &mut GroceryOrder) {
        order.navigate(OrderScreen::Cart).unwrap();
        order.navigate(OrderScreen::Finalization).unwrap();
        order.navigate(OrderScreen::Payment).unwrap();
    }

    #[test]
    fn seeded_cart_totals() {
        let order = GroceryOrder::new();
        let t = order.totals();
        assert_eq!(t.total_items, 6);
        assert!(close(t.subtotal, 31.94));
        assert!(close(t.discount, 31.94 * 0.15));
        assert!(close(t.tax, 31.94 * 0.85 * 0.08));
        assert!(close(t.delivery_fee, 4.99));
        assert!(close(t.payment_fee, 0.0));
        assert!(close(t.total, 31.94 * 0.85 * 1.08 + 4.99));
    }

    #[test]
    fn fees_follow_selection() {
        let mut order = GroceryOrder::new();
        order.select_payment(PaymentMethod::CreditCard);
        order.select_delivery(DeliveryOption::Standard);
        let t = order.totals();
        assert!(close(t.delivery_fee, 0.0));
        assert!(close(t.payment_fee, 2.99));
        assert_eq!(order.view().delivery_eta, "2-4 hours");
    }

    #[test]
    fn zero_quantity_removes_line() {
        let mut order = GroceryOrder::new();
        order.update_quantity("2", 0).unwrap();
        assert_eq!(order.items().len(), 2);
        order.update_quantity("1", 5).unwrap();
        assert_eq!(order.totals().total_items, 7);
        assert!(order.remove_item("2").is_err());
    }

    #[test]
    fn screens_cannot_be_skipped() {
        let mut order = GroceryOrder::new();
        assert!(order.navigate(OrderScreen::Payment).is_err());
        assert!(order.navigate(OrderScreen::Confirmation).is_err());
        to_payment(&mut order);
        order.navigate(OrderScreen::Cart).unwrap();
        assert_eq!(order.screen(), OrderScreen::Cart);
    }

    #[test]
    fn empty_cart_cannot_check_out() {
        let mut order = GroceryOrder::new();
        for id in ["1", "2", "3"] {
            order.remove_item(id).unwrap();
        }
        order.navigate(OrderScreen::Cart).unwrap();
        assert!(matches!(
            order.navigate(OrderScreen::Finalization),
            Err(HeliosError::EmptyCart)
        ));
        let mut timers = Scheduler::new();
        assert!(matches!(
            order.complete_order(0, &mut timers),
            Err(HeliosError::EmptyCart)
        ));
    }

    #[test]
    fn payment_confirms_after_processing() {
        let mut timers = Scheduler::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut order = GroceryOrder::new();
        to_payment(&mut order);

        order.complete_order(1_000, &mut timers).unwrap();
        assert!(order.is_processing());
        assert!(order.complete_order(1_500, &mut timers).is_err());
        assert!(order.navigate(OrderScreen::Cart).is_err());

        let (due, _, key) = timers.pop_due(u64::MAX).unwrap();
        assert_eq!(due, 4_000);
        assert_eq!(key, TimerKey::PaymentProcessed);

        let number = order.on_payment_processed(&mut rng).unwrap();
        assert!(number.starts_with("MG2035-"));
        assert_eq!(number.len(), "MG2035-".len() + 6);
        assert_eq!(order.screen(), OrderScreen::Confirmation);
        assert_eq!(order.view().order_number.as_deref(), Some(number.as_str()));
    }
}
