//! Order domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Order aggregate with note log and attributes
//! - `cart` - Cart snapshot (items, coupons, fees, shipping)
//! - `status` - OrderStatus state machine

mod aggregate;
mod cart;
mod status;

pub use aggregate::{Order, OrderNote, StatusChange};
pub use cart::{AppliedCoupon, Cart, CartFee, CartItem, ShippingCharge};
pub use status::OrderStatus;
