//! Button tokens.
//!
//! Every inline button carries a compact token string; the engine parses it
//! back into an [`ActionToken`] before dispatch. Parsing is strict: unknown
//! heads and empty payloads are rejected, which keeps stale or hand-crafted
//! callbacks out of the state machine.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ActionToken {
    // ========== Navigation ==========
    Catalog,
    Cart,
    Profile,
    Admin,
    MainMenu,
    Category(String),
    Page(usize),
    Product(i64),
    BackToProducts,

    // ========== Cart ==========
    AddToCart(i64),
    RemoveFromCart(i64),
    Checkout,
    ClearCart,

    // ========== Checkout ==========
    AddComment,
    FinishOrder,

    // ========== Admin ==========
    AddProduct,
    ManageProducts,
    Stats,
    Orders,
    Edit(i64),
    Delete(i64),
    ConfirmDelete(i64),
    PickCategory(String),
    FinishImages,
}

impl ActionToken {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.split_once(':') {
            None => match raw {
                "catalog" => Some(Self::Catalog),
                "cart" => Some(Self::Cart),
                "profile" => Some(Self::Profile),
                "admin" => Some(Self::Admin),
                "main_menu" => Some(Self::MainMenu),
                "back_to_products" => Some(Self::BackToProducts),
                "checkout" => Some(Self::Checkout),
                "cart_clear" => Some(Self::ClearCart),
                "comment_add" => Some(Self::AddComment),
                "order_finish" => Some(Self::FinishOrder),
                "admin_add_product" => Some(Self::AddProduct),
                "admin_products" => Some(Self::ManageProducts),
                "admin_stats" => Some(Self::Stats),
                "admin_orders" => Some(Self::Orders),
                "images_done" => Some(Self::FinishImages),
                _ => None,
            },
            Some((head, payload)) if !payload.is_empty() => match head {
                "category" => Some(Self::Category(payload.to_string())),
                "page" => payload.parse().ok().map(Self::Page),
                "product" => payload.parse().ok().map(Self::Product),
                "cart_add" => payload.parse().ok().map(Self::AddToCart),
                "cart_remove" => payload.parse().ok().map(Self::RemoveFromCart),
                "edit" => payload.parse().ok().map(Self::Edit),
                "delete" => payload.parse().ok().map(Self::Delete),
                "delete_confirm" => payload.parse().ok().map(Self::ConfirmDelete),
                "pick_category" => Some(Self::PickCategory(payload.to_string())),
                _ => None,
            },
            Some(_) => None,
        }
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => write!(f, "catalog"),
            Self::Cart => write!(f, "cart"),
            Self::Profile => write!(f, "profile"),
            Self::Admin => write!(f, "admin"),
            Self::MainMenu => write!(f, "main_menu"),
            Self::Category(name) => write!(f, "category:{name}"),
            Self::Page(n) => write!(f, "page:{n}"),
            Self::Product(id) => write!(f, "product:{id}"),
            Self::BackToProducts => write!(f, "back_to_products"),
            Self::AddToCart(id) => write!(f, "cart_add:{id}"),
            Self::RemoveFromCart(id) => write!(f, "cart_remove:{id}"),
            Self::Checkout => write!(f, "checkout"),
            Self::ClearCart => write!(f, "cart_clear"),
            Self::AddComment => write!(f, "comment_add"),
            Self::FinishOrder => write!(f, "order_finish"),
            Self::AddProduct => write!(f, "admin_add_product"),
            Self::ManageProducts => write!(f, "admin_products"),
            Self::Stats => write!(f, "admin_stats"),
            Self::Orders => write!(f, "admin_orders"),
            Self::Edit(id) => write!(f, "edit:{id}"),
            Self::Delete(id) => write!(f, "delete:{id}"),
            Self::ConfirmDelete(id) => write!(f, "delete_confirm:{id}"),
            Self::PickCategory(name) => write!(f, "pick_category:{name}"),
            Self::FinishImages => write!(f, "images_done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_their_string_form() {
        let tokens = vec![
            ActionToken::Catalog,
            ActionToken::MainMenu,
            ActionToken::Category("Sofas".into()),
            ActionToken::Page(3),
            ActionToken::Product(42),
            ActionToken::AddToCart(42),
            ActionToken::RemoveFromCart(7),
            ActionToken::ConfirmDelete(9),
            ActionToken::PickCategory("Beds".into()),
            ActionToken::FinishImages,
            ActionToken::FinishOrder,
        ];
        for token in tokens {
            let raw = token.to_string();
            assert_eq!(ActionToken::parse(&raw), Some(token), "{raw}");
        }
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for raw in ["", "nope", "product:", "product:abc", "page:-1", "cart_add:1:2", ":5", "catalog:1"] {
            assert_eq!(ActionToken::parse(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn category_names_may_contain_spaces() {
        assert_eq!(
            ActionToken::parse("category:Office chairs"),
            Some(ActionToken::Category("Office chairs".into()))
        );
    }
}
