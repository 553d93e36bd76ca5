//! Dialog states and the drafts they carry.

use rust_decimal::Decimal;

use shared::models::Product;
use shared::models::cart::{CartItem, cart_total};
use shared::models::order::OrderLine;

/// Partially collected product, filled in across the authoring states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    /// Set when editing an existing product, absent for a new one.
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub images: Vec<String>,
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded draft for editing; uploads append to the existing images.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            price: Some(product.price),
            category: Some(product.category.clone()),
            images: product.images.clone(),
        }
    }
}

/// Checkout draft: cart lines snapshotted when checkout starts, plus the
/// contact details collected step by step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub comment: Option<String>,
}

impl OrderDraft {
    pub fn from_cart(items: &[CartItem]) -> Self {
        Self {
            total: cart_total(items),
            lines: items.iter().cloned().map(OrderLine::from).collect(),
            phone: None,
            address: None,
            comment: None,
        }
    }
}

/// Where a user currently is in the conversation.
///
/// Browsing states carry cursors (category, page) so "back" can restore the
/// view; input states carry the draft being built.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogState {
    #[default]
    MainMenu,
    Catalog,
    CategoryView {
        category: String,
        page: usize,
    },
    ProductView {
        product_id: i64,
        /// Category the user came from, if they arrived via a listing.
        category: Option<String>,
    },
    ConfirmDelete {
        product_id: i64,
        category: Option<String>,
    },
    CartView,
    OrderPhone {
        draft: OrderDraft,
    },
    OrderAddress {
        draft: OrderDraft,
    },
    OrderComment {
        draft: OrderDraft,
    },
    Profile,
    AdminMenu,
    WaitingName {
        draft: ProductDraft,
    },
    WaitingDescription {
        draft: ProductDraft,
    },
    WaitingPrice {
        draft: ProductDraft,
    },
    WaitingCategory {
        draft: ProductDraft,
    },
    WaitingImages {
        draft: ProductDraft,
    },
}

impl DialogState {
    /// Stable tag for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DialogState::MainMenu => "main_menu",
            DialogState::Catalog => "catalog",
            DialogState::CategoryView { .. } => "category_view",
            DialogState::ProductView { .. } => "product_view",
            DialogState::ConfirmDelete { .. } => "confirm_delete",
            DialogState::CartView => "cart_view",
            DialogState::OrderPhone { .. } => "order_phone",
            DialogState::OrderAddress { .. } => "order_address",
            DialogState::OrderComment { .. } => "order_comment",
            DialogState::Profile => "profile",
            DialogState::AdminMenu => "admin_menu",
            DialogState::WaitingName { .. } => "waiting_name",
            DialogState::WaitingDescription { .. } => "waiting_description",
            DialogState::WaitingPrice { .. } => "waiting_price",
            DialogState::WaitingCategory { .. } => "waiting_category",
            DialogState::WaitingImages { .. } => "waiting_images",
        }
    }
}
